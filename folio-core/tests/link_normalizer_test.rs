//! Image link normalization over realistic inputs

use folio_core::link::{extract_file_id, is_direct, normalize, LinkNormalizer};

const SHARING_LINKS: &[(&str, &str)] = &[
    (
        "https://drive.google.com/file/d/1yoYpwI68zHk1Obvp44VazwhG5CfzDZnf/view?usp=drive_link",
        "1yoYpwI68zHk1Obvp44VazwhG5CfzDZnf",
    ),
    (
        "https://drive.google.com/file/d/1ql61-4LzbHcRTam-VTWpxAdadLzgMDxw/view",
        "1ql61-4LzbHcRTam-VTWpxAdadLzgMDxw",
    ),
    ("https://drive.google.com/open?id=ABC_123", "ABC_123"),
    ("https://drive.google.com/uc?export=view&id=XYZ", "XYZ"),
];

#[test]
fn test_sharing_links_become_thumbnails() {
    for (link, id) in SHARING_LINKS {
        let normalized = normalize(link);
        assert_eq!(
            normalized,
            format!("https://drive.google.com/thumbnail?id={id}&sz=w1920"),
            "{link}"
        );
        assert!(is_direct(&normalized));
        assert_eq!(normalize(&normalized), normalized, "not idempotent: {link}");
    }
}

#[test]
fn test_non_drive_links_untouched() {
    for link in [
        "https://i.imgur.com/abc.png",
        "https://example.com/d/not-drive/view",
        "relative/path.jpg",
        "not a url at all",
    ] {
        assert_eq!(normalize(link), link);
        assert_eq!(extract_file_id(link), None);
    }
}

#[test]
fn test_drive_link_without_id_untouched() {
    let link = "https://drive.google.com/drive/folders";
    assert_eq!(normalize(link), link);
}

#[test]
fn test_empty_input() {
    assert_eq!(normalize(""), "");
    assert_eq!(LinkNormalizer::with_width(640).normalize(""), "");
}

#[test]
fn test_custom_width() {
    let normalizer = LinkNormalizer::with_width(800);
    assert_eq!(
        normalizer.normalize(SHARING_LINKS[0].0),
        format!("https://drive.google.com/thumbnail?id={}&sz=w800", SHARING_LINKS[0].1)
    );
}
