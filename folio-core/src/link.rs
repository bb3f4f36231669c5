//! Image link normalization
//!
//! Project images are hosted on Google Drive and pasted in as sharing links
//! (`https://drive.google.com/file/d/<ID>/view?usp=sharing`). Those pages are
//! not embeddable, so every link is rewritten to the Drive thumbnail endpoint
//! before it is stored or displayed:
//!
//! ```text
//! https://drive.google.com/file/d/<ID>/view   ─┐
//! https://drive.google.com/open?id=<ID>       ─┼─▶ https://drive.google.com/thumbnail?id=<ID>&sz=w1920
//! https://drive.google.com/uc?id=<ID>&export  ─┘
//! ```
//!
//! Anything that is not a Drive link, or a Drive link without a recognizable
//! file id, is passed through untouched.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

/// Host marker for links we know how to rewrite
pub const DRIVE_HOST: &str = "drive.google.com";

/// Default requested thumbnail width in pixels
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 1920;

/// `/d/<ID>` followed by `/`, `?`, `#` or end of string
static PATH_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/d/([^/?#&]+)").expect("path id pattern is valid"));

/// `?id=<ID>` or `&id=<ID>` up to the next `&`, `#` or end of string
static QUERY_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[?&]id=([^&#]+)").expect("query id pattern is valid"));

/// Rewrites Drive sharing links into direct thumbnail URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkNormalizer {
    width: u32,
}

impl Default for LinkNormalizer {
    fn default() -> Self {
        Self {
            width: DEFAULT_THUMBNAIL_WIDTH,
        }
    }
}

impl LinkNormalizer {
    /// Create a normalizer requesting thumbnails of the given width
    pub fn with_width(width: u32) -> Self {
        Self { width }
    }

    /// Thumbnail width requested in rewritten links
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Normalize a raw link into a directly renderable image URL
    ///
    /// # Examples
    /// ```
    /// # use folio_core::link::LinkNormalizer;
    /// let normalizer = LinkNormalizer::default();
    /// assert_eq!(
    ///     normalizer.normalize("https://drive.google.com/file/d/abc123/view?usp=sharing"),
    ///     "https://drive.google.com/thumbnail?id=abc123&sz=w1920"
    /// );
    /// assert_eq!(normalizer.normalize("https://example.com/a.png"), "https://example.com/a.png");
    /// assert_eq!(normalizer.normalize(""), "");
    /// ```
    pub fn normalize(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }

        match extract_file_id(raw) {
            Some(id) => {
                let direct = self.thumbnail_url(id);
                trace!("Normalized image link '{}' → '{}'", raw, direct);
                direct
            }
            None => raw.to_string(),
        }
    }

    /// Build the direct thumbnail URL for a Drive file id
    pub fn thumbnail_url(&self, file_id: &str) -> String {
        format!(
            "https://{DRIVE_HOST}/thumbnail?id={file_id}&sz=w{}",
            self.width
        )
    }
}

/// Normalize a raw link with the default thumbnail width
pub fn normalize(raw: &str) -> String {
    LinkNormalizer::default().normalize(raw)
}

/// Extract the Drive file id from a link
///
/// Returns `None` for non-Drive links. The path form is tried before the
/// query form; the first match wins.
pub fn extract_file_id(url: &str) -> Option<&str> {
    if !url.contains(DRIVE_HOST) {
        return None;
    }

    PATH_ID
        .captures(url)
        .or_else(|| QUERY_ID.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|id| !id.is_empty())
}

/// Whether a URL is already in thumbnail form
pub fn is_direct(url: &str) -> bool {
    url.contains(DRIVE_HOST) && url.contains("/thumbnail?") && extract_file_id(url).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_path_form() {
        let url = "https://drive.google.com/file/d/1yoYpwI68zHk1Obvp44VazwhG5CfzDZnf/view?usp=drive_link";
        assert_eq!(
            normalize(url),
            "https://drive.google.com/thumbnail?id=1yoYpwI68zHk1Obvp44VazwhG5CfzDZnf&sz=w1920"
        );
    }

    #[test]
    fn test_path_form_at_end_of_string() {
        assert_eq!(
            extract_file_id("https://drive.google.com/file/d/XYZ"),
            Some("XYZ")
        );
        assert_eq!(
            extract_file_id("https://drive.google.com/file/d/XYZ?usp=sharing"),
            Some("XYZ")
        );
    }

    #[test]
    fn test_query_form() {
        assert_eq!(
            extract_file_id("https://drive.google.com/open?id=abc-_9"),
            Some("abc-_9")
        );
        assert_eq!(
            extract_file_id("https://drive.google.com/uc?export=view&id=abc&foo=bar"),
            Some("abc")
        );
    }

    #[test]
    fn test_path_form_wins_over_query_form() {
        assert_eq!(
            extract_file_id("https://drive.google.com/file/d/first/view?id=second"),
            Some("first")
        );
    }

    #[test]
    fn test_pass_through() {
        for url in [
            "https://example.com/image.png",
            "not a url at all",
            "https://cdn.example.com/d/abc/view",
            "https://drive.google.com/drive/folders",
        ] {
            assert_eq!(normalize(url), url);
        }
    }

    #[test]
    fn test_idempotent() {
        let once = normalize("https://drive.google.com/file/d/abc/view");
        assert_eq!(normalize(&once), once);
        assert!(is_direct(&once));
    }

    #[test]
    fn test_custom_width() {
        let normalizer = LinkNormalizer::with_width(800);
        assert_eq!(
            normalizer.normalize("https://drive.google.com/open?id=abc"),
            "https://drive.google.com/thumbnail?id=abc&sz=w800"
        );
    }

    #[test]
    fn test_extract_and_build_are_inverse() {
        let normalizer = LinkNormalizer::default();
        let url = normalizer.thumbnail_url("file_42");
        assert_eq!(extract_file_id(&url), Some("file_42"));
    }
}
