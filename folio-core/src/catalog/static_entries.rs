//! Curated projects compiled into the site
//!
//! These are always shown, below anything uploaded through the admin form.
//! Image links are written as Drive sharing links and normalized once, on
//! first access.

use once_cell::sync::Lazy;

use crate::link::normalize;
use crate::project::{Orientation, Project};

struct Entry {
    id: &'static str,
    title: &'static str,
    category: &'static str,
    drive_link: &'static str,
    description: &'static str,
    year: &'static str,
    tools: &'static [&'static str],
    orientation: Orientation,
    tags: &'static [&'static str],
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: "1",
        title: "Black Hole Mystery",
        category: "Science Illustration",
        drive_link: "https://drive.google.com/file/d/1yoYpwI68zHk1Obvp44VazwhG5CfzDZnf/view?usp=drive_link",
        description: "A dramatic space illustration featuring a swirling black hole, surrounding planets, and an astronaut being pulled toward the singularity. Designed as a high-impact educational poster explaining the mysteries of black holes.",
        year: "2025",
        tools: &["Photoshop", "CorelDRAW"],
        orientation: Orientation::Portrait,
        tags: &["Space Art", "Education", "Sci-Fi", "Poster Design"],
    },
    Entry {
        id: "2",
        title: "Super Delicious Burger",
        category: "Food Advertisement",
        drive_link: "https://drive.google.com/file/d/19obvbcwiJXnJLSUqCpEQCdl5TBapCSmk/view?usp=drive_link",
        description: "A vibrant and energetic fast-food poster featuring a juicy burger, bold typography, and an excited customer enjoying a bite. Designed for promotional marketing campaigns.",
        year: "2025",
        tools: &["Photoshop"],
        orientation: Orientation::Portrait,
        tags: &["Food Photography", "Marketing", "Typography", "Manipulation"],
    },
    Entry {
        id: "3",
        title: "Mawa Vitamin Energy",
        category: "Product Advertisement",
        drive_link: "https://drive.google.com/file/d/17QaD1gr9XePtvv7YzOury_hz2nFss52G/view?usp=drive_link",
        description: "A premium product showcase of a vitamin-infused energy drink placed in a lush jungle environment. Fresh fruits, water droplets, and vines highlight the natural and refreshing essence of the drink.",
        year: "2025",
        tools: &["Photoshop", "Lightroom"],
        orientation: Orientation::Portrait,
        tags: &["Product Design", "Nature", "Compositing", "Beverage"],
    },
    Entry {
        id: "4",
        title: "Super Delicious Pizza",
        category: "Food Advertisement",
        drive_link: "https://drive.google.com/file/d/1wftNbPuW88NQ3LJp1OPdpipJBn68LOid/view?usp=drive_link",
        description: "A fiery and bold pizza advertisement poster showcasing a hot, freshly baked pizza with dynamic motion effects and promotional highlights like 50% off and order now.",
        year: "2025",
        tools: &["Photoshop"],
        orientation: Orientation::Portrait,
        tags: &["Food Promo", "Motion Effects", "Social Media", "Advertising"],
    },
    Entry {
        id: "5",
        title: "Haunted Witch House",
        category: "Fantasy Illustration",
        drive_link: "https://drive.google.com/file/d/1ql61-4LzbHcRTam-VTWpxAdadLzgMDxw/view?usp=drive_link",
        description: "A dark and atmospheric illustration depicting an eerie witch house in a stormy night setting. Lit windows, pumpkins, dead trees, and dramatic lighting create a haunting visual narrative.",
        year: "2025",
        tools: &["Photoshop"],
        orientation: Orientation::Landscape,
        tags: &["Concept Art", "Atmospheric", "Horror", "Digital Painting"],
    },
    Entry {
        id: "6",
        title: "Feel the Music",
        category: "Brand Advertisement",
        drive_link: "https://drive.google.com/file/d/1ajdo8pg8y5WcdcKXX338iGV4G-yDoRgC/view?usp=drive_link",
        description: "Premium headphones delivering immersive sound, deep bass, and true emotion—feel the music.",
        year: "2025",
        tools: &["Photoshop"],
        orientation: Orientation::Portrait,
        tags: &["Branding", "Lifestyle", "Product", "Manipulation"],
    },
];

static STATIC_PROJECTS: Lazy<Vec<Project>> = Lazy::new(|| {
    ENTRIES
        .iter()
        .map(|e| Project {
            id: e.id.to_string(),
            title: e.title.to_string(),
            category: e.category.to_string(),
            image_url: normalize(e.drive_link),
            description: Some(e.description.to_string()),
            client: None,
            year: Some(e.year.to_string()),
            tools: e.tools.iter().map(|t| t.to_string()).collect(),
            tags: e.tags.iter().map(|t| t.to_string()).collect(),
            orientation: Some(e.orientation),
            created_at: None,
        })
        .collect()
});

/// The compiled-in projects, in declaration order
pub fn static_projects() -> &'static [Project] {
    &STATIC_PROJECTS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_static_ids_unique() {
        let ids: HashSet<&str> = static_projects().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), static_projects().len());
    }

    #[test]
    fn test_static_images_are_direct() {
        for project in static_projects() {
            assert!(
                crate::link::is_direct(&project.image_url),
                "{} has a raw link",
                project.title
            );
            assert!(!project.is_dynamic());
        }
    }
}
