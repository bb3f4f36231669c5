//! Site profile - who the portfolio belongs to
//!
//! Static content shown around the catalog and fed to the assistant as
//! context. Edit the constants here to rebrand the site.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::link::normalize;

pub const OWNER_NAME: &str = "Akash Prajapati";
pub const OWNER_ROLE: &str = "Visual/Graphic Designer";
pub const OWNER_EMAIL: &str = "akashaspprajapati887@gmail.com";
pub const TAGLINE: &str =
    "I craft digital experiences that blend aesthetic beauty with functional design.";

pub const BRAND_NAME: &str = "Graphic.Vortex";
pub const BRAND_LOGO_LINK: &str =
    "https://drive.google.com/file/d/1JTRDm92m8ftXB_OY6dt5W_q9kRfA8pIa/view";
pub const BRAND_LOGO_ALT: &str = "Graphic Vortex Logo";

pub const ABOUT: &str = "I am a passionate graphic designer with over 3+ years of experience in \
branding, digital illustration, and graphic design. My journey began with a love for traditional \
art, which evolved into a career in digital creativity. I believe that good design is not just \
about making things look good—it's about effective communication and solving problems visually. \
Every line, color, and shape serves a purpose.";

pub const SKILLS: &[&str] = &[
    "Adobe Photoshop",
    "Adobe Illustrator",
    "Brand Identity",
    "Typography",
    "CorelDraw",
    "Print Design",
];

/// Icon shown next to a social link
///
/// Parsing is strict so a misspelled name is an error instead of silently
/// rendering the fallback; `Mail` is the explicit default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocialIcon {
    Instagram,
    Linkedin,
    Twitter,
    #[default]
    Mail,
}

impl SocialIcon {
    pub const ALL: [SocialIcon; 4] = [
        SocialIcon::Instagram,
        SocialIcon::Linkedin,
        SocialIcon::Twitter,
        SocialIcon::Mail,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SocialIcon::Instagram => "Instagram",
            SocialIcon::Linkedin => "Linkedin",
            SocialIcon::Twitter => "Twitter",
            SocialIcon::Mail => "Mail",
        }
    }

    /// Short label for text-only surfaces such as the CLI
    pub fn glyph(&self) -> &'static str {
        match self {
            SocialIcon::Instagram => "[ig]",
            SocialIcon::Linkedin => "[in]",
            SocialIcon::Twitter => "[x]",
            SocialIcon::Mail => "[@]",
        }
    }
}

impl fmt::Display for SocialIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SocialIcon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SocialIcon::ALL
            .into_iter()
            .find(|icon| icon.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown social icon '{s}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
    #[serde(default)]
    pub icon: SocialIcon,
}

/// Public profile of the site owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub email: String,
    pub tagline: String,
    pub brand: String,
    pub logo_url: String,
    pub logo_alt: String,
    pub about: String,
    pub skills: Vec<String>,
    pub social_links: Vec<SocialLink>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: OWNER_NAME.to_string(),
            role: OWNER_ROLE.to_string(),
            email: OWNER_EMAIL.to_string(),
            tagline: TAGLINE.to_string(),
            brand: BRAND_NAME.to_string(),
            logo_url: normalize(BRAND_LOGO_LINK),
            logo_alt: BRAND_LOGO_ALT.to_string(),
            about: ABOUT.to_string(),
            skills: SKILLS.iter().map(|s| s.to_string()).collect(),
            social_links: vec![
                SocialLink {
                    platform: "Instagram".to_string(),
                    url: "https://www.instagram.com/graphic_vortex_".to_string(),
                    icon: SocialIcon::Instagram,
                },
                SocialLink {
                    platform: "LinkedIn".to_string(),
                    url: "https://www.linkedin.com/in/akash--prajapati/".to_string(),
                    icon: SocialIcon::Linkedin,
                },
            ],
        }
    }
}

impl Profile {
    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.email)
    }
}
