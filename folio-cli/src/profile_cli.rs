//! Profile CLI command

use anyhow::Result;
use clap::Parser;

use folio_core::profile::Profile;

/// Show who the portfolio belongs to
#[derive(Parser, Debug)]
pub struct ProfileCommand {
    /// Output as JSON
    #[clap(long)]
    pub json: bool,
}

impl ProfileCommand {
    pub fn execute(self) -> Result<()> {
        let profile = Profile::default();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&profile)?);
            return Ok(());
        }

        println!("{} - {}", profile.name, profile.role);
        println!("{}", profile.tagline);
        println!();
        println!("Brand:   {}", profile.brand);
        println!("Logo:    {}", profile.logo_url);
        println!("Contact: {}", profile.mailto());
        println!("Skills:  {}", profile.skills.join(", "));

        if !profile.social_links.is_empty() {
            println!();
            for link in &profile.social_links {
                println!("{} {:<10} {}", link.icon.glyph(), link.platform, link.url);
            }
        }

        println!("\n{}", profile.about);
        Ok(())
    }
}
