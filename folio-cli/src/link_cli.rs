//! Link CLI commands

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead};

use folio_core::link::{extract_file_id, LinkNormalizer, DEFAULT_THUMBNAIL_WIDTH};

#[derive(Parser, Debug)]
pub struct LinkCommand {
    #[clap(subcommand)]
    pub command: LinkSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum LinkSubcommand {
    /// Print the direct image URL for each link (reads stdin when none are given)
    Normalize {
        links: Vec<String>,

        /// Requested thumbnail width in pixels
        #[clap(long, default_value_t = DEFAULT_THUMBNAIL_WIDTH)]
        width: u32,
    },

    /// Print the Drive file id embedded in a link
    Id { link: String },
}

impl LinkCommand {
    pub fn execute(self) -> Result<()> {
        match self.command {
            LinkSubcommand::Normalize { links, width } => {
                let normalizer = LinkNormalizer::with_width(width);
                if links.is_empty() {
                    for line in io::stdin().lock().lines() {
                        println!("{}", normalizer.normalize(line?.trim()));
                    }
                } else {
                    for link in links {
                        println!("{}", normalizer.normalize(&link));
                    }
                }
                Ok(())
            }
            LinkSubcommand::Id { link } => match extract_file_id(&link) {
                Some(id) => {
                    println!("{id}");
                    Ok(())
                }
                None => anyhow::bail!("No Drive file id found in '{link}'"),
            },
        }
    }
}
