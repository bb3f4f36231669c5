//! Assistant CLI command
//!
//! With a message argument, prints one reply. Without one, reads messages
//! from stdin line by line and keeps the conversation going.

use anyhow::Result;
use clap::Parser;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

use folio_core::assistant::{Assistant, ChatMessage};
use folio_core::catalog::static_projects;
use folio_core::config::SiteConfig;
use folio_core::profile::Profile;

#[derive(Parser, Debug)]
pub struct ChatCommand {
    /// Message to send; omit for an interactive session
    pub message: Option<String>,

    /// Override the configured model
    #[clap(long)]
    pub model: Option<String>,
}

impl ChatCommand {
    pub async fn execute(self, config: &SiteConfig) -> Result<()> {
        let mut assistant =
            Assistant::from_config(&config.assistant, &Profile::default(), static_projects());
        if let Some(model) = self.model {
            assistant.override_model(model);
        }

        if let Some(message) = self.message {
            println!("{}", assistant.reply(&message).await);
            return Ok(());
        }

        println!("{}", ChatMessage::welcome().text);
        let mut stdout = io::stdout();
        let mut lines = BufReader::new(io::stdin()).lines();
        loop {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let message = line.trim();
            if message.is_empty() {
                continue;
            }
            if matches!(message, "exit" | "quit") {
                break;
            }
            println!("{}", assistant.reply(message).await);
        }

        Ok(())
    }
}
