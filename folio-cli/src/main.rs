//! Folio - browse and curate a portfolio catalog from the terminal

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use folio_core::config::SiteConfig;

mod catalog_cli;
mod chat_cli;
mod link_cli;
mod profile_cli;

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "folio",
    about = "Browse and curate a portfolio project catalog",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Set log level
    #[clap(long, default_value = "warn", global = true)]
    log_level: LogLevel,

    /// Emit logs as JSON
    #[clap(long, global = true)]
    log_json: bool,

    /// Site configuration file (defaults to $FOLIO_CONFIG, then the user config dir)
    #[clap(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
enum Command {
    /// List, inspect and submit portfolio projects
    Catalog(catalog_cli::CatalogCommand),

    /// Convert image sharing links into directly renderable URLs
    Link(link_cli::LinkCommand),

    /// Chat with the portfolio assistant
    Chat(chat_cli::ChatCommand),

    /// Show the site owner's profile
    Profile(profile_cli::ProfileCommand),
}

/// Initialize tracing with CLI flags
fn initialize_tracing(log_level: &LogLevel, json: bool) {
    let filter = EnvFilter::new(log_level.to_filter_directive());

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level, cli.log_json);

    match cli.command {
        Command::Link(command) => command.execute(),
        Command::Profile(command) => command.execute(),
        Command::Catalog(command) => {
            let config = SiteConfig::load(cli.config.as_deref())?;
            debug!("Loaded config: store backend {:?}", config.store.backend);
            command.execute(&config).await
        }
        Command::Chat(command) => {
            let config = SiteConfig::load(cli.config.as_deref())?;
            command.execute(&config).await
        }
    }
}
