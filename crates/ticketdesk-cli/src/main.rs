use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use ticketdesk_client::{ApiClient, FileStorage, StorageCredentials};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use url::Url;

mod settings;
mod sub_commands;

use settings::{Settings, DEFAULT_CONFIG_FILE};

const DEFAULT_WORK_DIR: &str = ".ticketdesk";
const STORAGE_FILE: &str = "storage.json";

/// Command line client for the Ticketdesk API
#[derive(Parser)]
#[command(name = "ticketdesk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to working dir
    #[arg(short, long)]
    work_dir: Option<PathBuf>,
    /// Path to config file, defaults to config.toml in the working dir
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// API base address
    #[arg(short, long, env = "TICKETDESK_API_BASE_URL")]
    base_url: Option<String>,
    /// Logging level
    #[arg(short, long, default_value = "error")]
    log_level: Level,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the stored access token
    Token(sub_commands::token::TokenSubCommand),
    /// Work with tickets
    Tickets(sub_commands::tickets::TicketsSubCommand),
    /// Call an arbitrary endpoint and print the JSON response
    Fetch(sub_commands::fetch::FetchSubCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Cli = Cli::parse();
    let default_filter = args.log_level;

    let hyper_filter = "hyper=warn,reqwest=warn";

    let env_filter = EnvFilter::new(format!("{},{}", default_filter, hyper_filter));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let work_dir = match &args.work_dir {
        Some(work_dir) => work_dir.clone(),
        None => home::home_dir()
            .ok_or(anyhow!("Could not determine home directory"))?
            .join(DEFAULT_WORK_DIR),
    };

    fs::create_dir_all(&work_dir)?;

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| work_dir.join(DEFAULT_CONFIG_FILE));
    let settings = Settings::load(&config_path)?;

    let storage = FileStorage::new(work_dir.join(STORAGE_FILE));

    let mut builder = ApiClient::builder()
        .base_url(settings.base_url(
            args.base_url.as_deref().filter(|url| !url.trim().is_empty()),
        ))
        .credentials(StorageCredentials::new(storage.clone()));
    if let Some(timeout) = settings.timeout() {
        builder = builder.timeout(timeout);
    }
    if let Some(proxy) = &settings.proxy {
        builder = builder.proxy(Url::parse(proxy)?);
    }
    let client = builder.build()?;

    tracing::debug!(base_url = %client.base_url(), "Using API");

    match &args.command {
        Commands::Token(sub_command_args) => {
            sub_commands::token::token(&storage, sub_command_args).await
        }
        Commands::Tickets(sub_command_args) => {
            sub_commands::tickets::tickets(&client, sub_command_args).await
        }
        Commands::Fetch(sub_command_args) => {
            sub_commands::fetch::fetch(&client, sub_command_args).await
        }
    }
}
