//! Dropsearch CLI entry point
//!
//! # Usage
//!
//! ```bash
//! # Search interactively (default command)
//! dropsearch
//! dropsearch browse rust
//!
//! # One-shot search
//! dropsearch search async rust
//! dropsearch s rust --json
//!
//! # Configuration
//! dropsearch config set debounce_ms=300
//! dropsearch config get app_url
//! dropsearch config path
//!
//! # Shell completions
//! dropsearch completions zsh
//! ```
//!
//! # Configuration
//!
//! On first run, dropsearch prompts for a Raindrop.io API token. Configuration
//! is stored in the user's config directory
//! (`~/.config/dropsearch/config.toml` on Linux).

use colored::Colorize;
use dropsearch::{
    AppError,
    api::{RaindropClient, fetch_articles},
    cli::{Cli, Commands, ConfigCommands, parse_setting, write_completions},
    config::{AppConfig, KEYS},
    logging::{self, LogTarget},
    search::SearchSession,
    ui::{ArticleRow, OutputWriter, RatatuiBrowser, StdoutWriter, ToastWriter},
};
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

type Result<T> = std::result::Result<T, AppError>;

fn build_runtime() -> Result<Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}

fn client_for(config: &AppConfig) -> Result<RaindropClient> {
    let token = config.require_token()?.clone();
    Ok(RaindropClient::new(&config.api_url, token, config.timeout())?)
}

/// Map unknown-key lookups onto a message listing the valid keys
fn unknown_key(err: ::config::ConfigError) -> AppError {
    match err {
        ::config::ConfigError::NotFound(key) => AppError::InvalidInput(format!(
            "Unknown configuration key: '{key}'. Available keys: {}",
            KEYS.join(", ")
        )),
        other => other.into(),
    }
}

/// Run the interactive browser
fn handle_browse_command(config: &AppConfig, query: Option<String>) -> Result<()> {
    let runtime = build_runtime()?;
    let client = Arc::new(client_for(config)?);
    let toasts = Arc::new(ToastWriter::new());
    let output: Arc<dyn OutputWriter> = toasts.clone();

    let mut session =
        SearchSession::new(client, output, config.debounce(), runtime.handle().clone());
    if let Some(query) = query {
        session.set_query(query);
    }
    session.start();
    tracing::info!(query = session.query(), "starting browser");

    RatatuiBrowser::new(config.app_url.as_str()).run(&mut session, &toasts)?;
    Ok(())
}

/// Run one search and print the results
fn handle_search_command(
    config: &AppConfig,
    words: &[String],
    json: bool,
    quiet: bool,
) -> Result<()> {
    let query = words.join(" ");
    let client = client_for(config)?;
    let runtime = build_runtime()?;
    let output = StdoutWriter::new();

    let articles = runtime.block_on(fetch_articles(&client, &query, &output));

    if json {
        println!("{}", serde_json::to_string_pretty(&articles)?);
        return Ok(());
    }

    for row in ArticleRow::from_articles(&articles) {
        println!(
            "{}  {}  {}",
            row.title.bold(),
            row.subtitle.magenta(),
            row.accessory.dimmed()
        );
        println!("  {}", row.link.cyan());
    }

    if !quiet {
        match articles.len() {
            0 => output.info("No articles found"),
            1 => output.info("1 result"),
            n => output.info(&format!("{n} results")),
        }
    }

    Ok(())
}

fn handle_config_command(config: &AppConfig, command: &ConfigCommands, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let (key, value) = parse_setting(setting).ok_or_else(|| {
                AppError::InvalidInput(
                    "Invalid format. Use: dropsearch config set key=value".into(),
                )
            })?;

            let stored = AppConfig::update(key, value).map_err(unknown_key)?;
            if !quiet {
                println!("Set {key} = {}", stored.get(key).map_err(unknown_key)?);
            }
        }
        ConfigCommands::Get { key } => {
            println!("{}", config.get(key).map_err(unknown_key)?);
        }
        ConfigCommands::Path => {
            println!("{}", AppConfig::config_path()?.display());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let command = cli.get_command();

    if let Commands::Completions { shell } = command {
        write_completions(shell, &mut io::stdout());
        return Ok(());
    }

    let target = match command {
        Commands::Browse { .. } => LogTarget::default_file(),
        _ => LogTarget::Stderr,
    };
    let _guard = logging::init(&target)?;

    match command {
        Commands::Config { command } => {
            let config = AppConfig::load()?;
            let quiet = cli.quiet || config.quiet;
            handle_config_command(&config, &command, quiet)
        }
        Commands::Browse { query } => {
            let config = AppConfig::load_or_setup()?;
            handle_browse_command(&config, query)
        }
        Commands::Search { query, json } => {
            let config = AppConfig::load_or_setup()?;
            let quiet = cli.quiet || config.quiet;
            handle_search_command(&config, &query, json, quiet)
        }
        Commands::Completions { .. } => Ok(()),
    }
}
