//! Mandi CLI - find and rate suppliers from community reviews.

use clap::Parser;
use mandi_cli::commands::{self, open_store};
use mandi_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `--verbose` wins over `RUST_LOG`, which wins over `info`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> mandi_cli::Result<()> {
    // An explicit config file must load; the default one may be absent or stale
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!("Ignoring config file: {}", e);
            Config::default()
        }),
    };

    if let Some(db) = cli.db {
        config.settings.database = Some(db);
    }

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Detect(args) => {
            commands::execute_detect(args, &config, &formatter).await?;
        }
        Command::Hint(args) => {
            commands::execute_hint(args, &config, &formatter).await?;
        }
        Command::Post(args) => {
            let mut store = open_store(&config)?;
            commands::execute_post(args, &mut store, &config, &formatter).await?;
        }
        Command::Import(args) => {
            let mut store = open_store(&config)?;
            commands::execute_import(args, &mut store, &config, &formatter).await?;
        }
        Command::Scan(args) => {
            let mut store = open_store(&config)?;
            commands::execute_scan(args, &mut store, &config, &formatter).await?;
        }
        Command::Suppliers(args) => {
            let store = open_store(&config)?;
            commands::execute_suppliers(args, &store, &config, &formatter).await?;
        }
        Command::Feed(args) => {
            let store = open_store(&config)?;
            commands::execute_feed(args, &store, &config, &formatter).await?;
        }
        Command::Vote(args) => {
            let mut store = open_store(&config)?;
            commands::execute_vote(args, &mut store, &config, &formatter).await?;
        }
        Command::Stats(args) => {
            let store = open_store(&config)?;
            commands::execute_stats(args, &store, &config, &formatter).await?;
        }
        Command::Watch(args) => {
            let mut store = open_store(&config)?;
            commands::execute_watch(args, &mut store, &config, &formatter).await?;
        }
    }

    Ok(())
}
