// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hush - a Telegram bot that keeps encrypted credentials and semantic
//! context.
//!
//! This is the binary entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Hush - encrypted credentials and semantic context over Telegram.
#[derive(Parser, Debug)]
#[command(name = "hush", version, about, long_about = None)]
struct Cli {
    /// Path to a configuration file (overrides the default lookup).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the webhook server (the default).
    Serve,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => hush_config::load_config_from_path(path),
        None => hush_config::load_config(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            eprintln!("hush: configuration error: {err}");
            std::process::exit(1);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.agent.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Some(Commands::Serve) | None => {
            if let Err(err) = hush::serve::run(&config).await {
                error!(error = %err, "server exited with error");
                std::process::exit(1);
            }
        }
    }
}
