// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Academium CLI
//!
//! The `academium` binary hosts the catalog HTTP API and its maintenance
//! tooling.
//!
//! ## Commands
//!
//! - `academium serve` - Run the HTTP API (default when no command is given)
//! - `academium migrate [--dry-run]` - Apply pending schema migrations
//! - `academium config show|validate` - Configuration management

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use academium_core::domain::config::{LogFormat, ServiceConfig};

mod commands;

use commands::{ConfigCommand, MigrateCommand, ServeCommand};

/// Academium academic catalog service
#[derive(Parser)]
#[command(name = "academium")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "ACADEMIUM_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// HTTP bind address (overrides spec.server.bind_address)
    #[arg(long, global = true, env = "ACADEMIUM_HOST")]
    host: Option<String>,

    /// HTTP port (overrides spec.server.port and PUERTO)
    #[arg(long, global = true, env = "ACADEMIUM_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "ACADEMIUM_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the catalog HTTP API
    #[command(name = "serve")]
    Serve {
        #[command(flatten)]
        command: ServeCommand,
    },

    /// Apply database migrations
    #[command(name = "migrate")]
    Migrate {
        #[command(flatten)]
        command: MigrateCommand,
    },

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is not an error
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let command = match cli.command.unwrap_or(Commands::Serve {
        command: ServeCommand::default(),
    }) {
        // `config` commands load and report on configuration themselves
        Commands::Config { command } => {
            init_logging(cli.log_level.as_deref().unwrap_or("warn"), LogFormat::Compact)?;
            return commands::config::handle_command(command, cli.config).await;
        }
        other => other,
    };

    let mut config = ServiceConfig::load_or_default(cli.config).context("Failed to load configuration")?;
    if let Some(host) = cli.host {
        config.spec.server.bind_address = host;
    }
    if let Some(port) = cli.port {
        config.spec.server.port = port;
    }

    let level = cli.log_level.unwrap_or_else(|| config.spec.logging.level.clone());
    init_logging(&level, config.spec.logging.format)?;

    match command {
        Commands::Migrate { command } => commands::migrate::execute(command, &config).await,
        Commands::Serve { command } => commands::serve::run(command, config).await,
        Commands::Config { .. } => Ok(()),
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    match format {
        LogFormat::Compact => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact()
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_current_span(true)
            .init(),
    }

    Ok(())
}
