// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use academium_core::domain::config::{ServiceConfig, StorageKind, CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE};

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,

        /// Print the effective configuration as YAML
        #[arg(long)]
        yaml: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

pub async fn handle_command(command: ConfigCommand, config_override: Option<PathBuf>) -> Result<()> {
    match command {
        ConfigCommand::Show { paths, yaml } => show(config_override, paths, yaml),
        ConfigCommand::Validate { file } => validate(file.or(config_override)),
    }
}

fn show(config_override: Option<PathBuf>, show_paths: bool, as_yaml: bool) -> Result<()> {
    let config = ServiceConfig::load_or_default(config_override.clone()).context("Failed to load configuration")?;

    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        if let Some(path) = &config_override {
            println!("  1. --config flag: {}", path.display());
        } else {
            println!("  1. --config flag: {}", "(not set)".dimmed());
        }
        println!(
            "  2. {}: {}",
            CONFIG_PATH_ENV,
            std::env::var(CONFIG_PATH_ENV)
                .unwrap_or_else(|_| "(not set)".to_string())
                .dimmed()
        );
        println!("  3. {}", DEFAULT_CONFIG_FILE);
        println!();
    }

    if as_yaml {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    for line in describe(&config) {
        println!("{}", line);
    }

    Ok(())
}

/// Human-readable summary; the password is never printed
fn describe(config: &ServiceConfig) -> Vec<String> {
    let spec = &config.spec;
    let mut lines = vec![
        format!("{}", "Current configuration:".bold()),
        String::new(),
        format!("{}", "Server:".bold()),
        format!("  Listen: {}", config.bind_address()),
        String::new(),
        format!("{}", "Storage:".bold()),
    ];

    match spec.storage {
        StorageKind::Memory => lines.push("  Backend: memory".to_string()),
        StorageKind::Postgres => {
            lines.push("  Backend: postgres".to_string());
            if spec.database.url.is_some() {
                lines.push("  Connection: DATABASE_URL".to_string());
            } else {
                lines.push(format!(
                    "  Connection: {}@{}:{}/{}",
                    spec.database.user, spec.database.host, spec.database.port, spec.database.name
                ));
            }
            lines.push(format!("  Max connections: {}", spec.database.max_connections));
        }
    }

    lines.push(String::new());
    lines.push(format!("{}", "Logging:".bold()));
    lines.push(format!("  Level: {}", spec.logging.level));
    lines.push(format!("  Format: {:?}", spec.logging.format));
    lines
}

fn validate(config_path: Option<PathBuf>) -> Result<()> {
    println!("Validating configuration...");

    let config = ServiceConfig::load_or_default(config_path).context("Failed to load configuration")?;

    config.validate().context("Configuration validation failed")?;

    println!("{}", "✓ Configuration is valid".green());

    Ok(())
}
