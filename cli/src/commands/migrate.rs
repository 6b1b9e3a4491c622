// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Database Migrate Command
//!
//! Applies the embedded catalog schema migrations.
//!
//! ```bash
//! # Apply all pending migrations
//! academium migrate
//!
//! # Preview migrations without applying
//! academium migrate --dry-run
//! ```
//!
//! The connection comes from the service configuration (`DATABASE_URL` or the
//! `PG*` variables override the file).

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use academium_core::domain::config::ServiceConfig;
use academium_core::infrastructure::db::MIGRATOR;
use academium_core::infrastructure::Database;

#[derive(Args)]
pub struct MigrateCommand {
    /// Perform a dry run without applying changes
    #[arg(long)]
    dry_run: bool,
}

pub async fn execute(cmd: MigrateCommand, config: &ServiceConfig) -> Result<()> {
    println!("{}", "Academium Migrate".bold().green());

    println!("Connecting to database...");
    // One connection is enough for a migration run
    let db = Database::new(config.spec.database.connect_options()?, 1).await?;

    let applied_count = db.applied_migrations().await;
    let total_migrations = MIGRATOR.iter().count();

    println!(
        "Migration status: {} applied, {} total available.",
        applied_count, total_migrations
    );

    if applied_count >= total_migrations {
        println!("{}", "✓ Database is up to date.".green());
        return Ok(());
    }

    if cmd.dry_run {
        println!("Pending migrations found (Dry Run):");
        for migration in MIGRATOR.iter().skip(applied_count) {
            println!(" - {} {}", migration.version, migration.description);
        }
        println!("Skipping application due to --dry-run");
        return Ok(());
    }

    println!("Applying pending migrations...");
    db.migrate().await?;
    println!("{}", "✓ Database updated successfully.".green());

    Ok(())
}
