// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! HTTP server
//!
//! Builds the repository set for the configured storage backend, wires the
//! use-case services and serves the catalog router until Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use clap::Args;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

use academium_core::application::{create_repositories, CatalogServices};
use academium_core::domain::config::ServiceConfig;
use academium_core::domain::repository::StorageBackend;
use academium_core::infrastructure::Database;
use academium_core::presentation::{app, AppState, API_PREFIX};

#[derive(Args, Default)]
pub struct ServeCommand {
    /// Do not apply pending migrations on startup
    #[arg(long)]
    skip_migrations: bool,
}

pub async fn run(cmd: ServeCommand, config: ServiceConfig) -> Result<()> {
    config.validate().context("Configuration validation failed")?;

    let backend = config.storage_backend()?;
    let database = match &backend {
        StorageBackend::InMemory => {
            warn!("Using in-memory storage; catalog data is lost on shutdown");
            None
        }
        StorageBackend::PostgreSQL(pg) => {
            let db = Database::new(pg.connect_options.clone(), pg.max_connections).await?;
            if cmd.skip_migrations {
                info!("Skipping migrations (--skip-migrations)");
            } else {
                db.migrate().await?;
            }
            Some(db)
        }
    };

    let repos = create_repositories(&backend, database.as_ref().map(|db| db.get_pool().clone()))?;
    let services = CatalogServices::new(&repos);
    let router = app(AppState::new(services, database));

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Academium listening on http://{}{}", addr, API_PREFIX);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Academium shutting down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
