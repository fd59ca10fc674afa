// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rosterd: the Roster reconciliation daemon binary.

use std::process::ExitCode;

use roster_core::{Layout, SystemClock};
use roster_daemon::{Config, CronSchedule, EnvSecretStore, FileRegistry, HandlerCtx, Poller};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let registry = match FileRegistry::open(config.root.join("registry.json")) {
        Ok(registry) => registry,
        Err(e) => {
            error!(error = %e, "failed to open registry");
            return ExitCode::FAILURE;
        }
    };

    let ctx = HandlerCtx {
        layout: Layout::new(&config.root),
        registry,
        schedule: CronSchedule,
        secrets: EnvSecretStore,
        models: config.model_aliases.clone(),
        identity: config.identity.clone(),
        clock: SystemClock,
        required_env: config.required_env.clone(),
    };
    let poller = Poller::new(ctx, config.poll_interval);

    info!(
        root = %config.root.display(),
        interval_ms = config.poll_interval.as_millis() as u64,
        "rosterd started"
    );

    tokio::select! {
        _ = poller.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received, stopping");
        }
    }

    ExitCode::SUCCESS
}
