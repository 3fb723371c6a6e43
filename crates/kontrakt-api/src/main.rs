//! Kontrakt CLI and webhook server entry point.
//!
//! Binary name: `kontrakt`
//!
//! Parses CLI arguments, initializes database and services, then dispatches
//! to the appropriate command handler or starts the webhook HTTP server.

mod cli;
mod http;
mod state;

use std::time::Duration;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need app state or tracing
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "kontrakt", &mut std::io::stdout());
        return Ok(());
    }

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,kontrakt=debug",
        _ => "trace",
    };
    let otel = matches!(cli.command, Commands::Serve { otel: true, .. });
    kontrakt_observe::tracing_setup::init_tracing(otel, filter)
        .map_err(|e| anyhow::anyhow!("failed to init tracing: {e}"))?;

    // Initialize application state (DB, services)
    let state = AppState::init().await?;

    match cli.command {
        Commands::Serve { addr, .. } => {
            spawn_eviction_task(&state);

            let router = http::router::build_router(state.clone());
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!(%addr, "Kontrakt webhook server listening");

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            kontrakt_observe::tracing_setup::shutdown_tracing();
        }

        Commands::History { limit } => {
            cli::history::show_history(&state, limit, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Periodically evict sessions that exceeded the idle timeout.
fn spawn_eviction_task(state: &AppState) {
    let intake = state.intake.clone();
    let session_cfg = state.config.session.clone();
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(Duration::from_secs(session_cfg.eviction_interval_secs));
        loop {
            interval.tick().await;
            intake
                .registry()
                .evict_idle(chrono::Duration::minutes(session_cfg.idle_timeout_minutes));
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
    }
}
