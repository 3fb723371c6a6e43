//! CLI argument definitions and command handlers.

pub mod history;

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Conversational contract intake service.
#[derive(Debug, Parser)]
#[command(name = "kontrakt", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Machine-readable JSON output
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the webhook HTTP server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1:8080", env = "KONTRAKT_ADDR")]
        addr: SocketAddr,

        /// Export spans via OpenTelemetry (stdout exporter)
        #[arg(long)]
        otel: bool,
    },

    /// Show recently generated contracts
    History {
        /// Maximum number of rows
        #[arg(long, default_value_t = 10)]
        limit: i64,
    },

    /// Generate shell completions
    Completions { shell: Shell },
}
