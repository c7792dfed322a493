//! Factbot CLI — entry point.
//!
//! # Commands
//!
//! - `factbot gateway` — run the bot on every configured channel
//! - `factbot chat [-u USER]` — talk to the bot in the terminal
//! - `factbot onboard` — initialize config
//! - `factbot status` — show configuration status

mod gateway;
mod helpers;
mod onboard;
mod repl;
mod status;

use anyhow::Result;
use clap::{Parser, Subcommand};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Factbot — a bot that remembers a few facts about you
#[derive(Parser)]
#[command(name = "factbot", version, about, long_about = None)]
struct Cli {
    /// Config file (default: ~/.factbot/config.json)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway (all channels + dialogue loop)
    Gateway {
        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Chat with the bot in an interactive REPL
    Chat {
        /// Local user id; each id gets its own conversation
        #[arg(short, long, default_value = repl::DEFAULT_USER)]
        user: String,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Initialize configuration
    Onboard,

    /// Show configuration status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref().map(helpers::expand_tilde);
    let config_path = config_path.as_deref();

    match cli.command {
        Commands::Gateway { logs } => {
            init_logging(logs);
            gateway::run(config_path).await
        }
        Commands::Chat { user, logs } => {
            init_logging(logs);
            repl::run(&user)
        }
        Commands::Onboard => onboard::run(config_path),
        Commands::Status => status::run(config_path),
    }
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("factbot=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
