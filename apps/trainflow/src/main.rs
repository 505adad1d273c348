//! # TrainFlow - Corporate Training Prototype
//!
//! The main binary for TrainFlow.
//!
//! This application provides:
//! - Headless replay of the training-creation wizard
//! - Exam grading with retakes
//! - Demo account flows and video records
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │              apps/trainflow (THE BINARY)         │
//! │                                                  │
//! │  ┌───────────┐   ┌───────────┐   ┌────────────┐  │
//! │  │   CLI     │   │  Config   │   │   Ticker   │  │
//! │  │  (clap)   │   │  (toml)   │   │  (tokio)   │  │
//! │  └─────┬─────┘   └─────┬─────┘   └─────┬──────┘  │
//! │        └───────────────┼───────────────┘         │
//! │                        ▼                         │
//! │               ┌────────────────┐                 │
//! │               │ trainflow-core │                 │
//! │               │  (THE LOGIC)   │                 │
//! │               └────────────────┘                 │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! trainflow wizard --script onboarding.toml
//! trainflow exam --answers 1=1,2=1,3=2
//! trainflow generate-video --topic "Fire drills" --prompt "Evacuation basics"
//! ```

use clap::Parser;
use trainflow::cli;
use trainflow::config::{Config, LOG_FORMAT_ENV, LogFormat, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Configuration feeds the log setup, so load it first and report
    // failures once tracing is up.
    let config = Config::load(cli.config.as_deref());
    let logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    init_tracing(&logging, cli.verbose);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli, &config).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing. `TRAINFLOW_LOG_FORMAT=json` enables machine-parseable
/// output and `RUST_LOG` overrides the configured filter.
fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let env_format = std::env::var(LOG_FORMAT_ENV).ok();
    let format = logging.effective_format(env_format.as_deref());

    let default_filter = if verbose {
        "trainflow=debug,trainflow_core=debug"
    } else {
        logging.filter.as_str()
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

/// Print the TrainFlow startup banner.
fn print_banner() {
    println!(
        r#"
  ╔╦╗╦═╗╔═╗╦╔╗╔╔═╗╦  ╔═╗╦ ╦
   ║ ╠╦╝╠═╣║║║║╠╣ ║  ║ ║║║║
   ╩ ╩╚═╩ ╩╩╝╚╝╚  ╩═╝╚═╝╚╩╝

  Corporate Training v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
