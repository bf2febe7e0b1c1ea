//! service-config
//!
//! Loads a JSON configuration file into the process-wide store and reports on it.
//!
//! ```text
//! service-config --config config.json check
//! service-config --config config.json --env-overlay show
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use service_config::config::{self, load_config, EnvOverlay};
use service_config::observability::logging;

#[derive(Parser)]
#[command(name = "service-config")]
#[command(about = "Load and inspect the service configuration file", long_about = None)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, env = "CONFIG_PATH", default_value = "config.json")]
    config: PathBuf,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Read `.env` and apply the environment overlay after loading
    #[arg(long)]
    env_overlay: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the file and log a short summary
    Check,
    /// Print the loaded configuration with secrets redacted
    Show,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    // The loader already logs the failure
    let Ok(mut loaded) = load_config(&cli.config) else {
        return ExitCode::FAILURE;
    };

    if cli.env_overlay {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!(error = %e, "No .env file loaded");
        }
        EnvOverlay::default().apply(&mut loaded);
    }

    let current = config::global().replace(loaded);

    match cli.command {
        Commands::Check => {
            tracing::info!(
                environment = %current.environment,
                debug = current.debug,
                server = %current.server.address(),
                templates = current.email.templates.len(),
                "Configuration loaded"
            );
        }
        Commands::Show => match serde_json::to_string_pretty(&current.redacted()) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                tracing::error!(error = %e, "Failed to render configuration");
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}
