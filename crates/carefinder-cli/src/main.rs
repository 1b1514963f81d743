mod triage;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "carefinder")]
#[command(about = "Care facility triage and matching")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find nearby care facilities for a reason and location.
    Triage {
        /// Reason for seeking care, e.g. "twisted ankle".
        #[arg(long, default_value = "")]
        reason: String,
        /// ZIP code or city name, e.g. "97202" or "Everett WA".
        #[arg(long, default_value = "")]
        location: String,
        /// Explicit service filter; repeat for multiple services.
        #[arg(long = "service")]
        services: Vec<String>,
        /// Emit the full result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List every service name the catalog advertises.
    Services {
        /// Emit the list as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = carefinder_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(env = %config.env, matcher = ?config.matcher, "configuration loaded");

    let engine = carefinder_triage::TriageEngine::from_config(&config)?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Triage {
            reason,
            location,
            services,
            json,
        } => triage::run_triage(&engine, reason, location, services, json).await,
        Commands::Services { json } => triage::run_services(&engine, json).await,
    }
}
