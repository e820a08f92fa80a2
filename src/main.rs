use anyhow::{Context, Result};
use candidate_profiles::{core::ConfigManager, start_web_server};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "candidate_profiles=info,rocket=warn";

#[derive(Parser)]
#[command(name = "candidate-profiles")]
#[command(about = "Candidate profile and matching API server")]
#[command(version)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Port to listen on (overrides ROCKET_PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigManager::load(&cli.config)?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    config.ensure_directories().await?;

    let log_path = &config.environment.log_path;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    info!(
        "Environment: {}",
        std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string())
    );
    info!("Log file: {}", log_path.display());
    info!("Port: {}", config.port);

    start_web_server(config).await
}
