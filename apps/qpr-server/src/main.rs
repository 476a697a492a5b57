mod config;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use config::AppConfig;
use qpr::api::rest::{AppState, router};
use qpr::infra::storage::connect_and_migrate;
use qpr::infra::storage::repos::{
    SeaOrmProfilesRepository, SeaOrmReportsRepository, SeaOrmRequestsRepository,
};

/// QPR Server - quarterly progress report entry and approval
#[derive(Parser)]
#[command(name = "qpr-server")]
#[command(about = "QPR Server - quarterly progress report entry and approval")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for the HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(ref path) = cli.config {
        if !path.is_file() {
            anyhow::bail!("config file does not exist: {}", path.display());
        }
    }

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    logging::init(&config.logging, cli.verbose);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Check => {
            info!("configuration OK");
            Ok(())
        }
        Commands::Run => run(config).await,
    }
}

async fn run(config: AppConfig) -> Result<()> {
    info!(url = %config.database.url, "connecting to database");
    let db = connect_and_migrate(&config.database.url).await?;

    let state = AppState::new(
        Arc::new(SeaOrmProfilesRepository::new(db.clone())),
        Arc::new(SeaOrmReportsRepository::new(db.clone())),
        Arc::new(SeaOrmRequestsRepository::new(db)),
        config.qpr.clone(),
    );
    let app = router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "QPR server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}
