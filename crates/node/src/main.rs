use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nothing_core::store::StoreMode;
use nothing_node::{api, AppState, Evaluator, NodeConfig};

#[derive(Parser, Debug)]
#[command(name = "nothing-node")]
#[command(about = "The Nothing App token node and mock network API")]
struct Args {
    /// Path to node configuration file
    #[arg(short, long, default_value = "node.toml")]
    config: String,

    /// Listen address override
    #[arg(short, long)]
    listen: Option<String>,

    /// Proposal evaluation interval in seconds
    #[arg(short, long)]
    interval: Option<u64>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(if args.verbose { "debug" } else { "info" })
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Nothing App node");

    let mut config = if Path::new(&args.config).exists() {
        NodeConfig::load(&args.config)?
    } else {
        info!(
            "Config file {} not found, using built-in defaults",
            args.config
        );
        NodeConfig::default()
    };
    if let Some(listen) = args.listen {
        config.listen_addr = listen;
    }
    if let Some(interval) = args.interval {
        config.evaluation_interval_secs = interval;
    }
    config.validate()?;

    info!("Listen address: {}", config.listen_addr);
    info!(
        "Evaluation interval: {}s",
        config.evaluation_interval_secs
    );
    info!("Default wallet: {}", config.default_wallet);

    let (state, store_mode) = AppState::from_config(&config)?;
    if store_mode == StoreMode::Degraded {
        warn!("proposal store degraded at startup: loaded from fallback tier");
    }
    {
        let governance = state.governance.read().await;
        info!("Restored {} proposals", governance.proposal_count());
    }

    let evaluator = Evaluator::new(
        Arc::clone(&state),
        Duration::from_secs(config.evaluation_interval_secs),
    );
    let evaluator_handle = tokio::spawn(evaluator.run());

    let server_handle = api::start_server(state, &config.listen_addr).await?;

    tokio::select! {
        _ = server_handle => {
            warn!("API server stopped");
        }
        _ = evaluator_handle => {
            warn!("Evaluator stopped");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
        }
    }

    Ok(())
}
