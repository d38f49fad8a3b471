//! avl-tracker CLI - Codec 8 GPS tracker simulator.

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use avl_tracker::Tracker;
use avl_tracker::cli::Cli;
use avl_tracker::config::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.into_config().context("loading configuration")?;

    init_logging(config.verbose)?;

    let validated = config.validate().context("invalid configuration")?;

    info!("Codec 8 Tracker Simulator");
    info!("  Server:     {}", validated.session.address);
    info!("  IMEI:       {}", validated.session.device_id);
    info!("  Interval:   {}s", validated.session.interval.as_secs());
    info!("  Position:   {:.6}, {:.6}", validated.anchor.latitude, validated.anchor.longitude);
    info!("  Altitude:   {}m", validated.anchor.altitude);
    info!("  Heading:    {}°", validated.anchor.heading);
    info!("  Simulation: {}", validated.simulation.describe());
    info!("  Verbose:    {}", validated.session.verbose);

    let shutdown = CancellationToken::new();
    tokio::spawn(watch_signals(shutdown.clone()));

    let stats = Tracker::run_validated(validated, shutdown).await;
    debug!("Session stats: {:?}", stats);

    info!("Stopped.");
    Ok(())
}

/// Cancel `shutdown` on Ctrl-C or SIGTERM
async fn watch_signals(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Shutting down...");
    shutdown.cancel();
}
