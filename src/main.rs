use anyhow::Result;
use clap::Parser;
use excess_watch::cli::Cli;
use excess_watch::config::{Config, LoggingConfig};
use excess_watch::cycle::{Cycle, CycleOutcome};
use excess_watch::logging::init_logging;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match Config::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            // Config carries the logging settings; fall back to console output
            let _ = init_logging(&LoggingConfig::default());
            error!("Cannot load configuration: {}", e);
            return Err(anyhow::anyhow!("Configuration error: {}", e));
        }
    };

    init_logging(&config.logging).map_err(|e| anyhow::anyhow!("Failed to init logging: {}", e))?;

    info!(
        "excess-watch {} starting, station {}",
        env!("APP_VERSION"),
        config.station_id
    );

    let cycle = Cycle::from_config(&config, &cli.output).map_err(|e| {
        error!("Cannot start cycle: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;
    match cycle.run().await {
        Ok(CycleOutcome::Offline) => {
            info!("Station offline, state left untouched");
            Ok(())
        }
        Ok(CycleOutcome::Updated { reading, notified }) => {
            info!("Cycle complete: {} (notified: {})", reading.message(), notified);
            Ok(())
        }
        Err(e) => {
            error!("Cycle failed: {}", e);
            Err(anyhow::anyhow!("Cycle error: {}", e))
        }
    }
}
