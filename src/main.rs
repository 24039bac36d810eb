#![cfg(not(tarpaulin_include))]

use std::error::Error;

use zest_dashboard::config::ServerConfig;
use zest_dashboard::error::failure_report;
use zest_dashboard::panels::Tab;
use zest_dashboard::{Analytics, app};

/// Main entry point for the dashboard server
///
/// Reads the configuration from the environment, checks the dataset and
/// serves the dashboard. Any failure is logged here; the process always
/// finishes with a "session complete" line and a zero exit status.
#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("ZestMoney Strategic Intelligence Platform");
    for tab in Tab::ALL {
        log::info!("  - {}", tab.label());
    }

    if let Err(e) = run().await {
        log::error!("Dashboard stopped: {}", failure_report(e.as_ref()));
    }

    log::info!("Dashboard session complete");
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = ServerConfig::from_env()?;
    log::debug!("{:?}", config);

    let analytics = Analytics::new();
    analytics.validate()?;
    log::info!("Loaded {} tables", analytics.tables().len());

    app::run(config, analytics).await
}
