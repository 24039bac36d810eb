#![cfg(not(tarpaulin_include))]

use std::path::PathBuf;

use zest_dashboard::Analytics;
use zest_dashboard::export;
use zest_dashboard::graph::{self, RenderOptions};

/// Writes every dashboard chart as SVG and every table as CSV
///
/// # Arguments
/// * First command line argument - Output directory (defaults to `chart_output`)
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("chart_output"));

    let analytics = Analytics::new();
    analytics.validate()?;

    let charts = graph::save_all_charts(&analytics, &dir, &RenderOptions::default())?;
    for (id, path) in &charts {
        log::info!("Created {} chart at {}", id, path.display());
    }

    let tables = export::all_csv(&analytics);
    for (name, csv) in &tables {
        let path = dir.join(format!("{}.csv", name));
        std::fs::write(&path, csv)?;
        log::info!("Exported {} table to {}", name, path.display());
    }

    log::info!(
        "Wrote {} charts and {} tables to {}",
        charts.len(),
        tables.len(),
        dir.display()
    );

    Ok(())
}
