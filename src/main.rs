//! MyDB Dashboard - Collection Statistics & Static Chart Generator
//!
//! One-shot tool that renders the MyDB overview dashboard and the
//! relationship network as PNG files, then prints the database summary.

mod charts;
mod data;
mod report;
mod stats;

use std::path::Path;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use charts::{DashboardRenderer, NetworkRenderer};
use data::DatabaseSample;
use report::SummaryReport;
use stats::SummaryCalculator;

const DASHBOARD_PATH: &str = "mydb_dashboard.png";
const NETWORK_PATH: &str = "mydb_network.png";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let sample = DatabaseSample::mydb();
    let ages = data::sample_user_ages(sample.user_document_count(), data::AGE_SEED)?;
    let frame = sample.collections_frame()?;
    let totals = SummaryCalculator::totals(&frame)?;
    info!(
        collections = totals.collections,
        documents = totals.documents,
        "sample data ready"
    );

    let dashboard = DashboardRenderer::default();
    let network = NetworkRenderer::default();
    let (dash, net) = rayon::join(
        || dashboard.render(&sample, &ages, Path::new(DASHBOARD_PATH)),
        || network.render(&sample, Path::new(NETWORK_PATH)),
    );
    dash.context("dashboard render failed")?;
    net.context("network render failed")?;

    println!("Dashboard saved as '{DASHBOARD_PATH}'");
    println!("Network graph saved as '{NETWORK_PATH}'");

    SummaryReport::new(totals, &sample.relationships)
        .print()
        .context("failed to write summary")?;

    Ok(())
}
