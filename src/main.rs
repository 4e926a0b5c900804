use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pulse::analytics::AggregationEngine;
use pulse::api;
use pulse::config::Config;
use pulse::ingest;
use pulse::store::StatsStore;

#[tokio::main]
async fn main() -> Result<()> {
    let started_at = Instant::now();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("🚀 Starting campaign analytics pipeline");

    let store = Arc::new(StatsStore::new());
    let engine = AggregationEngine::new(Arc::clone(&store));

    // Historical data is fully applied before any live traffic is accepted
    info!("Processing data from: {}", config.ingest.data_file.display());
    match ingest::ingest_file(&engine, &config.ingest.data_file).await {
        Ok(report) => info!(
            "✅ Historical ingestion complete: {} lines, {} campaigns",
            report.lines_scanned,
            store.len().await
        ),
        Err(e) => warn!("Continuing without historical data: {}", e),
    }

    if let Some(ref static_dir) = config.frontend.static_dir {
        info!("🎨 Serving dashboard from directory: {}", static_dir);
    } else {
        info!("🎨 Serving embedded dashboard");
    }

    let router = api::create_router(engine, config.frontend.clone(), started_at);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("📊 Analytics dashboard running on http://{}", addr);
    info!("📈 API endpoints available at http://{}/api/analytics", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
