use anyhow::{Context, Result};
use clap::Parser;
use pulse::analytics::{AggregationEngine, QueryOutcome, StatsQuery};
use pulse::ingest::{self, IngestReport};
use pulse::store::StatsStore;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Replay a historical log file into an empty store and print the result
#[derive(Parser)]
#[command(name = "pulse-ingest")]
#[command(about = "Dry-run historical log ingestion", long_about = None)]
struct Cli {
    /// Pipe-delimited historical log file
    file: PathBuf,
    /// Only print stats for this campaign
    #[arg(long)]
    campaign: Option<String>,
    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct Output<T: Serialize> {
    report: IngestReport,
    campaigns: T,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let store = Arc::new(StatsStore::new());
    let engine = AggregationEngine::new(Arc::clone(&store));

    let report = ingest::ingest_file(&engine, &cli.file)
        .await
        .with_context(|| format!("failed to ingest {}", cli.file.display()))?;

    let query = StatsQuery::new(store);
    let outcome = query.query(cli.campaign.as_deref()).await;
    let campaigns = match outcome {
        QueryOutcome::Campaign(stats) => serde_json::to_value(stats)?,
        QueryOutcome::All(all) => serde_json::to_value(all)?,
        QueryOutcome::NotFound => {
            anyhow::bail!(
                "campaign '{}' not found in {}",
                cli.campaign.unwrap_or_default(),
                cli.file.display()
            );
        }
    };

    let output = Output { report, campaigns };
    let json = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", json);

    Ok(())
}
