//! Historical log ingestion
//!
//! Runs once at startup, before the API starts serving. Lines are applied
//! one by one in file order; lines that do not decode are skipped without
//! error. Bytes that are not valid UTF-8 are replaced, never fatal.

pub mod parser;

use serde::Serialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::analytics::AggregationEngine;

pub use parser::{parse_line, HistoricalEvent};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("could not open data file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed reading data file {path} after {lines_read} lines: {source}")]
    Read {
        path: PathBuf,
        lines_read: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Summary of one ingestion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Every line read, applied or not
    pub lines_scanned: usize,
    pub lines_applied: usize,
    pub lines_skipped: usize,
}

/// Ingest a historical log file into the engine.
///
/// Lines applied before a read error stay applied.
pub async fn ingest_file(
    engine: &AggregationEngine,
    path: impl AsRef<Path>,
) -> Result<IngestReport, IngestError> {
    let path = path.as_ref();
    let file = File::open(path).await.map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut report = IngestReport::default();
    let result = ingest_lines(engine, BufReader::new(file), &mut report).await;
    if let Err(source) = result {
        return Err(IngestError::Read {
            path: path.to_path_buf(),
            lines_read: report.lines_scanned,
            source,
        });
    }

    info!(
        "Processed {} lines from historical data ({} applied, {} skipped)",
        report.lines_scanned, report.lines_applied, report.lines_skipped
    );
    Ok(report)
}

/// Ingest from any buffered reader
pub async fn ingest_reader<R>(engine: &AggregationEngine, reader: R) -> std::io::Result<IngestReport>
where
    R: AsyncBufRead + Unpin,
{
    let mut report = IngestReport::default();
    ingest_lines(engine, reader, &mut report).await?;
    Ok(report)
}

async fn ingest_lines<R>(
    engine: &AggregationEngine,
    mut reader: R,
    report: &mut IngestReport,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        report.lines_scanned += 1;

        let line = decode_line(&buf);
        if engine.apply_historical_line(&line).await {
            report.lines_applied += 1;
        } else {
            report.lines_skipped += 1;
            debug!(line_number = report.lines_scanned, "Skipping historical line");
        }
    }
    Ok(())
}

/// Strip the line terminator and decode, replacing invalid UTF-8
fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw)
}
