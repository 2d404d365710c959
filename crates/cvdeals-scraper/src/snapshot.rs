//! Dated CSV snapshot output.
//!
//! One immutable file per retailer per run, named from the brand and the
//! write-time date. The filename pattern and column schema are the only
//! contract the collector honors toward the dashboard.

use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::Local;
use thiserror::Error;

use cvdeals_core::DealRecord;

/// Canonical column schema, stable for downstream consumers.
pub const CSV_HEADER: [&str; 5] = ["brand", "name", "price", "event", "img_url"];

/// Written ahead of the CSV payload so spreadsheet tools decode the Korean
/// text as UTF-8 (the utf-8-sig convention).
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

/// What one snapshot write produced.
#[derive(Debug)]
pub struct SnapshotSummary {
    pub raw_count: usize,
    pub deduped_count: usize,
    /// `None` when the input was empty and no file was created.
    pub path: Option<PathBuf>,
    /// Wall-clock time since the run started.
    pub elapsed: Duration,
}

/// Drops records whose `(name, event)` pair was already seen, keeping the
/// first occurrence in encounter order. Idempotent.
#[must_use]
pub fn dedupe_records(records: Vec<DealRecord>) -> Vec<DealRecord> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut deduped = records;
    deduped.retain(|record| seen.insert((record.name.clone(), record.event.clone())));
    deduped
}

/// Deduplicates and writes one dated snapshot file.
///
/// The filename is `{brand}_{YYMMDD}.csv` from the current local date at
/// write time. An empty input writes nothing and reports zero output —
/// success, not an error.
///
/// # Errors
///
/// Returns [`SnapshotError`] when the output directory or file cannot be
/// created or a row fails to serialize.
pub fn write_snapshot(
    records: Vec<DealRecord>,
    brand: &str,
    out_dir: &Path,
    started: Instant,
) -> Result<SnapshotSummary, SnapshotError> {
    let raw_count = records.len();
    let deduped = dedupe_records(records);
    let deduped_count = deduped.len();

    if deduped.is_empty() {
        tracing::info!(brand, "no records collected; skipping snapshot file");
        return Ok(SnapshotSummary {
            raw_count,
            deduped_count,
            path: None,
            elapsed: started.elapsed(),
        });
    }

    std::fs::create_dir_all(out_dir)?;
    let filename = format!("{brand}_{}.csv", Local::now().format("%y%m%d"));
    let path = out_dir.join(filename);

    let mut file = File::create(&path)?;
    file.write_all(UTF8_BOM)?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(CSV_HEADER)?;
    for record in &deduped {
        writer.write_record([
            record.brand.as_str(),
            record.name.as_str(),
            &record.price.to_string(),
            record.event.as_str(),
            record.img_url.as_str(),
        ])?;
    }
    writer.flush()?;

    tracing::info!(
        brand,
        raw_count,
        deduped_count,
        path = %path.display(),
        "snapshot written"
    );

    Ok(SnapshotSummary {
        raw_count,
        deduped_count,
        path: Some(path),
        elapsed: started.elapsed(),
    })
}
