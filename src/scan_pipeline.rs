// Per-file transcript scanning for the CLI and benchmarks
// Files are scanned concurrently; results keep input order

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::contact_detector::{ContactDetector, ContactMatch};
use crate::reader::{ReaderConfig, TranscriptReader};
use crate::redaction::mask_text;
use crate::warnings::{Warning, WarningCatalog};

/// Character used for blurred runs in masked output
pub const MASK_CHAR: char = '•';

/// Knobs for a scan run
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Abort on the first unreadable file
    pub fail_fast: bool,
    /// Maximum files scanned at once
    pub jobs: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            fail_fast: false,
            jobs: num_cpus::get().max(1),
        }
    }
}

/// Detection result for one transcript line
#[derive(Debug, Clone, Serialize)]
pub struct MessageReport {
    pub path: String,
    pub line: usize,
    pub matches: Vec<ContactMatch>,
    pub masked: String,
    /// Batch warning for this message, `None` when nothing was found
    pub warning: Option<Warning>,
}

impl MessageReport {
    pub fn is_flagged(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Per-file scan statistics
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FileStats {
    pub path: String,
    pub messages_scanned: u64,
    pub messages_flagged: u64,
    pub contacts_found: u64,
    /// Contact counts keyed by kind name
    pub contacts_by_kind: BTreeMap<String, u64>,
    pub processing_time_ms: u64,
    /// "success" or "failed"
    pub status: String,
    pub error: Option<String>,
}

/// Reports and stats for one transcript
#[derive(Debug, Clone)]
pub struct FileScan {
    pub stats: FileStats,
    pub reports: Vec<MessageReport>,
}

impl FileScan {
    pub fn flagged(&self) -> impl Iterator<Item = &MessageReport> {
        self.reports.iter().filter(|r| r.is_flagged())
    }
}

/// Aggregate statistics for a whole run, written by `--stats-out`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunStats {
    /// Unix timestamp (seconds) when the run started
    pub run_start: u64,
    pub total_processing_time_ms: u64,
    pub total_messages_scanned: u64,
    pub total_messages_flagged: u64,
    pub total_contacts_found: u64,
    pub files_processed: u64,
    pub files_failed: u64,
    pub file_stats: Vec<FileStats>,
}

impl RunStats {
    pub fn from_scans(run_start: u64, total_processing_time_ms: u64, scans: &[FileScan]) -> Self {
        let file_stats: Vec<FileStats> = scans.iter().map(|s| s.stats.clone()).collect();
        let files_failed = file_stats.iter().filter(|s| s.status == "failed").count() as u64;

        Self {
            run_start,
            total_processing_time_ms,
            total_messages_scanned: file_stats.iter().map(|s| s.messages_scanned).sum(),
            total_messages_flagged: file_stats.iter().map(|s| s.messages_flagged).sum(),
            total_contacts_found: file_stats.iter().map(|s| s.contacts_found).sum(),
            files_processed: file_stats.len() as u64 - files_failed,
            files_failed,
            file_stats,
        }
    }
}

/// Scan one transcript
///
/// Read errors become a "failed" `FileStats` unless `fail_fast` is set on
/// the reader, in which case they are returned.
pub async fn scan_file(
    path: &Path,
    detector: &ContactDetector,
    catalog: &WarningCatalog,
    reader: &TranscriptReader,
) -> Result<FileScan> {
    let start_time = Instant::now();
    let path_display = path.display().to_string();

    let (messages, read_stats) = reader.read_messages(path).await?;

    let mut reports = Vec::with_capacity(messages.len());
    let mut contacts_by_kind: BTreeMap<String, u64> = BTreeMap::new();

    for message in messages {
        let matches = detector.detect(&message.text);
        for m in &matches {
            *contacts_by_kind.entry(m.kind.to_string()).or_insert(0) += 1;
        }

        reports.push(MessageReport {
            path: path_display.clone(),
            line: message.line,
            masked: mask_text(&message.text, &matches, MASK_CHAR),
            warning: catalog.for_matches(&matches),
            matches,
        });
    }

    let messages_flagged = reports.iter().filter(|r| r.is_flagged()).count() as u64;
    let contacts_found = reports.iter().map(|r| r.matches.len() as u64).sum();
    let status = if read_stats.read_error.is_some() { "failed" } else { "success" };

    debug!(
        "Scanned {}: {} messages, {} flagged, {} contacts",
        path_display,
        reports.len(),
        messages_flagged,
        contacts_found
    );

    Ok(FileScan {
        stats: FileStats {
            path: path_display,
            messages_scanned: reports.len() as u64,
            messages_flagged,
            contacts_found,
            contacts_by_kind,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
            status: status.to_string(),
            error: read_stats.read_error,
        },
        reports,
    })
}

/// Scan many transcripts with bounded concurrency, preserving input order
pub async fn scan_files(
    paths: &[PathBuf],
    detector: &ContactDetector,
    catalog: &WarningCatalog,
    options: &ScanOptions,
    progress: Option<&ProgressBar>,
) -> Result<Vec<FileScan>> {
    let reader = TranscriptReader::new(ReaderConfig {
        fail_fast: options.fail_fast,
        ..ReaderConfig::default()
    });
    let jobs = options.jobs.max(1);

    info!("Scanning {} transcripts with {} concurrent jobs", paths.len(), jobs);

    let scans: Vec<FileScan> = stream::iter(paths)
        .map(|path| {
            let reader = &reader;
            async move {
                let result = scan_file(path, detector, catalog, reader).await;
                if let Some(bar) = progress {
                    bar.inc(1);
                }
                result
            }
        })
        .buffered(jobs)
        .try_collect()
        .await?;

    let failed = scans.iter().filter(|s| s.stats.status == "failed").count();
    if failed > 0 {
        warn!("{} transcripts could not be fully read", failed);
    }

    Ok(scans)
}

/// Write run statistics as pretty JSON
pub async fn write_run_stats(path: &Path, stats: &RunStats) -> Result<()> {
    let content = serde_json::to_string_pretty(stats)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write stats file {}", path.display()))?;
    Ok(())
}
