use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::info;
use tracing_subscriber::EnvFilter;

use contact_guard::discovery::{self, DiscoveryConfig};
use contact_guard::scan_pipeline::{self, FileScan, RunStats, ScanOptions};
use contact_guard::{ContactDetector, ScanConfig, WarningCatalog};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// One JSON report per flagged message
    Json,
    /// Every message with contacts masked
    Masked,
}

#[derive(Parser, Debug)]
#[command(name = "contact-scan")]
#[command(about = "Find and mask off-platform contact details in chat transcripts")]
#[command(version)]
struct Args {
    /// Root directory to scan for transcripts
    root_dir: PathBuf,

    /// Glob pattern for transcript files, relative to the root
    #[arg(long, default_value = discovery::DEFAULT_PATTERN)]
    pattern: String,

    /// TOML file with enabled kinds and warning overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Abort on first error
    #[arg(long)]
    fail_fast: bool,

    /// Suppress console progress bars
    #[arg(long)]
    no_progress: bool,

    /// Number of files scanned concurrently (default: CPU count)
    #[arg(long)]
    jobs: Option<usize>,

    /// Stats output file path
    #[arg(long, default_value = "scan_stats.json")]
    stats_out: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries scan output, so logs go to stderr
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let args = Args::parse();

    info!("Starting contact-scan");
    info!(?args, "Parsed CLI arguments");

    if !args.root_dir.exists() {
        anyhow::bail!("Root directory does not exist: {}", args.root_dir.display());
    }

    if !args.root_dir.is_dir() {
        anyhow::bail!("Root path is not a directory: {}", args.root_dir.display());
    }

    let scan_config = match &args.config {
        Some(path) => ScanConfig::load(path)?,
        None => ScanConfig::default(),
    };
    let detector = ContactDetector::with_config(&scan_config)?;
    let catalog = WarningCatalog::from_config(&scan_config.notice);
    info!("Loaded {} contact rules", detector.rules().len());

    let run_start = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let start_time = Instant::now();

    let discovery_config = DiscoveryConfig {
        fail_fast: args.fail_fast,
        pattern: args.pattern.clone(),
    };
    info!("Starting transcript discovery in: {}", args.root_dir.display());
    let discovered = discovery::collect_discovered_files(&args.root_dir, discovery_config).await?;

    let paths: Vec<PathBuf> = discovered
        .iter()
        .filter(|f| f.error.is_none())
        .map(|f| f.path.clone())
        .collect();
    for file in discovered.iter().filter(|f| f.error.is_some()) {
        if let Some(ref error) = file.error {
            info!("Issue with {}: {}", file.path.display(), error);
        }
    }

    let progress = if args.no_progress {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(paths.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} transcripts")?,
        );
        bar
    };

    let options = ScanOptions {
        fail_fast: args.fail_fast,
        jobs: args.jobs.unwrap_or_else(num_cpus::get),
    };
    let scans = scan_pipeline::scan_files(&paths, &detector, &catalog, &options, Some(&progress)).await?;
    progress.finish_and_clear();

    write_reports(&scans, args.format)?;

    let run_stats = RunStats::from_scans(run_start, start_time.elapsed().as_millis() as u64, &scans);
    scan_pipeline::write_run_stats(&args.stats_out, &run_stats).await?;

    info!(
        files_processed = run_stats.files_processed,
        files_failed = run_stats.files_failed,
        messages_flagged = run_stats.total_messages_flagged,
        contacts_found = run_stats.total_contacts_found,
        "Scan complete, stats written to {}",
        args.stats_out.display()
    );

    Ok(())
}

fn write_reports(scans: &[FileScan], format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for scan in scans {
        match format {
            OutputFormat::Json => {
                for report in scan.flagged() {
                    let line = serde_json::to_string(report)?;
                    writeln!(out, "{line}").context("Failed to write report")?;
                }
            }
            OutputFormat::Masked => {
                for report in &scan.reports {
                    writeln!(out, "{}:{}: {}", report.path, report.line, report.masked)
                        .context("Failed to write masked line")?;
                }
            }
        }
    }

    out.flush()?;
    Ok(())
}
