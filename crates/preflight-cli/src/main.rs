//! oss-preflight - Pre-upload reconciliation tool for Aliyun OSS
//!
//! Walks a local directory, fingerprints every file with CRC-64, fetches the
//! matching object metadata from OSS in batches, and reports which files are
//! identical, changed, or missing on the remote side.

use anyhow::Result;
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use preflight_engine::{ReconcileEngine, ReconcileRequest};
use preflight_oss::{Credentials, Endpoint, OssClient};
use preflight_types::{
    BatchSize, ReconcileOptions, ReconcileRecord, ReconcileStats, RecordStatus, WorkerCount,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// oss-preflight - Pre-upload reconciliation tool for Aliyun OSS
#[derive(Parser)]
#[command(
    name = "oss-preflight",
    version = env!("CARGO_PKG_VERSION"),
    about = "Compare local files against OSS objects before uploading",
    long_about = "oss-preflight walks a local directory, fingerprints every file with CRC-64,\n\
                  fetches the matching object metadata from OSS in sequential batches, and\n\
                  reports which files are identical, changed, or missing on the remote side.\n\
                  Identical files can optionally be deleted locally to skip re-uploading them."
)]
struct Cli {
    /// OSS bucket name
    #[arg(long)]
    bucket: String,

    /// OSS endpoint host
    #[arg(long, default_value = Endpoint::DEFAULT_HOST)]
    endpoint: String,

    /// Local directory to reconcile
    #[arg(long)]
    local: PathBuf,

    /// Key prefix the files would be uploaded under
    #[arg(long, default_value = "")]
    oss_dir: String,

    /// Access key id (or the OSS_ACCESS_KEY_ID environment variable)
    #[arg(long)]
    ak: Option<String>,

    /// Access key secret (or the OSS_ACCESS_KEY_SECRET environment variable)
    #[arg(long)]
    sk: Option<String>,

    /// Number of concurrent fingerprint workers
    #[arg(long, default_value_t = WorkerCount::DEFAULT)]
    concurrency: usize,

    /// Maximum keys per metadata batch (0 selects the default)
    #[arg(long, default_value_t = BatchSize::DEFAULT)]
    max_batch: usize,

    /// Write the reconciliation records to a JSON file
    #[arg(long)]
    write_result: Option<PathBuf>,

    /// Delete local files whose fingerprint matches the remote object
    #[arg(long)]
    remove_same: bool,

    /// Print the records as JSON instead of the summary
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Quiet mode - minimal output
    #[arg(short, long)]
    quiet: bool,

    /// Verbose mode - detailed output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.debug, cli.quiet, cli.verbose)?;

    info!("oss-preflight v{} starting", env!("CARGO_PKG_VERSION"));

    let endpoint = Endpoint::parse(&cli.endpoint)?;
    let credentials = Credentials::resolve(cli.ak, cli.sk)?;
    let client = OssClient::new(endpoint, credentials)?;

    let concurrency = WorkerCount::new(cli.concurrency).map_err(anyhow::Error::msg)?;
    let mut options = ReconcileOptions::new()
        .with_concurrency(concurrency)
        .with_max_batch_size(BatchSize::or_default(cli.max_batch))
        .remove_same(cli.remove_same)
        .verbose(cli.verbose || cli.debug);
    if let Some(path) = cli.write_result {
        options = options.write_result_to(path);
    }

    let request = ReconcileRequest::new(cli.bucket, cli.local)
        .with_remote_dir(cli.oss_dir)
        .with_options(options);

    // Create a progress bar
    let pb = if !cli.json && !cli.quiet {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message("Reconciling files...");
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let engine = ReconcileEngine::new(client);
    let outcome = engine.before_upload(request).await;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let result = outcome?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result.records)?);
    } else {
        print_summary(&result.stats);
        print_records(&result.records);
        if let Some(message) = &result.persistence_error {
            if !cli.quiet {
                eprintln!(
                    "{} Result file not written: {}",
                    style("⚠").yellow(),
                    message
                );
            }
        }
        if cli.remove_same && !cli.quiet {
            print_deletion_stats(&result.stats);
        }
    }

    info!("Reconciliation completed");
    Ok(())
}

fn init_logging(debug: bool, quiet: bool, verbose: bool) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap();

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    Ok(())
}

fn print_summary(stats: &ReconcileStats) {
    println!(
        "Summary: same={} diff={} missing={} total={}",
        style(stats.same).green(),
        style(stats.different).yellow(),
        style(stats.missing).cyan(),
        stats.files_scanned
    );
}

fn print_records(records: &[ReconcileRecord]) {
    for record in records {
        let status = record.status();
        let styled = match status {
            RecordStatus::Same => style(status).green(),
            RecordStatus::Different => style(status).yellow(),
            RecordStatus::New => style(status).cyan(),
        };
        println!("{}\t{}", styled, record.remote_key);
    }
}

fn print_deletion_stats(stats: &ReconcileStats) {
    println!(
        "Removed {} identical local file(s), {} failure(s)",
        style(stats.files_deleted).green(),
        if stats.delete_failures > 0 {
            style(stats.delete_failures).red()
        } else {
            style(stats.delete_failures).green()
        }
    );
}
