//! `profile-scan <snapshot-dir> [--config <path>]`
//!
//! Reads `homepage.html`, `profile.html` and `contact_info.html` from the
//! snapshot directory and prints the validated user record as JSON.

use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use tracing::{error, info};

use profile_scan_lib::infrastructure::init_logging_with_config;
use profile_scan_lib::{ConfigManager, DirectoryPageSource, ScanPipeline, StageOutcome};

struct Args {
    snapshot_dir: PathBuf,
    config_path: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut snapshot_dir = None;
    let mut config_path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                config_path = Some(PathBuf::from(path));
            }
            "-h" | "--help" => {
                bail!("usage: profile-scan <snapshot-dir> [--config <path>]");
            }
            _ if snapshot_dir.is_none() => snapshot_dir = Some(PathBuf::from(arg)),
            _ => bail!("unexpected argument '{arg}'"),
        }
    }

    Ok(Args {
        snapshot_dir: snapshot_dir
            .context("usage: profile-scan <snapshot-dir> [--config <path>]")?,
        config_path,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = parse_args()?;

    let manager = match args.config_path {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new()?,
    };
    let config = manager.load_config().await?;
    init_logging_with_config(&config.logging)?;

    info!("Scanning snapshots in {:?}", args.snapshot_dir);
    let source = DirectoryPageSource::new(&args.snapshot_dir);
    let mut pipeline =
        ScanPipeline::from_config(&config, source).context("Invalid parsing configuration")?;

    let report = pipeline.run();
    match report.outcome {
        StageOutcome::Completed(record) => {
            let json = serde_json::to_string_pretty(&record).context("Failed to serialize record")?;
            println!("{json}");
            Ok(())
        }
        StageOutcome::Skipped { page, reason } => {
            error!("No record produced: {} page skipped ({})", page, reason);
            std::process::exit(1);
        }
        StageOutcome::Failed(e) => {
            error!("No record produced after {} attempt(s): {}", report.attempts, e);
            std::process::exit(1);
        }
    }
}
