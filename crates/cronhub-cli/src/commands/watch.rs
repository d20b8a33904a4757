//! Long-running watch loop.

use std::time::Duration;

use clap::Args;
use tokio::time;
use tracing::{error, info};

use cronhub_core::config::CronConfig;
use cronhub_core::error::AppError;
use cronhub_core::types::report::RunOptions;

/// Arguments for the watch command
#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Override the poll interval in seconds
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Suppress per-batch report output
    #[arg(long)]
    pub silent: bool,
}

/// Execute the watch command — runs until Ctrl-C.
pub async fn execute(args: &WatchArgs, config: &CronConfig) -> Result<(), AppError> {
    let pool = super::create_db_pool(config).await?;
    let runtime = super::build_runtime(config, pool).await?;

    let seconds = args.interval.unwrap_or(config.watch.poll_interval_seconds);
    let codes = runtime.registry.names();
    info!(
        interval_seconds = seconds,
        jobs = codes.len(),
        "Watch loop started"
    );

    let options = RunOptions {
        silent: args.silent,
        ..RunOptions::default()
    };
    let mut ticker = time::interval(Duration::from_secs(seconds));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Watch loop received shutdown signal");
                break;
            }
            _ = ticker.tick() => {
                let report = runtime.runner.run_batch(&codes, options).await;
                if report.has_errors() {
                    error!("Batch finished with errors");
                }
                if !options.silent {
                    print!("{report}");
                }
            }
        }
    }
    Ok(())
}
