//! One-shot batch run command.

use clap::Args;

use cronhub_core::config::CronConfig;
use cronhub_core::error::AppError;
use cronhub_core::types::report::RunOptions;

/// Arguments for the run command
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Job codes to run; all registered jobs when omitted
    pub jobs: Vec<String>,

    /// Run the jobs regardless of their schedule
    #[arg(long)]
    pub force: bool,

    /// Evaluate due-ness without executing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Suppress the per-job report output
    #[arg(long)]
    pub silent: bool,
}

/// Execute the run command
pub async fn execute(args: &RunArgs, config: &CronConfig) -> Result<(), AppError> {
    let pool = super::create_db_pool(config).await?;
    let runtime = super::build_runtime(config, pool).await?;

    let codes = if args.jobs.is_empty() {
        runtime.registry.names()
    } else {
        args.jobs.clone()
    };
    let options = RunOptions {
        force: args.force,
        dry_run: args.dry_run,
        silent: args.silent,
    };

    let report = runtime.runner.run_batch(&codes, options).await;
    if !options.silent {
        print!("{report}");
    }
    if report.has_errors() {
        return Err(AppError::execution("one or more cron jobs failed"));
    }
    Ok(())
}
