//! Run history inspection commands.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use cronhub_core::config::CronConfig;
use cronhub_core::error::AppError;
use cronhub_core::traits::history::RunHistoryStore;
use cronhub_core::types::duration::humanize_duration;
use cronhub_core::types::query::RunQuery;
use cronhub_database::RunLogRepository;

use crate::output::{self, OutputFormat};

/// Arguments for the history command
#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Restrict to one job code
    pub code: Option<String>,

    /// Only failed runs
    #[arg(long)]
    pub failed: bool,

    /// Only failures not yet included in a notification
    #[arg(long)]
    pub unreported: bool,

    /// Number of records to show
    #[arg(short, long, default_value = "50")]
    pub limit: u32,
}

/// Run record display row
#[derive(Debug, Serialize, Tabled)]
struct RunRow {
    /// Job code
    code: String,
    /// Start time
    started: String,
    /// Wall-clock duration
    duration: String,
    /// Outcome
    status: String,
    /// Covered time-of-day slot
    slot: String,
    /// Message or error detail
    message: String,
}

/// Execute the history command
pub async fn execute(
    args: &HistoryArgs,
    config: &CronConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let pool = super::create_db_pool(config).await?;
    let repo = RunLogRepository::new(pool);

    let mut query = RunQuery {
        code: args.code.clone().unwrap_or_default(),
        ..RunQuery::default()
    };
    if args.failed || args.unreported {
        query.success = Some(false);
    }
    if args.unreported {
        query.reported = Some(false);
    }
    let query = query.limit(args.limit);

    let records = repo.query(&query).await?;
    let rows: Vec<RunRow> = records
        .iter()
        .map(|r| RunRow {
            code: r.code.clone(),
            started: r.start_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            duration: humanize_duration(r.duration()),
            status: if r.is_success { "ok" } else { "failed" }.to_string(),
            slot: r
                .ran_at_time
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_default(),
            message: r.message.clone(),
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
