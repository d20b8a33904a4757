//! CLI command definitions and dispatch.

pub mod config;
pub mod history;
pub mod migrate;
pub mod run;
pub mod watch;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use sqlx::PgPool;

use cronhub_cache::CacheManager;
use cronhub_core::config::CronConfig;
use cronhub_core::error::AppError;
use cronhub_core::traits::cache::CacheProvider;
use cronhub_core::traits::history::RunHistoryStore;
use cronhub_core::traits::lock::LockBackend;
use cronhub_core::traits::notify::Notifier;
use cronhub_database::RunLogRepository;
use cronhub_engine::jobs::{CommandJob, FailedRunsNotificationJob};
use cronhub_engine::{JobRegistry, JobRunner};
use cronhub_notify::SmtpNotifier;

use crate::output::OutputFormat;

/// Cronhub — distributed cron job scheduling
#[derive(Debug, Parser)]
#[command(name = "cronhub", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (merges config/default.toml with
    /// config/<env>.toml and CRONHUB__ environment variables)
    #[arg(short, long, default_value = "production")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a batch of cron jobs once
    Run(run::RunArgs),
    /// Run the configured jobs on a fixed interval until interrupted
    Watch(watch::WatchArgs),
    /// Inspect the run history
    History(history::HistoryArgs),
    /// Run pending database migrations
    Migrate,
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &CronConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Run(args) => run::execute(args, config).await,
            Commands::Watch(args) => watch::execute(args, config).await,
            Commands::History(args) => history::execute(args, config, self.format).await,
            Commands::Migrate => migrate::execute(config).await,
            Commands::Config(args) => config::execute(args, config, self.format).await,
        }
    }
}

/// Helper: create database pool from config
pub async fn create_db_pool(config: &CronConfig) -> Result<PgPool, AppError> {
    let pool = cronhub_database::DatabasePool::connect(&config.database).await?;
    Ok(pool.into_pool())
}

/// The wired-up engine shared by the `run` and `watch` commands.
pub struct Runtime {
    pub registry: Arc<JobRegistry>,
    pub runner: JobRunner,
}

/// Build the registry and runner from the configuration: one command job
/// per `[[jobs]]` entry, plus the failed-runs notifier when recipients
/// are configured.
pub async fn build_runtime(config: &CronConfig, pool: PgPool) -> Result<Runtime, AppError> {
    let cache: Arc<dyn CacheProvider> = Arc::new(CacheManager::new(&config.cache).await?);
    let lock: Arc<dyn LockBackend> = Arc::new(cronhub_lock::LockManager::new(
        &config.lock,
        pool.clone(),
        cache,
    )?);
    let history: Arc<dyn RunHistoryStore> = Arc::new(RunLogRepository::new(pool));

    let mut registry = JobRegistry::new();
    let mut watched = Vec::new();
    for job_config in &config.jobs {
        let job = CommandJob::from_config(job_config)?;
        watched.push(job_config.code.clone());
        registry.register(Arc::new(job));
    }
    if !config.notify.recipients.is_empty() {
        let notifier: Arc<dyn Notifier> = Arc::new(SmtpNotifier::new(&config.notify)?);
        registry.register(Arc::new(FailedRunsNotificationJob::new(
            watched,
            config.notify.min_failures,
            Arc::clone(&history),
            notifier,
        )));
    }

    let registry = Arc::new(registry);
    let runner = JobRunner::new(Arc::clone(&registry), lock, history);
    Ok(Runtime { registry, runner })
}
