//! Database migration command.

use cronhub_core::config::CronConfig;
use cronhub_core::error::AppError;

use crate::output;

/// Execute the migrate command
pub async fn execute(config: &CronConfig) -> Result<(), AppError> {
    let pool = super::create_db_pool(config).await?;

    println!("Running database migrations...");
    cronhub_database::migration::run_migrations(&pool).await?;
    output::print_success("All migrations applied successfully.");
    Ok(())
}
