//! Shell command job declared in configuration.

use async_trait::async_trait;
use chrono::NaiveTime;
use tokio::process::Command;
use tracing::debug;

use cronhub_core::config::job::JobConfig;
use cronhub_core::result::AppResult;
use cronhub_core::traits::job::CronJob;
use cronhub_core::types::schedule::Schedule;
use cronhub_core::AppError;

/// A cron job that runs a shell command from a `[[jobs]]` declaration.
#[derive(Debug)]
pub struct CommandJob {
    code: String,
    command: String,
    schedule: Schedule,
}

impl CommandJob {
    /// Build a command job from its declaration.
    ///
    /// Fails when the declaration names neither or both policies, or
    /// when a `run_at_times` entry is not a valid `HH:MM` time.
    pub fn from_config(config: &JobConfig) -> AppResult<Self> {
        let schedule = match (config.every_minutes, config.run_at_times.is_empty()) {
            (Some(minutes), true) => Schedule::Every {
                every: std::time::Duration::from_secs(minutes * 60),
                retry_after: config
                    .retry_after_minutes
                    .map(|m| std::time::Duration::from_secs(m * 60)),
            },
            (None, false) => {
                let times = config
                    .run_at_times
                    .iter()
                    .map(|s| {
                        NaiveTime::parse_from_str(s, "%H:%M").map_err(|e| {
                            AppError::configuration(format!(
                                "job '{}': invalid run_at_times entry '{s}': {e}",
                                config.code
                            ))
                        })
                    })
                    .collect::<AppResult<Vec<_>>>()?;
                Schedule::at_times(times)
            }
            _ => {
                return Err(AppError::configuration(format!(
                    "job '{}': exactly one of every_minutes or run_at_times must be set",
                    config.code
                )));
            }
        };
        Ok(Self {
            code: config.code.clone(),
            command: config.command.clone(),
            schedule,
        })
    }
}

#[async_trait]
impl CronJob for CommandJob {
    fn code(&self) -> &str {
        &self.code
    }

    fn schedule(&self) -> Schedule {
        self.schedule.clone()
    }

    async fn execute(&self) -> AppResult<String> {
        debug!(code = %self.code, command = %self.command, "Spawning shell command");
        let output = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .output()
            .await
            .map_err(|e| AppError::execution(format!("failed to spawn command: {e}")))?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
        if output.status.success() {
            Ok(stdout)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
            Err(AppError::execution(format!(
                "command exited with {}: {}",
                output.status,
                if stderr.is_empty() { &stdout } else { &stderr }
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> JobConfig {
        JobConfig {
            code: "shell_job".to_string(),
            command: "echo hello".to_string(),
            every_minutes: Some(5),
            retry_after_minutes: None,
            run_at_times: Vec::new(),
        }
    }

    #[test]
    fn test_interval_schedule_from_config() {
        let job = CommandJob::from_config(&base_config()).unwrap();
        assert_eq!(job.schedule(), Schedule::every_minutes(5));
    }

    #[test]
    fn test_at_times_schedule_from_config() {
        let config = JobConfig {
            every_minutes: None,
            run_at_times: vec!["23:30".to_string(), "06:00".to_string()],
            ..base_config()
        };
        let job = CommandJob::from_config(&config).unwrap();
        assert_eq!(
            job.schedule(),
            Schedule::at_times(vec![
                NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(23, 30, 0).unwrap(),
            ])
        );
    }

    #[test]
    fn test_both_policies_rejected() {
        let config = JobConfig {
            run_at_times: vec!["06:00".to_string()],
            ..base_config()
        };
        assert!(CommandJob::from_config(&config).is_err());
    }

    #[test]
    fn test_neither_policy_rejected() {
        let config = JobConfig {
            every_minutes: None,
            ..base_config()
        };
        assert!(CommandJob::from_config(&config).is_err());
    }

    #[test]
    fn test_bad_time_entry_rejected() {
        let config = JobConfig {
            every_minutes: None,
            run_at_times: vec!["25:99".to_string()],
            ..base_config()
        };
        let err = CommandJob::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("25:99"));
    }

    #[tokio::test]
    async fn test_command_output_becomes_message() {
        let job = CommandJob::from_config(&base_config()).unwrap();
        assert_eq!(job.execute().await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_failing_command_surfaces_stderr() {
        let config = JobConfig {
            command: "echo oops >&2; exit 3".to_string(),
            ..base_config()
        };
        let job = CommandJob::from_config(&config).unwrap();
        let err = job.execute().await.unwrap_err();
        assert!(err.to_string().contains("oops"));
    }
}
