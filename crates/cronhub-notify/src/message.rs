//! Failure notification rendering.

use std::fmt::Write;

use cronhub_core::types::duration::humanize_duration;
use cronhub_core::types::report::FailureReport;

/// Subject line for a failure report.
pub fn subject(prefix: &str, report: &FailureReport) -> String {
    format!("{prefix}{} failed", report.code)
}

/// Plain-text body: one section per failed record, oldest first.
pub fn body(report: &FailureReport) -> String {
    let mut out = format!(
        "{} unreported failure(s) for cron job {}\n",
        report.records.len(),
        report.code
    );
    for record in &report.records {
        let _ = write!(
            out,
            "\nStarted: {}\nDuration: {}\n{}\n",
            record.start_time.format("%Y-%m-%d %H:%M:%S UTC"),
            humanize_duration(record.duration()),
            record.message
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    use cronhub_core::types::run_record::RunRecord;

    use super::*;

    fn report() -> FailureReport {
        let start = Utc.with_ymd_and_hms(2014, 1, 1, 0, 0, 0).unwrap();
        FailureReport {
            code: "nightly_job".to_string(),
            records: vec![RunRecord {
                id: Uuid::new_v4(),
                code: "nightly_job".to_string(),
                start_time: start,
                end_time: start + Duration::seconds(61),
                is_success: false,
                message: "disk full".to_string(),
                ran_at_time: None,
                failure_reported: false,
            }],
        }
    }

    #[test]
    fn test_subject_carries_prefix_and_code() {
        assert_eq!(
            subject("[Cron Failure] ", &report()),
            "[Cron Failure] nightly_job failed"
        );
    }

    #[test]
    fn test_body_sections() {
        let body = body(&report());
        assert!(body.starts_with("1 unreported failure(s) for cron job nightly_job"));
        assert!(body.contains("Started: 2014-01-01 00:00:00 UTC"));
        assert!(body.contains("Duration: 1 minute, 1 second"));
        assert!(body.contains("disk full"));
    }
}
