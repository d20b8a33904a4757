//! Human-readable rendering of run durations.

use chrono::Duration;

/// Render a duration as e.g. `"1 day, 2 hours, 5 minutes"`.
///
/// Zero-valued units are omitted; a duration below one second renders as
/// `"< 1 second"` rather than `"0 seconds"`.
pub fn humanize_duration(duration: Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);
    if total_seconds == 0 {
        return "< 1 second".to_string();
    }

    let units = [
        ("day", total_seconds / 86_400),
        ("hour", (total_seconds % 86_400) / 3_600),
        ("minute", (total_seconds % 3_600) / 60),
        ("second", total_seconds % 60),
    ];

    let parts: Vec<String> = units
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(name, count)| {
            if *count == 1 {
                format!("1 {name}")
            } else {
                format!("{count} {name}s")
            }
        })
        .collect();

    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_units() {
        let d = Duration::days(1) + Duration::hours(1) + Duration::minutes(1) + Duration::seconds(1);
        assert_eq!(humanize_duration(d), "1 day, 1 hour, 1 minute, 1 second");
    }

    #[test]
    fn test_plural_single_unit() {
        assert_eq!(humanize_duration(Duration::days(2)), "2 days");
    }

    #[test]
    fn test_skips_zero_units() {
        let d = Duration::days(15) + Duration::minutes(4);
        assert_eq!(humanize_duration(d), "15 days, 4 minutes");
    }

    #[test]
    fn test_below_one_second() {
        assert_eq!(humanize_duration(Duration::zero()), "< 1 second");
        assert_eq!(humanize_duration(Duration::milliseconds(999)), "< 1 second");
    }
}
