use std::time::Duration;

const SECONDS_IN_MINUTE: u64 = 60;

/// Format remaining game time as `mm:ss`.
///
/// Sub-second remainders are dropped, so 2.9 s left reads `00:02`. Minutes are
/// not capped at 59: an hour reads `60:00`.
#[must_use]
pub fn format_remaining(remaining: Duration) -> String {
    format_seconds(remaining.as_secs())
}

/// Same as [`format_remaining`] for a whole number of seconds.
#[must_use]
pub fn format_seconds(seconds: u64) -> String {
    let minutes = seconds / SECONDS_IN_MINUTE;
    let left_seconds = seconds % SECONDS_IN_MINUTE;
    format!("{minutes:02}:{left_seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_seconds(0), "00:00");
        assert_eq!(format_seconds(3), "00:03");
        assert_eq!(format_seconds(60), "01:00");
        assert_eq!(format_seconds(125), "02:05");
        assert_eq!(format_seconds(3600), "60:00");
    }

    #[test]
    fn drops_sub_second_remainder() {
        assert_eq!(format_remaining(Duration::from_millis(2_900)), "00:02");
        assert_eq!(format_remaining(Duration::from_secs(40)), "00:40");
    }
}
