//! Duration helpers shared by the aggregator and the console listings.

use chrono::TimeDelta;

/// Whole hours in `d`, remainder discarded.
pub fn truncated_hours(d: TimeDelta) -> i64 {
    d.num_seconds() / 3600
}

pub fn format_minutes(mins: i64) -> String {
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_are_truncated_not_rounded() {
        assert_eq!(truncated_hours(TimeDelta::minutes(90)), 1);
        assert_eq!(truncated_hours(TimeDelta::minutes(59)), 0);
        assert_eq!(truncated_hours(TimeDelta::hours(26)), 26);
    }

    #[test]
    fn minutes_render_as_hh_mm() {
        assert_eq!(format_minutes(90), "01:30");
        assert_eq!(format_minutes(-5), "-00:05");
    }
}
