use chrono::{Datelike, NaiveDate, Weekday};

const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// English 3-letter month name, independent of the system locale.
pub fn month_abbrev(month: u32) -> &'static str {
    MONTH_ABBREV
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("???")
}

pub fn is_weekend(d: NaiveDate) -> bool {
    matches!(d.weekday(), Weekday::Sat | Weekday::Sun)
}

/// `DD-Mon`, e.g. `04-Mar`.
pub fn day_month_label(d: NaiveDate) -> String {
    format!("{:02}-{}", d.day(), month_abbrev(d.month()))
}

/// Every day from `start` to `end`, both included. Empty when `end < start`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut d = start;

    while d <= end {
        out.push(d);
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }

    out
}
