//! Working-day counting and safe rate formatting

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Default weekly rest day.
pub const DEFAULT_REST_DAY: Weekday = Weekday::Sun;

/// Count days in the inclusive [start, end] range whose weekday is not the
/// rest day. `start > end` yields 0.
pub fn working_days(start: NaiveDate, end: NaiveDate, rest_day: Weekday) -> u64 {
    if start > end {
        return 0;
    }
    let mut count = 0;
    let mut day = start;
    while day <= end {
        if day.weekday() != rest_day {
            count += 1;
        }
        match day.checked_add_days(Days::new(1)) {
            Some(next) => day = next,
            None => break,
        }
    }
    count
}

/// Divide-by-zero-safe rate rendering used everywhere a rate is displayed.
/// A zero denominator reports the fixed fallback "0.00", never NaN or
/// infinity.
pub fn safe_rate(numerator: u64, denominator: u64) -> String {
    if denominator == 0 {
        return "0.00".to_string();
    }
    format!("{:.2}", numerator as f64 / denominator as f64)
}

/// Parse a configured rest-day name; unrecognized values fall back to
/// Sunday.
pub fn rest_day_from_name(name: &str) -> Weekday {
    match name.trim().to_lowercase().as_str() {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        _ => Weekday::Sun,
    }
}
