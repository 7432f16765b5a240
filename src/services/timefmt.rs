//! Clock and duration formatting
//!
//! Pure helpers shared by the itinerary extractor. Duration strings use the
//! Spanish abbreviations the frontend expects ("seg" / "min").

use chrono::NaiveTime;

/// Convert seconds since midnight to a NaiveTime, clamped to the day
pub fn seconds_to_naive_time(seconds: i64) -> NaiveTime {
    let clamped = seconds.clamp(0, 24 * 60 * 60 - 1) as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(clamped, 0)
        .unwrap_or_else(|| NaiveTime::from_hms_opt(23, 59, 59).expect("valid time"))
}

/// Format seconds since midnight as a 12-hour clock string, e.g. "09:05 AM".
/// Midnight renders as "12:00 AM", noon as "12:00 PM".
pub fn seconds_to_clock_str(seconds_from_midnight: i64) -> String {
    let mut hours = seconds_from_midnight / 3600;
    let minutes = (seconds_from_midnight % 3600) / 60;
    let period = if hours >= 12 { "PM" } else { "AM" };
    if hours == 0 {
        hours = 12;
    }
    if hours > 12 {
        hours -= 12;
    }
    format!("{:02}:{:02} {}", hours, minutes, period)
}

/// Format a duration in seconds as a short human-readable string:
/// "45 seg" under one minute, "2 h 05 min" for an hour or more, "25 min"
/// otherwise.
pub fn seconds_to_duration_str(total_seconds: i64) -> String {
    if total_seconds < 60 {
        return format!("{} seg", total_seconds);
    }
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    if hours > 0 {
        format!("{} h {:02} min", hours, minutes)
    } else {
        format!("{} min", minutes)
    }
}
