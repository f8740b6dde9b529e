//! Display formatting for sizes and times

use chrono::{DateTime, Local, TimeZone};

use crate::models::Status;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const MS_PER_HOUR: i64 = 60 * 60 * 1000;
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Human readable byte count, e.g. `1.5 KB` or `2 MB`
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return String::from("0 Bytes");
    }

    let mut unit = 0;
    let mut threshold = 1024u64;
    while unit + 1 < SIZE_UNITS.len() && bytes >= threshold {
        unit += 1;
        threshold = threshold.saturating_mul(1024);
    }

    let value = bytes as f64 / 1024f64.powi(unit as i32);
    format!("{} {}", trim_decimals(value), SIZE_UNITS[unit])
}

/// Round to two decimals and drop trailing zeros
fn trim_decimals(value: f64) -> String {
    let rounded = format!("{:.2}", value);
    rounded
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Relative age of a timestamp compared to `now_ms`
pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let hours = (now_ms - timestamp_ms).div_euclid(MS_PER_HOUR);
    if hours < 1 {
        String::from("Just now")
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else {
        match local_time(timestamp_ms) {
            Some(dt) => dt.format("%Y-%m-%d").to_string(),
            None => String::from("Unknown"),
        }
    }
}

/// Full local date and time for the viewer header
pub fn format_timestamp(timestamp_ms: i64) -> String {
    match local_time(timestamp_ms) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => String::from("Unknown"),
    }
}

/// Total size of `statuses` in megabytes with one decimal
pub fn format_storage_used(statuses: &[Status]) -> String {
    let total: u64 = statuses.iter().map(|s| s.size).sum();
    format!("{:.1} MB", total as f64 / BYTES_PER_MB)
}

/// Size in megabytes with one decimal, as shown on saved cards
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / BYTES_PER_MB)
}

fn local_time(timestamp_ms: i64) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(timestamp_ms).single()
}
