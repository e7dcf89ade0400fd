//! Utility functions shared across modules.

use chrono::{DateTime, Local};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Current wall-clock time as fractional seconds since the Unix epoch.
#[inline]
pub fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// Formats epoch seconds as a local ISO-8601 timestamp with microseconds.
/// Out-of-range values fall back to the epoch itself.
pub fn iso_datetime(epoch_secs: f64) -> String {
    let micros = (epoch_secs * 1_000_000.0).round() as i64;
    let utc = DateTime::from_timestamp_micros(micros).unwrap_or_default();
    utc.with_timezone(&Local)
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Rounds to two decimal places, the precision used for display and persistence.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats a `std::time::Duration` into a human-readable string using `humantime`.
#[inline]
pub fn format_duration(duration: Duration) -> String {
    humantime::format_duration(duration).to_string()
}
