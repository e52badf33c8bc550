//! Julian date conversions.

use chrono::{DateTime, Utc};

/// Julian day of the J2000 epoch (2000-01-01T12:00:00 UTC).
pub const J2000: f64 = 2_451_545.0;

/// Julian day of the Unix epoch (1970-01-01T00:00:00 UTC).
const UNIX_EPOCH: f64 = 2_440_587.5;

const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian day of the given time.
pub fn julian_day(time: DateTime<Utc>) -> f64 {
    UNIX_EPOCH + time.timestamp_millis() as f64 / 1000.0 / SECONDS_PER_DAY
}

/// Julian centuries between the J2000 epoch and the given julian day.
///
/// This is the time argument of the ephemeris formulas.
pub fn julian_century(julian_day: f64) -> f64 {
    (julian_day - J2000) / DAYS_PER_CENTURY
}
