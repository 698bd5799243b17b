//! Date job formatting.

use core::fmt::Write;

use heapless::String;

/// Seconds in a day.
const SECONDS_PER_DAY: i64 = 86_400;

/// Civil date (year, month, day) for a count of days since 1970-01-01.
///
/// Works for the whole proleptic Gregorian calendar, including days before the epoch.
pub const fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year, month, day)
}

/// Format a Unix timestamp (seconds, local wall-clock) as `DD/MM/YYYY`.
pub fn format_date(timestamp: i64) -> String<16> {
    let (year, month, day) = civil_from_days(timestamp.div_euclid(SECONDS_PER_DAY));
    let mut out = String::new();
    let _ = write!(out, "{:02}/{:02}/{:04}", day, month, year);
    out
}
