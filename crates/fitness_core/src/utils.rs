//! Timestamp helpers shared by the normalization pipeline.

use chrono::{DateTime, FixedOffset, Local, Utc};
use tracing::warn;

/// `yyyy-MM-ddTHH:mm:ss.SSSZ`, e.g. `2025-12-15T10:30:00.000+0100`.
pub const RECORD_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Format epoch milliseconds for a normalized record.
///
/// Uses `offset` when given, otherwise the process's local timezone.
/// Values outside chrono's representable range collapse to the epoch.
pub fn format_timestamp(millis: i64, offset: Option<FixedOffset>) -> String {
    let utc = DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_else(|| {
        warn!(millis, "timestamp out of range, formatting as the epoch");
        DateTime::UNIX_EPOCH
    });
    match offset {
        Some(offset) => utc
            .with_timezone(&offset)
            .format(RECORD_TIMESTAMP_FORMAT)
            .to_string(),
        None => utc
            .with_timezone(&Local)
            .format(RECORD_TIMESTAMP_FORMAT)
            .to_string(),
    }
}

/// Parse a `±HH:MM` offset such as `+02:00` or `-05:30`.
pub fn parse_utc_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':')?;
    if !is_two_digits(hours) || !is_two_digits(minutes) {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

fn is_two_digits(s: &str) -> bool {
    s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit())
}
