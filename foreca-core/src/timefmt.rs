//! Best-effort rendering of API timestamps as "HH:MM" labels.
//!
//! Timestamps come back in several shapes depending on the endpoint. The
//! normalizer is total: every input maps to some string, unparseable input
//! degrades to [`UNKNOWN_TIME`] instead of an error.

use chrono::{NaiveDateTime, NaiveTime};

/// Marker returned when no strategy can make sense of the input.
pub const UNKNOWN_TIME: &str = "N/A";

const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.3f",
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%d %H:%M:%S",
];

const TIME_LAYOUTS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Normalize an arbitrary timestamp string to a 24-hour "HH:MM" label.
///
/// Strategies, first success wins:
/// 1. strict parse against the known layouts, re-rendered as "HH:MM";
/// 2. split on the first `T` and join the first two colon-delimited parts
///    of the remainder verbatim (no zero-padding correction);
/// 3. if the string contains a `:` at all, pass it through unchanged;
/// 4. otherwise [`UNKNOWN_TIME`].
pub fn hour_label(raw: &str) -> String {
    for layout in DATETIME_LAYOUTS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, layout) {
            return parsed.format("%H:%M").to_string();
        }
    }

    for layout in TIME_LAYOUTS {
        if let Ok(parsed) = NaiveTime::parse_from_str(raw, layout) {
            return parsed.format("%H:%M").to_string();
        }
    }

    if let Some((_, time_part)) = raw.split_once('T') {
        let mut parts = time_part.splitn(3, ':');
        if let (Some(hours), Some(minutes)) = (parts.next(), parts.next()) {
            return format!("{hours}:{minutes}");
        }
    }

    if raw.contains(':') {
        return raw.to_string();
    }

    UNKNOWN_TIME.to_string()
}

/// Convenience for optional timestamps coming straight off the model.
pub fn hour_label_opt(raw: Option<&str>) -> String {
    raw.map(hour_label)
        .unwrap_or_else(|| UNKNOWN_TIME.to_string())
}
