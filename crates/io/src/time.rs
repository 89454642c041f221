//! Timestamp and number parsing for text cells.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Formats tried, in order, after RFC 3339 when no explicit format is set.
const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses a timestamp cell.
///
/// With `format`, only that format is tried (as a datetime, then as a bare
/// date at midnight). Without it: RFC 3339 (converted to UTC), the
/// [`DATETIME_FORMATS`], then `%Y-%m-%d`.
pub(crate) fn parse_time(s: &str, format: Option<&str>) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Some(fmt) = format {
        return NaiveDateTime::parse_from_str(s, fmt)
            .ok()
            .or_else(|| NaiveDate::parse_from_str(s, fmt).ok().and_then(midnight));
    }

    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|d| d.naive_utc())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        })
        .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().and_then(midnight))
}

/// Parses a value cell. Empty cells and `NA`/`NaN` markers become NaN.
pub(crate) fn parse_value(s: &str) -> Option<f64> {
    match s.trim() {
        "" | "NA" | "N/A" | "nan" | "NaN" | "null" => Some(f64::NAN),
        other => other.parse().ok(),
    }
}

fn midnight(d: NaiveDate) -> Option<NaiveDateTime> {
    d.and_hms_opt(0, 0, 0)
}
