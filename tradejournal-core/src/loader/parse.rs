//! Cell parsers for money and time values.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use super::RowIssue;

/// Date-time layouts seen in broker and prop-firm exports.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y.%m.%d %H:%M:%S",
    "%Y.%m.%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

/// Date-only layouts; the time defaults to midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Parse a timestamp cell.
///
/// `extra_formats` are tried first and may be either date-time or date-only
/// layouts. RFC 3339 values keep their wall-clock time; the offset is
/// dropped so the trade stays on the calendar day the export shows.
pub fn parse_timestamp(raw: &str, extra_formats: &[String]) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in extra_formats {
        if let Some(ts) = parse_with(s, fmt) {
            return Some(ts);
        }
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .chain(DATE_FORMATS)
        .find_map(|fmt| parse_with(s, fmt))
}

fn parse_with(s: &str, fmt: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, fmt).ok().or_else(|| {
        NaiveDate::parse_from_str(s, fmt)
            .ok()
            .map(|d| d.and_time(NaiveTime::MIN))
    })
}

/// Parse a profit/loss cell such as `$1,234.50`, `-40`, `(40.00)` or `€12`.
pub fn parse_money(raw: &str) -> Result<f64, RowIssue> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(RowIssue::MissingPnl);
    }
    parse_number(s).ok_or_else(|| RowIssue::InvalidPnl(raw.trim().to_string()))
}

/// Lenient numeric parse shared by money, size and price cells.
///
/// Strips currency symbols, thousands separators and whitespace, treats an
/// accounting-style `(x)` as `-x` and rejects non-finite results.
pub fn parse_number(raw: &str) -> Option<f64> {
    let mut s = raw.trim();
    let mut negate = false;
    if let Some(inner) = s.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        negate = true;
        s = inner;
    }

    let cleaned: String = s
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | ',' | '\'' | '_') && !c.is_whitespace())
        .map(|c| if c == '\u{2212}' { '-' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    // "$-40" and "-$40" both end up here as "-40"
    let value: f64 = cleaned.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(if negate { -value } else { value })
}
