//! Marketplace date strings to naive timestamps.
//!
//! Both parsers return wall-clock time exactly as written. Offsets and zone
//! names are discarded, never applied: the feeds are assumed to report in the
//! seller's own timezone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Date-time layouts tried in order by the fuzzy parser.
///
/// `%.f` also matches when no fractional part is present.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
    "%b %d, %Y %H:%M:%S",
    "%b %d, %Y %I:%M:%S %p",
    "%b %d, %Y %I:%M %p",
    "%b %d %Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d %b %Y", "%b %d, %Y", "%b %d %Y"];

const ISO_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
];

const ISO_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

/// Parses a Marketplace-T purchase date.
///
/// Anything from the first `(` onward is an annotation and is discarded,
/// e.g. `"2024-05-03 10:22:11 (PDT)"`. The remainder is parsed fuzzily.
#[must_use]
pub fn parse_t_date(raw: &str) -> Option<NaiveDateTime> {
    let head = raw.find('(').map_or(raw, |pos| &raw[..pos]).trim();
    if head.is_empty() {
        return None;
    }
    parse_fuzzy(head)
}

/// Parses a Marketplace-S processing date as a permissive ISO-like timestamp.
///
/// Accepts `-` or `/` date separators, `T` or space before the time,
/// optional fractional seconds, and an optional trailing `Z` or UTC offset
/// (dropped). A bare date means midnight.
#[must_use]
pub fn parse_s_date(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    let s = strip_utc_offset(s);
    parse_with(s, ISO_DATETIME_FORMATS, ISO_DATE_FORMATS)
}

/// Tries the known layouts, then retries after dropping tokens that cannot be
/// part of a date (weekday names, zone abbreviations, filler words).
fn parse_fuzzy(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    let trimmed = strip_utc_offset(s);
    if let Some(ts) = parse_with(trimmed, DATETIME_FORMATS, DATE_FORMATS) {
        return Some(ts);
    }

    let cleaned = drop_junk_tokens(trimmed);
    if cleaned.is_empty() || cleaned == trimmed {
        return None;
    }
    let cleaned = strip_utc_offset(&cleaned).to_string();
    parse_with(&cleaned, DATETIME_FORMATS, DATE_FORMATS)
}

fn parse_with(s: &str, datetime_formats: &[&str], date_formats: &[&str]) -> Option<NaiveDateTime> {
    datetime_formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            date_formats
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

/// Removes a trailing `Z` or `±HH:MM` / `±HHMM` / `±HH` offset that follows a
/// time of day. Date-only strings are returned untouched.
fn strip_utc_offset(s: &str) -> &str {
    let s = s.trim();
    if !s.contains(':') {
        return s;
    }
    if let Some(rest) = s.strip_suffix(['Z', 'z']) {
        return rest.trim_end();
    }
    let Some(pos) = s.rfind(['+', '-']) else {
        return s;
    };
    let last_colon = s.rfind(':').unwrap_or(0);
    let offset = &s[pos + 1..];
    let digits = offset.chars().filter(char::is_ascii_digit).count();
    let looks_like_offset = matches!(digits, 2 | 4)
        && offset.chars().all(|c| c.is_ascii_digit() || c == ':')
        && (pos > last_colon || offset.contains(':'));
    if looks_like_offset && s[..pos].contains(':') {
        s[..pos].trim_end()
    } else {
        s
    }
}

fn drop_junk_tokens(s: &str) -> String {
    s.split_whitespace()
        .filter(|token| is_date_token(token))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_date_token(token: &str) -> bool {
    let core = token.trim_matches(|c: char| matches!(c, ',' | '.' | ';'));
    let lower = core.to_lowercase();
    if lower.starts_with("utc") || lower.starts_with("gmt") {
        return false;
    }
    if core.chars().any(|c| c.is_ascii_digit()) {
        return true;
    }
    if matches!(lower.as_str(), "am" | "pm") {
        return true;
    }
    lower.len() >= 3 && MONTHS.iter().any(|m| m.starts_with(lower.as_str()))
}
