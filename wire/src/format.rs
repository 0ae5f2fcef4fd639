//! Display helpers shared by the dashboard pages and the CLI.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

const HU_MONTHS: [&str; 12] = [
    "január",
    "február",
    "március",
    "április",
    "május",
    "június",
    "július",
    "augusztus",
    "szeptember",
    "október",
    "november",
    "december",
];

/// Longest prefix of `text` holding at most `max_chars` characters.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Whole percent for a `0.0..=1.0` score, clamped to `0..=100`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percent(score: f64) -> u32 {
    if !score.is_finite() {
        return 0;
    }
    (score * 100.0).round().clamp(0.0, 100.0) as u32
}

/// Parse backend timestamps: RFC 3339, or naive ISO with `T` or space.
///
/// Offsets are kept as sent; no conversion to the viewer's zone happens.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Hungarian long date, e.g. `2024. március 5.`; unparseable input is
/// returned unchanged.
#[must_use]
pub fn format_date(raw: &str) -> String {
    parse_timestamp(raw).map_or_else(|| raw.to_owned(), |dt| long_date(&dt))
}

/// Hungarian long date with time, e.g. `2024. március 5. 14:30`.
#[must_use]
pub fn format_date_time(raw: &str) -> String {
    parse_timestamp(raw).map_or_else(
        || raw.to_owned(),
        |dt| format!("{} {:02}:{:02}", long_date(&dt), dt.hour(), dt.minute()),
    )
}

fn long_date(dt: &NaiveDateTime) -> String {
    let month = HU_MONTHS[dt.month0() as usize];
    format!("{}. {month} {}.", dt.year(), dt.day())
}
