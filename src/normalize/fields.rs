//! Field normalization: total conversions from untyped cells to canonical values.
//!
//! None of these functions fail. Anything they cannot make sense of degrades to
//! the empty value of the target type.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value as JsonValue;

use crate::core::categories::DEFAULT_CATEGORY;
use crate::normalize::value::RawValue;
use crate::utils::format::{Locale, RelativeUnit, relative_phrase, unknown_time_label};

const LIST_DELIMITERS: [char; 3] = [',', ';', '|'];

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_MONTH: i64 = 2_592_000;
const SECONDS_PER_YEAR: i64 = 31_536_000;

/// Normalize a tag-like cell into an ordered list of non-empty strings.
///
/// Accepts native lists, JSON array text, delimited text (`,` `;` `|`) and
/// whitespace-separated text. A bare number becomes a one-element list.
#[must_use]
pub fn to_string_list(value: &RawValue) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    match value {
        RawValue::List(items) => {
            clean_parts(items.iter().filter_map(|item| match item {
                RawValue::Null => Some("null".to_string()),
                other => other.text_form(),
            }))
        }
        RawValue::Integer(_) | RawValue::Real(_) => value.text_form().into_iter().collect(),
        RawValue::Text(text) => split_list_text(text),
        RawValue::Blob(bytes) => std::str::from_utf8(bytes)
            .map(split_list_text)
            .unwrap_or_default(),
        RawValue::Null => Vec::new(),
    }
}

fn split_list_text(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if let Ok(JsonValue::Array(items)) = serde_json::from_str::<JsonValue>(trimmed) {
        return clean_parts(items.iter().map(json_scalar_text));
    }

    if trimmed.contains(LIST_DELIMITERS) {
        clean_parts(trimmed.split(LIST_DELIMITERS))
    } else {
        clean_parts(trimmed.split_whitespace())
    }
}

fn json_scalar_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(text) => text.clone(),
        JsonValue::Null => "null".to_string(),
        JsonValue::Bool(flag) => flag.to_string(),
        JsonValue::Number(number) => number
            .as_i64()
            .map(|n| n.to_string())
            .or_else(|| number.as_u64().map(|n| n.to_string()))
            .or_else(|| number.as_f64().map(|n| n.to_string()))
            .unwrap_or_else(|| number.to_string()),
        JsonValue::Array(items) => items.iter().map(json_scalar_text).collect::<Vec<_>>().join(","),
        JsonValue::Object(_) => "[object Object]".to_string(),
    }
}

fn clean_parts<I, S>(parts: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts
        .into_iter()
        .filter_map(|part| {
            let trimmed = part.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect()
}

/// Best-effort single category label for a raw category cell.
#[must_use]
pub fn to_category_label(value: &RawValue) -> String {
    if let Some(first) = to_string_list(value).into_iter().next() {
        return first;
    }
    if let RawValue::Text(text) = value {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    DEFAULT_CATEGORY.to_string()
}

/// Lowercased form used for case-insensitive matching. Never stored.
#[must_use]
pub fn lowercase_fold(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    value.to_lowercase()
}

/// Parse a date cell: epoch milliseconds (numeric or all-digit text) or date text.
///
/// `None` means unknown; callers must not read it as the epoch.
#[must_use]
pub fn parse_flexible_date(value: &RawValue) -> Option<DateTime<Utc>> {
    if value.is_empty() {
        return None;
    }
    match value {
        RawValue::Integer(millis) => DateTime::from_timestamp_millis(*millis),
        #[allow(clippy::cast_possible_truncation)]
        RawValue::Real(millis) if millis.is_finite() => {
            DateTime::from_timestamp_millis(millis.trunc() as i64)
        }
        RawValue::Text(text) => parse_date_text(text),
        RawValue::Blob(bytes) => std::str::from_utf8(bytes).ok().and_then(parse_date_text),
        _ => None,
    }
}

/// Text variant of [`parse_flexible_date`].
#[must_use]
pub fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return trimmed
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis);
    }
    parse_general_date(trimmed)
}

fn parse_general_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f%z",
        "%Y-%m-%d %H:%M:%S%.f%z",
        "%Y-%m-%d %H:%M:%S%.f %z",
    ] {
        if let Ok(parsed) = DateTime::parse_from_str(text, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
    ] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed.and_utc());
        }
    }
    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(parsed) = NaiveDate::parse_from_str(text, format) {
            return parsed.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    None
}

/// Render a date cell relative to `now`, e.g. "3天前" or "2 hours ago".
///
/// Each bucket divides the raw second difference by its own unit and rounds
/// once. 59.6 minutes stays in the minute bucket and renders as 60 minutes.
#[must_use]
pub fn format_relative_time(value: &RawValue, now: DateTime<Utc>, locale: Locale) -> String {
    let Some(date) = parse_flexible_date(value) else {
        return unknown_time_label(locale).to_string();
    };

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let diff_seconds = round_half_up((date - now).num_milliseconds() as f64 / 1000.0) as i64;
    let abs = diff_seconds.abs();

    let (unit, size) = if abs < SECONDS_PER_MINUTE {
        (RelativeUnit::Second, 1)
    } else if abs < SECONDS_PER_HOUR {
        (RelativeUnit::Minute, SECONDS_PER_MINUTE)
    } else if abs < SECONDS_PER_DAY {
        (RelativeUnit::Hour, SECONDS_PER_HOUR)
    } else if abs < SECONDS_PER_MONTH {
        (RelativeUnit::Day, SECONDS_PER_DAY)
    } else if abs < SECONDS_PER_YEAR {
        (RelativeUnit::Month, SECONDS_PER_MONTH)
    } else {
        (RelativeUnit::Year, SECONDS_PER_YEAR)
    };

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let count = round_half_up(diff_seconds as f64 / size as f64) as i64;
    relative_phrase(count, unit, locale)
}

/// Rounds halves toward positive infinity (`-2.5` becomes `-2`).
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
