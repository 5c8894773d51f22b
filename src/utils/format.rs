//! Output formatting utilities

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display language for generated phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "en")]
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "zh-cn" | "zh" | "zh_cn" => Ok(Self::ZhCn),
            "en" | "en-us" | "en_us" => Ok(Self::En),
            other => Err(format!("unsupported locale: {other}")),
        }
    }
}

/// Unit of a relative-time phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl RelativeUnit {
    const fn english(self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    const fn chinese(self) -> &'static str {
        match self {
            Self::Second => "秒钟",
            Self::Minute => "分钟",
            Self::Hour => "小时",
            Self::Day => "天",
            Self::Month => "个月",
            Self::Year => "年",
        }
    }
}

/// Label shown when a date cannot be parsed.
#[must_use]
pub const fn unknown_time_label(locale: Locale) -> &'static str {
    match locale {
        Locale::ZhCn => "未知时间",
        Locale::En => "unknown time",
    }
}

/// Relative phrase for a signed count of units (negative is past).
///
/// Uses the named forms where the language has them ("yesterday", "去年").
#[must_use]
pub fn relative_phrase(count: i64, unit: RelativeUnit, locale: Locale) -> String {
    match locale {
        Locale::En => english_phrase(count, unit),
        Locale::ZhCn => chinese_phrase(count, unit),
    }
}

fn english_phrase(count: i64, unit: RelativeUnit) -> String {
    let named = match (unit, count) {
        (RelativeUnit::Second, 0) => Some("now"),
        (RelativeUnit::Minute, 0) => Some("this minute"),
        (RelativeUnit::Hour, 0) => Some("this hour"),
        (RelativeUnit::Day, 0) => Some("today"),
        (RelativeUnit::Day, -1) => Some("yesterday"),
        (RelativeUnit::Day, 1) => Some("tomorrow"),
        (RelativeUnit::Month, 0) => Some("this month"),
        (RelativeUnit::Month, -1) => Some("last month"),
        (RelativeUnit::Month, 1) => Some("next month"),
        (RelativeUnit::Year, 0) => Some("this year"),
        (RelativeUnit::Year, -1) => Some("last year"),
        (RelativeUnit::Year, 1) => Some("next year"),
        _ => None,
    };
    if let Some(named) = named {
        return named.to_string();
    }

    let magnitude = count.unsigned_abs();
    let plural = if magnitude == 1 { "" } else { "s" };
    if count < 0 {
        format!("{magnitude} {}{plural} ago", unit.english())
    } else {
        format!("in {magnitude} {}{plural}", unit.english())
    }
}

fn chinese_phrase(count: i64, unit: RelativeUnit) -> String {
    let named = match (unit, count) {
        (RelativeUnit::Second, 0) => Some("现在"),
        (RelativeUnit::Minute, 0) => Some("此刻"),
        (RelativeUnit::Hour, 0) => Some("这一时间"),
        (RelativeUnit::Day, 0) => Some("今天"),
        (RelativeUnit::Day, -2) => Some("前天"),
        (RelativeUnit::Day, -1) => Some("昨天"),
        (RelativeUnit::Day, 1) => Some("明天"),
        (RelativeUnit::Day, 2) => Some("后天"),
        (RelativeUnit::Month, 0) => Some("本月"),
        (RelativeUnit::Month, -1) => Some("上个月"),
        (RelativeUnit::Month, 1) => Some("下个月"),
        (RelativeUnit::Year, 0) => Some("今年"),
        (RelativeUnit::Year, -1) => Some("去年"),
        (RelativeUnit::Year, 1) => Some("明年"),
        _ => None,
    };
    if let Some(named) = named {
        return named.to_string();
    }

    let magnitude = count.unsigned_abs();
    let direction = if count < 0 { "前" } else { "后" };
    format!("{magnitude}{}{direction}", unit.chinese())
}

/// Group digits in thousands, e.g. `12345` becomes `12,345`.
#[must_use]
pub fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Split a tagline on line breaks, dropping blank lines.
#[must_use]
pub fn split_tagline(tagline: &str) -> Vec<&str> {
    tagline
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Truncate a string to a maximum length
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let mut out = String::new();
    for (idx, ch) in s.chars().enumerate() {
        if idx >= max_len {
            break;
        }
        out.push(ch);
    }
    if s.chars().count() > max_len {
        if max_len >= 3 {
            let trimmed = out.chars().take(max_len.saturating_sub(3)).collect::<String>();
            format!("{trimmed}...")
        } else {
            "...".to_string()
        }
    } else {
        out
    }
}
