//! Primitive sanitizers.
//!
//! Every function here is total: it accepts an arbitrary JSON value (the
//! persisted document is untrusted input) and always returns a safe value.
//! Nothing in this module can fail or panic.

use chrono::NaiveDate;
use serde_json::Value;

/// Clamp a value to safe single-line text.
///
/// Non-strings become empty. Control characters and whitespace runs are
/// collapsed to single spaces, the result is trimmed and truncated to
/// `max_len` characters.
#[must_use]
pub fn single_line_text(value: &Value, max_len: usize) -> String {
    let Some(raw) = value.as_str() else {
        return String::new();
    };

    let mut out = String::with_capacity(raw.len());
    let mut last_was_space = true; // leading whitespace is dropped
    for ch in raw.chars() {
        if ch.is_control() || ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }

    truncate_chars(out.trim_end().to_string(), max_len)
}

/// Clamp a value to safe multiline text.
///
/// Line endings are normalized to `\n`, control characters other than
/// newline are stripped, and the result is trimmed and truncated.
#[must_use]
pub fn multiline_text(value: &Value, max_len: usize) -> String {
    let Some(raw) = value.as_str() else {
        return String::new();
    };

    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");
    let cleaned: String = normalized
        .chars()
        .filter(|&c| c == '\n' || !c.is_control())
        .collect();

    truncate_chars(cleaned.trim().to_string(), max_len)
}

/// Validate a strict `YYYY-MM-DD` date string.
///
/// Calendar-invalid dates (e.g. `2024-02-30`) are rejected by parsing and
/// checking the exact round-trip. Returns an empty string on any failure.
#[must_use]
pub fn date_string(value: &Value) -> String {
    let Some(raw) = value.as_str() else {
        return String::new();
    };
    if parse_date(raw).is_some() {
        raw.to_string()
    } else {
        String::new()
    }
}

/// Parse a strict `YYYY-MM-DD` date, rejecting anything that does not
/// round-trip to the exact input.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    if date.format("%Y-%m-%d").to_string() == raw {
        Some(date)
    } else {
        None
    }
}

/// Resolve a value against a fixed set of allowed strings.
///
/// Returns the value only on exact membership, otherwise the fallback.
#[must_use]
pub fn resolve_allowed<'a>(allowed: &[&'a str], value: &Value, fallback: &'a str) -> &'a str {
    value
        .as_str()
        .and_then(|s| allowed.iter().find(|&&a| a == s))
        .copied()
        .unwrap_or(fallback)
}

/// Parse a value as an integer and clamp it into `[min, max]`.
///
/// Accepts JSON numbers and numeric strings; fractional values are
/// truncated toward zero. Anything non-finite or unparseable yields the
/// fallback.
#[must_use]
pub fn clamp_integer(value: &Value, min: i64, max: i64, fallback: i64) -> i64 {
    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f as i64),
        _ => None,
    };

    parsed.map_or(fallback, |n| n.clamp(min, max))
}

/// Sanitize a short reference token (sprint/epic/issue id), or `None`
/// when nothing usable remains.
#[must_use]
pub fn opt_token(value: &Value, max_len: usize) -> Option<String> {
    let token = single_line_text(value, max_len);
    if token.is_empty() { None } else { Some(token) }
}

fn truncate_chars(s: String, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s;
    }
    s.chars().take(max_len).collect::<String>().trim_end().to_string()
}
