//! Form payloads submitted by the back-office pages and the helpers they share.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::domain::UnknownVariant;

pub mod expenses;
pub mod leads;
pub mod payments;
pub mod quotations;
pub mod rates;
pub mod trips;
pub mod vendors;

/// Problems with a single submitted value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("invalid amount `{value}`")]
    InvalidAmount { value: String },
    #[error("invalid date `{value}`")]
    InvalidDate { value: String },
    #[error("invalid date and time `{value}`")]
    InvalidDateTime { value: String },
    #[error("invalid {field} `{value}`")]
    InvalidNumber { field: &'static str, value: String },
    #[error(transparent)]
    UnknownVariant(#[from] UnknownVariant),
}

pub type FieldResult<T> = Result<T, FieldError>;

/// Collapse whitespace runs and drop control characters.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Sanitize every line and squeeze runs of blank lines.
pub(crate) fn sanitize_multiline_text(input: &str) -> String {
    let mut lines: Vec<String> = input.lines().map(sanitize_inline_text).collect();

    while matches!(lines.first(), Some(line) if line.is_empty()) {
        lines.remove(0);
    }

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    let mut result = Vec::with_capacity(lines.len());
    let mut previous_empty = false;
    for line in lines {
        let is_empty = line.is_empty();
        if is_empty && previous_empty {
            continue;
        }
        previous_empty = is_empty;
        result.push(line);
    }

    result.join("\n")
}

/// Sanitized inline text, `None` when nothing is left.
pub(crate) fn optional_text(input: Option<&str>) -> Option<String> {
    input
        .map(sanitize_inline_text)
        .filter(|value| !value.is_empty())
}

/// Sanitized multiline text, `None` when nothing is left.
pub(crate) fn optional_notes(input: Option<&str>) -> Option<String> {
    input
        .map(sanitize_multiline_text)
        .filter(|value| !value.is_empty())
}

/// Sanitized inline text that must not be empty.
pub(crate) fn required_text(input: &str, field: &'static str) -> FieldResult<String> {
    let value = sanitize_inline_text(input);
    if value.is_empty() {
        return Err(FieldError::Required { field });
    }
    Ok(value)
}

/// Parse a rupee amount such as `12500`, `12,500.5` or `₹ 1,20,000.00` into paise.
///
/// Negative amounts and more than two decimal places are rejected.
pub fn parse_rupees(input: &str) -> FieldResult<i64> {
    let invalid = || FieldError::InvalidAmount {
        value: input.trim().to_string(),
    };

    let cleaned: String = input
        .trim()
        .trim_start_matches('₹')
        .chars()
        .filter(|ch| *ch != ',' && !ch.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return Err(invalid());
    }

    let (whole, fraction) = match cleaned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (cleaned.as_str(), ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().all(|ch| ch.is_ascii_digit())
        || !fraction.chars().all(|ch| ch.is_ascii_digit())
        || fraction.len() > 2
    {
        return Err(invalid());
    }

    let rupees: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    let paise: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => fraction.parse().map_err(|_| invalid())?,
    };

    rupees
        .checked_mul(100)
        .and_then(|value| value.checked_add(paise))
        .ok_or_else(invalid)
}

/// Optional rupee amount; blank input is `None`.
pub fn parse_optional_rupees(input: Option<&str>) -> FieldResult<Option<i64>> {
    match input.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => parse_rupees(value).map(Some),
        None => Ok(None),
    }
}

/// Parse an ISO date as sent by `<input type="date">`.
pub fn parse_date(input: &str) -> FieldResult<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| FieldError::InvalidDate {
        value: trimmed.to_string(),
    })
}

/// Optional ISO date; blank input is `None`.
pub fn parse_optional_date(input: Option<&str>) -> FieldResult<Option<NaiveDate>> {
    match input.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => parse_date(value).map(Some),
        None => Ok(None),
    }
}

/// Parse a value sent by `<input type="datetime-local">`, with or without seconds.
pub fn parse_datetime(input: &str) -> FieldResult<NaiveDateTime> {
    let trimmed = input.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| FieldError::InvalidDateTime {
            value: trimmed.to_string(),
        })
}

/// Optional integer; blank input is `None`.
pub fn parse_optional_i32(input: Option<&str>, field: &'static str) -> FieldResult<Option<i32>> {
    match input.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| FieldError::InvalidNumber {
                field,
                value: value.to_string(),
            }),
        None => Ok(None),
    }
}

/// Optional enumeration value; blank input is `None`.
pub fn parse_optional_variant<T>(input: Option<&str>) -> FieldResult<Option<T>>
where
    T: std::str::FromStr<Err = UnknownVariant>,
{
    match input.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => Ok(Some(value.parse()?)),
        None => Ok(None),
    }
}

/// HTML checkboxes submit `on` (or a custom value) when ticked and nothing otherwise.
pub(crate) fn checkbox(input: Option<&str>) -> bool {
    matches!(
        input.map(|value| value.trim().to_ascii_lowercase()).as_deref(),
        Some("on" | "true" | "1" | "yes")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rupees_accept_indian_grouping() {
        assert_eq!(parse_rupees("12500"), Ok(12_500_00));
        assert_eq!(parse_rupees("1,20,000.5"), Ok(120_000_50));
        assert_eq!(parse_rupees("₹ 12,500.05"), Ok(12_500_05));
        assert_eq!(parse_rupees(".5"), Ok(50));
    }

    #[test]
    fn rupees_reject_garbage() {
        for value in ["", "-100", "12.345", "12a", ".", "1.2.3"] {
            assert!(parse_rupees(value).is_err(), "{value} should be rejected");
        }
    }

    #[test]
    fn optional_helpers_treat_blank_as_none() {
        assert_eq!(parse_optional_rupees(Some("  ")), Ok(None));
        assert_eq!(parse_optional_date(None), Ok(None));
        assert_eq!(parse_optional_i32(Some(""), "pax"), Ok(None));
        assert_eq!(parse_optional_i32(Some("12"), "pax"), Ok(Some(12)));
        assert!(parse_optional_i32(Some("twelve"), "pax").is_err());
    }

    #[test]
    fn datetime_accepts_browser_format() {
        let parsed = parse_datetime("2025-03-01T09:30").expect("datetime");
        assert_eq!(parsed.to_string(), "2025-03-01 09:30:00");
        assert!(parse_datetime("01/03/2025").is_err());
    }

    #[test]
    fn multiline_text_is_squeezed() {
        assert_eq!(
            sanitize_multiline_text("\n Day 1:  Munnar \n\n\n Day 2: Thekkady\n"),
            "Day 1: Munnar\n\nDay 2: Thekkady"
        );
        assert_eq!(optional_notes(Some(" \n ")), None);
    }

    #[test]
    fn checkbox_values() {
        assert!(checkbox(Some("on")));
        assert!(!checkbox(None));
        assert!(!checkbox(Some("off")));
    }
}
