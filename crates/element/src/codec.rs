//! Attribute codec.
//!
//! Converts attribute text into typed property values and back. Decoding
//! recovers locally from malformed structured literals and unparseable dates;
//! only conversions JavaScript itself would reject (big integer syntax, URLs
//! that cannot be resolved) and custom converter failures surface as errors.

use crate::definition::{Converter, PropertyDefinition};
use alloc::format;
use alloc::string::{String, ToString};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use url::Url;
use wisp_core::number::{format_number, parse_bigint, parse_number};
use wisp_core::{Error, Result, Value};

/// Largest absolute timestamp a date can hold, in milliseconds.
const MAX_TIME_MS: f64 = 8.64e15;

/// The Gregorian calendar repeats exactly every 400 years.
const CYCLE_YEARS: i64 = 400;
const CYCLE_MS: i64 = 146_097 * 86_400_000;

/// Decodes attribute text for the property described by `definition`.
///
/// `raw` is `None` when the attribute is absent.
pub fn decode<H>(
    raw: Option<&str>,
    attribute: &str,
    definition: &PropertyDefinition<H>,
    origin: &str,
) -> Result<Value>
where
    H: crate::host::Host,
{
    decode_with(
        raw,
        attribute,
        &definition.resolved_converter(),
        definition.default_value(),
        origin,
    )
}

/// Decodes attribute text with an explicit converter and default.
pub fn decode_with(
    raw: Option<&str>,
    attribute: &str,
    converter: &Converter,
    default: &Value,
    origin: &str,
) -> Result<Value> {
    if converter.is_flag() {
        return Ok(Value::Boolean(raw.is_some()));
    }
    let text = match raw {
        Some(text) => text,
        None => return Ok(default.clone()),
    };

    match converter {
        Converter::Json => Ok(parse_structured(text)),
        Converter::Boolean => Ok(Value::Boolean(true)),
        Converter::Number => Ok(Value::Number(parse_number(text))),
        Converter::String => Ok(Value::String(text.to_string())),
        Converter::BigInt => parse_bigint(text)
            .map(Value::BigInt)
            .ok_or_else(|| Error::invalid_attribute(attribute, format!("cannot convert {:?} to a BigInt", text))),
        Converter::Url => resolve_url(text, origin)
            .map(Value::Url)
            .ok_or_else(|| Error::invalid_attribute(attribute, format!("invalid URL {:?}", text))),
        Converter::Date => Ok(Value::Date(parse_date(text))),
        Converter::Custom(parser) => parser.parse(text),
    }
}

/// Encodes a property value as attribute text.
///
/// `None` means the attribute should be removed.
pub fn encode(value: &Value, converter: &Converter) -> Option<String> {
    if value.is_null() {
        return None;
    }
    match converter {
        Converter::Boolean => match value {
            Value::Boolean(false) => None,
            _ => Some(String::new()),
        },
        Converter::Json => match value {
            Value::Number(n) if n.is_finite() => Some(format_number(*n)),
            other => serde_json::to_string(&other.to_json()).ok(),
        },
        Converter::Number => match value {
            Value::Number(n) => Some(format_number(*n)),
            other => Some(other.to_display_string()),
        },
        Converter::Date => match value {
            Value::Date(ms) => Some(format_date(*ms).unwrap_or_else(|| "Invalid Date".into())),
            other => Some(other.to_display_string()),
        },
        Converter::String | Converter::BigInt | Converter::Url => Some(value.to_display_string()),
        Converter::Custom(parser) => parser.stringify(value),
    }
}

/// Parses a structured literal.
///
/// Text that is not a valid literal is re-read as the body of a string literal
/// with its quotes escaped, so bare words come back as strings.
pub fn parse_structured(text: &str) -> Value {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(text) {
        return Value::from_json(json);
    }
    let quoted = format!("\"{}\"", text.replace('"', "\\\""));
    match serde_json::from_str::<serde_json::Value>(&quoted) {
        Ok(json) => Value::from_json(json),
        // backslashes or control characters break the quoted form too
        Err(_) => Value::String(text.to_string()),
    }
}

/// Parses a calendar date into milliseconds since the epoch.
///
/// Accepts RFC 3339, RFC 2822, `YYYY-MM-DD` and `YYYY-MM-DDTHH:MM[:SS[.fff]]`
/// (read as UTC). Anything else is read as a numeric timestamp, `NaN` if that
/// fails too.
pub fn parse_date(text: &str) -> f64 {
    match parse_calendar(text.trim()) {
        Some(ms) => time_clip(ms as f64),
        None => time_clip(parse_number(text)),
    }
}

fn parse_calendar(text: &str) -> Option<i64> {
    if let Some(ms) = parse_extended_year(text) {
        return Some(ms);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.timestamp_millis());
    }
    None
}

/// Reads a signed year of four to six digits (`+275760-09-13T00:00:00.000Z`).
///
/// The year is moved into chrono's range by whole 400-year cycles and the
/// offset is added back to the parsed timestamp.
fn parse_extended_year(text: &str) -> Option<i64> {
    let sign = match text.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let body = &text[1..];
    let digits = body.find('-')?;
    if !(4..=6).contains(&digits) || !body[..digits].bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = sign * body[..digits].parse::<i64>().ok()?;
    if sign < 0 && year == 0 {
        // `-000000` is not a year
        return None;
    }
    let local = 2000 + year.rem_euclid(CYCLE_YEARS);
    let cycles = (year - local) / CYCLE_YEARS;
    let ms = parse_calendar(&format!("{}{}", local, &body[digits..]))?;
    Some(ms + cycles * CYCLE_MS)
}

/// Applies the range and truncation rules of the `Date` constructor.
fn time_clip(ms: f64) -> f64 {
    if !ms.is_finite() || ms.abs() > MAX_TIME_MS {
        f64::NAN
    } else {
        // adding 0.0 normalises -0
        ms.trunc() + 0.0
    }
}

/// Formats a timestamp the way `Date.prototype.toISOString` does.
///
/// Returns `None` for invalid dates.
///
/// Years outside `0..=9999` use the signed six-digit form. Every valid date
/// formats, including those past chrono's own year range.
pub fn format_date(ms: f64) -> Option<String> {
    if !ms.is_finite() || ms.abs() > MAX_TIME_MS {
        return None;
    }
    let ms = ms as i64;
    let cycles = ms.div_euclid(CYCLE_MS);
    let dt = DateTime::<Utc>::from_timestamp_millis(ms.rem_euclid(CYCLE_MS))?;
    let year = i64::from(dt.year()) + cycles * CYCLE_YEARS;
    let year = if (0..=9999).contains(&year) {
        format!("{:04}", year)
    } else {
        format!("{}{:06}", if year < 0 { '-' } else { '+' }, year.abs())
    };
    Some(format!("{}-{}", year, dt.format("%m-%dT%H:%M:%S%.3fZ")))
}

/// Resolves `text` against `origin`, returning the absolute href.
fn resolve_url(text: &str, origin: &str) -> Option<String> {
    let resolved = match Url::parse(origin) {
        Ok(base) => base.join(text),
        Err(_) => Url::parse(text),
    };
    resolved.ok().map(|url| url.to_string())
}
