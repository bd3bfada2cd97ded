//! `date` and `date-time` strings.
//!
//! A schema may describe the expected layout in `pattern` using the familiar
//! `YYYY-MM-DD HH:mm:ss` tokens; without one, ISO 8601 is expected. Strict
//! parsing rejects anything else. Lenient parsing also tries a handful of
//! common layouts and, failing those, leaves the text untouched.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use super::{Presence, TypeValidator, check_presence, reject};
use crate::error::Result;
use crate::types::{Schema, Value};
use crate::validation::context::ValidationContext;
use crate::validation::dispatcher::ParameterValidator;
use crate::validation::errors::{ErrorKind, ErrorParams, ValidationResult};

const ISO_8601: &str = "ISO 8601";

const ISO_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const FALLBACK_LAYOUTS: &[&str] = &[
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

// Longest tokens first so `YYYY` is not read as two `YY`s.
const TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("MM", "%m"),
    ("M", "%m"),
    ("dddd", "%A"),
    ("ddd", "%a"),
    ("DD", "%d"),
    ("D", "%d"),
    ("HH", "%H"),
    ("H", "%H"),
    ("hh", "%I"),
    ("h", "%I"),
    ("mm", "%M"),
    ("m", "%M"),
    ("ss", "%S"),
    ("s", "%S"),
    ("SSS", "%3f"),
    ("A", "%p"),
    ("a", "%p"),
    ("ZZ", "%z"),
    ("Z", "%#z"),
    ("X", "%s"),
];

/// Translates a `YYYY-MM-DD`-style layout into a chrono format string.
/// Text in square brackets is copied literally.
pub fn translate_pattern(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    'outer: while let Some(c) = rest.chars().next() {
        if c == '[' {
            if let Some(end) = rest.find(']') {
                out.push_str(&rest[1..end].replace('%', "%%"));
                rest = &rest[end + 1..];
                continue;
            }
        }
        for (token, format) in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(format);
                rest = tail;
                continue 'outer;
            }
        }
        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// Parses `text` with a chrono layout, accepting layouts with or without an
/// offset, and date-only layouts (taken as UTC midnight).
fn parse_with(text: &str, layout: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_str(text, layout) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDateTime::parse_from_str(text, layout) {
        return Some(Utc.from_utc_datetime(&date));
    }
    NaiveDate::parse_from_str(text, layout)
        .ok()
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

fn parse_iso(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    ISO_LAYOUTS
        .iter()
        .find_map(|layout| parse_with(text, layout))
        .or_else(|| parse_with(text, "%Y-%m-%d"))
}

fn parse_fallback(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc2822(text) {
        return Some(date.with_timezone(&Utc));
    }
    FALLBACK_LAYOUTS
        .iter()
        .find_map(|layout| parse_with(text, layout))
}

/// Parses a date the way the validator does. `pattern` is a
/// `YYYY-MM-DD`-style layout; `None` means ISO 8601.
pub fn parse_date(text: &str, pattern: Option<&str>, strict: bool) -> Option<DateTime<Utc>> {
    let text = text.trim();
    let parsed = match pattern {
        Some(pattern) => parse_with(text, &translate_pattern(pattern)),
        None => parse_iso(text),
    };
    if parsed.is_some() || strict {
        return parsed;
    }
    // Lenient mode also takes ISO when the layout did not match.
    pattern
        .and_then(|_| parse_iso(text))
        .or_else(|| parse_fallback(text))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DateValidator;

impl TypeValidator for DateValidator {
    fn validate(
        &self,
        engine: &ParameterValidator<'_>,
        schema: &Schema,
        value: Option<&mut Value>,
        context: &ValidationContext,
    ) -> Result<Vec<ValidationResult>> {
        let value: &Value = match check_presence(engine, schema, value, context) {
            Presence::Present(value) => value,
            Presence::Settled(results) => return Ok(results),
        };

        let pattern = match &schema.pattern {
            None => None,
            Some(serde_json::Value::String(pattern)) => Some(pattern.as_str()),
            Some(raw) => {
                let params = ErrorParams::new(schema.display_name()).expected(raw.to_string());
                return engine
                    .errors()
                    .schema_error(ErrorKind::InvalidPattern, params, context);
            }
        };
        let strict = engine.settings().strict_date_parsing;

        let text = match value {
            Value::Date(_) => return Ok(vec![ValidationResult::valid(Some(value.clone()))]),
            // Milliseconds since the epoch.
            Value::Number(millis) => {
                return Ok(match Utc.timestamp_millis_opt(*millis as i64).single() {
                    Some(date) if millis.is_finite() => {
                        vec![ValidationResult::valid(Some(Value::Date(date)))]
                    }
                    _ => invalid_date(engine, schema, value, pattern, context),
                });
            }
            Value::String(text) => text,
            _ => return Ok(reject(engine, ErrorKind::NotAString, schema, value, context)),
        };

        match parse_date(text, pattern, strict) {
            Some(date) => Ok(vec![ValidationResult::valid(Some(Value::Date(date)))]),
            None if strict => Ok(invalid_date(engine, schema, value, pattern, context)),
            None => {
                tracing::debug!(
                    value = text.as_str(),
                    pattern = pattern.unwrap_or(ISO_8601),
                    "Unparseable date kept as text"
                );
                Ok(vec![ValidationResult::valid(Some(value.clone()))])
            }
        }
    }
}

fn invalid_date(
    engine: &ParameterValidator<'_>,
    schema: &Schema,
    value: &Value,
    pattern: Option<&str>,
    context: &ValidationContext,
) -> Vec<ValidationResult> {
    let params = ErrorParams::new(schema.display_name())
        .value(Some(value))
        .expected(pattern.unwrap_or(ISO_8601));
    engine.errors().make(ErrorKind::InvalidDate, params, context)
}
