//! Integer and number validators, with the numeric coercion they share.

use super::{Presence, TypeValidator, check_presence, reject};
use crate::error::Result;
use crate::types::{Schema, Value};
use crate::validation::context::ValidationContext;
use crate::validation::dispatcher::ParameterValidator;
use crate::validation::errors::{ErrorKind, ErrorParams, ValidationResult};

/// Largest integer an IEEE-754 double represents exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Parses numeric text the way a JSON-centric client would: surrounding
/// whitespace is ignored, `0x`/`0o`/`0b` prefixes and `Infinity` are accepted,
/// blank text is not a number.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = text.strip_prefix(prefix) {
            return parse_radix(digits, radix);
        }
    }

    match text {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    // Keep Rust-only spellings such as "inf" or "NaN" out.
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }
    text.parse::<f64>().ok()
}

fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|digit| acc * f64::from(radix) + f64::from(digit))
    })
}

/// Numeric view of a runtime value. Strings count only when allowed.
pub fn coerce_number(value: &Value, allow_strings: bool) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        Value::String(text) if allow_strings => parse_number(text),
        _ => None,
    }
}

/// A `minimum`/`maximum` bound, which legacy schemas may spell as a string.
fn bound(raw: Option<&serde_json::Value>) -> Option<f64> {
    match raw? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(text) => parse_number(text),
        _ => None,
    }
}

fn check_range(
    engine: &ParameterValidator<'_>,
    schema: &Schema,
    number: f64,
    context: &ValidationContext,
) -> Option<Vec<ValidationResult>> {
    let name = schema.display_name();
    let actual = Value::Number(number);

    if let Some(maximum) = bound(schema.maximum.as_ref()) {
        if number > maximum {
            let params = ErrorParams::new(name).value(Some(&actual)).limit(maximum);
            return Some(engine.errors().make(ErrorKind::AboveMaximum, params, context));
        }
    }
    if let Some(minimum) = bound(schema.minimum.as_ref()) {
        if number < minimum {
            let params = ErrorParams::new(name).value(Some(&actual)).limit(minimum);
            return Some(engine.errors().make(ErrorKind::BelowMinimum, params, context));
        }
    }
    None
}

fn bad_format(
    engine: &ParameterValidator<'_>,
    schema: &Schema,
    format: &str,
    context: &ValidationContext,
) -> Result<Vec<ValidationResult>> {
    let params = ErrorParams::new(schema.display_name()).expected(format);
    engine
        .errors()
        .schema_error(ErrorKind::InvalidFormat, params, context)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct IntegerValidator;

impl TypeValidator for IntegerValidator {
    fn validate(
        &self,
        engine: &ParameterValidator<'_>,
        schema: &Schema,
        value: Option<&mut Value>,
        context: &ValidationContext,
    ) -> Result<Vec<ValidationResult>> {
        let settings = engine.settings();
        match schema.format.as_deref() {
            None | Some("int32") => {}
            Some("int64")
                if settings.allow_number_formats_with_no_equivalent_representation_in_javascript => {}
            Some(format) => return bad_format(engine, schema, format, context),
        }

        let value = match check_presence(engine, schema, value, context) {
            Presence::Present(value) => value,
            Presence::Settled(results) => return Ok(results),
        };

        let number = match coerce_number(value, settings.allow_numbers_to_be_strings) {
            Some(n) if n.is_finite() && n.fract() == 0.0 => n,
            _ => return Ok(reject(engine, ErrorKind::NotAnInteger, schema, value, context)),
        };

        if number.abs() > MAX_SAFE_INTEGER && !settings.allow_integer_values_which_may_be_parsed_incorrectly {
            let params = ErrorParams::new(schema.display_name())
                .value(Some(&Value::Number(number)))
                .limit(MAX_SAFE_INTEGER);
            return Ok(engine.errors().make(ErrorKind::UnsafeInteger, params, context));
        }

        if let Some(results) = check_range(engine, schema, number, context) {
            return Ok(results);
        }
        Ok(vec![ValidationResult::valid(Some(Value::Number(number)))])
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NumberValidator;

impl TypeValidator for NumberValidator {
    fn validate(
        &self,
        engine: &ParameterValidator<'_>,
        schema: &Schema,
        value: Option<&mut Value>,
        context: &ValidationContext,
    ) -> Result<Vec<ValidationResult>> {
        match schema.format.as_deref() {
            None | Some("float") | Some("double") => {}
            Some(format) => return bad_format(engine, schema, format, context),
        }

        let value = match check_presence(engine, schema, value, context) {
            Presence::Present(value) => value,
            Presence::Settled(results) => return Ok(results),
        };

        let number = match coerce_number(value, engine.settings().allow_numbers_to_be_strings) {
            Some(n) if n.is_finite() => n,
            _ => return Ok(reject(engine, ErrorKind::NotANumber, schema, value, context)),
        };

        if let Some(results) = check_range(engine, schema, number, context) {
            return Ok(results);
        }
        Ok(vec![ValidationResult::valid(Some(Value::Number(number)))])
    }
}
