use regex::Regex;

use super::date::DateValidator;
use super::{Presence, TypeValidator, check_presence, reject};
use crate::error::Result;
use crate::types::{Schema, Value};
use crate::validation::context::ValidationContext;
use crate::validation::dispatcher::ParameterValidator;
use crate::validation::errors::{ErrorKind, ErrorParams, ValidationResult};

#[derive(Debug, Default, Clone, Copy)]
pub struct StringValidator;

impl TypeValidator for StringValidator {
    fn validate(
        &self,
        engine: &ParameterValidator<'_>,
        schema: &Schema,
        value: Option<&mut Value>,
        context: &ValidationContext,
    ) -> Result<Vec<ValidationResult>> {
        match schema.format.as_deref() {
            None => {}
            // Opaque payload, nothing to check.
            Some("byte") => return Ok(vec![ValidationResult::valid(value.map(|value| value.clone()))]),
            Some("date") if !engine.settings().allow_strings_to_have_unreliable_date_format => {
                return format_error(engine, schema, "date", context);
            }
            Some("date") | Some("date-time") => {
                return DateValidator.validate(engine, schema, value, context);
            }
            Some(format) => return format_error(engine, schema, format, context),
        }

        let value: &Value = match check_presence(engine, schema, value, context) {
            Presence::Present(value) => value,
            Presence::Settled(results) => return Ok(results),
        };

        let Value::String(text) = value else {
            return Ok(reject(engine, ErrorKind::NotAString, schema, value, context));
        };
        let name = schema.display_name();

        if let Some(allowed) = &schema.allowed_values {
            if !allowed.iter().any(|entry| entry.as_str() == Some(text.as_str())) {
                let expected = allowed
                    .iter()
                    .map(|entry| entry.as_str().map(str::to_string).unwrap_or_else(|| entry.to_string()))
                    .collect::<Vec<_>>()
                    .join(", ");
                let params = ErrorParams::new(name).value(Some(value)).expected(expected);
                return Ok(engine.errors().make(ErrorKind::NotInEnum, params, context));
            }
        }

        if let Some(raw) = &schema.pattern {
            let Some(pattern) = raw.as_str() else {
                let params = ErrorParams::new(name).expected(raw.to_string());
                return engine.errors().schema_error(ErrorKind::InvalidPattern, params, context);
            };
            let regex = match Regex::new(pattern) {
                Ok(regex) => regex,
                Err(err) => {
                    tracing::debug!(pattern, error = %err, "Failed to compile string pattern");
                    let params = ErrorParams::new(name).expected(pattern);
                    return engine.errors().schema_error(ErrorKind::InvalidPattern, params, context);
                }
            };
            if !regex.is_match(text) {
                let params = ErrorParams::new(name).value(Some(value)).expected(pattern);
                return Ok(engine.errors().make(ErrorKind::PatternMismatch, params, context));
            }
        }

        let length = text.chars().count();
        if let Some(max) = schema.max_length {
            if length > max {
                let params = ErrorParams::new(name).value(Some(value)).limit(max as f64);
                return Ok(engine.errors().make(ErrorKind::TooLong, params, context));
            }
        }
        if let Some(min) = schema.min_length {
            if length < min {
                let params = ErrorParams::new(name).value(Some(value)).limit(min as f64);
                return Ok(engine.errors().make(ErrorKind::TooShort, params, context));
            }
        }

        Ok(vec![ValidationResult::valid(Some(Value::String(text.clone())))])
    }
}

fn format_error(
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
