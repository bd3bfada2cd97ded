//! Error message renderers.
//!
//! Legacy messages are short and context-free; callers match on them, so their
//! wording must stay stable. Improved messages name the data source, the full
//! path and what the value actually was.

use super::context::{DataSource, ValidationContext};
use super::errors::{ErrorKind, ErrorParams};
use crate::core::ValidationSettings;
use crate::types::format_number;
use crate::utils::{describe_value, pluralize};

pub trait MessageRenderer: Send + Sync {
    fn render(&self, kind: ErrorKind, params: &ErrorParams, context: &ValidationContext) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LegacyMessages;

#[derive(Debug, Default, Clone, Copy)]
pub struct ImprovedMessages;

static LEGACY: LegacyMessages = LegacyMessages;
static IMPROVED: ImprovedMessages = ImprovedMessages;

pub fn renderer_for(settings: &ValidationSettings) -> &'static dyn MessageRenderer {
    if settings.improved_error_messages {
        &IMPROVED
    } else {
        &LEGACY
    }
}

fn limit_text(params: &ErrorParams) -> String {
    params.limit.map(format_number).unwrap_or_default()
}

fn limit_count(params: &ErrorParams) -> usize {
    params.limit.map(|limit| limit.max(0.0) as usize).unwrap_or(0)
}

fn expected_text(params: &ErrorParams) -> &str {
    params.expected.as_deref().unwrap_or("")
}

impl MessageRenderer for LegacyMessages {
    fn render(&self, kind: ErrorKind, params: &ErrorParams, _context: &ValidationContext) -> String {
        let name = &params.name;
        match kind {
            ErrorKind::NotNullable => format!("{name} cannot be null"),
            ErrorKind::Required => format!("{name} is required"),
            ErrorKind::NotABoolean => format!("{name} is not a boolean"),
            ErrorKind::NotAnInteger => format!("{name} is not an integer"),
            ErrorKind::NotANumber => format!("{name} is not a number"),
            ErrorKind::NotAString => format!("{name} is not a string"),
            ErrorKind::NotAnObject => format!("{name} is not an object"),
            ErrorKind::NotAnArray => format!("{name} is not an array"),
            ErrorKind::NotASet => format!("{name} is not a set"),
            ErrorKind::AboveMaximum => format!("{name} is above the maximum value"),
            ErrorKind::BelowMinimum => format!("{name} is below the minimum value"),
            ErrorKind::UnsafeInteger => format!(
                "{name} is {}, which is outside the range of safely representable integers (+/-{})",
                params.value.as_ref().map(ToString::to_string).unwrap_or_default(),
                limit_text(params)
            ),
            ErrorKind::InvalidFormat => {
                format!("{name} has an invalid format: {}", expected_text(params))
            }
            ErrorKind::InvalidDate => {
                format!("{name} is not a valid date ({})", expected_text(params))
            }
            ErrorKind::NotInEnum => format!("{name} is not a valid entry"),
            ErrorKind::PatternMismatch => {
                format!("{name} does not match the pattern {}", expected_text(params))
            }
            ErrorKind::InvalidPattern => {
                format!("{name} has an invalid pattern: {}", expected_text(params))
            }
            ErrorKind::TooLong => format!("{name} is too long"),
            ErrorKind::TooShort => format!("{name} is too short"),
            ErrorKind::TooFewItems => format!(
                "{name} must have at least {}",
                pluralize(limit_count(params), "item")
            ),
            ErrorKind::TooManyItems => format!(
                "{name} must have at most {}",
                pluralize(limit_count(params), "item")
            ),
            ErrorKind::NotUnique => format!("{name} does not have all unique values"),
            ErrorKind::DisallowedProperties => format!(
                "{name} has properties which are not allowed: {}",
                params.properties.join(", ")
            ),
            ErrorKind::UnknownModel => {
                format!("{name} references an unknown model: {}", expected_text(params))
            }
            ErrorKind::InvalidSchema => format!("{name} cannot declare both a type and a $ref"),
            ErrorKind::InvalidSchemaType => {
                format!("{name} has an unrecognized type: {}", expected_text(params))
            }
            ErrorKind::Generic => format!("{name} is invalid"),
        }
    }
}

impl ImprovedMessages {
    fn subject(params: &ErrorParams, context: &ValidationContext) -> String {
        let location = if context.path().is_empty() {
            params.name.clone()
        } else {
            context.format_path()
        };
        match context.source() {
            DataSource::Unspecified => format!("Value '{location}'"),
            source => format!("{} value '{location}'", source.label()),
        }
    }
}

impl MessageRenderer for ImprovedMessages {
    fn render(&self, kind: ErrorKind, params: &ErrorParams, context: &ValidationContext) -> String {
        let subject = Self::subject(params, context);
        let actual = describe_value(params.value.as_ref());
        let expected = expected_text(params);
        let limit = limit_text(params);

        match kind {
            ErrorKind::NotNullable => format!("{subject} cannot be null."),
            ErrorKind::Required => format!("{subject} is required, but was {actual}."),
            ErrorKind::NotABoolean => format!("{subject} must be a boolean, but was {actual}."),
            ErrorKind::NotAnInteger => format!("{subject} must be an integer, but was {actual}."),
            ErrorKind::NotANumber => format!("{subject} must be a number, but was {actual}."),
            ErrorKind::NotAString => format!("{subject} must be a string, but was {actual}."),
            ErrorKind::NotAnObject => format!("{subject} must be an object, but was {actual}."),
            ErrorKind::NotAnArray => format!("{subject} must be an array, but was {actual}."),
            ErrorKind::NotASet => {
                format!("{subject} must be an array of unique items, but was {actual}.")
            }
            ErrorKind::AboveMaximum => format!("{subject} must be at most {limit}, but was {actual}."),
            ErrorKind::BelowMinimum => {
                format!("{subject} must be at least {limit}, but was {actual}.")
            }
            ErrorKind::UnsafeInteger => format!(
                "{subject} cannot be represented exactly: it would be rounded to {}, which is beyond the largest safe integer ({limit}).",
                params.value.as_ref().map(ToString::to_string).unwrap_or_default()
            ),
            ErrorKind::InvalidFormat => {
                format!("{subject} is described with the unsupported format '{expected}'.")
            }
            ErrorKind::InvalidDate => {
                format!("{subject} must be a date in {expected} format, but was {actual}.")
            }
            ErrorKind::NotInEnum => format!("{subject} must be one of [{expected}], but was {actual}."),
            ErrorKind::PatternMismatch => {
                format!("{subject} must match the pattern {expected}, but was {actual}.")
            }
            ErrorKind::InvalidPattern => {
                format!("{subject} is described with a malformed pattern: {expected}.")
            }
            ErrorKind::TooLong => format!(
                "{subject} must be at most {} long, but was {actual}.",
                pluralize(limit_count(params), "character")
            ),
            ErrorKind::TooShort => format!(
                "{subject} must be at least {} long, but was {actual}.",
                pluralize(limit_count(params), "character")
            ),
            ErrorKind::TooFewItems => format!(
                "{subject} must contain at least {}, but was {actual}.",
                pluralize(limit_count(params), "item")
            ),
            ErrorKind::TooManyItems => format!(
                "{subject} must contain at most {}, but was {actual}.",
                pluralize(limit_count(params), "item")
            ),
            ErrorKind::NotUnique => format!("{subject} must not contain duplicate items."),
            ErrorKind::DisallowedProperties => {
                let count = params.properties.len();
                format!(
                    "{subject} contains {} which {} not allowed: {}.",
                    pluralize(count, "property"),
                    if count == 1 { "is" } else { "are" },
                    params.properties.join(", ")
                )
            }
            ErrorKind::UnknownModel => {
                format!("{subject} refers to the unknown model '{expected}'.")
            }
            ErrorKind::InvalidSchema => {
                format!("{subject} is described by a schema declaring both 'type' and '$ref'.")
            }
            ErrorKind::InvalidSchemaType => {
                format!("{subject} is described by a schema with the unrecognized type '{expected}'.")
            }
            ErrorKind::Generic => format!("{subject} is invalid, it was {actual}."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    #[test]
    fn test_legacy_cardinality_messages_cite_threshold() {
        let params = ErrorParams::new("tags").limit(1.0);
        let message = LegacyMessages.render(ErrorKind::TooFewItems, &params, &ValidationContext::default());
        assert_eq!(message, "tags must have at least 1 item");

        let params = ErrorParams::new("tags").limit(2.0);
        let message = LegacyMessages.render(ErrorKind::TooManyItems, &params, &ValidationContext::default());
        assert_eq!(message, "tags must have at most 2 items");
    }

    #[test]
    fn test_improved_message_names_source_and_path() {
        let context = ValidationContext::new(DataSource::Body)
            .descend("obj")
            .descend("array")
            .descend(0usize);
        let params = ErrorParams::new("1").value(Some(&Value::from("1")));
        let message = ImprovedMessages.render(ErrorKind::NotABoolean, &params, &context);
        assert_eq!(
            message,
            "Request body value 'obj.array[0]' must be a boolean, but was a string (\"1\")."
        );
    }

    #[test]
    fn test_improved_message_falls_back_to_name() {
        let params = ErrorParams::new("limit");
        let message = ImprovedMessages.render(
            ErrorKind::Required,
            &params,
            &ValidationContext::new(DataSource::Query),
        );
        assert_eq!(message, "Query string value 'limit' is required, but was undefined.");
    }

    #[test]
    fn test_disallowed_properties_lists_keys() {
        let params = ErrorParams::new("body").properties(vec!["extra".into(), "other".into()]);
        let legacy = LegacyMessages.render(ErrorKind::DisallowedProperties, &params, &ValidationContext::default());
        let improved =
            ImprovedMessages.render(ErrorKind::DisallowedProperties, &params, &ValidationContext::default());
        assert!(legacy.contains("extra, other"));
        assert!(improved.contains("2 properties which are not allowed"));
    }
}
