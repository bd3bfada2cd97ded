//! Error catalogue, validation results and the factory that builds them.

use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

use super::context::{ContextLiteral, ValidationContext};
use super::messages::{MessageRenderer, renderer_for};
use crate::core::ValidationSettings;
use crate::error::{Result, SwaggerValidationError};
use crate::types::Value;

/// Closed catalogue of validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotNullable = 1001,
    Required = 1002,
    NotABoolean = 1003,
    NotAnInteger = 1004,
    NotANumber = 1005,
    NotAString = 1006,
    NotAnObject = 1007,
    NotAnArray = 1008,
    NotASet = 1009,
    AboveMaximum = 1010,
    BelowMinimum = 1011,
    UnsafeInteger = 1012,
    InvalidFormat = 1013,
    InvalidDate = 1014,
    NotInEnum = 1015,
    PatternMismatch = 1016,
    InvalidPattern = 1017,
    TooLong = 1018,
    TooShort = 1019,
    TooFewItems = 1020,
    TooManyItems = 1021,
    NotUnique = 1022,
    DisallowedProperties = 1023,
    UnknownModel = 1024,
    InvalidSchema = 1025,
    InvalidSchemaType = 1026,
    /// Ad hoc failure carrying its own message.
    Generic = 1099,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::NotNullable => "NOT_NULLABLE",
            ErrorKind::Required => "REQUIRED",
            ErrorKind::NotABoolean => "NOT_A_BOOLEAN",
            ErrorKind::NotAnInteger => "NOT_AN_INTEGER",
            ErrorKind::NotANumber => "NOT_A_NUMBER",
            ErrorKind::NotAString => "NOT_A_STRING",
            ErrorKind::NotAnObject => "NOT_AN_OBJECT",
            ErrorKind::NotAnArray => "NOT_AN_ARRAY",
            ErrorKind::NotASet => "NOT_A_SET",
            ErrorKind::AboveMaximum => "ABOVE_MAXIMUM",
            ErrorKind::BelowMinimum => "BELOW_MINIMUM",
            ErrorKind::UnsafeInteger => "UNSAFE_INTEGER",
            ErrorKind::InvalidFormat => "INVALID_FORMAT",
            ErrorKind::InvalidDate => "INVALID_DATE",
            ErrorKind::NotInEnum => "NOT_IN_ENUM",
            ErrorKind::PatternMismatch => "PATTERN_MISMATCH",
            ErrorKind::InvalidPattern => "INVALID_PATTERN",
            ErrorKind::TooLong => "TOO_LONG",
            ErrorKind::TooShort => "TOO_SHORT",
            ErrorKind::TooFewItems => "TOO_FEW_ITEMS",
            ErrorKind::TooManyItems => "TOO_MANY_ITEMS",
            ErrorKind::NotUnique => "NOT_UNIQUE",
            ErrorKind::DisallowedProperties => "DISALLOWED_PROPERTIES",
            ErrorKind::UnknownModel => "UNKNOWN_MODEL",
            ErrorKind::InvalidSchema => "INVALID_SCHEMA",
            ErrorKind::InvalidSchemaType => "INVALID_SCHEMA_TYPE",
            ErrorKind::Generic => "VALIDATION_ERROR",
        }
    }

    /// Kinds caused by the schema author rather than by the data.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidFormat
                | ErrorKind::InvalidPattern
                | ErrorKind::UnknownModel
                | ErrorKind::InvalidSchema
                | ErrorKind::InvalidSchemaType
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for ErrorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Payload shared by both message renderers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorParams {
    pub name: String,
    /// The runtime value that failed.
    pub value: Option<Value>,
    /// Format, pattern, model, type or allowed values, depending on the kind.
    pub expected: Option<String>,
    /// Numeric threshold (bounds, lengths, item counts, safe-integer boundary).
    pub limit: Option<f64>,
    pub properties: Vec<String>,
}

impl ErrorParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn value(mut self, value: Option<&Value>) -> Self {
        self.value = value.cloned();
        self
    }

    pub fn expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    pub fn limit(mut self, limit: f64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn properties(mut self, properties: Vec<String>) -> Self {
        self.properties = properties;
        self
    }
}

/// A failed validation: what went wrong, where, and with which value.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{message}")]
pub struct ValidationError {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(serialize_with = "serialize_context")]
    pub context: ValidationContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

fn serialize_context<S: Serializer>(
    context: &ValidationContext,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    context.to_literal().serialize(serializer)
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn literal_context(&self) -> ContextLiteral {
        self.context.to_literal()
    }
}

/// One record produced by a validator: a coerced value or an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// `value` is `None` when there was nothing to coerce (absent optional value).
    Valid { value: Option<Value> },
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn valid(value: Option<Value>) -> Self {
        Self::Valid { value }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Invalid(error) => Some(error),
            Self::Valid { .. } => None,
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Valid { value } => value.as_ref(),
            Self::Invalid(_) => None,
        }
    }
}

/// Outcome of a whole validator call, collapsed to what callers write back.
pub(crate) enum Collapsed {
    Valid(Option<Value>),
    Invalid(Vec<ValidationError>),
}

pub(crate) fn collapse(results: Vec<ValidationResult>) -> Collapsed {
    let mut value = None;
    let mut errors = Vec::new();
    let mut seen_value = false;

    for result in results {
        match result {
            ValidationResult::Invalid(error) => errors.push(error),
            ValidationResult::Valid { value: v } if !seen_value => {
                value = v;
                seen_value = true;
            }
            ValidationResult::Valid { .. } => {}
        }
    }

    if errors.is_empty() {
        Collapsed::Valid(value)
    } else {
        Collapsed::Invalid(errors)
    }
}

pub(crate) fn only_errors(results: Vec<ValidationResult>) -> Vec<ValidationError> {
    results
        .into_iter()
        .filter_map(|result| match result {
            ValidationResult::Invalid(error) => Some(error),
            ValidationResult::Valid { .. } => None,
        })
        .collect()
}

/// Builds validation errors using the renderer chosen by the settings.
#[derive(Clone, Copy)]
pub struct ErrorFactory {
    renderer: &'static dyn MessageRenderer,
    throw_on_schema_errors: bool,
}

impl fmt::Debug for ErrorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorFactory")
            .field("throw_on_schema_errors", &self.throw_on_schema_errors)
            .finish()
    }
}

impl ErrorFactory {
    pub fn new(settings: &ValidationSettings) -> Self {
        Self {
            renderer: renderer_for(settings),
            throw_on_schema_errors: settings.throw_errors_when_schema_is_invalid,
        }
    }

    pub fn build(
        &self,
        kind: ErrorKind,
        params: ErrorParams,
        context: &ValidationContext,
    ) -> ValidationError {
        let message = self.renderer.render(kind, &params, context);
        ValidationError {
            kind,
            message,
            context: context.clone(),
            value: params.value,
        }
    }

    /// A one-element result sequence holding a catalogued error.
    pub fn make(
        &self,
        kind: ErrorKind,
        params: ErrorParams,
        context: &ValidationContext,
    ) -> Vec<ValidationResult> {
        vec![ValidationResult::Invalid(self.build(kind, params, context))]
    }

    /// A one-element result sequence holding an ad hoc message.
    pub fn message(
        &self,
        message: impl Into<String>,
        value: Option<&Value>,
        context: &ValidationContext,
    ) -> Vec<ValidationResult> {
        vec![ValidationResult::Invalid(ValidationError {
            kind: ErrorKind::Generic,
            message: message.into(),
            context: context.clone(),
            value: value.cloned(),
        })]
    }

    /// A schema-authoring error: raised when the settings ask for it,
    /// otherwise reported like any other validation error.
    pub fn schema_error(
        &self,
        kind: ErrorKind,
        params: ErrorParams,
        context: &ValidationContext,
    ) -> Result<Vec<ValidationResult>> {
        let error = self.build(kind, params, context);
        if self.throw_on_schema_errors {
            return Err(SwaggerValidationError::invalid_schema(kind, error.message));
        }
        tracing::warn!(
            code = kind.code(),
            path = %context.format_path(),
            "Schema error reported as validation error: {}",
            error.message
        );
        Ok(vec![ValidationResult::Invalid(error)])
    }
}
