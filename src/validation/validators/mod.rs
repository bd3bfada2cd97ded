//! Type validators. Each one checks (and coerces) a value against a schema node
//! whose type is already a primitive.

pub mod array;
pub mod boolean;
pub mod date;
pub mod numeric;
pub mod object;
pub mod string;

use super::context::ValidationContext;
use super::dispatcher::ParameterValidator;
use super::errors::{ErrorKind, ErrorParams, ValidationResult};
use crate::error::Result;
use crate::types::{PrimitiveType, Schema, Value};

pub use array::ArrayValidator;
pub use boolean::BooleanValidator;
pub use date::DateValidator;
pub use numeric::{IntegerValidator, NumberValidator};
pub use object::ObjectValidator;
pub use string::StringValidator;

pub trait TypeValidator: Send + Sync {
    fn validate(
        &self,
        engine: &ParameterValidator<'_>,
        schema: &Schema,
        value: Option<&mut Value>,
        context: &ValidationContext,
    ) -> Result<Vec<ValidationResult>>;
}

/// Accepts anything unchanged. Used for `void`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughValidator;

impl TypeValidator for PassthroughValidator {
    fn validate(
        &self,
        _engine: &ParameterValidator<'_>,
        _schema: &Schema,
        value: Option<&mut Value>,
        _context: &ValidationContext,
    ) -> Result<Vec<ValidationResult>> {
        Ok(vec![ValidationResult::valid(value.map(|value| value.clone()))])
    }
}

/// Accepts any present value unchanged, after the shared presence checks.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileValidator;

impl TypeValidator for FileValidator {
    fn validate(
        &self,
        engine: &ParameterValidator<'_>,
        schema: &Schema,
        value: Option<&mut Value>,
        context: &ValidationContext,
    ) -> Result<Vec<ValidationResult>> {
        match check_presence(engine, schema, value, context) {
            Presence::Present(value) => Ok(vec![ValidationResult::valid(Some(value.clone()))]),
            Presence::Settled(results) => Ok(results),
        }
    }
}

/// Validator for a resolved node. Untyped nodes are treated as objects.
pub fn validator_for(kind: Option<PrimitiveType>) -> &'static dyn TypeValidator {
    match kind {
        Some(PrimitiveType::Boolean) => &BooleanValidator,
        Some(PrimitiveType::Integer) => &IntegerValidator,
        Some(PrimitiveType::Number) => &NumberValidator,
        Some(PrimitiveType::String) => &StringValidator,
        Some(PrimitiveType::Array) => &ArrayValidator,
        Some(PrimitiveType::File) => &FileValidator,
        Some(PrimitiveType::Void) => &PassthroughValidator,
        Some(PrimitiveType::Object) | None => &ObjectValidator,
    }
}

/// Result of the checks every type validator runs first.
pub(crate) enum Presence<'v> {
    /// A value is there and must be type-checked.
    Present(&'v mut Value),
    /// Nothing further to check; these are the results.
    Settled(Vec<ValidationResult>),
}

/// Nullability and existence checks shared by all validators.
///
/// `null` is rejected unless the node (or the defaults) allow it. Absent,
/// `null` and (optionally) empty-string values then count as missing, which
/// is an error only for required nodes.
pub(crate) fn check_presence<'v>(
    engine: &ParameterValidator<'_>,
    schema: &Schema,
    value: Option<&'v mut Value>,
    context: &ValidationContext,
) -> Presence<'v> {
    let settings = engine.settings();
    let name = schema.display_name();

    if let Some(Value::Null) = value.as_deref() {
        let nullable = schema
            .nullable
            .unwrap_or(settings.all_properties_are_nullable_by_default);
        if !nullable {
            let params = ErrorParams::new(name).value(Some(&Value::Null));
            return Presence::Settled(engine.errors().make(ErrorKind::NotNullable, params, context));
        }
    }

    let missing = match value.as_deref() {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => {
            text.is_empty()
                && settings.treat_empty_strings_like_undefined_values
                && schema.min_length.is_none()
        }
        Some(_) => false,
    };

    if missing {
        if schema.is_required() {
            let params = ErrorParams::new(name).value(value.as_deref());
            return Presence::Settled(engine.errors().make(ErrorKind::Required, params, context));
        }
        return Presence::Settled(vec![ValidationResult::valid(None)]);
    }

    match value {
        Some(value) => Presence::Present(value),
        None => Presence::Settled(vec![ValidationResult::valid(None)]),
    }
}

/// Shorthand for a catalogued error on the node being validated.
pub(crate) fn reject(
    engine: &ParameterValidator<'_>,
    kind: ErrorKind,
    schema: &Schema,
    value: &Value,
    context: &ValidationContext,
) -> Vec<ValidationResult> {
    let params = ErrorParams::new(schema.display_name()).value(Some(value));
    engine.errors().make(kind, params, context)
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::core::ValidationSettings;

    #[test]
    fn test_absent_optional_value_is_valid() {
        let schema = Schema::new("integer").with_name("limit");
        let results = run(&ValidationSettings::default(), &schema, None);
        assert_eq!(results, vec![ValidationResult::valid(None)]);
    }

    #[test]
    fn test_absent_required_value() {
        let schema = Schema::new("integer").with_name("limit").with_required(true);
        let results = run(&ValidationSettings::default(), &schema, None);
        assert_eq!(errors(&results)[0].message, "limit is required");
    }

    #[test]
    fn test_null_rejected_when_not_nullable() {
        let schema = Schema::new("string").with_name("nickname").with_nullable(false);
        let mut value = Value::Null;
        let results = run(&ValidationSettings::default(), &schema, Some(&mut value));
        assert_eq!(errors(&results)[0].kind, ErrorKind::NotNullable);
    }

    #[test]
    fn test_null_rejected_by_default_in_strict_mode() {
        let schema = Schema::new("string").with_name("nickname");
        let mut value = Value::Null;
        let settings = ValidationSettings::strict().with_throw_errors_when_schema_is_invalid(false);
        let results = run(&settings, &schema, Some(&mut value));
        assert_eq!(errors(&results)[0].kind, ErrorKind::NotNullable);
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let schema = Schema::new("string").with_name("q").with_required(true);
        let mut value = Value::from("");
        let results = run(&ValidationSettings::default(), &schema, Some(&mut value));
        assert_eq!(errors(&results)[0].kind, ErrorKind::Required);
    }

    #[test]
    fn test_empty_string_checked_when_min_length_declared() {
        let mut schema = Schema::new("string").with_name("q");
        schema.min_length = Some(1);
        let mut value = Value::from("");
        let results = run(&ValidationSettings::default(), &schema, Some(&mut value));
        assert_eq!(errors(&results)[0].kind, ErrorKind::TooShort);
    }

    #[test]
    fn test_file_and_void_pass_through() {
        let mut value = Value::from("binary");
        let results = run(&ValidationSettings::default(), &Schema::new("File"), Some(&mut value));
        assert_eq!(only_value(&results), Some(Value::from("binary")));

        let results = run(&ValidationSettings::default(), &Schema::new("void"), None);
        assert_eq!(only_value(&results), None);
    }

    #[test]
    fn test_required_file_must_be_present() {
        let schema = Schema::new("file").with_name("upload").with_required(true);
        let results = run(&ValidationSettings::default(), &schema, None);
        let errors = errors(&results);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::Required);
        assert_eq!(errors[0].message, "upload is required");
    }

    #[test]
    fn test_file_rejects_null_when_not_nullable() {
        let schema = Schema::new("file").with_name("upload").with_nullable(false);
        let mut value = Value::Null;
        let results = run(&ValidationSettings::default(), &schema, Some(&mut value));
        assert_eq!(errors(&results)[0].kind, ErrorKind::NotNullable);
    }

    #[test]
    fn test_optional_file_may_be_absent() {
        let schema = Schema::new("file").with_name("upload");
        let results = run(&ValidationSettings::default(), &schema, None);
        assert_eq!(results, vec![ValidationResult::valid(None)]);
    }
}
