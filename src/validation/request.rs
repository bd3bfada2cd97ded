//! Top-level entry points: whole requests and standalone values.

use serde::Serialize;

use super::context::{DataSource, ValidationContext};
use super::dispatcher::ParameterValidator;
use super::errors::{Collapsed, ErrorKind, ErrorParams, ValidationError, collapse, only_errors};
use super::logs::ValidationLogs;
use super::resolver::Resolution;
use super::validators::object::{enforce_unrecognized_policy, remove_null_values, validate_properties};
use crate::core::{SettingsOverrides, ValidationSettings};
use crate::error::Result;
use crate::types::{Models, PrimitiveType, Request, RequestSchema, Schema, Slot, Value};

/// Errors and side effects of [`validate_against_schema`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaValidationOutcome {
    pub errors: Vec<ValidationError>,
    pub logs: ValidationLogs,
}

impl SchemaValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validates every parameter of `request` against `schema`.
///
/// Coerced values are written back into the request when `replaceValues` is
/// on. Absent parameters with a `defaultValue` are validated as if the
/// default had been sent. Returns every error in parameter order; schema
/// problems are returned as `Err` only when configured to be fatal.
pub fn validate_request(
    schema: &RequestSchema,
    request: &mut Request,
    models: &Models,
    options: Option<&SettingsOverrides>,
) -> Result<Vec<ValidationError>> {
    let settings = ValidationSettings::resolve(schema.validation.as_ref(), options);
    let engine = ParameterValidator::new(models, &settings);
    let mut errors = Vec::new();

    for parameter in &schema.parameters {
        let source = DataSource::from_tag(parameter.source_tag().unwrap_or_default())?;
        let name = parameter.display_name();
        let slot = request.locate(source, name, settings.request_body_can_have_two_contradictory_schemas);

        let context = match slot {
            Slot::WholeBody => ValidationContext::new(source),
            Slot::Field | Slot::Missing => ValidationContext::new(source).descend(name),
        };

        let mut default = match slot {
            Slot::Missing => parameter.default_value.clone(),
            Slot::Field | Slot::WholeBody => None,
        };
        let value = match slot {
            Slot::Missing => default.as_mut(),
            Slot::Field | Slot::WholeBody => request.get_mut(source, name, slot),
        };

        match collapse(engine.validate(parameter, value, &context)?) {
            Collapsed::Valid(Some(coerced)) if settings.replace_values => {
                tracing::debug!(parameter = name, source = source.label(), "Writing back coerced value");
                request.store(source, name, slot, coerced);
            }
            Collapsed::Valid(_) => {}
            Collapsed::Invalid(failures) => errors.extend(failures),
        }
    }

    tracing::debug!(
        parameters = schema.parameters.len(),
        errors = errors.len(),
        "Validated request"
    );
    Ok(errors)
}

/// Validates an arbitrary value against a schema (or a reference to one).
///
/// Object schemas are checked property by property, filling absent
/// properties from their `defaultValue`; `oneOf` and non-object schemas are
/// validated as a single value. Coerced values are written back when
/// `replaceValues` is on.
pub fn validate_against_schema(
    schema: &Schema,
    value: &mut Value,
    models: &Models,
    options: Option<&SettingsOverrides>,
) -> Result<SchemaValidationOutcome> {
    let settings = ValidationSettings::resolve(schema.validation.as_ref(), options);
    let engine = ParameterValidator::new(models, &settings);
    let errors = validate_root(&engine, schema, value)?;
    let logs = engine.into_logs();

    tracing::debug!(errors = errors.len(), side_effects = logs.len(), "Validated value against schema");
    Ok(SchemaValidationOutcome { errors, logs })
}

fn validate_root(
    engine: &ParameterValidator<'_>,
    schema: &Schema,
    value: &mut Value,
) -> Result<Vec<ValidationError>> {
    let root = ValidationContext::new(DataSource::Unspecified);
    let (resolved, context) = match engine.resolver().resolve(schema, &root)? {
        Resolution::Resolved { schema, context } => (schema, context),
        Resolution::Failed(results) => return Ok(only_errors(results)),
    };

    let single_value = resolved.one_of.is_some()
        || !matches!(resolved.primitive_type(), Some(PrimitiveType::Object) | None);
    if single_value {
        return Ok(match collapse(engine.validate(schema, Some(&mut *value), &root)?) {
            Collapsed::Valid(Some(coerced)) if engine.settings().replace_values => {
                *value = coerced;
                Vec::new()
            }
            Collapsed::Valid(_) => Vec::new(),
            Collapsed::Invalid(failures) => failures,
        });
    }
    let schema = resolved;

    let map = match value {
        Value::Object(map) => map,
        other => {
            let params = ErrorParams::new(schema.display_name()).value(Some(&*other));
            return Ok(vec![engine.errors().build(ErrorKind::NotAnObject, params, &context)]);
        }
    };

    let settings = engine.settings();
    if let Some(properties) = schema.properties.as_ref().filter(|_| settings.replace_values) {
        for (name, property) in properties {
            if !map.contains_key(name) {
                if let Some(default) = &property.default_value {
                    map.insert(name.clone(), default.clone());
                }
            }
        }
    }

    let mut errors = Vec::new();
    if let Some(error) = enforce_unrecognized_policy(engine, &schema, map, &context) {
        errors.push(error);
    }
    errors.extend(validate_properties(engine, &schema, map, &context)?);

    if errors.is_empty() {
        remove_null_values(engine, &schema, map, &context);
    }
    Ok(errors)
}
