//! Object validation. Objects are coerced in place: with `replaceValues` on,
//! each declared property is replaced by its coerced value, and unrecognized
//! or null properties may be stripped depending on the settings.

use super::{Presence, TypeValidator, check_presence, reject};
use crate::error::Result;
use crate::types::{Map, Schema, Value};
use crate::validation::context::ValidationContext;
use crate::validation::dispatcher::ParameterValidator;
use crate::validation::errors::{Collapsed, ErrorKind, ErrorParams, ValidationError, ValidationResult, collapse};
use crate::validation::logs::LogEntry;
use crate::validation::resolver::Resolution;

#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectValidator;

impl TypeValidator for ObjectValidator {
    fn validate(
        &self,
        engine: &ParameterValidator<'_>,
        schema: &Schema,
        value: Option<&mut Value>,
        context: &ValidationContext,
    ) -> Result<Vec<ValidationResult>> {
        let value = match check_presence(engine, schema, value, context) {
            Presence::Present(value) => value,
            Presence::Settled(results) => return Ok(results),
        };
        let map = match value {
            Value::Object(map) => map,
            other => return Ok(reject(engine, ErrorKind::NotAnObject, schema, other, context)),
        };

        let mut errors = Vec::new();
        if let Some(error) = enforce_unrecognized_policy(engine, schema, map, context) {
            errors.push(error);
        }
        errors.extend(validate_properties(engine, schema, map, context)?);

        if !errors.is_empty() {
            errors.sort_by(|a, b| a.message.cmp(&b.message));
            return Ok(errors.into_iter().map(ValidationResult::Invalid).collect());
        }

        remove_null_values(engine, schema, map, context);
        Ok(vec![ValidationResult::valid(Some(Value::Object(map.clone())))])
    }
}

/// Applies the unrecognized-property policy: strips unknown keys when removal
/// is enabled, otherwise reports them when the node does not allow them.
pub(crate) fn enforce_unrecognized_policy(
    engine: &ParameterValidator<'_>,
    schema: &Schema,
    map: &mut Map,
    context: &ValidationContext,
) -> Option<ValidationError> {
    let settings = engine.settings();
    let allowed = schema.additional_properties_allowed();
    if allowed == Some(true) {
        return None;
    }

    let unknown: Vec<String> = map
        .keys()
        .filter(|key| {
            !schema
                .properties
                .as_ref()
                .is_some_and(|properties| properties.contains_key(key.as_str()))
        })
        .cloned()
        .collect();
    if unknown.is_empty() {
        return None;
    }

    if settings.remove_unrecognized_properties_from_objects {
        let path = context.format_path();
        for property in unknown {
            map.shift_remove(&property);
            engine.log(LogEntry::PropertyDeleted {
                path: path.clone(),
                property,
            });
        }
        return None;
    }

    let disallowed = allowed
        .map(|allowed| !allowed)
        .unwrap_or(!settings.objects_can_have_any_additional_properties_by_default);
    if !disallowed {
        return None;
    }

    let params = ErrorParams::new(schema.display_name()).properties(unknown);
    Some(engine.errors().build(ErrorKind::DisallowedProperties, params, context))
}

/// Validates every declared property of `map`. Coerced values replace the
/// originals only when `replaceValues` is on.
pub(crate) fn validate_properties(
    engine: &ParameterValidator<'_>,
    schema: &Schema,
    map: &mut Map,
    context: &ValidationContext,
) -> Result<Vec<ValidationError>> {
    let Some(properties) = &schema.properties else {
        return Ok(Vec::new());
    };
    let required = schema.required_properties();
    let write_back = engine.settings().replace_values;
    let mut errors = Vec::new();

    for (name, property) in properties {
        let marker = required.contains(name).then_some(true);
        let member = property.for_member(name.as_str(), marker);
        let results = engine.validate(&member, map.get_mut(name), &context.descend(name.as_str()))?;

        match collapse(results) {
            Collapsed::Valid(Some(value)) if write_back => {
                map.insert(name.clone(), value);
            }
            Collapsed::Valid(_) => {}
            Collapsed::Invalid(failures) => errors.extend(failures),
        }
    }
    Ok(errors)
}

/// Drops properties holding `null`, except those whose schema explicitly
/// declares them nullable.
pub(crate) fn remove_null_values(
    engine: &ParameterValidator<'_>,
    schema: &Schema,
    map: &mut Map,
    context: &ValidationContext,
) {
    if !engine.settings().remove_null_values_from_objects {
        return;
    }

    let nulls: Vec<String> = map
        .iter()
        .filter(|(_, value)| value.is_null())
        .map(|(key, _)| key.clone())
        .collect();
    if nulls.is_empty() {
        return;
    }

    let path = context.format_path();
    for property in nulls {
        let keep = schema
            .properties
            .as_ref()
            .and_then(|properties| properties.get(&property))
            .is_some_and(|declared| explicitly_nullable(engine, declared, context));
        if keep {
            continue;
        }
        map.shift_remove(&property);
        engine.log(LogEntry::NullRemoved {
            path: path.clone(),
            property,
        });
    }
}

fn explicitly_nullable(
    engine: &ParameterValidator<'_>,
    declared: &Schema,
    context: &ValidationContext,
) -> bool {
    if declared.nullable.is_some() {
        return declared.nullable == Some(true);
    }
    // Resolution failures were already reported while validating.
    match engine.resolver().resolve(declared, context) {
        Ok(Resolution::Resolved { schema, .. }) => schema.nullable == Some(true),
        _ => false,
    }
}
