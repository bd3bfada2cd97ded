use std::collections::HashSet;

use super::{Presence, TypeValidator, check_presence};
use crate::error::Result;
use crate::types::{Schema, Value};
use crate::validation::context::ValidationContext;
use crate::validation::dispatcher::ParameterValidator;
use crate::validation::errors::{Collapsed, ErrorKind, ErrorParams, ValidationResult, collapse};

#[derive(Debug, Default, Clone, Copy)]
pub struct ArrayValidator;

impl TypeValidator for ArrayValidator {
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
        let name = schema.display_name();
        let unique = schema.is_unique_items();

        let elements = match value {
            Value::Array(elements) => elements,
            other => {
                let kind = if unique { ErrorKind::NotASet } else { ErrorKind::NotAnArray };
                let params = ErrorParams::new(name).value(Some(&*other));
                return Ok(engine.errors().make(kind, params, context));
            }
        };

        let count = elements.len();
        if let Some(min) = schema.min_items {
            if count < min {
                let params = ErrorParams::new(name).limit(min as f64);
                return Ok(engine.errors().make(ErrorKind::TooFewItems, params, context));
            }
        }
        if let Some(max) = schema.max_items {
            if count > max {
                let params = ErrorParams::new(name).limit(max as f64);
                return Ok(engine.errors().make(ErrorKind::TooManyItems, params, context));
            }
        }

        let coerced = match &schema.items {
            Some(items) => {
                let mut coerced = Vec::with_capacity(count);
                let mut errors = Vec::new();

                for (index, element) in elements.iter_mut().enumerate() {
                    let member = items.for_member(element_name(items, element), None);
                    let results = engine.validate(&member, Some(&mut *element), &context.descend(index))?;
                    match collapse(results) {
                        Collapsed::Valid(Some(value)) => coerced.push(value),
                        Collapsed::Valid(None) => coerced.push(element.clone()),
                        Collapsed::Invalid(failures) => errors.extend(failures),
                    }
                }

                if !errors.is_empty() {
                    return Ok(errors.into_iter().map(ValidationResult::Invalid).collect());
                }
                coerced
            }
            None => elements.clone(),
        };

        if unique {
            let mut seen = HashSet::with_capacity(coerced.len());
            if !coerced.iter().all(|item| seen.insert(item.canonical_string())) {
                let array = Value::Array(coerced);
                let params = ErrorParams::new(name).value(Some(&array));
                return Ok(engine.errors().make(ErrorKind::NotUnique, params, context));
            }
        }

        Ok(vec![ValidationResult::valid(Some(Value::Array(coerced)))])
    }
}

/// Name an element is reported under: the item model or type for structured
/// elements, the element itself otherwise.
fn element_name(items: &Schema, element: &Value) -> String {
    match element {
        Value::Object(_) | Value::Null => items
            .reference
            .as_deref()
            .or(items.schema_type.as_deref())
            .unwrap_or_default()
            .to_string(),
        other => other.to_string(),
    }
}
