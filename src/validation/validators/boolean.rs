use super::{Presence, TypeValidator, check_presence, reject};
use crate::error::Result;
use crate::types::{Schema, Value};
use crate::validation::context::ValidationContext;
use crate::validation::dispatcher::ParameterValidator;
use crate::validation::errors::{ErrorKind, ValidationResult};

#[derive(Debug, Default, Clone, Copy)]
pub struct BooleanValidator;

impl TypeValidator for BooleanValidator {
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

        let coerced = match value {
            Value::Bool(flag) => Some(*flag),
            Value::String(text) if engine.settings().allow_string_representations_of_booleans => {
                match text.as_str() {
                    "true" => Some(true),
                    "false" => Some(false),
                    _ => None,
                }
            }
            _ => None,
        };

        Ok(match coerced {
            Some(flag) => vec![ValidationResult::valid(Some(Value::Bool(flag)))],
            None => reject(engine, ErrorKind::NotABoolean, schema, value, context),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SettingsOverrides, ValidationSettings};
    use crate::validation::validators::test_support::*;

    fn schema() -> Schema {
        Schema::new("boolean").with_name("active")
    }

    #[test]
    fn test_accepts_booleans() {
        let mut value = Value::Bool(false);
        let results = run(&ValidationSettings::default(), &schema(), Some(&mut value));
        assert_eq!(only_value(&results), Some(Value::Bool(false)));
    }

    #[test]
    fn test_coerces_string_literals() {
        let mut value = Value::from("true");
        let results = run(&ValidationSettings::default(), &schema(), Some(&mut value));
        assert_eq!(only_value(&results), Some(Value::Bool(true)));
    }

    #[test]
    fn test_rejects_other_strings() {
        let mut value = Value::from("yes");
        let results = run(&ValidationSettings::default(), &schema(), Some(&mut value));
        assert_eq!(errors(&results)[0].message, "active is not a boolean");
        assert_eq!(errors(&results)[0].value, Some(Value::from("yes")));
    }

    #[test]
    fn test_rejects_string_literals_when_disallowed() {
        let mut settings = ValidationSettings::default();
        settings.apply(&SettingsOverrides {
            allow_string_representations_of_booleans: Some(false),
            ..Default::default()
        });
        let mut value = Value::from("true");
        let results = run(&settings, &schema(), Some(&mut value));
        assert_eq!(errors(&results)[0].kind, ErrorKind::NotABoolean);
    }

    #[test]
    fn test_rejects_numbers() {
        let mut value = Value::Number(1.0);
        let results = run(&ValidationSettings::default(), &schema(), Some(&mut value));
        assert_eq!(errors(&results).len(), 1);
    }
}
