//! Model resolution: turns `$ref`s and legacy model-name-as-type nodes into the
//! primitive-typed schema they stand for.

use std::borrow::Cow;

use super::context::ValidationContext;
use super::errors::{ErrorFactory, ErrorKind, ErrorParams, ValidationResult};
use crate::core::ValidationSettings;
use crate::error::Result;
use crate::types::{Models, PrimitiveType, Schema};

/// Outcome of resolving one schema node.
#[derive(Debug)]
pub enum Resolution<'s> {
    /// Fully dereferenced node plus the context it must be validated in.
    Resolved {
        schema: Cow<'s, Schema>,
        context: ValidationContext,
    },
    /// The node could not be resolved; the results hold the reported error.
    Failed(Vec<ValidationResult>),
}

pub struct SchemaResolver<'a> {
    models: &'a Models,
    settings: &'a ValidationSettings,
    errors: ErrorFactory,
}

impl<'a> SchemaResolver<'a> {
    pub fn new(models: &'a Models, settings: &'a ValidationSettings) -> Self {
        Self {
            models,
            settings,
            errors: ErrorFactory::new(settings),
        }
    }

    /// Follows `$ref`s and model-name types until a primitive, untyped or
    /// `oneOf` node is reached. Each substituted model is recorded in the
    /// returned context's model trail; the data path is left alone.
    pub fn resolve<'s>(&self, schema: &'s Schema, context: &ValidationContext) -> Result<Resolution<'s>> {
        let mut current: Cow<'s, Schema> = Cow::Borrowed(schema);
        let mut context = context.clone();
        let mut visited: Vec<String> = Vec::new();

        loop {
            if current.schema_type.is_some() && current.reference.is_some() {
                let params = ErrorParams::new(current.display_name());
                return self.fail(ErrorKind::InvalidSchema, params, &context);
            }

            if !is_reference(&current) || (current.reference.is_none() && current.one_of.is_some()) {
                return Ok(Resolution::Resolved {
                    schema: current,
                    context,
                });
            }

            if let (Some(type_name), None) = (&current.schema_type, &current.reference) {
                if !self
                    .settings
                    .allow_schemas_with_invalid_types_and_treat_them_like_refs
                {
                    let params = ErrorParams::new(current.display_name()).expected(type_name.clone());
                    return self.fail(ErrorKind::InvalidSchemaType, params, &context);
                }
            }

            let reference = current
                .reference
                .as_deref()
                .or(current.schema_type.as_deref())
                .unwrap_or_default()
                .to_string();

            if visited.contains(&reference) {
                let params = ErrorParams::new(current.display_name())
                    .expected(format!("{reference} (circular reference)"));
                return self.fail(ErrorKind::UnknownModel, params, &context);
            }

            let Some((model_name, model)) = self.lookup(&reference) else {
                let params = ErrorParams::new(current.display_name()).expected(reference);
                return self.fail(ErrorKind::UnknownModel, params, &context);
            };

            tracing::trace!(model = model_name, path = %context.format_path(), "Resolved model reference");

            let mut resolved = model.clone();
            carry_over(&current, &mut resolved);
            context = context.within_model(model_name);
            visited.push(reference);
            current = Cow::Owned(resolved);
        }
    }

    /// Looks a model up by exact name, then by the last segment of a JSON
    /// pointer such as `#/definitions/Pet`.
    fn lookup(&self, reference: &str) -> Option<(&'a str, &'a Schema)> {
        if let Some((name, model)) = self.models.get_key_value(reference) {
            return Some((name.as_str(), model));
        }
        let short = reference.rsplit('/').next()?;
        self.models
            .get_key_value(short)
            .map(|(name, model)| (name.as_str(), model))
    }

    fn fail<'s>(
        &self,
        kind: ErrorKind,
        params: ErrorParams,
        context: &ValidationContext,
    ) -> Result<Resolution<'s>> {
        self.errors
            .schema_error(kind, params, context)
            .map(Resolution::Failed)
    }
}

/// Whether `schema` names a model instead of a primitive type.
pub fn is_reference(schema: &Schema) -> bool {
    schema.reference.is_some()
        || schema
            .schema_type
            .as_deref()
            .is_some_and(|name| PrimitiveType::from_name(name).is_none())
}

/// Fields of the referencing node that describe its use site rather than the
/// model, and therefore survive the substitution.
fn carry_over(referencing: &Schema, resolved: &mut Schema) {
    if referencing.name.is_some() {
        resolved.name = referencing.name.clone();
    }
    if referencing.required_marker.is_some() || referencing.is_required() {
        resolved.required_marker = Some(referencing.is_required());
    }
    if referencing.nullable.is_some() {
        resolved.nullable = referencing.nullable;
    }
    if referencing.default_value.is_some() {
        resolved.default_value = referencing.default_value.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn models() -> Models {
        serde_json::from_value(json!({
            "Pet": {
                "type": "object",
                "required": ["id"],
                "properties": {"id": {"type": "integer"}}
            },
            "PetAlias": {"type": "Pet"},
            "Loop": {"type": "Knot"},
            "Knot": {"type": "Loop"}
        }))
        .unwrap()
    }

    fn resolved_schema(resolution: Resolution<'_>) -> (Schema, ValidationContext) {
        match resolution {
            Resolution::Resolved { schema, context } => (schema.into_owned(), context),
            Resolution::Failed(results) => panic!("unexpected failure: {results:?}"),
        }
    }

    fn failure_kind(resolution: Resolution<'_>) -> ErrorKind {
        match resolution {
            Resolution::Failed(results) => results[0].error().unwrap().kind,
            Resolution::Resolved { .. } => panic!("expected a failure"),
        }
    }

    #[test]
    fn test_primitive_is_returned_as_is() {
        let models = models();
        let settings = ValidationSettings::default();
        let resolver = SchemaResolver::new(&models, &settings);
        let schema = Schema::new("string");

        let resolution = resolver.resolve(&schema, &ValidationContext::default()).unwrap();
        assert!(matches!(
            resolution,
            Resolution::Resolved { schema: Cow::Borrowed(_), .. }
        ));
    }

    #[test]
    fn test_ref_resolves_and_keeps_use_site_fields() {
        let models = models();
        let settings = ValidationSettings::default();
        let resolver = SchemaResolver::new(&models, &settings);
        let schema = Schema::reference("Pet").with_name("pet").with_required(true);

        let (resolved, context) =
            resolved_schema(resolver.resolve(&schema, &ValidationContext::default()).unwrap());
        assert_eq!(resolved.schema_type.as_deref(), Some("object"));
        assert_eq!(resolved.name.as_deref(), Some("pet"));
        assert!(resolved.is_required());
        assert_eq!(resolved.required_properties(), ["id".to_string()]);
        assert_eq!(context.model_trail(), ["Pet".to_string()]);
        assert!(context.path().is_empty());
    }

    #[test]
    fn test_model_name_as_type_resolves_through_aliases() {
        let models = models();
        let settings = ValidationSettings::default();
        let resolver = SchemaResolver::new(&models, &settings);
        let schema = Schema::new("PetAlias");

        let (resolved, context) =
            resolved_schema(resolver.resolve(&schema, &ValidationContext::default()).unwrap());
        assert_eq!(resolved.schema_type.as_deref(), Some("object"));
        assert_eq!(context.model_trail().len(), 2);
    }

    #[test]
    fn test_json_pointer_reference() {
        let models = models();
        let settings = ValidationSettings::default();
        let resolver = SchemaResolver::new(&models, &settings);
        let schema = Schema::reference("#/definitions/Pet");

        let (resolved, _) =
            resolved_schema(resolver.resolve(&schema, &ValidationContext::default()).unwrap());
        assert!(resolved.properties.is_some());
    }

    #[test]
    fn test_unknown_model_is_reported() {
        let models = models();
        let settings = ValidationSettings::default();
        let resolver = SchemaResolver::new(&models, &settings);
        let schema = Schema::reference("Dog");

        let resolution = resolver.resolve(&schema, &ValidationContext::default()).unwrap();
        assert_eq!(failure_kind(resolution), ErrorKind::UnknownModel);
    }

    #[test]
    fn test_type_and_ref_conflict() {
        let models = models();
        let settings = ValidationSettings::default();
        let resolver = SchemaResolver::new(&models, &settings);
        let mut schema = Schema::new("object");
        schema.reference = Some("Pet".into());

        let resolution = resolver.resolve(&schema, &ValidationContext::default()).unwrap();
        assert_eq!(failure_kind(resolution), ErrorKind::InvalidSchema);
    }

    #[test]
    fn test_invalid_type_rejected_when_refs_by_type_disallowed() {
        let models = models();
        let settings = ValidationSettings {
            allow_schemas_with_invalid_types_and_treat_them_like_refs: false,
            ..Default::default()
        };
        let resolver = SchemaResolver::new(&models, &settings);
        let schema = Schema::new("Pet");

        let resolution = resolver.resolve(&schema, &ValidationContext::default()).unwrap();
        assert_eq!(failure_kind(resolution), ErrorKind::InvalidSchemaType);
    }

    #[test]
    fn test_unknown_model_raises_when_configured() {
        let models = models();
        let settings = ValidationSettings::default().with_throw_errors_when_schema_is_invalid(true);
        let resolver = SchemaResolver::new(&models, &settings);
        let schema = Schema::reference("Dog");

        assert!(resolver.resolve(&schema, &ValidationContext::default()).is_err());
    }

    #[test]
    fn test_alias_cycle_is_reported() {
        let models = models();
        let settings = ValidationSettings::default();
        let resolver = SchemaResolver::new(&models, &settings);
        let schema = Schema::new("Loop");

        let resolution = resolver.resolve(&schema, &ValidationContext::default()).unwrap();
        assert_eq!(failure_kind(resolution), ErrorKind::UnknownModel);
    }

    #[test]
    fn test_is_reference() {
        assert!(is_reference(&Schema::reference("Pet")));
        assert!(is_reference(&Schema::new("Pet")));
        assert!(!is_reference(&Schema::new("integer")));
        assert!(!is_reference(&Schema::default()));
    }
}
