//! Per-value entry point: `oneOf` handling, model resolution and selection of
//! the type validator.

use std::cell::RefCell;

use super::context::ValidationContext;
use super::errors::{ErrorFactory, ValidationResult};
use super::logs::{LogEntry, ValidationLogs};
use super::resolver::{Resolution, SchemaResolver};
use super::validators::validator_for;
use crate::core::ValidationSettings;
use crate::error::Result;
use crate::types::{Models, Schema, Value};

/// Validates single values against schema nodes for one top-level call.
///
/// Holds everything that stays fixed during the call: the models, the
/// effective settings and the error factory. Side effects are collected in
/// the logs and handed back with [`ParameterValidator::into_logs`].
#[derive(Debug)]
pub struct ParameterValidator<'a> {
    models: &'a Models,
    settings: &'a ValidationSettings,
    errors: ErrorFactory,
    logs: RefCell<ValidationLogs>,
}

impl<'a> ParameterValidator<'a> {
    pub fn new(models: &'a Models, settings: &'a ValidationSettings) -> Self {
        Self {
            models,
            settings,
            errors: ErrorFactory::new(settings),
            logs: RefCell::new(ValidationLogs::new()),
        }
    }

    pub fn settings(&self) -> &ValidationSettings {
        self.settings
    }

    pub fn models(&self) -> &Models {
        self.models
    }

    pub fn errors(&self) -> &ErrorFactory {
        &self.errors
    }

    pub fn resolver(&self) -> SchemaResolver<'a> {
        SchemaResolver::new(self.models, self.settings)
    }

    pub(crate) fn log(&self, entry: LogEntry) {
        self.logs.borrow_mut().push(entry);
    }

    pub fn into_logs(self) -> ValidationLogs {
        self.logs.into_inner()
    }

    /// Validates and coerces `value` against `schema`.
    ///
    /// `None` stands for an absent value. Objects are coerced in place when
    /// `replaceValues` is on; other types report their coerced value in the
    /// results.
    pub fn validate(
        &self,
        schema: &Schema,
        mut value: Option<&mut Value>,
        context: &ValidationContext,
    ) -> Result<Vec<ValidationResult>> {
        if let Some(candidates) = &schema.one_of {
            return self.validate_one_of(schema, candidates, value, context);
        }

        let (schema, context) = match self.resolver().resolve(schema, context)? {
            Resolution::Resolved { schema, context } => (schema, context),
            Resolution::Failed(results) => return Ok(results),
        };

        // A model may itself be a oneOf.
        if let Some(candidates) = &schema.one_of {
            return self.validate_one_of(&schema, candidates, reborrow(&mut value), &context);
        }

        tracing::trace!(
            name = schema.display_name(),
            path = %context.format_path(),
            schema_type = schema.schema_type.as_deref().unwrap_or("object"),
            "Validating value"
        );

        validator_for(schema.primitive_type()).validate(self, &schema, value, &context)
    }

    /// Tries every candidate laid over the outer node, each on its own copy
    /// of the value. Any candidate without errors wins and only the winners'
    /// results are returned; otherwise all candidates' errors are. The first
    /// winner's copy replaces the value, and only its side effects are logged.
    fn validate_one_of(
        &self,
        schema: &Schema,
        candidates: &[Schema],
        value: Option<&mut Value>,
        context: &ValidationContext,
    ) -> Result<Vec<ValidationResult>> {
        if candidates.is_empty() {
            return Ok(self.errors.message(
                format!("{} has an empty oneOf", schema.display_name()),
                value.as_deref(),
                context,
            ));
        }

        let mut winner: Option<Option<Value>> = None;
        let mut successes = Vec::new();
        let mut failures = Vec::new();

        for candidate in candidates {
            let working = schema.overlay(candidate);
            let mut attempt = value.as_deref().cloned();
            let mark = self.logs.borrow().len();
            let results = self.validate(&working, attempt.as_mut(), context)?;

            if results.iter().any(ValidationResult::is_error) {
                self.logs.borrow_mut().truncate(mark);
                failures.extend(results);
            } else {
                if winner.is_some() {
                    self.logs.borrow_mut().truncate(mark);
                } else {
                    winner = Some(attempt);
                }
                successes.extend(results);
            }
        }

        match winner {
            Some(attempt) => {
                if let (Some(target), Some(attempt)) = (value, attempt) {
                    *target = attempt;
                }
                Ok(successes)
            }
            None => Ok(failures),
        }
    }
}

/// Shortens the borrow inside an optional value so it can be handed out again.
pub(crate) fn reborrow<'b>(value: &'b mut Option<&mut Value>) -> Option<&'b mut Value> {
    value.as_mut().map(|value| &mut **value)
}
