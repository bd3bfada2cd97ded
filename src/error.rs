use thiserror::Error;

use crate::validation::ErrorKind;

/// Failures that are raised instead of being reported as validation errors.
///
/// These describe mistakes in the schema or in how the validator was wired up,
/// never problems with the data being validated.
#[derive(Error, Debug)]
pub enum SwaggerValidationError {
    #[error("Invalid schema ({code}): {message}")]
    InvalidSchema { code: ErrorKind, message: String },

    #[error("Unknown data source '{tag}' (expected query, path, body, form or header)")]
    UnknownDataSource { tag: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SwaggerValidationError {
    pub fn invalid_schema(code: ErrorKind, message: impl Into<String>) -> Self {
        Self::InvalidSchema {
            code,
            message: message.into(),
        }
    }

    pub fn unknown_data_source(tag: impl Into<String>) -> Self {
        Self::UnknownDataSource { tag: tag.into() }
    }

    /// Whether the error was caused by the schema rather than by the caller's wiring.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Self::InvalidSchema { .. })
    }
}

pub type Result<T> = std::result::Result<T, SwaggerValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_schema_display() {
        let err = SwaggerValidationError::invalid_schema(ErrorKind::UnknownModel, "no model Pet");
        let display = err.to_string();
        assert!(display.contains("UNKNOWN_MODEL"));
        assert!(display.contains("no model Pet"));
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_unknown_data_source_display() {
        let err = SwaggerValidationError::unknown_data_source("cookie");
        assert!(err.to_string().contains("cookie"));
        assert!(!err.is_schema_error());
    }
}
