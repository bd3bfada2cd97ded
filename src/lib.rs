//! # Swagger Validation
//!
//! Validation and coercion of request parameters and arbitrary data against
//! Swagger/OpenAPI-style schemas.
//!
//! Values arriving as text (query strings, path segments, headers, form
//! fields) are checked against their declared types and converted to native
//! values: `"5"` becomes `5`, `"true"` becomes `true`, ISO dates become dates.
//! Failures are reported as [`ValidationError`]s carrying a message, the data
//! path and the offending value. Mistakes in the schema itself are reported the
//! same way, or raised as [`SwaggerValidationError`] when
//! `throwErrorsWhenSchemaIsInvalid` is set.
//!
//! ## Quick Start
//!
//! ```rust
//! use swagger_validation::*;
//!
//! # fn example() -> Result<()> {
//! let schema = RequestSchema::from_json(
//!     r#"{"parameters": [{"name": "limit", "paramType": "query", "type": "integer", "maximum": 10}]}"#,
//! )?;
//! let mut request = Request::new().with_query("limit", "5");
//!
//! let errors = validate_request(&schema, &mut request, &Models::new(), None)?;
//! assert!(errors.is_empty());
//! assert_eq!(request.query.get("limit"), Some(&Value::Number(5.0)));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod core;
pub mod error;
pub mod types;
pub mod utils;
pub mod validation;

pub use crate::core::{SettingsOverrides, ValidationSettings};
pub use error::{Result, SwaggerValidationError};
pub use types::*;
pub use validation::{
    DataSource, ErrorKind, LogEntry, ParameterValidator, SchemaValidationOutcome, ValidationContext,
    ValidationError, ValidationLogs, ValidationResult, validate_against_schema, validate_request,
};
