pub mod context;
pub mod dispatcher;
pub mod errors;
pub mod logs;
pub mod messages;
pub mod request;
pub mod resolver;
pub mod validators;

pub use context::{ContextLiteral, DataSource, PathSegment, ValidationContext};
pub use dispatcher::ParameterValidator;
pub use errors::{ErrorFactory, ErrorKind, ErrorParams, ValidationError, ValidationResult};
pub use logs::{LogEntry, ValidationLogs};
pub use messages::{ImprovedMessages, LegacyMessages, MessageRenderer};
pub use request::{SchemaValidationOutcome, validate_against_schema, validate_request};
pub use resolver::{Resolution, SchemaResolver, is_reference};
pub use validators::TypeValidator;
