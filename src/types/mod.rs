pub mod request;
pub mod schema;
pub mod value;

pub use request::{Request, Slot};
pub use schema::{AdditionalProperties, Models, PrimitiveType, RequestSchema, Required, Schema};
pub use value::{Map, Value, format_number};
