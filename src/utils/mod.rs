pub mod formatting;

pub use formatting::{describe_value, pluralize};
