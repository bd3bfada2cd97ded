pub mod config;

pub use config::{SettingsOverrides, ValidationSettings};
