//! Side effects performed while validating, reported separately from errors.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum LogEntry {
    /// An unrecognized property was stripped from an object.
    PropertyDeleted { path: String, property: String },
    /// A property holding `null` was removed after the object validated.
    NullRemoved { path: String, property: String },
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEntry::PropertyDeleted { path, property } => {
                write!(f, "Deleted unrecognized property '{property}'")?;
                location(f, path)
            }
            LogEntry::NullRemoved { path, property } => {
                write!(f, "Removed null value of property '{property}'")?;
                location(f, path)
            }
        }
    }
}

fn location(f: &mut fmt::Formatter<'_>, path: &str) -> fmt::Result {
    if path.is_empty() {
        Ok(())
    } else {
        write!(f, " from '{path}'")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationLogs {
    entries: Vec<LogEntry>,
}

impl ValidationLogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LogEntry) {
        tracing::debug!(entry = %entry, "Validation side effect");
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drops every entry recorded after the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    pub fn extend(&mut self, other: ValidationLogs) {
        self.entries.extend(other.entries);
    }

    /// Human-readable lines, one per side effect.
    pub fn formatted(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatted_entries() {
        let mut logs = ValidationLogs::new();
        logs.push(LogEntry::PropertyDeleted {
            path: "owner".into(),
            property: "extra".into(),
        });
        logs.push(LogEntry::NullRemoved {
            path: String::new(),
            property: "nickname".into(),
        });

        assert_eq!(
            logs.formatted(),
            vec![
                "Deleted unrecognized property 'extra' from 'owner'".to_string(),
                "Removed null value of property 'nickname'".to_string(),
            ]
        );
        assert_eq!(logs.len(), 2);

        logs.truncate(1);
        assert_eq!(logs.formatted(), vec!["Deleted unrecognized property 'extra' from 'owner'".to_string()]);
    }
}
