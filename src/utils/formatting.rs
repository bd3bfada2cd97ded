//! Helpers for human-readable error messages.

use crate::types::Value;

const MAX_PREVIEW_CHARS: usize = 40;

/// `pluralize(1, "item")` is "1 item", `pluralize(3, "item")` is "3 items".
pub fn pluralize(count: usize, singular: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else if singular.ends_with('y') && !singular.ends_with("ey") {
        format!("{count} {}ies", &singular[..singular.len() - 1])
    } else if singular.ends_with('s') || singular.ends_with('x') {
        format!("{count} {singular}es")
    } else {
        format!("{count} {singular}s")
    }
}

/// Describes what a value actually is, e.g. `a string ("abc")` or `undefined`.
pub fn describe_value(value: Option<&Value>) -> String {
    let Some(value) = value else {
        return "undefined".to_string();
    };

    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("a boolean ({b})"),
        Value::Number(_) => format!("a number ({value})"),
        Value::String(s) if s.is_empty() => "an empty string".to_string(),
        Value::String(s) => format!("a string (\"{}\")", preview(s)),
        Value::Array(items) => format!("an array of {}", pluralize(items.len(), "item")),
        Value::Object(map) => format!("an object with {}", pluralize(map.len(), "property")),
        Value::Date(_) => format!("a date ({value})"),
    }
}

fn preview(s: &str) -> String {
    if s.chars().count() <= MAX_PREVIEW_CHARS {
        s.to_string()
    } else {
        let head: String = s.chars().take(MAX_PREVIEW_CHARS).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(0, "item"), "0 items");
        assert_eq!(pluralize(1, "item"), "1 item");
        assert_eq!(pluralize(2, "property"), "2 properties");
        assert_eq!(pluralize(2, "key"), "2 keys");
        assert_eq!(pluralize(3, "class"), "3 classes");
    }

    #[test]
    fn test_describe_value() {
        assert_eq!(describe_value(None), "undefined");
        assert_eq!(describe_value(Some(&Value::Null)), "null");
        assert_eq!(describe_value(Some(&Value::from("abc"))), "a string (\"abc\")");
        assert_eq!(describe_value(Some(&Value::from(""))), "an empty string");
        assert_eq!(describe_value(Some(&Value::Number(4.0))), "a number (4)");
        assert_eq!(
            describe_value(Some(&Value::from(json!([1, 2])))),
            "an array of 2 items"
        );
        assert_eq!(
            describe_value(Some(&Value::from(json!({"a": 1})))),
            "an object with 1 property"
        );
    }

    #[test]
    fn test_describe_long_string_is_truncated() {
        let long = "x".repeat(100);
        let described = describe_value(Some(&Value::from(long.as_str())));
        assert!(described.ends_with("...\")"));
        assert!(described.len() < 60);
    }
}
