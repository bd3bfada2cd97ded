//! Incoming request data, grouped by where each value was carried.

use serde::{Deserialize, Serialize};

use super::{Map, Value};
use crate::validation::context::DataSource;

/// Where a parameter's value was found in a [`Request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// A named entry of the source's map (or of the body object).
    Field,
    /// The entire body stands for the parameter.
    WholeBody,
    /// Nothing was supplied.
    Missing,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Request {
    pub query: Map,
    /// Path parameters.
    pub params: Map,
    pub header: Map,
    pub form: Map,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.header.insert(name.into(), value.into());
        self
    }

    pub fn with_form(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.form.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    fn map(&self, source: DataSource) -> Option<&Map> {
        match source {
            DataSource::Query => Some(&self.query),
            DataSource::Path => Some(&self.params),
            DataSource::Header => Some(&self.header),
            DataSource::Form => Some(&self.form),
            DataSource::Body => self.body.as_ref().and_then(Value::as_object),
            DataSource::Unspecified => None,
        }
    }

    fn map_mut(&mut self, source: DataSource) -> Option<&mut Map> {
        match source {
            DataSource::Query => Some(&mut self.query),
            DataSource::Path => Some(&mut self.params),
            DataSource::Header => Some(&mut self.header),
            DataSource::Form => Some(&mut self.form),
            DataSource::Body => {
                let body = self.body.get_or_insert_with(|| Value::Object(Map::new()));
                if body.is_null() {
                    *body = Value::Object(Map::new());
                }
                body.as_object_mut()
            }
            DataSource::Unspecified => None,
        }
    }

    /// Finds the parameter `name`. A body parameter missing from the body
    /// object stands for the whole body when `whole_body_fallback` is set and
    /// the body is not empty.
    pub fn locate(&self, source: DataSource, name: &str, whole_body_fallback: bool) -> Slot {
        if self.map(source).is_some_and(|map| map.contains_key(name)) {
            return Slot::Field;
        }
        if source != DataSource::Body || !whole_body_fallback {
            return Slot::Missing;
        }
        match &self.body {
            None | Some(Value::Null) => Slot::Missing,
            Some(Value::Object(map)) if map.is_empty() => Slot::Missing,
            Some(_) => Slot::WholeBody,
        }
    }

    pub fn get(&self, source: DataSource, name: &str, slot: Slot) -> Option<&Value> {
        match slot {
            Slot::Field => self.map(source).and_then(|map| map.get(name)),
            Slot::WholeBody => self.body.as_ref(),
            Slot::Missing => None,
        }
    }

    pub fn get_mut(&mut self, source: DataSource, name: &str, slot: Slot) -> Option<&mut Value> {
        match slot {
            Slot::Field => match source {
                DataSource::Body => self.body.as_mut()?.as_object_mut()?.get_mut(name),
                _ => self.map_mut(source)?.get_mut(name),
            },
            Slot::WholeBody => self.body.as_mut(),
            Slot::Missing => None,
        }
    }

    /// Writes a parameter back where it was found. Missing parameters are
    /// added to their source, creating the body object if needed. A body that
    /// holds something other than an object cannot take a named field, so the
    /// value is dropped.
    pub fn store(&mut self, source: DataSource, name: &str, slot: Slot, value: Value) {
        match slot {
            Slot::WholeBody => self.body = Some(value),
            Slot::Field | Slot::Missing => match self.map_mut(source) {
                Some(map) => {
                    map.insert(name.to_string(), value);
                }
                None => tracing::debug!(
                    parameter = name,
                    source = source.label(),
                    "Source cannot hold named values; dropping write-back"
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_locate_named_fields() {
        let request = Request::new()
            .with_query("limit", "5")
            .with_param("petId", "3")
            .with_body(json!({"pet": {"id": 1}}));

        assert_eq!(request.locate(DataSource::Query, "limit", true), Slot::Field);
        assert_eq!(request.locate(DataSource::Path, "petId", true), Slot::Field);
        assert_eq!(request.locate(DataSource::Body, "pet", true), Slot::Field);
        assert_eq!(request.locate(DataSource::Header, "x-trace", true), Slot::Missing);
        assert_eq!(
            request.get(DataSource::Query, "limit", Slot::Field),
            Some(&Value::from("5"))
        );
    }

    #[test]
    fn test_store_skips_non_object_body() {
        let mut request = Request::new().with_body(json!([1, 2]));
        request.store(DataSource::Body, "page", Slot::Missing, Value::Number(1.0));
        assert_eq!(request.body, Some(Value::from(json!([1, 2]))));
    }

    #[test]
    fn test_whole_body_fallback() {
        let request = Request::new().with_body(json!({"id": 1}));
        assert_eq!(request.locate(DataSource::Body, "pet", true), Slot::WholeBody);
        assert_eq!(request.locate(DataSource::Body, "pet", false), Slot::Missing);

        let empty = Request::new().with_body(json!({}));
        assert_eq!(empty.locate(DataSource::Body, "pet", true), Slot::Missing);
        assert_eq!(Request::new().locate(DataSource::Body, "pet", true), Slot::Missing);
    }

    #[test]
    fn test_store_writes_back() {
        let mut request = Request::new().with_query("limit", "5");
        request.store(DataSource::Query, "limit", Slot::Field, Value::Number(5.0));
        assert_eq!(request.query.get("limit"), Some(&Value::Number(5.0)));

        request.store(DataSource::Body, "pet", Slot::Missing, Value::from("x"));
        assert_eq!(request.body, Some(Value::from(json!({"pet": "x"}))));

        request.store(DataSource::Body, "pet", Slot::WholeBody, Value::Bool(true));
        assert_eq!(request.body, Some(Value::Bool(true)));
    }

    #[test]
    fn test_deserialize_partial_request() {
        let request: Request = serde_json::from_value(json!({"query": {"q": "x"}})).unwrap();
        assert_eq!(request.query.len(), 1);
        assert!(request.body.is_none());
    }
}
