//! Location tracking for validation errors.
//!
//! A context is never mutated: descending into a property or array element
//! yields a new context, so sibling validations cannot see each other's paths.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SwaggerValidationError};

/// Where in a request the validated value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Query,
    Path,
    Body,
    Form,
    Header,
    #[default]
    Unspecified,
}

impl DataSource {
    /// Parses a Swagger `paramType` / `in` value (case-insensitive).
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "query" => Ok(Self::Query),
            "path" => Ok(Self::Path),
            "body" => Ok(Self::Body),
            "form" | "formdata" => Ok(Self::Form),
            "header" => Ok(Self::Header),
            _ => Err(SwaggerValidationError::unknown_data_source(tag)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Query => "Query string",
            Self::Path => "URL",
            Self::Body => "Request body",
            Self::Form => "Form data",
            Self::Header => "Request header",
            Self::Unspecified => "Data",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Property(String),
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        Self::Property(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        Self::Property(name)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Serializable form of a context, for programmatic consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextLiteral {
    #[serde(rename = "dataPath")]
    pub data_path: Vec<PathSegment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationContext {
    source: DataSource,
    path: Vec<PathSegment>,
    /// Models substituted on the way here. Not part of the data path.
    models: Vec<String>,
}

impl ValidationContext {
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            path: Vec::new(),
            models: Vec::new(),
        }
    }

    pub fn source(&self) -> DataSource {
        self.source
    }

    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    pub fn model_trail(&self) -> &[String] {
        &self.models
    }

    /// Context for a nested property or array element.
    pub fn descend(&self, segment: impl Into<PathSegment>) -> Self {
        let mut next = self.clone();
        next.path.push(segment.into());
        next
    }

    /// Context after substituting a referenced model; the data path is unchanged.
    pub fn within_model(&self, model: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.models.push(model.into());
        next
    }

    /// Renders the path as `foo[1].bar`.
    pub fn format_path(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            match segment {
                PathSegment::Property(name) => {
                    out.push('.');
                    out.push_str(name);
                }
                PathSegment::Index(index) => {
                    out.push('[');
                    out.push_str(&index.to_string());
                    out.push(']');
                }
            }
        }
        out.strip_prefix('.').map(str::to_string).unwrap_or(out)
    }

    pub fn format_source(&self) -> &'static str {
        self.source.label()
    }

    pub fn to_literal(&self) -> ContextLiteral {
        ContextLiteral {
            data_path: self.path.clone(),
        }
    }
}

impl fmt::Display for ValidationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_source())?;
        if !self.path.is_empty() {
            write!(f, " at '{}'", self.format_path())?;
        }
        Ok(())
    }
}
