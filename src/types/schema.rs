use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Value;
use crate::core::SettingsOverrides;
use crate::error::Result;

/// Named reusable schemas, referenced through `$ref` or through a legacy
/// model-name-as-type.
pub type Models = IndexMap<String, Schema>;

/// The primitive type names the validator understands. Any other `type` value
/// is a reference to a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
    File,
    Void,
}

impl PrimitiveType {
    /// Case-insensitive lookup of a primitive type name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "boolean" => Some(Self::Boolean),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "string" => Some(Self::String),
            "array" => Some(Self::Array),
            "object" => Some(Self::Object),
            "file" => Some(Self::File),
            "void" => Some(Self::Void),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
            Self::File => "file",
            Self::Void => "void",
        }
    }
}

/// `required` is a flag on standalone parameters and a list of property names on objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Required {
    Flag(bool),
    Properties(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<Schema>),
}

/// A schema node describing one value's expected shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Required>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<serde_json::Value>>,

    /// Regular expression for strings, or a date format for `date`/`date-time`.
    /// Kept raw so a non-string pattern can be reported instead of rejected at load time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    // Legacy schemas frequently spell bounds as strings ("0").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<AdditionalProperties>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<Schema>>,

    #[serde(alias = "default", default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,

    /// Swagger 1.2 parameter location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,

    /// Swagger 2.0 parameter location.
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<SettingsOverrides>,

    /// Set by an enclosing object from its `required` list. Kept apart from
    /// `required` so an inline object's own property list survives.
    #[serde(skip)]
    pub(crate) required_marker: Option<bool>,
}

impl Schema {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn new(schema_type: impl Into<String>) -> Self {
        Self {
            schema_type: Some(schema_type.into()),
            ..Default::default()
        }
    }

    pub fn reference(model: impl Into<String>) -> Self {
        Self {
            reference: Some(model.into()),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(Required::Flag(required));
        self
    }

    pub fn with_required_properties<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = Some(Required::Properties(
            names.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }

    pub fn with_items(mut self, items: Schema) -> Self {
        self.items = Some(Box::new(items));
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.properties
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), schema);
        self
    }

    pub fn with_additional_properties(mut self, allowed: bool) -> Self {
        self.additional_properties = Some(AdditionalProperties::Allowed(allowed));
        self
    }

    pub fn with_one_of(mut self, candidates: Vec<Schema>) -> Self {
        self.one_of = Some(candidates);
        self
    }

    pub fn with_param_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = Some(param_type.into());
        self
    }

    pub fn with_default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Name used in error messages.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("value")
    }

    pub fn primitive_type(&self) -> Option<PrimitiveType> {
        self.schema_type.as_deref().and_then(PrimitiveType::from_name)
    }

    /// Whether this node must be present, either through its own flag or
    /// through the enclosing object's `required` list.
    pub fn is_required(&self) -> bool {
        self.required_marker
            .unwrap_or(matches!(self.required, Some(Required::Flag(true))))
    }

    /// Property names an object node declares as required.
    pub fn required_properties(&self) -> &[String] {
        match &self.required {
            Some(Required::Properties(names)) => names,
            _ => &[],
        }
    }

    /// Explicit `additionalProperties` policy. A schema counts as allowing them.
    pub fn additional_properties_allowed(&self) -> Option<bool> {
        match &self.additional_properties {
            Some(AdditionalProperties::Allowed(allowed)) => Some(*allowed),
            Some(AdditionalProperties::Schema(_)) => Some(true),
            None => None,
        }
    }

    pub fn is_unique_items(&self) -> bool {
        self.unique_items.unwrap_or(false)
    }

    /// Data source tag of a request parameter (`paramType` wins over `in`).
    pub fn source_tag(&self) -> Option<&str> {
        self.param_type.as_deref().or(self.location.as_deref())
    }

    /// Copy of this node addressed as a property or element called `name`.
    pub(crate) fn for_member(&self, name: impl Into<String>, required: Option<bool>) -> Schema {
        let mut member = self.clone();
        member.name = Some(name.into());
        if required.is_some() {
            member.required_marker = required;
        }
        member
    }

    /// Working copy of this node with a `oneOf` candidate laid over it. Fields
    /// the candidate leaves unset (name, required, ...) keep the outer value.
    pub(crate) fn overlay(&self, candidate: &Schema) -> Schema {
        let mut merged = self.clone();
        merged.one_of = None;

        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(
                    if candidate.$field.is_some() {
                        merged.$field = candidate.$field.clone();
                    }
                )*
            };
        }

        take!(
            schema_type,
            reference,
            format,
            nullable,
            allowed_values,
            pattern,
            min_length,
            max_length,
            minimum,
            maximum,
            min_items,
            max_items,
            items,
            unique_items,
            properties,
            additional_properties,
            one_of,
        );

        // A candidate switching to a reference must not inherit the outer type.
        if candidate.reference.is_some() && candidate.schema_type.is_none() {
            merged.schema_type = None;
        }
        if let Some(Required::Properties(names)) = &candidate.required {
            merged.required = Some(Required::Properties(names.clone()));
        }
        merged
    }
}

/// Top-level description of an operation's parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestSchema {
    #[serde(default)]
    pub parameters: Vec<Schema>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<SettingsOverrides>,
}

impl RequestSchema {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn new(parameters: Vec<Schema>) -> Self {
        Self {
            parameters,
            validation: None,
        }
    }

    pub fn with_validation(mut self, overrides: SettingsOverrides) -> Self {
        self.validation = Some(overrides);
        self
    }
}
