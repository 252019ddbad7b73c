//! Schema model for discovered tools and their responses.
//!
//! A tool host advertises each tool as a [`ToolSchema`]: a name, a
//! description, and JSON-Schema fragments for its input and (optionally) its
//! output. Invoking a tool yields a [`ToolResponseEnvelope`]: an ordered list
//! of typed content parts plus an optional structured payload.
//!
//! Schema fragments are parsed into a tagged [`PropertySchema`] tree so that
//! code generation can match on every shape exhaustively instead of probing
//! untyped JSON. Property order is the insertion order of the source document.
//!
//! # Examples
//!
//! ```
//! use mcp_toolgen_core::{PropertySchema, ToolSchema};
//! use serde_json::json;
//!
//! let tool: ToolSchema = serde_json::from_value(json!({
//!     "name": "add",
//!     "description": "Add two numbers",
//!     "inputSchema": {
//!         "type": "object",
//!         "properties": { "a": { "type": "number" }, "b": { "type": "number" } },
//!         "required": ["a", "b"]
//!     },
//!     "outputSchema": {
//!         "type": "object",
//!         "properties": { "result": { "type": "number" } }
//!     }
//! }))
//! .unwrap();
//!
//! let names: Vec<&str> = tool.input_schema.property_names().collect();
//! assert_eq!(names, ["a", "b"]);
//! assert!(tool.output_schema.is_some());
//! ```

use crate::ToolName;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Description of one tool as advertised by the tool host.
///
/// Immutable once listed. Uses the MCP wire names (`inputSchema`,
/// `outputSchema`); unknown fields such as `title` or `annotations` are
/// ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSchema {
    /// Unique, non-empty tool name
    pub name: ToolName,
    /// Human-readable description (empty when the host sends none)
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Schema of the tool arguments
    pub input_schema: SchemaFragment,
    /// Schema of the structured result, when the host declares one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<SchemaFragment>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Object-shaped schema fragment: ordered properties plus the `required` list.
///
/// # Examples
///
/// ```
/// use mcp_toolgen_core::SchemaFragment;
/// use serde_json::json;
///
/// let fragment = SchemaFragment::parse(&json!({
///     "type": "object",
///     "properties": { "dirPath": { "type": "string" } },
///     "required": []
/// }))
/// .unwrap();
///
/// assert!(!fragment.is_required("dirPath"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct SchemaFragment {
    /// Properties in source order
    pub properties: Vec<(String, PropertySchema)>,
    /// Names listed under `required`, or `None` when the list is absent
    pub required: Option<Vec<String>>,
}

impl SchemaFragment {
    /// Parses a JSON Schema object into a fragment.
    ///
    /// A missing `properties` key yields an empty fragment; every property
    /// value is mapped with [`PropertySchema::from_value`], which never fails.
    ///
    /// # Errors
    ///
    /// Returns a description of the mismatch when the schema itself is not a
    /// JSON object, when `properties` is not an object, or when `required` is
    /// not an array.
    pub fn parse(value: &Value) -> Result<Self, String> {
        let obj = value
            .as_object()
            .ok_or_else(|| format!("schema must be a JSON object, found {}", type_of(value)))?;

        let properties = match obj.get("properties") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Object(props)) => props
                .iter()
                .map(|(name, schema)| (name.clone(), PropertySchema::from_value(schema)))
                .collect(),
            Some(other) => {
                return Err(format!(
                    "'properties' must be an object, found {}",
                    type_of(other)
                ));
            }
        };

        let required = match obj.get("required") {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => Some(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect(),
            ),
            Some(other) => {
                return Err(format!(
                    "'required' must be an array, found {}",
                    type_of(other)
                ));
            }
        };

        Ok(Self {
            properties,
            required,
        })
    }

    /// Returns `true` if the fragment declares no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterates over property names in source order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(name, _)| name.as_str())
    }

    /// Returns `true` unless a `required` list exists and omits `name`.
    ///
    /// Fragments without a `required` list treat every property as required,
    /// so generated declarations carry no optional markers for them.
    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.required
            .as_ref()
            .is_none_or(|required| required.iter().any(|r| r == name))
    }

    /// Converts the fragment back into a JSON Schema object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("type".to_string(), Value::String("object".to_string()));

        let props: Map<String, Value> = self
            .properties
            .iter()
            .map(|(name, schema)| (name.clone(), schema.to_value()))
            .collect();
        obj.insert("properties".to_string(), Value::Object(props));

        if let Some(required) = &self.required {
            obj.insert(
                "required".to_string(),
                Value::Array(required.iter().cloned().map(Value::String).collect()),
            );
        }

        Value::Object(obj)
    }
}

impl TryFrom<Value> for SchemaFragment {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SchemaFragment> for Value {
    fn from(fragment: SchemaFragment) -> Self {
        fragment.to_value()
    }
}

/// JSON Schema primitive type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// `string`
    String,
    /// `number`
    Number,
    /// `integer`
    Integer,
    /// `boolean`
    Boolean,
    /// `null`
    Null,
}

impl PrimitiveType {
    /// Parses a JSON Schema type name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "integer" => Some(Self::Integer),
            "boolean" => Some(Self::Boolean),
            "null" => Some(Self::Null),
            _ => None,
        }
    }

    /// Returns the JSON Schema type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }
}

/// Shape of a single property, as far as it can be inferred from its schema.
///
/// # Examples
///
/// ```
/// use mcp_toolgen_core::{PrimitiveType, PropertySchema};
/// use serde_json::json;
///
/// let files = PropertySchema::from_value(&json!({
///     "type": "array",
///     "items": { "type": "string" }
/// }));
///
/// assert_eq!(
///     files,
///     PropertySchema::Array(Box::new(PropertySchema::Primitive(PrimitiveType::String)))
/// );
/// assert_eq!(PropertySchema::from_value(&json!({})), PropertySchema::Unknown);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertySchema {
    /// A JSON primitive
    Primitive(PrimitiveType),
    /// An array of items
    Array(Box<PropertySchema>),
    /// A nested object
    Object(SchemaFragment),
    /// A `type` array such as `["string", "null"]`
    Union(Vec<PropertySchema>),
    /// No usable type information
    Unknown,
}

impl PropertySchema {
    /// Maps any JSON value onto a property shape.
    ///
    /// Total: values that carry no recognizable type information become
    /// [`PropertySchema::Unknown`]. A bare string is read as a type name.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(name) => Self::from_type_name(name, value),
            Value::Object(obj) => match obj.get("type") {
                Some(Value::String(name)) => Self::from_type_name(name, value),
                Some(Value::Array(names)) => Self::union_of(names, value),
                Some(_) => Self::Unknown,
                None if obj.contains_key("properties") => {
                    Self::Object(SchemaFragment::parse(value).unwrap_or_default())
                }
                None if obj.contains_key("items") => Self::array_of(obj.get("items")),
                None => Self::Unknown,
            },
            _ => Self::Unknown,
        }
    }

    fn from_type_name(name: &str, value: &Value) -> Self {
        match name {
            "array" => Self::array_of(value.get("items")),
            "object" => Self::Object(SchemaFragment::parse(value).unwrap_or_default()),
            other => PrimitiveType::from_name(other).map_or_else(
                || {
                    tracing::debug!("unrecognized schema type '{other}', treating as unknown");
                    Self::Unknown
                },
                Self::Primitive,
            ),
        }
    }

    fn union_of(names: &[Value], value: &Value) -> Self {
        let members: Vec<Self> = names
            .iter()
            .filter_map(Value::as_str)
            .map(|name| Self::from_type_name(name, value))
            .collect();

        if members.is_empty() || members.contains(&Self::Unknown) {
            Self::Unknown
        } else if members.len() == 1 {
            members.into_iter().next().unwrap_or(Self::Unknown)
        } else {
            Self::Union(members)
        }
    }

    fn array_of(items: Option<&Value>) -> Self {
        Self::Array(Box::new(items.map_or(Self::Unknown, Self::from_value)))
    }

    /// Converts the shape back into a JSON Schema value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Primitive(primitive) => serde_json::json!({ "type": primitive.as_str() }),
            Self::Array(item) => serde_json::json!({ "type": "array", "items": item.to_value() }),
            Self::Object(fragment) => fragment.to_value(),
            Self::Union(members) => {
                let names: Vec<Value> = members
                    .iter()
                    .filter_map(|member| member.to_value().get("type").cloned())
                    .collect();
                serde_json::json!({ "type": names })
            }
            Self::Unknown => Value::Object(Map::new()),
        }
    }
}

/// One part of a tool response's `content` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPart {
    /// Content type tag (`text`, `image`, `resource`, ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Text body, present for text parts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ContentPart {
    /// Creates a text content part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: Some(text.into()),
        }
    }
}

/// Wrapper returned by a tool invocation.
///
/// # Examples
///
/// ```
/// use mcp_toolgen_core::ToolResponseEnvelope;
/// use serde_json::json;
///
/// let envelope = ToolResponseEnvelope::structured(json!({"result": 4}));
/// assert_eq!(envelope.structured_content, Some(json!({"result": 4})));
/// assert_eq!(envelope.first_text(), Some(r#"{"result":4}"#));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponseEnvelope {
    /// Human-readable content parts in host order
    #[serde(default)]
    pub content: Vec<ContentPart>,
    /// Machine-structured payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
    /// Set by hosts when the tool handler failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl ToolResponseEnvelope {
    /// Envelope with a single text part and no structured payload.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentPart::text(text)],
            ..Self::default()
        }
    }

    /// Envelope carrying `payload` on both channels, the way MCP hosts
    /// usually answer tools that declare an output schema.
    #[must_use]
    pub fn structured(payload: Value) -> Self {
        Self {
            content: vec![ContentPart::text(payload.to_string())],
            structured_content: Some(payload),
            is_error: None,
        }
    }

    /// Returns the first text part's body, if any.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|part| part.kind == "text" && part.text.is_some())
            .and_then(|part| part.text.as_deref())
    }

    /// Returns `true` if the host flagged the invocation as failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }
}

const fn type_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
