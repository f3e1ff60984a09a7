use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::error::{SerdeError, UnsupportedVersionError};

/// The flat name → schema mapping of one document, in declaration order.
pub type SchemaMap = IndexMap<String, SchemaNode>;

/// A parsed OpenAPI (v3) or Swagger (v2) document.
///
/// Both version shapes deserialize into the same struct; [`Document::schemas`]
/// applies the version detection and yields the flat schema mapping.
#[derive(Debug, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub openapi: Option<String>,
    #[serde(default)]
    pub swagger: Option<String>,
    #[serde(default)]
    pub components: Option<Components>,
    #[serde(default)]
    pub definitions: Option<SchemaMap>,
}

impl Document {
    /// Parse a document from a YAML or JSON string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SerdeError> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml);
        let result = serde_path_to_error::deserialize(deserializer)?;
        Ok(result)
    }

    /// Parse a document from an already-fetched JSON value.
    pub fn from_json(json: serde_json::Value) -> Result<Self, SerdeError> {
        let result = serde_path_to_error::deserialize(json)?;
        Ok(result)
    }

    /// Returns the flat schema mapping for either supported version.
    ///
    /// v3 is detected by an `openapi: 3.*` marker plus a `components`
    /// object; v2 by a `swagger: 2.*` marker plus `definitions`. Any other
    /// shape fails, which aborts the whole run.
    pub fn schemas(&self) -> Result<&SchemaMap, UnsupportedVersionError> {
        if let (Some(version), Some(components)) = (&self.openapi, &self.components)
            && version.starts_with('3')
        {
            return Ok(&components.schemas);
        }
        if let (Some(version), Some(definitions)) = (&self.swagger, &self.definitions)
            && version.starts_with('2')
        {
            return Ok(definitions);
        }
        Err(UnsupportedVersionError)
    }

    /// Whether this is a Swagger v2 document. v2 schema keys may carry
    /// bracketed generic suffixes that the type renderer truncates.
    pub fn is_v2(&self) -> bool {
        self.swagger.as_deref().is_some_and(|v| v.starts_with('2'))
    }
}

/// Components section containing reusable schemas.
#[derive(Debug, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: SchemaMap,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Ty {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    Null,
}

impl std::fmt::Display for Ty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Null => "null",
        })
    }
}

/// One named type definition within the document: object, enum, or
/// composite. All fields are optional; the normalization pass in
/// [`crate::ir`] classifies each node into a closed shape set.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    #[serde(rename = "type", default)]
    pub ty: Option<Ty>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub nullable: bool,

    /// Object properties; insertion order is declaration order is output
    /// order.
    #[serde(default)]
    pub properties: Option<IndexMap<String, SchemaNode>>,
    #[serde(default)]
    pub additional_properties: Option<AdditionalProperties>,
    /// Reference to an enum schema whose values form the key set of a
    /// dictionary property, paired with `additional_properties` as the
    /// value shape.
    #[serde(rename = "x-dictionaryKey", default)]
    pub dictionary_key: Option<Box<SchemaNode>>,

    // Array items.
    #[serde(default)]
    pub items: Option<Box<SchemaNode>>,

    /// Enum values, with optional parallel display names of the same
    /// length and index correspondence.
    #[serde(
        rename = "enum",
        default,
        deserialize_with = "deserialize_enum_values"
    )]
    pub variants: Option<Vec<String>>,
    #[serde(rename = "x-enumNames", default)]
    pub variant_names: Option<Vec<String>>,

    // Composition.
    #[serde(default)]
    pub all_of: Option<Vec<SchemaNode>>,
    #[serde(default)]
    pub one_of: Option<Vec<SchemaNode>>,
    #[serde(rename = "$ref", default)]
    pub reference: Option<RefPath>,

    // Constraints, surfaced as inline comments by the type renderer.
    #[serde(default)]
    pub minimum: Option<f64>,
    #[serde(default)]
    pub maximum: Option<f64>,
    #[serde(default)]
    pub exclusive_minimum: Option<bool>,
    #[serde(default)]
    pub exclusive_maximum: Option<bool>,
    #[serde(default)]
    pub min_length: Option<u64>,
    #[serde(default)]
    pub max_length: Option<u64>,
    #[serde(default)]
    pub min_items: Option<u64>,
    #[serde(default)]
    pub max_items: Option<u64>,
    #[serde(default)]
    pub unique_items: Option<bool>,
}

impl SchemaNode {
    /// The declared enum values, when this schema is a non-empty enum.
    pub fn enum_values(&self) -> Option<&[String]> {
        self.variants.as_deref().filter(|values| !values.is_empty())
    }

    /// The first declared enum value. Every synthesized enum value is the
    /// first member, never a random one.
    pub fn first_enum_value(&self) -> Option<&str> {
        self.enum_values()?.first().map(String::as_str)
    }
}

/// Either a boolean marker or a value schema.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<SchemaNode>),
}

impl AdditionalProperties {
    pub fn as_schema(&self) -> Option<&SchemaNode> {
        match self {
            Self::Schema(schema) => Some(schema),
            Self::Bool(_) => None,
        }
    }
}

/// The path of a schema reference.
///
/// Reference names are the trailing `/`-delimited segment. Parsing is
/// total: a string with no `/` acts as its own name and fails later at
/// lookup.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct RefPath(String);

impl RefPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The referenced schema name: everything after the last `/`.
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

/// Caller-supplied replacements for named schemas: an ordered sequence of
/// single-entry `{name: schema}` mappings. When present for a name, the
/// override takes precedence over the document's own definition during
/// resolution, so enum values can be patched without editing the source
/// document.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct OverrideSchemas(pub Vec<IndexMap<String, SchemaNode>>);

impl OverrideSchemas {
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.0.iter().find_map(|entry| entry.get(name))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Enum members are expected to be strings, but real documents sometimes
/// carry numeric values; stringify anything scalar instead of failing the
/// whole document parse.
fn deserialize_enum_values<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    let values: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(values.map(|values| {
        values
            .into_iter()
            .map(|value| match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect()
    }))
}
