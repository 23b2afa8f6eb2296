//! Configuration schemas for node forms.
//!
//! A schema is an ordered list of fields. Each field carries a [`FieldKind`]
//! that decides which control renders it and how raw input becomes a stored
//! value. Schemas arrive as JSON objects keyed by field name:
//!
//! ```json
//! { "to": { "type": "string", "label": "To", "required": true } }
//! ```

use crate::error::SchemaError;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

/// A node's configuration values, keyed by field name.
pub type ConfigMap = serde_json::Map<String, JsonValue>;

/// One choice of a select field. Always serialized as `{value, label}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawOption")]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Options may be written as bare strings or as `{value, label}` objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawOption {
    Plain(String),
    Labeled {
        value: String,
        #[serde(default)]
        label: Option<String>,
    },
}

impl From<RawOption> for SelectOption {
    fn from(raw: RawOption) -> Self {
        match raw {
            RawOption::Plain(value) => Self {
                label: value.clone(),
                value,
            },
            RawOption::Labeled { value, label } => Self {
                label: label.unwrap_or_else(|| value.clone()),
                value,
            },
        }
    }
}

/// The kind of a configuration field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Single-line text.
    String,
    /// Multi-line text. Both `text` and `textarea` map here.
    Text,
    /// Floating point number.
    Number,
    /// On/off switch.
    Boolean,
    /// Single choice among fixed options.
    Select { options: Vec<SelectOption> },
    /// Any other type name. Rendered as single-line text.
    Unrecognized(String),
}

impl FieldKind {
    /// Returns the wire name of this kind.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Text => "textarea",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Select { .. } => "select",
            Self::Unrecognized(name) => name,
        }
    }

    /// Converts user input into the value stored in a node's config.
    ///
    /// Number input that does not parse to a finite number is stored as
    /// JSON `null`.
    ///
    /// # Errors
    ///
    /// Returns an error when the input does not come from this kind's
    /// control, or when a select input names an unknown option.
    pub fn coerce(&self, input: &FieldInput) -> Result<JsonValue, SchemaError> {
        match (self, input) {
            (Self::String | Self::Text | Self::Unrecognized(_), FieldInput::Text(text)) => {
                Ok(JsonValue::String(text.clone()))
            }
            (Self::Number, FieldInput::Text(text)) => Ok(text
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map_or(JsonValue::Null, JsonValue::Number)),
            (Self::Boolean, FieldInput::Toggle(on)) => Ok(JsonValue::Bool(*on)),
            (Self::Select { options }, FieldInput::Select(choice)) => {
                if options.iter().any(|option| &option.value == choice) {
                    Ok(JsonValue::String(choice.clone()))
                } else {
                    Err(SchemaError::UnknownOption {
                        value: choice.clone(),
                    })
                }
            }
            (_, FieldInput::Clear) => Ok(JsonValue::Null),
            _ => Err(SchemaError::InputMismatch {
                expected: self.type_name().to_string(),
                received: input.kind_name(),
            }),
        }
    }
}

/// Raw input coming from a form control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "input", content = "value", rename_all = "snake_case")]
pub enum FieldInput {
    /// Text typed into a text, textarea or number control.
    Text(String),
    /// New state of a toggle.
    Toggle(bool),
    /// Value picked from a dropdown.
    Select(String),
    /// Remove the field from the config.
    Clear,
}

impl FieldInput {
    fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Toggle(_) => "toggle",
            Self::Select(_) => "select",
            Self::Clear => "clear",
        }
    }
}

/// Description of one configuration field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawFieldSpec", into = "RawFieldSpec")]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub label: Option<String>,
    pub description: Option<String>,
    pub placeholder: Option<String>,
    pub default: Option<JsonValue>,
    /// Marked in the form, never enforced.
    pub required: bool,
}

impl FieldSpec {
    /// Creates a field of the given kind with no decorations.
    #[must_use]
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            label: None,
            description: None,
            placeholder: None,
            default: None,
            required: false,
        }
    }

    #[must_use]
    pub fn string() -> Self {
        Self::new(FieldKind::String)
    }

    #[must_use]
    pub fn text() -> Self {
        Self::new(FieldKind::Text)
    }

    #[must_use]
    pub fn number() -> Self {
        Self::new(FieldKind::Number)
    }

    #[must_use]
    pub fn boolean() -> Self {
        Self::new(FieldKind::Boolean)
    }

    #[must_use]
    pub fn select(options: Vec<SelectOption>) -> Self {
        Self::new(FieldKind::Select { options })
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<JsonValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Returns the label to display, falling back to the field key.
    #[must_use]
    pub fn display_label<'a>(&'a self, key: &'a str) -> &'a str {
        self.label.as_deref().unwrap_or(key)
    }
}

#[derive(Serialize, Deserialize)]
struct RawFieldSpec {
    #[serde(rename = "type", default = "default_type_name")]
    type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<SelectOption>>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    required: bool,
}

fn default_type_name() -> String {
    "string".to_string()
}

impl From<RawFieldSpec> for FieldSpec {
    fn from(raw: RawFieldSpec) -> Self {
        let kind = match raw.type_name.as_str() {
            "string" => FieldKind::String,
            "text" | "textarea" => FieldKind::Text,
            "number" => FieldKind::Number,
            "boolean" => FieldKind::Boolean,
            "select" => FieldKind::Select {
                options: raw.options.unwrap_or_default(),
            },
            _ => FieldKind::Unrecognized(raw.type_name),
        };
        Self {
            kind,
            label: raw.label,
            description: raw.description,
            placeholder: raw.placeholder,
            default: raw.default,
            required: raw.required,
        }
    }
}

impl From<FieldSpec> for RawFieldSpec {
    fn from(spec: FieldSpec) -> Self {
        let type_name = spec.kind.type_name().to_string();
        let options = match spec.kind {
            FieldKind::Select { options } => Some(options),
            _ => None,
        };
        Self {
            type_name,
            label: spec.label,
            description: spec.description,
            placeholder: spec.placeholder,
            default: spec.default,
            options,
            required: spec.required,
        }
    }
}

/// An ordered set of configuration fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSchema {
    fields: Vec<(String, FieldSpec)>,
}

impl ConfigSchema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field, replacing any earlier field with the same key.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, spec: FieldSpec) -> Self {
        self.insert(key, spec);
        self
    }

    /// Inserts a field, replacing any earlier field with the same key in place.
    pub fn insert(&mut self, key: impl Into<String>, spec: FieldSpec) {
        let key = key.into();
        if let Some(slot) = self.fields.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = spec;
        } else {
            self.fields.push((key, spec));
        }
    }

    /// Returns the field with the given key.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find_map(|(k, spec)| (k == key).then_some(spec))
    }

    /// Iterates fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(k, spec)| (k.as_str(), spec))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for ConfigSchema {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, spec) in &self.fields {
            map.serialize_entry(key, spec)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ConfigSchema {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SchemaVisitor;

        impl<'de> Visitor<'de> for SchemaVisitor {
            type Value = ConfigSchema;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a map of field names to field descriptors")
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut schema = ConfigSchema::new();
                while let Some((key, spec)) = map.next_entry::<String, FieldSpec>()? {
                    schema.insert(key, spec);
                }
                Ok(schema)
            }
        }

        deserializer.deserialize_map(SchemaVisitor)
    }
}
