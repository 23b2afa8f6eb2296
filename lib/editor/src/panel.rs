//! The node configuration panel.
//!
//! The panel edits exactly one node's configuration. Edits go to a local
//! buffer; the node itself only changes when the panel is saved, at which
//! point the panel emits [`PanelEvent::ConfigCommitted`] for the controller
//! to apply.
//!
//! ```text
//!   open ──> Clean ──set_field──> Dirty ──commit──> Clean
//!              ^                    │
//!              └──────discard───────┘
//! ```

use crate::error::PanelError;
use flowdeck_core::NodeId;
use flowdeck_workflow::{
    ConfigMap, ConfigSchema, FieldInput, FieldKind, FieldSpec, GraphNode, ResolvedSchema,
    SchemaSource, SelectOption,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Whether the panel holds uncommitted edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Clean,
    Dirty,
}

/// Commands addressed to the open panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PanelCommand {
    /// Change one field in the edit buffer.
    SetField { key: String, input: FieldInput },
    /// Commit the edit buffer to the node.
    Save,
    /// Drop uncommitted edits.
    Discard,
    /// Close the panel and clear the selection.
    Close,
}

/// Emitted by the panel for the controller to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    ConfigCommitted { node_id: NodeId, config: ConfigMap },
}

/// The control a field renders as, with its current value.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    TextInput { value: String },
    TextArea { value: String },
    /// `None` when the stored value is not a number.
    NumberInput { value: Option<f64> },
    Toggle { on: bool },
    /// `selected` is shown as stored, even if it is not among the options.
    Dropdown {
        options: Vec<SelectOption>,
        selected: Option<String>,
    },
}

/// A field ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedField {
    pub key: String,
    pub label: String,
    pub description: Option<String>,
    pub placeholder: Option<String>,
    /// Draw the required marker. Not enforced.
    pub required: bool,
    pub control: Control,
}

/// Builds the control for one field.
///
/// `value` is the stored value. When absent, the field's default is shown;
/// toggles with neither read as off.
#[must_use]
pub fn render_field(key: &str, spec: &FieldSpec, value: Option<&JsonValue>) -> RenderedField {
    let value = value
        .filter(|v| !v.is_null() || matches!(spec.kind, FieldKind::Number))
        .or(spec.default.as_ref());

    let control = match &spec.kind {
        FieldKind::String | FieldKind::Unrecognized(_) => Control::TextInput {
            value: display_text(value),
        },
        FieldKind::Text => Control::TextArea {
            value: display_text(value),
        },
        FieldKind::Number => Control::NumberInput {
            value: value.and_then(JsonValue::as_f64),
        },
        FieldKind::Boolean => Control::Toggle {
            on: value.and_then(JsonValue::as_bool).unwrap_or(false),
        },
        FieldKind::Select { options } => Control::Dropdown {
            options: options.clone(),
            selected: value.and_then(|v| match v {
                JsonValue::Null => None,
                JsonValue::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            }),
        },
    };

    RenderedField {
        key: key.to_string(),
        label: spec.display_label(key).to_string(),
        description: spec.description.clone(),
        placeholder: spec.placeholder.clone(),
        required: spec.required,
        control,
    }
}

fn display_text(value: Option<&JsonValue>) -> String {
    match value {
        None | Some(JsonValue::Null) => String::new(),
        Some(JsonValue::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Editing state for one selected node.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigPanel {
    node_id: NodeId,
    title: String,
    description: Option<String>,
    source: SchemaSource,
    schema: ConfigSchema,
    committed: ConfigMap,
    buffer: ConfigMap,
    has_changes: bool,
}

impl ConfigPanel {
    /// Opens the panel for a node, Clean, with the buffer holding the node's
    /// current configuration.
    #[must_use]
    pub fn open(node: &GraphNode, resolved: ResolvedSchema) -> Self {
        Self {
            node_id: node.id.clone(),
            title: node.label.clone(),
            description: node.description.clone(),
            source: resolved.source,
            schema: resolved.schema,
            committed: node.config().clone(),
            buffer: node.config().clone(),
            has_changes: false,
        }
    }

    #[must_use]
    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn schema(&self) -> &ConfigSchema {
        &self.schema
    }

    /// Where the panel's schema came from.
    #[must_use]
    pub fn schema_source(&self) -> SchemaSource {
        self.source
    }

    /// True when the node has nothing to configure; the panel then shows a
    /// "no configuration required" message instead of a form.
    #[must_use]
    pub fn is_empty_schema(&self) -> bool {
        self.schema.is_empty()
    }

    #[must_use]
    pub fn state(&self) -> PanelState {
        if self.has_changes {
            PanelState::Dirty
        } else {
            PanelState::Clean
        }
    }

    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    /// The uncommitted edit buffer.
    #[must_use]
    pub fn buffer(&self) -> &ConfigMap {
        &self.buffer
    }

    /// Applies one field edit to the buffer. The node is not touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema has no such field or the input does
    /// not fit the field kind.
    pub fn set_field(&mut self, key: &str, input: FieldInput) -> Result<(), PanelError> {
        let spec = self
            .schema
            .field(key)
            .ok_or_else(|| PanelError::UnknownField {
                key: key.to_string(),
            })?;

        if input == FieldInput::Clear {
            self.buffer.remove(key);
        } else {
            let value = spec
                .kind
                .coerce(&input)
                .map_err(|source| PanelError::InvalidInput {
                    key: key.to_string(),
                    source,
                })?;
            self.buffer.insert(key.to_string(), value);
        }
        self.has_changes = true;
        Ok(())
    }

    /// Commits the buffer. The panel stays open on the same node, Clean.
    pub fn commit(&mut self) -> PanelEvent {
        self.committed = self.buffer.clone();
        self.has_changes = false;
        PanelEvent::ConfigCommitted {
            node_id: self.node_id.clone(),
            config: self.committed.clone(),
        }
    }

    /// Drops uncommitted edits.
    pub fn discard(&mut self) {
        self.buffer = self.committed.clone();
        self.has_changes = false;
    }

    /// Renders every field from the buffer.
    #[must_use]
    pub fn fields(&self) -> Vec<RenderedField> {
        self.schema
            .fields()
            .map(|(key, spec)| render_field(key, spec, self.buffer.get(key)))
            .collect()
    }

    /// Required fields with no value in the buffer. Informational only;
    /// saving is never blocked on these.
    #[must_use]
    pub fn missing_required(&self) -> Vec<&str> {
        self.schema
            .fields()
            .filter(|(_, spec)| spec.required)
            .filter(|(key, _)| match self.buffer.get(*key) {
                None | Some(JsonValue::Null) => true,
                Some(JsonValue::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            })
            .map(|(key, _)| key)
            .collect()
    }
}
