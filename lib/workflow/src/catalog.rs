//! Node-type catalog.
//!
//! The catalog is supplied by the caller and read-only to the editor. Each
//! entry describes a kind of node the user may place, and optionally the
//! schema of its configuration form.

use crate::schema::ConfigSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The category of a node type.
///
/// Categories drive palette grouping, canvas rendering and the connection
/// points a node exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    /// Entry points that start a workflow.
    Trigger,
    /// Steps that do something (send, create, post).
    Action,
    /// Branching, waiting and looping.
    Logic,
    /// Steps delegated to a hosted model.
    Ai,
    /// Third-party system calls.
    Integration,
    /// ERP audit steps.
    ErpAudit,
}

impl NodeCategory {
    /// Every category, in palette order.
    pub const ALL: [Self; 6] = [
        Self::Trigger,
        Self::Action,
        Self::Logic,
        Self::Ai,
        Self::Integration,
        Self::ErpAudit,
    ];

    /// Returns the wire name of this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trigger => "trigger",
            Self::Action => "action",
            Self::Logic => "logic",
            Self::Ai => "ai",
            Self::Integration => "integration",
            Self::ErpAudit => "erp_audit",
        }
    }

    /// Returns how nodes of this category are drawn on the canvas.
    #[must_use]
    pub const fn canvas_kind(self) -> CanvasKind {
        match self {
            Self::Trigger => CanvasKind::Trigger,
            Self::Logic => CanvasKind::Logic,
            Self::Ai => CanvasKind::Ai,
            Self::Action | Self::Integration | Self::ErpAudit => CanvasKind::Action,
        }
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a category name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown node category '{}'", self.input)
    }
}

impl std::error::Error for ParseCategoryError {}

impl FromStr for NodeCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseCategoryError {
                input: s.to_string(),
            })
    }
}

/// Canvas-level rendering kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanvasKind {
    Trigger,
    Logic,
    Ai,
    Action,
}

impl CanvasKind {
    /// Returns the wire name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trigger => "trigger",
            Self::Logic => "logic",
            Self::Ai => "ai",
            Self::Action => "action",
        }
    }
}

/// A catalog entry describing a placeable kind of node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTypeDefinition {
    /// Opaque unique identifier.
    pub id: String,
    /// Stable machine name, e.g. `action_email`.
    pub slug: String,
    /// Display label.
    pub name: String,
    pub category: NodeCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Form schema for the node's configuration. When absent the editor
    /// falls back to its built-in schemas.
    #[serde(default, alias = "config_schema", skip_serializing_if = "Option::is_none")]
    pub config_schema: Option<ConfigSchema>,
}

impl NodeTypeDefinition {
    /// Creates a definition with no description and no schema.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        slug: impl Into<String>,
        name: impl Into<String>,
        category: NodeCategory,
    ) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            name: name.into(),
            category,
            description: None,
            config_schema: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the configuration schema.
    #[must_use]
    pub fn with_schema(mut self, schema: ConfigSchema) -> Self {
        self.config_schema = Some(schema);
        self
    }
}

/// The ordered set of node types offered to the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    definitions: Vec<NodeTypeDefinition>,
}

impl Catalog {
    /// Creates a catalog, keeping the given order.
    #[must_use]
    pub fn new(definitions: Vec<NodeTypeDefinition>) -> Self {
        Self { definitions }
    }

    /// Returns the definitions in catalog order.
    #[must_use]
    pub fn definitions(&self) -> &[NodeTypeDefinition] {
        &self.definitions
    }

    /// Returns the first definition with the given slug.
    #[must_use]
    pub fn find_by_slug(&self, slug: &str) -> Option<&NodeTypeDefinition> {
        self.definitions.iter().find(|def| def.slug == slug)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl From<Vec<NodeTypeDefinition>> for Catalog {
    fn from(definitions: Vec<NodeTypeDefinition>) -> Self {
        Self::new(definitions)
    }
}
