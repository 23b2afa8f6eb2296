//! Placed graph nodes.
//!
//! A node is an instance of a catalog entry sitting on the canvas. It keeps
//! the category, type slug and label it was placed with, its own
//! configuration values, and a position.

use crate::catalog::{CanvasKind, NodeCategory, NodeTypeDefinition};
use crate::edge::BranchHandle;
use crate::schema::ConfigMap;
use flowdeck_core::NodeId;
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// A point in flow coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this position moved by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Add for Position {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.offset(rhs.x, rhs.y)
    }
}

/// The connection points a node exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleLayout {
    /// Whether the node accepts incoming edges.
    pub input: bool,
    /// The outgoing connection points.
    pub outputs: &'static [OutputHandle],
}

/// One outgoing connection point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputHandle {
    /// The single unlabeled output.
    Default,
    /// A labeled branch output of a logic node.
    Branch(BranchHandle),
}

const SINGLE_OUTPUT: &[OutputHandle] = &[OutputHandle::Default];
const BRANCH_OUTPUTS: &[OutputHandle] = &[
    OutputHandle::Branch(BranchHandle::Yes),
    OutputHandle::Branch(BranchHandle::No),
];

impl HandleLayout {
    /// Returns the layout for a canvas kind.
    #[must_use]
    pub const fn for_kind(kind: CanvasKind) -> Self {
        match kind {
            CanvasKind::Trigger => Self {
                input: false,
                outputs: SINGLE_OUTPUT,
            },
            CanvasKind::Logic => Self {
                input: true,
                outputs: BRANCH_OUTPUTS,
            },
            CanvasKind::Ai | CanvasKind::Action => Self {
                input: true,
                outputs: SINGLE_OUTPUT,
            },
        }
    }
}

/// A node placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    /// Unique within the graph.
    pub id: NodeId,
    /// Copied from the catalog entry at placement time.
    pub category: NodeCategory,
    /// The originating slug, kept for schema lookup and icon selection.
    pub node_type: String,
    /// Display name, copied from the catalog entry at placement time.
    pub label: String,
    pub description: Option<String>,
    pub position: Position,
    config: ConfigMap,
}

impl GraphNode {
    /// Creates an unconfigured node.
    #[must_use]
    pub fn new(
        id: NodeId,
        category: NodeCategory,
        node_type: impl Into<String>,
        label: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            id,
            category,
            node_type: node_type.into(),
            label: label.into(),
            description: None,
            position,
            config: ConfigMap::new(),
        }
    }

    /// Creates an unconfigured node from a catalog entry.
    #[must_use]
    pub fn from_definition(id: NodeId, definition: &NodeTypeDefinition, position: Position) -> Self {
        Self {
            description: definition.description.clone(),
            ..Self::new(
                id,
                definition.category,
                definition.slug.clone(),
                definition.name.clone(),
                position,
            )
        }
    }

    /// Sets the initial configuration.
    #[must_use]
    pub fn with_config(mut self, config: ConfigMap) -> Self {
        self.config = config;
        self
    }

    /// Returns the committed configuration.
    #[must_use]
    pub fn config(&self) -> &ConfigMap {
        &self.config
    }

    /// Replaces the committed configuration.
    pub fn set_config(&mut self, config: ConfigMap) {
        self.config = config;
    }

    /// Whether the node carries any configuration. Drives the indicator dot only.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.config.is_empty()
    }

    /// Returns how the node is drawn on the canvas.
    #[must_use]
    pub fn canvas_kind(&self) -> CanvasKind {
        self.category.canvas_kind()
    }

    /// Returns the node's connection points.
    #[must_use]
    pub fn handles(&self) -> HandleLayout {
        HandleLayout::for_kind(self.canvas_kind())
    }

    /// Returns a copy of this node under a new id, moved by `(dx, dy)`.
    #[must_use]
    pub fn duplicate(&self, id: NodeId, dx: f64, dy: f64) -> Self {
        Self {
            id,
            position: self.position.offset(dx, dy),
            ..self.clone()
        }
    }
}
