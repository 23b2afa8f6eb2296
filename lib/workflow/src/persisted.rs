//! The flat persisted shape of a workflow.
//!
//! This is what the editor is loaded from and what it hands to the save
//! callback: a node list of `{id, type, name, category, config, position}`
//! plus a separate edge list.

use crate::catalog::NodeCategory;
use crate::edge::{BranchHandle, GraphEdge};
use crate::node::{GraphNode, Position};
use crate::schema::ConfigMap;
use flowdeck_core::{EdgeId, NodeId, WorkflowId};
use serde::{Deserialize, Serialize};

/// Horizontal position of nodes loaded without a stored position.
pub const STACK_X: f64 = 250.0;
/// Vertical distance between stacked nodes.
pub const STACK_SPACING: f64 = 120.0;
/// Vertical position of the first stacked node.
pub const STACK_TOP: f64 = 50.0;

/// Returns the position of the `index`-th node in the default vertical stack.
#[must_use]
pub fn stacked_position(index: usize) -> Position {
    Position::new(STACK_X, index as f64 * STACK_SPACING + STACK_TOP)
}

/// A node in its persisted form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedNode {
    pub id: NodeId,
    /// The node type slug.
    #[serde(rename = "type")]
    pub node_type: String,
    /// The display label.
    pub name: String,
    pub category: NodeCategory,
    #[serde(default)]
    pub config: ConfigMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// An edge in its persisted form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedEdge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EdgeId>,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<BranchHandle>,
}

impl From<&GraphEdge> for PersistedEdge {
    fn from(edge: &GraphEdge) -> Self {
        Self {
            id: Some(edge.id.clone()),
            source: edge.source.clone(),
            target: edge.target.clone(),
            source_handle: edge.source_handle,
        }
    }
}

/// Everything the save callback receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedWorkflow {
    /// Passed through from the editor input for the caller's bookkeeping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<WorkflowId>,
    pub name: String,
    pub nodes: Vec<PersistedNode>,
    #[serde(default)]
    pub edges: Vec<PersistedEdge>,
}

impl GraphNode {
    /// Builds a live node from its persisted form.
    ///
    /// A node without a stored position is placed at
    /// [`stacked_position`]`(index)`.
    #[must_use]
    pub fn from_persisted(persisted: PersistedNode, index: usize) -> Self {
        let position = persisted
            .position
            .unwrap_or_else(|| stacked_position(index));
        Self::new(
            persisted.id,
            persisted.category,
            persisted.node_type,
            persisted.name,
            position,
        )
        .with_config(persisted.config)
    }

    /// Returns the persisted form of this node.
    #[must_use]
    pub fn to_persisted(&self) -> PersistedNode {
        PersistedNode {
            id: self.id.clone(),
            node_type: self.node_type.clone(),
            name: self.label.clone(),
            category: self.category,
            config: self.config().clone(),
            position: Some(self.position),
        }
    }
}
