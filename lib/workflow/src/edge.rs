//! Edges between graph nodes.
//!
//! An edge runs from a source node's output to a target node's input. Logic
//! nodes have two outputs, so edges leaving them name the branch they start
//! from.

use flowdeck_core::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The labeled outputs of a logic node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchHandle {
    Yes,
    No,
}

impl BranchHandle {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

impl fmt::Display for BranchHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    /// Which branch of a logic node the edge leaves from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<BranchHandle>,
    /// Drawn with the flowing-dash animation.
    #[serde(default)]
    pub animated: bool,
}

impl GraphEdge {
    /// Creates an animated edge, the way user-drawn connections appear.
    #[must_use]
    pub fn new(id: EdgeId, source: NodeId, target: NodeId) -> Self {
        Self {
            id,
            source,
            target,
            source_handle: None,
            animated: true,
        }
    }

    /// Sets the branch the edge leaves from.
    #[must_use]
    pub fn with_source_handle(mut self, handle: Option<BranchHandle>) -> Self {
        self.source_handle = handle;
        self
    }

    /// Whether either endpoint is the given node.
    #[must_use]
    pub fn touches(&self, node_id: &NodeId) -> bool {
        &self.source == node_id || &self.target == node_id
    }
}
