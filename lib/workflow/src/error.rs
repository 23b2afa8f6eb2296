//! Error types for the workflow crate.
//!
//! - `GraphError`: node and edge bookkeeping in [`EditorGraph`](crate::EditorGraph)
//! - `SchemaError`: converting form input into configuration values
//!
//! These carry only what the workflow layer knows. Editor-level context is
//! added by the caller.

use flowdeck_core::{EdgeId, NodeId};
use std::fmt;

/// Errors from graph operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Node with the given ID was not found in the graph.
    NodeNotFound { node_id: NodeId },
    /// Edge with the given ID was not found in the graph.
    EdgeNotFound { edge_id: EdgeId },
    /// A node with this ID is already present.
    DuplicateNode { node_id: NodeId },
    /// An edge with this ID is already present.
    DuplicateEdge { edge_id: EdgeId },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeNotFound { node_id } => write!(f, "node not found: {node_id}"),
            Self::EdgeNotFound { edge_id } => write!(f, "edge not found: {edge_id}"),
            Self::DuplicateNode { node_id } => write!(f, "node already exists: {node_id}"),
            Self::DuplicateEdge { edge_id } => write!(f, "edge already exists: {edge_id}"),
        }
    }
}

impl std::error::Error for GraphError {}

/// Errors from converting form input into a configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The input came from a control that does not match the field kind.
    InputMismatch {
        expected: String,
        received: &'static str,
    },
    /// A select input named a value that is not among the field's options.
    UnknownOption { value: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputMismatch { expected, received } => {
                write!(f, "{received} input does not fit a {expected} field")
            }
            Self::UnknownOption { value } => write!(f, "'{value}' is not one of the options"),
        }
    }
}

impl std::error::Error for SchemaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_error_display() {
        let err = GraphError::NodeNotFound {
            node_id: NodeId::from("node_9"),
        };
        assert_eq!(err.to_string(), "node not found: node_9");
    }

    #[test]
    fn duplicate_node_display() {
        let err = GraphError::DuplicateNode {
            node_id: NodeId::from("n1"),
        };
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn schema_error_display() {
        let err = SchemaError::InputMismatch {
            expected: "number".to_string(),
            received: "toggle",
        };
        assert_eq!(err.to_string(), "toggle input does not fit a number field");
    }
}
