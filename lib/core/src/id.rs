//! Opaque identifier types for workflows, graph nodes and edges.
//!
//! Identifiers arrive from persisted data in whatever shape the store used,
//! so they are kept as strings. Fresh identifiers come from an
//! [`IdGenerator`], which is injected so tests can assert exact ids.

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Macro to generate a strongly-typed string ID wrapper.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an ID from any string-like value.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the ID, returning the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of a persisted workflow. Carried for caller bookkeeping only.
    WorkflowId
);

define_id!(
    /// Identifier of a node, unique within one graph.
    NodeId
);

define_id!(
    /// Identifier of an edge, unique within one graph.
    EdgeId
);

/// Source of fresh node and edge identifiers.
pub trait IdGenerator: Send {
    /// Returns an id for a newly placed node.
    fn next_node_id(&mut self) -> NodeId;

    /// Returns an id for a newly drawn edge.
    fn next_edge_id(&mut self) -> EdgeId;
}

/// Generates `node_<ULID>` and `edge_<ULID>` identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct UlidIdGenerator;

impl IdGenerator for UlidIdGenerator {
    fn next_node_id(&mut self) -> NodeId {
        NodeId(format!("node_{}", Ulid::new()))
    }

    fn next_edge_id(&mut self) -> EdgeId {
        EdgeId(format!("edge_{}", Ulid::new()))
    }
}

/// Generates `node_1`, `node_2`, ... and `edge_1`, `edge_2`, ...
///
/// Node and edge counters are independent.
#[derive(Debug, Clone, Default)]
pub struct SequentialIdGenerator {
    nodes: u64,
    edges: u64,
}

impl SequentialIdGenerator {
    /// Creates a generator whose first ids end in `1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_node_id(&mut self) -> NodeId {
        self.nodes += 1;
        NodeId(format!("node_{}", self.nodes))
    }

    fn next_edge_id(&mut self) -> EdgeId {
        self.edges += 1;
        EdgeId(format!("edge_{}", self.edges))
    }
}
