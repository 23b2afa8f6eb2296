//! Workflow graph model for the flowdeck editor.
//!
//! This crate provides the data the editor works on:
//!
//! - **Catalog**: the caller-supplied node types, grouped by category
//! - **Schemas**: configuration form fields as a typed sum of field kinds
//! - **Registry**: built-in schemas for catalog entries that carry none
//! - **Graph**: placed nodes and edges, backed by petgraph
//! - **Persisted shape**: the flat node/edge lists loaded from and saved to
//!   the host

pub mod catalog;
pub mod edge;
pub mod error;
pub mod graph;
pub mod node;
pub mod persisted;
pub mod registry;
pub mod schema;

pub use catalog::{CanvasKind, Catalog, NodeCategory, NodeTypeDefinition};
pub use edge::{BranchHandle, GraphEdge};
pub use error::{GraphError, SchemaError};
pub use graph::{EditorGraph, RemovedNode};
pub use node::{GraphNode, HandleLayout, OutputHandle, Position};
pub use persisted::{PersistedEdge, PersistedNode, SavedWorkflow, stacked_position};
pub use registry::{ResolvedSchema, SchemaRegistry, SchemaSource};
pub use schema::{ConfigMap, ConfigSchema, FieldInput, FieldKind, FieldSpec, SelectOption};
