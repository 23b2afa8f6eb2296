//! Core identifiers and shared utilities for flowdeck.
//!
//! This crate provides the opaque identifier types used by the workflow
//! editor, the injectable id generator, and the `Result` alias the binary
//! layer uses for error propagation.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{
    EdgeId, IdGenerator, NodeId, SequentialIdGenerator, UlidIdGenerator, WorkflowId,
};
