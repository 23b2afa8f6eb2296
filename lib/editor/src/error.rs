//! Error types for the editor crate.
//!
//! - `PanelError`: edits the configuration panel cannot apply
//! - `EditorError`: commands the controller cannot apply
//! - `SettingsError`: editor settings that cannot be used
//!
//! Save preconditions are not errors. They surface as notifications.

use flowdeck_workflow::{GraphError, SchemaError};
use std::fmt;

/// Errors from configuration panel edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelError {
    /// The schema has no field with this key.
    UnknownField { key: String },
    /// The input could not be stored in this field.
    InvalidInput { key: String, source: SchemaError },
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField { key } => write!(f, "no field '{key}' in this form"),
            Self::InvalidInput { key, source } => {
                write!(f, "invalid input for field '{key}': {source}")
            }
        }
    }
}

impl std::error::Error for PanelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidInput { source, .. } => Some(source),
            Self::UnknownField { .. } => None,
        }
    }
}

/// An editor setting outside its allowed range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsError {
    pub field: &'static str,
    pub reason: String,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid editor setting '{}': {}", self.field, self.reason)
    }
}

impl std::error::Error for SettingsError {}

/// Errors from editor commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// A graph operation failed.
    Graph(GraphError),
    /// No catalog entry has this slug.
    UnknownNodeType { slug: String },
    /// A panel command arrived while no node was selected.
    PanelNotOpen,
    /// A panel edit failed.
    Panel(PanelError),
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Graph(err) => write!(f, "graph operation failed: {err}"),
            Self::UnknownNodeType { slug } => write!(f, "unknown node type '{slug}'"),
            Self::PanelNotOpen => write!(f, "no node is selected"),
            Self::Panel(err) => write!(f, "configuration edit failed: {err}"),
        }
    }
}

impl std::error::Error for EditorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Graph(err) => Some(err),
            Self::Panel(err) => Some(err),
            Self::UnknownNodeType { .. } | Self::PanelNotOpen => None,
        }
    }
}

impl From<GraphError> for EditorError {
    fn from(err: GraphError) -> Self {
        Self::Graph(err)
    }
}

impl From<PanelError> for EditorError {
    fn from(err: PanelError) -> Self {
        Self::Panel(err)
    }
}
