//! Headless workflow graph editor.
//!
//! The editor is driven by [`EditorCommand`]s fed to a single reducer,
//! [`EditorController::handle`]. The host renders from the controller's
//! read accessors and carries out the returned [`EditorEffect`]s; nothing
//! here does I/O.
//!
//! ```text
//!   host ──EditorCommand──> EditorController ──EditorEffect──> host
//!                             │        ^
//!                  PanelCommand        PanelEvent::ConfigCommitted
//!                             v        │
//!                            ConfigPanel
//! ```

pub mod controller;
pub mod error;
pub mod notification;
pub mod palette;
pub mod panel;
pub mod presentation;
pub mod settings;
pub mod viewport;

pub use controller::{EditorCommand, EditorController, EditorEffect, EditorHost, EditorInput};
pub use error::{EditorError, PanelError, SettingsError};
pub use notification::{Level, Notification};
pub use palette::{Palette, PaletteEntry, PaletteGroup};
pub use panel::{
    ConfigPanel, Control, PanelCommand, PanelEvent, PanelState, RenderedField, render_field,
};
pub use presentation::{Icon, NodeStyle};
pub use settings::EditorSettings;
pub use viewport::{Bounds, Minimap, Viewport};
