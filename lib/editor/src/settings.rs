//! Editor settings.
//!
//! Loaded by the host alongside its own configuration. Every field has a
//! default, so an empty table is a valid configuration.

use crate::error::SettingsError;
use serde::Deserialize;

/// Tunables for canvas geometry and zoom.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EditorSettings {
    /// Rendered node width, used to center dropped nodes under the cursor.
    #[serde(default = "default_node_width")]
    pub node_width: f64,

    /// Rendered node height.
    #[serde(default = "default_node_height")]
    pub node_height: f64,

    /// Smallest zoom factor the viewport allows.
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f64,

    /// Largest zoom factor the viewport allows.
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,
}

fn default_node_width() -> f64 {
    160.0
}

fn default_node_height() -> f64 {
    60.0
}

fn default_min_zoom() -> f64 {
    0.5
}

fn default_max_zoom() -> f64 {
    2.0
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            node_width: default_node_width(),
            node_height: default_node_height(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
        }
    }
}

impl EditorSettings {
    /// Checks that node sizes are positive and the zoom range is a finite,
    /// non-empty range above zero.
    ///
    /// # Errors
    ///
    /// Returns the first setting that is out of range.
    pub fn validate(&self) -> Result<(), SettingsError> {
        positive("node_width", self.node_width)?;
        positive("node_height", self.node_height)?;
        positive("min_zoom", self.min_zoom)?;
        positive("max_zoom", self.max_zoom)?;
        if self.min_zoom > self.max_zoom {
            return Err(SettingsError {
                field: "min_zoom",
                reason: format!(
                    "{} is larger than max_zoom {}",
                    self.min_zoom, self.max_zoom
                ),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError {
            field,
            reason: format!("must be a positive number, got {value}"),
        })
    }
}
