//! Settings file for detection parameters and editor session defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::detection::DetectionParameters;
use crate::editor::EditorSettings;
use crate::error::{NotchError, Result};

/// Settings loaded from `.toml` or `.json`; missing fields use defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotchConfig {
    pub detection: DetectionParameters,
    pub editor: EditorSettings,
}

impl NotchConfig {
    pub fn validate(&self) -> Result<()> {
        self.detection.validate()?;

        let editor = &self.editor;
        if !(editor.default_radius.is_finite() && editor.default_radius >= 1.0) {
            return Err(NotchError::InvalidParameter {
                name: "default_radius",
                reason: format!("must be at least 1, got {}", editor.default_radius),
            });
        }
        if !(editor.hit_slack.is_finite() && editor.hit_slack >= 0.0) {
            return Err(NotchError::InvalidParameter {
                name: "hit_slack",
                reason: format!("must be non-negative, got {}", editor.hit_slack),
            });
        }
        Ok(())
    }

    /// Loads and validates a settings file; the format follows the extension.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config: NotchConfig = common::serde::load_file(path)?;
        config.validate()?;
        tracing::debug!("Loaded notch config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        common::serde::save_file(self, path)
    }
}
