//! Application settings
//!
//! Settings are read from a TOML file. Every section and key is optional;
//! missing values fall back to the defaults below.
//!
//! ```toml
//! [canvas]
//! max_cell_width = 80.0
//! max_cell_height = 60.0
//!
//! [grid]
//! min = 4
//! max = 20
//! default_rows = 8
//! default_columns = 10
//!
//! [history]
//! depth = 50
//!
//! [render]
//! font_path = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"
//!
//! [storage]
//! products_path = "products.json"
//! layout_path = "store.shelfmap"
//! ```

use crate::grid::GridBounds;
use crate::history::DEFAULT_HISTORY_DEPTH;
use serde::{Deserialize, Serialize};
use shelfmap_core::{LayoutError, LayoutResult, Size, Validatable};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default settings file name
pub const SETTINGS_FILE_NAME: &str = "shelfmap.toml";

// ============================================================================
// Sections
// ============================================================================

/// Canvas cell size caps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub max_cell_width: f32,
    pub max_cell_height: f32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            max_cell_width: crate::grid::MAX_CELL_WIDTH,
            max_cell_height: crate::grid::MAX_CELL_HEIGHT,
        }
    }
}

impl CanvasSettings {
    pub fn caps(&self) -> Size {
        Size::new(self.max_cell_width, self.max_cell_height)
    }
}

/// Undo log settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    pub depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            depth: DEFAULT_HISTORY_DEPTH,
        }
    }
}

/// Raster output settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// TrueType/OpenType font used for labels in PNG output
    pub font_path: Option<PathBuf>,
}

/// File locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// JSON product store
    pub products_path: PathBuf,
    /// Saved layout file
    pub layout_path: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            products_path: PathBuf::from("products.json"),
            layout_path: PathBuf::from("store.shelfmap"),
        }
    }
}

// ============================================================================
// Settings
// ============================================================================

/// All application settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub canvas: CanvasSettings,
    pub grid: GridBounds,
    pub history: HistorySettings,
    pub render: RenderSettings,
    pub storage: StorageSettings,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> LayoutResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LayoutError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| LayoutError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let settings = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "Settings loaded");
        Ok(settings)
    }

    /// Load from an explicit path, or fall back to `shelfmap.toml` in the
    /// working directory, or to the defaults.
    pub fn load_or_default(path: Option<&Path>) -> LayoutResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let local = Path::new(SETTINGS_FILE_NAME);
                if local.exists() {
                    Self::load(local)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse and validate settings from TOML text
    pub fn from_toml_str(content: &str) -> LayoutResult<Self> {
        let settings: Self = toml::from_str(content)
            .map_err(|e| LayoutError::InvalidConfig(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to TOML text
    pub fn to_toml_string(&self) -> LayoutResult<String> {
        toml::to_string_pretty(self).map_err(|e| LayoutError::InvalidConfig(e.to_string()))
    }
}

impl Validatable for Settings {
    fn validate(&self) -> LayoutResult<()> {
        if self.canvas.max_cell_width <= 0.0 || self.canvas.max_cell_height <= 0.0 {
            return Err(LayoutError::InvalidConfig(
                "canvas cell caps must be positive".to_string(),
            ));
        }
        self.grid.validate()?;
        if self.history.depth == 0 {
            return Err(LayoutError::InvalidConfig(
                "history.depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.canvas.caps(), Size::new(80.0, 60.0));
        assert_eq!(settings.grid.min, 4);
        assert_eq!(settings.grid.max, 20);
        assert_eq!(settings.history.depth, 50);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let settings = Settings::from_toml_str(
            r#"
            [grid]
            default_rows = 12

            [render]
            font_path = "fonts/label.ttf"
            "#,
        )
        .unwrap();
        assert_eq!(settings.grid.default_rows, 12);
        assert_eq!(settings.grid.default_columns, 10);
        assert_eq!(settings.render.font_path, Some(PathBuf::from("fonts/label.ttf")));
    }

    #[test]
    fn test_invalid_toml() {
        let err = Settings::from_toml_str("[history]\ndepth = 0\n").unwrap_err();
        assert!(matches!(err, LayoutError::InvalidConfig(_)));
        assert!(Settings::from_toml_str("grid = 3").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shelfmap.toml");
        let mut settings = Settings::default();
        settings.history.depth = 10;
        std::fs::write(&path, settings.to_toml_string().unwrap()).unwrap();

        assert_eq!(Settings::load(&path).unwrap(), settings);
        assert!(Settings::load(dir.path().join("missing.toml")).unwrap_err().is_not_found());
    }
}
