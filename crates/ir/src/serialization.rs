//! Layout files
//!
//! A layout file stores the aisles as first-class records (with their ids
//! and sizes) together with the grid, the door and the products, so a saved
//! layout reloads exactly instead of being re-derived from product cells.

use crate::SCHEMA_VERSION;
use crate::layout::StoreLayout;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shelfmap_core::{LayoutError, LayoutResult, Validatable};
use std::path::{Path, PathBuf};
use tracing::info;

/// File extension for Shelfmap layout files
pub const LAYOUT_EXTENSION: &str = "shelfmap";

// ============================================================================
// Layout File Wrapper
// ============================================================================

/// Wrapper for layout files that includes version information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutFile {
    /// Schema version for migration purposes
    pub schema_version: u32,

    /// When the file was written
    pub saved_at: DateTime<Utc>,

    /// The layout data
    pub layout: StoreLayout,
}

impl LayoutFile {
    /// Wrap a layout for saving
    pub fn new(layout: StoreLayout) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            saved_at: Utc::now(),
            layout,
        }
    }

    /// Check if migration is needed
    pub fn needs_migration(&self) -> bool {
        self.schema_version < SCHEMA_VERSION
    }

    /// Migrate to the latest schema version
    pub fn migrate(&mut self) -> LayoutResult<()> {
        if self.schema_version > SCHEMA_VERSION {
            return Err(LayoutError::SchemaVersionMismatch {
                expected: SCHEMA_VERSION,
                found: self.schema_version,
            });
        }
        while self.schema_version < SCHEMA_VERSION {
            self.migrate_one_version()?;
        }
        Ok(())
    }

    fn migrate_one_version(&mut self) -> LayoutResult<()> {
        match self.schema_version {
            // Version 0 files predate the schema field; the data is identical.
            0 => self.schema_version = 1,
            found => {
                return Err(LayoutError::SchemaVersionMismatch {
                    expected: SCHEMA_VERSION,
                    found,
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// Save Functions
// ============================================================================

/// Save a layout to a file
///
/// # Example
///
/// ```rust,ignore
/// use shelfmap_ir::{StoreLayout, save_layout};
///
/// let layout = StoreLayout::default();
/// save_layout(&layout, "store.shelfmap").unwrap();
/// ```
pub fn save_layout(layout: &StoreLayout, path: impl AsRef<Path>) -> LayoutResult<()> {
    let path = path.as_ref();
    let json = save_layout_to_string(layout).map_err(|e| LayoutError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| LayoutError::FileWrite {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
    }

    std::fs::write(path, json).map_err(|e| LayoutError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    info!(path = %path.display(), aisles = layout.aisles().len(), "Layout file saved");
    Ok(())
}

/// Save a layout to a JSON string
pub fn save_layout_to_string(layout: &StoreLayout) -> LayoutResult<String> {
    let file = LayoutFile::new(layout.clone());
    Ok(serde_json::to_string_pretty(&file)?)
}

// ============================================================================
// Load Functions
// ============================================================================

/// Load a layout from a file
pub fn load_layout(path: impl AsRef<Path>) -> LayoutResult<StoreLayout> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LayoutError::FileNotFound(path.to_path_buf()));
    }

    let json = std::fs::read_to_string(path).map_err(|e| LayoutError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    load_layout_from_string(&json).map_err(|e| match e {
        LayoutError::JsonSerialization(je) => LayoutError::FileRead {
            path: path.to_path_buf(),
            message: format!("Invalid layout file format: {}", je),
        },
        other => other,
    })
}

/// Load a layout from a JSON string
pub fn load_layout_from_string(json: &str) -> LayoutResult<StoreLayout> {
    let mut file: LayoutFile = serde_json::from_str(json)?;
    if file.needs_migration() || file.schema_version > SCHEMA_VERSION {
        file.migrate()?;
    }
    file.layout
        .validate()
        .map_err(|e| LayoutError::InvalidLayoutFormat(e.to_string()))?;
    Ok(file.layout)
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Ensure a path has the layout extension
pub fn ensure_extension(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.extension().is_none_or(|e| e != LAYOUT_EXTENSION) {
        let mut new_path = path.to_path_buf();
        new_path.set_extension(LAYOUT_EXTENSION);
        new_path
    } else {
        path.to_path_buf()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aisle::Aisle;
    use crate::grid::Grid;
    use crate::product::Product;
    use tempfile::tempdir;

    fn sample() -> StoreLayout {
        let aisle = Aisle::new("Snacks", "toys").at(3, 2).with_size(2, 1);
        let product = Product::new("Chips").at(2, 3).in_aisle(aisle.id, "Snacks");
        StoreLayout::from_parts(Grid::new(6, 8), 2, vec![aisle], vec![product])
    }

    #[test]
    fn test_save_and_load_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/store.shelfmap");
        let layout = sample();

        save_layout(&layout, &path).unwrap();
        let loaded = load_layout(&path).unwrap();

        assert_eq!(loaded, layout);
    }

    #[test]
    fn test_aisle_survives_without_members() {
        let mut layout = sample();
        let id = layout.aisles()[0].id;
        let pid = layout.products()[0].id;
        layout.unassign_product(pid).unwrap();

        let loaded = load_layout_from_string(&save_layout_to_string(&layout).unwrap()).unwrap();
        assert_eq!(loaded.aisle(id).map(|a| (a.width, a.height)), Some((2, 1)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_layout("/definitely/not/here.shelfmap").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.shelfmap");
        std::fs::write(&path, "not json").unwrap();
        assert!(load_layout(&path).unwrap_err().is_io());
    }

    #[test]
    fn test_future_schema_rejected() {
        let mut file = LayoutFile::new(sample());
        file.schema_version = SCHEMA_VERSION + 1;
        let json = serde_json::to_string(&file).unwrap();
        assert!(matches!(
            load_layout_from_string(&json),
            Err(LayoutError::SchemaVersionMismatch { .. })
        ));
    }

    #[test]
    fn test_migrates_version_zero() {
        let mut file = LayoutFile::new(sample());
        file.schema_version = 0;
        assert!(file.needs_migration());
        file.migrate().unwrap();
        assert_eq!(file.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_ensure_extension() {
        assert_eq!(ensure_extension("store"), PathBuf::from("store.shelfmap"));
        assert_eq!(ensure_extension("store.shelfmap"), PathBuf::from("store.shelfmap"));
    }
}
