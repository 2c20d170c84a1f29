//! # Shelfmap UI
//!
//! Dioxus Desktop UI for Shelfmap.
//!
//! ## Features
//!
//! - Layout editor: drag aisles and the door on the grid, resize the grid
//! - Drag product cards onto aisles, unassign them, create and delete aisles
//! - Undo / redo of every committed edit
//! - Store map with product search, walking route and directions
//! - Product store load/save, layout files, CSV import/export, PNG export
//!

// ============================================================================
// Modules
// ============================================================================

pub mod app;
pub mod components;
pub mod file_ops;
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

pub use shelfmap_core;
pub use shelfmap_ir;
pub use shelfmap_render;

pub use app::App;
pub use file_ops::{
    export_csv, export_map_png, import_csv, load_products, open_layout, save_layout_file,
    save_products, show_open_dialog, show_save_dialog,
};
pub use state::{
    APP_STATE, AppState, DeleteTarget, Dialog, MapState, Page, StatusLevel, StatusMessage,
    UiState,
};

pub use components::{
    AislePanel, ConfirmDeleteDialog, CreateAisleDialog, EditorCanvas, GridControls, StoreMap,
};

// ============================================================================
// Constants
// ============================================================================

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = "Shelfmap";

/// Application display title
pub const TITLE: &str = "Shelfmap - Store Layout Editor";

/// CSS styles for the application
const STYLES: &str = include_str!("../../../assets/styles/main.css");

// ============================================================================
// Launch Function
// ============================================================================

/// Launch the Shelfmap desktop application
///
/// ```rust,ignore
/// fn main() {
///     shelfmap_ui::launch();
/// }
/// ```
pub fn launch() {
    tracing::info!("Starting {} v{}", NAME, VERSION);

    let custom_head = format!(r#"<style type="text/css">{}</style>"#, STYLES);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new()
                        .with_title(TITLE)
                        .with_resizable(true)
                        .with_inner_size(dioxus::desktop::LogicalSize::new(1400.0, 900.0))
                        .with_min_inner_size(dioxus::desktop::LogicalSize::new(800.0, 600.0)),
                )
                .with_menu(None)
                .with_custom_head(custom_head),
        )
        .launch(App);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_title() {
        assert!(TITLE.contains(NAME));
    }

    #[test]
    fn test_styles_loaded() {
        assert!(STYLES.contains(".editor-surface"));
    }
}
