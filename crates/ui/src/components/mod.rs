//! # UI Components
//!
//! Dioxus components of the Shelfmap desktop app.
//!
//! ## Component Hierarchy
//!
//! ```text
//! Editor page
//! ├── GridControls (rows, columns, door, add aisle)
//! ├── EditorCanvas (rendered SVG + pointer gestures)
//! └── AislePanel
//!     ├── AisleCard (drop target)
//!     └── ProductCard (draggable)
//!
//! Store map page
//! └── StoreMap (search, route, directions, legend, PNG export)
//!
//! Dialogs
//! ├── CreateAisleDialog
//! └── ConfirmDeleteDialog
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod aisle_panel;
pub mod dialogs;
pub mod editor_canvas;
pub mod store_map;

// ============================================================================
// Re-exports
// ============================================================================

pub use aisle_panel::AislePanel;
pub use dialogs::{ConfirmDeleteDialog, CreateAisleDialog};
pub use editor_canvas::{EditorCanvas, GridControls};
pub use store_map::StoreMap;
