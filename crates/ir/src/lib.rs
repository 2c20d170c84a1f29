//! # Shelfmap IR
//!
//! The layout model behind the Shelfmap editor and store map.
//!
//! ## Core Concepts
//!
//! - **Product**: a store record with an optional aisle cell (row, column)
//! - **Aisle**: a named rectangle of grid cells with a category tag
//! - **Grid**: the rows x columns coordinate space, mapped to pixels by `GridMetrics`
//! - **StoreLayout**: grid, door, aisles and products, with the editing operations
//! - **EditorSession**: staged pointer gestures, committed edits and undo/redo
//! - **ProductStore**: the async backend the layout is loaded from and saved to
//!

// Module declarations
pub mod aisle;
pub mod csv_io;
pub mod directions;
pub mod grid;
pub mod history;
pub mod interaction;
pub mod layout;
pub mod persistence;
pub mod product;
pub mod search;
pub mod serialization;
pub mod session;
pub mod settings;
pub mod store;

// Re-export commonly used types at crate root
pub use aisle::{Aisle, DEFAULT_AISLE_TAG};
pub use csv_io::{CSV_HEADERS, export_products_csv, import_products, parse_products_csv};
pub use directions::{Turn, directions, route_path};
pub use grid::{Grid, GridBounds, GridMetrics, MAX_MAP_DIMENSION};
pub use history::{History, HistorySnapshot};
pub use interaction::{Gesture, InteractionController, LayoutEdit};
pub use layout::{StoreLayout, default_aisles, derive_aisles};
pub use persistence::{build_patches, load_from_store, save_to_store};
pub use product::{LayoutMetadata, NewProduct, Product, ProductPatch};
pub use search::{
    SEARCH_RESULT_LIMIT, available_tags, filter_by_tags, search_products, toggle_tag,
};
pub use serialization::{LayoutFile, load_layout, save_layout};
pub use session::{AisleDraft, EditorSession};
pub use settings::Settings;
pub use store::{BatchReport, JsonFileStore, MemoryStore, ProductStore};

// Re-export core types that are commonly used with IR
pub use shelfmap_core::{
    AisleId, Category, GridCell, LayoutError, LayoutResult, Position, ProductId, Rect, Size,
    Validatable,
};

/// Current schema version for layout files
pub const SCHEMA_VERSION: u32 = 1;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_version() {
        assert_eq!(SCHEMA_VERSION, 1);
    }
}
