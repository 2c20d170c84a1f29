//! # Shelfmap Core
//!
//! Core types, traits, and error handling for Shelfmap.
//!
//! This crate provides the foundational building blocks used throughout
//! the workspace, including:
//!
//! - **Types**: identifiers, pixel geometry (Position, Size, Rect), grid cells, categories
//! - **Traits**: `Validatable`
//! - **Errors**: Unified error handling with `LayoutError` and `LayoutResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{LayoutError, LayoutResult, ResultExt};
pub use traits::Validatable;
pub use types::{AisleId, Category, GridCell, Position, ProductId, Rect, Size};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
