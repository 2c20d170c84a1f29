//! Core types used throughout Shelfmap
//!
//! This module contains the identifiers, pixel geometry primitives, grid
//! cells and category tags shared by the layout model, the renderer and
//! the editor front-ends.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Unique Identifiers
// ============================================================================

/// Type alias for product identifiers
pub type ProductId = uuid::Uuid;

/// Type alias for aisle identifiers
pub type AisleId = uuid::Uuid;

// ============================================================================
// Geometry Types
// ============================================================================

/// Position on the 2D canvas, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Create a new position
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create a position at the origin (0, 0)
    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Add an offset to this position
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// Size of a region on the canvas, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub position: Position,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(position: Position, size: Size) -> Self {
        Self { position, size }
    }

    /// Create a rectangle from coordinates and dimensions
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Position::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Check if a point is contained within this rectangle (edges inclusive)
    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.position.x
            && point.x <= self.position.x + self.size.width
            && point.y >= self.position.y
            && point.y <= self.position.y + self.size.height
    }

    /// Get the center point of the rectangle
    pub fn center(&self) -> Position {
        Position {
            x: self.position.x + self.size.width / 2.0,
            y: self.position.y + self.size.height / 2.0,
        }
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.height
    }
}

// ============================================================================
// Grid Cells
// ============================================================================

/// A 1-based (row, column) coordinate on the store grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub row: u32,
    pub column: u32,
}

impl GridCell {
    /// Create a new grid cell
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Build a cell from nullable row/column values.
    ///
    /// Zero and missing values both mean "not on the grid".
    pub fn from_parts(row: Option<u32>, column: Option<u32>) -> Option<Self> {
        match (row, column) {
            (Some(row), Some(column)) if row > 0 && column > 0 => Some(Self { row, column }),
            _ => None,
        }
    }

    /// Translate by a signed delta, saturating at cell 1
    pub fn translate(&self, d_row: i64, d_column: i64) -> Self {
        Self {
            row: (self.row as i64 + d_row).max(1) as u32,
            column: (self.column as i64 + d_column).max(1) as u32,
        }
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}, column {}", self.row, self.column)
    }
}

// ============================================================================
// Categories
// ============================================================================

/// The six built-in category tags.
///
/// Tags are free-form strings on products and aisles; these are the ones the
/// editor offers and the legend shows, each with a fixed color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Grocery,
    Electronics,
    Clothing,
    Home,
    Office,
    Toys,
}

impl Category {
    /// Get all categories in legend order
    pub fn all() -> &'static [Category] {
        &[
            Category::Grocery,
            Category::Electronics,
            Category::Clothing,
            Category::Home,
            Category::Office,
            Category::Toys,
        ]
    }

    /// The tag string stored on records
    pub fn as_tag(&self) -> &'static str {
        match self {
            Category::Grocery => "grocery",
            Category::Electronics => "electronics",
            Category::Clothing => "clothing",
            Category::Home => "home",
            Category::Office => "office",
            Category::Toys => "toys",
        }
    }

    /// Get the display name for this category
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Grocery => "Grocery",
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Home => "Home",
            Category::Office => "Office",
            Category::Toys => "Toys",
        }
    }

    /// Match a tag string against the built-in categories, ignoring case
    pub fn from_tag(tag: &str) -> Option<Self> {
        let lower = tag.trim().to_lowercase();
        Self::all().iter().copied().find(|c| c.as_tag() == lower)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
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
    fn test_rect_contains_edges() {
        let rect = Rect::from_xywh(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(Position::new(10.0, 10.0)));
        assert!(rect.contains(Position::new(30.0, 30.0)));
        assert!(!rect.contains(Position::new(30.1, 15.0)));
        assert_eq!(rect.center(), Position::new(20.0, 20.0));
    }

    #[test]
    fn test_grid_cell_from_parts() {
        assert_eq!(GridCell::from_parts(Some(2), Some(3)), Some(GridCell::new(2, 3)));
        assert_eq!(GridCell::from_parts(Some(0), Some(3)), None);
        assert_eq!(GridCell::from_parts(None, Some(3)), None);
        assert_eq!(GridCell::from_parts(Some(4), None), None);
    }

    #[test]
    fn test_grid_cell_translate_saturates() {
        let cell = GridCell::new(2, 2);
        assert_eq!(cell.translate(1, 3), GridCell::new(3, 5));
        assert_eq!(cell.translate(-5, -5), GridCell::new(1, 1));
    }

    #[test]
    fn test_category_from_tag_ignores_case() {
        assert_eq!(Category::from_tag("Grocery"), Some(Category::Grocery));
        assert_eq!(Category::from_tag("grocery"), Some(Category::Grocery));
        assert_eq!(Category::from_tag(" TOYS "), Some(Category::Toys));
        assert_eq!(Category::from_tag("garden"), None);
    }

    #[test]
    fn test_category_serde_uses_tag() {
        let json = serde_json::to_string(&Category::Electronics).unwrap();
        assert_eq!(json, "\"electronics\"");
        let back: Category = serde_json::from_str("\"office\"").unwrap();
        assert_eq!(back, Category::Office);
    }
}
