//! Aisle definitions
//!
//! An aisle is a named rectangle of grid cells with a category tag. Its
//! position is the 1-based top-left cell; width and height count cells.

use shelfmap_core::{AisleId, Category, GridCell, LayoutError, LayoutResult, Validatable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tag used when an aisle is created without one
pub const DEFAULT_AISLE_TAG: &str = "grocery";

// ============================================================================
// Aisle
// ============================================================================

/// A rectangular, named region of the store grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aisle {
    /// Unique identifier for this aisle
    pub id: AisleId,

    /// Display name
    pub name: String,

    /// Category tag driving the fill color
    pub tag: String,

    /// Left-most column (1-based)
    pub x: u32,

    /// Top-most row (1-based)
    pub y: u32,

    /// Width in cells
    pub width: u32,

    /// Height in cells
    pub height: u32,
}

impl Aisle {
    /// Create a 1x1 aisle at cell (1, 1) with a fresh id
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            tag: tag.into(),
            x: 1,
            y: 1,
            width: 1,
            height: 1,
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the identifier
    pub fn with_id(mut self, id: AisleId) -> Self {
        self.id = id;
        self
    }

    /// Set the top-left cell as (x = column, y = row)
    pub fn at(mut self, x: u32, y: u32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the size in cells
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    /// Top-left cell
    pub fn origin(&self) -> GridCell {
        GridCell::new(self.y, self.x)
    }

    /// Last column covered by the aisle
    pub fn right(&self) -> u32 {
        self.x + self.width.saturating_sub(1)
    }

    /// Last row covered by the aisle
    pub fn bottom(&self) -> u32 {
        self.y + self.height.saturating_sub(1)
    }

    /// Check whether a cell lies inside the aisle
    pub fn contains(&self, cell: GridCell) -> bool {
        cell.column >= self.x
            && cell.column <= self.right()
            && cell.row >= self.y
            && cell.row <= self.bottom()
    }

    /// Iterate over every cell covered by the aisle, row-major
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (self.y..=self.bottom())
            .flat_map(move |row| (self.x..=self.right()).map(move |column| GridCell::new(row, column)))
    }

    /// Number of cells covered
    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    /// The built-in category matching this aisle's tag, if any
    pub fn category(&self) -> Option<Category> {
        Category::from_tag(&self.tag)
    }
}

impl Validatable for Aisle {
    fn validate(&self) -> LayoutResult<()> {
        if self.name.trim().is_empty() {
            return Err(LayoutError::aisle_validation(
                self.id.to_string(),
                "Aisle name cannot be empty",
            ));
        }
        if self.width == 0 || self.height == 0 {
            return Err(LayoutError::aisle_validation(
                &self.name,
                "Aisle must cover at least one cell",
            ));
        }
        if self.x == 0 || self.y == 0 {
            return Err(LayoutError::aisle_validation(
                &self.name,
                "Aisle position is 1-based",
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

    #[test]
    fn test_aisle_bounds() {
        let aisle = Aisle::new("Grocery", "grocery").at(2, 3).with_size(2, 4);
        assert_eq!(aisle.right(), 3);
        assert_eq!(aisle.bottom(), 6);
        assert!(aisle.contains(GridCell::new(3, 2)));
        assert!(aisle.contains(GridCell::new(6, 3)));
        assert!(!aisle.contains(GridCell::new(7, 3)));
        assert!(!aisle.contains(GridCell::new(3, 4)));
    }

    #[test]
    fn test_aisle_cells() {
        let aisle = Aisle::new("A", "toys").at(1, 1).with_size(2, 2);
        let cells: Vec<_> = aisle.cells().collect();
        assert_eq!(
            cells,
            vec![
                GridCell::new(1, 1),
                GridCell::new(1, 2),
                GridCell::new(2, 1),
                GridCell::new(2, 2)
            ]
        );
        assert_eq!(aisle.area(), 4);
    }

    #[test]
    fn test_aisle_validation() {
        assert!(Aisle::new("Snacks", "grocery").is_valid());
        assert!(!Aisle::new("  ", "grocery").is_valid());
        assert!(!Aisle::new("Snacks", "grocery").with_size(0, 1).is_valid());
        assert!(!Aisle::new("Snacks", "grocery").at(0, 1).is_valid());
    }

    #[test]
    fn test_aisle_category() {
        assert_eq!(Aisle::new("A", "Office").category(), Some(Category::Office));
        assert_eq!(Aisle::new("A", "garden").category(), None);
    }
}
