//! Walking directions from the front door to a product
//!
//! Shoppers enter at the door column on the bottom edge, walk along the
//! front of the store to the product's column, then up that aisle to the
//! product's row. The same L-shaped route is drawn on the store map.

use crate::grid::GridMetrics;
use crate::product::Product;
use shelfmap_core::{GridCell, LayoutError, LayoutResult, Position};
use std::fmt;

/// First step of every route
pub const ENTER_STEP: &str = "Enter through the front door";

/// Which way to walk along the front of the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left(u32),
    Right(u32),
    Straight,
}

impl Turn {
    /// Decide the turn from the door column towards a target column
    pub fn towards(door_column: u32, target_column: u32) -> Self {
        use std::cmp::Ordering;
        match target_column.cmp(&door_column) {
            Ordering::Greater => Turn::Right(target_column),
            Ordering::Less => Turn::Left(target_column),
            Ordering::Equal => Turn::Straight,
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Turn::Right(column) => write!(f, "Walk right to column {}", column),
            Turn::Left(column) => write!(f, "Walk left to column {}", column),
            Turn::Straight => f.write_str("Continue straight ahead"),
        }
    }
}

/// Step-by-step directions to a placed product
pub fn directions(door_column: u32, product: &Product) -> LayoutResult<Vec<String>> {
    let cell = product.cell().ok_or_else(|| {
        LayoutError::product_validation(&product.name, "Product has no aisle position")
    })?;

    Ok(vec![
        ENTER_STEP.to_string(),
        Turn::towards(door_column, cell.column).to_string(),
        format!("Follow the aisle to row {}", cell.row),
        format!("Look for {} on the shelf", product.name),
    ])
}

/// Pixel polyline of the route: door anchor, along the bottom edge to the
/// product column, then up to the product cell's center.
pub fn route_path(metrics: &GridMetrics, door_column: u32, cell: GridCell) -> Vec<Position> {
    let start = metrics.door_anchor(door_column);
    let target = metrics.cell_center(cell);
    vec![start, Position::new(target.x, start.y), target]
}

// ============================================================================
// Tests
// ============================================================================
