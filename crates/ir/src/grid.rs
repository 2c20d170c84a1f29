//! Grid coordinate model
//!
//! Maps 1-based (row, column) cells to pixel rectangles on a canvas. Row 0
//! and column 0 are the label gutter, so cell (r, c) starts at
//! `(c * cell_width, r * cell_height)`. All functions here are pure.

use crate::aisle::Aisle;
use shelfmap_core::{GridCell, LayoutError, LayoutResult, Position, Rect, Size, Validatable};
use serde::{Deserialize, Serialize};

/// Maximum cell width in pixels
pub const MAX_CELL_WIDTH: f32 = 80.0;

/// Maximum cell height in pixels
pub const MAX_CELL_HEIGHT: f32 = 60.0;

/// Height of the door marker in pixels
pub const DOOR_HEIGHT: f32 = 10.0;

/// Largest row/column count of the read-only store map
pub const MAX_MAP_DIMENSION: u32 = 100;

// ============================================================================
// Grid
// ============================================================================

/// The rows x columns coordinate space of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub rows: u32,
    pub columns: u32,
}

impl Grid {
    /// Create a grid; both dimensions are at least 1
    pub fn new(rows: u32, columns: u32) -> Self {
        Self {
            rows: rows.max(1),
            columns: columns.max(1),
        }
    }

    /// Size the read-only store map from the furthest placed cell, capped at
    /// `MAX_MAP_DIMENSION` in both directions
    pub fn covering(cells: impl IntoIterator<Item = GridCell>) -> Self {
        Self::covering_within(cells, MAX_MAP_DIMENSION)
    }

    /// Grid spanning the furthest placed cell, no larger than `limit`
    pub fn covering_within(cells: impl IntoIterator<Item = GridCell>, limit: u32) -> Self {
        let (rows, columns) = cells
            .into_iter()
            .fold((1, 1), |(r, c), cell| (r.max(cell.row), c.max(cell.column)));
        Self::new(rows.min(limit), columns.min(limit))
    }

    /// Check whether a cell lies on the grid
    pub fn contains(&self, cell: GridCell) -> bool {
        (1..=self.rows).contains(&cell.row) && (1..=self.columns).contains(&cell.column)
    }

    /// Clamp a cell onto the grid
    pub fn clamp_cell(&self, cell: GridCell) -> GridCell {
        GridCell::new(cell.row.clamp(1, self.rows), cell.column.clamp(1, self.columns))
    }

    /// Clamp a candidate top-left (x = column, y = row) so that a
    /// `width` x `height` block stays inside the grid.
    pub fn clamp_origin(&self, x: i64, y: i64, width: u32, height: u32) -> (u32, u32) {
        let max_x = (self.columns as i64 - width as i64 + 1).max(1);
        let max_y = (self.rows as i64 - height as i64 + 1).max(1);
        (x.clamp(1, max_x) as u32, y.clamp(1, max_y) as u32)
    }

    /// Clamp a door column into `[0, columns]`
    pub fn clamp_door(&self, column: i64) -> u32 {
        column.clamp(0, self.columns as i64) as u32
    }

    /// Default door column, centered under the grid
    pub fn default_door(&self) -> u32 {
        self.columns / 2
    }

    /// Canvas size that gives every cell its maximum size
    pub fn default_canvas(&self) -> Size {
        Size::new(
            self.columns.saturating_add(1) as f32 * MAX_CELL_WIDTH,
            self.rows.saturating_add(1) as f32 * MAX_CELL_HEIGHT,
        )
    }
}

impl Default for Grid {
    fn default() -> Self {
        GridBounds::default().default_grid()
    }
}

// ============================================================================
// Grid Bounds
// ============================================================================

/// Editor limits for the grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridBounds {
    /// Smallest row/column count the editor allows
    pub min: u32,
    /// Largest row/column count the editor allows
    pub max: u32,
    /// Rows used when no product carries a position
    pub default_rows: u32,
    /// Columns used when no product carries a position
    pub default_columns: u32,
}

impl Default for GridBounds {
    fn default() -> Self {
        Self {
            min: 4,
            max: 20,
            default_rows: 8,
            default_columns: 10,
        }
    }
}

impl GridBounds {
    /// Clamp a single dimension into the editor range
    pub fn clamp(&self, value: u32) -> u32 {
        value.clamp(self.min, self.max)
    }

    /// Editor grid from requested dimensions
    pub fn grid(&self, rows: u32, columns: u32) -> Grid {
        Grid::new(self.clamp(rows), self.clamp(columns))
    }

    /// Editor grid when nothing is placed yet
    pub fn default_grid(&self) -> Grid {
        self.grid(self.default_rows, self.default_columns)
    }
}

impl Validatable for GridBounds {
    fn validate(&self) -> LayoutResult<()> {
        if self.min == 0 {
            return Err(LayoutError::InvalidConfig(
                "grid.min must be at least 1".to_string(),
            ));
        }
        if self.min > self.max {
            return Err(LayoutError::InvalidConfig(format!(
                "grid.min ({}) is larger than grid.max ({})",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Grid Metrics
// ============================================================================

/// Pixel mapping of a grid onto a canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub grid: Grid,
    pub canvas: Size,
    pub cell_width: f32,
    pub cell_height: f32,
}

impl GridMetrics {
    /// Compute metrics with the standard 80x60 cell caps
    pub fn new(grid: Grid, canvas: Size) -> Self {
        Self::with_caps(grid, canvas, Size::new(MAX_CELL_WIDTH, MAX_CELL_HEIGHT))
    }

    /// Compute metrics with custom cell caps
    pub fn with_caps(grid: Grid, canvas: Size, caps: Size) -> Self {
        let cell_width = caps.width.min(canvas.width / grid.columns.saturating_add(1) as f32);
        let cell_height = caps.height.min(canvas.height / grid.rows.saturating_add(1) as f32);
        Self {
            grid,
            canvas,
            cell_width,
            cell_height,
        }
    }

    /// Metrics for the grid's default canvas
    pub fn for_grid(grid: Grid) -> Self {
        Self::new(grid, grid.default_canvas())
    }

    /// Top-left pixel of a cell
    pub fn cell_origin(&self, cell: GridCell) -> Position {
        Position::new(
            cell.column as f32 * self.cell_width,
            cell.row as f32 * self.cell_height,
        )
    }

    /// Pixel rectangle of a cell
    pub fn cell_rect(&self, cell: GridCell) -> Rect {
        Rect::new(
            self.cell_origin(cell),
            Size::new(self.cell_width, self.cell_height),
        )
    }

    /// Center pixel of a cell
    pub fn cell_center(&self, cell: GridCell) -> Position {
        self.cell_rect(cell).center()
    }

    /// Pixel rectangle of an aisle
    pub fn aisle_rect(&self, aisle: &Aisle) -> Rect {
        Rect::new(
            self.cell_origin(aisle.origin()),
            Size::new(
                aisle.width as f32 * self.cell_width,
                aisle.height as f32 * self.cell_height,
            ),
        )
    }

    /// Total pixel height covered by the gutter and all rows
    pub fn grid_bottom(&self) -> f32 {
        self.grid.rows.saturating_add(1) as f32 * self.cell_height
    }

    /// Total pixel width covered by the gutter and all columns
    pub fn grid_right(&self) -> f32 {
        self.grid.columns.saturating_add(1) as f32 * self.cell_width
    }

    /// Door marker rectangle, on the bottom edge of the last row
    pub fn door_rect(&self, door_column: u32) -> Rect {
        Rect::from_xywh(
            door_column as f32 * self.cell_width,
            self.grid_bottom() - DOOR_HEIGHT,
            self.cell_width,
            DOOR_HEIGHT,
        )
    }

    /// Bottom-center of the door, where walking routes start
    pub fn door_anchor(&self, door_column: u32) -> Position {
        Position::new(
            door_column as f32 * self.cell_width + self.cell_width / 2.0,
            self.grid_bottom(),
        )
    }

    /// Unclamped (column, row) index under a pixel position
    pub fn snap(&self, position: Position) -> (i64, i64) {
        (
            (position.x / self.cell_width).floor() as i64,
            (position.y / self.cell_height).floor() as i64,
        )
    }

    /// Nearest whole-cell (column, row) for a pixel position
    pub fn snap_nearest(&self, position: Position) -> (i64, i64) {
        (
            (position.x / self.cell_width).round() as i64,
            (position.y / self.cell_height).round() as i64,
        )
    }

    /// Cell under a pixel position, if it is a grid cell (not the gutter)
    pub fn cell_at(&self, position: Position) -> Option<GridCell> {
        if position.x < 0.0 || position.y < 0.0 {
            return None;
        }
        let (column, row) = self.snap(position);
        let cell = GridCell::new(row as u32, column as u32);
        self.grid.contains(cell).then_some(cell)
    }

    /// Door column for a pointer x-coordinate, clamped to `[0, columns]`
    pub fn door_column_at(&self, x: f32) -> u32 {
        self.grid.clamp_door((x / self.cell_width).floor() as i64)
    }
}

// ============================================================================
// Tests
// ============================================================================
