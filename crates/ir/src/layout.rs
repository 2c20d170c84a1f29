//! Layout store
//!
//! `StoreLayout` is the in-memory model the editor mutates: the grid, the
//! door column, the aisles and the products placed on them. Every mutation
//! keeps aisles inside the grid and member products inside their aisle's
//! translation.

use crate::aisle::{Aisle, DEFAULT_AISLE_TAG};
use crate::grid::{Grid, GridBounds};
use crate::product::{LayoutMetadata, Product};
use rand::Rng;
use serde::{Deserialize, Serialize};
use shelfmap_core::{AisleId, GridCell, LayoutError, LayoutResult, ProductId, Validatable};
use tracing::{debug, info, warn};
use uuid::Uuid;

// ============================================================================
// Aisle derivation
// ============================================================================

/// Rebuild aisles from products that carry an aisle id and a grid cell.
///
/// The first product seen for an aisle seeds a 1x1 aisle at its cell; later
/// products grow the aisle to the bounding box of all its members. Aisles are
/// returned in order of first appearance.
///
/// The box also grows left and up, so a member seen later at a smaller row or
/// column moves the origin. A grow-only rule (`width = max(width, column - x + 1)`)
/// would leave such a member outside its own aisle; both agree whenever the
/// first member is the top-left one.
pub fn derive_aisles(products: &[Product]) -> Vec<Aisle> {
    let mut aisles: Vec<Aisle> = Vec::new();

    for product in products {
        let (Some(aisle_id), Some(cell)) = (product.aisle_id, product.cell()) else {
            continue;
        };

        match aisles.iter_mut().find(|a| a.id == aisle_id) {
            Some(aisle) => {
                let left = aisle.x.min(cell.column);
                let top = aisle.y.min(cell.row);
                let right = aisle.right().max(cell.column);
                let bottom = aisle.bottom().max(cell.row);
                aisle.x = left;
                aisle.y = top;
                aisle.width = right - left + 1;
                aisle.height = bottom - top + 1;
            }
            None => {
                let tag = if product.tag.trim().is_empty() {
                    DEFAULT_AISLE_TAG.to_string()
                } else {
                    product.tag.clone()
                };
                let name = product
                    .aisle_name
                    .clone()
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| format!("Aisle {}", aisle_id));
                aisles.push(
                    Aisle::new(name, tag)
                        .with_id(aisle_id)
                        .at(cell.column, cell.row),
                );
            }
        }
    }

    aisles
}

/// The three starter aisles shown when no product is placed yet
pub fn default_aisles(grid: Grid) -> Vec<Aisle> {
    [
        ("Grocery", "grocery", 2, 2, 2, 4),
        ("Electronics", "electronics", 5, 2, 2, 3),
        ("Clothing", "clothing", 8, 2, 2, 4),
    ]
    .into_iter()
    .map(|(name, tag, x, y, width, height)| {
        fit_aisle(grid, Aisle::new(name, tag).at(x, y).with_size(width, height))
    })
    .collect()
}

/// Shrink and shift an aisle so it lies inside the grid
fn fit_aisle(grid: Grid, mut aisle: Aisle) -> Aisle {
    aisle.width = aisle.width.clamp(1, grid.columns);
    aisle.height = aisle.height.clamp(1, grid.rows);
    let (x, y) = grid.clamp_origin(aisle.x as i64, aisle.y as i64, aisle.width, aisle.height);
    aisle.x = x;
    aisle.y = y;
    aisle
}

// ============================================================================
// Store Layout
// ============================================================================

/// The editable store layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreLayout {
    grid: Grid,
    door_column: u32,
    aisles: Vec<Aisle>,
    products: Vec<Product>,
}

impl Default for StoreLayout {
    fn default() -> Self {
        Self::new(Grid::default())
    }
}

impl StoreLayout {
    /// Create an empty layout with the door centered
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            door_column: grid.default_door(),
            aisles: Vec::new(),
            products: Vec::new(),
        }
    }

    /// Assemble a layout from stored parts, fitting everything into the grid
    pub fn from_parts(
        grid: Grid,
        door_column: u32,
        aisles: Vec<Aisle>,
        products: Vec<Product>,
    ) -> Self {
        let mut layout = Self {
            grid,
            door_column: grid.clamp_door(door_column as i64),
            aisles,
            products,
        };
        layout.fit_aisles();
        layout
    }

    /// Build the editor layout for a product list.
    ///
    /// The grid spans the furthest placed product (within the editor bounds),
    /// the door comes from the saved layout metadata, and aisles are derived
    /// from the products. When no product is placed the starter aisles are
    /// used instead.
    pub fn from_products(products: Vec<Product>, bounds: &GridBounds) -> Self {
        let placed: Vec<GridCell> = products.iter().filter_map(Product::cell).collect();

        let grid = if placed.is_empty() {
            bounds.default_grid()
        } else {
            let covering = Grid::covering(placed.iter().copied());
            bounds.grid(covering.rows, covering.columns)
        };

        let door_column = products
            .iter()
            .find_map(|p| p.layout_metadata)
            .map(|m| grid.clamp_door(m.door_column as i64))
            .unwrap_or_else(|| grid.default_door());

        let aisles = if placed.is_empty() {
            debug!("No placed products, using starter aisles");
            default_aisles(grid)
        } else {
            derive_aisles(&products)
        };

        let skipped = products.len() - placed.len();
        if skipped > 0 && !placed.is_empty() {
            warn!(skipped, "Products without a grid position are listed as unassigned");
        }

        let mut layout = Self {
            grid,
            door_column,
            aisles,
            products,
        };
        layout.fit_aisles();
        layout
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn door_column(&self) -> u32 {
        self.door_column
    }

    pub fn aisles(&self) -> &[Aisle] {
        &self.aisles
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Layout metadata written with every product on save
    pub fn metadata(&self) -> LayoutMetadata {
        LayoutMetadata::new(self.door_column)
    }

    /// Get an aisle by id
    pub fn aisle(&self, id: AisleId) -> Option<&Aisle> {
        self.aisles.iter().find(|a| a.id == id)
    }

    /// Get a product by id
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// The top-most aisle covering a cell (later aisles are drawn on top)
    pub fn aisle_at(&self, cell: GridCell) -> Option<&Aisle> {
        self.aisles.iter().rev().find(|a| a.contains(cell))
    }

    /// Products that belong to an aisle
    pub fn members(&self, aisle_id: AisleId) -> impl Iterator<Item = &Product> {
        self.products
            .iter()
            .filter(move |p| p.aisle_id == Some(aisle_id))
    }

    /// Products attached to some aisle
    pub fn assigned_products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.is_assigned())
    }

    /// Products not attached to any aisle
    pub fn unassigned_products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| !p.is_assigned())
    }

    /// Replace the product list, keeping aisles and door
    pub fn replace_products(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Move an aisle's top-left to (x, y), clamped into the grid.
    ///
    /// Every member product is translated by the same delta. Returns the
    /// aisle's new top-left cell.
    pub fn move_aisle(&mut self, aisle_id: AisleId, x: i64, y: i64) -> LayoutResult<GridCell> {
        let index = self.aisle_index(aisle_id)?;
        let origin = self.relocate_aisle(index, x, y);
        debug!(%aisle_id, row = origin.row, column = origin.column, "Aisle moved");
        Ok(origin)
    }

    /// Create an aisle just above the door, horizontally centered on it
    pub fn create_aisle(
        &mut self,
        name: &str,
        width: u32,
        height: u32,
        tag: &str,
    ) -> LayoutResult<AisleId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LayoutError::validation("Aisle name is required"));
        }

        let width = width.clamp(1, self.grid.columns);
        let height = height.clamp(1, self.grid.rows);
        let x = (self.door_column as i64 - (width / 2) as i64).max(1);
        let y = (self.grid.rows as i64 - height as i64 - 1).max(1);
        let (x, y) = self.grid.clamp_origin(x, y, width, height);

        let tag = if tag.trim().is_empty() {
            DEFAULT_AISLE_TAG
        } else {
            tag.trim()
        };

        let aisle = Aisle::new(name, tag).at(x, y).with_size(width, height);
        aisle.validate()?;

        let id = aisle.id;
        info!(%id, name, x, y, width, height, "Aisle created");
        self.aisles.push(aisle);
        Ok(id)
    }

    /// Remove an aisle and unassign all of its products
    pub fn delete_aisle(&mut self, aisle_id: AisleId) -> LayoutResult<Aisle> {
        let index = self.aisle_index(aisle_id)?;
        let aisle = self.aisles.remove(index);

        let mut unassigned = 0;
        for product in self
            .products
            .iter_mut()
            .filter(|p| p.aisle_id == Some(aisle_id))
        {
            product.unassign();
            unassigned += 1;
        }

        info!(%aisle_id, name = %aisle.name, unassigned, "Aisle deleted");
        Ok(aisle)
    }

    /// Place a product at a random cell of an aisle
    pub fn assign_product(
        &mut self,
        product_id: ProductId,
        aisle_id: AisleId,
    ) -> LayoutResult<GridCell> {
        self.assign_product_with_rng(product_id, aisle_id, &mut rand::thread_rng())
    }

    /// Place a product at a uniformly random cell of an aisle using `rng`
    pub fn assign_product_with_rng<R: Rng + ?Sized>(
        &mut self,
        product_id: ProductId,
        aisle_id: AisleId,
        rng: &mut R,
    ) -> LayoutResult<GridCell> {
        let aisle = self
            .aisle(aisle_id)
            .cloned()
            .ok_or_else(|| LayoutError::AisleNotFound(aisle_id.to_string()))?;
        let product = self.product_mut(product_id)?;

        let cell = GridCell::new(
            aisle.y + rng.gen_range(0..aisle.height),
            aisle.x + rng.gen_range(0..aisle.width),
        );
        product.aisle_id = Some(aisle.id);
        product.aisle_name = Some(aisle.name.clone());
        product.tag = aisle.tag.clone();
        product.set_cell(cell);

        info!(%product_id, aisle = %aisle.name, row = cell.row, column = cell.column, "Product assigned");
        Ok(cell)
    }

    /// Detach a single product from its aisle
    pub fn unassign_product(&mut self, product_id: ProductId) -> LayoutResult<()> {
        let product = self.product_mut(product_id)?;
        product.unassign();
        info!(%product_id, "Product unassigned");
        Ok(())
    }

    /// Move the door, clamped to `[0, columns]`
    pub fn set_door(&mut self, column: i64) -> u32 {
        self.door_column = self.grid.clamp_door(column);
        debug!(door_column = self.door_column, "Door moved");
        self.door_column
    }

    /// Change the grid size, pulling aisles, their products and the door back
    /// inside the new bounds.
    pub fn resize_grid(&mut self, grid: Grid) {
        self.grid = grid;
        self.fit_aisles();
        self.door_column = grid.clamp_door(self.door_column as i64);
        info!(rows = grid.rows, columns = grid.columns, "Grid resized");
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    /// Pull every aisle inside the grid, moving its members along with it and
    /// clamping them into the aisle's cells
    fn fit_aisles(&mut self) {
        let grid = self.grid;
        for index in 0..self.aisles.len() {
            let aisle = &mut self.aisles[index];
            aisle.width = aisle.width.clamp(1, grid.columns);
            aisle.height = aisle.height.clamp(1, grid.rows);
            let (x, y) = (aisle.x as i64, aisle.y as i64);
            self.relocate_aisle(index, x, y);

            let aisle = self.aisles[index].clone();
            for product in self
                .products
                .iter_mut()
                .filter(|p| p.aisle_id == Some(aisle.id))
            {
                if let Some(cell) = product.cell() {
                    product.set_cell(GridCell::new(
                        cell.row.clamp(aisle.y, aisle.bottom()),
                        cell.column.clamp(aisle.x, aisle.right()),
                    ));
                }
            }
        }
    }

    fn aisle_index(&self, aisle_id: AisleId) -> LayoutResult<usize> {
        self.aisles
            .iter()
            .position(|a| a.id == aisle_id)
            .ok_or_else(|| LayoutError::AisleNotFound(aisle_id.to_string()))
    }

    fn product_mut(&mut self, product_id: ProductId) -> LayoutResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| LayoutError::ProductNotFound(product_id.to_string()))
    }

    /// Clamp and apply a new origin, translating members by the delta
    fn relocate_aisle(&mut self, index: usize, x: i64, y: i64) -> GridCell {
        let grid = self.grid;
        let aisle = &mut self.aisles[index];
        let (new_x, new_y) = grid.clamp_origin(x, y, aisle.width, aisle.height);
        let dx = new_x as i64 - aisle.x as i64;
        let dy = new_y as i64 - aisle.y as i64;
        aisle.x = new_x;
        aisle.y = new_y;
        let aisle_id = aisle.id;

        if dx != 0 || dy != 0 {
            for product in self
                .products
                .iter_mut()
                .filter(|p| p.aisle_id == Some(aisle_id))
            {
                if let Some(cell) = product.cell() {
                    product.set_cell(cell.translate(dy, dx));
                }
            }
        }

        GridCell::new(new_y, new_x)
    }
}

impl Validatable for StoreLayout {
    fn validate(&self) -> LayoutResult<()> {
        for aisle in &self.aisles {
            aisle.validate()?;
            if aisle.right() > self.grid.columns || aisle.bottom() > self.grid.rows {
                return Err(LayoutError::aisle_validation(
                    &aisle.name,
                    "Aisle extends past the grid",
                ));
            }
        }
        if self.door_column > self.grid.columns {
            return Err(LayoutError::validation("Door column is outside the grid"));
        }
        let mut seen = std::collections::HashSet::new();
        for aisle in &self.aisles {
            if !seen.insert(aisle.id) {
                return Err(LayoutError::aisle_validation(&aisle.name, "Duplicate aisle id"));
            }
        }
        Ok(())
    }
}

/// Generate an aisle id
pub fn new_aisle_id() -> AisleId {
    Uuid::new_v4()
}

// ============================================================================
// Tests
// ============================================================================
