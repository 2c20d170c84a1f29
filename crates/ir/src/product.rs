//! Product records
//!
//! Products are owned by the product store. The layout model only reads and
//! rewrites their aisle fields (`aisle_id`, `aisle_name`, `aisle_row`,
//! `aisle_column`, `tag`) and the layout metadata blob.

use shelfmap_core::{AisleId, GridCell, LayoutError, LayoutResult, ProductId, Validatable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fallback name for imported rows without a product name
pub const UNNAMED_PRODUCT: &str = "Unnamed Product";

// ============================================================================
// Layout Metadata
// ============================================================================

/// Layout state persisted alongside every product on save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutMetadata {
    /// Door column at the time of the last save
    #[serde(rename = "doorPosition", alias = "door_column")]
    pub door_column: u32,
}

impl LayoutMetadata {
    pub fn new(door_column: u32) -> Self {
        Self { door_column }
    }
}

// ============================================================================
// Product
// ============================================================================

/// A product record as exchanged with the product store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable identifier assigned by the store
    pub id: ProductId,

    /// Display name
    pub name: String,

    #[serde(default)]
    pub price: f64,

    #[serde(default)]
    pub company: String,

    #[serde(default)]
    pub quantity: i64,

    /// Category tag (free-form, see `shelfmap_core::Category` for the fixed set)
    #[serde(default)]
    pub tag: String,

    /// 1-based grid row; `None` or zero means unassigned
    #[serde(default)]
    pub aisle_row: Option<u32>,

    /// 1-based grid column; `None` or zero means unassigned
    #[serde(default)]
    pub aisle_column: Option<u32>,

    /// Aisle this product belongs to
    #[serde(default)]
    pub aisle_id: Option<AisleId>,

    /// Denormalized aisle name
    #[serde(default)]
    pub aisle_name: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,

    /// Layout state written by the last save
    #[serde(default, rename = "_layout_metadata", alias = "layout_metadata")]
    pub layout_metadata: Option<LayoutMetadata>,
}

impl Product {
    /// Create a new unassigned product with a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            price: 0.0,
            company: String::new(),
            quantity: 0,
            tag: String::new(),
            aisle_row: None,
            aisle_column: None,
            aisle_id: None,
            aisle_name: None,
            image_url: None,
            layout_metadata: None,
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Place the product at a grid cell (without an aisle)
    pub fn at(mut self, row: u32, column: u32) -> Self {
        self.aisle_row = Some(row);
        self.aisle_column = Some(column);
        self
    }

    /// Attach the product to an aisle
    pub fn in_aisle(mut self, aisle_id: AisleId, aisle_name: impl Into<String>) -> Self {
        self.aisle_id = Some(aisle_id);
        self.aisle_name = Some(aisle_name.into());
        self
    }

    // ========================================================================
    // Placement
    // ========================================================================

    /// The product's grid cell, if it has a usable row and column
    pub fn cell(&self) -> Option<GridCell> {
        GridCell::from_parts(self.aisle_row, self.aisle_column)
    }

    /// Whether the product is positioned on the grid
    pub fn is_placed(&self) -> bool {
        self.cell().is_some()
    }

    /// Whether the product belongs to an aisle
    pub fn is_assigned(&self) -> bool {
        self.aisle_id.is_some()
    }

    /// Move the product to a grid cell
    pub fn set_cell(&mut self, cell: GridCell) {
        self.aisle_row = Some(cell.row);
        self.aisle_column = Some(cell.column);
    }

    /// Clear every aisle field, leaving stock data untouched
    pub fn unassign(&mut self) {
        self.aisle_id = None;
        self.aisle_name = None;
        self.aisle_row = None;
        self.aisle_column = None;
    }

    /// Case-insensitive substring match on the product name
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

impl Validatable for Product {
    fn validate(&self) -> LayoutResult<()> {
        if self.name.trim().is_empty() {
            return Err(LayoutError::product_validation(
                self.id.to_string(),
                "Product name cannot be empty",
            ));
        }
        if self.price < 0.0 {
            return Err(LayoutError::product_validation(
                &self.name,
                "Price cannot be negative",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Patches and inserts
// ============================================================================

/// Field patch written back to the store for one product on save.
///
/// Every field is written, so a `None` clears the stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub aisle_id: Option<AisleId>,
    pub aisle_name: Option<String>,
    pub aisle_row: Option<u32>,
    pub aisle_column: Option<u32>,
    pub tag: String,
    #[serde(rename = "_layout_metadata")]
    pub layout_metadata: LayoutMetadata,
}

impl ProductPatch {
    /// Snapshot a product's aisle fields
    pub fn from_product(product: &Product, metadata: LayoutMetadata) -> Self {
        Self {
            aisle_id: product.aisle_id,
            aisle_name: product.aisle_name.clone(),
            aisle_row: product.aisle_row,
            aisle_column: product.aisle_column,
            tag: product.tag.clone(),
            layout_metadata: metadata,
        }
    }

    /// Apply this patch to a stored product
    pub fn apply(&self, product: &mut Product) {
        product.aisle_id = self.aisle_id;
        product.aisle_name = self.aisle_name.clone();
        product.aisle_row = self.aisle_row;
        product.aisle_column = self.aisle_column;
        product.tag = self.tag.clone();
        product.layout_metadata = Some(self.layout_metadata);
    }
}

/// Fields for inserting a new product (the store assigns the id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub company: String,
    pub tag: String,
    pub quantity: i64,
    pub aisle_row: u32,
    pub aisle_column: u32,
    pub image_url: Option<String>,
}

impl Default for NewProduct {
    fn default() -> Self {
        Self {
            name: UNNAMED_PRODUCT.to_string(),
            price: 0.0,
            company: String::new(),
            tag: String::new(),
            quantity: 0,
            aisle_row: 1,
            aisle_column: 1,
            image_url: None,
        }
    }
}

impl NewProduct {
    /// Materialize the insert with a freshly generated id
    pub fn into_product(self) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: self.name,
            price: self.price,
            company: self.company,
            quantity: self.quantity,
            tag: self.tag,
            aisle_row: Some(self.aisle_row),
            aisle_column: Some(self.aisle_column),
            aisle_id: None,
            aisle_name: None,
            image_url: self.image_url,
            layout_metadata: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_row_is_unplaced() {
        let product = Product::new("Milk").at(0, 3);
        assert!(!product.is_placed());
        assert_eq!(Product::new("Milk").at(2, 3).cell(), Some(GridCell::new(2, 3)));
    }

    #[test]
    fn test_unassign_keeps_stock_fields() {
        let aisle = Uuid::new_v4();
        let mut product = Product::new("Bread")
            .with_price(2.5)
            .with_quantity(12)
            .at(2, 2)
            .in_aisle(aisle, "Bakery");

        product.unassign();

        assert_eq!(product.aisle_id, None);
        assert_eq!(product.aisle_name, None);
        assert_eq!(product.cell(), None);
        assert_eq!(product.price, 2.5);
        assert_eq!(product.quantity, 12);
    }

    #[test]
    fn test_patch_roundtrip_onto_product() {
        let aisle = Uuid::new_v4();
        let edited = Product::new("Tea").at(4, 5).in_aisle(aisle, "Drinks").with_tag("grocery");
        let patch = ProductPatch::from_product(&edited, LayoutMetadata::new(3));

        let mut stored = Product::new("Tea");
        patch.apply(&mut stored);

        assert_eq!(stored.aisle_id, Some(aisle));
        assert_eq!(stored.cell(), Some(GridCell::new(4, 5)));
        assert_eq!(stored.layout_metadata, Some(LayoutMetadata::new(3)));
    }

    #[test]
    fn test_metadata_uses_door_position_key() {
        let json = serde_json::to_string(&LayoutMetadata::new(4)).unwrap();
        assert_eq!(json, r#"{"doorPosition":4}"#);
    }

    #[test]
    fn test_product_deserializes_with_missing_fields() {
        let json = format!(r#"{{"id":"{}","name":"Soap"}}"#, Uuid::new_v4());
        let product: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(product.tag, "");
        assert!(!product.is_placed());
        assert!(product.is_valid());
    }

    #[test]
    fn test_new_product_defaults() {
        let product = NewProduct::default().into_product();
        assert_eq!(product.name, UNNAMED_PRODUCT);
        assert_eq!(product.cell(), Some(GridCell::new(1, 1)));
        assert!(!product.is_assigned());
    }
}
