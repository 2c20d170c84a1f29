//! Save and load flows between the layout and a product store

use crate::grid::GridBounds;
use crate::layout::StoreLayout;
use crate::product::ProductPatch;
use crate::store::{BatchReport, ProductStore};
use shelfmap_core::{LayoutResult, ProductId};
use tracing::{error, info};

/// One patch per product: its current aisle fields plus the door column
pub fn build_patches(layout: &StoreLayout) -> Vec<(ProductId, ProductPatch)> {
    let metadata = layout.metadata();
    layout
        .products()
        .iter()
        .map(|p| (p.id, ProductPatch::from_product(p, metadata)))
        .collect()
}

/// Write the layout's product positions to the store as one batch.
///
/// Fails with `LayoutError::BatchFailed` when any product could not be
/// written.
pub async fn save_to_store(
    store: &dyn ProductStore,
    layout: &StoreLayout,
) -> LayoutResult<BatchReport> {
    let patches = build_patches(layout);
    let count = patches.len();
    let report = store.apply_batch(&patches).await?;

    match report.into_result() {
        Ok(report) => {
            info!(count, "Layout written to product store");
            Ok(report)
        }
        Err(e) => {
            error!(error = %e, "Layout save incomplete");
            Err(e)
        }
    }
}

/// Load products from the store and build the editor layout
pub async fn load_from_store(
    store: &dyn ProductStore,
    bounds: &GridBounds,
) -> LayoutResult<StoreLayout> {
    let products = store.list().await?;
    info!(count = products.len(), "Products loaded");
    Ok(StoreLayout::from_products(products, bounds))
}

// ============================================================================
// Tests
// ============================================================================
