//! File Operations for Shelfmap
//!
//! Native file dialogs via `rfd`, plus the async flows behind the toolbar:
//! loading and saving products through the product store, opening and
//! saving layout files, CSV exchange and PNG export of the store map.

use shelfmap_core::{LayoutError, LayoutResult};
use shelfmap_ir::serialization::{LAYOUT_EXTENSION, ensure_extension};
use shelfmap_ir::{
    BatchReport, JsonFileStore, Product, ProductStore, StoreLayout, export_products_csv,
    import_products, load_layout, parse_products_csv, save_layout, save_to_store,
};
use rfd::AsyncFileDialog;
use shelfmap_render::{Rasterizer, RenderRequest, render};
use std::path::{Path, PathBuf};

// ============================================================================
// File Filter Constants
// ============================================================================

/// Display name for the layout file filter
pub const FILE_TYPE_NAME: &str = "Shelfmap Layout";

// ============================================================================
// File Dialog Functions
// ============================================================================

/// Pick a file to open with the given filter
pub async fn show_open_dialog(title: &str, filter_name: &str, extensions: &[&str]) -> Option<PathBuf> {
    let file = AsyncFileDialog::new()
        .set_title(title)
        .add_filter(filter_name, extensions)
        .add_filter("All Files", &["*"])
        .pick_file()
        .await?;

    Some(file.path().to_path_buf())
}

/// Pick a destination file with the given filter and suggested name
pub async fn show_save_dialog(
    title: &str,
    filter_name: &str,
    extensions: &[&str],
    default_name: &str,
) -> Option<PathBuf> {
    let file = AsyncFileDialog::new()
        .set_title(title)
        .add_filter(filter_name, extensions)
        .set_file_name(default_name)
        .save_file()
        .await?;

    Some(file.path().to_path_buf())
}

// ============================================================================
// Product Store
// ============================================================================

/// Read every product from the JSON store
pub async fn load_products(store_path: &Path) -> LayoutResult<Vec<Product>> {
    JsonFileStore::new(store_path).list().await
}

/// Write the layout's product positions to the JSON store as one batch
pub async fn save_products(store_path: &Path, layout: &StoreLayout) -> LayoutResult<BatchReport> {
    let store = JsonFileStore::new(store_path);
    save_to_store(&store, layout).await
}

/// Replace the store's products with a CSV file chosen by the user.
///
/// Returns the products now in the store.
pub async fn import_csv(store_path: &Path) -> LayoutResult<Vec<Product>> {
    let path = show_open_dialog("Import Products", "CSV", &["csv"])
        .await
        .ok_or(LayoutError::Cancelled)?;

    let file = std::fs::File::open(&path).map_err(|e| LayoutError::FileRead {
        path: path.clone(),
        message: e.to_string(),
    })?;
    let products = parse_products_csv(std::io::BufReader::new(file))?;

    let store = JsonFileStore::new(store_path);
    import_products(&store, products).await?;
    store.list().await
}

/// Write the product table to a CSV file chosen by the user
pub async fn export_csv(products: &[Product]) -> LayoutResult<PathBuf> {
    let path = show_save_dialog("Export Products", "CSV", &["csv"], "products.csv")
        .await
        .ok_or(LayoutError::Cancelled)?;

    let file = std::fs::File::create(&path).map_err(|e| LayoutError::FileWrite {
        path: path.clone(),
        message: e.to_string(),
    })?;
    export_products_csv(products, std::io::BufWriter::new(file))?;
    tracing::info!("Products exported to {}", path.display());
    Ok(path)
}

// ============================================================================
// Layout Files
// ============================================================================

/// Open a layout file, asking for the path when none is given
pub async fn open_layout(path: Option<PathBuf>) -> LayoutResult<(StoreLayout, PathBuf)> {
    let path = match path {
        Some(p) => p,
        None => show_open_dialog("Open Layout", FILE_TYPE_NAME, &[LAYOUT_EXTENSION])
            .await
            .ok_or(LayoutError::Cancelled)?,
    };

    let layout = load_layout(&path)?;
    Ok((layout, path))
}

/// Save a layout, asking for a path when the layout has none yet
pub async fn save_layout_file(
    layout: &StoreLayout,
    existing_path: Option<PathBuf>,
) -> LayoutResult<PathBuf> {
    let path = match existing_path {
        Some(p) => p,
        None => {
            let default_name = format!("store.{}", LAYOUT_EXTENSION);
            let chosen = show_save_dialog(
                "Save Layout",
                FILE_TYPE_NAME,
                &[LAYOUT_EXTENSION],
                &default_name,
            )
            .await
            .ok_or(LayoutError::Cancelled)?;
            ensure_extension(chosen)
        }
    };

    save_layout(layout, &path)?;
    Ok(path)
}

// ============================================================================
// Image Export
// ============================================================================

/// Export the store map as PNG, with the selected product's route if any
pub async fn export_map_png(
    products: &[Product],
    selected: Option<shelfmap_core::ProductId>,
    font_path: Option<&Path>,
) -> LayoutResult<PathBuf> {
    let path = show_save_dialog("Export Store Map", "PNG Image", &["png"], "store-map.png")
        .await
        .ok_or(LayoutError::Cancelled)?;

    let rasterizer = Rasterizer::from_font_path(font_path)?;
    let scene = render(&RenderRequest::store_map(products).with_selected(selected));
    rasterizer.save_png(&scene, &path)?;
    Ok(path)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use shelfmap_ir::Aisle;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_then_load_products() {
        let dir = tempdir().unwrap();
        let store_path = dir.path().join("products.json");
        let store = JsonFileStore::new(&store_path);
        store.insert_one(shelfmap_ir::NewProduct::default()).await.unwrap();

        let products = load_products(&store_path).await.unwrap();
        let aisle = Aisle::new("Front", "home").at(1, 1);
        let aisle_id = aisle.id;
        let mut layout = StoreLayout::from_parts(
            shelfmap_ir::Grid::new(4, 4),
            2,
            vec![aisle],
            products,
        );
        let product_id = layout.products()[0].id;
        layout.assign_product(product_id, aisle_id).unwrap();

        let report = save_products(&store_path, &layout).await.unwrap();
        assert!(report.is_complete());

        let reloaded = load_products(&store_path).await.unwrap();
        assert_eq!(reloaded[0].aisle_id, Some(aisle_id));
        assert_eq!(reloaded[0].tag, "home");
    }

    #[tokio::test]
    async fn test_open_layout_with_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.shelfmap");
        save_layout(&StoreLayout::default(), &path).unwrap();

        let (layout, opened) = open_layout(Some(path.clone())).await.unwrap();
        assert_eq!(opened, path);
        assert_eq!(layout, StoreLayout::default());
    }
}
