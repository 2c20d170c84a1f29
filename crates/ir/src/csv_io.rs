//! CSV import and export of the product table
//!
//! Import is best-effort: headers are matched case-insensitively, unknown
//! columns are ignored, and unparsable numbers fall back to defaults
//! (price and quantity 0, aisle row and column 1).

use crate::product::{NewProduct, Product, UNNAMED_PRODUCT};
use crate::store::ProductStore;
use shelfmap_core::{LayoutError, LayoutResult, ResultExt};
use std::io::{Read, Write};
use tracing::{info, warn};

/// Column headers, in export order
pub const CSV_HEADERS: [&str; 8] = [
    "product name",
    "product price",
    "product company",
    "filter tag",
    "quantity available",
    "aisle row",
    "aisle column",
    "img url",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Name,
    Price,
    Company,
    Tag,
    Quantity,
    AisleRow,
    AisleColumn,
    ImageUrl,
}

impl Column {
    fn from_header(header: &str) -> Option<Self> {
        match header.trim().to_lowercase().as_str() {
            "product name" => Some(Column::Name),
            "product price" => Some(Column::Price),
            "product company" => Some(Column::Company),
            "filter tag" => Some(Column::Tag),
            "quantity available" => Some(Column::Quantity),
            "aisle row" => Some(Column::AisleRow),
            "aisle column" => Some(Column::AisleColumn),
            "img url" | "image url" => Some(Column::ImageUrl),
            _ => None,
        }
    }
}

fn parse_f64(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_i64(value: &str) -> Option<i64> {
    let value = value.trim();
    value
        .parse::<i64>()
        .ok()
        .or_else(|| parse_f64(value).map(|v| v.trunc() as i64))
}

fn parse_position(value: &str) -> u32 {
    parse_i64(value)
        .filter(|v| *v >= 1)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(1)
}

// ============================================================================
// Import
// ============================================================================

/// Parse products from CSV text
pub fn parse_products_csv<R: Read>(reader: R) -> LayoutResult<Vec<NewProduct>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns: Vec<Option<Column>> = reader
        .headers()
        .map_err(|e| LayoutError::Csv(e.to_string()))?
        .iter()
        .map(Column::from_header)
        .collect();

    let mut products = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| LayoutError::Csv(format!("row {}: {}", line + 2, e)))?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let mut product = NewProduct::default();
        for (column, value) in columns.iter().zip(record.iter()) {
            let Some(column) = column else { continue };
            match column {
                Column::Name => {
                    if !value.is_empty() {
                        product.name = value.to_string();
                    }
                }
                Column::Price => product.price = parse_f64(value).unwrap_or(0.0),
                Column::Company => product.company = value.to_string(),
                Column::Tag => product.tag = value.to_string(),
                Column::Quantity => product.quantity = parse_i64(value).unwrap_or(0),
                Column::AisleRow => product.aisle_row = parse_position(value),
                Column::AisleColumn => product.aisle_column = parse_position(value),
                Column::ImageUrl => {
                    product.image_url = (!value.is_empty()).then(|| value.to_string())
                }
            }
        }
        products.push(product);
    }

    if products.iter().any(|p| p.name == UNNAMED_PRODUCT) {
        warn!("Some rows had no product name");
    }
    Ok(products)
}

/// Replace the store's contents with the given products.
///
/// Existing products are deleted first, then each product is inserted in
/// order. The first failed insert stops the import.
pub async fn import_products(
    store: &dyn ProductStore,
    products: Vec<NewProduct>,
) -> LayoutResult<usize> {
    store.delete_all().await?;

    let mut inserted = 0;
    for product in products {
        let name = product.name.clone();
        store
            .insert_one(product)
            .await
            .with_context(format!("Failed on product: {}", name))?;
        inserted += 1;
    }

    info!(inserted, "Products imported");
    Ok(inserted)
}

// ============================================================================
// Export
// ============================================================================

/// Write the product table as CSV with a header row
pub fn export_products_csv<W: Write>(products: &[Product], writer: W) -> LayoutResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer
        .write_record(CSV_HEADERS)
        .map_err(|e| LayoutError::Csv(e.to_string()))?;

    for p in products {
        writer
            .write_record([
                p.name.clone(),
                p.price.to_string(),
                p.company.clone(),
                p.tag.clone(),
                p.quantity.to_string(),
                p.aisle_row.map(|v| v.to_string()).unwrap_or_default(),
                p.aisle_column.map(|v| v.to_string()).unwrap_or_default(),
                p.image_url.clone().unwrap_or_default(),
            ])
            .map_err(|e| LayoutError::Csv(e.to_string()))?;
    }

    writer.flush()?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
Product Name,Product Price,Product Company,Filter Tag,Quantity Available,Aisle Row,Aisle Column,Img URL
Green Tea,3.5,Leafy,grocery,12,2,3,https://img/tea.png
,abc,,toys,x,0,,
";

    #[test]
    fn test_parse_maps_headers_and_defaults() {
        let products = parse_products_csv(SAMPLE.as_bytes()).unwrap();
        assert_eq!(products.len(), 2);

        assert_eq!(products[0].name, "Green Tea");
        assert_eq!(products[0].price, 3.5);
        assert_eq!(products[0].quantity, 12);
        assert_eq!((products[0].aisle_row, products[0].aisle_column), (2, 3));
        assert_eq!(products[0].image_url.as_deref(), Some("https://img/tea.png"));

        assert_eq!(products[1].name, "Unnamed Product");
        assert_eq!(products[1].price, 0.0);
        assert_eq!(products[1].quantity, 0);
        assert_eq!((products[1].aisle_row, products[1].aisle_column), (1, 1));
        assert_eq!(products[1].image_url, None);
    }

    #[test]
    fn test_parse_skips_blank_rows_and_unknown_columns() {
        let text = "product name,shelf colour\nSoap,blue\n,\n";
        let products = parse_products_csv(text.as_bytes()).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Soap");
    }

    #[test]
    fn test_export_quotes_commas() {
        let product = Product::new("Nuts, salted").with_price(2.0).at(1, 4);
        let mut out = Vec::new();
        export_products_csv(&[product], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), CSV_HEADERS.join(","));
        assert_eq!(lines.next().unwrap(), "\"Nuts, salted\",2,,,0,1,4,");

        let back = parse_products_csv(text.as_bytes()).unwrap();
        assert_eq!(back[0].name, "Nuts, salted");
    }

    #[tokio::test]
    async fn test_import_replaces_store() {
        let store = MemoryStore::with_products(vec![Product::new("Old")]);
        let products = parse_products_csv(SAMPLE.as_bytes()).unwrap();

        let count = import_products(&store, products).await.unwrap();

        assert_eq!(count, 2);
        let names: Vec<_> = store.list().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Green Tea", "Unnamed Product"]);
    }
}
