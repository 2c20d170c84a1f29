//! Product store bridge
//!
//! The layout editor only needs a handful of calls from whatever backend
//! owns the products: list them, patch one, insert one, wipe all, and apply
//! a batch of patches. `ProductStore` captures that surface; `MemoryStore`
//! and `JsonFileStore` are the two built-in backends.

use crate::product::{NewProduct, Product, ProductPatch};
use async_trait::async_trait;
use shelfmap_core::{LayoutError, LayoutResult, ProductId};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

// ============================================================================
// Batch Report
// ============================================================================

/// Outcome of a batched update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Products whose patch was written
    pub applied: Vec<ProductId>,
    /// Products whose patch was not written, with the reason
    pub failed: Vec<(ProductId, String)>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.applied.len() + self.failed.len()
    }

    /// Whether every patch was written
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Turn a partial batch into a `BatchFailed` error
    pub fn into_result(self) -> LayoutResult<BatchReport> {
        if self.is_complete() {
            return Ok(self);
        }
        let message = self
            .failed
            .iter()
            .take(3)
            .map(|(id, reason)| format!("{}: {}", id, reason))
            .collect::<Vec<_>>()
            .join("; ");
        Err(LayoutError::BatchFailed {
            failed: self.failed.len(),
            total: self.total(),
            message,
        })
    }
}

// ============================================================================
// Product Store Trait
// ============================================================================

/// Backend that owns the product records
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products
    async fn list(&self) -> LayoutResult<Vec<Product>>;

    /// Apply a field patch to one product
    async fn update_one(&self, id: ProductId, patch: &ProductPatch) -> LayoutResult<()>;

    /// Insert a product and return the stored record
    async fn insert_one(&self, product: NewProduct) -> LayoutResult<Product>;

    /// Remove every product
    async fn delete_all(&self) -> LayoutResult<()>;

    /// Apply many patches.
    ///
    /// The default walks the batch one call at a time and reports which
    /// products failed; backends that can write atomically override it.
    async fn apply_batch(&self, updates: &[(ProductId, ProductPatch)]) -> LayoutResult<BatchReport> {
        let mut report = BatchReport::default();
        for (id, patch) in updates {
            match self.update_one(*id, patch).await {
                Ok(()) => report.applied.push(*id),
                Err(e) => {
                    warn!(product = %id, error = %e, "Product update failed");
                    report.failed.push((*id, e.to_string()));
                }
            }
        }
        Ok(report)
    }
}

/// Apply a batch to an in-memory product list, all or nothing.
///
/// When any id is unknown nothing is written and every unknown id is
/// reported as failed.
fn apply_atomically(
    products: &mut [Product],
    updates: &[(ProductId, ProductPatch)],
) -> BatchReport {
    let known: HashSet<ProductId> = products.iter().map(|p| p.id).collect();
    let failed: Vec<(ProductId, String)> = updates
        .iter()
        .filter(|(id, _)| !known.contains(id))
        .map(|(id, _)| (*id, "unknown product".to_string()))
        .collect();

    if !failed.is_empty() {
        return BatchReport {
            applied: Vec::new(),
            failed,
        };
    }

    for (id, patch) in updates {
        if let Some(product) = products.iter_mut().find(|p| p.id == *id) {
            patch.apply(product);
        }
    }
    BatchReport {
        applied: updates.iter().map(|(id, _)| *id).collect(),
        failed: Vec::new(),
    }
}

// ============================================================================
// Memory Store
// ============================================================================

/// Products held in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    products: RwLock<Vec<Product>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list(&self) -> LayoutResult<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn update_one(&self, id: ProductId, patch: &ProductPatch) -> LayoutResult<()> {
        let mut products = self.products.write().await;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| LayoutError::ProductNotFound(id.to_string()))?;
        patch.apply(product);
        Ok(())
    }

    async fn insert_one(&self, product: NewProduct) -> LayoutResult<Product> {
        let product = product.into_product();
        self.products.write().await.push(product.clone());
        Ok(product)
    }

    async fn delete_all(&self) -> LayoutResult<()> {
        self.products.write().await.clear();
        Ok(())
    }

    async fn apply_batch(&self, updates: &[(ProductId, ProductPatch)]) -> LayoutResult<BatchReport> {
        let mut products = self.products.write().await;
        Ok(apply_atomically(&mut products, updates))
    }
}

// ============================================================================
// JSON File Store
// ============================================================================

/// Products stored as a JSON array in a single file.
///
/// A missing file reads as an empty store. Writes go to a sibling temporary
/// file which then replaces the original.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> LayoutResult<Vec<Product>> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Ok(Vec::new());
        }
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| LayoutError::FileRead {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&json).map_err(|e| LayoutError::FileRead {
            path: self.path.clone(),
            message: format!("Invalid product file: {}", e),
        })
    }

    async fn write(&self, products: &[Product]) -> LayoutResult<()> {
        let json = serde_json::to_string_pretty(products)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        let write_err = |e: std::io::Error| LayoutError::FileWrite {
            path: self.path.clone(),
            message: e.to_string(),
        };
        tokio::fs::write(&tmp, json).await.map_err(write_err)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(write_err)?;
        debug!(path = %self.path.display(), count = products.len(), "Product file written");
        Ok(())
    }
}

#[async_trait]
impl ProductStore for JsonFileStore {
    async fn list(&self) -> LayoutResult<Vec<Product>> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    async fn update_one(&self, id: ProductId, patch: &ProductPatch) -> LayoutResult<()> {
        let _guard = self.lock.lock().await;
        let mut products = self.read().await?;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| LayoutError::ProductNotFound(id.to_string()))?;
        patch.apply(product);
        self.write(&products).await
    }

    async fn insert_one(&self, product: NewProduct) -> LayoutResult<Product> {
        let _guard = self.lock.lock().await;
        let mut products = self.read().await?;
        let product = product.into_product();
        products.push(product.clone());
        self.write(&products).await?;
        Ok(product)
    }

    async fn delete_all(&self) -> LayoutResult<()> {
        let _guard = self.lock.lock().await;
        self.write(&[]).await?;
        info!(path = %self.path.display(), "Product store cleared");
        Ok(())
    }

    async fn apply_batch(&self, updates: &[(ProductId, ProductPatch)]) -> LayoutResult<BatchReport> {
        let _guard = self.lock.lock().await;
        let mut products = self.read().await?;
        let report = apply_atomically(&mut products, updates);
        if report.is_complete() {
            self.write(&products).await?;
        }
        Ok(report)
    }
}

// ============================================================================
// Tests
// ============================================================================
