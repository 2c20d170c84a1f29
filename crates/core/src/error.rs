//! Error types for Shelfmap
//!
//! This module provides unified error handling across the layout model,
//! the product store bridge, rendering backends and file IO.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Shelfmap
#[derive(Debug, Error)]
pub enum LayoutError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Aisle validation failed
    #[error("Aisle validation failed for '{aisle}': {message}")]
    AisleValidation { aisle: String, message: String },

    /// Product validation failed
    #[error("Product validation failed for '{product}': {message}")]
    ProductValidation { product: String, message: String },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    /// Aisle not found
    #[error("Aisle not found: {0}")]
    AisleNotFound(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Layout or store file not found
    #[error("File not found at path: {0}")]
    FileNotFound(PathBuf),

    // ========================================================================
    // Store Errors
    // ========================================================================
    /// A single store call failed
    #[error("Product store error: {0}")]
    Store(String),

    /// A batched save did not fully apply
    #[error("Batch update failed for {failed} of {total} products: {message}")]
    BatchFailed {
        failed: usize,
        total: usize,
        message: String,
    },

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Invalid layout file format
    #[error("Invalid layout file format: {0}")]
    InvalidLayoutFormat(String),

    /// CSV parse or write failure
    #[error("CSV error: {0}")]
    Csv(String),

    /// Schema version mismatch
    #[error("Schema version mismatch: expected {expected}, found {found}")]
    SchemaVersionMismatch { expected: u32, found: u32 },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Rendering Errors
    // ========================================================================
    /// Image encoding or font loading failed
    #[error("Render error: {0}")]
    Render(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Operation cancelled by user
    #[error("Operation cancelled")]
    Cancelled,

    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl LayoutError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        LayoutError::Validation(msg.into())
    }

    /// Create an aisle validation error
    pub fn aisle_validation(aisle: impl Into<String>, msg: impl Into<String>) -> Self {
        LayoutError::AisleValidation {
            aisle: aisle.into(),
            message: msg.into(),
        }
    }

    /// Create a product validation error
    pub fn product_validation(product: impl Into<String>, msg: impl Into<String>) -> Self {
        LayoutError::ProductValidation {
            product: product.into(),
            message: msg.into(),
        }
    }

    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        LayoutError::Store(msg.into())
    }

    /// Create a render error
    pub fn render(msg: impl Into<String>) -> Self {
        LayoutError::Render(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        LayoutError::Internal(msg.into())
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        LayoutError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LayoutError::Validation(_)
                | LayoutError::AisleValidation { .. }
                | LayoutError::ProductValidation { .. }
        )
    }

    /// Check if this error is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LayoutError::AisleNotFound(_)
                | LayoutError::ProductNotFound(_)
                | LayoutError::FileNotFound(_)
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            LayoutError::Io(_) | LayoutError::FileRead { .. } | LayoutError::FileWrite { .. }
        )
    }
}

/// Result type alias using LayoutError
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> LayoutResult<T>;
}

impl<T, E: Into<LayoutError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> LayoutResult<T> {
        self.map_err(|e| {
            let err: LayoutError = e.into();
            LayoutError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
