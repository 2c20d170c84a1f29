//! Core traits for Shelfmap
//!
//! This module defines the behaviors shared by layout records.

use crate::error::LayoutResult;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
///
/// # Example
///
/// ```rust,ignore
/// use shelfmap_core::{LayoutError, LayoutResult, Validatable};
///
/// struct Shelf {
///     name: String,
/// }
///
/// impl Validatable for Shelf {
///     fn validate(&self) -> LayoutResult<()> {
///         if self.name.trim().is_empty() {
///             return Err(LayoutError::validation("Shelf name cannot be empty"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or a `LayoutError` describing the problem.
    fn validate(&self) -> LayoutResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;

    struct Label(&'static str);

    impl Validatable for Label {
        fn validate(&self) -> LayoutResult<()> {
            if self.0.is_empty() {
                return Err(LayoutError::validation("label is empty"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_default_methods() {
        assert!(Label("A").is_valid());
        assert!(Label("A").validation_errors().is_empty());

        let errors = Label("").validation_errors();
        assert_eq!(errors, vec!["Validation error: label is empty".to_string()]);
        assert!(!Label("").is_valid());
    }
}
