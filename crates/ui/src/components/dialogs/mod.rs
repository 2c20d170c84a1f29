//! # Dialog Components
//!
//! Modal dialogs of the layout editor.
//!
//! - **CreateAisleDialog**: name, size and category of a new aisle
//! - **ConfirmDeleteDialog**: confirmation before deleting an aisle

// ============================================================================
// Module Declarations
// ============================================================================

pub mod confirm_delete;
pub mod create_aisle;

// ============================================================================
// Re-exports
// ============================================================================

pub use confirm_delete::ConfirmDeleteDialog;
pub use create_aisle::CreateAisleDialog;
