//! Editor session
//!
//! Ties the layout, the gesture controller and the undo log together. Every
//! committed change is applied to a copy of the layout first, so a failed
//! edit leaves the session untouched.

use crate::aisle::Aisle;
use crate::grid::{Grid, GridBounds, GridMetrics};
use crate::history::{History, HistorySnapshot};
use crate::interaction::{InteractionController, LayoutEdit};
use crate::layout::StoreLayout;
use crate::persistence::build_patches;
use crate::product::{Product, ProductPatch};
use crate::settings::Settings;
use rand::Rng;
use shelfmap_core::{
    AisleId, Category, GridCell, LayoutError, LayoutResult, Position, ProductId, Size,
};
use std::borrow::Cow;
use tracing::info;

// ============================================================================
// Aisle Draft
// ============================================================================

/// Form state of the "create aisle" dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AisleDraft {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub category: Category,
}

impl Default for AisleDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            width: 1,
            height: 1,
            category: Category::Grocery,
        }
    }
}

impl AisleDraft {
    /// Whether the submit button is enabled
    pub fn can_submit(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Check the draft against the current grid
    pub fn validate_for(&self, grid: Grid) -> LayoutResult<()> {
        if !self.can_submit() {
            return Err(LayoutError::validation("Aisle name is required"));
        }
        if !(1..=grid.columns).contains(&self.width) {
            return Err(LayoutError::aisle_validation(
                self.name.trim(),
                format!("Width must be between 1 and {}", grid.columns),
            ));
        }
        if !(1..=grid.rows).contains(&self.height) {
            return Err(LayoutError::aisle_validation(
                self.name.trim(),
                format!("Height must be between 1 and {}", grid.rows),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Editor Session
// ============================================================================

/// One editing session over a store layout
#[derive(Debug, Clone)]
pub struct EditorSession {
    layout: StoreLayout,
    history: History,
    controller: InteractionController,
    bounds: GridBounds,
    canvas: Size,
    caps: Size,
    dirty: bool,
}

impl EditorSession {
    /// Start a session on a layout
    pub fn new(layout: StoreLayout, settings: &Settings) -> Self {
        let canvas = layout.grid().default_canvas();
        Self {
            layout,
            history: History::with_max_size(settings.history.depth),
            controller: InteractionController::new(),
            bounds: settings.grid,
            canvas,
            caps: settings.canvas.caps(),
            dirty: false,
        }
    }

    /// Start a session on a product list
    pub fn from_products(products: Vec<Product>, settings: &Settings) -> Self {
        Self::new(StoreLayout::from_products(products, &settings.grid), settings)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The committed layout
    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    /// The layout to draw: committed state plus any staged drag
    pub fn display_layout(&self) -> Cow<'_, StoreLayout> {
        match self.controller.preview(&self.layout) {
            Some(preview) => Cow::Owned(preview),
            None => Cow::Borrowed(&self.layout),
        }
    }

    /// Pixel mapping for the current canvas
    pub fn metrics(&self) -> GridMetrics {
        GridMetrics::with_caps(self.layout.grid(), self.canvas, self.caps)
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// Set the canvas size used for pointer mapping
    pub fn set_canvas(&mut self, canvas: Size) {
        self.canvas = canvas;
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Label of the edit `undo` would revert
    pub fn next_undo_action(&self) -> Option<&str> {
        self.history.next_undo_action()
    }

    // ========================================================================
    // Pointer gestures
    // ========================================================================

    pub fn pointer_down(&mut self, position: Position) -> bool {
        let metrics = self.metrics();
        self.controller.pointer_down(&self.layout, &metrics, position)
    }

    pub fn pointer_move(&mut self, position: Position) {
        let metrics = self.metrics();
        self.controller.pointer_move(&self.layout, &metrics, position);
    }

    /// Release the pointer, committing the staged edit. Returns whether the
    /// layout changed.
    pub fn pointer_up(&mut self) -> LayoutResult<bool> {
        let edit = self.controller.pointer_up();
        self.commit_edit(edit)
    }

    /// Pointer left the canvas; behaves like a release
    pub fn pointer_leave(&mut self) -> LayoutResult<bool> {
        let edit = self.controller.pointer_leave();
        self.commit_edit(edit)
    }

    /// Abort the current gesture (Escape)
    pub fn cancel_gesture(&mut self) {
        self.controller.cancel();
    }

    fn commit_edit(&mut self, edit: Option<LayoutEdit>) -> LayoutResult<bool> {
        match edit {
            Some(edit) => {
                let before = self.layout.clone();
                self.commit(edit.describe(), |layout| edit.apply(layout))?;
                Ok(before != self.layout)
            }
            None => Ok(false),
        }
    }

    // ========================================================================
    // Committed edits
    // ========================================================================

    /// Apply a change as one undoable step
    pub fn commit<T>(
        &mut self,
        action: &str,
        change: impl FnOnce(&mut StoreLayout) -> LayoutResult<T>,
    ) -> LayoutResult<T> {
        let snapshot = HistorySnapshot::new(action, &self.layout)?;
        let mut next = self.layout.clone();
        let result = change(&mut next)?;
        self.history.push(snapshot);
        self.layout = next;
        self.dirty = true;
        Ok(result)
    }

    /// Create an aisle from the dialog draft. On error nothing is added and
    /// the dialog should stay open.
    pub fn create_aisle(&mut self, draft: &AisleDraft) -> LayoutResult<AisleId> {
        draft.validate_for(self.layout.grid())?;
        self.commit("Create aisle", |layout| {
            layout.create_aisle(&draft.name, draft.width, draft.height, draft.category.as_tag())
        })
    }

    /// Delete an aisle (the caller owns the confirmation step)
    pub fn delete_aisle(&mut self, aisle_id: AisleId) -> LayoutResult<Aisle> {
        self.commit("Delete aisle", |layout| layout.delete_aisle(aisle_id))
    }

    pub fn move_aisle(&mut self, aisle_id: AisleId, x: i64, y: i64) -> LayoutResult<GridCell> {
        self.commit("Move aisle", |layout| layout.move_aisle(aisle_id, x, y))
    }

    /// Drop a product card onto an aisle
    pub fn assign_product(
        &mut self,
        product_id: ProductId,
        aisle_id: AisleId,
    ) -> LayoutResult<GridCell> {
        self.assign_product_with_rng(product_id, aisle_id, &mut rand::thread_rng())
    }

    pub fn assign_product_with_rng<R: Rng + ?Sized>(
        &mut self,
        product_id: ProductId,
        aisle_id: AisleId,
        rng: &mut R,
    ) -> LayoutResult<GridCell> {
        self.commit("Assign product", |layout| {
            layout.assign_product_with_rng(product_id, aisle_id, rng)
        })
    }

    pub fn unassign_product(&mut self, product_id: ProductId) -> LayoutResult<()> {
        self.commit("Unassign product", |layout| layout.unassign_product(product_id))
    }

    /// Resize the grid within the editor bounds
    pub fn resize_grid(&mut self, rows: u32, columns: u32) -> LayoutResult<Grid> {
        let grid = self.bounds.grid(rows, columns);
        if grid == self.layout.grid() {
            return Ok(grid);
        }
        self.commit("Resize grid", |layout| {
            layout.resize_grid(grid);
            Ok(grid)
        })?;
        self.canvas = grid.default_canvas();
        Ok(grid)
    }

    pub fn set_door(&mut self, column: i64) -> LayoutResult<u32> {
        self.commit("Move door", |layout| Ok(layout.set_door(column)))
    }

    // ========================================================================
    // Undo / Redo
    // ========================================================================

    /// Revert the last committed edit. Returns whether anything changed.
    pub fn undo(&mut self) -> LayoutResult<bool> {
        let current = HistorySnapshot::new("Redo", &self.layout)?;
        match self.history.undo(current) {
            Some(previous) => {
                self.layout = previous.restore()?;
                self.dirty = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Re-apply the last undone edit. Returns whether anything changed.
    pub fn redo(&mut self) -> LayoutResult<bool> {
        let current = HistorySnapshot::new("Undo", &self.layout)?;
        match self.history.redo(current) {
            Some(next) => {
                self.layout = next.restore()?;
                self.dirty = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ========================================================================
    // Save
    // ========================================================================

    /// Snapshot every product's aisle fields plus the door column.
    ///
    /// Any staged drag is ignored; only committed state is saved.
    pub fn save_patches(&self) -> Vec<(ProductId, ProductPatch)> {
        build_patches(&self.layout)
    }

    /// Record a successful save
    pub fn mark_saved(&mut self) {
        self.dirty = false;
        info!(products = self.layout.products().len(), "Layout saved");
    }

    /// Replace the layout with freshly loaded data and reset the undo log
    pub fn reload(&mut self, layout: StoreLayout) {
        self.canvas = layout.grid().default_canvas();
        self.layout = layout;
        self.history.clear();
        self.controller.cancel();
        self.dirty = false;
    }

    pub fn into_layout(self) -> StoreLayout {
        self.layout
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session() -> (EditorSession, AisleId, ProductId) {
        let aisle = Aisle::new("Grocery", "grocery").at(2, 2).with_size(2, 2);
        let id = aisle.id;
        let product = Product::new("Milk").at(2, 2).in_aisle(id, "Grocery");
        let pid = product.id;
        let layout = StoreLayout::from_parts(Grid::new(8, 10), 5, vec![aisle], vec![product]);
        (EditorSession::new(layout, &Settings::default()), id, pid)
    }

    #[test]
    fn test_empty_name_keeps_dialog_open() {
        let (mut session, _, _) = session();
        let draft = AisleDraft::default();
        assert!(!draft.can_submit());
        assert!(session.create_aisle(&draft).is_err());
        assert_eq!(session.layout().aisles().len(), 1);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_create_aisle_from_draft() {
        let (mut session, _, _) = session();
        let draft = AisleDraft {
            name: "Snacks".to_string(),
            width: 2,
            height: 1,
            category: Category::Toys,
        };

        let id = session.create_aisle(&draft).unwrap();

        let aisle = session.layout().aisle(id).unwrap();
        assert_eq!(aisle.tag, "toys");
        assert_eq!((aisle.x, aisle.width), (4, 2));
        assert!(session.is_dirty());
        assert!(session.can_undo());
    }

    #[test]
    fn test_draft_size_bounded_by_grid() {
        let (mut session, _, _) = session();
        let draft = AisleDraft {
            name: "Huge".to_string(),
            width: 11,
            height: 1,
            category: Category::Home,
        };
        assert!(session.create_aisle(&draft).unwrap_err().is_validation());
    }

    #[test]
    fn test_drag_commits_on_release_only() {
        let (mut session, id, pid) = session();

        assert!(session.pointer_down(Position::new(170.0, 130.0)));
        session.pointer_move(Position::new(330.0, 250.0));

        assert_eq!(session.layout().aisle(id).unwrap().x, 2);
        assert_eq!(session.display_layout().aisle(id).unwrap().x, 4);
        // A save during the drag sees the committed position
        let patches = session.save_patches();
        assert_eq!(patches[0].1.aisle_column, Some(2));

        assert!(session.pointer_up().unwrap());
        assert_eq!(session.layout().aisle(id).unwrap().x, 4);
        assert_eq!(session.layout().product(pid).unwrap().cell(), Some(GridCell::new(4, 4)));
    }

    #[test]
    fn test_escape_cancels_drag() {
        let (mut session, id, _) = session();
        session.pointer_down(Position::new(170.0, 130.0));
        session.pointer_move(Position::new(330.0, 250.0));
        session.cancel_gesture();
        assert!(!session.pointer_up().unwrap());
        assert_eq!(session.layout().aisle(id).unwrap().x, 2);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_undo_redo_roundtrip() {
        let (mut session, id, pid) = session();
        session.move_aisle(id, 6, 4).unwrap();
        session.delete_aisle(id).unwrap();
        assert!(session.layout().aisle(id).is_none());

        assert!(session.undo().unwrap());
        assert_eq!(session.layout().aisle(id).unwrap().x, 6);
        assert!(session.undo().unwrap());
        assert_eq!(session.layout().aisle(id).unwrap().x, 2);
        assert!(!session.undo().unwrap());

        assert!(session.redo().unwrap());
        assert_eq!(session.layout().product(pid).unwrap().cell(), Some(GridCell::new(4, 6)));
    }

    #[test]
    fn test_failed_edit_leaves_no_history() {
        let (mut session, _, pid) = session();
        assert!(session.assign_product(pid, uuid::Uuid::new_v4()).is_err());
        assert!(!session.can_undo());
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_assign_and_unassign() {
        let (mut session, id, pid) = session();
        session.unassign_product(pid).unwrap();
        assert_eq!(session.layout().members(id).count(), 0);

        let mut rng = StdRng::seed_from_u64(1);
        let cell = session.assign_product_with_rng(pid, id, &mut rng).unwrap();
        assert!(session.layout().aisle(id).unwrap().contains(cell));
    }

    #[test]
    fn test_resize_uses_bounds() {
        let (mut session, _, _) = session();
        let grid = session.resize_grid(2, 40).unwrap();
        assert_eq!(grid, Grid::new(4, 20));
        assert_eq!(session.canvas(), grid.default_canvas());
    }

    #[test]
    fn test_mark_saved() {
        let (mut session, _, _) = session();
        session.set_door(2).unwrap();
        assert!(session.is_dirty());
        session.mark_saved();
        assert!(!session.is_dirty());
        assert_eq!(session.save_patches()[0].1.layout_metadata.door_column, 2);
    }
}
