//! Pointer gesture controller for the layout editor
//!
//! Gestures are staged: while the pointer moves, the controller only tracks
//! a preview edit. The edit is handed back on release (or when the pointer
//! leaves the canvas) so the caller can commit it as a single undoable step.
//! Cancelling drops the staged edit.

use crate::grid::GridMetrics;
use crate::layout::StoreLayout;
use shelfmap_core::{AisleId, LayoutResult, Position};
use tracing::debug;

// ============================================================================
// Layout Edits
// ============================================================================

/// A committed-or-staged change produced by a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutEdit {
    /// Move an aisle's top-left to (x = column, y = row)
    MoveAisle { aisle_id: AisleId, x: i64, y: i64 },
    /// Move the door to a column
    MoveDoor { column: u32 },
}

impl LayoutEdit {
    /// Apply the edit to a layout
    pub fn apply(&self, layout: &mut StoreLayout) -> LayoutResult<()> {
        match *self {
            LayoutEdit::MoveAisle { aisle_id, x, y } => {
                layout.move_aisle(aisle_id, x, y)?;
            }
            LayoutEdit::MoveDoor { column } => {
                layout.set_door(column as i64);
            }
        }
        Ok(())
    }

    /// Short label for history entries
    pub fn describe(&self) -> &'static str {
        match self {
            LayoutEdit::MoveAisle { .. } => "Move aisle",
            LayoutEdit::MoveDoor { .. } => "Move door",
        }
    }
}

// ============================================================================
// Gesture State
// ============================================================================

/// In-progress pointer gesture
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Dragging an aisle; `grab_offset` is the pointer position relative to
    /// the aisle's top-left pixel when the drag started.
    AisleDrag {
        aisle_id: AisleId,
        grab_offset: Position,
        staged: Option<(i64, i64)>,
    },
    /// Dragging the door marker
    DoorDrag { staged: Option<u32> },
}

/// Translates pointer events into staged layout edits
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    gesture: Gesture,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current gesture
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    /// Start a gesture. The door marker takes priority over aisles, and the
    /// top-most aisle under the pointer wins. Returns whether a drag started.
    pub fn pointer_down(
        &mut self,
        layout: &StoreLayout,
        metrics: &GridMetrics,
        position: Position,
    ) -> bool {
        if metrics.door_rect(layout.door_column()).contains(position) {
            debug!("Door drag started");
            self.gesture = Gesture::DoorDrag { staged: None };
            return true;
        }

        let hit = layout
            .aisles()
            .iter()
            .rev()
            .find(|aisle| metrics.aisle_rect(aisle).contains(position));

        match hit {
            Some(aisle) => {
                let origin = metrics.aisle_rect(aisle).position;
                debug!(aisle = %aisle.name, "Aisle drag started");
                self.gesture = Gesture::AisleDrag {
                    aisle_id: aisle.id,
                    grab_offset: position - origin,
                    staged: None,
                };
                true
            }
            None => {
                self.gesture = Gesture::Idle;
                false
            }
        }
    }

    /// Update the staged edit for the current gesture
    pub fn pointer_move(&mut self, layout: &StoreLayout, metrics: &GridMetrics, position: Position) {
        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::AisleDrag {
                aisle_id,
                grab_offset,
                staged,
            } => {
                let Some(aisle) = layout.aisle(*aisle_id) else {
                    self.gesture = Gesture::Idle;
                    return;
                };
                let (x, y) = metrics.snap_nearest(position - *grab_offset);
                let (x, y) = layout
                    .grid()
                    .clamp_origin(x, y, aisle.width, aisle.height);
                *staged = Some((x as i64, y as i64));
            }
            Gesture::DoorDrag { staged } => {
                *staged = Some(metrics.door_column_at(position.x));
            }
        }
    }

    /// Finish the gesture, returning the edit to commit (if the pointer moved)
    pub fn pointer_up(&mut self) -> Option<LayoutEdit> {
        let edit = self.staged_edit();
        if let Some(edit) = &edit {
            debug!(edit = edit.describe(), "Gesture finished");
        }
        self.gesture = Gesture::Idle;
        edit
    }

    /// Leaving the canvas ends the gesture like a release
    pub fn pointer_leave(&mut self) -> Option<LayoutEdit> {
        self.pointer_up()
    }

    /// Abort the gesture, discarding any staged edit
    pub fn cancel(&mut self) {
        if self.is_dragging() {
            debug!("Gesture cancelled");
        }
        self.gesture = Gesture::Idle;
    }

    /// The edit the current gesture would commit
    pub fn staged_edit(&self) -> Option<LayoutEdit> {
        match self.gesture {
            Gesture::Idle => None,
            Gesture::AisleDrag {
                aisle_id, staged, ..
            } => staged.map(|(x, y)| LayoutEdit::MoveAisle { aisle_id, x, y }),
            Gesture::DoorDrag { staged } => staged.map(|column| LayoutEdit::MoveDoor { column }),
        }
    }

    /// A copy of the layout with the staged edit applied, for live drawing
    pub fn preview(&self, layout: &StoreLayout) -> Option<StoreLayout> {
        let edit = self.staged_edit()?;
        let mut preview = layout.clone();
        edit.apply(&mut preview).ok()?;
        Some(preview)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aisle::Aisle;
    use crate::grid::Grid;
    use crate::product::Product;
    use shelfmap_core::GridCell;

    fn setup() -> (StoreLayout, GridMetrics, AisleId) {
        let aisle = Aisle::new("Grocery", "grocery").at(2, 2).with_size(2, 2);
        let id = aisle.id;
        let product = Product::new("Milk").at(2, 2).in_aisle(id, "Grocery");
        let layout = StoreLayout::from_parts(Grid::new(8, 10), 5, vec![aisle], vec![product]);
        let metrics = GridMetrics::for_grid(Grid::new(8, 10));
        (layout, metrics, id)
    }

    #[test]
    fn test_aisle_drag_is_staged() {
        let (layout, metrics, id) = setup();
        let mut controller = InteractionController::new();

        // Grab 10px into the aisle at (160, 120)
        assert!(controller.pointer_down(&layout, &metrics, Position::new(170.0, 130.0)));
        controller.pointer_move(&layout, &metrics, Position::new(330.0, 250.0));

        // Layout untouched while dragging
        assert_eq!(layout.aisle(id).unwrap().x, 2);
        let preview = controller.preview(&layout).unwrap();
        assert_eq!(preview.aisle(id).unwrap().origin(), GridCell::new(4, 4));

        let edit = controller.pointer_up().unwrap();
        assert_eq!(edit, LayoutEdit::MoveAisle { aisle_id: id, x: 4, y: 4 });
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_aisle_drag_clamps_to_grid() {
        let (layout, metrics, id) = setup();
        let mut controller = InteractionController::new();

        controller.pointer_down(&layout, &metrics, Position::new(170.0, 130.0));
        controller.pointer_move(&layout, &metrics, Position::new(5000.0, -400.0));

        assert_eq!(
            controller.pointer_leave(),
            Some(LayoutEdit::MoveAisle { aisle_id: id, x: 9, y: 1 })
        );
    }

    #[test]
    fn test_commit_moves_members() {
        let (mut layout, metrics, id) = setup();
        let mut controller = InteractionController::new();

        controller.pointer_down(&layout, &metrics, Position::new(170.0, 130.0));
        controller.pointer_move(&layout, &metrics, Position::new(330.0, 250.0));
        controller.pointer_up().unwrap().apply(&mut layout).unwrap();

        let member = layout.members(id).next().unwrap();
        assert_eq!(member.cell(), Some(GridCell::new(4, 4)));
    }

    #[test]
    fn test_door_drag() {
        let (layout, metrics, _) = setup();
        let mut controller = InteractionController::new();

        assert!(controller.pointer_down(&layout, &metrics, Position::new(410.0, 535.0)));
        controller.pointer_move(&layout, &metrics, Position::new(170.0, 10.0));
        assert_eq!(controller.pointer_up(), Some(LayoutEdit::MoveDoor { column: 2 }));

        controller.pointer_down(&layout, &metrics, Position::new(410.0, 535.0));
        controller.pointer_move(&layout, &metrics, Position::new(-50.0, 10.0));
        assert_eq!(controller.pointer_up(), Some(LayoutEdit::MoveDoor { column: 0 }));
    }

    #[test]
    fn test_cancel_discards_edit() {
        let (layout, metrics, _) = setup();
        let mut controller = InteractionController::new();

        controller.pointer_down(&layout, &metrics, Position::new(170.0, 130.0));
        controller.pointer_move(&layout, &metrics, Position::new(330.0, 250.0));
        controller.cancel();

        assert_eq!(controller.pointer_up(), None);
    }

    #[test]
    fn test_press_on_empty_cell() {
        let (layout, metrics, _) = setup();
        let mut controller = InteractionController::new();
        assert!(!controller.pointer_down(&layout, &metrics, Position::new(700.0, 300.0)));
        controller.pointer_move(&layout, &metrics, Position::new(100.0, 100.0));
        assert_eq!(controller.pointer_up(), None);
    }

    #[test]
    fn test_click_without_move_commits_nothing() {
        let (layout, metrics, _) = setup();
        let mut controller = InteractionController::new();
        controller.pointer_down(&layout, &metrics, Position::new(170.0, 130.0));
        assert_eq!(controller.pointer_up(), None);
    }
}
