//! Undo/redo log of committed layout edits

use crate::layout::StoreLayout;
use shelfmap_core::{LayoutError, LayoutResult};

/// Default number of undo steps kept
pub const DEFAULT_HISTORY_DEPTH: usize = 50;

// ============================================================================
// History (Undo/Redo)
// ============================================================================

/// History state for undo/redo operations
#[derive(Debug, Clone)]
pub struct History {
    /// Past states (for undo)
    past: Vec<HistorySnapshot>,
    /// Future states (for redo)
    future: Vec<HistorySnapshot>,
    /// Maximum history size
    max_size: usize,
}

impl Default for History {
    fn default() -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            max_size: DEFAULT_HISTORY_DEPTH,
        }
    }
}

impl History {
    /// Create new history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create history with custom max size
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            max_size,
            ..Default::default()
        }
    }

    /// Push a new snapshot (clears redo stack)
    pub fn push(&mut self, snapshot: HistorySnapshot) {
        self.past.push(snapshot);
        self.future.clear();

        if self.past.len() > self.max_size {
            self.past.remove(0);
        }
    }

    /// Undo: pop from past, push current to future
    pub fn undo(&mut self, current: HistorySnapshot) -> Option<HistorySnapshot> {
        let previous = self.past.pop()?;
        self.future.push(current);
        Some(previous)
    }

    /// Redo: pop from future, push current to past
    pub fn redo(&mut self, current: HistorySnapshot) -> Option<HistorySnapshot> {
        let next = self.future.pop()?;
        self.past.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    pub fn undo_count(&self) -> usize {
        self.past.len()
    }

    pub fn redo_count(&self) -> usize {
        self.future.len()
    }

    /// Label of the step `undo` would revert
    pub fn next_undo_action(&self) -> Option<&str> {
        self.past.last().map(|s| s.action.as_str())
    }
}

/// A serialized layout state
#[derive(Debug, Clone)]
pub struct HistorySnapshot {
    /// Description of the action that followed this state
    pub action: String,
    /// Serialized layout
    pub layout_json: String,
}

impl HistorySnapshot {
    /// Capture a layout
    pub fn new(action: impl Into<String>, layout: &StoreLayout) -> LayoutResult<Self> {
        let layout_json = serde_json::to_string(layout)
            .map_err(|e| LayoutError::Internal(format!("Failed to serialize layout: {}", e)))?;

        Ok(Self {
            action: action.into(),
            layout_json,
        })
    }

    /// Restore the captured layout
    pub fn restore(&self) -> LayoutResult<StoreLayout> {
        serde_json::from_str(&self.layout_json)
            .map_err(|e| LayoutError::Internal(format!("Failed to deserialize layout: {}", e)))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn snapshot(label: &str, door: i64) -> HistorySnapshot {
        let mut layout = StoreLayout::new(Grid::new(8, 10));
        layout.set_door(door);
        HistorySnapshot::new(label, &layout).unwrap()
    }

    #[test]
    fn test_undo_redo() {
        let mut history = History::new();
        history.push(snapshot("Move door", 1));

        let previous = history.undo(snapshot("current", 2)).unwrap();
        assert_eq!(previous.restore().unwrap().door_column(), 1);
        assert!(history.can_redo());

        let next = history.redo(snapshot("current", 1)).unwrap();
        assert_eq!(next.restore().unwrap().door_column(), 2);
        assert_eq!(history.undo_count(), 1);
        assert_eq!(history.redo_count(), 0);
    }

    #[test]
    fn test_push_clears_redo() {
        let mut history = History::new();
        history.push(snapshot("a", 1));
        history.undo(snapshot("b", 2));
        history.push(snapshot("c", 3));
        assert!(!history.can_redo());
        assert_eq!(history.next_undo_action(), Some("c"));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = History::with_max_size(3);
        for i in 0..5 {
            history.push(snapshot("step", i));
        }
        assert_eq!(history.undo_count(), 3);
        assert!(History::new().undo(snapshot("x", 0)).is_none());
    }
}
