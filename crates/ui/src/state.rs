//! Application State Management for Shelfmap
//!
//! Centralized state using Dioxus 0.7 Signals. The layout itself, the
//! pointer gesture in progress and the undo history all live in the
//! `EditorSession`; this module adds the UI around it (page, dialogs,
//! status bar, map selection, product drag-and-drop).

use dioxus::prelude::*;
use shelfmap_core::{AisleId, ProductId};
use shelfmap_ir::{
    AisleDraft, EditorSession, Product, Settings, StoreLayout, default_aisles, filter_by_tags,
    toggle_tag,
};
use std::path::PathBuf;

// ============================================================================
// Page Navigation
// ============================================================================

/// Application pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// Aisle layout editor
    #[default]
    Editor,
    /// Read-only store map with search and directions
    StoreMap,
}

impl Page {
    pub fn display_name(&self) -> &'static str {
        match self {
            Page::Editor => "Layout Editor",
            Page::StoreMap => "Store Map",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Page::Editor => "🛠️",
            Page::StoreMap => "🗺️",
        }
    }
}

// ============================================================================
// UI State
// ============================================================================

/// Dialog types
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    /// Create-aisle form
    CreateAisle(AisleDraft),
    /// Delete confirmation
    ConfirmDelete(DeleteTarget),
    /// Error details
    Error(String),
}

/// Target for delete confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Aisle(AisleId),
}

/// Status message for the status bar
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

/// Status message severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl StatusLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusLevel::Info => "status-info",
            StatusLevel::Success => "status-success",
            StatusLevel::Warning => "status-warning",
            StatusLevel::Error => "status-error",
        }
    }
}

/// General UI state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub active_page: Page,
    pub active_dialog: Option<Dialog>,
    pub status_message: Option<StatusMessage>,
    /// A save or load is running
    pub busy: bool,
}

impl UiState {
    pub fn navigate(&mut self, page: Page) {
        self.active_page = page;
    }

    pub fn show_dialog(&mut self, dialog: Dialog) {
        self.active_dialog = Some(dialog);
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = None;
    }

    pub fn set_status(&mut self, message: impl Into<String>, level: StatusLevel) {
        self.status_message = Some(StatusMessage {
            text: message.into(),
            level,
        });
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

// ============================================================================
// Store Map State
// ============================================================================

/// Search box, tag filters and selection of the store map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapState {
    pub query: String,
    pub selected: Option<ProductId>,
    /// Category tags the map is narrowed to (empty shows everything)
    pub tags: Vec<String>,
}

impl MapState {
    pub fn toggle_tag(&mut self, tag: &str) {
        toggle_tag(&mut self.tags, tag);
    }

    pub fn clear_tags(&mut self) {
        self.tags.clear();
    }

    pub fn select(&mut self, product: ProductId) {
        self.selected = Some(product);
        self.query.clear();
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.query.clear();
    }
}

// ============================================================================
// Application State
// ============================================================================

/// Main application state container
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub session: EditorSession,
    /// Layout file of the current session (None until saved or opened)
    pub layout_path: Option<PathBuf>,
    /// Products currently being dragged onto an aisle
    pub dragged_product: Option<ProductId>,
    pub map: MapState,
    pub ui: UiState,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(Settings::default())
    }
}

impl AppState {
    /// State with settings from `shelfmap.toml` when present
    pub fn new() -> Self {
        let settings = match Settings::load_or_default(None) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring invalid settings: {}", e);
                Settings::default()
            }
        };
        Self::with_settings(settings)
    }

    /// State with an empty store using the starter aisles
    pub fn with_settings(settings: Settings) -> Self {
        let grid = settings.grid.default_grid();
        let layout = StoreLayout::from_parts(grid, grid.default_door(), default_aisles(grid), Vec::new());
        Self {
            session: EditorSession::new(layout, &settings),
            settings,
            layout_path: None,
            dragged_product: None,
            map: MapState::default(),
            ui: UiState::default(),
        }
    }

    /// Replace the session with freshly loaded products
    pub fn load_products(&mut self, products: Vec<Product>) {
        self.session = EditorSession::from_products(products, &self.settings);
        self.layout_path = None;
        self.after_reload();
    }

    /// Replace the session with a layout opened from a file
    pub fn load_layout(&mut self, layout: StoreLayout, path: PathBuf) {
        self.session = EditorSession::new(layout, &self.settings);
        self.layout_path = Some(path);
        self.after_reload();
    }

    fn after_reload(&mut self) {
        self.dragged_product = None;
        self.map = MapState::default();
        self.ui.close_dialog();
    }

    pub fn store_path(&self) -> PathBuf {
        self.settings.storage.products_path.clone()
    }

    /// Product shown on the map, if it still exists, is placed and passes
    /// the tag filter
    pub fn selected_product(&self) -> Option<&Product> {
        let id = self.map.selected?;
        let tags = &self.map.tags;
        self.session
            .layout()
            .product(id)
            .filter(|p| p.is_placed())
            .filter(|p| tags.is_empty() || tags.iter().any(|t| t == p.tag.trim()))
    }

    /// Products that pass the store map's tag filter
    pub fn visible_products(&self) -> Vec<Product> {
        filter_by_tags(self.session.layout().products(), &self.map.tags)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn window_title(&self) -> String {
        let name = self
            .layout_path
            .as_ref()
            .and_then(|p| p.file_stem())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string());
        let dirty = if self.session.is_dirty() { " •" } else { "" };
        format!("{}{} - {}", name, dirty, crate::NAME)
    }
}

// ============================================================================
// Global State Context
// ============================================================================

/// Global application state signal
pub static APP_STATE: GlobalSignal<AppState> = Signal::global(AppState::new);

/// Report an operation's outcome on the status bar
pub fn report<T, E: std::fmt::Display>(result: Result<T, E>, success: impl FnOnce(&T) -> String) {
    let mut state = APP_STATE.write();
    match result {
        Ok(value) => {
            let message = success(&value);
            state.ui.set_status(message, StatusLevel::Success);
        }
        Err(e) => {
            tracing::error!("{}", e);
            state.ui.set_status(e.to_string(), StatusLevel::Error);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
