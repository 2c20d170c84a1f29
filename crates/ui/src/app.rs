//! Main Application Component for Shelfmap
//!
//! Root Dioxus component: toolbar with the file and edit actions, page tabs,
//! the active page, the status bar and the modal dialog overlay.

use dioxus::prelude::*;
use shelfmap_core::LayoutError;

use crate::components::{
    AislePanel, ConfirmDeleteDialog, CreateAisleDialog, EditorCanvas, GridControls, StoreMap,
};
use crate::file_ops;
use crate::state::{APP_STATE, Dialog, Page, StatusLevel, report};

// ============================================================================
// Main App Component
// ============================================================================

/// Root application component
#[component]
pub fn App() -> Element {
    use_effect(|| {
        tracing::info!("Shelfmap UI initialized");
    });

    let title = APP_STATE.read().window_title();
    dioxus::desktop::use_window().set_title(&title);

    rsx! {
        div {
            class: "app-container",
            Toolbar {}
            MainContent {}
            StatusBar {}
            DialogOverlay {}
        }
    }
}

// ============================================================================
// Async flows
// ============================================================================

/// Report a failed flow; a cancelled file dialog is not an error
fn report_failure(action: &str, error: LayoutError) {
    if matches!(error, LayoutError::Cancelled) {
        tracing::debug!("{} cancelled by user", action);
        return;
    }
    tracing::error!("{} failed: {}", action, error);
    let message = format!("{} failed: {}", action, error);
    let mut state = APP_STATE.write();
    state.ui.set_status(message.clone(), StatusLevel::Error);
    state.ui.show_dialog(Dialog::Error(message));
}

fn set_busy(busy: bool) {
    APP_STATE.write().ui.busy = busy;
}

fn load_products() {
    spawn(async move {
        let store_path = APP_STATE.read().store_path();
        set_busy(true);
        let result = file_ops::load_products(&store_path).await;
        set_busy(false);
        match result {
            Ok(products) => {
                let count = products.len();
                let mut state = APP_STATE.write();
                state.load_products(products);
                state.ui.set_status(format!("Loaded {} products", count), StatusLevel::Success);
            }
            Err(e) => report_failure("Load", e),
        }
    });
}

fn save_products() {
    spawn(async move {
        let (store_path, layout) = {
            let state = APP_STATE.read();
            (state.store_path(), state.session.layout().clone())
        };
        set_busy(true);
        let result = file_ops::save_products(&store_path, &layout).await;
        set_busy(false);
        match result {
            Ok(batch) => {
                let mut state = APP_STATE.write();
                state.session.mark_saved();
                state.ui.set_status(
                    format!("Saved {} products", batch.applied.len()),
                    StatusLevel::Success,
                );
            }
            Err(e) => report_failure("Save", e),
        }
    });
}

fn open_layout() {
    spawn(async move {
        match file_ops::open_layout(None).await {
            Ok((layout, path)) => {
                let mut state = APP_STATE.write();
                state.load_layout(layout, path.clone());
                state
                    .ui
                    .set_status(format!("Opened {}", path.display()), StatusLevel::Success);
            }
            Err(e) => report_failure("Open", e),
        }
    });
}

fn save_layout() {
    spawn(async move {
        let (layout, existing) = {
            let state = APP_STATE.read();
            (state.session.layout().clone(), state.layout_path.clone())
        };
        match file_ops::save_layout_file(&layout, existing).await {
            Ok(path) => {
                let mut state = APP_STATE.write();
                state.layout_path = Some(path.clone());
                state
                    .ui
                    .set_status(format!("Layout saved to {}", path.display()), StatusLevel::Success);
            }
            Err(e) => report_failure("Save layout", e),
        }
    });
}

fn import_csv() {
    spawn(async move {
        let store_path = APP_STATE.read().store_path();
        match file_ops::import_csv(&store_path).await {
            Ok(products) => {
                let count = products.len();
                let mut state = APP_STATE.write();
                state.load_products(products);
                state
                    .ui
                    .set_status(format!("Imported {} products", count), StatusLevel::Success);
            }
            Err(e) => report_failure("Import", e),
        }
    });
}

fn export_csv() {
    spawn(async move {
        let products = APP_STATE.read().session.layout().products().to_vec();
        match file_ops::export_csv(&products).await {
            Ok(path) => APP_STATE
                .write()
                .ui
                .set_status(format!("Exported to {}", path.display()), StatusLevel::Success),
            Err(e) => report_failure("Export", e),
        }
    });
}

// ============================================================================
// Toolbar Component
// ============================================================================

/// Top toolbar with actions and page tabs
#[component]
fn Toolbar() -> Element {
    let state = APP_STATE.read();
    let busy = state.ui.busy;
    let is_dirty = state.session.is_dirty();
    let can_undo = state.session.can_undo();
    let can_redo = state.session.can_redo();
    let current_page = state.ui.active_page;
    drop(state);
    let name = crate::NAME;

    rsx! {
        header {
            class: "toolbar",

            div {
                class: "toolbar-brand",
                span { "🛒" }
                span { "{name}" }
            }

            div {
                class: "toolbar-group",
                ToolbarButton { icon: "📥", label: "Load Products", disabled: busy, onclick: move |_| load_products() }
                ToolbarButton { icon: "💾", label: "Save Products", disabled: busy || !is_dirty, onclick: move |_| save_products() }
            }

            div { class: "toolbar-separator" }

            div {
                class: "toolbar-group",
                ToolbarButton { icon: "📂", label: "Open Layout", onclick: move |_| open_layout() }
                ToolbarButton { icon: "🗂️", label: "Save Layout", onclick: move |_| save_layout() }
                ToolbarButton { icon: "⬆️", label: "Import CSV", disabled: busy, onclick: move |_| import_csv() }
                ToolbarButton { icon: "⬇️", label: "Export CSV", onclick: move |_| export_csv() }
            }

            div { class: "toolbar-separator" }

            div {
                class: "toolbar-group",
                ToolbarButton {
                    icon: "↩️",
                    label: "Undo",
                    shortcut: "Ctrl+Z",
                    disabled: !can_undo,
                    onclick: move |_| {
                        let result = APP_STATE.write().session.undo();
                        report(result, |_| "Undone".to_string());
                    }
                }
                ToolbarButton {
                    icon: "↪️",
                    label: "Redo",
                    shortcut: "Ctrl+Y",
                    disabled: !can_redo,
                    onclick: move |_| {
                        let result = APP_STATE.write().session.redo();
                        report(result, |_| "Redone".to_string());
                    }
                }
            }

            div { class: "toolbar-spacer" }

            nav {
                class: "page-tabs",
                PageTab { page: Page::Editor, current: current_page }
                PageTab { page: Page::StoreMap, current: current_page }
            }
        }
    }
}

/// Toolbar button component
#[component]
fn ToolbarButton(
    icon: &'static str,
    label: &'static str,
    #[props(default)] shortcut: &'static str,
    #[props(default = false)] disabled: bool,
    onclick: EventHandler<MouseEvent>,
) -> Element {
    rsx! {
        button {
            class: "toolbar-button",
            disabled: disabled,
            title: if shortcut.is_empty() { label.to_string() } else { format!("{} ({})", label, shortcut) },
            onclick: move |e| {
                if !disabled {
                    onclick.call(e);
                }
            },
            span { "{icon}" }
            span { class: "toolbar-label", "{label}" }
        }
    }
}

/// Page navigation tab
#[component]
fn PageTab(page: Page, current: Page) -> Element {
    let active = if page == current { "active" } else { "" };
    let icon = page.icon();
    let name = page.display_name();

    rsx! {
        button {
            class: "page-tab {active}",
            onclick: move |_| APP_STATE.write().ui.navigate(page),
            span { "{icon}" }
            span { "{name}" }
        }
    }
}

// ============================================================================
// Main Content Component
// ============================================================================

/// Active page
#[component]
fn MainContent() -> Element {
    let page = APP_STATE.read().ui.active_page;

    rsx! {
        main {
            class: "main-content",
            match page {
                Page::Editor => rsx! {
                    div {
                        class: "editor-page",
                        div {
                            class: "editor-main",
                            GridControls {}
                            EditorCanvas {}
                        }
                        AislePanel {}
                    }
                },
                Page::StoreMap => rsx! { StoreMap {} },
            }
        }
    }
}

// ============================================================================
// Status Bar Component
// ============================================================================

/// Bottom status bar
#[component]
fn StatusBar() -> Element {
    let state = APP_STATE.read();
    let status = state.ui.status_message.clone();
    let layout = state.session.layout();
    let aisle_count = layout.aisles().len();
    let product_count = layout.products().len();
    let unassigned = layout.unassigned_products().count();
    let grid = layout.grid();
    drop(state);

    rsx! {
        footer {
            class: "status-bar",

            if let Some(msg) = status {
                span { class: msg.level.css_class(), "{msg.text}" }
            } else {
                span { "Ready" }
            }

            div { class: "toolbar-spacer" }

            span { "Grid: {grid.rows} x {grid.columns}" }
            span { "Aisles: {aisle_count}" }
            span { "Products: {product_count} ({unassigned} unassigned)" }
        }
    }
}

// ============================================================================
// Dialog Overlay Component
// ============================================================================

/// Modal dialog overlay
#[component]
fn DialogOverlay() -> Element {
    let dialog = APP_STATE.read().ui.active_dialog.clone();

    let Some(dialog) = dialog else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "dialog-overlay",

            div {
                class: "dialog-backdrop",
                onclick: move |_| {
                    APP_STATE.write().ui.close_dialog();
                }
            }

            div {
                class: "dialog",
                onclick: move |e| e.stop_propagation(),

                match dialog {
                    Dialog::CreateAisle(draft) => rsx! { CreateAisleDialog { draft: draft } },
                    Dialog::ConfirmDelete(target) => rsx! { ConfirmDeleteDialog { target: target } },
                    Dialog::Error(message) => rsx! { ErrorDialog { message: message } },
                }
            }
        }
    }
}

/// Error dialog
#[component]
fn ErrorDialog(message: String) -> Element {
    rsx! {
        div {
            class: "dialog-body",
            div {
                class: "dialog-warning",
                span { class: "dialog-icon", "❌" }
                div {
                    h2 { class: "dialog-title danger", "Error" }
                    p { "{message}" }
                }
            }
            div {
                class: "dialog-actions",
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| {
                        APP_STATE.write().ui.close_dialog();
                    },
                    "Close"
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_icon() {
        assert_eq!(Page::Editor.icon(), "🛠️");
        assert_eq!(Page::StoreMap.icon(), "🗺️");
    }

    #[test]
    fn test_page_display_name() {
        assert_eq!(Page::Editor.display_name(), "Layout Editor");
        assert_eq!(Page::StoreMap.display_name(), "Store Map");
    }
}
