//! # Editor Canvas
//!
//! The layout editor surface. The picture is the renderer's SVG; pointer
//! events go straight to the `EditorSession`, which stages aisle and door
//! drags and commits them on release.
//!
//! ## Keyboard
//!
//! - `Escape` cancels the drag in progress
//! - `Ctrl+Z` / `Ctrl+Y` undo and redo
//!

use dioxus::prelude::*;
use shelfmap_core::Position;
use shelfmap_ir::AisleDraft;
use shelfmap_render::{RenderRequest, render_svg};

use crate::state::{APP_STATE, Dialog, StatusLevel, report};

fn pointer_position(e: &MouseEvent) -> Position {
    let point = e.element_coordinates();
    Position::new(point.x as f32, point.y as f32)
}

fn finish_gesture(leave: bool) {
    let mut state = APP_STATE.write();
    let result = if leave {
        state.session.pointer_leave()
    } else {
        state.session.pointer_up()
    };
    match result {
        Ok(true) => {
            let action = state
                .session
                .next_undo_action()
                .unwrap_or("Edit")
                .to_string();
            state.ui.set_status(action, StatusLevel::Info);
        }
        Ok(false) => {}
        Err(e) => state.ui.set_status(e.to_string(), StatusLevel::Error),
    }
}

// ============================================================================
// Canvas
// ============================================================================

/// Interactive layout canvas
#[component]
pub fn EditorCanvas() -> Element {
    let (svg, width, height, dragging) = {
        let state = APP_STATE.read();
        let session = &state.session;
        let layout = session.display_layout();
        let metrics = session.metrics();
        (
            render_svg(&RenderRequest::editor(&layout, metrics)),
            metrics.canvas.width,
            metrics.canvas.height,
            session.is_dragging(),
        )
    };

    let cursor_class = if dragging { "cursor-grabbing" } else { "cursor-default" };

    rsx! {
        div {
            class: "editor-surface {cursor_class}",
            style: "width: {width}px; height: {height}px;",
            tabindex: 0,

            onmousedown: move |e: MouseEvent| {
                let position = pointer_position(&e);
                if APP_STATE.write().session.pointer_down(position) {
                    tracing::debug!(x = position.x, y = position.y, "Drag started");
                }
            },
            onmousemove: move |e: MouseEvent| {
                if !APP_STATE.read().session.is_dragging() {
                    return;
                }
                APP_STATE.write().session.pointer_move(pointer_position(&e));
            },
            onmouseup: move |_| finish_gesture(false),
            onmouseleave: move |_| {
                if APP_STATE.read().session.is_dragging() {
                    finish_gesture(true);
                }
            },
            onkeydown: move |e: KeyboardEvent| {
                let ctrl = e.modifiers().ctrl() || e.modifiers().meta();
                match e.key() {
                    Key::Escape => {
                        e.prevent_default();
                        APP_STATE.write().session.cancel_gesture();
                    }
                    Key::Character(ref c) if ctrl && c.eq_ignore_ascii_case("z") => {
                        e.prevent_default();
                        let result = APP_STATE.write().session.undo();
                        report(result, |_| "Undone".to_string());
                    }
                    Key::Character(ref c) if ctrl && c.eq_ignore_ascii_case("y") => {
                        e.prevent_default();
                        let result = APP_STATE.write().session.redo();
                        report(result, |_| "Redone".to_string());
                    }
                    _ => {}
                }
            },
            oncontextmenu: move |e| e.prevent_default(),

            div { dangerous_inner_html: "{svg}" }
        }
    }
}

// ============================================================================
// Grid Controls
// ============================================================================

/// Grid size, door column and the "add aisle" action
#[component]
pub fn GridControls() -> Element {
    let (grid, door, bounds) = {
        let state = APP_STATE.read();
        let layout = state.session.layout();
        (layout.grid(), layout.door_column(), state.session.bounds())
    };

    rsx! {
        div {
            class: "grid-controls",

            label {
                "Rows"
                input {
                    r#type: "number",
                    min: "{bounds.min}",
                    max: "{bounds.max}",
                    value: "{grid.rows}",
                    onchange: move |e: FormEvent| {
                        if let Ok(rows) = e.value().parse::<u32>() {
                            let result = APP_STATE.write().session.resize_grid(rows, grid.columns);
                            report(result, |g| format!("Grid is now {} x {}", g.rows, g.columns));
                        }
                    },
                }
            }

            label {
                "Columns"
                input {
                    r#type: "number",
                    min: "{bounds.min}",
                    max: "{bounds.max}",
                    value: "{grid.columns}",
                    onchange: move |e: FormEvent| {
                        if let Ok(columns) = e.value().parse::<u32>() {
                            let result = APP_STATE.write().session.resize_grid(grid.rows, columns);
                            report(result, |g| format!("Grid is now {} x {}", g.rows, g.columns));
                        }
                    },
                }
            }

            label {
                "Door column"
                input {
                    r#type: "number",
                    min: "0",
                    max: "{grid.columns}",
                    value: "{door}",
                    onchange: move |e: FormEvent| {
                        if let Ok(column) = e.value().parse::<i64>() {
                            let result = APP_STATE.write().session.set_door(column);
                            report(result, |c| format!("Door moved to column {}", c));
                        }
                    },
                }
            }

            button {
                class: "btn btn-primary",
                onclick: move |_| {
                    APP_STATE.write().ui.show_dialog(Dialog::CreateAisle(AisleDraft::default()));
                },
                "+ Add Aisle"
            }
        }
    }
}
