//! # Create Aisle Dialog
//!
//! Name, size and category form for a new aisle. The aisle is placed just
//! above the door; a rejected draft keeps the dialog open with the error
//! shown inline.

use dioxus::prelude::*;
use shelfmap_core::Category;
use shelfmap_ir::AisleDraft;

use crate::state::{APP_STATE, StatusLevel};

/// Create-aisle form
#[component]
pub fn CreateAisleDialog(draft: AisleDraft) -> Element {
    let mut form = use_signal(|| draft.clone());
    let mut error = use_signal(|| Option::<String>::None);
    let grid = APP_STATE.read().session.layout().grid();

    let can_submit = form.read().can_submit();

    let mut do_create = move || {
        let draft = form.read().clone();
        if !draft.can_submit() {
            return;
        }
        let result = APP_STATE.write().session.create_aisle(&draft);
        match result {
            Ok(_) => {
                let mut state = APP_STATE.write();
                state.ui.close_dialog();
                state.ui.set_status(
                    format!("Created aisle '{}'", draft.name.trim()),
                    StatusLevel::Success,
                );
            }
            Err(e) => {
                tracing::warn!("Aisle rejected: {}", e);
                error.set(Some(e.to_string()));
            }
        }
    };

    let current = form.read().clone();

    rsx! {
        form {
            class: "dialog-body",
            onsubmit: move |e| {
                e.prevent_default();
                do_create();
            },

            h2 { class: "dialog-title", "Add Aisle" }

            label {
                class: "field",
                span { "Name" }
                input {
                    r#type: "text",
                    value: "{current.name}",
                    placeholder: "e.g. Snacks",
                    autofocus: true,
                    oninput: move |e: FormEvent| {
                        form.write().name = e.value();
                        error.set(None);
                    },
                }
            }

            div {
                class: "field-row",
                label {
                    class: "field",
                    span { "Width" }
                    input {
                        r#type: "number",
                        min: "1",
                        max: "{grid.columns}",
                        value: "{current.width}",
                        oninput: move |e: FormEvent| {
                            if let Ok(width) = e.value().parse::<u32>() {
                                form.write().width = width;
                            }
                        },
                    }
                }
                label {
                    class: "field",
                    span { "Height" }
                    input {
                        r#type: "number",
                        min: "1",
                        max: "{grid.rows}",
                        value: "{current.height}",
                        oninput: move |e: FormEvent| {
                            if let Ok(height) = e.value().parse::<u32>() {
                                form.write().height = height;
                            }
                        },
                    }
                }
            }

            label {
                class: "field",
                span { "Category" }
                select {
                    value: current.category.as_tag(),
                    onchange: move |e: FormEvent| {
                        if let Some(category) = Category::from_tag(&e.value()) {
                            form.write().category = category;
                        }
                    },
                    for category in Category::all().iter().copied() {
                        option {
                            value: category.as_tag(),
                            selected: category == current.category,
                            {category.display_name()}
                        }
                    }
                }
            }

            if let Some(message) = error() {
                p { class: "form-error", "{message}" }
            }

            div {
                class: "dialog-actions",
                button {
                    r#type: "button",
                    class: "btn btn-secondary",
                    onclick: move |_| APP_STATE.write().ui.close_dialog(),
                    "Cancel"
                }
                button {
                    r#type: "submit",
                    class: "btn btn-primary",
                    disabled: !can_submit,
                    "Create"
                }
            }
        }
    }
}
