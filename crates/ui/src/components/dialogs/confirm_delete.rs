//! # Confirm Delete Dialog Component
//!
//! Confirmation step before deleting an aisle. Deleting an aisle keeps its
//! products but clears their aisle and position, so the dialog lists how
//! many products go back to the unassigned pool.

use dioxus::prelude::*;

use crate::state::{APP_STATE, DeleteTarget, report};

// ============================================================================
// Component Props
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct ConfirmDeleteDialogProps {
    /// The target to delete
    pub target: DeleteTarget,
}

// ============================================================================
// Main Component
// ============================================================================

/// Confirmation dialog for delete operations
#[component]
pub fn ConfirmDeleteDialog(props: ConfirmDeleteDialogProps) -> Element {
    let (item_name, affected) = delete_info(&props.target);
    let target = props.target;

    let handle_delete = move |_| {
        match target {
            DeleteTarget::Aisle(aisle_id) => {
                let result = APP_STATE.write().session.delete_aisle(aisle_id);
                report(result, |aisle| format!("Deleted aisle '{}'", aisle.name));
            }
        }
        APP_STATE.write().ui.close_dialog();
    };

    rsx! {
        div {
            class: "dialog-body",

            div {
                class: "dialog-warning",
                span { class: "dialog-icon", "⚠️" }
                div {
                    h2 { class: "dialog-title danger", "Delete aisle?" }
                    p { "\"{item_name}\" will be removed from the layout." }
                }
            }

            if affected > 0 {
                p {
                    class: "form-warning",
                    "{affected} product(s) will become unassigned."
                }
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
                    r#type: "button",
                    class: "btn btn-danger",
                    onclick: handle_delete,
                    "Delete"
                }
            }
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Display name of the target and the number of products it holds
fn delete_info(target: &DeleteTarget) -> (String, usize) {
    let state = APP_STATE.read();
    let layout = state.session.layout();

    match target {
        DeleteTarget::Aisle(aisle_id) => {
            let name = layout
                .aisle(*aisle_id)
                .map(|a| a.name.clone())
                .unwrap_or_else(|| "Unknown".to_string());
            (name, layout.members(*aisle_id).count())
        }
    }
}
