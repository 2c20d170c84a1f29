//! # Aisle Panel
//!
//! Side panel of the layout editor: every aisle with its products, and the
//! pool of unassigned products. Product cards are dragged onto an aisle to
//! place them at a random free cell inside it.

use dioxus::prelude::*;
use shelfmap_core::{AisleId, ProductId};
use shelfmap_ir::{Aisle, Product};
use shelfmap_render::color_for_tag;

use crate::state::{APP_STATE, DeleteTarget, Dialog, report};

fn drop_on_aisle(aisle_id: AisleId) {
    let Some(product_id) = APP_STATE.write().dragged_product.take() else {
        return;
    };
    let result = APP_STATE
        .write()
        .session
        .assign_product(product_id, aisle_id);
    report(result, |cell| format!("Product placed at {}", cell));
}

// ============================================================================
// Panel
// ============================================================================

/// Aisle list plus the unassigned product pool
#[component]
pub fn AislePanel() -> Element {
    let (aisles, unassigned) = {
        let state = APP_STATE.read();
        let layout = state.session.layout();
        let aisles: Vec<(Aisle, Vec<Product>)> = layout
            .aisles()
            .iter()
            .map(|aisle| (aisle.clone(), layout.members(aisle.id).cloned().collect()))
            .collect();
        let unassigned: Vec<Product> = layout.unassigned_products().cloned().collect();
        (aisles, unassigned)
    };
    let unassigned_count = unassigned.len();

    rsx! {
        aside {
            class: "aisle-panel",

            h3 { class: "panel-title", "Aisles" }

            if aisles.is_empty() {
                p { class: "panel-empty", "No aisles yet. Use \"+ Add Aisle\" to create one." }
            }

            for (aisle, members) in aisles {
                AisleCard {
                    key: "{aisle.id}",
                    aisle: aisle,
                    members: members,
                }
            }

            h3 { class: "panel-title", "Unassigned products ({unassigned_count})" }

            div {
                class: "product-pool",
                if unassigned.is_empty() {
                    p { class: "panel-empty", "Every product has an aisle" }
                }
                for product in unassigned {
                    ProductCard {
                        key: "{product.id}",
                        product: product,
                    }
                }
            }
        }
    }
}

// ============================================================================
// Aisle Card
// ============================================================================

/// One aisle; accepts dropped product cards
#[component]
fn AisleCard(aisle: Aisle, members: Vec<Product>) -> Element {
    let mut hovered = use_signal(|| false);
    let aisle_id = aisle.id;
    let swatch = color_for_tag(&aisle.tag).to_css();
    let hover_class = if hovered() { "drop-target" } else { "" };

    rsx! {
        div {
            class: "aisle-card {hover_class}",
            ondragover: move |e: DragEvent| {
                e.prevent_default();
                hovered.set(true);
            },
            ondragleave: move |_| hovered.set(false),
            ondrop: move |e: DragEvent| {
                e.prevent_default();
                hovered.set(false);
                drop_on_aisle(aisle_id);
            },

            div {
                class: "aisle-card-header",
                span { class: "swatch", style: "background-color: {swatch};" }
                span { class: "aisle-name", "{aisle.name}" }
                span { class: "aisle-meta", "{aisle.tag} · {aisle.width}x{aisle.height} at ({aisle.x}, {aisle.y})" }
                button {
                    class: "btn-icon",
                    title: "Delete aisle",
                    onclick: move |_| {
                        APP_STATE
                            .write()
                            .ui
                            .show_dialog(Dialog::ConfirmDelete(DeleteTarget::Aisle(aisle_id)));
                    },
                    "🗑"
                }
            }

            div {
                class: "aisle-members",
                if members.is_empty() {
                    span { class: "panel-empty", "Drop products here" }
                }
                for product in members {
                    ProductCard {
                        key: "{product.id}",
                        product: product,
                    }
                }
            }
        }
    }
}

// ============================================================================
// Product Card
// ============================================================================

/// Draggable product; assigned products also get an unassign button
#[component]
fn ProductCard(product: Product) -> Element {
    let product_id: ProductId = product.id;
    let assigned = product.is_assigned();
    let location = product
        .cell()
        .map(|cell| format!("row {}, col {}", cell.row, cell.column))
        .unwrap_or_default();

    rsx! {
        div {
            class: "product-card",
            draggable: "true",
            ondragstart: move |_| {
                APP_STATE.write().dragged_product = Some(product_id);
            },
            ondragend: move |_| {
                APP_STATE.write().dragged_product = None;
            },

            span { class: "product-name", "{product.name}" }
            if !location.is_empty() {
                span { class: "product-location", "{location}" }
            }
            if assigned {
                button {
                    class: "btn-icon",
                    title: "Unassign",
                    onclick: move |_| {
                        let result = APP_STATE.write().session.unassign_product(product_id);
                        report(result, |_| "Product unassigned".to_string());
                    },
                    "✕"
                }
            }
        }
    }
}
