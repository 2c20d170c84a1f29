//! # Store Map
//!
//! Read-only map of where products are, with product search, category tag
//! filters, a walking route from the door to the selected product and the
//! category legend.

use dioxus::prelude::*;
use shelfmap_core::LayoutError;
use shelfmap_ir::{Product, SEARCH_RESULT_LIMIT, available_tags, directions, search_products};
use shelfmap_render::{RenderRequest, legend, render_svg};

use crate::file_ops;
use crate::state::{APP_STATE, StatusLevel};

// ============================================================================
// Page
// ============================================================================

/// Store map page
#[component]
pub fn StoreMap() -> Element {
    let (svg, door_column, selected) = {
        let state = APP_STATE.read();
        let visible = state.visible_products();
        let selected = state.selected_product().cloned();
        // Grid spans the whole catalog, not just the filtered products
        let mut request = RenderRequest::store_map(state.session.layout().products())
            .with_selected(selected.as_ref().map(|p| p.id));
        request.products = &visible;
        (render_svg(&request), request.door_column, selected)
    };

    rsx! {
        div {
            class: "store-map-page",

            div {
                class: "store-map-main",
                SearchBox {}
                TagFilters {}
                div { class: "map-surface", dangerous_inner_html: "{svg}" }
            }

            aside {
                class: "store-map-side",
                if let Some(product) = selected {
                    Directions { product: product, door_column: door_column }
                }
                Legend {}
                ExportButton {}
            }
        }
    }
}

// ============================================================================
// Search
// ============================================================================

#[component]
fn SearchBox() -> Element {
    let (query, results) = {
        let state = APP_STATE.read();
        let query = state.map.query.clone();
        let results: Vec<Product> =
            search_products(&state.visible_products(), &query, SEARCH_RESULT_LIMIT)
                .into_iter()
                .cloned()
                .collect();
        (query, results)
    };

    rsx! {
        div {
            class: "search-box",
            input {
                r#type: "search",
                placeholder: "Search products...",
                value: "{query}",
                oninput: move |e: FormEvent| {
                    APP_STATE.write().map.query = e.value();
                },
            }

            if !results.is_empty() {
                ul {
                    class: "search-results",
                    for product in results {
                        SearchResult { key: "{product.id}", product: product }
                    }
                }
            } else if !query.trim().is_empty() {
                p { class: "panel-empty", "No matching products" }
            }
        }
    }
}

#[component]
fn SearchResult(product: Product) -> Element {
    let id = product.id;
    let where_text = match product.cell() {
        Some(cell) => format!("Row {}, Col {}", cell.row, cell.column),
        None => "Not on the map".to_string(),
    };

    rsx! {
        li {
            class: "search-result",
            onclick: move |_| {
                APP_STATE.write().map.select(id);
            },
            span { class: "product-name", "{product.name}" }
            span { class: "product-location", "{where_text}" }
        }
    }
}

// ============================================================================
// Tag filters
// ============================================================================

#[component]
fn TagFilters() -> Element {
    let (chips, any_selected) = {
        let state = APP_STATE.read();
        let selected = &state.map.tags;
        let chips: Vec<(String, bool)> = available_tags(state.session.layout().products())
            .into_iter()
            .map(|tag| {
                let active = selected.contains(&tag);
                (tag, active)
            })
            .collect();
        (chips, !selected.is_empty())
    };

    if chips.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "tag-filters",
            div {
                class: "tag-filters-header",
                h3 { "Filters" }
                if any_selected {
                    button {
                        class: "btn-link",
                        onclick: move |_| APP_STATE.write().map.clear_tags(),
                        "Clear all"
                    }
                }
            }
            div {
                class: "tag-chips",
                for (tag, active) in chips {
                    TagChip { key: "{tag}", tag: tag, active: active }
                }
            }
        }
    }
}

#[component]
fn TagChip(tag: String, active: bool) -> Element {
    let class = if active { "tag-chip active" } else { "tag-chip" };
    let label = if active { format!("{} ✕", tag) } else { tag.clone() };

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| APP_STATE.write().map.toggle_tag(&tag),
            "{label}"
        }
    }
}

// ============================================================================
// Directions
// ============================================================================

#[component]
fn Directions(product: Product, door_column: u32) -> Element {
    let steps = directions(door_column, &product).unwrap_or_default();
    let meta = format!("{} · ${:.2}", product.company, product.price);

    rsx! {
        section {
            class: "directions",
            div {
                class: "directions-header",
                h3 { "{product.name}" }
                button {
                    class: "btn-icon",
                    title: "Clear selection",
                    onclick: move |_| APP_STATE.write().map.clear(),
                    "✕"
                }
            }
            if !product.company.is_empty() {
                p { class: "product-meta", "{meta}" }
            }
            ol {
                for step in steps {
                    li { "{step}" }
                }
            }
        }
    }
}

// ============================================================================
// Legend
// ============================================================================

#[component]
fn Legend() -> Element {
    let entries: Vec<(&str, String)> = legend()
        .into_iter()
        .map(|(category, color)| (category.display_name(), color.to_css()))
        .collect();

    rsx! {
        section {
            class: "legend",
            h3 { "Categories" }
            for (name, css) in entries {
                div {
                    class: "legend-row",
                    span { class: "swatch", style: "background-color: {css};" }
                    span { "{name}" }
                }
            }
        }
    }
}

// ============================================================================
// Export
// ============================================================================

#[component]
fn ExportButton() -> Element {
    rsx! {
        button {
            class: "btn btn-secondary",
            onclick: move |_| {
                spawn(async move {
                    let (products, selected, font_path) = {
                        let state = APP_STATE.read();
                        (
                            state.session.layout().products().to_vec(),
                            state.selected_product().map(|p| p.id),
                            state.settings.render.font_path.clone(),
                        )
                    };

                    match file_ops::export_map_png(&products, selected, font_path.as_deref()).await {
                        Ok(path) => APP_STATE.write().ui.set_status(
                            format!("Map exported to {}", path.display()),
                            StatusLevel::Success,
                        ),
                        Err(LayoutError::Cancelled) => tracing::debug!("Export cancelled by user"),
                        Err(e) => {
                            tracing::error!("Failed to export map: {}", e);
                            APP_STATE
                                .write()
                                .ui
                                .set_status(format!("Failed to export: {}", e), StatusLevel::Error);
                        }
                    }
                });
            },
            "Export PNG"
        }
    }
}
