//! Scene construction for the editor and the store map
//!
//! Both views share the same paint order: grid lines, index labels, door,
//! aisles, products, then the walking route of the selected product.

use crate::palette::{BLACK, GRID_LINE, LABEL, ROUTE, WHITE, color_for_tag};
use crate::scene::{DrawCommand, FontWeight, Scene, Stroke, TextAnchor};
use shelfmap_core::{GridCell, Position, ProductId, Size};
use shelfmap_ir::{Aisle, Grid, GridMetrics, Product, StoreLayout, route_path};
use tracing::debug;

/// Opacity of aisle fills
pub const AISLE_OPACITY: f32 = 0.7;

/// Radius of the editor's product marker
pub const PRODUCT_MARKER_RADIUS: f32 = 10.0;

/// Longest product name shown on the store map
pub const MAP_LABEL_CHARS: usize = 12;

const LABEL_SIZE: f32 = 12.0;
const AISLE_LABEL_SIZE: f32 = 14.0;
const MAP_PRODUCT_LABEL_SIZE: f32 = 10.0;
const ROUTE_WIDTH: f32 = 3.0;
const ROUTE_DASH: [f32; 2] = [5.0, 5.0];

// ============================================================================
// Request
// ============================================================================

/// Which of the two views to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Editable layout: aisles plus product markers
    #[default]
    Editor,
    /// Read-only map: product cells filled with their category color
    StoreMap,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone)]
pub struct RenderRequest<'a> {
    pub mode: ViewMode,
    pub metrics: GridMetrics,
    pub door_column: u32,
    pub aisles: &'a [Aisle],
    pub products: &'a [Product],
    pub selected: Option<ProductId>,
}

impl<'a> RenderRequest<'a> {
    /// Editor view of a layout on a canvas
    pub fn editor(layout: &'a StoreLayout, metrics: GridMetrics) -> Self {
        Self {
            mode: ViewMode::Editor,
            metrics,
            door_column: layout.door_column(),
            aisles: layout.aisles(),
            products: layout.products(),
            selected: None,
        }
    }

    /// Store map of a product list.
    ///
    /// The grid covers the largest placed row and column, and the door comes
    /// from the saved layout metadata (falling back to the middle column).
    pub fn store_map(products: &'a [Product]) -> Self {
        let grid = Grid::covering(products.iter().filter_map(Product::cell));
        let door_column = products
            .iter()
            .find_map(|p| p.layout_metadata)
            .map(|m| grid.clamp_door(m.door_column as i64))
            .unwrap_or_else(|| grid.default_door());

        Self {
            mode: ViewMode::StoreMap,
            metrics: GridMetrics::for_grid(grid),
            door_column,
            aisles: &[],
            products,
            selected: None,
        }
    }

    /// Resize the canvas, keeping the grid
    pub fn with_canvas(mut self, canvas: Size) -> Self {
        self.metrics = GridMetrics::new(self.metrics.grid, canvas);
        self
    }

    pub fn with_selected(mut self, selected: Option<ProductId>) -> Self {
        self.selected = selected;
        self
    }

    fn selected_product(&self) -> Option<&'a Product> {
        let id = self.selected?;
        self.products.iter().find(|p| p.id == id)
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Build the display list for a request
pub fn render(request: &RenderRequest<'_>) -> Scene {
    let metrics = &request.metrics;
    let mut scene = Scene::new(metrics.canvas.width, metrics.canvas.height, WHITE);

    draw_grid_lines(&mut scene, metrics);
    draw_labels(&mut scene, metrics, request.mode);
    draw_door(&mut scene, metrics, request.door_column);

    for aisle in request.aisles {
        draw_aisle(&mut scene, metrics, aisle);
    }

    for product in request.products {
        let Some(cell) = product.cell().filter(|c| metrics.grid.contains(*c)) else {
            continue;
        };
        match request.mode {
            ViewMode::Editor => draw_product_marker(&mut scene, metrics, cell),
            ViewMode::StoreMap => draw_product_cell(&mut scene, metrics, cell, product),
        }
    }

    if let Some(product) = request.selected_product() {
        if let Some(cell) = product.cell().filter(|c| metrics.grid.contains(*c)) {
            draw_route(&mut scene, metrics, request.door_column, cell);
        }
    }

    debug!(
        mode = ?request.mode,
        commands = scene.len(),
        "Scene rendered"
    );
    scene
}

fn draw_grid_lines(scene: &mut Scene, metrics: &GridMetrics) {
    let stroke = Stroke::solid(GRID_LINE, 1.0);
    let (right, bottom) = (metrics.grid_right(), metrics.grid_bottom());

    for row in 1..=metrics.grid.rows.saturating_add(1) {
        let y = row as f32 * metrics.cell_height;
        scene.push(DrawCommand::Line {
            from: Position::new(metrics.cell_width, y),
            to: Position::new(right, y),
            stroke: stroke.clone(),
        });
    }
    for column in 1..=metrics.grid.columns.saturating_add(1) {
        let x = column as f32 * metrics.cell_width;
        scene.push(DrawCommand::Line {
            from: Position::new(x, metrics.cell_height),
            to: Position::new(x, bottom),
            stroke: stroke.clone(),
        });
    }
}

fn draw_labels(scene: &mut Scene, metrics: &GridMetrics, mode: ViewMode) {
    let label = |kind: &str, index: u32| match mode {
        ViewMode::Editor => index.to_string(),
        ViewMode::StoreMap => format!("{} {}", kind, index),
    };

    for row in 1..=metrics.grid.rows {
        scene.push(DrawCommand::Text {
            position: Position::new(
                5.0,
                row as f32 * metrics.cell_height + metrics.cell_height / 2.0 + 4.0,
            ),
            text: label("Row", row),
            size: LABEL_SIZE,
            weight: FontWeight::Normal,
            anchor: TextAnchor::Start,
            color: LABEL,
        });
    }
    for column in 1..=metrics.grid.columns {
        scene.push(DrawCommand::Text {
            position: Position::new(
                column as f32 * metrics.cell_width + metrics.cell_width / 2.0,
                15.0,
            ),
            text: label("Col", column),
            size: LABEL_SIZE,
            weight: FontWeight::Normal,
            anchor: TextAnchor::Middle,
            color: LABEL,
        });
    }
}

fn draw_door(scene: &mut Scene, metrics: &GridMetrics, door_column: u32) {
    let rect = metrics.door_rect(door_column);
    scene.push(DrawCommand::FillRect {
        rect,
        color: BLACK,
        opacity: 1.0,
    });
    scene.push(DrawCommand::Text {
        position: Position::new(rect.position.x + 5.0, rect.bottom() - 2.0),
        text: "DOOR".to_string(),
        size: LABEL_SIZE,
        weight: FontWeight::Normal,
        anchor: TextAnchor::Start,
        color: WHITE,
    });
}

fn draw_aisle(scene: &mut Scene, metrics: &GridMetrics, aisle: &Aisle) {
    let rect = metrics.aisle_rect(aisle);
    scene.push(DrawCommand::FillRect {
        rect,
        color: color_for_tag(&aisle.tag),
        opacity: AISLE_OPACITY,
    });
    scene.push(DrawCommand::Text {
        position: rect.position.offset(5.0, 20.0),
        text: aisle.name.clone(),
        size: AISLE_LABEL_SIZE,
        weight: FontWeight::Bold,
        anchor: TextAnchor::Start,
        color: WHITE,
    });
    scene.push(DrawCommand::StrokeRect {
        rect,
        stroke: Stroke::solid(BLACK, 2.0),
    });
}

fn draw_product_marker(scene: &mut Scene, metrics: &GridMetrics, cell: GridCell) {
    scene.push(DrawCommand::Circle {
        center: metrics.cell_center(cell),
        radius: PRODUCT_MARKER_RADIUS,
        fill: WHITE,
        opacity: 0.9,
        stroke: Some(Stroke::solid(BLACK, 1.0)),
    });
}

fn draw_product_cell(scene: &mut Scene, metrics: &GridMetrics, cell: GridCell, product: &Product) {
    let rect = metrics.cell_rect(cell);
    scene.push(DrawCommand::FillRect {
        rect,
        color: color_for_tag(&product.tag),
        opacity: 1.0,
    });
    scene.push(DrawCommand::Text {
        position: Position::new(rect.position.x + 5.0, rect.center().y + 4.0),
        text: truncate_name(&product.name, MAP_LABEL_CHARS),
        size: MAP_PRODUCT_LABEL_SIZE,
        weight: FontWeight::Normal,
        anchor: TextAnchor::Start,
        color: WHITE,
    });
}

fn draw_route(scene: &mut Scene, metrics: &GridMetrics, door_column: u32, cell: GridCell) {
    scene.push(DrawCommand::Polyline {
        points: route_path(metrics, door_column, cell),
        stroke: Stroke::dashed(ROUTE, ROUTE_WIDTH, ROUTE_DASH.to_vec()),
    });
    scene.push(DrawCommand::StrokeRect {
        rect: metrics.cell_rect(cell),
        stroke: Stroke::solid(ROUTE, 2.0),
    });
}

/// Shorten a label to `max_chars` characters, ending in `...` when cut
pub fn truncate_name(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shelfmap_core::Rect;
    use shelfmap_ir::LayoutMetadata;

    fn editor_layout() -> StoreLayout {
        let aisle = Aisle::new("Snacks", "toys").at(2, 2).with_size(2, 1);
        let product = Product::new("Chips").at(2, 3).in_aisle(aisle.id, "Snacks");
        StoreLayout::from_parts(Grid::new(4, 5), 2, vec![aisle], vec![product])
    }

    fn count<F: Fn(&DrawCommand) -> bool>(scene: &Scene, f: F) -> usize {
        scene.commands.iter().filter(|c| f(c)).count()
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Milk", 12), "Milk");
        assert_eq!(truncate_name("Exactly12chr", 12), "Exactly12chr");
        assert_eq!(truncate_name("Chocolate Chip Cookies", 12), "Chocolate...");
    }

    #[test]
    fn test_editor_scene_contents() {
        let layout = editor_layout();
        let metrics = GridMetrics::for_grid(layout.grid());
        let scene = render(&RenderRequest::editor(&layout, metrics));

        assert_eq!(scene.width, 480.0);
        assert_eq!(scene.height, 300.0);
        // 5 horizontal + 6 vertical
        assert_eq!(count(&scene, |c| matches!(c, DrawCommand::Line { .. })), 11);
        assert_eq!(count(&scene, |c| matches!(c, DrawCommand::Circle { .. })), 1);

        let texts: Vec<_> = scene.texts().collect();
        assert!(texts.contains(&"DOOR"));
        assert!(texts.contains(&"Snacks"));
        assert!(texts.contains(&"1"));
        assert!(!texts.iter().any(|t| t.starts_with("Row")));
    }

    #[test]
    fn test_editor_aisle_geometry() {
        let layout = editor_layout();
        let metrics = GridMetrics::for_grid(layout.grid());
        let scene = render(&RenderRequest::editor(&layout, metrics));

        let fill = scene.commands.iter().find_map(|c| match c {
            DrawCommand::FillRect { rect, opacity, .. } if *opacity < 1.0 => Some(*rect),
            _ => None,
        });
        assert_eq!(fill, Some(Rect::from_xywh(160.0, 120.0, 160.0, 60.0)));
    }

    #[test]
    fn test_door_drawn_on_bottom_edge() {
        let layout = editor_layout();
        let metrics = GridMetrics::for_grid(layout.grid());
        let scene = render(&RenderRequest::editor(&layout, metrics));

        let door = scene.commands.iter().find_map(|c| match c {
            DrawCommand::FillRect { rect, color, .. } if *color == BLACK => Some(*rect),
            _ => None,
        });
        assert_eq!(door, Some(Rect::from_xywh(160.0, 290.0, 80.0, 10.0)));
    }

    #[test]
    fn test_store_map_grid_and_labels() {
        let products = vec![
            Product::new("Chocolate Chip Cookies").with_tag("grocery").at(2, 3),
            Product::new("Unplaced"),
        ];
        let request = RenderRequest::store_map(&products);
        assert_eq!(request.metrics.grid, Grid::new(2, 3));
        assert_eq!(request.door_column, 1);

        let scene = render(&request);
        let texts: Vec<_> = scene.texts().collect();
        assert!(texts.contains(&"Row 2"));
        assert!(texts.contains(&"Col 3"));
        assert!(texts.contains(&"Chocolate..."));
        assert!(!texts.contains(&"Unplaced"));
    }

    #[test]
    fn test_store_map_far_product_is_bounded() {
        let products = vec![
            Product::new("Far").at(u32::MAX, 1),
            Product::new("Near").with_tag("toys").at(2, 2),
        ];
        let request = RenderRequest::store_map(&products);
        assert_eq!(
            request.metrics.grid,
            Grid::new(shelfmap_ir::MAX_MAP_DIMENSION, 2)
        );

        let scene = render(&request.with_selected(Some(products[0].id)));
        let texts: Vec<_> = scene.texts().collect();
        assert!(texts.contains(&"Near"));
        assert!(!texts.contains(&"Far"));
        assert_eq!(count(&scene, |c| matches!(c, DrawCommand::Polyline { .. })), 0);
    }

    #[test]
    fn test_store_map_door_from_metadata() {
        let mut product = Product::new("Tea").at(3, 6);
        product.layout_metadata = Some(LayoutMetadata::new(5));
        let products = vec![product];
        assert_eq!(RenderRequest::store_map(&products).door_column, 5);
    }

    #[test]
    fn test_selected_product_route() {
        let layout = editor_layout();
        let selected = layout.products()[0].id;
        let metrics = GridMetrics::for_grid(layout.grid());
        let scene = render(&RenderRequest::editor(&layout, metrics).with_selected(Some(selected)));

        let route = scene.commands.iter().find_map(|c| match c {
            DrawCommand::Polyline { points, stroke } => Some((points.clone(), stroke.clone())),
            _ => None,
        });
        let (points, stroke) = route.unwrap();
        assert_eq!(
            points,
            vec![
                Position::new(200.0, 300.0),
                Position::new(280.0, 300.0),
                Position::new(280.0, 150.0),
            ]
        );
        assert_eq!(stroke.color, ROUTE);
        assert_eq!(stroke.dash, vec![5.0, 5.0]);

        let highlight = count(&scene, |c| {
            matches!(c, DrawCommand::StrokeRect { stroke, .. } if stroke.color == ROUTE)
        });
        assert_eq!(highlight, 1);
    }

    #[test]
    fn test_unknown_selection_draws_no_route() {
        let layout = editor_layout();
        let metrics = GridMetrics::for_grid(layout.grid());
        let scene = render(
            &RenderRequest::editor(&layout, metrics).with_selected(Some(ProductId::new_v4())),
        );
        assert_eq!(count(&scene, |c| matches!(c, DrawCommand::Polyline { .. })), 0);
    }
}
