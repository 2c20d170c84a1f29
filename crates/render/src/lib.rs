//! # Shelfmap Render
//!
//! Turns a store layout into pictures.
//!
//! ## Features
//!
//! - **Palette**: fixed category colors and the hashed hue for free-form tags
//! - **Scene**: a backend-neutral display list
//! - **Renderer**: editor and store-map views, including the walking route
//! - **SVG**: standalone SVG documents (also used by the desktop editor)
//! - **Raster**: RGBA images and PNG files, with optional fontdue labels
//!

pub mod palette;
pub mod raster;
pub mod renderer;
pub mod scene;
pub mod svg;

pub use palette::{Color, category_color, color_for_tag, legend};
pub use raster::Rasterizer;
pub use renderer::{RenderRequest, ViewMode, render, truncate_name};
pub use scene::{DrawCommand, FontWeight, Scene, Stroke, TextAnchor};
pub use svg::to_svg;

// ============================================================================
// Convenience
// ============================================================================

/// Render a request straight to SVG text
pub fn render_svg(request: &RenderRequest<'_>) -> String {
    to_svg(&render(request))
}
