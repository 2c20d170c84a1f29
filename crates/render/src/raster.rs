//! Raster backend: paints a scene into an RGBA image and encodes PNG
//!
//! Glyphs are rasterized with fontdue when a font is loaded. Without one,
//! text commands are skipped and everything else is still painted.

use crate::scene::{DrawCommand, FontWeight, Scene, Stroke, TextAnchor};
use fontdue::{Font, FontSettings};
use image::{ImageFormat, Rgba, RgbaImage};
use shelfmap_core::{LayoutError, LayoutResult, Position, Rect};
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// Scene painter
pub struct Rasterizer {
    font: Option<Font>,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    /// A rasterizer without text support
    pub fn new() -> Self {
        Self { font: None }
    }

    /// Load a TTF/OTF font from memory
    pub fn with_font_bytes(bytes: &[u8]) -> LayoutResult<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| LayoutError::render(format!("Failed to load font: {}", e)))?;
        Ok(Self { font: Some(font) })
    }

    /// Load a TTF/OTF font from a file
    pub fn with_font_file(path: impl AsRef<Path>) -> LayoutResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| LayoutError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::with_font_bytes(&bytes)
    }

    /// Load a font when a path is configured, otherwise render without text
    pub fn from_font_path(path: Option<&Path>) -> LayoutResult<Self> {
        match path {
            Some(path) => Self::with_font_file(path),
            None => Ok(Self::new()),
        }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Paint a scene
    pub fn rasterize(&self, scene: &Scene) -> RgbaImage {
        let width = scene.width.ceil().max(1.0) as u32;
        let height = scene.height.ceil().max(1.0) as u32;
        let [r, g, b] = scene.background.to_rgb();
        let mut canvas = Canvas {
            image: RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255])),
        };

        let mut skipped_text = 0usize;
        for command in &scene.commands {
            match command {
                DrawCommand::Line { from, to, stroke } => {
                    canvas.stroke_path(&[*from, *to], stroke);
                }
                DrawCommand::FillRect {
                    rect,
                    color,
                    opacity,
                } => canvas.fill_rect(rect, color.to_rgb(), *opacity),
                DrawCommand::StrokeRect { rect, stroke } => canvas.stroke_rect(rect, stroke),
                DrawCommand::Circle {
                    center,
                    radius,
                    fill,
                    opacity,
                    stroke,
                } => canvas.circle(*center, *radius, fill.to_rgb(), *opacity, stroke.as_ref()),
                DrawCommand::Text {
                    position,
                    text,
                    size,
                    weight,
                    anchor,
                    color,
                } => match &self.font {
                    Some(font) => canvas.text(
                        font,
                        *position,
                        text,
                        *size,
                        *weight,
                        *anchor,
                        color.to_rgb(),
                    ),
                    None => skipped_text += 1,
                },
                DrawCommand::Polyline { points, stroke } => canvas.stroke_path(points, stroke),
            }
        }

        if skipped_text > 0 {
            debug!(skipped_text, "No font loaded, text omitted from raster");
        }
        canvas.image
    }

    /// Paint a scene and encode it as PNG
    pub fn encode_png(&self, scene: &Scene) -> LayoutResult<Vec<u8>> {
        let image = self.rasterize(scene);
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| LayoutError::render(format!("PNG encoding failed: {}", e)))?;
        Ok(bytes)
    }

    /// Paint a scene and write it to a PNG file
    pub fn save_png(&self, scene: &Scene, path: impl AsRef<Path>) -> LayoutResult<()> {
        let path = path.as_ref();
        let bytes = self.encode_png(scene)?;
        std::fs::write(path, &bytes).map_err(|e| LayoutError::FileWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        info!(path = %path.display(), bytes = bytes.len(), "PNG written");
        Ok(())
    }
}

// ============================================================================
// Canvas
// ============================================================================

struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    fn blend(&mut self, x: i64, y: i64, rgb: [u8; 3], alpha: f32) {
        if x < 0 || y < 0 || x >= self.image.width() as i64 || y >= self.image.height() as i64 {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        for (dst, src) in pixel.0.iter_mut().take(3).zip(rgb) {
            *dst = (src as f32 * alpha + *dst as f32 * (1.0 - alpha)).round() as u8;
        }
        pixel.0[3] = 255;
    }

    fn fill_rect(&mut self, rect: &Rect, rgb: [u8; 3], alpha: f32) {
        let x0 = rect.position.x.round() as i64;
        let y0 = rect.position.y.round() as i64;
        let x1 = rect.right().round() as i64;
        let y1 = rect.bottom().round() as i64;
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, rgb, alpha);
            }
        }
    }

    fn stroke_rect(&mut self, rect: &Rect, stroke: &Stroke) {
        let (x, y) = (rect.position.x, rect.position.y);
        let (r, b) = (rect.right(), rect.bottom());
        let corners = [
            Position::new(x, y),
            Position::new(r, y),
            Position::new(r, b),
            Position::new(x, b),
            Position::new(x, y),
        ];
        self.stroke_path(&corners, stroke);
    }

    /// Stroke connected segments, carrying the dash phase across corners
    fn stroke_path(&mut self, points: &[Position], stroke: &Stroke) {
        let rgb = stroke.color.to_rgb();
        let half = (stroke.width / 2.0).max(0.5);
        let mut travelled = 0.0;

        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (dx, dy) = (b.x - a.x, b.y - a.y);
            let length = (dx * dx + dy * dy).sqrt();

            let min_x = (a.x.min(b.x) - half).floor() as i64;
            let max_x = (a.x.max(b.x) + half).ceil() as i64;
            let min_y = (a.y.min(b.y) - half).floor() as i64;
            let max_y = (a.y.max(b.y) + half).ceil() as i64;

            for py in min_y..max_y {
                for px in min_x..max_x {
                    let (cx, cy) = (px as f32 + 0.5, py as f32 + 0.5);
                    let t = if length > 0.0 {
                        (((cx - a.x) * dx + (cy - a.y) * dy) / (length * length)).clamp(0.0, 1.0)
                    } else {
                        0.0
                    };
                    let (nx, ny) = (a.x + t * dx, a.y + t * dy);
                    let distance = ((cx - nx).powi(2) + (cy - ny).powi(2)).sqrt();
                    if distance > half {
                        continue;
                    }
                    if stroke.is_dashed() && !dash_visible(&stroke.dash, travelled + t * length) {
                        continue;
                    }
                    self.blend(px, py, rgb, 1.0);
                }
            }
            travelled += length;
        }
    }

    fn circle(
        &mut self,
        center: Position,
        radius: f32,
        rgb: [u8; 3],
        alpha: f32,
        stroke: Option<&Stroke>,
    ) {
        let outer = radius + stroke.map(|s| s.width / 2.0).unwrap_or(0.0);
        let min_x = (center.x - outer).floor() as i64;
        let max_x = (center.x + outer).ceil() as i64;
        let min_y = (center.y - outer).floor() as i64;
        let max_y = (center.y + outer).ceil() as i64;

        for py in min_y..max_y {
            for px in min_x..max_x {
                let (cx, cy) = (px as f32 + 0.5, py as f32 + 0.5);
                let distance = ((cx - center.x).powi(2) + (cy - center.y).powi(2)).sqrt();
                if distance <= radius {
                    self.blend(px, py, rgb, alpha);
                }
                if let Some(stroke) = stroke {
                    if (distance - radius).abs() <= stroke.width / 2.0 {
                        self.blend(px, py, stroke.color.to_rgb(), 1.0);
                    }
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn text(
        &mut self,
        font: &Font,
        position: Position,
        text: &str,
        size: f32,
        weight: FontWeight,
        anchor: TextAnchor,
        rgb: [u8; 3],
    ) {
        let advance: f32 = text
            .chars()
            .map(|ch| font.metrics(ch, size).advance_width)
            .sum();
        let mut pen_x = match anchor {
            TextAnchor::Start => position.x,
            TextAnchor::Middle => position.x - advance / 2.0,
        };
        let passes: &[f32] = match weight {
            FontWeight::Normal => &[0.0],
            FontWeight::Bold => &[0.0, 1.0],
        };

        for ch in text.chars() {
            let (metrics, bitmap) = font.rasterize(ch, size);
            let left = pen_x.round() as i64 + metrics.xmin as i64;
            let top = position.y.round() as i64 - (metrics.height as i64 + metrics.ymin as i64);
            for pass in passes {
                for (i, coverage) in bitmap.iter().enumerate() {
                    if *coverage == 0 {
                        continue;
                    }
                    let gx = (i % metrics.width.max(1)) as i64;
                    let gy = (i / metrics.width.max(1)) as i64;
                    self.blend(
                        left + gx + *pass as i64,
                        top + gy,
                        rgb,
                        *coverage as f32 / 255.0,
                    );
                }
            }
            pen_x += metrics.advance_width;
        }
    }
}

/// Whether the point `distance` along a path falls on a dash
fn dash_visible(pattern: &[f32], distance: f32) -> bool {
    let period: f32 = pattern.iter().sum();
    if period <= 0.0 {
        return true;
    }
    let mut offset = distance.rem_euclid(period);
    for (i, segment) in pattern.iter().enumerate() {
        if offset < *segment {
            return i % 2 == 0;
        }
        offset -= segment;
    }
    true
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{BLACK, Color, ROUTE, WHITE};
    use crate::renderer::{RenderRequest, render};
    use shelfmap_ir::Product;
    use tempfile::tempdir;

    fn pixel(image: &RgbaImage, x: u32, y: u32) -> [u8; 4] {
        image.get_pixel(x, y).0
    }

    #[test]
    fn test_background_and_size() {
        let scene = Scene::new(40.0, 30.0, WHITE);
        let image = Rasterizer::new().rasterize(&scene);
        assert_eq!(image.dimensions(), (40, 30));
        assert_eq!(pixel(&image, 10, 10), [255, 255, 255, 255]);
    }

    #[test]
    fn test_fill_rect_blends_opacity() {
        let mut scene = Scene::new(20.0, 20.0, WHITE);
        scene.push(DrawCommand::FillRect {
            rect: Rect::from_xywh(5.0, 5.0, 10.0, 10.0),
            color: BLACK,
            opacity: 0.5,
        });
        let image = Rasterizer::new().rasterize(&scene);
        assert_eq!(pixel(&image, 10, 10), [128, 128, 128, 255]);
        assert_eq!(pixel(&image, 2, 2), [255, 255, 255, 255]);
    }

    #[test]
    fn test_dash_pattern() {
        assert!(dash_visible(&[5.0, 5.0], 0.0));
        assert!(dash_visible(&[5.0, 5.0], 4.9));
        assert!(!dash_visible(&[5.0, 5.0], 5.0));
        assert!(!dash_visible(&[5.0, 5.0], 9.9));
        assert!(dash_visible(&[5.0, 5.0], 10.0));
    }

    #[test]
    fn test_dashed_line_has_gaps() {
        let mut scene = Scene::new(40.0, 10.0, WHITE);
        scene.push(DrawCommand::Polyline {
            points: vec![Position::new(0.0, 5.0), Position::new(40.0, 5.0)],
            stroke: Stroke::dashed(ROUTE, 3.0, vec![5.0, 5.0]),
        });
        let image = Rasterizer::new().rasterize(&scene);
        assert_eq!(pixel(&image, 2, 5), [255, 0, 0, 255]);
        assert_eq!(pixel(&image, 7, 5), [255, 255, 255, 255]);
        assert_eq!(pixel(&image, 12, 5), [255, 0, 0, 255]);
    }

    #[test]
    fn test_circle_fill_and_outline() {
        let mut scene = Scene::new(30.0, 30.0, Color::hex(0x000000));
        scene.push(DrawCommand::Circle {
            center: Position::new(15.0, 15.0),
            radius: 10.0,
            fill: WHITE,
            opacity: 1.0,
            stroke: Some(Stroke::solid(ROUTE, 1.0)),
        });
        let image = Rasterizer::new().rasterize(&scene);
        assert_eq!(pixel(&image, 15, 15), [255, 255, 255, 255]);
        assert_eq!(pixel(&image, 0, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn test_text_skipped_without_font() {
        let mut scene = Scene::new(20.0, 20.0, WHITE);
        scene.push(DrawCommand::Text {
            position: Position::new(2.0, 15.0),
            text: "A".into(),
            size: 12.0,
            weight: FontWeight::Normal,
            anchor: TextAnchor::Start,
            color: BLACK,
        });
        let rasterizer = Rasterizer::new();
        assert!(!rasterizer.has_font());
        let image = rasterizer.rasterize(&scene);
        assert!(image.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_invalid_font_bytes() {
        assert!(Rasterizer::with_font_bytes(b"not a font").is_err());
    }

    #[test]
    fn test_save_store_map_png() {
        let products = vec![Product::new("Tea").with_tag("grocery").at(1, 2)];
        let scene = render(&RenderRequest::store_map(&products));
        let dir = tempdir().unwrap();
        let path = dir.path().join("map.png");

        Rasterizer::new().save_png(&scene, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (240, 120));
        // center of the product cell at column 2, row 1
        assert_eq!(decoded.get_pixel(200, 70).0, [0x3b, 0x82, 0xf6, 255]);
    }
}
