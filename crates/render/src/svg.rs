//! SVG backend

use crate::scene::{DrawCommand, FontWeight, Scene, Stroke, TextAnchor};
use shelfmap_core::Position;
use std::fmt::Write;

const FONT_FAMILY: &str = "Arial, sans-serif";

/// Escape text for use in XML content and attribute values
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn stroke_attrs(stroke: &Stroke) -> String {
    let mut attrs = format!(
        r#"stroke="{}" stroke-width="{}""#,
        stroke.color.to_css(),
        stroke.width
    );
    if stroke.is_dashed() {
        let dash: Vec<String> = stroke.dash.iter().map(|d| d.to_string()).collect();
        let _ = write!(attrs, r#" stroke-dasharray="{}""#, dash.join(","));
    }
    attrs
}

fn points_attr(points: &[Position]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Serialize a scene to a standalone SVG document
pub fn to_svg(scene: &Scene) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = scene.width,
        h = scene.height
    );
    let _ = writeln!(
        out,
        r#"  <rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
        scene.width,
        scene.height,
        scene.background.to_css()
    );

    for command in &scene.commands {
        let _ = match command {
            DrawCommand::Line { from, to, stroke } => writeln!(
                out,
                r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
                from.x,
                from.y,
                to.x,
                to.y,
                stroke_attrs(stroke)
            ),
            DrawCommand::FillRect {
                rect,
                color,
                opacity,
            } => writeln!(
                out,
                r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}" fill-opacity="{}"/>"#,
                rect.position.x,
                rect.position.y,
                rect.size.width,
                rect.size.height,
                color.to_css(),
                opacity
            ),
            DrawCommand::StrokeRect { rect, stroke } => writeln!(
                out,
                r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="none" {}/>"#,
                rect.position.x,
                rect.position.y,
                rect.size.width,
                rect.size.height,
                stroke_attrs(stroke)
            ),
            DrawCommand::Circle {
                center,
                radius,
                fill,
                opacity,
                stroke,
            } => writeln!(
                out,
                r#"  <circle cx="{}" cy="{}" r="{}" fill="{}" fill-opacity="{}" {}/>"#,
                center.x,
                center.y,
                radius,
                fill.to_css(),
                opacity,
                stroke.as_ref().map(stroke_attrs).unwrap_or_default()
            ),
            DrawCommand::Text {
                position,
                text,
                size,
                weight,
                anchor,
                color,
            } => writeln!(
                out,
                r#"  <text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{}" text-anchor="{}" fill="{}">{}</text>"#,
                position.x,
                position.y,
                FONT_FAMILY,
                size,
                match weight {
                    FontWeight::Normal => "normal",
                    FontWeight::Bold => "bold",
                },
                match anchor {
                    TextAnchor::Start => "start",
                    TextAnchor::Middle => "middle",
                },
                color.to_css(),
                escape_xml(text)
            ),
            DrawCommand::Polyline { points, stroke } => writeln!(
                out,
                r#"  <polyline points="{}" fill="none" {}/>"#,
                points_attr(points),
                stroke_attrs(stroke)
            ),
        };
    }

    out.push_str("</svg>\n");
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{BLACK, ROUTE, WHITE};
    use shelfmap_core::Rect;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Salt & <Pepper>"), "Salt &amp; &lt;Pepper&gt;");
        assert_eq!(escape_xml("\"quoted\""), "&quot;quoted&quot;");
    }

    #[test]
    fn test_svg_document() {
        let mut scene = Scene::new(160.0, 120.0, WHITE);
        scene.push(DrawCommand::FillRect {
            rect: Rect::from_xywh(80.0, 60.0, 80.0, 60.0),
            color: BLACK,
            opacity: 0.7,
        });
        scene.push(DrawCommand::Polyline {
            points: vec![Position::new(0.0, 0.0), Position::new(10.0, 5.5)],
            stroke: Stroke::dashed(ROUTE, 3.0, vec![5.0, 5.0]),
        });
        scene.push(DrawCommand::Text {
            position: Position::new(5.0, 20.0),
            text: "Tea & Coffee".into(),
            size: 14.0,
            weight: FontWeight::Bold,
            anchor: TextAnchor::Start,
            color: WHITE,
        });

        let svg = to_svg(&scene);
        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"viewBox="0 0 160 120""#));
        assert!(svg.contains(r##"fill="#000000" fill-opacity="0.7""##));
        assert!(svg.contains(r#"points="0,0 10,5.5""#));
        assert!(svg.contains(r#"stroke-dasharray="5,5""#));
        assert!(svg.contains(r#"font-weight="bold""#));
        assert!(svg.contains(">Tea &amp; Coffee</text>"));
    }

    #[test]
    fn test_hsl_colors_pass_through() {
        let mut scene = Scene::new(10.0, 10.0, WHITE);
        scene.push(DrawCommand::FillRect {
            rect: Rect::from_xywh(0.0, 0.0, 10.0, 10.0),
            color: crate::palette::color_for_tag("ab"),
            opacity: 1.0,
        });
        assert!(to_svg(&scene).contains(r#"fill="hsl(225, 70%, 50%)""#));
    }
}
