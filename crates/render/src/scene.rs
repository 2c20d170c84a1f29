//! Display list produced by the renderer

use crate::palette::Color;
use shelfmap_core::{Position, Rect};

/// Stroke style for outlines and paths
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    /// Alternating dash and gap lengths; empty means solid
    pub dash: Vec<f32>,
}

impl Stroke {
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: Vec::new(),
        }
    }

    pub fn dashed(color: Color, width: f32, dash: Vec<f32>) -> Self {
        Self { color, width, dash }
    }

    pub fn is_dashed(&self) -> bool {
        self.dash.iter().any(|d| *d > 0.0)
    }
}

/// Text weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
}

/// A single drawing primitive. Commands are painted in order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Position,
        to: Position,
        stroke: Stroke,
    },
    FillRect {
        rect: Rect,
        color: Color,
        opacity: f32,
    },
    StrokeRect {
        rect: Rect,
        stroke: Stroke,
    },
    Circle {
        center: Position,
        radius: f32,
        fill: Color,
        opacity: f32,
        stroke: Option<Stroke>,
    },
    /// Text positioned by its alphabetic baseline
    Text {
        position: Position,
        text: String,
        size: f32,
        weight: FontWeight,
        anchor: TextAnchor,
        color: Color,
    },
    Polyline {
        points: Vec<Position>,
        stroke: Stroke,
    },
}

/// A complete frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub background: Color,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new(width: f32, height: f32, background: Color) -> Self {
        Self {
            width,
            height,
            background,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All text strings in paint order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{BLACK, WHITE};

    #[test]
    fn test_stroke_dash_detection() {
        assert!(!Stroke::solid(BLACK, 1.0).is_dashed());
        assert!(Stroke::dashed(BLACK, 1.0, vec![5.0, 5.0]).is_dashed());
        assert!(!Stroke::dashed(BLACK, 1.0, vec![0.0]).is_dashed());
    }

    #[test]
    fn test_scene_texts() {
        let mut scene = Scene::new(100.0, 50.0, WHITE);
        assert!(scene.is_empty());
        scene.push(DrawCommand::Text {
            position: Position::new(1.0, 2.0),
            text: "DOOR".into(),
            size: 12.0,
            weight: FontWeight::Normal,
            anchor: TextAnchor::Start,
            color: WHITE,
        });
        scene.push(DrawCommand::Line {
            from: Position::zero(),
            to: Position::new(10.0, 0.0),
            stroke: Stroke::solid(BLACK, 1.0),
        });
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.texts().collect::<Vec<_>>(), vec!["DOOR"]);
    }
}
