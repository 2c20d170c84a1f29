//! Colors and the category color rule

use shelfmap_core::Category;
use std::fmt;

// ============================================================================
// Color
// ============================================================================

/// An opaque color, either fixed RGB or a hue-derived HSL value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Rgb { r: u8, g: u8, b: u8 },
    Hsl { hue: u16, saturation: u8, lightness: u8 },
}

impl Color {
    /// Build a color from a 0xRRGGBB literal
    pub const fn hex(value: u32) -> Self {
        Color::Rgb {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    /// CSS representation (`#rrggbb` or `hsl(h, s%, l%)`)
    pub fn to_css(&self) -> String {
        match *self {
            Color::Rgb { r, g, b } => format!("#{:02x}{:02x}{:02x}", r, g, b),
            Color::Hsl {
                hue,
                saturation,
                lightness,
            } => format!("hsl({}, {}%, {}%)", hue, saturation, lightness),
        }
    }

    /// Resolve to 8-bit RGB
    pub fn to_rgb(&self) -> [u8; 3] {
        match *self {
            Color::Rgb { r, g, b } => [r, g, b],
            Color::Hsl {
                hue,
                saturation,
                lightness,
            } => hsl_to_rgb(hue as f32, saturation as f32 / 100.0, lightness as f32 / 100.0),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [u8; 3] {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = (hue % 360.0) / 60.0;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    [channel(r), channel(g), channel(b)]
}

// ============================================================================
// Fixed colors
// ============================================================================

pub const WHITE: Color = Color::hex(0xffffff);
pub const BLACK: Color = Color::hex(0x000000);
pub const GRID_LINE: Color = Color::hex(0xe5e7eb);
pub const LABEL: Color = Color::hex(0x6b7280);
pub const ROUTE: Color = Color::hex(0xff0000);

/// Color used when a tag is missing or empty
pub const DEFAULT_TAG_COLOR: Color = Color::hex(0x3b82f6);

/// Fixed color of a built-in category
pub fn category_color(category: Category) -> Color {
    match category {
        Category::Grocery => Color::hex(0x3b82f6),
        Category::Electronics => Color::hex(0x10b981),
        Category::Clothing => Color::hex(0xf59e0b),
        Category::Home => Color::hex(0xef4444),
        Category::Office => Color::hex(0x8b5cf6),
        Category::Toys => Color::hex(0xec4899),
    }
}

/// Deterministic string hash over UTF-16 code units.
///
/// Each step computes `code + ((hash << 5) - hash)` where the shift operates
/// on the low 32 bits of the running value.
pub fn tag_hash(tag: &str) -> i64 {
    tag.encode_utf16().fold(0i64, |hash, unit| {
        let shifted = (hash as i32).wrapping_shl(5) as i64;
        unit as i64 + (shifted - hash)
    })
}

/// Color for a category tag.
///
/// The six built-in tags (any case) get their fixed color, an empty tag gets
/// the default blue, and anything else gets a hue derived from the tag hash.
pub fn color_for_tag(tag: &str) -> Color {
    if tag.is_empty() {
        return DEFAULT_TAG_COLOR;
    }
    if let Some(category) = Category::from_tag(tag) {
        return category_color(category);
    }
    Color::Hsl {
        hue: (tag_hash(tag).unsigned_abs() % 360) as u16,
        saturation: 70,
        lightness: 50,
    }
}

/// Legend entries for the six built-in categories
pub fn legend() -> Vec<(Category, Color)> {
    Category::all()
        .iter()
        .map(|c| (*c, category_color(*c)))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fixed_colors_ignore_case() {
        assert_eq!(color_for_tag("grocery").to_css(), "#3b82f6");
        assert_eq!(color_for_tag("Grocery"), color_for_tag("grocery"));
        assert_eq!(color_for_tag("ELECTRONICS").to_css(), "#10b981");
        assert_eq!(color_for_tag("clothing").to_css(), "#f59e0b");
        assert_eq!(color_for_tag("home").to_css(), "#ef4444");
        assert_eq!(color_for_tag("office").to_css(), "#8b5cf6");
        assert_eq!(color_for_tag("toys").to_css(), "#ec4899");
    }

    #[test]
    fn test_empty_tag_is_default_blue() {
        assert_eq!(color_for_tag(""), DEFAULT_TAG_COLOR);
    }

    #[test]
    fn test_hash_matches_reference_values() {
        // "a" -> 97; "ab" -> 98 + (97 * 32 - 97) = 3105
        assert_eq!(tag_hash("a"), 97);
        assert_eq!(tag_hash("ab"), 3105);
        assert_eq!(color_for_tag("ab").to_css(), "hsl(225, 70%, 50%)");
    }

    #[test]
    fn test_hash_is_stable_for_long_tags() {
        let tag = "seasonal-decorations-and-outdoor-furniture";
        assert_eq!(color_for_tag(tag), color_for_tag(tag));
        match color_for_tag(tag) {
            Color::Hsl { hue, .. } => assert!(hue < 360),
            other => panic!("expected hsl, got {:?}", other),
        }
    }

    #[test]
    fn test_hsl_to_rgb() {
        let red = Color::Hsl {
            hue: 0,
            saturation: 100,
            lightness: 50,
        };
        assert_eq!(red.to_rgb(), [255, 0, 0]);
        let blue = Color::Hsl {
            hue: 240,
            saturation: 100,
            lightness: 50,
        };
        assert_eq!(blue.to_rgb(), [0, 0, 255]);
    }

    #[test]
    fn test_legend_order() {
        let legend = legend();
        assert_eq!(legend.len(), 6);
        assert_eq!(legend[0].0, Category::Grocery);
        assert_eq!(legend[5].1.to_css(), "#ec4899");
    }
}
