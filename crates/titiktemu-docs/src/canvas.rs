//! # Drawing Canvas
//!
//! A page as an ordered list of drawing instructions plus the raster images
//! they reference. Layouts build a [`Canvas`]; [`crate::pdf`] serialises it.
//!
//! ## Coordinate System
//! ```text
//!   (0, height) ┌──────────────────────┐ (width, height)
//!               │                      │
//!               │   points, y grows    │
//!               │   upward (PDF user   │
//!               │   space)             │
//!               │                      │
//!        (0, 0) └──────────────────────┘ (width, 0)
//! ```
//!
//! Later instructions paint over earlier ones. Rotations are in degrees,
//! counter-clockwise, around the instruction's own `(x, y)` anchor.

use crate::error::{RenderError, RenderResult};
use crate::text::{sanitize_text, StandardFont};

// =============================================================================
// Colors
// =============================================================================

/// An RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b }
    }

    pub const fn gray(level: f32) -> Self {
        Color::rgb(level, level, level)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

// =============================================================================
// Instructions
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
    pub opacity: f32,
    pub rotation: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
            fill: None,
            stroke: None,
            opacity: 1.0,
            rotation: 0.0,
        }
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn stroke(mut self, color: Color, width: f32) -> Self {
        self.stroke = Some(Stroke { color, width });
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn rotate(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub from: (f32, f32),
    pub to: (f32, f32),
    pub thickness: f32,
    pub color: Color,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
    pub color: Color,
    pub opacity: f32,
}

/// A single-line text run. `(x, y)` is the left end of the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font: StandardFont,
    pub size: f32,
    pub color: Color,
    pub opacity: f32,
    pub rotation: f32,
}

impl Text {
    /// Creates a run; `text` is sanitised to the printable repertoire.
    pub fn new(text: &str, x: f32, y: f32, font: StandardFont, size: f32, color: Color) -> Self {
        Text {
            text: sanitize_text(text),
            x,
            y,
            font,
            size,
            color,
            opacity: 1.0,
            rotation: 0.0,
        }
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn rotate(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    /// Rendered width in points.
    pub fn width(&self) -> f32 {
        self.font.text_width(&self.text, self.size)
    }
}

/// Handle to a raster registered with [`Canvas::add_image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct ImagePlacement {
    pub image: ImageId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect(Rect),
    Line(Line),
    Circle(Circle),
    Text(Text),
    Image(ImagePlacement),
}

impl DrawOp {
    pub fn opacity(&self) -> f32 {
        match self {
            DrawOp::Rect(r) => r.opacity,
            DrawOp::Line(l) => l.opacity,
            DrawOp::Circle(c) => c.opacity,
            DrawOp::Text(t) => t.opacity,
            DrawOp::Image(i) => i.opacity,
        }
    }

    fn numbers(&self) -> Vec<f32> {
        match self {
            DrawOp::Rect(r) => {
                let mut n = vec![r.x, r.y, r.width, r.height, r.opacity, r.rotation];
                if let Some(c) = r.fill {
                    n.extend([c.r, c.g, c.b]);
                }
                if let Some(s) = r.stroke {
                    n.extend([s.color.r, s.color.g, s.color.b, s.width]);
                }
                n
            }
            DrawOp::Line(l) => vec![
                l.from.0,
                l.from.1,
                l.to.0,
                l.to.1,
                l.thickness,
                l.color.r,
                l.color.g,
                l.color.b,
                l.opacity,
            ],
            DrawOp::Circle(c) => vec![
                c.cx, c.cy, c.radius, c.color.r, c.color.g, c.color.b, c.opacity,
            ],
            DrawOp::Text(t) => vec![
                t.x, t.y, t.size, t.color.r, t.color.g, t.color.b, t.opacity, t.rotation,
            ],
            DrawOp::Image(i) => vec![i.x, i.y, i.width, i.height, i.opacity],
        }
    }
}

// =============================================================================
// Raster Images
// =============================================================================

/// Decoded 8-bit pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Raster {
    /// One luminance byte per pixel.
    Gray {
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    },
    /// Four bytes per pixel, straight alpha.
    Rgba {
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    },
}

impl Raster {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Raster::Gray { width, height, .. } | Raster::Rgba { width, height, .. } => {
                (*width, *height)
            }
        }
    }
}

// =============================================================================
// Canvas
// =============================================================================

/// One page of drawing instructions.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: f32,
    height: f32,
    ops: Vec<DrawOp>,
    images: Vec<Raster>,
}

impl Canvas {
    /// Creates an empty page of `width` × `height` points.
    pub fn new(width: f32, height: f32) -> RenderResult<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(RenderError::InvalidGeometry(format!(
                "page size {} x {} is not drawable",
                width, height
            )));
        }

        Ok(Canvas {
            width,
            height,
            ops: Vec::new(),
            images: Vec::new(),
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn images(&self) -> &[Raster] {
        &self.images
    }

    pub fn image(&self, id: ImageId) -> Option<&Raster> {
        self.images.get(id.0)
    }

    pub fn add_image(&mut self, raster: Raster) -> ImageId {
        self.images.push(raster);
        ImageId(self.images.len() - 1)
    }

    pub fn rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::Rect(rect));
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), thickness: f32, color: Color, opacity: f32) {
        self.ops.push(DrawOp::Line(Line {
            from,
            to,
            thickness,
            color,
            opacity,
        }));
    }

    pub fn circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color, opacity: f32) {
        self.ops.push(DrawOp::Circle(Circle {
            cx,
            cy,
            radius,
            color,
            opacity,
        }));
    }

    pub fn text(&mut self, text: Text) {
        self.ops.push(DrawOp::Text(text));
    }

    pub fn draw_image(&mut self, image: ImageId, x: f32, y: f32, width: f32, height: f32, opacity: f32) {
        self.ops.push(DrawOp::Image(ImagePlacement {
            image,
            x,
            y,
            width,
            height,
            opacity,
        }));
    }

    /// All text runs in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn find_text(&self, needle: &str) -> Option<&Text> {
        self.texts().find(|t| t.text == needle)
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.find_text(needle).is_some()
    }

    /// Checks that every instruction can be serialised: finite numbers and
    /// image handles that point at a registered raster.
    pub fn validate(&self) -> RenderResult<()> {
        for (index, op) in self.ops.iter().enumerate() {
            if op.numbers().iter().any(|n| !n.is_finite()) {
                return Err(RenderError::InvalidGeometry(format!(
                    "instruction {} has a non-finite coordinate",
                    index
                )));
            }

            if let DrawOp::Image(placement) = op {
                if self.image(placement.image).is_none() {
                    return Err(RenderError::InvalidGeometry(format!(
                        "instruction {} references unknown image {}",
                        index, placement.image.0
                    )));
                }
            }
        }

        for raster in &self.images {
            let (w, h) = raster.dimensions();
            let (pixels, channels) = match raster {
                Raster::Gray { pixels, .. } => (pixels.len(), 1),
                Raster::Rgba { pixels, .. } => (pixels.len(), 4),
            };
            if w == 0 || h == 0 || pixels != (w as usize) * (h as usize) * channels {
                return Err(RenderError::InvalidGeometry(format!(
                    "raster {} x {} has {} bytes",
                    w, h, pixels
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Color = Color::gray(0.1);

    #[test]
    fn test_new_rejects_degenerate_page() {
        assert!(Canvas::new(0.0, 100.0).is_err());
        assert!(Canvas::new(100.0, f32::NAN).is_err());
        assert!(Canvas::new(-5.0, 100.0).is_err());
        assert!(Canvas::new(595.28, 841.89).is_ok());
    }

    #[test]
    fn test_text_is_sanitised_on_creation() {
        let text = Text::new("Logo 🎨 design", 0.0, 0.0, StandardFont::Helvetica, 10.0, INK);
        assert_eq!(text.text, "Logo  design");
    }

    #[test]
    fn test_ops_keep_paint_order() {
        let mut canvas = Canvas::new(100.0, 100.0).unwrap();
        canvas.rect(Rect::new(0.0, 0.0, 10.0, 10.0).fill(INK));
        canvas.text(Text::new("A", 1.0, 1.0, StandardFont::Courier, 9.0, INK));
        canvas.text(Text::new("B", 1.0, 1.0, StandardFont::Courier, 9.0, INK));

        assert!(matches!(canvas.ops()[0], DrawOp::Rect(_)));
        let texts: Vec<&str> = canvas.texts().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "B"]);
        assert!(canvas.contains_text("B"));
        assert!(!canvas.contains_text("C"));
    }

    #[test]
    fn test_validate_catches_bad_instructions() {
        let mut canvas = Canvas::new(100.0, 100.0).unwrap();
        canvas.line((0.0, 0.0), (f32::INFINITY, 1.0), 1.0, INK, 1.0);
        assert!(matches!(
            canvas.validate(),
            Err(RenderError::InvalidGeometry(_))
        ));

        let mut canvas = Canvas::new(100.0, 100.0).unwrap();
        canvas.draw_image(ImageId(3), 0.0, 0.0, 10.0, 10.0, 1.0);
        assert!(canvas.validate().is_err());

        let mut canvas = Canvas::new(100.0, 100.0).unwrap();
        canvas.add_image(Raster::Gray {
            width: 2,
            height: 2,
            pixels: vec![0; 3],
        });
        assert!(canvas.validate().is_err());
    }

    #[test]
    fn test_add_image_returns_sequential_ids() {
        let mut canvas = Canvas::new(100.0, 100.0).unwrap();
        let gray = Raster::Gray {
            width: 1,
            height: 1,
            pixels: vec![0],
        };
        assert_eq!(canvas.add_image(gray.clone()), ImageId(0));
        assert_eq!(canvas.add_image(gray), ImageId(1));
        assert!(canvas.validate().is_ok());
    }
}
