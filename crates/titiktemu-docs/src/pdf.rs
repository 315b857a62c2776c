//! # PDF Serialisation
//!
//! Writes a [`Canvas`] as a single-page PDF with lopdf.
//!
//! ## Object Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog ──► Pages ──► Page ──┬── Contents (one stream)                │
//! │                               └── Resources                             │
//! │                                   ├── Font      /F1.. (standard 14)    │
//! │                                   ├── ExtGState /GS.. (one per alpha)  │
//! │                                   └── XObject   /Im.. (+ SMask)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every resource name is assigned in a fixed order and no timestamps or
//! file identifiers are written, so the same canvas always yields the same
//! bytes.

use std::collections::{BTreeMap, BTreeSet};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::canvas::{Canvas, Color, DrawOp, ImagePlacement, Raster, Rect, Text};
use crate::error::RenderResult;
use crate::text::{encode_winansi, StandardFont};

/// Bezier handle length for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdfOptions {
    /// Flate-compress streams.
    pub compress: bool,
}

impl Default for PdfOptions {
    fn default() -> Self {
        PdfOptions { compress: true }
    }
}

/// Serialises `canvas` to PDF bytes.
pub fn write_pdf(canvas: &Canvas, options: PdfOptions) -> RenderResult<Vec<u8>> {
    canvas.validate()?;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let resources = Resources::collect(canvas);

    let mut fonts = Dictionary::new();
    for (font, name) in &resources.fonts {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(name.as_str(), font_id);
    }

    let mut states = Dictionary::new();
    for (alpha, name) in &resources.alphas {
        let value = *alpha as f32 / 1000.0;
        let state_id = doc.add_object(dictionary! {
            "Type" => "ExtGState",
            "ca" => value,
            "CA" => value,
        });
        states.set(name.as_str(), state_id);
    }

    let mut xobjects = Dictionary::new();
    for (index, raster) in canvas.images().iter().enumerate() {
        let image_id = add_image(&mut doc, raster);
        xobjects.set(image_name(index).as_str(), image_id);
    }

    let content = Content {
        operations: content_operations(canvas, &resources),
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), canvas.width().into(), canvas.height().into()],
        "Contents" => content_id,
        "Resources" => dictionary! {
            "Font" => fonts,
            "ExtGState" => states,
            "XObject" => xobjects,
        },
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if options.compress {
        doc.compress();
    }

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(lopdf::Error::from)?;
    Ok(bytes)
}

// =============================================================================
// Resources
// =============================================================================

/// Resource names used by the content stream.
struct Resources {
    fonts: BTreeMap<StandardFont, String>,
    /// Opacity in thousandths → graphics state name.
    alphas: BTreeMap<u16, String>,
}

impl Resources {
    fn collect(canvas: &Canvas) -> Self {
        let mut fonts = BTreeSet::new();
        let mut alphas = BTreeSet::new();

        for op in canvas.ops() {
            if let DrawOp::Text(text) = op {
                fonts.insert(text.font);
            }
            if let Some(alpha) = alpha_key(op.opacity()) {
                alphas.insert(alpha);
            }
        }

        Resources {
            fonts: fonts
                .into_iter()
                .enumerate()
                .map(|(i, font)| (font, format!("F{}", i + 1)))
                .collect(),
            alphas: alphas
                .into_iter()
                .enumerate()
                .map(|(i, alpha)| (alpha, format!("GS{}", i + 1)))
                .collect(),
        }
    }

    fn font(&self, font: StandardFont) -> &str {
        self.fonts.get(&font).map(String::as_str).unwrap_or("F1")
    }

    fn state(&self, opacity: f32) -> Option<&str> {
        alpha_key(opacity).and_then(|alpha| self.alphas.get(&alpha).map(String::as_str))
    }
}

/// Opacities below 1 need a graphics state; fully opaque ops do not.
fn alpha_key(opacity: f32) -> Option<u16> {
    let alpha = (opacity.clamp(0.0, 1.0) * 1000.0).round() as u16;
    (alpha < 1000).then_some(alpha)
}

fn image_name(index: usize) -> String {
    format!("Im{}", index + 1)
}

fn add_image(doc: &mut Document, raster: &Raster) -> ObjectId {
    match raster {
        Raster::Gray {
            width,
            height,
            pixels,
        } => doc.add_object(Stream::new(
            image_dict(*width, *height, "DeviceGray"),
            pixels.clone(),
        )),
        Raster::Rgba {
            width,
            height,
            pixels,
        } => {
            let mut rgb = Vec::with_capacity(pixels.len() / 4 * 3);
            let mut alpha = Vec::with_capacity(pixels.len() / 4);
            for px in pixels.chunks_exact(4) {
                rgb.extend_from_slice(&px[..3]);
                alpha.push(px[3]);
            }

            let mask_id = doc.add_object(Stream::new(
                image_dict(*width, *height, "DeviceGray"),
                alpha,
            ));
            let mut dict = image_dict(*width, *height, "DeviceRGB");
            dict.set("SMask", mask_id);
            doc.add_object(Stream::new(dict, rgb))
        }
    }
}

fn image_dict(width: u32, height: u32, color_space: &str) -> Dictionary {
    dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => i64::from(width),
        "Height" => i64::from(height),
        "ColorSpace" => color_space,
        "BitsPerComponent" => 8,
        "Interpolate" => false,
    }
}

// =============================================================================
// Content Stream
// =============================================================================

fn content_operations(canvas: &Canvas, resources: &Resources) -> Vec<Operation> {
    let mut ops = Vec::new();

    for op in canvas.ops() {
        ops.push(Operation::new("q", vec![]));
        if let Some(state) = resources.state(op.opacity()) {
            ops.push(Operation::new("gs", vec![Object::Name(state.as_bytes().to_vec())]));
        }

        match op {
            DrawOp::Rect(rect) => rect_ops(&mut ops, rect),
            DrawOp::Line(line) => {
                ops.push(color_op("RG", line.color));
                ops.push(Operation::new("w", vec![line.thickness.into()]));
                ops.push(Operation::new("m", vec![line.from.0.into(), line.from.1.into()]));
                ops.push(Operation::new("l", vec![line.to.0.into(), line.to.1.into()]));
                ops.push(Operation::new("S", vec![]));
            }
            DrawOp::Circle(circle) => {
                ops.push(color_op("rg", circle.color));
                circle_path(&mut ops, circle.cx, circle.cy, circle.radius);
                ops.push(Operation::new("f", vec![]));
            }
            DrawOp::Text(text) => text_ops(&mut ops, text, resources),
            DrawOp::Image(placement) => image_ops(&mut ops, placement),
        }

        ops.push(Operation::new("Q", vec![]));
    }

    ops
}

fn rect_ops(ops: &mut Vec<Operation>, rect: &Rect) {
    if let Some(fill) = rect.fill {
        ops.push(color_op("rg", fill));
    }
    if let Some(stroke) = rect.stroke {
        ops.push(color_op("RG", stroke.color));
        ops.push(Operation::new("w", vec![stroke.width.into()]));
    }

    if rect.rotation != 0.0 {
        ops.push(transform(rect.x, rect.y, rect.rotation, 1.0, 1.0));
        ops.push(Operation::new(
            "re",
            vec![0.into(), 0.into(), rect.width.into(), rect.height.into()],
        ));
    } else {
        ops.push(Operation::new(
            "re",
            vec![rect.x.into(), rect.y.into(), rect.width.into(), rect.height.into()],
        ));
    }

    let paint = match (rect.fill.is_some(), rect.stroke.is_some()) {
        (true, true) => "B",
        (true, false) => "f",
        (false, true) => "S",
        (false, false) => "n",
    };
    ops.push(Operation::new(paint, vec![]));
}

fn circle_path(ops: &mut Vec<Operation>, cx: f32, cy: f32, r: f32) {
    let k = r * KAPPA;
    ops.push(Operation::new("m", vec![(cx + r).into(), cy.into()]));
    let quarters = [
        [cx + r, cy + k, cx + k, cy + r, cx, cy + r],
        [cx - k, cy + r, cx - r, cy + k, cx - r, cy],
        [cx - r, cy - k, cx - k, cy - r, cx, cy - r],
        [cx + k, cy - r, cx + r, cy - k, cx + r, cy],
    ];
    for q in quarters {
        ops.push(Operation::new("c", q.iter().map(|v| (*v).into()).collect()));
    }
}

fn text_ops(ops: &mut Vec<Operation>, text: &Text, resources: &Resources) {
    let font_name = resources.font(text.font);

    ops.push(color_op("rg", text.color));
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![Object::Name(font_name.as_bytes().to_vec()), text.size.into()],
    ));
    let (sin, cos) = text.rotation.to_radians().sin_cos();
    ops.push(Operation::new(
        "Tm",
        vec![
            cos.into(),
            sin.into(),
            (-sin).into(),
            cos.into(),
            text.x.into(),
            text.y.into(),
        ],
    ));
    ops.push(Operation::new(
        "Tj",
        vec![Object::string_literal(encode_winansi(&text.text))],
    ));
    ops.push(Operation::new("ET", vec![]));
}

fn image_ops(ops: &mut Vec<Operation>, placement: &ImagePlacement) {
    ops.push(Operation::new(
        "cm",
        vec![
            placement.width.into(),
            0.into(),
            0.into(),
            placement.height.into(),
            placement.x.into(),
            placement.y.into(),
        ],
    ));
    ops.push(Operation::new(
        "Do",
        vec![Object::Name(image_name(placement.image.0).into_bytes())],
    ));
}

/// Translation to `(x, y)` followed by a rotation and scale.
fn transform(x: f32, y: f32, degrees: f32, sx: f32, sy: f32) -> Operation {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Operation::new(
        "cm",
        vec![
            (cos * sx).into(),
            (sin * sx).into(),
            (-sin * sy).into(),
            (cos * sy).into(),
            x.into(),
            y.into(),
        ],
    )
}

fn color_op(operator: &str, color: Color) -> Operation {
    Operation::new(
        operator,
        vec![color.r.into(), color.g.into(), color.b.into()],
    )
}
