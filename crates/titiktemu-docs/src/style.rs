//! Shared palette and measurements for both document formats.

use crate::canvas::Color;

/// Points per millimetre.
pub const MM: f32 = 72.0 / 25.4;

pub fn mm(value: f32) -> f32 {
    value * MM
}

/// Deep brown of the header band and stripes.
pub const BATIK: Color = Color::rgb(0.35, 0.16, 0.16);
/// Green accent line and QR frame.
pub const JADE: Color = Color::rgb(0.15, 0.4, 0.3);
pub const INK: Color = Color::gray(0.1);
pub const MUTED: Color = Color::gray(0.35);
pub const RULE: Color = Color::gray(0.88);
pub const BONE: Color = Color::rgb(0.98, 0.96, 0.92);
pub const HEADER_FILL: Color = Color::gray(0.97);
pub const WHITE: Color = Color::gray(1.0);
pub const STAMP_RED: Color = Color::rgb(0.78, 0.1, 0.1);

pub const PAID_LABEL: &str = "PAID";
/// Tilt of the paid stamp, in degrees.
pub const STAMP_ROTATION: f32 = -12.0;

/// Drops the scheme so the printed link stays short.
pub fn short_link(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}
