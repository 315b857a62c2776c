//! QR verification code.

use qrcode::{Color as ModuleColor, EcLevel, QrCode};

use crate::canvas::Raster;
use crate::error::RenderResult;

/// Light modules kept around the symbol.
pub const QUIET_ZONE: u32 = 1;

/// A QR symbol as a square grid of dark/light modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    width: usize,
    dark: Vec<bool>,
}

/// Encodes `target` at error-correction level M.
///
/// Fails when the target is too long for any QR version; the caller must
/// not produce a document without its verification code.
pub fn encode_qr(target: &str) -> RenderResult<QrMatrix> {
    let code = QrCode::with_error_correction_level(target.as_bytes(), EcLevel::M)?;
    let dark = code
        .to_colors()
        .into_iter()
        .map(|c| c == ModuleColor::Dark)
        .collect();

    Ok(QrMatrix {
        width: code.width(),
        dark,
    })
}

impl QrMatrix {
    /// Modules per side, without quiet zone.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.dark[y * self.width + x]
    }

    /// One gray pixel per module (0 dark, 255 light), framed by
    /// `quiet_zone` light modules on every side.
    pub fn to_raster(&self, quiet_zone: u32) -> Raster {
        let q = quiet_zone as usize;
        let side = self.width + 2 * q;
        let mut pixels = vec![255u8; side * side];

        for y in 0..self.width {
            for x in 0..self.width {
                if self.is_dark(x, y) {
                    pixels[(y + q) * side + (x + q)] = 0;
                }
            }
        }

        Raster::Gray {
            width: side as u32,
            height: side as u32,
            pixels,
        }
    }
}
