//! # Brand Mark
//!
//! The storefront logo drawn in document headers and as a watermark.
//! It is optional: when it is missing or unreadable the layouts draw a text
//! initial box instead, so loading never fails a render.

use std::path::Path;

use image::ImageFormat;
use tracing::{debug, warn};

use crate::canvas::Raster;
use crate::error::{RenderError, RenderResult};

/// A decoded RGBA logo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandMark {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl BrandMark {
    /// Decodes PNG bytes.
    pub fn from_png_bytes(bytes: &[u8]) -> RenderResult<Self> {
        let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png)?.to_rgba8();
        let (width, height) = decoded.dimensions();

        if width == 0 || height == 0 {
            return Err(RenderError::Asset("brand mark has no pixels".to_string()));
        }

        Ok(BrandMark {
            width,
            height,
            rgba: decoded.into_raw(),
        })
    }

    /// Reads and decodes a PNG file, or `None` if that is not possible.
    pub async fn load(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Brand mark not readable");
                return None;
            }
        };

        match Self::from_png_bytes(&bytes) {
            Ok(mark) => {
                debug!(
                    path = %path.display(),
                    width = mark.width,
                    height = mark.height,
                    "Brand mark loaded"
                );
                Some(mark)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Brand mark could not be decoded");
                None
            }
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn to_raster(&self) -> Raster {
        Raster::Rgba {
            width: self.width,
            height: self.height,
            pixels: self.rgba.clone(),
        }
    }
}
