//! # Render Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Failure Classes                                      │
//! │                                                                         │
//! │  Missing / undecodable brand mark  ──► silent fallback (never here)    │
//! │  A4 item overflow                  ──► rows dropped (never here)       │
//! │                                                                         │
//! │  QR target cannot be encoded       ──► RenderError::QrEncoding         │
//! │  Non-finite or empty page geometry ──► RenderError::InvalidGeometry    │
//! │  Totals break the order invariant  ──► RenderError::InvalidOrder       │
//! │  PDF writer failure                ──► RenderError::Pdf                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller reports kind() + message; no partial PDF is returned           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use titiktemu_core::CoreError;

/// Document rendering errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The verification URL does not fit in a QR code.
    #[error("Cannot encode QR target: {0}")]
    QrEncoding(#[from] qrcode::types::QrError),

    /// Page or drawing geometry that cannot be serialised.
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),

    /// The order handed to the renderer violates its own invariants.
    #[error("Order cannot be rendered: {0}")]
    InvalidOrder(#[from] CoreError),

    /// The PDF writer failed.
    #[error("PDF serialisation failed: {0}")]
    Pdf(#[from] lopdf::Error),

    /// An asset could not be decoded.
    ///
    /// Only returned by the explicit decoders such as
    /// [`crate::assets::BrandMark::from_png_bytes`]; rendering never fails
    /// because of an asset.
    #[error("Asset could not be decoded: {0}")]
    Asset(String),
}

impl RenderError {
    /// Stable, machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            RenderError::QrEncoding(_) => "qr_encoding",
            RenderError::InvalidGeometry(_) => "invalid_geometry",
            RenderError::InvalidOrder(_) => "invalid_order",
            RenderError::Pdf(_) => "pdf",
            RenderError::Asset(_) => "asset",
        }
    }
}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        RenderError::Asset(err.to_string())
    }
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
