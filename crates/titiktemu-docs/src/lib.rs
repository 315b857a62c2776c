//! # titiktemu-docs: Invoice & Receipt Rendering
//!
//! Turns an order snapshot into a printable PDF: an A4 invoice or a 58mm
//! thermal receipt, both carrying a QR code that links back to the order.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Order + OrderItems          RenderContext                             │
//! │          │               (settings, optional BrandMark)                 │
//! │          └───────────┬──────────────┘                                   │
//! │                      ▼                                                  │
//! │   ┌──────────────────────────────────┐     ┌──────────────┐             │
//! │   │ invoice / receipt layout         │◄────│ qr           │             │
//! │   │  motif, watermark, PAID stamp,   │     │ QrMatrix     │             │
//! │   │  header, rows, totals, QR box    │     └──────────────┘             │
//! │   └────────────────┬─────────────────┘                                  │
//! │                    ▼                                                    │
//! │   ┌──────────────────────────────────┐                                  │
//! │   │ canvas: Canvas of DrawOps        │  inspectable in tests            │
//! │   └────────────────┬─────────────────┘                                  │
//! │                    ▼                                                    │
//! │   ┌──────────────────────────────────┐                                  │
//! │   │ pdf: write_pdf (lopdf)           │──► RenderedDocument              │
//! │   └──────────────────────────────────┘                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`document`] - Entry points, settings, output metadata
//! - [`canvas`] - Backend-free drawing surface
//! - [`pdf`] - Canvas to PDF bytes
//! - [`qr`] - QR matrix generation
//! - [`assets`] - Brand mark loading
//! - [`text`] - Font metrics, truncation, date formatting
//! - [`style`] - Palette and units
//! - [`error`] - Render errors
//!
//! ## Example Usage
//!
//! ```rust
//! use titiktemu_docs::verification_url;
//!
//! let target = verification_url("https://titiktemu.id", "7f1c2a9e");
//! assert_eq!(target, "https://titiktemu.id/checkout?orderId=7f1c2a9e");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod assets;
pub mod canvas;
pub mod document;
pub mod error;
pub mod pdf;
pub mod qr;
pub mod style;
pub mod text;

mod invoice;
mod receipt;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use assets::BrandMark;
pub use canvas::Canvas;
pub use document::{
    layout_invoice, layout_receipt, render_invoice, render_receipt, suggested_filename,
    verification_url, DocumentKind, DocumentSettings, RenderContext, RenderedDocument,
};
pub use error::{RenderError, RenderResult};
