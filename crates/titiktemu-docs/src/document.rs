//! # Document Entry Points
//!
//! ## Render Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  caller: load order + items, check owner/admin, build verification URL │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  render_invoice() / render_receipt()                                   │
//! │        │                                                                │
//! │        ├── Order::check_totals()        ──► InvalidOrder               │
//! │        ├── encode_qr(target)            ──► QrEncoding                 │
//! │        ├── layout_invoice/receipt()     ──► Canvas                     │
//! │        └── write_pdf(canvas)            ──► bytes                      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  RenderedDocument { bytes, "application/pdf", filename }               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering is synchronous and touches no shared state; concurrent renders
//! need no coordination. Nothing is cached.

use serde::{Deserialize, Serialize};
use titiktemu_core::{CurrencyFormat, Order, OrderItem};
use tracing::debug;

use crate::assets::BrandMark;
use crate::canvas::Canvas;
use crate::error::RenderResult;
use crate::pdf::{write_pdf, PdfOptions};
use crate::text::sanitize_text;
use crate::{invoice, receipt};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

// =============================================================================
// Settings & Context
// =============================================================================

/// Printed wording and formatting, independent of any single order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSettings {
    pub brand_name: String,

    /// Drawn in a box when no brand mark is available.
    pub brand_initials: String,

    pub invoice_subtitle: String,

    pub receipt_label: String,

    /// Footer lines under the A4 invoice, top to bottom.
    pub invoice_footer: Vec<String>,

    pub receipt_footer: String,

    pub currency: CurrencyFormat,

    /// Offset used for printed dates (WIB is +420).
    pub utc_offset_minutes: i32,

    /// Flate-compress PDF streams.
    pub compress: bool,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        DocumentSettings {
            brand_name: "titiktemu production".to_string(),
            brand_initials: "TT".to_string(),
            invoice_subtitle: "Invoice Layanan \u{2022} Nusantara".to_string(),
            receipt_label: "STRUK NUSANTARA".to_string(),
            invoice_footer: vec![
                "Terima kasih telah menggunakan layanan titiktemu production.".to_string(),
                "Pembayaran via QRIS \u{2022} Live Chat Admin tersedia di website".to_string(),
            ],
            receipt_footer: "Terima kasih.".to_string(),
            currency: CurrencyFormat::default(),
            utc_offset_minutes: 7 * 60,
            compress: true,
        }
    }
}

/// Everything a render needs besides the order itself.
///
/// Built once by the caller and passed explicitly to every render.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub settings: DocumentSettings,
    pub brand_mark: Option<BrandMark>,
}

impl RenderContext {
    pub fn new(settings: DocumentSettings, brand_mark: Option<BrandMark>) -> Self {
        RenderContext {
            settings,
            brand_mark,
        }
    }
}

// =============================================================================
// Output
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// A4 portrait invoice.
    Invoice,
    /// 58mm thermal receipt.
    Receipt,
}

impl DocumentKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::Receipt => "receipt",
        }
    }
}

/// A finished PDF and how to serve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub kind: DocumentKind,
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
}

// =============================================================================
// Entry Points
// =============================================================================

/// Link encoded in the QR code: `<base>/checkout?orderId=<id>`.
///
/// ## Example
/// ```rust
/// use titiktemu_docs::verification_url;
///
/// assert_eq!(
///     verification_url("https://titiktemu.id/", "ord-1"),
///     "https://titiktemu.id/checkout?orderId=ord-1"
/// );
/// ```
pub fn verification_url(base_url: &str, order_id: &str) -> String {
    format!("{}/checkout?orderId={}", base_url.trim_end_matches('/'), order_id)
}

/// Lays out the A4 invoice without serialising it.
pub fn layout_invoice(
    order: &Order,
    items: &[OrderItem],
    target_url: &str,
    ctx: &RenderContext,
) -> RenderResult<Canvas> {
    order.check_totals()?;
    invoice::layout(order, items, target_url, ctx)
}

/// Lays out the 58mm receipt without serialising it.
pub fn layout_receipt(
    order: &Order,
    items: &[OrderItem],
    target_url: &str,
    ctx: &RenderContext,
) -> RenderResult<Canvas> {
    order.check_totals()?;
    receipt::layout(order, items, target_url, ctx)
}

pub fn render_invoice(
    order: &Order,
    items: &[OrderItem],
    target_url: &str,
    ctx: &RenderContext,
) -> RenderResult<RenderedDocument> {
    let canvas = layout_invoice(order, items, target_url, ctx)?;
    finish(DocumentKind::Invoice, order, &canvas, ctx)
}

pub fn render_receipt(
    order: &Order,
    items: &[OrderItem],
    target_url: &str,
    ctx: &RenderContext,
) -> RenderResult<RenderedDocument> {
    let canvas = layout_receipt(order, items, target_url, ctx)?;
    finish(DocumentKind::Receipt, order, &canvas, ctx)
}

fn finish(
    kind: DocumentKind,
    order: &Order,
    canvas: &Canvas,
    ctx: &RenderContext,
) -> RenderResult<RenderedDocument> {
    let bytes = write_pdf(
        canvas,
        PdfOptions {
            compress: ctx.settings.compress,
        },
    )?;
    let filename = suggested_filename(kind, order);

    debug!(
        kind = kind.as_str(),
        order_id = %order.id,
        filename = %filename,
        size = bytes.len(),
        "Document rendered"
    );

    Ok(RenderedDocument {
        kind,
        bytes,
        content_type: PDF_CONTENT_TYPE,
        filename,
    })
}

/// `<number>.pdf` for invoices, `struk-<number>.pdf` for receipts, where
/// `<number>` is the invoice number or the order id.
pub fn suggested_filename(kind: DocumentKind, order: &Order) -> String {
    let number: String = sanitize_text(order.display_number())
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '"' | ':' | '*' | '?' | '<' | '>' | '|' => '-',
            c => c,
        })
        .collect();

    match kind {
        DocumentKind::Invoice => format!("{}.pdf", number),
        DocumentKind::Receipt => format!("struk-{}.pdf", number),
    }
}
