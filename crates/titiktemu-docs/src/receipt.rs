//! # 58mm Thermal Receipt Layout
//!
//! ```text
//!  ┌──────────────────────┐  ◄ batik / jade stripes
//!  │        [logo]        │
//!  │ titiktemu production │
//!  │   STRUK NUSANTARA    │
//!  │ -------------------- │
//!  │ Invoice : TT-...     │
//!  │ Tanggal : dd/mm/yyyy │
//!  │ Status  : processing │
//!  │ -------------------- │
//!  │       RINCIAN        │
//!  │ Video editing reels  │
//!  │ 2 x Rp 30.000  60.000│  one block per item
//!  │ -------------------- │
//!  │ Subtotal / Diskon    │
//!  │ TOTAL                │
//!  │ -------------------- │
//!  │      ┌────────┐      │
//!  │      │   QR   │      │
//!  │      └────────┘      │
//!  │    Terima kasih.     │
//!  └──────────────────────┘  ◄ faded stripes
//! ```
//!
//! Courier throughout. The page is as tall as the items need; it never
//! drops rows.

use titiktemu_core::{Money, Order, OrderItem};

use crate::canvas::{Canvas, Color, Rect, Text};
use crate::document::RenderContext;
use crate::error::RenderResult;
use crate::qr::{encode_qr, QUIET_ZONE};
use crate::style::{mm, BATIK, INK, JADE, MUTED, PAID_LABEL, STAMP_RED, STAMP_ROTATION};
use crate::text::{format_date, sanitize_text, truncate_chars, StandardFont};

const REGULAR: StandardFont = StandardFont::Courier;
const BOLD: StandardFont = StandardFont::CourierBold;

/// Receipt paper width in millimetres.
pub const PAPER_WIDTH_MM: f32 = 58.0;
pub const MIN_HEIGHT_MM: f32 = 140.0;
/// Extra paper per line item.
pub const ITEM_HEIGHT_MM: f32 = 8.0;
/// Titles longer than this are cut.
pub const MAX_TITLE_CHARS: usize = 24;

const LINE_HEIGHT: f32 = 10.0;

/// Page height in points for `item_count` items.
pub fn page_height(item_count: usize) -> f32 {
    let grown = MIN_HEIGHT_MM + ITEM_HEIGHT_MM * item_count as f32;
    mm(MIN_HEIGHT_MM).max(mm(grown))
}

/// Top-down text cursor.
struct Column<'a> {
    canvas: &'a mut Canvas,
    y: f32,
    pad: f32,
}

impl Column<'_> {
    /// Characters of fixed-pitch text at `size` that fit between the paddings.
    fn capacity(&self, size: f32) -> usize {
        let printable = self.canvas.width() - 2.0 * self.pad;
        (printable / REGULAR.text_width("0", size)).floor() as usize
    }

    /// Left-aligned line, cut with `…` if wider than the paper.
    fn line(&mut self, text: &str, font: StandardFont, size: f32) {
        let shown = truncate_chars(&sanitize_text(text), self.capacity(size));
        self.canvas.text(Text::new(&shown, self.pad, self.y, font, size, INK));
        self.y -= LINE_HEIGHT;
    }

    fn center(&mut self, text: &str, font: StandardFont, size: f32) {
        let run = Text::new(text, 0.0, self.y, font, size, INK);
        let x = self.canvas.width() / 2.0 - run.width() / 2.0;
        self.canvas.text(Text { x, ..run });
        self.y -= LINE_HEIGHT;
    }

    /// Dashed separator as wide as the printable area.
    fn rule(&mut self) {
        let size = 9.0;
        let dashes = "-".repeat(self.capacity(size));
        self.canvas
            .text(Text::new(&dashes, self.pad, self.y, REGULAR, size, MUTED));
        self.y -= LINE_HEIGHT;
    }

    /// Left text and right-aligned value on one baseline. The left text is
    /// cut so at least one blank column separates the two.
    fn justified(&mut self, left: &str, left_color: Color, right: &str, right_font: StandardFont, size: f32) {
        let value = Text::new(right, 0.0, self.y, right_font, size, INK);
        let room = self
            .capacity(size)
            .saturating_sub(value.text.chars().count() + 1)
            .max(1);
        let left = truncate_chars(&sanitize_text(left), room);
        self.canvas
            .text(Text::new(&left, self.pad, self.y, REGULAR, size, left_color));
        let x = self.canvas.width() - self.pad - value.width();
        self.canvas.text(Text { x, ..value });
        self.y -= LINE_HEIGHT;
    }
}

pub(crate) fn layout(
    order: &Order,
    items: &[OrderItem],
    target_url: &str,
    ctx: &RenderContext,
) -> RenderResult<Canvas> {
    let settings = &ctx.settings;
    let currency = &settings.currency;
    let qr = encode_qr(target_url)?;

    let mut canvas = Canvas::new(mm(PAPER_WIDTH_MM), page_height(items.len()))?;
    let width = canvas.width();
    let height = canvas.height();

    let logo = ctx
        .brand_mark
        .as_ref()
        .map(|mark| canvas.add_image(mark.to_raster()));
    let qr_image = canvas.add_image(qr.to_raster(QUIET_ZONE));

    draw_stripes(&mut canvas);
    if let Some(logo) = logo {
        let size = mm(26.0);
        canvas.draw_image(
            logo,
            width / 2.0 - size / 2.0,
            height / 2.0 - size / 2.0,
            size,
            size,
            0.10,
        );
    }
    if order.status.is_paid_like() {
        let stamp = Text::new(PAID_LABEL, 0.0, height / 2.0 + mm(22.0), BOLD, 26.0, STAMP_RED);
        let x = width / 2.0 - stamp.width() / 2.0;
        canvas.text(Text { x, ..stamp }.rotate(STAMP_ROTATION).opacity(0.20));
    }

    let mut col = Column {
        canvas: &mut canvas,
        y: height - mm(8.0),
        pad: mm(4.0),
    };

    // Header
    if let Some(logo) = logo {
        let size = mm(10.0);
        col.canvas
            .draw_image(logo, width / 2.0 - size / 2.0, col.y - size + 2.0, size, size, 0.95);
        col.y -= size + 2.0;
    }
    col.center(&settings.brand_name, BOLD, 10.0);
    col.center(&settings.receipt_label, BOLD, 9.0);
    col.rule();

    col.line(&format!("Invoice : {}", order.display_number()), BOLD, 9.0);
    col.line(
        &format!(
            "Tanggal : {}",
            format_date(order.created_at, settings.utc_offset_minutes)
        ),
        REGULAR,
        8.5,
    );
    col.line(&format!("Status  : {}", order.status.as_str()), REGULAR, 8.5);
    col.rule();

    // Items
    col.center("RINCIAN", BOLD, 9.0);
    col.y -= 2.0;

    for item in items {
        let line_total = item.line_total()?;
        let title = truncate_chars(&sanitize_text(&item.title), MAX_TITLE_CHARS);
        col.line(&title, BOLD, 9.0);
        col.justified(
            &format!("{} x {}", item.qty, item.price.format(currency)),
            INK,
            &line_total.format(currency),
            BOLD,
            8.8,
        );
        col.y -= 2.0;
    }
    col.rule();

    // Totals
    col.justified("Subtotal", MUTED, &order.subtotal.format(currency), REGULAR, 9.0);
    if order.discount > Money::zero() {
        col.justified(
            "Diskon",
            MUTED,
            &format!("- {}", order.discount.format(currency)),
            REGULAR,
            9.0,
        );
    }
    col.justified("TOTAL", MUTED, &order.total.format(currency), BOLD, 9.0);
    col.rule();

    let y = col.y;

    // QR
    let qr_size = mm(24.0);
    let box_w = qr_size + mm(8.0);
    let box_h = qr_size + mm(12.0);
    let box_x = width / 2.0 - box_w / 2.0;
    let box_y = (y - box_h - mm(4.0)).max(mm(18.0));

    canvas.rect(
        Rect::new(box_x, box_y, box_w, box_h)
            .stroke(JADE, 1.8)
            .opacity(0.95),
    );
    let label = Text::new("Scan cek order", 0.0, box_y + box_h - mm(6.0), BOLD, 8.5, JADE);
    let label_x = width / 2.0 - label.width() / 2.0;
    canvas.text(Text { x: label_x, ..label });
    canvas.draw_image(
        qr_image,
        width / 2.0 - qr_size / 2.0,
        box_y + mm(3.0),
        qr_size,
        qr_size,
        1.0,
    );

    let footer_y = box_y - mm(10.0);
    if footer_y > mm(8.0) {
        let footer = Text::new(&settings.receipt_footer, 0.0, footer_y, REGULAR, 8.5, MUTED);
        let x = width / 2.0 - footer.width() / 2.0;
        canvas.text(Text { x, ..footer });
    }

    Ok(canvas)
}

fn draw_stripes(canvas: &mut Canvas) {
    let width = canvas.width();
    let height = canvas.height();

    canvas.rect(Rect::new(0.0, height - mm(2.2), width, mm(2.2)).fill(BATIK).opacity(0.95));
    canvas.rect(Rect::new(0.0, height - mm(3.3), width, mm(1.1)).fill(JADE).opacity(0.9));

    canvas.rect(Rect::new(0.0, mm(2.2), width, mm(2.2)).fill(BATIK).opacity(0.20));
    canvas.rect(Rect::new(0.0, mm(1.1), width, mm(1.1)).fill(JADE).opacity(0.18));

    let mut y = mm(8.0);
    while y < height - mm(8.0) {
        let mut x = mm(4.0);
        while x < width - mm(4.0) {
            canvas.circle(x, y, 0.7, INK, 0.04);
            x += mm(9.0);
        }
        y += mm(9.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::tests::sample_png;
    use crate::assets::BrandMark;
    use crate::document::layout_receipt;
    use crate::error::RenderError;
    use crate::document::tests::{items, order, URL};
    use titiktemu_core::OrderStatus;

    fn item(title: &str, qty: i64, price: i64) -> OrderItem {
        OrderItem {
            order_id: String::new(),
            title: title.to_string(),
            qty,
            price: Money::from_amount(price),
        }
    }

    #[test]
    fn test_page_height_grows_with_items() {
        assert_eq!(page_height(0), mm(140.0));
        assert!((page_height(3) - mm(164.0)).abs() < 1e-3);
        assert!(page_height(20) > page_height(19));
    }

    #[test]
    fn test_canvas_size() {
        let canvas = layout_receipt(
            &order(OrderStatus::PendingPayment),
            &items(),
            URL,
            &RenderContext::default(),
        )
        .unwrap();
        assert!((canvas.width() - mm(58.0)).abs() < 1e-3);
        assert!((canvas.height() - page_height(2)).abs() < 1e-3);
    }

    #[test]
    fn test_every_item_printed_on_long_receipts() {
        let many: Vec<OrderItem> = (0..40)
            .map(|i| item(&format!("Layanan {}", i + 1), 1, 10_000))
            .collect();
        let mut o = order(OrderStatus::PendingPayment);
        o.subtotal = Money::from_amount(400_000);
        o.discount = Money::zero();
        o.total = o.subtotal;

        let canvas = layout_receipt(&o, &many, URL, &RenderContext::default()).unwrap();
        assert!(canvas.contains_text("Layanan 1"));
        assert!(canvas.contains_text("Layanan 40"));
        assert!(canvas.texts().all(|t| t.y > 0.0));
    }

    #[test]
    fn test_long_title_cut_to_24_chars() {
        let title = "Paket editing video pernikahan sinematik lengkap";
        let canvas = layout_receipt(
            &order(OrderStatus::PendingPayment),
            &[item(title, 1, 100_000)],
            URL,
            &RenderContext::default(),
        )
        .unwrap();

        let shown = canvas
            .texts()
            .find(|t| t.text.starts_with("Paket editing"))
            .expect("title line");
        assert_eq!(shown.text.chars().count(), 24);
        assert!(shown.text.ends_with('…'));
        assert_eq!(shown.font, StandardFont::CourierBold);
    }

    #[test]
    fn test_item_and_total_rows() {
        let canvas = layout_receipt(
            &order(OrderStatus::PendingPayment),
            &items(),
            URL,
            &RenderContext::default(),
        )
        .unwrap();

        assert!(canvas.contains_text("Invoice : TT-2026-AB12CD"));
        assert!(canvas.contains_text("Status  : pending_payment"));
        assert!(canvas.contains_text("2 x Rp 30.000"));
        assert!(canvas.contains_text("- Rp 20.000"));
        assert!(canvas.contains_text("TOTAL"));

        let total = canvas.find_text("Rp 80.000").unwrap();
        assert!((total.x + total.width() - (canvas.width() - mm(4.0))).abs() < 1e-3);
        assert!(canvas.texts().all(|t| t.font == REGULAR || t.font == BOLD));
    }

    #[test]
    fn test_rules_fit_paper() {
        let canvas = layout_receipt(
            &order(OrderStatus::PendingPayment),
            &items(),
            URL,
            &RenderContext::default(),
        )
        .unwrap();

        let rule = canvas
            .texts()
            .find(|t| t.text.starts_with("---"))
            .expect("rule");
        assert!(rule.x + rule.width() <= canvas.width() - mm(4.0) + 1e-3);
    }

    fn right_edge(canvas: &Canvas) -> f32 {
        canvas.width() - mm(4.0) + 1e-3
    }

    #[test]
    fn test_order_id_fallback_fits_paper() {
        let mut o = order(OrderStatus::PendingPayment);
        o.invoice_number = None;

        let canvas = layout_receipt(&o, &items(), URL, &RenderContext::default()).unwrap();
        let invoice = canvas
            .texts()
            .find(|t| t.text.starts_with("Invoice : "))
            .expect("invoice line");
        assert!(invoice.text.starts_with("Invoice : 7f1c2a9e"));
        assert!(invoice.text.ends_with('…'));
        assert!(invoice.x + invoice.width() <= right_edge(&canvas));
    }

    #[test]
    fn test_large_amounts_do_not_overlap() {
        let price = 999_999_999;
        let qty = 999;
        let mut o = order(OrderStatus::PendingPayment);
        o.subtotal = Money::from_amount(price * qty);
        o.discount = Money::zero();
        o.total = o.subtotal;

        let canvas = layout_receipt(
            &o,
            &[item("Paket korporat", qty, price)],
            URL,
            &RenderContext::default(),
        )
        .unwrap();

        let total = canvas
            .find_text(&Money::from_amount(price * qty).format(&Default::default()))
            .expect("line total");
        let left = canvas
            .texts()
            .find(|t| t.text.starts_with("999 x"))
            .expect("quantity line");
        assert!(left.text.ends_with('…'));
        assert!(left.x + left.width() < total.x);
        assert!(total.x + total.width() <= right_edge(&canvas));
    }

    #[test]
    fn test_line_total_overflow_is_invalid_order() {
        let err = layout_receipt(
            &order(OrderStatus::Processing),
            &[item("Paket korporat", 3, i64::MAX / 2)],
            URL,
            &RenderContext::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::InvalidOrder(_)));
    }

    #[test]
    fn test_paid_stamp_matches_invoice_rule() {
        let ctx = RenderContext::default();
        let paid = layout_receipt(&order(OrderStatus::PaidReview), &items(), URL, &ctx).unwrap();
        assert!(paid.contains_text(PAID_LABEL));

        let rejected = layout_receipt(&order(OrderStatus::Rejected), &items(), URL, &ctx).unwrap();
        assert!(!rejected.contains_text(PAID_LABEL));
    }

    #[test]
    fn test_logo_optional() {
        let without = layout_receipt(
            &order(OrderStatus::PendingPayment),
            &items(),
            URL,
            &RenderContext::default(),
        )
        .unwrap();
        assert_eq!(without.images().len(), 1);

        let ctx = RenderContext {
            brand_mark: Some(BrandMark::from_png_bytes(&sample_png()).unwrap()),
            ..RenderContext::default()
        };
        let with = layout_receipt(&order(OrderStatus::PendingPayment), &items(), URL, &ctx).unwrap();
        assert_eq!(with.images().len(), 2);
    }
}
