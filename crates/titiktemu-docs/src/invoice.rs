//! # A4 Invoice Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────┐ 841.89pt
//! │ ▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀ header band     │
//! │ [logo] brand name            Invoice  TT-..  │
//! │        subtitle              Tanggal  dd/mm  │
//! │                              Status   ...    │
//! │ ──────────────────────────────────────────── │
//! │ Rincian Layanan                              │
//! │ No │ Layanan        │ Qty │ Harga │ Total    │
//! │ 1  │ ...            │  2  │  ...  │  ...     │  rows stop at y < 220
//! │                         ┌───────────────────┐│
//! │ ┌────────┐              │ Subtotal / Diskon ││
//! │ │  QR    │              │ Total             ││
//! │ └────────┘              └───────────────────┘│
//! │ ──────────────────────────────────────────── │
//! │ footer lines                                 │
//! └──────────────────────────────────────────────┘ 595.28pt
//! ```
//!
//! Behind everything: bone panel, diamond grid, diagonal hatching, logo
//! watermark, and the tilted PAID stamp for paid-like orders. The page
//! never grows; rows that do not fit are dropped.

use titiktemu_core::{Money, Order, OrderItem};
use tracing::debug;

use crate::canvas::{Canvas, ImageId, Rect, Text};
use crate::document::RenderContext;
use crate::error::RenderResult;
use crate::qr::{encode_qr, QUIET_ZONE};
use crate::style::{
    short_link, BATIK, BONE, HEADER_FILL, INK, JADE, MUTED, PAID_LABEL, RULE, STAMP_RED,
    STAMP_ROTATION, WHITE,
};
use crate::text::{format_date, sanitize_text, truncate_to_width, StandardFont};

pub const A4_WIDTH: f32 = 595.28;
pub const A4_HEIGHT: f32 = 841.89;

const MARGIN: f32 = 52.0;
const ROW_HEIGHT: f32 = 22.0;
/// Lowest baseline a table row may take before the summary/QR region.
pub const TABLE_FLOOR: f32 = 220.0;

const REGULAR: StandardFont = StandardFont::Helvetica;
const BOLD: StandardFont = StandardFont::HelveticaBold;

/// Column widths of the item table.
struct Columns {
    no: f32,
    name: f32,
    qty: f32,
    price: f32,
}

impl Columns {
    fn for_width(table_width: f32) -> Self {
        Columns {
            no: 32.0,
            name: table_width * 0.50,
            qty: table_width * 0.10,
            price: table_width * 0.18,
        }
    }

    fn name_x(&self) -> f32 {
        self.no
    }

    fn qty_x(&self) -> f32 {
        self.no + self.name
    }

    fn price_x(&self) -> f32 {
        self.qty_x() + self.qty
    }

    fn total_x(&self) -> f32 {
        self.price_x() + self.price
    }

    /// Space available for a title at 10pt.
    fn title_width(&self) -> f32 {
        self.name - 16.0
    }
}

pub(crate) fn layout(
    order: &Order,
    items: &[OrderItem],
    target_url: &str,
    ctx: &RenderContext,
) -> RenderResult<Canvas> {
    let settings = &ctx.settings;
    let qr = encode_qr(target_url)?;

    let mut canvas = Canvas::new(A4_WIDTH, A4_HEIGHT)?;
    let width = canvas.width();
    let height = canvas.height();

    let logo = ctx
        .brand_mark
        .as_ref()
        .map(|mark| canvas.add_image(mark.to_raster()));
    let qr_image = canvas.add_image(qr.to_raster(QUIET_ZONE));

    draw_motif(&mut canvas);
    if let Some(logo) = logo {
        let size = 320.0;
        canvas.draw_image(
            logo,
            width / 2.0 - size / 2.0,
            height / 2.0 - size / 2.0,
            size,
            size,
            0.08,
        );
    }
    if order.status.is_paid_like() {
        draw_paid_stamp(&mut canvas);
    }

    // ===== Header =====
    let mut y = height - MARGIN;

    canvas.rect(
        Rect::new(MARGIN, y + 10.0, width - MARGIN * 2.0, 6.0)
            .fill(BATIK)
            .opacity(0.95),
    );
    canvas.rect(
        Rect::new(MARGIN, y + 5.0, width - MARGIN * 2.0, 2.0)
            .fill(JADE)
            .opacity(0.9),
    );

    draw_brand_box(&mut canvas, logo, &settings.brand_initials, y);

    canvas.text(Text::new(&settings.brand_name, MARGIN + 58.0, y - 20.0, BOLD, 18.0, INK));
    canvas.text(Text::new(
        &settings.invoice_subtitle,
        MARGIN + 58.0,
        y - 38.0,
        REGULAR,
        11.0,
        BATIK,
    ));

    let right_x = width - MARGIN;
    let meta = [
        ("Invoice", sanitize_text(order.display_number())),
        (
            "Tanggal",
            format_date(order.created_at, settings.utc_offset_minutes),
        ),
        ("Status", order.status.as_str().to_string()),
    ];
    for (row, (label, value)) in meta.iter().enumerate() {
        let row_y = y - 14.0 - 16.0 * row as f32;
        canvas.text(Text::new(label, right_x - 210.0, row_y, REGULAR, 9.0, MUTED));
        let value = Text::new(value, 0.0, row_y - 1.0, BOLD, 10.0, INK);
        let x = right_x - value.width();
        canvas.text(Text { x, ..value });
    }

    y -= 86.0;
    canvas.line((MARGIN, y), (width - MARGIN, y), 1.0, RULE, 0.9);
    y -= 18.0;

    // ===== Items =====
    canvas.text(Text::new("Rincian Layanan", MARGIN, y, BOLD, 12.0, INK));
    y -= 14.0;

    let table_x = MARGIN;
    let table_w = width - MARGIN * 2.0;
    let cols = Columns::for_width(table_w);

    canvas.rect(
        Rect::new(table_x, y - ROW_HEIGHT + 6.0, table_w, ROW_HEIGHT)
            .fill(HEADER_FILL)
            .stroke(RULE, 1.0)
            .opacity(0.95),
    );
    let headings = [
        ("No", 0.0),
        ("Layanan", cols.name_x()),
        ("Qty", cols.qty_x()),
        ("Harga", cols.price_x()),
        ("Total", cols.total_x()),
    ];
    for (label, offset) in headings {
        canvas.text(Text::new(label, table_x + offset + 8.0, y - 10.0, BOLD, 9.0, MUTED));
    }

    y -= 28.0;

    let mut drawn = 0;
    for (index, item) in items.iter().enumerate() {
        canvas.rect(
            Rect::new(table_x, y - 14.0, table_w, ROW_HEIGHT)
                .stroke(RULE, 1.0)
                .opacity(0.9),
        );

        let title = truncate_to_width(&sanitize_text(&item.title), REGULAR, 10.0, cols.title_width());
        let row_y = y - 2.0;

        canvas.text(Text::new(&(index + 1).to_string(), table_x + 10.0, row_y, REGULAR, 10.0, INK));
        canvas.text(Text::new(&title, table_x + cols.name_x() + 8.0, row_y, REGULAR, 10.0, INK));
        canvas.text(Text::new(
            &item.qty.to_string(),
            table_x + cols.qty_x() + 12.0,
            row_y,
            REGULAR,
            10.0,
            INK,
        ));

        let price = Text::new(&item.price.format(&settings.currency), 0.0, row_y, REGULAR, 10.0, INK);
        let price_x = table_x + cols.total_x() - price.width() - 10.0;
        canvas.text(Text { x: price_x, ..price });

        let total = Text::new(&item.line_total()?.format(&settings.currency), 0.0, row_y, BOLD, 10.0, INK);
        let total_x = table_x + table_w - total.width() - 10.0;
        canvas.text(Text { x: total_x, ..total });

        y -= ROW_HEIGHT;
        drawn += 1;

        if y < TABLE_FLOOR {
            break;
        }
    }

    if drawn < items.len() {
        debug!(
            order_id = %order.id,
            drawn,
            dropped = items.len() - drawn,
            "Invoice table full, remaining rows not printed"
        );
    }

    y -= 18.0;

    // ===== Summary =====
    draw_summary(&mut canvas, order, ctx, y);

    // ===== QR =====
    draw_qr_box(&mut canvas, qr_image, target_url);

    // ===== Footer =====
    canvas.line((MARGIN, 70.0), (width - MARGIN, 70.0), 1.0, RULE, 1.0);
    for (index, line) in settings.invoice_footer.iter().take(2).enumerate() {
        let (line_y, size) = if index == 0 { (52.0, 9.0) } else { (38.0, 8.5) };
        canvas.text(Text::new(line, MARGIN, line_y, REGULAR, size, MUTED));
    }

    Ok(canvas)
}

fn draw_motif(canvas: &mut Canvas) {
    let width = canvas.width();
    let height = canvas.height();

    canvas.rect(
        Rect::new(24.0, 24.0, width - 48.0, height - 48.0)
            .fill(BONE)
            .stroke(RULE, 1.0)
            .opacity(0.25),
    );

    let step = 42.0;
    let mut x = 40.0;
    while x < width - 40.0 {
        let mut y = 60.0;
        while y < height - 60.0 {
            canvas.rect(
                Rect::new(x, y, 6.0, 6.0)
                    .stroke(INK, 0.6)
                    .rotate(45.0)
                    .opacity(0.06),
            );
            canvas.circle(x + 10.0, y + 10.0, 1.2, INK, 0.05);
            y += step;
        }
        x += step;
    }

    let mut start = -height;
    while start < width {
        canvas.line((start, 0.0), (start + height, height), 0.6, INK, 0.03);
        start += 70.0;
    }
}

fn draw_paid_stamp(canvas: &mut Canvas) {
    let width = canvas.width();
    let height = canvas.height();

    canvas.rect(
        Rect::new(width / 2.0 - 220.0, height / 2.0 - 20.0, 440.0, 140.0)
            .stroke(STAMP_RED, 3.0)
            .rotate(STAMP_ROTATION)
            .opacity(0.18),
    );

    let stamp = Text::new(PAID_LABEL, 0.0, height / 2.0 + 40.0, BOLD, 82.0, STAMP_RED);
    let x = width / 2.0 - stamp.width() / 2.0;
    canvas.text(Text { x, ..stamp }.rotate(STAMP_ROTATION).opacity(0.18));
}

fn draw_brand_box(canvas: &mut Canvas, logo: Option<ImageId>, initials: &str, y: f32) {
    match logo {
        Some(logo) => canvas.draw_image(logo, MARGIN, y - 54.0, 44.0, 44.0, 0.95),
        None => {
            canvas.rect(Rect::new(MARGIN, y - 54.0, 44.0, 44.0).stroke(RULE, 1.0));
            canvas.text(Text::new(initials, MARGIN + 12.0, y - 38.0, BOLD, 14.0, INK));
        }
    }
}

fn draw_summary(canvas: &mut Canvas, order: &Order, ctx: &RenderContext, y: f32) {
    let currency = &ctx.settings.currency;
    let sum_w = 270.0;
    let sum_x = canvas.width() - MARGIN - sum_w;
    let sum_y = (y - 80.0).max(140.0);

    canvas.rect(
        Rect::new(sum_x, sum_y, sum_w, 86.0)
            .fill(WHITE)
            .stroke(RULE, 1.0)
            .opacity(0.96),
    );

    let mut row = |label: &str, value: String, row_y: f32, font: StandardFont| {
        canvas.text(Text::new(label, sum_x + 12.0, row_y, REGULAR, 10.0, MUTED));
        let value = Text::new(&value, 0.0, row_y, font, 10.0, INK);
        let x = sum_x + sum_w - 12.0 - value.width();
        canvas.text(Text { x, ..value });
    };

    row("Subtotal", order.subtotal.format(currency), sum_y + 60.0, REGULAR);
    if order.discount > Money::zero() {
        let label = match order.coupon_code.as_deref() {
            Some(code) if !code.trim().is_empty() => format!("Diskon ({})", code.trim()),
            _ => "Diskon".to_string(),
        };
        row(
            &label,
            format!("- {}", order.discount.format(currency)),
            sum_y + 44.0,
            REGULAR,
        );
    }
    row("Total", order.total.format(currency), sum_y + 20.0, BOLD);
}

fn draw_qr_box(canvas: &mut Canvas, qr: ImageId, target_url: &str) {
    let qr_size = 110.0;
    let box_w = qr_size + 22.0;
    let box_h = qr_size + 36.0;
    let box_x = MARGIN;
    let box_y = 92.0;

    canvas.rect(
        Rect::new(box_x, box_y, box_w, box_h)
            .stroke(JADE, 2.0)
            .opacity(0.95),
    );
    canvas.text(Text::new(
        "Scan untuk cek order",
        box_x + 10.0,
        box_y + box_h - 18.0,
        BOLD,
        9.0,
        JADE,
    ));
    canvas.draw_image(qr, box_x + 11.0, box_y + 10.0, qr_size, qr_size, 1.0);

    let link: String = sanitize_text(short_link(target_url)).chars().take(38).collect();
    canvas.text(Text::new(&link, box_x, box_y - 14.0, REGULAR, 8.0, MUTED));
}
