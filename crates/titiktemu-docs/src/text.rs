//! # Text Handling
//!
//! Everything printed goes through the standard-14 fonts with
//! WinAnsiEncoding, so text is reduced to that single-byte repertoire
//! before layout and measured with the fonts' published metrics.
//!
//! ```text
//! free text ──► sanitize_text() ──► text_width() / truncate_*() ──► encode_winansi()
//!  (emoji, CJK dropped)             (layout decisions)              (PDF string bytes)
//! ```

use chrono::{DateTime, FixedOffset, Offset, Utc};

// =============================================================================
// Standard Fonts
// =============================================================================

/// The standard-14 faces used by the two layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    Courier,
    CourierBold,
}

impl StandardFont {
    /// PostScript name written to the font dictionary.
    pub const fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
        }
    }

    /// Advance width of `c` in 1/1000 em.
    pub fn glyph_width(&self, c: char) -> u16 {
        match self {
            StandardFont::Courier | StandardFont::CourierBold => 600,
            StandardFont::Helvetica => proportional_width(&HELVETICA_WIDTHS, 556, c),
            StandardFont::HelveticaBold => proportional_width(&HELVETICA_BOLD_WIDTHS, 611, c),
        }
    }

    /// Width of `text` in points at `size`.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| u32::from(self.glyph_width(c))).sum();
        units as f32 * size / 1000.0
    }
}

fn proportional_width(table: &[u16; 95], fallback: u16, c: char) -> u16 {
    match c {
        ' '..='~' => table[(c as usize) - 0x20],
        '\u{a0}' => table[0],
        '\u{2022}' => 350,
        '\u{2026}' => 1000,
        _ => fallback,
    }
}

/// Helvetica advance widths for U+0020..=U+007E.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Helvetica-Bold advance widths for U+0020..=U+007E.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a'..'m'
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n'..'z'
    389, 280, 389, 584, // '{'..'~'
];

// =============================================================================
// WinAnsi Encoding
// =============================================================================

/// WinAnsi code for `c`, if the encoding has one.
pub fn winansi_byte(c: char) -> Option<u8> {
    match c {
        ' '..='~' | '\u{a0}'..='\u{ff}' => Some(c as u8),
        '\u{20ac}' => Some(0x80),
        '\u{201a}' => Some(0x82),
        '\u{0192}' => Some(0x83),
        '\u{201e}' => Some(0x84),
        '\u{2026}' => Some(0x85),
        '\u{2020}' => Some(0x86),
        '\u{2021}' => Some(0x87),
        '\u{02c6}' => Some(0x88),
        '\u{2030}' => Some(0x89),
        '\u{0160}' => Some(0x8a),
        '\u{2039}' => Some(0x8b),
        '\u{0152}' => Some(0x8c),
        '\u{017d}' => Some(0x8e),
        '\u{2018}' => Some(0x91),
        '\u{2019}' => Some(0x92),
        '\u{201c}' => Some(0x93),
        '\u{201d}' => Some(0x94),
        '\u{2022}' => Some(0x95),
        '\u{2013}' => Some(0x96),
        '\u{2014}' => Some(0x97),
        '\u{02dc}' => Some(0x98),
        '\u{2122}' => Some(0x99),
        '\u{0161}' => Some(0x9a),
        '\u{203a}' => Some(0x9b),
        '\u{0153}' => Some(0x9c),
        '\u{017e}' => Some(0x9e),
        '\u{0178}' => Some(0x9f),
        _ => None,
    }
}

/// Reduces free text to what the fonts can print.
///
/// Tabs and line breaks become spaces; every other character without a
/// WinAnsi code (emoji, non-Latin scripts, control characters) is dropped.
pub fn sanitize_text(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\t' | '\n' | '\r' => Some(' '),
            c if winansi_byte(c).is_some() => Some(c),
            _ => None,
        })
        .collect()
}

/// Encodes already sanitised text for a PDF string operand.
pub fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars().filter_map(winansi_byte).collect()
}

// =============================================================================
// Truncation
// =============================================================================

/// Marker appended to titles shortened by width.
pub const ELLIPSIS: &str = "...";

/// Shortens `text` one character at a time until it, plus [`ELLIPSIS`],
/// fits in `max_width` points. Text that already fits is returned as is.
pub fn truncate_to_width(text: &str, font: StandardFont, size: f32, max_width: f32) -> String {
    if font.text_width(text, size) <= max_width {
        return text.to_string();
    }

    let mut kept = text.to_string();
    loop {
        kept.pop();
        let shown = format!("{}{}", kept, ELLIPSIS);
        if kept.is_empty() || font.text_width(&shown, size) <= max_width {
            return shown;
        }
    }
}

/// Character-count truncation for fixed-pitch layouts: text longer than
/// `max_chars` keeps `max_chars - 1` characters plus `…`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut shown: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    shown.push('\u{2026}');
    shown
}

// =============================================================================
// Dates
// =============================================================================

/// Formats an order timestamp as `dd/mm/yyyy, HH.MM.SS` in the given
/// offset. Out-of-range offsets fall back to UTC.
pub fn format_date(at: DateTime<Utc>, utc_offset_minutes: i32) -> String {
    let offset = utc_offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix());

    at.with_timezone(&offset)
        .format("%d/%m/%Y, %H.%M.%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_drops_unprintable() {
        assert_eq!(sanitize_text("Edit video 🎬 ok"), "Edit video  ok");
        assert_eq!(sanitize_text("Désign café"), "Désign café");
        assert_eq!(sanitize_text("日本 logo"), " logo");
        assert_eq!(sanitize_text("line\nbreak\u{7}"), "line break");
        assert_eq!(sanitize_text("A • B…"), "A • B…");
    }

    #[test]
    fn test_encode_winansi() {
        assert_eq!(encode_winansi("Rp 5.000"), b"Rp 5.000".to_vec());
        assert_eq!(encode_winansi("é•…"), vec![0xe9, 0x95, 0x85]);
    }

    #[test]
    fn test_text_width() {
        // "Hi" = 722 + 222
        let w = StandardFont::Helvetica.text_width("Hi", 10.0);
        assert!((w - 9.44).abs() < 1e-4);
        assert_eq!(StandardFont::Courier.text_width("abcd", 10.0), 24.0);
        assert!(
            StandardFont::HelveticaBold.text_width("Total", 10.0)
                > StandardFont::Helvetica.text_width("Total", 10.0)
        );
    }

    #[test]
    fn test_truncate_to_width_keeps_fitting_text() {
        let text = "Logo design";
        assert_eq!(
            truncate_to_width(text, StandardFont::Helvetica, 10.0, 200.0),
            text
        );
    }

    #[test]
    fn test_scenario_e_long_title_gets_ellipsis() {
        let title = "Paket editing video pernikahan sinematik dengan color grading";
        assert_eq!(title.chars().count(), 61);

        // roughly twenty average glyphs at 10pt
        let column = 20.0 * 5.56;
        let shown = truncate_to_width(title, StandardFont::Helvetica, 10.0, column);

        assert!(shown.ends_with(ELLIPSIS));
        assert!(shown.chars().count() < title.chars().count());
        assert!(StandardFont::Helvetica.text_width(&shown, 10.0) <= column);
        assert!(title.starts_with(shown.trim_end_matches(ELLIPSIS)));
    }

    #[test]
    fn test_truncate_to_width_tiny_column() {
        let shown = truncate_to_width("Video", StandardFont::Helvetica, 10.0, 1.0);
        assert_eq!(shown, ELLIPSIS);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("Short title", 24), "Short title");
        let long = "abcdefghijklmnopqrstuvwxyz";
        let shown = truncate_chars(long, 24);
        assert_eq!(shown.chars().count(), 24);
        assert!(shown.ends_with('…'));
        assert!(shown.starts_with("abcdefghijklmnopqrstuvw"));
    }

    #[test]
    fn test_format_date_in_wib() {
        let at = DateTime::parse_from_rfc3339("2026-03-01T20:05:09Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_date(at, 7 * 60), "02/03/2026, 03.05.09");
        assert_eq!(format_date(at, 0), "01/03/2026, 20.05.09");
        assert_eq!(format_date(at, i32::MAX), "01/03/2026, 20.05.09");
    }
}
