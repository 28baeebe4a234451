//! Label markup encoding.
//!
//! A [`MarkupEncoder`] turns the document's element list into the byte
//! stream a printer understands, and supplies the capacity limits of the
//! symbologies it emits. [`ZplEncoder`] writes ZPL II, one line per element,
//! each bracketed by `^FO` (begin origin) and `^FS` (end origin).

use std::fmt::Write as _;

use crate::capacity::{CapacityLimits, ZplCapacity};
use crate::element::{Element, ElementKind};
use crate::graphic::Bitmap;
use crate::hex_escape::{DEFAULT_INDICATOR, escape_field_data};
use crate::style::{
    BarcodeStyle, LinearSymbology, MAX_DOTS, MatrixCodeStyle, QrCodeStyle, TextStyle,
};

/// Physical page the elements are laid out on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    /// Label height in millimetres.
    pub height: f64,
    /// Label width in millimetres.
    pub width: f64,
    /// Printer resolution in dots per millimetre.
    pub dpmm: f64,
}

impl PageSetup {
    /// Convert millimetres to whole printer dots.
    pub fn dots(&self, mm: f64) -> u32 {
        (mm * self.dpmm).round().clamp(0.0, f64::from(MAX_DOTS)) as u32
    }
}

/// Encodes a label into printer markup.
pub trait MarkupEncoder {
    /// Emit the complete instruction stream for `elements`, in order.
    ///
    /// Must be a pure function of its inputs.
    fn encode(&self, page: &PageSetup, elements: &[Element]) -> String;

    /// Capacity limits of the symbologies this encoder emits.
    fn limits(&self) -> &dyn CapacityLimits;
}

/// ZPL II encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZplEncoder {
    capacity: ZplCapacity,
}

impl ZplEncoder {
    /// A ZPL encoder with the standard capacity tables.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MarkupEncoder for ZplEncoder {
    fn encode(&self, page: &PageSetup, elements: &[Element]) -> String {
        let mut out = String::new();
        out.push_str("^XA\n");
        // UTF-8 field data.
        out.push_str("^CI28\n");
        let _ = writeln!(out, "^PW{}", page.dots(page.width));
        let _ = writeln!(out, "^LL{}", page.dots(page.height));
        for element in elements {
            emit_element(&mut out, page, element);
            out.push('\n');
        }
        out.push_str("^XZ\n");
        out
    }

    fn limits(&self) -> &dyn CapacityLimits {
        &self.capacity
    }
}

// ── Element emission ────────────────────────────────────────────────────

fn emit_element(out: &mut String, page: &PageSetup, element: &Element) {
    let origin = element.origin();
    let _ = write!(out, "^FO{},{}", page.dots(origin.x), page.dots(origin.y));
    match element.kind() {
        ElementKind::Text { content, style } => emit_text(out, page, content, style),
        ElementKind::LinearBarcode { content, style } => {
            emit_linear(out, style);
            emit_field_data(out, content);
        }
        ElementKind::MatrixCode { content, style } => {
            emit_matrix(out, style);
            emit_field_data(out, content);
        }
        ElementKind::QrCode { content, style } => {
            emit_qr(out, style);
            // Error-correction level and automatic data mode ride in the
            // field data prefix.
            let prefixed = format!("{}A,{}", style.error_correction.code(), content);
            emit_field_data(out, &prefixed);
        }
        ElementKind::Graphic { bitmap } => emit_graphic(out, bitmap),
    }
    out.push_str("^FS");
}

fn emit_text(out: &mut String, page: &PageSetup, content: &str, style: &TextStyle) {
    let _ = write!(out, "^A{}{}", style.font, style.orientation.code());
    if style.char_height.is_some() || style.char_width.is_some() {
        let h = style.char_height.map(|v| page.dots(v).to_string());
        let w = style.char_width.map(|v| page.dots(v).to_string());
        let _ = write!(
            out,
            ",{},{}",
            h.as_deref().unwrap_or(""),
            w.as_deref().unwrap_or("")
        );
    }
    match style.line_width {
        Some(line_width) => {
            let _ = write!(
                out,
                "^FB{},{},{},{},{}",
                page.dots(line_width),
                style.max_lines,
                style.line_spacing,
                style.justification.code(),
                style.hanging_indent
            );
            // `\&` is the field block line break.
            emit_field_data(out, &content.replace('\n', "\\&"));
        }
        None => emit_field_data(out, content),
    }
}

fn emit_linear(out: &mut String, style: &BarcodeStyle) {
    let _ = write!(out, "^BY{}", style.magnification);
    let o = style.orientation.code();
    let h = style.height;
    let line = yes_no(style.print_interpretation_line);
    let above = yes_no(style.print_interpretation_line_above);
    let check = yes_no(style.check_digit);
    let _ = match style.symbology {
        LinearSymbology::Code128 => write!(out, "^BC{o},{h},{line},{above},{check}"),
        LinearSymbology::Code39 => write!(out, "^B3{o},{check},{h},{line},{above}"),
        LinearSymbology::UpcA => write!(out, "^BU{o},{h},{line},{above},{check}"),
    };
}

fn emit_matrix(out: &mut String, style: &MatrixCodeStyle) {
    let _ = write!(
        out,
        "^BX{},{},{}",
        style.orientation.code(),
        style.height,
        style.error_correction.quality()
    );
}

fn emit_qr(out: &mut String, style: &QrCodeStyle) {
    // Model 2 is the only model current printers recommend.
    let _ = write!(
        out,
        "^BQ{},2,{},{},{}",
        style.orientation.code(),
        style.magnification,
        style.error_correction.code(),
        style.mask
    );
}

/// `^GFA`: uncompressed ASCII hex, total bytes given twice.
fn emit_graphic(out: &mut String, bitmap: &Bitmap) {
    let bytes = bitmap.as_bytes();
    let _ = write!(
        out,
        "^GFA,{total},{total},{row},",
        total = bytes.len(),
        row = bitmap.bytes_per_row()
    );
    for b in bytes {
        let _ = write!(out, "{b:02X}");
    }
}

fn emit_field_data(out: &mut String, content: &str) {
    let escaped = escape_field_data(content, DEFAULT_INDICATOR);
    if matches!(escaped, std::borrow::Cow::Owned(_)) {
        out.push_str("^FH");
    }
    out.push_str("^FD");
    out.push_str(&escaped);
}

fn yes_no(flag: bool) -> char {
    if flag { 'Y' } else { 'N' }
}
