//! Raster preview of a serialized label.
//!
//! The renderer interprets the ZPL subset the encoder emits (page setup,
//! field origins, fonts, field blocks, the four symbologies, `^GF`
//! graphics, `^FH` field data) and paints it onto a grayscale bitmap one dot
//! per pixel.
//!
//! QR symbols are encoded for real with the `qrcode` crate, so they scan
//! and take the printer's size. Glyphs are drawn as solid cells sized from
//! the font metrics. Data Matrix symbols take their true ECC 200 size but
//! carry a stand-in module pattern, as do linear barcodes.

use std::io::Cursor;
use std::path::Path;

use image::{GrayImage, ImageFormat, Luma};
use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode};
use tracing::trace;

use crate::error::PreviewError;
use crate::hex_escape::decode_field_data;
use crate::lexer::{TokKind, tokenize};
use crate::style::{Justification, LinearSymbology, Orientation, QrEcc};

const INK: Luma<u8> = Luma([0]);
const PAPER: Luma<u8> = Luma([255]);

/// Narrow bar width until `^BY` says otherwise.
const DEFAULT_MODULE_WIDTH: u32 = 2;

/// A rendered label, one pixel per printer dot.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pixels: GrayImage,
}

impl RasterImage {
    /// Width in dots.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in dots.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// `true` when the dot at (`x`, `y`) is printed. Out of range is blank.
    pub fn is_dark(&self, x: u32, y: u32) -> bool {
        x < self.width() && y < self.height() && self.pixels.get_pixel(x, y) == &INK
    }

    /// Number of printed dots.
    pub fn ink_count(&self) -> usize {
        self.pixels.pixels().filter(|p| **p == INK).count()
    }

    /// Underlying grayscale buffer.
    pub fn as_gray(&self) -> &GrayImage {
        &self.pixels
    }

    /// Encode as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, PreviewError> {
        let mut buf = Cursor::new(Vec::new());
        self.pixels.write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }

    /// Write a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), PreviewError> {
        self.pixels.save_with_format(path.as_ref(), ImageFormat::Png)?;
        Ok(())
    }
}

/// Render the first label (`^XA` … `^XZ`) of a serialized stream.
pub fn render(stream: &str) -> Result<RasterImage, PreviewError> {
    let mut page = PageState::default();
    let mut field = FieldState::default();

    for ins in instructions(stream)? {
        trace!(code = ins.code, offset = ins.offset, "preview instruction");
        if ins.code == "XA" {
            page.in_label = true;
            continue;
        }
        if !page.in_label {
            return Err(malformed(ins.offset, format!("^{} outside ^XA/^XZ", ins.code)));
        }
        match ins.code {
            "XZ" => return page.paint(ins.offset),
            "PW" => page.width = Some(ins.number(0, 0)?),
            "LL" => page.length = Some(ins.number(0, 0)?),
            "FO" => field.origin = (ins.number(0, 0)?, ins.number(1, 0)?),
            "A" => {
                let mut selector = ins.arg(0).chars();
                let font = selector.next().unwrap_or('0');
                let orientation = orientation(selector.next(), ins.offset)?;
                field.font = Some(FontSpec {
                    font,
                    orientation,
                    height: ins.optional_number(1)?,
                    width: ins.optional_number(2)?,
                });
            }
            "FB" => {
                field.block = Some(Block {
                    width: ins.number(0, 0)?,
                    max_lines: ins.number(1, 1)?.max(1),
                    spacing: ins.signed(2)?,
                    justification: ins
                        .arg(3)
                        .chars()
                        .next()
                        .and_then(Justification::from_code)
                        .unwrap_or_default(),
                    indent: ins.number(4, 0)?,
                });
            }
            "FH" => field.hex = Some(ins.arg(0).bytes().next().unwrap_or(b'_')),
            "BY" => page.module_width = ins.number(0, DEFAULT_MODULE_WIDTH)?.max(1),
            "BC" | "B3" | "BU" => {
                let (symbology, height_at, line_at) = match ins.code {
                    "BC" => (LinearSymbology::Code128, 1, 2),
                    "B3" => (LinearSymbology::Code39, 2, 3),
                    _ => (LinearSymbology::UpcA, 1, 2),
                };
                field.code = Some(CodeSpec::Linear {
                    symbology,
                    orientation: orientation(ins.arg(0).chars().next(), ins.offset)?,
                    height: ins.number(height_at, 10)?.max(1),
                    line: ins.arg(line_at) != "N",
                    above: ins.arg(line_at + 1) == "Y",
                });
            }
            "BX" => {
                field.code = Some(CodeSpec::Matrix {
                    orientation: orientation(ins.arg(0).chars().next(), ins.offset)?,
                    module: ins.number(1, 1)?.max(1),
                });
            }
            "BQ" => {
                field.code = Some(CodeSpec::Qr {
                    magnification: ins.number(2, 1)?.max(1),
                });
            }
            "GF" => {
                if ins.arg(0) != "A" {
                    return Err(malformed(
                        ins.offset,
                        "only ASCII hex ^GF graphics are supported",
                    ));
                }
                field.graphic = Some(GraphicSpec {
                    bytes_per_row: ins.number(3, 0)?,
                    data: ins.args.get(4).copied().unwrap_or("").trim(),
                    offset: ins.offset,
                });
            }
            "FD" => field.data = Some((ins.data, ins.offset)),
            "FS" => {
                std::mem::take(&mut field).paint(&mut page)?;
            }
            other => trace!(code = other, "ignored by preview"),
        }
    }
    Err(malformed(stream.len(), "stream ended before ^XZ"))
}

// ── Instruction stream ──────────────────────────────────────────────────

struct Instruction<'a> {
    code: &'a str,
    args: Vec<&'a str>,
    data: &'a str,
    offset: usize,
}

impl Instruction<'_> {
    fn arg(&self, i: usize) -> &str {
        self.args.get(i).copied().unwrap_or("").trim()
    }

    fn optional_number(&self, i: usize) -> Result<Option<u32>, PreviewError> {
        let raw = self.arg(i);
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some).map_err(|_| {
            malformed(
                self.offset,
                format!("^{} argument {} is not a number: {raw:?}", self.code, i + 1),
            )
        })
    }

    fn number(&self, i: usize, default: u32) -> Result<u32, PreviewError> {
        Ok(self.optional_number(i)?.unwrap_or(default))
    }

    fn signed(&self, i: usize) -> Result<i32, PreviewError> {
        let raw = self.arg(i);
        if raw.is_empty() {
            return Ok(0);
        }
        raw.parse().map_err(|_| {
            malformed(
                self.offset,
                format!("^{} argument {} is not a number: {raw:?}", self.code, i + 1),
            )
        })
    }
}

fn instructions(input: &str) -> Result<Vec<Instruction<'_>>, PreviewError> {
    let toks = tokenize(input);
    let mut out = Vec::new();
    let mut i = 0;
    while i < toks.len() {
        let leader = toks[i];
        if leader.kind != TokKind::Leader {
            i += 1;
            continue;
        }
        let head = match toks.get(i + 1) {
            Some(t) if t.kind == TokKind::Value => *t,
            _ => return Err(malformed(leader.start, "command leader without a command")),
        };
        // `^A` takes its font letter straight after the opcode.
        let code_len = if head.text.starts_with('A') { 1 } else { 2 };
        let Some(code) = head.text.get(..code_len) else {
            return Err(malformed(leader.start, "truncated command"));
        };

        if code == "FD" {
            let next = toks[i + 1..]
                .iter()
                .position(|t| t.kind == TokKind::Leader)
                .map(|p| i + 1 + p);
            let data_end = next.map_or(input.len(), |n| toks[n].start);
            out.push(Instruction {
                code,
                args: Vec::new(),
                data: input[head.start + 2..data_end].trim_end_matches(['\r', '\n']),
                offset: leader.start,
            });
            i = next.unwrap_or(toks.len());
            continue;
        }

        let mut args = vec![&head.text[code_len..]];
        i += 2;
        while let Some(t) = toks.get(i) {
            match t.kind {
                TokKind::Comma => args.push(""),
                TokKind::Value => {
                    if let Some(last) = args.last_mut() {
                        *last = t.text;
                    }
                }
                TokKind::Leader | TokKind::Newline => break,
            }
            i += 1;
        }
        out.push(Instruction {
            code,
            args,
            data: "",
            offset: leader.start,
        });
    }
    Ok(out)
}

fn malformed(offset: usize, details: impl Into<String>) -> PreviewError {
    PreviewError::Malformed {
        offset,
        details: details.into(),
    }
}

fn orientation(c: Option<char>, offset: usize) -> Result<Orientation, PreviewError> {
    match c {
        None => Ok(Orientation::Normal),
        Some(c) => Orientation::from_code(c)
            .ok_or_else(|| malformed(offset, format!("unknown orientation '{c}'"))),
    }
}

// ── Interpreter state ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: i64,
    y: i64,
    w: u32,
    h: u32,
}

impl Rect {
    fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            x: i64::from(x),
            y: i64::from(y),
            w: w.max(1),
            h: h.max(1),
        }
    }
}

struct PageState {
    in_label: bool,
    width: Option<u32>,
    length: Option<u32>,
    module_width: u32,
    shapes: Vec<Rect>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            in_label: false,
            width: None,
            length: None,
            module_width: DEFAULT_MODULE_WIDTH,
            shapes: Vec::new(),
        }
    }
}

impl PageState {
    fn paint(self, offset: usize) -> Result<RasterImage, PreviewError> {
        let (Some(width), Some(length)) = (self.width, self.length) else {
            return Err(malformed(offset, "label has no ^PW/^LL page size"));
        };
        if width == 0 || length == 0 {
            return Err(malformed(offset, "label page size is zero"));
        }
        let mut pixels = GrayImage::from_pixel(width, length, PAPER);
        for r in &self.shapes {
            let x0 = r.x.clamp(0, i64::from(width)) as u32;
            let y0 = r.y.clamp(0, i64::from(length)) as u32;
            let x1 = (r.x + i64::from(r.w)).clamp(0, i64::from(width)) as u32;
            let y1 = (r.y + i64::from(r.h)).clamp(0, i64::from(length)) as u32;
            for y in y0..y1 {
                for x in x0..x1 {
                    pixels.put_pixel(x, y, INK);
                }
            }
        }
        Ok(RasterImage { pixels })
    }
}

#[derive(Debug, Clone, Copy)]
struct FontSpec {
    font: char,
    orientation: Orientation,
    height: Option<u32>,
    width: Option<u32>,
}

#[derive(Debug, Clone, Copy)]
struct Block {
    width: u32,
    max_lines: u32,
    spacing: i32,
    justification: Justification,
    indent: u32,
}

#[derive(Debug, Clone, Copy)]
enum CodeSpec {
    Linear {
        symbology: LinearSymbology,
        orientation: Orientation,
        height: u32,
        line: bool,
        above: bool,
    },
    Matrix {
        orientation: Orientation,
        module: u32,
    },
    Qr {
        magnification: u32,
    },
}

#[derive(Debug, Clone, Copy)]
struct GraphicSpec<'a> {
    bytes_per_row: u32,
    data: &'a str,
    offset: usize,
}

#[derive(Default)]
struct FieldState<'a> {
    origin: (u32, u32),
    font: Option<FontSpec>,
    block: Option<Block>,
    code: Option<CodeSpec>,
    graphic: Option<GraphicSpec<'a>>,
    hex: Option<u8>,
    data: Option<(&'a str, usize)>,
}

impl FieldState<'_> {
    fn paint(self, page: &mut PageState) -> Result<(), PreviewError> {
        let shapes = match (self.graphic, self.data) {
            (Some(graphic), _) => graphic_shapes(&graphic)?,
            (None, Some((raw, offset))) => self.data_shapes(raw, offset, page.module_width)?,
            (None, None) => return Ok(()),
        };
        page.shapes.extend(shapes.into_iter().map(|r| Rect {
            x: r.x + i64::from(self.origin.0),
            y: r.y + i64::from(self.origin.1),
            ..r
        }));
        Ok(())
    }

    fn data_shapes(
        &self,
        raw: &str,
        offset: usize,
        module_width: u32,
    ) -> Result<Vec<Rect>, PreviewError> {
        let content = match self.hex {
            Some(indicator) => decode_field_data(raw, indicator)
                .map_err(|e| malformed(offset + 3 + e.offset, e.message))?,
            None => raw.to_string(),
        };
        let shapes = match self.code {
            None => text_shapes(self.font, self.block, &content)?,
            Some(CodeSpec::Linear {
                symbology,
                orientation,
                height,
                line,
                above,
            }) => linear_shapes(
                symbology,
                &content,
                module_width,
                height,
                line.then_some(above),
                orientation,
            ),
            Some(CodeSpec::Matrix {
                orientation,
                module,
            }) => matrix_shapes(&content, module, orientation),
            Some(CodeSpec::Qr { magnification }) => {
                let (ecc, data) = split_qr_data(&content)
                    .ok_or_else(|| malformed(offset, "QR field data lacks its level prefix"))?;
                qr_shapes(data, ecc, magnification)
                    .map_err(|e| malformed(offset, format!("QR field data: {e}")))?
            }
        };
        Ok(shapes)
    }
}

/// `QA,data` → (Quartile, "data").
fn split_qr_data(content: &str) -> Option<(QrEcc, &str)> {
    let (prefix, data) = content.split_once(',')?;
    let ecc = QrEcc::from_code(prefix.chars().next()?)?;
    Some((ecc, data))
}

// ── Geometry helpers ────────────────────────────────────────────────────

/// Map a rect drawn upright inside a `extent` box onto the rotated field.
fn rotate(r: Rect, orientation: Orientation, extent: (u32, u32)) -> Rect {
    let (tw, th) = (i64::from(extent.0), i64::from(extent.1));
    let (w, h) = (i64::from(r.w), i64::from(r.h));
    match orientation {
        Orientation::Normal => r,
        Orientation::Rotated90 => Rect {
            x: th - r.y - h,
            y: r.x,
            w: r.h,
            h: r.w,
        },
        Orientation::Rotated180 => Rect {
            x: tw - r.x - w,
            y: th - r.y - h,
            ..r
        },
        Orientation::Rotated270 => Rect {
            x: r.y,
            y: tw - r.x - w,
            w: r.h,
            h: r.w,
        },
    }
}

fn rotate_all(shapes: Vec<Rect>, orientation: Orientation, extent: (u32, u32)) -> Vec<Rect> {
    shapes
        .into_iter()
        .map(|r| rotate(r, orientation, extent))
        .collect()
}

// ── Text ────────────────────────────────────────────────────────────────

/// Cell height and width in dots of the printer-resident fonts.
fn font_metrics(font: char) -> Option<(u32, u32)> {
    match font {
        '0' => Some((15, 12)),
        'A' => Some((9, 5)),
        'B' => Some((11, 7)),
        'C' | 'D' => Some((18, 10)),
        'E' => Some((28, 15)),
        'F' => Some((26, 13)),
        'G' => Some((60, 40)),
        'H' => Some((21, 13)),
        _ => None,
    }
}

fn text_shapes(
    font: Option<FontSpec>,
    block: Option<Block>,
    content: &str,
) -> Result<Vec<Rect>, PreviewError> {
    let fs = font.unwrap_or(FontSpec {
        font: '0',
        orientation: Orientation::Normal,
        height: None,
        width: None,
    });
    let (base_h, base_w) =
        font_metrics(fs.font).ok_or(PreviewError::MissingFontMetrics(fs.font))?;
    let (ch, cw) = match (fs.height, fs.width) {
        (Some(h), Some(w)) => (h, w),
        (Some(h), None) => (h, h * base_w / base_h),
        (None, Some(w)) => (w * base_h / base_w, w),
        (None, None) => (base_h, base_w),
    };
    let (ch, advance) = (ch.max(1), cw.max(1));

    let lines: Vec<String> = match block {
        Some(b) => {
            let max_chars = (b.width / advance).max(1) as usize;
            content
                .split("\\&")
                .flat_map(|para| wrap(para, max_chars))
                .take(b.max_lines as usize)
                .collect()
        }
        None => vec![content.to_string()],
    };
    let spacing = block.map_or(0, |b| b.spacing);
    let line_height = (i64::from(ch) + i64::from(spacing)).max(1) as u32;
    let widest = lines.iter().map(|l| l.chars().count() as u32).max().unwrap_or(0) * advance;
    let box_width = block.map_or(widest, |b| b.width.max(widest));

    let mut shapes = Vec::new();
    for (li, line) in lines.iter().enumerate() {
        let len = line.chars().count() as u32 * advance;
        let mut x = match block.map(|b| b.justification) {
            Some(Justification::Center) => box_width.saturating_sub(len) / 2,
            Some(Justification::Right) => box_width.saturating_sub(len),
            _ => 0,
        };
        if li > 0 {
            x += block.map_or(0, |b| b.indent);
        }
        let y = li as u32 * line_height;
        for (ci, c) in line.chars().enumerate() {
            if c.is_whitespace() {
                continue;
            }
            shapes.push(Rect::new(
                x + ci as u32 * advance + advance / 10,
                y + ch / 5,
                advance * 8 / 10,
                ch * 7 / 10,
            ));
        }
    }
    let extent = (box_width.max(1), (lines.len() as u32 * line_height).max(1));
    Ok(rotate_all(shapes, fs.orientation, extent))
}

/// Greedy word wrap; words longer than a line are split.
fn wrap(paragraph: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in paragraph.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let needed = if current.is_empty() {
            word.len()
        } else {
            current.chars().count() + 1 + word.len()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

// ── Linear barcodes ─────────────────────────────────────────────────────

fn linear_shapes(
    symbology: LinearSymbology,
    content: &str,
    module: u32,
    height: u32,
    interpretation_above: Option<bool>,
    orientation: Orientation,
) -> Vec<Rect> {
    let widths = bar_widths(symbology, content);
    let total: u32 = widths.iter().sum::<u32>() * module;
    let line_h = (module * 9).max(9);
    let (bars_y, text_y) = match interpretation_above {
        Some(true) => (line_h + 2, Some(0)),
        Some(false) => (0, Some(height + 2)),
        None => (0, None),
    };

    let mut shapes = Vec::new();
    let mut u = 0;
    for (k, w) in widths.iter().enumerate() {
        if k % 2 == 0 {
            shapes.push(Rect::new(u, bars_y, w * module, height));
        }
        u += w * module;
    }
    if let Some(ty) = text_y {
        let advance = (line_h * 6 / 10).max(1);
        let len = content.chars().count() as u32 * advance;
        let start = total.saturating_sub(len) / 2;
        for (i, c) in content.chars().enumerate() {
            if !c.is_whitespace() {
                shapes.push(Rect::new(
                    start + i as u32 * advance,
                    ty + line_h / 5,
                    advance * 8 / 10,
                    line_h * 7 / 10,
                ));
            }
        }
    }
    let extent_h = height + if text_y.is_some() { line_h + 2 } else { 0 };
    rotate_all(shapes, orientation, (total.max(1), extent_h))
}

/// Alternating bar/space widths in modules, starting with a bar.
fn bar_widths(symbology: LinearSymbology, content: &str) -> Vec<u32> {
    // (modules per symbol, elements per symbol); element counts are even so
    // the bar/space alternation carries across symbols.
    let (symbol, guard) = match symbology {
        LinearSymbology::Code128 => ((11, 6), (11, 6)),
        LinearSymbology::Code39 => ((16, 10), (16, 10)),
        LinearSymbology::UpcA => ((7, 4), (4, 4)),
    };
    let mut widths = element_widths(0xA5, guard.0, guard.1);
    for b in content.bytes() {
        widths.extend(element_widths(b, symbol.0, symbol.1));
    }
    widths.extend(element_widths(0x5A, guard.0, guard.1));
    widths
}

fn element_widths(seed: u8, total: u32, count: usize) -> Vec<u32> {
    let mut widths: Vec<u32> = (0..count)
        .map(|i| 1 + u32::from((seed >> (i % 8)) & 1))
        .collect();
    let mut sum: u32 = widths.iter().sum();
    let mut i = 0;
    while sum > total {
        if widths[i % count] > 1 {
            widths[i % count] -= 1;
            sum -= 1;
        }
        i += 1;
    }
    widths[usize::from(seed) % count] += total - sum;
    widths
}

// ── Graphics ────────────────────────────────────────────────────────────

/// One rect per run of set bits in each row.
fn graphic_shapes(graphic: &GraphicSpec<'_>) -> Result<Vec<Rect>, PreviewError> {
    let row = graphic.bytes_per_row as usize;
    if row == 0 {
        return Err(malformed(graphic.offset, "^GF row width is zero"));
    }
    let bytes = decode_hex(graphic.data)
        .ok_or_else(|| malformed(graphic.offset, "^GF data is not ASCII hex"))?;
    let mut shapes = Vec::new();
    for (y, chunk) in bytes.chunks(row).enumerate() {
        let bits = chunk.len() * 8;
        let mut run = None;
        for bit in 0..=bits {
            let dark = bit < bits && chunk[bit / 8] & (0x80 >> (bit % 8)) != 0;
            match (dark, run) {
                (true, None) => run = Some(bit as u32),
                (false, Some(start)) => {
                    shapes.push(Rect::new(start, y as u32, bit as u32 - start, 1));
                    run = None;
                }
                _ => {}
            }
        }
    }
    Ok(shapes)
}

fn decode_hex(text: &str) -> Option<Vec<u8>> {
    if text.len() % 2 != 0 {
        return None;
    }
    text.as_bytes()
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|h| u8::from_str_radix(h, 16).ok())
        })
        .collect()
}

// ── 2D symbols ──────────────────────────────────────────────────────────

/// Deterministic module pattern source seeded from the content.
struct Pattern(u64);

impl Pattern {
    fn new(content: &str) -> Self {
        // FNV-1a
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for b in content.bytes() {
            hash ^= u64::from(b);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        Self(hash | 1)
    }

    fn next_bit(&mut self) -> bool {
        // xorshift64
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0 & 1 == 1
    }
}

fn ec_level(ecc: QrEcc) -> EcLevel {
    match ecc {
        QrEcc::Low => EcLevel::L,
        QrEcc::Medium => EcLevel::M,
        QrEcc::Quartile => EcLevel::Q,
        QrEcc::High => EcLevel::H,
    }
}

fn qr_shapes(data: &str, ecc: QrEcc, magnification: u32) -> Result<Vec<Rect>, QrError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), ec_level(ecc))?;
    let n = code.width();
    let m = magnification;
    Ok(code
        .to_colors()
        .iter()
        .enumerate()
        .filter(|(_, c)| **c == Color::Dark)
        .map(|(i, _)| Rect::new((i % n) as u32 * m, (i / n) as u32 * m, m, m))
        .collect())
}

/// ECC 200 square symbol sizes and their data codeword counts.
const MATRIX_SIZES: [(u32, usize); 24] = [
    (10, 3),
    (12, 5),
    (14, 8),
    (16, 12),
    (18, 18),
    (20, 22),
    (22, 30),
    (24, 36),
    (26, 44),
    (32, 62),
    (36, 86),
    (40, 114),
    (44, 144),
    (48, 174),
    (52, 204),
    (64, 280),
    (72, 368),
    (80, 456),
    (88, 576),
    (96, 696),
    (104, 816),
    (120, 1050),
    (132, 1304),
    (144, 1558),
];

/// Data codewords in ASCII encodation: a digit pair shares one codeword,
/// a byte above 127 needs an extra upper-shift codeword.
fn ascii_codewords(content: &str) -> usize {
    let b = content.as_bytes();
    let (mut i, mut n) = (0, 0);
    while i < b.len() {
        if b[i].is_ascii_digit() && b.get(i + 1).is_some_and(u8::is_ascii_digit) {
            i += 2;
        } else {
            if b[i] > 127 {
                n += 1;
            }
            i += 1;
        }
        n += 1;
    }
    n
}

fn matrix_shapes(content: &str, module: u32, orientation: Orientation) -> Vec<Rect> {
    let codewords = ascii_codewords(content);
    let n = MATRIX_SIZES
        .iter()
        .find(|(_, cap)| *cap >= codewords)
        .map_or(144, |(size, _)| *size);
    let m = module;
    let mut shapes = vec![
        // Solid finder: left column and bottom row.
        Rect::new(0, 0, m, n * m),
        Rect::new(0, (n - 1) * m, n * m, m),
    ];
    // Clock track: top row and right column alternate.
    for i in (0..n).step_by(2) {
        shapes.push(Rect::new(i * m, 0, m, m));
        shapes.push(Rect::new((n - 1) * m, (n - 1 - i) * m, m, m));
    }
    let mut pattern = Pattern::new(content);
    for y in 1..n - 1 {
        for x in 1..n - 1 {
            if pattern.next_bit() {
                shapes.push(Rect::new(x * m, y * m, m, m));
            }
        }
    }
    rotate_all(shapes, orientation, (n * m, n * m))
}
