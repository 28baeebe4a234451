//! Per-element style structures.
//!
//! Every recognised option is a named field with its default spelled out in
//! the `Default` impl. When styles are loaded from configuration, unknown
//! keys are rejected (`deny_unknown_fields`) instead of being ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LabelError;

/// Highest magnification factor accepted by any symbology.
pub const MAX_MAGNIFICATION: u8 = 10;

/// Largest coordinate or size (in dots) a ZPL field accepts.
pub const MAX_DOTS: u32 = 32_000;

// ── Shared enums ────────────────────────────────────────────────────────

/// Rotation of a field relative to the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Upright.
    #[default]
    Normal,
    /// Rotated 90 degrees clockwise.
    Rotated90,
    /// Upside down.
    Rotated180,
    /// Rotated 270 degrees clockwise (bottom-up).
    Rotated270,
}

impl Orientation {
    /// ZPL orientation letter (`N`, `R`, `I`, `B`).
    pub fn code(self) -> char {
        match self {
            Orientation::Normal => 'N',
            Orientation::Rotated90 => 'R',
            Orientation::Rotated180 => 'I',
            Orientation::Rotated270 => 'B',
        }
    }

    /// Inverse of [`Orientation::code`].
    pub fn from_code(c: char) -> Option<Self> {
        match c {
            'N' => Some(Orientation::Normal),
            'R' => Some(Orientation::Rotated90),
            'I' => Some(Orientation::Rotated180),
            'B' => Some(Orientation::Rotated270),
            _ => None,
        }
    }

    /// `true` for the two orientations that swap a field's width and height.
    pub fn is_sideways(self) -> bool {
        matches!(self, Orientation::Rotated90 | Orientation::Rotated270)
    }
}

/// Horizontal alignment of lines inside a text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Justification {
    /// Ragged right.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Ragged left.
    Right,
    /// Stretched to the block width (last line left-aligned).
    Justified,
}

impl Justification {
    /// ZPL justification letter (`L`, `C`, `R`, `J`).
    pub fn code(self) -> char {
        match self {
            Justification::Left => 'L',
            Justification::Center => 'C',
            Justification::Right => 'R',
            Justification::Justified => 'J',
        }
    }

    /// Inverse of [`Justification::code`].
    pub fn from_code(c: char) -> Option<Self> {
        match c {
            'L' => Some(Justification::Left),
            'C' => Some(Justification::Center),
            'R' => Some(Justification::Right),
            'J' => Some(Justification::Justified),
            _ => None,
        }
    }
}

// ── Text ────────────────────────────────────────────────────────────────

/// Style of a text field.
///
/// Character sizes and the wrap width are in millimetres and scaled by the
/// document resolution when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextStyle {
    /// Character height in millimetres. `None` keeps the printer default.
    pub char_height: Option<f64>,
    /// Character width in millimetres. `None` keeps the printer default.
    pub char_width: Option<f64>,
    /// Printer font identifier (`A`-`Z`, `0`-`9`).
    pub font: char,
    /// Field rotation.
    pub orientation: Orientation,
    /// Wrap width in millimetres. When set, the text is laid out in a
    /// field block and the remaining block options apply.
    pub line_width: Option<f64>,
    /// Maximum number of wrapped lines.
    pub max_lines: u16,
    /// Extra dots between wrapped lines.
    pub line_spacing: i16,
    /// Alignment of wrapped lines.
    pub justification: Justification,
    /// Indent in dots of every wrapped line after the first.
    pub hanging_indent: u16,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            char_height: None,
            char_width: None,
            font: '0',
            orientation: Orientation::Normal,
            line_width: None,
            max_lines: 1,
            line_spacing: 0,
            justification: Justification::Left,
            hanging_indent: 0,
        }
    }
}

impl TextStyle {
    /// Shorthand for a style with both character dimensions set.
    pub fn sized(char_height: f64, char_width: f64) -> Self {
        Self {
            char_height: Some(char_height),
            char_width: Some(char_width),
            ..Self::default()
        }
    }

    /// Check every option against its accepted range.
    pub fn validate(&self) -> Result<(), LabelError> {
        positive_if_set("char_height", self.char_height)?;
        positive_if_set("char_width", self.char_width)?;
        positive_if_set("line_width", self.line_width)?;
        if !(self.font.is_ascii_uppercase() || self.font.is_ascii_digit()) {
            return Err(LabelError::invalid_style(
                "font",
                format!("'{}' is not a printer font identifier (A-Z, 0-9)", self.font),
            ));
        }
        if self.max_lines == 0 {
            return Err(LabelError::invalid_style(
                "max_lines",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

// ── Linear barcodes ─────────────────────────────────────────────────────

/// One-dimensional symbologies the encoder knows how to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearSymbology {
    /// Code 128 (full ASCII, automatic subset selection).
    #[default]
    Code128,
    /// Code 39 (upper-case letters, digits, `-. $/+%`).
    Code39,
    /// UPC-A (11 digits plus check digit).
    UpcA,
}

impl fmt::Display for LinearSymbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinearSymbology::Code128 => write!(f, "Code 128"),
            LinearSymbology::Code39 => write!(f, "Code 39"),
            LinearSymbology::UpcA => write!(f, "UPC-A"),
        }
    }
}

/// Style of a linear barcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BarcodeStyle {
    /// Symbology used to encode the content.
    pub symbology: LinearSymbology,
    /// Bar height in dots.
    pub height: u32,
    /// Append the symbology's optional check digit.
    pub check_digit: bool,
    /// Field rotation.
    pub orientation: Orientation,
    /// Narrow bar width in dots, 1 to 10.
    pub magnification: u8,
    /// Print the human-readable interpretation line.
    pub print_interpretation_line: bool,
    /// Put the interpretation line above the bars instead of below.
    pub print_interpretation_line_above: bool,
}

impl Default for BarcodeStyle {
    fn default() -> Self {
        Self {
            symbology: LinearSymbology::Code128,
            height: 50,
            check_digit: false,
            orientation: Orientation::Normal,
            magnification: 2,
            print_interpretation_line: true,
            print_interpretation_line_above: false,
        }
    }
}

impl BarcodeStyle {
    /// Default style with a different bar height.
    pub fn with_height(height: u32) -> Self {
        Self {
            height,
            ..Self::default()
        }
    }

    /// Check every option against its accepted range.
    pub fn validate(&self) -> Result<(), LabelError> {
        height_in_range(self.height)?;
        magnification_in_range(self.magnification)
    }
}

// ── Data Matrix ─────────────────────────────────────────────────────────

/// Data Matrix quality levels (`^BX` quality parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixEcc {
    /// ECC 000, no error correction.
    Ecc0,
    /// ECC 050.
    Ecc50,
    /// ECC 080.
    Ecc80,
    /// ECC 100.
    Ecc100,
    /// ECC 140.
    Ecc140,
    /// ECC 200, Reed-Solomon (the modern default).
    #[default]
    Ecc200,
}

impl MatrixEcc {
    /// Numeric quality value written into `^BX`.
    pub fn quality(self) -> u16 {
        match self {
            MatrixEcc::Ecc0 => 0,
            MatrixEcc::Ecc50 => 50,
            MatrixEcc::Ecc80 => 80,
            MatrixEcc::Ecc100 => 100,
            MatrixEcc::Ecc140 => 140,
            MatrixEcc::Ecc200 => 200,
        }
    }

    /// Inverse of [`MatrixEcc::quality`].
    pub fn from_quality(q: u16) -> Option<Self> {
        match q {
            0 => Some(MatrixEcc::Ecc0),
            50 => Some(MatrixEcc::Ecc50),
            80 => Some(MatrixEcc::Ecc80),
            100 => Some(MatrixEcc::Ecc100),
            140 => Some(MatrixEcc::Ecc140),
            200 => Some(MatrixEcc::Ecc200),
            _ => None,
        }
    }
}

impl fmt::Display for MatrixEcc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ECC {:03}", self.quality())
    }
}

/// Style of a Data Matrix symbol.
///
/// `height` is the size of one module in dots. The linear-only options
/// (`check_digit`, interpretation line) and `magnification` have no
/// Data Matrix counterpart; they are validated and kept with the element
/// but do not change the symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatrixCodeStyle {
    /// Module size in dots.
    pub height: u32,
    /// See the type-level note.
    pub check_digit: bool,
    /// Symbol rotation.
    pub orientation: Orientation,
    /// See the type-level note. Accepted range 1 to 10.
    pub magnification: u8,
    /// See the type-level note.
    pub print_interpretation_line: bool,
    /// See the type-level note.
    pub print_interpretation_line_above: bool,
    /// Quality level; bounds the content capacity.
    pub error_correction: MatrixEcc,
    /// Mask pattern, 0 to 7. ECC 200 picks its own placement, so this is
    /// recorded only.
    pub mask: u8,
}

impl Default for MatrixCodeStyle {
    fn default() -> Self {
        Self {
            height: 10,
            check_digit: false,
            orientation: Orientation::Normal,
            magnification: 2,
            print_interpretation_line: false,
            print_interpretation_line_above: false,
            error_correction: MatrixEcc::Ecc200,
            mask: 7,
        }
    }
}

impl MatrixCodeStyle {
    /// Default style with a different module size.
    pub fn with_module_height(height: u32) -> Self {
        Self {
            height,
            ..Self::default()
        }
    }

    /// Check every option against its accepted range.
    pub fn validate(&self) -> Result<(), LabelError> {
        height_in_range(self.height)?;
        magnification_in_range(self.magnification)?;
        mask_in_range(self.mask)
    }
}

// ── QR ──────────────────────────────────────────────────────────────────

/// QR error-correction levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QrEcc {
    /// About 30% recovery, smallest capacity.
    High,
    /// About 25% recovery.
    #[default]
    Quartile,
    /// About 15% recovery.
    Medium,
    /// About 7% recovery, largest capacity.
    Low,
}

impl QrEcc {
    /// ZPL level letter (`H`, `Q`, `M`, `L`).
    pub fn code(self) -> char {
        match self {
            QrEcc::High => 'H',
            QrEcc::Quartile => 'Q',
            QrEcc::Medium => 'M',
            QrEcc::Low => 'L',
        }
    }

    /// Inverse of [`QrEcc::code`].
    pub fn from_code(c: char) -> Option<Self> {
        match c {
            'H' => Some(QrEcc::High),
            'Q' => Some(QrEcc::Quartile),
            'M' => Some(QrEcc::Medium),
            'L' => Some(QrEcc::Low),
            _ => None,
        }
    }
}

impl fmt::Display for QrEcc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {}", self.code())
    }
}

/// Style of a QR code.
///
/// `magnification` is the module size in dots. QR symbols are square and
/// cannot be rotated, so `height` and the linear-only options do not change
/// the symbol, and any orientation other than `Normal` is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QrCodeStyle {
    /// See the type-level note.
    pub height: u32,
    /// See the type-level note.
    pub check_digit: bool,
    /// Must be `Normal`.
    pub orientation: Orientation,
    /// Module size in dots, 1 to 10.
    pub magnification: u8,
    /// See the type-level note.
    pub print_interpretation_line: bool,
    /// See the type-level note.
    pub print_interpretation_line_above: bool,
    /// Error-correction level; bounds the content capacity.
    pub error_correction: QrEcc,
    /// Mask pattern, 0 to 7.
    pub mask: u8,
}

impl Default for QrCodeStyle {
    fn default() -> Self {
        Self {
            height: 50,
            check_digit: false,
            orientation: Orientation::Normal,
            magnification: 2,
            print_interpretation_line: false,
            print_interpretation_line_above: false,
            error_correction: QrEcc::Quartile,
            mask: 7,
        }
    }
}

impl QrCodeStyle {
    /// Default style with a different module size.
    pub fn with_magnification(magnification: u8) -> Self {
        Self {
            magnification,
            ..Self::default()
        }
    }

    /// Check every option against its accepted range.
    pub fn validate(&self) -> Result<(), LabelError> {
        height_in_range(self.height)?;
        magnification_in_range(self.magnification)?;
        mask_in_range(self.mask)?;
        if self.orientation != Orientation::Normal {
            return Err(LabelError::invalid_style(
                "orientation",
                "QR codes can only be printed upright",
            ));
        }
        Ok(())
    }
}

// ── Range helpers ───────────────────────────────────────────────────────

fn positive_if_set(field: &'static str, value: Option<f64>) -> Result<(), LabelError> {
    match value {
        Some(v) if !v.is_finite() || v <= 0.0 => Err(LabelError::invalid_style(
            field,
            format!("must be a positive number, got {v}"),
        )),
        _ => Ok(()),
    }
}

fn height_in_range(height: u32) -> Result<(), LabelError> {
    if height == 0 || height > MAX_DOTS {
        return Err(LabelError::invalid_style(
            "height",
            format!("must be between 1 and {MAX_DOTS} dots, got {height}"),
        ));
    }
    Ok(())
}

fn magnification_in_range(magnification: u8) -> Result<(), LabelError> {
    if !(1..=MAX_MAGNIFICATION).contains(&magnification) {
        return Err(LabelError::invalid_style(
            "magnification",
            format!("must be between 1 and {MAX_MAGNIFICATION}, got {magnification}"),
        ));
    }
    Ok(())
}

fn mask_in_range(mask: u8) -> Result<(), LabelError> {
    if mask > 7 {
        return Err(LabelError::invalid_style(
            "mask",
            format!("must be between 0 and 7, got {mask}"),
        ));
    }
    Ok(())
}
