//! Placed label elements.

use std::fmt;

use crate::graphic::Bitmap;
use crate::style::{BarcodeStyle, LinearSymbology, MatrixCodeStyle, QrCodeStyle, TextStyle};
use crate::surface::Point;

/// Every symbology an element can be encoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbology {
    /// A one-dimensional barcode.
    Linear(LinearSymbology),
    /// Data Matrix.
    DataMatrix,
    /// QR code (model 2).
    Qr,
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbology::Linear(s) => write!(f, "{s}"),
            Symbology::DataMatrix => write!(f, "Data Matrix"),
            Symbology::Qr => write!(f, "QR"),
        }
    }
}

/// One atomic item placed on a label.
///
/// Elements are immutable once appended: the surface only hands out shared
/// references.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    origin: Point,
    kind: ElementKind,
}

impl Element {
    pub(crate) fn new(origin: Point, kind: ElementKind) -> Self {
        Self { origin, kind }
    }

    /// Top-left reference point in millimetres.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// What was placed.
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }
}

/// Kind-specific payload of an [`Element`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// A run of text.
    Text {
        /// Text to print. `\n` starts a new line inside a field block.
        content: String,
        /// Font, size and wrapping.
        style: TextStyle,
    },
    /// A one-dimensional barcode.
    LinearBarcode {
        /// Encoded data.
        content: String,
        /// Symbology and bar geometry.
        style: BarcodeStyle,
    },
    /// A Data Matrix symbol.
    MatrixCode {
        /// Encoded data.
        content: String,
        /// Module size and quality level.
        style: MatrixCodeStyle,
    },
    /// A QR code.
    QrCode {
        /// Encoded data.
        content: String,
        /// Module size and error-correction level.
        style: QrCodeStyle,
    },
    /// A monochrome graphic such as a logo.
    Graphic {
        /// The dots to print.
        bitmap: Bitmap,
    },
}

impl ElementKind {
    /// Content carried by the element, whatever its kind. Graphics have
    /// none.
    pub fn content(&self) -> &str {
        match self {
            ElementKind::Text { content, .. }
            | ElementKind::LinearBarcode { content, .. }
            | ElementKind::MatrixCode { content, .. }
            | ElementKind::QrCode { content, .. } => content,
            ElementKind::Graphic { .. } => "",
        }
    }

    /// Symbology for code elements, `None` for text and graphics.
    pub fn symbology(&self) -> Option<Symbology> {
        match self {
            ElementKind::Text { .. } | ElementKind::Graphic { .. } => None,
            ElementKind::LinearBarcode { style, .. } => Some(Symbology::Linear(style.symbology)),
            ElementKind::MatrixCode { .. } => Some(Symbology::DataMatrix),
            ElementKind::QrCode { .. } => Some(Symbology::Qr),
        }
    }

    /// Short lowercase name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Text { .. } => "text",
            ElementKind::LinearBarcode { .. } => "barcode",
            ElementKind::MatrixCode { .. } => "matrix code",
            ElementKind::QrCode { .. } => "qr code",
            ElementKind::Graphic { .. } => "graphic",
        }
    }
}
