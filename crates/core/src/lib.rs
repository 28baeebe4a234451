//! woodtag core library.
//!
//! Composes labels on an origin-tracking drawing surface and serializes
//! them to printer markup. The main entry point is [`LabelDocument`]:
//! place text, barcodes, Data Matrix and QR codes at explicit origins, then
//! [`LabelDocument::serialize`] the result or render a
//! [`LabelDocument::preview`].

#![warn(missing_docs)]

/// Symbol capacity limits supplied by the encoder.
pub mod capacity;
/// One physical label and its placement API.
pub mod document;
/// Placed elements and symbologies.
pub mod element;
/// Markup encoders (ZPL II).
pub mod encode;
/// Error types.
pub mod error;
/// Monochrome bitmaps for graphic fields.
pub mod graphic;
/// Hex escape processing for `^FH` field data.
pub mod hex_escape;
/// Tokenizer for serialized label streams.
pub mod lexer;
/// Raster preview of serialized labels.
#[cfg(feature = "preview")]
pub mod preview;
/// Per-element style structures.
pub mod style;
/// Origin-tracking drawing surface.
pub mod surface;

// ── Convenience re-exports ──────────────────────────────────────────────────

// Document
pub use document::{DEFAULT_DPMM, LabelDocument};

// Surface and elements
pub use element::{Element, ElementKind, Symbology};
pub use graphic::Bitmap;
pub use surface::{DrawingSurface, Point};

// Styles
pub use style::{
    BarcodeStyle, Justification, LinearSymbology, MatrixCodeStyle, MatrixEcc, Orientation,
    QrCodeStyle, QrEcc, TextStyle,
};

// Encoding
pub use capacity::{CapacityLimits, CodeSpec, ZplCapacity};
pub use encode::{MarkupEncoder, PageSetup, ZplEncoder};

// Errors
pub use error::{Axis, LabelError};
#[cfg(feature = "preview")]
pub use error::PreviewError;

// Preview
#[cfg(feature = "preview")]
pub use preview::RasterImage;
