//! Typed error types for label composition.

use std::fmt;

use crate::element::Symbology;

/// Axis of a coordinate, used in origin errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Errors raised while placing elements on a label.
///
/// All of these are recoverable: the failed call leaves the document
/// untouched, so the caller can correct the input and place again.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LabelError {
    /// A style option is outside its accepted range.
    #[error("invalid style option `{field}`: {reason}")]
    InvalidStyle {
        /// Name of the offending option.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Content is longer than the symbol can hold at the chosen level.
    #[error("{symbology} content is {len} bytes but {level} holds at most {capacity}")]
    EncodingCapacity {
        /// Symbology being encoded.
        symbology: Symbology,
        /// Human-readable error-correction level.
        level: String,
        /// Length of the rejected content in bytes.
        len: usize,
        /// Maximum content length for this level.
        capacity: usize,
    },

    /// Content contains characters or a length the symbology cannot encode.
    #[error("{symbology} cannot encode this content: {reason}")]
    UnencodableContent {
        /// Symbology being encoded.
        symbology: Symbology,
        /// Why the content was rejected.
        reason: String,
    },

    /// An origin coordinate is negative or not a finite number.
    #[error("invalid origin: {axis} = {value}")]
    InvalidOrigin {
        /// Axis of the rejected coordinate.
        axis: Axis,
        /// The rejected value.
        value: f64,
    },

    /// Label dimensions or resolution are not positive.
    #[error("invalid label dimensions: {0}")]
    InvalidDimensions(String),
}

impl LabelError {
    pub(crate) fn invalid_style(field: &'static str, reason: impl Into<String>) -> Self {
        LabelError::InvalidStyle {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors raised while rendering a preview.
///
/// A preview failure is reported to the caller and never touches the
/// document it was rendered from.
#[cfg(feature = "preview")]
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// The stream uses a font whose glyph metrics are unknown to the renderer.
    #[error("no font metrics for printer font '{0}'")]
    MissingFontMetrics(char),

    /// The instruction stream could not be interpreted.
    #[error("malformed label stream at byte {offset}: {details}")]
    Malformed {
        /// Byte offset of the offending instruction.
        offset: usize,
        /// Human-readable description.
        details: String,
    },

    /// Encoding or writing the raster failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
