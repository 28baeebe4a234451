//! Monochrome bitmaps for graphic fields.

use crate::error::LabelError;
use crate::style::MAX_DOTS;

/// A 1-bit image printed one bit per dot.
///
/// Rows are packed most significant bit first and padded to whole bytes,
/// which is the layout `^GF` expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    bits: Vec<u8>,
}

impl Bitmap {
    /// Build a `width` x `height` bitmap; `dark(x, y)` decides which dots
    /// print.
    pub fn from_fn(
        width: u32,
        height: u32,
        dark: impl Fn(u32, u32) -> bool,
    ) -> Result<Self, LabelError> {
        for (field, value) in [("width", width), ("height", height)] {
            if value == 0 || value > MAX_DOTS {
                return Err(LabelError::invalid_style(
                    field,
                    format!("must be between 1 and {MAX_DOTS} dots, got {value}"),
                ));
            }
        }
        let row = width.div_ceil(8) as usize;
        let mut bits = vec![0u8; row * height as usize];
        for y in 0..height {
            for x in 0..width {
                if dark(x, y) {
                    bits[y as usize * row + (x / 8) as usize] |= 0x80 >> (x % 8);
                }
            }
        }
        Ok(Self {
            width,
            height,
            bits,
        })
    }

    /// Width in dots.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in dots.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed bytes per row.
    pub fn bytes_per_row(&self) -> u32 {
        self.width.div_ceil(8)
    }

    /// `true` when the dot at (`x`, `y`) prints. Out of range is blank.
    pub fn is_dark(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let byte = self.bits[y as usize * self.bytes_per_row() as usize + (x / 8) as usize];
        byte & (0x80 >> (x % 8)) != 0
    }

    /// Packed rows, top to bottom.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }
}
