//! Symbol capacity limits.
//!
//! How much data a 2D symbol holds depends on the symbology's encoding
//! tables, which belong to the encoder. [`CapacityLimits`] is the capability
//! an encoder hands to the document so placements can be rejected before
//! they reach the element list. [`ZplCapacity`] carries the limits of the
//! ZPL II `^BQ` and `^BX` commands.

use crate::style::{LinearSymbology, MatrixEcc, QrEcc};

/// A code whose capacity is being asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeSpec {
    /// A linear barcode.
    Linear(LinearSymbology),
    /// A Data Matrix symbol at the given quality level.
    Matrix(MatrixEcc),
    /// A QR code at the given error-correction level.
    Qr(QrEcc),
}

/// Maximum content length a symbol can carry.
pub trait CapacityLimits {
    /// Largest accepted content length in bytes for `code`, given the
    /// characters in `content` (numeric or alphanumeric data packs denser).
    /// `None` means the symbology has no fixed bound.
    fn max_len(&self, code: CodeSpec, content: &str) -> Option<usize>;
}

/// Densest encoding mode that covers every character of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    /// Digits only.
    Numeric,
    /// The symbology's restricted upper-case alphanumeric set.
    Alphanumeric,
    /// Arbitrary bytes.
    Byte,
}

/// QR version 40 capacities, indexed `[level][mode]` with levels in
/// `L, M, Q, H` order and modes in `Numeric, Alphanumeric, Byte` order.
const QR_CAPACITY: [[usize; 3]; 4] = [
    [7089, 4296, 2953],
    [5596, 3391, 2331],
    [3993, 2420, 1663],
    [3057, 1852, 1273],
];

/// Largest Data Matrix ECC 200 symbol (144x144).
const ECC200_CAPACITY: [usize; 3] = [3116, 2335, 1556];

/// Maximum field sizes for the legacy ECC 000-140 qualities, indexed
/// `[quality][mode]` in `0, 50, 80, 100, 140` order.
const LEGACY_MATRIX_CAPACITY: [[usize; 3]; 5] = [
    [596, 394, 271],
    [457, 291, 200],
    [402, 256, 176],
    [300, 190, 131],
    [144, 91, 63],
];

/// UPC-A payload: 11 data digits plus an optional check digit.
const UPC_A_LEN: usize = 12;

/// Capacity tables for the ZPL II encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZplCapacity;

impl CapacityLimits for ZplCapacity {
    fn max_len(&self, code: CodeSpec, content: &str) -> Option<usize> {
        match code {
            CodeSpec::Linear(LinearSymbology::UpcA) => Some(UPC_A_LEN),
            CodeSpec::Linear(_) => None,
            CodeSpec::Qr(level) => {
                let row = match level {
                    QrEcc::Low => 0,
                    QrEcc::Medium => 1,
                    QrEcc::Quartile => 2,
                    QrEcc::High => 3,
                };
                Some(QR_CAPACITY[row][mode_index(qr_mode(content))])
            }
            CodeSpec::Matrix(level) => {
                let mode = mode_index(matrix_mode(content));
                Some(match level {
                    MatrixEcc::Ecc200 => ECC200_CAPACITY[mode],
                    MatrixEcc::Ecc0 => LEGACY_MATRIX_CAPACITY[0][mode],
                    MatrixEcc::Ecc50 => LEGACY_MATRIX_CAPACITY[1][mode],
                    MatrixEcc::Ecc80 => LEGACY_MATRIX_CAPACITY[2][mode],
                    MatrixEcc::Ecc100 => LEGACY_MATRIX_CAPACITY[3][mode],
                    MatrixEcc::Ecc140 => LEGACY_MATRIX_CAPACITY[4][mode],
                })
            }
        }
    }
}

fn mode_index(mode: DataMode) -> usize {
    match mode {
        DataMode::Numeric => 0,
        DataMode::Alphanumeric => 1,
        DataMode::Byte => 2,
    }
}

/// Densest QR mode for `content`.
pub fn qr_mode(content: &str) -> DataMode {
    classify(content, |c| {
        c.is_ascii_digit()
            || c.is_ascii_uppercase()
            || matches!(c, ' ' | '$' | '%' | '*' | '+' | '-' | '.' | '/' | ':')
    })
}

/// Densest Data Matrix mode for `content`.
pub fn matrix_mode(content: &str) -> DataMode {
    classify(content, |c| {
        c.is_ascii_digit() || c.is_ascii_uppercase() || matches!(c, ' ' | '.' | '-' | '/')
    })
}

fn classify(content: &str, alnum: impl Fn(char) -> bool) -> DataMode {
    if !content.is_empty() && content.chars().all(|c| c.is_ascii_digit()) {
        DataMode::Numeric
    } else if content.chars().all(alnum) {
        DataMode::Alphanumeric
    } else {
        DataMode::Byte
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qr_modes() {
        assert_eq!(qr_mode("0123"), DataMode::Numeric);
        assert_eq!(qr_mode("WOOD-17 A"), DataMode::Alphanumeric);
        assert_eq!(qr_mode("https://example/wood/1"), DataMode::Byte);
    }

    #[test]
    fn qr_capacity_follows_level_and_mode() {
        let caps = ZplCapacity;
        assert_eq!(caps.max_len(CodeSpec::Qr(QrEcc::Quartile), "https://x"), Some(1663));
        assert_eq!(caps.max_len(CodeSpec::Qr(QrEcc::Low), "123"), Some(7089));
        assert_eq!(caps.max_len(CodeSpec::Qr(QrEcc::High), "ABC"), Some(1852));
    }

    #[test]
    fn matrix_capacity_shrinks_with_legacy_quality() {
        let caps = ZplCapacity;
        let modern = caps.max_len(CodeSpec::Matrix(MatrixEcc::Ecc200), "wood");
        let legacy = caps.max_len(CodeSpec::Matrix(MatrixEcc::Ecc140), "wood");
        assert_eq!(modern, Some(1556));
        assert_eq!(legacy, Some(63));
    }

    #[test]
    fn linear_codes_unbounded_except_upc() {
        let caps = ZplCapacity;
        assert_eq!(
            caps.max_len(CodeSpec::Linear(LinearSymbology::Code128), "x"),
            None
        );
        assert_eq!(
            caps.max_len(CodeSpec::Linear(LinearSymbology::UpcA), "1"),
            Some(12)
        );
    }
}
