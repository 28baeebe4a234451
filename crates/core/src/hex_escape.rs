//! Hex escaping of ZPL field data (`^FH`).
//!
//! Field data runs until the next command leader, so content that contains
//! `^`, `~` or control bytes cannot be written verbatim. When `^FH` precedes
//! `^FD`, an indicator character followed by two hex digits (`_5E`) stands
//! for one literal byte. The indicator itself must then be escaped too.

use std::borrow::Cow;

/// Default `^FH` indicator.
pub const DEFAULT_INDICATOR: u8 = b'_';

/// `true` when `content` cannot be written verbatim after `^FD`.
pub fn needs_escape(content: &str) -> bool {
    content.bytes().any(is_reserved)
}

fn is_reserved(b: u8) -> bool {
    b == b'^' || b == b'~' || b < 0x20 || b == 0x7F
}

/// Escape `content` for use after `^FH^FD`.
///
/// Returns the input unchanged (borrowed) when nothing needs escaping.
/// Otherwise every reserved byte and every occurrence of `indicator` is
/// replaced by `indicator` plus two upper-case hex digits. Multi-byte UTF-8
/// sequences pass through untouched.
pub fn escape_field_data(content: &str, indicator: u8) -> Cow<'_, str> {
    if !needs_escape(content) {
        return Cow::Borrowed(content);
    }
    let mut out = String::with_capacity(content.len() + 8);
    for ch in content.chars() {
        let reserved = ch.is_ascii() && (is_reserved(ch as u8) || ch as u8 == indicator);
        if reserved {
            out.push(indicator as char);
            out.push_str(&format!("{:02X}", ch as u8));
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

/// A malformed escape sequence at a byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexEscapeError {
    /// Byte offset of the indicator within the escaped content.
    pub offset: usize,
    /// Human-readable description of the error.
    pub message: String,
}

/// Decode `^FH` escapes back into the original text.
///
/// Stops at the first malformed sequence. Decoded bytes that do not form
/// valid UTF-8 are replaced with U+FFFD.
pub fn decode_field_data(content: &str, indicator: u8) -> Result<String, HexEscapeError> {
    let bytes = content.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != indicator {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        let (Some(&h1), Some(&h2)) = (bytes.get(i + 1), bytes.get(i + 2)) else {
            return Err(HexEscapeError {
                offset: i,
                message: format!(
                    "incomplete escape (expected '{}XX' but input ends)",
                    indicator as char
                ),
            });
        };
        match (hex_value(h1), hex_value(h2)) {
            (Some(hi), Some(lo)) => out.push((hi << 4) | lo),
            _ => {
                return Err(HexEscapeError {
                    offset: i,
                    message: format!(
                        "invalid escape {}{}{} (expected two hex digits)",
                        indicator as char, h1 as char, h2 as char
                    ),
                });
            }
        }
        i += 3;
    }
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_content_is_borrowed() {
        let out = escape_field_data("Location: B-12", DEFAULT_INDICATOR);
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn caret_and_indicator_escaped() {
        let out = escape_field_data("a^b_c", DEFAULT_INDICATOR);
        assert_eq!(out, "a_5Eb_5Fc");
    }

    #[test]
    fn tilde_and_control_escaped() {
        let out = escape_field_data("x~\ty", DEFAULT_INDICATOR);
        assert_eq!(out, "x_7E_09y");
    }

    #[test]
    fn unicode_passes_through() {
        let out = escape_field_data("Dichte ^ 0,5 g/cm³", DEFAULT_INDICATOR);
        assert_eq!(out, "Dichte _5E 0,5 g/cm³");
        assert_eq!(
            decode_field_data(&out, DEFAULT_INDICATOR).unwrap(),
            "Dichte ^ 0,5 g/cm³"
        );
    }

    #[test]
    fn lowercase_hex_accepted() {
        assert_eq!(decode_field_data("_5e", DEFAULT_INDICATOR).unwrap(), "^");
    }

    #[test]
    fn invalid_sequence_reports_offset() {
        let err = decode_field_data("ab_ZZ", DEFAULT_INDICATOR).unwrap_err();
        assert_eq!(err.offset, 2);
    }

    #[test]
    fn truncated_sequence_reports_offset() {
        let err = decode_field_data("ab_4", DEFAULT_INDICATOR).unwrap_err();
        assert_eq!(err.offset, 2);
    }
}
