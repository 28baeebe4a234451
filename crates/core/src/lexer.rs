//! Tokenizer for serialized label streams.
//!
//! Splits ZPL text into leaders, argument separators, value runs and line
//! breaks. Tokens borrow from the input and keep their byte offsets so the
//! preview interpreter can slice raw field data and report positions.

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokKind {
    /// Command leader (`^` or `~`).
    Leader,
    /// Argument separator (`,`).
    Comma,
    /// A run of anything else, up to the next leader, comma or line break.
    Value,
    /// `\n`, `\r\n` or `\r`.
    Newline,
}

/// A token borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Classification.
    pub kind: TokKind,
    /// `&input[start..end]`.
    pub text: &'a str,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

/// Tokenize `input`.
///
/// Leaders, commas and line breaks are all ASCII, and UTF-8 continuation
/// bytes never equal an ASCII byte, so scanning bytes keeps every slice on a
/// character boundary.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let b = input.as_bytes();
    let mut toks = Vec::new();
    let mut i = 0usize;
    while i < b.len() {
        let start = i;
        let kind = match b[i] {
            b'^' | b'~' => {
                i += 1;
                TokKind::Leader
            }
            b',' => {
                i += 1;
                TokKind::Comma
            }
            b'\r' if b.get(i + 1) == Some(&b'\n') => {
                i += 2;
                TokKind::Newline
            }
            b'\n' | b'\r' => {
                i += 1;
                TokKind::Newline
            }
            _ => {
                i += 1;
                while i < b.len() && !matches!(b[i], b'^' | b'~' | b',' | b'\n' | b'\r') {
                    i += 1;
                }
                TokKind::Value
            }
        };
        toks.push(Token {
            kind,
            text: &input[start..i],
            start,
            end: i,
        });
    }
    toks
}
