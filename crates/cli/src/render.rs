//! Terminal and JSON output.
//!
//! Item record syntax errors are shown with ariadne source snippets in
//! pretty mode. In JSON mode every command writes exactly one JSON object
//! to stdout, including failures.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use serde_json::json;

use crate::item::ItemSource;

// ── Output format ───────────────────────────────────────────────────────

/// How command results are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Human-readable text; status on stderr.
    Pretty,
    /// One JSON object on stdout.
    Json,
}

impl Format {
    /// Use `explicit` when given; otherwise pretty for terminals, JSON
    /// for pipes.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Item record errors ──────────────────────────────────────────────────

/// Byte offset of a 1-based `line`/`column` pair as reported by serde_json.
fn byte_offset(text: &str, line: usize, column: usize) -> usize {
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let mut offset = (line_start + column.saturating_sub(1)).min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Show where an item record stopped parsing, on stderr.
pub(crate) fn render_item_error(source: &ItemSource, err: &serde_json::Error) {
    let text = source.text.as_str();
    let name = source.name.as_str();
    let start = byte_offset(text, err.line(), err.column());
    // Point at one character; at end of input the span is empty.
    let end = text[start..]
        .chars()
        .next()
        .map_or(start, |c| start + c.len_utf8());

    // serde_json appends " at line L column C"; the snippet already shows it.
    let message = err.to_string();
    let message = message
        .rsplit_once(" at line ")
        .map_or(message.as_str(), |(head, _)| head);

    Report::build(ReportKind::Error, (name, start..end))
        .with_message("invalid item record")
        .with_config(
            Config::default()
                .with_compact(false)
                .with_color(io::stderr().is_terminal()),
        )
        .with_label(
            Label::new((name, start..end))
                .with_message(message)
                .with_color(Color::Red),
        )
        .with_help("an item record is a JSON object with at least an \"id\"")
        .finish()
        .eprint((name, Source::from(text)))
        .ok();
}

// ── Command results ─────────────────────────────────────────────────────

/// Report success: `message` on stderr in pretty mode, `fields` plus
/// `"success": true` on stdout in JSON mode.
pub(crate) fn status(format: Format, message: &str, fields: serde_json::Value) {
    match format {
        Format::Pretty => eprintln!("{message}"),
        Format::Json => {
            let mut out = json!({ "success": true });
            if let (Some(out), serde_json::Value::Object(extra)) = (out.as_object_mut(), fields) {
                out.extend(extra);
            }
            println!("{out}");
        }
    }
}

/// Report a failed command.
pub(crate) fn failure(format: Format, err: &anyhow::Error) {
    match format {
        Format::Pretty => eprintln!("error: {err:#}"),
        Format::Json => {
            let out = json!({
                "success": false,
                "error": "command_failed",
                "message": format!("{err:#}"),
            });
            println!("{out}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_from_line_and_column() {
        let text = "{\n  \"id\": 7,\n  \"weight\": ,\n}";
        assert_eq!(byte_offset(text, 1, 1), 0);
        assert_eq!(&text[byte_offset(text, 3, 13)..][..1], ",");
        assert_eq!(byte_offset(text, 99, 1), text.len());
    }

    #[test]
    fn multibyte_lines_count_bytes() {
        let text = "{\"d\": \"g/cm³\",\n x}";
        let offset = byte_offset(text, 2, 2);
        assert_eq!(&text[offset..offset + 1], "x");
    }
}
