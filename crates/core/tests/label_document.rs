//! Behavioural tests for `LabelDocument`: placement, ordering, capacity
//! limits, and serialization.

use woodtag_core::{
    BarcodeStyle, Bitmap, CapacityLimits, CodeSpec, ElementKind, LabelDocument, LabelError,
    MarkupEncoder, MatrixCodeStyle, MatrixEcc, PageSetup, Point, QrCodeStyle, QrEcc, Symbology,
    TextStyle, ZplEncoder,
};

const URL: &str = "https://example/wood/1";

fn example_label() -> LabelDocument {
    let mut doc = LabelDocument::new(17.0, 38.0).unwrap();
    doc.add_text(2.0, 2.0, "EXAMPLE #0001", &TextStyle::default())
        .unwrap();
    doc.add_barcode(3.0, 6.0, URL, &BarcodeStyle::with_height(30))
        .unwrap();
    doc
}

/// Lines of the stream that place an element.
fn element_lines(stream: &str) -> Vec<&str> {
    stream.lines().filter(|l| l.starts_with("^FO")).collect()
}

// ── Serialization ───────────────────────────────────────────────────────

#[test]
fn example_label_has_two_bracketed_elements_in_order() {
    let stream = example_label().serialize();

    assert!(stream.starts_with("^XA\n"));
    assert!(stream.ends_with("^XZ\n"));
    assert_eq!(stream.matches("^FO").count(), 2);
    assert_eq!(stream.matches("^FS").count(), 2);

    let lines = element_lines(&stream);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("^FO24,24"), "{}", lines[0]);
    assert!(lines[0].ends_with("^FDEXAMPLE #0001^FS"), "{}", lines[0]);
    assert!(lines[1].starts_with("^FO36,72"), "{}", lines[1]);
    assert!(lines[1].contains("^BCN,30,"), "{}", lines[1]);
    assert!(lines[1].ends_with(&format!("^FD{URL}^FS")), "{}", lines[1]);
}

#[test]
fn serialize_is_idempotent() {
    let mut doc = example_label();
    doc.add_matrix_code(22.0, 6.0, URL, &MatrixCodeStyle::with_module_height(2))
        .unwrap();
    doc.add_qr_code(30.0, 5.0, URL, &QrCodeStyle::with_magnification(2))
        .unwrap();

    let first = doc.serialize();
    let second = doc.serialize();
    assert_eq!(first, second);
    assert_eq!(element_lines(&first).len(), 4);
}

#[test]
fn later_elements_paint_after_earlier_ones() {
    let mut doc = LabelDocument::new(17.0, 38.0).unwrap();
    for (i, text) in ["bottom", "middle", "top"].iter().enumerate() {
        doc.add_text(1.0, 1.0 + i as f64, text, &TextStyle::default())
            .unwrap();
    }
    let stream = doc.serialize();
    let bottom = stream.find("bottom").unwrap();
    let middle = stream.find("middle").unwrap();
    let top = stream.find("top").unwrap();
    assert!(bottom < middle && middle < top);
}

// ── Origins ─────────────────────────────────────────────────────────────

#[test]
fn recorded_origin_matches_placement() {
    let doc = example_label();
    let origins: Vec<Point> = doc.elements().iter().map(|e| e.origin()).collect();
    assert_eq!(origins, vec![Point::new(2.0, 2.0), Point::new(3.0, 6.0)]);
    assert_eq!(doc.cursor(), Point::new(3.0, 6.0));
}

#[test]
fn omitted_axis_reuses_cursor() {
    let mut doc = LabelDocument::new(17.0, 38.0).unwrap();
    let style = TextStyle::default();
    doc.add_text(5.0, None, "x only", &style).unwrap();
    let origin = doc.add_text(None, 10.0, "then y", &style).unwrap().origin();

    assert_eq!(origin, Point::new(5.0, 10.0));
    assert_eq!(element_lines(&doc.serialize())[1], "^FO60,120^A0N^FDthen y^FS");
}

#[test]
fn placements_without_origin_stack_on_previous_one() {
    let mut doc = LabelDocument::new(17.0, 38.0).unwrap();
    doc.add_text(3.0, 4.0, "first", &TextStyle::default())
        .unwrap();
    doc.add_matrix_code(None, None, "17", &MatrixCodeStyle::with_module_height(3))
        .unwrap();
    doc.add_text(None, None, "third", &TextStyle::default())
        .unwrap();

    let origins: Vec<Point> = doc.elements().iter().map(|e| e.origin()).collect();
    assert_eq!(origins, vec![Point::new(3.0, 4.0); 3]);
    assert!(
        element_lines(&doc.serialize())
            .iter()
            .all(|l| l.starts_with("^FO36,48^"))
    );
}

#[test]
fn invalid_axis_leaves_cursor_and_elements() {
    let mut doc = LabelDocument::new(17.0, 38.0).unwrap();
    doc.add_text(2.0, 2.0, "a", &TextStyle::default()).unwrap();
    assert!(matches!(
        doc.add_text(None, f64::NAN, "b", &TextStyle::default()),
        Err(LabelError::InvalidOrigin { .. })
    ));
    assert_eq!(doc.cursor(), Point::new(2.0, 2.0));
    assert_eq!(doc.elements().len(), 1);
}

// ── Style validation ────────────────────────────────────────────────────

#[test]
fn non_positive_char_height_is_invalid_style() {
    let mut doc = LabelDocument::new(17.0, 38.0).unwrap();
    let err = doc
        .add_text(1.0, 1.0, "x", &TextStyle::sized(0.0, 1.5))
        .unwrap_err();
    assert!(matches!(
        err,
        LabelError::InvalidStyle {
            field: "char_height",
            ..
        }
    ));
    assert!(doc.elements().is_empty());
}

#[test]
fn out_of_range_magnification_is_invalid_style() {
    let mut doc = LabelDocument::new(17.0, 38.0).unwrap();
    let style = QrCodeStyle::with_magnification(11);
    assert!(matches!(
        doc.add_qr_code(1.0, 1.0, "x", &style),
        Err(LabelError::InvalidStyle {
            field: "magnification",
            ..
        })
    ));
}

// ── Capacity ────────────────────────────────────────────────────────────

#[test]
fn qr_with_80_char_url_at_level_q_succeeds() {
    let url = format!("https://example.org/residual-wood/{}", "x".repeat(46));
    assert_eq!(url.len(), 80);

    let mut doc = LabelDocument::new(17.0, 38.0).unwrap();
    let style = QrCodeStyle {
        error_correction: QrEcc::Quartile,
        ..QrCodeStyle::with_magnification(2)
    };
    doc.add_qr_code(30.0, 5.0, &url, &style).unwrap();

    assert_eq!(doc.elements().len(), 1);
    assert!(matches!(
        doc.elements()[0].kind(),
        ElementKind::QrCode { content, .. } if *content == url
    ));
}

#[test]
fn oversized_qr_content_leaves_elements_unchanged() {
    let mut doc = example_label();
    let before = doc.serialize();

    let style = QrCodeStyle {
        error_correction: QrEcc::High,
        ..QrCodeStyle::default()
    };
    let content = "z".repeat(1274);
    let err = doc.add_qr_code(1.0, 1.0, &content, &style).unwrap_err();

    assert_eq!(
        err,
        LabelError::EncodingCapacity {
            symbology: Symbology::Qr,
            level: "level H".into(),
            len: 1274,
            capacity: 1273,
        }
    );
    assert_eq!(doc.elements().len(), 2);
    assert_eq!(doc.serialize(), before);
}

#[test]
fn oversized_matrix_content_fails_at_legacy_quality() {
    let mut doc = LabelDocument::new(17.0, 38.0).unwrap();
    let style = MatrixCodeStyle {
        error_correction: MatrixEcc::Ecc140,
        ..MatrixCodeStyle::default()
    };
    let content = "a".repeat(64);
    assert!(matches!(
        doc.add_matrix_code(1.0, 1.0, &content, &style),
        Err(LabelError::EncodingCapacity { capacity: 63, .. })
    ));
    assert!(doc.elements().is_empty());

    // Lowering the content length fixes it.
    doc.add_matrix_code(1.0, 1.0, &content[..63], &style).unwrap();
    assert_eq!(doc.elements().len(), 1);
}

// ── Pluggable encoder ───────────────────────────────────────────────────

struct TinyCapacity;

impl CapacityLimits for TinyCapacity {
    fn max_len(&self, code: CodeSpec, _content: &str) -> Option<usize> {
        match code {
            CodeSpec::Qr(_) | CodeSpec::Matrix(_) => Some(4),
            CodeSpec::Linear(_) => None,
        }
    }
}

struct ListEncoder {
    capacity: TinyCapacity,
}

impl MarkupEncoder for ListEncoder {
    fn encode(&self, _page: &PageSetup, elements: &[woodtag_core::Element]) -> String {
        elements
            .iter()
            .map(|e| format!("{} {}\n", e.kind().name(), e.kind().content()))
            .collect()
    }

    fn limits(&self) -> &dyn CapacityLimits {
        &self.capacity
    }
}

#[test]
fn encoder_supplies_capacity_and_output() {
    let mut doc = LabelDocument::new(17.0, 38.0).unwrap().with_encoder(Box::new(ListEncoder {
        capacity: TinyCapacity,
    }));
    assert!(doc.add_qr_code(0.0, 0.0, "12345", &QrCodeStyle::default()).is_err());
    doc.add_qr_code(0.0, 0.0, "1234", &QrCodeStyle::default()).unwrap();
    doc.add_text(0.0, 0.0, "hi", &TextStyle::default()).unwrap();
    assert_eq!(doc.serialize(), "qr code 1234\ntext hi\n");
}

#[test]
fn default_encoder_is_zpl() {
    let page = PageSetup {
        height: 10.0,
        width: 10.0,
        dpmm: 8.0,
    };
    let stream = ZplEncoder::new().encode(&page, &[]);
    assert!(stream.contains("^PW80\n^LL80\n"));
}

// ── Graphics ────────────────────────────────────────────────────────────

#[test]
fn graphic_is_placed_and_encoded() {
    let logo = Bitmap::from_fn(16, 3, |x, y| x == y).unwrap();
    let mut doc = LabelDocument::new(17.0, 38.0).unwrap();
    let element = doc.add_graphic(30.0, 2.0, &logo).unwrap();
    assert_eq!(element.kind().name(), "graphic");
    assert_eq!(element.kind().symbology(), None);

    let stream = doc.serialize();
    assert_eq!(element_lines(&stream), vec!["^FO360,24^GFA,6,6,2,800040002000^FS"]);
}

// ── Preview ─────────────────────────────────────────────────────────────

#[cfg(feature = "preview")]
mod preview {
    use super::*;
    use woodtag_core::RasterImage;

    /// Horizontal and vertical extent of all ink, in dots.
    fn ink_extent(img: &RasterImage) -> (u32, u32) {
        let span = |hits: Vec<u32>| match (hits.first(), hits.last()) {
            (Some(a), Some(b)) => b - a + 1,
            _ => 0,
        };
        let columns = (0..img.width())
            .filter(|x| (0..img.height()).any(|y| img.is_dark(*x, y)))
            .collect();
        let rows = (0..img.height())
            .filter(|y| (0..img.width()).any(|x| img.is_dark(x, *y)))
            .collect();
        (span(columns), span(rows))
    }

    #[test]
    fn preview_draws_qr_at_printed_size() {
        let url = format!("https://example.org/residual-wood/{}", "x".repeat(46));
        let style = QrCodeStyle {
            error_correction: QrEcc::Quartile,
            ..QrCodeStyle::with_magnification(2)
        };
        let mut doc = LabelDocument::new(17.0, 38.0).unwrap();
        doc.add_qr_code(1.0, 1.0, &url, &style).unwrap();

        // 80 bytes at level Q is version 7: 45 modules of 2 dots.
        assert_eq!(ink_extent(&doc.preview().unwrap()), (90, 90));
    }

    #[test]
    fn preview_draws_matrix_at_printed_size() {
        let mut doc = LabelDocument::new(17.0, 38.0).unwrap();
        doc.add_matrix_code(20.0, 7.0, "1042", &MatrixCodeStyle::with_module_height(10))
            .unwrap();

        // Two codewords fit the 10x10 symbol.
        let (width, height) = ink_extent(&doc.preview().unwrap());
        assert_eq!(width, 100);
        assert_eq!(height, 100);
    }

    #[test]
    fn preview_paints_graphic_bits() {
        let logo = Bitmap::from_fn(12, 12, |x, y| (x + y) % 2 == 0).unwrap();
        let mut doc = LabelDocument::new(17.0, 38.0).unwrap();
        doc.add_graphic(1.0, 1.0, &logo).unwrap();

        let img = doc.preview().unwrap();
        assert_eq!(img.ink_count(), 72);
        for (x, y) in [(0, 0), (3, 5), (11, 11)] {
            assert_eq!(img.is_dark(12 + x, 12 + y), logo.is_dark(x, y), "({x}, {y})");
        }
    }
}
