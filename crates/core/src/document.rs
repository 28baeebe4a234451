//! One physical label: typed placement over a drawing surface.

use tracing::debug;

use crate::capacity::CodeSpec;
use crate::element::{Element, ElementKind, Symbology};
use crate::encode::{MarkupEncoder, PageSetup, ZplEncoder};
use crate::error::LabelError;
use crate::graphic::Bitmap;
use crate::style::{
    BarcodeStyle, LinearSymbology, MAX_DOTS, MatrixCodeStyle, QrCodeStyle, TextStyle,
};
use crate::surface::{DrawingSurface, Point};

/// Default resolution: 12 dots/mm (300 dpi).
pub const DEFAULT_DPMM: f64 = 12.0;

/// A label under construction.
///
/// Sized once at construction. Placements are validated before anything is
/// appended, so a failed call leaves the document exactly as it was.
/// [`LabelDocument::serialize`] is a pure function of the placed elements.
///
/// ```
/// use woodtag_core::{BarcodeStyle, LabelDocument, TextStyle};
///
/// let mut label = LabelDocument::new(17.0, 38.0)?;
/// label.add_text(2.0, 2.0, "EXAMPLE #0001", &TextStyle::default())?;
/// label.add_barcode(3.0, 6.0, "https://example/wood/1", &BarcodeStyle::with_height(30))?;
/// let zpl = label.serialize();
/// assert!(zpl.contains("^FO24,24"));
/// # Ok::<(), woodtag_core::LabelError>(())
/// ```
pub struct LabelDocument {
    page: PageSetup,
    surface: DrawingSurface,
    encoder: Box<dyn MarkupEncoder>,
}

impl std::fmt::Debug for LabelDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelDocument")
            .field("page", &self.page)
            .field("surface", &self.surface)
            .finish_non_exhaustive()
    }
}

impl LabelDocument {
    /// A blank label `height` x `width` millimetres at [`DEFAULT_DPMM`],
    /// encoded as ZPL.
    pub fn new(height: f64, width: f64) -> Result<Self, LabelError> {
        check_positive("height", height)?;
        check_positive("width", width)?;
        let page = PageSetup {
            height,
            width,
            dpmm: DEFAULT_DPMM,
        };
        check_page(&page)?;
        Ok(Self {
            page,
            surface: DrawingSurface::new(),
            encoder: Box::new(ZplEncoder::new()),
        })
    }

    /// Use a different printer resolution in dots per millimetre.
    ///
    /// Fails when the label would be less than one dot, or more than
    /// [`MAX_DOTS`], along either side at that resolution.
    pub fn with_resolution(mut self, dpmm: f64) -> Result<Self, LabelError> {
        check_positive("resolution", dpmm)?;
        let page = PageSetup { dpmm, ..self.page };
        check_page(&page)?;
        self.page = page;
        Ok(self)
    }

    /// Use a different markup encoder (and its capacity limits).
    pub fn with_encoder(mut self, encoder: Box<dyn MarkupEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    // ── Placement ───────────────────────────────────────────────────────

    /// Place a text field at (`x`, `y`).
    ///
    /// Every placement takes its origin the same way: a coordinate given as
    /// `None` keeps the cursor's value on that axis, so a placement with
    /// both omitted stacks on the previous origin.
    pub fn add_text(
        &mut self,
        x: impl Into<Option<f64>>,
        y: impl Into<Option<f64>>,
        content: &str,
        style: &TextStyle,
    ) -> Result<&Element, LabelError> {
        style.validate()?;
        self.place(
            x.into(),
            y.into(),
            ElementKind::Text {
                content: content.to_string(),
                style: style.clone(),
            },
        )
    }

    /// Place a linear barcode at (`x`, `y`).
    pub fn add_barcode(
        &mut self,
        x: impl Into<Option<f64>>,
        y: impl Into<Option<f64>>,
        content: &str,
        style: &BarcodeStyle,
    ) -> Result<&Element, LabelError> {
        style.validate()?;
        check_linear_content(style.symbology, content)?;
        self.check_capacity(
            CodeSpec::Linear(style.symbology),
            Symbology::Linear(style.symbology),
            style.symbology.to_string(),
            content,
        )?;
        self.place(
            x.into(),
            y.into(),
            ElementKind::LinearBarcode {
                content: content.to_string(),
                style: style.clone(),
            },
        )
    }

    /// Place a Data Matrix symbol at (`x`, `y`).
    ///
    /// Fails with [`LabelError::EncodingCapacity`] when `content` exceeds
    /// what the chosen quality level can hold.
    pub fn add_matrix_code(
        &mut self,
        x: impl Into<Option<f64>>,
        y: impl Into<Option<f64>>,
        content: &str,
        style: &MatrixCodeStyle,
    ) -> Result<&Element, LabelError> {
        style.validate()?;
        self.check_capacity(
            CodeSpec::Matrix(style.error_correction),
            Symbology::DataMatrix,
            style.error_correction.to_string(),
            content,
        )?;
        self.place(
            x.into(),
            y.into(),
            ElementKind::MatrixCode {
                content: content.to_string(),
                style: style.clone(),
            },
        )
    }

    /// Place a QR code at (`x`, `y`).
    ///
    /// Fails with [`LabelError::EncodingCapacity`] when `content` exceeds
    /// what the chosen error-correction level can hold.
    pub fn add_qr_code(
        &mut self,
        x: impl Into<Option<f64>>,
        y: impl Into<Option<f64>>,
        content: &str,
        style: &QrCodeStyle,
    ) -> Result<&Element, LabelError> {
        style.validate()?;
        self.check_capacity(
            CodeSpec::Qr(style.error_correction),
            Symbology::Qr,
            style.error_correction.to_string(),
            content,
        )?;
        self.place(
            x.into(),
            y.into(),
            ElementKind::QrCode {
                content: content.to_string(),
                style: style.clone(),
            },
        )
    }

    /// Place a monochrome graphic at (`x`, `y`), one bitmap bit per dot.
    pub fn add_graphic(
        &mut self,
        x: impl Into<Option<f64>>,
        y: impl Into<Option<f64>>,
        bitmap: &Bitmap,
    ) -> Result<&Element, LabelError> {
        self.place(
            x.into(),
            y.into(),
            ElementKind::Graphic {
                bitmap: bitmap.clone(),
            },
        )
    }

    /// Bracket one append between `set_origin` and `end_origin`.
    fn place(
        &mut self,
        x: Option<f64>,
        y: Option<f64>,
        kind: ElementKind,
    ) -> Result<&Element, LabelError> {
        let origin = self.surface.set_origin(x, y)?;
        debug!(kind = kind.name(), x = origin.x, y = origin.y, "placing element");
        let index = self.surface.len();
        self.surface.append(kind);
        self.surface.end_origin();
        Ok(&self.surface.elements()[index])
    }

    fn check_capacity(
        &self,
        code: CodeSpec,
        symbology: Symbology,
        level: String,
        content: &str,
    ) -> Result<(), LabelError> {
        if let Some(capacity) = self.encoder.limits().max_len(code, content)
            && content.len() > capacity
        {
            return Err(LabelError::EncodingCapacity {
                symbology,
                level,
                len: content.len(),
                capacity,
            });
        }
        Ok(())
    }

    // ── Output ──────────────────────────────────────────────────────────

    /// Encode the label. Elements appear in insertion order; calling this
    /// twice yields identical output.
    pub fn serialize(&self) -> String {
        self.encoder.encode(&self.page, self.surface.elements())
    }

    /// Render the serialized label into a bitmap for on-screen checks.
    ///
    /// Takes `&self`: a failed render never alters the document.
    #[cfg(feature = "preview")]
    pub fn preview(&self) -> Result<crate::preview::RasterImage, crate::error::PreviewError> {
        crate::preview::render(&self.serialize())
    }

    // ── Accessors ───────────────────────────────────────────────────────

    /// Label height in millimetres.
    pub fn height(&self) -> f64 {
        self.page.height
    }

    /// Label width in millimetres.
    pub fn width(&self) -> f64 {
        self.page.width
    }

    /// Page geometry and resolution.
    pub fn page(&self) -> &PageSetup {
        &self.page
    }

    /// Placed elements in paint order.
    pub fn elements(&self) -> &[Element] {
        self.surface.elements()
    }

    /// Origin the most recent placement used.
    pub fn cursor(&self) -> Point {
        self.surface.cursor()
    }
}

fn check_positive(what: &str, value: f64) -> Result<(), LabelError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LabelError::InvalidDimensions(format!(
            "{what} must be a positive number, got {value}"
        )))
    }
}

fn check_page(page: &PageSetup) -> Result<(), LabelError> {
    for (what, mm) in [("height", page.height), ("width", page.width)] {
        let dots = mm * page.dpmm;
        if dots.round() < 1.0 {
            return Err(LabelError::InvalidDimensions(format!(
                "{what} of {mm} mm is less than one dot at {} dots/mm",
                page.dpmm
            )));
        }
        if dots.round() > f64::from(MAX_DOTS) {
            return Err(LabelError::InvalidDimensions(format!(
                "{what} of {mm} mm exceeds {MAX_DOTS} dots at {} dots/mm",
                page.dpmm
            )));
        }
    }
    Ok(())
}

fn check_linear_content(symbology: LinearSymbology, content: &str) -> Result<(), LabelError> {
    let reject = |reason: String| LabelError::UnencodableContent {
        symbology: Symbology::Linear(symbology),
        reason,
    };
    if content.is_empty() {
        return Err(reject("content is empty".into()));
    }
    match symbology {
        LinearSymbology::Code128 => {
            if let Some(c) = content.chars().find(|c| !c.is_ascii()) {
                return Err(reject(format!("'{c}' is outside ASCII")));
            }
        }
        LinearSymbology::Code39 => {
            if let Some(c) = content.chars().find(|c| {
                !(c.is_ascii_digit()
                    || c.is_ascii_uppercase()
                    || matches!(c, '-' | '.' | ' ' | '$' | '/' | '+' | '%'))
            }) {
                return Err(reject(format!("'{c}' is not in the Code 39 character set")));
            }
        }
        LinearSymbology::UpcA => {
            if !content.chars().all(|c| c.is_ascii_digit()) {
                return Err(reject("UPC-A encodes digits only".into()));
            }
            if content.len() < 11 {
                return Err(reject(format!(
                    "UPC-A needs 11 or 12 digits, got {}",
                    content.len()
                )));
            }
        }
    }
    Ok(())
}
