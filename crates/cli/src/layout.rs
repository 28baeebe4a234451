//! The wood tag: which field goes where.
//!
//! Positions are millimetres from the top-left corner of the default
//! 17 x 38 mm stock. Text sits in a 25 mm column on the left; the Data
//! Matrix and the optional QR code or logo fill the right-hand side.

use std::path::Path;

use anyhow::{Context, Result};
use woodtag_core::{Bitmap, LabelDocument, LabelError};

use crate::config::AppConfig;
use crate::item::WoodItem;

const TEXT_X: f64 = 3.0;
const LOCATION_Y: f64 = 2.0;
const DIMENSIONS_Y: f64 = 4.0;
const WEIGHT_Y: f64 = 6.0;
const DENSITY_Y: f64 = 8.0;
const ID_Y: f64 = 12.0;
const MATRIX_AT: (f64, f64) = (20.0, 7.0);
const QR_AT: (f64, f64) = (30.0, 2.0);
const LOGO_AT: (f64, f64) = QR_AT;

/// Read a logo PNG. Opaque pixels darker than mid-grey print.
pub(crate) fn load_logo(path: &Path) -> Result<Bitmap> {
    let pixels = image::open(path)
        .with_context(|| format!("failed to read logo {}", path.display()))?
        .to_luma_alpha8();
    Bitmap::from_fn(pixels.width(), pixels.height(), |x, y| {
        let [luma, alpha] = pixels.get_pixel(x, y).0;
        alpha >= 128 && luma < 128
    })
    .with_context(|| format!("unusable logo {}", path.display()))
}

/// Lay out `item` on a fresh label.
pub(crate) fn wood_tag(
    item: &WoodItem,
    config: &AppConfig,
    logo: Option<&Bitmap>,
) -> Result<LabelDocument, LabelError> {
    let styles = &config.layout;
    let mut label = LabelDocument::new(config.label.height, config.label.width)?
        .with_resolution(config.label.dpmm)?;
    let id = item.id();

    label.add_text(
        TEXT_X,
        LOCATION_Y,
        &format!("Location: {}", item.storage_location),
        &styles.detail,
    )?;
    label.add_text(
        TEXT_X,
        DIMENSIONS_Y,
        &format!("LxWxH: {}X{}X{}", item.length, item.width, item.height),
        &styles.detail,
    )?;
    label.add_text(
        TEXT_X,
        WEIGHT_Y,
        &format!("Weight (grams): {}", item.weight),
        &styles.detail,
    )?;
    label.add_text(
        TEXT_X,
        DENSITY_Y,
        &format!("Density: {}g/cm3", item.density),
        &styles.detail,
    )?;
    label.add_text(TEXT_X, ID_Y, &id, &styles.heading)?;

    label.add_matrix_code(MATRIX_AT.0, MATRIX_AT.1, &id, &styles.matrix)?;

    if let Some(url) = item_url(styles.item_url.as_deref(), &id) {
        label.add_qr_code(QR_AT.0, QR_AT.1, &url, &styles.qr)?;
    }
    if let Some(logo) = logo {
        label.add_graphic(LOGO_AT.0, LOGO_AT.1, logo)?;
    }

    Ok(label)
}

fn item_url(template: Option<&str>, id: &str) -> Option<String> {
    template.map(|t| t.replace("{id}", id))
}
