//! `woodtag.json` configuration.
//!
//! Every section is optional and every struct rejects unknown keys, so a
//! typo in the file is an error rather than a silently ignored setting. A
//! style given in the file replaces the built-in style as a whole.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use woodtag_core::{DEFAULT_DPMM, MatrixCodeStyle, QrCodeStyle, TextStyle};
use woodtag_print_client::{NetworkPrinter, PrinterConfig, PrinterTimeouts};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct AppConfig {
    pub(crate) label: LabelConfig,
    pub(crate) printer: PrinterSettings,
    pub(crate) layout: LayoutConfig,
}

/// Physical label stock.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct LabelConfig {
    /// Millimetres.
    pub(crate) height: f64,
    /// Millimetres.
    pub(crate) width: f64,
    /// Dots per millimetre (8 for 203 dpi, 12 for 300 dpi).
    pub(crate) dpmm: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            height: 17.0,
            width: 38.0,
            dpmm: DEFAULT_DPMM,
        }
    }
}

/// Where labels go.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PrinterSettings {
    /// Destination to bind. `None` takes the first one listed.
    pub(crate) name: Option<String>,
    /// List local CUPS queues.
    pub(crate) cups: bool,
    /// Raw TCP printers, listed after the CUPS queues.
    pub(crate) network: Vec<NetworkPrinter>,
    pub(crate) connect_timeout_ms: u64,
    pub(crate) write_timeout_ms: u64,
}

impl Default for PrinterSettings {
    fn default() -> Self {
        Self {
            name: None,
            cups: true,
            network: Vec::new(),
            connect_timeout_ms: 5_000,
            write_timeout_ms: 30_000,
        }
    }
}

impl PrinterSettings {
    pub(crate) fn transport(&self) -> PrinterConfig {
        PrinterConfig::with_timeouts(PrinterTimeouts::new(
            Duration::from_millis(self.connect_timeout_ms),
            Duration::from_millis(self.write_timeout_ms),
        ))
    }
}

/// Styles of the wood tag fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct LayoutConfig {
    /// The item id in large print.
    pub(crate) heading: TextStyle,
    /// Location, dimensions, weight and density lines.
    pub(crate) detail: TextStyle,
    /// Data Matrix carrying the item id.
    pub(crate) matrix: MatrixCodeStyle,
    /// QR code carrying the item URL.
    pub(crate) qr: QrCodeStyle,
    /// URL template for the QR code; `{id}` is replaced by the item id.
    /// No QR code is printed when unset.
    pub(crate) item_url: Option<String>,
    /// Monochrome PNG printed one pixel per dot in the top-right corner.
    /// A relative path is taken from the config file's directory.
    pub(crate) logo: Option<PathBuf>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            heading: TextStyle {
                line_width: Some(25.0),
                ..TextStyle::sized(5.0, 3.0)
            },
            detail: TextStyle {
                line_width: Some(25.0),
                ..TextStyle::sized(2.0, 1.5)
            },
            matrix: MatrixCodeStyle::with_module_height(10),
            qr: QrCodeStyle::with_magnification(2),
            item_url: None,
            logo: None,
        }
    }
}

impl AppConfig {
    /// Read `path`, or use the built-in defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config: Self = serde_json::from_str(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        if let (Some(logo), Some(dir)) = (&config.layout.logo, path.parent()) {
            config.layout.logo = Some(dir.join(logo));
        }
        config
            .check()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if self.layout.logo.is_some() && self.layout.item_url.is_some() {
            bail!("layout.logo and layout.item_url both use the top-right corner; set only one");
        }
        Ok(())
    }
}
