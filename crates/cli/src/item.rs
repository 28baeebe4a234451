//! Item records: the inventory attributes printed on a tag.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;

/// Raw text of an item record and where it came from.
#[derive(Debug)]
pub(crate) struct ItemSource {
    /// File path, or `<stdin>`.
    pub(crate) name: String,
    pub(crate) text: String,
}

impl ItemSource {
    /// Read `path`, or standard input when `path` is `-`.
    pub(crate) fn read(path: &str) -> Result<Self> {
        if path == "-" {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read item record from stdin")?;
            return Ok(Self {
                name: "<stdin>".into(),
                text,
            });
        }
        let text =
            fs::read_to_string(path).with_context(|| format!("failed to read item record {path}"))?;
        Ok(Self {
            name: path.to_string(),
            text,
        })
    }
}

/// A value shown as-is on the label: strings unquoted, numbers and
/// booleans in JSON notation, `null` or a missing key as nothing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub(crate) struct DisplayValue(Value);

impl DisplayValue {
    fn is_blank(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::Null => Ok(()),
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

/// One piece of residual wood.
///
/// Only the attributes the tag shows are named; anything else in the record
/// is kept in `other` and ignored by the layout.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WoodItem {
    pub(crate) id: DisplayValue,
    #[serde(default)]
    pub(crate) length: DisplayValue,
    #[serde(default)]
    pub(crate) width: DisplayValue,
    #[serde(default)]
    pub(crate) height: DisplayValue,
    #[serde(default)]
    pub(crate) weight: DisplayValue,
    #[serde(default)]
    pub(crate) density: DisplayValue,
    #[serde(default)]
    pub(crate) storage_location: DisplayValue,
    #[serde(flatten)]
    pub(crate) other: BTreeMap<String, Value>,
}

impl WoodItem {
    /// Deserialize a record. JSON errors are returned untouched so the
    /// caller can point at the offending position.
    pub(crate) fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Reject records that cannot produce a meaningful tag.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.id.is_blank() {
            bail!("item record has an empty id");
        }
        if matches!(self.id.0, Value::Array(_) | Value::Object(_)) {
            bail!("item id must be a string or a number");
        }
        Ok(())
    }

    /// The id as printed.
    pub(crate) fn id(&self) -> String {
        self.id.to_string()
    }
}
