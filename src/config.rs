//! Option structs and file-based configuration
//!
//! Every option struct has a `Default` and deserializes from TOML or JSON, with missing
//! fields taking their default values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::DataType;

/// Null/NaN policy and degrees of freedom for aggregations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateOptions {
    /// Drop NaN before reducing. Nulls are always dropped.
    pub skip_na: bool,
    /// Delta degrees of freedom used by `std`
    pub ddof: u32,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            skip_na: false,
            ddof: 1,
        }
    }
}

impl AggregateOptions {
    pub fn with_skip_na(mut self, skip_na: bool) -> Self {
        self.skip_na = skip_na;
        self
    }

    pub fn with_ddof(mut self, ddof: u32) -> Self {
        self.ddof = ddof;
        self
    }
}

/// Options for turning text columns into typed columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Cells equal to one of these (after trimming) become null
    pub null_strings: Vec<String>,
    /// chrono format for dates, `%Y-%m-%d` when unset
    pub date_pattern: Option<String>,
    /// chrono format for date-times, ISO-8601 variants when unset
    pub date_time_pattern: Option<String>,
    /// Target types that are never tried
    pub skip_types: Vec<DataType>,
    pub trim: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            null_strings: ["", "null", "NULL", "NA", "N/A"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            date_pattern: None,
            date_time_pattern: None,
            skip_types: Vec::new(),
            trim: true,
        }
    }
}

/// Crate-wide defaults loadable from a configuration file
///
/// ```toml
/// [aggregation]
/// skip_na = true
/// ddof = 0
///
/// [parser]
/// null_strings = ["", "-"]
/// date_pattern = "%d.%m.%Y"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub aggregation: AggregateOptions,
    pub parser: ParserOptions,
}

impl FrameConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Loads a `.json` file as JSON and anything else as TOML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&text)?
        } else {
            Self::from_toml_str(&text)?
        };
        log::debug!("loaded frame configuration from {}", path.display());
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }
}
