//! Dashboard configuration
//!
//! Loaded from a TOML file; every section and field is optional and falls
//! back to the built-in defaults.
//!
//! ```rust
//! use hmtrack_core::{DashboardConfig, SourceKind};
//!
//! let config = DashboardConfig::from_toml_str(r#"
//! [source]
//! kind = "csv-dir"
//! data_dir = "exports"
//!
//! [thresholds]
//! critical = 50
//! "#).unwrap();
//!
//! assert_eq!(config.source.kind, SourceKind::CsvDir);
//! assert_eq!(config.thresholds.critical, 50.0);
//! assert_eq!(config.thresholds.warning, 147.0);
//! assert_eq!(config.tables.hm_harian, "HM_Harian");
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::display::Thresholds;
use crate::{columns, ServiceCategory, DAILY_INCREMENT};

/// Configuration loading error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Complete dashboard configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub source: SourceConfig,
    pub tables: TableNames,
    pub estimator: EstimatorConfig,
    pub service: ServiceIntervals,
    pub thresholds: Thresholds,
}

impl DashboardConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&input)
    }
}

/// Kind of backing store for the dashboard tables
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// One Sheets-style `<table>.json` file per table
    #[default]
    JsonDir,
    /// One `<table>.csv` file per table
    CsvDir,
    /// Google Sheets REST API
    Sheets,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// Directory of the file-based sources
    pub data_dir: PathBuf,
    /// Spreadsheet document identifier (Sheets source)
    pub spreadsheet_id: Option<String>,
    /// Bearer token for the Sheets API; `HMTRACK_SHEETS_TOKEN` when unset
    pub token: Option<String>,
    /// Base URL of the Sheets API
    pub api_base: String,
    /// How long a read stays cached
    pub cache_ttl_secs: u64,
}

impl SourceConfig {
    pub const DEFAULT_CACHE_TTL_SECS: u64 = 8 * 60 * 60;
    pub const DEFAULT_API_BASE: &'static str = "https://sheets.googleapis.com";
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            data_dir: PathBuf::from("data"),
            spreadsheet_id: None,
            token: None,
            api_base: Self::DEFAULT_API_BASE.to_string(),
            cache_ttl_secs: Self::DEFAULT_CACHE_TTL_SECS,
        }
    }
}

/// Names of the logical tables in the spreadsheet
///
/// Only `hm_harian` and `data_oli` feed the dashboard; the other two are
/// carried so every table of the document can be addressed by the CLI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableNames {
    pub data_spk: String,
    pub hm_harian: String,
    pub data_oli: String,
    pub penggunaan_forklift: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            data_spk: "data_spk".into(),
            hm_harian: "HM_Harian".into(),
            data_oli: "data_oli".into(),
            penggunaan_forklift: "penggunaan_forklift".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Hours added to the latest reading
    pub daily_increment: f64,
    /// History column labelling each row (usually the date)
    pub date_column: String,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            daily_increment: DAILY_INCREMENT,
            date_column: columns::DATE.to_string(),
        }
    }
}

/// Service interval in hours per category
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceIntervals {
    pub engine_oil: f64,
    pub hydraulic_oil: f64,
    pub transmission_oil: f64,
    pub differential_oil: f64,
}

impl ServiceIntervals {
    pub fn interval(&self, category: ServiceCategory) -> f64 {
        match category {
            ServiceCategory::EngineOil => self.engine_oil,
            ServiceCategory::HydraulicOil => self.hydraulic_oil,
            ServiceCategory::TransmissionOil => self.transmission_oil,
            ServiceCategory::DifferentialOil => self.differential_oil,
        }
    }
}

impl Default for ServiceIntervals {
    fn default() -> Self {
        Self {
            engine_oil: ServiceCategory::EngineOil.default_interval(),
            hydraulic_oil: ServiceCategory::HydraulicOil.default_interval(),
            transmission_oil: ServiceCategory::TransmissionOil.default_interval(),
            differential_oil: ServiceCategory::DifferentialOil.default_interval(),
        }
    }
}
