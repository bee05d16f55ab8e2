//! # hmtrack-core
//!
//! Core domain model and traits for the hmtrack maintenance dashboard.
//!
//! This crate provides:
//! - Domain types: `Cell`, `Table`, `Shift`, `ServiceCategory`, `ShiftSchema`
//! - Display types: `Tier`, `Thresholds`, `DisplayModel`
//! - Core traits: `DataSource`, `Renderer`
//! - Error types and configuration
//!
//! ## Example
//!
//! ```rust
//! use hmtrack_core::{Cell, ShiftSchema, Shift, Table};
//!
//! let history = Table::from_rows(
//!     vec!["Tanggal".into(), "FK01 - Shift 1".into(), "FK01 - Shift 3".into()],
//!     vec![vec![Cell::from("2024-05-01"), Cell::from(1200.0), Cell::Empty]],
//! );
//!
//! let schema = ShiftSchema::resolve(history.headers());
//! assert_eq!(schema.column("FK01", Shift::First), Some(1));
//! assert_eq!(schema.column("FK01", Shift::Second), None);
//! ```

pub mod config;
pub mod display;
pub mod schema;
pub mod table;

pub use config::{ConfigError, DashboardConfig, EstimatorConfig, ServiceIntervals, SourceConfig, SourceKind, TableNames};
pub use display::{DisplayCell, DisplayColumn, DisplayModel, DisplayRow, Thresholds, Tier, TierCounts};
pub use schema::{ShiftSchema, UNIT_SEPARATOR};
pub use table::{Cell, Table};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Type Aliases & Constants
// ============================================================================

/// Equipment unit identifier (e.g. a forklift number such as `FK01`)
pub type UnitId = String;

/// Hours added to the latest reading to project today's hour-meter value
pub const DAILY_INCREMENT: f64 = 21.0;

/// Well-known column names of the maintenance spreadsheets
pub mod columns {
    /// Unit identifier column of the maintenance log
    pub const UNIT: &str = "No. FK";
    /// Operational status column of the maintenance log
    pub const STATUS: &str = "Status";
    /// Joined-in projected hour-meter value
    pub const ESTIMATE: &str = "Estimasi HM Hari Ini";
    /// Date column of the daily hour-meter history
    pub const DATE: &str = "Tanggal";
}

// ============================================================================
// Shift
// ============================================================================

/// One of the three daily operating periods
///
/// Serializes as its number, like the column label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub enum Shift {
    First,
    Second,
    Third,
}

impl Shift {
    /// Order in which shifts of the same day are inspected: latest first
    pub const SCAN_ORDER: [Shift; 3] = [Shift::Third, Shift::Second, Shift::First];

    pub fn number(self) -> u8 {
        match self {
            Shift::First => 1,
            Shift::Second => 2,
            Shift::Third => 3,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Shift::First),
            2 => Some(Shift::Second),
            3 => Some(Shift::Third),
            _ => None,
        }
    }

    pub(crate) fn index(self) -> usize {
        usize::from(self.number() - 1)
    }
}

impl From<Shift> for u8 {
    fn from(shift: Shift) -> Self {
        shift.number()
    }
}

impl std::fmt::Display for Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Shift {}", self.number())
    }
}

// ============================================================================
// Service Categories
// ============================================================================

/// Oil service tracked per unit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    EngineOil,
    HydraulicOil,
    TransmissionOil,
    DifferentialOil,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 4] = [
        ServiceCategory::EngineOil,
        ServiceCategory::HydraulicOil,
        ServiceCategory::TransmissionOil,
        ServiceCategory::DifferentialOil,
    ];

    /// Hours between two services of this category
    pub fn default_interval(self) -> f64 {
        match self {
            ServiceCategory::EngineOil => 250.0,
            ServiceCategory::HydraulicOil => 3000.0,
            ServiceCategory::TransmissionOil | ServiceCategory::DifferentialOil => 2500.0,
        }
    }

    /// Maintenance-log column holding the hour-meter reading at the last service
    pub fn last_service_column(self) -> &'static str {
        match self {
            ServiceCategory::EngineOil => "HM Terakhir Ganti Oli mesin",
            ServiceCategory::HydraulicOil => "HM Terakhir Ganti Oli Hidrolik",
            ServiceCategory::TransmissionOil => "HM Terakhir Saat Ganti Oli Transmisi",
            ServiceCategory::DifferentialOil => "HM Terakhir Saat Ganti Oli Gardan",
        }
    }

    /// Derived column holding the hours left before the next service
    pub fn remaining_column(self) -> &'static str {
        match self {
            ServiceCategory::EngineOil => "Sisa HM Ganti Oli mesin",
            ServiceCategory::HydraulicOil => "Sisa HM Ganti Oli Hidrolik",
            ServiceCategory::TransmissionOil => "Sisa HM Ganti Oli Transmisi",
            ServiceCategory::DifferentialOil => "Sisa HM Ganti Oli Gardan",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceCategory::EngineOil => "engine oil",
            ServiceCategory::HydraulicOil => "hydraulic oil",
            ServiceCategory::TransmissionOil => "transmission oil",
            ServiceCategory::DifferentialOil => "differential oil",
        }
    }

    /// Position in [`ServiceCategory::ALL`]
    pub fn index(self) -> usize {
        match self {
            ServiceCategory::EngineOil => 0,
            ServiceCategory::HydraulicOil => 1,
            ServiceCategory::TransmissionOil => 2,
            ServiceCategory::DifferentialOil => 3,
        }
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Named-table storage the dashboard reads from and writes back to
///
/// Implementations report failures as [`SourceError`]; turning a failed read
/// into an empty table is the caller's policy, not the source's.
pub trait DataSource {
    /// Read a whole table, header row first
    fn read(&mut self, table: &str) -> Result<Table, SourceError>;

    /// Replace every row of a table (clear, then write header and rows)
    fn write(&mut self, table: &str, data: &Table) -> Result<(), SourceError>;

    /// Short human-readable description for logs
    fn describe(&self) -> String {
        "data source".to_string()
    }
}

impl<S: DataSource + ?Sized> DataSource for Box<S> {
    fn read(&mut self, table: &str) -> Result<Table, SourceError> {
        (**self).read(table)
    }

    fn write(&mut self, table: &str, data: &Table) -> Result<(), SourceError> {
        (**self).write(table, data)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render a display model to the output format
    fn render(&self, model: &DisplayModel) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Data source error
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Source unavailable for table '{table}': {message}")]
    Unavailable { table: String, message: String },

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Malformed table '{table}': {message}")]
    Malformed { table: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SourceError {
    pub fn unavailable(table: impl Into<String>, message: impl ToString) -> Self {
        SourceError::Unavailable {
            table: table.into(),
            message: message.to_string(),
        }
    }

    pub fn malformed(table: impl Into<String>, message: impl ToString) -> Self {
        SourceError::Malformed {
            table: table.into(),
            message: message.to_string(),
        }
    }
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================
