//! # hmtrack-source
//!
//! Data sources for the hmtrack dashboard.
//!
//! Every source implements [`hmtrack_core::DataSource`]:
//!
//! - [`MemorySource`]: in-process tables, for tests and embedding
//! - [`JsonDirSource`]: one Sheets-style `<table>.json` file per table
//! - [`CsvDirSource`]: one `<table>.csv` file per table
//! - [`SheetsSource`]: Google Sheets values API over HTTPS
//! - [`CachedSource`]: time-bounded read cache around any other source
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use hmtrack_core::{Cell, DataSource, Table};
//! use hmtrack_source::{CachedSource, MemorySource};
//!
//! let table = Table::from_rows(vec!["No. FK".into()], vec![vec![Cell::from("FK01")]]);
//! let mut source = CachedSource::new(MemorySource::new().with_table("data_oli", table))
//!     .ttl(Duration::from_secs(60));
//!
//! assert_eq!(source.read("data_oli").unwrap().row_count(), 1);
//! assert_eq!(source.read("data_oli").unwrap().row_count(), 1);
//! assert_eq!(source.stats().hits, 1);
//! ```

pub mod cache;
pub mod csv_dir;
pub mod json_dir;
pub mod memory;
pub mod sheets;

pub use cache::{CacheStats, CachedSource};
pub use csv_dir::CsvDirSource;
pub use json_dir::JsonDirSource;
pub use memory::MemorySource;
pub use sheets::SheetsSource;

use hmtrack_core::{Cell, Table};
use serde::{Deserialize, Serialize};

/// A block of spreadsheet values as exchanged with the Sheets API
///
/// `values` holds the header row first; the API omits it entirely for an
/// empty range.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<Cell>>,
}

impl ValueRange {
    /// Row-major values of a table, addressed to `range`
    pub fn from_table(range: impl Into<String>, table: &Table) -> Self {
        Self {
            range: Some(range.into()),
            major_dimension: Some("ROWS".to_string()),
            values: table.to_values(),
        }
    }

    pub fn into_table(self) -> Table {
        Table::from_values(self.values)
    }
}
