//! Directory of Sheets-style JSON snapshots
//!
//! Table `name` lives in `<dir>/<name>.json` and has the shape of a Sheets
//! values response (`{"values": [[header...], [row...], ...]}`), so a
//! downloaded API response can be dropped in unchanged.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use hmtrack_core::{DataSource, SourceError, Table};
use tracing::debug;

use crate::ValueRange;

#[derive(Clone, Debug)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn table_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{table}.json"))
    }
}

impl DataSource for JsonDirSource {
    fn read(&mut self, table: &str) -> Result<Table, SourceError> {
        let path = self.table_path(table);
        let input = match std::fs::read_to_string(&path) {
            Ok(input) => input,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SourceError::TableNotFound(table.to_string()))
            }
            Err(e) => return Err(SourceError::unavailable(table, e)),
        };
        let range: ValueRange =
            serde_json::from_str(&input).map_err(|e| SourceError::malformed(table, e))?;
        debug!(path = %path.display(), rows = range.values.len(), "json table read");
        Ok(range.into_table())
    }

    fn write(&mut self, table: &str, data: &Table) -> Result<(), SourceError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.table_path(table);
        let json = serde_json::to_string_pretty(&ValueRange::from_table(table, data))
            .map_err(|e| SourceError::malformed(table, e))?;
        std::fs::write(&path, json)?;
        debug!(path = %path.display(), rows = data.row_count(), "json table written");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("json directory {}", self.dir.display())
    }
}
