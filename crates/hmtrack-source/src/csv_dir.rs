//! Directory of CSV exports
//!
//! Table `name` lives in `<dir>/<name>.csv`; the first record is the header.
//! Every field is read as text (numbers are recognised later, per cell), and
//! records may be ragged the way spreadsheet exports often are.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use hmtrack_core::{Cell, DataSource, SourceError, Table};
use tracing::debug;

#[derive(Clone, Debug)]
pub struct CsvDirSource {
    dir: PathBuf,
}

impl CsvDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn table_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{table}.csv"))
    }
}

impl DataSource for CsvDirSource {
    fn read(&mut self, table: &str) -> Result<Table, SourceError> {
        let path = self.table_path(table);
        let file = match std::fs::File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SourceError::TableNotFound(table.to_string()))
            }
            Err(e) => return Err(SourceError::unavailable(table, e)),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut values = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| SourceError::malformed(table, e))?;
            values.push(record.iter().map(Cell::from).collect());
        }
        debug!(path = %path.display(), rows = values.len(), "csv table read");
        Ok(Table::from_values(values))
    }

    fn write(&mut self, table: &str, data: &Table) -> Result<(), SourceError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.table_path(table);
        let mut writer = csv::Writer::from_path(&path).map_err(|e| SourceError::unavailable(table, e))?;
        for row in data.to_values() {
            writer
                .write_record(row.iter().map(ToString::to_string))
                .map_err(|e| SourceError::unavailable(table, e))?;
        }
        writer.flush()?;
        debug!(path = %path.display(), rows = data.row_count(), "csv table written");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("csv directory {}", self.dir.display())
    }
}
