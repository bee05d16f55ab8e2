//! In-process table store

use std::collections::HashMap;

use hmtrack_core::{DataSource, SourceError, Table};

/// Tables held in memory; reading an unknown table fails
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    tables: HashMap<String, Table>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, name: impl Into<String>, table: Table) -> Self {
        self.insert(name, table);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, table: Table) {
        self.tables.insert(name.into(), table);
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }
}

impl DataSource for MemorySource {
    fn read(&mut self, table: &str) -> Result<Table, SourceError> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| SourceError::TableNotFound(table.to_string()))
    }

    fn write(&mut self, table: &str, data: &Table) -> Result<(), SourceError> {
        self.insert(table, data.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("memory ({} tables)", self.tables.len())
    }
}
