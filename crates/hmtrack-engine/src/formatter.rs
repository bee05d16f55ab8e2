//! Presentation formatting of the enriched maintenance log
//!
//! Projects the table onto the dashboard columns, renders the numeric columns
//! without decimals and tiers every remaining-hours cell.

use hmtrack_core::{
    columns, Cell, DisplayCell, DisplayColumn, DisplayModel, DisplayRow, ServiceCategory, Table,
    Thresholds,
};

use crate::calculator::EnrichedTable;

/// Dashboard formatter
#[derive(Clone, Debug)]
pub struct Formatter {
    pub thresholds: Thresholds,
    /// Unit identifier column of the maintenance log
    pub unit_column: String,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            unit_column: columns::UNIT.to_string(),
        }
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn unit_column(mut self, name: impl Into<String>) -> Self {
        self.unit_column = name.into();
        self
    }

    /// Display columns: unit, status, estimate, then the four remaining-hours columns
    pub fn columns(&self) -> Vec<DisplayColumn> {
        let mut out = vec![
            DisplayColumn {
                name: self.unit_column.clone(),
                numeric: false,
                classified: false,
            },
            DisplayColumn {
                name: columns::STATUS.to_string(),
                numeric: false,
                classified: false,
            },
            DisplayColumn {
                name: columns::ESTIMATE.to_string(),
                numeric: true,
                classified: false,
            },
        ];
        out.extend(ServiceCategory::ALL.iter().map(|c| DisplayColumn {
            name: c.remaining_column().to_string(),
            numeric: true,
            classified: true,
        }));
        out
    }

    /// Format an enriched maintenance log
    pub fn format(&self, enriched: &EnrichedTable) -> DisplayModel {
        self.format_table(&enriched.to_table())
    }

    /// Format any table carrying the dashboard columns
    ///
    /// Absent columns yield empty cells. Numeric columns whose cell is not a
    /// number keep the raw text, and such cells are never highlighted.
    pub fn format_table(&self, table: &Table) -> DisplayModel {
        let columns = self.columns();
        let indices: Vec<Option<usize>> = columns.iter().map(|c| table.column_index(&c.name)).collect();

        let rows = table
            .rows()
            .iter()
            .map(|cells| DisplayRow {
                cells: columns
                    .iter()
                    .zip(&indices)
                    .map(|(column, index)| match index.and_then(|i| cells.get(i)) {
                        Some(cell) => self.format_cell(column, cell),
                        None => self.format_cell(column, &Cell::Empty),
                    })
                    .collect(),
            })
            .collect();

        DisplayModel { columns, rows }
    }

    fn format_cell(&self, column: &DisplayColumn, cell: &Cell) -> DisplayCell {
        if !column.numeric {
            return DisplayCell::text(cell.to_string());
        }
        let value = cell.as_number();
        DisplayCell {
            text: value.map_or_else(|| cell.to_string(), format_hours),
            value,
            tier: column.classified.then(|| self.thresholds.classify(value)),
        }
    }
}

/// Zero-decimal rendering of an hour value
pub fn format_hours(value: f64) -> String {
    format!("{:.0}", value)
}
