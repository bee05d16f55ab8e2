//! Tabular snapshots read from a data source
//!
//! A [`Table`] is a header row plus rows of [`Cell`]s. Every row has exactly
//! as many cells as the header: spreadsheet APIs drop trailing empty cells, so
//! short rows are padded when the table is built and over-long rows are cut.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

// ============================================================================
// Cell
// ============================================================================

/// A single spreadsheet value
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Cell {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Build a cell from raw text, mapping the empty string to [`Cell::Empty`]
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(text)
        }
    }

    /// Numeric value of the cell, if it holds a finite number
    ///
    /// Text is trimmed and parsed; anything that does not parse, or parses to
    /// an infinite or NaN value, yields `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Empty => None,
            Cell::Number(n) => Some(*n).filter(|n| n.is_finite()),
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::from_text(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::from_text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Cell::Empty, Cell::Number)
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Empty => serializer.serialize_none(),
            Cell::Number(n) => serializer.serialize_f64(*n),
            Cell::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CellVisitor)
    }
}

struct CellVisitor;

impl<'de> Visitor<'de> for CellVisitor {
    type Value = Cell;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, number, boolean or null cell value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Cell, E> {
        Ok(Cell::Empty)
    }

    fn visit_none<E: de::Error>(self) -> Result<Cell, E> {
        Ok(Cell::Empty)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Cell, E> {
        Ok(Cell::Text(if v { "TRUE" } else { "FALSE" }.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Cell, E> {
        Ok(Cell::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Cell, E> {
        Ok(Cell::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Cell, E> {
        Ok(Cell::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Cell, E> {
        Ok(Cell::from_text(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Cell, E> {
        Ok(Cell::from_text(v))
    }
}

// ============================================================================
// Table
// ============================================================================

/// Header row plus equally wide rows of cells
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create a table with the given header and no rows
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// The table substituted when a source cannot be read
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a table from a header and rows, normalizing row widths
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let mut table = Self::new(headers);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    /// Create a table from spreadsheet values where the first row is the header
    pub fn from_values(values: Vec<Vec<Cell>>) -> Self {
        let mut values = values.into_iter();
        match values.next() {
            Some(header) => {
                let headers = header.iter().map(ToString::to_string).collect();
                Self::from_rows(headers, values.collect())
            }
            None => Self::empty(),
        }
    }

    /// Spreadsheet values: header row first, then every data row
    pub fn to_values(&self) -> Vec<Vec<Cell>> {
        if self.headers.is_empty() {
            return Vec::new();
        }
        let header = self.headers.iter().map(|h| Cell::Text(h.clone())).collect();
        std::iter::once(header)
            .chain(self.rows.iter().cloned())
            .collect()
    }

    /// Append a row, padding or truncating it to the header width
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        let width = self.headers.len();
        if row.len() > width {
            tracing::warn!(
                cells = row.len(),
                columns = width,
                "row wider than header, extra cells dropped"
            );
            row.truncate(width);
        }
        row.resize(width, Cell::Empty);
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// True when the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first column with the given name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Cell at `row` in the column named `name`
    pub fn value(&self, row: usize, name: &str) -> Option<&Cell> {
        self.column_index(name).and_then(|col| self.cell(row, col))
    }

    /// Set a column's values, replacing it if present or appending it otherwise
    ///
    /// `values` is padded with empty cells (or truncated) to the row count.
    pub fn with_column(mut self, name: impl Into<String>, mut values: Vec<Cell>) -> Self {
        let name = name.into();
        values.resize(self.rows.len(), Cell::Empty);
        match self.column_index(&name) {
            Some(col) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[col] = value;
                }
            }
            None => {
                self.headers.push(name);
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn cell_number_parsing() {
        assert_eq!(Cell::from("1234").as_number(), Some(1234.0));
        assert_eq!(Cell::from(" 12.5 ").as_number(), Some(12.5));
        assert_eq!(Cell::from(7.0).as_number(), Some(7.0));
        assert_eq!(Cell::from("rusak").as_number(), None);
        assert_eq!(Cell::from("1,234").as_number(), None);
        assert_eq!(Cell::Empty.as_number(), None);
    }

    #[test]
    fn cell_rejects_non_finite_numbers() {
        assert_eq!(Cell::from("inf").as_number(), None);
        assert_eq!(Cell::from("NaN").as_number(), None);
        assert_eq!(Cell::Number(f64::INFINITY).as_number(), None);
    }

    #[test]
    fn empty_string_is_empty_cell() {
        assert!(Cell::from("").is_empty());
        assert_eq!(Cell::from(None).to_string(), "");
    }

    #[test]
    fn cell_json_shapes() {
        let cells: Vec<Cell> = serde_json::from_str(r#"["FK01", 12, 3.5, null, true, ""]"#).unwrap();
        assert_eq!(
            cells,
            vec![
                Cell::Text("FK01".into()),
                Cell::Number(12.0),
                Cell::Number(3.5),
                Cell::Empty,
                Cell::Text("TRUE".into()),
                Cell::Empty,
            ]
        );
        let json = serde_json::to_string(&vec![Cell::from("a"), Cell::Empty]).unwrap();
        assert_eq!(json, r#"["a",null]"#);
    }

    #[test]
    fn short_rows_are_padded_and_long_rows_truncated() {
        let table = Table::from_rows(
            headers(&["a", "b", "c"]),
            vec![
                vec![Cell::from("1")],
                vec![Cell::from("1"), Cell::from("2"), Cell::from("3"), Cell::from("4")],
            ],
        );
        assert_eq!(table.rows()[0].len(), 3);
        assert!(table.rows()[0][2].is_empty());
        assert_eq!(table.rows()[1].len(), 3);
        assert_eq!(table.rows()[1][2], Cell::from("3"));
    }

    #[test]
    fn from_values_uses_first_row_as_header() {
        let table = Table::from_values(vec![
            vec![Cell::from("No. FK"), Cell::from("Status")],
            vec![Cell::from("FK01"), Cell::from("Ready")],
        ]);
        assert_eq!(table.headers(), &headers(&["No. FK", "Status"])[..]);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.value(0, "Status"), Some(&Cell::from("Ready")));
    }

    #[test]
    fn from_values_of_nothing_is_empty() {
        let table = Table::from_values(Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 0);
        assert!(table.to_values().is_empty());
    }

    #[test]
    fn to_values_puts_header_first() {
        let table = Table::from_rows(headers(&["x"]), vec![vec![Cell::from(1.0)]]);
        assert_eq!(
            table.to_values(),
            vec![vec![Cell::from("x")], vec![Cell::Number(1.0)]]
        );
    }

    #[test]
    fn with_column_appends_and_replaces() {
        let table = Table::from_rows(
            headers(&["unit"]),
            vec![vec![Cell::from("FK01")], vec![Cell::from("FK02")]],
        );
        let table = table.with_column("hm", vec![Cell::from(10.0)]);
        assert_eq!(table.headers(), &headers(&["unit", "hm"])[..]);
        assert_eq!(table.value(0, "hm"), Some(&Cell::Number(10.0)));
        assert_eq!(table.value(1, "hm"), Some(&Cell::Empty));

        let table = table.with_column("unit", vec![Cell::from("A"), Cell::from("B")]);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.value(1, "unit"), Some(&Cell::from("B")));
    }
}
