//! Latest-reading estimation
//!
//! Walks the daily hour-meter history backwards to find each unit's most
//! recent valid reading and projects today's value from it.
//!
//! Rows are chronological (oldest first). For every unit the scan starts at
//! the last row and, within a row, inspects Shift 3, then Shift 2, then
//! Shift 1. The first cell holding a finite number wins; empty and
//! non-numeric cells are skipped. Units whose history has no valid reading
//! get no estimate.

use std::collections::BTreeMap;

use hmtrack_core::{Shift, ShiftSchema, Table, UnitId, DAILY_INCREMENT};
use serde::Serialize;
use tracing::debug;

/// Projected hour-meter value per unit; `None` when no reading was found
pub type Estimates = BTreeMap<UnitId, Option<f64>>;

/// The reading an estimate was projected from
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LatestReading {
    /// Hour-meter value as read
    pub value: f64,
    /// Row index in the history table
    pub row: usize,
    pub shift: Shift,
    /// Row label from the date column, when the history has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Latest-reading estimator
#[derive(Clone, Debug)]
pub struct Estimator {
    /// Hours added to the latest reading
    pub daily_increment: f64,
    /// Column used to label the row a reading came from
    pub date_column: Option<String>,
}

impl Default for Estimator {
    fn default() -> Self {
        Self {
            daily_increment: DAILY_INCREMENT,
            date_column: None,
        }
    }
}

impl Estimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hours added to the latest reading
    pub fn daily_increment(mut self, hours: f64) -> Self {
        self.daily_increment = hours;
        self
    }

    /// Label readings with the value of this history column
    pub fn date_column(mut self, name: impl Into<String>) -> Self {
        self.date_column = Some(name.into());
        self
    }

    /// Most recent valid reading of every unit in the history
    pub fn latest_readings(&self, history: &Table) -> BTreeMap<UnitId, Option<LatestReading>> {
        let schema = ShiftSchema::resolve(history.headers());
        let label_column = self
            .date_column
            .as_deref()
            .and_then(|name| history.column_index(name));

        schema
            .units()
            .map(|unit| {
                let reading = scan_unit(history, &schema, unit).map(|(row, shift, value)| {
                    LatestReading {
                        value,
                        row,
                        shift,
                        label: label_column
                            .and_then(|col| history.cell(row, col))
                            .filter(|cell| !cell.is_empty())
                            .map(ToString::to_string),
                    }
                });
                match &reading {
                    Some(r) => debug!(unit = %unit, row = r.row, shift = %r.shift, value = r.value, "latest reading"),
                    None => debug!(unit = %unit, "no valid reading in history"),
                }
                (unit.clone(), reading)
            })
            .collect()
    }

    /// Projected hour-meter value of every unit in the history
    pub fn estimate(&self, history: &Table) -> Estimates {
        self.project(&self.latest_readings(history))
    }

    /// Project today's value from already scanned readings
    pub fn project(&self, readings: &BTreeMap<UnitId, Option<LatestReading>>) -> Estimates {
        readings
            .iter()
            .map(|(unit, reading)| (unit.clone(), self.project_reading(reading.as_ref())))
            .collect()
    }

    /// Today's value projected from one reading
    pub fn project_reading(&self, reading: Option<&LatestReading>) -> Option<f64> {
        reading.map(|r| r.value + self.daily_increment)
    }
}

/// Estimate with the default daily increment
pub fn estimate(history: &Table) -> Estimates {
    Estimator::new().estimate(history)
}

/// Backward scan for one unit: `(row, shift, value)` of the first valid cell
fn scan_unit(history: &Table, schema: &ShiftSchema, unit: &str) -> Option<(usize, Shift, f64)> {
    history.rows().iter().enumerate().rev().find_map(|(row, cells)| {
        schema
            .scan_columns(unit)
            .find_map(|(shift, col)| cells.get(col).and_then(|c| c.as_number()).map(|v| (row, shift, v)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hmtrack_core::Cell;
    use pretty_assertions::assert_eq;

    fn history(headers: &[&str], rows: Vec<Vec<Cell>>) -> Table {
        Table::from_rows(headers.iter().map(|s| s.to_string()).collect(), rows)
    }

    fn n(v: f64) -> Cell {
        Cell::Number(v)
    }

    fn e() -> Cell {
        Cell::Empty
    }

    #[test]
    fn latest_row_wins_over_earlier_rows() {
        let table = history(
            &["A - Shift 1"],
            vec![vec![n(100.0)], vec![n(110.0)], vec![n(120.0)]],
        );
        assert_eq!(estimate(&table)["A"], Some(141.0));
    }

    #[test]
    fn shift_three_checked_before_shift_one() {
        let table = history(
            &["A - Shift 1", "A - Shift 2", "A - Shift 3"],
            vec![vec![n(100.0), n(108.0), n(116.0)]],
        );
        let readings = Estimator::new().latest_readings(&table);
        let reading = readings["A"].clone().unwrap();
        assert_eq!(reading.shift, Shift::Third);
        assert_eq!(reading.value, 116.0);
    }

    #[test]
    fn invalid_cells_fall_through_to_earlier_shift_and_row() {
        let table = history(
            &["A - Shift 1", "A - Shift 2", "A - Shift 3"],
            vec![
                vec![n(90.0), e(), e()],
                vec![Cell::from("-"), Cell::from("rusak"), e()],
            ],
        );
        let readings = Estimator::new().latest_readings(&table);
        let reading = readings["A"].clone().unwrap();
        assert_eq!((reading.row, reading.shift, reading.value), (0, Shift::First, 90.0));
    }

    #[test]
    fn reverse_scan_takes_most_recent_row_first() {
        // R5 carries a valid Shift 2 reading, so it wins over R3's Shift 3.
        let table = history(
            &["A - Shift 2", "A - Shift 3"],
            vec![
                vec![e(), e()],
                vec![n(3.0), e()],
                vec![e(), n(5.0)],
                vec![e(), e()],
                vec![n(7.0), e()],
            ],
        );
        assert_eq!(estimate(&table)["A"], Some(28.0));
    }

    #[test]
    fn reverse_scan_prefers_recent_row_over_later_shift() {
        // Without a reading in R5, R3's Shift 3 value is newer than R2's Shift 2.
        let table = history(
            &["A - Shift 2", "A - Shift 3"],
            vec![
                vec![e(), e()],
                vec![n(3.0), e()],
                vec![e(), n(5.0)],
                vec![e(), e()],
                vec![Cell::from("n/a"), e()],
            ],
        );
        let readings = Estimator::new().latest_readings(&table);
        let reading = readings["A"].clone().unwrap();
        assert_eq!((reading.row, reading.shift), (2, Shift::Third));
        assert_eq!(estimate(&table)["A"], Some(26.0));
    }

    #[test]
    fn unit_without_valid_reading_has_no_estimate() {
        let table = history(
            &["A - Shift 1", "B - Shift 1"],
            vec![vec![Cell::from("x"), n(10.0)], vec![e(), e()]],
        );
        let estimates = estimate(&table);
        assert_eq!(estimates["A"], None);
        assert_eq!(estimates["B"], Some(31.0));
    }

    #[test]
    fn unit_without_shift_columns_has_no_estimate() {
        let table = history(&["A - Keterangan"], vec![vec![n(500.0)]]);
        assert_eq!(estimate(&table), Estimates::from([("A".to_string(), None)]));
    }

    #[test]
    fn empty_history_yields_empty_mapping() {
        assert!(estimate(&Table::empty()).is_empty());
    }

    #[test]
    fn header_only_history_yields_none_per_unit() {
        let table = history(&["A - Shift 1", "B - Shift 3"], vec![]);
        let estimates = estimate(&table);
        assert_eq!(estimates.len(), 2);
        assert!(estimates.values().all(Option::is_none));
    }

    #[test]
    fn estimation_is_deterministic() {
        let table = history(
            &["Tanggal", "A - Shift 1", "B - Shift 2"],
            vec![
                vec![Cell::from("2024-05-01"), n(10.0), Cell::from("8")],
                vec![Cell::from("2024-05-02"), e(), n(12.0)],
            ],
        );
        let estimator = Estimator::new();
        assert_eq!(estimator.estimate(&table), estimator.estimate(&table));
        assert_eq!(estimator.latest_readings(&table), estimator.latest_readings(&table));
    }

    #[test]
    fn readings_are_labelled_with_date_column() {
        let table = history(
            &["Tanggal", "A - Shift 1"],
            vec![
                vec![Cell::from("2024-05-01"), n(10.0)],
                vec![Cell::from("2024-05-02"), e()],
            ],
        );
        let readings = Estimator::new().date_column("Tanggal").latest_readings(&table);
        assert_eq!(readings["A"].as_ref().unwrap().label.as_deref(), Some("2024-05-01"));

        let unlabelled = Estimator::new().date_column("Date").latest_readings(&table);
        assert_eq!(unlabelled["A"].as_ref().unwrap().label, None);
    }

    #[test]
    fn project_matches_estimate() {
        let table = history(
            &["A - Shift 1", "B - Shift 1"],
            vec![vec![n(100.0), Cell::from("-")]],
        );
        let estimator = Estimator::new().daily_increment(10.0);
        let readings = estimator.latest_readings(&table);
        let projected = estimator.project(&readings);
        assert_eq!(projected, estimator.estimate(&table));
        assert_eq!(projected["A"], Some(110.0));
        assert_eq!(projected["B"], None);
    }

    #[test]
    fn custom_daily_increment() {
        let table = history(&["A - Shift 1"], vec![vec![Cell::from("1000")]]);
        let estimates = Estimator::new().daily_increment(16.0).estimate(&table);
        assert_eq!(estimates["A"], Some(1016.0));
    }
}
