//! Remaining-hours calculation for the oil services
//!
//! Joins the estimates into the maintenance log and computes, per service
//! category, `last_service + interval - estimate`.
//!
//! Inputs that are missing or not numeric (including a unit without an
//! estimate) are taken as 0. That keeps every row computable but produces
//! large, meaningless "remaining" values, so each row also records which of
//! its inputs were defaulted.

use hmtrack_core::{columns, Cell, ServiceCategory, ServiceIntervals, Table};
use serde::Serialize;
use tracing::debug;

use crate::estimator::Estimates;

/// An input of the remaining-hours formula
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingField {
    /// No estimate for the unit
    Estimate,
    /// Last-service reading of a category is absent or not numeric
    LastService(ServiceCategory),
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingField::Estimate => f.write_str(columns::ESTIMATE),
            MissingField::LastService(category) => f.write_str(category.last_service_column()),
        }
    }
}

/// One maintenance-log row with its derived values
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnrichedRow {
    /// Row index in the maintenance log
    pub source_row: usize,
    /// Unit identifier, when the log has one for this row
    pub unit: Option<String>,
    /// Projected hour-meter value (0 when unknown)
    pub estimate: f64,
    /// Last-service readings indexed by [`ServiceCategory::index`]
    pub last_service: [f64; 4],
    /// Remaining hours indexed by [`ServiceCategory::index`]
    pub remaining: [f64; 4],
    /// Inputs that were defaulted to 0
    pub missing: Vec<MissingField>,
}

impl EnrichedRow {
    pub fn last_service(&self, category: ServiceCategory) -> f64 {
        self.last_service[category.index()]
    }

    pub fn remaining(&self, category: ServiceCategory) -> f64 {
        self.remaining[category.index()]
    }

    /// Whether any input of this row was defaulted to 0
    pub fn had_missing_data(&self) -> bool {
        !self.missing.is_empty()
    }
}

/// The maintenance log together with its derived rows
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnrichedTable {
    log: Table,
    rows: Vec<EnrichedRow>,
}

impl EnrichedTable {
    pub fn rows(&self) -> &[EnrichedRow] {
        &self.rows
    }

    /// The maintenance log as read
    pub fn log(&self) -> &Table {
        &self.log
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows where at least one input was defaulted to 0
    pub fn rows_with_missing_data(&self) -> impl Iterator<Item = &EnrichedRow> {
        self.rows.iter().filter(|r| r.had_missing_data())
    }

    /// The augmented maintenance log
    ///
    /// Original columns keep their position; the last-service columns hold the
    /// coerced numbers; the estimate and the four remaining-hours columns are
    /// set (appended when the log does not have them yet).
    pub fn to_table(&self) -> Table {
        let numbers = |f: &dyn Fn(&EnrichedRow) -> f64| -> Vec<Cell> {
            self.rows.iter().map(|r| Cell::Number(f(r))).collect()
        };

        let mut table = self.log.clone();
        for category in ServiceCategory::ALL {
            table = table.with_column(
                category.last_service_column(),
                numbers(&|r| r.last_service(category)),
            );
        }
        table = table.with_column(columns::ESTIMATE, numbers(&|r| r.estimate));
        for category in ServiceCategory::ALL {
            table = table.with_column(
                category.remaining_column(),
                numbers(&|r| r.remaining(category)),
            );
        }
        table
    }
}

/// Derived metrics calculator
#[derive(Clone, Debug)]
pub struct Calculator {
    pub intervals: ServiceIntervals,
    /// Maintenance-log column holding the unit identifier
    pub unit_column: String,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            intervals: ServiceIntervals::default(),
            unit_column: columns::UNIT.to_string(),
        }
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intervals(mut self, intervals: ServiceIntervals) -> Self {
        self.intervals = intervals;
        self
    }

    pub fn unit_column(mut self, name: impl Into<String>) -> Self {
        self.unit_column = name.into();
        self
    }

    /// Join the estimates into the log and compute the remaining hours
    pub fn enrich(&self, log: &Table, estimates: &Estimates) -> EnrichedTable {
        let unit_col = log.column_index(&self.unit_column);
        let service_cols = ServiceCategory::ALL.map(|c| log.column_index(c.last_service_column()));

        let rows = (0..log.row_count())
            .map(|row| {
                let mut missing = Vec::new();

                let unit = unit_col
                    .and_then(|col| log.cell(row, col))
                    .filter(|cell| !cell.is_empty())
                    .map(ToString::to_string);

                let estimate = unit
                    .as_deref()
                    .and_then(|u| estimates.get(u).copied().flatten())
                    .filter(|v| v.is_finite());
                let estimate = estimate.unwrap_or_else(|| {
                    missing.push(MissingField::Estimate);
                    0.0
                });

                let mut last_service = [0.0; 4];
                let mut remaining = [0.0; 4];
                for category in ServiceCategory::ALL {
                    let i = category.index();
                    let value = service_cols[i]
                        .and_then(|col| log.cell(row, col))
                        .and_then(Cell::as_number);
                    last_service[i] = value.unwrap_or_else(|| {
                        missing.push(MissingField::LastService(category));
                        0.0
                    });
                    remaining[i] = last_service[i] + self.intervals.interval(category) - estimate;
                }

                if !missing.is_empty() {
                    debug!(row, unit = ?unit, missing = missing.len(), "inputs defaulted to 0");
                }

                EnrichedRow {
                    source_row: row,
                    unit,
                    estimate,
                    last_service,
                    remaining,
                    missing,
                }
            })
            .collect();

        EnrichedTable {
            log: log.clone(),
            rows,
        }
    }
}

/// Enrich with the default intervals and unit column
pub fn enrich(log: &Table, estimates: &Estimates) -> EnrichedTable {
    Calculator::new().enrich(log, estimates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ENGINE: &str = "HM Terakhir Ganti Oli mesin";
    const HYDRAULIC: &str = "HM Terakhir Ganti Oli Hidrolik";
    const TRANSMISSION: &str = "HM Terakhir Saat Ganti Oli Transmisi";
    const DIFFERENTIAL: &str = "HM Terakhir Saat Ganti Oli Gardan";

    fn log(rows: Vec<Vec<Cell>>) -> Table {
        Table::from_rows(
            ["No. FK", "Status", ENGINE, HYDRAULIC, TRANSMISSION, DIFFERENTIAL]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows,
        )
    }

    fn unit_row(unit: &str, values: [&str; 4]) -> Vec<Cell> {
        let mut row = vec![Cell::from(unit), Cell::from("Ready")];
        row.extend(values.iter().map(|v| Cell::from(*v)));
        row
    }

    #[test]
    fn remaining_hours_formula() {
        let table = log(vec![unit_row("FK01", ["100", "1000", "900", "800"])]);
        let estimates = Estimates::from([("FK01".to_string(), Some(50.0))]);

        let enriched = enrich(&table, &estimates);
        let row = &enriched.rows()[0];

        assert_eq!(row.remaining(ServiceCategory::EngineOil), 300.0);
        assert_eq!(row.remaining(ServiceCategory::HydraulicOil), 3950.0);
        assert_eq!(row.remaining(ServiceCategory::TransmissionOil), 3350.0);
        assert_eq!(row.remaining(ServiceCategory::DifferentialOil), 3250.0);
        assert!(!row.had_missing_data());
    }

    #[test]
    fn unit_without_estimate_defaults_to_zero() {
        let table = log(vec![unit_row("FK02", ["100", "", "x", "200"])]);
        let estimates = Estimates::from([("FK02".to_string(), None)]);

        let enriched = enrich(&table, &estimates);
        let row = &enriched.rows()[0];

        assert_eq!(row.estimate, 0.0);
        assert_eq!(row.last_service, [100.0, 0.0, 0.0, 200.0]);
        assert_eq!(row.remaining, [350.0, 3000.0, 2500.0, 2700.0]);
        assert_eq!(
            row.missing,
            vec![
                MissingField::Estimate,
                MissingField::LastService(ServiceCategory::HydraulicOil),
                MissingField::LastService(ServiceCategory::TransmissionOil),
            ]
        );
    }

    #[test]
    fn unit_absent_from_estimates_defaults_to_zero() {
        let table = log(vec![unit_row("FK99", ["10", "10", "10", "10"])]);
        let enriched = enrich(&table, &Estimates::new());
        assert_eq!(enriched.rows()[0].estimate, 0.0);
        assert_eq!(enriched.rows_with_missing_data().count(), 1);
    }

    #[test]
    fn no_data_unit_resolves_every_numeric_column_to_zero() {
        let table = log(vec![unit_row("FK03", ["", "", "", ""])]);
        let estimates = Estimates::from([("FK03".to_string(), None)]);

        let enriched = enrich(&table, &estimates).to_table();

        assert_eq!(enriched.value(0, "Estimasi HM Hari Ini"), Some(&Cell::Number(0.0)));
        for column in [ENGINE, HYDRAULIC, TRANSMISSION, DIFFERENTIAL] {
            assert_eq!(enriched.value(0, column), Some(&Cell::Number(0.0)));
        }
    }

    #[test]
    fn missing_columns_are_skipped() {
        let table = Table::from_rows(
            vec!["Status".to_string()],
            vec![vec![Cell::from("Ready")]],
        );
        let enriched = enrich(&table, &Estimates::from([("FK01".to_string(), Some(5.0))]));
        let row = &enriched.rows()[0];
        assert_eq!(row.unit, None);
        assert_eq!(row.remaining, [250.0, 3000.0, 2500.0, 2500.0]);
        assert_eq!(row.missing.len(), 5);
    }

    #[test]
    fn to_table_adds_five_columns_and_keeps_rows() {
        let table = log(vec![
            unit_row("FK01", ["100", "1000", "900", "800"]),
            unit_row("FK02", ["10", "20", "30", "40"]),
        ]);
        let estimates = Estimates::from([
            ("FK01".to_string(), Some(50.0)),
            ("FK02".to_string(), Some(60.0)),
        ]);

        let out = enrich(&table, &estimates).to_table();

        assert_eq!(out.row_count(), 2);
        assert_eq!(out.column_count(), table.column_count() + 5);
        assert_eq!(out.value(1, "No. FK"), Some(&Cell::from("FK02")));
        assert_eq!(out.value(1, "Estimasi HM Hari Ini"), Some(&Cell::Number(60.0)));
        assert_eq!(out.value(0, "Sisa HM Ganti Oli mesin"), Some(&Cell::Number(300.0)));
        assert_eq!(out.value(1, "Sisa HM Ganti Oli Gardan"), Some(&Cell::Number(2480.0)));
        assert_eq!(out.value(0, ENGINE), Some(&Cell::Number(100.0)));
    }

    #[test]
    fn empty_log_yields_empty_enriched_table() {
        let enriched = enrich(&Table::empty(), &Estimates::from([("FK01".to_string(), Some(1.0))]));
        assert!(enriched.is_empty());
        assert!(enriched.to_table().is_empty());
    }

    #[test]
    fn custom_intervals() {
        let intervals = ServiceIntervals {
            engine_oil: 500.0,
            ..ServiceIntervals::default()
        };
        let table = log(vec![unit_row("FK01", ["100", "0", "0", "0"])]);
        let estimates = Estimates::from([("FK01".to_string(), Some(50.0))]);
        let enriched = Calculator::new().intervals(intervals).enrich(&table, &estimates);
        assert_eq!(enriched.rows()[0].remaining(ServiceCategory::EngineOil), 550.0);
    }

    #[test]
    fn missing_field_names_the_column() {
        assert_eq!(MissingField::Estimate.to_string(), "Estimasi HM Hari Ini");
        assert_eq!(
            MissingField::LastService(ServiceCategory::DifferentialOil).to_string(),
            DIFFERENTIAL
        );
    }
}
