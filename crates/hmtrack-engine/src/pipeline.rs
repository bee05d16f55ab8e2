//! One dashboard pass: read, estimate, enrich, format
//!
//! Source failures never abort a run. A table that cannot be read is replaced
//! by an empty one and a [`Notice`] is recorded, so the later stages degrade
//! to empty output instead of failing.

use std::collections::BTreeMap;

use hmtrack_core::{DashboardConfig, DataSource, DisplayModel, SourceError, Table, TableNames, UnitId};
use serde::Serialize;
use tracing::{info, warn};

use crate::calculator::{Calculator, EnrichedTable};
use crate::estimator::{Estimates, Estimator, LatestReading};
use crate::formatter::Formatter;

/// User-visible, non-fatal problem raised at the data source boundary
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub table: String,
    pub message: String,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot read table '{}': {}", self.table, self.message)
    }
}

/// Everything one pass produced
#[derive(Clone, Debug, Default)]
pub struct DashboardRun {
    pub readings: BTreeMap<UnitId, Option<LatestReading>>,
    pub estimates: Estimates,
    pub enriched: EnrichedTable,
    pub display: DisplayModel,
    pub notices: Vec<Notice>,
}

impl DashboardRun {
    /// Whether the run saw source failures or defaulted inputs
    pub fn is_degraded(&self) -> bool {
        !self.notices.is_empty() || self.enriched.rows_with_missing_data().next().is_some()
    }
}

/// The dashboard pipeline
#[derive(Clone, Debug)]
pub struct Dashboard {
    pub tables: TableNames,
    pub estimator: Estimator,
    pub calculator: Calculator,
    pub formatter: Formatter,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default())
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            tables: config.tables.clone(),
            estimator: Estimator::new()
                .daily_increment(config.estimator.daily_increment)
                .date_column(config.estimator.date_column.clone()),
            calculator: Calculator::new().intervals(config.service),
            formatter: Formatter::new().thresholds(config.thresholds),
        }
    }

    /// Read a table, substituting an empty one (and a notice) on failure
    pub fn load_table<S>(&self, source: &mut S, name: &str, notices: &mut Vec<Notice>) -> Table
    where
        S: DataSource + ?Sized,
    {
        match source.read(name) {
            Ok(table) => {
                info!(table = name, rows = table.row_count(), "table loaded");
                table
            }
            Err(err) => {
                warn!(table = name, error = %err, "table unavailable, using empty table");
                notices.push(Notice {
                    table: name.to_string(),
                    message: err.to_string(),
                });
                Table::empty()
            }
        }
    }

    /// Run one full pass against a source
    pub fn run<S>(&self, source: &mut S) -> DashboardRun
    where
        S: DataSource + ?Sized,
    {
        let mut notices = Vec::new();

        let history = self.load_table(source, &self.tables.hm_harian, &mut notices);
        let readings = self.estimator.latest_readings(&history);
        let estimates = self.estimator.project(&readings);

        let log = self.load_table(source, &self.tables.data_oli, &mut notices);
        let enriched = self.calculator.enrich(&log, &estimates);
        let display = self.formatter.format(&enriched);

        info!(
            units = readings.len(),
            rows = enriched.len(),
            missing = enriched.rows_with_missing_data().count(),
            "dashboard computed"
        );

        DashboardRun {
            readings,
            estimates,
            enriched,
            display,
            notices,
        }
    }

    /// Write the enriched maintenance log to `sheet`
    pub fn export<S>(&self, source: &mut S, run: &DashboardRun, sheet: &str) -> Result<(), SourceError>
    where
        S: DataSource + ?Sized,
    {
        let table = run.enriched.to_table();
        source.write(sheet, &table)?;
        info!(sheet, rows = table.row_count(), "enriched table written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hmtrack_core::{Cell, Tier};
    use hmtrack_source::MemorySource;
    use pretty_assertions::assert_eq;

    fn table(headers: &[&str], rows: Vec<Vec<Cell>>) -> Table {
        Table::from_rows(headers.iter().map(|s| s.to_string()).collect(), rows)
    }

    fn history() -> Table {
        table(
            &["Tanggal", "FK01 - Shift 1", "FK01 - Shift 2", "FK02 - Shift 1"],
            vec![
                vec![Cell::from("2024-05-01"), Cell::from("1000"), Cell::from("1008"), Cell::from("500")],
                vec![Cell::from("2024-05-02"), Cell::from("1016"), Cell::Empty, Cell::from("rusak")],
            ],
        )
    }

    fn oil_log() -> Table {
        table(
            &[
                "No. FK",
                "Status",
                "HM Terakhir Ganti Oli mesin",
                "HM Terakhir Ganti Oli Hidrolik",
                "HM Terakhir Saat Ganti Oli Transmisi",
                "HM Terakhir Saat Ganti Oli Gardan",
            ],
            vec![
                vec![
                    Cell::from("FK01"),
                    Cell::from("Ready"),
                    Cell::from("800"),
                    Cell::from("0"),
                    Cell::from("0"),
                    Cell::from("0"),
                ],
                vec![
                    Cell::from("FK03"),
                    Cell::from("Breakdown"),
                    Cell::from("100"),
                    Cell::from("100"),
                    Cell::from("100"),
                    Cell::from("100"),
                ],
            ],
        )
    }

    fn source() -> MemorySource {
        MemorySource::new()
            .with_table("HM_Harian", history())
            .with_table("data_oli", oil_log())
    }

    #[test]
    fn full_pass() {
        let run = Dashboard::new().run(&mut source());

        assert_eq!(run.estimates["FK01"], Some(1037.0));
        assert_eq!(run.estimates["FK02"], Some(521.0));
        assert_eq!(run.readings["FK01"].as_ref().unwrap().label.as_deref(), Some("2024-05-02"));
        assert!(run.notices.is_empty());

        let fk01 = &run.display.rows[0].cells;
        assert_eq!(fk01[0].text, "FK01");
        assert_eq!(fk01[2].text, "1037");
        // 800 + 250 - 1037
        assert_eq!(fk01[3].text, "13");
        assert_eq!(fk01[3].tier, Some(Tier::Critical));

        let fk03 = &run.display.rows[1].cells;
        assert_eq!(fk03[2].text, "0");
        assert_eq!(fk03[3].text, "350");
        assert!(run.is_degraded());
    }

    #[test]
    fn unreadable_history_degrades_to_empty_estimates() {
        let mut source = MemorySource::new().with_table("data_oli", oil_log());
        let run = Dashboard::new().run(&mut source);

        assert!(run.estimates.is_empty());
        assert_eq!(run.notices.len(), 1);
        assert_eq!(run.notices[0].table, "HM_Harian");
        assert_eq!(run.enriched.len(), 2);
        assert!(run.enriched.rows().iter().all(|r| r.estimate == 0.0));
    }

    #[test]
    fn unreadable_sources_produce_empty_dashboard() {
        let run = Dashboard::new().run(&mut MemorySource::new());
        assert!(run.estimates.is_empty());
        assert!(run.enriched.is_empty());
        assert!(run.display.is_empty());
        assert_eq!(run.notices.len(), 2);
        assert!(run.notices[1].to_string().starts_with("cannot read table 'data_oli'"));
    }

    #[test]
    fn config_overrides_table_names_and_constants() {
        let mut config = DashboardConfig::default();
        config.tables.hm_harian = "History".into();
        config.estimator.daily_increment = 0.0;
        config.thresholds.critical = 0.0;

        let mut source = MemorySource::new()
            .with_table("History", history())
            .with_table("data_oli", oil_log());
        let run = Dashboard::from_config(&config).run(&mut source);

        assert_eq!(run.estimates["FK01"], Some(1016.0));
        // 800 + 250 - 1016 = 34 is no longer critical
        assert_eq!(run.display.rows[0].cells[3].tier, Some(Tier::Warning));
    }

    #[test]
    fn export_writes_enriched_table() {
        let mut source = source();
        let dashboard = Dashboard::new();
        let run = dashboard.run(&mut source);

        dashboard.export(&mut source, &run, "hasil").unwrap();

        let written = source.read("hasil").unwrap();
        assert_eq!(written.row_count(), 2);
        assert_eq!(written.value(0, "Sisa HM Ganti Oli mesin"), Some(&Cell::Number(13.0)));
    }
}
