//! # hmtrack-engine
//!
//! The dashboard computation: hour-meter estimation, oil-service remaining
//! hours and display formatting.
//!
//! This crate provides:
//! - `Estimator`: latest valid reading per unit, scanned backwards
//! - `Calculator`: remaining hours per service category
//! - `Formatter`: projection, zero-decimal formatting, tier highlighting
//! - `Dashboard`: one full pass against a `DataSource`
//!
//! ## Example
//!
//! ```rust
//! use hmtrack_core::{Cell, Table};
//! use hmtrack_engine::{enrich, estimate, Formatter};
//!
//! let history = Table::from_rows(
//!     vec!["FK01 - Shift 1".into(), "FK01 - Shift 3".into()],
//!     vec![vec![Cell::from("1000"), Cell::from("1012")]],
//! );
//! let estimates = estimate(&history);
//! assert_eq!(estimates["FK01"], Some(1033.0));
//!
//! let log = Table::from_rows(
//!     vec!["No. FK".into(), "HM Terakhir Ganti Oli mesin".into()],
//!     vec![vec![Cell::from("FK01"), Cell::from("900")]],
//! );
//! let enriched = enrich(&log, &estimates);
//! assert_eq!(enriched.rows()[0].remaining[0], 117.0);
//!
//! let display = Formatter::new().format(&enriched);
//! assert_eq!(display.rows[0].cells[3].text, "117");
//! ```

pub mod calculator;
pub mod estimator;
pub mod formatter;
pub mod pipeline;

pub use calculator::{enrich, Calculator, EnrichedRow, EnrichedTable, MissingField};
pub use estimator::{estimate, Estimates, Estimator, LatestReading};
pub use formatter::{format_hours, Formatter};
pub use pipeline::{Dashboard, DashboardRun, Notice};
