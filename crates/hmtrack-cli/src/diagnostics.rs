//! Notice and missing-data reporting for CLI output
//!
//! Source notices and defaulted inputs are printed to stderr as warnings;
//! they never change what the dashboard shows.
//!
//! ## Exit Code Semantics
//!
//! | Exit Code | Meaning |
//! |-----------|---------|
//! | 0 | Success (warnings allowed) |
//! | 1 | Failure: run-level error, or any warning under `--strict` |

use std::io::Write;
use std::process;

use hmtrack_engine::DashboardRun;

// ============================================================================
// Exit Code
// ============================================================================

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success: no errors (warnings allowed)
    Success = 0,
    /// Failure: run-level error or escalated warnings
    Failure = 1,
}

impl ExitCode {
    /// Exit code for an already policy-adjusted error count
    pub fn from_error_count(count: usize) -> Self {
        if count > 0 {
            ExitCode::Failure
        } else {
            ExitCode::Success
        }
    }
}

impl From<ExitCode> for process::ExitCode {
    fn from(code: ExitCode) -> Self {
        process::ExitCode::from(code as u8)
    }
}

// ============================================================================
// Emitter
// ============================================================================

/// Writes run warnings and tracks how many count as errors
pub struct WarningEmitter<W: Write> {
    writer: W,
    strict: bool,
    warning_count: usize,
}

impl<W: Write> WarningEmitter<W> {
    pub fn new(writer: W, strict: bool) -> Self {
        Self {
            writer,
            strict,
            warning_count: 0,
        }
    }

    fn label(&self) -> &'static str {
        if self.strict {
            "error"
        } else {
            "warning"
        }
    }

    fn emit(&mut self, message: &str) {
        self.warning_count += 1;
        let label = self.label();
        // stderr write failures are not actionable
        let _ = writeln!(self.writer, "{label}: {message}");
    }

    /// Report every source notice and defaulted input of a run
    pub fn emit_run(&mut self, run: &DashboardRun) {
        for notice in &run.notices {
            self.emit(&notice.to_string());
        }
        for row in run.enriched.rows_with_missing_data() {
            let fields: Vec<String> = row.missing.iter().map(ToString::to_string).collect();
            let unit = row.unit.as_deref().unwrap_or("?");
            self.emit(&format!(
                "row {} ({unit}): missing data taken as 0: {}",
                row.source_row + 1,
                fields.join(", ")
            ));
        }
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    /// Warnings that count as errors under the current policy
    pub fn error_count(&self) -> usize {
        if self.strict {
            self.warning_count
        } else {
            0
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from_error_count(self.error_count())
    }
}
