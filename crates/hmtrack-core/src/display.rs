//! Display model of the oil-service dashboard
//!
//! This module provides the types a display surface consumes:
//!
//! - **Tier**: Critical, Warning or Normal highlight of a remaining-hours cell
//! - **Thresholds**: the hour limits separating the tiers
//! - **DisplayModel**: the projected, formatted table with per-cell tiers
//!
//! # Example
//!
//! ```rust
//! use hmtrack_core::display::{Thresholds, Tier};
//!
//! let thresholds = Thresholds::default();
//! assert_eq!(thresholds.classify(Some(40.0)), Tier::Critical);
//! assert_eq!(thresholds.classify(Some(100.0)), Tier::Warning);
//! assert_eq!(thresholds.classify(None), Tier::Normal);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Tiers
// ============================================================================

/// Highlight classification of a remaining-hours value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Service is due now or almost due (value <= critical threshold)
    Critical,
    /// Service is coming up (critical < value <= warning threshold)
    Warning,
    /// No highlight
    Normal,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Critical => "critical",
            Tier::Warning => "warning",
            Tier::Normal => "normal",
        }
    }

    /// CSS background colour, `None` for unhighlighted cells
    pub fn background_color(&self) -> Option<&'static str> {
        match self {
            Tier::Critical => Some("red"),
            Tier::Warning => Some("yellow"),
            Tier::Normal => None,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hour limits separating the highlight tiers
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Values at or below this are critical
    pub critical: f64,
    /// Values at or below this (and above `critical`) are warnings
    pub warning: f64,
}

impl Thresholds {
    pub const DEFAULT_CRITICAL: f64 = 63.0;
    pub const DEFAULT_WARNING: f64 = 147.0;

    /// Classify a value; non-numeric cells (`None`) are never highlighted
    pub fn classify(&self, value: Option<f64>) -> Tier {
        match value {
            Some(v) if v <= self.critical => Tier::Critical,
            Some(v) if v <= self.warning => Tier::Warning,
            _ => Tier::Normal,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            critical: Self::DEFAULT_CRITICAL,
            warning: Self::DEFAULT_WARNING,
        }
    }
}

// ============================================================================
// Display Model
// ============================================================================

/// Column of the display table
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayColumn {
    pub name: String,
    /// Values are rendered as zero-decimal numbers
    pub numeric: bool,
    /// Cells carry a highlight tier
    pub classified: bool,
}

/// A formatted cell
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayCell {
    /// Display text (numbers already formatted)
    pub text: String,
    /// Numeric value behind `text`, when the cell is numeric
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Highlight tier; only set in classified columns
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
}

impl DisplayCell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: None,
            tier: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub cells: Vec<DisplayCell>,
}

/// Display-ready dashboard table
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayModel {
    pub columns: Vec<DisplayColumn>,
    pub rows: Vec<DisplayRow>,
}

/// Number of classified cells per tier
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub critical: usize,
    pub warning: usize,
    pub normal: usize,
}

impl DisplayModel {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Tally the tiers of every classified cell
    pub fn tier_counts(&self) -> TierCounts {
        let mut counts = TierCounts::default();
        for tier in self.rows.iter().flat_map(|r| r.cells.iter()).filter_map(|c| c.tier) {
            match tier {
                Tier::Critical => counts.critical += 1,
                Tier::Warning => counts.warning += 1,
                Tier::Normal => counts.normal += 1,
            }
        }
        counts
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries() {
        let thresholds = Thresholds::default();
        assert_eq!(thresholds.classify(Some(63.0)), Tier::Critical);
        assert_eq!(thresholds.classify(Some(64.0)), Tier::Warning);
        assert_eq!(thresholds.classify(Some(147.0)), Tier::Warning);
        assert_eq!(thresholds.classify(Some(148.0)), Tier::Normal);
    }

    #[test]
    fn negative_remaining_is_critical() {
        assert_eq!(Thresholds::default().classify(Some(-20.0)), Tier::Critical);
    }

    #[test]
    fn non_numeric_is_normal() {
        assert_eq!(Thresholds::default().classify(None), Tier::Normal);
    }

    #[test]
    fn custom_thresholds() {
        let thresholds = Thresholds {
            critical: 10.0,
            warning: 20.0,
        };
        assert_eq!(thresholds.classify(Some(15.0)), Tier::Warning);
        assert_eq!(thresholds.classify(Some(63.0)), Tier::Normal);
    }

    #[test]
    fn tier_colors() {
        assert_eq!(Tier::Critical.background_color(), Some("red"));
        assert_eq!(Tier::Warning.background_color(), Some("yellow"));
        assert_eq!(Tier::Normal.background_color(), None);
    }

    #[test]
    fn tier_counts_skip_unclassified_cells() {
        let cell = |tier| DisplayCell {
            text: "0".into(),
            value: Some(0.0),
            tier,
        };
        let model = DisplayModel {
            columns: Vec::new(),
            rows: vec![
                DisplayRow {
                    cells: vec![cell(None), cell(Some(Tier::Critical)), cell(Some(Tier::Normal))],
                },
                DisplayRow {
                    cells: vec![cell(Some(Tier::Critical)), cell(Some(Tier::Warning))],
                },
            ],
        };
        assert_eq!(
            model.tier_counts(),
            TierCounts {
                critical: 2,
                warning: 1,
                normal: 1,
            }
        );
    }
}
