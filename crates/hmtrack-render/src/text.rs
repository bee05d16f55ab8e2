//! Terminal table renderer
//!
//! ```text
//! No. FK  Status     Estimasi HM Hari Ini  Sisa HM Ganti Oli mesin  ...
//! ------  ---------  --------------------  -----------------------
//! FK01    Ready                      1037                       13
//! FK03    Breakdown                     0                      350
//!
//! Critical: 1  Warning: 0  Normal: 7
//! ```

use console::Style;
use hmtrack_core::{DisplayCell, DisplayModel, RenderError, Renderer, Tier};

/// Fixed-width text table
#[derive(Clone, Debug)]
pub struct TextRenderer {
    /// Highlight tiers with terminal background colours
    pub color: bool,
    /// Append the per-tier summary line
    pub summary: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            color: false,
            summary: true,
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn no_summary(mut self) -> Self {
        self.summary = false;
        self
    }

    fn style(&self, tier: Option<Tier>) -> Option<Style> {
        if !self.color {
            return None;
        }
        let style = match tier? {
            Tier::Critical => Style::new().on_red().white().bold(),
            Tier::Warning => Style::new().on_yellow().black(),
            Tier::Normal => return None,
        };
        Some(style.force_styling(true))
    }

    fn cell(&self, cell: &DisplayCell, width: usize, right: bool) -> String {
        let padded = pad(&cell.text, width, right);
        match self.style(cell.tier) {
            Some(style) => style.apply_to(padded).to_string(),
            None => padded,
        }
    }
}

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&self, model: &DisplayModel) -> Result<String, RenderError> {
        let widths: Vec<usize> = model
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                model
                    .rows
                    .iter()
                    .filter_map(|row| row.cells.get(i))
                    .map(|cell| cell.text.chars().count())
                    .chain(std::iter::once(column.name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut lines = Vec::with_capacity(model.rows.len() + 4);

        if !model.columns.is_empty() {
            let header: Vec<String> = model
                .columns
                .iter()
                .zip(&widths)
                .map(|(column, &width)| pad(&column.name, width, false))
                .collect();
            lines.push(header.join("  ").trim_end().to_string());
            let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
            lines.push(rule.join("  "));
        }

        for row in &model.rows {
            let cells: Vec<String> = model
                .columns
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (column, &width))| match row.cells.get(i) {
                    Some(cell) => self.cell(cell, width, column.numeric),
                    None => pad("", width, false),
                })
                .collect();
            lines.push(cells.join("  ").trim_end().to_string());
        }

        if self.summary {
            let counts = model.tier_counts();
            lines.push(String::new());
            lines.push(format!(
                "Critical: {}  Warning: {}  Normal: {}",
                counts.critical, counts.warning, counts.normal
            ));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        Ok(out)
    }
}

fn pad(text: &str, width: usize, right: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(text.chars().count()));
    if right {
        format!("{fill}{text}")
    } else {
        format!("{text}{fill}")
    }
}
