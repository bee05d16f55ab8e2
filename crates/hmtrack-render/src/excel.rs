//! Excel dashboard renderer
//!
//! Writes the display model to a single worksheet:
//!
//! ```text
//! | No. FK | Status | Estimasi HM Hari Ini | Sisa HM Ganti Oli mesin | ...
//! |--------|--------|----------------------|-------------------------|
//! | FK01   | Ready  | 1037                 | 13  (red fill)          |
//! ```
//!
//! Numeric cells are stored as numbers (formatted without decimals) so the
//! sheet stays sortable; highlighted cells carry a static tier fill.

use hmtrack_core::{DisplayModel, RenderError, Renderer, Tier};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook};

/// Excel dashboard renderer
#[derive(Clone, Debug)]
pub struct ExcelRenderer {
    /// Worksheet name
    pub sheet_name: String,
    /// Keep the header row visible while scrolling
    pub freeze_header: bool,
}

impl Default for ExcelRenderer {
    fn default() -> Self {
        Self {
            sheet_name: "Monitoring Oli".into(),
            freeze_header: true,
        }
    }
}

struct ExcelFormats {
    header: Format,
    text: Format,
    number: Format,
    critical: Format,
    warning: Format,
}

impl ExcelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    fn create_formats() -> ExcelFormats {
        let number = Format::new().set_num_format("0").set_border(FormatBorder::Thin);
        ExcelFormats {
            header: Format::new()
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_background_color(0x4472C4)
                .set_font_color(0xFFFFFF)
                .set_border(FormatBorder::Thin),
            text: Format::new().set_border(FormatBorder::Thin),
            critical: number.clone().set_background_color(0xFF0000),
            warning: number.clone().set_background_color(0xFFFF00),
            number,
        }
    }

    /// Render the model to XLSX bytes
    pub fn render_to_bytes(&self, model: &DisplayModel) -> Result<Vec<u8>, RenderError> {
        let mut workbook = Workbook::new();
        let formats = Self::create_formats();

        let sheet = workbook.add_worksheet();
        sheet
            .set_name(&self.sheet_name)
            .map_err(|e| RenderError::Format(e.to_string()))?;

        for (col, column) in model.columns.iter().enumerate() {
            let col = to_col(col)?;
            sheet
                .write_string_with_format(0, col, &column.name, &formats.header)
                .map_err(|e| RenderError::Format(e.to_string()))?;

            let width = model
                .rows
                .iter()
                .filter_map(|r| r.cells.get(usize::from(col)))
                .map(|c| c.text.chars().count())
                .chain(std::iter::once(column.name.chars().count()))
                .max()
                .unwrap_or(0);
            sheet.set_column_width(col, (width + 2) as f64).ok();
        }

        for (r, row) in model.rows.iter().enumerate() {
            let excel_row = u32::try_from(r + 1)
                .map_err(|_| RenderError::InvalidData(format!("too many rows: {}", model.rows.len())))?;
            for (col, cell) in row.cells.iter().enumerate().take(model.columns.len()) {
                let col = to_col(col)?;
                let result = match cell.value {
                    Some(value) => {
                        let format = match cell.tier {
                            Some(Tier::Critical) => &formats.critical,
                            Some(Tier::Warning) => &formats.warning,
                            _ => &formats.number,
                        };
                        sheet.write_number_with_format(excel_row, col, value, format)
                    }
                    None => sheet.write_string_with_format(excel_row, col, &cell.text, &formats.text),
                };
                result.map_err(|e| RenderError::Format(e.to_string()))?;
            }
        }

        if self.freeze_header {
            sheet.set_freeze_panes(1, 0).ok();
        }

        workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Format(format!("Failed to create Excel: {e}")))
    }
}

fn to_col(index: usize) -> Result<u16, RenderError> {
    u16::try_from(index).map_err(|_| RenderError::InvalidData(format!("too many columns: {index}")))
}

impl Renderer for ExcelRenderer {
    type Output = Vec<u8>;

    fn render(&self, model: &DisplayModel) -> Result<Vec<u8>, RenderError> {
        self.render_to_bytes(model)
    }
}
