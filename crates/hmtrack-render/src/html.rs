//! HTML table renderer
//!
//! Highlighted cells get an inline `background-color` so the output survives
//! being pasted into mail clients and spreadsheet tools that drop stylesheets.

use hmtrack_core::{DisplayCell, DisplayModel, RenderError, Renderer};

/// HTML dashboard table
#[derive(Clone, Debug)]
pub struct HtmlRenderer {
    /// Wrap the table in a complete HTML document
    pub standalone: bool,
    /// Document title (standalone output only)
    pub title: String,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            standalone: true,
            title: "Monitoring Oli Forklift".into(),
        }
    }
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit only the `<table>` element
    pub fn fragment(mut self) -> Self {
        self.standalone = false;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    fn table(&self, model: &DisplayModel) -> String {
        let mut html = String::from("<table class=\"hmtrack\">\n<thead>\n<tr>");
        for column in &model.columns {
            html.push_str(&format!("<th>{}</th>", html_escape(&column.name)));
        }
        html.push_str("</tr>\n</thead>\n<tbody>\n");

        for row in &model.rows {
            html.push_str("<tr>");
            for (i, column) in model.columns.iter().enumerate() {
                let empty = DisplayCell::text("");
                let cell = row.cells.get(i).unwrap_or(&empty);
                html.push_str(&td(cell, column.numeric));
            }
            html.push_str("</tr>\n");
        }

        html.push_str("</tbody>\n</table>\n");
        html
    }
}

fn td(cell: &DisplayCell, numeric: bool) -> String {
    let mut style = Vec::new();
    if numeric {
        style.push("text-align: right".to_string());
    }
    if let Some(color) = cell.tier.and_then(|t| t.background_color()) {
        style.push(format!("background-color: {color}"));
    }
    if style.is_empty() {
        format!("<td>{}</td>", html_escape(&cell.text))
    } else {
        format!("<td style=\"{}\">{}</td>", style.join("; "), html_escape(&cell.text))
    }
}

impl Renderer for HtmlRenderer {
    type Output = String;

    fn render(&self, model: &DisplayModel) -> Result<String, RenderError> {
        let table = self.table(model);
        if !self.standalone {
            return Ok(table);
        }
        let title = html_escape(&self.title);
        Ok(format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
             <style>\ntable.hmtrack {{ border-collapse: collapse; font-family: sans-serif; }}\n\
             table.hmtrack th, table.hmtrack td {{ border: 1px solid #ccc; padding: 4px 8px; }}\n\
             </style>\n</head>\n<body>\n<h1>{title}</h1>\n{table}</body>\n</html>\n"
        ))
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use hmtrack_core::{DisplayColumn, DisplayRow, Tier};

    fn model() -> DisplayModel {
        DisplayModel {
            columns: vec![
                DisplayColumn {
                    name: "No. FK".into(),
                    numeric: false,
                    classified: false,
                },
                DisplayColumn {
                    name: "Sisa HM Ganti Oli mesin".into(),
                    numeric: true,
                    classified: true,
                },
            ],
            rows: vec![DisplayRow {
                cells: vec![
                    DisplayCell::text("FK<01>"),
                    DisplayCell {
                        text: "100".into(),
                        value: Some(100.0),
                        tier: Some(Tier::Warning),
                    },
                ],
            }],
        }
    }

    #[test]
    fn highlights_with_inline_background() {
        let html = HtmlRenderer::new().fragment().render(&model()).unwrap();
        assert!(html.contains("<td style=\"text-align: right; background-color: yellow\">100</td>"));
        assert!(html.contains("<th>Sisa HM Ganti Oli mesin</th>"));
    }

    #[test]
    fn escapes_cell_text() {
        let html = HtmlRenderer::new().fragment().render(&model()).unwrap();
        assert!(html.contains("<td>FK&lt;01&gt;</td>"));
    }

    #[test]
    fn standalone_document() {
        let html = HtmlRenderer::new().title("Oli & HM").render(&model()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Oli &amp; HM</title>"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn short_rows_render_empty_cells() {
        let mut model = model();
        model.rows[0].cells.truncate(1);
        let html = HtmlRenderer::new().fragment().render(&model).unwrap();
        assert!(html.contains("<td style=\"text-align: right\"></td>"));
    }
}
