//! Command implementations

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use hmtrack_core::{
    columns, DashboardConfig, DataSource, DisplayCell, DisplayColumn, DisplayModel, DisplayRow,
    Renderer,
};
use hmtrack_engine::{format_hours, Dashboard, DashboardRun, LatestReading};
use hmtrack_render::{ExcelRenderer, HtmlRenderer, TextRenderer};
use serde::Serialize;
use tracing::info;

use crate::diagnostics::{ExitCode, WarningEmitter};
use crate::{OutputFormat, ReportArgs};

/// Print the warnings of a run and derive the exit code
fn emit_warnings(run: &DashboardRun, strict: bool) -> ExitCode {
    let mut emitter = WarningEmitter::new(io::stderr().lock(), strict);
    emitter.emit_run(run);
    if emitter.warning_count() > 0 {
        info!(warnings = emitter.warning_count(), strict, "run finished with warnings");
    }
    emitter.exit_code()
}

fn write_output(output: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, bytes)
            .with_context(|| format!("cannot write {}", path.display()))?,
        None => io::stdout().lock().write_all(bytes)?,
    }
    Ok(())
}

pub fn report<S>(config: &DashboardConfig, source: &mut S, args: &ReportArgs, strict: bool) -> Result<ExitCode>
where
    S: DataSource + ?Sized,
{
    if args.format == OutputFormat::Excel && args.output.is_none() {
        bail!("--output is required for excel output");
    }

    let run = Dashboard::from_config(config).run(source);
    let code = emit_warnings(&run, strict);

    let bytes = match args.format {
        OutputFormat::Text => {
            let color = !args.no_color && args.output.is_none() && io::stdout().is_terminal();
            TextRenderer::new().color(color).render(&run.display)?.into_bytes()
        }
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&run.display)?;
            json.push('\n');
            json.into_bytes()
        }
        OutputFormat::Html => {
            let title = format!(
                "Monitoring Oli Forklift {}",
                chrono::Local::now().format("%Y-%m-%d")
            );
            HtmlRenderer::new().title(title).render(&run.display)?.into_bytes()
        }
        OutputFormat::Excel => ExcelRenderer::new().render(&run.display)?,
    };
    write_output(args.output.as_deref(), &bytes)?;
    Ok(code)
}

#[derive(Serialize)]
struct EstimateLine<'a> {
    unit: &'a str,
    #[serde(flatten)]
    reading: Option<&'a LatestReading>,
    estimate: Option<f64>,
}

pub fn estimate<S>(config: &DashboardConfig, source: &mut S, json: bool, strict: bool) -> Result<ExitCode>
where
    S: DataSource + ?Sized,
{
    let dashboard = Dashboard::from_config(config);
    let mut run = DashboardRun::default();
    let history = dashboard.load_table(source, &config.tables.hm_harian, &mut run.notices);
    let readings = dashboard.estimator.latest_readings(&history);
    let code = emit_warnings(&run, strict);

    let lines: Vec<EstimateLine<'_>> = readings
        .iter()
        .map(|(unit, reading)| EstimateLine {
            unit,
            reading: reading.as_ref(),
            estimate: dashboard.estimator.project_reading(reading.as_ref()),
        })
        .collect();

    let out = if json {
        let mut out = serde_json::to_string_pretty(&lines)?;
        out.push('\n');
        out
    } else {
        TextRenderer::new().no_summary().render(&estimate_model(&lines))?
    };
    io::stdout().lock().write_all(out.as_bytes())?;
    Ok(code)
}

fn estimate_model(lines: &[EstimateLine<'_>]) -> DisplayModel {
    let column = |name: &str, numeric: bool| DisplayColumn {
        name: name.to_string(),
        numeric,
        classified: false,
    };
    let number = |value: Option<f64>| DisplayCell {
        text: value.map(format_hours).unwrap_or_default(),
        value,
        tier: None,
    };

    DisplayModel {
        columns: vec![
            column(columns::UNIT, false),
            column(columns::DATE, false),
            column("Shift", false),
            column("HM Terakhir", true),
            column(columns::ESTIMATE, true),
        ],
        rows: lines
            .iter()
            .map(|line| DisplayRow {
                cells: vec![
                    DisplayCell::text(line.unit),
                    DisplayCell::text(line.reading.and_then(|r| r.label.clone()).unwrap_or_default()),
                    DisplayCell::text(line.reading.map(|r| r.shift.to_string()).unwrap_or_default()),
                    number(line.reading.map(|r| r.value)),
                    number(line.estimate),
                ],
            })
            .collect(),
    }
}

pub fn export<S>(config: &DashboardConfig, source: &mut S, sheet: &str, strict: bool) -> Result<ExitCode>
where
    S: DataSource + ?Sized,
{
    let dashboard = Dashboard::from_config(config);
    let run = dashboard.run(source);
    let code = emit_warnings(&run, strict);

    dashboard
        .export(source, &run, sheet)
        .with_context(|| format!("cannot write sheet '{sheet}'"))?;
    println!("exported {} rows to '{sheet}'", run.enriched.len());
    Ok(code)
}
