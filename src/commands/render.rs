// Render command - consolidate JSON reports into one TAP document

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::cli::args::{RenderArgs, resolve_output};
use crate::config::Config;
use crate::report::Report;
use crate::state::{BailOut, Outcome, RunSummary};

/// On-disk shape of one report
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportFile {
    #[serde(default)]
    pub explanation: Option<String>,

    #[serde(default)]
    pub outcomes: Vec<Outcome>,

    #[serde(default)]
    pub bail_out: Option<BailOut>,
}

impl From<ReportFile> for Report {
    fn from(file: ReportFile) -> Self {
        let mut report = Report::new(file.outcomes);
        if let Some(explanation) = file.explanation {
            report = report.with_explanation(explanation);
        }
        if let Some(bail_out) = file.bail_out {
            report = report.with_bail_out(bail_out);
        }
        report
    }
}

/// Load one JSON report
pub fn load_report(path: &Path) -> Result<Report> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read report: {}", path.display()))?;
    let file: ReportFile = serde_json::from_str(&content)
        .with_context(|| format!("Invalid report JSON: {}", path.display()))?;

    debug!(
        "Loaded {} outcome(s) from {}",
        file.outcomes.len(),
        path.display()
    );
    Ok(file.into())
}

/// Consolidate the inputs and render them, with an optional run-level
/// explanation placed before the inputs' own explanations
pub fn build_report(inputs: &[impl AsRef<Path>], explanation: Option<&str>) -> Result<Report> {
    let mut reports = Vec::with_capacity(inputs.len() + 1);

    if let Some(explanation) = explanation {
        reports.push(Report::new(Vec::new()).with_explanation(explanation));
    }
    for input in inputs {
        reports.push(load_report(input.as_ref())?);
    }

    Ok(Report::consolidation(reports))
}

pub fn handle_render(args: &RenderArgs, config: Option<&Config>) -> Result<RunSummary> {
    let report = build_report(args.inputs.as_slice(), args.explanation.as_deref())?;
    let document = report.render().context("Failed to render TAP document")?;

    let output = resolve_output(args.output.as_ref(), config);
    let mut sink = super::open_output(output.as_deref())?;
    writeln!(sink, "{}", document).context("Failed to write TAP document")?;
    sink.flush().context("Failed to flush TAP output")?;

    let summary = report.summary();
    info!(
        "Rendered {} result(s): {} passed, {} failed, {} skipped, {} todo",
        summary.total(),
        summary.passed(),
        summary.failed(),
        summary.skipped(),
        summary.todo()
    );

    Ok(summary)
}
