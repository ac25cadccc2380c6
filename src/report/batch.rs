// Batch report - a finished run rendered as one TAP document

use super::line::{render_bail_out, render_comment, render_outcome};
use super::{MisusePolicy, ReportError, Reporter, plan_line, version_line};
use crate::state::{BailOut, Outcome, RunSummary};
use std::fmt;

/// A completed run.
///
/// A bail out is never stored among the outcomes; it terminates the
/// document after the last outcome.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Report {
    explanation: Option<String>,
    outcomes: Vec<Outcome>,
    bail_out: Option<BailOut>,
    planned: usize,
}

impl Report {
    /// Report planning exactly `outcomes.len()` tests
    pub fn new(outcomes: Vec<Outcome>) -> Self {
        Self {
            explanation: None,
            planned: outcomes.len(),
            outcomes,
            bail_out: None,
        }
    }

    /// Run-level explanation, rendered as a comment block after the plan
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    pub fn with_bail_out(mut self, bail_out: BailOut) -> Self {
        self.bail_out = Some(bail_out);
        self
    }

    /// Override the plan count, e.g. with the number of declared tests of
    /// a run that bailed out early. The plan never drops below the number
    /// of outcomes.
    pub fn with_plan(mut self, planned: usize) -> Self {
        self.planned = planned.max(self.outcomes.len());
        self
    }

    /// Combine reports in order.
    ///
    /// Outcomes are concatenated, plans summed, and non-empty explanations
    /// joined with newlines. Reports after the first one that bailed out
    /// are dropped, since nothing may follow a bail out.
    pub fn consolidation(reports: impl IntoIterator<Item = Report>) -> Report {
        let mut consolidated = Report::default();
        let mut explanations = Vec::new();

        let mut reports = reports.into_iter();
        for report in reports.by_ref() {
            consolidated.planned += report.planned;
            consolidated.outcomes.extend(report.outcomes);
            explanations.extend(report.explanation.filter(|e| !e.is_empty()));

            if report.bail_out.is_some() {
                consolidated.bail_out = report.bail_out;
                break;
            }
        }

        let dropped = reports.count();
        if dropped > 0 {
            tracing::debug!("Dropped {} report(s) following a bail out", dropped);
        }

        if !explanations.is_empty() {
            consolidated.explanation = Some(explanations.join("\n"));
        }

        consolidated
    }

    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn bail_out(&self) -> Option<&BailOut> {
        self.bail_out.as_ref()
    }

    pub fn planned(&self) -> usize {
        self.planned
    }

    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary::from_outcomes(&self.outcomes);
        if self.bail_out.is_some() {
            summary.mark_bailed_out();
        }
        summary
    }

    /// Render every line of the document, without line terminators
    pub fn lines(&self) -> Result<Vec<String>, ReportError> {
        let mut lines = Vec::with_capacity(self.outcomes.len() + 3);

        lines.push(version_line());
        lines.push(plan_line(self.planned));

        if let Some(explanation) = &self.explanation {
            lines.extend(render_comment(explanation));
        }

        for (index, outcome) in self.outcomes.iter().enumerate() {
            lines.extend(render_outcome(outcome, index + 1)?);
        }

        if let Some(bail_out) = &self.bail_out {
            lines.push(render_bail_out(bail_out));
        }

        Ok(lines)
    }

    /// Render the full document; lines are joined with `\n` and the last
    /// line has no terminator. Rendering does not mutate the report.
    pub fn render(&self) -> Result<String, ReportError> {
        Ok(self.lines()?.join("\n"))
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.render().map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// Collects results from a runner into a [`Report`]
#[derive(Debug, Default)]
pub struct ReportCollector {
    planned: usize,
    outcomes: Vec<Outcome>,
    bail_out: Option<BailOut>,
    policy: MisusePolicy,
}

impl ReportCollector {
    pub fn new(planned: usize) -> Self {
        Self {
            planned,
            ..Self::default()
        }
    }

    pub fn with_policy(mut self, policy: MisusePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn finish(self) -> Report {
        Report {
            explanation: None,
            outcomes: self.outcomes,
            bail_out: self.bail_out,
            planned: self.planned,
        }
    }
}

impl Reporter for ReportCollector {
    fn on_outcome(&mut self, outcome: Outcome) -> Result<(), ReportError> {
        if self.bail_out.is_some() {
            return self.policy.handle(ReportError::AfterBailOut);
        }

        let number = self.outcomes.len() + 1;
        if number > self.planned {
            return self.policy.handle(ReportError::PlanExceeded {
                planned: self.planned,
                number,
            });
        }

        self.outcomes.push(outcome);
        Ok(())
    }

    fn on_bail_out(&mut self, bail_out: BailOut) -> Result<(), ReportError> {
        if self.bail_out.is_some() {
            return self.policy.handle(ReportError::AfterBailOut);
        }

        self.bail_out = Some(bail_out);
        Ok(())
    }
}
