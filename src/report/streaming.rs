use crate::state::{BailOut, Outcome, RunSummary};
use std::io::{self, Write};
use tracing::{debug, warn};

use super::line::{render_bail_out, render_comment, render_outcome};
use super::{MisusePolicy, ReportError, Reporter, plan_line, version_line};

/// Writes TAP lines to a sink as results arrive.
///
/// The header and plan are written on construction. Every call writes its
/// lines immediately, so the sink always holds a valid prefix of the final
/// document. After a bail out the reporter is terminal.
pub struct TapReporter<W: Write> {
    sink: W,
    planned: usize,
    next_number: usize,
    bailed_out: bool,
    autoflush: bool,
    policy: MisusePolicy,
    summary: RunSummary,
}

impl TapReporter<io::Stdout> {
    /// Reporter writing to standard output
    pub fn stdout(planned: usize) -> Result<Self, ReportError> {
        Self::new(planned, io::stdout())
    }
}

impl<W: Write> TapReporter<W> {
    /// Create a reporter and write `TAP version 13` and `1..planned`
    pub fn new(planned: usize, sink: W) -> Result<Self, ReportError> {
        let mut reporter = Self {
            sink,
            planned,
            next_number: 1,
            bailed_out: false,
            autoflush: true,
            policy: MisusePolicy::default(),
            summary: RunSummary::new(),
        };

        reporter.emit(&[version_line(), plan_line(planned)])?;
        Ok(reporter)
    }

    pub fn with_policy(mut self, policy: MisusePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Flush the sink after every write (on by default)
    pub fn with_autoflush(mut self, autoflush: bool) -> Self {
        self.autoflush = autoflush;
        self
    }

    /// Write the result line for the next test number
    pub fn report_outcome(&mut self, outcome: &Outcome) -> Result<(), ReportError> {
        if self.bailed_out {
            return self.policy.handle(ReportError::AfterBailOut);
        }

        if self.next_number > self.planned {
            return self.policy.handle(ReportError::PlanExceeded {
                planned: self.planned,
                number: self.next_number,
            });
        }

        let lines = render_outcome(outcome, self.next_number)?;
        self.emit(&lines)?;

        debug!("Reported test {}: {}", self.next_number, lines[0]);
        self.summary.add(outcome);
        self.next_number += 1;
        Ok(())
    }

    /// Write `Bail out!`; the counter is left untouched
    pub fn report_bail_out(&mut self, bail_out: &BailOut) -> Result<(), ReportError> {
        if self.bailed_out {
            return self.policy.handle(ReportError::AfterBailOut);
        }

        self.emit(&[render_bail_out(bail_out)])?;

        warn!("{}", bail_out);
        self.bailed_out = true;
        self.summary.mark_bailed_out();
        Ok(())
    }

    /// Write a diagnostic comment block (`# ...` lines)
    pub fn comment(&mut self, text: &str) -> Result<(), ReportError> {
        if self.bailed_out {
            return self.policy.handle(ReportError::AfterBailOut);
        }

        self.emit(&render_comment(text))
    }

    /// Number the next reported outcome will get
    pub fn next_number(&self) -> usize {
        self.next_number
    }

    pub fn planned(&self) -> usize {
        self.planned
    }

    pub fn is_bailed_out(&self) -> bool {
        self.bailed_out
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Give back the sink, e.g. to close a file
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn emit(&mut self, lines: &[String]) -> Result<(), ReportError> {
        let mut text = String::new();
        for line in lines {
            text.push_str(line);
            text.push('\n');
        }

        self.sink.write_all(text.as_bytes())?;
        if self.autoflush {
            self.sink.flush()?;
        }
        Ok(())
    }
}

impl<W: Write> Reporter for TapReporter<W> {
    fn on_outcome(&mut self, outcome: Outcome) -> Result<(), ReportError> {
        self.report_outcome(&outcome)
    }

    fn on_bail_out(&mut self, bail_out: BailOut) -> Result<(), ReportError> {
        self.report_bail_out(&bail_out)
    }
}
