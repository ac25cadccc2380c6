// State module - outcome data model and run tallies

pub mod metadata;
pub mod outcome;
pub mod signal;

pub use metadata::{MetaValue, Metadata};
pub use outcome::Outcome;
pub use signal::{BailOut, Directive, Signal};

use serde::Serialize;

/// Tallies of the outcomes reported in one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    total: usize,
    passed: usize,
    failed: usize,
    skipped: usize,
    todo: usize,
    bailed_out: bool,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summarize a sequence of outcomes
    pub fn from_outcomes<'a>(outcomes: impl IntoIterator<Item = &'a Outcome>) -> Self {
        let mut summary = Self::new();
        for outcome in outcomes {
            summary.add(outcome);
        }
        summary
    }

    /// Count one outcome
    pub fn add(&mut self, outcome: &Outcome) {
        self.total += 1;

        match outcome.status() {
            TestStatus::Pass => self.passed += 1,
            TestStatus::Fail => self.failed += 1,
            TestStatus::Skip => self.skipped += 1,
            TestStatus::Todo => self.todo += 1,
        }
    }

    pub fn mark_bailed_out(&mut self) {
        self.bailed_out = true;
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn todo(&self) -> usize {
        self.todo
    }

    pub fn bailed_out(&self) -> bool {
        self.bailed_out
    }

    /// True when no test failed outside a TODO and the run was not aborted
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && !self.bailed_out
    }
}

/// Test status as counted by [`RunSummary`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TestStatus {
    Pass,
    Fail,
    Skip,
    Todo,
}
