// Sequential test runner

use crate::report::{Report, ReportCollector, ReportError, Reporter, TapReporter};
use crate::state::metadata::location_metadata;
use crate::state::{BailOut, Directive, Outcome, Signal};
use std::io::Write;
use std::panic::Location;
use tracing::{debug, info, warn};

type TestBody = Box<dyn FnOnce() -> Result<Outcome, Signal>>;

/// A zero-argument test operation.
///
/// The body returns an [`Outcome`] or raises a [`Signal`]. The source
/// location where the test was built is kept as diagnostic metadata for
/// TODO and failing results.
pub struct Test {
    body: TestBody,
    location: &'static Location<'static>,
}

impl Test {
    /// Test whose body produces its own outcome
    #[track_caller]
    pub fn new<F>(body: F) -> Self
    where
        F: FnOnce() -> Result<Outcome, Signal> + 'static,
    {
        Self {
            body: Box::new(body),
            location: Location::caller(),
        }
    }

    /// Test whose body returns a pass/fail flag.
    ///
    /// `false`, a TODO directive, or an unrelated error become failing
    /// outcomes carrying the source location; an unrelated error without a
    /// description is described by its message. A skip becomes a passing
    /// outcome. A bail out is passed through to the runner.
    #[track_caller]
    pub fn check<F>(description: Option<&str>, body: F) -> Self
    where
        F: FnOnce() -> Result<bool, Signal> + 'static,
    {
        let location = Location::caller();
        let description = description.map(str::to_string);

        let body = move || {
            let described = |outcome: Outcome| match &description {
                Some(description) => outcome.with_description(description.clone()),
                None => outcome,
            };

            match body() {
                Ok(true) => Ok(described(Outcome::success())),
                Ok(false) => Ok(described(Outcome::failure())
                    .with_metadata(location_metadata(location))),
                Err(Signal::Directive(directive @ Directive::Skip(_))) => {
                    Ok(described(Outcome::success()).with_directive(directive))
                }
                Err(Signal::Directive(directive @ Directive::Todo(_))) => {
                    Ok(described(Outcome::failure())
                        .with_directive(directive)
                        .with_metadata(location_metadata(location)))
                }
                Err(Signal::BailOut(bail_out)) => Err(Signal::BailOut(bail_out)),
                Err(Signal::Failure(error)) => {
                    let outcome = match &description {
                        Some(_) => described(Outcome::failure()),
                        None => Outcome::failure().with_description(error.to_string()),
                    };
                    Ok(outcome.with_metadata(location_metadata(location)))
                }
            }
        };

        Self {
            body: Box::new(body),
            location,
        }
    }

    /// Test of an already evaluated condition
    #[track_caller]
    pub fn assert(value: bool, description: Option<&str>) -> Self {
        Self::check(description, move || Ok(value))
    }

    /// Where the test was built
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl std::fmt::Debug for Test {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Test")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

/// How a run that did not fail ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Every test was run and reported
    Completed,
    /// A test bailed out; later tests were never started
    BailedOut(BailOut),
}

/// Failures that abort a run without a TAP representation
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("test {number} failed: {source}")]
    TestFailed {
        number: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Run tests in order, feeding each result to `reporter`.
///
/// Test N+1 is not started before test N has been reported. A bail out is
/// reported and stops the run; an unrelated failure is returned to the
/// caller without being reported.
pub fn run<R>(tests: Vec<Test>, reporter: &mut R) -> Result<RunStatus, RunError>
where
    R: Reporter + ?Sized,
{
    let total = tests.len();

    for (index, test) in tests.into_iter().enumerate() {
        let number = index + 1;
        debug!("Running test {}/{}", number, total);

        let Test { body, location } = test;
        match body() {
            Ok(outcome) => reporter.on_outcome(outcome)?,
            Err(Signal::Directive(directive @ Directive::Skip(_))) => {
                reporter.on_outcome(Outcome::success().with_directive(directive))?;
            }
            Err(Signal::Directive(directive @ Directive::Todo(_))) => {
                let outcome = Outcome::failure()
                    .with_directive(directive)
                    .with_metadata(location_metadata(location));
                reporter.on_outcome(outcome)?;
            }
            Err(Signal::BailOut(bail_out)) => {
                warn!(
                    "Test {} bailed out; skipping {} remaining test(s)",
                    number,
                    total - number
                );
                reporter.on_bail_out(bail_out.clone())?;
                return Ok(RunStatus::BailedOut(bail_out));
            }
            Err(Signal::Failure(source)) => {
                return Err(RunError::TestFailed { number, source });
            }
        }
    }

    info!("Completed {} test(s)", total);
    Ok(RunStatus::Completed)
}

/// Run tests and collect a batch report planning every declared test
pub fn run_report(tests: Vec<Test>) -> Result<Report, RunError> {
    let mut collector = ReportCollector::new(tests.len());
    run(tests, &mut collector)?;
    Ok(collector.finish())
}

/// Run tests and stream TAP lines to `sink` as each test finishes
pub fn run_streaming<W: Write>(tests: Vec<Test>, sink: W) -> Result<RunStatus, RunError> {
    let mut reporter = TapReporter::new(tests.len(), sink)?;
    run(tests, &mut reporter)
}

/// Run tests and print the finished document to standard output
pub fn tap(tests: Vec<Test>) -> Result<Report, RunError> {
    let report = run_report(tests)?;
    println!("{}", report.render()?);
    Ok(report)
}
