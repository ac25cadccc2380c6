// Report module - TAP version 13 rendering

pub mod batch;
pub mod line;
pub mod streaming;

use crate::state::{BailOut, Outcome};
pub use batch::{Report, ReportCollector};
pub use line::{encode_metadata, render_bail_out, render_comment, render_outcome};
pub use streaming::TapReporter;

/// TAP version announced on the first line of every document
pub const TAP_VERSION: u32 = 13;

/// `TAP version 13`
pub fn version_line() -> String {
    format!("TAP version {}", TAP_VERSION)
}

/// `1..N`; `1..0` means no tests are planned
pub fn plan_line(planned: usize) -> String {
    format!("1..{}", planned)
}

/// Errors raised while rendering or recording results
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("a bail out was already reported; no further results may be recorded")]
    AfterBailOut,

    #[error("plan declared {planned} test(s) but test {number} was reported")]
    PlanExceeded { planned: usize, number: usize },

    #[error("failed to encode test metadata as YAML")]
    Metadata(#[from] serde_yaml::Error),

    #[error("failed to write to TAP output")]
    Io(#[from] std::io::Error),
}

/// What a reporter does when it is used outside its contract
/// (after a bail out, or past the declared plan).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MisusePolicy {
    /// Return an error to the caller
    #[default]
    Reject,
    /// Log a warning and drop the call
    Ignore,
}

impl MisusePolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict { Self::Reject } else { Self::Ignore }
    }

    /// Apply the policy to a contract violation
    pub(crate) fn handle(self, error: ReportError) -> Result<(), ReportError> {
        match self {
            Self::Reject => Err(error),
            Self::Ignore => {
                tracing::warn!("Ignoring TAP result: {}", error);
                Ok(())
            }
        }
    }
}

/// Receives results in emission order.
///
/// Implementations own their numbering; callers never pass test numbers.
/// No internal locking: calls must come from a single thread of control.
pub trait Reporter {
    /// Called once per finished test
    fn on_outcome(&mut self, outcome: Outcome) -> Result<(), ReportError>;

    /// Called when the run is aborted; nothing may be reported afterwards
    fn on_bail_out(&mut self, bail_out: BailOut) -> Result<(), ReportError>;
}
