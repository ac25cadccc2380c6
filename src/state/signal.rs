// Signals a test body can raise instead of returning an outcome

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reinterprets how a single test outcome is reported.
///
/// `TODO` marks a test that is not expected to pass yet; `SKIP` marks a
/// test that was intentionally not run. Either may carry an explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Directive {
    Todo(Option<String>),
    Skip(Option<String>),
}

impl Directive {
    pub fn todo(explanation: impl Into<String>) -> Self {
        Self::Todo(Some(explanation.into()))
    }

    pub fn skip(explanation: impl Into<String>) -> Self {
        Self::Skip(Some(explanation.into()))
    }

    /// Keyword as written after `#` on the result line
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Todo(_) => "TODO",
            Self::Skip(_) => "SKIP",
        }
    }

    pub fn explanation(&self) -> Option<&str> {
        match self {
            Self::Todo(explanation) | Self::Skip(explanation) => explanation.as_deref(),
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "# {}", self.keyword())?;
        match self.explanation() {
            Some(explanation) if !explanation.is_empty() => write!(f, " {}", explanation),
            _ => Ok(()),
        }
    }
}

impl std::error::Error for Directive {}

/// Aborts the remainder of a run.
///
/// Not a per-test outcome: it is rendered as a single unnumbered
/// `Bail out!` line and nothing is reported after it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BailOut {
    #[serde(default)]
    pub explanation: Option<String>,
}

impl BailOut {
    pub fn new(explanation: impl Into<String>) -> Self {
        Self {
            explanation: Some(explanation.into()),
        }
    }

    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }
}

impl fmt::Display for BailOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Bail out!")?;
        match self.explanation() {
            Some(explanation) if !explanation.is_empty() => write!(f, " {}", explanation),
            _ => Ok(()),
        }
    }
}

impl std::error::Error for BailOut {}

/// Everything a test body can raise in place of an [`Outcome`](crate::state::Outcome).
#[derive(Debug, thiserror::Error)]
pub enum Signal {
    #[error("{0}")]
    Directive(#[from] Directive),

    #[error("{0}")]
    BailOut(#[from] BailOut),

    /// Unrelated failure; the runner propagates it to its caller.
    #[error(transparent)]
    Failure(#[from] anyhow::Error),
}
