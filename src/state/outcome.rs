// Test outcome structures

use crate::state::metadata::{Metadata, deserialize_metadata};
use crate::state::signal::Directive;
use crate::state::TestStatus;
use serde::{Deserialize, Serialize};

/// The outcome of running one test.
///
/// Created once by whatever produced the test result and handed to exactly
/// one renderer. The test number is never part of the outcome; renderers
/// assign it in emission order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Outcome {
    /// Whether the test passed. Ignored when the directive is `skip`.
    pub ok: bool,

    /// Free text printed after the test number, verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directive: Option<Directive>,

    /// Diagnostics rendered as an indented YAML block under the result line.
    #[serde(
        default,
        deserialize_with = "deserialize_metadata",
        skip_serializing_if = "Option::is_none"
    )]
    pub metadata: Option<Metadata>,
}

impl Outcome {
    /// Create a passing outcome
    pub fn success() -> Self {
        Self {
            ok: true,
            ..Self::default()
        }
    }

    /// Create a failing outcome
    pub fn failure() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directive = Some(directive);
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Pass flag as it appears on the result line: a skipped test is always `ok`.
    pub fn is_effectively_ok(&self) -> bool {
        matches!(self.directive, Some(Directive::Skip(_))) || self.ok
    }

    /// Classify the outcome for run summaries
    pub fn status(&self) -> TestStatus {
        match (&self.directive, self.ok) {
            (Some(Directive::Skip(_)), _) => TestStatus::Skip,
            (Some(Directive::Todo(_)), _) => TestStatus::Todo,
            (None, true) => TestStatus::Pass,
            (None, false) => TestStatus::Fail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::metadata::MetaValue;

    #[test]
    fn test_outcome_success() {
        let outcome = Outcome::success().with_description("basic math");
        assert!(outcome.ok);
        assert_eq!(outcome.description.as_deref(), Some("basic math"));
        assert!(outcome.directive.is_none());
        assert!(outcome.metadata.is_none());
    }

    #[test]
    fn test_outcome_failure_without_description() {
        let outcome = Outcome::failure();
        assert!(!outcome.ok);
        assert!(outcome.description.is_none());
    }

    #[test]
    fn test_skip_is_effectively_ok() {
        let outcome = Outcome::failure().with_directive(Directive::skip("later"));
        assert!(!outcome.ok);
        assert!(outcome.is_effectively_ok());
        assert_eq!(outcome.status(), TestStatus::Skip);
    }

    #[test]
    fn test_todo_keeps_flag() {
        let outcome = Outcome::failure().with_directive(Directive::todo("later"));
        assert!(!outcome.is_effectively_ok());
        assert_eq!(outcome.status(), TestStatus::Todo);
    }

    #[test]
    fn test_outcome_from_json() {
        let json = r#"{"ok": false, "description": "parse", "directive": {"todo": null}, "metadata": {"line": 3}}"#;
        let outcome: Outcome = serde_json::from_str(json).expect("valid outcome json");
        assert!(!outcome.ok);
        assert_eq!(outcome.directive, Some(Directive::Todo(None)));
        let metadata = outcome.metadata.expect("metadata present");
        assert_eq!(metadata.get("line"), Some(&MetaValue::Integer(3)));
    }

    #[test]
    fn test_null_metadata_values_are_dropped() {
        let json = r#"{"ok": false, "metadata": {"file": null, "line": 3}}"#;
        let outcome: Outcome = serde_json::from_str(json).expect("null metadata accepted");

        let metadata = outcome.metadata.expect("metadata present");
        let keys: Vec<&str> = metadata.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["line"]);

        let outcome: Outcome =
            serde_json::from_str(r#"{"ok": true, "metadata": null}"#).expect("null metadata");
        assert!(outcome.metadata.is_none());
    }
}
