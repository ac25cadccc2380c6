// Line renderer - one outcome to its TAP result line(s)

use super::ReportError;
use crate::state::{BailOut, Metadata, Outcome};

const METADATA_INDENT: usize = 2;

/// Render one outcome as its result line, followed by the indented YAML
/// block when the outcome carries non-empty metadata.
///
/// Description and explanations are written verbatim; empty ones are
/// treated as absent.
pub fn render_outcome(outcome: &Outcome, number: usize) -> Result<Vec<String>, ReportError> {
    let status = if outcome.is_effectively_ok() { "ok" } else { "not ok" };
    let number = number.to_string();
    let directive_marker = outcome.directive.as_ref().map(ToString::to_string);

    let mut components: Vec<&str> = vec![status, number.as_str()];
    components.extend(non_empty(outcome.description.as_deref()));
    components.extend(directive_marker.as_deref());

    let mut lines = vec![components.join(" ")];

    if let Some(metadata) = outcome.metadata.as_ref().filter(|m| !m.is_empty()) {
        let document = encode_metadata(metadata)?;
        lines.extend(indented(&document, METADATA_INDENT));
    }

    Ok(lines)
}

/// `Bail out!` followed by the explanation, if any
pub fn render_bail_out(bail_out: &BailOut) -> String {
    bail_out.to_string()
}

/// Diagnostic comment lines: `# text`, or a bare `#` for an empty line
pub fn render_comment(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                "#".to_string()
            } else {
                format!("# {}", line)
            }
        })
        .collect()
}

/// Encode metadata as a YAML document framed by `---` and `...`.
///
/// Keys come out sorted at every level. The returned text ends with a
/// newline, so splitting it on `\n` yields a trailing blank line.
pub fn encode_metadata(metadata: &Metadata) -> Result<String, ReportError> {
    let body = serde_yaml::to_string(metadata)?;
    Ok(format!("---\n{}...\n", body))
}

fn indented(text: &str, spaces: usize) -> Vec<String> {
    let prefix = " ".repeat(spaces);
    text.split('\n').map(|line| format!("{}{}", prefix, line)).collect()
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}
