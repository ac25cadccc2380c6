// Stream command - JSON-lines result events to live TAP output

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use tracing::debug;

use crate::cli::args::{StreamArgs, resolve_output};
use crate::config::Config;
use crate::report::TapReporter;
use crate::state::{BailOut, Outcome, RunSummary};

/// One input line: `{"outcome": {...}}` or `{"bail_out": {...}}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamEvent {
    Outcome(Outcome),
    BailOut(BailOut),
}

/// Feed every event read from `input` to `reporter`, writing as they arrive.
///
/// Blank lines are ignored. Line numbers in errors are 1-based.
pub fn stream_events<R, W>(input: R, reporter: &mut TapReporter<W>) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    for (index, line) in input.lines().enumerate() {
        let line = line.context("Failed to read event")?;
        if line.trim().is_empty() {
            continue;
        }

        let event: StreamEvent = serde_json::from_str(&line)
            .with_context(|| format!("Invalid event on line {}", index + 1))?;
        debug!("Event on line {}: {:?}", index + 1, event);

        let reported = match event {
            StreamEvent::Outcome(outcome) => reporter.report_outcome(&outcome),
            StreamEvent::BailOut(bail_out) => reporter.report_bail_out(&bail_out),
        };
        reported.with_context(|| format!("Cannot report event on line {}", index + 1))?;
    }

    Ok(())
}

pub fn handle_stream(args: &StreamArgs, config: Option<&Config>) -> Result<RunSummary> {
    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open events file: {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let output = resolve_output(args.output.as_ref(), config);
    let sink = super::open_output(output.as_deref())?;
    let autoflush = config.map(|cfg| cfg.stream.autoflush).unwrap_or(true);

    let mut reporter = TapReporter::new(args.plan, sink)
        .context("Failed to write TAP header")?
        .with_policy(args.misuse_policy(config))
        .with_autoflush(autoflush);

    stream_events(input, &mut reporter)?;

    let summary = reporter.summary().clone();
    let mut sink = reporter.into_inner();
    sink.flush().context("Failed to flush TAP output")?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::report::MisusePolicy;
    use clap::Parser;

    fn stream(plan: usize, policy: MisusePolicy, input: &str) -> (Result<()>, String) {
        let mut reporter = TapReporter::new(plan, Vec::new())
            .unwrap()
            .with_policy(policy);
        let result = stream_events(input.as_bytes(), &mut reporter);
        let output = String::from_utf8(reporter.into_inner()).unwrap();
        (result, output)
    }

    #[test]
    fn test_event_shapes() {
        let event: StreamEvent =
            serde_json::from_str(r#"{"bail_out": {"explanation": "disk full"}}"#).unwrap();
        assert_eq!(event, StreamEvent::BailOut(BailOut::new("disk full")));

        let event: StreamEvent = serde_json::from_str(r#"{"outcome": {"ok": true}}"#).unwrap();
        assert_eq!(event, StreamEvent::Outcome(Outcome::success()));
    }

    #[test]
    fn test_stream_events_in_order() {
        let input = r#"{"outcome": {"ok": true, "description": "first"}}

{"outcome": {"ok": false, "directive": {"skip": "offline"}}}
{"bail_out": {}}
"#;
        let (result, output) = stream(3, MisusePolicy::Reject, input);

        assert!(result.is_ok());
        assert_eq!(
            output,
            "TAP version 13\n1..3\nok 1 first\nok 2 # SKIP offline\nBail out!\n"
        );
    }

    #[test]
    fn test_strict_stream_rejects_events_after_bail_out() {
        let input = "{\"bail_out\": {}}\n{\"outcome\": {\"ok\": true}}\n";
        let (result, output) = stream(1, MisusePolicy::Reject, input);

        let error = result.expect_err("outcome after bail out is rejected");
        assert!(format!("{:#}", error).contains("line 2"));
        assert_eq!(output, "TAP version 13\n1..1\nBail out!\n");
    }

    #[test]
    fn test_lenient_stream_drops_events_after_bail_out() {
        let input = "{\"bail_out\": {}}\n{\"outcome\": {\"ok\": true}}\n";
        let (result, output) = stream(1, MisusePolicy::Ignore, input);

        assert!(result.is_ok());
        assert_eq!(output, "TAP version 13\n1..1\nBail out!\n");
    }

    #[test]
    fn test_invalid_event_reports_line() {
        let (result, _) = stream(1, MisusePolicy::Reject, "{\"unknown\": 1}\n");
        assert!(format!("{:#}", result.unwrap_err()).contains("line 1"));
    }

    #[test]
    fn test_default_config_accepts_planned_events() {
        let cli = Cli::parse_from(["tap13", "stream", "--plan", "2"]);
        let Some(Commands::Stream(args)) = cli.command else {
            panic!("expected stream command");
        };
        let config = Config::default();
        let mut reporter = TapReporter::new(args.plan, Vec::new())
            .unwrap()
            .with_policy(args.misuse_policy(Some(&config)));

        let input = "{\"outcome\": {\"ok\": true}}\n{\"outcome\": {\"ok\": false}}\n";
        let result = stream_events(input.as_bytes(), &mut reporter);

        assert!(result.is_ok());
        assert_eq!(
            String::from_utf8(reporter.into_inner()).unwrap(),
            "TAP version 13\n1..2\nok 1\nnot ok 2\n"
        );
    }
}
