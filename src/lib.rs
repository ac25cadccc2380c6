pub mod cli;
pub mod commands;
pub mod config;
pub mod execution;
pub mod logging;
pub mod report;
pub mod state;

pub use execution::{RunError, RunStatus, Test, run, run_report, run_streaming, tap};
pub use report::{Report, ReportCollector, ReportError, Reporter, TapReporter};
pub use state::{BailOut, Directive, MetaValue, Metadata, Outcome, Signal};
