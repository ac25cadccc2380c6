// Execution module

pub mod runner;

pub use runner::{RunError, RunStatus, Test, run, run_report, run_streaming, tap};
