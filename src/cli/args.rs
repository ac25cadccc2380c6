// CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::report::MisusePolicy;

/// Render test results as Test Anything Protocol (version 13) documents
#[derive(Parser, Debug)]
#[command(name = "tap13")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render test results as TAP version 13", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose debug output (on stderr)
    #[arg(short = 'v', long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Show current configuration and exit
    #[arg(long, default_value_t = false)]
    pub config: bool,

    /// Create default configuration file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub init_config: Option<PathBuf>,

    /// Install shell completion (bash, zsh, fish, elvish, powershell)
    #[arg(long, value_name = "SHELL_TYPE", value_parser = ["bash", "zsh", "fish", "elvish", "powershell"])]
    pub completion: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Consolidate JSON reports and print one TAP document
    Render(RenderArgs),

    /// Turn JSON-lines result events into TAP lines as they arrive
    Stream(StreamArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// JSON report files, consolidated in the given order
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Write the document to a file instead of stdout
    #[arg(short = 'o', long, value_name = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,

    /// Run-level explanation, rendered as a comment block after the plan
    #[arg(short = 'e', long)]
    pub explanation: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct StreamArgs {
    /// Number of tests declared in the plan line; events beyond it are
    /// rejected (or dropped with `--lenient`)
    #[arg(short = 'p', long)]
    pub plan: usize,

    /// Read events from a file instead of stdin
    #[arg(short = 'i', long, value_name = "INPUT_FILE")]
    pub input: Option<PathBuf>,

    /// Write TAP to a file instead of stdout
    #[arg(short = 'o', long, value_name = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,

    /// Warn about and drop results after a bail out or beyond the plan
    #[arg(long, default_value_t = false)]
    pub lenient: bool,
}

/// Pick the output path: command-line flag first, then the config file
pub fn resolve_output(flag: Option<&PathBuf>, config: Option<&Config>) -> Option<PathBuf> {
    flag.cloned().or_else(|| {
        config
            .and_then(|cfg| cfg.general.output.as_ref())
            .map(PathBuf::from)
    })
}

impl StreamArgs {
    /// `--lenient` wins over the config file's `strict` setting
    pub fn misuse_policy(&self, config: Option<&Config>) -> MisusePolicy {
        if self.lenient {
            MisusePolicy::Ignore
        } else {
            config.map(Config::misuse_policy).unwrap_or_default()
        }
    }
}
