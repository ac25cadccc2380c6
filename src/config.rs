// Configuration file handling

use crate::report::MisusePolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub stream: StreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file for TAP documents (stdout when unset)
    #[serde(default)]
    pub output: Option<String>,

    /// Reject results reported after a bail out or beyond the plan
    #[serde(default = "default_strict")]
    pub strict: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: None,
            strict: default_strict(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Flush the output after every result line
    #[serde(default = "default_autoflush")]
    pub autoflush: bool,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            autoflush: default_autoflush(),
        }
    }
}

fn default_strict() -> bool {
    true
}

fn default_autoflush() -> bool {
    true
}

impl Config {
    /// Load configuration from default locations
    pub fn load() -> Option<Self> {
        // Check locations in order:
        // 1. .tap13rc (current directory)
        // 2. ~/.tap13rc (home directory)
        // 3. .tap13rc.toml (current directory)
        // 4. ~/.tap13rc.toml (home directory)

        let cwd = std::env::current_dir().ok()?;
        let home = dirs::home_dir()?;

        let paths = [
            cwd.join(".tap13rc"),
            home.join(".tap13rc"),
            cwd.join(".tap13rc.toml"),
            home.join(".tap13rc.toml"),
        ];

        for path in &paths {
            if path.exists() {
                return Self::load_from_file(path);
            }
        }

        None
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Option<Self> {
        toml::from_str(content).ok()
    }

    /// Generate configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|_| String::new())
    }

    pub fn misuse_policy(&self) -> MisusePolicy {
        MisusePolicy::from_strict(self.general.strict)
    }
}
