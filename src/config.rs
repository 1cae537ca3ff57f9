use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "release.toml";

/// File name looked up in the user config directory.
pub const USER_CONFIG_FILE: &str = ".release.toml";

/// Represents the complete configuration for git-release.
///
/// Contains the manifest location, the publish remote, the coverage gate and
/// the external commands each subcommand runs.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default)]
    pub coverage: CoverageConfig,

    #[serde(default)]
    pub commands: CommandsConfig,
}

fn default_manifest() -> PathBuf {
    PathBuf::from("pyproject.toml")
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_threshold() -> u32 {
    80
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

fn default_install_commands() -> Vec<Vec<String>> {
    vec![argv(&["uv", "sync"]), argv(&["uv", "pip", "install", "-e", "."])]
}

fn default_test_command() -> Vec<String> {
    argv(&["uv", "run", "pytest"])
}

fn default_coverage_command() -> Vec<String> {
    argv(&["uv", "run", "pytest", "--cov", "--cov-report=term-missing"])
}

/// Coverage gate applied before a release.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CoverageConfig {
    /// Releases below this percentage need explicit confirmation.
    #[serde(default = "default_threshold")]
    pub threshold: u32,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        CoverageConfig {
            threshold: default_threshold(),
        }
    }
}

/// External commands, each an argv list.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommandsConfig {
    #[serde(default = "default_install_commands")]
    pub install: Vec<Vec<String>>,

    #[serde(default = "default_test_command")]
    pub test: Vec<String>,

    #[serde(default = "default_coverage_command")]
    pub coverage: Vec<String>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        CommandsConfig {
            install: default_install_commands(),
            test: default_test_command(),
            coverage: default_coverage_command(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            manifest: default_manifest(),
            remote: default_remote(),
            coverage: CoverageConfig::default(),
            commands: CommandsConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text and validate it.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(text).map_err(|e| ReleaseError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the workflow cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.coverage.threshold > 100 {
            return Err(ReleaseError::config(format!(
                "coverage.threshold must be between 0 and 100, got {}",
                self.coverage.threshold
            )));
        }

        if self.remote.trim().is_empty() {
            return Err(ReleaseError::config("remote must not be empty"));
        }

        if self.manifest.as_os_str().is_empty() {
            return Err(ReleaseError::config("manifest must not be empty"));
        }

        let named = [
            ("commands.test", &self.commands.test),
            ("commands.coverage", &self.commands.coverage),
        ];
        for (name, command) in named {
            if command.is_empty() || command[0].trim().is_empty() {
                return Err(ReleaseError::config(format!("{} must not be empty", name)));
            }
        }

        for (i, command) in self.commands.install.iter().enumerate() {
            if command.is_empty() || command[0].trim().is_empty() {
                return Err(ReleaseError::config(format!(
                    "commands.install[{}] must not be empty",
                    i
                )));
            }
        }

        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release.toml` in the given directory
/// 3. `~/.config/.release.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `base_dir` - Directory searched for `release.toml`
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&Path>, base_dir: &Path) -> Result<Config> {
    let local = base_dir.join(LOCAL_CONFIG_FILE);

    let source = if let Some(path) = config_path {
        path.to_path_buf()
    } else if local.exists() {
        local
    } else if let Some(user) = dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.exists())
    {
        user
    } else {
        log::debug!("no config file found, using defaults");
        return Ok(Config::default());
    };

    log::debug!("loading config from {}", source.display());
    let text = fs::read_to_string(&source).map_err(|e| {
        ReleaseError::config(format!("cannot read {}: {}", source.display(), e))
    })?;

    Config::from_toml(&text)
}
