use crate::editor::command::{default_args, DEFAULT_PROGRAM};
use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File looked up in the current directory when no path is given
pub const LOCAL_CONFIG_FILE: &str = "release.toml";

/// File looked up in the user config directory
pub const USER_CONFIG_FILE: &str = ".release-bump.toml";

/// Represents the complete configuration for release-bump.
///
/// Contains the tag and commit templates, the key path written into target
/// files, and how those files are edited.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Tag name template; `{version}` is replaced by the short version
    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,

    /// Commit message template; `{version}` is replaced by the short version
    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    /// Dotted key path set in every target file
    #[serde(default = "default_version_key")]
    pub version_key: String,

    #[serde(default)]
    pub behavior: BehaviorConfig,

    #[serde(default)]
    pub editor: EditorConfig,
}

fn default_tag_pattern() -> String {
    "v{version}".to_string()
}

fn default_commit_message() -> String {
    "Release v{version}".to_string()
}

fn default_version_key() -> String {
    "package.version".to_string()
}

fn default_editor_program() -> String {
    DEFAULT_PROGRAM.to_string()
}

/// What to do with a target path that does not exist
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MissingFilePolicy {
    /// Warn and leave the file out of the release
    #[default]
    Skip,
    /// Abort before any file is written
    Fail,
}

/// Configuration for behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct BehaviorConfig {
    #[serde(default)]
    pub missing_file: MissingFilePolicy,
}

/// How target files are rewritten.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EditorConfig {
    /// In-process TOML editing
    #[default]
    Builtin,
    /// External tool printing the rewritten file on stdout
    Command {
        #[serde(default = "default_editor_program")]
        program: String,
        #[serde(default = "default_args")]
        args: Vec<String>,
    },
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tag_pattern: default_tag_pattern(),
            commit_message: default_commit_message(),
            version_key: default_version_key(),
            behavior: BehaviorConfig::default(),
            editor: EditorConfig::default(),
        }
    }
}

impl Config {
    /// Tag name for a short version string
    pub fn tag_name(&self, short_version: &str) -> String {
        self.tag_pattern.replace("{version}", short_version)
    }

    /// Commit message for a short version string
    pub fn commit_message(&self, short_version: &str) -> String {
        self.commit_message.replace("{version}", short_version)
    }

    fn validate(self) -> Result<Self> {
        if !self.tag_pattern.contains("{version}") {
            return Err(ReleaseError::config(format!(
                "tag_pattern '{}' must contain {{version}}",
                self.tag_pattern
            )));
        }
        if self.version_key.trim().is_empty() {
            return Err(ReleaseError::config("version_key must not be empty"));
        }
        Ok(self)
    }
}

/// Parse a configuration document
pub fn parse_config(contents: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(contents).map_err(|e| ReleaseError::config(e.to_string()))?;
    config.validate()
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release.toml` in current directory
/// 3. `.release-bump.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    match find_config_file(config_path) {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            let contents = fs::read_to_string(&path).map_err(|e| {
                ReleaseError::config(format!("cannot read {}: {}", path.display(), e))
            })?;
            parse_config(&contents)
        }
        None => {
            debug!("No configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}

fn find_config_file(config_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(path.to_path_buf());
    }

    let local = Path::new(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local.to_path_buf());
    }

    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.exists())
}
