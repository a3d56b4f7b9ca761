use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::Version;
use crate::error::{FlowError, Result};

const LOCAL_CONFIG: &str = "./gitflow.toml";
const USER_CONFIG: &str = ".gitflow.toml";

/// Represents the complete configuration for git-flow-release.
///
/// Every key is optional; a missing file yields the defaults.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Remote fetched before every action
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Long-lived integration branch for `merge_cur_to_stage`
    #[serde(default = "default_stage_branch")]
    pub stage_branch: String,

    /// Tag message passed to `git flow ... finish`; `{version}` is substituted
    #[serde(default = "default_tag_message")]
    pub tag_message: String,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_stage_branch() -> String {
    "feature/stage".to_string()
}

fn default_tag_message() -> String {
    "Tagging version {version}".to_string()
}

/// Configuration for behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    #[serde(default = "default_fetch_before_action")]
    pub fetch_before_action: bool,
}

fn default_fetch_before_action() -> bool {
    true
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            fetch_before_action: default_fetch_before_action(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            stage_branch: default_stage_branch(),
            tag_message: default_tag_message(),
            behavior: BehaviorConfig::default(),
        }
    }
}

impl Config {
    /// Render the finish message for a version
    pub fn tag_message_for(&self, version: &Version) -> String {
        self.tag_message.replace("{version}", &version.to_string())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitflow.toml` in current directory
/// 3. `.gitflow.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(LOCAL_CONFIG).exists() {
        fs::read_to_string(LOCAL_CONFIG)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parse a TOML configuration document
pub fn parse_config(source: &str) -> Result<Config> {
    let config: Config = toml::from_str(source).map_err(|e| FlowError::config(e.to_string()))?;

    if config.stage_branch.trim().is_empty() {
        return Err(FlowError::config("stage_branch must not be empty"));
    }
    if config.remote.trim().is_empty() {
        return Err(FlowError::config("remote must not be empty"));
    }

    Ok(config)
}
