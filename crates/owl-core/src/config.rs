use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-project settings from `.owl/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub consolidate: ConsolidateConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidateConfig {
    /// Reorder dictionaries by usage before writing.
    #[serde(default = "default_true")]
    pub optimize: bool,
    /// Indent written JSON.
    #[serde(default)]
    pub pretty: bool,
}

impl Default for ConsolidateConfig {
    fn default() -> Self {
        Self {
            optimize: default_true(),
            pretty: false,
        }
    }
}

/// Per-user settings from `<config dir>/owl/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    /// Default output mode: `pretty`, `text` or `json`.
    #[serde(default)]
    pub output: Option<String>,
}

/// Load `.owl/config.toml` below `project_root`, or defaults if it is absent.
///
/// # Errors
///
/// Fails if the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(".owl/config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load the user config from the platform config directory.
///
/// # Errors
///
/// Fails if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };
    load_user_config_from(&config_dir)
}

/// Load `owl/config.toml` below an explicit config directory.
///
/// # Errors
///
/// Fails if the file exists but cannot be read or parsed.
pub fn load_user_config_from(config_dir: &Path) -> Result<UserConfig> {
    let path = config_dir.join("owl/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

const fn default_true() -> bool {
    true
}
