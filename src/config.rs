use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TaggerError};

/// File name of the persisted configuration record, looked up in the
/// current directory and then in the user config directory.
pub const CONFIG_FILE_NAME: &str = "tagger.config.json";

const SCHEMA_URL_TEMPLATE: &str =
    "https://raw.githubusercontent.com/tagger-cli/tagger/{rev}/tagger.schema.json";

/// Git hosting platform named by the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostingProvider {
    GitHub,
    Other,
}

impl std::fmt::Display for HostingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostingProvider::GitHub => write!(f, "GitHub"),
            HostingProvider::Other => write!(f, "Other"),
        }
    }
}

/// GitHub-specific settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Whether to open the Actions page after a push instead of the
    /// repository homepage. `None` means "not set" and falls back to the
    /// crate-wide default when the decision is made.
    #[serde(rename = "openActionPage", skip_serializing_if = "Option::is_none")]
    pub open_action_page: Option<bool>,
}

/// Optional persisted configuration (`tagger.config.json`).
///
/// Absence of the file is a valid state; every consumer falls back to
/// prompting where a setting would have applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(rename = "gitHostingProvider", default)]
    pub git_hosting_provider: Option<HostingProvider>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<GithubConfig>,
}

impl Config {
    /// Whether the configuration names GitHub as the hosting provider.
    pub fn is_github(&self) -> bool {
        self.git_hosting_provider == Some(HostingProvider::GitHub)
    }

    /// The raw tri-state `openActionPage` setting. The default for the
    /// unset case is applied by the open-repository decision, not here.
    pub fn open_action_page(&self) -> Option<bool> {
        self.github.as_ref().and_then(|github| github.open_action_page)
    }
}

/// JSON Schema URL for the current crate version.
pub fn schema_url() -> String {
    SCHEMA_URL_TEMPLATE.replace("{rev}", concat!("v", env!("CARGO_PKG_VERSION")))
}

/// Load the configuration from the current directory, falling back to the
/// user config directory. A missing file is `Ok(None)`.
pub fn load() -> Result<Option<Config>> {
    if let Some(config) = load_in(Path::new("."))? {
        return Ok(Some(config));
    }
    if let Some(config_dir) = dirs::config_dir() {
        return load_from(&config_dir.join(CONFIG_FILE_NAME));
    }
    Ok(None)
}

/// Load the configuration from `dir/tagger.config.json`.
pub fn load_in(dir: &Path) -> Result<Option<Config>> {
    load_from(&dir.join(CONFIG_FILE_NAME))
}

fn load_from(path: &Path) -> Result<Option<Config>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&data)
        .map_err(|e| TaggerError::config(format!("failed to parse {}: {}", path.display(), e)))?;
    Ok(Some(config))
}

/// Write a default configuration file into `dir`.
///
/// Refuses to overwrite an existing file.
pub fn create_default_in(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        return Err(TaggerError::config(format!(
            "config file already exists: {}",
            path.display()
        )));
    }

    let config = Config {
        schema: Some(schema_url()),
        git_hosting_provider: Some(HostingProvider::GitHub),
        github: Some(GithubConfig {
            open_action_page: Some(true),
        }),
    };

    let data = serde_json::to_string_pretty(&config)?;
    fs::write(&path, data)?;
    Ok(path)
}
