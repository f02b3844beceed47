//! Client configuration at ~/.config/seminars/config.toml

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{SeminarError, SeminarResult};

static DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";
const DEFAULT_PAGE_SIZE: u32 = 50;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_api_url() -> Url {
    // Constant, always parses
    Url::parse(DEFAULT_API_URL).expect("default API url is valid")
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn expand_home(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: Url,

    /// Bearer token of the signed-in member
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Seminars requested per list call
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Where exported calendar files are written
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: default_api_url(),
            api_token: None,
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            download_dir: default_download_dir(),
        }
    }
}

impl Config {
    pub fn config_path() -> SeminarResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SeminarError::Config("Could not determine config directory".into()))?
            .join("seminars");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location; a missing file means defaults.
    pub fn load() -> SeminarResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> SeminarResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            SeminarError::Config(format!("Could not read {}: {e}", path.display()))
        })?;

        Self::parse(&contents)
            .map_err(|e| SeminarError::Config(format!("{} in {}", e, path.display())))
    }

    pub fn parse(contents: &str) -> SeminarResult<Self> {
        let mut config: Config =
            toml::from_str(contents).map_err(|e| SeminarError::Config(e.to_string()))?;

        config.download_dir = expand_home(&config.download_dir);

        if config.page_size == 0 {
            return Err(SeminarError::Config("page_size must be at least 1".into()));
        }

        Ok(config)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> SeminarResult<()> {
        let contents = format!(
            "\
# seminars configuration

# Base URL of the member API:
# api_url = \"{}\"

# Token of the signed-in member:
# api_token = \"...\"

# Seminars fetched per request:
# page_size = {}

# Request timeout in seconds:
# timeout_secs = {}

# Where exported .ics files are saved:
# download_dir = \"~/Downloads\"
",
            DEFAULT_API_URL, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SeminarError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| SeminarError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
