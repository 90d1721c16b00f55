use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const API_URL_ENV_VAR: &str = "VIDDIGEST_API_URL";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Fixed UI delays.
pub mod timing {
    use std::time::Duration;

    pub const SCROLL_DELAY: Duration = Duration::from_millis(300);
    pub const TICKER_INTERVAL: Duration = Duration::from_millis(2000);
    pub const COPY_FLASH: Duration = Duration::from_millis(2000);
    pub const TOAST_SLIDE: Duration = Duration::from_millis(300);
    pub const TOAST_VISIBLE: Duration = Duration::from_millis(3000);
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_url: String,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    api_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Resolve the config: explicit override, then `VIDDIGEST_API_URL`,
    /// then the config file, then built-in defaults.
    pub fn load(api_url_override: Option<&str>) -> Result<Self, ConfigError> {
        let env_url = std::env::var(API_URL_ENV_VAR).ok();
        Self::resolve(api_url_override, env_url.as_deref(), default_config_path().as_deref())
    }

    pub fn resolve(
        api_url_override: Option<&str>,
        env_url: Option<&str>,
        file: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = file.filter(|p| p.exists()) {
            let file_config = read_config_file(path)?;
            if let Some(url) = file_config.api_url {
                config.api_url = url;
            }
            match file_config.request_timeout_secs {
                Some(0) => {
                    return Err(ConfigError::ZeroTimeout {
                        path: path.to_path_buf(),
                    });
                }
                Some(secs) => config.request_timeout = Duration::from_secs(secs),
                None => {}
            }
        }

        if let Some(url) = env_url.filter(|u| !u.trim().is_empty()) {
            config.api_url = url.to_string();
        }
        if let Some(url) = api_url_override {
            config.api_url = url.to_string();
        }

        config.api_url = normalize_api_url(&config.api_url)?;
        Ok(config)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("viddigest").join("config.toml"))
}

fn read_config_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn normalize_api_url(url: &str) -> Result<String, ConfigError> {
    let trimmed = url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidApiUrl {
            url: url.to_string(),
            reason: "must start with http:// or https://".to_string(),
        });
    }
    Ok(trimmed.to_string())
}
