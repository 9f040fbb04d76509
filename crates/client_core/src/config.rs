use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use shared::protocol::DEFAULT_MAX_TIME_MINUTES;
use thiserror::Error;
use tracing::warn;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://lednice.onrender.com/api";
pub const DEFAULT_SETTINGS_FILE: &str = "fridge.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub api_base_url: Url,
    pub max_time_minutes: u32,
    pub dietary_restrictions: Vec<String>,
    pub request_timeout_secs: u64,
    pub notification_ttl_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_API_BASE_URL).expect("default api url is valid"),
            max_time_minutes: DEFAULT_MAX_TIME_MINUTES,
            dietary_restrictions: Vec::new(),
            request_timeout_secs: 60,
            notification_ttl_secs: 5,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_ttl_secs)
    }

    /// Base URL without a trailing slash, ready for `format!("{base}/path")`.
    pub fn base_url(&self) -> String {
        self.api_base_url.as_str().trim_end_matches('/').to_string()
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid api base url '{value}': {source}")]
    InvalidUrl {
        value: String,
        source: url::ParseError,
    },
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    max_time_minutes: Option<u32>,
    dietary_restrictions: Option<Vec<String>>,
    request_timeout_secs: Option<u64>,
    notification_ttl_secs: Option<u64>,
}

/// Defaults, then `fridge.toml` in the working directory, then environment.
/// Problems are logged and the offending source skipped.
pub fn load_settings() -> ClientSettings {
    let path = Path::new(DEFAULT_SETTINGS_FILE);
    let mut settings = if path.exists() {
        load_settings_from(path).unwrap_or_else(|err| {
            warn!("config: ignoring settings file: {err}");
            ClientSettings::default()
        })
    } else {
        ClientSettings::default()
    };
    apply_process_env(&mut settings);
    settings
}

/// Applies the environment layer on top of already-loaded settings.
pub fn apply_process_env(settings: &mut ClientSettings) {
    apply_env_overrides(settings, |key| std::env::var(key).ok());
}

pub fn load_settings_from(path: &Path) -> Result<ClientSettings, SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file_cfg: FileSettings = toml::from_str(&raw).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut settings = ClientSettings::default();
    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = parse_base_url(&v)?;
    }
    if let Some(v) = file_cfg.max_time_minutes {
        settings.max_time_minutes = v;
    }
    if let Some(v) = file_cfg.dietary_restrictions {
        settings.dietary_restrictions = v;
    }
    match file_cfg.request_timeout_secs {
        Some(0) => warn!(
            "config: ignoring request_timeout_secs = 0 in {}",
            path.display()
        ),
        Some(v) => settings.request_timeout_secs = v,
        None => {}
    }
    if let Some(v) = file_cfg.notification_ttl_secs {
        settings.notification_ttl_secs = v;
    }
    Ok(settings)
}

pub fn parse_base_url(value: &str) -> Result<Url, SettingsError> {
    Url::parse(value.trim()).map_err(|source| SettingsError::InvalidUrl {
        value: value.to_string(),
        source,
    })
}

pub(crate) fn apply_env_overrides(
    settings: &mut ClientSettings,
    lookup: impl Fn(&str) -> Option<String>,
) {
    for key in ["FRIDGE_API_URL", "APP__API_BASE_URL"] {
        if let Some(v) = lookup(key) {
            match parse_base_url(&v) {
                Ok(url) => settings.api_base_url = url,
                Err(err) => warn!("config: ignoring {key}: {err}"),
            }
        }
    }

    if let Some(v) = lookup("APP__MAX_TIME") {
        match v.trim().parse::<u32>() {
            Ok(parsed) => settings.max_time_minutes = parsed,
            Err(err) => warn!("config: ignoring APP__MAX_TIME={v}: {err}"),
        }
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        match v.trim().parse::<u64>() {
            Ok(0) => warn!("config: ignoring APP__REQUEST_TIMEOUT_SECS=0"),
            Ok(parsed) => settings.request_timeout_secs = parsed,
            Err(err) => warn!("config: ignoring APP__REQUEST_TIMEOUT_SECS={v}: {err}"),
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
