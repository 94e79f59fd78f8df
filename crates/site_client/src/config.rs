use std::{fmt, fs, io, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_CONTENT_BASE_URL: &str = "http://127.0.0.1:8080/api-wordpress/wp";
pub const DEFAULT_TRANSACTIONAL_BASE_URL: &str = "http://127.0.0.1:8080/api-laravel";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} is not a valid url ({value}): {source}")]
    InvalidUrl {
        key: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("{key} must be an http(s) base url, got {value}")]
    UnsupportedUrl { key: &'static str, value: String },
    #[error("unknown backend-unavailable policy {0:?}; expected \"fallback-to-demo\" or \"raise\"")]
    UnknownPolicy(String),
}

/// What listing fetches do when the backend cannot serve them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendUnavailablePolicy {
    /// Log a warning and return the built-in demo data (or an empty list).
    #[default]
    FallbackToDemo,
    /// Log an error and return it to the caller.
    Raise,
}

impl BackendUnavailablePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FallbackToDemo => "fallback-to-demo",
            Self::Raise => "raise",
        }
    }
}

impl fmt::Display for BackendUnavailablePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendUnavailablePolicy {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "fallback-to-demo" | "fallback_to_demo" | "fallback" => Ok(Self::FallbackToDemo),
            "raise" => Ok(Self::Raise),
            _ => Err(ConfigError::UnknownPolicy(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Read side: projects, stewards and posts.
    Content,
    /// Write side: form submissions and tech hubs.
    Transactional,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Transactional => "transactional",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub content_base_url: Url,
    pub transactional_base_url: Url,
    pub on_backend_unavailable: BackendUnavailablePolicy,
}

impl ClientConfig {
    pub fn new(content_base_url: &str, transactional_base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            content_base_url: parse_base_url("content_base_url", content_base_url)?,
            transactional_base_url: parse_base_url(
                "transactional_base_url",
                transactional_base_url,
            )?,
            on_backend_unavailable: BackendUnavailablePolicy::default(),
        })
    }

    pub fn with_policy(mut self, policy: BackendUnavailablePolicy) -> Self {
        self.on_backend_unavailable = policy;
        self
    }

    pub fn base_url(&self, backend: Backend) -> &Url {
        match backend {
            Backend::Content => &self.content_base_url,
            Backend::Transactional => &self.transactional_base_url,
        }
    }

    /// Joins `path` below the backend base, keeping any base path prefix.
    pub fn endpoint(&self, backend: Backend, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url(backend).as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn parse_base_url(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl {
        key,
        value: raw.to_string(),
        source,
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::UnsupportedUrl {
            key,
            value: raw.to_string(),
        });
    }

    Ok(url)
}

/// Unvalidated settings as read from file and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub content_base_url: String,
    pub transactional_base_url: String,
    pub on_backend_unavailable: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            content_base_url: DEFAULT_CONTENT_BASE_URL.into(),
            transactional_base_url: DEFAULT_TRANSACTIONAL_BASE_URL.into(),
            on_backend_unavailable: BackendUnavailablePolicy::default().to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    content_base_url: Option<String>,
    transactional_base_url: Option<String>,
    on_backend_unavailable: Option<String>,
}

impl Settings {
    pub fn apply_file(&mut self, path: &Path) {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                return;
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "failed to read settings file");
                return;
            }
        };

        let file_cfg = match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => file_cfg,
            Err(error) => {
                warn!(path = %path.display(), %error, "ignoring malformed settings file");
                return;
            }
        };

        if let Some(v) = file_cfg.content_base_url {
            self.content_base_url = v;
        }
        if let Some(v) = file_cfg.transactional_base_url {
            self.transactional_base_url = v;
        }
        if let Some(v) = file_cfg.on_backend_unavailable {
            self.on_backend_unavailable = v;
        }
    }

    /// Later names in each list win, so `APP__*` overrides `SITE_*`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let pick = |keys: [&str; 2]| keys.into_iter().filter_map(&lookup).last();

        if let Some(v) = pick(["SITE_CONTENT_BASE_URL", "APP__CONTENT_BASE_URL"]) {
            self.content_base_url = v;
        }
        if let Some(v) = pick(["SITE_TRANSACTIONAL_BASE_URL", "APP__TRANSACTIONAL_BASE_URL"]) {
            self.transactional_base_url = v;
        }
        if let Some(v) = pick(["SITE_ON_BACKEND_UNAVAILABLE", "APP__ON_BACKEND_UNAVAILABLE"]) {
            self.on_backend_unavailable = v;
        }
    }

    pub fn into_config(self) -> Result<ClientConfig, ConfigError> {
        let policy = self.on_backend_unavailable.parse()?;
        Ok(ClientConfig::new(&self.content_base_url, &self.transactional_base_url)?
            .with_policy(policy))
    }
}

/// Defaults, then `path` if it exists, then process environment.
pub fn load_settings(path: &Path) -> Settings {
    let mut settings = Settings::default();
    settings.apply_file(path);
    settings.apply_overrides(|key| std::env::var(key).ok());
    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
