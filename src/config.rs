//! Client configuration.
//!
//! Resolved from `<config_dir>/contentfeed/config.json`, then overridden by
//! environment variables:
//! - `CONTENTFEED_API_HOST`, `CONTENTFEED_APP_HOST`, `CONTENTFEED_STATIC_HOST`
//! - `CONTENTFEED_TOKEN`
//! - `CONTENTFEED_SHARED_LINK`, `CONTENTFEED_SHARED_LINK_PASSWORD`

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_NAME: &str = "contentfeed";
const CONFIG_FILE: &str = "config.json";

const DEFAULT_API_HOST: &str = "https://api.box.com";
const DEFAULT_APP_HOST: &str = "https://app.box.com";
const DEFAULT_STATIC_HOST: &str = "https://cdn01.boxcdn.net";
const API_VERSION: &str = "2.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Host serving the REST API, without the version segment.
    #[serde(default = "default_api_host")]
    pub api_host: String,
    /// Host of the web app, used to build links to files.
    #[serde(default = "default_app_host")]
    pub app_host: String,
    #[serde(default = "default_static_host")]
    pub static_host: String,
    /// Bearer token sent with every request.
    #[serde(default)]
    pub token: Option<String>,
    /// Shared link the file is accessed through, if any.
    #[serde(default)]
    pub shared_link: Option<String>,
    #[serde(default)]
    pub shared_link_password: Option<String>,
    /// Whether the viewer may download the file.
    #[serde(default = "default_true")]
    pub can_download: bool,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_host() -> String {
    DEFAULT_API_HOST.to_string()
}

fn default_app_host() -> String {
    DEFAULT_APP_HOST.to_string()
}

fn default_static_host() -> String {
    DEFAULT_STATIC_HOST.to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_host: default_api_host(),
            app_host: default_app_host(),
            static_host: default_static_host(),
            token: None,
            shared_link: None,
            shared_link_password: None,
            can_download: true,
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Config pointing at a given API host, defaults elsewhere.
    pub fn with_api_host(api_host: impl Into<String>) -> Self {
        Self {
            api_host: api_host.into(),
            ..Self::default()
        }
    }

    /// Load configuration from the user's config directory.
    /// Returns default config if file doesn't exist or fails to parse.
    pub fn load() -> Self {
        let loaded = get_config_path().and_then(|path| {
            if path.exists() {
                Self::load_from(&path)
            } else {
                Ok(Self::default())
            }
        });
        match loaded {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = serde_json::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Apply `CONTENTFEED_*` environment overrides.
    pub fn apply_env(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("CONTENTFEED_API_HOST") {
            self.api_host = v;
        }
        if let Some(v) = lookup("CONTENTFEED_APP_HOST") {
            self.app_host = v;
        }
        if let Some(v) = lookup("CONTENTFEED_STATIC_HOST") {
            self.static_host = v;
        }
        if let Some(v) = lookup("CONTENTFEED_TOKEN") {
            self.token = Some(v);
        }
        if let Some(v) = lookup("CONTENTFEED_SHARED_LINK") {
            self.shared_link = Some(v);
        }
        if let Some(v) = lookup("CONTENTFEED_SHARED_LINK_PASSWORD") {
            self.shared_link_password = Some(v);
        }
        self
    }

    /// Versioned API root, e.g. `https://api.box.com/2.0`.
    pub fn base_api_url(&self) -> String {
        format!("{}/{}", self.api_host.trim_end_matches('/'), API_VERSION)
    }

    /// Link to a file in the web app.
    pub fn file_url(&self, file_id: &str) -> String {
        format!("{}/file/{}", self.app_host.trim_end_matches('/'), file_id)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Value of the `BoxApi` header for shared link access.
    pub fn shared_link_header(&self) -> Option<String> {
        let link = self.shared_link.as_deref()?;
        let mut value = format!("shared_link={}", link);
        if let Some(password) = self.shared_link_password.as_deref() {
            value.push_str("&shared_link_password=");
            value.push_str(password);
        }
        Some(value)
    }

    /// Copy safe to print: secrets replaced with a fixed mask.
    pub fn redacted(&self) -> Self {
        let mask = |v: &Option<String>| v.as_ref().map(|_| "********".to_string());
        Self {
            token: mask(&self.token),
            shared_link_password: mask(&self.shared_link_password),
            ..self.clone()
        }
    }
}

/// Default location of the config file.
pub fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
