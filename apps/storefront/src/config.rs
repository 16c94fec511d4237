use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context};
use serde::Deserialize;
use shared::domain::SessionId;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = "storefront.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base: String,
    pub session_id: String,
    pub generate_session: bool,
    pub request_timeout_secs: u64,
    pub brand: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:5000".into(),
            session_id: SessionId::PLACEHOLDER.into(),
            generate_session: false,
            request_timeout_secs: 30,
            brand: "Shopport".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base: Option<String>,
    session_id: Option<String>,
    generate_session: Option<bool>,
    request_timeout_secs: Option<u64>,
    brand: Option<String>,
}

impl Settings {
    pub fn api_base_url(&self) -> anyhow::Result<Url> {
        let url = Url::parse(self.api_base.trim())
            .with_context(|| format!("invalid api base url '{}'", self.api_base))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("api base url must use http or https, got '{}'", url.scheme());
        }
        Ok(url)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

pub fn load_settings(path: &Path) -> Settings {
    load_settings_with(path, |key| std::env::var(key).ok())
}

/// Defaults, then the TOML file at `path` if readable, then environment.
pub fn load_settings_with(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => apply_file(&mut settings, file_cfg),
            Err(err) => tracing::warn!("ignoring malformed '{}': {err}", path.display()),
        }
    }

    if let Some(v) = env("STOREFRONT_API_BASE") {
        settings.api_base = v;
    }
    if let Some(v) = env("APP__API_BASE") {
        settings.api_base = v;
    }

    if let Some(v) = env("STOREFRONT_SESSION_ID") {
        settings.session_id = v;
    }
    if let Some(v) = env("APP__SESSION_ID") {
        settings.session_id = v;
    }

    if let Some(v) = env("APP__GENERATE_SESSION") {
        match v.parse::<bool>() {
            Ok(parsed) => settings.generate_session = parsed,
            Err(_) => tracing::warn!("invalid APP__GENERATE_SESSION value: {v}"),
        }
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = parsed,
            Err(_) => tracing::warn!("invalid APP__REQUEST_TIMEOUT_SECS value: {v}"),
        }
    }

    if let Some(v) = env("APP__BRAND") {
        settings.brand = v;
    }

    settings
}

fn apply_file(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.api_base {
        settings.api_base = v;
    }
    if let Some(v) = file_cfg.session_id {
        settings.session_id = v;
    }
    if let Some(v) = file_cfg.generate_session {
        settings.generate_session = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file_cfg.brand {
        settings.brand = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
