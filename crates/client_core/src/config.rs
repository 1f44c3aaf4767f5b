use std::{collections::HashMap, fmt, fs, str::FromStr};

use thiserror::Error;
use tracing::warn;
use url::Url;

pub const SETTINGS_FILE: &str = "admin.toml";

/// What a form does when one of its reference lookups fails.
///
/// Under both policies a failure in any lookup empties every lookup list of
/// that batch; the policies differ only in whether submitting stays allowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookupFailurePolicy {
    #[default]
    RenderEmpty,
    BlockSubmit,
}

impl FromStr for LookupFailurePolicy {
    type Err = SettingsError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "render_empty" => Ok(Self::RenderEmpty),
            "block_submit" => Ok(Self::BlockSubmit),
            _ => Err(SettingsError::UnknownLookupPolicy(raw.to_string())),
        }
    }
}

impl fmt::Display for LookupFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RenderEmpty => "render_empty",
            Self::BlockSubmit => "block_submit",
        })
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid api base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("api base url '{0}' must use http or https")]
    UnsupportedScheme(String),
    #[error("unknown lookup failure policy '{0}' (expected render_empty or block_submit)")]
    UnknownLookupPolicy(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub lookup_failure_policy: LookupFailurePolicy,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000/api".into(),
            lookup_failure_policy: LookupFailurePolicy::RenderEmpty,
            log_filter: "info".into(),
        }
    }
}

/// Defaults, then `admin.toml` in the working directory, then environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |name| std::env::var(name).ok());

    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<HashMap<String, String>>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(err) => {
            warn!("ignoring malformed {SETTINGS_FILE}: {err}");
            return;
        }
    };

    if let Some(v) = file_cfg.get("api_base_url") {
        settings.api_base_url = v.clone();
    }
    if let Some(v) = file_cfg.get("lookup_failure_policy") {
        set_policy(settings, v);
    }
    if let Some(v) = file_cfg.get("log_filter") {
        settings.log_filter = v.clone();
    }
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = lookup("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = lookup("APP__LOOKUP_FAILURE_POLICY") {
        set_policy(settings, &v);
    }

    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

fn set_policy(settings: &mut Settings, raw: &str) {
    match raw.parse() {
        Ok(policy) => settings.lookup_failure_policy = policy,
        Err(err) => warn!("keeping lookup policy {}: {err}", settings.lookup_failure_policy),
    }
}

/// Checks the base url and strips any trailing slash so paths can be appended.
pub fn validate_base_url(raw: &str) -> Result<String, SettingsError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|source| SettingsError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(SettingsError::UnsupportedScheme(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
