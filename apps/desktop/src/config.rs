use std::{fs, path::Path};

use anyhow::{anyhow, Context};
use shared::domain::MAX_PDF_BYTES;
use tracing::warn;
use url::Url;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_CONFIG_FILE: &str = "pdf_qa.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub backend_url: String,
    pub max_upload_bytes: u64,
    pub command_queue_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.into(),
            max_upload_bytes: MAX_PDF_BYTES,
            command_queue_capacity: 64,
        }
    }
}

pub fn load_settings(config_path: &Path) -> Settings {
    let file_cfg = fs::read_to_string(config_path).ok();
    settings_from_sources(file_cfg.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then the TOML file, then environment variables (`APP__` prefixed names win).
/// The upload limit can be lowered but never raised above [`MAX_PDF_BYTES`].
pub fn settings_from_sources(
    file_cfg: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file_cfg {
        match raw.parse::<toml::Table>() {
            Ok(table) => {
                if let Some(v) = table.get("backend_url").and_then(|v| v.as_str()) {
                    settings.backend_url = v.to_string();
                }
                if let Some(v) = table
                    .get("max_upload_bytes")
                    .and_then(|v| v.as_integer())
                    .and_then(|v| u64::try_from(v).ok())
                {
                    settings.max_upload_bytes = v;
                }
                if let Some(v) = table
                    .get("command_queue_capacity")
                    .and_then(|v| v.as_integer())
                    .and_then(|v| usize::try_from(v).ok())
                    .filter(|v| *v > 0)
                {
                    settings.command_queue_capacity = v;
                }
            }
            Err(err) => warn!("ignoring unreadable config file: {err}"),
        }
    }

    if let Some(v) = env("BACKEND_URL") {
        settings.backend_url = v;
    }
    if let Some(v) = env("APP__BACKEND_URL") {
        settings.backend_url = v;
    }

    if let Some(v) = env("APP__MAX_UPLOAD_BYTES") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.max_upload_bytes = parsed;
        }
    }

    if settings.max_upload_bytes > MAX_PDF_BYTES {
        warn!(
            requested = settings.max_upload_bytes,
            "max_upload_bytes above the backend limit; using {MAX_PDF_BYTES}"
        );
        settings.max_upload_bytes = MAX_PDF_BYTES;
    }

    if let Some(v) = env("APP__COMMAND_QUEUE_CAPACITY") {
        if let Ok(parsed) = v.parse::<usize>() {
            if parsed > 0 {
                settings.command_queue_capacity = parsed;
            }
        }
    }

    settings
}

pub fn normalize_backend_url(raw_backend_url: &str) -> anyhow::Result<String> {
    let trimmed = raw_backend_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(DEFAULT_BACKEND_URL.to_string());
    }

    let parsed = Url::parse(trimmed)
        .with_context(|| format!("backend url '{trimmed}' is not a valid url"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(anyhow!(
            "backend url '{trimmed}' must use http or https, not '{other}'"
        )),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
