use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "scoring_panel.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    /// Station token (`red_near`) or full panel url.
    pub launch_context: Option<String>,
    pub reconnect_delay_ms: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".into(),
            launch_context: None,
            reconnect_delay_ms: 3000,
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    server_url: Option<String>,
    position: Option<String>,
    reconnect_delay_ms: Option<u64>,
    log_filter: Option<String>,
}

/// Reads settings from `config_path` (or `scoring_panel.toml` in the working
/// directory when present) and then from the environment.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let file_contents = match config_path {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?,
        ),
        None => fs::read_to_string(DEFAULT_CONFIG_FILE).ok(),
    };
    settings_from_sources(file_contents.as_deref(), |key| std::env::var(key).ok())
}

pub(crate) fn settings_from_sources(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        let file_cfg: FileSettings = toml::from_str(raw).context("invalid scoring panel config")?;
        if let Some(v) = file_cfg.server_url {
            settings.server_url = v;
        }
        if let Some(v) = file_cfg.position {
            settings.launch_context = Some(v);
        }
        if let Some(v) = file_cfg.reconnect_delay_ms {
            settings.reconnect_delay_ms = v;
        }
        if let Some(v) = file_cfg.log_filter {
            settings.log_filter = v;
        }
    }

    if let Some(v) = env("SCORING_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = env("SCORING_POSITION") {
        settings.launch_context = Some(v);
    }
    if let Some(v) = env("APP__POSITION") {
        settings.launch_context = Some(v);
    }

    if let Some(v) = env("APP__RECONNECT_DELAY_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.reconnect_delay_ms = parsed;
        }
    }

    if let Some(v) = env("RUST_LOG") {
        settings.log_filter = v;
    }

    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
