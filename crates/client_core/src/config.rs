use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;
use shared::domain::{ThemePreference, DEFAULT_THEME};

use crate::feedback::FeedbackMessages;

pub const DEFAULT_CONFIG_FILE: &str = "client.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub server_url: String,
    pub poll_interval_ms: u64,
    pub default_theme: String,
    pub settings_database_url: String,
    pub local_acknowledgement: bool,
    pub thank_you_message: String,
    pub failure_message: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        let messages = FeedbackMessages::default();
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            poll_interval_ms: 2000,
            default_theme: DEFAULT_THEME.into(),
            settings_database_url: "sqlite://./data/settings.db".into(),
            local_acknowledgement: true,
            thank_you_message: messages.thank_you,
            failure_message: messages.failure,
        }
    }
}

impl ClientSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn default_theme(&self) -> ThemePreference {
        ThemePreference::new(self.default_theme.clone())
    }

    pub fn feedback_messages(&self) -> FeedbackMessages {
        FeedbackMessages {
            thank_you: self.thank_you_message.clone(),
            failure: self.failure_message.clone(),
        }
    }
}

/// Defaults, then `client.toml` in the working directory, then environment.
pub fn load_settings() -> anyhow::Result<ClientSettings> {
    load_settings_from(Path::new(DEFAULT_CONFIG_FILE))
}

pub fn load_settings_from(path: &Path) -> anyhow::Result<ClientSettings> {
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => parse_settings(&raw)
            .with_context(|| format!("invalid client config '{}'", path.display()))?,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => ClientSettings::default(),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read client config '{}'", path.display()))
        }
    };
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    Ok(settings)
}

fn parse_settings(raw: &str) -> anyhow::Result<ClientSettings> {
    Ok(toml::from_str(raw)?)
}

fn apply_env_overrides(settings: &mut ClientSettings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = var("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = var("APP__POLL_INTERVAL_MS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.poll_interval_ms = parsed,
            Err(_) => tracing::warn!(value = %v, "ignoring invalid APP__POLL_INTERVAL_MS"),
        }
    }

    if let Some(v) = var("APP__DEFAULT_THEME") {
        settings.default_theme = v;
    }

    if let Some(v) = var("APP__SETTINGS_DATABASE_URL") {
        settings.settings_database_url = v;
    }

    if let Some(v) = var("APP__LOCAL_ACKNOWLEDGEMENT") {
        match v.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => settings.local_acknowledgement = true,
            "0" | "false" | "no" | "off" => settings.local_acknowledgement = false,
            _ => tracing::warn!(value = %v, "ignoring invalid APP__LOCAL_ACKNOWLEDGEMENT"),
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
