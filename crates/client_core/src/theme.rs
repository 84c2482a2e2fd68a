//! Persisted theme preference and the design modal.

use std::{collections::HashMap, sync::Arc};

use anyhow::Result;
use async_trait::async_trait;
use shared::domain::{ThemePreference, DESIGN_MODAL_ID, THEME_STORAGE_KEY};
use storage::Storage;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

/// Local key-value storage for user settings.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

#[async_trait]
impl SettingsStore for Storage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.get_setting(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.put_setting(key, value).await
    }
}

/// Settings kept only for the lifetime of the process.
#[derive(Default)]
pub struct MemorySettingsStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries: Mutex::new(entries),
        }
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Typed access to the settings the client persists.
#[derive(Clone)]
pub struct SettingsService {
    store: Arc<dyn SettingsStore>,
    default_theme: ThemePreference,
}

impl SettingsService {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self {
            store,
            default_theme: ThemePreference::default(),
        }
    }

    pub fn with_default_theme(mut self, default_theme: ThemePreference) -> Self {
        self.default_theme = default_theme;
        self
    }

    /// The stored theme, or the default when nothing (or an empty value)
    /// was stored.
    pub async fn theme(&self) -> Result<ThemePreference> {
        Ok(self
            .store
            .get(THEME_STORAGE_KEY)
            .await?
            .filter(|value| !value.is_empty())
            .map(ThemePreference::from)
            .unwrap_or_else(|| self.default_theme.clone()))
    }

    pub async fn set_theme(&self, theme: &ThemePreference) -> Result<()> {
        self.store.set(THEME_STORAGE_KEY, theme.as_str()).await
    }
}

/// Receives the class applied to the document root.
pub trait ThemeTarget: Send + Sync {
    fn set_root_class(&self, class: &str);
}

pub struct ThemeManager {
    settings: SettingsService,
    target: Arc<dyn ThemeTarget>,
    applied: RwLock<Option<ThemePreference>>,
}

impl ThemeManager {
    pub fn new(settings: SettingsService, target: Arc<dyn ThemeTarget>) -> Self {
        Self {
            settings,
            target,
            applied: RwLock::new(None),
        }
    }

    /// Apply the persisted theme (or the default). The resolved value is
    /// written back, so a first start leaves the default in storage.
    pub async fn initialize(&self) -> Result<ThemePreference> {
        let theme = self.settings.theme().await?;
        info!(theme = %theme, "restoring persisted theme");
        self.set_theme(theme.clone()).await?;
        Ok(theme)
    }

    /// Persist `theme` and apply it immediately. Any name is accepted.
    pub async fn set_theme(&self, theme: impl Into<ThemePreference>) -> Result<()> {
        let theme = theme.into();
        self.settings.set_theme(&theme).await?;
        self.target.set_root_class(theme.as_str());
        debug!(theme = %theme, "theme applied");
        *self.applied.write().await = Some(theme);
        Ok(())
    }

    pub async fn current_theme(&self) -> Option<ThemePreference> {
        self.applied.read().await.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalDisplay {
    Flex,
    #[default]
    Hidden,
}

impl ModalDisplay {
    pub fn css_value(self) -> &'static str {
        match self {
            ModalDisplay::Flex => "flex",
            ModalDisplay::Hidden => "none",
        }
    }
}

/// Theme picker dialog. Its display flag is the only state it has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignModal {
    element_id: String,
    display: ModalDisplay,
}

impl DesignModal {
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            display: ModalDisplay::Hidden,
        }
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn display(&self) -> ModalDisplay {
        self.display
    }

    pub fn is_visible(&self) -> bool {
        self.display == ModalDisplay::Flex
    }

    pub fn open(&mut self) {
        self.display = ModalDisplay::Flex;
    }

    pub fn close(&mut self) {
        self.display = ModalDisplay::Hidden;
    }
}

impl Default for DesignModal {
    fn default() -> Self {
        Self::new(DESIGN_MODAL_ID)
    }
}

#[cfg(test)]
#[path = "tests/theme_tests.rs"]
mod tests;
