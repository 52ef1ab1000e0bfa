//! The options page: editing and saving default customization settings

use crate::merge::{merge_settings, SettingsPatch};
use crate::model::QrCustomizationSettings;
use crate::store::{StorageKey, StoreHandle};
use crate::surface::{Notice, NoticeHandler};
use crate::Result;

pub struct OptionsSurface {
    store: StoreHandle,
    on_notice: Option<NoticeHandler>,
}

impl OptionsSurface {
    pub fn new(store: StoreHandle) -> Self {
        Self { store, on_notice: None }
    }

    /// Register a handler for transient user notices.
    pub fn on_notice<F>(&mut self, cb: F)
    where
        F: Fn(&Notice) + Send + Sync + 'static,
    {
        self.on_notice = Some(std::sync::Arc::new(cb));
    }

    fn notify(&self, message: impl Into<String>) {
        if let Some(cb) = &self.on_notice {
            cb(&Notice::new(message));
        }
    }

    /// The persisted default settings, or the built-ins when none were saved.
    pub async fn load(&self) -> Result<QrCustomizationSettings> {
        let saved: Option<QrCustomizationSettings> =
            self.store.get(StorageKey::DefaultSettings).await?;
        Ok(saved.unwrap_or_default())
    }

    /// Merge `patch` over the current defaults and persist the result
    /// wholesale. Returns the saved value.
    pub async fn save(&self, patch: &SettingsPatch) -> Result<QrCustomizationSettings> {
        let base = self.load().await?;
        let merged = merge_settings(&base, patch);
        self.store.set(StorageKey::DefaultSettings, &merged).await?;
        log::info!("default settings saved");
        self.notify("Saved");
        Ok(merged)
    }
}
