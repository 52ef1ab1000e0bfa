//! The popup: the consuming surface where QR codes are generated
//!
//! Lifecycle on open: load the last-used state (falling back to persisted
//! defaults, then built-ins), then check the pending-context slot exactly
//! once. Every generate runs the full merge-render-persist pipeline and
//! adopts the merged state only after the store write succeeded.

use futures::join;
use url::Url;

use crate::merge::{merge_state, StatePatch};
use crate::model::{ExportFormat, QrCustomizationSettings, QrSourceType, QrState};
use crate::pending;
use crate::platform::Host;
use crate::render::{ExportBlob, Renderer};
use crate::store::{StorageKey, StoreHandle};
use crate::surface::{Notice, NoticeHandler};
use crate::Result;

pub struct PopupSurface<R: Renderer> {
    store: StoreHandle,
    renderer: R,
    host: Host,
    state: QrState,
    /// The text field's current content; the merge fallback for blank patches.
    input: String,
    on_notice: Option<NoticeHandler>,
}

impl<R: Renderer> PopupSurface<R> {
    pub fn new(store: StoreHandle, renderer: R, host: Host) -> Self {
        Self {
            store,
            renderer,
            host,
            state: QrState::with_settings(QrCustomizationSettings::default()),
            input: String::new(),
            on_notice: None,
        }
    }

    /// Register a handler for transient user notices.
    pub fn on_notice<F>(&mut self, cb: F)
    where
        F: Fn(&Notice) + Send + Sync + 'static,
    {
        self.on_notice = Some(std::sync::Arc::new(cb));
    }

    /// Remove a previously registered notice handler, if any.
    pub fn clear_on_notice(&mut self) {
        self.on_notice = None;
    }

    fn notify(&self, message: impl Into<String>) {
        let notice = Notice::new(message);
        log::debug!("notice: {}", notice.message);
        if let Some(cb) = &self.on_notice {
            cb(&notice);
        }
    }

    /// Run the open sequence: restore state, then consume the handoff slot.
    ///
    /// Returns `true` when a pending context was consumed and rendered.
    pub async fn open(&mut self) -> Result<bool> {
        self.load_initial_state().await?;

        if self.apply_pending_context().await? {
            self.notify("Generated from context menu");
            return Ok(true);
        }

        // No handoff: re-render the restored state if it has a payload.
        if !self.state.payload.trim().is_empty() {
            let payload = self.state.payload.clone();
            self.renderer
                .update(&payload, &self.state.settings)
                .map_err(|e| {
                    log::warn!("restoring last state failed: {e}");
                    e
                })?;
        }
        Ok(false)
    }

    /// Restore the last-used state, or defaults when none was ever saved.
    ///
    /// The two reads are independent operations against different keys and
    /// are issued concurrently; they may observe different generations.
    pub async fn load_initial_state(&mut self) -> Result<()> {
        let (last, defaults) = join!(
            self.store.get::<QrState>(StorageKey::LastState),
            self.store.get::<QrCustomizationSettings>(StorageKey::DefaultSettings),
        );

        self.state = match last? {
            Some(saved) => saved,
            None => QrState::with_settings(defaults?.unwrap_or_default()),
        };
        self.input = self.state.payload.clone();
        Ok(())
    }

    /// Check the handoff slot once; generate from it when an entry arrives.
    async fn apply_pending_context(&mut self) -> Result<bool> {
        let Some(ctx) = pending::consume(&self.store, pending::DEFAULT_MAX_AGE_MS).await? else {
            return Ok(false);
        };
        if ctx.payload.is_empty() {
            return Ok(false);
        }

        self.input = ctx.payload.clone();
        self.generate(StatePatch {
            source_type: Some(ctx.source_type),
            payload: Some(ctx.payload),
            settings: None,
        })
        .await
    }

    /// Merge `patch` over the current state, render, persist, adopt.
    ///
    /// A blank merged payload aborts with a notice and touches nothing.
    /// Returns `true` when a QR was generated and the state persisted.
    pub async fn generate(&mut self, patch: StatePatch) -> Result<bool> {
        let merged = merge_state(&self.state, &patch, &self.input);

        if merged.payload.trim().is_empty() {
            self.notify("Enter text or use the active tab URL");
            return Ok(false);
        }

        self.renderer.update(&merged.payload, &merged.settings)?;
        self.store.set(StorageKey::LastState, &merged).await?;
        self.state = merged;
        Ok(true)
    }

    /// Generate from the text field, classifying URLs as `CustomUrl`.
    pub async fn generate_from_input(&mut self) -> Result<bool> {
        let patch = StatePatch {
            source_type: Some(classify_input(&self.input)),
            payload: Some(self.input.clone()),
            settings: None,
        };
        self.generate(patch).await
    }

    /// Generate from the active tab's URL.
    ///
    /// An unreadable tab is reported as a notice and leaves everything
    /// unchanged; it never surfaces as an error to the caller.
    pub async fn generate_from_active_tab(&mut self) -> Result<bool> {
        let url = match self.host.tabs.active_tab_url() {
            Ok(url) => url,
            Err(err) => {
                self.notify(err.to_string());
                return Ok(false);
            }
        };

        self.input = url.clone();
        let generated = self
            .generate(StatePatch {
                source_type: Some(QrSourceType::ActiveTabUrl),
                payload: Some(url),
                settings: None,
            })
            .await?;
        if generated {
            self.notify("Generated from active tab");
        }
        Ok(generated)
    }

    /// Export the current QR. `None` (plus a notice) when nothing is rendered.
    pub fn export(&self, format: ExportFormat) -> Result<Option<ExportBlob>> {
        if self.state.payload.trim().is_empty() {
            self.notify("Nothing to download");
            return Ok(None);
        }
        self.renderer.export(format).map(Some)
    }

    /// Copy the current QR as png to the host clipboard.
    ///
    /// Clipboard failures are caught here and reported as a notice; there is
    /// no retry.
    pub fn copy_png(&self) -> Result<bool> {
        let Some(blob) = self.export(ExportFormat::Png)? else {
            return Ok(false);
        };

        match self.host.clipboard.write_image("image/png", blob.bytes()) {
            Ok(()) => {
                self.notify("Copied to clipboard");
                Ok(true)
            }
            Err(err) => {
                log::warn!("clipboard write failed: {err}");
                self.notify("Clipboard copy failed");
                Ok(false)
            }
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn state(&self) -> &QrState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

/// Absolute URLs count as `CustomUrl`; anything else is plain text.
fn classify_input(input: &str) -> QrSourceType {
    match Url::parse(input.trim()) {
        Ok(_) => QrSourceType::CustomUrl,
        Err(_) => QrSourceType::CustomText,
    }
}
