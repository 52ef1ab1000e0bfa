//! qrforge: QR customization state & handoff engine
//!
//! A headless core for QR-code generator frontends: the customization
//! settings model, the deep-merge engine reconciling partial UI edits with
//! persisted defaults, an async key/value state store, and the single-slot
//! pending-context handoff that carries a payload from a background trigger
//! (a context-menu click) to the next-opened popup exactly once.
//!
//! # Features
//!
//! - **Merge engine**: pure, total deep-merge of partial patches over
//!   complete settings/state values; arrays replace wholesale
//! - **Consume-once handoff**: destructive-read mailbox with lazy expiry,
//!   giving at-most-one delivery per published context
//! - **Swappable boundaries**: rendering and host access (tabs, clipboard,
//!   popup opening) live behind traits with in-tree defaults
//!
//! # Example
//!
//! ```
//! use qrforge::{HashRenderer, Host, PopupSurface, StoreHandle};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> qrforge::Result<()> {
//! let store = StoreHandle::in_memory();
//! let mut popup = PopupSurface::new(store, HashRenderer::new(), Host::noop());
//!
//! popup.open().await?;
//! popup.set_input("https://example.com");
//! popup.generate_from_input().await?;
//!
//! let blob = popup.export(qrforge::ExportFormat::Png)?;
//! assert!(blob.is_some());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod model;
pub use model::{
    ColorStop, DotStyle, ExportFormat, GradientKind, QrColors, QrCustomizationSettings,
    QrFrameSettings, QrGradient, QrLogoSettings, QrSizeSettings, QrSourceType, QrState,
    SizePreset,
};

pub mod merge;
pub use merge::{merge_settings, merge_state, SettingsPatch, StatePatch};

pub mod store;
pub use store::{JsonFileBackend, MemoryBackend, StorageKey, StoreBackend, StoreHandle};

pub mod pending;
pub use pending::PendingContext;

pub mod render;
pub use render::{ExportBlob, HashRenderer, RenderPlan, Renderer};

// Host platform surface (tabs, popup opening, clipboard)
pub mod platform;
pub use platform::Host;

// The three UI-surface orchestrators
pub mod surface;
pub use surface::{
    BackgroundSurface, MenuAction, MenuClick, Notice, OptionsSurface, PopupSurface,
};
