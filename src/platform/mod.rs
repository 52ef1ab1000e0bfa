//! Host platform surface: tab queries, popup opening, clipboard access
//!
//! The engine never talks to a browser directly. Everything it needs from
//! the host (the active tab's URL, opening the consuming surface, writing
//! an image to the clipboard) goes through the narrow traits here, so the
//! core stays runnable headlessly and every host call is swappable in tests.

pub mod clipboard;
pub mod opener;
pub mod tabs;

pub use clipboard::{Clipboard, NoopClipboard};
pub use opener::{NoopOpener, SurfaceOpener};
pub use tabs::{NoopTabs, StaticTabs, TabQuery};

use std::sync::Arc;

/// The host capabilities handed to a surface.
///
/// Fields are shared so a test can keep its own handle to a noop
/// implementation and observe what the surface did with it.
#[derive(Clone)]
pub struct Host {
    pub tabs: Arc<dyn TabQuery>,
    pub opener: Arc<dyn SurfaceOpener>,
    pub clipboard: Arc<dyn Clipboard>,
}

impl Host {
    /// A host where every capability is a noop; the safe default for tests
    /// and non-browser embeddings.
    pub fn noop() -> Self {
        Self {
            tabs: Arc::new(NoopTabs),
            opener: Arc::new(NoopOpener::new()),
            clipboard: Arc::new(NoopClipboard::new()),
        }
    }
}
