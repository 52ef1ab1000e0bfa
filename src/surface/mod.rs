//! Headless orchestrators of the three UI surfaces
//!
//! Each surface is an independent execution context. They share nothing in
//! memory; the persisted store is the only channel between them, which is
//! what makes the pending-context handoff the sole background-to-popup
//! signal besides the open request itself.
//!
//! User-visible feedback is delivered through a registered notice handler;
//! no surface ever panics at a user mistake. Store and render I/O failures
//! propagate to the caller, which renders a generic fallback; by then no
//! partial state has been written.

pub mod background;
pub mod options;
pub mod popup;

pub use background::{BackgroundSurface, MenuAction, MenuClick};
pub use options::OptionsSurface;
pub use popup::PopupSurface;

use std::sync::Arc;

/// A transient, dismissable message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

pub(crate) type NoticeHandler = Arc<dyn Fn(&Notice) + Send + Sync>;
