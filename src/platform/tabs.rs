use crate::{Error, Result};

/// Access to the host's tab state.
pub trait TabQuery: Send + Sync {
    /// URL of the active tab in the current window.
    fn active_tab_url(&self) -> Result<String>;
}

/// A host with no tabs; every query fails with a readable message.
pub struct NoopTabs;

impl TabQuery for NoopTabs {
    fn active_tab_url(&self) -> Result<String> {
        Err(Error::TabUnavailable("no active tab".to_string()))
    }
}

/// A host whose active tab never changes. Handy for demos and tests.
pub struct StaticTabs {
    url: String,
}

impl StaticTabs {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl TabQuery for StaticTabs {
    fn active_tab_url(&self) -> Result<String> {
        Ok(self.url.clone())
    }
}
