use std::sync::atomic::{AtomicUsize, Ordering};

use crate::Result;

/// Ability to bring the consuming surface (the popup) to the front.
///
/// The trigger surface calls this only after its pending-context write has
/// been acknowledged, so the opened surface is guaranteed to observe the
/// publish.
pub trait SurfaceOpener: Send + Sync {
    fn open_popup(&self) -> Result<()>;
}

/// An opener that only counts how often it was asked to open.
pub struct NoopOpener {
    opens: AtomicUsize,
}

impl NoopOpener {
    pub fn new() -> Self {
        Self { opens: AtomicUsize::new(0) }
    }

    /// Number of open requests observed so far.
    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

impl Default for NoopOpener {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceOpener for NoopOpener {
    fn open_popup(&self) -> Result<()> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_opener_counts_requests() {
        let opener = NoopOpener::new();
        assert_eq!(opener.open_count(), 0);
        opener.open_popup().unwrap();
        opener.open_popup().unwrap();
        assert_eq!(opener.open_count(), 2);
    }
}
