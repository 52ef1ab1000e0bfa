use std::sync::Mutex;

use crate::Result;

/// Write access to the host clipboard.
///
/// The mime tag travels with the bytes so a host can widen format support
/// without a trait change; the popup surface itself only ever writes png.
pub trait Clipboard: Send + Sync {
    fn write_image(&self, mime: &str, bytes: &[u8]) -> Result<()>;
}

/// A clipboard that remembers the last write instead of talking to a host.
pub struct NoopClipboard {
    last: Mutex<Option<(String, Vec<u8>)>>,
}

impl NoopClipboard {
    pub fn new() -> Self {
        Self { last: Mutex::new(None) }
    }

    /// The most recent write, if any.
    pub fn last_write(&self) -> Option<(String, Vec<u8>)> {
        self.last.lock().unwrap().clone()
    }
}

impl Default for NoopClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for NoopClipboard {
    fn write_image(&self, mime: &str, bytes: &[u8]) -> Result<()> {
        let mut guard = self.last.lock().unwrap();
        *guard = Some((mime.to_string(), bytes.to_vec()));
        Ok(())
    }
}
