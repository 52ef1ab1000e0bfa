//! Pending-context handoff between the trigger and consuming surfaces
//!
//! A single-slot, time-bounded mailbox living under the store's
//! `pendingContext` key. The trigger surface (a context-menu click) publishes
//! a payload here and only then asks the host to open the popup; the
//! acknowledged store write is what makes the popup's consume reliably
//! observe the publish. There is no queue: publishing overwrites any
//! unconsumed entry, and a consumer deletes the slot at first observation,
//! before the age check, so an entry is delivered at most once, stale or
//! not. Expiry is evaluated lazily on read; no timer exists.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::model::QrSourceType;
use crate::store::{StorageKey, StoreHandle};
use crate::Result;

/// Entries older than this are discarded at consumption time.
pub const DEFAULT_MAX_AGE_MS: u64 = 60_000;

/// A published handoff record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingContext {
    pub payload: String,
    pub source_type: QrSourceType,
    /// Creation time in milliseconds since the Unix epoch.
    pub at: u64,
}

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Publish a pending context, overwriting any prior unconsumed entry.
pub async fn publish(store: &StoreHandle, payload: &str, source_type: QrSourceType) -> Result<()> {
    publish_at(store, payload, source_type, now_ms()).await
}

/// Publish with an explicit creation timestamp.
pub async fn publish_at(
    store: &StoreHandle,
    payload: &str,
    source_type: QrSourceType,
    at: u64,
) -> Result<()> {
    let entry = PendingContext { payload: payload.to_string(), source_type, at };
    log::debug!("publishing pending context ({:?}, {} bytes)", source_type, payload.len());
    store.set(StorageKey::PendingContext, &entry).await
}

/// Consume the pending context, if any.
///
/// The slot is deleted at first observation regardless of staleness, so a
/// second call returns `None` even immediately after the first. Entries
/// older than `max_age_ms` are treated as absent (and are already gone).
pub async fn consume(store: &StoreHandle, max_age_ms: u64) -> Result<Option<PendingContext>> {
    consume_at(store, max_age_ms, now_ms()).await
}

/// Consume with an explicit notion of "now"; wall-clock-free for tests.
pub async fn consume_at(
    store: &StoreHandle,
    max_age_ms: u64,
    now_ms: u64,
) -> Result<Option<PendingContext>> {
    let entry: Option<PendingContext> = store.get(StorageKey::PendingContext).await?;
    let Some(entry) = entry else {
        return Ok(None);
    };

    // Destructive read first: the entry must never be observed twice, even
    // when the age check below rejects it.
    store.remove(StorageKey::PendingContext).await?;

    if now_ms.saturating_sub(entry.at) > max_age_ms {
        log::debug!("discarding stale pending context from t={}", entry.at);
        return Ok(None);
    }
    Ok(Some(entry))
}
