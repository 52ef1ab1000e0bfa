//! Persisted key/value state store
//!
//! The store holds exactly three logical entries: the last-used generator
//! state, the user's default customization settings, and the transient
//! pending-context slot. Absence of a key is a valid result, not an error.
//! Writes always replace the stored value wholesale; partial-update
//! semantics live in the merge engine, never here. There is no transaction
//! across keys: concurrent readers of different keys may observe different
//! generations, and overlapping writers resolve last-write-wins.

pub mod file;
pub mod memory;

pub use file::JsonFileBackend;
pub use memory::MemoryBackend;

use std::sync::mpsc::{self, Sender};
use std::thread;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::oneshot;

use crate::{Error, Result};

/// The fixed logical keys of the store document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKey {
    /// Full [`crate::model::QrState`] snapshot written after a successful generate.
    LastState,
    /// [`crate::model::QrCustomizationSettings`] saved from the options surface.
    DefaultSettings,
    /// Transient handoff slot owned by [`crate::pending`].
    PendingContext,
}

impl StorageKey {
    /// Stable name used in the persisted document.
    pub fn as_str(self) -> &'static str {
        match self {
            StorageKey::LastState => "lastState",
            StorageKey::DefaultSettings => "defaultSettings",
            StorageKey::PendingContext => "pendingContext",
        }
    }
}

/// Synchronous storage backend owned by the store worker thread.
///
/// Backends only move whole JSON values; typed encoding/decoding happens in
/// [`StoreHandle`] so every backend stays schema-agnostic.
pub trait StoreBackend: Send + 'static {
    /// Read a value. Missing keys yield `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the value under `key` wholesale.
    fn set(&mut self, key: &str, value: Value) -> Result<()>;

    /// Delete the value under `key`. Deleting a missing key is a no-op.
    fn remove(&mut self, key: &str) -> Result<()>;
}

enum Command {
    Get(&'static str, oneshot::Sender<Result<Option<Value>>>),
    Set(&'static str, Value, oneshot::Sender<Result<()>>),
    Remove(&'static str, oneshot::Sender<Result<()>>),
    Close(oneshot::Sender<Result<()>>),
}

/// An async handle to the state store.
///
/// The handle is cheap to clone; all clones talk to one worker thread that
/// owns the backend and serializes every operation, so callers get an async
/// interface without requiring the backend to be shared across threads.
/// This is the only channel through which the trigger surface and the
/// consuming surfaces communicate.
#[derive(Clone)]
pub struct StoreHandle {
    cmd_tx: Sender<Command>,
}

impl StoreHandle {
    /// Spawn a worker thread owning `backend` and return a handle to it.
    pub fn new<B: StoreBackend>(backend: B) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();

        thread::spawn(move || {
            let mut backend = backend;
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::Get(key, resp) => {
                        let _ = resp.send(backend.get(key));
                    }
                    Command::Set(key, value, resp) => {
                        let _ = resp.send(backend.set(key, value));
                    }
                    Command::Remove(key, resp) => {
                        let _ = resp.send(backend.remove(key));
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(Ok(()));
                        break;
                    }
                }
            }
            log::debug!("store worker exiting");
        });

        Self { cmd_tx }
    }

    /// In-memory store, the default for tests and demos.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    async fn request<T>(
        &self,
        cmd: Command,
        rx: oneshot::Receiver<Result<T>>,
    ) -> Result<T> {
        self.cmd_tx.send(cmd).map_err(|_| Error::StoreClosed)?;
        rx.await.map_err(|_| Error::StoreClosed)?
    }

    /// Read and decode the value under `key`; `Ok(None)` when absent.
    pub async fn get<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>> {
        let (tx, rx) = oneshot::channel();
        let raw = self.request(Command::Get(key.as_str(), tx), rx).await?;
        match raw {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Encode `value` and replace the entry under `key` wholesale.
    pub async fn set<T: Serialize>(&self, key: StorageKey, value: &T) -> Result<()> {
        let encoded = serde_json::to_value(value)?;
        let (tx, rx) = oneshot::channel();
        self.request(Command::Set(key.as_str(), encoded, tx), rx).await
    }

    /// Delete the entry under `key`.
    pub async fn remove(&self, key: StorageKey) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.request(Command::Remove(key.as_str(), tx), rx).await
    }

    /// Shut down the worker thread. Pending clones get [`Error::StoreClosed`]
    /// afterwards.
    pub async fn close(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.request(Command::Close(tx), rx).await
    }
}
