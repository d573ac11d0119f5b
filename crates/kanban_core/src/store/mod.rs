//! Persistent key-value store adapter.
//!
//! # Responsibility
//! - Define the raw slot contract (`KeyValueStore`) implemented by storage
//!   backends.
//! - Provide typed, fault-tolerant `load`/`save` on top of any backend.
//!
//! # Invariants
//! - `PersistentStore::load` never fails its caller: absent, unreadable or
//!   undeserializable slots yield the caller-supplied default.
//! - `PersistentStore::save` never fails its caller: write failures are logged.
//! - Slots are independent; there is no atomic update across keys and the
//!   last write wins.

mod memory_store;
mod sqlite_store;

pub use memory_store::MemoryKeyValueStore;
pub use sqlite_store::SqliteKeyValueStore;

use crate::db::DbError;
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Backend failure while reading or writing a slot.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Backend refused the write (quota, read-only medium, ...).
    Rejected(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Rejected(reason) => write!(f, "store rejected write: {reason}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Rejected(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Raw string slots addressed by constant keys.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).write(key, value)
    }
}

/// Typed JSON view over a [`KeyValueStore`].
pub struct PersistentStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> PersistentStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Reads and deserializes slot `key`, falling back to `default`.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.backend.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=store_load module=store status=default reason=absent key={key}");
                return default;
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=default reason=read_failed key={} error={}",
                    key, err
                );
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!(
                    "event=store_load module=store status=ok key={} bytes={}",
                    key,
                    raw.len()
                );
                value
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=default reason=corrupt key={} line={} column={}",
                    key,
                    err.line(),
                    err.column()
                );
                default
            }
        }
    }

    /// Serializes `value` into slot `key`. Failures are logged, not returned.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                error!(
                    "event=store_save module=store status=error error_code=serialize_failed key={} error={}",
                    key, err
                );
                return;
            }
        };

        match self.backend.write(key, &raw) {
            Ok(()) => debug!(
                "event=store_save module=store status=ok key={} bytes={}",
                key,
                raw.len()
            ),
            Err(err) => error!(
                "event=store_save module=store status=error error_code=write_failed key={} error={}",
                key, err
            ),
        }
    }
}
