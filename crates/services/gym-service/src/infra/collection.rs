//! Typed collections over the key-value store.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{Mutex, OwnedMutexGuard};

use common::AppResult;
use domain::{KEY_BOOKINGS, KEY_INVENTORY, KEY_MEMBERS, KEY_PLANS, KEY_SESSION, KEY_TRAINERS, KEY_USERS};

use super::store::KeyValueStore;

/// Keys of the persisted documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Users,
    Members,
    Trainers,
    Plans,
    Bookings,
    Inventory,
    /// Single `SessionUser` object rather than an array
    Session,
}

impl StorageKey {
    /// Keys holding JSON arrays
    pub const COLLECTIONS: [StorageKey; 6] = [
        StorageKey::Users,
        StorageKey::Members,
        StorageKey::Trainers,
        StorageKey::Plans,
        StorageKey::Bookings,
        StorageKey::Inventory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Users => KEY_USERS,
            StorageKey::Members => KEY_MEMBERS,
            StorageKey::Trainers => KEY_TRAINERS,
            StorageKey::Plans => KEY_PLANS,
            StorageKey::Bookings => KEY_BOOKINGS,
            StorageKey::Inventory => KEY_INVENTORY,
            StorageKey::Session => KEY_SESSION,
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-key async mutexes serializing read-modify-write cycles.
///
/// Only writers sharing the same `KeyLocks` are serialized. Two handles
/// with separate registries over one store still race.
#[derive(Debug, Default)]
pub struct KeyLocks {
    locks: DashMap<StorageKey, Arc<Mutex<()>>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`.
    pub async fn acquire(&self, key: StorageKey) -> OwnedMutexGuard<()> {
        let lock = self.locks.entry(key).or_default().clone();
        lock.lock_owned().await
    }
}

/// JSON array of `T` stored under one key.
pub struct Collection<T> {
    store: Arc<dyn KeyValueStore>,
    locks: Arc<KeyLocks>,
    key: StorageKey,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            locks: self.locks.clone(),
            key: self.key,
            _marker: PhantomData,
        }
    }
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    pub fn new(store: Arc<dyn KeyValueStore>, locks: Arc<KeyLocks>, key: StorageKey) -> Self {
        Self {
            store,
            locks,
            key,
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> StorageKey {
        self.key
    }

    /// Read every record. A missing key reads as empty; so does a document
    /// that fails to parse, after logging a warning.
    pub async fn load(&self) -> AppResult<Vec<T>> {
        let Some(raw) = self.store.get(self.key.as_str()).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) => {
                tracing::debug!(key = %self.key, count = items.len(), "Loaded collection");
                Ok(items)
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Corrupt collection, reading as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite the whole array.
    pub async fn save(&self, items: &[T]) -> AppResult<()> {
        let raw = serde_json::to_string(items)?;
        self.store.set(self.key.as_str(), raw).await?;
        tracing::debug!(key = %self.key, count = items.len(), "Saved collection");
        Ok(())
    }

    /// Locked read-modify-write. When `f` fails nothing is written.
    pub async fn update<F, R>(&self, f: F) -> AppResult<R>
    where
        F: FnOnce(&mut Vec<T>) -> AppResult<R> + Send,
        R: Send,
    {
        let _guard = self.locks.acquire(self.key).await;
        let mut items = self.load().await?;
        let result = f(&mut items)?;
        self.save(&items).await?;
        Ok(result)
    }
}
