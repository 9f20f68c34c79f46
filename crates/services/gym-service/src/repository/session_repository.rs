//! The signed-in user slot.

use std::sync::Arc;

use async_trait::async_trait;

use common::AppResult;
use domain::SessionUser;

use crate::infra::{KeyValueStore, StorageKey};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Currently signed-in user, if any
    async fn current(&self) -> AppResult<Option<SessionUser>>;

    async fn save(&self, user: SessionUser) -> AppResult<()>;

    async fn clear(&self) -> AppResult<()>;
}

pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SessionRepository for SessionStore {
    async fn current(&self) -> AppResult<Option<SessionUser>> {
        let key = StorageKey::Session;
        let Some(raw) = self.store.get(key.as_str()).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Corrupt session, treating as signed out");
                Ok(None)
            }
        }
    }

    async fn save(&self, user: SessionUser) -> AppResult<()> {
        let raw = serde_json::to_string(&user)?;
        self.store.set(StorageKey::Session.as_str(), raw).await
    }

    async fn clear(&self) -> AppResult<()> {
        self.store.remove(StorageKey::Session.as_str()).await
    }
}
