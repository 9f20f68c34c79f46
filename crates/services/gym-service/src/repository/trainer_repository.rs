//! Trainer profile repository.

use async_trait::async_trait;
use uuid::Uuid;

use common::AppResult;
use domain::TrainerProfile;

use super::base::{KvTable, Mutation};
use crate::infra::Collection;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TrainerRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<TrainerProfile>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TrainerProfile>>;

    async fn create(&self, trainer: TrainerProfile) -> AppResult<TrainerProfile>;

    /// Apply `mutation` to the stored profile under the collection lock
    async fn modify(&self, id: Uuid, mutation: Mutation<TrainerProfile>) -> AppResult<TrainerProfile>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct TrainerStore {
    table: KvTable<TrainerProfile>,
}

impl TrainerStore {
    pub fn new(collection: Collection<TrainerProfile>) -> Self {
        Self {
            table: KvTable::new(collection),
        }
    }
}

#[async_trait]
impl TrainerRepository for TrainerStore {
    async fn list(&self) -> AppResult<Vec<TrainerProfile>> {
        self.table.list().await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TrainerProfile>> {
        self.table.find_by_id(id).await
    }

    async fn create(&self, trainer: TrainerProfile) -> AppResult<TrainerProfile> {
        self.table.insert(trainer).await
    }

    async fn modify(&self, id: Uuid, mutation: Mutation<TrainerProfile>) -> AppResult<TrainerProfile> {
        self.table.modify(id, mutation).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.table.delete(id).await.map(|_| ())
    }
}
