//! Member profile repository.

use async_trait::async_trait;
use uuid::Uuid;

use common::AppResult;
use domain::MemberProfile;

use super::base::{KvTable, Mutation};
use crate::infra::Collection;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Member repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<MemberProfile>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MemberProfile>>;

    async fn create(&self, member: MemberProfile) -> AppResult<MemberProfile>;

    /// Atomically change one profile
    async fn modify(&self, id: Uuid, mutation: Mutation<MemberProfile>) -> AppResult<MemberProfile>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Store-backed implementation of MemberRepository
pub struct MemberStore {
    table: KvTable<MemberProfile>,
}

impl MemberStore {
    pub fn new(collection: Collection<MemberProfile>) -> Self {
        Self {
            table: KvTable::new(collection),
        }
    }
}

#[async_trait]
impl MemberRepository for MemberStore {
    async fn list(&self) -> AppResult<Vec<MemberProfile>> {
        self.table.list().await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MemberProfile>> {
        self.table.find_by_id(id).await
    }

    async fn create(&self, member: MemberProfile) -> AppResult<MemberProfile> {
        self.table.insert(member).await
    }

    async fn modify(&self, id: Uuid, mutation: Mutation<MemberProfile>) -> AppResult<MemberProfile> {
        self.table.modify(id, mutation).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.table.delete(id).await.map(|_| ())
    }
}
