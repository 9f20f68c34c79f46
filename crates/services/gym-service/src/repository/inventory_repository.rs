//! Inventory item repository.

use async_trait::async_trait;
use uuid::Uuid;

use common::AppResult;
use domain::InventoryItem;

use super::base::KvTable;
use crate::infra::Collection;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<InventoryItem>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<InventoryItem>>;

    async fn create(&self, item: InventoryItem) -> AppResult<InventoryItem>;

    async fn update(&self, item: InventoryItem) -> AppResult<InventoryItem>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct InventoryStore {
    table: KvTable<InventoryItem>,
}

impl InventoryStore {
    pub fn new(collection: Collection<InventoryItem>) -> Self {
        Self {
            table: KvTable::new(collection),
        }
    }
}

#[async_trait]
impl InventoryRepository for InventoryStore {
    async fn list(&self) -> AppResult<Vec<InventoryItem>> {
        self.table.list().await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<InventoryItem>> {
        self.table.find_by_id(id).await
    }

    async fn create(&self, item: InventoryItem) -> AppResult<InventoryItem> {
        self.table.insert(item).await
    }

    async fn update(&self, item: InventoryItem) -> AppResult<InventoryItem> {
        self.table.replace(item).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.table.delete(id).await.map(|_| ())
    }
}
