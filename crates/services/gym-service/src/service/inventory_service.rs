//! Inventory service - equipment and stock items.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use common::{AppResult, OptionExt};
use domain::{InventoryItem, SessionUser};

use super::ensure_admin;
use super::requests::InventoryRequest;
use crate::infra::UnitOfWork;

#[async_trait]
pub trait InventoryService: Send + Sync {
    async fn list_items(&self) -> AppResult<Vec<InventoryItem>>;

    async fn add_item(&self, actor: &SessionUser, request: InventoryRequest) -> AppResult<InventoryItem>;

    async fn update_item(&self, actor: &SessionUser, id: Uuid, request: InventoryRequest) -> AppResult<InventoryItem>;

    async fn delete_item(&self, actor: &SessionUser, id: Uuid) -> AppResult<()>;
}

pub struct InventoryManager {
    uow: Arc<dyn UnitOfWork>,
}

impl InventoryManager {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl InventoryService for InventoryManager {
    async fn list_items(&self) -> AppResult<Vec<InventoryItem>> {
        self.uow.inventory().list().await
    }

    async fn add_item(&self, actor: &SessionUser, request: InventoryRequest) -> AppResult<InventoryItem> {
        ensure_admin(actor)?;
        request.validate()?;

        let item = InventoryItem::new(request.name, request.category, request.quantity, request.status)?;
        let item = self.uow.inventory().create(item).await?;
        tracing::info!(item_id = %item.id, name = %item.name, "Inventory item added");
        Ok(item)
    }

    async fn update_item(&self, actor: &SessionUser, id: Uuid, request: InventoryRequest) -> AppResult<InventoryItem> {
        ensure_admin(actor)?;
        request.validate()?;

        self.uow.inventory().find_by_id(id).await?.ok_or_not_found()?;
        let mut item = InventoryItem::new(request.name, request.category, request.quantity, request.status)?;
        item.id = id;

        let item = self.uow.inventory().update(item).await?;
        if item.status.needs_attention() {
            tracing::warn!(item_id = %id, name = %item.name, status = %item.status, "Inventory item needs attention");
        }
        Ok(item)
    }

    async fn delete_item(&self, actor: &SessionUser, id: Uuid) -> AppResult<()> {
        ensure_admin(actor)?;
        self.uow.inventory().delete(id).await?;
        tracing::info!(item_id = %id, "Inventory item deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use common::AppError;
    use domain::{ItemCategory, ItemStatus, UserRole};

    use crate::infra::Persistence;

    fn admin() -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            username: "admin".to_string(),
            email: "admin@gym.test".to_string(),
            role: UserRole::Admin,
        }
    }

    fn treadmill() -> InventoryRequest {
        InventoryRequest {
            name: "Treadmill".to_string(),
            category: ItemCategory::Equipment,
            quantity: 4,
            status: ItemStatus::Operational,
        }
    }

    #[tokio::test]
    async fn add_update_delete() {
        let service = InventoryManager::new(Arc::new(Persistence::in_memory()));
        let item = service.add_item(&admin(), treadmill()).await.unwrap();

        let mut change = treadmill();
        change.status = ItemStatus::NeedsMaintenance;
        let updated = service.update_item(&admin(), item.id, change).await.unwrap();
        assert_eq!(updated.id, item.id);
        assert_eq!(updated.status, ItemStatus::NeedsMaintenance);

        service.delete_item(&admin(), item.id).await.unwrap();
        assert!(service.list_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let service = InventoryManager::new(Arc::new(Persistence::in_memory()));
        let mut request = treadmill();
        request.name = String::new();

        let result = service.add_item(&admin(), request).await;
        assert!(matches!(result, Err(AppError::Validation(m)) if m == "Please fill out at least Name and Category."));
    }

    #[tokio::test]
    async fn updating_a_missing_item_is_not_found() {
        let service = InventoryManager::new(Arc::new(Persistence::in_memory()));
        let result = service.update_item(&admin(), Uuid::new_v4(), treadmill()).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
