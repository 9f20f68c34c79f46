//! Plan service - membership plan catalog management.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use common::{AppResult, OptionExt};
use domain::{Plan, SessionUser};

use super::ensure_admin;
use super::requests::PlanRequest;
use crate::infra::UnitOfWork;

#[async_trait]
pub trait PlanService: Send + Sync {
    async fn list_plans(&self) -> AppResult<Vec<Plan>>;

    async fn get_plan(&self, id: Uuid) -> AppResult<Plan>;

    async fn create_plan(&self, actor: &SessionUser, request: PlanRequest) -> AppResult<Plan>;

    /// Renaming does not touch members; profiles naming the old plan are
    /// orphaned and lose their expiry and revenue.
    async fn update_plan(&self, actor: &SessionUser, id: Uuid, request: PlanRequest) -> AppResult<Plan>;

    async fn delete_plan(&self, actor: &SessionUser, id: Uuid) -> AppResult<()>;
}

pub struct PlanManager {
    uow: Arc<dyn UnitOfWork>,
}

impl PlanManager {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }

    async fn warn_orphans(&self, old_name: &str) -> AppResult<()> {
        let orphaned = self
            .uow
            .members()
            .list()
            .await?
            .iter()
            .filter(|m| m.plan == old_name)
            .count();
        if orphaned > 0 {
            tracing::warn!(plan = %old_name, orphaned, "Members still reference a plan name that no longer exists");
        }
        Ok(())
    }
}

#[async_trait]
impl PlanService for PlanManager {
    async fn list_plans(&self) -> AppResult<Vec<Plan>> {
        self.uow.plans().list().await
    }

    async fn get_plan(&self, id: Uuid) -> AppResult<Plan> {
        self.uow.plans().find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_plan(&self, actor: &SessionUser, request: PlanRequest) -> AppResult<Plan> {
        ensure_admin(actor)?;
        request.validate()?;

        let plan = Plan::new(request.name, request.price, request.duration)?;
        let plan = self.uow.plans().create(plan).await?;
        tracing::info!(plan_id = %plan.id, name = %plan.name, "Plan created");
        Ok(plan)
    }

    async fn update_plan(&self, actor: &SessionUser, id: Uuid, request: PlanRequest) -> AppResult<Plan> {
        ensure_admin(actor)?;
        request.validate()?;

        let existing = self.get_plan(id).await?;
        let updated = Plan {
            id,
            name: request.name,
            price: request.price,
            duration: request.duration,
        };
        updated.validate()?;

        let updated = self.uow.plans().update(updated).await?;
        tracing::info!(plan_id = %id, name = %updated.name, "Plan updated");
        if existing.name != updated.name {
            self.warn_orphans(&existing.name).await?;
        }
        Ok(updated)
    }

    async fn delete_plan(&self, actor: &SessionUser, id: Uuid) -> AppResult<()> {
        ensure_admin(actor)?;
        let removed = self.uow.plans().delete(id).await?;
        tracing::info!(plan_id = %id, name = %removed.name, "Plan deleted");
        self.warn_orphans(&removed.name).await
    }
}
