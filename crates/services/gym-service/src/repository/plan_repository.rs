//! Membership plan repository. Plan names are unique.

use async_trait::async_trait;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::Plan;

use super::base::KvTable;
use crate::infra::Collection;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Plan>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Plan>>;

    /// Exact, case-sensitive name match
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Plan>>;

    async fn create(&self, plan: Plan) -> AppResult<Plan>;

    async fn update(&self, plan: Plan) -> AppResult<Plan>;

    async fn delete(&self, id: Uuid) -> AppResult<Plan>;
}

pub struct PlanStore {
    table: KvTable<Plan>,
}

impl PlanStore {
    pub fn new(collection: Collection<Plan>) -> Self {
        Self {
            table: KvTable::new(collection),
        }
    }
}

fn ensure_name_free(others: &[Plan], name: &str) -> AppResult<()> {
    if others.iter().any(|p| p.name == name) {
        return Err(AppError::conflict(format!("Plan '{}'", name)));
    }
    Ok(())
}

#[async_trait]
impl PlanRepository for PlanStore {
    async fn list(&self) -> AppResult<Vec<Plan>> {
        self.table.list().await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Plan>> {
        self.table.find_by_id(id).await
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Plan>> {
        self.table.find_where(|p| p.name == name).await
    }

    async fn create(&self, plan: Plan) -> AppResult<Plan> {
        let name = plan.name.clone();
        self.table
            .insert_checked(plan, move |existing| ensure_name_free(existing, &name))
            .await
    }

    async fn update(&self, plan: Plan) -> AppResult<Plan> {
        let name = plan.name.clone();
        self.table
            .replace_checked(plan, move |others| ensure_name_free(others, &name))
            .await
    }

    async fn delete(&self, id: Uuid) -> AppResult<Plan> {
        self.table.delete(id).await
    }
}
