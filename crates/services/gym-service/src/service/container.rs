//! Service Container - centralized service access.

use std::sync::Arc;

use domain::Clock;

use super::{
    AccountManager, AccountService, DashboardManager, DashboardService, InventoryManager, InventoryService,
    MembershipManager, MembershipService, PlanManager, PlanService, SchedulingManager, SchedulingService,
    TrainerManager, TrainerService,
};
use crate::config::GymServiceConfig;
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn accounts(&self) -> Arc<dyn AccountService>;

    fn membership(&self) -> Arc<dyn MembershipService>;

    fn plans(&self) -> Arc<dyn PlanService>;

    fn trainers(&self) -> Arc<dyn TrainerService>;

    fn scheduling(&self) -> Arc<dyn SchedulingService>;

    fn inventory(&self) -> Arc<dyn InventoryService>;

    fn dashboard(&self) -> Arc<dyn DashboardService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    accounts: Arc<dyn AccountService>,
    membership: Arc<dyn MembershipService>,
    plans: Arc<dyn PlanService>,
    trainers: Arc<dyn TrainerService>,
    scheduling: Arc<dyn SchedulingService>,
    inventory: Arc<dyn InventoryService>,
    dashboard: Arc<dyn DashboardService>,
}

impl Services {
    /// Wire every service over one unit of work and clock
    pub fn new(uow: Arc<dyn UnitOfWork>, clock: Arc<dyn Clock>, config: &GymServiceConfig) -> Self {
        Self {
            accounts: Arc::new(AccountManager::new(
                uow.clone(),
                clock.clone(),
                config.default_member_password.clone(),
            )),
            membership: Arc::new(MembershipManager::new(uow.clone(), clock.clone())),
            plans: Arc::new(PlanManager::new(uow.clone())),
            trainers: Arc::new(TrainerManager::new(uow.clone())),
            scheduling: Arc::new(SchedulingManager::new(uow.clone(), clock.clone())),
            inventory: Arc::new(InventoryManager::new(uow.clone())),
            dashboard: Arc::new(DashboardManager::new(uow, clock)),
        }
    }
}

impl ServiceContainer for Services {
    fn accounts(&self) -> Arc<dyn AccountService> {
        self.accounts.clone()
    }

    fn membership(&self) -> Arc<dyn MembershipService> {
        self.membership.clone()
    }

    fn plans(&self) -> Arc<dyn PlanService> {
        self.plans.clone()
    }

    fn trainers(&self) -> Arc<dyn TrainerService> {
        self.trainers.clone()
    }

    fn scheduling(&self) -> Arc<dyn SchedulingService> {
        self.scheduling.clone()
    }

    fn inventory(&self) -> Arc<dyn InventoryService> {
        self.inventory.clone()
    }

    fn dashboard(&self) -> Arc<dyn DashboardService> {
        self.dashboard.clone()
    }
}

/// Run independent reads concurrently.
pub mod parallel {
    use std::future::Future;

    use common::AppResult;
    use tokio::try_join;

    /// Await two operations together, failing on the first error.
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }
}
