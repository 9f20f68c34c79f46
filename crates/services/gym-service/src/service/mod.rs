//! Application services.
//!
//! Services take the signed-in [`SessionUser`] as the acting party and check
//! role and ownership before touching the store. The domain rules they call
//! are authorization-free.

mod account_service;
mod container;
mod dashboard_service;
mod inventory_service;
mod membership_service;
mod plan_service;
mod requests;
mod scheduling_service;
mod trainer_service;

pub use account_service::{AccountManager, AccountProfile, AccountService, CreateAccountWithProfile};
pub use container::{parallel, ServiceContainer, Services};
pub use dashboard_service::{AdminStats, DashboardManager, DashboardService};
pub use inventory_service::{InventoryManager, InventoryService};
pub use membership_service::{MembershipManager, MembershipService, PlanOverview};
pub use plan_service::{PlanManager, PlanService};
pub use requests::{
    InventoryRequest, MemberUpdate, NewMemberRequest, NewTrainerRequest, PlanRequest, SignUpRequest, TrainerUpdate,
};
pub use scheduling_service::{ClientSummary, SchedulingManager, SchedulingService, UpcomingSession};
pub use trainer_service::{TrainerManager, TrainerService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;

use common::{AppError, AppResult};
use domain::SessionUser;

/// Reject anyone but an admin
pub(crate) fn ensure_admin(actor: &SessionUser) -> AppResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        tracing::debug!(user_id = %actor.id, role = %actor.role, "Admin action refused");
        Err(AppError::Forbidden)
    }
}
