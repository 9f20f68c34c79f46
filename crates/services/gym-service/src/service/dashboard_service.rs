//! Dashboard service - admin overview figures.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;

use common::AppResult;
use domain::{
    aggregate_revenue, current_month_revenue, select_renewals, Clock, MemberProfile, MonthlyRevenue, PendingRenewal,
    PlanCatalog, RevenueWindow, SessionUser, RECENT_MEMBERS_LIMIT,
};

use super::container::parallel;
use super::ensure_admin;
use crate::infra::UnitOfWork;

/// Headline figures of the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_members: usize,
    pub active_plans: usize,
    /// Plan prices of members who joined this calendar month
    pub monthly_revenue: Decimal,
    pub pending_renewals: usize,
}

#[async_trait]
pub trait DashboardService: Send + Sync {
    async fn stats(&self, actor: &SessionUser) -> AppResult<AdminStats>;

    /// Revenue per month over `window`, oldest month first
    async fn revenue_chart(&self, actor: &SessionUser, window: RevenueWindow) -> AppResult<Vec<MonthlyRevenue>>;

    /// Latest joiners, newest first
    async fn recent_members(&self, actor: &SessionUser) -> AppResult<Vec<MemberProfile>>;

    async fn pending_renewals(&self, actor: &SessionUser) -> AppResult<Vec<PendingRenewal>>;
}

pub struct DashboardManager {
    uow: Arc<dyn UnitOfWork>,
    clock: Arc<dyn Clock>,
}

impl DashboardManager {
    pub fn new(uow: Arc<dyn UnitOfWork>, clock: Arc<dyn Clock>) -> Self {
        Self { uow, clock }
    }
}

#[async_trait]
impl DashboardService for DashboardManager {
    async fn stats(&self, actor: &SessionUser) -> AppResult<AdminStats> {
        ensure_admin(actor)?;
        let members = self.uow.members();
        let plans = self.uow.plans();
        let (members, plans) = parallel::join2(members.list(), plans.list()).await?;

        let catalog = PlanCatalog::new(&plans);
        let today = self.clock.today();
        Ok(AdminStats {
            total_members: members.len(),
            active_plans: members.iter().filter(|m| m.is_active()).count(),
            monthly_revenue: current_month_revenue(&members, &catalog, today),
            pending_renewals: select_renewals(&members, &catalog, today).len(),
        })
    }

    async fn revenue_chart(&self, actor: &SessionUser, window: RevenueWindow) -> AppResult<Vec<MonthlyRevenue>> {
        ensure_admin(actor)?;
        let members = self.uow.members();
        let plans = self.uow.plans();
        let (members, plans) = parallel::join2(members.list(), plans.list()).await?;

        Ok(aggregate_revenue(&members, &PlanCatalog::new(&plans), window, self.clock.today()))
    }

    async fn recent_members(&self, actor: &SessionUser) -> AppResult<Vec<MemberProfile>> {
        ensure_admin(actor)?;
        let mut members = self.uow.members().list().await?;
        members.sort_by(|a, b| b.join_date.cmp(&a.join_date));
        members.truncate(RECENT_MEMBERS_LIMIT);
        Ok(members)
    }

    async fn pending_renewals(&self, actor: &SessionUser) -> AppResult<Vec<PendingRenewal>> {
        ensure_admin(actor)?;
        let members = self.uow.members();
        let plans = self.uow.plans();
        let (members, plans) = parallel::join2(members.list(), plans.list()).await?;

        Ok(select_renewals(&members, &PlanCatalog::new(&plans), self.clock.today()))
    }
}
