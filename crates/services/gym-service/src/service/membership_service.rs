//! Membership service - the member plan lifecycle.
//!
//! `Inactive -> PendingApproval -> Active`, with expiry always derived from
//! the join date and the plan duration at read time.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult, OptionExt};
use domain::{
    compute_expiry, select_renewals, with_expiry, Clock, Expiry, MemberProfile, MemberWithExpiry, PendingRenewal,
    Plan, PlanCatalog, PlanStatus, SessionUser, PLAN_NONE,
};

use super::container::parallel;
use super::ensure_admin;
use super::requests::MemberUpdate;
use crate::infra::UnitOfWork;

/// What a member sees on their own plan page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanOverview {
    pub member: MemberProfile,
    /// The active plan, or the requested one while approval is pending
    pub plan: Option<Plan>,
    pub expiry: Expiry,
}

#[async_trait]
pub trait MembershipService: Send + Sync {
    /// Every member with the derived expiry of their plan
    async fn list_members(&self) -> AppResult<Vec<MemberWithExpiry>>;

    async fn get_member(&self, id: Uuid) -> AppResult<MemberWithExpiry>;

    /// Admin edit of name, email or plan; the plan status is kept
    async fn update_member(&self, actor: &SessionUser, id: Uuid, update: MemberUpdate) -> AppResult<MemberProfile>;

    /// Ask for a plan. Members may only ask for themselves.
    async fn request_plan(&self, actor: &SessionUser, member_id: Uuid, plan: &str) -> AppResult<MemberProfile>;

    /// Approve a pending request; the term starts now
    async fn approve_plan(&self, actor: &SessionUser, member_id: Uuid) -> AppResult<MemberProfile>;

    /// Restart the current term from now
    async fn renew(&self, actor: &SessionUser, member_id: Uuid) -> AppResult<MemberProfile>;

    /// Switch to another plan starting now
    async fn change_plan(&self, actor: &SessionUser, member_id: Uuid, plan: &str) -> AppResult<MemberProfile>;

    /// Active members whose plan has lapsed, earliest expiry first
    async fn pending_renewals(&self) -> AppResult<Vec<PendingRenewal>>;

    /// End a member's tenure: the profile goes, the login stays
    async fn delete_member_profile(&self, actor: &SessionUser, member_id: Uuid) -> AppResult<()>;

    /// The signed-in member's own plan overview
    async fn my_plan(&self, actor: &SessionUser) -> AppResult<PlanOverview>;
}

pub struct MembershipManager {
    uow: Arc<dyn UnitOfWork>,
    clock: Arc<dyn Clock>,
}

impl MembershipManager {
    pub fn new(uow: Arc<dyn UnitOfWork>, clock: Arc<dyn Clock>) -> Self {
        Self { uow, clock }
    }

    async fn members_and_plans(&self) -> AppResult<(Vec<MemberProfile>, Vec<Plan>)> {
        let members = self.uow.members();
        let plans = self.uow.plans();
        parallel::join2(members.list(), plans.list()).await
    }

    async fn require_plan(&self, name: &str) -> AppResult<Plan> {
        self.uow
            .plans()
            .find_by_name(name)
            .await?
            .ok_or_else(|| AppError::validation(format!("Unknown plan '{}'", name)))
    }
}

#[async_trait]
impl MembershipService for MembershipManager {
    async fn list_members(&self) -> AppResult<Vec<MemberWithExpiry>> {
        let (members, plans) = self.members_and_plans().await?;
        Ok(with_expiry(&members, &PlanCatalog::new(&plans), self.clock.today()))
    }

    async fn get_member(&self, id: Uuid) -> AppResult<MemberWithExpiry> {
        let member = self.uow.members().find_by_id(id).await?.ok_or_not_found()?;
        let plans = self.uow.plans().list().await?;
        let expiry = compute_expiry(&member, &PlanCatalog::new(&plans), self.clock.today());
        Ok(MemberWithExpiry { member, expiry })
    }

    async fn update_member(&self, actor: &SessionUser, id: Uuid, update: MemberUpdate) -> AppResult<MemberProfile> {
        ensure_admin(actor)?;
        update.validate()?;
        if let Some(plan) = update.plan.as_deref().filter(|p| *p != PLAN_NONE) {
            self.require_plan(plan).await?;
        }

        let member = self
            .uow
            .members()
            .modify(
                id,
                Box::new(move |member: &mut MemberProfile| {
                    if let Some(name) = update.name {
                        member.name = name;
                    }
                    if let Some(email) = update.email {
                        member.email = email;
                    }
                    if let Some(plan) = update.plan {
                        if plan == PLAN_NONE && member.plan_status != PlanStatus::Inactive {
                            return Err(AppError::validation(format!(
                                "A {} member needs a plan",
                                member.plan_status
                            )));
                        }
                        member.plan = plan;
                    }
                    Ok(())
                }),
            )
            .await?;
        tracing::info!(member_id = %id, "Member profile updated");
        Ok(member)
    }

    async fn request_plan(&self, actor: &SessionUser, member_id: Uuid, plan: &str) -> AppResult<MemberProfile> {
        if !actor.is_admin() && actor.id != member_id {
            return Err(AppError::Forbidden);
        }
        let plan = self.require_plan(plan).await?;

        let name = plan.name.clone();
        let member = self
            .uow
            .members()
            .modify(member_id, Box::new(move |member: &mut MemberProfile| Ok(member.request_plan(&name)?)))
            .await?;
        tracing::info!(member_id = %member_id, plan = %plan.name, "Plan requested");
        Ok(member)
    }

    async fn approve_plan(&self, actor: &SessionUser, member_id: Uuid) -> AppResult<MemberProfile> {
        ensure_admin(actor)?;
        let now = self.clock.now();

        let member = self
            .uow
            .members()
            .modify(member_id, Box::new(move |member: &mut MemberProfile| Ok(member.approve_plan(now)?)))
            .await?;
        tracing::info!(member_id = %member_id, plan = %member.plan, "Plan approved");
        Ok(member)
    }

    async fn renew(&self, actor: &SessionUser, member_id: Uuid) -> AppResult<MemberProfile> {
        ensure_admin(actor)?;
        let now = self.clock.now();

        let member = self
            .uow
            .members()
            .modify(
                member_id,
                Box::new(move |member: &mut MemberProfile| {
                    member.renew(now);
                    Ok(())
                }),
            )
            .await?;
        tracing::info!(member_id = %member_id, plan = %member.plan, "Membership renewed");
        Ok(member)
    }

    async fn change_plan(&self, actor: &SessionUser, member_id: Uuid, plan: &str) -> AppResult<MemberProfile> {
        ensure_admin(actor)?;
        let plan = self.require_plan(plan).await?;
        let now = self.clock.now();

        let name = plan.name.clone();
        let member = self
            .uow
            .members()
            .modify(
                member_id,
                Box::new(move |member: &mut MemberProfile| {
                    member.change_plan(&name, now);
                    Ok(())
                }),
            )
            .await?;
        tracing::info!(member_id = %member_id, plan = %plan.name, "Plan changed");
        Ok(member)
    }

    async fn pending_renewals(&self) -> AppResult<Vec<PendingRenewal>> {
        let (members, plans) = self.members_and_plans().await?;
        Ok(select_renewals(&members, &PlanCatalog::new(&plans), self.clock.today()))
    }

    async fn delete_member_profile(&self, actor: &SessionUser, member_id: Uuid) -> AppResult<()> {
        ensure_admin(actor)?;
        self.uow.members().delete(member_id).await?;
        tracing::info!(member_id = %member_id, "Member tenure ended");
        Ok(())
    }

    async fn my_plan(&self, actor: &SessionUser) -> AppResult<PlanOverview> {
        let (members, plans) = self.members_and_plans().await?;
        let member = members.into_iter().find(|m| m.id == actor.id).ok_or_not_found()?;

        let catalog = PlanCatalog::new(&plans);
        let plan = match member.plan_status {
            PlanStatus::Active | PlanStatus::PendingApproval => catalog.get(&member.plan).cloned(),
            PlanStatus::Inactive => None,
        };
        let expiry = compute_expiry(&member, &catalog, self.clock.today());

        Ok(PlanOverview { member, plan, expiry })
    }
}
