//! Member profile entity and plan lifecycle.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::local_day;
use crate::constants::PLAN_NONE;
use crate::error::{DomainError, DomainResult};

/// Lifecycle flag on a member profile.
///
/// Expiry is never a stored state: an `Active` member is expired when the
/// derived expiry day has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlanStatus {
    #[default]
    Inactive,
    PendingApproval,
    Active,
}

impl std::fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanStatus::Inactive => write!(f, "Inactive"),
            PlanStatus::PendingApproval => write!(f, "Pending"),
            PlanStatus::Active => write!(f, "Active"),
        }
    }
}

/// Member profile. `id` is shared with the member's login account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Plan name, or "None" before any plan was chosen
    pub plan: String,
    pub join_date: DateTime<Utc>,
    #[serde(default)]
    pub plan_status: PlanStatus,
}

impl MemberProfile {
    /// Profile created by self-signup: no plan, inactive
    pub fn signed_up(id: Uuid, name: String, email: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            email,
            plan: PLAN_NONE.to_string(),
            join_date: now,
            plan_status: PlanStatus::Inactive,
        }
    }

    /// Profile created by an admin: plan assigned and approved immediately
    pub fn enrolled(id: Uuid, name: String, email: String, plan: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            email,
            plan,
            join_date: now,
            plan_status: PlanStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.plan_status == PlanStatus::Active
    }

    /// Local calendar day of the join timestamp
    pub fn join_day(&self) -> NaiveDate {
        local_day(self.join_date)
    }

    /// Member asks for a plan; an admin has to approve it.
    pub fn request_plan(&mut self, plan: &str) -> DomainResult<()> {
        if self.plan_status != PlanStatus::Inactive {
            return Err(DomainError::validation(format!(
                "A plan can only be requested while inactive (current status: {})",
                self.plan_status
            )));
        }
        self.plan = plan.to_string();
        self.plan_status = PlanStatus::PendingApproval;
        Ok(())
    }

    /// Admin approves the requested plan; the term starts now.
    pub fn approve_plan(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if self.plan_status != PlanStatus::PendingApproval {
            return Err(DomainError::validation("Member has no pending plan request"));
        }
        self.plan_status = PlanStatus::Active;
        self.join_date = now;
        Ok(())
    }

    /// Restart the current plan's term. Plan and status are left as they are.
    pub fn renew(&mut self, now: DateTime<Utc>) {
        self.join_date = now;
    }

    /// Switch to another plan starting now, forcing the status to `Active`.
    pub fn change_plan(&mut self, plan: &str, now: DateTime<Utc>) {
        self.plan = plan.to_string();
        self.join_date = now;
        self.plan_status = PlanStatus::Active;
    }
}
