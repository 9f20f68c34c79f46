//! Plan expiry, derived from join date and plan duration on every read.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::member::MemberProfile;
use crate::plan::PlanCatalog;

/// Derived expiry of a member's plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Expiry {
    /// Day the term runs out; `None` when no expiry applies
    pub expiry_date: Option<NaiveDate>,
    pub is_expired: bool,
}

impl Expiry {
    const NONE: Expiry = Expiry {
        expiry_date: None,
        is_expired: false,
    };
}

/// Expiry day for a term starting on `join_day` and lasting `duration` days.
pub fn expiry_day(join_day: NaiveDate, duration: u32) -> Option<NaiveDate> {
    join_day.checked_add_days(Days::new(u64::from(duration)))
}

/// Compute the expiry of `member` against the plan catalog as seen on `today`.
///
/// Members that are not `Active`, or whose plan name is not in the catalog,
/// have no expiry and are never expired.
pub fn compute_expiry(member: &MemberProfile, plans: &PlanCatalog<'_>, today: NaiveDate) -> Expiry {
    if !member.is_active() {
        return Expiry::NONE;
    }
    let Some(duration) = plans.duration(&member.plan) else {
        return Expiry::NONE;
    };
    match expiry_day(member.join_day(), duration) {
        Some(day) => Expiry {
            expiry_date: Some(day),
            is_expired: day < today,
        },
        None => Expiry::NONE,
    }
}

/// A member together with the derived expiry of their plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberWithExpiry {
    #[serde(flatten)]
    pub member: MemberProfile,
    #[serde(flatten)]
    pub expiry: Expiry,
}

/// Annotate every member with its derived expiry, preserving order.
pub fn with_expiry(members: &[MemberProfile], plans: &PlanCatalog<'_>, today: NaiveDate) -> Vec<MemberWithExpiry> {
    members
        .iter()
        .map(|member| MemberWithExpiry {
            member: member.clone(),
            expiry: compute_expiry(member, plans, today),
        })
        .collect()
}
