//! Selection of members whose active plan has lapsed.

use chrono::NaiveDate;
use serde::Serialize;

use crate::expiry::compute_expiry;
use crate::member::MemberProfile;
use crate::plan::PlanCatalog;

/// A member due for renewal and the day their plan ran out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingRenewal {
    #[serde(flatten)]
    pub member: MemberProfile,
    pub expiry_date: NaiveDate,
}

/// Active members whose plan expired before `today`, most overdue first.
///
/// Ties keep the input order.
pub fn select_renewals(members: &[MemberProfile], plans: &PlanCatalog<'_>, today: NaiveDate) -> Vec<PendingRenewal> {
    let mut due: Vec<PendingRenewal> = members
        .iter()
        .filter_map(|member| {
            let expiry = compute_expiry(member, plans, today);
            match expiry.expiry_date {
                Some(expiry_date) if expiry.is_expired => Some(PendingRenewal {
                    member: member.clone(),
                    expiry_date,
                }),
                _ => None,
            }
        })
        .collect();

    // stable
    due.sort_by_key(|r| r.expiry_date);
    due
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::local_day;
    use crate::member::PlanStatus;
    use crate::plan::Plan;
    use chrono::{DateTime, Duration, Local, TimeZone, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Local.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap().with_timezone(&Utc)
    }

    fn member(name: &str, plan: &str, joined: DateTime<Utc>, status: PlanStatus) -> MemberProfile {
        MemberProfile {
            id: Uuid::new_v4(),
            name: name.into(),
            email: format!("{}@gym.test", name.to_lowercase()),
            plan: plan.into(),
            join_date: joined,
            plan_status: status,
        }
    }

    fn plans() -> Vec<Plan> {
        vec![
            Plan::new("1 Month".into(), Decimal::from(50), 30).unwrap(),
            Plan::new("3 Months".into(), Decimal::from(120), 90).unwrap(),
        ]
    }

    #[test]
    fn orders_most_overdue_first_and_skips_non_active() {
        let plans = plans();
        let catalog = PlanCatalog::new(&plans);
        let members = vec![
            member("Recent", "1 Month", noon(2025, 5, 1), PlanStatus::Active),
            member("Oldest", "3 Months", noon(2024, 10, 1), PlanStatus::Active),
            member("Pending", "1 Month", noon(2024, 1, 1), PlanStatus::PendingApproval),
            member("Current", "3 Months", noon(2025, 6, 1), PlanStatus::Active),
            member("Orphan", "Gold", noon(2024, 1, 1), PlanStatus::Active),
        ];
        let today = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();

        let names: Vec<_> = select_renewals(&members, &catalog, today)
            .into_iter()
            .map(|r| r.member.name)
            .collect();
        assert_eq!(names, vec!["Oldest", "Recent"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let plans = plans();
        let catalog = PlanCatalog::new(&plans);
        let members = vec![
            member("B", "1 Month", noon(2025, 1, 1), PlanStatus::Active),
            member("A", "1 Month", noon(2025, 1, 1), PlanStatus::Active),
            member("C", "1 Month", noon(2025, 1, 1), PlanStatus::Active),
        ];
        let today = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();

        let first: Vec<_> = select_renewals(&members, &catalog, today).into_iter().map(|r| r.member.name).collect();
        let second: Vec<_> = select_renewals(&members, &catalog, today).into_iter().map(|r| r.member.name).collect();
        assert_eq!(first, vec!["B", "A", "C"]);
        assert_eq!(first, second);
    }

    #[test]
    fn renew_removes_member_from_selection() {
        let plans = plans();
        let catalog = PlanCatalog::new(&plans);
        let joined = noon(2025, 3, 1);
        let now = joined + Duration::days(31);
        let today = local_day(now);
        let mut members = vec![member("Ana", "1 Month", joined, PlanStatus::Active)];

        assert_eq!(select_renewals(&members, &catalog, today).len(), 1);

        members[0].renew(now);
        assert!(select_renewals(&members, &catalog, today).is_empty());
        assert_eq!(members[0].plan, "1 Month");
        assert_eq!(members[0].plan_status, PlanStatus::Active);
    }
}
