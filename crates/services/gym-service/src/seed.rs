//! First-run data: the default plan catalog and an admin login.

use rust_decimal::Decimal;
use uuid::Uuid;

use common::AppResult;
use domain::{Plan, User, UserRole};

use crate::infra::UnitOfWork;
use crate::repository::{PlanRepository, UserRepository};

/// Default plans as (name, price, duration in days)
pub const DEFAULT_PLANS: &[(&str, i64, u32)] = &[
    ("1 Month", 50, 30),
    ("3 Months", 120, 90),
    ("6 Months", 200, 180),
    ("9 Months", 230, 270),
    ("1 Year", 300, 365),
];

pub const ADMIN_EMAIL: &str = "admin@gym.com";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin";

/// What a seed run wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub plans_created: usize,
    pub admin_created: bool,
}

/// Seed the plan catalog when it is empty and an admin login when none exists.
///
/// Running it again on seeded storage writes nothing.
pub async fn seed_defaults(uow: &dyn UnitOfWork) -> AppResult<SeedReport> {
    let mut report = SeedReport::default();

    let plans = uow.plans();
    if plans.list().await?.is_empty() {
        for (name, price, duration) in DEFAULT_PLANS {
            plans
                .create(Plan::new(name.to_string(), Decimal::new(*price, 0), *duration)?)
                .await?;
            report.plans_created += 1;
        }
        tracing::info!(count = report.plans_created, "Default plans seeded");
    }

    let users = uow.users();
    if !users.list().await?.iter().any(User::is_admin) {
        users
            .create(User::new(
                Uuid::new_v4(),
                ADMIN_EMAIL.to_string(),
                ADMIN_USERNAME.to_string(),
                ADMIN_PASSWORD.to_string(),
                UserRole::Admin,
            ))
            .await?;
        report.admin_created = true;
        tracing::info!(username = ADMIN_USERNAME, "Admin login seeded");
    }

    Ok(report)
}
