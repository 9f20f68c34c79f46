//! Membership plan entity and name-keyed lookup.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::MIN_PLAN_DURATION_DAYS;
use crate::error::{DomainError, DomainResult};

/// A named membership tier. Members reference plans by `name`, not `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    /// Term length in calendar days
    pub duration: u32,
}

impl Plan {
    /// Create a validated plan
    pub fn new(name: String, price: Decimal, duration: u32) -> DomainResult<Self> {
        let plan = Self {
            id: Uuid::new_v4(),
            name,
            price,
            duration,
        };
        plan.validate()?;
        Ok(plan)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Plan name is required"));
        }
        if self.price.is_sign_negative() {
            return Err(DomainError::validation("Plan price cannot be negative"));
        }
        if self.duration < MIN_PLAN_DURATION_DAYS {
            return Err(DomainError::validation(format!(
                "Plan duration must be at least {} day",
                MIN_PLAN_DURATION_DAYS
            )));
        }
        Ok(())
    }
}

/// Plans indexed by display name.
///
/// A member whose plan name is missing from the catalog is a silent miss,
/// never an error: no expiry and no revenue.
#[derive(Debug)]
pub struct PlanCatalog<'a> {
    by_name: HashMap<&'a str, &'a Plan>,
}

impl<'a> PlanCatalog<'a> {
    pub fn new(plans: &'a [Plan]) -> Self {
        Self {
            by_name: plans.iter().map(|p| (p.name.as_str(), p)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&'a Plan> {
        self.by_name.get(name).copied()
    }

    /// Term length for a plan name
    pub fn duration(&self, name: &str) -> Option<u32> {
        self.get(name).map(|p| p.duration)
    }

    /// Price for a plan name, zero when the plan is unknown
    pub fn price_or_zero(&self, name: &str) -> Decimal {
        self.get(name).map(|p| p.price).unwrap_or(Decimal::ZERO)
    }
}
