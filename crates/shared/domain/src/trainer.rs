//! Trainer profile entity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

/// Trainer profile. `id` is shared with the trainer's login account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerProfile {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    #[serde(default)]
    pub salary: Decimal,
}

impl TrainerProfile {
    pub fn new(id: Uuid, name: String, specialty: String, salary: Decimal) -> DomainResult<Self> {
        let trainer = Self {
            id,
            name,
            specialty,
            salary,
        };
        trainer.validate()?;
        Ok(trainer)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() || self.specialty.trim().is_empty() {
            return Err(DomainError::validation("Trainer name and specialty are required"));
        }
        if self.salary.is_sign_negative() {
            return Err(DomainError::validation("Salary cannot be negative"));
        }
        Ok(())
    }
}
