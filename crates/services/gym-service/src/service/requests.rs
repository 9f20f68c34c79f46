//! Validated inputs of the account, plan, trainer and inventory use cases.

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use domain::{ItemCategory, ItemStatus};

/// Self-service member signup
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 1, message = "Please fill in all fields."))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Please fill in all fields."))]
    pub username: String,

    #[validate(length(min = 1, message = "Please fill in all fields."))]
    pub password: String,
}

/// Member enrolled by an admin; the login gets the default password
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewMemberRequest {
    #[validate(length(min = 1, message = "Please fill out all fields."))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Please fill out all fields."))]
    pub plan: String,
}

/// Trainer profile plus login created by an admin
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewTrainerRequest {
    #[validate(length(min = 1, message = "Please fill out all trainer details, including login info."))]
    pub name: String,

    #[validate(length(min = 1, message = "Please fill out all trainer details, including login info."))]
    pub specialty: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Please fill out all trainer details, including login info."))]
    pub username: String,

    #[validate(length(min = 1, message = "Please fill out all trainer details, including login info."))]
    pub password: String,

    #[serde(default)]
    pub salary: Decimal,
}

/// Admin edit of a member profile. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct MemberUpdate {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub plan: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlanRequest {
    #[validate(length(min = 1, message = "Plan name is required"))]
    pub name: String,

    pub price: Decimal,

    #[validate(range(min = 1, message = "Plan duration must be at least 1 day"))]
    pub duration: u32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TrainerUpdate {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "Specialty cannot be empty"))]
    pub specialty: Option<String>,

    pub salary: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InventoryRequest {
    #[validate(length(min = 1, message = "Please fill out at least Name and Category."))]
    pub name: String,

    pub category: ItemCategory,

    #[serde(default)]
    pub quantity: u32,

    #[serde(default)]
    pub status: ItemStatus,
}
