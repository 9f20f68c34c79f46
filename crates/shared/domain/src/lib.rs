//! Domain layer - Gym entities and membership/scheduling rules.
//!
//! This crate contains pure domain logic with no storage dependencies:
//! plan expiry, renewal selection, the booking confirmation handshake and
//! revenue aggregation are all plain functions over entity slices.

pub mod booking;
pub mod calendar;
pub mod clock;
pub mod constants;
pub mod error;
pub mod expiry;
pub mod inventory;
pub mod member;
pub mod plan;
pub mod renewal;
pub mod revenue;
pub mod trainer;
pub mod user;

pub use booking::{
    find_overlaps, transition_booking, Booking, BookingAction, BookingChanges, BookingDraft, BookingStatus,
};
pub use calendar::{pending_counts, sessions_by_day, upcoming_sessions, PendingCounts};
pub use clock::{local_day, Clock, FixedClock, SystemClock};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use expiry::{compute_expiry, expiry_day, with_expiry, Expiry, MemberWithExpiry};
pub use inventory::{InventoryItem, ItemCategory, ItemStatus};
pub use member::{MemberProfile, PlanStatus};
pub use plan::{Plan, PlanCatalog};
pub use renewal::{select_renewals, PendingRenewal};
pub use revenue::{aggregate_revenue, current_month_revenue, revenue_for_month, MonthlyRevenue, RevenueWindow};
pub use trainer::TrainerProfile;
pub use user::{SessionUser, User, UserRole};
