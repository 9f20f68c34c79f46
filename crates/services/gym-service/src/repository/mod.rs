//! Repository layer for data access.

mod base;
mod booking_repository;
mod inventory_repository;
mod member_repository;
mod plan_repository;
mod session_repository;
mod trainer_repository;
mod user_repository;

pub use base::{KvTable, Mutation, Record};
pub use booking_repository::{BookingRepository, BookingStore};
pub use inventory_repository::{InventoryRepository, InventoryStore};
pub use member_repository::{MemberRepository, MemberStore};
pub use plan_repository::{PlanRepository, PlanStore};
pub use session_repository::{SessionRepository, SessionStore};
pub use trainer_repository::{TrainerRepository, TrainerStore};
pub use user_repository::{UserRepository, UserStore, ACCOUNT_TAKEN};

#[cfg(any(test, feature = "test-utils"))]
pub use booking_repository::MockBookingRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use inventory_repository::MockInventoryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use member_repository::MockMemberRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use plan_repository::MockPlanRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use session_repository::MockSessionRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use trainer_repository::MockTrainerRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
