//! Training-session booking repository.
//!
//! No uniqueness constraint: overlapping bookings are stored as given.

use async_trait::async_trait;
use uuid::Uuid;

use common::AppResult;
use domain::Booking;

use super::base::{KvTable, Mutation};
use crate::infra::Collection;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Booking>>;

    async fn list_for_member(&self, member_id: Uuid) -> AppResult<Vec<Booking>>;

    async fn list_for_trainer(&self, trainer_id: Uuid) -> AppResult<Vec<Booking>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>>;

    async fn create(&self, booking: Booking) -> AppResult<Booking>;

    /// Atomically change one booking
    async fn modify(&self, id: Uuid, mutation: Mutation<Booking>) -> AppResult<Booking>;

    async fn delete(&self, id: Uuid) -> AppResult<Booking>;
}

pub struct BookingStore {
    table: KvTable<Booking>,
}

impl BookingStore {
    pub fn new(collection: Collection<Booking>) -> Self {
        Self {
            table: KvTable::new(collection),
        }
    }
}

#[async_trait]
impl BookingRepository for BookingStore {
    async fn list(&self) -> AppResult<Vec<Booking>> {
        self.table.list().await
    }

    async fn list_for_member(&self, member_id: Uuid) -> AppResult<Vec<Booking>> {
        self.table.filter(|b| b.member_id == member_id).await
    }

    async fn list_for_trainer(&self, trainer_id: Uuid) -> AppResult<Vec<Booking>> {
        self.table.filter(|b| b.trainer_id == trainer_id).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        self.table.find_by_id(id).await
    }

    async fn create(&self, booking: Booking) -> AppResult<Booking> {
        self.table.insert(booking).await
    }

    async fn modify(&self, id: Uuid, mutation: Mutation<Booking>) -> AppResult<Booking> {
        self.table.modify(id, mutation).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<Booking> {
        self.table.delete(id).await
    }
}
