//! Unit of Work: one entry point to every repository over a shared store.
//!
//! All repositories handed out by a [`Persistence`] share one [`KeyLocks`]
//! registry, so read-modify-write cycles on the same key never interleave
//! within the process.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use common::{AppResult, StorageBackend, StorageConfig};

use super::collection::{Collection, KeyLocks, StorageKey};
use super::store::{FileStore, KeyValueStore, MemoryStore};
use crate::repository::{
    BookingRepository, BookingStore, InventoryRepository, InventoryStore, MemberRepository, MemberStore,
    PlanRepository, PlanStore, SessionRepository, SessionStore, TrainerRepository, TrainerStore, UserRepository,
    UserStore,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Unit of Work trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn members(&self) -> Arc<dyn MemberRepository>;

    fn trainers(&self) -> Arc<dyn TrainerRepository>;

    fn plans(&self) -> Arc<dyn PlanRepository>;

    fn bookings(&self) -> Arc<dyn BookingRepository>;

    fn inventory(&self) -> Arc<dyn InventoryRepository>;

    fn session(&self) -> Arc<dyn SessionRepository>;
}

fn collection<T>(store: &Arc<dyn KeyValueStore>, locks: &Arc<KeyLocks>, key: StorageKey) -> Collection<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    Collection::new(store.clone(), locks.clone(), key)
}

/// Store-backed implementation of UnitOfWork
pub struct Persistence {
    users: Arc<UserStore>,
    members: Arc<MemberStore>,
    trainers: Arc<TrainerStore>,
    plans: Arc<PlanStore>,
    bookings: Arc<BookingStore>,
    inventory: Arc<InventoryStore>,
    session: Arc<SessionStore>,
}

impl Persistence {
    /// Wire every repository over `store` with a fresh lock registry.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let locks = Arc::new(KeyLocks::new());
        let users = Arc::new(UserStore::new(collection(&store, &locks, StorageKey::Users)));
        let members = Arc::new(MemberStore::new(collection(&store, &locks, StorageKey::Members)));
        let trainers = Arc::new(TrainerStore::new(collection(&store, &locks, StorageKey::Trainers)));
        let plans = Arc::new(PlanStore::new(collection(&store, &locks, StorageKey::Plans)));
        let bookings = Arc::new(BookingStore::new(collection(&store, &locks, StorageKey::Bookings)));
        let inventory = Arc::new(InventoryStore::new(collection(&store, &locks, StorageKey::Inventory)));
        let session = Arc::new(SessionStore::new(store));

        Self {
            users,
            members,
            trainers,
            plans,
            bookings,
            inventory,
            session,
        }
    }

    /// Repositories over a fresh process-local store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Open the backend named by `config`.
    pub async fn open(config: &StorageConfig) -> AppResult<Self> {
        let store: Arc<dyn KeyValueStore> = match config.backend {
            StorageBackend::File => Arc::new(FileStore::open(&config.data_dir).await?),
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
        };
        tracing::info!(backend = ?config.backend, dir = %config.data_dir.display(), "Storage ready");
        Ok(Self::new(store))
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn members(&self) -> Arc<dyn MemberRepository> {
        self.members.clone()
    }

    fn trainers(&self) -> Arc<dyn TrainerRepository> {
        self.trainers.clone()
    }

    fn plans(&self) -> Arc<dyn PlanRepository> {
        self.plans.clone()
    }

    fn bookings(&self) -> Arc<dyn BookingRepository> {
        self.bookings.clone()
    }

    fn inventory(&self) -> Arc<dyn InventoryRepository> {
        self.inventory.clone()
    }

    fn session(&self) -> Arc<dyn SessionRepository> {
        self.session.clone()
    }
}
