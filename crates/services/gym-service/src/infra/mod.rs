//! Infrastructure layer - key-value storage and typed collections.

mod collection;
mod store;
mod unit_of_work;

pub use collection::{Collection, KeyLocks, StorageKey};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use store::MockKeyValueStore;
#[cfg(any(test, feature = "test-utils"))]
pub use unit_of_work::MockUnitOfWork;
