//! Shared CRUD over a typed collection.

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{Booking, InventoryItem, MemberProfile, Plan, TrainerProfile, User};

use crate::infra::Collection;

/// Entity persisted as an element of a collection, keyed by `id`.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Entity name used in log lines
    const ENTITY: &'static str;

    fn id(&self) -> Uuid;
}

/// In-place change applied to one record under the collection lock.
pub type Mutation<T> = Box<dyn FnOnce(&mut T) -> AppResult<()> + Send>;

macro_rules! impl_record {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Record for $ty {
                const ENTITY: &'static str = $name;

                fn id(&self) -> Uuid {
                    self.id
                }
            }
        )*
    };
}

impl_record! {
    User => "user",
    MemberProfile => "member",
    TrainerProfile => "trainer",
    Plan => "plan",
    Booking => "booking",
    InventoryItem => "inventory item",
}

/// CRUD table of `T` records stored as one JSON array.
pub struct KvTable<T> {
    collection: Collection<T>,
}

impl<T: Record> KvTable<T> {
    pub fn new(collection: Collection<T>) -> Self {
        Self { collection }
    }

    pub async fn list(&self) -> AppResult<Vec<T>> {
        self.collection.load().await
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<T>> {
        self.find_where(|record| record.id() == id).await
    }

    /// First record matching `pred`
    pub async fn find_where<P>(&self, pred: P) -> AppResult<Option<T>>
    where
        P: Fn(&T) -> bool,
    {
        Ok(self.collection.load().await?.into_iter().find(|record| pred(record)))
    }

    /// Every record matching `pred`, in stored order
    pub async fn filter<P>(&self, pred: P) -> AppResult<Vec<T>>
    where
        P: Fn(&T) -> bool,
    {
        let mut records = self.collection.load().await?;
        records.retain(|record| pred(record));
        Ok(records)
    }

    /// Append a record after `check` accepted the current contents.
    pub async fn insert_checked<C>(&self, record: T, check: C) -> AppResult<T>
    where
        C: FnOnce(&[T]) -> AppResult<()> + Send,
    {
        let created = record.clone();
        self.collection
            .update(move |records| {
                if records.iter().any(|existing| existing.id() == record.id()) {
                    return Err(AppError::conflict(T::ENTITY));
                }
                check(records)?;
                records.push(record);
                Ok(())
            })
            .await?;
        tracing::debug!(entity = T::ENTITY, id = %created.id(), "Inserted record");
        Ok(created)
    }

    pub async fn insert(&self, record: T) -> AppResult<T> {
        self.insert_checked(record, |_| Ok(())).await
    }

    /// Replace the record with the same id after `check` accepted the others.
    pub async fn replace_checked<C>(&self, record: T, check: C) -> AppResult<T>
    where
        C: FnOnce(&[T]) -> AppResult<()> + Send,
    {
        let id = record.id();
        self.collection
            .update(move |records| {
                let position = records
                    .iter()
                    .position(|existing| existing.id() == id)
                    .ok_or(AppError::NotFound)?;
                let others: Vec<T> = records
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != position)
                    .map(|(_, r)| r.clone())
                    .collect();
                check(&others)?;
                records[position] = record.clone();
                Ok(record)
            })
            .await
    }

    pub async fn replace(&self, record: T) -> AppResult<T> {
        self.replace_checked(record, |_| Ok(())).await
    }

    /// Apply `mutation` to the record with `id` and return the result.
    pub async fn modify(&self, id: Uuid, mutation: Mutation<T>) -> AppResult<T> {
        self.collection
            .update(move |records| {
                let record = records
                    .iter_mut()
                    .find(|existing| existing.id() == id)
                    .ok_or(AppError::NotFound)?;
                mutation(record)?;
                Ok(record.clone())
            })
            .await
    }

    /// Remove the record with `id`, failing with `NotFound` when absent.
    pub async fn delete(&self, id: Uuid) -> AppResult<T> {
        let removed = self
            .collection
            .update(move |records| {
                let position = records
                    .iter()
                    .position(|existing| existing.id() == id)
                    .ok_or(AppError::NotFound)?;
                Ok(records.remove(position))
            })
            .await?;
        tracing::debug!(entity = T::ENTITY, %id, "Deleted record");
        Ok(removed)
    }
}
