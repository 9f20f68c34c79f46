//! Trainer service - trainer profile reads and admin edits.
//!
//! Hiring and removing trainers goes through the account service, since
//! each trainer owns a login.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use common::{AppResult, OptionExt};
use domain::{SessionUser, TrainerProfile};

use super::ensure_admin;
use super::requests::TrainerUpdate;
use crate::infra::UnitOfWork;

#[async_trait]
pub trait TrainerService: Send + Sync {
    async fn list_trainers(&self) -> AppResult<Vec<TrainerProfile>>;

    async fn get_trainer(&self, id: Uuid) -> AppResult<TrainerProfile>;

    async fn update_trainer(&self, actor: &SessionUser, id: Uuid, update: TrainerUpdate) -> AppResult<TrainerProfile>;
}

pub struct TrainerManager {
    uow: Arc<dyn UnitOfWork>,
}

impl TrainerManager {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl TrainerService for TrainerManager {
    async fn list_trainers(&self) -> AppResult<Vec<TrainerProfile>> {
        self.uow.trainers().list().await
    }

    async fn get_trainer(&self, id: Uuid) -> AppResult<TrainerProfile> {
        self.uow.trainers().find_by_id(id).await?.ok_or_not_found()
    }

    async fn update_trainer(&self, actor: &SessionUser, id: Uuid, update: TrainerUpdate) -> AppResult<TrainerProfile> {
        ensure_admin(actor)?;
        update.validate()?;

        let trainer = self
            .uow
            .trainers()
            .modify(
                id,
                Box::new(move |trainer: &mut TrainerProfile| {
                    if let Some(name) = update.name {
                        trainer.name = name;
                    }
                    if let Some(specialty) = update.specialty {
                        trainer.specialty = specialty;
                    }
                    if let Some(salary) = update.salary {
                        trainer.salary = salary;
                    }
                    trainer.validate()?;
                    Ok(())
                }),
            )
            .await?;
        tracing::info!(trainer_id = %id, "Trainer profile updated");
        Ok(trainer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use rust_decimal::Decimal;

    use common::AppError;
    use domain::UserRole;

    use crate::infra::{KeyValueStore, MemoryStore, MockUnitOfWork, Persistence};
    use crate::repository::{MockTrainerRepository, TrainerRepository};

    fn admin() -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            username: "admin".to_string(),
            email: "admin@gym.test".to_string(),
            role: UserRole::Admin,
        }
    }

    fn kim(id: Uuid) -> TrainerProfile {
        TrainerProfile {
            id,
            name: "Kim".to_string(),
            specialty: "Strength".to_string(),
            salary: Decimal::ZERO,
        }
    }

    fn service_with(repo: MockTrainerRepository) -> TrainerManager {
        let repo: Arc<dyn TrainerRepository> = Arc::new(repo);
        let mut uow = MockUnitOfWork::new();
        uow.expect_trainers().returning(move || repo.clone());
        TrainerManager::new(Arc::new(uow))
    }

    /// Memory store whose reads take a while, so concurrent writers overlap
    struct SlowStore(MemoryStore);

    #[async_trait]
    impl KeyValueStore for SlowStore {
        async fn get(&self, key: &str) -> AppResult<Option<String>> {
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.0.get(key).await
        }

        async fn set(&self, key: &str, value: String) -> AppResult<()> {
            self.0.set(key, value).await
        }

        async fn remove(&self, key: &str) -> AppResult<()> {
            self.0.remove(key).await
        }
    }

    #[tokio::test]
    async fn update_merges_into_stored_profile() {
        let id = Uuid::new_v4();
        let mut repo = MockTrainerRepository::new();
        repo.expect_modify().times(1).returning(|id, mutation| {
            let mut trainer = kim(id);
            mutation(&mut trainer)?;
            Ok(trainer)
        });

        let service = service_with(repo);
        let updated = service
            .update_trainer(
                &admin(),
                id,
                TrainerUpdate {
                    specialty: Some("Yoga".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.name, "Kim");
        assert_eq!(updated.specialty, "Yoga");
    }

    #[tokio::test]
    async fn negative_salary_leaves_the_stored_profile_alone() {
        let uow = Arc::new(Persistence::in_memory());
        let trainer = uow.trainers().create(kim(Uuid::new_v4())).await.unwrap();
        let service = TrainerManager::new(uow.clone());

        let result = service
            .update_trainer(
                &admin(),
                trainer.id,
                TrainerUpdate {
                    name: Some("Kimberly".to_string()),
                    salary: Some(Decimal::new(-1, 0)),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(service.get_trainer(trainer.id).await.unwrap(), trainer);
    }

    #[tokio::test]
    async fn concurrent_partial_updates_both_land() {
        let uow = Arc::new(Persistence::new(Arc::new(SlowStore(MemoryStore::new()))));
        let trainer = uow.trainers().create(kim(Uuid::new_v4())).await.unwrap();
        let service = TrainerManager::new(uow.clone());
        let admin = admin();

        let (renamed, repaid) = tokio::join!(
            service.update_trainer(
                &admin,
                trainer.id,
                TrainerUpdate {
                    name: Some("Kimberly".to_string()),
                    ..Default::default()
                },
            ),
            service.update_trainer(
                &admin,
                trainer.id,
                TrainerUpdate {
                    salary: Some(Decimal::new(5000, 0)),
                    ..Default::default()
                },
            ),
        );
        renamed.unwrap();
        repaid.unwrap();

        let stored = service.get_trainer(trainer.id).await.unwrap();
        assert_eq!(stored.name, "Kimberly");
        assert_eq!(stored.salary, Decimal::new(5000, 0));
    }

    #[tokio::test]
    async fn missing_trainer_is_not_found() {
        let mut repo = MockTrainerRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = service_with(repo);
        assert!(matches!(service.get_trainer(Uuid::new_v4()).await, Err(AppError::NotFound)));
    }
}
