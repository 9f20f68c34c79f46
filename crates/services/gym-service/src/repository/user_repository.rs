//! Login account repository.

use async_trait::async_trait;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::User;

use super::base::KvTable;
use crate::infra::Collection;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Message shown when a signup collides with an existing account
pub const ACCOUNT_TAKEN: &str = "Username or email is already taken.";

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<User>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find by email or username
    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Create an account; fails with `Conflict` when the email or username is taken
    async fn create(&self, user: User) -> AppResult<User>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Store-backed implementation of UserRepository
pub struct UserStore {
    table: KvTable<User>,
}

impl UserStore {
    pub fn new(collection: Collection<User>) -> Self {
        Self {
            table: KvTable::new(collection),
        }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn list(&self) -> AppResult<Vec<User>> {
        self.table.list().await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.table.find_by_id(id).await
    }

    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>> {
        self.table.find_where(|u| u.matches_login(login)).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.table.find_where(|u| u.email == email).await
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.table.find_where(|u| u.username == username).await
    }

    async fn create(&self, user: User) -> AppResult<User> {
        let email = user.email.clone();
        let username = user.username.clone();
        self.table
            .insert_checked(user, move |existing| {
                if existing.iter().any(|u| u.collides_with(&email, &username)) {
                    return Err(AppError::conflict(ACCOUNT_TAKEN));
                }
                Ok(())
            })
            .await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.table.delete(id).await.map(|_| ())
    }
}
