//! Account service - signup, admin-created accounts, login and the session slot.
//!
//! Every account is a login `User` paired with a member or trainer profile
//! sharing its id. The two records live under different keys, so creating
//! them is not atomic: [`CreateAccountWithProfile`] deletes the login again
//! when the profile write fails.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult};
use domain::{Clock, MemberProfile, SessionUser, TrainerProfile, User, UserRole};

use super::ensure_admin;
use super::requests::{NewMemberRequest, NewTrainerRequest, SignUpRequest};
use crate::infra::UnitOfWork;

/// Profile written together with a login account
#[derive(Debug, Clone, PartialEq)]
pub enum AccountProfile {
    Member(MemberProfile),
    Trainer(TrainerProfile),
}

impl AccountProfile {
    fn id(&self) -> Uuid {
        match self {
            AccountProfile::Member(member) => member.id,
            AccountProfile::Trainer(trainer) => trainer.id,
        }
    }
}

/// Write a login account and its profile, undoing the login when the
/// profile cannot be stored.
pub struct CreateAccountWithProfile {
    pub user: User,
    pub profile: AccountProfile,
}

impl CreateAccountWithProfile {
    pub async fn execute(self, uow: &dyn UnitOfWork) -> AppResult<AccountProfile> {
        if self.user.id != self.profile.id() {
            return Err(AppError::internal("account and profile ids differ"));
        }

        let user = uow.users().create(self.user).await?;

        let written = match self.profile {
            AccountProfile::Member(member) => uow.members().create(member).await.map(AccountProfile::Member),
            AccountProfile::Trainer(trainer) => uow.trainers().create(trainer).await.map(AccountProfile::Trainer),
        };

        match written {
            Ok(profile) => {
                tracing::info!(user_id = %user.id, role = %user.role, "Account created");
                Ok(profile)
            }
            Err(e) => {
                match uow.users().delete(user.id).await {
                    Ok(()) => tracing::warn!(user_id = %user.id, error = %e, "Profile write failed, login removed"),
                    Err(rollback) => tracing::error!(
                        user_id = %user.id,
                        error = %rollback,
                        "Profile write failed and the login could not be removed"
                    ),
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
pub trait AccountService: Send + Sync {
    /// Self-service member signup: no plan, `Inactive`. Does not sign in.
    async fn sign_up(&self, request: SignUpRequest) -> AppResult<MemberProfile>;

    /// Admin enrolls a member with an approved plan and the default password
    async fn add_member(&self, actor: &SessionUser, request: NewMemberRequest) -> AppResult<MemberProfile>;

    async fn add_trainer(&self, actor: &SessionUser, request: NewTrainerRequest) -> AppResult<TrainerProfile>;

    /// Remove a member profile and its login. Bookings are left in place.
    async fn delete_member(&self, actor: &SessionUser, id: Uuid) -> AppResult<()>;

    /// Remove a trainer profile and its login. Bookings are left in place.
    async fn delete_trainer(&self, actor: &SessionUser, id: Uuid) -> AppResult<()>;

    /// Sign in by email or username and remember the session
    async fn login(&self, login: &str, password: &str) -> AppResult<SessionUser>;

    async fn logout(&self) -> AppResult<()>;

    async fn current_session(&self) -> AppResult<Option<SessionUser>>;
}

pub struct AccountManager {
    uow: Arc<dyn UnitOfWork>,
    clock: Arc<dyn Clock>,
    default_password: String,
}

impl AccountManager {
    pub fn new(uow: Arc<dyn UnitOfWork>, clock: Arc<dyn Clock>, default_password: String) -> Self {
        Self {
            uow,
            clock,
            default_password,
        }
    }

    /// Delete the login of a removed profile. A login that is already gone
    /// is not an error.
    async fn remove_login(&self, id: Uuid) -> AppResult<()> {
        match self.uow.users().delete(id).await {
            Ok(()) | Err(AppError::NotFound) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl AccountService for AccountManager {
    async fn sign_up(&self, request: SignUpRequest) -> AppResult<MemberProfile> {
        request.validate()?;

        let id = Uuid::new_v4();
        let user = User::new(id, request.email.clone(), request.username, request.password, UserRole::Member);
        let profile = MemberProfile::signed_up(id, request.name, request.email, self.clock.now());

        match (CreateAccountWithProfile {
            user,
            profile: AccountProfile::Member(profile),
        })
        .execute(self.uow.as_ref())
        .await?
        {
            AccountProfile::Member(member) => Ok(member),
            AccountProfile::Trainer(_) => Err(AppError::internal("signup produced a trainer profile")),
        }
    }

    async fn add_member(&self, actor: &SessionUser, request: NewMemberRequest) -> AppResult<MemberProfile> {
        ensure_admin(actor)?;
        request.validate()?;

        if self.uow.plans().find_by_name(&request.plan).await?.is_none() {
            return Err(AppError::validation(format!("Unknown plan '{}'", request.plan)));
        }

        let id = Uuid::new_v4();
        // username defaults to the email
        let user = User::new(
            id,
            request.email.clone(),
            request.email.clone(),
            self.default_password.clone(),
            UserRole::Member,
        );
        let profile = MemberProfile::enrolled(id, request.name, request.email, request.plan, self.clock.now());

        match (CreateAccountWithProfile {
            user,
            profile: AccountProfile::Member(profile),
        })
        .execute(self.uow.as_ref())
        .await?
        {
            AccountProfile::Member(member) => Ok(member),
            AccountProfile::Trainer(_) => Err(AppError::internal("enrollment produced a trainer profile")),
        }
    }

    async fn add_trainer(&self, actor: &SessionUser, request: NewTrainerRequest) -> AppResult<TrainerProfile> {
        ensure_admin(actor)?;
        request.validate()?;

        let id = Uuid::new_v4();
        let profile = TrainerProfile::new(id, request.name, request.specialty, request.salary)?;
        let user = User::new(id, request.email, request.username, request.password, UserRole::Trainer);

        match (CreateAccountWithProfile {
            user,
            profile: AccountProfile::Trainer(profile),
        })
        .execute(self.uow.as_ref())
        .await?
        {
            AccountProfile::Trainer(trainer) => Ok(trainer),
            AccountProfile::Member(_) => Err(AppError::internal("trainer hire produced a member profile")),
        }
    }

    async fn delete_member(&self, actor: &SessionUser, id: Uuid) -> AppResult<()> {
        ensure_admin(actor)?;
        self.uow.members().delete(id).await?;
        self.remove_login(id).await?;
        tracing::info!(member_id = %id, "Member and login deleted");
        Ok(())
    }

    async fn delete_trainer(&self, actor: &SessionUser, id: Uuid) -> AppResult<()> {
        ensure_admin(actor)?;
        self.uow.trainers().delete(id).await?;
        self.remove_login(id).await?;
        tracing::info!(trainer_id = %id, "Trainer and login deleted");
        Ok(())
    }

    async fn login(&self, login: &str, password: &str) -> AppResult<SessionUser> {
        let user = self
            .uow
            .users()
            .find_by_login(login)
            .await?
            .filter(|u| u.password == password)
            .ok_or(AppError::InvalidCredentials)?;

        let session = SessionUser::from(&user);
        self.uow.session().save(session.clone()).await?;
        tracing::info!(user_id = %session.id, role = %session.role, "Signed in");
        Ok(session)
    }

    async fn logout(&self) -> AppResult<()> {
        self.uow.session().clear().await?;
        tracing::info!("Signed out");
        Ok(())
    }

    async fn current_session(&self) -> AppResult<Option<SessionUser>> {
        self.uow.session().current().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone, Utc};
    use rust_decimal::Decimal;

    use domain::{FixedClock, PlanStatus, PLAN_NONE};

    use crate::infra::{MockUnitOfWork, Persistence};
    use crate::repository::{MemberRepository, MockMemberRepository, PlanRepository, TrainerRepository, UserRepository};

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(Local.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap().with_timezone(&Utc)))
    }

    fn admin() -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            username: "admin".to_string(),
            email: "admin@gym.test".to_string(),
            role: UserRole::Admin,
        }
    }

    fn manager(uow: Arc<dyn UnitOfWork>) -> AccountManager {
        AccountManager::new(uow, clock(), "password123".to_string())
    }

    fn signup(username: &str, email: &str) -> SignUpRequest {
        SignUpRequest {
            name: "Ana".to_string(),
            email: email.to_string(),
            username: username.to_string(),
            password: "pw".to_string(),
        }
    }

    #[tokio::test]
    async fn sign_up_creates_inactive_member_sharing_the_login_id() {
        let uow = Arc::new(Persistence::in_memory());
        let service = manager(uow.clone());

        let member = service.sign_up(signup("ana", "ana@gym.test")).await.unwrap();

        assert_eq!(member.plan, PLAN_NONE);
        assert_eq!(member.plan_status, PlanStatus::Inactive);
        let user = uow.users().find_by_id(member.id).await.unwrap().unwrap();
        assert_eq!(user.role, UserRole::Member);
        assert!(service.current_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_signup_leaves_store_untouched() {
        let uow = Arc::new(Persistence::in_memory());
        let service = manager(uow.clone());
        service.sign_up(signup("ana", "ana@gym.test")).await.unwrap();

        let result = service.sign_up(signup("ana", "second@gym.test")).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(uow.members().list().await.unwrap().len(), 1);
        assert_eq!(uow.users().list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_profile_write_removes_the_login() {
        let backing = Persistence::in_memory();
        let users = backing.users();

        let mut members = MockMemberRepository::new();
        members
            .expect_create()
            .returning(|_| Err(AppError::storage("disk full")));
        let members: Arc<dyn MemberRepository> = Arc::new(members);

        let mut uow = MockUnitOfWork::new();
        let users_for_mock = users.clone();
        uow.expect_users().returning(move || users_for_mock.clone());
        uow.expect_members().returning(move || members.clone());

        let service = manager(Arc::new(uow));
        let result = service.sign_up(signup("ana", "ana@gym.test")).await;

        assert!(matches!(result, Err(AppError::Storage(_))));
        assert!(users.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn admin_added_member_logs_in_with_default_password() {
        let uow = Arc::new(Persistence::in_memory());
        uow.plans()
            .create(domain::Plan::new("1 Month".to_string(), Decimal::new(50, 0), 30).unwrap())
            .await
            .unwrap();
        let service = manager(uow.clone());

        let member = service
            .add_member(
                &admin(),
                NewMemberRequest {
                    name: "Ben".to_string(),
                    email: "ben@gym.test".to_string(),
                    plan: "1 Month".to_string(),
                },
            )
            .await
            .unwrap();
        assert!(member.is_active());

        let session = service.login("ben@gym.test", "password123").await.unwrap();
        assert_eq!(session.id, member.id);
        assert_eq!(service.current_session().await.unwrap(), Some(session));
    }

    #[tokio::test]
    async fn non_admin_cannot_add_members() {
        let service = manager(Arc::new(Persistence::in_memory()));
        let mut actor = admin();
        actor.role = UserRole::Trainer;

        let result = service
            .add_member(
                &actor,
                NewMemberRequest {
                    name: "Ben".to_string(),
                    email: "ben@gym.test".to_string(),
                    plan: "1 Month".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn wrong_password_is_rejected_and_logout_clears_session() {
        let uow = Arc::new(Persistence::in_memory());
        let service = manager(uow);
        service.sign_up(signup("ana", "ana@gym.test")).await.unwrap();

        assert!(matches!(
            service.login("ana", "nope").await,
            Err(AppError::InvalidCredentials)
        ));

        service.login("ana", "pw").await.unwrap();
        service.logout().await.unwrap();
        assert!(service.current_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleting_a_trainer_removes_profile_and_login() {
        let uow = Arc::new(Persistence::in_memory());
        let service = manager(uow.clone());
        let trainer = service
            .add_trainer(
                &admin(),
                NewTrainerRequest {
                    name: "Kim".to_string(),
                    specialty: "Strength".to_string(),
                    email: "kim@gym.test".to_string(),
                    username: "kim".to_string(),
                    password: "pw".to_string(),
                    salary: Decimal::new(3000, 0),
                },
            )
            .await
            .unwrap();

        service.delete_trainer(&admin(), trainer.id).await.unwrap();

        assert!(uow.trainers().list().await.unwrap().is_empty());
        assert!(uow.users().find_by_id(trainer.id).await.unwrap().is_none());
    }
}
