//! Scheduling service - training-session bookings.
//!
//! A booking made by one party waits for the other party's confirmation;
//! admins book directly. Overlapping slots are accepted and only logged.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{
    find_overlaps, pending_counts, sessions_by_day, transition_booking, upcoming_sessions, Booking, BookingAction,
    BookingChanges, BookingDraft, Clock, MemberProfile, PendingCounts, SessionUser, UserRole,
    UPCOMING_SESSIONS_LIMIT,
};

use super::container::parallel;
use crate::infra::UnitOfWork;

/// Trainer name shown when the trainer profile is gone
const UNKNOWN_TRAINER: &str = "Unknown";

/// A confirmed upcoming session with its trainer's name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingSession {
    #[serde(flatten)]
    pub booking: Booking,
    pub trainer_name: String,
}

/// A member who has booked with a trainer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    #[serde(flatten)]
    pub member: MemberProfile,
    /// Sessions with this trainer today or later, in any status
    pub upcoming_sessions: usize,
}

#[async_trait]
pub trait SchedulingService: Send + Sync {
    /// Trainers book for themselves, members request for themselves, admins
    /// book for anyone.
    async fn create_booking(&self, actor: &SessionUser, draft: BookingDraft) -> AppResult<Booking>;

    /// Confirm as the awaited party (or as admin). Confirming a confirmed
    /// booking returns it unchanged.
    async fn confirm(&self, actor: &SessionUser, id: Uuid) -> AppResult<Booking>;

    async fn edit(&self, actor: &SessionUser, id: Uuid, changes: BookingChanges) -> AppResult<Booking>;

    /// Owners and admins may delete
    async fn delete(&self, actor: &SessionUser, id: Uuid) -> AppResult<()>;

    /// Bookings visible to the actor: all for admins, own ones otherwise
    async fn list_for(&self, actor: &SessionUser) -> AppResult<Vec<Booking>>;

    async fn pending_counts(&self, actor: &SessionUser) -> AppResult<PendingCounts>;

    /// Next confirmed sessions from today on
    async fn upcoming_sessions(&self, actor: &SessionUser) -> AppResult<Vec<UpcomingSession>>;

    async fn calendar(&self, actor: &SessionUser) -> AppResult<BTreeMap<NaiveDate, Vec<Booking>>>;

    /// Members who have booked with the signed-in trainer
    async fn my_clients(&self, actor: &SessionUser) -> AppResult<Vec<ClientSummary>>;
}

pub struct SchedulingManager {
    uow: Arc<dyn UnitOfWork>,
    clock: Arc<dyn Clock>,
}

impl SchedulingManager {
    pub fn new(uow: Arc<dyn UnitOfWork>, clock: Arc<dyn Clock>) -> Self {
        Self { uow, clock }
    }

    async fn ensure_parties_exist(&self, member_id: Uuid, trainer_id: Uuid) -> AppResult<()> {
        let members = self.uow.members();
        let trainers = self.uow.trainers();
        let (member, trainer) = parallel::join2(members.find_by_id(member_id), trainers.find_by_id(trainer_id)).await?;
        if member.is_none() {
            return Err(AppError::validation("Unknown member"));
        }
        if trainer.is_none() {
            return Err(AppError::validation("Unknown trainer"));
        }
        Ok(())
    }

    /// Warn about overlapping sessions. Never fails the calling operation.
    async fn log_overlaps(&self, booking: &Booking) {
        let bookings = match self.uow.bookings().list().await {
            Ok(bookings) => bookings,
            Err(e) => {
                tracing::warn!(booking_id = %booking.id, error = %e, "Overlap check skipped");
                return;
            }
        };
        let overlaps = find_overlaps(&bookings, booking);
        if !overlaps.is_empty() {
            tracing::warn!(
                booking_id = %booking.id,
                date = %booking.date,
                overlapping = overlaps.len(),
                "Booking overlaps existing sessions"
            );
        }
    }
}

/// Whether `actor` may confirm `booking` in its current state
fn may_confirm(actor: &SessionUser, booking: &Booking) -> bool {
    if actor.is_admin() {
        return true;
    }
    match booking.status.awaiting() {
        Some(UserRole::Member) => actor.role == UserRole::Member && actor.id == booking.member_id,
        Some(UserRole::Trainer) => actor.role == UserRole::Trainer && actor.id == booking.trainer_id,
        Some(UserRole::Admin) => false,
        None => booking.involves(actor.id),
    }
}

/// Whether `actor` owns the booking on their side
fn owns(actor: &SessionUser, booking: &Booking) -> bool {
    match actor.role {
        UserRole::Admin => true,
        UserRole::Trainer => booking.trainer_id == actor.id,
        UserRole::Member => booking.member_id == actor.id,
    }
}

#[async_trait]
impl SchedulingService for SchedulingManager {
    async fn create_booking(&self, actor: &SessionUser, draft: BookingDraft) -> AppResult<Booking> {
        let allowed = match actor.role {
            UserRole::Admin => true,
            UserRole::Trainer => draft.trainer_id == actor.id,
            UserRole::Member => draft.member_id == actor.id,
        };
        if !allowed {
            return Err(AppError::Forbidden);
        }
        self.ensure_parties_exist(draft.member_id, draft.trainer_id).await?;

        let booking = Booking::create(draft, actor.role)?;
        self.log_overlaps(&booking).await;

        let booking = self.uow.bookings().create(booking).await?;
        tracing::info!(booking_id = %booking.id, status = %booking.status, by = %actor.role, "Booking created");
        Ok(booking)
    }

    async fn confirm(&self, actor: &SessionUser, id: Uuid) -> AppResult<Booking> {
        let confirming = actor.clone();
        let booking = self
            .uow
            .bookings()
            .modify(
                id,
                Box::new(move |booking: &mut Booking| {
                    if !may_confirm(&confirming, booking) {
                        return Err(AppError::Forbidden);
                    }
                    *booking = transition_booking(booking, BookingAction::Confirm)?;
                    Ok(())
                }),
            )
            .await?;
        tracing::info!(booking_id = %id, by = %actor.role, "Booking confirmed");
        Ok(booking)
    }

    async fn edit(&self, actor: &SessionUser, id: Uuid, changes: BookingChanges) -> AppResult<Booking> {
        let reassigns_away = match actor.role {
            UserRole::Admin => false,
            UserRole::Trainer => changes.trainer_id.is_some_and(|t| t != actor.id),
            UserRole::Member => changes.member_id.is_some_and(|m| m != actor.id),
        };
        if reassigns_away {
            return Err(AppError::Forbidden);
        }
        if changes.member_id.is_some() || changes.trainer_id.is_some() {
            let current = self.uow.bookings().find_by_id(id).await?.ok_or_not_found()?;
            self.ensure_parties_exist(
                changes.member_id.unwrap_or(current.member_id),
                changes.trainer_id.unwrap_or(current.trainer_id),
            )
            .await?;
        }

        let editor = actor.clone();
        let booking = self
            .uow
            .bookings()
            .modify(
                id,
                Box::new(move |booking: &mut Booking| {
                    if !owns(&editor, booking) {
                        return Err(AppError::Forbidden);
                    }
                    *booking = transition_booking(booking, BookingAction::Edit { by: editor.role, changes })?;
                    Ok(())
                }),
            )
            .await?;
        tracing::info!(booking_id = %id, status = %booking.status, by = %actor.role, "Booking edited");
        self.log_overlaps(&booking).await;
        Ok(booking)
    }

    async fn delete(&self, actor: &SessionUser, id: Uuid) -> AppResult<()> {
        let booking = self.uow.bookings().find_by_id(id).await?.ok_or_not_found()?;
        if !owns(actor, &booking) {
            return Err(AppError::Forbidden);
        }
        self.uow.bookings().delete(id).await?;
        tracing::info!(booking_id = %id, by = %actor.role, "Booking deleted");
        Ok(())
    }

    async fn list_for(&self, actor: &SessionUser) -> AppResult<Vec<Booking>> {
        let bookings = self.uow.bookings();
        match actor.role {
            UserRole::Admin => bookings.list().await,
            UserRole::Trainer => bookings.list_for_trainer(actor.id).await,
            UserRole::Member => bookings.list_for_member(actor.id).await,
        }
    }

    async fn pending_counts(&self, actor: &SessionUser) -> AppResult<PendingCounts> {
        let bookings = self.list_for(actor).await?;
        Ok(pending_counts(&bookings, actor.role))
    }

    async fn upcoming_sessions(&self, actor: &SessionUser) -> AppResult<Vec<UpcomingSession>> {
        let trainers = self.uow.trainers();
        let (bookings, trainers) = parallel::join2(self.list_for(actor), trainers.list()).await?;
        let names: HashMap<Uuid, String> = trainers.into_iter().map(|t| (t.id, t.name)).collect();

        Ok(upcoming_sessions(&bookings, self.clock.today(), UPCOMING_SESSIONS_LIMIT)
            .into_iter()
            .map(|booking| UpcomingSession {
                trainer_name: names
                    .get(&booking.trainer_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_TRAINER.to_string()),
                booking,
            })
            .collect())
    }

    async fn calendar(&self, actor: &SessionUser) -> AppResult<BTreeMap<NaiveDate, Vec<Booking>>> {
        let bookings = self.list_for(actor).await?;
        Ok(sessions_by_day(&bookings))
    }

    async fn my_clients(&self, actor: &SessionUser) -> AppResult<Vec<ClientSummary>> {
        if actor.role != UserRole::Trainer {
            return Err(AppError::Forbidden);
        }
        let bookings = self.uow.bookings();
        let members = self.uow.members();
        let (sessions, members) = parallel::join2(bookings.list_for_trainer(actor.id), members.list()).await?;

        let today = self.clock.today();
        let client_ids: HashSet<Uuid> = sessions.iter().map(|b| b.member_id).collect();
        Ok(members
            .into_iter()
            .filter(|m| client_ids.contains(&m.id))
            .map(|member| {
                let upcoming_sessions = sessions
                    .iter()
                    .filter(|b| b.member_id == member.id && b.date >= today)
                    .count();
                ClientSummary {
                    member,
                    upcoming_sessions,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, NaiveTime, TimeZone, Utc};
    use rust_decimal::Decimal;

    use domain::{BookingStatus, FixedClock, TrainerProfile};

    use crate::infra::{MockUnitOfWork, Persistence};
    use crate::repository::{BookingRepository, MemberRepository, MockBookingRepository, TrainerRepository};

    struct Fixture {
        service: SchedulingManager,
        admin: SessionUser,
        trainer: SessionUser,
        member: SessionUser,
    }

    fn session(id: Uuid, role: UserRole) -> SessionUser {
        SessionUser {
            id,
            username: format!("{}-user", role),
            email: format!("{}@gym.test", role),
            role,
        }
    }

    async fn fixture() -> Fixture {
        let uow = Arc::new(Persistence::in_memory());
        let now = Local.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap().with_timezone(&Utc);

        let trainer = TrainerProfile::new(Uuid::new_v4(), "Kim".into(), "Strength".into(), Decimal::ZERO).unwrap();
        uow.trainers().create(trainer.clone()).await.unwrap();
        let member = MemberProfile::signed_up(Uuid::new_v4(), "Ana".into(), "ana@gym.test".into(), now);
        uow.members().create(member.clone()).await.unwrap();

        Fixture {
            service: SchedulingManager::new(uow, Arc::new(FixedClock(now))),
            admin: session(Uuid::new_v4(), UserRole::Admin),
            trainer: session(trainer.id, UserRole::Trainer),
            member: session(member.id, UserRole::Member),
        }
    }

    fn draft(f: &Fixture, day: u32, hour: u32) -> BookingDraft {
        BookingDraft {
            member_id: f.member.id,
            trainer_id: f.trainer.id,
            date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            start_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(hour + 1, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn member_request_waits_for_the_trainer() {
        let f = fixture().await;
        let booking = f.service.create_booking(&f.member, draft(&f, 12, 9)).await.unwrap();
        assert_eq!(booking.status, BookingStatus::PendingTrainer);

        let by_member = f.service.confirm(&f.member, booking.id).await;
        assert!(matches!(by_member, Err(AppError::Forbidden)));

        let confirmed = f.service.confirm(&f.trainer, booking.id).await.unwrap();
        assert_eq!(confirmed.status, BookingStatus::Confirmed);

        let again = f.service.confirm(&f.member, booking.id).await.unwrap();
        assert_eq!(again, confirmed);
    }

    #[tokio::test]
    async fn trainer_cannot_book_for_another_trainer() {
        let f = fixture().await;
        let mut other = draft(&f, 12, 9);
        other.trainer_id = Uuid::new_v4();

        let result = f.service.create_booking(&f.trainer, other).await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn unknown_member_is_rejected() {
        let f = fixture().await;
        let mut orphan = draft(&f, 12, 9);
        orphan.member_id = Uuid::new_v4();

        let result = f.service.create_booking(&f.admin, orphan).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn trainer_edit_of_confirmed_session_needs_member_again() {
        let f = fixture().await;
        let booking = f.service.create_booking(&f.admin, draft(&f, 12, 9)).await.unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);

        let moved = f
            .service
            .edit(
                &f.trainer,
                booking.id,
                BookingChanges {
                    date: NaiveDate::from_ymd_opt(2025, 3, 13),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(moved.status, BookingStatus::Pending);

        let counts = f.service.pending_counts(&f.member).await.unwrap();
        assert_eq!(counts, PendingCounts { awaiting_me: 1, awaiting_other: 0 });
    }

    #[tokio::test]
    async fn edit_succeeds_when_the_overlap_read_fails() {
        let member_id = Uuid::new_v4();
        let trainer_id = Uuid::new_v4();
        let stored = Booking::create(
            BookingDraft {
                member_id,
                trainer_id,
                date: NaiveDate::from_ymd_opt(2025, 3, 12).unwrap(),
                start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            },
            UserRole::Admin,
        )
        .unwrap();
        let id = stored.id;

        let mut bookings = MockBookingRepository::new();
        bookings.expect_modify().times(1).returning(move |_, mutation| {
            let mut booking = stored.clone();
            mutation(&mut booking)?;
            Ok(booking)
        });
        bookings
            .expect_list()
            .returning(|| Err(AppError::storage("bookings unreadable")));
        let bookings: Arc<dyn BookingRepository> = Arc::new(bookings);
        let mut uow = MockUnitOfWork::new();
        uow.expect_bookings().returning(move || bookings.clone());

        let now = Local.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap().with_timezone(&Utc);
        let service = SchedulingManager::new(Arc::new(uow), Arc::new(FixedClock(now)));
        let moved = service
            .edit(
                &session(Uuid::new_v4(), UserRole::Admin),
                id,
                BookingChanges {
                    date: NaiveDate::from_ymd_opt(2025, 3, 13),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(moved.id, id);
        assert_eq!(moved.date, NaiveDate::from_ymd_opt(2025, 3, 13).unwrap());
    }

    #[tokio::test]
    async fn strangers_cannot_delete() {
        let f = fixture().await;
        let booking = f.service.create_booking(&f.member, draft(&f, 12, 9)).await.unwrap();
        let stranger = session(Uuid::new_v4(), UserRole::Member);

        assert!(matches!(f.service.delete(&stranger, booking.id).await, Err(AppError::Forbidden)));
        f.service.delete(&f.member, booking.id).await.unwrap();
        assert!(f.service.list_for(&f.admin).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn upcoming_sessions_carry_trainer_names() {
        let f = fixture().await;
        f.service.create_booking(&f.admin, draft(&f, 9, 9)).await.unwrap();
        f.service.create_booking(&f.admin, draft(&f, 14, 9)).await.unwrap();
        f.service.create_booking(&f.member, draft(&f, 11, 9)).await.unwrap();

        let upcoming = f.service.upcoming_sessions(&f.member).await.unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].trainer_name, "Kim");
        assert_eq!(upcoming[0].booking.date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
    }

    #[tokio::test]
    async fn trainer_sees_clients_with_future_session_counts() {
        let f = fixture().await;
        f.service.create_booking(&f.trainer, draft(&f, 9, 9)).await.unwrap();
        f.service.create_booking(&f.trainer, draft(&f, 12, 9)).await.unwrap();
        f.service.create_booking(&f.trainer, draft(&f, 12, 11)).await.unwrap();

        let clients = f.service.my_clients(&f.trainer).await.unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].member.id, f.member.id);
        assert_eq!(clients[0].upcoming_sessions, 2);

        assert!(matches!(f.service.my_clients(&f.member).await, Err(AppError::Forbidden)));
    }
}
