//! End-to-end flows through the wired services over an in-memory store.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;

use common::AppError;
use domain::{expiry_day, local_day, BookingDraft, BookingStatus, FixedClock, PlanStatus, SessionUser};
use gym_service_lib::config::GymServiceConfig;
use gym_service_lib::infra::Persistence;
use gym_service_lib::seed::{seed_defaults, ADMIN_PASSWORD, ADMIN_USERNAME};
use gym_service_lib::service::{NewTrainerRequest, ServiceContainer, SignUpRequest};
use gym_service_lib::GymApp;

// =============================================================================
// Helpers
// =============================================================================

fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Local.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap().with_timezone(&Utc)
}

async fn seeded_app(now: DateTime<Utc>) -> GymApp {
    let app = GymApp::with_parts(
        Arc::new(Persistence::in_memory()),
        Arc::new(FixedClock(now)),
        GymServiceConfig::default(),
    );
    seed_defaults(app.uow.as_ref()).await.unwrap();
    app
}

async fn admin(app: &GymApp) -> SessionUser {
    app.services.accounts().login(ADMIN_USERNAME, ADMIN_PASSWORD).await.unwrap()
}

async fn sign_up_member(app: &GymApp, username: &str) -> SessionUser {
    app.services
        .accounts()
        .sign_up(SignUpRequest {
            name: format!("{} Member", username),
            email: format!("{}@gym.test", username),
            username: username.to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();
    app.services.accounts().login(username, "secret").await.unwrap()
}

fn slot(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap()
}

// =============================================================================
// Membership
// =============================================================================

#[tokio::test]
async fn approved_plan_runs_from_approval_day() {
    let now = noon(2025, 3, 10);
    let app = seeded_app(now).await;
    let member = sign_up_member(&app, "alice").await;
    let admin = admin(&app).await;
    let membership = app.services.membership();

    let requested = membership.request_plan(&member, member.id, "6 Months").await.unwrap();
    assert_eq!(requested.plan_status, PlanStatus::PendingApproval);
    assert!(membership.list_members().await.unwrap()[0].expiry.expiry_date.is_none());

    let approved = membership.approve_plan(&admin, member.id).await.unwrap();
    assert_eq!(approved.plan_status, PlanStatus::Active);
    assert_eq!(approved.join_date, now);

    let listed = membership.get_member(member.id).await.unwrap();
    assert_eq!(listed.expiry.expiry_date, expiry_day(local_day(now), 180));
    assert!(!listed.expiry.is_expired);
}

#[tokio::test]
async fn member_cannot_approve_own_request() {
    let app = seeded_app(noon(2025, 3, 10)).await;
    let member = sign_up_member(&app, "bob").await;
    let membership = app.services.membership();

    membership.request_plan(&member, member.id, "1 Month").await.unwrap();
    let result = membership.approve_plan(&member, member.id).await;
    assert!(matches!(result, Err(AppError::Forbidden)));
}

#[tokio::test]
async fn requesting_an_unknown_plan_fails() {
    let app = seeded_app(noon(2025, 3, 10)).await;
    let member = sign_up_member(&app, "carol").await;

    let result = app
        .services
        .membership()
        .request_plan(&member, member.id, "Lifetime")
        .await;
    assert!(result.is_err());
    let profile = app.services.membership().get_member(member.id).await.unwrap();
    assert_eq!(profile.member.plan_status, PlanStatus::Inactive);
}

#[tokio::test]
async fn duplicate_signup_is_rejected() {
    let app = seeded_app(noon(2025, 3, 10)).await;
    sign_up_member(&app, "dave").await;

    let result = app
        .services
        .accounts()
        .sign_up(SignUpRequest {
            name: "Another Dave".to_string(),
            email: "other@gym.test".to_string(),
            username: "dave".to_string(),
            password: "secret".to_string(),
        })
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(app.services.membership().list_members().await.unwrap().len(), 1);
}

// =============================================================================
// Scheduling
// =============================================================================

#[tokio::test]
async fn booking_handshake_between_member_and_trainer() {
    let app = seeded_app(noon(2025, 3, 10)).await;
    let member = sign_up_member(&app, "erin").await;
    let admin = admin(&app).await;

    let trainer = app
        .services
        .accounts()
        .add_trainer(
            &admin,
            NewTrainerRequest {
                name: "Alex Costa".to_string(),
                specialty: "Weightlifting".to_string(),
                email: "alex@gym.test".to_string(),
                username: "alex".to_string(),
                password: "trainer123".to_string(),
                salary: Decimal::new(50_000, 0),
            },
        )
        .await
        .unwrap();
    let trainer_session = app.services.accounts().login("alex", "trainer123").await.unwrap();
    assert_eq!(trainer_session.id, trainer.id);

    let scheduling = app.services.scheduling();
    let booking = scheduling
        .create_booking(
            &member,
            BookingDraft {
                member_id: member.id,
                trainer_id: trainer.id,
                date: NaiveDate::from_ymd_opt(2025, 3, 12).unwrap(),
                start_time: slot(9),
                end_time: slot(10),
            },
        )
        .await
        .unwrap();
    assert_eq!(booking.status, BookingStatus::PendingTrainer);

    // the requesting member cannot answer their own request
    assert!(matches!(
        scheduling.confirm(&member, booking.id).await,
        Err(AppError::Forbidden)
    ));

    let counts = scheduling.pending_counts(&trainer_session).await.unwrap();
    assert_eq!(counts.awaiting_me, 1);

    let confirmed = scheduling.confirm(&trainer_session, booking.id).await.unwrap();
    assert_eq!(confirmed.status, BookingStatus::Confirmed);

    let upcoming = scheduling.upcoming_sessions(&member).await.unwrap();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].trainer_name, "Alex Costa");
}

#[tokio::test]
async fn overlapping_bookings_are_both_accepted() {
    let app = seeded_app(noon(2025, 3, 10)).await;
    let first = sign_up_member(&app, "fay").await;
    let second = sign_up_member(&app, "gus").await;
    let admin = admin(&app).await;

    let trainer = app
        .services
        .accounts()
        .add_trainer(
            &admin,
            NewTrainerRequest {
                name: "Maria Fiori".to_string(),
                specialty: "Yoga".to_string(),
                email: "maria@gym.test".to_string(),
                username: "maria".to_string(),
                password: "trainer123".to_string(),
                salary: Decimal::ZERO,
            },
        )
        .await
        .unwrap();

    let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
    let scheduling = app.services.scheduling();
    for member in [&first, &second] {
        scheduling
            .create_booking(
                member,
                BookingDraft {
                    member_id: member.id,
                    trainer_id: trainer.id,
                    date: day,
                    start_time: slot(10),
                    end_time: slot(11),
                },
            )
            .await
            .unwrap();
    }

    let all = scheduling.list_for(&admin).await.unwrap();
    assert_eq!(all.len(), 2);
}
