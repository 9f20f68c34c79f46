//! Schedule commands - bookings and the confirmation handshake.

use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{Booking, BookingDraft, SessionUser, UserRole};

use super::require_session;
use crate::cli::args::{BookArgs, BookingArg};
use crate::service::ServiceContainer;
use crate::GymApp;

fn print_booking(booking: &Booking) {
    println!(
        "{}  {} {}-{}  {}",
        booking.id,
        booking.date,
        booking.start_time.format("%H:%M"),
        booking.end_time.format("%H:%M"),
        booking.status
    );
}

/// Party id from the flag, or the actor's own id when they hold `role`
fn party(explicit: Option<Uuid>, actor: &SessionUser, role: UserRole, flag: &str) -> AppResult<Uuid> {
    match explicit {
        Some(id) => Ok(id),
        None if actor.role == role => Ok(actor.id),
        None => Err(AppError::validation(format!("--{} is required", flag))),
    }
}

pub async fn bookings(app: &GymApp) -> AppResult<()> {
    let actor = require_session(app).await?;
    let scheduling = app.services.scheduling();

    let counts = scheduling.pending_counts(&actor).await?;
    println!(
        "Awaiting you: {}  Awaiting reply: {}",
        counts.awaiting_me, counts.awaiting_other
    );

    for (day, sessions) in scheduling.calendar(&actor).await? {
        println!("{}", day);
        for booking in &sessions {
            print!("  ");
            print_booking(booking);
        }
    }

    if actor.role == UserRole::Member {
        let upcoming = scheduling.upcoming_sessions(&actor).await?;
        if !upcoming.is_empty() {
            println!();
            println!("Upcoming:");
            for session in upcoming {
                println!(
                    "  {} {} with {}",
                    session.booking.date,
                    session.booking.start_time.format("%H:%M"),
                    session.trainer_name
                );
            }
        }
    }
    Ok(())
}

pub async fn book(args: BookArgs, app: &GymApp) -> AppResult<()> {
    let actor = require_session(app).await?;
    let draft = BookingDraft {
        member_id: party(args.member, &actor, UserRole::Member, "member")?,
        trainer_id: party(args.trainer, &actor, UserRole::Trainer, "trainer")?,
        date: args.date,
        start_time: args.start,
        end_time: args.end,
    };
    let booking = app.services.scheduling().create_booking(&actor, draft).await?;
    print_booking(&booking);
    Ok(())
}

pub async fn confirm(args: BookingArg, app: &GymApp) -> AppResult<()> {
    let actor = require_session(app).await?;
    let booking = app.services.scheduling().confirm(&actor, args.booking).await?;
    print_booking(&booking);
    Ok(())
}
