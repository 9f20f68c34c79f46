//! Calendar views over bookings.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::booking::{Booking, BookingStatus};
use crate::user::UserRole;

/// Bookings grouped by day, each day ordered by start time.
pub fn sessions_by_day(bookings: &[Booking]) -> BTreeMap<NaiveDate, Vec<Booking>> {
    let mut days: BTreeMap<NaiveDate, Vec<Booking>> = BTreeMap::new();
    for booking in bookings {
        days.entry(booking.date).or_default().push(booking.clone());
    }
    for sessions in days.values_mut() {
        sessions.sort_by_key(|b| b.start_time);
    }
    days
}

/// Next confirmed sessions on or after `today`, earliest first.
pub fn upcoming_sessions(bookings: &[Booking], today: NaiveDate, limit: usize) -> Vec<Booking> {
    let mut upcoming: Vec<Booking> = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Confirmed && b.date >= today)
        .cloned()
        .collect();
    upcoming.sort_by_key(|b| (b.date, b.start_time));
    upcoming.truncate(limit);
    upcoming
}

/// Outstanding confirmations from one party's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PendingCounts {
    /// Requests this party has to answer
    pub awaiting_me: usize,
    /// Requests this party sent that the other side has not answered
    pub awaiting_other: usize,
}

/// Count pending bookings for `role`. Admins see every pending booking as
/// awaiting someone else.
pub fn pending_counts(bookings: &[Booking], role: UserRole) -> PendingCounts {
    bookings
        .iter()
        .filter_map(|b| b.status.awaiting())
        .fold(PendingCounts::default(), |mut counts, awaiting| {
            if role != UserRole::Admin && awaiting == role {
                counts.awaiting_me += 1;
            } else {
                counts.awaiting_other += 1;
            }
            counts
        })
}
