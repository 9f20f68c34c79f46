//! Training-session bookings and their confirmation handshake.
//!
//! A booking created by one party waits for the other party to confirm it:
//!
//! | Created by | Initial status   | Confirmed by |
//! |------------|------------------|--------------|
//! | Trainer    | `Pending`        | Member       |
//! | Member     | `PendingTrainer` | Trainer      |
//! | Admin      | `Confirmed`      | -            |
//!
//! Edits re-open the handshake for the other party, except admin edits which
//! keep the status unless explicitly overridden. Overlapping bookings are not
//! rejected here; see [`find_overlaps`].

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::user::UserRole;

/// Handshake status of a booking.
///
/// Always written as `PendingTrainer`; the legacy `"Pending Trainer"` spelling
/// is accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BookingStatus {
    /// Waiting for the member
    #[default]
    Pending,
    /// Waiting for the trainer
    #[serde(alias = "Pending Trainer")]
    PendingTrainer,
    Confirmed,
}

impl BookingStatus {
    /// Initial status for a booking created by `role`
    pub fn initial_for(role: UserRole) -> Self {
        match role {
            UserRole::Admin => BookingStatus::Confirmed,
            UserRole::Trainer => BookingStatus::Pending,
            UserRole::Member => BookingStatus::PendingTrainer,
        }
    }

    /// Role whose confirmation is outstanding, if any
    pub fn awaiting(&self) -> Option<UserRole> {
        match self {
            BookingStatus::Pending => Some(UserRole::Member),
            BookingStatus::PendingTrainer => Some(UserRole::Trainer),
            BookingStatus::Confirmed => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.awaiting().is_some()
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "Pending"),
            BookingStatus::PendingTrainer => write!(f, "PendingTrainer"),
            BookingStatus::Confirmed => write!(f, "Confirmed"),
        }
    }
}

/// A scheduled session between a member and a trainer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub member_id: Uuid,
    pub trainer_id: Uuid,
    pub date: NaiveDate,
    #[serde(with = "clock_time")]
    pub start_time: NaiveTime,
    #[serde(with = "clock_time")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub status: BookingStatus,
}

/// Fields supplied when a booking is created.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub member_id: Uuid,
    pub trainer_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Partial update of a booking. `status` is only honored for admins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingChanges {
    pub member_id: Option<Uuid>,
    pub trainer_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub status: Option<BookingStatus>,
}

/// Mutations of an existing booking
#[derive(Debug, Clone, PartialEq)]
pub enum BookingAction {
    Confirm,
    Edit { by: UserRole, changes: BookingChanges },
}

impl Booking {
    /// Create a booking on behalf of `created_by`.
    pub fn create(draft: BookingDraft, created_by: UserRole) -> DomainResult<Self> {
        validate_time_range(draft.start_time, draft.end_time)?;
        Ok(Self {
            id: Uuid::new_v4(),
            member_id: draft.member_id,
            trainer_id: draft.trainer_id,
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            status: BookingStatus::initial_for(created_by),
        })
    }

    /// True when the user is the booking's member or trainer
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.member_id == user_id || self.trainer_id == user_id
    }

    /// Same day and intersecting time ranges (touching ranges do not overlap)
    pub fn overlaps(&self, other: &Booking) -> bool {
        self.date == other.date && self.start_time < other.end_time && other.start_time < self.end_time
    }
}

/// Apply an action to a booking, returning the new record.
///
/// Confirming an already confirmed booking returns it unchanged.
/// Authorization is the caller's concern.
pub fn transition_booking(booking: &Booking, action: BookingAction) -> DomainResult<Booking> {
    match action {
        BookingAction::Confirm => {
            let mut next = booking.clone();
            if booking.status.is_pending() {
                next.status = BookingStatus::Confirmed;
            }
            Ok(next)
        }
        BookingAction::Edit { by, changes } => {
            let mut next = booking.clone();
            if let Some(member_id) = changes.member_id {
                next.member_id = member_id;
            }
            if let Some(trainer_id) = changes.trainer_id {
                next.trainer_id = trainer_id;
            }
            if let Some(date) = changes.date {
                next.date = date;
            }
            if let Some(start) = changes.start_time {
                next.start_time = start;
            }
            if let Some(end) = changes.end_time {
                next.end_time = end;
            }
            validate_time_range(next.start_time, next.end_time)?;

            next.status = match by {
                UserRole::Admin => changes.status.unwrap_or(booking.status),
                // the other party has to agree to the new slot
                UserRole::Trainer => BookingStatus::Pending,
                UserRole::Member => BookingStatus::PendingTrainer,
            };
            Ok(next)
        }
    }
}

/// Bookings sharing the candidate's trainer or member whose slot overlaps it.
pub fn find_overlaps<'a>(bookings: &'a [Booking], candidate: &Booking) -> Vec<&'a Booking> {
    bookings
        .iter()
        .filter(|b| b.id != candidate.id)
        .filter(|b| b.trainer_id == candidate.trainer_id || b.member_id == candidate.member_id)
        .filter(|b| b.overlaps(candidate))
        .collect()
}

fn validate_time_range(start: NaiveTime, end: NaiveTime) -> DomainResult<()> {
    if start >= end {
        return Err(DomainError::validation("End time must be after start time"));
    }
    Ok(())
}

/// `HH:MM` wall-clock times as entered in the scheduling forms.
mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn draft(trainer_id: Uuid, start: NaiveTime, end: NaiveTime) -> BookingDraft {
        BookingDraft {
            member_id: Uuid::new_v4(),
            trainer_id,
            date: day(),
            start_time: start,
            end_time: end,
        }
    }

    #[test]
    fn initial_status_depends_on_creator() {
        let trainer = Uuid::new_v4();
        let by_trainer = Booking::create(draft(trainer, t(9, 0), t(10, 0)), UserRole::Trainer).unwrap();
        let by_member = Booking::create(draft(trainer, t(9, 0), t(10, 0)), UserRole::Member).unwrap();
        let by_admin = Booking::create(draft(trainer, t(9, 0), t(10, 0)), UserRole::Admin).unwrap();

        assert_eq!(by_trainer.status, BookingStatus::Pending);
        assert_eq!(by_member.status, BookingStatus::PendingTrainer);
        assert_eq!(by_admin.status, BookingStatus::Confirmed);
    }

    #[test]
    fn confirm_moves_pending_states_to_confirmed() {
        let booking = Booking::create(draft(Uuid::new_v4(), t(9, 0), t(10, 0)), UserRole::Member).unwrap();
        let confirmed = transition_booking(&booking, BookingAction::Confirm).unwrap();
        assert_eq!(confirmed.status, BookingStatus::Confirmed);
        assert_eq!(confirmed.id, booking.id);
    }

    #[test]
    fn confirm_on_confirmed_is_a_no_op() {
        let booking = Booking::create(draft(Uuid::new_v4(), t(9, 0), t(10, 0)), UserRole::Admin).unwrap();
        let again = transition_booking(&booking, BookingAction::Confirm).unwrap();
        assert_eq!(again, booking);
    }

    #[test]
    fn trainer_edit_reopens_confirmation_for_member() {
        let booking = Booking::create(draft(Uuid::new_v4(), t(9, 0), t(10, 0)), UserRole::Admin).unwrap();
        let edited = transition_booking(
            &booking,
            BookingAction::Edit {
                by: UserRole::Trainer,
                changes: BookingChanges {
                    start_time: Some(t(11, 0)),
                    end_time: Some(t(12, 0)),
                    ..Default::default()
                },
            },
        )
        .unwrap();
        assert_eq!(edited.status, BookingStatus::Pending);
        assert_eq!(edited.start_time, t(11, 0));
    }

    #[test]
    fn admin_edit_keeps_status_unless_overridden() {
        let booking = Booking::create(draft(Uuid::new_v4(), t(9, 0), t(10, 0)), UserRole::Trainer).unwrap();
        let moved = transition_booking(
            &booking,
            BookingAction::Edit {
                by: UserRole::Admin,
                changes: BookingChanges {
                    date: NaiveDate::from_ymd_opt(2025, 3, 11),
                    ..Default::default()
                },
            },
        )
        .unwrap();
        assert_eq!(moved.status, BookingStatus::Pending);

        let overridden = transition_booking(
            &booking,
            BookingAction::Edit {
                by: UserRole::Admin,
                changes: BookingChanges {
                    status: Some(BookingStatus::Confirmed),
                    ..Default::default()
                },
            },
        )
        .unwrap();
        assert_eq!(overridden.status, BookingStatus::Confirmed);
    }

    #[test]
    fn status_override_is_ignored_for_non_admins() {
        let booking = Booking::create(draft(Uuid::new_v4(), t(9, 0), t(10, 0)), UserRole::Trainer).unwrap();
        let edited = transition_booking(
            &booking,
            BookingAction::Edit {
                by: UserRole::Member,
                changes: BookingChanges {
                    status: Some(BookingStatus::Confirmed),
                    ..Default::default()
                },
            },
        )
        .unwrap();
        assert_eq!(edited.status, BookingStatus::PendingTrainer);
    }

    #[test]
    fn inverted_time_range_is_rejected() {
        let result = Booking::create(draft(Uuid::new_v4(), t(10, 0), t(9, 0)), UserRole::Admin);
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn overlapping_slots_are_reported_not_rejected() {
        let trainer = Uuid::new_v4();
        let first = Booking::create(draft(trainer, t(9, 0), t(10, 0)), UserRole::Trainer).unwrap();
        let second = Booking::create(draft(trainer, t(9, 30), t(10, 30)), UserRole::Trainer).unwrap();
        let adjacent = Booking::create(draft(trainer, t(10, 0), t(11, 0)), UserRole::Trainer).unwrap();

        let existing = vec![first.clone(), adjacent];
        let overlaps = find_overlaps(&existing, &second);
        assert_eq!(overlaps.len(), 1);
        assert_eq!(overlaps[0].id, first.id);
    }

    #[test]
    fn reads_legacy_pending_trainer_spelling_and_writes_canonical() {
        let json = r#"{"id":"3a1f2b3c-4d5e-4f60-8a7b-9c0d1e2f3a4b","memberId":"9f8e7d6c-5b4a-4392-8170-6f5e4d3c2b1a",
            "trainerId":"1a2b3c4d-5e6f-4a7b-8c9d-0e1f2a3b4c5d","date":"2025-03-10",
            "startTime":"09:00","endTime":"10:00","status":"Pending Trainer"}"#;
        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.status, BookingStatus::PendingTrainer);
        assert_eq!(booking.status.awaiting(), Some(UserRole::Trainer));

        let written = serde_json::to_string(&booking).unwrap();
        assert!(written.contains("\"status\":\"PendingTrainer\""));
        assert!(written.contains("\"startTime\":\"09:00\""));
    }
}
