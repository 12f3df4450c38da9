//! Bookings between a client and a performer and their status lifecycle.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::money::session_total;
use super::{Actor, Payment, UserCard, UserId};

/// Shortest bookable session, in minutes.
pub const BOOKING_MIN_DURATION: i32 = 15;
const KIND_MAX: usize = 100;
const NOTES_MAX: usize = 2_000;

/// Validation failures for new bookings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingValidationError {
    #[error("type must not be empty")]
    EmptyKind,
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("duration must be at least {min} minutes")]
    DurationTooShort { min: i32 },
    #[error("rate must not be negative")]
    NegativeRate,
    #[error("a booking cannot target the client themselves")]
    SelfBooking,
}

/// Error returned when a status string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid status")]
pub struct InvalidBookingStatus;

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether only the assigned performer may move a booking into this state.
    pub const fn performer_only(self) -> bool {
        matches!(self, Self::Confirmed | Self::Completed)
    }

    /// Still expected to happen.
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = InvalidBookingStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(InvalidBookingStatus),
        }
    }
}

/// Stored booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: Uuid,
    pub performer_id: UserId,
    pub client_id: UserId,
    pub kind: String,
    pub date: DateTime<Utc>,
    /// Length in minutes.
    pub duration: i32,
    /// Hourly rate in minor units.
    pub rate: i64,
    pub notes: Option<String>,
    pub location: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Amount due for the session, in minor units.
    pub fn total_amount(&self) -> i64 {
        session_total(self.duration, self.rate)
    }

    /// Whether `user` takes part in this booking.
    pub fn involves(&self, user: UserId) -> bool {
        self.performer_id == user || self.client_id == user
    }

    /// Check that `actor` may move the booking to `next`.
    ///
    /// Confirming and completing are reserved for the assigned performer;
    /// cancelling or reopening is open to either participant. Transition
    /// order is not enforced.
    pub fn authorize_status_change(
        &self,
        actor: &Actor,
        next: BookingStatus,
    ) -> Result<(), StatusChangeDenied> {
        let allowed = if next.performer_only() {
            self.performer_id == actor.id
        } else {
            self.involves(actor.id)
        };
        if allowed {
            Ok(())
        } else {
            Err(StatusChangeDenied { status: next })
        }
    }
}

/// The caller may not set the requested status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("not allowed to set booking status to {status}")]
pub struct StatusChangeDenied {
    pub status: BookingStatus,
}

/// Raw booking request from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub performer_id: UserId,
    pub kind: String,
    pub date: DateTime<Utc>,
    pub duration: i32,
    pub rate: i64,
    pub notes: Option<String>,
    pub location: Option<String>,
}

/// Validated booking ready to persist in the `pending` state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub id: Uuid,
    pub performer_id: UserId,
    pub client_id: UserId,
    pub kind: String,
    pub date: DateTime<Utc>,
    pub duration: i32,
    pub rate: i64,
    pub notes: Option<String>,
    pub location: Option<String>,
    pub status: BookingStatus,
}

fn optional_text(
    value: Option<String>,
    field: &'static str,
    max: usize,
) -> Result<Option<String>, BookingValidationError> {
    let Some(raw) = value else { return Ok(None) };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > max {
        return Err(BookingValidationError::TooLong { field, max });
    }
    Ok(Some(trimmed.to_owned()))
}

impl NewBooking {
    pub fn from_draft(client: UserId, draft: BookingDraft) -> Result<Self, BookingValidationError> {
        let kind = draft.kind.trim();
        if kind.is_empty() {
            return Err(BookingValidationError::EmptyKind);
        }
        if kind.chars().count() > KIND_MAX {
            return Err(BookingValidationError::TooLong {
                field: "type",
                max: KIND_MAX,
            });
        }
        if draft.duration < BOOKING_MIN_DURATION {
            return Err(BookingValidationError::DurationTooShort {
                min: BOOKING_MIN_DURATION,
            });
        }
        if draft.rate < 0 {
            return Err(BookingValidationError::NegativeRate);
        }
        if draft.performer_id == client {
            return Err(BookingValidationError::SelfBooking);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            performer_id: draft.performer_id,
            client_id: client,
            kind: kind.to_owned(),
            date: draft.date,
            duration: draft.duration,
            rate: draft.rate,
            notes: optional_text(draft.notes, "notes", NOTES_MAX)?,
            location: optional_text(draft.location, "location", NOTES_MAX)?,
            status: BookingStatus::Pending,
        })
    }
}

/// Booking joined with both participants and its payment.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDetails {
    pub booking: Booking,
    pub performer: UserCard,
    /// Location from the performer's profile, when one exists.
    pub performer_location: Option<String>,
    pub client: UserCard,
    pub payment: Option<Payment>,
}

/// Aggregate booking counts for a participant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingStats {
    pub total: i64,
    pub pending: i64,
    /// Pending or confirmed bookings dated at or after the reference time.
    pub upcoming: i64,
}
