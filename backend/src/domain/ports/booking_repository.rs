//! Port for booking persistence and participant queries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Booking, BookingDetails, BookingStats, BookingStatus, NewBooking, Role, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by booking repository adapters.
    pub enum BookingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "booking repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "booking repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, booking: &NewBooking) -> Result<Booking, BookingRepositoryError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Booking>, BookingRepositoryError>;

    /// Booking joined with participant cards, performer location and payment.
    async fn find_details(
        &self,
        id: &Uuid,
    ) -> Result<Option<BookingDetails>, BookingRepositoryError>;

    /// Bookings where `user` takes part in the given role, newest date first.
    async fn list_for_participant(
        &self,
        user: &UserId,
        role: Role,
        limit: Option<i64>,
    ) -> Result<Vec<BookingDetails>, BookingRepositoryError>;

    /// Set the status. Returns `None` when the booking does not exist.
    async fn update_status(
        &self,
        id: &Uuid,
        status: BookingStatus,
    ) -> Result<Option<Booking>, BookingRepositoryError>;

    /// Counts for `user` in `role`; `upcoming` is measured from `now`.
    async fn stats(
        &self,
        user: &UserId,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<BookingStats, BookingRepositoryError>;
}
