//! Driving port for the booking lifecycle.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Actor, Booking, BookingDetails, BookingDraft, BookingStatus, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingService: Send + Sync {
    /// Request a session with a performer. Only clients may book.
    async fn create(&self, actor: &Actor, draft: BookingDraft) -> Result<BookingDetails, Error>;

    /// Bookings the caller takes part in, newest date first.
    async fn list(&self, actor: &Actor) -> Result<Vec<BookingDetails>, Error>;

    /// Move a booking to `status` after checking the caller's rights.
    async fn update_status(
        &self,
        actor: &Actor,
        id: &Uuid,
        status: BookingStatus,
    ) -> Result<Booking, Error>;
}
