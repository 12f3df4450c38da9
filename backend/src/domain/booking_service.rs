//! Booking lifecycle service.
//!
//! Bookings are created `pending` by clients. Status changes are gated by
//! role only: the assigned performer confirms or completes, either
//! participant may cancel or reopen. Transition order is not checked, so a
//! completed booking can be confirmed again.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{BookingRepository, BookingService, UserRepository};
use crate::domain::service_errors::{map_booking_error, map_user_error};
use crate::domain::{
    Actor, Booking, BookingDetails, BookingDraft, BookingStatus, Error, NewBooking, Role,
};

#[derive(Clone)]
pub struct BookingServiceImpl<B, U> {
    bookings: Arc<B>,
    users: Arc<U>,
}

impl<B, U> BookingServiceImpl<B, U> {
    pub fn new(bookings: Arc<B>, users: Arc<U>) -> Self {
        Self { bookings, users }
    }
}

#[async_trait]
impl<B, U> BookingService for BookingServiceImpl<B, U>
where
    B: BookingRepository,
    U: UserRepository,
{
    async fn create(&self, actor: &Actor, draft: BookingDraft) -> Result<BookingDetails, Error> {
        if !actor.is_client() {
            return Err(Error::forbidden("only clients can create bookings"));
        }
        let new_booking = NewBooking::from_draft(actor.id, draft)
            .map_err(|err| Error::invalid_request(format!("invalid booking: {err}")))?;

        let performer = self
            .users
            .find_by_id(&new_booking.performer_id)
            .await
            .map_err(map_user_error)?;
        if performer.is_none_or(|user| user.role != Role::Performer) {
            return Err(Error::not_found("Performer not found"));
        }

        let booking = self
            .bookings
            .insert(&new_booking)
            .await
            .map_err(map_booking_error)?;
        info!(
            booking_id = %booking.id,
            performer_id = %booking.performer_id,
            client_id = %booking.client_id,
            "booking requested"
        );
        self.bookings
            .find_details(&booking.id)
            .await
            .map_err(map_booking_error)?
            .ok_or_else(|| Error::internal(format!("booking {} vanished after insert", booking.id)))
    }

    async fn list(&self, actor: &Actor) -> Result<Vec<BookingDetails>, Error> {
        self.bookings
            .list_for_participant(&actor.id, actor.role, None)
            .await
            .map_err(map_booking_error)
    }

    async fn update_status(
        &self,
        actor: &Actor,
        id: &Uuid,
        status: BookingStatus,
    ) -> Result<Booking, Error> {
        let booking = self
            .bookings
            .find_by_id(id)
            .await
            .map_err(map_booking_error)?
            .ok_or_else(|| Error::not_found("Booking not found"))?;
        booking
            .authorize_status_change(actor, status)
            .map_err(|err| Error::forbidden(err.to_string()))?;

        let updated = self
            .bookings
            .update_status(id, status)
            .await
            .map_err(map_booking_error)?
            .ok_or_else(|| Error::not_found("Booking not found"))?;
        info!(
            booking_id = %id,
            from = %booking.status,
            to = %status,
            "booking status updated"
        );
        Ok(updated)
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
