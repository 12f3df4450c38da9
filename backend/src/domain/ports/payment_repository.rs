//! Port for payment records.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewPayment, Payment, RecordOutcome, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by payment repository adapters.
    pub enum PaymentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "payment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "payment repository query failed: {message}",
        /// The booking referenced by the payment does not exist.
        BookingNotFound { booking_id: Uuid } => "booking {booking_id} not found",
        /// A different checkout session already paid for the booking.
        BookingAlreadyPaid { booking_id: Uuid } => "booking {booking_id} already has a payment",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_by_booking(
        &self,
        booking_id: &Uuid,
    ) -> Result<Option<Payment>, PaymentRepositoryError>;

    /// Store a completed payment and mark its booking `completed` in one
    /// transaction.
    ///
    /// Returns [`RecordOutcome::AlreadyRecorded`] without touching the
    /// booking when the same processor session was already stored, and
    /// [`PaymentRepositoryError::BookingAlreadyPaid`] when another session
    /// paid for the booking first.
    async fn record_completed_checkout(
        &self,
        payment: &NewPayment,
    ) -> Result<RecordOutcome, PaymentRepositoryError>;

    /// Payments for bookings where `performer` performs, newest first.
    async fn list_for_performer(
        &self,
        performer: &UserId,
    ) -> Result<Vec<Payment>, PaymentRepositoryError>;

    /// Sum of completed payments for `performer`, in minor units.
    async fn completed_total_for_performer(
        &self,
        performer: &UserId,
    ) -> Result<i64, PaymentRepositoryError>;
}
