//! Payment bridge: hosted checkout creation and webhook settlement.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::ports::{
    BookingRepository, CheckoutGateway, PaymentRepository, PaymentService, WebhookOutcome,
    WebhookVerifier,
};
use crate::domain::service_errors::{map_booking_error, map_gateway_error, map_payment_error};
use crate::domain::{
    Actor, BookingStatus, CheckoutRequest, CheckoutSession, DEFAULT_CURRENCY, Error, NewPayment,
    RecordOutcome, UserId, WebhookEvent,
};

/// Metadata key carrying the booking id through the checkout session.
pub const BOOKING_ID_METADATA: &str = "bookingId";
/// Metadata key carrying the paying user's id through the checkout session.
pub const USER_ID_METADATA: &str = "userId";

/// Checkout parameters that come from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSettings {
    /// Public origin of the web front end; redirect URLs are built from it.
    pub public_base_url: String,
    pub currency: String,
}

impl CheckoutSettings {
    pub fn new(public_base_url: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            public_base_url: public_base_url.into(),
            currency: currency.into(),
        }
    }

    fn redirect_url(&self, query: &str) -> String {
        format!(
            "{}/dashboard/bookings?{query}",
            self.public_base_url.trim_end_matches('/')
        )
    }
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self::new("http://localhost:3000", DEFAULT_CURRENCY)
    }
}

pub struct PaymentServiceImpl<B, P, G, V> {
    bookings: Arc<B>,
    payments: Arc<P>,
    gateway: Arc<G>,
    verifier: Arc<V>,
    settings: CheckoutSettings,
}

impl<B, P, G, V> PaymentServiceImpl<B, P, G, V> {
    pub fn new(
        bookings: Arc<B>,
        payments: Arc<P>,
        gateway: Arc<G>,
        verifier: Arc<V>,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            bookings,
            payments,
            gateway,
            verifier,
            settings,
        }
    }
}

fn metadata_ids(metadata: &HashMap<String, String>) -> Result<(Uuid, UserId), Error> {
    let (Some(booking_id), Some(user_id)) = (
        metadata.get(BOOKING_ID_METADATA),
        metadata.get(USER_ID_METADATA),
    ) else {
        return Err(Error::invalid_request("Missing metadata"));
    };
    let booking_id = Uuid::parse_str(booking_id)
        .map_err(|_| Error::invalid_request("Invalid metadata: bookingId"))?;
    let user_id =
        UserId::new(user_id).map_err(|_| Error::invalid_request("Invalid metadata: userId"))?;
    Ok((booking_id, user_id))
}

impl<B, P, G, V> PaymentServiceImpl<B, P, G, V>
where
    B: BookingRepository,
    P: PaymentRepository,
{
    async fn settle_checkout(
        &self,
        session_id: String,
        amount_total: Option<i64>,
        currency: Option<String>,
        metadata: &HashMap<String, String>,
    ) -> Result<WebhookOutcome, Error> {
        let (booking_id, payer_id) = metadata_ids(metadata)?;
        let amount = amount_total.unwrap_or_else(|| {
            warn!(booking_id = %booking_id, "checkout completion without amount_total");
            0
        });

        let payment = NewPayment::completed_checkout(
            booking_id,
            payer_id,
            amount,
            currency.as_deref(),
            session_id,
        );
        match self
            .payments
            .record_completed_checkout(&payment)
            .await
            .map_err(map_payment_error)?
        {
            RecordOutcome::Recorded => {
                info!(
                    booking_id = %booking_id,
                    processor_id = %payment.processor_id,
                    amount = payment.amount,
                    "payment recorded"
                );
                Ok(WebhookOutcome::PaymentRecorded { booking_id })
            }
            RecordOutcome::AlreadyRecorded => {
                info!(
                    booking_id = %booking_id,
                    processor_id = %payment.processor_id,
                    "duplicate checkout completion ignored"
                );
                Ok(WebhookOutcome::AlreadyRecorded { booking_id })
            }
        }
    }
}

#[async_trait]
impl<B, P, G, V> PaymentService for PaymentServiceImpl<B, P, G, V>
where
    B: BookingRepository,
    P: PaymentRepository,
    G: CheckoutGateway,
    V: WebhookVerifier,
{
    async fn create_checkout(
        &self,
        actor: &Actor,
        booking_id: &Uuid,
    ) -> Result<CheckoutSession, Error> {
        let details = self
            .bookings
            .find_details(booking_id)
            .await
            .map_err(map_booking_error)?
            .ok_or_else(|| Error::not_found("Booking not found"))?;
        let booking = &details.booking;
        if booking.client_id != actor.id {
            return Err(Error::forbidden("only the booking's client can pay for it"));
        }
        if booking.status != BookingStatus::Confirmed {
            return Err(Error::invalid_request("Booking must be confirmed"));
        }
        if self
            .payments
            .find_by_booking(booking_id)
            .await
            .map_err(map_payment_error)?
            .is_some()
        {
            return Err(Error::invalid_request("Payment already exists"));
        }

        let request = CheckoutRequest {
            product_name: format!("{} Session with {}", booking.kind, details.performer.name),
            description: format!("Duration: {} minutes", booking.duration),
            unit_amount: booking.total_amount(),
            currency: self.settings.currency.clone(),
            success_url: self.settings.redirect_url("success=true"),
            cancel_url: self.settings.redirect_url("canceled=true"),
            metadata: HashMap::from([
                (BOOKING_ID_METADATA.to_owned(), booking.id.to_string()),
                (USER_ID_METADATA.to_owned(), actor.id.to_string()),
            ]),
        };
        let session = self
            .gateway
            .create_session(&request)
            .await
            .map_err(map_gateway_error)?;
        info!(booking_id = %booking.id, session_id = %session.id, "checkout session created");
        Ok(session)
    }

    async fn handle_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookOutcome, Error> {
        let event = self.verifier.verify(payload, signature).map_err(|err| {
            warn!(error = %err, "webhook rejected");
            Error::invalid_request(format!("Webhook signature verification failed: {err}"))
        })?;

        match event {
            WebhookEvent::CheckoutCompleted {
                session_id,
                amount_total,
                currency,
                metadata,
            } => {
                self.settle_checkout(session_id, amount_total, currency, &metadata)
                    .await
            }
            WebhookEvent::Other { kind } => {
                debug!(kind = %kind, "webhook event acknowledged");
                Ok(WebhookOutcome::Ignored { kind })
            }
        }
    }
}

#[cfg(test)]
#[path = "payment_service_tests.rs"]
mod tests;
