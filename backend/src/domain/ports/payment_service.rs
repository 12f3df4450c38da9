//! Driving port for checkout and payment webhooks.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Actor, CheckoutSession, Error};

/// What a verified webhook delivery led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// A payment was stored and the booking completed.
    PaymentRecorded { booking_id: Uuid },
    /// The booking already had a payment; nothing changed.
    AlreadyRecorded { booking_id: Uuid },
    /// The event type is acknowledged but not acted upon.
    Ignored { kind: String },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Start a hosted checkout for a confirmed booking paid by its client.
    async fn create_checkout(
        &self,
        actor: &Actor,
        booking_id: &Uuid,
    ) -> Result<CheckoutSession, Error>;

    /// Verify and apply a provider webhook.
    async fn handle_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookOutcome, Error>;
}
