//! Port for authenticating payment provider webhooks.

use crate::domain::WebhookEvent;

use super::define_port_error;

define_port_error! {
    /// Reasons a webhook delivery is rejected.
    pub enum WebhookVerificationError {
        /// The signature header is missing a timestamp or signature.
        MalformedHeader => "malformed signature header",
        /// The signed timestamp is outside the accepted window.
        TimestampOutsideTolerance { age_secs: i64 } =>
            "timestamp outside tolerance ({age_secs}s)",
        /// No signature matched the payload.
        SignatureMismatch => "no signatures found matching the expected signature for payload",
        /// The payload is not a recognisable event.
        InvalidPayload { message: String } => "invalid payload: {message}",
    }
}

/// Verifies a raw webhook body against its signature header and decodes the
/// event.
#[cfg_attr(test, mockall::automock)]
pub trait WebhookVerifier: Send + Sync {
    fn verify(&self, payload: &[u8], signature: &str)
    -> Result<WebhookEvent, WebhookVerificationError>;
}
