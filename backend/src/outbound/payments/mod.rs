//! Payment processor adapters (Stripe).

mod stripe_checkout_gateway;
mod stripe_webhook_verifier;

pub use stripe_checkout_gateway::{StripeCheckoutGateway, StripeSettings};
pub use stripe_webhook_verifier::{DEFAULT_TOLERANCE, StripeWebhookVerifier};
