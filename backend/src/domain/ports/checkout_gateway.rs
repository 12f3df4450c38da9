//! Port for the hosted checkout provider.

use async_trait::async_trait;

use crate::domain::{CheckoutRequest, CheckoutSession};

use super::define_port_error;

define_port_error! {
    /// Errors raised by checkout gateway adapters.
    pub enum CheckoutGatewayError {
        /// The provider could not be reached.
        Transport { message: String } => "checkout provider unreachable: {message}",
        /// The provider refused the request.
        Rejected { status: u16, message: String } =>
            "checkout provider rejected request ({status}): {message}",
        /// The provider answered with an unexpected payload.
        Decode { message: String } => "checkout provider response invalid: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    /// Create a hosted checkout session for a single line item.
    async fn create_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, CheckoutGatewayError>;
}
