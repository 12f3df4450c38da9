//! Stripe Checkout implementation of the `CheckoutGateway` port.
//!
//! Sessions are created with a form-encoded `POST /v1/checkout/sessions`
//! using Stripe's bracketed key syntax for nested fields.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::ports::{CheckoutGateway, CheckoutGatewayError};
use crate::domain::{CheckoutRequest, CheckoutSession};

const SESSIONS_PATH: &str = "/v1/checkout/sessions";

/// Connection settings for the Stripe API.
#[derive(Clone)]
pub struct StripeSettings {
    pub api_base: String,
    pub secret_key: Zeroizing<String>,
    pub timeout: Duration,
}

impl StripeSettings {
    pub fn new(api_base: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            secret_key: Zeroizing::new(secret_key.into()),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for StripeSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeSettings")
            .field("api_base", &self.api_base)
            .field("secret_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    id: String,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Hosted checkout sessions over the Stripe REST API.
#[derive(Clone)]
pub struct StripeCheckoutGateway {
    client: Client,
    sessions_url: String,
    secret_key: Zeroizing<String>,
}

impl StripeCheckoutGateway {
    /// Build the gateway and its HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutGatewayError::Transport`] when the TLS backend
    /// cannot be initialised.
    pub fn new(settings: StripeSettings) -> Result<Self, CheckoutGatewayError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|err| CheckoutGatewayError::transport(err.to_string()))?;
        Ok(Self {
            client,
            sessions_url: format!("{}{SESSIONS_PATH}", settings.api_base.trim_end_matches('/')),
            secret_key: settings.secret_key,
        })
    }
}

/// Flatten a checkout request into Stripe's form fields. Metadata keys are
/// sorted so the encoded body is stable.
fn form_fields(request: &CheckoutRequest) -> Vec<(String, String)> {
    let mut fields = vec![
        ("mode".to_owned(), "payment".to_owned()),
        ("payment_method_types[0]".to_owned(), "card".to_owned()),
        (
            "line_items[0][price_data][currency]".to_owned(),
            request.currency.clone(),
        ),
        (
            "line_items[0][price_data][product_data][name]".to_owned(),
            request.product_name.clone(),
        ),
        (
            "line_items[0][price_data][product_data][description]".to_owned(),
            request.description.clone(),
        ),
        (
            "line_items[0][price_data][unit_amount]".to_owned(),
            request.unit_amount.to_string(),
        ),
        ("line_items[0][quantity]".to_owned(), "1".to_owned()),
        ("success_url".to_owned(), request.success_url.clone()),
        ("cancel_url".to_owned(), request.cancel_url.clone()),
    ];
    let mut metadata: Vec<_> = request.metadata.iter().collect();
    metadata.sort();
    fields.extend(
        metadata
            .into_iter()
            .map(|(key, value)| (format!("metadata[{key}]"), value.clone())),
    );
    fields
}

fn rejection_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .unwrap_or_else(|| body.chars().take(200).collect())
}

fn decode_session(body: &str) -> Result<CheckoutSession, CheckoutGatewayError> {
    let session: SessionResponse =
        serde_json::from_str(body).map_err(|err| CheckoutGatewayError::decode(err.to_string()))?;
    let url = session
        .url
        .ok_or_else(|| CheckoutGatewayError::decode("session has no redirect url"))?;
    Ok(CheckoutSession {
        id: session.id,
        url,
    })
}

#[async_trait]
impl CheckoutGateway for StripeCheckoutGateway {
    async fn create_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, CheckoutGatewayError> {
        let response = self
            .client
            .post(&self.sessions_url)
            .bearer_auth(self.secret_key.as_str())
            .form(&form_fields(request))
            .send()
            .await
            .map_err(|err| CheckoutGatewayError::transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| CheckoutGatewayError::transport(err.to_string()))?;
        if !status.is_success() {
            debug!(status = status.as_u16(), "checkout session rejected");
            return Err(CheckoutGatewayError::rejected(
                status.as_u16(),
                rejection_message(&body),
            ));
        }
        decode_session(&body)
    }
}
