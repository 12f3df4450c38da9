//! Stripe webhook signature verification.
//!
//! The `Stripe-Signature` header carries `t=<unix seconds>` and one or more
//! `v1=<hex>` entries. Each `v1` is an HMAC-SHA256 of `"{t}.{raw body}"`
//! keyed by the endpoint secret; any match is accepted. Events older than the
//! tolerance are rejected to limit replay.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use hmac::{Hmac, Mac};
use mockable::Clock;
use serde::Deserialize;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::domain::WebhookEvent;
use crate::domain::ports::{WebhookVerificationError, WebhookVerifier};

type HmacSha256 = Hmac<Sha256>;

pub const CHECKOUT_COMPLETED: &str = "checkout.session.completed";
pub const DEFAULT_TOLERANCE: Duration = Duration::from_secs(300);

#[derive(Debug, PartialEq, Eq)]
struct SignatureHeader {
    timestamp: i64,
    signatures: Vec<Vec<u8>>,
}

fn parse_header(header: &str) -> Result<SignatureHeader, WebhookVerificationError> {
    let mut timestamp = None;
    let mut signatures = Vec::new();
    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => {
                timestamp = Some(
                    value
                        .parse::<i64>()
                        .map_err(|_| WebhookVerificationError::malformed_header())?,
                );
            }
            // Undecodable entries cannot match; skip them like unknown schemes.
            "v1" => signatures.extend(hex::decode(value).ok()),
            _ => {}
        }
    }
    match timestamp {
        Some(timestamp) if !signatures.is_empty() => Ok(SignatureHeader {
            timestamp,
            signatures,
        }),
        _ => Err(WebhookVerificationError::malformed_header()),
    }
}

#[derive(Debug, Deserialize)]
struct EventEnvelope {
    #[serde(rename = "type")]
    kind: String,
    data: EventData,
}

#[derive(Debug, Deserialize)]
struct EventData {
    object: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct CheckoutSessionObject {
    id: String,
    amount_total: Option<i64>,
    currency: Option<String>,
    #[serde(default)]
    metadata: HashMap<String, String>,
}

fn parse_event(payload: &[u8]) -> Result<WebhookEvent, WebhookVerificationError> {
    let envelope: EventEnvelope = serde_json::from_slice(payload)
        .map_err(|err| WebhookVerificationError::invalid_payload(err.to_string()))?;
    if envelope.kind != CHECKOUT_COMPLETED {
        return Ok(WebhookEvent::Other {
            kind: envelope.kind,
        });
    }
    let session: CheckoutSessionObject = serde_json::from_value(envelope.data.object)
        .map_err(|err| WebhookVerificationError::invalid_payload(err.to_string()))?;
    Ok(WebhookEvent::CheckoutCompleted {
        session_id: session.id,
        amount_total: session.amount_total,
        currency: session.currency,
        metadata: session.metadata,
    })
}

/// HMAC-SHA256 verifier for Stripe webhook deliveries.
pub struct StripeWebhookVerifier {
    secret: Zeroizing<Vec<u8>>,
    tolerance: Duration,
    clock: Arc<dyn Clock>,
}

impl StripeWebhookVerifier {
    pub fn new(secret: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            secret: Zeroizing::new(secret.into().into_bytes()),
            tolerance: DEFAULT_TOLERANCE,
            clock,
        }
    }

    pub fn with_tolerance(mut self, tolerance: Duration) -> Self {
        self.tolerance = tolerance;
        self
    }

    fn mac_for(
        &self,
        timestamp: i64,
        payload: &[u8],
    ) -> Result<HmacSha256, WebhookVerificationError> {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&self.secret)
            .map_err(|_| WebhookVerificationError::signature_mismatch())?;
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        Ok(mac)
    }
}

impl WebhookVerifier for StripeWebhookVerifier {
    fn verify(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, WebhookVerificationError> {
        let header = parse_header(signature)?;

        let age_secs = self.clock.utc().timestamp() - header.timestamp;
        let tolerance = i64::try_from(self.tolerance.as_secs()).unwrap_or(i64::MAX);
        if age_secs > tolerance {
            return Err(WebhookVerificationError::timestamp_outside_tolerance(age_secs));
        }

        let mac = self.mac_for(header.timestamp, payload)?;
        let matched = header
            .signatures
            .iter()
            .any(|candidate| mac.clone().verify_slice(candidate).is_ok());
        if !matched {
            return Err(WebhookVerificationError::signature_mismatch());
        }

        parse_event(payload)
    }
}
