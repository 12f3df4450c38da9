//! Payments settled through the hosted checkout.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::UserId;

/// Currency applied when the processor omits one.
pub const DEFAULT_CURRENCY: &str = "usd";

/// Settlement state of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

impl PaymentStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised payment status in storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown payment status: {0}")]
pub struct UnknownPaymentStatus(pub String);

impl FromStr for PaymentStatus {
    type Err = UnknownPaymentStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(UnknownPaymentStatus(other.to_owned())),
        }
    }
}

/// Stored payment. At most one exists per booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub payer_id: UserId,
    /// Amount in minor units.
    pub amount: i64,
    pub currency: String,
    /// Checkout session id issued by the processor.
    pub processor_id: String,
    pub status: PaymentStatus,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payment to be recorded from a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub payer_id: UserId,
    pub amount: i64,
    pub currency: String,
    pub processor_id: String,
    pub status: PaymentStatus,
    pub description: String,
}

impl NewPayment {
    /// Build the completed payment for a finished checkout session.
    pub fn completed_checkout(
        booking_id: Uuid,
        payer_id: UserId,
        amount: i64,
        currency: Option<&str>,
        processor_id: impl Into<String>,
    ) -> Self {
        let currency = currency
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_CURRENCY)
            .to_lowercase();
        Self {
            id: Uuid::new_v4(),
            booking_id,
            payer_id,
            amount,
            currency,
            processor_id: processor_id.into(),
            status: PaymentStatus::Completed,
            description: format!("Payment for booking {booking_id}"),
        }
    }
}

/// Outcome of recording a checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Payment stored and booking marked completed.
    Recorded,
    /// A payment already existed for the booking or session.
    AlreadyRecorded,
}

/// Hosted checkout request sent to the payment processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub product_name: String,
    pub description: String,
    /// Unit amount in minor units.
    pub unit_amount: i64,
    pub currency: String,
    pub success_url: String,
    pub cancel_url: String,
    pub metadata: HashMap<String, String>,
}

/// Checkout session created by the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

/// Verified webhook event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    CheckoutCompleted {
        session_id: String,
        amount_total: Option<i64>,
        currency: Option<String>,
        metadata: HashMap<String, String>,
    },
    /// Any event type the marketplace does not act upon.
    Other { kind: String },
}
