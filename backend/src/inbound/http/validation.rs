//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every failure is an `invalid_request` error whose details name the field
//! and a stable code, e.g. `{"field": "bookingId", "code": "invalid_uuid"}`.

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::domain::money::{MoneyError, major_to_minor};
use crate::domain::{Error, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValidationCode {
    MissingField,
    InvalidUuid,
    InvalidTimestamp,
    InvalidAmount,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidTimestamp => "invalid_timestamp",
            Self::InvalidAmount => "invalid_amount",
        }
    }
}

/// JSON field name as clients spell it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) const fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ValidationCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        ValidationCode::MissingField,
        format!("{} is required", field.as_str()),
    )
}

/// Unwrap an optional, non-blank field.
pub(crate) fn require(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value.trim()).map_err(|_| {
        field_error(
            field,
            ValidationCode::InvalidUuid,
            format!("{} must be a valid UUID", field.as_str()),
        )
    })
}

pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    parse_uuid(value, field).map(UserId::from_uuid)
}

pub(crate) fn parse_timestamp(value: &str, field: FieldName) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| {
            field_error(
                field,
                ValidationCode::InvalidTimestamp,
                format!("{} must be an RFC 3339 timestamp", field.as_str()),
            )
        })
}

/// Convert a decimal amount in major units to minor units.
pub(crate) fn parse_amount(value: f64, field: FieldName) -> Result<i64, Error> {
    major_to_minor(value).map_err(|err: MoneyError| {
        field_error(
            field,
            ValidationCode::InvalidAmount,
            format!("{}: {err}", field.as_str()),
        )
    })
}
