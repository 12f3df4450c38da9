//! Mapping from driven port errors to API errors shared by the services.
//!
//! Connection failures become `service_unavailable`; query failures become
//! `internal_error`. Constraint variants map to the client-facing error the
//! marketplace documents for them.

use crate::domain::Error;
use crate::domain::ports::{
    BookingRepositoryError, CheckoutGatewayError, ContentRepositoryError, FavoriteRepositoryError,
    MessageRepositoryError, PasswordHashError, PaymentRepositoryError, ProfileRepositoryError,
    UserPersistenceError,
};

macro_rules! connection_or_query {
    ($fn_name:ident, $error:ident, $label:literal) => {
        pub(crate) fn $fn_name(error: $error) -> Error {
            match error {
                $error::Connection { message } => {
                    Error::service_unavailable(format!("{} repository unavailable: {message}", $label))
                }
                $error::Query { message } => {
                    Error::internal(format!("{} repository error: {message}", $label))
                }
            }
        }
    };
}

connection_or_query!(map_profile_error, ProfileRepositoryError, "profile");
connection_or_query!(map_content_error, ContentRepositoryError, "content");
connection_or_query!(map_booking_error, BookingRepositoryError, "booking");
connection_or_query!(map_message_error, MessageRepositoryError, "message");

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail => Error::invalid_request("Email already registered"),
    }
}

pub(crate) fn map_favorite_error(error: FavoriteRepositoryError) -> Error {
    match error {
        FavoriteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("favorite repository unavailable: {message}"))
        }
        FavoriteRepositoryError::Query { message } => {
            Error::internal(format!("favorite repository error: {message}"))
        }
        FavoriteRepositoryError::Duplicate => Error::invalid_request("Already favorited"),
    }
}

pub(crate) fn map_payment_error(error: PaymentRepositoryError) -> Error {
    match error {
        PaymentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("payment repository unavailable: {message}"))
        }
        PaymentRepositoryError::Query { message } => {
            Error::internal(format!("payment repository error: {message}"))
        }
        PaymentRepositoryError::BookingNotFound { booking_id } => {
            Error::not_found(format!("booking {booking_id} not found"))
        }
        PaymentRepositoryError::BookingAlreadyPaid { booking_id } => {
            Error::conflict(format!("booking {booking_id} already has a payment"))
        }
    }
}

pub(crate) fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

pub(crate) fn map_gateway_error(error: CheckoutGatewayError) -> Error {
    match error {
        CheckoutGatewayError::Transport { message } => {
            Error::service_unavailable(format!("payment provider unavailable: {message}"))
        }
        other => Error::internal(other.to_string()),
    }
}
