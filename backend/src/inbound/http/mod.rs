//! HTTP inbound adapter exposing the REST API under `/api/v1`.

pub mod auth;
pub mod bookings;
pub mod content;
pub mod dashboard;
pub mod dto;
pub mod error;
pub mod favorites;
pub mod health;
pub mod messages;
pub mod payments;
pub mod profiles;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
