//! Domain primitives, aggregates, and use-case services.
//!
//! Purpose: define strongly typed marketplace entities shared by the HTTP and
//! persistence adapters, and the services that implement each driving port.
//! Adapters never construct entities without going through the validating
//! constructors defined here.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User, Profile, Content, Booking, Payment, Message, Favorite: stored
//!   aggregates.
//! - `*ServiceImpl`: driving port implementations over driven ports.

pub mod auth;
pub mod booking;
pub mod content;
pub mod dashboard;
pub mod error;
pub mod favorite;
pub mod message;
pub mod money;
pub mod payment;
pub mod ports;
pub mod profile;
pub mod trace_id;
pub mod user;

mod account_service;
mod booking_service;
mod content_service;
mod dashboard_service;
mod favorite_service;
mod messaging_service;
mod payment_service;
mod profile_service;
mod service_errors;
#[cfg(test)]
mod service_test_helpers;

pub use self::account_service::AccountServiceImpl;
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN, Registration,
    RegistrationValidationError,
};
pub use self::booking::{
    BOOKING_MIN_DURATION, Booking, BookingDetails, BookingDraft, BookingStats, BookingStatus,
    BookingValidationError, InvalidBookingStatus, NewBooking, StatusChangeDenied,
};
pub use self::booking_service::BookingServiceImpl;
pub use self::content::{
    Content, ContentCounters, ContentDraft, ContentKind, ContentValidationError, CounterChange,
    NewContent,
};
pub use self::content_service::ContentServiceImpl;
pub use self::dashboard::{
    ClientDashboard, Dashboard, EarningsReport, EarningsTotals, PerformerDashboard,
    RECENT_BOOKINGS_LIMIT, summarize_earnings,
};
pub use self::dashboard_service::DashboardServiceImpl;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::favorite::{Favorite, FavoriteEntry};
pub use self::favorite_service::FavoriteServiceImpl;
pub use self::message::{
    ConversationSummary, MESSAGE_MAX, Message, MessageBody, MessageValidationError, NewMessage,
};
pub use self::messaging_service::MessagingServiceImpl;
pub use self::payment::{
    CheckoutRequest, CheckoutSession, DEFAULT_CURRENCY, NewPayment, Payment, PaymentStatus,
    RecordOutcome, UnknownPaymentStatus, WebhookEvent,
};
pub use self::payment_service::{CheckoutSettings, PaymentServiceImpl};
pub use self::profile::{
    ContentPreview, PROFILE_AGE_MAX, PROFILE_AGE_MIN, PerformerPage, Profile, ProfileDraft,
    ProfileSummary, ProfileUpdate, ProfileValidationError,
};
pub use self::profile_service::ProfileServiceImpl;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    Actor, DISPLAY_NAME_MAX, DISPLAY_NAME_MIN, DisplayName, Email, Role, User, UserCard, UserId,
    UserValidationError, parse_media_url,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use encore::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
