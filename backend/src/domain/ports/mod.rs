//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`], [`CheckoutGateway`],
//! [`WebhookVerifier`]) describe what the domain needs from infrastructure.
//! Driving ports (`*Service`) are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod booking_repository;
mod booking_service;
mod checkout_gateway;
mod content_repository;
mod content_service;
mod dashboard_service;
mod favorite_repository;
mod favorite_service;
mod message_repository;
mod messaging_service;
mod password_hasher;
mod payment_repository;
mod payment_service;
mod profile_repository;
mod profile_service;
mod user_repository;
mod webhook_verifier;

pub use account_service::AccountService;
#[cfg(test)]
pub use account_service::MockAccountService;
pub use booking_repository::{BookingRepository, BookingRepositoryError};
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_service::BookingService;
#[cfg(test)]
pub use booking_service::MockBookingService;
pub use checkout_gateway::{CheckoutGateway, CheckoutGatewayError};
#[cfg(test)]
pub use checkout_gateway::MockCheckoutGateway;
pub use content_repository::{ContentRepository, ContentRepositoryError};
#[cfg(test)]
pub use content_repository::MockContentRepository;
pub use content_service::ContentService;
#[cfg(test)]
pub use content_service::MockContentService;
pub use dashboard_service::DashboardService;
#[cfg(test)]
pub use dashboard_service::MockDashboardService;
pub use favorite_repository::{FavoriteRepository, FavoriteRepositoryError};
#[cfg(test)]
pub use favorite_repository::MockFavoriteRepository;
pub use favorite_service::FavoriteService;
#[cfg(test)]
pub use favorite_service::MockFavoriteService;
pub use message_repository::{MessageRepository, MessageRepositoryError};
#[cfg(test)]
pub use message_repository::MockMessageRepository;
pub use messaging_service::MessagingService;
#[cfg(test)]
pub use messaging_service::MockMessagingService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use payment_repository::MockPaymentRepository;
pub use payment_repository::{PaymentRepository, PaymentRepositoryError};
#[cfg(test)]
pub use payment_service::MockPaymentService;
pub use payment_service::{PaymentService, WebhookOutcome};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{ProfileRepository, ProfileRepositoryError};
#[cfg(test)]
pub use profile_service::MockProfileService;
pub use profile_service::{OwnProfile, ProfileService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{NewUser, UserCredentials, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use webhook_verifier::MockWebhookVerifier;
pub use webhook_verifier::{WebhookVerificationError, WebhookVerifier};
