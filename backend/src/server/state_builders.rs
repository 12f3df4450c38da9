//! Wire driving-port services onto their PostgreSQL, Stripe and Argon2
//! adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use encore::domain::{
    AccountServiceImpl, BookingServiceImpl, ContentServiceImpl, DashboardServiceImpl,
    FavoriteServiceImpl, MessagingServiceImpl, PaymentServiceImpl, ProfileServiceImpl,
};
use encore::inbound::http::state::HttpState;
use encore::outbound::payments::{StripeCheckoutGateway, StripeWebhookVerifier};
use encore::outbound::persistence::{
    DbPool, DieselBookingRepository, DieselContentRepository, DieselFavoriteRepository,
    DieselMessageRepository, DieselPaymentRepository, DieselProfileRepository,
    DieselUserRepository,
};
use encore::outbound::security::Argon2PasswordHasher;

use super::config::PaymentConfig;

/// Repository adapters sharing one connection pool.
struct Repositories {
    users: Arc<DieselUserRepository>,
    profiles: Arc<DieselProfileRepository>,
    content: Arc<DieselContentRepository>,
    bookings: Arc<DieselBookingRepository>,
    payments: Arc<DieselPaymentRepository>,
    messages: Arc<DieselMessageRepository>,
    favorites: Arc<DieselFavoriteRepository>,
}

impl Repositories {
    fn new(pool: &DbPool) -> Self {
        Self {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            profiles: Arc::new(DieselProfileRepository::new(pool.clone())),
            content: Arc::new(DieselContentRepository::new(pool.clone())),
            bookings: Arc::new(DieselBookingRepository::new(pool.clone())),
            payments: Arc::new(DieselPaymentRepository::new(pool.clone())),
            messages: Arc::new(DieselMessageRepository::new(pool.clone())),
            favorites: Arc::new(DieselFavoriteRepository::new(pool.clone())),
        }
    }
}

/// Build the handler state.
///
/// # Errors
/// Returns [`std::io::Error`] when the Stripe HTTP client cannot be built.
pub(crate) fn build_http_state(
    pool: &DbPool,
    payments: &PaymentConfig,
) -> std::io::Result<web::Data<HttpState>> {
    let repos = Repositories::new(pool);
    let clock = Arc::new(DefaultClock);

    let gateway = StripeCheckoutGateway::new(payments.stripe.clone())
        .map_err(|err| std::io::Error::other(format!("stripe client setup failed: {err}")))?;
    let verifier =
        StripeWebhookVerifier::new(payments.webhook_secret.as_str(), clock.clone())
            .with_tolerance(payments.webhook_tolerance);

    Ok(web::Data::new(HttpState {
        accounts: Arc::new(AccountServiceImpl::new(
            repos.users.clone(),
            repos.profiles.clone(),
            Arc::new(Argon2PasswordHasher::new()),
        )),
        profiles: Arc::new(ProfileServiceImpl::new(
            repos.profiles.clone(),
            repos.users.clone(),
            repos.content.clone(),
            repos.favorites.clone(),
        )),
        content: Arc::new(ContentServiceImpl::new(
            repos.content.clone(),
            repos.profiles.clone(),
        )),
        bookings: Arc::new(BookingServiceImpl::new(
            repos.bookings.clone(),
            repos.users.clone(),
        )),
        payments: Arc::new(PaymentServiceImpl::new(
            repos.bookings.clone(),
            repos.payments.clone(),
            Arc::new(gateway),
            Arc::new(verifier),
            payments.checkout.clone(),
        )),
        messages: Arc::new(MessagingServiceImpl::new(
            repos.messages.clone(),
            repos.users.clone(),
        )),
        favorites: Arc::new(FavoriteServiceImpl::new(
            repos.favorites.clone(),
            repos.profiles.clone(),
        )),
        dashboard: Arc::new(DashboardServiceImpl::new(
            repos.bookings,
            repos.payments,
            repos.messages,
            repos.favorites,
            clock,
        )),
    }))
}
