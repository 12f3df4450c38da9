//! Driving port for registration, login, and account reads.
//!
//! Inbound adapters call it to authenticate credentials and manage accounts
//! without importing persistence or hashing infrastructure, so handler tests
//! can substitute a mock.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, User, UserCard, UserId};

/// Domain use-case port for accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account and, for performers, an empty profile.
    async fn register(&self, registration: Registration) -> Result<UserId, Error>;

    /// Validate credentials and return the authenticated user.
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Load the signed-in user.
    async fn current_user(&self, id: &UserId) -> Result<User, Error>;

    /// Replace the signed-in user's avatar URL.
    async fn update_image(&self, id: &UserId, image: &str) -> Result<User, Error>;

    /// Public card of any user.
    async fn user_card(&self, id: &UserId) -> Result<UserCard, Error>;
}
