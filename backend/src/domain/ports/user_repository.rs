//! Port abstraction for account persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{DisplayName, Email, Role, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses the email address.
        DuplicateEmail => "email already registered",
    }
}

/// Account row to insert. `password_hash` is a PHC string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub id: UserId,
    pub name: DisplayName,
    pub email: Email,
    pub password_hash: String,
    pub role: Role,
}

/// Stored account together with its password hash, used only for login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch the account and password hash registered for `email`.
    async fn find_credentials_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserCredentials>, UserPersistenceError>;

    /// Replace the avatar URL. Returns `None` when the user does not exist.
    async fn update_image(
        &self,
        id: &UserId,
        image: &str,
    ) -> Result<Option<User>, UserPersistenceError>;
}
