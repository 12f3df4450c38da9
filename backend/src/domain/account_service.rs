//! Account domain service: registration, login, and account reads.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{
    AccountService, NewUser, PasswordHasher, ProfileRepository, UserRepository,
};
use crate::domain::service_errors::{map_hash_error, map_profile_error, map_user_error};
use crate::domain::{
    Error, LoginCredentials, Registration, Role, User, UserCard, UserId, parse_media_url,
};

/// Account service backed by the user and profile repositories.
#[derive(Clone)]
pub struct AccountServiceImpl<U, P, H> {
    users: Arc<U>,
    profiles: Arc<P>,
    hasher: Arc<H>,
}

impl<U, P, H> AccountServiceImpl<U, P, H> {
    pub fn new(users: Arc<U>, profiles: Arc<P>, hasher: Arc<H>) -> Self {
        Self {
            users,
            profiles,
            hasher,
        }
    }
}

impl<U, P, H> AccountServiceImpl<U, P, H>
where
    U: UserRepository,
{
    async fn load_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }
}

#[async_trait]
impl<U, P, H> AccountService for AccountServiceImpl<U, P, H>
where
    U: UserRepository,
    P: ProfileRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: Registration) -> Result<UserId, Error> {
        let password_hash = self
            .hasher
            .hash(registration.password())
            .map_err(map_hash_error)?;
        let new_user = NewUser {
            id: UserId::random(),
            name: registration.name().clone(),
            email: registration.email().clone(),
            password_hash,
            role: registration.role(),
        };
        let user = self.users.insert(&new_user).await.map_err(map_user_error)?;

        // The account stays committed if profile creation fails.
        if user.role == Role::Performer {
            if let Err(err) = self.profiles.create_empty(&user.id).await {
                error!(user_id = %user.id, error = %err, "performer profile creation failed");
                return Err(map_profile_error(err));
            }
        }

        info!(user_id = %user.id, role = %user.role, "account registered");
        Ok(user.id)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(stored) = self
            .users
            .find_credentials_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
        else {
            return Err(Error::unauthorized("invalid credentials"));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
            .map_err(map_hash_error)?;
        if !matches {
            return Err(Error::unauthorized("invalid credentials"));
        }
        Ok(stored.user)
    }

    async fn current_user(&self, id: &UserId) -> Result<User, Error> {
        self.load_user(id).await
    }

    async fn update_image(&self, id: &UserId, image: &str) -> Result<User, Error> {
        let image = parse_media_url(image)
            .ok_or_else(|| Error::invalid_request("image must be an absolute http(s) URL"))?;
        self.users
            .update_image(id, &image)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }

    async fn user_card(&self, id: &UserId) -> Result<UserCard, Error> {
        self.load_user(id).await.map(|user| user.card())
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
