//! Port for client favorites.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Favorite, FavoriteEntry, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by favorite repository adapters.
    pub enum FavoriteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "favorite repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "favorite repository query failed: {message}",
        /// The pair is already stored.
        Duplicate => "profile already favorited",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    async fn insert(
        &self,
        user: &UserId,
        profile_id: &Uuid,
    ) -> Result<Favorite, FavoriteRepositoryError>;

    /// Returns `false` when the pair was not stored.
    async fn delete(&self, user: &UserId, profile_id: &Uuid)
    -> Result<bool, FavoriteRepositoryError>;

    /// Favorites of `user` with profile summaries, newest first.
    async fn list_for_user(
        &self,
        user: &UserId,
    ) -> Result<Vec<FavoriteEntry>, FavoriteRepositoryError>;

    async fn exists(&self, user: &UserId, profile_id: &Uuid)
    -> Result<bool, FavoriteRepositoryError>;

    async fn count_for_profile(&self, profile_id: &Uuid) -> Result<i64, FavoriteRepositoryError>;

    async fn count_for_user(&self, user: &UserId) -> Result<i64, FavoriteRepositoryError>;
}
