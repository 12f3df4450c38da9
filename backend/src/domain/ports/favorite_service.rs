//! Driving port for client favorites.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Actor, Error, Favorite, FavoriteEntry};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteService: Send + Sync {
    async fn add(&self, actor: &Actor, profile_id: &Uuid) -> Result<Favorite, Error>;

    async fn remove(&self, actor: &Actor, profile_id: &Uuid) -> Result<(), Error>;

    async fn list(&self, actor: &Actor) -> Result<Vec<FavoriteEntry>, Error>;
}
