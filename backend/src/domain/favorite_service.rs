//! Client favorites service.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{FavoriteRepository, FavoriteService, ProfileRepository};
use crate::domain::service_errors::{map_favorite_error, map_profile_error};
use crate::domain::{Actor, Error, Favorite, FavoriteEntry};

#[derive(Clone)]
pub struct FavoriteServiceImpl<F, P> {
    favorites: Arc<F>,
    profiles: Arc<P>,
}

impl<F, P> FavoriteServiceImpl<F, P> {
    pub fn new(favorites: Arc<F>, profiles: Arc<P>) -> Self {
        Self {
            favorites,
            profiles,
        }
    }
}

fn require_client(actor: &Actor) -> Result<(), Error> {
    if actor.is_client() {
        Ok(())
    } else {
        Err(Error::forbidden("only clients have favorites"))
    }
}

#[async_trait]
impl<F, P> FavoriteService for FavoriteServiceImpl<F, P>
where
    F: FavoriteRepository,
    P: ProfileRepository,
{
    async fn add(&self, actor: &Actor, profile_id: &Uuid) -> Result<Favorite, Error> {
        require_client(actor)?;
        self.profiles
            .find_by_id(profile_id)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(|| Error::not_found("Profile not found"))?;
        self.favorites
            .insert(&actor.id, profile_id)
            .await
            .map_err(map_favorite_error)
    }

    async fn remove(&self, actor: &Actor, profile_id: &Uuid) -> Result<(), Error> {
        require_client(actor)?;
        let removed = self
            .favorites
            .delete(&actor.id, profile_id)
            .await
            .map_err(map_favorite_error)?;
        if removed {
            Ok(())
        } else {
            Err(Error::not_found("Favorite not found"))
        }
    }

    async fn list(&self, actor: &Actor) -> Result<Vec<FavoriteEntry>, Error> {
        require_client(actor)?;
        self.favorites
            .list_for_user(&actor.id)
            .await
            .map_err(map_favorite_error)
    }
}
