//! Performer profile service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    ContentRepository, FavoriteRepository, OwnProfile, ProfileRepository, ProfileService,
    UserRepository,
};
use crate::domain::service_errors::{
    map_content_error, map_favorite_error, map_profile_error, map_user_error,
};
use crate::domain::{
    Actor, Error, PerformerPage, Profile, ProfileDraft, ProfileSummary, ProfileUpdate, Role,
    UserId,
};

/// Profile service over the profile, user, content and favorite
/// repositories.
#[derive(Clone)]
pub struct ProfileServiceImpl<P, U, C, F> {
    profiles: Arc<P>,
    users: Arc<U>,
    content: Arc<C>,
    favorites: Arc<F>,
}

impl<P, U, C, F> ProfileServiceImpl<P, U, C, F> {
    pub fn new(profiles: Arc<P>, users: Arc<U>, content: Arc<C>, favorites: Arc<F>) -> Self {
        Self {
            profiles,
            users,
            content,
            favorites,
        }
    }
}

fn require_performer(actor: &Actor) -> Result<(), Error> {
    if actor.is_performer() {
        Ok(())
    } else {
        Err(Error::forbidden("only performers have profiles"))
    }
}

#[async_trait]
impl<P, U, C, F> ProfileService for ProfileServiceImpl<P, U, C, F>
where
    P: ProfileRepository,
    U: UserRepository,
    C: ContentRepository,
    F: FavoriteRepository,
{
    async fn own_profile(&self, actor: &Actor) -> Result<OwnProfile, Error> {
        require_performer(actor)?;
        let profile = self
            .profiles
            .find_by_user(&actor.id)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(|| Error::not_found("Profile not found"))?;
        let user = self
            .users
            .find_by_id(&actor.id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(format!("user {} not found", actor.id)))?;
        Ok(OwnProfile {
            profile,
            user: user.card(),
        })
    }

    async fn upsert_profile(&self, actor: &Actor, draft: ProfileDraft) -> Result<Profile, Error> {
        require_performer(actor)?;
        let update = ProfileUpdate::try_from(draft)
            .map_err(|err| Error::invalid_request(format!("invalid profile: {err}")))?;
        self.profiles
            .upsert(&actor.id, &update)
            .await
            .map_err(map_profile_error)
    }

    async fn list_performers(&self) -> Result<Vec<ProfileSummary>, Error> {
        self.profiles
            .list_summaries()
            .await
            .map_err(map_profile_error)
    }

    async fn performer_page(
        &self,
        viewer: &Actor,
        performer: &UserId,
    ) -> Result<PerformerPage, Error> {
        let not_found = || Error::not_found("Performer not found");
        let user = self
            .users
            .find_by_id(performer)
            .await
            .map_err(map_user_error)?
            .filter(|user| user.role == Role::Performer)
            .ok_or_else(not_found)?;
        let profile = self
            .profiles
            .find_by_user(performer)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(not_found)?;

        let is_owner = viewer.id == *performer;
        let content = self
            .content
            .list_by_profile(&profile.id, is_owner)
            .await
            .map_err(map_content_error)?;
        let favorites_count = self
            .favorites
            .count_for_profile(&profile.id)
            .await
            .map_err(map_favorite_error)?;
        let is_favorited = if viewer.is_client() {
            Some(
                self.favorites
                    .exists(&viewer.id, &profile.id)
                    .await
                    .map_err(map_favorite_error)?,
            )
        } else {
            None
        };

        Ok(PerformerPage {
            profile,
            user: user.card(),
            content,
            favorites_count,
            is_favorited,
        })
    }
}

#[cfg(test)]
#[path = "profile_service_tests.rs"]
mod tests;
