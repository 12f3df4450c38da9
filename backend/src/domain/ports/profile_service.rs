//! Driving port for performer profiles.

use async_trait::async_trait;

use crate::domain::{
    Actor, Error, PerformerPage, Profile, ProfileDraft, ProfileSummary, UserCard, UserId,
};

/// A performer's own profile together with their card.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnProfile {
    pub profile: Profile,
    pub user: UserCard,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Profile of the signed-in performer.
    async fn own_profile(&self, actor: &Actor) -> Result<OwnProfile, Error>;

    /// Create or update the signed-in performer's profile.
    async fn upsert_profile(&self, actor: &Actor, draft: ProfileDraft) -> Result<Profile, Error>;

    /// Directory of performers.
    async fn list_performers(&self) -> Result<Vec<ProfileSummary>, Error>;

    /// Public page for the performer with user id `performer`.
    async fn performer_page(
        &self,
        viewer: &Actor,
        performer: &UserId,
    ) -> Result<PerformerPage, Error>;
}
