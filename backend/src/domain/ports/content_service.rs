//! Driving port for content publishing and engagement.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Actor, Content, ContentCounters, ContentDraft, CounterChange, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Publish an item on the performer's own profile.
    async fn create(&self, actor: &Actor, draft: ContentDraft) -> Result<Content, Error>;

    /// Performers list their own content; clients list the public content
    /// of `profile_id`.
    async fn list(&self, actor: &Actor, profile_id: Option<Uuid>) -> Result<Vec<Content>, Error>;

    /// Remove one of the performer's own items.
    async fn delete(&self, actor: &Actor, id: &Uuid) -> Result<(), Error>;

    /// Record a view, like, or unlike from a client.
    async fn engage(
        &self,
        actor: &Actor,
        id: &Uuid,
        change: CounterChange,
    ) -> Result<ContentCounters, Error>;
}
