//! Port for content items and their counters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Content, ContentCounters, CounterChange, NewContent};

use super::define_port_error;

define_port_error! {
    /// Errors raised by content repository adapters.
    pub enum ContentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "content repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "content repository query failed: {message}",
    }
}

/// Port for content persistence.
///
/// Counter changes must be applied atomically by the adapter so concurrent
/// views and likes are not lost. Likes never drop below zero.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn insert(&self, content: &NewContent) -> Result<Content, ContentRepositoryError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Content>, ContentRepositoryError>;

    /// Content of one profile, newest first. Premium items are skipped unless
    /// `include_premium` is set.
    async fn list_by_profile(
        &self,
        profile_id: &Uuid,
        include_premium: bool,
    ) -> Result<Vec<Content>, ContentRepositoryError>;

    /// Delete an item. Returns `false` when nothing was removed.
    async fn delete(&self, id: &Uuid) -> Result<bool, ContentRepositoryError>;

    /// Apply a counter change and return the updated counters, or `None` when
    /// the item does not exist.
    async fn apply_counter(
        &self,
        id: &Uuid,
        change: CounterChange,
    ) -> Result<Option<ContentCounters>, ContentRepositoryError>;
}
