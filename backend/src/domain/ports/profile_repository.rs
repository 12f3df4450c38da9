//! Port for performer profile persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Profile, ProfileSummary, ProfileUpdate, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "profile repository query failed: {message}",
    }
}

/// Port for reading and writing performer profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Create an empty profile for a newly registered performer.
    async fn create_empty(&self, user_id: &UserId) -> Result<Profile, ProfileRepositoryError>;

    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Insert or replace the editable fields of the user's profile.
    async fn upsert(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<Profile, ProfileRepositoryError>;

    /// List performer profiles, featured first and then newest, with their
    /// favorites count and newest public photo.
    async fn list_summaries(&self) -> Result<Vec<ProfileSummary>, ProfileRepositoryError>;
}
