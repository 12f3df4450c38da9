//! Client favorites of performer profiles.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{ProfileSummary, UserId};

/// A client's saved performer profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub id: Uuid,
    pub user_id: UserId,
    pub profile_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Favorite joined with the profile it points at.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteEntry {
    pub favorite: Favorite,
    pub profile: ProfileSummary,
}
