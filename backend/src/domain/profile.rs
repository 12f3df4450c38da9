//! Performer profiles.
//!
//! A performer owns at most one profile. Free-form structured fields
//! (`services`, `rates`, `availability`) are kept as JSON documents; the
//! marketplace only stores and returns them.

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use super::{Content, UserCard, UserId};

/// Minimum age accepted on a performer profile.
pub const PROFILE_AGE_MIN: i32 = 18;
/// Maximum age accepted on a performer profile.
pub const PROFILE_AGE_MAX: i32 = 120;
const TEXT_FIELD_MAX: usize = 2_000;

/// Validation failures for profile updates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileValidationError {
    #[error("age must be between {min} and {max}")]
    AgeOutOfRange { min: i32, max: i32 },
    #[error("age must be a whole number")]
    AgeNotNumeric,
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

/// Stored performer profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: UserId,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub age: Option<i32>,
    pub height: Option<String>,
    pub measurements: Option<String>,
    pub services: Option<Value>,
    pub rates: Option<Value>,
    pub availability: Option<Value>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated replacement for the editable profile fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub bio: Option<String>,
    pub location: Option<String>,
    pub age: Option<i32>,
    pub height: Option<String>,
    pub measurements: Option<String>,
    pub services: Option<Value>,
    pub rates: Option<Value>,
    pub availability: Option<Value>,
}

/// Raw profile fields as submitted by a client.
///
/// `age` accepts a JSON number or a numeric string; blank strings mean "not
/// set".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDraft {
    pub bio: Option<String>,
    pub location: Option<String>,
    pub age: Option<Value>,
    pub height: Option<String>,
    pub measurements: Option<String>,
    pub services: Option<Value>,
    pub rates: Option<Value>,
    pub availability: Option<Value>,
}

fn normalise_text(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<String>, ProfileValidationError> {
    let Some(raw) = value else { return Ok(None) };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > TEXT_FIELD_MAX {
        return Err(ProfileValidationError::TooLong {
            field,
            max: TEXT_FIELD_MAX,
        });
    }
    Ok(Some(trimmed.to_owned()))
}

fn normalise_document(value: Option<Value>) -> Option<Value> {
    value.filter(|doc| !doc.is_null())
}

fn parse_age(value: Option<Value>) -> Result<Option<i32>, ProfileValidationError> {
    let raw = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(text)) if text.trim().is_empty() => return Ok(None),
        Some(Value::String(text)) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| ProfileValidationError::AgeNotNumeric)?,
        Some(Value::Number(number)) => number
            .as_i64()
            .ok_or(ProfileValidationError::AgeNotNumeric)?,
        Some(_) => return Err(ProfileValidationError::AgeNotNumeric),
    };
    let out_of_range = ProfileValidationError::AgeOutOfRange {
        min: PROFILE_AGE_MIN,
        max: PROFILE_AGE_MAX,
    };
    let age = i32::try_from(raw).map_err(|_| out_of_range.clone())?;
    if !(PROFILE_AGE_MIN..=PROFILE_AGE_MAX).contains(&age) {
        return Err(out_of_range);
    }
    Ok(Some(age))
}

impl TryFrom<ProfileDraft> for ProfileUpdate {
    type Error = ProfileValidationError;

    fn try_from(draft: ProfileDraft) -> Result<Self, Self::Error> {
        Ok(Self {
            bio: normalise_text(draft.bio, "bio")?,
            location: normalise_text(draft.location, "location")?,
            age: parse_age(draft.age)?,
            height: normalise_text(draft.height, "height")?,
            measurements: normalise_text(draft.measurements, "measurements")?,
            services: normalise_document(draft.services),
            rates: normalise_document(draft.rates),
            availability: normalise_document(draft.availability),
        })
    }
}

/// Newest public photo shown on profile cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPreview {
    pub id: Uuid,
    pub url: String,
    pub thumbnail: Option<String>,
}

/// Listing entry for the performer directory.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSummary {
    pub profile: Profile,
    pub user: UserCard,
    pub favorites_count: i64,
    pub preview: Option<ContentPreview>,
}

/// Public performer page.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformerPage {
    pub profile: Profile,
    pub user: UserCard,
    pub content: Vec<Content>,
    pub favorites_count: i64,
    /// `Some` only when the viewer is a client.
    pub is_favorited: Option<bool>,
}
