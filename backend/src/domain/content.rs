//! Performer content items and their engagement counters.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{UserId, parse_media_url};

const TITLE_MAX: usize = 200;
const DESCRIPTION_MAX: usize = 2_000;

/// Validation failures for new content.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentValidationError {
    #[error("type must be photo")]
    UnsupportedKind,
    #[error("url must be an absolute http(s) URL")]
    InvalidUrl,
    #[error("thumbnail must be an absolute http(s) URL")]
    InvalidThumbnail,
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("price must not be negative")]
    NegativePrice,
}

/// Supported media kinds. Only photos are published today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentKind {
    #[default]
    Photo,
}

impl ContentKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Photo => "photo",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = ContentValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "photo" => Ok(Self::Photo),
            _ => Err(ContentValidationError::UnsupportedKind),
        }
    }
}

/// Published content item.
///
/// ## Invariants
/// - `views >= 0` and `likes >= 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub id: Uuid,
    pub user_id: UserId,
    pub profile_id: Uuid,
    pub kind: ContentKind,
    pub url: String,
    pub thumbnail: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_premium: bool,
    /// Price in minor units for premium items.
    pub price: Option<i64>,
    pub views: i64,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
}

impl Content {
    pub fn counters(&self) -> ContentCounters {
        ContentCounters {
            id: self.id,
            views: self.views,
            likes: self.likes,
        }
    }
}

/// Raw content fields as submitted by a performer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentDraft {
    pub profile_id: Uuid,
    pub kind: Option<String>,
    pub url: String,
    pub thumbnail: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_premium: bool,
    pub price: Option<i64>,
}

/// Validated content ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContent {
    pub id: Uuid,
    pub user_id: UserId,
    pub profile_id: Uuid,
    pub kind: ContentKind,
    pub url: String,
    pub thumbnail: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_premium: bool,
    pub price: Option<i64>,
}

fn optional_text(
    value: Option<String>,
    field: &'static str,
    max: usize,
) -> Result<Option<String>, ContentValidationError> {
    let Some(raw) = value else { return Ok(None) };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > max {
        return Err(ContentValidationError::TooLong { field, max });
    }
    Ok(Some(trimmed.to_owned()))
}

impl NewContent {
    /// Validate a draft on behalf of `owner`.
    ///
    /// An empty thumbnail is treated as absent.
    pub fn from_draft(owner: UserId, draft: ContentDraft) -> Result<Self, ContentValidationError> {
        let kind = match draft.kind.as_deref().map(str::trim) {
            None | Some("") => ContentKind::default(),
            Some(raw) => raw.parse()?,
        };
        let url = parse_media_url(&draft.url).ok_or(ContentValidationError::InvalidUrl)?;
        let thumbnail = match draft.thumbnail.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_media_url(raw).ok_or(ContentValidationError::InvalidThumbnail)?),
        };
        if draft.price.is_some_and(|price| price < 0) {
            return Err(ContentValidationError::NegativePrice);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            user_id: owner,
            profile_id: draft.profile_id,
            kind,
            url,
            thumbnail,
            title: optional_text(draft.title, "title", TITLE_MAX)?,
            description: optional_text(draft.description, "description", DESCRIPTION_MAX)?,
            is_premium: draft.is_premium,
            price: draft.price,
        })
    }
}

/// Snapshot of the engagement counters for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentCounters {
    pub id: Uuid,
    pub views: i64,
    pub likes: i64,
}

/// Counter mutation requested by a client.
///
/// Storage applies each change atomically; `Unlike` never takes `likes`
/// below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterChange {
    View,
    Like,
    Unlike,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> ContentDraft {
        ContentDraft {
            profile_id: Uuid::new_v4(),
            kind: None,
            url: "https://cdn.example.com/p/1.jpg".to_owned(),
            thumbnail: Some(String::new()),
            title: Some("  Sunset  ".to_owned()),
            description: None,
            is_premium: false,
            price: None,
        }
    }

    #[rstest]
    fn draft_defaults_kind_and_drops_empty_thumbnail(draft: ContentDraft) {
        let content = NewContent::from_draft(UserId::random(), draft).expect("valid draft");
        assert_eq!(content.kind, ContentKind::Photo);
        assert_eq!(content.thumbnail, None);
        assert_eq!(content.title.as_deref(), Some("Sunset"));
    }

    #[rstest]
    #[case(Some("video"), "https://cdn.example.com/a.jpg", ContentValidationError::UnsupportedKind)]
    #[case(Some("photo"), "cdn.example.com/a.jpg", ContentValidationError::InvalidUrl)]
    fn invalid_drafts(
        mut draft: ContentDraft,
        #[case] kind: Option<&str>,
        #[case] url: &str,
        #[case] expected: ContentValidationError,
    ) {
        draft.kind = kind.map(str::to_owned);
        draft.url = url.to_owned();
        let err = NewContent::from_draft(UserId::random(), draft).expect_err("invalid");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn negative_price_is_rejected(mut draft: ContentDraft) {
        draft.price = Some(-1);
        let err = NewContent::from_draft(UserId::random(), draft).expect_err("invalid");
        assert_eq!(err, ContentValidationError::NegativePrice);
    }
}
