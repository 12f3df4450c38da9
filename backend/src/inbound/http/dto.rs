//! Response shapes shared by several handler modules.
//!
//! Domain entities stay free of serde and utoipa derives; these structs own
//! the wire format. Money leaves the API as decimal major units and timestamps
//! as RFC 3339 strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::money::minor_to_major;
use crate::domain::{
    BookingDetails, Content, ContentCounters, ContentPreview, Message, Payment, Profile,
    ProfileSummary, User, UserCard,
};

/// Full account view returned to the account owner.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "PERFORMER")]
    pub role: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_ref().to_owned(),
            email: user.email.as_ref().to_owned(),
            role: user.role.as_str().to_owned(),
            image: user.image,
            created_at: user.created_at,
        }
    }
}

/// Public identity of another user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserCardResponse {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub role: String,
}

impl From<UserCard> for UserCardResponse {
    fn from(card: UserCard) -> Self {
        Self {
            id: card.id.to_string(),
            name: card.name.as_ref().to_owned(),
            image: card.image,
            role: card.role.as_str().to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub user_id: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub age: Option<i32>,
    pub height: Option<String>,
    pub measurements: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub services: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub rates: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub availability: Option<Value>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id.to_string(),
            user_id: profile.user_id.to_string(),
            bio: profile.bio,
            location: profile.location,
            age: profile.age,
            height: profile.height,
            measurements: profile.measurements,
            services: profile.services,
            rates: profile.rates,
            availability: profile.availability,
            featured: profile.featured,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub id: String,
    pub url: String,
    pub thumbnail: Option<String>,
}

impl From<ContentPreview> for PreviewResponse {
    fn from(preview: ContentPreview) -> Self {
        Self {
            id: preview.id.to_string(),
            url: preview.url,
            thumbnail: preview.thumbnail,
        }
    }
}

/// Profile card used by the performer directory and favorites.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummaryResponse {
    #[serde(flatten)]
    pub profile: ProfileResponse,
    pub user: UserCardResponse,
    pub favorites_count: i64,
    pub preview: Option<PreviewResponse>,
}

impl From<ProfileSummary> for ProfileSummaryResponse {
    fn from(summary: ProfileSummary) -> Self {
        Self {
            profile: summary.profile.into(),
            user: summary.user.into(),
            favorites_count: summary.favorites_count,
            preview: summary.preview.map(PreviewResponse::from),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentResponse {
    pub id: String,
    pub user_id: String,
    pub profile_id: String,
    #[serde(rename = "type")]
    #[schema(example = "photo")]
    pub kind: String,
    pub url: String,
    pub thumbnail: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_premium: bool,
    /// Price in major currency units.
    pub price: Option<f64>,
    pub views: i64,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Content> for ContentResponse {
    fn from(content: Content) -> Self {
        Self {
            id: content.id.to_string(),
            user_id: content.user_id.to_string(),
            profile_id: content.profile_id.to_string(),
            kind: content.kind.as_str().to_owned(),
            url: content.url,
            thumbnail: content.thumbnail,
            title: content.title,
            description: content.description,
            is_premium: content.is_premium,
            price: content.price.map(minor_to_major),
            views: content.views,
            likes: content.likes,
            created_at: content.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountersResponse {
    #[schema(value_type = String)]
    pub id: uuid::Uuid,
    pub views: i64,
    pub likes: i64,
}

impl From<ContentCounters> for CountersResponse {
    fn from(counters: ContentCounters) -> Self {
        Self {
            id: counters.id,
            views: counters.views,
            likes: counters.likes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: String,
    pub booking_id: String,
    pub payer_id: String,
    /// Amount in major currency units.
    pub amount: f64,
    pub currency: String,
    pub processor_id: String,
    #[schema(example = "completed")]
    pub status: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id.to_string(),
            booking_id: payment.booking_id.to_string(),
            payer_id: payment.payer_id.to_string(),
            amount: minor_to_major(payment.amount),
            currency: payment.currency,
            processor_id: payment.processor_id,
            status: payment.status.as_str().to_owned(),
            description: payment.description,
            created_at: payment.created_at,
        }
    }
}

/// Performer card on a booking, carrying the performer's profile location.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingPerformerResponse {
    #[serde(flatten)]
    pub card: UserCardResponse,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: String,
    pub performer_id: String,
    pub client_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: DateTime<Utc>,
    /// Minutes.
    pub duration: i32,
    /// Hourly rate in major currency units.
    pub rate: f64,
    /// `duration / 60 * rate` in major currency units.
    pub total_amount: f64,
    pub notes: Option<String>,
    pub location: Option<String>,
    #[schema(example = "pending")]
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub performer: BookingPerformerResponse,
    pub client: UserCardResponse,
    pub payment: Option<PaymentResponse>,
}

impl From<BookingDetails> for BookingResponse {
    fn from(details: BookingDetails) -> Self {
        let BookingDetails {
            booking,
            performer,
            performer_location,
            client,
            payment,
        } = details;
        let total_amount = minor_to_major(booking.total_amount());
        Self {
            id: booking.id.to_string(),
            performer_id: booking.performer_id.to_string(),
            client_id: booking.client_id.to_string(),
            kind: booking.kind,
            date: booking.date,
            duration: booking.duration,
            rate: minor_to_major(booking.rate),
            total_amount,
            notes: booking.notes,
            location: booking.location,
            status: booking.status.as_str().to_owned(),
            created_at: booking.created_at,
            updated_at: booking.updated_at,
            performer: BookingPerformerResponse {
                card: performer.into(),
                location: performer_location,
            },
            client: client.into(),
            payment: payment.map(PaymentResponse::from),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id.to_string(),
            sender_id: message.sender_id.to_string(),
            receiver_id: message.receiver_id.to_string(),
            content: message.content,
            read: message.read,
            created_at: message.created_at,
        }
    }
}
