//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types return a
//! `String` error so each repository can wrap it in its own query error.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Booking, Content, ContentCounters, ContentPreview, DisplayName, Email, Favorite, Message,
    NewBooking, NewContent, NewMessage, NewPayment, Payment, Profile, ProfileUpdate, User,
    UserCard, UserId,
};

use super::schema::{bookings, content, favorites, messages, payments, profiles, users};

fn parse_column<T>(value: &str, column: &str) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|err| format!("invalid {column} value {value:?}: {err}"))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Public user columns; the password hash is selected separately.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub fn into_user(self) -> Result<User, String> {
        Ok(User {
            id: UserId::from_uuid(self.id),
            name: DisplayName::new(&self.name).map_err(|err| err.to_string())?,
            email: Email::new(&self.email).map_err(|err| err.to_string())?,
            role: parse_column(&self.role, "role")?,
            image: self.image,
            created_at: self.created_at,
        })
    }

    pub fn into_card(self) -> Result<UserCard, String> {
        self.into_user().map(|user| user.card())
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub age: Option<i32>,
    pub height: Option<String>,
    pub measurements: Option<String>,
    pub services: Option<serde_json::Value>,
    pub rates: Option<serde_json::Value>,
    pub availability: Option<serde_json::Value>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            bio: row.bio,
            location: row.location,
            age: row.age,
            height: row.height,
            measurements: row.measurements,
            services: row.services,
            rates: row.rates,
            availability: row.availability,
            featured: row.featured,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = profiles)]
pub(crate) struct NewProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
}

/// Full replacement of the editable profile columns.
///
/// `treat_none_as_null` makes an omitted field clear the stored value.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = profiles)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProfileChangeset<'a> {
    pub bio: Option<&'a str>,
    pub location: Option<&'a str>,
    pub age: Option<i32>,
    pub height: Option<&'a str>,
    pub measurements: Option<&'a str>,
    pub services: Option<&'a serde_json::Value>,
    pub rates: Option<&'a serde_json::Value>,
    pub availability: Option<&'a serde_json::Value>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> ProfileChangeset<'a> {
    pub fn new(update: &'a ProfileUpdate, now: DateTime<Utc>) -> Self {
        Self {
            bio: update.bio.as_deref(),
            location: update.location.as_deref(),
            age: update.age,
            height: update.height.as_deref(),
            measurements: update.measurements.as_deref(),
            services: update.services.as_ref(),
            rates: update.rates.as_ref(),
            availability: update.availability.as_ref(),
            updated_at: now,
        }
    }
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = content)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContentRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub profile_id: Uuid,
    pub kind: String,
    pub url: String,
    pub thumbnail: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_premium: bool,
    pub price: Option<i64>,
    pub views: i64,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
}

impl ContentRow {
    pub fn into_content(self) -> Result<Content, String> {
        Ok(Content {
            id: self.id,
            user_id: UserId::from_uuid(self.user_id),
            profile_id: self.profile_id,
            kind: parse_column(&self.kind, "kind")?,
            url: self.url,
            thumbnail: self.thumbnail,
            title: self.title,
            description: self.description,
            is_premium: self.is_premium,
            price: self.price,
            views: self.views,
            likes: self.likes,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = content)]
pub(crate) struct NewContentRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub profile_id: Uuid,
    pub kind: &'a str,
    pub url: &'a str,
    pub thumbnail: Option<&'a str>,
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub is_premium: bool,
    pub price: Option<i64>,
}

impl<'a> From<&'a NewContent> for NewContentRow<'a> {
    fn from(item: &'a NewContent) -> Self {
        Self {
            id: item.id,
            user_id: *item.user_id.as_uuid(),
            profile_id: item.profile_id,
            kind: item.kind.as_str(),
            url: &item.url,
            thumbnail: item.thumbnail.as_deref(),
            title: item.title.as_deref(),
            description: item.description.as_deref(),
            is_premium: item.is_premium,
            price: item.price,
        }
    }
}

#[derive(Debug, Clone, Copy, Queryable, Selectable)]
#[diesel(table_name = content)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CounterRow {
    pub id: Uuid,
    pub views: i64,
    pub likes: i64,
}

impl From<CounterRow> for ContentCounters {
    fn from(row: CounterRow) -> Self {
        Self {
            id: row.id,
            views: row.views,
            likes: row.likes,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = content)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PreviewRow {
    pub profile_id: Uuid,
    pub id: Uuid,
    pub url: String,
    pub thumbnail: Option<String>,
}

impl From<PreviewRow> for ContentPreview {
    fn from(row: PreviewRow) -> Self {
        Self {
            id: row.id,
            url: row.url,
            thumbnail: row.thumbnail,
        }
    }
}

// ---------------------------------------------------------------------------
// Bookings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookingRow {
    pub id: Uuid,
    pub performer_id: Uuid,
    pub client_id: Uuid,
    pub kind: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration: i32,
    pub rate: i64,
    pub notes: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookingRow {
    pub fn into_booking(self) -> Result<Booking, String> {
        Ok(Booking {
            id: self.id,
            performer_id: UserId::from_uuid(self.performer_id),
            client_id: UserId::from_uuid(self.client_id),
            kind: self.kind,
            date: self.scheduled_at,
            duration: self.duration,
            rate: self.rate,
            notes: self.notes,
            location: self.location,
            status: parse_column(&self.status, "status")?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub(crate) struct NewBookingRow<'a> {
    pub id: Uuid,
    pub performer_id: Uuid,
    pub client_id: Uuid,
    pub kind: &'a str,
    pub scheduled_at: DateTime<Utc>,
    pub duration: i32,
    pub rate: i64,
    pub notes: Option<&'a str>,
    pub location: Option<&'a str>,
    pub status: &'a str,
}

impl<'a> From<&'a NewBooking> for NewBookingRow<'a> {
    fn from(booking: &'a NewBooking) -> Self {
        Self {
            id: booking.id,
            performer_id: *booking.performer_id.as_uuid(),
            client_id: *booking.client_id.as_uuid(),
            kind: &booking.kind,
            scheduled_at: booking.date,
            duration: booking.duration,
            rate: booking.rate,
            notes: booking.notes.as_deref(),
            location: booking.location.as_deref(),
            status: booking.status.as_str(),
        }
    }
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = payments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PaymentRow {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub payer_id: Uuid,
    pub amount: i64,
    pub currency: String,
    pub processor_id: String,
    pub status: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PaymentRow {
    pub fn into_payment(self) -> Result<Payment, String> {
        Ok(Payment {
            id: self.id,
            booking_id: self.booking_id,
            payer_id: UserId::from_uuid(self.payer_id),
            amount: self.amount,
            currency: self.currency,
            processor_id: self.processor_id,
            status: parse_column(&self.status, "status")?,
            description: self.description,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = payments)]
pub(crate) struct NewPaymentRow<'a> {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub payer_id: Uuid,
    pub amount: i64,
    pub currency: &'a str,
    pub processor_id: &'a str,
    pub status: &'a str,
    pub description: &'a str,
}

impl<'a> From<&'a NewPayment> for NewPaymentRow<'a> {
    fn from(payment: &'a NewPayment) -> Self {
        Self {
            id: payment.id,
            booking_id: payment.booking_id,
            payer_id: *payment.payer_id.as_uuid(),
            amount: payment.amount,
            currency: &payment.currency,
            processor_id: &payment.processor_id,
            status: payment.status.as_str(),
            description: &payment.description,
        }
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MessageRow {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Self {
            id: row.id,
            sender_id: UserId::from_uuid(row.sender_id),
            receiver_id: UserId::from_uuid(row.receiver_id),
            content: row.content,
            read: row.read,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = messages)]
pub(crate) struct NewMessageRow<'a> {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: &'a str,
}

impl<'a> From<&'a NewMessage> for NewMessageRow<'a> {
    fn from(message: &'a NewMessage) -> Self {
        Self {
            id: message.id,
            sender_id: *message.sender_id.as_uuid(),
            receiver_id: *message.receiver_id.as_uuid(),
            content: message.content.as_ref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Favorites
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = favorites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FavoriteRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub profile_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<FavoriteRow> for Favorite {
    fn from(row: FavoriteRow) -> Self {
        Self {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            profile_id: row.profile_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = favorites)]
pub(crate) struct NewFavoriteRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub profile_id: Uuid,
}
