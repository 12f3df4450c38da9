//! Shared builders for domain service tests.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::{
    Actor, Booking, BookingDetails, BookingStatus, Content, ContentKind, DisplayName, Email,
    Profile, Role, User, UserId,
};

pub(crate) fn user(role: Role) -> User {
    User {
        id: UserId::random(),
        name: DisplayName::new("Ada Lovelace").expect("valid name"),
        email: Email::new(format!("{}@example.com", Uuid::new_v4().simple())).expect("valid email"),
        role,
        image: None,
        created_at: Utc::now(),
    }
}

pub(crate) fn actor(user: &User) -> Actor {
    Actor::new(user.id, user.role)
}

pub(crate) fn profile(user_id: UserId) -> Profile {
    let now = Utc::now();
    Profile {
        id: Uuid::new_v4(),
        user_id,
        bio: Some("Stage and screen".to_owned()),
        location: Some("Berlin".to_owned()),
        age: Some(29),
        height: None,
        measurements: None,
        services: None,
        rates: None,
        availability: None,
        featured: false,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn content(profile: &Profile, is_premium: bool) -> Content {
    Content {
        id: Uuid::new_v4(),
        user_id: profile.user_id,
        profile_id: profile.id,
        kind: ContentKind::Photo,
        url: "https://cdn.example.com/p/1.jpg".to_owned(),
        thumbnail: None,
        title: None,
        description: None,
        is_premium,
        price: is_premium.then_some(500),
        views: 3,
        likes: 1,
        created_at: Utc::now(),
    }
}

pub(crate) fn booking(performer: UserId, client: UserId, status: BookingStatus) -> Booking {
    let now = Utc::now();
    Booking {
        id: Uuid::new_v4(),
        performer_id: performer,
        client_id: client,
        kind: "Portrait".to_owned(),
        date: now + Duration::days(3),
        duration: 90,
        rate: 10_000,
        notes: None,
        location: None,
        status,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn details(booking: Booking, performer: &User, client: &User) -> BookingDetails {
    BookingDetails {
        booking,
        performer: performer.card(),
        performer_location: Some("Berlin".to_owned()),
        client: client.card(),
        payment: None,
    }
}

pub(crate) fn fixed_now() -> DateTime<Utc> {
    use chrono::TimeZone;
    Utc.with_ymd_and_hms(2024, 5, 15, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}
