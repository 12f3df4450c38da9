//! Tests for the booking service.

use std::sync::Arc;

use chrono::Utc;
use rstest::rstest;

use super::*;
use crate::domain::ports::{BookingRepositoryError, MockBookingRepository, MockUserRepository};
use crate::domain::service_test_helpers::{actor, booking, details, user};
use crate::domain::{ErrorCode, UserId};

fn service(
    bookings: MockBookingRepository,
    users: MockUserRepository,
) -> BookingServiceImpl<MockBookingRepository, MockUserRepository> {
    BookingServiceImpl::new(Arc::new(bookings), Arc::new(users))
}

fn draft(performer_id: UserId) -> BookingDraft {
    BookingDraft {
        performer_id,
        kind: "Portrait".to_owned(),
        date: Utc::now(),
        duration: 60,
        rate: 15_000,
        notes: None,
        location: None,
    }
}

fn stored(new_booking: &NewBooking) -> Booking {
    let now = Utc::now();
    Booking {
        id: new_booking.id,
        performer_id: new_booking.performer_id,
        client_id: new_booking.client_id,
        kind: new_booking.kind.clone(),
        date: new_booking.date,
        duration: new_booking.duration,
        rate: new_booking.rate,
        notes: new_booking.notes.clone(),
        location: new_booking.location.clone(),
        status: new_booking.status,
        created_at: now,
        updated_at: now,
    }
}

#[rstest]
#[tokio::test]
async fn clients_create_pending_bookings() {
    let performer = user(Role::Performer);
    let client = user(Role::Client);
    let performer_id = performer.id;
    let (performer_card, client_card) = (performer.clone(), client.clone());

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(performer)));
    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_insert()
        .times(1)
        .withf(|new_booking| new_booking.status == BookingStatus::Pending)
        .returning(|new_booking| Ok(stored(new_booking)));
    bookings.expect_find_details().return_once(move |id| {
        let mut row = booking(performer_card.id, client_card.id, BookingStatus::Pending);
        row.id = *id;
        Ok(Some(details(row, &performer_card, &client_card)))
    });

    let created = service(bookings, users)
        .create(&actor(&client), draft(performer_id))
        .await
        .expect("booking created");

    assert_eq!(created.booking.status, BookingStatus::Pending);
    assert_eq!(created.performer.id, performer_id);
}

#[rstest]
#[tokio::test]
async fn performers_cannot_book() {
    let performer = actor(&user(Role::Performer));
    let err = service(MockBookingRepository::new(), MockUserRepository::new())
        .create(&performer, draft(UserId::random()))
        .await
        .expect_err("performer booking");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[case(None)]
#[case(Some(Role::Client))]
#[tokio::test]
async fn unknown_or_non_performer_targets_are_not_found(#[case] target_role: Option<Role>) {
    let client = actor(&user(Role::Client));
    let target = target_role.map(user);
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(move |_| Ok(target));
    let mut bookings = MockBookingRepository::new();
    bookings.expect_insert().times(0);

    let err = service(bookings, users)
        .create(&client, draft(UserId::random()))
        .await
        .expect_err("missing performer");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn short_sessions_are_rejected_before_lookup() {
    let client = actor(&user(Role::Client));
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().times(0);
    let mut raw = draft(UserId::random());
    raw.duration = 10;

    let err = service(MockBookingRepository::new(), users)
        .create(&client, raw)
        .await
        .expect_err("too short");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn listing_uses_the_callers_role() {
    let performer = actor(&user(Role::Performer));
    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_list_for_participant()
        .withf(move |user, role, limit| {
            *user == performer.id && *role == Role::Performer && limit.is_none()
        })
        .return_once(|_, _, _| Ok(Vec::new()));

    let listed = service(bookings, MockUserRepository::new())
        .list(&performer)
        .await
        .expect("listing succeeds");

    assert!(listed.is_empty());
}

#[rstest]
#[case(Role::Performer, BookingStatus::Confirmed, true)]
#[case(Role::Performer, BookingStatus::Completed, true)]
#[case(Role::Client, BookingStatus::Confirmed, false)]
#[case(Role::Client, BookingStatus::Completed, false)]
#[case(Role::Client, BookingStatus::Cancelled, true)]
#[case(Role::Performer, BookingStatus::Cancelled, true)]
#[tokio::test]
async fn status_changes_follow_role_rules(
    #[case] caller: Role,
    #[case] next: BookingStatus,
    #[case] allowed: bool,
) {
    let performer = user(Role::Performer);
    let client = user(Role::Client);
    let row = booking(performer.id, client.id, BookingStatus::Pending);
    let id = row.id;
    let acting = if caller == Role::Performer {
        actor(&performer)
    } else {
        actor(&client)
    };

    let mut bookings = MockBookingRepository::new();
    let found = row.clone();
    bookings
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(found)));
    bookings
        .expect_update_status()
        .times(usize::from(allowed))
        .return_once(move |_, status| Ok(Some(Booking { status, ..row })));

    let result = service(bookings, MockUserRepository::new())
        .update_status(&acting, &id, next)
        .await;

    match (allowed, result) {
        (true, Ok(updated)) => assert_eq!(updated.status, next),
        (false, Err(err)) => assert_eq!(err.code(), ErrorCode::Forbidden),
        (true, Err(err)) => panic!("expected success, got {err:?}"),
        (false, Ok(updated)) => panic!("expected rejection, got {updated:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn outsiders_cannot_change_status() {
    let row = booking(UserId::random(), UserId::random(), BookingStatus::Confirmed);
    let id = row.id;
    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(row)));
    bookings.expect_update_status().times(0);

    let err = service(bookings, MockUserRepository::new())
        .update_status(&actor(&user(Role::Client)), &id, BookingStatus::Cancelled)
        .await
        .expect_err("outsider");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn missing_booking_is_not_found() {
    let mut bookings = MockBookingRepository::new();
    bookings.expect_find_by_id().return_once(|_| Ok(None));

    let err = service(bookings, MockUserRepository::new())
        .update_status(
            &actor(&user(Role::Performer)),
            &Uuid::new_v4(),
            BookingStatus::Confirmed,
        )
        .await
        .expect_err("missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn repository_outage_is_service_unavailable() {
    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_list_for_participant()
        .return_once(|_, _, _| Err(BookingRepositoryError::connection("timeout")));

    let err = service(bookings, MockUserRepository::new())
        .list(&actor(&user(Role::Client)))
        .await
        .expect_err("outage");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
