//! Tests for the content service.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::{MockContentRepository, MockProfileRepository};
use crate::domain::service_test_helpers::{actor, content, profile, user};
use crate::domain::{ErrorCode, Role, UserId};

fn service(
    content: MockContentRepository,
    profiles: MockProfileRepository,
) -> ContentServiceImpl<MockContentRepository, MockProfileRepository> {
    ContentServiceImpl::new(Arc::new(content), Arc::new(profiles))
}

fn draft(profile_id: Uuid) -> ContentDraft {
    ContentDraft {
        profile_id,
        kind: Some("photo".to_owned()),
        url: "https://cdn.example.com/p/2.jpg".to_owned(),
        thumbnail: Some(String::new()),
        ..ContentDraft::default()
    }
}

#[rstest]
#[tokio::test]
async fn create_requires_profile_ownership() {
    let performer = actor(&user(Role::Performer));
    let foreign = profile(UserId::random());
    let profile_id = foreign.id;
    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(foreign)));
    let mut repo = MockContentRepository::new();
    repo.expect_insert().times(0);

    let err = service(repo, profiles)
        .create(&performer, draft(profile_id))
        .await
        .expect_err("foreign profile");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn create_stores_validated_content() {
    let owner = user(Role::Performer);
    let performer = actor(&owner);
    let own = profile(owner.id);
    let profile_id = own.id;
    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(own)));
    let stored_profile = profile(owner.id);
    let mut repo = MockContentRepository::new();
    repo.expect_insert()
        .times(1)
        .withf(|new_content| new_content.thumbnail.is_none())
        .return_once(move |_| Ok(content(&stored_profile, false)));

    let created = service(repo, profiles)
        .create(&performer, draft(profile_id))
        .await
        .expect("content created");

    assert!(!created.is_premium);
}

#[rstest]
#[tokio::test]
async fn create_rejects_non_photo_types() {
    let owner = user(Role::Performer);
    let performer = actor(&owner);
    let own = profile(owner.id);
    let profile_id = own.id;
    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(own)));

    let mut raw = draft(profile_id);
    raw.kind = Some("video".to_owned());
    let err = service(MockContentRepository::new(), profiles)
        .create(&performer, raw)
        .await
        .expect_err("video");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn clients_must_name_a_profile_when_listing() {
    let client = actor(&user(Role::Client));
    let err = service(MockContentRepository::new(), MockProfileRepository::new())
        .list(&client, None)
        .await
        .expect_err("missing profile id");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn clients_only_see_public_content() {
    let client = actor(&user(Role::Client));
    let mut repo = MockContentRepository::new();
    repo.expect_list_by_profile()
        .withf(|_, include_premium| !*include_premium)
        .return_once(|_, _| Ok(Vec::new()));

    let listed = service(repo, MockProfileRepository::new())
        .list(&client, Some(Uuid::new_v4()))
        .await
        .expect("listing succeeds");

    assert!(listed.is_empty());
}

#[rstest]
#[tokio::test]
async fn performers_list_their_own_profile_including_premium() {
    let owner = user(Role::Performer);
    let performer = actor(&owner);
    let own = profile(owner.id);
    let own_id = own.id;
    let premium = content(&own, true);
    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_by_user()
        .return_once(move |_| Ok(Some(own)));
    let mut repo = MockContentRepository::new();
    repo.expect_list_by_profile()
        .withf(move |profile_id, include_premium| *profile_id == own_id && *include_premium)
        .return_once(move |_, _| Ok(vec![premium]));

    let listed = service(repo, profiles)
        .list(&performer, Some(Uuid::new_v4()))
        .await
        .expect("listing succeeds");

    assert_eq!(listed.len(), 1);
    assert!(listed[0].is_premium);
}

#[rstest]
#[tokio::test]
async fn performer_without_profile_gets_not_found() {
    let performer = actor(&user(Role::Performer));
    let mut profiles = MockProfileRepository::new();
    profiles.expect_find_by_user().return_once(|_| Ok(None));

    let err = service(MockContentRepository::new(), profiles)
        .list(&performer, None)
        .await
        .expect_err("no profile");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn delete_rejects_other_performers() {
    let performer = actor(&user(Role::Performer));
    let item = content(&profile(UserId::random()), false);
    let id = item.id;
    let mut repo = MockContentRepository::new();
    repo.expect_find_by_id().return_once(move |_| Ok(Some(item)));
    repo.expect_delete().times(0);

    let err = service(repo, MockProfileRepository::new())
        .delete(&performer, &id)
        .await
        .expect_err("not owner");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn delete_removes_owned_content() {
    let owner = user(Role::Performer);
    let item = content(&profile(owner.id), false);
    let id = item.id;
    let mut repo = MockContentRepository::new();
    repo.expect_find_by_id().return_once(move |_| Ok(Some(item)));
    repo.expect_delete().times(1).return_once(|_| Ok(true));

    service(repo, MockProfileRepository::new())
        .delete(&actor(&owner), &id)
        .await
        .expect("deleted");
}

#[rstest]
#[case(CounterChange::View)]
#[case(CounterChange::Like)]
#[case(CounterChange::Unlike)]
#[tokio::test]
async fn performers_cannot_engage(#[case] change: CounterChange) {
    let performer = actor(&user(Role::Performer));
    let mut repo = MockContentRepository::new();
    repo.expect_apply_counter().times(0);

    let err = service(repo, MockProfileRepository::new())
        .engage(&performer, &Uuid::new_v4(), change)
        .await
        .expect_err("performer engagement");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn engaging_missing_content_is_not_found() {
    let client = actor(&user(Role::Client));
    let mut repo = MockContentRepository::new();
    repo.expect_apply_counter().return_once(|_, _| Ok(None));

    let err = service(repo, MockProfileRepository::new())
        .engage(&client, &Uuid::new_v4(), CounterChange::View)
        .await
        .expect_err("missing content");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn unlike_returns_clamped_counters() {
    let client = actor(&user(Role::Client));
    let id = Uuid::new_v4();
    let mut repo = MockContentRepository::new();
    repo.expect_apply_counter()
        .withf(|_, change| *change == CounterChange::Unlike)
        .return_once(move |id, _| {
            Ok(Some(ContentCounters {
                id: *id,
                views: 2,
                likes: 0,
            }))
        });

    let counters = service(repo, MockProfileRepository::new())
        .engage(&client, &id, CounterChange::Unlike)
        .await
        .expect("unlike succeeds");

    assert_eq!(counters.likes, 0);
    assert_eq!(counters.id, id);
}
