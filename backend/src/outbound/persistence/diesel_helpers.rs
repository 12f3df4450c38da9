//! Shared read helpers for repositories that assemble composite views.
//!
//! Listing screens need users, profiles, favorite counts and previews for a
//! batch of ids. Each helper issues one `IN (...)` query per batch and returns
//! a lookup map so repositories can stitch rows together in Rust.

use std::collections::HashMap;

use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::{ContentPreview, Profile, ProfileSummary, UserCard};

use super::models::{PreviewRow, ProfileRow, UserRow};
use super::schema::{content, favorites, users};

/// Failure while loading a composite view.
#[derive(Debug)]
pub(crate) enum LoadError {
    Diesel(diesel::result::Error),
    /// A stored row failed domain validation.
    Corrupt(String),
}

impl From<diesel::result::Error> for LoadError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

impl LoadError {
    /// Map into a repository error using its Diesel and query mappers.
    pub fn into_repository_error<E>(
        self,
        diesel: impl FnOnce(diesel::result::Error) -> E,
        corrupt: impl FnOnce(String) -> E,
    ) -> E {
        match self {
            Self::Diesel(error) => diesel(error),
            Self::Corrupt(message) => corrupt(message),
        }
    }
}

/// Collect row conversion results, mapping the first error through `map_err`.
pub fn collect_rows<T, E>(
    results: impl Iterator<Item = Result<T, String>>,
    map_err: impl FnOnce(String) -> E,
) -> Result<Vec<T>, E> {
    results.collect::<Result<Vec<_>, _>>().map_err(map_err)
}

pub(crate) async fn load_user_rows(
    conn: &mut AsyncPgConnection,
    ids: &[Uuid],
) -> Result<HashMap<Uuid, UserRow>, LoadError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows: Vec<UserRow> = users::table
        .filter(users::id.eq_any(ids))
        .select(UserRow::as_select())
        .load(conn)
        .await?;
    Ok(rows.into_iter().map(|row| (row.id, row)).collect())
}

pub(crate) async fn load_user_cards(
    conn: &mut AsyncPgConnection,
    ids: &[Uuid],
) -> Result<HashMap<Uuid, UserCard>, LoadError> {
    load_user_rows(conn, ids)
        .await?
        .into_iter()
        .map(|(id, row)| row.into_card().map(|card| (id, card)))
        .collect::<Result<_, _>>()
        .map_err(LoadError::Corrupt)
}

pub(crate) async fn favorite_counts(
    conn: &mut AsyncPgConnection,
    profile_ids: &[Uuid],
) -> Result<HashMap<Uuid, i64>, LoadError> {
    if profile_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let counts: Vec<(Uuid, i64)> = favorites::table
        .filter(favorites::profile_id.eq_any(profile_ids))
        .group_by(favorites::profile_id)
        .select((favorites::profile_id, count_star()))
        .load(conn)
        .await?;
    Ok(counts.into_iter().collect())
}

/// Newest non-premium item per profile.
pub(crate) async fn latest_previews(
    conn: &mut AsyncPgConnection,
    profile_ids: &[Uuid],
) -> Result<HashMap<Uuid, ContentPreview>, LoadError> {
    if profile_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows: Vec<PreviewRow> = content::table
        .filter(content::profile_id.eq_any(profile_ids))
        .filter(content::is_premium.eq(false))
        .distinct_on(content::profile_id)
        .order((content::profile_id, content::created_at.desc()))
        .select(PreviewRow::as_select())
        .load(conn)
        .await?;
    Ok(rows
        .into_iter()
        .map(|row| (row.profile_id, ContentPreview::from(row)))
        .collect())
}

/// Attach owners, favorite counts and previews to profile rows, keeping the
/// input order. Profiles whose owner no longer exists are skipped.
pub(crate) async fn summarize_profiles(
    conn: &mut AsyncPgConnection,
    rows: Vec<ProfileRow>,
) -> Result<Vec<ProfileSummary>, LoadError> {
    let user_ids: Vec<Uuid> = rows.iter().map(|row| row.user_id).collect();
    let profile_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

    let cards = load_user_cards(conn, &user_ids).await?;
    let counts = favorite_counts(conn, &profile_ids).await?;
    let mut previews = latest_previews(conn, &profile_ids).await?;

    Ok(rows
        .into_iter()
        .filter_map(|row| {
            let user = cards.get(&row.user_id)?.clone();
            let favorites_count = counts.get(&row.id).copied().unwrap_or_default();
            let preview = previews.remove(&row.id);
            Some(ProfileSummary {
                profile: Profile::from(row),
                user,
                favorites_count,
                preview,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn collect_rows_reports_first_failure() {
        let rows = vec![Ok(1), Err("bad row".to_owned()), Err("later".to_owned())];
        let result: Result<Vec<i32>, String> =
            collect_rows(rows.into_iter(), |message| format!("corrupt: {message}"));
        assert_eq!(result, Err("corrupt: bad row".to_owned()));
    }

    #[rstest]
    fn load_errors_route_to_matching_mapper() {
        let corrupt = LoadError::Corrupt("bad role".to_owned())
            .into_repository_error(|_| "diesel".to_owned(), |message| message);
        let diesel = LoadError::from(diesel::result::Error::NotFound)
            .into_repository_error(|_| "diesel".to_owned(), |message| message);

        assert_eq!(corrupt, "bad role");
        assert_eq!(diesel, "diesel");
    }
}
