//! PostgreSQL-backed `FavoriteRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::dsl::{count_star, exists, select};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{FavoriteRepository, FavoriteRepositoryError};
use crate::domain::{Favorite, FavoriteEntry, UserId};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation,
};
use super::diesel_helpers::{LoadError, summarize_profiles};
use super::models::{FavoriteRow, NewFavoriteRow, ProfileRow};
use super::pool::{DbPool, PoolError};
use super::schema::{favorites, profiles};

#[derive(Clone)]
pub struct DieselFavoriteRepository {
    pool: DbPool,
}

impl DieselFavoriteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FavoriteRepositoryError {
    map_basic_pool_error(error, |message| FavoriteRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> FavoriteRepositoryError {
    if unique_violation(&error).is_some() {
        return FavoriteRepositoryError::duplicate();
    }
    map_basic_diesel_error(
        error,
        FavoriteRepositoryError::query,
        FavoriteRepositoryError::connection,
    )
}

fn map_load_error(error: LoadError) -> FavoriteRepositoryError {
    error.into_repository_error(map_diesel_error, |message| {
        FavoriteRepositoryError::query(format!("corrupt favorite listing: {message}"))
    })
}

#[async_trait]
impl FavoriteRepository for DieselFavoriteRepository {
    async fn insert(
        &self,
        user: &UserId,
        profile_id: &Uuid,
    ) -> Result<Favorite, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: FavoriteRow = diesel::insert_into(favorites::table)
            .values(&NewFavoriteRow {
                id: Uuid::new_v4(),
                user_id: *user.as_uuid(),
                profile_id: *profile_id,
            })
            .returning(FavoriteRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn delete(
        &self,
        user: &UserId,
        profile_id: &Uuid,
    ) -> Result<bool, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            favorites::table
                .filter(favorites::user_id.eq(user.as_uuid()))
                .filter(favorites::profile_id.eq(profile_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn list_for_user(
        &self,
        user: &UserId,
    ) -> Result<Vec<FavoriteEntry>, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(FavoriteRow, ProfileRow)> = favorites::table
            .inner_join(profiles::table)
            .filter(favorites::user_id.eq(user.as_uuid()))
            .order(favorites::created_at.desc())
            .select((FavoriteRow::as_select(), ProfileRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let (favorite_rows, profile_rows): (Vec<FavoriteRow>, Vec<ProfileRow>) =
            rows.into_iter().unzip();
        let summaries = summarize_profiles(&mut conn, profile_rows)
            .await
            .map_err(map_load_error)?;

        Ok(favorite_rows
            .into_iter()
            .filter_map(|favorite| {
                let profile = summaries
                    .iter()
                    .find(|summary| summary.profile.id == favorite.profile_id)?
                    .clone();
                Some(FavoriteEntry {
                    favorite: favorite.into(),
                    profile,
                })
            })
            .collect())
    }

    async fn exists(
        &self,
        user: &UserId,
        profile_id: &Uuid,
    ) -> Result<bool, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        select(exists(
            favorites::table
                .filter(favorites::user_id.eq(user.as_uuid()))
                .filter(favorites::profile_id.eq(profile_id)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn count_for_profile(&self, profile_id: &Uuid) -> Result<i64, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        favorites::table
            .filter(favorites::profile_id.eq(profile_id))
            .select(count_star())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn count_for_user(&self, user: &UserId) -> Result<i64, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        favorites::table
            .filter(favorites::user_id.eq(user.as_uuid()))
            .select(count_star())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
