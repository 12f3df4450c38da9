//! PostgreSQL-backed `ProfileRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::{Profile, ProfileSummary, ProfileUpdate, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_helpers::{LoadError, summarize_profiles};
use super::models::{NewProfileRow, ProfileChangeset, ProfileRow};
use super::pool::{DbPool, PoolError};
use super::schema::{profiles, users};

#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProfileRepositoryError {
    map_basic_pool_error(error, |message| ProfileRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> ProfileRepositoryError {
    map_basic_diesel_error(
        error,
        ProfileRepositoryError::query,
        ProfileRepositoryError::connection,
    )
}

fn map_load_error(error: LoadError) -> ProfileRepositoryError {
    error.into_repository_error(map_diesel_error, |message| {
        ProfileRepositoryError::query(format!("corrupt profile listing: {message}"))
    })
}

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn create_empty(&self, user_id: &UserId) -> Result<Profile, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: ProfileRow = diesel::insert_into(profiles::table)
            .values(&NewProfileRow {
                id: Uuid::new_v4(),
                user_id: *user_id.as_uuid(),
            })
            .returning(ProfileRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ProfileRow> = profiles::table
            .filter(profiles::user_id.eq(user_id.as_uuid()))
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Profile::from))
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ProfileRow> = profiles::table
            .find(id)
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Profile::from))
    }

    async fn upsert(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<Profile, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = ProfileChangeset::new(update, Utc::now());

        let row: ProfileRow = diesel::insert_into(profiles::table)
            .values((
                profiles::id.eq(Uuid::new_v4()),
                profiles::user_id.eq(user_id.as_uuid()),
                &changeset,
            ))
            .on_conflict(profiles::user_id)
            .do_update()
            .set((
                profiles::bio.eq(excluded(profiles::bio)),
                profiles::location.eq(excluded(profiles::location)),
                profiles::age.eq(excluded(profiles::age)),
                profiles::height.eq(excluded(profiles::height)),
                profiles::measurements.eq(excluded(profiles::measurements)),
                profiles::services.eq(excluded(profiles::services)),
                profiles::rates.eq(excluded(profiles::rates)),
                profiles::availability.eq(excluded(profiles::availability)),
                profiles::updated_at.eq(excluded(profiles::updated_at)),
            ))
            .returning(ProfileRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn list_summaries(&self) -> Result<Vec<ProfileSummary>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ProfileRow> = profiles::table
            .inner_join(users::table)
            .filter(users::role.eq("PERFORMER"))
            .order((profiles::featured.desc(), profiles::created_at.desc()))
            .select(ProfileRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        summarize_profiles(&mut conn, rows)
            .await
            .map_err(map_load_error)
    }
}
