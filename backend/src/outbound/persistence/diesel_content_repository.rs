//! PostgreSQL-backed `ContentRepository` implementation using Diesel ORM.
//!
//! Counter changes are single `UPDATE ... RETURNING` statements so concurrent
//! views and likes never lose increments. Unlikes clamp at zero in SQL.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ContentRepository, ContentRepositoryError};
use crate::domain::{Content, ContentCounters, CounterChange, NewContent};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_helpers::collect_rows;
use super::models::{ContentRow, CounterRow, NewContentRow};
use super::pool::{DbPool, PoolError};
use super::schema::content;

diesel::define_sql_function!(fn greatest(a: BigInt, b: BigInt) -> BigInt);

#[derive(Clone)]
pub struct DieselContentRepository {
    pool: DbPool,
}

impl DieselContentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ContentRepositoryError {
    map_basic_pool_error(error, |message| ContentRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> ContentRepositoryError {
    map_basic_diesel_error(
        error,
        ContentRepositoryError::query,
        ContentRepositoryError::connection,
    )
}

fn corrupt(message: String) -> ContentRepositoryError {
    ContentRepositoryError::query(format!("corrupt content row: {message}"))
}

#[async_trait]
impl ContentRepository for DieselContentRepository {
    async fn insert(&self, item: &NewContent) -> Result<Content, ContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: ContentRow = diesel::insert_into(content::table)
            .values(NewContentRow::from(item))
            .returning(ContentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row.into_content().map_err(corrupt)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Content>, ContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ContentRow> = content::table
            .find(id)
            .select(ContentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| row.into_content().map_err(corrupt))
            .transpose()
    }

    async fn list_by_profile(
        &self,
        profile_id: &Uuid,
        include_premium: bool,
    ) -> Result<Vec<Content>, ContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = content::table
            .filter(content::profile_id.eq(profile_id))
            .order(content::created_at.desc())
            .select(ContentRow::as_select())
            .into_boxed();
        if !include_premium {
            query = query.filter(content::is_premium.eq(false));
        }

        let rows: Vec<ContentRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        collect_rows(rows.into_iter().map(ContentRow::into_content), corrupt)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, ContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(content::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn apply_counter(
        &self,
        id: &Uuid,
        change: CounterChange,
    ) -> Result<Option<ContentCounters>, ContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = content::table.find(id);
        let now = Utc::now();
        let result = match change {
            CounterChange::View => diesel::update(target)
                .set((content::views.eq(content::views + 1), content::updated_at.eq(now)))
                .returning(CounterRow::as_returning())
                .get_result::<CounterRow>(&mut conn)
                .await,
            CounterChange::Like => diesel::update(target)
                .set((content::likes.eq(content::likes + 1), content::updated_at.eq(now)))
                .returning(CounterRow::as_returning())
                .get_result::<CounterRow>(&mut conn)
                .await,
            CounterChange::Unlike => diesel::update(target)
                .set((
                    content::likes.eq(greatest(content::likes - 1, 0_i64)),
                    content::updated_at.eq(now),
                ))
                .returning(CounterRow::as_returning())
                .get_result::<CounterRow>(&mut conn)
                .await,
        };
        let row = result.optional().map_err(map_diesel_error)?;
        Ok(row.map(ContentCounters::from))
    }
}
