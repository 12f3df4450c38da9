//! PostgreSQL-backed `BookingRepository` implementation using Diesel ORM.
//!
//! Detail views are assembled from one bookings query plus batched lookups of
//! participants, performer profiles and payments.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{
    Booking, BookingDetails, BookingStats, BookingStatus, NewBooking, Payment, Role, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_helpers::{LoadError, load_user_cards};
use super::models::{BookingRow, NewBookingRow, PaymentRow};
use super::pool::{DbPool, PoolError};
use super::schema::{bookings, payments, profiles};

#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BookingRepositoryError {
    map_basic_pool_error(error, |message| BookingRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> BookingRepositoryError {
    map_basic_diesel_error(
        error,
        BookingRepositoryError::query,
        BookingRepositoryError::connection,
    )
}

fn corrupt(message: String) -> BookingRepositoryError {
    BookingRepositoryError::query(format!("corrupt booking data: {message}"))
}

fn map_load_error(error: LoadError) -> BookingRepositoryError {
    error.into_repository_error(map_diesel_error, corrupt)
}

const OPEN_STATUSES: [BookingStatus; 2] = [BookingStatus::Pending, BookingStatus::Confirmed];

async fn attach_details(
    conn: &mut AsyncPgConnection,
    rows: Vec<BookingRow>,
) -> Result<Vec<BookingDetails>, LoadError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let booking_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
    let mut user_ids: Vec<Uuid> = rows
        .iter()
        .flat_map(|row| [row.performer_id, row.client_id])
        .collect();
    user_ids.sort_unstable();
    user_ids.dedup();

    let cards = load_user_cards(conn, &user_ids).await?;
    let locations: HashMap<Uuid, Option<String>> = profiles::table
        .filter(profiles::user_id.eq_any(&user_ids))
        .select((profiles::user_id, profiles::location))
        .load::<(Uuid, Option<String>)>(conn)
        .await?
        .into_iter()
        .collect();
    let mut paid: HashMap<Uuid, Payment> = payments::table
        .filter(payments::booking_id.eq_any(&booking_ids))
        .select(PaymentRow::as_select())
        .load::<PaymentRow>(conn)
        .await?
        .into_iter()
        .map(|row| row.into_payment().map(|payment| (payment.booking_id, payment)))
        .collect::<Result<_, _>>()
        .map_err(LoadError::Corrupt)?;

    rows.into_iter()
        .map(|row| {
            let performer = cards.get(&row.performer_id).cloned().ok_or_else(|| {
                LoadError::Corrupt(format!("booking {} has no performer", row.id))
            })?;
            let client = cards.get(&row.client_id).cloned().ok_or_else(|| {
                LoadError::Corrupt(format!("booking {} has no client", row.id))
            })?;
            let performer_location = locations.get(&row.performer_id).cloned().flatten();
            let payment = paid.remove(&row.id);
            let booking = row.into_booking().map_err(LoadError::Corrupt)?;
            Ok(BookingDetails {
                booking,
                performer,
                performer_location,
                client,
                payment,
            })
        })
        .collect()
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn insert(&self, booking: &NewBooking) -> Result<Booking, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: BookingRow = diesel::insert_into(bookings::table)
            .values(NewBookingRow::from(booking))
            .returning(BookingRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row.into_booking().map_err(corrupt)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<BookingRow> = bookings::table
            .find(id)
            .select(BookingRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| row.into_booking().map_err(corrupt))
            .transpose()
    }

    async fn find_details(
        &self,
        id: &Uuid,
    ) -> Result<Option<BookingDetails>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<BookingRow> = bookings::table
            .find(id)
            .select(BookingRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some(row) = row else {
            return Ok(None);
        };
        let mut details = attach_details(&mut conn, vec![row])
            .await
            .map_err(map_load_error)?;
        Ok(details.pop())
    }

    async fn list_for_participant(
        &self,
        user: &UserId,
        role: Role,
        limit: Option<i64>,
    ) -> Result<Vec<BookingDetails>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = bookings::table
            .order(bookings::scheduled_at.desc())
            .select(BookingRow::as_select())
            .into_boxed();
        query = match role {
            Role::Performer => query.filter(bookings::performer_id.eq(user.as_uuid())),
            Role::Client => query.filter(bookings::client_id.eq(user.as_uuid())),
        };
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let rows: Vec<BookingRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        attach_details(&mut conn, rows)
            .await
            .map_err(map_load_error)
    }

    async fn update_status(
        &self,
        id: &Uuid,
        status: BookingStatus,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<BookingRow> = diesel::update(bookings::table.find(id))
            .set((
                bookings::status.eq(status.as_str()),
                bookings::updated_at.eq(Utc::now()),
            ))
            .returning(BookingRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| row.into_booking().map_err(corrupt))
            .transpose()
    }

    async fn stats(
        &self,
        user: &UserId,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<BookingStats, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let per_status: Vec<(String, i64)> = match role {
            Role::Performer => {
                bookings::table
                    .filter(bookings::performer_id.eq(user.as_uuid()))
                    .group_by(bookings::status)
                    .select((bookings::status, count_star()))
                    .load(&mut conn)
                    .await
            }
            Role::Client => {
                bookings::table
                    .filter(bookings::client_id.eq(user.as_uuid()))
                    .group_by(bookings::status)
                    .select((bookings::status, count_star()))
                    .load(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;

        let mut stats = BookingStats::default();
        for (status, count) in &per_status {
            stats.total += count;
            if status == BookingStatus::Pending.as_str() {
                stats.pending = *count;
            }
        }

        let open = OPEN_STATUSES.map(BookingStatus::as_str);
        let upcoming_query = bookings::table
            .filter(bookings::scheduled_at.ge(now))
            .filter(bookings::status.eq_any(open))
            .select(count_star())
            .into_boxed();
        stats.upcoming = match role {
            Role::Performer => upcoming_query.filter(bookings::performer_id.eq(user.as_uuid())),
            Role::Client => upcoming_query.filter(bookings::client_id.eq(user.as_uuid())),
        }
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn open_statuses_match_domain_definition() {
        assert!(OPEN_STATUSES.iter().all(|status| status.is_open()));
        assert!(!BookingStatus::Completed.is_open());
        assert!(!BookingStatus::Cancelled.is_open());
    }

    #[rstest]
    fn corrupt_details_are_query_errors() {
        let mapped = map_load_error(LoadError::Corrupt("booking has no client".to_owned()));
        assert!(matches!(mapped, BookingRepositoryError::Query { .. }));
    }
}
