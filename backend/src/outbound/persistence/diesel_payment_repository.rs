//! PostgreSQL-backed `PaymentRepository` implementation using Diesel ORM.
//!
//! Recording a completed checkout inserts the payment and completes its
//! booking in one transaction. Only a repeated `processor_id` is a no-op; a
//! second session paid for the same booking surfaces as
//! [`PaymentRepositoryError::BookingAlreadyPaid`].

use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel_async::RunQueryDsl;
use diesel_async::AsyncConnection as _;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use uuid::Uuid;

use crate::domain::ports::{PaymentRepository, PaymentRepositoryError};
use crate::domain::{BookingStatus, NewPayment, Payment, PaymentStatus, RecordOutcome, UserId};

use super::diesel_basic_error_mapping::{
    is_foreign_key_violation, map_basic_diesel_error, map_basic_pool_error, unique_violation,
};
use super::diesel_helpers::collect_rows;
use super::models::{NewPaymentRow, PaymentRow};
use super::pool::{DbPool, PoolError};
use super::schema::{bookings, payments};

#[derive(Clone)]
pub struct DieselPaymentRepository {
    pool: DbPool,
}

impl DieselPaymentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PaymentRepositoryError {
    map_basic_pool_error(error, |message| PaymentRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> PaymentRepositoryError {
    map_basic_diesel_error(
        error,
        PaymentRepositoryError::query,
        PaymentRepositoryError::connection,
    )
}

/// Foreign key failures mean the metadata named a booking or payer that does
/// not exist. Processor id conflicts never reach here, so a unique violation
/// is the one-payment-per-booking key.
fn map_record_error(error: diesel::result::Error, booking_id: Uuid) -> PaymentRepositoryError {
    if is_foreign_key_violation(&error) {
        return PaymentRepositoryError::booking_not_found(booking_id);
    }
    if unique_violation(&error).is_some() {
        return PaymentRepositoryError::booking_already_paid(booking_id);
    }
    map_diesel_error(error)
}

fn corrupt(message: String) -> PaymentRepositoryError {
    PaymentRepositoryError::query(format!("corrupt payment row: {message}"))
}

#[async_trait]
impl PaymentRepository for DieselPaymentRepository {
    async fn find_by_booking(
        &self,
        booking_id: &Uuid,
    ) -> Result<Option<Payment>, PaymentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<PaymentRow> = payments::table
            .filter(payments::booking_id.eq(booking_id))
            .select(PaymentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| row.into_payment().map_err(corrupt))
            .transpose()
    }

    async fn record_completed_checkout(
        &self,
        payment: &NewPayment,
    ) -> Result<RecordOutcome, PaymentRepositoryError> {
        let booking_id = payment.booking_id;
        let row = NewPaymentRow::from(payment);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let inserted = diesel::insert_into(payments::table)
                    .values(&row)
                    .on_conflict(payments::processor_id)
                    .do_nothing()
                    .execute(conn)
                    .await?;
                if inserted == 0 {
                    return Ok(RecordOutcome::AlreadyRecorded);
                }

                let updated = diesel::update(bookings::table.find(booking_id))
                    .set((
                        bookings::status.eq(BookingStatus::Completed.as_str()),
                        bookings::updated_at.eq(Utc::now()),
                    ))
                    .execute(conn)
                    .await?;
                if updated == 0 {
                    return Err(diesel::result::Error::NotFound);
                }
                Ok(RecordOutcome::Recorded)
            }
            .scope_boxed()
        })
        .await
        .map_err(|error| match error {
            diesel::result::Error::NotFound => {
                PaymentRepositoryError::booking_not_found(booking_id)
            }
            other => map_record_error(other, booking_id),
        })
    }

    async fn list_for_performer(
        &self,
        performer: &UserId,
    ) -> Result<Vec<Payment>, PaymentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PaymentRow> = payments::table
            .inner_join(bookings::table)
            .filter(bookings::performer_id.eq(performer.as_uuid()))
            .order(payments::created_at.desc())
            .select(PaymentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        collect_rows(rows.into_iter().map(PaymentRow::into_payment), corrupt)
    }

    async fn completed_total_for_performer(
        &self,
        performer: &UserId,
    ) -> Result<i64, PaymentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // SUM(bigint) yields numeric in Postgres.
        let total: i64 = payments::table
            .inner_join(bookings::table)
            .filter(bookings::performer_id.eq(performer.as_uuid()))
            .filter(payments::status.eq(PaymentStatus::Completed.as_str()))
            .select(sql::<BigInt>(
                "CAST(COALESCE(SUM(payments.amount), 0) AS BIGINT)",
            ))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[rstest]
    fn foreign_key_violation_names_the_booking() {
        let booking_id = Uuid::new_v4();
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new("insert or update on table \"payments\" violates foreign key".to_owned()),
        );

        assert_eq!(
            map_record_error(error, booking_id),
            PaymentRepositoryError::booking_not_found(booking_id)
        );
    }

    #[rstest]
    fn booking_key_conflicts_are_not_redeliveries() {
        let booking_id = Uuid::new_v4();
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates \"payments_booking_id_key\"".to_owned()),
        );

        assert_eq!(
            map_record_error(error, booking_id),
            PaymentRepositoryError::booking_already_paid(booking_id)
        );
    }

    #[rstest]
    fn other_failures_stay_query_errors() {
        let mapped = map_record_error(DieselError::RollbackTransaction, Uuid::new_v4());
        assert!(matches!(mapped, PaymentRepositoryError::Query { .. }));
    }
}
