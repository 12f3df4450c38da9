//! Dashboard aggregation service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    BookingRepository, DashboardService, FavoriteRepository, MessageRepository, PaymentRepository,
};
use crate::domain::service_errors::{
    map_booking_error, map_favorite_error, map_message_error, map_payment_error,
};
use crate::domain::{
    Actor, ClientDashboard, Dashboard, EarningsReport, Error, PerformerDashboard,
    RECENT_BOOKINGS_LIMIT, Role, summarize_earnings,
};

pub struct DashboardServiceImpl<B, P, M, F> {
    bookings: Arc<B>,
    payments: Arc<P>,
    messages: Arc<M>,
    favorites: Arc<F>,
    clock: Arc<dyn Clock>,
}

impl<B, P, M, F> DashboardServiceImpl<B, P, M, F> {
    pub fn new(
        bookings: Arc<B>,
        payments: Arc<P>,
        messages: Arc<M>,
        favorites: Arc<F>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            bookings,
            payments,
            messages,
            favorites,
            clock,
        }
    }
}

#[async_trait]
impl<B, P, M, F> DashboardService for DashboardServiceImpl<B, P, M, F>
where
    B: BookingRepository,
    P: PaymentRepository,
    M: MessageRepository,
    F: FavoriteRepository,
{
    async fn dashboard(&self, actor: &Actor) -> Result<Dashboard, Error> {
        let now = self.clock.utc();
        let stats = self
            .bookings
            .stats(&actor.id, actor.role, now)
            .await
            .map_err(map_booking_error)?;
        let unread_messages = self
            .messages
            .unread_count(&actor.id)
            .await
            .map_err(map_message_error)?;
        let recent_bookings = self
            .bookings
            .list_for_participant(&actor.id, actor.role, Some(RECENT_BOOKINGS_LIMIT))
            .await
            .map_err(map_booking_error)?;

        match actor.role {
            Role::Performer => {
                let total_earnings = self
                    .payments
                    .completed_total_for_performer(&actor.id)
                    .await
                    .map_err(map_payment_error)?;
                Ok(Dashboard::Performer(PerformerDashboard {
                    total_earnings,
                    pending_bookings: stats.pending,
                    total_bookings: stats.total,
                    unread_messages,
                    recent_bookings,
                }))
            }
            Role::Client => {
                let favorites_count = self
                    .favorites
                    .count_for_user(&actor.id)
                    .await
                    .map_err(map_favorite_error)?;
                Ok(Dashboard::Client(ClientDashboard {
                    upcoming_bookings: stats.upcoming,
                    total_bookings: stats.total,
                    favorites_count,
                    unread_messages,
                    recent_bookings,
                }))
            }
        }
    }

    async fn earnings(&self, actor: &Actor) -> Result<EarningsReport, Error> {
        if !actor.is_performer() {
            return Err(Error::forbidden("only performers have earnings"));
        }
        let payments = self
            .payments
            .list_for_performer(&actor.id)
            .await
            .map_err(map_payment_error)?;
        let totals = summarize_earnings(&payments, self.clock.utc());
        Ok(EarningsReport { payments, totals })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{DateTime, Duration, Local, Utc};
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    use super::*;
    use crate::domain::ports::{
        MockBookingRepository, MockFavoriteRepository, MockMessageRepository,
        MockPaymentRepository, PaymentRepositoryError,
    };
    use crate::domain::service_test_helpers::{actor, fixed_now, user};
    use crate::domain::{BookingStats, ErrorCode, Payment, PaymentStatus, UserId};

    struct FixtureClock;

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            fixed_now().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            fixed_now()
        }
    }

    struct Mocks {
        bookings: MockBookingRepository,
        payments: MockPaymentRepository,
        messages: MockMessageRepository,
        favorites: MockFavoriteRepository,
    }

    impl Mocks {
        fn build(
            self,
        ) -> DashboardServiceImpl<
            MockBookingRepository,
            MockPaymentRepository,
            MockMessageRepository,
            MockFavoriteRepository,
        > {
            DashboardServiceImpl::new(
                Arc::new(self.bookings),
                Arc::new(self.payments),
                Arc::new(self.messages),
                Arc::new(self.favorites),
                Arc::new(FixtureClock),
            )
        }
    }

    #[fixture]
    fn mocks() -> Mocks {
        let mut bookings = MockBookingRepository::new();
        bookings.expect_stats().returning(|_, _, now| {
            assert_eq!(now, fixed_now());
            Ok(BookingStats {
                total: 7,
                pending: 2,
                upcoming: 3,
            })
        });
        bookings
            .expect_list_for_participant()
            .withf(|_, _, limit| *limit == Some(RECENT_BOOKINGS_LIMIT))
            .returning(|_, _, _| Ok(Vec::new()));
        let mut messages = MockMessageRepository::new();
        messages.expect_unread_count().returning(|_| Ok(4));
        Mocks {
            bookings,
            payments: MockPaymentRepository::new(),
            messages,
            favorites: MockFavoriteRepository::new(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn performer_dashboard_reports_earnings(mut mocks: Mocks) {
        mocks
            .payments
            .expect_completed_total_for_performer()
            .return_once(|_| Ok(42_000));
        mocks.favorites.expect_count_for_user().times(0);

        let dashboard = mocks
            .build()
            .dashboard(&actor(&user(Role::Performer)))
            .await
            .expect("dashboard loads");

        let Dashboard::Performer(stats) = dashboard else {
            panic!("expected performer dashboard");
        };
        assert_eq!(stats.total_earnings, 42_000);
        assert_eq!(stats.pending_bookings, 2);
        assert_eq!(stats.total_bookings, 7);
        assert_eq!(stats.unread_messages, 4);
    }

    #[rstest]
    #[tokio::test]
    async fn client_dashboard_reports_upcoming_and_favorites(mut mocks: Mocks) {
        mocks
            .favorites
            .expect_count_for_user()
            .return_once(|_| Ok(5));
        mocks.payments.expect_completed_total_for_performer().times(0);

        let dashboard = mocks
            .build()
            .dashboard(&actor(&user(Role::Client)))
            .await
            .expect("dashboard loads");

        let Dashboard::Client(stats) = dashboard else {
            panic!("expected client dashboard");
        };
        assert_eq!(stats.upcoming_bookings, 3);
        assert_eq!(stats.favorites_count, 5);
    }

    #[rstest]
    #[tokio::test]
    async fn earnings_are_performer_only(mocks: Mocks) {
        let err = mocks
            .build()
            .earnings(&actor(&user(Role::Client)))
            .await
            .expect_err("client earnings");

        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[tokio::test]
    async fn earnings_totals_use_the_clock(mut mocks: Mocks) {
        let now = fixed_now();
        let payment = Payment {
            id: Uuid::new_v4(),
            booking_id: Uuid::new_v4(),
            payer_id: UserId::random(),
            amount: 8_000,
            currency: "usd".to_owned(),
            processor_id: "cs_1".to_owned(),
            status: PaymentStatus::Completed,
            description: None,
            created_at: now - Duration::days(2),
        };
        mocks
            .payments
            .expect_list_for_performer()
            .return_once(move |_| Ok(vec![payment]));

        let report = mocks
            .build()
            .earnings(&actor(&user(Role::Performer)))
            .await
            .expect("earnings load");

        assert_eq!(report.payments.len(), 1);
        assert_eq!(report.totals.completed, 8_000);
        assert_eq!(report.totals.this_week, 8_000);
        assert_eq!(report.totals.this_month, 8_000);
    }

    #[rstest]
    #[tokio::test]
    async fn payment_outage_is_service_unavailable(mut mocks: Mocks) {
        mocks
            .payments
            .expect_list_for_performer()
            .return_once(|_| Err(PaymentRepositoryError::connection("down")));

        let err = mocks
            .build()
            .earnings(&actor(&user(Role::Performer)))
            .await
            .expect_err("outage");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
