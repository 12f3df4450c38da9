//! Dashboard aggregates for performers and clients.

use chrono::{DateTime, Datelike, Duration, Utc};

use super::{BookingDetails, Payment, PaymentStatus};

/// Number of recent bookings shown on the dashboard.
pub const RECENT_BOOKINGS_LIMIT: i64 = 5;

/// Performer dashboard figures.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformerDashboard {
    /// Sum of completed payments, in minor units.
    pub total_earnings: i64,
    pub pending_bookings: i64,
    pub total_bookings: i64,
    pub unread_messages: i64,
    pub recent_bookings: Vec<BookingDetails>,
}

/// Client dashboard figures.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientDashboard {
    pub upcoming_bookings: i64,
    pub total_bookings: i64,
    pub favorites_count: i64,
    pub unread_messages: i64,
    pub recent_bookings: Vec<BookingDetails>,
}

/// Dashboard variant chosen by the caller's role.
#[derive(Debug, Clone, PartialEq)]
pub enum Dashboard {
    Performer(PerformerDashboard),
    Client(ClientDashboard),
}

/// Earnings totals in minor units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EarningsTotals {
    pub completed: i64,
    pub pending: i64,
    pub this_month: i64,
    pub this_week: i64,
}

/// Earnings page: every payment plus derived totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarningsReport {
    pub payments: Vec<Payment>,
    pub totals: EarningsTotals,
}

/// Compute earnings totals relative to `now`.
///
/// Month and week figures only count completed payments. The month is the
/// current UTC calendar month; the week is the trailing seven days.
pub fn summarize_earnings(payments: &[Payment], now: DateTime<Utc>) -> EarningsTotals {
    let week_start = now - Duration::days(7);
    payments
        .iter()
        .fold(EarningsTotals::default(), |mut totals, payment| {
            match payment.status {
                PaymentStatus::Completed => {
                    totals.completed += payment.amount;
                    let at = payment.created_at;
                    if at.year() == now.year() && at.month() == now.month() {
                        totals.this_month += payment.amount;
                    }
                    if at >= week_start {
                        totals.this_week += payment.amount;
                    }
                }
                PaymentStatus::Pending => totals.pending += payment.amount,
                PaymentStatus::Failed => {}
            }
            totals
        })
}
