//! Money helpers. Amounts are stored as integer minor units (cents).

/// Largest accepted amount in major units.
const MAX_MAJOR_AMOUNT: f64 = 1_000_000.0;

/// Validation failures for monetary amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    #[error("amount must be a finite number")]
    NotFinite,
    #[error("amount must not be negative")]
    Negative,
    #[error("amount is too large")]
    TooLarge,
}

/// Convert a decimal amount in major units to minor units, rounding to the
/// nearest cent.
///
/// # Examples
/// ```
/// use encore::domain::money::major_to_minor;
///
/// assert_eq!(major_to_minor(150.0), Ok(15_000));
/// assert_eq!(major_to_minor(19.999), Ok(2_000));
/// ```
pub fn major_to_minor(amount: f64) -> Result<i64, MoneyError> {
    if !amount.is_finite() {
        return Err(MoneyError::NotFinite);
    }
    if amount < 0.0 {
        return Err(MoneyError::Negative);
    }
    if amount > MAX_MAJOR_AMOUNT {
        return Err(MoneyError::TooLarge);
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "bounded by MAX_MAJOR_AMOUNT above"
    )]
    let minor = (amount * 100.0).round() as i64;
    Ok(minor)
}

/// Convert minor units back to a decimal amount for JSON responses.
#[expect(
    clippy::cast_precision_loss,
    reason = "amounts stay far below 2^52 cents"
)]
pub fn minor_to_major(amount: i64) -> f64 {
    amount as f64 / 100.0
}

/// Price of a session lasting `duration_minutes` at `hourly_rate` minor
/// units per hour, rounded half-up to the nearest minor unit.
///
/// # Examples
/// ```
/// use encore::domain::money::session_total;
///
/// assert_eq!(session_total(90, 10_000), 15_000);
/// assert_eq!(session_total(20, 100), 33);
/// ```
pub fn session_total(duration_minutes: i32, hourly_rate: i64) -> i64 {
    let duration = i64::from(duration_minutes.max(0));
    (duration.saturating_mul(hourly_rate.max(0)) + 30) / 60
}
