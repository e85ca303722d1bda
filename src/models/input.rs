//! Projection input model.
//!
//! [`ProjectionInput`] carries the three values a caller supplies for a
//! projection. It is deliberately permissive: out-of-range days, tiny targets
//! and negative disbursements are accepted here and coerced by the engine.
//! Only values that cannot be represented at all are rejected.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Returns the largest amount the engine works with (10^18 currency units).
///
/// Larger amounts are clamped by the engine so that the decimal arithmetic
/// stays within range.
pub fn max_amount() -> Decimal {
    Decimal::new(1_000_000_000_000_000_000, 0)
}

/// Returns the smallest target the engine divides by (0.0001 currency units).
///
/// A configured minimum target below this is raised to it, so that
/// `max_amount() / target * 100` stays within `Decimal` range.
pub fn min_target_floor() -> Decimal {
    Decimal::new(1, 4)
}

/// The inputs to a single projection.
///
/// # Example
///
/// ```
/// use disbursement_projection::models::ProjectionInput;
/// use rust_decimal::Decimal;
///
/// let input = ProjectionInput::new(5, Decimal::new(10, 0), Decimal::new(1, 0));
/// assert_eq!(input.days_elapsed, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionInput {
    /// Days of the month that have elapsed.
    pub days_elapsed: i64,
    /// The monthly disbursement target.
    pub target_amount: Decimal,
    /// The amount disbursed so far this month.
    pub amount_disbursed: Decimal,
}

impl ProjectionInput {
    /// Creates a projection input from decimal amounts.
    pub fn new(days_elapsed: i64, target_amount: Decimal, amount_disbursed: Decimal) -> Self {
        Self {
            days_elapsed,
            target_amount,
            amount_disbursed,
        }
    }

    /// Creates a projection input for a calendar date, using its day of the
    /// month as the number of elapsed days.
    ///
    /// # Example
    ///
    /// ```
    /// use disbursement_projection::models::ProjectionInput;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
    /// let input = ProjectionInput::as_of(date, Decimal::new(10, 0), Decimal::ONE);
    /// assert_eq!(input.days_elapsed, 15);
    /// ```
    pub fn as_of(date: NaiveDate, target_amount: Decimal, amount_disbursed: Decimal) -> Self {
        Self::new(i64::from(date.day()), target_amount, amount_disbursed)
    }

    /// Creates a projection input from floating point amounts.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] if either amount is NaN,
    /// infinite, or larger in magnitude than [`max_amount`].
    ///
    /// # Example
    ///
    /// ```
    /// use disbursement_projection::models::ProjectionInput;
    ///
    /// assert!(ProjectionInput::from_f64(5, 10.0, 1.0).is_ok());
    /// assert!(ProjectionInput::from_f64(5, f64::NAN, 1.0).is_err());
    /// ```
    pub fn from_f64(
        days_elapsed: i64,
        target_amount: f64,
        amount_disbursed: f64,
    ) -> EngineResult<Self> {
        Ok(Self::new(
            days_elapsed,
            decimal_from_f64("target_amount", target_amount)?,
            decimal_from_f64("amount_disbursed", amount_disbursed)?,
        ))
    }
}

fn decimal_from_f64(field: &str, value: f64) -> EngineResult<Decimal> {
    if !value.is_finite() {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must be a finite number, got {}", value),
        });
    }

    let decimal = Decimal::from_f64(value).ok_or_else(|| EngineError::InvalidInput {
        field: field.to_string(),
        message: format!("{} cannot be represented as a decimal", value),
    })?;

    if decimal.abs() > max_amount() {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("magnitude exceeds the maximum of {}", max_amount()),
        });
    }

    Ok(decimal)
}
