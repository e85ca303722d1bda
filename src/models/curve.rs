//! Disbursement curve model.
//!
//! This module contains the [`DisbursementCurve`] and [`CurvePeriod`] types. A
//! curve describes which share of a month's total disbursement historically
//! lands in each period of the month.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The number of days a disbursement month is modelled with.
pub const DAYS_IN_MONTH: u32 = 31;

/// The maximum number of decimal places a period percentage may carry.
pub const MAX_PERCENT_SCALE: u32 = 4;

static STANDARD_CURVE: LazyLock<DisbursementCurve> = LazyLock::new(|| DisbursementCurve {
    periods: vec![
        CurvePeriod::new(1, 5, Decimal::new(2127, 2)),
        CurvePeriod::new(6, 10, Decimal::new(1072, 2)),
        CurvePeriod::new(11, 15, Decimal::new(777, 2)),
        CurvePeriod::new(16, 20, Decimal::new(838, 2)),
        CurvePeriod::new(21, 25, Decimal::new(1245, 2)),
        CurvePeriod::new(26, 31, Decimal::new(3930, 2)),
    ],
});

/// A contiguous range of days in the month with its historical share.
///
/// # Example
///
/// ```
/// use disbursement_projection::models::CurvePeriod;
/// use rust_decimal::Decimal;
///
/// let period = CurvePeriod::new(6, 10, Decimal::new(1072, 2));
/// assert_eq!(period.label, "Days 6-10");
/// assert!(period.contains_day(10));
/// assert!(!period.contains_day(11));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurvePeriod {
    /// Display label for the period (e.g., "Days 1-5").
    pub label: String,
    /// The first day of the period (inclusive).
    pub start_day: u32,
    /// The last day of the period (inclusive).
    pub end_day: u32,
    /// Percentage of the monthly total historically disbursed in this period.
    pub percent: Decimal,
}

impl CurvePeriod {
    /// Creates a period labelled "Days {start}-{end}".
    pub fn new(start_day: u32, end_day: u32, percent: Decimal) -> Self {
        Self {
            label: format!("Days {}-{}", start_day, end_day),
            start_day,
            end_day,
            percent,
        }
    }

    /// Creates a period with an explicit label.
    pub fn with_label(
        label: impl Into<String>,
        start_day: u32,
        end_day: u32,
        percent: Decimal,
    ) -> Self {
        Self {
            label: label.into(),
            start_day,
            end_day,
            percent,
        }
    }

    /// Checks if a day of the month falls inside this period (inclusive).
    pub fn contains_day(&self, day: u32) -> bool {
        day >= self.start_day && day <= self.end_day
    }

    /// Returns the number of days covered by the period.
    pub fn length_days(&self) -> u32 {
        self.end_day - self.start_day + 1
    }
}

/// An ordered table of periods that partitions days 1 to 31.
///
/// Curves are immutable once built. The standard table is available through
/// [`DisbursementCurve::standard`]; alternate curves go through
/// [`DisbursementCurve::new`], which enforces the structural invariants:
///
/// - at least one period
/// - the first period starts on day 1 and the last ends on day 31
/// - each period starts the day after the previous one ends
/// - percentages are between 0 and 100 with at most four decimal places
///
/// The percentages are not required to sum to exactly 100.
///
/// # Example
///
/// ```
/// use disbursement_projection::models::DisbursementCurve;
/// use rust_decimal::Decimal;
///
/// let curve = DisbursementCurve::standard();
/// assert_eq!(curve.periods().len(), 6);
/// assert_eq!(curve.total_percent(), Decimal::new(9989, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisbursementCurve {
    periods: Vec<CurvePeriod>,
}

impl DisbursementCurve {
    /// Builds a curve from its periods, validating the partition invariants.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidCurve`] describing the first invariant
    /// that the periods violate.
    pub fn new(periods: Vec<CurvePeriod>) -> EngineResult<Self> {
        let Some(first) = periods.first() else {
            return Err(invalid_curve("curve must contain at least one period"));
        };
        if first.start_day != 1 {
            return Err(invalid_curve(format!(
                "first period '{}' starts on day {}, expected day 1",
                first.label, first.start_day
            )));
        }

        let mut expected_start = 1;
        for period in &periods {
            if period.label.trim().is_empty() {
                return Err(invalid_curve(format!(
                    "period starting on day {} has an empty label",
                    period.start_day
                )));
            }
            if period.start_day != expected_start {
                return Err(invalid_curve(format!(
                    "period '{}' starts on day {}, expected day {}",
                    period.label, period.start_day, expected_start
                )));
            }
            if period.end_day < period.start_day {
                return Err(invalid_curve(format!(
                    "period '{}' ends on day {} before it starts on day {}",
                    period.label, period.end_day, period.start_day
                )));
            }
            if period.end_day > DAYS_IN_MONTH {
                return Err(invalid_curve(format!(
                    "period '{}' ends on day {}, past day {}",
                    period.label, period.end_day, DAYS_IN_MONTH
                )));
            }
            if period.percent.is_sign_negative() && !period.percent.is_zero() {
                return Err(invalid_curve(format!(
                    "period '{}' has negative percentage {}",
                    period.label, period.percent
                )));
            }
            if period.percent > Decimal::ONE_HUNDRED {
                return Err(invalid_curve(format!(
                    "period '{}' has percentage {} above 100",
                    period.label, period.percent
                )));
            }
            if period.percent.normalize().scale() > MAX_PERCENT_SCALE {
                return Err(invalid_curve(format!(
                    "period '{}' has percentage {} with more than {} decimal places",
                    period.label, period.percent, MAX_PERCENT_SCALE
                )));
            }
            expected_start = period.end_day + 1;
        }

        if expected_start != DAYS_IN_MONTH + 1 {
            return Err(invalid_curve(format!(
                "periods end on day {}, expected day {}",
                expected_start - 1,
                DAYS_IN_MONTH
            )));
        }

        Ok(Self { periods })
    }

    /// Returns the built-in curve shared by the whole process.
    ///
    /// | Period     | Percent |
    /// |------------|---------|
    /// | Days 1-5   | 21.27   |
    /// | Days 6-10  | 10.72   |
    /// | Days 11-15 | 7.77    |
    /// | Days 16-20 | 8.38    |
    /// | Days 21-25 | 12.45   |
    /// | Days 26-31 | 39.30   |
    pub fn standard() -> &'static DisbursementCurve {
        &STANDARD_CURVE
    }

    /// Returns the periods in day order.
    pub fn periods(&self) -> &[CurvePeriod] {
        &self.periods
    }

    /// Returns the sum of every period's percentage.
    pub fn total_percent(&self) -> Decimal {
        self.periods.iter().map(|p| p.percent).sum()
    }

    /// Returns the period containing the given day of the month, if any.
    pub fn period_for_day(&self, day: u32) -> Option<&CurvePeriod> {
        self.periods.iter().find(|p| p.contains_day(day))
    }
}

impl Default for DisbursementCurve {
    fn default() -> Self {
        Self::standard().clone()
    }
}

fn invalid_curve(message: impl Into<String>) -> EngineError {
    EngineError::InvalidCurve {
        message: message.into(),
    }
}
