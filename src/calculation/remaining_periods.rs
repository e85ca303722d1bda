//! Remaining period selection.
//!
//! A period is remaining only while the elapsed day count has not reached
//! its start day. On a boundary day such as day 10 the "Days 6-10" period is
//! therefore no longer remaining, even though day 10 belongs to it.

use rust_decimal::Decimal;

use crate::models::{AuditStep, CurvePeriod, DisbursementCurve};

/// The periods still ahead in the month, including the audit step.
#[derive(Debug, Clone)]
pub struct RemainingPeriodsResult {
    /// The remaining periods in curve order.
    pub periods: Vec<CurvePeriod>,
    /// Sum of the remaining periods' historical percentages.
    pub total_percent: Decimal,
    /// The audit step recording this selection.
    pub audit_step: AuditStep,
}

/// Selects the curve periods whose start day is after `days_elapsed`.
///
/// # Examples
///
/// ```
/// use disbursement_projection::calculation::select_remaining_periods;
/// use disbursement_projection::models::DisbursementCurve;
///
/// let result = select_remaining_periods(10, DisbursementCurve::standard(), 4);
/// assert_eq!(result.periods.len(), 4);
/// assert_eq!(result.periods[0].label, "Days 11-15");
/// ```
pub fn select_remaining_periods(
    days_elapsed: u32,
    curve: &DisbursementCurve,
    step_number: u32,
) -> RemainingPeriodsResult {
    let periods: Vec<CurvePeriod> = curve
        .periods()
        .iter()
        .filter(|p| p.start_day > days_elapsed)
        .cloned()
        .collect();
    let total_percent: Decimal = periods.iter().map(|p| p.percent).sum();

    let labels: Vec<&str> = periods.iter().map(|p| p.label.as_str()).collect();
    let reasoning = if periods.is_empty() {
        format!("Day {} - no periods remain in the month", days_elapsed)
    } else {
        format!(
            "After day {}: {} remain, {}% of the month",
            days_elapsed,
            labels.join(", "),
            total_percent.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "remaining_periods".to_string(),
        rule_name: "Remaining Periods".to_string(),
        input: serde_json::json!({
            "days_elapsed": days_elapsed
        }),
        output: serde_json::json!({
            "periods": labels,
            "total_percent": total_percent.normalize().to_string()
        }),
        reasoning,
    };

    RemainingPeriodsResult {
        periods,
        total_percent,
        audit_step,
    }
}
