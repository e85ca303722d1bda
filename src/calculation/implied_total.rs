//! Implied run-rate calculation functionality.
//!
//! This module compares what has actually been disbursed against what the
//! curve expected by now and extrapolates a month-end total from that pace.

use rust_decimal::Decimal;

use crate::models::AuditStep;

/// The result of the implied total step, including the audit step.
#[derive(Debug, Clone)]
pub struct ImpliedTotalResult {
    /// Disbursed amount as a percentage of the target. May exceed 100.
    pub actual_percent: Decimal,
    /// The extrapolated month-end total.
    pub implied_total: Decimal,
    /// True when there was no pace to extrapolate and the target was used.
    pub defaulted: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Extrapolates the month-end total from the pace observed so far.
///
/// When some of the month was expected to be disbursed and something has
/// been disbursed, the implied total is `disbursed / (expected_percent / 100)`.
/// Otherwise there is no signal yet, and the target itself is assumed.
///
/// # Arguments
///
/// * `target_amount` - The monthly target (already floored, so positive)
/// * `amount_disbursed` - The amount disbursed so far (already floored)
/// * `expected_percent` - Cumulative percentage expected by now
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use disbursement_projection::calculation::calculate_implied_total;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = calculate_implied_total(
///     Decimal::from(10),
///     Decimal::from(1),
///     Decimal::from_str("21.27").unwrap(),
///     3,
/// );
/// assert_eq!(result.actual_percent, Decimal::from(10));
/// assert_eq!(result.implied_total.round_dp(3), Decimal::from_str("4.701").unwrap());
/// assert!(!result.defaulted);
/// ```
pub fn calculate_implied_total(
    target_amount: Decimal,
    amount_disbursed: Decimal,
    expected_percent: Decimal,
    step_number: u32,
) -> ImpliedTotalResult {
    let actual_percent = amount_disbursed / target_amount * Decimal::ONE_HUNDRED;

    let has_signal = expected_percent > Decimal::ZERO && amount_disbursed > Decimal::ZERO;
    let (implied_total, reasoning) = if has_signal {
        let implied_total = amount_disbursed / (expected_percent / Decimal::ONE_HUNDRED);
        let reasoning = format!(
            "{} disbursed against {}% expected; {} / {} = {}",
            amount_disbursed.normalize(),
            expected_percent.normalize(),
            amount_disbursed.normalize(),
            (expected_percent / Decimal::ONE_HUNDRED).normalize(),
            implied_total.round_dp(6).normalize()
        );
        (implied_total, reasoning)
    } else {
        let why = if expected_percent.is_zero() {
            "nothing expected yet"
        } else {
            "nothing disbursed yet"
        };
        let reasoning = format!(
            "No pace to extrapolate ({}) - assuming the target of {} is on pace",
            why,
            target_amount.normalize()
        );
        (target_amount, reasoning)
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "implied_total".to_string(),
        rule_name: "Implied Monthly Total".to_string(),
        input: serde_json::json!({
            "target_amount": target_amount.normalize().to_string(),
            "amount_disbursed": amount_disbursed.normalize().to_string(),
            "expected_percent": expected_percent.normalize().to_string()
        }),
        output: serde_json::json!({
            "actual_percent": actual_percent.normalize().to_string(),
            "implied_total": implied_total.normalize().to_string(),
            "defaulted": !has_signal
        }),
        reasoning,
    };

    ImpliedTotalResult {
        actual_percent,
        implied_total,
        defaulted: !has_signal,
        audit_step,
    }
}
