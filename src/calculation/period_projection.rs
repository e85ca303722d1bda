//! Per-period projection functionality.
//!
//! Two views are produced for every remaining period: what it will disburse
//! if the observed pace holds, and what it must disburse for the month to
//! land on target.

use rust_decimal::Decimal;

use crate::models::{AuditStep, CurvePeriod};

/// The result of projecting the remaining periods at the current pace.
#[derive(Debug, Clone)]
pub struct PaceProjectionResult {
    /// Projected amount per remaining period, in period order.
    pub amounts: Vec<Decimal>,
    /// Amount disbursed so far plus every projected amount.
    pub total_projected: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Projects each remaining period at the implied monthly pace.
///
/// Each period gets `implied_total * percent / 100`, and the month total is
/// the amount already disbursed plus those projections, summed in period
/// order.
///
/// # Arguments
///
/// * `periods` - The remaining periods in curve order
/// * `implied_total` - The extrapolated month-end total
/// * `amount_disbursed` - The amount disbursed so far
/// * `step_number` - The step number for audit trail sequencing
pub fn project_at_pace(
    periods: &[CurvePeriod],
    implied_total: Decimal,
    amount_disbursed: Decimal,
    step_number: u32,
) -> PaceProjectionResult {
    let mut total_projected = amount_disbursed;
    let mut amounts = Vec::with_capacity(periods.len());

    for period in periods {
        let projected = implied_total * period.percent / Decimal::ONE_HUNDRED;
        total_projected += projected;
        amounts.push(projected);
    }

    let reasoning = if periods.is_empty() {
        format!(
            "No periods remain - projected total is the {} already disbursed",
            amount_disbursed.normalize()
        )
    } else {
        format!(
            "{} disbursed + {} remaining periods at {} x period % = {}",
            amount_disbursed.normalize(),
            periods.len(),
            implied_total.round_dp(6).normalize(),
            total_projected.round_dp(6).normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "pace_projection".to_string(),
        rule_name: "Projection at Current Pace".to_string(),
        input: serde_json::json!({
            "implied_total": implied_total.normalize().to_string(),
            "amount_disbursed": amount_disbursed.normalize().to_string(),
            "periods": periods.iter().map(|p| p.label.as_str()).collect::<Vec<_>>()
        }),
        output: serde_json::json!({
            "amounts": amounts.iter().map(|a| a.normalize().to_string()).collect::<Vec<_>>(),
            "total_projected": total_projected.normalize().to_string()
        }),
        reasoning,
    };

    PaceProjectionResult {
        amounts,
        total_projected,
        audit_step,
    }
}

/// The result of spreading the remaining target over the remaining periods.
#[derive(Debug, Clone)]
pub struct TargetAllocationResult {
    /// Amount each remaining period must disburse, in period order.
    pub amounts: Vec<Decimal>,
    /// True when the remaining target was spread by historical share.
    pub allocated: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Spreads the remaining target over the remaining periods.
///
/// Each period receives `remaining_target * percent / total_remaining_percent`,
/// so the amounts sum to the remaining target. A negative remaining target
/// (already over target) is spread the same way. When the remaining periods
/// carry no historical share at all there is nothing to weight by, and the
/// pace amounts are returned unchanged.
///
/// # Arguments
///
/// * `periods` - The remaining periods in curve order
/// * `total_remaining_percent` - Sum of the remaining periods' percentages
/// * `remaining_target` - Target minus the amount disbursed so far
/// * `pace_amounts` - The at-pace projections, used when nothing can be weighted
/// * `step_number` - The step number for audit trail sequencing
pub fn allocate_remaining_target(
    periods: &[CurvePeriod],
    total_remaining_percent: Decimal,
    remaining_target: Decimal,
    pace_amounts: &[Decimal],
    step_number: u32,
) -> TargetAllocationResult {
    let allocated = !periods.is_empty() && total_remaining_percent > Decimal::ZERO;

    let (amounts, reasoning) = if allocated {
        let amounts: Vec<Decimal> = periods
            .iter()
            .map(|p| remaining_target * (p.percent / total_remaining_percent))
            .collect();
        let reasoning = format!(
            "{} still needed, spread across {} periods by share of the remaining {}%",
            remaining_target.normalize(),
            periods.len(),
            total_remaining_percent.normalize()
        );
        (amounts, reasoning)
    } else if periods.is_empty() {
        (
            Vec::new(),
            "No periods remain to allocate the target to".to_string(),
        )
    } else {
        (
            pace_amounts.to_vec(),
            "Remaining periods carry no historical share - keeping the pace projections"
                .to_string(),
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "target_allocation".to_string(),
        rule_name: "Allocation to Hit Target".to_string(),
        input: serde_json::json!({
            "remaining_target": remaining_target.normalize().to_string(),
            "total_remaining_percent": total_remaining_percent.normalize().to_string()
        }),
        output: serde_json::json!({
            "amounts": amounts.iter().map(|a| a.normalize().to_string()).collect::<Vec<_>>(),
            "allocated": allocated
        }),
        reasoning,
    };

    TargetAllocationResult {
        amounts,
        allocated,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DisbursementCurve;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn periods_after(day: u32) -> Vec<CurvePeriod> {
        DisbursementCurve::standard()
            .periods()
            .iter()
            .filter(|p| p.start_day > day)
            .cloned()
            .collect()
    }

    /// PP-001: pace projection scales each period by the implied total
    #[test]
    fn test_pace_projection_amounts() {
        let periods = periods_after(20);
        let result = project_at_pace(&periods, dec("10"), dec("6"), 5);

        assert_eq!(result.amounts, vec![dec("1.245"), dec("3.93")]);
        assert_eq!(result.total_projected, dec("11.175"));
        assert_eq!(result.audit_step.rule_id, "pace_projection");
    }

    /// PP-002: total projected is disbursed plus the amounts
    #[test]
    fn test_pace_total_is_disbursed_plus_amounts() {
        let periods = periods_after(5);
        let result = project_at_pace(&periods, dec("4.7014574518"), dec("1"), 5);

        let rebuilt = result
            .amounts
            .iter()
            .fold(dec("1"), |acc, amount| acc + *amount);
        assert_eq!(result.total_projected, rebuilt);
    }

    /// PP-003: nothing remaining leaves the disbursed amount
    #[test]
    fn test_pace_projection_with_no_periods() {
        let result = project_at_pace(&[], dec("10"), dec("7.5"), 5);

        assert!(result.amounts.is_empty());
        assert_eq!(result.total_projected, dec("7.5"));
        assert!(result.audit_step.reasoning.contains("No periods remain"));
    }

    /// TA-001: remaining target spread by historical share
    #[test]
    fn test_allocation_by_share() {
        let periods = periods_after(20);
        let result = allocate_remaining_target(&periods, dec("51.75"), dec("4"), &[], 6);

        assert!(result.allocated);
        assert_eq!(result.amounts.len(), 2);
        let sum: Decimal = result.amounts.iter().sum();
        assert!((sum - dec("4")).abs() < dec("0.0000000001"));
        assert_eq!(result.amounts[0].round_dp(4), dec("0.9623"));
        assert_eq!(result.amounts[1].round_dp(4), dec("3.0377"));
    }

    /// TA-002: an overshoot spreads a negative remaining target
    #[test]
    fn test_allocation_of_negative_remaining_target() {
        let periods = periods_after(25);
        let result = allocate_remaining_target(&periods, dec("39.30"), dec("-2"), &[], 6);

        assert_eq!(result.amounts, vec![dec("-2")]);
    }

    /// TA-003: no periods means no allocation
    #[test]
    fn test_allocation_with_no_periods() {
        let result = allocate_remaining_target(&[], Decimal::ZERO, dec("3"), &[], 6);

        assert!(!result.allocated);
        assert!(result.amounts.is_empty());
    }

    /// TA-004: zero-share periods keep the pace projections
    #[test]
    fn test_zero_share_periods_keep_pace_amounts() {
        let periods = vec![
            CurvePeriod::new(16, 20, Decimal::ZERO),
            CurvePeriod::new(21, 31, Decimal::ZERO),
        ];
        let pace = vec![Decimal::ZERO, Decimal::ZERO];
        let result = allocate_remaining_target(&periods, Decimal::ZERO, dec("5"), &pace, 6);

        assert!(!result.allocated);
        assert_eq!(result.amounts, pace);
        assert!(result.audit_step.reasoning.contains("no historical share"));
    }
}
