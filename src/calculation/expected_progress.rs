//! Expected progress calculation functionality.
//!
//! This module maps a number of elapsed days onto the disbursement curve to
//! find how much of the month's total should already have gone out.

use rust_decimal::Decimal;

use crate::models::{AuditStep, DAYS_IN_MONTH, DisbursementCurve};

/// Clamps a day count into the month, `0..=31`.
pub fn clamp_day(day: i64) -> u32 {
    // The clamp bounds fit in u32.
    day.clamp(0, i64::from(DAYS_IN_MONTH)) as u32
}

/// Returns the percentage of the monthly total expected by the given day.
///
/// A period counts as soon as the day reaches its start day, so day 5 counts
/// only "Days 1-5" while day 6 already counts "Days 6-10" in full. Days
/// outside `0..=31` are clamped and the result is capped at 100.
///
/// # Examples
///
/// ```
/// use disbursement_projection::calculation::cumulative_expected_percent;
/// use disbursement_projection::models::DisbursementCurve;
/// use rust_decimal::Decimal;
///
/// let curve = DisbursementCurve::standard();
/// assert_eq!(cumulative_expected_percent(0, curve), Decimal::ZERO);
/// assert_eq!(cumulative_expected_percent(5, curve), Decimal::new(2127, 2));
/// assert_eq!(cumulative_expected_percent(6, curve), Decimal::new(3199, 2));
/// ```
pub fn cumulative_expected_percent(day: i64, curve: &DisbursementCurve) -> Decimal {
    let day = clamp_day(day);
    let cumulative: Decimal = curve
        .periods()
        .iter()
        .filter(|p| p.start_day <= day)
        .map(|p| p.percent)
        .sum();
    cumulative.min(Decimal::ONE_HUNDRED)
}

/// The result of the expected progress step, including the audit step.
#[derive(Debug, Clone)]
pub struct ExpectedProgressResult {
    /// Cumulative percentage of the month expected by now.
    pub expected_percent: Decimal,
    /// The target amount scaled by the expected percentage.
    pub expected_amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the percentage and amount expected to be disbursed by now.
///
/// # Arguments
///
/// * `days_elapsed` - Days of the month that have elapsed (already clamped)
/// * `target_amount` - The monthly target (already floored)
/// * `curve` - The disbursement curve
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_expected_progress(
    days_elapsed: u32,
    target_amount: Decimal,
    curve: &DisbursementCurve,
    step_number: u32,
) -> ExpectedProgressResult {
    let expected_percent = cumulative_expected_percent(i64::from(days_elapsed), curve);
    let expected_amount = target_amount * expected_percent / Decimal::ONE_HUNDRED;

    let counted: Vec<&str> = curve
        .periods()
        .iter()
        .filter(|p| p.start_day <= days_elapsed)
        .map(|p| p.label.as_str())
        .collect();

    let reasoning = if counted.is_empty() {
        format!(
            "No period has started by day {} - nothing expected yet",
            days_elapsed
        )
    } else {
        format!(
            "Day {} covers {} = {}% of the month; {} x {}% = {}",
            days_elapsed,
            counted.join(", "),
            expected_percent.normalize(),
            target_amount.normalize(),
            expected_percent.normalize(),
            expected_amount.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "expected_progress".to_string(),
        rule_name: "Expected Progress".to_string(),
        input: serde_json::json!({
            "days_elapsed": days_elapsed,
            "target_amount": target_amount.normalize().to_string()
        }),
        output: serde_json::json!({
            "expected_percent": expected_percent.normalize().to_string(),
            "expected_amount": expected_amount.normalize().to_string(),
            "periods_counted": counted
        }),
        reasoning,
    };

    ExpectedProgressResult {
        expected_percent,
        expected_amount,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CurvePeriod;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn standard() -> &'static DisbursementCurve {
        DisbursementCurve::standard()
    }

    /// EP-001: day 0 expects nothing
    #[test]
    fn test_day_zero_is_zero_percent() {
        assert_eq!(cumulative_expected_percent(0, standard()), Decimal::ZERO);
    }

    /// EP-002: day 5 counts only the first period
    #[test]
    fn test_day_five_counts_first_period() {
        assert_eq!(cumulative_expected_percent(5, standard()), dec("21.27"));
    }

    /// EP-003: day 6 counts the second period in full
    #[test]
    fn test_day_six_counts_second_period() {
        assert_eq!(cumulative_expected_percent(6, standard()), dec("31.99"));
    }

    /// EP-004: every boundary day
    #[test]
    fn test_each_boundary_threshold() {
        let cases = [
            (1, "21.27"),
            (10, "31.99"),
            (11, "39.76"),
            (15, "39.76"),
            (16, "48.14"),
            (20, "48.14"),
            (21, "60.59"),
            (25, "60.59"),
            (26, "99.89"),
            (31, "99.89"),
        ];
        for (day, expected) in cases {
            assert_eq!(
                cumulative_expected_percent(day, standard()),
                dec(expected),
                "day {}",
                day
            );
        }
    }

    /// EP-005: out of range days are clamped
    #[test]
    fn test_out_of_range_days_are_clamped() {
        assert_eq!(cumulative_expected_percent(-7, standard()), Decimal::ZERO);
        assert_eq!(cumulative_expected_percent(45, standard()), dec("99.89"));
        assert_eq!(cumulative_expected_percent(i64::MAX, standard()), dec("99.89"));
        assert_eq!(cumulative_expected_percent(i64::MIN, standard()), Decimal::ZERO);
    }

    /// EP-006: result is capped at 100
    #[test]
    fn test_result_capped_at_one_hundred() {
        let curve = DisbursementCurve::new(vec![
            CurvePeriod::new(1, 15, dec("70")),
            CurvePeriod::new(16, 31, dec("70")),
        ])
        .unwrap();
        assert_eq!(cumulative_expected_percent(10, &curve), dec("70"));
        assert_eq!(cumulative_expected_percent(31, &curve), dec("100"));
    }

    #[test]
    fn test_clamp_day() {
        assert_eq!(clamp_day(-1), 0);
        assert_eq!(clamp_day(0), 0);
        assert_eq!(clamp_day(17), 17);
        assert_eq!(clamp_day(31), 31);
        assert_eq!(clamp_day(32), 31);
    }

    #[test]
    fn test_expected_progress_amount() {
        let result = calculate_expected_progress(5, dec("10"), standard(), 2);

        assert_eq!(result.expected_percent, dec("21.27"));
        assert_eq!(result.expected_amount, dec("2.127"));
        assert_eq!(result.audit_step.step_number, 2);
        assert_eq!(result.audit_step.rule_id, "expected_progress");
        assert_eq!(
            result.audit_step.output["expected_amount"].as_str().unwrap(),
            "2.127"
        );
        assert_eq!(
            result.audit_step.output["periods_counted"][0]
                .as_str()
                .unwrap(),
            "Days 1-5"
        );
    }

    #[test]
    fn test_expected_progress_reasoning_on_day_zero() {
        let result = calculate_expected_progress(0, dec("10"), standard(), 2);

        assert_eq!(result.expected_amount, Decimal::ZERO);
        assert!(result.audit_step.reasoning.contains("No period has started"));
    }

    #[test]
    fn test_expected_progress_reasoning_lists_periods() {
        let result = calculate_expected_progress(10, dec("10"), standard(), 2);

        assert!(result.audit_step.reasoning.contains("Days 1-5, Days 6-10"));
        assert!(result.audit_step.reasoning.contains("31.99%"));
        assert!(result.audit_step.reasoning.contains("3.199"));
    }
}
