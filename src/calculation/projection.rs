//! Full projection calculation.
//!
//! This module ties the individual steps together: it coerces the raw input
//! into range, then runs expected progress, implied total, remaining period
//! selection, pace projection and target allocation in order, recording an
//! audit step for each.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::EngineSettings;
use crate::models::{
    AuditStep, DAYS_IN_MONTH, DisbursementCurve, PeriodProjection, ProjectionInput,
    ProjectionResult, max_amount, min_target_floor,
};

use super::expected_progress::{calculate_expected_progress, clamp_day};
use super::implied_total::calculate_implied_total;
use super::period_projection::{allocate_remaining_target, project_at_pace};
use super::remaining_periods::select_remaining_periods;

/// Projection inputs after the coercion policy has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoercedInput {
    /// Days elapsed, clamped to `0..=31`.
    pub days_elapsed: u32,
    /// Target, floored at the minimum target and capped at [`max_amount`].
    /// Never below [`min_target_floor`].
    pub target_amount: Decimal,
    /// Disbursed amount, floored at zero and capped at [`max_amount`].
    pub amount_disbursed: Decimal,
}

/// The result of input coercion, including the audit step.
#[derive(Debug, Clone)]
pub struct CoercionResult {
    /// The coerced inputs.
    pub input: CoercedInput,
    /// The audit step recording any adjustments.
    pub audit_step: AuditStep,
}

/// Coerces raw inputs into the engine's domain. Never rejects.
///
/// - days are clamped to `0..=31`
/// - the target is raised to `settings.min_target_amount`, which is itself
///   raised to [`min_target_floor`] so unvalidated settings cannot cause a
///   division by zero or an overflow
/// - a negative disbursed amount becomes zero
/// - either amount above [`max_amount`] is lowered to it
pub fn coerce_input(
    input: &ProjectionInput,
    settings: &EngineSettings,
    step_number: u32,
) -> CoercionResult {
    let days_elapsed = clamp_day(input.days_elapsed);
    let min_target = settings.min_target_amount.max(min_target_floor());
    let target_amount = input.target_amount.max(min_target).min(max_amount());
    let amount_disbursed = input
        .amount_disbursed
        .max(Decimal::ZERO)
        .min(max_amount());

    let mut adjustments = Vec::new();
    if i64::from(days_elapsed) != input.days_elapsed {
        adjustments.push(format!(
            "days {} clamped to {}",
            input.days_elapsed, days_elapsed
        ));
    }
    if target_amount != input.target_amount {
        adjustments.push(format!(
            "target {} adjusted to {}",
            input.target_amount.normalize(),
            target_amount.normalize()
        ));
    }
    if amount_disbursed != input.amount_disbursed {
        adjustments.push(format!(
            "disbursed {} adjusted to {}",
            input.amount_disbursed.normalize(),
            amount_disbursed.normalize()
        ));
    }

    if !adjustments.is_empty() {
        debug!(adjustments = ?adjustments, "Coerced projection input");
    }

    let reasoning = if adjustments.is_empty() {
        "All inputs within range - no adjustment".to_string()
    } else {
        adjustments.join("; ")
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "input_coercion".to_string(),
        rule_name: "Input Coercion".to_string(),
        input: serde_json::json!({
            "days_elapsed": input.days_elapsed,
            "target_amount": input.target_amount.normalize().to_string(),
            "amount_disbursed": input.amount_disbursed.normalize().to_string()
        }),
        output: serde_json::json!({
            "days_elapsed": days_elapsed,
            "target_amount": target_amount.normalize().to_string(),
            "amount_disbursed": amount_disbursed.normalize().to_string(),
            "adjusted": !adjustments.is_empty()
        }),
        reasoning,
    };

    CoercionResult {
        input: CoercedInput {
            days_elapsed,
            target_amount,
            amount_disbursed,
        },
        audit_step,
    }
}

/// Calculates a full projection for the given input, curve and settings.
///
/// This function is total: every input is coerced into range first, so it
/// never fails and never divides by zero. Identical arguments always produce
/// identical results.
///
/// # Examples
///
/// ```
/// use disbursement_projection::calculation::calculate_projection;
/// use disbursement_projection::config::EngineSettings;
/// use disbursement_projection::models::{DisbursementCurve, ProjectionInput, ProjectionStatus};
/// use rust_decimal::Decimal;
///
/// let input = ProjectionInput::new(5, Decimal::from(10), Decimal::from(1));
/// let result = calculate_projection(
///     &input,
///     DisbursementCurve::standard(),
///     &EngineSettings::default(),
/// );
///
/// assert_eq!(result.remaining_period_projections.len(), 5);
/// assert_eq!(result.status(), ProjectionStatus::OffTrack);
/// ```
pub fn calculate_projection(
    input: &ProjectionInput,
    curve: &DisbursementCurve,
    settings: &EngineSettings,
) -> ProjectionResult {
    let mut audit_trace = Vec::with_capacity(6);
    let mut step_number = 1;

    let coercion = coerce_input(input, settings, step_number);
    let CoercedInput {
        days_elapsed,
        target_amount,
        amount_disbursed,
    } = coercion.input;
    audit_trace.push(coercion.audit_step);
    step_number += 1;

    let expected = calculate_expected_progress(days_elapsed, target_amount, curve, step_number);
    audit_trace.push(expected.audit_step);
    step_number += 1;

    let implied = calculate_implied_total(
        target_amount,
        amount_disbursed,
        expected.expected_percent,
        step_number,
    );
    audit_trace.push(implied.audit_step);
    step_number += 1;

    let remaining = select_remaining_periods(days_elapsed, curve, step_number);
    audit_trace.push(remaining.audit_step);
    step_number += 1;

    let pace = project_at_pace(
        &remaining.periods,
        implied.implied_total,
        amount_disbursed,
        step_number,
    );
    audit_trace.push(pace.audit_step);
    step_number += 1;

    let remaining_target = target_amount - amount_disbursed;
    let allocation = allocate_remaining_target(
        &remaining.periods,
        remaining.total_percent,
        remaining_target,
        &pace.amounts,
        step_number,
    );
    audit_trace.push(allocation.audit_step);

    let remaining_period_projections: Vec<PeriodProjection> = remaining
        .periods
        .iter()
        .zip(pace.amounts.iter().zip(allocation.amounts.iter()))
        .map(|(period, (at_pace, to_hit))| PeriodProjection {
            period: period.label.clone(),
            start_day: period.start_day,
            end_day: period.end_day,
            historical_percent: period.percent,
            projected_at_pace: *at_pace,
            projected_to_hit_target: *to_hit,
        })
        .collect();

    let gap = target_amount - pace.total_projected;

    debug!(
        days_elapsed,
        target = %target_amount,
        disbursed = %amount_disbursed,
        total_projected = %pace.total_projected,
        gap = %gap,
        "Projection calculated"
    );

    ProjectionResult {
        expected_cumulative_percent: expected.expected_percent,
        expected_amount: expected.expected_amount,
        actual_percent: implied.actual_percent,
        implied_monthly_total: implied.implied_total,
        implied_total_defaulted: implied.defaulted,
        remaining_period_projections,
        total_remaining_percent: remaining.total_percent,
        total_projected: pace.total_projected,
        gap,
        remaining_amount: remaining_target,
        remaining_days: DAYS_IN_MONTH - days_elapsed,
        audit_trace,
    }
}

/// Calculates a projection from the three raw values with default settings.
///
/// # Examples
///
/// ```
/// use disbursement_projection::calculation::compute_projection;
/// use disbursement_projection::models::DisbursementCurve;
/// use rust_decimal::Decimal;
///
/// let result = compute_projection(31, Decimal::from(10), Decimal::from(8), DisbursementCurve::standard());
///
/// assert!(result.remaining_period_projections.is_empty());
/// assert_eq!(result.total_projected, Decimal::from(8));
/// assert_eq!(result.gap, Decimal::from(2));
/// ```
pub fn compute_projection(
    days_elapsed: i64,
    target_amount: Decimal,
    amount_disbursed: Decimal,
    curve: &DisbursementCurve,
) -> ProjectionResult {
    calculate_projection(
        &ProjectionInput::new(days_elapsed, target_amount, amount_disbursed),
        curve,
        &EngineSettings::default(),
    )
}
