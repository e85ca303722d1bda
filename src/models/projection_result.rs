//! Projection result models.
//!
//! This module contains the [`ProjectionResult`] type and its associated
//! structures that capture every output of a projection, including the
//! per-period breakdown and an audit trace of how each figure was derived.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether the month is projected to reach its target.
///
/// # Example
///
/// ```
/// use disbursement_projection::models::ProjectionStatus;
///
/// let json = serde_json::to_string(&ProjectionStatus::OffTrack).unwrap();
/// assert_eq!(json, "\"off_track\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionStatus {
    /// The projected total meets or exceeds the target.
    OnTrack,
    /// The projected total falls short of the target.
    OffTrack,
}

/// The projection for one period that has not started yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodProjection {
    /// The period label (e.g., "Days 6-10").
    pub period: String,
    /// The first day of the period.
    pub start_day: u32,
    /// The last day of the period.
    pub end_day: u32,
    /// The period's historical share of the month, in percent.
    pub historical_percent: Decimal,
    /// What the period would disburse if the observed pace continues.
    pub projected_at_pace: Decimal,
    /// What the period needs to disburse for the month to land on target.
    pub projected_to_hit_target: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete result of a projection.
///
/// Every field is derived from the (coerced) inputs and the curve, so two
/// projections over identical inputs compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Share of the month expected to be disbursed by now, in percent.
    pub expected_cumulative_percent: Decimal,
    /// The amount expected to be disbursed by now.
    pub expected_amount: Decimal,
    /// Share of the target actually disbursed, in percent. May exceed 100.
    pub actual_percent: Decimal,
    /// Month-end total extrapolated from the observed pace.
    pub implied_monthly_total: Decimal,
    /// True when there was no pace to extrapolate and the target was used.
    pub implied_total_defaulted: bool,
    /// Projections for the periods that have not started yet, in day order.
    pub remaining_period_projections: Vec<PeriodProjection>,
    /// Sum of the historical percentages of the remaining periods.
    pub total_remaining_percent: Decimal,
    /// Disbursed amount plus every remaining period's projection at pace.
    pub total_projected: Decimal,
    /// Target minus total projected. Positive means a projected shortfall.
    pub gap: Decimal,
    /// Target minus the amount disbursed so far. Negative once over target.
    pub remaining_amount: Decimal,
    /// Days left in the month.
    pub remaining_days: u32,
    /// The steps that produced this result.
    pub audit_trace: Vec<AuditStep>,
}

impl ProjectionResult {
    /// Returns whether the projected total reaches the target.
    pub fn status(&self) -> ProjectionStatus {
        if self.gap <= Decimal::ZERO {
            ProjectionStatus::OnTrack
        } else {
            ProjectionStatus::OffTrack
        }
    }

    /// Returns true when the projected total reaches the target.
    pub fn is_on_track(&self) -> bool {
        self.status() == ProjectionStatus::OnTrack
    }

    /// Returns the average daily disbursement needed over the remaining days.
    ///
    /// At month end the whole remaining amount is attributed to a single day.
    pub fn required_daily_average(&self) -> Decimal {
        self.remaining_amount / Decimal::from(self.remaining_days.max(1))
    }

    /// Returns true when no periods remain to be projected.
    pub fn is_month_complete(&self) -> bool {
        self.remaining_period_projections.is_empty()
    }
}
