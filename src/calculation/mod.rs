//! Calculation logic for the disbursement projection engine.
//!
//! This module contains the projection steps: input coercion, expected
//! progress against the disbursement curve, the implied run-rate total,
//! remaining period selection, per-period pace projection and allocation of
//! the remaining target.

mod expected_progress;
mod implied_total;
mod period_projection;
mod projection;
mod remaining_periods;

pub use expected_progress::{
    ExpectedProgressResult, calculate_expected_progress, clamp_day, cumulative_expected_percent,
};
pub use implied_total::{ImpliedTotalResult, calculate_implied_total};
pub use period_projection::{
    PaceProjectionResult, TargetAllocationResult, allocate_remaining_target, project_at_pace,
};
pub use projection::{
    CoercedInput, CoercionResult, calculate_projection, coerce_input, compute_projection,
};
pub use remaining_periods::{RemainingPeriodsResult, select_remaining_periods};
