//! Core data models for the disbursement projection engine.
//!
//! This module contains the curve, input and result types used throughout
//! the engine.

mod curve;
mod input;
mod projection_result;

pub use curve::{CurvePeriod, DAYS_IN_MONTH, DisbursementCurve, MAX_PERCENT_SCALE};
pub use input::{ProjectionInput, max_amount, min_target_floor};
pub use projection_result::{AuditStep, PeriodProjection, ProjectionResult, ProjectionStatus};
