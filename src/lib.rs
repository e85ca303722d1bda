//! Disbursement Projection Engine
//!
//! This crate projects whether a monthly disbursement target will be met. It
//! maps a historical disbursement curve (the share of a month's total that
//! typically goes out in each 5-day period) onto what has been disbursed so
//! far, forecasts the month-end total at the current pace, and works out what
//! each remaining period must disburse to land on target.
//!
//! # Example
//!
//! ```
//! use disbursement_projection::calculation::compute_projection;
//! use disbursement_projection::models::DisbursementCurve;
//! use rust_decimal::Decimal;
//!
//! let result = compute_projection(5, Decimal::from(10), Decimal::from(1), DisbursementCurve::standard());
//! assert!(result.gap > Decimal::ZERO);
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
