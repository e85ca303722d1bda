//! Configuration types for the projection engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    CurvePeriod, DAYS_IN_MONTH, DisbursementCurve, max_amount, min_target_floor,
};

/// Engine-wide settings.
///
/// # Example
///
/// ```
/// use disbursement_projection::config::EngineSettings;
/// use rust_decimal::Decimal;
///
/// let settings = EngineSettings::default();
/// assert_eq!(settings.min_target_amount, Decimal::new(1, 1));
/// assert_eq!(settings.allowed_days, vec![0, 5, 10, 15, 20, 25, 31]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Targets below this amount are raised to it before any division.
    pub min_target_amount: Decimal,
    /// Day counts a display surface offers for selection.
    ///
    /// The engine itself accepts any day and clamps it to the month.
    pub allowed_days: Vec<u32>,
    /// Symbol placed before amounts on display surfaces.
    pub currency_symbol: String,
    /// Unit label placed after amounts on display surfaces (e.g., "CR").
    pub unit_label: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            min_target_amount: Decimal::new(1, 1),
            allowed_days: vec![0, 5, 10, 15, 20, 25, 31],
            currency_symbol: "₹".to_string(),
            unit_label: "CR".to_string(),
        }
    }
}

impl EngineSettings {
    /// Checks the settings for values the engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSettings`] if the minimum target lies
    /// outside [`min_target_floor`]`..=`[`max_amount`], or if the allowed days
    /// are empty, unsorted, duplicated or past the end of the month.
    pub fn validate(&self) -> EngineResult<()> {
        if self.min_target_amount < min_target_floor() {
            return Err(EngineError::InvalidSettings {
                field: "min_target_amount".to_string(),
                message: format!(
                    "must be at least {}, got {}",
                    min_target_floor(),
                    self.min_target_amount
                ),
            });
        }

        if self.min_target_amount > max_amount() {
            return Err(EngineError::InvalidSettings {
                field: "min_target_amount".to_string(),
                message: format!(
                    "must be at most {}, got {}",
                    max_amount(),
                    self.min_target_amount
                ),
            });
        }

        if self.allowed_days.is_empty() {
            return Err(EngineError::InvalidSettings {
                field: "allowed_days".to_string(),
                message: "must list at least one day".to_string(),
            });
        }

        if let Some(day) = self.allowed_days.iter().find(|d| **d > DAYS_IN_MONTH) {
            return Err(EngineError::InvalidSettings {
                field: "allowed_days".to_string(),
                message: format!("day {} is past day {}", day, DAYS_IN_MONTH),
            });
        }

        if self.allowed_days.windows(2).any(|w| w[0] >= w[1]) {
            return Err(EngineError::InvalidSettings {
                field: "allowed_days".to_string(),
                message: "days must be strictly increasing".to_string(),
            });
        }

        Ok(())
    }
}

/// A single period as written in a curve file.
#[derive(Debug, Clone, Deserialize)]
pub struct CurvePeriodConfig {
    /// Optional display label; defaults to "Days {start}-{end}".
    #[serde(default)]
    pub label: Option<String>,
    /// The first day of the period.
    pub start_day: u32,
    /// The last day of the period.
    pub end_day: u32,
    /// Historical share of the month, in percent.
    pub percent: Decimal,
}

/// Curve configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct CurveConfig {
    /// A short name for the curve.
    pub name: String,
    /// Optional description of where the figures come from.
    #[serde(default)]
    pub description: Option<String>,
    /// The periods, in day order.
    pub periods: Vec<CurvePeriodConfig>,
}

impl CurveConfig {
    /// Converts the file contents into a validated curve.
    pub fn into_curve(self) -> EngineResult<DisbursementCurve> {
        let periods = self
            .periods
            .into_iter()
            .map(|p| match p.label {
                Some(label) => CurvePeriod::with_label(label, p.start_day, p.end_day, p.percent),
                None => CurvePeriod::new(p.start_day, p.end_day, p.percent),
            })
            .collect();
        DisbursementCurve::new(periods)
    }
}
