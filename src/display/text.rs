//! Plain-text display surface.
//!
//! Renders the calculator read-out: the day selector, key metrics, the
//! upcoming period table, current performance, what is needed to reach the
//! target, and a closing alert. Percentages are shown to two decimal places
//! and per-period amounts to three.

use std::fmt::Write;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::EngineSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{DAYS_IN_MONTH, ProjectionInput, ProjectionResult, ProjectionStatus};

use super::DisplaySurface;

/// Renders projections as a plain-text report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSurface {
    currency_symbol: String,
    unit_label: String,
    allowed_days: Vec<u32>,
}

impl TextSurface {
    /// Creates a surface with the given currency symbol and unit label.
    pub fn new(currency_symbol: impl Into<String>, unit_label: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
            unit_label: unit_label.into(),
            allowed_days: Vec::new(),
        }
    }

    /// Sets the day counts shown in the day selector line.
    ///
    /// With no days the selector line is omitted.
    pub fn with_allowed_days(mut self, days: impl Into<Vec<u32>>) -> Self {
        self.allowed_days = days.into();
        self
    }

    /// Creates a surface using the display units and selectable days from
    /// the engine settings.
    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self::new(settings.currency_symbol.clone(), settings.unit_label.clone())
            .with_allowed_days(settings.allowed_days.clone())
    }

    /// Lists the selectable days, bracketing the one being shown.
    fn day_selector(&self, days: u32) -> String {
        self.allowed_days
            .iter()
            .map(|d| {
                if *d == days {
                    format!("[{}]", d)
                } else {
                    d.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn money(&self, value: Decimal, dp: u32) -> String {
        let sign = if value.is_sign_negative() && !value.round_dp(dp).is_zero() {
            "-"
        } else {
            ""
        };
        format!("{}{}{}", sign, self.currency_symbol, fixed(value.abs(), dp))
    }

    fn money_with_unit(&self, value: Decimal, dp: u32) -> String {
        if self.unit_label.is_empty() {
            self.money(value, dp)
        } else {
            format!("{} {}", self.money(value, dp), self.unit_label)
        }
    }

    fn write_report(
        &self,
        out: &mut String,
        input: &ProjectionInput,
        result: &ProjectionResult,
    ) -> std::fmt::Result {
        let days = DAYS_IN_MONTH.saturating_sub(result.remaining_days);

        writeln!(out, "Disbursement Projection Calculator")?;
        writeln!(
            out,
            "Days passed: {} | Target: {} | Disbursed: {}",
            days,
            self.money_with_unit(input.target_amount, 2),
            self.money_with_unit(input.amount_disbursed, 2)
        )?;
        if !self.allowed_days.is_empty() {
            writeln!(out, "Days: {}", self.day_selector(days))?;
        }
        writeln!(out)?;

        writeln!(out, "Key Metrics")?;
        let status = match result.status() {
            ProjectionStatus::OnTrack => "On track",
            ProjectionStatus::OffTrack => "Off track",
        };
        writeln!(
            out,
            "  Target status:        {} (gap {})",
            status,
            self.money_with_unit(result.gap.abs(), 2)
        )?;
        writeln!(
            out,
            "  Disbursed so far:     {} ({}% of target)",
            self.money_with_unit(input.amount_disbursed, 2),
            fixed(result.actual_percent, 2)
        )?;
        writeln!(
            out,
            "  Expected by day {}: {} ({}%)",
            days,
            self.money_with_unit(result.expected_amount, 2),
            fixed(result.expected_cumulative_percent, 2)
        )?;
        writeln!(
            out,
            "  Projected month end:  {}",
            self.money_with_unit(result.total_projected, 2)
        )?;
        writeln!(out)?;

        writeln!(out, "Upcoming Periods")?;
        if result.is_month_complete() {
            writeln!(
                out,
                "  No upcoming periods - the end of the month has been reached."
            )?;
        } else {
            writeln!(
                out,
                "  {:<12} {:>12} {:>18} {:>18}",
                "Period", "Historical %", "At Current Pace", "To Hit Target"
            )?;
            for p in &result.remaining_period_projections {
                writeln!(
                    out,
                    "  {:<12} {:>12} {:>18} {:>18}",
                    p.period,
                    format!("{}%", fixed(p.historical_percent, 2)),
                    self.money(p.projected_at_pace, 3),
                    self.money(p.projected_to_hit_target, 3)
                )?;
            }
        }
        writeln!(out)?;

        writeln!(out, "Current Performance")?;
        writeln!(
            out,
            "  Implied total: {}",
            self.money_with_unit(result.implied_monthly_total, 2)
        )?;
        writeln!(out, "  Actual %: {}%", fixed(result.actual_percent, 2))?;
        writeln!(
            out,
            "  Expected %: {}%",
            fixed(result.expected_cumulative_percent, 2)
        )?;
        writeln!(
            out,
            "  If continuing at current pace: {}",
            self.money_with_unit(result.total_projected, 2)
        )?;
        writeln!(out)?;

        writeln!(out, "To Achieve Target")?;
        writeln!(
            out,
            "  Remaining amount: {}",
            self.money_with_unit(result.remaining_amount, 2)
        )?;
        writeln!(out, "  Remaining days: {} days", result.remaining_days)?;
        let per_day = if self.unit_label.is_empty() {
            "/day".to_string()
        } else {
            format!(" {}/day", self.unit_label)
        };
        writeln!(
            out,
            "  Required daily average: {}{}",
            self.money(result.required_daily_average(), 3),
            per_day
        )?;
        writeln!(out)?;

        match result.status() {
            ProjectionStatus::OffTrack => {
                writeln!(out, "Alert: on track to miss the target.")?;
                writeln!(
                    out,
                    "You are on track to disburse only {}, short by {}.",
                    self.money_with_unit(result.total_projected, 2),
                    self.money_with_unit(result.gap, 2)
                )?;
                writeln!(
                    out,
                    "The \"To Hit Target\" column shows what each period needs to reach {}.",
                    self.money_with_unit(input.target_amount, 2)
                )?;
            }
            ProjectionStatus::OnTrack => {
                writeln!(out, "On track: target achievement confirmed.")?;
                writeln!(
                    out,
                    "At the current pace you will reach the target and may disburse {}.",
                    self.money_with_unit(result.total_projected, 2)
                )?;
            }
        }

        Ok(())
    }
}

impl Default for TextSurface {
    fn default() -> Self {
        Self::from_settings(&EngineSettings::default())
    }
}

impl DisplaySurface for TextSurface {
    fn render(&self, input: &ProjectionInput, result: &ProjectionResult) -> EngineResult<String> {
        let mut out = String::new();
        self.write_report(&mut out, input, result)
            .map_err(|e| EngineError::RenderError {
                message: e.to_string(),
            })?;
        Ok(out)
    }
}

/// Formats a decimal with exactly `dp` places, rounding half away from zero.
fn fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::compute_projection;
    use crate::models::DisbursementCurve;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn render(days: i64, target: &str, disbursed: &str) -> String {
        let input = ProjectionInput::new(days, dec(target), dec(disbursed));
        let result = compute_projection(
            days,
            dec(target),
            dec(disbursed),
            DisbursementCurve::standard(),
        );
        TextSurface::default().render(&input, &result).unwrap()
    }

    #[test]
    fn test_fixed_pads_and_rounds() {
        assert_eq!(fixed(dec("1"), 2), "1.00");
        assert_eq!(fixed(dec("2.125"), 2), "2.13");
        assert_eq!(fixed(dec("0.5039962"), 3), "0.504");
    }

    #[test]
    fn test_off_track_report() {
        let text = render(5, "10", "1");

        assert!(text.contains("Off track (gap ₹5.30 CR)"));
        assert!(text.contains("Expected by day 5: ₹2.13 CR (21.27%)"));
        assert!(text.contains("Days 6-10"));
        assert!(text.contains("₹0.504"));
        assert!(text.contains("₹1.227"));
        assert!(text.contains("short by ₹5.30 CR"));
        assert!(text.contains("Required daily average: ₹0.346 CR/day"));
        assert!(text.contains("Remaining days: 26 days"));
    }

    #[test]
    fn test_on_track_report() {
        let text = render(20, "10", "6");

        assert!(text.contains("On track ("));
        assert!(text.contains("On track: target achievement confirmed."));
        assert!(!text.contains("Alert"));
    }

    #[test]
    fn test_month_end_report() {
        let text = render(31, "10", "8");

        assert!(text.contains("No upcoming periods"));
        assert!(text.contains("Remaining days: 0 days"));
        assert!(text.contains("Required daily average: ₹2.000 CR/day"));
    }

    #[test]
    fn test_negative_amounts_keep_sign_before_symbol() {
        let text = render(25, "10", "12");

        assert!(text.contains("Remaining amount: -₹2.00 CR"));
        assert!(text.contains("-₹2.000"));
    }

    #[test]
    fn test_day_selector_marks_current_day() {
        let text = render(15, "10", "4");
        assert!(text.contains("Days: 0 5 10 [15] 20 25 31"));
    }

    #[test]
    fn test_day_selector_follows_settings() {
        let settings = EngineSettings {
            allowed_days: vec![0, 10, 20, 31],
            ..EngineSettings::default()
        };
        let input = ProjectionInput::new(7, dec("10"), dec("1"));
        let result = compute_projection(7, dec("10"), dec("1"), DisbursementCurve::standard());
        let text = TextSurface::from_settings(&settings)
            .render(&input, &result)
            .unwrap();

        assert!(text.contains("Days: 0 10 20 31\n"));
    }

    #[test]
    fn test_custom_units() {
        let input = ProjectionInput::new(5, dec("10"), dec("1"));
        let result = compute_projection(5, dec("10"), dec("1"), DisbursementCurve::standard());
        let text = TextSurface::new("$", "").render(&input, &result).unwrap();

        assert!(text.contains("Target: $10.00 |"));
        assert!(text.contains("Required daily average: $0.346/day"));
        assert!(!text.contains("CR"));
        assert!(!text.contains("Days: "));
    }
}
