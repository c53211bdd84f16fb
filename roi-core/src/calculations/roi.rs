//! Training ROI calculations.
//!
//! # Derivation
//!
//! | KPI | Formula |
//! |-----|---------|
//! | Hours saved per year | team size × hours per week × adoption rate × 52 |
//! | Hourly rate | average salary ÷ annual working hours |
//! | Annual savings | hours saved per year × hourly rate |
//! | Training cost | flat value, or per-head value × team size |
//! | Payback | training cost ÷ (annual savings ÷ 12), not applicable when savings ≤ 0 |
//! | Retention impact | confidence discount × normalized retention weight × adoption rate, clamped to [0, 1] |
//! | First-year ROI | (annual savings − training cost) ÷ training cost |
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeSet;
//! use rust_decimal_macros::dec;
//! use roi_core::{EngineConfig, InputAggregate, Priority, RoiCalculator};
//! use roi_core::calculations::common::round_half_up;
//!
//! let mut inputs = InputAggregate::default();
//! inputs.team_size = dec!(50);
//! inputs.avg_salary = dec!(60000);
//! inputs.hours_per_week = dec!(5);
//! inputs.adoption_rate = dec!(0.6);
//! inputs.selected_priorities = BTreeSet::from([Priority::TimeSaved]);
//!
//! let calculator = RoiCalculator::new(EngineConfig::default());
//! let result = calculator.compute(&inputs);
//!
//! assert_eq!(result.hours_saved_per_year, dec!(7800));
//! assert_eq!(result.annual_savings_amount, dec!(225000));
//! assert_eq!(result.payback.months().map(round_half_up), Some(dec!(1.07)));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::trace;

use crate::calculations::common::clamp_fraction;
use crate::models::{EngineConfig, InputAggregate, KpiResult, Payback, Priority, select_priorities};

pub const WEEKS_PER_YEAR: Decimal = dec!(52);

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Derives [`KpiResult`]s from wizard inputs.
///
/// Inputs are expected to have passed [`validate_all`](crate::validate_all);
/// the calculator itself never fails and saturates instead of overflowing.
#[derive(Debug, Clone)]
pub struct RoiCalculator {
    config: EngineConfig,
}

impl RoiCalculator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Computes every KPI for `inputs`.
    ///
    /// Deterministic and side-effect free: identical inputs always give an
    /// identical result.
    pub fn compute(
        &self,
        inputs: &InputAggregate,
    ) -> KpiResult {
        let hours_saved_per_year = self.hours_saved_per_year(
            inputs.team_size,
            inputs.hours_per_week,
            inputs.adoption_rate,
        );
        let annual_savings_amount = self.annual_savings(hours_saved_per_year, inputs.avg_salary);
        let training_cost = self.config.training_cost(inputs.team_size);
        let payback = self.payback(training_cost, annual_savings_amount);
        let retention_impact_score = self.retention_impact(inputs);
        let first_year_roi = self.first_year_roi(annual_savings_amount, training_cost);

        trace!(
            %hours_saved_per_year,
            %annual_savings_amount,
            %training_cost,
            ?payback,
            %retention_impact_score,
            "computed KPIs"
        );

        KpiResult {
            hours_saved_per_year,
            annual_savings_amount,
            payback,
            retention_impact_score,
            training_cost,
            first_year_roi,
        }
    }

    fn hours_saved_per_year(
        &self,
        team_size: Decimal,
        hours_per_week: Decimal,
        adoption_rate: Decimal,
    ) -> Decimal {
        team_size
            .saturating_mul(hours_per_week)
            .saturating_mul(adoption_rate)
            .saturating_mul(WEEKS_PER_YEAR)
    }

    /// Multiplies before dividing so whole-number inputs stay exact.
    fn annual_savings(
        &self,
        hours_saved_per_year: Decimal,
        avg_salary: Decimal,
    ) -> Decimal {
        hours_saved_per_year
            .saturating_mul(avg_salary)
            .checked_div(self.config.annual_working_hours)
            .unwrap_or(Decimal::ZERO)
    }

    fn payback(
        &self,
        training_cost: Decimal,
        annual_savings: Decimal,
    ) -> Payback {
        if annual_savings <= Decimal::ZERO {
            return Payback::NotApplicable;
        }

        training_cost
            .saturating_mul(MONTHS_PER_YEAR)
            .checked_div(annual_savings)
            .map_or(Payback::NotApplicable, Payback::Months)
    }

    fn retention_impact(
        &self,
        inputs: &InputAggregate,
    ) -> Decimal {
        let retention_weight = select_priorities(&inputs.selected_priorities)
            .map(|w| w.weight(Priority::Retention))
            .unwrap_or(Decimal::ZERO);

        clamp_fraction(
            inputs
                .confidence_discount
                .saturating_mul(retention_weight)
                .saturating_mul(inputs.adoption_rate),
        )
    }

    fn first_year_roi(
        &self,
        annual_savings: Decimal,
        training_cost: Decimal,
    ) -> Option<Decimal> {
        if training_cost <= Decimal::ZERO {
            return None;
        }
        annual_savings
            .saturating_sub(training_cost)
            .checked_div(training_cost)
    }
}
