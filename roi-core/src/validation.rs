//! Per-step validation of wizard inputs.
//!
//! Each editable step owns a subset of the [`InputAggregate`] fields. A step
//! is valid when every field it owns satisfies its constraint; all failing
//! fields are reported together.
//!
//! | Step | Rules |
//! |------|-------|
//! | Team & cost | team size > 0 and whole; average salary > 0 |
//! | Usage | 0 < hours per week ≤ 168; adoption rate in [0, 1] |
//! | Assumptions | a preset is chosen; confidence discount in [0, 1] |
//! | Priorities | at least one priority selected |

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::is_fraction;
use crate::models::InputAggregate;
use crate::wizard::Step;

pub const MAX_HOURS_PER_WEEK: Decimal = dec!(168);

/// Input fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    TeamSize,
    AvgSalary,
    HoursPerWeek,
    AdoptionRate,
    ConfidenceDiscount,
    Preset,
    SelectedPriorities,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Self::TeamSize => "team size",
            Self::AvgSalary => "average salary",
            Self::HoursPerWeek => "hours per week",
            Self::AdoptionRate => "adoption rate",
            Self::ConfidenceDiscount => "confidence discount",
            Self::Preset => "preset",
            Self::SelectedPriorities => "priorities",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(
        field: Field,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Outcome of validating one step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepValidation {
    pub valid: bool,
    pub reasons: Vec<FieldError>,
}

impl StepValidation {
    fn from_reasons(reasons: Vec<FieldError>) -> Self {
        Self {
            valid: reasons.is_empty(),
            reasons,
        }
    }

    /// Returns `true` when `field` has at least one reported error.
    pub fn has_error(
        &self,
        field: Field,
    ) -> bool {
        self.reasons.iter().any(|r| r.field == field)
    }

    pub fn fields(&self) -> Vec<Field> {
        self.reasons.iter().map(|r| r.field).collect()
    }
}

impl fmt::Display for StepValidation {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if self.valid {
            return f.write_str("ok");
        }
        let messages: Vec<String> = self.reasons.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}

/// Validates the fields owned by `step`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use roi_core::{Field, InputAggregate, Step, validate_step};
///
/// let mut inputs = InputAggregate::default();
/// inputs.team_size = dec!(12.5);
///
/// let result = validate_step(Step::TeamAndCost, &inputs);
///
/// assert!(!result.valid);
/// assert_eq!(result.fields(), vec![Field::TeamSize, Field::AvgSalary]);
/// ```
pub fn validate_step(
    step: Step,
    inputs: &InputAggregate,
) -> StepValidation {
    let mut reasons = Vec::new();

    match step {
        Step::TeamAndCost => {
            check_team_size(inputs.team_size, &mut reasons);
            check_avg_salary(inputs.avg_salary, &mut reasons);
        }
        Step::Usage => {
            check_hours_per_week(inputs.hours_per_week, &mut reasons);
            check_fraction(Field::AdoptionRate, inputs.adoption_rate, &mut reasons);
        }
        Step::Assumptions => {
            if inputs.preset.is_none() {
                reasons.push(FieldError::new(Field::Preset, "choose low, average or aggressive"));
            }
            check_fraction(
                Field::ConfidenceDiscount,
                inputs.confidence_discount,
                &mut reasons,
            );
        }
        Step::Priorities => {
            if inputs.selected_priorities.is_empty() {
                reasons.push(FieldError::new(
                    Field::SelectedPriorities,
                    "select at least one priority",
                ));
            }
        }
        Step::Summary => {}
    }

    StepValidation::from_reasons(reasons)
}

/// Validates every editable step at once, in step order.
pub fn validate_all(inputs: &InputAggregate) -> StepValidation {
    let reasons = Step::all()
        .iter()
        .flat_map(|step| validate_step(*step, inputs).reasons)
        .collect();

    StepValidation::from_reasons(reasons)
}

fn check_team_size(
    team_size: Decimal,
    reasons: &mut Vec<FieldError>,
) {
    if team_size <= Decimal::ZERO {
        reasons.push(FieldError::new(Field::TeamSize, "must be greater than zero"));
    } else if !team_size.fract().is_zero() {
        reasons.push(FieldError::new(Field::TeamSize, "must be a whole number of people"));
    }
}

fn check_avg_salary(
    avg_salary: Decimal,
    reasons: &mut Vec<FieldError>,
) {
    if avg_salary <= Decimal::ZERO {
        reasons.push(FieldError::new(Field::AvgSalary, "must be greater than zero"));
    }
}

fn check_hours_per_week(
    hours: Decimal,
    reasons: &mut Vec<FieldError>,
) {
    if hours <= Decimal::ZERO || hours > MAX_HOURS_PER_WEEK {
        reasons.push(FieldError::new(
            Field::HoursPerWeek,
            format!("must be more than 0 and at most {MAX_HOURS_PER_WEEK}"),
        ));
    }
}

fn check_fraction(
    field: Field,
    value: Decimal,
    reasons: &mut Vec<FieldError>,
) {
    if !is_fraction(value) {
        reasons.push(FieldError::new(field, "must be between 0 and 1"));
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::Priority;

    fn valid_inputs() -> InputAggregate {
        let mut inputs = InputAggregate::default();
        inputs.team_size = dec!(50);
        inputs.avg_salary = dec!(60000);
        inputs.hours_per_week = dec!(5);
        inputs.adoption_rate = dec!(0.6);
        inputs.selected_priorities = BTreeSet::from([Priority::Quality]);
        inputs
    }

    // =========================================================================
    // team & cost step
    // =========================================================================

    #[test]
    fn team_step_accepts_positive_whole_team() {
        assert!(validate_step(Step::TeamAndCost, &valid_inputs()).valid);
    }

    #[test]
    fn team_step_reports_every_failing_field() {
        let inputs = InputAggregate::default();

        let result = validate_step(Step::TeamAndCost, &inputs);

        assert!(!result.valid);
        assert_eq!(result.fields(), vec![Field::TeamSize, Field::AvgSalary]);
    }

    #[test]
    fn team_step_rejects_fractional_team_size() {
        let mut inputs = valid_inputs();
        inputs.team_size = dec!(10.5);

        let result = validate_step(Step::TeamAndCost, &inputs);

        assert_eq!(
            result.reasons,
            vec![FieldError::new(Field::TeamSize, "must be a whole number of people")]
        );
    }

    #[test]
    fn team_step_accepts_whole_team_with_trailing_zero_scale() {
        let mut inputs = valid_inputs();
        inputs.team_size = dec!(10.00);

        assert!(validate_step(Step::TeamAndCost, &inputs).valid);
    }

    // =========================================================================
    // usage step
    // =========================================================================

    #[test]
    fn usage_step_accepts_upper_bounds() {
        let mut inputs = valid_inputs();
        inputs.hours_per_week = dec!(168);
        inputs.adoption_rate = dec!(1);

        assert!(validate_step(Step::Usage, &inputs).valid);
    }

    #[test]
    fn usage_step_accepts_zero_adoption() {
        let mut inputs = valid_inputs();
        inputs.adoption_rate = Decimal::ZERO;

        assert!(validate_step(Step::Usage, &inputs).valid);
    }

    #[test]
    fn usage_step_rejects_zero_hours() {
        let mut inputs = valid_inputs();
        inputs.hours_per_week = Decimal::ZERO;

        let result = validate_step(Step::Usage, &inputs);

        assert_eq!(result.fields(), vec![Field::HoursPerWeek]);
    }

    #[test]
    fn usage_step_rejects_more_hours_than_a_week_has() {
        let mut inputs = valid_inputs();
        inputs.hours_per_week = dec!(168.5);

        assert!(validate_step(Step::Usage, &inputs).has_error(Field::HoursPerWeek));
    }

    #[test]
    fn usage_step_rejects_adoption_outside_unit_interval() {
        for rate in [dec!(-0.1), dec!(1.01)] {
            let mut inputs = valid_inputs();
            inputs.adoption_rate = rate;

            let result = validate_step(Step::Usage, &inputs);

            assert_eq!(result.fields(), vec![Field::AdoptionRate]);
        }
    }

    // =========================================================================
    // assumptions and priorities steps
    // =========================================================================

    #[test]
    fn assumptions_step_requires_preset() {
        let mut inputs = valid_inputs();
        inputs.preset = None;

        let result = validate_step(Step::Assumptions, &inputs);

        assert_eq!(result.fields(), vec![Field::Preset]);
    }

    #[test]
    fn assumptions_step_rejects_confidence_above_one() {
        let mut inputs = valid_inputs();
        inputs.confidence_discount = dec!(1.5);

        assert!(validate_step(Step::Assumptions, &inputs).has_error(Field::ConfidenceDiscount));
    }

    #[test]
    fn priorities_step_rejects_empty_selection() {
        let mut inputs = valid_inputs();
        inputs.selected_priorities.clear();

        let result = validate_step(Step::Priorities, &inputs);

        assert_eq!(result.fields(), vec![Field::SelectedPriorities]);
    }

    #[test]
    fn summary_step_is_always_valid() {
        assert!(validate_step(Step::Summary, &InputAggregate::default()).valid);
    }

    // =========================================================================
    // validate_all
    // =========================================================================

    #[test]
    fn validate_all_collects_across_steps_in_order() {
        let mut inputs = InputAggregate::default();
        inputs.hours_per_week = Decimal::ZERO;

        let result = validate_all(&inputs);

        assert_eq!(
            result.fields(),
            vec![
                Field::TeamSize,
                Field::AvgSalary,
                Field::HoursPerWeek,
                Field::SelectedPriorities,
            ]
        );
        assert_eq!(
            result.to_string(),
            "team size: must be greater than zero; \
             average salary: must be greater than zero; \
             hours per week: must be more than 0 and at most 168; \
             priorities: select at least one priority"
        );
    }

    #[test]
    fn validate_all_passes_complete_inputs() {
        assert_eq!(validate_all(&valid_inputs()), StepValidation {
            valid: true,
            reasons: vec![],
        });
    }
}
