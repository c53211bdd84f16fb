//! Step-by-step controller for a single ROI estimate.
//!
//! [`Wizard`] owns the inputs and the navigation state for one session.
//! The presentation layer reads plain data from it and calls its mutation
//! and navigation methods; it never computes anything itself.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use roi_core::{EngineConfig, Priority, Step, Wizard};
//!
//! let mut wizard = Wizard::new(EngineConfig::default()).unwrap();
//!
//! wizard.set_team_size(dec!(50)).unwrap();
//! wizard.set_avg_salary(dec!(60000)).unwrap();
//! wizard.next().unwrap();
//! wizard.set_hours_per_week(dec!(5)).unwrap();
//! wizard.set_adoption_rate(dec!(0.6)).unwrap();
//! wizard.next().unwrap();
//! wizard.next().unwrap();
//! wizard.toggle_priority(Priority::TimeSaved).unwrap();
//!
//! assert_eq!(wizard.next().unwrap(), Step::Summary);
//! assert_eq!(wizard.summary().unwrap().annual_savings, "€225,000");
//! ```

use std::collections::BTreeSet;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::calculations::RoiCalculator;
use crate::models::{
    Currency, EngineConfig, EngineConfigError, InputAggregate, KpiResult, Preset, Priority,
    format_grouped, format_money,
};
use crate::validation::{StepValidation, validate_all, validate_step};

/// Ordered wizard steps. `Summary` is terminal and read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    TeamAndCost,
    Usage,
    Assumptions,
    Priorities,
    Summary,
}

impl Step {
    pub const COUNT: usize = 5;

    pub fn all() -> &'static [Step] {
        &[
            Step::TeamAndCost,
            Step::Usage,
            Step::Assumptions,
            Step::Priorities,
            Step::Summary,
        ]
    }

    /// 1-based position in the sequence.
    pub fn index(&self) -> usize {
        match self {
            Self::TeamAndCost => 1,
            Self::Usage => 2,
            Self::Assumptions => 3,
            Self::Priorities => 4,
            Self::Summary => 5,
        }
    }

    pub fn from_index(index: usize) -> Option<Step> {
        Step::all().get(index.checked_sub(1)?).copied()
    }

    pub fn next(&self) -> Option<Step> {
        Step::from_index(self.index() + 1)
    }

    pub fn previous(&self) -> Option<Step> {
        Step::from_index(self.index() - 1)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::TeamAndCost => "Team & cost",
            Self::Usage => "Usage",
            Self::Assumptions => "Assumptions",
            Self::Priorities => "Priorities",
            Self::Summary => "Summary",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Summary)
    }
}

impl fmt::Display for Step {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}/{} {}", self.index(), Step::COUNT, self.title())
    }
}

/// Navigation position of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub current_step: Step,
    pub completed_steps: BTreeSet<Step>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            current_step: Step::TeamAndCost,
            completed_steps: BTreeSet::new(),
        }
    }
}

impl WizardState {
    pub fn is_completed(
        &self,
        step: Step,
    ) -> bool {
        self.completed_steps.contains(&step)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    /// The current step has failing fields.
    #[error("step '{}' is incomplete: {}", .step.title(), .validation)]
    Invalid {
        step: Step,
        validation: StepValidation,
    },

    #[error("already at the summary")]
    AtTerminalStep,

    #[error("already at the first step")]
    AtFirstStep,

    /// Inputs cannot change while the summary is shown.
    #[error("the summary is read-only; go back to edit")]
    ReadOnly,
}

/// Display-ready strings for the summary step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryView {
    pub currency: Currency,
    pub hours_saved_per_year: String,
    pub annual_savings: String,
    pub training_cost: String,
    pub payback: String,
    pub retention_impact: String,
    pub first_year_roi: Option<String>,
}

impl SummaryView {
    pub fn from_result(
        result: &KpiResult,
        currency: Currency,
    ) -> Self {
        Self {
            currency,
            hours_saved_per_year: format_grouped(result.hours_saved_per_year),
            annual_savings: format_money(result.annual_savings_amount, currency),
            training_cost: format_money(result.training_cost, currency),
            payback: result.payback.to_string(),
            retention_impact: format!("{}%", result.retention_percent()),
            first_year_roi: result
                .first_year_roi_percent()
                .map(|p| format!("{}%", format_grouped(p))),
        }
    }
}

impl fmt::Display for SummaryView {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Hours saved per year: {}", self.hours_saved_per_year)?;
        writeln!(f, "Annual savings:       {}", self.annual_savings)?;
        writeln!(f, "Training cost:        {}", self.training_cost)?;
        writeln!(f, "Payback period:       {}", self.payback)?;
        writeln!(f, "Retention impact:     {}", self.retention_impact)?;
        match &self.first_year_roi {
            Some(roi) => writeln!(f, "First-year ROI:       {roi}"),
            None => writeln!(f, "First-year ROI:       not applicable"),
        }
    }
}

/// Controller for one wizard session.
///
/// The wizard is the single owner of its [`InputAggregate`]. KPIs are
/// never cached: [`Wizard::result`] recomputes from the current inputs on
/// every call.
#[derive(Debug, Clone)]
pub struct Wizard {
    calculator: RoiCalculator,
    inputs: InputAggregate,
    state: WizardState,
    salary_origin: Amount,
    cost_origin: Amount,
}

/// A monetary value in the currency it was entered in. Conversions always
/// start from here so switching back and forth does not drift.
#[derive(Debug, Clone, Copy)]
struct Amount {
    currency: Currency,
    value: Decimal,
}

impl Wizard {
    /// Starts a session at the first step with preset-defaulted inputs.
    ///
    /// # Errors
    ///
    /// Returns [`EngineConfigError`] when `config` fails validation.
    pub fn new(config: EngineConfig) -> Result<Self, EngineConfigError> {
        config.validate()?;
        let inputs = InputAggregate::new(config.default_currency);
        let salary_origin = Amount {
            currency: inputs.currency,
            value: inputs.avg_salary,
        };
        let cost_origin = Amount {
            currency: config.default_currency,
            value: config.training_cost_value,
        };

        Ok(Self {
            calculator: RoiCalculator::new(config),
            inputs,
            state: WizardState::default(),
            salary_origin,
            cost_origin,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        self.calculator.config()
    }

    pub fn inputs(&self) -> &InputAggregate {
        &self.inputs
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> Step {
        self.state.current_step
    }

    /// Validation of the current step against the current inputs.
    pub fn validation(&self) -> StepValidation {
        validate_step(self.state.current_step, &self.inputs)
    }

    /// Advances one step if the current step is valid.
    ///
    /// # Errors
    ///
    /// * [`WizardError::AtTerminalStep`] when already at the summary.
    /// * [`WizardError::Invalid`] with every failing field otherwise.
    pub fn next(&mut self) -> Result<Step, WizardError> {
        let current = self.state.current_step;
        let Some(target) = current.next() else {
            return Err(WizardError::AtTerminalStep);
        };

        let validation = self.validation();
        if !validation.valid {
            warn!(step = current.title(), %validation, "navigation blocked");
            return Err(WizardError::Invalid {
                step: current,
                validation,
            });
        }

        // Earlier steps may have been edited since they were completed.
        if target.is_terminal() {
            let validation = validate_all(&self.inputs);
            if !validation.valid {
                let step = self.first_invalid_step().unwrap_or(current);
                warn!(step = step.title(), %validation, "summary blocked");
                return Err(WizardError::Invalid { step, validation });
            }
        }

        self.state.completed_steps.insert(current);
        self.state.current_step = target;
        debug!(from = current.title(), to = target.title(), "advanced");

        if target.is_terminal() {
            let result = self.calculator.compute(&self.inputs);
            info!(
                currency = %self.inputs.currency,
                hours_saved_per_year = %result.hours_saved_per_year,
                annual_savings = %result.annual_savings_amount,
                payback = %result.payback,
                "estimate complete"
            );
        }

        Ok(target)
    }

    /// Returns to the previous step, keeping every entered value.
    ///
    /// # Errors
    ///
    /// [`WizardError::AtFirstStep`] at the first step.
    pub fn back(&mut self) -> Result<Step, WizardError> {
        let current = self.state.current_step;
        let target = current.previous().ok_or(WizardError::AtFirstStep)?;

        self.state.current_step = target;
        debug!(from = current.title(), to = target.title(), "went back");
        Ok(target)
    }

    /// KPIs for the current inputs, available only at the summary.
    pub fn result(&self) -> Option<KpiResult> {
        self.state
            .current_step
            .is_terminal()
            .then(|| self.calculator.compute(&self.inputs))
    }

    pub fn summary(&self) -> Option<SummaryView> {
        self.result()
            .map(|r| SummaryView::from_result(&r, self.inputs.currency))
    }

    // ─── mutations ──────────────────────────────────────────────────────────

    pub fn set_team_size(
        &mut self,
        team_size: Decimal,
    ) -> Result<StepValidation, WizardError> {
        self.mutate(|inputs| inputs.team_size = team_size)
    }

    pub fn set_avg_salary(
        &mut self,
        avg_salary: Decimal,
    ) -> Result<StepValidation, WizardError> {
        let validation = self.mutate(|inputs| inputs.avg_salary = avg_salary)?;
        self.salary_origin = Amount {
            currency: self.inputs.currency,
            value: avg_salary,
        };
        Ok(validation)
    }

    pub fn set_hours_per_week(
        &mut self,
        hours: Decimal,
    ) -> Result<StepValidation, WizardError> {
        self.mutate(|inputs| inputs.hours_per_week = hours)
    }

    pub fn set_adoption_rate(
        &mut self,
        rate: Decimal,
    ) -> Result<StepValidation, WizardError> {
        self.mutate(|inputs| inputs.adoption_rate = rate)
    }

    pub fn set_confidence_discount(
        &mut self,
        discount: Decimal,
    ) -> Result<StepValidation, WizardError> {
        self.mutate(|inputs| inputs.confidence_discount = discount)
    }

    /// Selects `preset` and re-applies its defaults, even if already selected.
    pub fn select_preset(
        &mut self,
        preset: Preset,
    ) -> Result<StepValidation, WizardError> {
        self.mutate(|inputs| inputs.apply_preset(preset))
    }

    /// Adds `priority` to the selection, or removes it if present.
    pub fn toggle_priority(
        &mut self,
        priority: Priority,
    ) -> Result<StepValidation, WizardError> {
        self.mutate(|inputs| {
            if !inputs.selected_priorities.remove(&priority) {
                inputs.selected_priorities.insert(priority);
            }
        })
    }

    pub fn set_priorities(
        &mut self,
        priorities: BTreeSet<Priority>,
    ) -> Result<StepValidation, WizardError> {
        self.mutate(|inputs| inputs.selected_priorities = priorities)
    }

    /// Switches the active currency.
    ///
    /// Without exchange rates the monetary values are re-labelled as-is.
    /// With rates for both currencies, the salary and the training cost are
    /// converted from the values originally entered, so switching back
    /// restores them exactly.
    pub fn set_currency(
        &mut self,
        currency: Currency,
    ) -> Result<StepValidation, WizardError> {
        self.ensure_editable()?;
        let from = self.inputs.currency;
        let rates = &self.calculator.config().exchange_rates;

        let converted = if rates.is_empty() {
            None
        } else {
            let salary = rates.convert(
                self.salary_origin.value,
                self.salary_origin.currency,
                currency,
            );
            let cost = rates.convert(self.cost_origin.value, self.cost_origin.currency, currency);
            if salary.is_none() || cost.is_none() {
                warn!(%from, to = %currency, "no exchange rate; re-labelling only");
            }
            salary.zip(cost)
        };

        match converted {
            Some((salary, cost)) => {
                let mut config = self.calculator.config().clone();
                config.training_cost_value = cost;
                self.calculator = RoiCalculator::new(config);
                self.inputs.avg_salary = salary;
                debug!(%from, to = %currency, "converted monetary inputs");
            }
            None => {
                self.salary_origin = Amount {
                    currency,
                    value: self.inputs.avg_salary,
                };
                self.cost_origin = Amount {
                    currency,
                    value: self.calculator.config().training_cost_value,
                };
            }
        }

        self.inputs.currency = currency;
        Ok(self.validation())
    }

    fn ensure_editable(&self) -> Result<(), WizardError> {
        if self.state.current_step.is_terminal() {
            return Err(WizardError::ReadOnly);
        }
        Ok(())
    }

    fn mutate(
        &mut self,
        edit: impl FnOnce(&mut InputAggregate),
    ) -> Result<StepValidation, WizardError> {
        self.ensure_editable()?;
        edit(&mut self.inputs);
        self.revoke_invalid_steps();
        Ok(self.validation())
    }

    fn first_invalid_step(&self) -> Option<Step> {
        Step::all()
            .iter()
            .copied()
            .find(|step| !validate_step(*step, &self.inputs).valid)
    }

    /// Un-completes the first step that no longer validates and every step
    /// after it.
    fn revoke_invalid_steps(&mut self) {
        if let Some(invalid) = self.first_invalid_step() {
            let before = self.state.completed_steps.len();
            self.state.completed_steps.retain(|step| *step < invalid);
            if self.state.completed_steps.len() != before {
                debug!(step = invalid.title(), "completed steps revoked");
            }
        }
    }
}
