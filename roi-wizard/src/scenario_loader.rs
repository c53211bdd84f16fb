//! CSV loader for batches of ROI scenarios.
//!
//! Each row describes one complete set of wizard inputs. Rows are validated
//! with every step's rules at once and, when valid, run through the engine.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name).
//!
//! | Column                | Required | Type    | Notes |
//! |-----------------------|----------|---------|-------|
//! | `name`                | yes      | string  | Free text label |
//! | `team_size`           | yes      | decimal | Whole number of people |
//! | `avg_salary`          | yes      | decimal | In the row's currency |
//! | `currency`            | yes      | string  | `EUR`, `USD`, `GBP` or `AUD` |
//! | `preset`              | yes      | string  | `low`, `average` or `aggressive` |
//! | `hours_per_week`      | no       | decimal | Empty keeps the preset default |
//! | `adoption_rate`       | no       | decimal | Empty keeps the preset default |
//! | `confidence_discount` | no       | decimal | Empty keeps the preset default |
//! | `priorities`          | yes      | string  | `;`-separated, e.g. `time;retention` |
//!
//! ### Example
//!
//! ```csv
//! name,team_size,avg_salary,currency,preset,hours_per_week,adoption_rate,priorities
//! Support desk,50,60000,EUR,average,5,0.6,time
//! Engineering,120,95000,USD,aggressive,,,time;quality;retention
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use roi_core::{
    Currency, EngineConfig, InputAggregate, KpiResult, Preset, Priority, RoiCalculator,
    StepValidation, SummaryView, validate_all,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    team_size: Decimal,
    avg_salary: Decimal,
    currency: String,
    preset: String,
    hours_per_week: Option<Decimal>,
    adoption_rate: Option<Decimal>,
    confidence_discount: Option<Decimal>,
    priorities: String,
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Errors that can occur while loading scenario rows.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioLoaderError {
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// `row` is 1-based (header = row 0).
    #[error("row {row}: {message}")]
    InvalidValue { row: usize, message: String },
}

/// One named set of inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub inputs: InputAggregate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioOutcome {
    Estimated {
        result: KpiResult,
        summary: SummaryView,
    },
    Rejected(StepValidation),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    pub name: String,
    pub outcome: ScenarioOutcome,
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn invalid(
    row: usize,
    message: impl ToString,
) -> ScenarioLoaderError {
    ScenarioLoaderError::InvalidValue {
        row,
        message: message.to_string(),
    }
}

fn parse_priorities(
    cell: &str,
    row: usize,
) -> Result<BTreeSet<Priority>, ScenarioLoaderError> {
    cell.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Priority>().map_err(|e| invalid(row, e)))
        .collect()
}

/// Convert a single CSV row into a [`Scenario`].
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<Scenario, ScenarioLoaderError> {
    let currency: Currency = row.currency.parse().map_err(|e| invalid(row_number, e))?;
    let preset: Preset = row.preset.parse().map_err(|e| invalid(row_number, e))?;

    let mut inputs = InputAggregate::new(currency);
    inputs.apply_preset(preset);
    inputs.team_size = row.team_size;
    inputs.avg_salary = row.avg_salary;
    if let Some(hours) = row.hours_per_week {
        inputs.hours_per_week = hours;
    }
    if let Some(rate) = row.adoption_rate {
        inputs.adoption_rate = rate;
    }
    if let Some(discount) = row.confidence_discount {
        inputs.confidence_discount = discount;
    }
    inputs.selected_priorities = parse_priorities(&row.priorities, row_number)?;

    Ok(Scenario {
        name: row.name,
        inputs,
    })
}

/// Parse CSV text and return the scenarios in file order.
///
/// # Errors
///
/// * [`ScenarioLoaderError::Parse`] if the CSV is structurally invalid or a
///   number cannot be read.
/// * [`ScenarioLoaderError::InvalidValue`] for an unknown currency, preset or
///   priority.
pub fn load_from_str(input: &str) -> Result<Vec<Scenario>, ScenarioLoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1))
        .collect()
}

/// Read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<Scenario>, ScenarioLoaderError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ScenarioLoaderError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&contents)
}

/// Validates and computes every scenario with the same engine settings.
///
/// Invalid scenarios are reported, not dropped.
pub fn evaluate(
    scenarios: &[Scenario],
    config: &EngineConfig,
) -> Vec<ScenarioReport> {
    let calculator = RoiCalculator::new(config.clone());

    scenarios
        .iter()
        .map(|scenario| {
            let validation = validate_all(&scenario.inputs);
            let outcome = if validation.valid {
                let result = calculator.compute(&scenario.inputs);
                let summary = SummaryView::from_result(&result, scenario.inputs.currency);
                debug!(name = %scenario.name, savings = %summary.annual_savings, "scenario estimated");
                ScenarioOutcome::Estimated { result, summary }
            } else {
                warn!(name = %scenario.name, %validation, "scenario rejected");
                ScenarioOutcome::Rejected(validation)
            };

            ScenarioReport {
                name: scenario.name.clone(),
                outcome,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
