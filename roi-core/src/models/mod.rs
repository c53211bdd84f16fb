mod currency;
mod engine_config;
mod inputs;
mod kpi;
mod preset;
mod priority;

pub use currency::{
    Currency, ExchangeRates, ParseCurrencyError, format_grouped, format_money, round_to_units,
};
pub use engine_config::{EngineConfig, EngineConfigError, TrainingCostMode};
pub use inputs::InputAggregate;
pub use kpi::{KpiResult, Payback};
pub use preset::{ParsePresetError, Preset, PresetDefaults, apply_preset};
pub use priority::{NormalizedWeights, ParsePriorityError, Priority, select_priorities};
