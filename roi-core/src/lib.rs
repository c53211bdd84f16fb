pub mod calculations;
pub mod models;
pub mod validation;
pub mod wizard;

pub use calculations::RoiCalculator;
pub use models::*;
pub use validation::{Field, FieldError, StepValidation, validate_all, validate_step};
pub use wizard::{Step, SummaryView, Wizard, WizardError, WizardState};
