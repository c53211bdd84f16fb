pub mod config;
pub mod logging;
pub mod report;
pub mod scenario_loader;
pub mod session;
pub mod utils;

pub use session::{Session, SessionOutcome, run_session};
