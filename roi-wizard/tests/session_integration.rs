//! End-to-end runs of the interactive session over scripted input.

use pretty_assertions::assert_eq;
use roi_core::{Currency, EngineConfig, Step, Wizard};
use roi_wizard::{SessionOutcome, config::parse_config, run_session};

fn run(
    config: EngineConfig,
    script: &str,
) -> (SessionOutcome, Wizard, String) {
    let mut wizard = Wizard::new(config).unwrap();
    let mut out = Vec::new();
    let outcome = run_session(&mut wizard, script.as_bytes(), &mut out).unwrap();
    (outcome, wizard, String::from_utf8(out).unwrap())
}

/// Keeps the currency, enters team and usage figures, keeps the preset and
/// discount, selects one priority and finishes at the summary.
const REFERENCE_SCRIPT: &str = "\n50\n60000\n5\n0.6\n\n\ntime\n\n\n";

#[test]
fn reference_scenario_completes_with_summary() {
    let (outcome, wizard, out) = run(EngineConfig::default(), REFERENCE_SCRIPT);

    let SessionOutcome::Completed(view) = outcome else {
        panic!("session should complete, output:\n{out}");
    };
    assert_eq!(view.currency, Currency::Eur);
    assert_eq!(view.hours_saved_per_year, "7,800");
    assert_eq!(view.annual_savings, "€225,000");
    assert_eq!(view.payback, "1.07 months");
    assert_eq!(wizard.current_step(), Step::Summary);
    assert!(out.contains("== 5/5 Summary =="));
}

#[test]
fn configured_currency_labels_the_summary() {
    let config = parse_config(r#"default_currency = "GBP""#).unwrap();

    let (outcome, _, _) = run(config, REFERENCE_SCRIPT);

    match outcome {
        SessionOutcome::Completed(view) => assert_eq!(view.annual_savings, "£225,000"),
        SessionOutcome::Quit => panic!("session should complete"),
    }
}

#[test]
fn back_from_summary_allows_revision() {
    // Reach the summary, go back to priorities, add retention, then finish.
    let script = "\n50\n60000\n5\n0.6\n\n\ntime\n\nback\nretention\n\n\n";

    let (outcome, wizard, _) = run(EngineConfig::default(), script);

    assert!(matches!(outcome, SessionOutcome::Completed(_)));
    assert_eq!(wizard.inputs().selected_priorities.len(), 2);
    assert!(wizard.result().is_some());
}

#[test]
fn quitting_midway_produces_no_estimate() {
    let (outcome, wizard, _) = run(EngineConfig::default(), "\n50\n60000\nquit\n");

    assert_eq!(outcome, SessionOutcome::Quit);
    assert_eq!(wizard.current_step(), Step::Usage);
    assert!(wizard.result().is_none());
}
