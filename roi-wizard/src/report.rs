//! Plain-text rendering of batch scenario results.

use std::io::Write;

use crate::scenario_loader::{ScenarioOutcome, ScenarioReport};

/// Writes one block per scenario: its summary, or every failing field.
pub fn write_reports<W: Write>(
    out: &mut W,
    reports: &[ScenarioReport],
) -> std::io::Result<()> {
    for report in reports {
        writeln!(out, "== {} ==", report.name)?;
        match &report.outcome {
            ScenarioOutcome::Estimated { summary, .. } => write!(out, "{summary}")?,
            ScenarioOutcome::Rejected(validation) => {
                for reason in &validation.reasons {
                    writeln!(out, "  ! {reason}")?;
                }
            }
        }
        writeln!(out)?;
    }

    let rejected = reports
        .iter()
        .filter(|r| matches!(r.outcome, ScenarioOutcome::Rejected(_)))
        .count();
    writeln!(
        out,
        "{} scenario(s), {} estimated, {} rejected",
        reports.len(),
        reports.len() - rejected,
        rejected
    )
}
