//! Line-oriented presentation layer for the wizard.
//!
//! The session only renders state owned by [`Wizard`] and forwards edits to
//! it. At every prompt:
//!
//! * an empty line keeps the value shown in brackets,
//! * `back` returns to the previous step,
//! * `quit` (or end of input) abandons the estimate.

use std::io::{BufRead, Write};

use anyhow::Result;
use roi_core::{
    Currency, Preset, Priority, Step, StepValidation, SummaryView, Wizard, WizardError,
    format_money,
};
use tracing::debug;

use crate::utils::{fraction_display, parse_decimal, parse_fraction};

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed(SummaryView),
    Quit,
}

enum Reply {
    Keep,
    Text(String),
    Back,
    Quit,
}

enum Flow {
    /// Try to advance past the current step.
    Advance,
    Back,
    Quit,
    Finish(SummaryView),
}

type Apply<T> = fn(&mut Wizard, T) -> Result<StepValidation, WizardError>;

pub struct Session<'w, R, W> {
    wizard: &'w mut Wizard,
    input: R,
    out: W,
}

impl<'w, R: BufRead, W: Write> Session<'w, R, W> {
    pub fn new(
        wizard: &'w mut Wizard,
        input: R,
        out: W,
    ) -> Self {
        Self { wizard, input, out }
    }

    /// Drives the wizard until the user finishes at the summary or quits.
    pub fn run(mut self) -> Result<SessionOutcome> {
        loop {
            let step = self.wizard.current_step();
            writeln!(self.out, "\n== {step} ==")?;

            let flow = match step {
                Step::TeamAndCost => self.team_and_cost()?,
                Step::Usage => self.usage()?,
                Step::Assumptions => self.assumptions()?,
                Step::Priorities => self.priorities()?,
                Step::Summary => self.summary()?,
            };

            match flow {
                Flow::Advance => {
                    if let Err(err) = self.wizard.next() {
                        self.report(&err)?;
                    }
                }
                Flow::Back => {
                    if let Err(err) = self.wizard.back() {
                        writeln!(self.out, "  {err}")?;
                    }
                }
                Flow::Quit => {
                    debug!(step = step.title(), "session abandoned");
                    return Ok(SessionOutcome::Quit);
                }
                Flow::Finish(view) => return Ok(SessionOutcome::Completed(view)),
            }
        }
    }

    // ─── steps ──────────────────────────────────────────────────────────────

    fn team_and_cost(&mut self) -> Result<Flow> {
        let inputs = self.wizard.inputs().clone();

        if let Some(flow) = self.edit(
            "Currency (EUR, USD, GBP, AUD)",
            inputs.currency.code().to_string(),
            |s| s.parse::<Currency>().map_err(|e| e.to_string()),
            Wizard::set_currency,
        )? {
            return Ok(flow);
        }

        if let Some(flow) = self.edit(
            "Team size",
            inputs.team_size.to_string(),
            |s| parse_decimal(s).map_err(|e| e.to_string()),
            Wizard::set_team_size,
        )? {
            return Ok(flow);
        }

        let currency = self.wizard.inputs().currency;
        let salary = self.wizard.inputs().avg_salary;
        if let Some(flow) = self.edit(
            "Average annual salary",
            format_money(salary, currency),
            |s| parse_decimal(s).map_err(|e| e.to_string()),
            Wizard::set_avg_salary,
        )? {
            return Ok(flow);
        }

        Ok(Flow::Advance)
    }

    fn usage(&mut self) -> Result<Flow> {
        let inputs = self.wizard.inputs().clone();

        if let Some(flow) = self.edit(
            "Hours saved per person per week",
            inputs.hours_per_week.to_string(),
            |s| parse_decimal(s).map_err(|e| e.to_string()),
            Wizard::set_hours_per_week,
        )? {
            return Ok(flow);
        }

        if let Some(flow) = self.edit(
            "Adoption rate (0-1 or %)",
            fraction_display(inputs.adoption_rate),
            |s| parse_fraction(s).map_err(|e| e.to_string()),
            Wizard::set_adoption_rate,
        )? {
            return Ok(flow);
        }

        Ok(Flow::Advance)
    }

    fn assumptions(&mut self) -> Result<Flow> {
        let current = self
            .wizard
            .inputs()
            .preset
            .map_or_else(|| "none".to_string(), |p| p.label().to_string());
        writeln!(
            self.out,
            "  Choosing a preset resets hours, adoption and confidence to its defaults."
        )?;

        if let Some(flow) = self.edit(
            "Preset (low, average, aggressive)",
            current,
            |s| s.parse::<Preset>().map_err(|e| e.to_string()),
            Wizard::select_preset,
        )? {
            return Ok(flow);
        }

        let discount = self.wizard.inputs().confidence_discount;
        if let Some(flow) = self.edit(
            "Confidence discount (0-1 or %)",
            fraction_display(discount),
            |s| parse_fraction(s).map_err(|e| e.to_string()),
            Wizard::set_confidence_discount,
        )? {
            return Ok(flow);
        }

        Ok(Flow::Advance)
    }

    fn priorities(&mut self) -> Result<Flow> {
        loop {
            let selected = self.wizard.inputs().selected_priorities.clone();
            for priority in Priority::all() {
                let mark = if selected.contains(priority) { 'x' } else { ' ' };
                writeln!(self.out, "  [{mark}] {:<10} {}", priority.key(), priority.label())?;
            }

            let current = selected
                .iter()
                .map(Priority::key)
                .collect::<Vec<_>>()
                .join(", ");
            match self.ask("Toggle priorities (comma separated)", &current)? {
                Reply::Keep => return Ok(Flow::Advance),
                Reply::Back => return Ok(Flow::Back),
                Reply::Quit => return Ok(Flow::Quit),
                Reply::Text(text) => {
                    for name in text.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                        match name.parse::<Priority>() {
                            Ok(priority) => {
                                self.wizard.toggle_priority(priority)?;
                            }
                            Err(err) => writeln!(self.out, "  {err}")?,
                        }
                    }
                }
            }
        }
    }

    fn summary(&mut self) -> Result<Flow> {
        let Some(view) = self.wizard.summary() else {
            return Ok(Flow::Back);
        };
        write!(self.out, "{view}")?;

        match self.ask("Press enter to finish, or type back to revise", "done")? {
            Reply::Back => Ok(Flow::Back),
            Reply::Quit => Ok(Flow::Quit),
            Reply::Keep | Reply::Text(_) => Ok(Flow::Finish(view)),
        }
    }

    // ─── prompting ──────────────────────────────────────────────────────────

    fn ask(
        &mut self,
        prompt: &str,
        current: &str,
    ) -> Result<Reply> {
        write!(self.out, "{prompt} [{current}]: ")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(Reply::Quit);
        }

        let text = line.trim();
        Ok(match text.to_ascii_lowercase().as_str() {
            "" => Reply::Keep,
            "back" => Reply::Back,
            "quit" | "exit" => Reply::Quit,
            _ => Reply::Text(text.to_string()),
        })
    }

    /// Prompts for one field until it parses or is kept.
    ///
    /// Returns `Some(flow)` when the user navigated away instead.
    fn edit<T>(
        &mut self,
        prompt: &str,
        current: String,
        parse: impl Fn(&str) -> Result<T, String>,
        apply: Apply<T>,
    ) -> Result<Option<Flow>> {
        loop {
            match self.ask(prompt, &current)? {
                Reply::Keep => return Ok(None),
                Reply::Back => return Ok(Some(Flow::Back)),
                Reply::Quit => return Ok(Some(Flow::Quit)),
                Reply::Text(text) => match parse(&text) {
                    Ok(value) => {
                        apply(self.wizard, value)?;
                        return Ok(None);
                    }
                    Err(message) => writeln!(self.out, "  {message}")?,
                },
            }
        }
    }

    fn report(
        &mut self,
        err: &WizardError,
    ) -> Result<()> {
        match err {
            WizardError::Invalid { validation, .. } => {
                for reason in &validation.reasons {
                    writeln!(self.out, "  ! {reason}")?;
                }
            }
            other => writeln!(self.out, "  {other}")?,
        }
        Ok(())
    }
}

/// Runs a complete interactive session over `input` and `out`.
pub fn run_session<R: BufRead, W: Write>(
    wizard: &mut Wizard,
    input: R,
    out: W,
) -> Result<SessionOutcome> {
    Session::new(wizard, input, out).run()
}
