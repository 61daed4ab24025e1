//! Simulate command - apply scripted roster operations
//!
//! Runs the roster model directly (no selection modes), which makes it handy
//! for checking how the recycle rule plays out for a given fight order.
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_starting_roster(), apply_steps(), report_results()
//! - Level 3: apply_step()
//! - Level 4: step parsing, formatting utilities

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Args;

use matchmakin_core::{PlayerId, Roster, RosterView, SelectionMode};

use crate::play::load_roster;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SimulateArgs {
    /// Seven starting names, one per line (default names when omitted)
    #[arg(long, value_name = "FILE")]
    pub names: Option<PathBuf>,

    /// Operation to apply, in order: fight:ID, delete:ID, rename:ID=NAME, undo, reset, new
    #[arg(long = "step", value_name = "STEP")]
    pub steps: Vec<Step>,

    /// Output the final roster as JSON
    #[arg(long)]
    pub json: bool,
}

/// One scripted roster operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Fight(PlayerId),
    Delete(PlayerId),
    Rename(PlayerId, String),
    Undo,
    Reset,
    NewGame,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
///
/// 1. Build the starting roster
/// 2. Apply every step in order (a rejected fight aborts)
/// 3. Print the final roster
pub fn run(args: SimulateArgs) -> Result<()> {
    let mut roster = load_starting_roster(&args)?;

    apply_steps(&mut roster, &args.steps)?;

    report_results(&roster, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_starting_roster(args: &SimulateArgs) -> Result<Roster> {
    match &args.names {
        Some(path) => load_roster(path),
        None => Ok(Roster::new()),
    }
}

fn apply_steps(roster: &mut Roster, steps: &[Step]) -> Result<()> {
    for (index, step) in steps.iter().enumerate() {
        apply_step(roster, step).with_context(|| format!("step {} ({}) failed", index + 1, step))?;
        tracing::info!(step = %step, opponents = ?roster.opponents(), history = ?roster.history(), "applied step");
    }
    Ok(())
}

fn report_results(roster: &Roster, json: bool) -> Result<()> {
    let view = RosterView::new(roster, SelectionMode::Normal);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", format_text(&view));
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn apply_step(roster: &mut Roster, step: &Step) -> Result<()> {
    match step {
        Step::Fight(id) => roster.fight(*id)?,
        Step::Delete(id) => {
            roster.delete_player(*id);
        }
        Step::Rename(id, name) => roster.rename(*id, name.clone()),
        Step::Undo => {
            roster.undo();
        }
        Step::Reset => roster.reset(),
        Step::NewGame => roster.new_game(),
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (op, arg) = match s.split_once(':') {
            Some((op, arg)) => (op, Some(arg)),
            None => (s, None),
        };

        let step = match (op, arg) {
            ("undo", None) => Step::Undo,
            ("reset", None) => Step::Reset,
            ("new", None) => Step::NewGame,
            ("fight", Some(arg)) => Step::Fight(parse_id(arg)?),
            ("delete", Some(arg)) => Step::Delete(parse_id(arg)?),
            ("rename", Some(arg)) => {
                let (id, name) = arg
                    .split_once('=')
                    .context("rename expects rename:ID=NAME")?;
                Step::Rename(parse_id(id)?, name.to_string())
            }
            _ => anyhow::bail!("unknown step '{s}'"),
        };
        Ok(step)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Fight(id) => write!(f, "fight:{id}"),
            Step::Delete(id) => write!(f, "delete:{id}"),
            Step::Rename(id, name) => write!(f, "rename:{id}={name}"),
            Step::Undo => write!(f, "undo"),
            Step::Reset => write!(f, "reset"),
            Step::NewGame => write!(f, "new"),
        }
    }
}

fn parse_id(raw: &str) -> Result<PlayerId> {
    let raw: u8 = raw
        .trim()
        .parse()
        .with_context(|| format!("invalid player id '{raw}'"))?;
    Ok(PlayerId::new(raw)?)
}

fn format_text(view: &RosterView) -> String {
    format!(
        "{}\n{}\nAlive: {}\n",
        view.opponents_line, view.history_line, view.alive
    )
}

// ============================================================================
// TESTS
// ============================================================================
