//! `sy round` — manage the rounds of a component.
//!
//! `add` and `edit` normalize the instruction into canonical
//! abbreviated form before storing it, and derive the stitch count via
//! the parser unless `--stitches` overrides it.

use std::io::Write;
use clap::{Args, Subcommand};
use serde::Serialize;
use stitchy_core::model::Component;
use stitchy_core::parse::{can_parse, derive_stitch_count};
use stitchy_core::persist::Storage;
use stitchy_core::store::Command;
use stitchy_core::transform::to_abbreviations;
use tracing::warn;

use super::{apply, new_id, resolve_component, resolve_project, resolve_round};
use crate::output::{OutputMode, render, render_error, render_success};

#[derive(Subcommand, Debug)]
pub enum RoundCommand {
    /// Append a round to a component.
    Add(AddArgs),
    /// Edit a round's instruction or stitch count.
    Edit(EditArgs),
    /// Remove a round; later rounds are renumbered.
    Rm(RmArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Project id or name.
    pub project: String,

    /// Component id or name.
    pub component: String,

    /// Crochet instruction, e.g. "6 sc in MR" or "(sc, inc) x 6".
    pub instruction: String,

    /// Explicit stitch count, overriding the derived one.
    #[arg(long)]
    pub stitches: Option<u32>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Project id or name.
    pub project: String,

    /// Component id or name.
    pub component: String,

    /// Round number or id.
    pub round: String,

    /// New instruction text.
    #[arg(long)]
    pub instruction: Option<String>,

    /// Explicit stitch count, overriding the derived one.
    #[arg(long)]
    pub stitches: Option<u32>,
}

#[derive(Args, Debug)]
pub struct RmArgs {
    /// Project id or name.
    pub project: String,

    /// Component id or name.
    pub component: String,

    /// Round number or id.
    pub round: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RoundOutput {
    round_number: u32,
    instruction: String,
    stitch_count: u32,
    derived: bool,
}

pub fn run(command: &RoundCommand, output: OutputMode, storage: &mut Storage) -> anyhow::Result<()> {
    match command {
        RoundCommand::Add(args) => run_add(args, output, storage),
        RoundCommand::Edit(args) => run_edit(args, output, storage),
        RoundCommand::Rm(args) => run_rm(args, output, storage),
    }
}

/// Stitch count for `instruction`, from the explicit override or the
/// parser seeded with `previous`.
fn stitch_count_for(instruction: &str, previous: u32, explicit: Option<u32>) -> (u32, bool) {
    if let Some(count) = explicit {
        return (count, false);
    }
    if !can_parse(instruction) {
        warn!(
            instruction,
            previous, "instruction not recognized, keeping previous stitch count"
        );
    }
    (derive_stitch_count(instruction, previous), true)
}

fn run_add(args: &AddArgs, output: OutputMode, storage: &mut Storage) -> anyhow::Result<()> {
    let projects = storage.load();
    let located = resolve_project(&projects, &args.project)
        .and_then(|project| Ok((project, resolve_component(project, &args.component)?)));
    let (project, component) = match located {
        Ok(found) => found,
        Err(err) => {
            render_error(output, &err)?;
            anyhow::bail!("{}", err.message);
        }
    };

    let instruction = to_abbreviations(args.instruction.trim());
    let (stitch_count, derived) =
        stitch_count_for(&instruction, component.last_stitch_count(), args.stitches);
    let result = RoundOutput {
        round_number: next_round_number(component),
        instruction: instruction.clone(),
        stitch_count,
        derived,
    };
    let command = Command::AddRound {
        project_id: project.id.clone(),
        component_id: component.id.clone(),
        round_id: new_id(),
        instruction,
        stitch_count,
    };
    apply(storage, command);

    render(output, &result, |r, w| {
        writeln!(
            w,
            "✓ R{}: {} ({} sts{})",
            r.round_number,
            r.instruction,
            r.stitch_count,
            if r.derived { ", derived" } else { "" }
        )
    })
}

fn run_edit(args: &EditArgs, output: OutputMode, storage: &mut Storage) -> anyhow::Result<()> {
    let projects = storage.load();
    let located = resolve_project(&projects, &args.project).and_then(|project| {
        let component = resolve_component(project, &args.component)?;
        let round = resolve_round(component, &args.round)?;
        Ok((project, component, round))
    });
    let (project, component, round) = match located {
        Ok(found) => found,
        Err(err) => {
            render_error(output, &err)?;
            anyhow::bail!("{}", err.message);
        }
    };

    let instruction = args
        .instruction
        .as_ref()
        .map_or_else(|| round.instruction.clone(), |text| to_abbreviations(text.trim()));
    // The count feeding the parser is the one before this round.
    let previous = round
        .round_number
        .checked_sub(2)
        .and_then(|index| component.rounds.get(index as usize))
        .map_or(0, |r| r.stitch_count);
    let (stitch_count, derived) = stitch_count_for(&instruction, previous, args.stitches);

    let result = RoundOutput {
        round_number: round.round_number,
        instruction: instruction.clone(),
        stitch_count,
        derived,
    };
    let command = Command::UpdateRound {
        project_id: project.id.clone(),
        component_id: component.id.clone(),
        round_id: round.id.clone(),
        instruction,
        stitch_count,
    };
    apply(storage, command);

    render(output, &result, |r, w| {
        writeln!(
            w,
            "✓ R{}: {} ({} sts{})",
            r.round_number,
            r.instruction,
            r.stitch_count,
            if r.derived { ", derived" } else { "" }
        )
    })
}

fn run_rm(args: &RmArgs, output: OutputMode, storage: &mut Storage) -> anyhow::Result<()> {
    let projects = storage.load();
    let located = resolve_project(&projects, &args.project).and_then(|project| {
        let component = resolve_component(project, &args.component)?;
        let round = resolve_round(component, &args.round)?;
        Ok((project, component, round))
    });
    let (project, component, round) = match located {
        Ok(found) => found,
        Err(err) => {
            render_error(output, &err)?;
            anyhow::bail!("{}", err.message);
        }
    };

    let number = round.round_number;
    let command = Command::DeleteRound {
        project_id: project.id.clone(),
        component_id: component.id.clone(),
        round_id: round.id.clone(),
    };
    apply(storage, command);

    render_success(output, &format!("Removed round {number}"))
}

fn next_round_number(component: &Component) -> u32 {
    u32::try_from(component.rounds.len()).unwrap_or(u32::MAX).saturating_add(1)
}
