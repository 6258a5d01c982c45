//! `sy progress` — completion and working-position tracking.

use std::io::Write;
use clap::{Args, Subcommand};
use serde::Serialize;
use stitchy_core::persist::Storage;
use stitchy_core::store::Command;

use super::{apply, resolve_component, resolve_project};
use crate::output::{OutputMode, render, render_error};

#[derive(Subcommand, Debug)]
pub enum ProgressCommand {
    /// Mark one more piece of a component finished.
    Done(TargetArgs),
    /// Take back the last finished piece.
    Undo(TargetArgs),
    /// Set the finished-piece count explicitly.
    Set(SetArgs),
    /// Set which round is currently being worked (0 = not started).
    Round(RoundArgs),
}

#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Project id or name.
    pub project: String,

    /// Component id or name.
    pub component: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Project id or name.
    pub project: String,

    /// Component id or name.
    pub component: String,

    /// Finished-piece count; clamped to the component's quantity.
    pub count: u32,
}

#[derive(Args, Debug)]
pub struct RoundArgs {
    /// Project id or name.
    pub project: String,

    /// Component id or name.
    pub component: String,

    /// 1-based round number being worked, or 0 for not started.
    pub number: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressOutput {
    component: String,
    completed_count: u32,
    quantity: u32,
    current_round: usize,
}

pub fn run(command: &ProgressCommand, output: OutputMode, storage: &mut Storage) -> anyhow::Result<()> {
    let (project_key, component_key) = match command {
        ProgressCommand::Done(args) | ProgressCommand::Undo(args) => {
            (&args.project, &args.component)
        }
        ProgressCommand::Set(args) => (&args.project, &args.component),
        ProgressCommand::Round(args) => (&args.project, &args.component),
    };

    let projects = storage.load();
    let located = resolve_project(&projects, project_key)
        .and_then(|project| Ok((project, resolve_component(project, component_key)?)));
    let (project, component) = match located {
        Ok(found) => found,
        Err(err) => {
            render_error(output, &err)?;
            anyhow::bail!("{}", err.message);
        }
    };

    let project_id = project.id.clone();
    let component_id = component.id.clone();
    let store_command = match command {
        ProgressCommand::Done(_) => Command::IncrementComponentCompletion {
            project_id,
            component_id,
        },
        ProgressCommand::Undo(_) => Command::DecrementComponentCompletion {
            project_id,
            component_id,
        },
        ProgressCommand::Set(args) => Command::SetComponentCompletion {
            project_id,
            component_id,
            completed_count: args.count,
        },
        ProgressCommand::Round(args) => Command::UpdateCurrentRound {
            project_id,
            component_id,
            current_round: args.number,
        },
    };

    let component_id = component.id.clone();
    let next = apply(storage, store_command);
    let updated = next
        .iter()
        .find(|p| p.id == project.id)
        .and_then(|p| p.component(&component_id));
    let Some(updated) = updated else {
        anyhow::bail!("component vanished during update");
    };

    let result = ProgressOutput {
        component: updated.name.clone(),
        completed_count: updated.completed_count,
        quantity: updated.quantity,
        current_round: updated.current_round,
    };
    render(output, &result, |r, w| {
        writeln!(
            w,
            "✓ {}: {}/{} made, working round {}",
            r.component, r.completed_count, r.quantity, r.current_round
        )
    })
}
