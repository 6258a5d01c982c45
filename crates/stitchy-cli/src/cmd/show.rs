//! `sy show` — full detail for one project.
//!
//! Human output honors the persisted `showFullText` preference when
//! printing round instructions; JSON always carries the canonical
//! abbreviated form.

use std::io::Write;
use clap::Args;
use serde::Serialize;
use stitchy_core::model::Project;
use stitchy_core::persist::Storage;
use stitchy_core::transform::display_text;

use super::resolve_project;
use crate::output::{OutputMode, pretty_kv, pretty_rule, render, render_error};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Project id or name.
    pub project: String,
}

#[derive(Debug, Serialize)]
struct ShowOutput {
    #[serde(flatten)]
    project: Project,
    #[serde(skip)]
    show_full_text: bool,
}

pub fn run_show(args: &ShowArgs, output: OutputMode, storage: &Storage) -> anyhow::Result<()> {
    let projects = storage.load();
    let project = match resolve_project(&projects, &args.project) {
        Ok(project) => project.clone(),
        Err(err) => {
            render_error(output, &err)?;
            anyhow::bail!("{}", err.message);
        }
    };
    let result = ShowOutput {
        project,
        show_full_text: storage.load_prefs().show_full_text,
    };

    render(output, &result, |r, w| {
        let project = &r.project;
        writeln!(w, "{}", project.name)?;
        pretty_rule(w)?;
        pretty_kv(w, "id", &project.id)?;
        pretty_kv(w, "hook", &project.default_hook)?;
        if let Some(color) = &project.default_color {
            pretty_kv(w, "color", color)?;
        }
        if let Some(at) = project.last_activity_at {
            pretty_kv(w, "last activity", at.to_rfc3339())?;
        }
        for component in &project.components {
            writeln!(w)?;
            writeln!(
                w,
                "  {} ({}/{} made, {} rounds)",
                component.name,
                component.completed_count,
                component.quantity,
                component.rounds.len()
            )?;
            for round in &component.rounds {
                let marker = if component.current_round > 0
                    && round.round_number as usize == component.current_round
                {
                    "▸"
                } else {
                    " "
                };
                writeln!(
                    w,
                    "  {} R{}: {} ({} sts)",
                    marker,
                    round.round_number,
                    display_text(&round.instruction, r.show_full_text),
                    round.stitch_count
                )?;
            }
        }
        Ok(())
    })
}
