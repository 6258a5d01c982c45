//! `sy update` — edit a project's fields.

use std::io::Write;
use clap::Args;
use serde::Serialize;
use stitchy_core::persist::Storage;
use stitchy_core::store::Command;

use super::{apply, hint_reference_values, resolve_project};
use crate::output::{CliError, OutputMode, render, render_error};

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Project id or name.
    pub project: String,

    /// New project name.
    #[arg(long)]
    pub name: Option<String>,

    /// New default hook size.
    #[arg(long)]
    pub hook: Option<String>,

    /// New default yarn color.
    #[arg(long, conflicts_with = "clear_color")]
    pub color: Option<String>,

    /// Remove the default yarn color.
    #[arg(long)]
    pub clear_color: bool,
}

#[derive(Debug, Serialize)]
struct UpdateOutput {
    id: String,
    name: String,
}

pub fn run_update(
    args: &UpdateArgs,
    output: OutputMode,
    storage: &mut Storage,
) -> anyhow::Result<()> {
    let projects = storage.load();
    let project = match resolve_project(&projects, &args.project) {
        Ok(project) => project,
        Err(err) => {
            render_error(output, &err)?;
            anyhow::bail!("{}", err.message);
        }
    };

    let name = args.name.clone().unwrap_or_else(|| project.name.clone());
    if name.trim().is_empty() {
        render_error(
            output,
            &CliError::with_details(
                "project name must not be empty",
                "pass a non-empty --name",
                "empty_name",
            ),
        )?;
        anyhow::bail!("project name must not be empty");
    }

    hint_reference_values(args.color.as_deref(), args.hook.as_deref());
    let command = Command::UpdateProject {
        project_id: project.id.clone(),
        name: name.trim().to_string(),
        default_hook: args
            .hook
            .clone()
            .unwrap_or_else(|| project.default_hook.clone()),
        default_color: if args.clear_color {
            None
        } else {
            args.color.clone().or_else(|| project.default_color.clone())
        },
    };
    let result = UpdateOutput {
        id: project.id.clone(),
        name: name.trim().to_string(),
    };
    apply(storage, command);

    render(output, &result, |r, w| {
        writeln!(w, "✓ Updated project '{}'", r.name)
    })
}
