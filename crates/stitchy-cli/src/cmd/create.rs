//! `sy create` — start a new project.

use std::io::Write;
use chrono::Utc;
use clap::Args;
use serde::Serialize;
use stitchy_core::model::{Component, Project};
use stitchy_core::persist::Storage;
use stitchy_core::store::Command;

use super::{apply, hint_reference_values, new_id};
use crate::output::{CliError, OutputMode, render, render_error};

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Project name.
    pub name: String,

    /// Default hook size for the project's components.
    #[arg(long, default_value = "3.5mm (E/4)")]
    pub hook: String,

    /// Default yarn color.
    #[arg(long)]
    pub color: Option<String>,

    /// Seed the project with one component of this name.
    #[arg(long)]
    pub component: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateOutput {
    id: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    component_id: Option<String>,
}

pub fn run_create(
    args: &CreateArgs,
    output: OutputMode,
    storage: &mut Storage,
) -> anyhow::Result<()> {
    let name = args.name.trim();
    if name.is_empty() {
        render_error(
            output,
            &CliError::with_details(
                "project name must not be empty",
                "pass a name, e.g. `sy create Bunny`",
                "empty_name",
            ),
        )?;
        anyhow::bail!("project name must not be empty");
    }

    hint_reference_values(args.color.as_deref(), Some(&args.hook));
    let mut project = Project::new(new_id(), name, &args.hook, args.color.clone(), Utc::now());
    let component_id = args.component.as_ref().map(|component_name| {
        let id = new_id();
        project.components.push(Component::new(
            &id,
            component_name,
            1,
            project.default_color.clone().unwrap_or_default(),
            project.default_hook.clone(),
        ));
        id
    });

    let result = CreateOutput {
        id: project.id.clone(),
        name: project.name.clone(),
        component_id,
    };
    apply(storage, Command::CreateProject { project });

    render(output, &result, |r, w| {
        writeln!(w, "✓ Created project '{}' ({})", r.name, r.id)
    })
}
