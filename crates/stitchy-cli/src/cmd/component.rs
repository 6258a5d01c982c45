//! `sy component` — manage the pieces of a project.

use std::io::Write;
use clap::{Args, Subcommand};
use serde::Serialize;
use stitchy_core::model::Component;
use stitchy_core::persist::Storage;
use stitchy_core::store::Command;

use super::{apply, hint_reference_values, new_id, resolve_component, resolve_project};
use crate::output::{CliError, OutputMode, render, render_error, render_success};

#[derive(Subcommand, Debug)]
pub enum ComponentCommand {
    /// Add a component to a project.
    Add(AddArgs),
    /// Edit a component's name, quantity, color, or hook.
    Edit(EditArgs),
    /// Remove a component and its rounds.
    Rm(RmArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Project id or name.
    pub project: String,

    /// Component name (e.g. "Head", "Arm").
    pub name: String,

    /// How many of this piece the pattern needs.
    #[arg(long, default_value_t = 1)]
    pub quantity: u32,

    /// Yarn color; defaults to the project's default color.
    #[arg(long)]
    pub color: Option<String>,

    /// Hook size; defaults to the project's default hook.
    #[arg(long)]
    pub hook: Option<String>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Project id or name.
    pub project: String,

    /// Component id or name.
    pub component: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub quantity: Option<u32>,

    #[arg(long)]
    pub color: Option<String>,

    #[arg(long)]
    pub hook: Option<String>,
}

#[derive(Args, Debug)]
pub struct RmArgs {
    /// Project id or name.
    pub project: String,

    /// Component id or name.
    pub component: String,
}

#[derive(Debug, Serialize)]
struct AddOutput {
    id: String,
    name: String,
    quantity: u32,
}

pub fn run(command: &ComponentCommand, output: OutputMode, storage: &mut Storage) -> anyhow::Result<()> {
    match command {
        ComponentCommand::Add(args) => run_add(args, output, storage),
        ComponentCommand::Edit(args) => run_edit(args, output, storage),
        ComponentCommand::Rm(args) => run_rm(args, output, storage),
    }
}

fn run_add(args: &AddArgs, output: OutputMode, storage: &mut Storage) -> anyhow::Result<()> {
    let name = args.name.trim();
    if name.is_empty() {
        render_error(
            output,
            &CliError::with_details(
                "component name must not be empty",
                "pass a name, e.g. `sy component add Bunny Head`",
                "empty_name",
            ),
        )?;
        anyhow::bail!("component name must not be empty");
    }

    let projects = storage.load();
    let project = match resolve_project(&projects, &args.project) {
        Ok(project) => project,
        Err(err) => {
            render_error(output, &err)?;
            anyhow::bail!("{}", err.message);
        }
    };

    hint_reference_values(args.color.as_deref(), args.hook.as_deref());
    let component = Component::new(
        new_id(),
        name,
        args.quantity,
        args.color
            .clone()
            .or_else(|| project.default_color.clone())
            .unwrap_or_default(),
        args.hook
            .clone()
            .unwrap_or_else(|| project.default_hook.clone()),
    );
    let result = AddOutput {
        id: component.id.clone(),
        name: component.name.clone(),
        quantity: component.quantity,
    };
    let command = Command::AddComponent {
        project_id: project.id.clone(),
        component,
    };
    apply(storage, command);

    render(output, &result, |r, w| {
        writeln!(w, "✓ Added component '{}' (x{})", r.name, r.quantity)
    })
}

fn run_edit(args: &EditArgs, output: OutputMode, storage: &mut Storage) -> anyhow::Result<()> {
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

    hint_reference_values(args.color.as_deref(), args.hook.as_deref());
    let command = Command::UpdateComponent {
        project_id: project.id.clone(),
        component_id: component.id.clone(),
        name: args.name.clone().unwrap_or_else(|| component.name.clone()),
        quantity: args.quantity.unwrap_or(component.quantity),
        color: args.color.clone().unwrap_or_else(|| component.color.clone()),
        hook: args.hook.clone().unwrap_or_else(|| component.hook.clone()),
    };
    let name = args.name.clone().unwrap_or_else(|| component.name.clone());
    apply(storage, command);

    render_success(output, &format!("Updated component '{name}'"))
}

fn run_rm(args: &RmArgs, output: OutputMode, storage: &mut Storage) -> anyhow::Result<()> {
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

    let name = component.name.clone();
    let command = Command::DeleteComponent {
        project_id: project.id.clone(),
        component_id: component.id.clone(),
    };
    apply(storage, command);

    render_success(output, &format!("Removed component '{name}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::create::{CreateArgs, run_create};

    fn storage_with_bunny() -> Storage {
        let mut storage = Storage::in_memory();
        run_create(
            &CreateArgs {
                name: "Bunny".into(),
                hook: "3.5mm (E/4)".into(),
                color: Some("White".into()),
                component: None,
            },
            OutputMode::Text,
            &mut storage,
        )
        .expect("create");
        storage
    }

    #[test]
    fn add_inherits_project_defaults() {
        let mut storage = storage_with_bunny();
        run_add(
            &AddArgs {
                project: "Bunny".into(),
                name: "Head".into(),
                quantity: 1,
                color: None,
                hook: None,
            },
            OutputMode::Text,
            &mut storage,
        )
        .expect("add");

        let projects = storage.load();
        let head = &projects[0].components[0];
        assert_eq!(head.color, "White");
        assert_eq!(head.hook, "3.5mm (E/4)");
    }

    #[test]
    fn edit_merges_unspecified_fields() {
        let mut storage = storage_with_bunny();
        run_add(
            &AddArgs {
                project: "Bunny".into(),
                name: "Arm".into(),
                quantity: 2,
                color: None,
                hook: None,
            },
            OutputMode::Text,
            &mut storage,
        )
        .expect("add");

        run_edit(
            &EditArgs {
                project: "Bunny".into(),
                component: "Arm".into(),
                name: None,
                quantity: Some(4),
                color: Some("Pink".into()),
                hook: None,
            },
            OutputMode::Text,
            &mut storage,
        )
        .expect("edit");

        let projects = storage.load();
        let arm = &projects[0].components[0];
        assert_eq!(arm.name, "Arm");
        assert_eq!(arm.quantity, 4);
        assert_eq!(arm.color, "Pink");
        assert_eq!(arm.hook, "3.5mm (E/4)");
    }

    #[test]
    fn rm_cascades() {
        let mut storage = storage_with_bunny();
        run_add(
            &AddArgs {
                project: "Bunny".into(),
                name: "Head".into(),
                quantity: 1,
                color: None,
                hook: None,
            },
            OutputMode::Text,
            &mut storage,
        )
        .expect("add");

        run_rm(
            &RmArgs {
                project: "Bunny".into(),
                component: "Head".into(),
            },
            OutputMode::Text,
            &mut storage,
        )
        .expect("rm");
        assert!(storage.load()[0].components.is_empty());
    }
}
