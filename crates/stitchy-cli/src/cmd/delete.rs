//! `sy delete` — remove a project and everything under it.

use clap::Args;
use stitchy_core::persist::Storage;
use stitchy_core::store::Command;

use super::{apply, resolve_project};
use crate::output::{OutputMode, render_error, render_success};

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Project id or name.
    pub project: String,
}

pub fn run_delete(
    args: &DeleteArgs,
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

    let name = project.name.clone();
    let command = Command::DeleteProject {
        project_id: project.id.clone(),
    };
    apply(storage, command);

    render_success(output, &format!("Deleted project '{name}'"))
}
