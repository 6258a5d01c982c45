//! `sy list` — overview of all projects.

use std::io::Write;
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use stitchy_core::model::Project;
use stitchy_core::persist::Storage;

use crate::output::{OutputMode, pretty_rule, render_mode};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Sort by most recent activity instead of creation order.
    #[arg(long)]
    pub recent: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectRow {
    id: String,
    name: String,
    components: usize,
    rounds: usize,
    completed_components: u32,
    total_components: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_activity_at: Option<DateTime<Utc>>,
}

impl ProjectRow {
    fn from_project(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            components: project.components.len(),
            rounds: project.round_count(),
            completed_components: project.components.iter().map(|c| c.completed_count).sum(),
            total_components: project.components.iter().map(|c| c.quantity).sum(),
            last_activity_at: project.last_activity_at,
        }
    }
}

pub fn run_list(args: &ListArgs, output: OutputMode, storage: &Storage) -> anyhow::Result<()> {
    let mut projects = storage.load();
    if args.recent {
        projects.sort_by_key(|p| std::cmp::Reverse(p.last_activity_at));
    }
    let rows: Vec<ProjectRow> = projects.iter().map(ProjectRow::from_project).collect();

    render_mode(
        output,
        &rows,
        |rows, w| {
            for row in rows {
                writeln!(
                    w,
                    "{}\t{}\t{} components\t{} rounds\t{}",
                    row.name,
                    progress_label(row),
                    row.components,
                    row.rounds,
                    row.id
                )?;
            }
            Ok(())
        },
        |rows, w| {
            if rows.is_empty() {
                writeln!(w, "No projects yet. Start one with `sy create <name>`.")?;
                return Ok(());
            }
            writeln!(
                w,
                "{:<20} {:<10} {:<12} {:<8} ID",
                "NAME", "PIECES", "COMPONENTS", "ROUNDS"
            )?;
            pretty_rule(w)?;
            for row in rows {
                writeln!(
                    w,
                    "{:<20} {:<10} {:<12} {:<8} {}",
                    row.name,
                    progress_label(row),
                    row.components,
                    row.rounds,
                    row.id
                )?;
            }
            Ok(())
        },
    )
}

fn progress_label(row: &ProjectRow) -> String {
    format!("{}/{}", row.completed_components, row.total_components)
}
