//! CLI command handlers.
//!
//! Each submodule owns one subcommand: a clap `Args` struct plus a
//! `run_*` function. Handlers validate input at the boundary, build a
//! [`Command`], and funnel every mutation through [`apply`].

pub mod component;
pub mod create;
pub mod delete;
pub mod list;
pub mod parse;
pub mod progress;
pub mod resume;
pub mod round;
pub mod settings;
pub mod show;
pub mod update;

use chrono::Utc;
use stitchy_core::dictionary::{HOOK_SIZES, YARN_COLORS};
use stitchy_core::model::{Component, Project, Round};
use stitchy_core::persist::Storage;
use stitchy_core::store::{Command, reduce};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::output::CliError;

/// Load, reduce against the wall clock, persist, and return the new
/// tree. A failed save is logged and never reverts the in-memory
/// result; the session keeps going with what the reducer produced.
pub fn apply(storage: &mut Storage, command: Command) -> Vec<Project> {
    let state = storage.load();
    let next = reduce(&state, command, Utc::now());
    if !storage.save(&next) {
        warn!("save failed, continuing with unsaved state for this session");
    }
    next
}

/// Fresh opaque entity id.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Colors and hook sizes are free text; the reference lists only feed
/// a debug-level hint when a value falls outside them.
pub fn hint_reference_values(color: Option<&str>, hook: Option<&str>) {
    if let Some(color) = color {
        if !YARN_COLORS
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(color))
        {
            debug!(color, "color is not in the yarn palette");
        }
    }
    if let Some(hook) = hook {
        if !HOOK_SIZES.contains(&hook) {
            debug!(hook, "hook size is not in the standard list");
        }
    }
}

/// Resolve a project by exact id, then unique case-insensitive name,
/// then unique id prefix.
pub fn resolve_project<'a>(projects: &'a [Project], key: &str) -> Result<&'a Project, CliError> {
    if let Some(project) = projects.iter().find(|p| p.id == key) {
        return Ok(project);
    }
    resolve_unique(projects.iter(), key, "project", |p: &'a Project| {
        (&p.name, &p.id)
    })
}

/// Resolve a component within a project by id, name, or id prefix.
pub fn resolve_component<'a>(
    project: &'a Project,
    key: &str,
) -> Result<&'a Component, CliError> {
    if let Some(component) = project.components.iter().find(|c| c.id == key) {
        return Ok(component);
    }
    resolve_unique(project.components.iter(), key, "component", |c: &'a Component| {
        (&c.name, &c.id)
    })
}

/// Resolve a round within a component by 1-based number or id.
pub fn resolve_round<'a>(component: &'a Component, key: &str) -> Result<&'a Round, CliError> {
    if let Ok(number) = key.parse::<u32>() {
        if let Some(round) = component.rounds.iter().find(|r| r.round_number == number) {
            return Ok(round);
        }
    }
    component
        .rounds
        .iter()
        .find(|r| r.id == key)
        .ok_or_else(|| {
            CliError::with_details(
                format!("no round '{key}' in component '{}'", component.name),
                "pass a round number shown by `sy show`",
                "unknown_round",
            )
        })
}

fn resolve_unique<'a, T, I>(
    items: I,
    key: &str,
    noun: &str,
    fields: impl Fn(T) -> (&'a String, &'a String),
) -> Result<T, CliError>
where
    T: Copy,
    I: Iterator<Item = T>,
{
    let mut by_name = Vec::new();
    let mut by_prefix = Vec::new();
    for item in items {
        let (name, id) = fields(item);
        if name.eq_ignore_ascii_case(key) {
            by_name.push(item);
        } else if id.starts_with(key) {
            by_prefix.push(item);
        }
    }
    match (by_name.as_slice(), by_prefix.as_slice()) {
        ([only], _) => Ok(*only),
        ([], [only]) => Ok(*only),
        ([], []) => Err(CliError::with_details(
            format!("no {noun} matches '{key}'"),
            format!("run `sy list` to see every {noun} and its id"),
            format!("unknown_{noun}"),
        )),
        _ => Err(CliError::with_details(
            format!("'{key}' is ambiguous"),
            format!("use the full {noun} id"),
            format!("ambiguous_{noun}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn projects() -> Vec<Project> {
        let mut bunny = Project::new("aaa-111", "Bunny", "3.5mm (E/4)", None, Utc::now());
        bunny
            .components
            .push(Component::new("ccc-111", "Head", 1, "White", "3.5mm (E/4)"));
        bunny
            .components
            .push(Component::new("ccc-222", "Arm", 2, "White", "3.5mm (E/4)"));
        let whale = Project::new("bbb-222", "Whale", "4.0mm (G/6)", None, Utc::now());
        vec![bunny, whale]
    }

    #[test]
    fn resolves_by_exact_id_name_and_prefix() {
        let projects = projects();
        assert_eq!(resolve_project(&projects, "aaa-111").unwrap().name, "Bunny");
        assert_eq!(resolve_project(&projects, "whale").unwrap().id, "bbb-222");
        assert_eq!(resolve_project(&projects, "bbb").unwrap().name, "Whale");
    }

    #[test]
    fn unknown_and_ambiguous_keys_are_errors() {
        let projects = projects();
        let missing = resolve_project(&projects, "ghost").unwrap_err();
        assert_eq!(missing.error_code.as_deref(), Some("unknown_project"));

        let mut clashing = projects;
        clashing[1].id = "aaa-222".into();
        let ambiguous = resolve_project(&clashing, "aaa").unwrap_err();
        assert_eq!(ambiguous.error_code.as_deref(), Some("ambiguous_project"));
    }

    #[test]
    fn resolves_rounds_by_number_or_id() {
        let mut component = Component::new("c1", "Head", 1, "", "");
        component.rounds.push(Round::new("r1", 1, "6 sc in MR", 6));
        component.rounds.push(Round::new("r2", 2, "sc around", 6));
        assert_eq!(resolve_round(&component, "2").unwrap().id, "r2");
        assert_eq!(resolve_round(&component, "r1").unwrap().round_number, 1);
        assert!(resolve_round(&component, "9").is_err());
    }
}
