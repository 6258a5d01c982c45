use chrono::{DateTime, Utc};
use tracing::debug;

use super::Command;
use crate::model::{Component, Project, Round};

/// Apply `command` to `state`, returning the next tree.
///
/// Pure: the input slice is never mutated, and the same `(state,
/// command, now)` triple always yields a structurally equal result.
/// Commands naming an id that does not resolve leave the tree exactly
/// as it was, timestamps included.
#[must_use]
pub fn reduce(state: &[Project], command: Command, now: DateTime<Utc>) -> Vec<Project> {
    let mut projects = state.to_vec();
    match command {
        Command::LoadProjects { projects: loaded } => return loaded,
        Command::CreateProject { mut project } => {
            if projects.iter().any(|p| p.id == project.id) {
                debug!(project_id = %project.id, "create ignored, id already present");
                return projects;
            }
            project.created = now;
            project.touch(now);
            projects.push(project);
        }
        Command::UpdateProject {
            project_id,
            name,
            default_hook,
            default_color,
        } => in_project(&mut projects, &project_id, now, |project| {
            project.name = name;
            project.default_hook = default_hook;
            project.default_color = default_color;
            true
        }),
        Command::DeleteProject { project_id } => {
            projects.retain(|p| p.id != project_id);
        }
        Command::AddComponent {
            project_id,
            mut component,
        } => in_project(&mut projects, &project_id, now, |project| {
            component.completed_count = 0;
            component.current_round = 0;
            project.components.push(component);
            true
        }),
        Command::UpdateComponent {
            project_id,
            component_id,
            name,
            quantity,
            color,
            hook,
        } => in_component(&mut projects, &project_id, &component_id, now, |component| {
            component.name = name;
            component.quantity = quantity.max(1);
            component.color = color;
            component.hook = hook;
            component.clamp_completion();
            true
        }),
        Command::DeleteComponent {
            project_id,
            component_id,
        } => in_project(&mut projects, &project_id, now, |project| {
            let before = project.components.len();
            project.components.retain(|c| c.id != component_id);
            project.components.len() != before
        }),
        Command::AddRound {
            project_id,
            component_id,
            round_id,
            instruction,
            stitch_count,
        } => in_component(&mut projects, &project_id, &component_id, now, |component| {
            let number =
                u32::try_from(component.rounds.len()).unwrap_or(u32::MAX).saturating_add(1);
            component
                .rounds
                .push(Round::new(round_id, number, instruction, stitch_count));
            true
        }),
        Command::UpdateRound {
            project_id,
            component_id,
            round_id,
            instruction,
            stitch_count,
        } => in_component(&mut projects, &project_id, &component_id, now, |component| {
            let Some(round) = component.rounds.iter_mut().find(|r| r.id == round_id) else {
                debug!(%round_id, "command targeted unknown round");
                return false;
            };
            round.instruction = instruction;
            round.stitch_count = stitch_count;
            true
        }),
        Command::DeleteRound {
            project_id,
            component_id,
            round_id,
        } => in_component(&mut projects, &project_id, &component_id, now, |component| {
            let before = component.rounds.len();
            component.rounds.retain(|r| r.id != round_id);
            if component.rounds.len() == before {
                debug!(%round_id, "command targeted unknown round");
                return false;
            }
            component.renumber_rounds();
            true
        }),
        Command::IncrementComponentCompletion {
            project_id,
            component_id,
        } => in_component(&mut projects, &project_id, &component_id, now, |component| {
            component.completed_count =
                component.completed_count.saturating_add(1).min(component.quantity);
            true
        }),
        Command::DecrementComponentCompletion {
            project_id,
            component_id,
        } => in_component(&mut projects, &project_id, &component_id, now, |component| {
            component.completed_count = component.completed_count.saturating_sub(1);
            true
        }),
        Command::SetComponentCompletion {
            project_id,
            component_id,
            completed_count,
        } => in_component(&mut projects, &project_id, &component_id, now, |component| {
            component.completed_count = completed_count.min(component.quantity);
            true
        }),
        Command::UpdateCurrentRound {
            project_id,
            component_id,
            current_round,
        } => in_component(&mut projects, &project_id, &component_id, now, |component| {
            component.current_round = current_round;
            true
        }),
    }
    projects
}

/// Run `mutate` against the named project, touching its activity
/// timestamps only when `mutate` reports a change.
fn in_project<F>(projects: &mut [Project], project_id: &str, now: DateTime<Utc>, mutate: F)
where
    F: FnOnce(&mut Project) -> bool,
{
    let Some(project) = projects.iter_mut().find(|p| p.id == project_id) else {
        debug!(%project_id, "command targeted unknown project");
        return;
    };
    if mutate(project) {
        project.touch(now);
    }
}

/// Like [`in_project`], one level down.
fn in_component<F>(
    projects: &mut [Project],
    project_id: &str,
    component_id: &str,
    now: DateTime<Utc>,
    mutate: F,
) where
    F: FnOnce(&mut Component) -> bool,
{
    in_project(projects, project_id, now, |project| {
        let Some(component) = project.components.iter_mut().find(|c| c.id == component_id)
        else {
            debug!(%component_id, "command targeted unknown component");
            return false;
        };
        mutate(component)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn t0() -> DateTime<Utc> {
        DateTime::UNIX_EPOCH + Duration::days(20_000)
    }

    fn later() -> DateTime<Utc> {
        t0() + Duration::hours(1)
    }

    fn bunny() -> Project {
        let mut project = Project::new("p1", "Bunny", "3.5mm (E/4)", Some("White".into()), t0());
        let mut head = Component::new("c1", "Head", 1, "White", "3.5mm (E/4)");
        head.rounds = vec![
            Round::new("r1", 1, "6 sc in MR", 6),
            Round::new("r2", 2, "inc in each st", 12),
            Round::new("r3", 3, "sc around", 12),
        ];
        project.components = vec![head, Component::new("c2", "Arm", 2, "Pink", "3.0mm (D/3)")];
        project
    }

    #[test]
    fn reduce_is_pure_and_deterministic() {
        let state = vec![bunny()];
        let command = Command::IncrementComponentCompletion {
            project_id: "p1".into(),
            component_id: "c2".into(),
        };
        let once = reduce(&state, command.clone(), later());
        let twice = reduce(&state, command, later());
        assert_eq!(once, twice);
        // Input untouched.
        assert_eq!(state[0].components[1].completed_count, 0);
    }

    #[test]
    fn load_replaces_collection_preserving_order() {
        let state = vec![bunny()];
        let mut replacement = vec![bunny(), bunny()];
        replacement[1].id = "p2".into();
        let next = reduce(
            &state,
            Command::LoadProjects {
                projects: replacement.clone(),
            },
            later(),
        );
        assert_eq!(next, replacement);
    }

    #[test]
    fn create_stamps_timestamps_and_appends() {
        let stale = Project::new("p2", "Whale", "4.0mm (G/6)", None, t0());
        let next = reduce(
            &[bunny()],
            Command::CreateProject { project: stale },
            later(),
        );
        assert_eq!(next.len(), 2);
        assert_eq!(next[1].created, later());
        assert_eq!(next[1].last_activity_at, Some(later()));
    }

    #[test]
    fn create_with_duplicate_id_is_a_no_op() {
        let state = vec![bunny()];
        let dupe = Project::new("p1", "Impostor", "4.0mm (G/6)", None, later());
        let next = reduce(&state, Command::CreateProject { project: dupe }, later());
        assert_eq!(next, state);
    }

    #[test]
    fn update_project_replaces_fields_and_touches() {
        let next = reduce(
            &[bunny()],
            Command::UpdateProject {
                project_id: "p1".into(),
                name: "Bunny v2".into(),
                default_hook: "2.5mm (C/2)".into(),
                default_color: None,
            },
            later(),
        );
        assert_eq!(next[0].name, "Bunny v2");
        assert_eq!(next[0].default_color, None);
        assert_eq!(next[0].last_activity_at, Some(later()));
        assert_eq!(next[0].created, t0());
    }

    #[test]
    fn unknown_project_id_leaves_tree_unchanged() {
        let state = vec![bunny()];
        let next = reduce(
            &state,
            Command::UpdateProject {
                project_id: "ghost".into(),
                name: "x".into(),
                default_hook: String::new(),
                default_color: None,
            },
            later(),
        );
        assert_eq!(next, state);
    }

    #[test]
    fn unknown_component_id_leaves_timestamps_unchanged() {
        let state = vec![bunny()];
        let next = reduce(
            &state,
            Command::IncrementComponentCompletion {
                project_id: "p1".into(),
                component_id: "ghost".into(),
            },
            later(),
        );
        assert_eq!(next, state);
        assert_eq!(next[0].last_activity_at, Some(t0()));
    }

    #[test]
    fn delete_project_cascades() {
        let next = reduce(
            &[bunny()],
            Command::DeleteProject {
                project_id: "p1".into(),
            },
            later(),
        );
        assert!(next.is_empty());
    }

    #[test]
    fn add_component_resets_progress_fields() {
        let mut leg = Component::new("c3", "Leg", 2, "Pink", "3.0mm (D/3)");
        leg.completed_count = 2;
        leg.current_round = 5;
        let next = reduce(
            &[bunny()],
            Command::AddComponent {
                project_id: "p1".into(),
                component: leg,
            },
            later(),
        );
        let added = &next[0].components[2];
        assert_eq!(added.completed_count, 0);
        assert_eq!(added.current_round, 0);
        assert_eq!(next[0].last_activity_at, Some(later()));
    }

    #[test]
    fn update_component_reclamps_completion() {
        let mut state = vec![bunny()];
        state[0].components[1].completed_count = 2;
        let next = reduce(
            &state,
            Command::UpdateComponent {
                project_id: "p1".into(),
                component_id: "c2".into(),
                name: "Arm".into(),
                quantity: 1,
                color: "Rose".into(),
                hook: "3.0mm (D/3)".into(),
            },
            later(),
        );
        assert_eq!(next[0].components[1].quantity, 1);
        assert_eq!(next[0].components[1].completed_count, 1);
        assert_eq!(next[0].components[1].color, "Rose");
    }

    #[test]
    fn delete_component_cascades_rounds() {
        let next = reduce(
            &[bunny()],
            Command::DeleteComponent {
                project_id: "p1".into(),
                component_id: "c1".into(),
            },
            later(),
        );
        assert_eq!(next[0].components.len(), 1);
        assert_eq!(next[0].components[0].id, "c2");
        assert_eq!(next[0].round_count(), 0);
    }

    #[test]
    fn add_round_assigns_next_number() {
        let next = reduce(
            &[bunny()],
            Command::AddRound {
                project_id: "p1".into(),
                component_id: "c1".into(),
                round_id: "r4".into(),
                instruction: "(sc, inc) x 6".into(),
                stitch_count: 18,
            },
            later(),
        );
        let rounds = &next[0].components[0].rounds;
        assert_eq!(rounds.len(), 4);
        assert_eq!(rounds[3].round_number, 4);
        assert_eq!(rounds[3].stitch_count, 18);
    }

    #[test]
    fn update_round_keeps_number() {
        let next = reduce(
            &[bunny()],
            Command::UpdateRound {
                project_id: "p1".into(),
                component_id: "c1".into(),
                round_id: "r2".into(),
                instruction: "(sc, inc) x 3".into(),
                stitch_count: 9,
            },
            later(),
        );
        let round = &next[0].components[0].rounds[1];
        assert_eq!(round.round_number, 2);
        assert_eq!(round.instruction, "(sc, inc) x 3");
        assert_eq!(round.stitch_count, 9);
    }

    #[test]
    fn delete_round_renumbers_remainder() {
        let next = reduce(
            &[bunny()],
            Command::DeleteRound {
                project_id: "p1".into(),
                component_id: "c1".into(),
                round_id: "r2".into(),
            },
            later(),
        );
        let rounds = &next[0].components[0].rounds;
        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[0].id, "r1");
        assert_eq!(rounds[0].round_number, 1);
        assert_eq!(rounds[1].id, "r3");
        assert_eq!(rounds[1].round_number, 2);
    }

    #[test]
    fn delete_unknown_round_leaves_tree_unchanged() {
        let state = vec![bunny()];
        let next = reduce(
            &state,
            Command::DeleteRound {
                project_id: "p1".into(),
                component_id: "c1".into(),
                round_id: "ghost".into(),
            },
            later(),
        );
        assert_eq!(next, state);
    }

    #[test]
    fn completion_clamps_at_quantity_and_zero() {
        let mut state = vec![bunny()];
        state[0].components[1].completed_count = 2; // quantity 2

        let next = reduce(
            &state,
            Command::IncrementComponentCompletion {
                project_id: "p1".into(),
                component_id: "c2".into(),
            },
            later(),
        );
        assert_eq!(next[0].components[1].completed_count, 2);

        let next = reduce(
            &next,
            Command::SetComponentCompletion {
                project_id: "p1".into(),
                component_id: "c2".into(),
                completed_count: 99,
            },
            later(),
        );
        assert_eq!(next[0].components[1].completed_count, 2);

        let next = reduce(
            &next,
            Command::SetComponentCompletion {
                project_id: "p1".into(),
                component_id: "c2".into(),
                completed_count: 0,
            },
            later(),
        );
        let next = reduce(
            &next,
            Command::DecrementComponentCompletion {
                project_id: "p1".into(),
                component_id: "c2".into(),
            },
            later(),
        );
        assert_eq!(next[0].components[1].completed_count, 0);
    }

    #[test]
    fn update_current_round_is_not_bounds_checked() {
        let next = reduce(
            &[bunny()],
            Command::UpdateCurrentRound {
                project_id: "p1".into(),
                component_id: "c1".into(),
                current_round: 40,
            },
            later(),
        );
        assert_eq!(next[0].components[0].current_round, 40);
        assert_eq!(next[0].last_activity_at, Some(later()));
    }
}
