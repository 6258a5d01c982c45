//! `sy resume` — where to pick the work back up.

use std::io::Write;
use clap::Args;
use serde::Serialize;
use stitchy_core::persist::Storage;
use stitchy_core::resume::{ResumePoint, find_resume_point};

use crate::output::{OutputMode, render};

#[derive(Args, Debug)]
pub struct ResumeArgs {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResumeOutput {
    active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    component: Option<String>,
    #[serde(flatten)]
    point: Option<ResumePoint>,
}

pub fn run_resume(
    _args: &ResumeArgs,
    output: OutputMode,
    storage: &Storage,
) -> anyhow::Result<()> {
    let projects = storage.load();
    let point = find_resume_point(&projects);

    let result = match &point {
        Some(point) => {
            let project = projects.iter().find(|p| p.id == point.project_id);
            ResumeOutput {
                active: true,
                project: project.map(|p| p.name.clone()),
                component: project
                    .and_then(|p| p.component(&point.component_id))
                    .map(|c| c.name.clone()),
                point: Some(point.clone()),
            }
        }
        None => ResumeOutput {
            active: false,
            project: None,
            component: None,
            point: None,
        },
    };

    render(output, &result, |r, w| {
        if !r.active {
            return writeln!(w, "Nothing in progress. Start with `sy create <name>`.");
        }
        let project = r.project.as_deref().unwrap_or("?");
        let component = r.component.as_deref().unwrap_or("?");
        let round = r.point.as_ref().map_or(0, |p| p.current_round);
        if round > 0 {
            writeln!(w, "Resume '{project}' at {component}, round {round}")
        } else {
            writeln!(w, "Resume '{project}' at {component}")
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn inactive_payload_is_minimal() {
        let result = ResumeOutput {
            active: false,
            project: None,
            component: None,
            point: None,
        };
        let value = serde_json::to_value(&result).expect("serialize");
        assert_eq!(value, serde_json::json!({ "active": false }));
    }

    #[test]
    fn active_payload_flattens_the_point() {
        let result = ResumeOutput {
            active: true,
            project: Some("Bunny".into()),
            component: Some("Head".into()),
            point: Some(ResumePoint {
                project_id: "p1".into(),
                component_id: "c1".into(),
                current_round: 3,
                last_activity: chrono::DateTime::UNIX_EPOCH,
            }),
        };
        let value = serde_json::to_value(&result).expect("serialize");
        assert_eq!(value["active"], Value::Bool(true));
        assert_eq!(value["projectId"], "p1");
        assert_eq!(value["currentRound"], 3);
    }

    #[test]
    fn empty_storage_reports_inactive() {
        let storage = Storage::in_memory();
        assert!(run_resume(&ResumeArgs {}, OutputMode::Text, &storage).is_ok());
    }
}
