//! "Pick up where you left off" detection.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::Project;

/// Where work should resume: the most recently active project, and
/// within it the component being actively worked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumePoint {
    pub project_id: String,
    pub component_id: String,
    pub current_round: usize,
    pub last_activity: DateTime<Utc>,
}

/// Single linear scan for the project with the latest `last_activity_at`.
///
/// Within that project, prefer a component mid-round (`current_round >
/// 0`), else its first component. `None` when the collection is empty,
/// no project has activity recorded, or the winning project has no
/// components.
#[must_use]
pub fn find_resume_point(projects: &[Project]) -> Option<ResumePoint> {
    let (project, last_activity) = projects
        .iter()
        .filter_map(|project| project.last_activity_at.map(|at| (project, at)))
        .max_by_key(|(_, at)| *at)?;

    let component = project
        .components
        .iter()
        .find(|component| component.current_round > 0)
        .or_else(|| project.components.first())?;

    Some(ResumePoint {
        project_id: project.id.clone(),
        component_id: component.id.clone(),
        current_round: component.current_round,
        last_activity,
    })
}
