use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::model::{Component, Project};

/// Every mutation the store understands.
///
/// The wire form is a tagged envelope, `{"type": "ADD_ROUND",
/// "payload": {...}}`, so commands can be logged, replayed, and
/// inspected as plain JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Command {
    /// Replace the whole collection. Used once at startup.
    LoadProjects { projects: Vec<Project> },
    /// Append a project; the reducer stamps its timestamps. A project
    /// may arrive pre-seeded with components.
    CreateProject { project: Project },
    /// Replace a project's mutable fields.
    UpdateProject {
        project_id: String,
        name: String,
        default_hook: String,
        default_color: Option<String>,
    },
    DeleteProject { project_id: String },
    AddComponent {
        project_id: String,
        component: Component,
    },
    /// Wholesale replacement of a component's descriptive fields.
    UpdateComponent {
        project_id: String,
        component_id: String,
        name: String,
        quantity: u32,
        color: String,
        hook: String,
    },
    DeleteComponent {
        project_id: String,
        component_id: String,
    },
    /// Append a round; the reducer assigns the next round number. The
    /// stitch count arrives pre-derived (or user-overridden).
    AddRound {
        project_id: String,
        component_id: String,
        round_id: String,
        instruction: String,
        stitch_count: u32,
    },
    UpdateRound {
        project_id: String,
        component_id: String,
        round_id: String,
        instruction: String,
        stitch_count: u32,
    },
    /// Remove a round and renumber the remainder sequentially.
    DeleteRound {
        project_id: String,
        component_id: String,
        round_id: String,
    },
    IncrementComponentCompletion {
        project_id: String,
        component_id: String,
    },
    DecrementComponentCompletion {
        project_id: String,
        component_id: String,
    },
    SetComponentCompletion {
        project_id: String,
        component_id: String,
        completed_count: u32,
    },
    /// Move the component's working position. Bounds are the caller's
    /// responsibility; the store does not re-validate against the
    /// rounds length.
    UpdateCurrentRound {
        project_id: String,
        component_id: String,
        current_round: usize,
    },
}

impl Command {
    /// Decode a command envelope. Unknown types and malformed payloads
    /// are dropped with a warning rather than failing the caller.
    #[must_use]
    pub fn from_json(value: Value) -> Option<Self> {
        match serde_json::from_value(value) {
            Ok(command) => Some(command),
            Err(err) => {
                warn!(%err, "ignoring unrecognized command envelope");
                None
            }
        }
    }
}
