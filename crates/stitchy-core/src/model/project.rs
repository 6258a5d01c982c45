use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Component;
use super::epoch;

/// A crochet project: the root aggregate of the entity tree.
///
/// `id` is an opaque unique string and immutable after creation.
/// `default_hook` and `default_color` seed new components; `updated`
/// and `last_activity_at` are refreshed by every command that touches
/// this project or its descendants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub default_hook: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_color: Option<String>,
    #[serde(default = "epoch")]
    pub created: DateTime<Utc>,
    #[serde(default = "epoch")]
    pub updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub components: Vec<Component>,
}

impl Project {
    /// Create a fresh project with no components.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        default_hook: impl Into<String>,
        default_color: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            default_hook: default_hook.into(),
            default_color,
            created: now,
            updated: now,
            last_activity_at: Some(now),
            components: Vec::new(),
        }
    }

    /// Refresh the activity timestamps. Called by the reducer for every
    /// command that touches this project or anything under it; this is
    /// the sole signal resume detection relies on.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated = now;
        self.last_activity_at = Some(now);
    }

    /// Look up a component by id.
    #[must_use]
    pub fn component(&self, component_id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == component_id)
    }

    /// Total number of rounds across all components.
    #[must_use]
    pub fn round_count(&self) -> usize {
        self.components.iter().map(|c| c.rounds.len()).sum()
    }
}
