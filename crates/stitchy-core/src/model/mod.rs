//! The persisted entity tree: projects own components, components own
//! rounds. Serde renames keep the durable JSON layout camelCase.

mod component;
mod project;
mod round;

pub use component::Component;
pub use project::Project;
pub use round::Round;

use chrono::{DateTime, Utc};

/// Fallback timestamp for entries persisted before timestamps existed.
/// Deterministic on purpose: loading must not depend on the wall clock.
pub(crate) fn epoch() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}
