//! stitchy-core library.
//!
//! Core engine for the stitchy crochet project tracker: the
//! project/component/round data model, the instruction-to-stitch-count
//! parser, the abbreviation dictionary and display transform, the pure
//! command reducer, slot-based persistence with backup recovery, and
//! resume-point detection.
//!
//! # Conventions
//!
//! - **Errors**: the public contracts of this crate do not throw. The
//!   parser falls back to the previous count, the reducer no-ops on
//!   unknown ids, and the persistence layer recovers to a backup slot,
//!   an in-memory backend, or an empty collection. Internal fallible
//!   helpers use typed errors and log via `tracing`.
//! - **Logging**: `tracing` macros (`warn!`, `info!`, `debug!`).

pub mod config;
pub mod dictionary;
pub mod model;
pub mod parse;
pub mod persist;
pub mod resume;
pub mod store;
pub mod transform;

pub use config::DisplayPrefs;
pub use dictionary::Dictionary;
pub use model::{Component, Project, Round};
pub use persist::Storage;
pub use resume::{ResumePoint, find_resume_point};
pub use store::{Command, reduce};
