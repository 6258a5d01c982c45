//! Durable storage for the project tree and display preferences.
//!
//! Writes are best-effort mirrors of in-memory state: the primary slot
//! is copied to a backup slot before each overwrite (one generation of
//! rollback), and loads validate entry-by-entry so one corrupt project
//! never takes out the rest. No operation here returns an error to the
//! caller; failures degrade to the backup slot, to an empty collection,
//! or to a volatile in-memory backend, with the details logged.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::DisplayPrefs;
use crate::model::Project;

const PROJECTS_SLOT: &str = "projects.json";
const BACKUP_SLOT: &str = "projects-backup.json";
const SETTINGS_SLOT: &str = "settings.json";

#[derive(Debug, Error)]
enum SlotError {
    #[error("slot unreadable: {0}")]
    Io(#[from] std::io::Error),
    #[error("slot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("slot is not a JSON array")]
    NotACollection,
}

#[derive(Debug)]
enum Backend {
    Disk { dir: PathBuf },
    Memory { projects: Vec<Project>, prefs: DisplayPrefs },
}

/// Handle to the persisted collection and preferences.
#[derive(Debug)]
pub struct Storage {
    backend: Backend,
}

impl Storage {
    /// Open storage rooted at `dir`, probing that the directory is
    /// actually writable. An unusable directory degrades to a volatile
    /// in-memory backend so the session keeps working.
    #[must_use]
    pub fn open(dir: PathBuf) -> Self {
        match probe_writable(&dir) {
            Ok(()) => Self {
                backend: Backend::Disk { dir },
            },
            Err(err) => {
                warn!(dir = %dir.display(), %err, "data dir unusable, using in-memory storage");
                Self::in_memory()
            }
        }
    }

    /// Volatile storage that forgets everything when dropped.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory {
                projects: Vec::new(),
                prefs: DisplayPrefs::default(),
            },
        }
    }

    /// The backing directory, when storage is on disk.
    #[must_use]
    pub fn dir(&self) -> Option<&Path> {
        match &self.backend {
            Backend::Disk { dir } => Some(dir),
            Backend::Memory { .. } => None,
        }
    }

    /// Load the project collection.
    ///
    /// Tries the primary slot, then the backup slot; a backup that
    /// loads where the primary did not is promoted back into the
    /// primary slot. Returns an empty collection when neither slot
    /// yields anything usable.
    #[must_use]
    pub fn load(&self) -> Vec<Project> {
        let dir = match &self.backend {
            Backend::Memory { projects, .. } => return projects.clone(),
            Backend::Disk { dir } => dir,
        };

        match read_collection(&dir.join(PROJECTS_SLOT)) {
            Ok(projects) => projects,
            Err(err) => {
                warn!(%err, "primary slot unusable, trying backup");
                match read_collection(&dir.join(BACKUP_SLOT)) {
                    Ok(projects) => {
                        promote_backup(dir, &projects);
                        projects
                    }
                    Err(err) => {
                        warn!(%err, "backup slot unusable, starting empty");
                        Vec::new()
                    }
                }
            }
        }
    }

    /// Persist the project collection, preserving the previous primary
    /// contents in the backup slot first. Returns whether the primary
    /// write landed.
    pub fn save(&mut self, projects: &[Project]) -> bool {
        match &mut self.backend {
            Backend::Memory { projects: held, .. } => {
                *held = projects.to_vec();
                true
            }
            Backend::Disk { dir } => {
                let primary = dir.join(PROJECTS_SLOT);
                if primary.exists() {
                    if let Err(err) = fs::copy(&primary, dir.join(BACKUP_SLOT)) {
                        warn!(%err, "could not refresh backup slot");
                    }
                }
                match write_json(&primary, projects) {
                    Ok(()) => true,
                    Err(err) => {
                        warn!(%err, "could not write primary slot");
                        false
                    }
                }
            }
        }
    }

    /// Load display preferences, defaulting on any failure.
    #[must_use]
    pub fn load_prefs(&self) -> DisplayPrefs {
        match &self.backend {
            Backend::Memory { prefs, .. } => *prefs,
            Backend::Disk { dir } => read_prefs(&dir.join(SETTINGS_SLOT)).unwrap_or_else(|err| {
                debug!(%err, "settings slot unusable, using defaults");
                DisplayPrefs::default()
            }),
        }
    }

    /// Persist display preferences. Returns whether the write landed.
    pub fn save_prefs(&mut self, prefs: DisplayPrefs) -> bool {
        match &mut self.backend {
            Backend::Memory { prefs: held, .. } => {
                *held = prefs;
                true
            }
            Backend::Disk { dir } => match write_json(&dir.join(SETTINGS_SLOT), &prefs) {
                Ok(()) => true,
                Err(err) => {
                    warn!(%err, "could not write settings slot");
                    false
                }
            },
        }
    }
}

fn probe_writable(dir: &Path) -> Result<(), std::io::Error> {
    fs::create_dir_all(dir)?;
    let probe = dir.join(".probe");
    fs::write(&probe, b"")?;
    fs::remove_file(&probe)
}

/// Read and validate one collection slot. Structurally-invalid entries
/// are dropped individually; only an unreadable or non-array slot fails
/// the whole read.
fn read_collection(path: &Path) -> Result<Vec<Project>, SlotError> {
    let text = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)?;
    let Value::Array(entries) = value else {
        return Err(SlotError::NotACollection);
    };

    let mut projects = Vec::with_capacity(entries.len());
    for entry in entries {
        if !is_valid_entry(&entry) {
            warn!(slot = %path.display(), "dropping structurally invalid project entry");
            continue;
        }
        match serde_json::from_value::<Project>(entry) {
            Ok(project) => projects.push(project),
            Err(err) => {
                warn!(slot = %path.display(), %err, "dropping undecodable project entry");
            }
        }
    }
    Ok(projects)
}

/// A usable entry is an object with a string `id`, string `name`, and
/// array `components`.
fn is_valid_entry(entry: &Value) -> bool {
    let Value::Object(map) = entry else {
        return false;
    };
    map.get("id").is_some_and(Value::is_string)
        && map.get("name").is_some_and(Value::is_string)
        && map.get("components").is_some_and(Value::is_array)
}

fn promote_backup(dir: &Path, projects: &[Project]) {
    match write_json(&dir.join(PROJECTS_SLOT), projects) {
        Ok(()) => debug!("promoted backup slot to primary"),
        Err(err) => warn!(%err, "could not promote backup slot"),
    }
}

fn read_prefs(path: &Path) -> Result<DisplayPrefs, SlotError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), SlotError> {
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text)?;
    Ok(())
}
