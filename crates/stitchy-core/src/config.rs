use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// User display preferences, persisted alongside the project data.
///
/// `show_full_text` selects whether instructions render expanded
/// ("single crochet") or abbreviated ("sc"). Stored instruction text is
/// always canonical abbreviated form; this only affects rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPrefs {
    #[serde(default)]
    pub show_full_text: bool,
}

/// Resolve the data directory, in priority order:
/// 1. `STITCHY_DIR` environment variable
/// 2. the platform data dir (`~/.local/share/stitchy` on Linux)
/// 3. `.stitchy` under the current directory
#[must_use]
pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = env::var("STITCHY_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::data_dir().map_or_else(|| PathBuf::from(".stitchy"), |base| base.join("stitchy"))
}
