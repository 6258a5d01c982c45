//! `sy settings` — display preferences.

use std::io::Write;
use clap::{Subcommand, ValueEnum};
use serde::Serialize;
use stitchy_core::config::DisplayPrefs;
use stitchy_core::persist::Storage;

use crate::output::{OutputMode, render};

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Show or set whether instructions render as full stitch names.
    FullText {
        #[arg(value_enum, default_value_t = FullTextMode::Status)]
        mode: FullTextMode,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullTextMode {
    On,
    Off,
    Status,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SettingsOutput {
    show_full_text: bool,
}

pub fn run(command: &SettingsCommand, output: OutputMode, storage: &mut Storage) -> anyhow::Result<()> {
    let SettingsCommand::FullText { mode } = command;

    let prefs = match mode {
        FullTextMode::Status => storage.load_prefs(),
        FullTextMode::On | FullTextMode::Off => {
            let prefs = DisplayPrefs {
                show_full_text: *mode == FullTextMode::On,
            };
            storage.save_prefs(prefs);
            prefs
        }
    };

    let result = SettingsOutput {
        show_full_text: prefs.show_full_text,
    };
    render(output, &result, |r, w| {
        writeln!(
            w,
            "full-text display: {}",
            if r.show_full_text { "on" } else { "off" }
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_and_off_persist_the_preference() {
        let mut storage = Storage::in_memory();
        run(
            &SettingsCommand::FullText {
                mode: FullTextMode::On,
            },
            OutputMode::Text,
            &mut storage,
        )
        .expect("set on");
        assert!(storage.load_prefs().show_full_text);

        run(
            &SettingsCommand::FullText {
                mode: FullTextMode::Off,
            },
            OutputMode::Text,
            &mut storage,
        )
        .expect("set off");
        assert!(!storage.load_prefs().show_full_text);
    }

    #[test]
    fn status_does_not_change_the_preference() {
        let mut storage = Storage::in_memory();
        run(
            &SettingsCommand::FullText {
                mode: FullTextMode::Status,
            },
            OutputMode::Text,
            &mut storage,
        )
        .expect("status");
        assert!(!storage.load_prefs().show_full_text);
    }
}
