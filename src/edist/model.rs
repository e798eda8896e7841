//! # Data Model
//!
//! A Stickies note lives on disk as an RTFD bundle: a directory named
//! `<something>.rtfd` holding the note text in `TXT.rtf` next to any attached
//! images. edist only ever touches `TXT.rtf`.
//!
//! [`NoteBundle`] is a snapshot taken by one scan of the Stickies directory.
//! It is never mutated; the catalog is rebuilt from scratch on the next run.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use timeago::Formatter;

/// Extension that marks a directory as a note bundle.
pub const BUNDLE_EXT: &str = "rtfd";

/// The editable text resource inside every bundle.
pub const TEXT_RESOURCE: &str = "TXT.rtf";

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteBundle {
    path: PathBuf,
    display_name: String,
    last_modified: DateTime<Local>,
    text_resource_path: PathBuf,
}

impl NoteBundle {
    /// Builds a bundle from its directory. The text resource path is always
    /// composed from `path`, so it is a direct child of it.
    pub fn new(path: PathBuf, last_modified: DateTime<Local>) -> Self {
        let display_name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let text_resource_path = path.join(TEXT_RESOURCE);
        Self {
            path,
            display_name,
            last_modified,
            text_resource_path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn text_resource_path(&self) -> &Path {
        &self.text_resource_path
    }

    /// Second line of a list entry: absolute timestamp plus a relative hint.
    pub fn description(&self) -> String {
        format!(
            "{}  ({})",
            self.last_modified.format(TIMESTAMP_FORMAT),
            format_time_ago(self.last_modified, Local::now())
        )
    }

    /// Case-insensitive substring match against the display name.
    pub fn matches_filter(&self, term: &str) -> bool {
        term.is_empty()
            || self
                .display_name
                .to_lowercase()
                .contains(&term.to_lowercase())
    }
}

fn format_time_ago(timestamp: DateTime<Local>, now: DateTime<Local>) -> String {
    let duration = now.signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}
