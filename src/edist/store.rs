//! # Note Repository
//!
//! Scans the Stickies data directory and produces the catalog of note
//! bundles. The scan is all-or-nothing: if the root or any bundle directory
//! cannot be read, no catalog is returned at all.
//!
//! ## Storage Format
//!
//! ```text
//! ~/Library/Containers/com.apple.Stickies/Data/Library/Stickies/
//! ├── 2A1F....rtfd/        # one bundle per note
//! │   ├── TXT.rtf          # the note text, what edist edits
//! │   └── image.png        # attachments, ignored
//! └── .SavedStickiesState  # anything that isn't an .rtfd directory is skipped
//! ```

use crate::error::{EdistError, Result};
use crate::model::{NoteBundle, BUNDLE_EXT};
use chrono::{DateTime, Local};
use std::fs::{self, DirEntry};
use std::path::{Path, PathBuf};

const STICKIES_DATA_DIR: &str = "Library/Containers/com.apple.Stickies/Data/Library/Stickies";

pub struct BundleStore {
    root: PathBuf,
}

impl BundleStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Where Stickies keeps its bundles for the user whose home is `home`.
    pub fn default_root(home: &Path) -> PathBuf {
        home.join(STICKIES_DATA_DIR)
    }

    /// Lists every bundle directly under the root, sorted by directory name.
    pub fn scan(&self) -> Result<Vec<NoteBundle>> {
        let entries = fs::read_dir(&self.root).map_err(|e| self.scan_error(&self.root, e))?;

        let mut bundles = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| self.scan_error(&self.root, e))?;
            if !is_bundle(&entry).map_err(|e| self.scan_error(&entry.path(), e))? {
                continue;
            }
            bundles.push(self.load_bundle(entry)?);
        }

        bundles.sort_by(|a, b| a.path().file_name().cmp(&b.path().file_name()));
        tracing::info!(root = %self.root.display(), count = bundles.len(), "scanned notes");
        Ok(bundles)
    }

    fn load_bundle(&self, entry: DirEntry) -> Result<NoteBundle> {
        let path = entry.path();

        // The bundle has to be listable, even though only TXT.rtf is used
        fs::read_dir(&path).map_err(|e| self.scan_error(&path, e))?;

        let modified = entry
            .metadata()
            .and_then(|meta| meta.modified())
            .map_err(|e| self.scan_error(&path, e))?;

        Ok(NoteBundle::new(path, DateTime::<Local>::from(modified)))
    }

    fn scan_error(&self, path: &Path, source: std::io::Error) -> EdistError {
        tracing::warn!(path = %path.display(), error = %source, "scan failed");
        EdistError::Scan {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn is_bundle(entry: &DirEntry) -> std::io::Result<bool> {
    let path = entry.path();
    let has_ext = path.extension().is_some_and(|ext| ext == BUNDLE_EXT);
    Ok(has_ext && entry.file_type()?.is_dir())
}
