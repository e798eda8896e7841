//! # Edit Session
//!
//! One edit of one note, start to finish:
//!
//! ```text
//!   fingerprint TXT.rtf ──► hand terminal to editor ──► editor exits
//!                                                           │
//!   Changed / Unchanged ◄── compare ◄── fingerprint ◄── reclaim terminal
//! ```
//!
//! A failure before the editor exits successfully ends the session with an
//! error and the second fingerprint is never taken. "Changed" strictly means
//! the bytes on disk differ; saving identical content is `Unchanged`.
//!
//! Whatever the result, the caller owes the UI a full redraw afterwards.

use crate::editor::Editor;
use crate::error::Result;
use crate::fingerprint::Fingerprint;
use crate::model::NoteBundle;
use crate::tui::terminal::{hand_off, Console};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Unchanged,
    Changed,
}

impl EditOutcome {
    pub fn is_changed(self) -> bool {
        self == EditOutcome::Changed
    }
}

pub struct EditSession<E> {
    editor: E,
}

impl<E: Editor> EditSession<E> {
    pub fn new(editor: E) -> Self {
        Self { editor }
    }

    /// Opens the bundle's text resource in the editor and reports whether
    /// its content changed. Blocks for as long as the editor runs.
    pub fn edit<C>(&self, bundle: &NoteBundle, console: &mut C) -> Result<EditOutcome>
    where
        C: Console + ?Sized,
    {
        let resource = bundle.text_resource_path();
        let before = Fingerprint::of_file(resource)?;

        hand_off(console, || self.editor.open(resource))?;

        let after = Fingerprint::of_file(resource)?;
        let outcome = if before == after {
            EditOutcome::Unchanged
        } else {
            EditOutcome::Changed
        };

        tracing::info!(
            note = bundle.display_name(),
            %before,
            %after,
            ?outcome,
            "edit session finished"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EdistError;
    use crate::test_utils::{RecordingConsole, TestEnv};
    use crate::tui::terminal::TerminalOwner;
    use std::cell::Cell;
    use std::fs;
    use std::path::Path;

    #[test]
    fn test_rewritten_content_is_changed() {
        let env = TestEnv::new();
        env.add_bundle("Note1", "hello");
        let bundle = env.bundle("Note1");
        let mut console = RecordingConsole::new();

        let session = EditSession::new(|path: &Path| -> Result<()> {
            fs::write(path, "hello!")?;
            Ok(())
        });
        let outcome = session.edit(&bundle, &mut console).unwrap();

        assert_eq!(outcome, EditOutcome::Changed);
        assert!(outcome.is_changed());
    }

    #[test]
    fn test_identical_content_is_unchanged() {
        let env = TestEnv::new();
        env.add_bundle("Note1", "hello");
        let bundle = env.bundle("Note1");
        let mut console = RecordingConsole::new();
        let invoked = Cell::new(0);

        // Rewrites the same bytes, like `:wq` without edits
        let session = EditSession::new(|path: &Path| -> Result<()> {
            invoked.set(invoked.get() + 1);
            fs::write(path, "hello")?;
            Ok(())
        });
        let outcome = session.edit(&bundle, &mut console).unwrap();

        assert_eq!(outcome, EditOutcome::Unchanged);
        assert_eq!(invoked.get(), 1);
    }

    #[test]
    fn test_editor_receives_resource_path() {
        let env = TestEnv::new();
        env.add_bundle("Note1", "hello");
        let bundle = env.bundle("Note1");
        let expected = bundle.text_resource_path().to_path_buf();
        let mut console = RecordingConsole::new();

        let session = EditSession::new(move |path: &Path| -> Result<()> {
            assert_eq!(path, expected);
            Ok(())
        });
        session.edit(&bundle, &mut console).unwrap();
    }

    #[test]
    fn test_launch_failure_is_not_a_change() {
        let env = TestEnv::new();
        env.add_bundle("Note1", "hello");
        let bundle = env.bundle("Note1");
        let mut console = RecordingConsole::new();

        let session = EditSession::new(|_: &Path| -> Result<()> {
            Err(EdistError::EditorLaunch {
                editor: "vi".into(),
                source: std::io::ErrorKind::NotFound.into(),
            })
        });
        let err = session.edit(&bundle, &mut console).unwrap_err();

        assert!(matches!(err, EdistError::EditorLaunch { .. }));
        assert_eq!(console.events(), vec!["release", "reclaim"]);
        assert_eq!(console.owner(), TerminalOwner::Host);
    }

    #[test]
    fn test_missing_resource_aborts_before_launch() {
        let env = TestEnv::new();
        env.add_dir("Empty.rtfd");
        let bundle = env.bundle("Empty");
        let mut console = RecordingConsole::new();
        let invoked = Cell::new(false);

        let session = EditSession::new(|_: &Path| -> Result<()> {
            invoked.set(true);
            Ok(())
        });
        let err = session.edit(&bundle, &mut console).unwrap_err();

        assert!(matches!(err, EdistError::ReadResource { .. }));
        assert!(!invoked.get());
        assert!(console.events().is_empty());
    }

    #[test]
    fn test_resource_deleted_during_edit() {
        let env = TestEnv::new();
        env.add_bundle("Note1", "hello");
        let bundle = env.bundle("Note1");
        let mut console = RecordingConsole::new();

        let session = EditSession::new(|path: &Path| -> Result<()> {
            fs::remove_file(path)?;
            Ok(())
        });
        let err = session.edit(&bundle, &mut console).unwrap_err();

        assert!(matches!(err, EdistError::ReadResource { .. }));
        assert_eq!(console.owner(), TerminalOwner::Host);
    }
}
