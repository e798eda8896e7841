//! End-to-end edit flow against real child processes: a real scan, a real
//! editor process, and stand-in programs for killall/pgrep/open.
#![cfg(unix)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use edist::editor::ExternalEditor;
use edist::error::Result;
use edist::host::{HostApp, ProcessTools, SystemHost};
use edist::session::{EditOutcome, EditSession};
use edist::store::BundleStore;
use edist::tui::terminal::{Console, TerminalOwner};
use edist::tui::{App, Msg, StatusLevel};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Console that only tracks ownership; there is no real terminal in tests.
struct HeadlessConsole {
    owner: TerminalOwner,
    handoffs: usize,
}

impl HeadlessConsole {
    fn new() -> Self {
        Self {
            owner: TerminalOwner::Host,
            handoffs: 0,
        }
    }
}

impl Console for HeadlessConsole {
    fn release(&mut self) -> Result<()> {
        self.owner = TerminalOwner::Editor;
        self.handoffs += 1;
        Ok(())
    }

    fn reclaim(&mut self) -> Result<()> {
        self.owner = TerminalOwner::Host;
        Ok(())
    }

    fn owner(&self) -> TerminalOwner {
        self.owner
    }

    fn hide_cursor(&mut self) -> Result<()> {
        Ok(())
    }

    fn resize(&mut self, _width: u16, _height: u16) -> Result<()> {
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        Ok((80, 24))
    }
}

fn stickies_dir(notes: &[(&str, &str)]) -> (TempDir, PathBuf) {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().join("Stickies");
    fs::create_dir(&root).unwrap();
    for (name, text) in notes {
        let bundle = root.join(format!("{name}.rtfd"));
        fs::create_dir(&bundle).unwrap();
        fs::write(bundle.join("TXT.rtf"), text).unwrap();
    }
    (temp, root)
}

/// An editor that overwrites the file with `text`.
fn writing_editor(text: &str) -> ExternalEditor {
    ExternalEditor::new("sh").with_args(["-c".to_string(), format!("printf '{text}' > \"$0\"")])
}

/// A Stickies that is never running and relaunches successfully.
fn idle_host(launch: &str) -> SystemHost {
    SystemHost::new("Stickies", "Stickies")
        .with_tools(ProcessTools {
            kill: "edist-test-no-such-killall".to_string(),
            probe: "false".to_string(),
            launch: launch.to_string(),
        })
        .with_stop_timeout(Duration::from_millis(100))
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_scan_then_edit_changes_note() {
    let (_temp, root) = stickies_dir(&[("Note1", "hello"), ("Other", "x")]);
    let catalog = BundleStore::new(&root).scan().unwrap();
    let note = catalog.iter().find(|b| b.display_name() == "Note1").unwrap();
    let mut console = HeadlessConsole::new();

    let session = EditSession::new(writing_editor("hello!"));
    let outcome = session.edit(note, &mut console).unwrap();

    assert_eq!(outcome, EditOutcome::Changed);
    assert_eq!(read(note.text_resource_path()), "hello!");
    assert_eq!(console.owner(), TerminalOwner::Host);
    assert_eq!(console.handoffs, 1);
}

#[test]
fn test_editor_that_saves_same_bytes_is_unchanged() {
    let (_temp, root) = stickies_dir(&[("Note1", "hello")]);
    let catalog = BundleStore::new(&root).scan().unwrap();
    let mut console = HeadlessConsole::new();

    let session = EditSession::new(writing_editor("hello"));
    let outcome = session.edit(&catalog[0], &mut console).unwrap();

    assert_eq!(outcome, EditOutcome::Unchanged);
    assert_eq!(console.handoffs, 1);
}

#[test]
fn test_restart_succeeds_when_host_not_running() {
    idle_host("true").restart().unwrap();
}

#[test]
fn test_driver_full_edit_restarts_and_reports() {
    let (_temp, root) = stickies_dir(&[("Note1", "hello")]);
    let catalog = BundleStore::new(&root).scan().unwrap();
    let mut app = App::new(
        catalog,
        EditSession::new(writing_editor("hello!")),
        idle_host("true"),
    );
    let mut console = HeadlessConsole::new();

    app.push(Msg::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
    while let Some(msg) = app.next_message() {
        app.update(msg, &mut console).unwrap();
    }

    let status = app.state().status.as_ref().unwrap();
    assert_eq!(status.level, StatusLevel::Notice);
    assert_eq!(status.text, "Saved Note1, restarted Stickies");
    assert_eq!(app.state().size, Some((80, 24)));
}

#[test]
fn test_driver_missing_editor_reports_and_continues() {
    let (_temp, root) = stickies_dir(&[("Note1", "hello")]);
    let catalog = BundleStore::new(&root).scan().unwrap();
    // A launcher that fails proves the host was never touched
    let mut app = App::new(
        catalog,
        EditSession::new(ExternalEditor::new("edist-test-no-such-editor")),
        idle_host("false"),
    );
    let mut console = HeadlessConsole::new();

    app.push(Msg::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
    while let Some(msg) = app.next_message() {
        app.update(msg, &mut console).unwrap();
    }

    let status = app.state().status.as_ref().unwrap();
    assert_eq!(status.level, StatusLevel::Error);
    assert!(status.text.contains("edist-test-no-such-editor"));
    assert!(!app.should_quit());
    assert_eq!(read(&root.join("Note1.rtfd/TXT.rtf")), "hello");
}
