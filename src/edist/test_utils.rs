use crate::error::{EdistError, Result};
use crate::host::HostApp;
use crate::model::NoteBundle;
use crate::store::BundleStore;
use crate::tui::terminal::{Console, TerminalOwner};
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use tempfile::TempDir;

/// A throwaway Stickies directory.
pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    pub fn store(&self) -> BundleStore {
        BundleStore::new(&self.root)
    }

    /// Creates `<name>.rtfd/TXT.rtf` with `text` and returns the bundle dir.
    pub fn add_bundle(&self, name: &str, text: &str) -> PathBuf {
        let dir = self.add_dir(&format!("{name}.rtfd"));
        fs::write(dir.join("TXT.rtf"), text).expect("failed to write TXT.rtf");
        dir
    }

    pub fn add_dir(&self, name: &str) -> PathBuf {
        let dir = self.root.join(name);
        fs::create_dir_all(&dir).expect("failed to create dir");
        dir
    }

    pub fn add_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        fs::write(&path, content).expect("failed to write file");
        path
    }

    /// Looks up a bundle by display name through a real scan.
    pub fn bundle(&self, name: &str) -> NoteBundle {
        self.store()
            .scan()
            .expect("scan failed")
            .into_iter()
            .find(|b| b.display_name() == name)
            .unwrap_or_else(|| panic!("no bundle named {name}"))
    }
}

/// Console fake that records every call in a shared log.
pub struct RecordingConsole {
    log: Rc<RefCell<Vec<String>>>,
    owner: Rc<Cell<TerminalOwner>>,
    size: (u16, u16),
    fail_release: bool,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
            owner: Rc::new(Cell::new(TerminalOwner::Host)),
            size: (80, 24),
            fail_release: false,
        }
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.size = (width, height);
        self
    }

    pub fn failing_release(mut self) -> Self {
        self.fail_release = true;
        self
    }

    /// Shared handle to the log, so a fake child can append to it.
    pub fn log(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.log)
    }

    pub fn owner_handle(&self) -> Rc<Cell<TerminalOwner>> {
        Rc::clone(&self.owner)
    }

    pub fn events(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    fn record(&self, event: impl Into<String>) {
        self.log.borrow_mut().push(event.into());
    }
}

impl Console for RecordingConsole {
    fn release(&mut self) -> Result<()> {
        if self.fail_release {
            return Err(EdistError::Terminal(std::io::Error::other("release failed")));
        }
        assert_eq!(self.owner.get(), TerminalOwner::Host, "released twice");
        self.owner.set(TerminalOwner::Editor);
        self.record("release");
        Ok(())
    }

    fn reclaim(&mut self) -> Result<()> {
        self.owner.set(TerminalOwner::Host);
        self.record("reclaim");
        Ok(())
    }

    fn owner(&self) -> TerminalOwner {
        self.owner.get()
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.record("hide_cursor");
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        self.record(format!("resize {width}x{height}"));
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        Ok(self.size)
    }
}

/// Host fake that counts stop/launch calls.
#[derive(Clone)]
pub struct CountingHost {
    calls: Rc<RefCell<Vec<&'static str>>>,
    fail_stop: bool,
    fail_launch: bool,
}

impl CountingHost {
    pub fn new() -> Self {
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
            fail_stop: false,
            fail_launch: false,
        }
    }

    pub fn failing_stop(mut self) -> Self {
        self.fail_stop = true;
        self
    }

    pub fn failing_launch(mut self) -> Self {
        self.fail_launch = true;
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    pub fn restarts(&self) -> usize {
        self.calls.borrow().iter().filter(|c| **c == "stop").count()
    }
}

impl HostApp for CountingHost {
    fn name(&self) -> &str {
        "Stickies"
    }

    fn stop(&self) -> Result<()> {
        self.calls.borrow_mut().push("stop");
        if self.fail_stop {
            return Err(EdistError::HostStop("Stickies".into()));
        }
        Ok(())
    }

    fn launch(&self) -> Result<()> {
        self.calls.borrow_mut().push("launch");
        if self.fail_launch {
            return Err(EdistError::HostLaunch("Stickies".into()));
        }
        Ok(())
    }
}
