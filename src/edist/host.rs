//! # Host Application Control
//!
//! Stickies keeps its notes in memory and only reads the bundles at launch,
//! so an edit made behind its back is invisible (and will be overwritten)
//! until the app restarts. [`HostApp::restart`] stops it and launches it
//! again.
//!
//! Stopping is idempotent: a host that isn't running counts as stopped. If
//! the stop succeeds but the launch fails, the app stays stopped and the
//! error is returned for the user to see.

use crate::error::{EdistError, Result};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_secs(2);
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub trait HostApp {
    /// Human readable name for status messages.
    fn name(&self) -> &str;

    fn stop(&self) -> Result<()>;

    fn launch(&self) -> Result<()>;

    fn restart(&self) -> Result<()> {
        tracing::info!(host = self.name(), "restarting host application");
        self.stop()?;
        self.launch()
    }
}

/// The programs used to control processes. Swappable so the restart
/// sequence can run against stand-ins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessTools {
    /// Called as `<kill> <process>`
    pub kill: String,
    /// Called as `<probe> -x <process>`, exits 0 iff the process runs
    pub probe: String,
    /// Called as `<launch> -a <app>`
    pub launch: String,
}

impl Default for ProcessTools {
    fn default() -> Self {
        Self {
            kill: "killall".to_string(),
            probe: "pgrep".to_string(),
            launch: "open".to_string(),
        }
    }
}

/// A macOS application controlled through `killall`, `pgrep` and `open`.
pub struct SystemHost {
    process_name: String,
    app_name: String,
    tools: ProcessTools,
    stop_timeout: Duration,
}

impl SystemHost {
    pub fn new(process_name: impl Into<String>, app_name: impl Into<String>) -> Self {
        Self {
            process_name: process_name.into(),
            app_name: app_name.into(),
            tools: ProcessTools::default(),
            stop_timeout: DEFAULT_STOP_TIMEOUT,
        }
    }

    pub fn with_tools(mut self, tools: ProcessTools) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_stop_timeout(mut self, timeout: Duration) -> Self {
        self.stop_timeout = timeout;
        self
    }

    pub fn is_running(&self) -> Result<bool> {
        let status = Command::new(&self.tools.probe)
            .args(["-x", &self.process_name])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| {
                EdistError::HostStop(format!(
                    "{}: could not run {}: {}",
                    self.process_name, self.tools.probe, e
                ))
            })?;
        Ok(status.success())
    }

    fn wait_until_stopped(&self) -> Result<()> {
        let deadline = Instant::now() + self.stop_timeout;
        while self.is_running()? {
            if Instant::now() >= deadline {
                return Err(EdistError::HostStop(format!(
                    "{}: still running after {:?}",
                    self.process_name, self.stop_timeout
                )));
            }
            thread::sleep(POLL_INTERVAL);
        }
        Ok(())
    }
}

impl HostApp for SystemHost {
    fn name(&self) -> &str {
        &self.app_name
    }

    fn stop(&self) -> Result<()> {
        if !self.is_running()? {
            tracing::debug!(process = %self.process_name, "not running, nothing to stop");
            return Ok(());
        }

        let status = Command::new(&self.tools.kill)
            .arg(&self.process_name)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| {
                EdistError::HostStop(format!(
                    "{}: could not run {}: {}",
                    self.process_name, self.tools.kill, e
                ))
            })?;
        // A non-zero exit may just mean it quit on its own meanwhile
        if !status.success() {
            tracing::warn!(process = %self.process_name, %status, "kill reported failure");
        }

        self.wait_until_stopped()
    }

    fn launch(&self) -> Result<()> {
        let status = Command::new(&self.tools.launch)
            .args(["-a", &self.app_name])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| {
                EdistError::HostLaunch(format!(
                    "{}: could not run {}: {}",
                    self.app_name, self.tools.launch, e
                ))
            })?;

        if !status.success() {
            return Err(EdistError::HostLaunch(format!(
                "{}: {} exited with {}",
                self.app_name, self.tools.launch, status
            )));
        }
        tracing::info!(app = %self.app_name, "launched");
        Ok(())
    }
}
