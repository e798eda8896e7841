//! # CLI Layer
//!
//! The only place that knows about process startup, exit codes and
//! environment variables. `run()` performs the startup sequence in a fixed
//! order, and any error it returns is fatal:
//!
//! 1. Parse arguments (there are none besides --help/--version)
//! 2. Initialize logging
//! 3. Refuse to run anywhere but macOS, before touching the filesystem
//! 4. Load configuration
//! 5. Scan the Stickies directory once
//! 6. Take over the terminal and run the browser until the user quits

mod setup;

use clap::Parser;
use directories::{BaseDirs, ProjectDirs};
use edist::config::EdistConfig;
use edist::editor::ExternalEditor;
use edist::error::{EdistError, Result};
use edist::host::SystemHost;
use edist::platform::check_platform;
use edist::session::EditSession;
use edist::store::BundleStore;
use edist::tui::terminal::Tui;
use edist::tui::theme::Theme;
use edist::tui::App;
use setup::Cli;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_FILE_ENV: &str = "EDIST_LOG";

pub fn run() -> Result<()> {
    let _cli = Cli::parse();
    init_logging();

    check_platform()?;

    let config = load_config();
    let home = BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(EdistError::HomeDirUnavailable)?;
    let store = BundleStore::new(config.notes_root(&home));
    let catalog = store.scan()?;

    let editor = ExternalEditor::from_command_line(&config.editor)
        .unwrap_or_else(|| ExternalEditor::new(EdistConfig::default().editor));
    let host = SystemHost::new(&config.host_process, &config.host_app);
    let mut app = App::new(catalog, EditSession::new(editor), host);

    let theme = Theme::default();
    let mut tui = Tui::enter()?;
    let result = app.run(&mut tui, &theme);
    let left = tui.leave();
    tracing::info!("exiting");
    first_error(result, left)
}

/// Prefers the loop's error. A restore failure after it is only logged.
fn first_error(result: Result<()>, left: Result<()>) -> Result<()> {
    match (result, left) {
        (Err(e), Err(leave_err)) => {
            tracing::error!(error = %leave_err, "could not restore terminal");
            Err(e)
        }
        (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
        (Ok(()), Ok(())) => Ok(()),
    }
}

fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "edist", "edist").map(|dirs| dirs.config_dir().to_path_buf())
}

fn load_config() -> EdistConfig {
    let Some(dir) = config_dir() else {
        return EdistConfig::default();
    };
    EdistConfig::load(&dir).unwrap_or_else(|e| {
        tracing::warn!(dir = %dir.display(), error = %e, "ignoring unreadable config");
        EdistConfig::default()
    })
}

/// The browser owns stdout, so logs only go to the file named by
/// `EDIST_LOG`. Without it they are discarded.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_file = std::env::var_os(LOG_FILE_ENV).and_then(|path| {
        File::options()
            .create(true)
            .append(true)
            .open(&path)
            .ok()
    });

    match log_file {
        Some(file) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .try_init();
        }
    }
}
