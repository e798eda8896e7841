use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EdistError {
    #[error("unsupported platform '{0}': Stickies only exists on macOS")]
    UnsupportedPlatform(String),

    #[error("Could not determine the home directory")]
    HomeDirUnavailable,

    #[error("Failed to scan {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    ReadResource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to launch editor '{editor}': {source}")]
    EditorLaunch {
        editor: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Editor '{editor}' exited with {status}")]
    EditorExit { editor: String, status: ExitStatus },

    #[error("Failed to stop {0}")]
    HostStop(String),

    #[error("Failed to launch {0}")]
    HostLaunch(String),

    #[error("Terminal error: {0}")]
    Terminal(#[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EdistError {
    /// Errors the event loop cannot recover from. Everything else is shown
    /// as a status message and the loop carries on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EdistError::Terminal(_))
    }
}

pub type Result<T> = std::result::Result<T, EdistError>;
