use crate::error::{EdistError, Result};
use crate::store::BundleStore;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_EDITOR: &str = "vi";
const DEFAULT_HOST: &str = "Stickies";

/// Configuration for edist, stored in the platform config dir as config.json
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EdistConfig {
    /// Editor command line; the note's path is appended as the last argument
    #[serde(default = "default_editor")]
    pub editor: String,

    /// Overrides the Stickies data directory
    #[serde(default)]
    pub notes_dir: Option<PathBuf>,

    /// Process name used to stop the host application
    #[serde(default = "default_host")]
    pub host_process: String,

    /// Application name used to relaunch the host application
    #[serde(default = "default_host")]
    pub host_app: String,
}

fn default_editor() -> String {
    DEFAULT_EDITOR.to_string()
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

impl Default for EdistConfig {
    fn default() -> Self {
        Self {
            editor: default_editor(),
            notes_dir: None,
            host_process: default_host(),
            host_app: default_host(),
        }
    }
}

impl EdistConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(EdistError::Io)?;
        let config: EdistConfig =
            serde_json::from_str(&content).map_err(EdistError::Serialization)?;
        Ok(config)
    }

    /// The Stickies root: the configured override, or the sandboxed
    /// container under `home`.
    pub fn notes_root(&self, home: &Path) -> PathBuf {
        match &self.notes_dir {
            Some(dir) => dir.clone(),
            None => BundleStore::default_root(home),
        }
    }
}
