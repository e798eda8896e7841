use crate::error::{EdistError, Result};

const SUPPORTED_OS: &str = "macos";

/// Fails unless running on the OS that ships Stickies. Checked before
/// anything touches the filesystem.
pub fn check_platform() -> Result<()> {
    ensure_supported(std::env::consts::OS)
}

pub fn ensure_supported(os: &str) -> Result<()> {
    if os == SUPPORTED_OS {
        Ok(())
    } else {
        Err(EdistError::UnsupportedPlatform(os.to_string()))
    }
}
