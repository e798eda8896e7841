use clap::Parser;

/// Returns the version string, including the git hash for non-release builds.
/// Format: "0.3.0" for releases, "0.3.0@abc1234" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

/// edist takes no arguments; clap only provides --help and --version.
#[derive(Parser, Debug)]
#[command(name = "edist", bin_name = "edist", version = get_version())]
#[command(
    about = "Browse macOS Stickies notes and edit them in your terminal editor",
    long_about = "Browse macOS Stickies notes and edit them in your terminal editor.\n\n\
        Keys: ↑/↓ or j/k move, / filters, enter edits, q or ctrl+c quits.\n\
        Stickies is restarted after an edit that changed the note.\n\n\
        Set EDIST_LOG=<file> to write logs (level via RUST_LOG)."
)]
pub struct Cli {}
