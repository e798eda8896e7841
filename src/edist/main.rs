//! # Edist CLI
//!
//! The binary is intentionally thin: everything interesting lives in the
//! `edist` library, the CLI layer in `cli/` does the startup sequence,
//! and this file only invokes `cli::run()` and handles process termination.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{} {}", console::style("Error:").for_stderr().red().bold(), e);
        std::process::exit(1);
    }
}
