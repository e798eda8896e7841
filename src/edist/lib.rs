//! # Edist Architecture
//!
//! edist edits macOS Stickies notes in a terminal editor. Stickies stores
//! each note as an RTFD bundle on disk; edist lists those bundles, hands
//! the selected note's `TXT.rtf` to the user's editor, and restarts Stickies
//! when the file actually changed so the app picks the edit up.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Platform check, config, logging, exit codes              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Driver (tui/)                                              │
//! │  - One message at a time: keys, resizes, redraws, status    │
//! │  - Browse view, rendering, terminal ownership               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Edit Session (session.rs) + Host Control (host.rs)         │
//! │  - fingerprint → editor → fingerprint → restart if changed  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Note Repository (store.rs, model.rs)                       │
//! │  - One all-or-nothing scan of the Stickies directory        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Seams
//!
//! The pieces that touch the outside world sit behind small traits so the
//! whole edit sequence can be tested without a terminal, an editor or
//! Stickies:
//!
//! - [`editor::Editor`]: [`editor::ExternalEditor`] in production, closures in tests
//! - [`host::HostApp`]: [`host::SystemHost`] in production
//! - [`tui::terminal::Console`]: [`tui::terminal::Tui`] in production
//!
//! ## Limitations
//!
//! The editor runs in the foreground and blocks the event loop until it
//! exits. There is no timeout: an editor that never exits keeps edist
//! waiting too.
//!
//! ## Module Overview
//!
//! - [`model`]: [`model::NoteBundle`] and the bundle layout constants
//! - [`store`]: Scanning the Stickies directory
//! - [`fingerprint`]: Content hashes for change detection
//! - [`editor`]: External editor integration
//! - [`session`]: The edit session controller
//! - [`host`]: Stopping and relaunching Stickies
//! - [`tui`]: Event loop, browse view, rendering, terminal handoff
//! - [`config`]: Configuration management
//! - [`platform`]: The macOS-only guard
//! - [`error`]: Error types

pub mod config;
pub mod editor;
pub mod error;
pub mod fingerprint;
pub mod host;
pub mod model;
pub mod platform;
pub mod session;
pub mod store;
pub mod tui;

#[cfg(test)]
pub(crate) mod test_utils;
