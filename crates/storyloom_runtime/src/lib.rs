//! Console presenter, line editors, configuration, and CLI for Storyloom.
//!
//! This crate provides:
//! - [`ConsolePresenter`] - ANSI-colored terminal output
//! - [`RustylineEditor`] / [`StdinEditor`] - Interactive and piped choice input
//! - [`LoggedAudio`] - Resolves cue files and logs playback requests
//! - [`RuntimeConfig`] - TOML configuration for the `storyloom` binary
//! - [`init_logging`] - Diagnostics on stderr via `tracing-subscriber`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod audio;
pub mod config;
pub mod console;
pub mod editor;
pub mod logging;

pub use audio::LoggedAudio;
pub use config::RuntimeConfig;
pub use console::ConsolePresenter;
pub use editor::{RustylineEditor, StdinEditor};
pub use logging::{DEFAULT_FILTER, init_logging};
