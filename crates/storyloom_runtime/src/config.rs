//! Runtime configuration, read from TOML.
//!
//! Every field is optional in the file:
//!
//! ```toml
//! story = "data/instance.json"
//! script = "data/script.lua"
//! sound_dir = "data/sound"
//! sound_extension = "wav"
//! log_filter = "storyloom=debug"
//! show_title = true
//! show_inventory = true
//! clear_screen = true
//! pause_at_end = true
//! color = true
//!
//! [messages]
//! prompt = ":> "
//! item_gained = "You received {item}"
//! ```

use std::fs;
use std::io::{self, ErrorKind as IoErrorKind};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use storyloom_engine::EngineConfig;
use storyloom_foundation::{Error, Result};
use storyloom_host::Messages;
use tracing::debug;

/// Where the binary looks for its configuration when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "storyloom.toml";

/// Settings for the `storyloom` binary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Story definition (JSON).
    pub story: PathBuf,
    /// Lua script. Skipped when the file does not exist.
    pub script: PathBuf,
    /// Directory cue names are resolved in.
    pub sound_dir: PathBuf,
    /// Extension appended to cue names.
    pub sound_extension: String,
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    pub log_filter: Option<String>,
    /// Show the story title on start.
    pub show_title: bool,
    /// List the inventory above every choice listing.
    pub show_inventory: bool,
    /// Clear the screen after every accepted choice.
    pub clear_screen: bool,
    /// Wait for Enter after the story ends. Ignored in batch mode.
    pub pause_at_end: bool,
    /// Use ANSI colors.
    pub color: bool,
    /// Player-facing strings.
    pub messages: Messages,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            story: PathBuf::from("data/instance.json"),
            script: PathBuf::from("data/script.lua"),
            sound_dir: PathBuf::from("data/sound"),
            sound_extension: "wav".to_string(),
            log_filter: None,
            show_title: true,
            show_inventory: true,
            clear_screen: true,
            pause_at_end: true,
            color: true,
            messages: Messages::default(),
        }
    }
}

impl RuntimeConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error for invalid TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::config(e.to_string()))
    }

    /// Reads a configuration file. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the file exists but cannot be read, or a
    /// `Config` error if it cannot be parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                debug!(path = %path.display(), "no configuration file, using defaults");
                Ok(Self::default())
            }
            read => Self::parse_file(path, read),
        }
    }

    /// Reads a configuration file that must exist.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the file does not exist or cannot be
    /// parsed, or an `Io` error if it cannot be read.
    pub fn load_required<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Err(e) if e.kind() == IoErrorKind::NotFound => Err(Error::config(format!(
                "configuration file '{}' does not exist",
                path.display()
            ))),
            read => Self::parse_file(path, read),
        }
    }

    fn parse_file(path: &Path, read: io::Result<String>) -> Result<Self> {
        let text = read.map_err(|e| {
            Error::io(format!(
                "failed to read configuration '{}': {e}",
                path.display()
            ))
        })?;
        toml::from_str(&text).map_err(|e| Error::config(format!("{}: {e}", path.display())))
    }

    /// The engine settings this configuration implies.
    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new()
            .with_messages(self.messages.clone())
            .with_title(self.show_title)
            .with_inventory(self.show_inventory)
            .with_clear_on_transition(self.clear_screen)
            .with_pause_at_end(self.pause_at_end)
    }
}
