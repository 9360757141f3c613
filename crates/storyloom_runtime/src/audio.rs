//! Cue handling for the console runtime.
//!
//! Playback itself is left to the platform. [`LoggedAudio`] resolves each cue
//! to a file under the sound directory, logs it, and keeps track of what
//! would be playing.

use std::path::{Path, PathBuf};

use storyloom_foundation::Result;
use storyloom_host::{AudioSink, Cue};
use tracing::{debug, info, warn};

/// An audio sink that logs cues instead of playing them.
#[derive(Clone, Debug)]
pub struct LoggedAudio {
    sound_dir: PathBuf,
    extension: String,
    playing: Vec<Cue>,
}

impl LoggedAudio {
    /// Creates a sink resolving cues to `sound_dir/<name>.<extension>`.
    pub fn new(sound_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            sound_dir: sound_dir.into(),
            extension: extension.into(),
            playing: Vec::new(),
        }
    }

    /// The file a cue name resolves to.
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        let extension = self.extension.trim_start_matches('.');
        if extension.is_empty() {
            self.sound_dir.join(name)
        } else {
            self.sound_dir.join(format!("{name}.{extension}"))
        }
    }

    /// The directory cue files are looked up in.
    #[must_use]
    pub fn sound_dir(&self) -> &Path {
        &self.sound_dir
    }

    /// Cues started since the last stop.
    #[must_use]
    pub fn playing(&self) -> &[Cue] {
        &self.playing
    }
}

impl AudioSink for LoggedAudio {
    fn play(&mut self, cue: &Cue) -> Result<()> {
        let path = self.path_for(&cue.name);
        if path.is_file() {
            info!(cue = %cue.name, looping = cue.looping, path = %path.display(), "playing cue");
        } else {
            warn!(cue = %cue.name, path = %path.display(), "sound file not found");
        }
        self.playing.push(cue.clone());
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if !self.playing.is_empty() {
            debug!(cues = self.playing.len(), "stopping cues");
            self.playing.clear();
        }
        Ok(())
    }
}
