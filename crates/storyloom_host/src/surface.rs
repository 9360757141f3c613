//! Output surfaces: where text and sound go.
//!
//! Rendering and playback live outside the core. The engine and the host API
//! only ever talk to these traits. [`Transcript`] and [`CueLog`] are the
//! in-memory implementations used for headless play and tests.

use storyloom_foundation::{Color, Result};
use storyloom_storage::Gate;

/// One line of a choice listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListedChoice {
    /// 1-based number the player types to pick this choice.
    pub number: usize,
    /// Choice text.
    pub text: String,
    /// Whether the choice can be taken right now.
    pub gate: Gate,
}

impl ListedChoice {
    /// Returns true if the choice can be taken.
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        self.gate.is_eligible()
    }
}

/// Line-based text output.
pub trait Presenter {
    /// Shows the story title once, when a session starts.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if output fails.
    fn title(&mut self, title: &str) -> Result<()>;

    /// Shows a node's narrative text.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if output fails.
    fn narrative(&mut self, text: &str) -> Result<()>;

    /// Shows script-printed text, optionally colored.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if output fails.
    fn print(&mut self, text: &str, color: Option<Color>) -> Result<()>;

    /// Clears the presentation surface.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if output fails.
    fn clear(&mut self) -> Result<()>;

    /// Draws a visual divider.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if output fails.
    fn separator(&mut self, divider: &str) -> Result<()>;

    /// Lists the inventory under a heading.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if output fails.
    fn inventory(&mut self, heading: &str, items: &[&str]) -> Result<()>;

    /// Lists the choices of the current node.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if output fails.
    fn choices(&mut self, choices: &[ListedChoice]) -> Result<()>;

    /// Tells the player something happened to them (an item gained or lost).
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if output fails.
    fn notice(&mut self, text: &str) -> Result<()>;

    /// Tells the player their input was rejected.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if output fails.
    fn rejection(&mut self, text: &str) -> Result<()>;
}

/// A sound to play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cue {
    /// Cue name, as written in the story or script.
    pub name: String,
    /// Whether the cue repeats until stopped.
    pub looping: bool,
}

impl Cue {
    /// A cue that plays once.
    #[must_use]
    pub fn once(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            looping: false,
        }
    }

    /// A cue that repeats until stopped.
    #[must_use]
    pub fn looping(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            looping: true,
        }
    }
}

/// Sound output.
pub trait AudioSink {
    /// Starts a cue.
    ///
    /// # Errors
    ///
    /// Implementations may fail if the cue cannot be started.
    fn play(&mut self, cue: &Cue) -> Result<()>;

    /// Stops whatever is playing.
    ///
    /// # Errors
    ///
    /// Implementations may fail if playback cannot be stopped.
    fn stop(&mut self) -> Result<()>;
}

/// Something a [`Transcript`] recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Shown {
    Title(String),
    Narrative(String),
    Print { text: String, color: Option<Color> },
    Clear,
    Separator,
    Inventory(Vec<String>),
    Choices(Vec<ListedChoice>),
    Notice(String),
    Rejection(String),
}

/// A presenter that records everything in order.
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    shown: Vec<Shown>,
}

impl Transcript {
    /// Creates an empty transcript.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything shown so far.
    #[must_use]
    pub fn shown(&self) -> &[Shown] {
        &self.shown
    }

    /// Narrative texts, in order.
    #[must_use]
    pub fn narratives(&self) -> Vec<&str> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Narrative(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Script-printed texts, in order.
    #[must_use]
    pub fn printed(&self) -> Vec<&str> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Print { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Notices, in order.
    #[must_use]
    pub fn notices(&self) -> Vec<&str> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Notice(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Rejection messages, in order.
    #[must_use]
    pub fn rejections(&self) -> Vec<&str> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Rejection(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every choice listing, in order.
    #[must_use]
    pub fn listings(&self) -> Vec<&[ListedChoice]> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Choices(choices) => Some(choices.as_slice()),
                _ => None,
            })
            .collect()
    }

    /// The most recent choice listing.
    #[must_use]
    pub fn last_listing(&self) -> Option<&[ListedChoice]> {
        self.listings().pop()
    }
}

impl Presenter for Transcript {
    fn title(&mut self, title: &str) -> Result<()> {
        self.shown.push(Shown::Title(title.to_string()));
        Ok(())
    }

    fn narrative(&mut self, text: &str) -> Result<()> {
        self.shown.push(Shown::Narrative(text.to_string()));
        Ok(())
    }

    fn print(&mut self, text: &str, color: Option<Color>) -> Result<()> {
        self.shown.push(Shown::Print {
            text: text.to_string(),
            color,
        });
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.shown.push(Shown::Clear);
        Ok(())
    }

    fn separator(&mut self, _divider: &str) -> Result<()> {
        self.shown.push(Shown::Separator);
        Ok(())
    }

    fn inventory(&mut self, _heading: &str, items: &[&str]) -> Result<()> {
        self.shown
            .push(Shown::Inventory(items.iter().map(ToString::to_string).collect()));
        Ok(())
    }

    fn choices(&mut self, choices: &[ListedChoice]) -> Result<()> {
        self.shown.push(Shown::Choices(choices.to_vec()));
        Ok(())
    }

    fn notice(&mut self, text: &str) -> Result<()> {
        self.shown.push(Shown::Notice(text.to_string()));
        Ok(())
    }

    fn rejection(&mut self, text: &str) -> Result<()> {
        self.shown.push(Shown::Rejection(text.to_string()));
        Ok(())
    }
}

/// Something a [`CueLog`] recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CueEvent {
    /// A cue was started.
    Play(Cue),
    /// Playback was stopped.
    Stop,
}

/// An audio sink that records cues instead of playing them.
#[derive(Clone, Debug, Default)]
pub struct CueLog {
    events: Vec<CueEvent>,
}

impl CueLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far.
    #[must_use]
    pub fn events(&self) -> &[CueEvent] {
        &self.events
    }

    /// Names of the cues started, in order.
    #[must_use]
    pub fn played(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                CueEvent::Play(cue) => Some(cue.name.as_str()),
                CueEvent::Stop => None,
            })
            .collect()
    }
}

impl AudioSink for CueLog {
    fn play(&mut self, cue: &Cue) -> Result<()> {
        self.events.push(CueEvent::Play(cue.clone()));
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.events.push(CueEvent::Stop);
        Ok(())
    }
}
