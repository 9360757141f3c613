//! The traversal state machine.
//!
//! Every visit to a node runs the same cycle:
//! 1. Validate the node (scripts may have changed it since the last visit)
//! 2. Fire its sound and ambient cues
//! 3. Run the story-wide pre-hook, then the node's pre-hook
//! 4. Show the narrative text
//! 5. Run the story-wide post-hook, then the node's post-hook
//! 6. Stop if the node is terminal
//! 7. Otherwise list the choices, gated against the inventory as it is now
//!
//! Then the engine waits for an acceptable choice and transitions. Only the
//! wait can be retried; every [`Error`] aborts the session.

use std::fmt;

use storyloom_foundation::{Error, InputError, NodeId, Result};
use storyloom_host::{
    AudioSink, Cue, Host, ListedChoice, Messages, Presenter, ScriptHost, run_hook,
};
use storyloom_storage::{Inventory, Node};
use tracing::{debug, info};

use crate::input::{LineEditor, ReadResult, parse_selection};
use crate::session::{Session, SessionState};

// =============================================================================
// Configuration
// =============================================================================

/// Presentation options for an [`Engine`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Strings the engine shows the player.
    pub messages: Messages,
    /// Show the story title when the session starts.
    pub show_title: bool,
    /// List the inventory above every choice listing.
    pub show_inventory: bool,
    /// Clear the screen after every accepted choice.
    pub clear_on_transition: bool,
    /// Wait for one more line after a terminal node before returning.
    pub pause_at_end: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            messages: Messages::default(),
            show_title: true,
            show_inventory: true,
            clear_on_transition: true,
            pause_at_end: false,
        }
    }
}

impl EngineConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to replace the player-facing strings.
    #[must_use]
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Builder method to toggle the title.
    #[must_use]
    pub fn with_title(mut self, show: bool) -> Self {
        self.show_title = show;
        self
    }

    /// Builder method to toggle the inventory listing.
    #[must_use]
    pub fn with_inventory(mut self, show: bool) -> Self {
        self.show_inventory = show;
        self
    }

    /// Builder method to toggle clearing the screen between nodes.
    #[must_use]
    pub fn with_clear_on_transition(mut self, clear: bool) -> Self {
        self.clear_on_transition = clear;
        self
    }

    /// Builder method to hold the final screen until the player presses Enter.
    #[must_use]
    pub fn with_pause_at_end(mut self, pause: bool) -> Self {
        self.pause_at_end = pause;
        self
    }
}

// =============================================================================
// Results
// =============================================================================

/// What a node visit ended with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Presented {
    /// The node is terminal; the session is over.
    Terminal,
    /// The choices that were listed, in order.
    Choices(Vec<ListedChoice>),
}

/// How a session ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A terminal node was reached.
    Finished(NodeId),
    /// The player closed input while at this node.
    Abandoned(NodeId),
}

impl Outcome {
    /// The node the session ended at.
    #[must_use]
    pub fn node(&self) -> &NodeId {
        match self {
            Self::Finished(node) | Self::Abandoned(node) => node,
        }
    }

    /// Returns true if a terminal node was reached.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Drives sessions through the node cycle.
///
/// The engine holds the I/O; a [`Session`] holds the state. One engine can
/// run any number of sessions in turn.
pub struct Engine<'io> {
    presenter: &'io mut dyn Presenter,
    audio: &'io mut dyn AudioSink,
    input: &'io mut dyn LineEditor,
    config: EngineConfig,
}

impl<'io> Engine<'io> {
    /// Creates an engine with the default configuration.
    pub fn new(
        presenter: &'io mut dyn Presenter,
        audio: &'io mut dyn AudioSink,
        input: &'io mut dyn LineEditor,
    ) -> Self {
        Self {
            presenter,
            audio,
            input,
            config: EngineConfig::default(),
        }
    }

    /// Builder method to set the configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// The engine's configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Loads the script, shows the title, and positions the session at its
    /// start node.
    ///
    /// # Errors
    ///
    /// Returns an `Internal` error if the session was already started, or
    /// the error of the script's top-level code.
    pub fn start<S: ScriptHost>(&mut self, session: &mut Session<S>) -> Result<()> {
        if session.state != SessionState::Idle {
            return Err(Error::internal(format!(
                "session cannot start while {}",
                session.state
            )));
        }
        info!(
            title = session.story().title(),
            nodes = session.story().len(),
            "starting session"
        );

        if self.config.show_title {
            self.presenter.title(session.story().title())?;
        }

        let (script, story, inventory) = session.parts();
        let mut host = Host::new(
            story,
            inventory,
            &mut *self.presenter,
            &mut *self.audio,
            &self.config.messages,
        );
        script.load(&mut host)?;

        session.state = SessionState::Presenting(session.current().clone());
        Ok(())
    }

    /// Runs the node cycle for the current node.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidNode` error if the node fails validation on entry
    /// or at listing time, a `BrokenGraph` error if it no longer exists, or
    /// any hook or output error.
    pub fn present<S: ScriptHost>(&mut self, session: &mut Session<S>) -> Result<Presented> {
        let SessionState::Presenting(id) = session.state.clone() else {
            return Err(Error::internal(format!(
                "cannot present a node while {}",
                session.state
            )));
        };

        let node = entered(session, &id)?;
        debug!(node = %id, "entering node");
        let text = node.text.clone();
        let terminal = node.terminal;
        let sound = present_name(node.sound_cue.as_deref());
        let ambient = present_name(node.ambient_cue.as_deref());
        let local_pre = node.pre_hook.clone();
        let local_post = node.post_hook.clone();
        let global_pre = session.story().pre_hook().map(str::to_string);
        let global_post = session.story().post_hook().map(str::to_string);

        if let Some(name) = sound {
            self.audio.play(&Cue::once(name))?;
        }
        if let Some(name) = ambient {
            self.audio.play(&Cue::looping(name))?;
        }

        self.run_hooks(session, &id, [global_pre, local_pre])?;
        self.presenter.narrative(&text)?;
        self.run_hooks(session, &id, [global_post, local_post])?;

        if terminal {
            info!(node = %id, "reached terminal node");
            session.state = SessionState::Terminated;
            return Ok(Presented::Terminal);
        }

        let node = entered(session, &id)?;
        let listing = listing_for(node, session.inventory());
        if self.config.show_inventory {
            let items: Vec<&str> = session.inventory().items().collect();
            self.presenter
                .inventory(&self.config.messages.inventory_heading, &items)?;
        }
        self.presenter.choices(&listing)?;
        self.presenter.separator(&self.config.messages.separator)?;

        session.state = SessionState::AwaitingChoice(id);
        Ok(Presented::Choices(listing))
    }

    /// Checks one line of input against the current node's choices.
    ///
    /// Gates are computed from the inventory as it is now. Nothing changes.
    ///
    /// # Errors
    ///
    /// Returns the [`InputError`] describing why the line was rejected.
    pub fn choose<S: ScriptHost>(
        &self,
        session: &Session<S>,
        line: &str,
    ) -> std::result::Result<usize, InputError> {
        let listing = session
            .current_node()
            .map(|node| listing_for(node, session.inventory()))
            .unwrap_or_default();
        parse_selection(line, &listing)
    }

    /// Prompts until the player picks an eligible choice.
    ///
    /// Returns the 0-based index of the accepted choice, or `None` if input
    /// was closed, in which case the session is abandoned.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or showing a rejection fails.
    pub fn await_choice<S: ScriptHost>(
        &mut self,
        session: &mut Session<S>,
    ) -> Result<Option<usize>> {
        let SessionState::AwaitingChoice(id) = session.state.clone() else {
            return Err(Error::internal(format!(
                "cannot wait for a choice while {}",
                session.state
            )));
        };

        loop {
            match self.input.read_line(&self.config.messages.prompt)? {
                ReadResult::Line(line) => match self.choose(session, &line) {
                    Ok(index) => {
                        self.input.add_history(line.trim());
                        debug!(node = %id, choice = index + 1, "choice accepted");
                        return Ok(Some(index));
                    }
                    Err(err) => {
                        debug!(node = %id, %err, "input rejected");
                        self.presenter
                            .rejection(&self.config.messages.invalid_input)?;
                    }
                },
                ReadResult::Interrupted | ReadResult::Eof => {
                    info!(node = %id, "input closed, abandoning session");
                    session.state = SessionState::Abandoned;
                    return Ok(None);
                }
            }
        }
    }

    /// Applies an accepted choice and moves to its target.
    ///
    /// The target is resolved before anything changes, so a broken link
    /// leaves the pointer and the inventory as they were.
    ///
    /// # Errors
    ///
    /// Returns a `BrokenGraph` error if the target does not exist, or an
    /// output error from clearing the screen or stopping audio.
    pub fn transition<S: ScriptHost>(
        &mut self,
        session: &mut Session<S>,
        index: usize,
    ) -> Result<()> {
        let SessionState::AwaitingChoice(id) = session.state.clone() else {
            return Err(Error::internal(format!(
                "cannot transition while {}",
                session.state
            )));
        };

        let choice = session
            .current_node()
            .and_then(|node| node.choices.get(index))
            .cloned()
            .ok_or_else(|| Error::internal(format!("node '{id}' has no choice {}", index + 1)))?;

        if !session.story().contains(choice.target.as_str()) {
            let err = Error::missing_target(&id, choice.target.as_str());
            return Err(err.at_node(&id));
        }

        session.state = SessionState::Transitioning;
        if choice.remove_items_on_choice {
            let (_, _, inventory) = session.parts();
            for item in &choice.required_items {
                if inventory.remove(item) {
                    debug!(item = item.as_str(), "item used up by choice");
                }
            }
        }

        debug!(from = %id, to = %choice.target, "transition");
        session.move_to(choice.target.clone());
        if self.config.clear_on_transition {
            self.presenter.clear()?;
        }
        self.audio.stop()?;

        session.state = SessionState::Presenting(choice.target);
        Ok(())
    }

    /// Runs one full node visit: present, wait for a choice, transition.
    ///
    /// Starts the session first if it is idle. Returns the outcome once the
    /// session is over, `None` while it continues.
    ///
    /// # Errors
    ///
    /// Propagates any fatal error of the visit.
    pub fn step<S: ScriptHost>(&mut self, session: &mut Session<S>) -> Result<Option<Outcome>> {
        if session.state == SessionState::Idle {
            self.start(session)?;
        }

        match session.state {
            SessionState::Terminated => {
                return Ok(Some(Outcome::Finished(session.current().clone())));
            }
            SessionState::Abandoned => {
                return Ok(Some(Outcome::Abandoned(session.current().clone())));
            }
            SessionState::Presenting(_) => {
                if self.present(session)? == Presented::Terminal {
                    return Ok(Some(Outcome::Finished(session.current().clone())));
                }
            }
            _ => {}
        }

        match self.await_choice(session)? {
            Some(index) => {
                self.transition(session, index)?;
                Ok(None)
            }
            None => Ok(Some(Outcome::Abandoned(session.current().clone()))),
        }
    }

    /// Plays the session until it finishes or input is closed.
    ///
    /// With [`EngineConfig::pause_at_end`] set, a finished session waits for
    /// one more line before returning.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error.
    pub fn run<S: ScriptHost>(&mut self, session: &mut Session<S>) -> Result<Outcome> {
        loop {
            if let Some(outcome) = self.step(session)? {
                info!(?outcome, "session over");
                if self.config.pause_at_end && outcome.is_finished() {
                    self.input.read_line("")?;
                }
                return Ok(outcome);
            }
        }
    }

    fn run_hooks<S: ScriptHost>(
        &mut self,
        session: &mut Session<S>,
        node: &NodeId,
        hooks: [Option<String>; 2],
    ) -> Result<()> {
        let (script, story, inventory) = session.parts();
        let mut host = Host::new(
            story,
            inventory,
            &mut *self.presenter,
            &mut *self.audio,
            &self.config.messages,
        );
        for name in hooks {
            run_hook(script, name.as_deref(), node, &mut host)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Engine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Looks up and validates the node being visited.
fn entered<'s, S: ScriptHost>(session: &'s Session<S>, id: &NodeId) -> Result<&'s Node> {
    let node = session
        .story()
        .node(id.as_str())
        .ok_or_else(|| Error::unknown_node(id.as_str()).at_node(id))?;
    node.validate().map_err(|err| err.at_node(id))?;
    Ok(node)
}

fn listing_for(node: &Node, inventory: &Inventory) -> Vec<ListedChoice> {
    node.choices
        .iter()
        .enumerate()
        .map(|(index, choice)| ListedChoice {
            number: index + 1,
            text: choice.text.clone(),
            gate: choice.gate(inventory),
        })
        .collect()
}

fn present_name(name: Option<&str>) -> Option<String> {
    name.filter(|name| !name.trim().is_empty()).map(str::to_string)
}
