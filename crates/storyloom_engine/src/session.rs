//! Session state for one run of a story.

use std::fmt;

use storyloom_foundation::NodeId;
use storyloom_host::ScriptHost;
use storyloom_storage::{Inventory, Node, Story};

/// Where a session is in the node cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Created but not started; the script has not been loaded.
    Idle,
    /// About to run the node cycle for this node.
    Presenting(NodeId),
    /// Choices for this node are listed and the player is being asked.
    AwaitingChoice(NodeId),
    /// A choice was accepted and is being applied.
    Transitioning,
    /// A terminal node was reached.
    Terminated,
    /// The player closed input before reaching a terminal node.
    Abandoned,
}

impl SessionState {
    /// Returns true once the session can make no further progress.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Terminated | Self::Abandoned)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Presenting(node) => write!(f, "presenting '{node}'"),
            Self::AwaitingChoice(node) => write!(f, "awaiting a choice at '{node}'"),
            Self::Transitioning => write!(f, "transitioning"),
            Self::Terminated => write!(f, "terminated"),
            Self::Abandoned => write!(f, "abandoned"),
        }
    }
}

/// Everything one run of a story owns.
///
/// The loaded story is kept untouched; play happens on a working copy that
/// scripts may edit. Cloning a [`Story`] shares structure, so this costs
/// nothing up front.
pub struct Session<S> {
    original: Story,
    story: Story,
    current: NodeId,
    inventory: Inventory,
    script: S,
    pub(crate) state: SessionState,
}

impl<S: ScriptHost> Session<S> {
    /// Creates a session positioned at the story's start node.
    #[must_use]
    pub fn new(story: Story, script: S) -> Self {
        Self {
            current: story.start_id().clone(),
            story: story.clone(),
            original: story,
            inventory: Inventory::new(),
            script,
            state: SessionState::Idle,
        }
    }

    /// The story being played, including any script edits.
    #[must_use]
    pub fn story(&self) -> &Story {
        &self.story
    }

    /// The story as it was loaded.
    #[must_use]
    pub fn original(&self) -> &Story {
        &self.original
    }

    /// Id of the current node.
    #[must_use]
    pub fn current(&self) -> &NodeId {
        &self.current
    }

    /// The current node, if it exists.
    #[must_use]
    pub fn current_node(&self) -> Option<&Node> {
        self.story.node(self.current.as_str())
    }

    /// The player's inventory.
    #[must_use]
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// The script host.
    #[must_use]
    pub fn script(&self) -> &S {
        &self.script
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Returns true once a terminal node was reached or input was closed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Moves the pointer to another node.
    pub(crate) fn move_to(&mut self, node: NodeId) {
        self.current = node;
    }

    /// Borrows the parts a script call needs, all at once.
    pub(crate) fn parts(&mut self) -> (&mut S, &mut Story, &mut Inventory) {
        (&mut self.script, &mut self.story, &mut self.inventory)
    }
}

impl<S> fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("story", &self.story.title())
            .field("current", &self.current)
            .field("inventory", &self.inventory)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
