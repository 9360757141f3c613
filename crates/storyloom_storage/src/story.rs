//! The story graph.
//!
//! A [`Story`] is a stable-by-id collection of [`Node`]s. Each node owns an
//! ordered sequence of [`Choice`]s which scripts may edit while a session
//! runs. Nothing else about the graph changes after load: nodes are never
//! added, removed, or reordered, so a [`NodeId`] stays valid for the whole
//! session.
//!
//! Both sequences are persistent vectors, so cloning a story is O(1) and an
//! edited clone shares everything it did not touch with the original.

use im::{HashMap, Vector};
use storyloom_foundation::{Error, NodeId, Result};
use tracing::debug;

use crate::inventory::Inventory;

/// Whether a choice can currently be taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gate {
    /// The choice has no item requirements.
    Open,
    /// The choice has requirements and all of them are held.
    Unlocked,
    /// At least one required item is missing.
    Locked,
}

impl Gate {
    /// Returns true unless the gate is [`Gate::Locked`].
    #[must_use]
    pub const fn is_eligible(self) -> bool {
        !matches!(self, Self::Locked)
    }
}

/// A player-selectable link to another node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Choice {
    /// Text shown in the choice listing.
    pub text: String,
    /// Id of the node this choice leads to. Resolved only when chosen.
    pub target: NodeId,
    /// Items that must all be held for the choice to be eligible.
    pub required_items: Vec<String>,
    /// Whether taking the choice consumes its required items.
    pub remove_items_on_choice: bool,
}

impl Choice {
    /// Creates an ungated choice.
    #[must_use]
    pub fn new(text: impl Into<String>, target: impl Into<NodeId>) -> Self {
        Self {
            text: text.into(),
            target: target.into(),
            required_items: Vec::new(),
            remove_items_on_choice: false,
        }
    }

    /// Builder method to add required items.
    #[must_use]
    pub fn requires<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_items.extend(items.into_iter().map(Into::into));
        self
    }

    /// Builder method to make the choice consume its required items.
    #[must_use]
    pub fn consuming(mut self) -> Self {
        self.remove_items_on_choice = true;
        self
    }

    /// Evaluates the gate against an inventory.
    #[must_use]
    pub fn gate(&self, inventory: &Inventory) -> Gate {
        if self.required_items.is_empty() {
            Gate::Open
        } else if inventory.satisfies(&self.required_items) {
            Gate::Unlocked
        } else {
            Gate::Locked
        }
    }

    /// Returns true if every required item is held.
    #[must_use]
    pub fn is_eligible(&self, inventory: &Inventory) -> bool {
        self.gate(inventory).is_eligible()
    }
}

/// A single narrative beat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    /// Unique key of the node.
    pub id: NodeId,
    /// Narrative text shown on entry.
    pub text: String,
    /// Script function run before the text is shown.
    pub pre_hook: Option<String>,
    /// Script function run after the text is shown.
    pub post_hook: Option<String>,
    /// One-shot sound cue fired on entry.
    pub sound_cue: Option<String>,
    /// Looping ambient cue fired on entry.
    pub ambient_cue: Option<String>,
    /// Whether the session ends here. Choices of a terminal node are never shown.
    pub terminal: bool,
    /// Choices in listing order.
    pub choices: Vector<Choice>,
}

impl Node {
    /// Creates a non-terminal node with no choices yet.
    #[must_use]
    pub fn new(id: impl Into<NodeId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            pre_hook: None,
            post_hook: None,
            sound_cue: None,
            ambient_cue: None,
            terminal: false,
            choices: Vector::new(),
        }
    }

    /// Builder method to append a choice.
    #[must_use]
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push_back(choice);
        self
    }

    /// Builder method to set the pre-hook.
    #[must_use]
    pub fn with_pre_hook(mut self, hook: impl Into<String>) -> Self {
        self.pre_hook = Some(hook.into());
        self
    }

    /// Builder method to set the post-hook.
    #[must_use]
    pub fn with_post_hook(mut self, hook: impl Into<String>) -> Self {
        self.post_hook = Some(hook.into());
        self
    }

    /// Builder method to set the sound cue.
    #[must_use]
    pub fn with_sound_cue(mut self, cue: impl Into<String>) -> Self {
        self.sound_cue = Some(cue.into());
        self
    }

    /// Builder method to set the ambient cue.
    #[must_use]
    pub fn with_ambient_cue(mut self, cue: impl Into<String>) -> Self {
        self.ambient_cue = Some(cue.into());
        self
    }

    /// Builder method to mark the node terminal.
    #[must_use]
    pub fn terminal(mut self) -> Self {
        self.terminal = true;
        self
    }

    /// Checks the invariants a node must satisfy every time it is visited.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidNode` error naming the first violated invariant.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::invalid_node("", "id is empty"));
        }
        if self.text.is_empty() {
            return Err(Error::invalid_node(self.id.as_str(), "text is empty"));
        }
        if self.terminal {
            return Ok(());
        }
        if self.choices.is_empty() {
            return Err(Error::invalid_node(
                self.id.as_str(),
                "non-terminal node has no choices",
            ));
        }
        for (index, choice) in self.choices.iter().enumerate() {
            let number = index + 1;
            if choice.text.is_empty() {
                return Err(Error::invalid_node(
                    self.id.as_str(),
                    format!("choice {number} has empty text"),
                ));
            }
            if choice.target.is_empty() {
                return Err(Error::invalid_node(
                    self.id.as_str(),
                    format!("choice {number} has no target"),
                ));
            }
        }
        Ok(())
    }
}

/// The in-memory story graph.
#[derive(Clone, Debug)]
pub struct Story {
    title: String,
    start: NodeId,
    pre_hook: Option<String>,
    post_hook: Option<String>,
    nodes: Vector<Node>,
    index: HashMap<NodeId, usize>,
}

impl Story {
    /// Creates a story starting at its first node.
    ///
    /// Only story-level invariants are checked here: the title is non-empty,
    /// there is at least one node, and every node has its own non-empty id. Node contents
    /// are checked on every visit instead, because scripts can change them.
    ///
    /// # Errors
    ///
    /// Returns a `Load` error if a story-level invariant is violated.
    pub fn new(title: impl Into<String>, nodes: impl IntoIterator<Item = Node>) -> Result<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(Error::load("story title is empty"));
        }

        let nodes: Vector<Node> = nodes.into_iter().collect();
        let Some(first) = nodes.front() else {
            return Err(Error::load("story has no nodes"));
        };
        let start = first.id.clone();

        let mut index = HashMap::new();
        for (position, node) in nodes.iter().enumerate() {
            if node.id.as_str().trim().is_empty() {
                return Err(Error::load(format!("node {} has no id", position + 1)));
            }
            if index.contains_key(&node.id) {
                return Err(Error::load(format!("duplicate node id '{}'", node.id)));
            }
            index.insert(node.id.clone(), position);
        }

        Ok(Self {
            title,
            start,
            pre_hook: None,
            post_hook: None,
            nodes,
            index,
        })
    }

    /// Builder method to start somewhere other than the first node.
    ///
    /// # Errors
    ///
    /// Returns a `Load` error if no node has the given id.
    pub fn with_start(mut self, start: impl Into<NodeId>) -> Result<Self> {
        let start = start.into();
        if !self.contains(start.as_str()) {
            return Err(Error::load(format!("start node '{start}' does not exist")));
        }
        self.start = start;
        Ok(self)
    }

    /// Builder method to set the story-wide hooks.
    #[must_use]
    pub fn with_hooks(mut self, pre_hook: Option<String>, post_hook: Option<String>) -> Self {
        self.pre_hook = pre_hook;
        self.post_hook = post_hook;
        self
    }

    /// The story title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Id of the node a session starts at.
    #[must_use]
    pub fn start_id(&self) -> &NodeId {
        &self.start
    }

    /// Story-wide hook run before every node's own pre-hook.
    #[must_use]
    pub fn pre_hook(&self) -> Option<&str> {
        self.pre_hook.as_deref()
    }

    /// Story-wide hook run before every node's own post-hook.
    #[must_use]
    pub fn post_hook(&self) -> Option<&str> {
        self.post_hook.as_deref()
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).and_then(|&position| self.nodes.get(position))
    }

    /// Returns true if a node with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All nodes in definition order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false for a constructed story; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Inserts a choice into a node's choice list at a 0-based position.
    ///
    /// Positions `0..=len` are accepted; `len` appends.
    ///
    /// # Errors
    ///
    /// Returns a `BrokenGraph` error if the node does not exist, or a `Script`
    /// error if the position is past the end of the list.
    pub fn insert_choice(&mut self, node: &str, position: usize, choice: Choice) -> Result<()> {
        let target = self.node_mut(node)?;
        let len = target.choices.len();
        if position > len {
            return Err(Error::script(format!(
                "cannot insert a choice at position {position} of node '{node}' ({len} choices)"
            )));
        }
        debug!(node, position, text = %choice.text, target = %choice.target, "choice inserted");
        target.choices.insert(position, choice);
        Ok(())
    }

    /// Removes and returns the choice at a 0-based position of a node's choice list.
    ///
    /// # Errors
    ///
    /// Returns a `BrokenGraph` error if the node does not exist, or a `Script`
    /// error if there is no choice at that position.
    pub fn remove_choice(&mut self, node: &str, position: usize) -> Result<Choice> {
        let target = self.node_mut(node)?;
        let len = target.choices.len();
        if position >= len {
            return Err(Error::script(format!(
                "cannot remove choice at position {position} of node '{node}' ({len} choices)"
            )));
        }
        let removed = target.choices.remove(position);
        debug!(node, position, text = %removed.text, "choice removed");
        Ok(removed)
    }

    /// Lists every choice whose target does not currently resolve, as
    /// `(node, 0-based position, target)`.
    #[must_use]
    pub fn dangling_targets(&self) -> Vec<(NodeId, usize, NodeId)> {
        self.nodes
            .iter()
            .filter(|node| !node.terminal)
            .flat_map(|node| {
                node.choices
                    .iter()
                    .enumerate()
                    .filter(|(_, choice)| !self.contains(choice.target.as_str()))
                    .map(|(position, choice)| (node.id.clone(), position, choice.target.clone()))
            })
            .collect()
    }

    fn node_mut(&mut self, id: &str) -> Result<&mut Node> {
        let position = *self.index.get(id).ok_or_else(|| Error::unknown_node(id))?;
        self.nodes
            .get_mut(position)
            .ok_or_else(|| Error::internal(format!("node index for '{id}' is stale")))
    }
}
