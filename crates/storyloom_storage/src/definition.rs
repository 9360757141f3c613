//! Story definitions as they appear on disk.
//!
//! The canonical schema uses camelCase field names:
//!
//! ```json
//! {
//!   "title": "The Cellar",
//!   "start": "landing",
//!   "preHook": "beforeEveryNode",
//!   "nodes": [
//!     {
//!       "id": "landing",
//!       "text": "Stairs lead down into the dark.",
//!       "soundCue": "creak",
//!       "options": [
//!         { "text": "Unlock the door", "targetNodeId": "cellar",
//!           "requiredItems": ["key"], "removeItemsOnChoice": true }
//!       ]
//!     },
//!     { "id": "cellar", "text": "Dust everywhere.", "terminal": true }
//!   ]
//! }
//! ```
//!
//! Older stories spell the same fields as raw identifiers (`prescript`,
//! `postscript`, `sound`, `ambient`, `end`, `transfer_id`, `mandatory_items`,
//! `items_removed`); those are accepted as aliases. Nullable fields may be
//! `null` or omitted.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use storyloom_foundation::{Error, NodeId, Result};
use tracing::{info, warn};

use crate::story::{Choice, Node, Story};

/// Top-level story definition.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryDefinition {
    /// Story title; must be non-empty.
    #[serde(default)]
    pub title: Option<String>,
    /// Optional explicit start node; defaults to the first node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Story-wide pre-hook.
    #[serde(default, alias = "prescript", skip_serializing_if = "Option::is_none")]
    pub pre_hook: Option<String>,
    /// Story-wide post-hook.
    #[serde(default, alias = "postscript", skip_serializing_if = "Option::is_none")]
    pub post_hook: Option<String>,
    /// Nodes in definition order.
    #[serde(default)]
    pub nodes: Option<Vec<NodeDefinition>>,
}

/// A node as written in a story file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDefinition {
    /// Node id.
    #[serde(default)]
    pub id: Option<String>,
    /// Narrative text.
    #[serde(default)]
    pub text: Option<String>,
    /// Pre-hook name.
    #[serde(default, alias = "prescript", skip_serializing_if = "Option::is_none")]
    pub pre_hook: Option<String>,
    /// Post-hook name.
    #[serde(default, alias = "postscript", skip_serializing_if = "Option::is_none")]
    pub post_hook: Option<String>,
    /// One-shot sound cue.
    #[serde(default, alias = "sound", skip_serializing_if = "Option::is_none")]
    pub sound_cue: Option<String>,
    /// Looping ambient cue.
    #[serde(default, alias = "ambient", skip_serializing_if = "Option::is_none")]
    pub ambient_cue: Option<String>,
    /// Whether the node ends the story.
    #[serde(default, alias = "end")]
    pub terminal: bool,
    /// Choices; required unless terminal (checked when the node is visited).
    #[serde(default)]
    pub options: Option<Vec<ChoiceDefinition>>,
}

/// A choice as written in a story file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceDefinition {
    /// Choice text.
    #[serde(default)]
    pub text: Option<String>,
    /// Target node id.
    #[serde(default, alias = "transfer_id")]
    pub target_node_id: Option<String>,
    /// Items required to take the choice.
    #[serde(default, alias = "mandatory_items", skip_serializing_if = "Option::is_none")]
    pub required_items: Option<Vec<String>>,
    /// Whether taking the choice consumes the required items.
    #[serde(default, alias = "items_removed")]
    pub remove_items_on_choice: bool,
}

impl From<ChoiceDefinition> for Choice {
    fn from(def: ChoiceDefinition) -> Self {
        Self {
            text: def.text.unwrap_or_default(),
            target: NodeId::new(def.target_node_id.unwrap_or_default()),
            required_items: def.required_items.unwrap_or_default(),
            remove_items_on_choice: def.remove_items_on_choice,
        }
    }
}

impl From<NodeDefinition> for Node {
    fn from(def: NodeDefinition) -> Self {
        Self {
            id: NodeId::new(def.id.unwrap_or_default()),
            text: def.text.unwrap_or_default(),
            pre_hook: def.pre_hook,
            post_hook: def.post_hook,
            sound_cue: def.sound_cue,
            ambient_cue: def.ambient_cue,
            terminal: def.terminal,
            choices: def
                .options
                .unwrap_or_default()
                .into_iter()
                .map(Choice::from)
                .collect(),
        }
    }
}

impl StoryDefinition {
    /// Converts the definition into a playable story.
    ///
    /// Choice targets are not required to resolve: the graph can be edited
    /// while a session runs, so a dangling target is only an error if it is
    /// actually chosen. Dangling targets are logged as warnings.
    ///
    /// # Errors
    ///
    /// Returns a `Load` error if a story-level invariant is violated.
    pub fn into_story(self) -> Result<Story> {
        let title = self.title.unwrap_or_default();
        let nodes = self.nodes.unwrap_or_default();
        let mut story = Story::new(title, nodes.into_iter().map(Node::from))?
            .with_hooks(self.pre_hook, self.post_hook);
        if let Some(start) = self.start {
            story = story.with_start(start)?;
        }

        for (node, position, target) in story.dangling_targets() {
            warn!(%node, choice = position + 1, %target, "choice links to a missing node");
        }
        info!(title = story.title(), nodes = story.len(), "story loaded");
        Ok(story)
    }
}

/// Parses and loads a story from JSON text.
///
/// # Errors
///
/// Returns a `Load` error if the JSON is malformed or a story-level invariant is violated.
pub fn load_story_str(json: &str) -> Result<Story> {
    let definition: StoryDefinition =
        serde_json::from_str(json).map_err(|e| Error::load(format!("invalid story JSON: {e}")))?;
    definition.into_story()
}

/// Loads a story from a JSON file.
///
/// # Errors
///
/// Returns an `Io` error if the file cannot be read, or a `Load` error if it
/// is not a valid story.
pub fn load_story_file<P: AsRef<Path>>(path: P) -> Result<Story> {
    let json = fs::read_to_string(path.as_ref()).map_err(|e| {
        Error::io(format!(
            "failed to read story '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    load_story_str(&json)
}
