//! Story graph, choices, inventory, and story loading for Storyloom.
//!
//! This crate provides:
//! - [`Story`] - The live node graph, editable one node's choices at a time
//! - [`Node`] and [`Choice`] - Narrative beats and the links between them
//! - [`Inventory`] - The set of items that gates choices
//! - [`load_story_str`] / [`load_story_file`] - JSON story loading

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod definition;
pub mod inventory;
pub mod story;

pub use definition::{
    ChoiceDefinition, NodeDefinition, StoryDefinition, load_story_file, load_story_str,
};
pub use inventory::Inventory;
pub use story::{Choice, Gate, Node, Story};
