//! The host API: everything a script is allowed to do.
//!
//! | Operation | Effect |
//! |---|---|
//! | [`Host::print`] | Render text now, optionally colored |
//! | [`Host::clear_screen`] | Clear the presentation surface |
//! | [`Host::add_item`] | Add an item if absent, notify the player |
//! | [`Host::remove_item`] | Remove an item if present, notify the player |
//! | [`Host::set_cue`] | Start a sound cue now |
//! | [`Host::print_separator`] | Draw a divider |
//! | [`Host::insert_option`] | Insert a choice into a node |
//! | [`Host::remove_option`] | Remove a choice from a node |
//!
//! A [`Host`] only lives for the duration of one hook call. It borrows the
//! session's story and inventory, so every edit is visible to the engine's
//! next listing pass and nothing is ever written back to the story file.

use storyloom_foundation::{Color, Result};
use storyloom_storage::{Choice, Inventory, Story};
use tracing::debug;

use crate::messages::Messages;
use crate::surface::{AudioSink, Cue, Presenter};

/// Scoped access to session state for one script call.
pub struct Host<'a> {
    story: &'a mut Story,
    inventory: &'a mut Inventory,
    presenter: &'a mut dyn Presenter,
    audio: &'a mut dyn AudioSink,
    messages: &'a Messages,
}

impl<'a> Host<'a> {
    /// Borrows everything a script may touch.
    pub fn new(
        story: &'a mut Story,
        inventory: &'a mut Inventory,
        presenter: &'a mut dyn Presenter,
        audio: &'a mut dyn AudioSink,
        messages: &'a Messages,
    ) -> Self {
        Self {
            story,
            inventory,
            presenter,
            audio,
            messages,
        }
    }

    /// Read-only view of the story.
    #[must_use]
    pub fn story(&self) -> &Story {
        &*self.story
    }

    /// Read-only view of the inventory.
    #[must_use]
    pub fn inventory(&self) -> &Inventory {
        &*self.inventory
    }

    /// Renders text immediately.
    ///
    /// # Errors
    ///
    /// Returns a `Script` error for an unknown color name, or whatever the
    /// presenter returns.
    pub fn print(&mut self, text: &str, color: Option<&str>) -> Result<()> {
        let color = color.map(str::parse::<Color>).transpose()?;
        self.presenter.print(text, color)
    }

    /// Clears the presentation surface.
    ///
    /// # Errors
    ///
    /// Propagates presenter errors.
    pub fn clear_screen(&mut self) -> Result<()> {
        self.presenter.clear()
    }

    /// Adds an item. The player is only notified if the item was not already held.
    ///
    /// Returns whether the inventory changed.
    ///
    /// # Errors
    ///
    /// Propagates presenter errors.
    pub fn add_item(&mut self, item: &str) -> Result<bool> {
        if !self.inventory.add(item) {
            return Ok(false);
        }
        debug!(item, "item added");
        self.presenter.notice(&self.messages.item_gained(item))?;
        Ok(true)
    }

    /// Removes an item. The player is only notified if the item was held; the
    /// message depends on whether the item was lost or used.
    ///
    /// Returns whether the inventory changed.
    ///
    /// # Errors
    ///
    /// Propagates presenter errors.
    pub fn remove_item(&mut self, item: &str, lost: bool) -> Result<bool> {
        if !self.inventory.remove(item) {
            return Ok(false);
        }
        debug!(item, lost, "item removed");
        self.presenter
            .notice(&self.messages.item_removed(item, lost))?;
        Ok(true)
    }

    /// Starts a sound cue.
    ///
    /// # Errors
    ///
    /// Propagates audio sink errors.
    pub fn set_cue(&mut self, name: &str, looping: bool) -> Result<()> {
        self.audio.play(&Cue {
            name: name.to_string(),
            looping,
        })
    }

    /// Draws a divider.
    ///
    /// # Errors
    ///
    /// Propagates presenter errors.
    pub fn print_separator(&mut self) -> Result<()> {
        self.presenter.separator(&self.messages.separator)
    }

    /// Inserts a choice into a node's choice list at a 0-based position.
    ///
    /// # Errors
    ///
    /// Returns a `BrokenGraph` error for an unknown node and a `Script` error
    /// for a position past the end of the list.
    pub fn insert_option(&mut self, node: &str, position: usize, choice: Choice) -> Result<()> {
        self.story.insert_choice(node, position, choice)
    }

    /// Removes the choice at a 0-based position of a node's choice list.
    ///
    /// # Errors
    ///
    /// Returns a `BrokenGraph` error for an unknown node and a `Script` error
    /// if there is no choice at that position.
    pub fn remove_option(&mut self, node: &str, position: usize) -> Result<Choice> {
        self.story.remove_choice(node, position)
    }
}
