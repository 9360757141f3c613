//! Player-facing strings.

use serde::{Deserialize, Serialize};

/// Every string the runtime itself shows the player.
///
/// Item templates use an `{item}` placeholder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Prompt shown while waiting for a choice.
    pub prompt: String,
    /// Shown when a selection is rejected.
    pub invalid_input: String,
    /// Heading above the inventory listing.
    pub inventory_heading: String,
    /// Shown when a script gives the player an item.
    pub item_gained: String,
    /// Shown when a script takes an item the player used.
    pub item_used: String,
    /// Shown when a script takes an item the player lost.
    pub item_lost: String,
    /// Divider drawn between sections.
    pub separator: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            prompt: ":> ".to_string(),
            invalid_input: "Invalid input!".to_string(),
            inventory_heading: "Inventory:".to_string(),
            item_gained: "You received {item}".to_string(),
            item_used: "You used {item}".to_string(),
            item_lost: "You lost {item}".to_string(),
            separator: "---------------------------".to_string(),
        }
    }
}

impl Messages {
    /// Notice for an item added to the inventory.
    #[must_use]
    pub fn item_gained(&self, item: &str) -> String {
        fill(&self.item_gained, item)
    }

    /// Notice for an item removed from the inventory.
    #[must_use]
    pub fn item_removed(&self, item: &str, lost: bool) -> String {
        if lost {
            fill(&self.item_lost, item)
        } else {
            fill(&self.item_used, item)
        }
    }
}

fn fill(template: &str, item: &str) -> String {
    template.replace("{item}", item)
}
