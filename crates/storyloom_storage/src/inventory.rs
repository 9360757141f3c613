//! The player's inventory.

/// A set of item names, kept in the order they were acquired.
///
/// Membership is all that matters for gating; the order only exists so the
/// inventory listing reads the same way every time it is shown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    items: Vec<String>,
}

impl Inventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item. Returns false if it was already held.
    pub fn add(&mut self, item: &str) -> bool {
        if self.contains(item) {
            return false;
        }
        self.items.push(item.to_string());
        true
    }

    /// Removes an item. Returns false if it was not held.
    pub fn remove(&mut self, item: &str) -> bool {
        match self.items.iter().position(|held| held == item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns true if the item is held.
    #[must_use]
    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|held| held == item)
    }

    /// Returns true if every listed item is held. An empty list is always satisfied.
    #[must_use]
    pub fn satisfies<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required.iter().all(|item| self.contains(item.as_ref()))
    }

    /// Held items in acquisition order.
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Number of items held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Inventory {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut inventory = Self::new();
        for item in iter {
            inventory.add(item.as_ref());
        }
        inventory
    }
}
