//=========================================================================
// Stack Snapshots
//=========================================================================
//
// Immutable descriptions of "what should be on screen": an ordered list
// of stack items, base first. Snapshots are what the back stack stores
// and what the host reconciles the live stack against.
//
// Invariant: popup items only ever form a contiguous run at the tail.
//
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::{Arguments, NavOptions};

//=== StackItem ===========================================================

/// One position of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackItem {
    destination: String,
    options: NavOptions,
    arguments: Arguments,
    is_popup: bool,
}

impl StackItem {
    pub fn new(destination: impl Into<String>, options: NavOptions, arguments: Arguments) -> Self {
        Self {
            destination: destination.into(),
            options,
            arguments,
            is_popup: false,
        }
    }

    pub fn popup(destination: impl Into<String>, options: NavOptions, arguments: Arguments) -> Self {
        Self {
            is_popup: true,
            ..Self::new(destination, options, arguments)
        }
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn options(&self) -> &NavOptions {
        &self.options
    }

    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    pub fn is_popup(&self) -> bool {
        self.is_popup
    }
}

//=== StackSnapshot =======================================================

/// Ordered stack items, index 0 is the base, the last item is visible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StackSnapshot {
    items: Vec<StackItem>,
}

impl StackSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(item: StackItem) -> Self {
        Self { items: vec![item] }
    }

    /// Builds a snapshot from raw items.
    ///
    /// Check [`StackSnapshot::is_well_formed`] for untrusted input.
    pub fn from_items(items: Vec<StackItem>) -> Self {
        Self { items }
    }

    /// Appends an item on top.
    pub fn with_item(mut self, item: StackItem) -> Self {
        debug_assert!(
            item.is_popup || !self.has_popups(),
            "base item {:?} pushed above a popup",
            item.destination
        );
        self.items.push(item);
        self
    }

    pub fn items(&self) -> &[StackItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<StackItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn top(&self) -> Option<&StackItem> {
        self.items.last()
    }

    pub fn has_popups(&self) -> bool {
        self.items.iter().any(|i| i.is_popup)
    }

    /// Copy with the popup tail removed.
    pub fn without_popups(&self) -> Self {
        Self {
            items: self.items.iter().filter(|i| !i.is_popup).cloned().collect(),
        }
    }

    /// True when no base item follows a popup item.
    pub fn is_well_formed(&self) -> bool {
        let first_popup = self.items.iter().position(|i| i.is_popup);
        match first_popup {
            Some(start) => self.items[start..].iter().all(|i| i.is_popup),
            None => true,
        }
    }

    /// `(destination, is_popup)` pairs, base first.
    pub fn layout(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.items.iter().map(|i| (i.destination.as_str(), i.is_popup))
    }

    /// Length of the longest common run from index 0 between this
    /// snapshot and `current`, comparing destination and popup flag.
    pub fn shared_prefix_len<'a, I>(&self, current: I) -> usize
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        self.layout()
            .zip(current)
            .take_while(|(target, live)| target == live)
            .count()
    }

    /// Same destinations and popup flags at every index.
    pub fn same_layout(&self, other: &StackSnapshot) -> bool {
        self.len() == other.len() && self.shared_prefix_len(other.layout()) == self.len()
    }

    pub fn destinations(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.destination.as_str()).collect()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
