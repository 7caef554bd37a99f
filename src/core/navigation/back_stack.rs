//=========================================================================
// Back Stack & Saved States
//=========================================================================
//
// LIFO history of snapshots the user can navigate back to, plus the
// per-destination sub-stacks parked by `pop_up_to_save_state`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::{Arguments, NavOptions, StackSnapshot};

//=== BackStackEntry ======================================================

/// A snapshot to return to, labelled with its visible destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackStackEntry {
    destination: String,
    options: NavOptions,
    arguments: Arguments,
    snapshot: StackSnapshot,
}

impl BackStackEntry {
    /// Captures `snapshot`, labelled by its top item.
    ///
    /// Returns `None` for an empty snapshot, which has nothing to return to.
    pub fn capture(snapshot: StackSnapshot) -> Option<Self> {
        let top = snapshot.top()?;
        Some(Self {
            destination: top.destination().to_string(),
            options: top.options().clone(),
            arguments: top.arguments().clone(),
            snapshot,
        })
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

    pub fn snapshot(&self) -> &StackSnapshot {
        &self.snapshot
    }
}

//=== BackStack ===========================================================

/// Navigation history, oldest entry first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackStack {
    entries: Vec<BackStackEntry>,
}

impl BackStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a stack from entries listed oldest first.
    pub fn from_entries(entries: Vec<BackStackEntry>) -> Self {
        Self { entries }
    }

    pub fn push(&mut self, entry: BackStackEntry) {
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<BackStackEntry> {
        self.entries.pop()
    }

    pub fn top(&self) -> Option<&BackStackEntry> {
        self.entries.last()
    }

    pub fn bottom(&self) -> Option<&BackStackEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &BackStackEntry> {
        self.entries.iter()
    }

    pub fn destinations(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.destination.as_str()).collect()
    }

    /// Index of the most recent entry labelled `destination`.
    pub fn rposition(&self, destination: &str) -> Option<usize> {
        self.entries.iter().rposition(|e| e.destination == destination)
    }

    /// Removes and returns every entry from `index` upward, oldest first.
    pub fn split_off(&mut self, index: usize) -> Vec<BackStackEntry> {
        let index = index.min(self.entries.len());
        self.entries.split_off(index)
    }

    /// Pops entries until the most recent `destination` entry is on top.
    ///
    /// With `inclusive` that entry is popped too. Returns the popped
    /// entries oldest first, or `None` (stack untouched) when no entry
    /// is labelled `destination`.
    pub fn pop_to(&mut self, destination: &str, inclusive: bool) -> Option<Vec<BackStackEntry>> {
        let index = self.rposition(destination)?;
        let cut = if inclusive { index } else { index + 1 };
        Some(self.split_off(cut))
    }

    /// Pops entries until one labelled like the bottom entry is on top.
    ///
    /// The bottom entry itself always survives. Returns the number of
    /// popped entries.
    pub fn pop_to_root(&mut self) -> usize {
        let Some(root) = self.bottom().map(|e| e.destination.clone()) else {
            return 0;
        };

        let mut popped = 0;
        while self.entries.len() > 1 {
            match self.top() {
                Some(top) if top.destination != root => {
                    self.entries.pop();
                    popped += 1;
                }
                _ => break,
            }
        }
        popped
    }

    /// Keeps only the entries for which `keep` returns true.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&BackStackEntry) -> bool,
    {
        self.entries.retain(keep);
    }
}

//=== SavedStates =========================================================

/// Sub-stacks parked by destination until a restoring navigation claims them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedStates {
    stacks: HashMap<String, Vec<BackStackEntry>>,
}

impl SavedStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parks `entries` (oldest first) under the destination of the oldest one.
    ///
    /// Returns the key used, or `None` when `entries` is empty.
    pub fn save(&mut self, entries: Vec<BackStackEntry>) -> Option<String> {
        let key = entries.first()?.destination.clone();
        debug!("Saving {} back stack entries under {:?}", entries.len(), key);
        self.stacks.insert(key.clone(), entries);
        Some(key)
    }

    /// Removes and returns the sub-stack saved for `destination`.
    pub fn take(&mut self, destination: &str) -> Option<Vec<BackStackEntry>> {
        self.stacks.remove(destination)
    }

    pub fn contains(&self, destination: &str) -> bool {
        self.stacks.contains_key(destination)
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    pub fn clear(&mut self) {
        self.stacks.clear();
    }

    /// Every saved entry, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &BackStackEntry> {
        self.stacks.values().flatten()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
