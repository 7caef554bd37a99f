//=========================================================================
// Active Stack
//=========================================================================
//
// The live, materialized entries currently on screen, base first. Each
// entry owns the element created for it. Removed entries park in
// `PendingRemoval` while their exit transition plays.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{Arguments, NavElement, NavOptions, StackItem, StackSnapshot};

//=== ActiveEntry =========================================================

/// A materialized stack item.
pub struct ActiveEntry<E: NavElement> {
    id: u64,
    destination: String,
    options: NavOptions,
    arguments: Arguments,
    is_popup: bool,
    element: E,
}

impl<E: NavElement> ActiveEntry<E> {
    pub(crate) fn new(id: u64, item: &StackItem, element: E) -> Self {
        Self {
            id,
            destination: item.destination().to_string(),
            options: item.options().clone(),
            arguments: item.arguments().clone(),
            is_popup: item.is_popup(),
            element,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
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

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    /// Replaces options and arguments in place.
    ///
    /// The element only hears about it when the arguments changed.
    pub(crate) fn rebind(&mut self, options: NavOptions, arguments: Arguments) {
        self.options = options;
        if self.arguments != arguments {
            self.arguments = arguments;
            self.element.on_rebind(&self.arguments);
        }
    }

    /// Stack item describing this entry (deep copy).
    pub fn to_item(&self) -> StackItem {
        if self.is_popup {
            StackItem::popup(&self.destination, self.options.clone(), self.arguments.clone())
        } else {
            StackItem::new(&self.destination, self.options.clone(), self.arguments.clone())
        }
    }

    pub(crate) fn into_removal(self) -> PendingRemoval<E> {
        PendingRemoval {
            id: self.id,
            destination: self.destination,
            is_popup: self.is_popup,
            element: self.element,
        }
    }
}

//=== PendingRemoval ======================================================

/// An element that left the active stack and awaits release.
pub struct PendingRemoval<E: NavElement> {
    id: u64,
    destination: String,
    is_popup: bool,
    element: E,
}

impl<E: NavElement> PendingRemoval<E> {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn is_popup(&self) -> bool {
        self.is_popup
    }

    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    pub(crate) fn into_parts(self) -> (String, E) {
        (self.destination, self.element)
    }
}

//=== ActiveStack =========================================================

/// Entries on screen, base first.
pub struct ActiveStack<E: NavElement> {
    entries: Vec<ActiveEntry<E>>,
}

impl<E: NavElement> Default for ActiveStack<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: NavElement> ActiveStack<E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top(&self) -> Option<&ActiveEntry<E>> {
        self.entries.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut ActiveEntry<E>> {
        self.entries.last_mut()
    }

    /// Topmost entry that is not a popup.
    pub fn top_base(&self) -> Option<&ActiveEntry<E>> {
        self.entries.iter().rev().find(|e| !e.is_popup)
    }

    pub fn entries(&self) -> &[ActiveEntry<E>] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [ActiveEntry<E>] {
        &mut self.entries
    }

    pub fn get(&self, id: u64) -> Option<&ActiveEntry<E>> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut ActiveEntry<E>> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    pub(crate) fn push(&mut self, entry: ActiveEntry<E>) {
        self.entries.push(entry);
    }

    pub(crate) fn pop(&mut self) -> Option<ActiveEntry<E>> {
        self.entries.pop()
    }

    pub(crate) fn remove(&mut self, index: usize) -> ActiveEntry<E> {
        self.entries.remove(index)
    }

    /// Ids of the entries at `index` and above.
    pub fn ids_from(&self, index: usize) -> Vec<u64> {
        self.entries.iter().skip(index).map(|e| e.id).collect()
    }

    /// Number of contiguous popup entries at the top.
    pub fn popup_tail_len(&self) -> usize {
        self.entries.iter().rev().take_while(|e| e.is_popup).count()
    }

    /// Index of the `destination` popup inside the popup tail, searching
    /// from the top and stopping at the first base entry.
    pub fn find_in_popup_tail(&self, destination: &str) -> Option<usize> {
        let tail_start = self.entries.len() - self.popup_tail_len();
        (tail_start..self.entries.len())
            .rev()
            .find(|&i| self.entries[i].destination == destination)
    }

    pub fn layout(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.entries.iter().map(|e| (e.destination.as_str(), e.is_popup))
    }

    pub fn destinations(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.destination.as_str()).collect()
    }

    /// Snapshot of what is on screen (deep copy).
    pub fn to_snapshot(&self) -> StackSnapshot {
        StackSnapshot::from_items(self.entries.iter().map(ActiveEntry::to_item).collect())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
