//=========================================================================
// Snapshot Reconciliation
//=========================================================================
//
// Turns the active stack into a target snapshot with the least work:
//
//   active:  [Home, Shop, (Dialog)]
//   target:  [Home, Shop, (Confirm)]
//             └── prefix 2 ─┘
//
//   - prefix entries are rebound in place (no re-creation)
//   - entries above the prefix leave top-down
//   - target items above the prefix are created and enter bottom-up
//
// Only the topmost leaving entry plays the exit transition and only the
// topmost arriving entry plays the enter transition.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::{ActiveEntry, NavElement, NavigationError, NavigationHost, StackItem, StackSnapshot};
use crate::core::animation::{Completion, NavAnimation, TransitionPhase};
use crate::core::events::{DestinationChanged, EnteredDestination, ExitedDestination};

impl<E: NavElement> NavigationHost<E> {
    //--- Apply ------------------------------------------------------------

    /// Makes the active stack match `target`.
    ///
    /// Every element `target` needs is created before anything else
    /// happens, so a failing factory leaves the host untouched.
    pub(super) fn apply_snapshot(
        &mut self,
        target: &StackSnapshot,
        exit: Option<NavAnimation>,
        enter: Option<NavAnimation>,
    ) -> Result<(), NavigationError> {
        let prefix = target.shared_prefix_len(self.active.layout());
        let created = self.create_elements(&target.items()[prefix..])?;
        self.reconcile(target, prefix, created, exit, enter);
        Ok(())
    }

    pub(super) fn create_elements(&self, items: &[StackItem]) -> Result<Vec<E>, NavigationError> {
        items
            .iter()
            .map(|item| self.registry.create(item.destination(), item.arguments()))
            .collect()
    }

    /// Keeps the first `prefix` entries, replaces the rest with `created`
    /// (one element per target item above `prefix`).
    pub(super) fn reconcile(
        &mut self,
        target: &StackSnapshot,
        prefix: usize,
        created: Vec<E>,
        exit: Option<NavAnimation>,
        enter: Option<NavAnimation>,
    ) {
        debug_assert!(target.is_well_formed(), "popups must form the top run of a snapshot");
        debug_assert_eq!(created.len(), target.len() - prefix);
        let arriving = &target.items()[prefix..];

        for (entry, item) in self.active.entries_mut().iter_mut().zip(target.items()).take(prefix) {
            entry.rebind(item.options().clone(), item.arguments().clone());
        }

        for id in self.active.ids_from(prefix) {
            self.complete_animations_for(id);
        }

        let mut exit = exit;
        let mut enter = enter;
        while self.active.len() > prefix {
            let Some(entry) = self.active.pop() else {
                break;
            };
            self.retire_entry(entry, exit.take());
        }

        let new_top = target.len().saturating_sub(1);
        for (index, (item, element)) in arriving.iter().zip(created).enumerate() {
            let id = self.next_entry_id();
            let mut entry = ActiveEntry::new(id, item, element);
            debug!("Entering {:?} (popup: {})", item.destination(), item.is_popup());

            entry.element_mut().on_enter(item.arguments());
            self.events.publish(EnteredDestination {
                destination: item.destination().to_string(),
                is_popup: item.is_popup(),
            });
            self.active.push(entry);

            if prefix + index == new_top {
                if let Some(animation) = enter.take() {
                    self.start_transition(id, animation, TransitionPhase::Enter, Completion::None);
                }
            }
        }

        self.refresh_top();
    }

    //--- Removal ----------------------------------------------------------

    /// Takes an entry off screen.
    ///
    /// The element is released once `exit` finishes, or right away when
    /// there is no exit transition.
    pub(super) fn retire_entry(&mut self, mut entry: ActiveEntry<E>, exit: Option<NavAnimation>) {
        debug!("Exiting {:?} (popup: {})", entry.destination(), entry.is_popup());

        self.events.publish(ExitedDestination {
            destination: entry.destination().to_string(),
            is_popup: entry.is_popup(),
        });
        entry.element_mut().on_exit();

        let id = entry.id();
        self.pending.push(entry.into_removal());

        match exit {
            Some(animation) => {
                self.start_transition(id, animation, TransitionPhase::Exit, Completion::Release)
            }
            None => self.release_pending(id),
        }
    }

    /// Removes the active entry at `index` without touching the ones
    /// around it.
    pub(super) fn remove_active_at(&mut self, index: usize, exit: Option<NavAnimation>) {
        let Some(id) = self.active.entries().get(index).map(|e| e.id()) else {
            return;
        };
        self.complete_animations_for(id);
        let entry = self.active.remove(index);
        self.retire_entry(entry, exit);
    }

    //--- Top Bookkeeping --------------------------------------------------

    /// Syncs the current destination and pop pair with the top entry.
    pub(super) fn refresh_top(&mut self) {
        let (current, pop_enter, pop_exit) = match self.active.top() {
            Some(top) => (
                Some(top.destination().to_string()),
                top.options().animations.pop_enter.clone(),
                top.options().animations.pop_exit.clone(),
            ),
            None => (None, None, None),
        };

        self.pop_enter = pop_enter;
        self.pop_exit = pop_exit;

        if current == self.current_destination {
            return;
        }

        let previous = std::mem::replace(&mut self.current_destination, current.clone());
        debug!("Current destination {:?} → {:?}", previous, current);
        self.events.publish(DestinationChanged { previous, current });
        self.persist_destination();
    }

    /// Drops back stack entries that would return to what is already on
    /// screen.
    pub(super) fn trim_back_stack_to_active(&mut self) {
        let current = self.active.to_snapshot();
        let before = self.back_stack.len();
        self.back_stack.retain(|entry| !entry.snapshot().same_layout(&current));

        let trimmed = before - self.back_stack.len();
        if trimmed > 0 {
            debug!("Trimmed {} back stack entries matching the active stack", trimmed);
        }
    }
}
