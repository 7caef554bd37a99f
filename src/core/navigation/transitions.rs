//=========================================================================
// Transition Driver
//=========================================================================
//
// Connects the host's entries to the animation tracker.
//
// Handles address elements by entry id. The element is looked up in the
// active stack first and then among pending removals, so a handle never
// points at a stale stack index.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::{ActiveStack, NavElement, NavigationHost, PendingRemoval};
use crate::core::animation::{Completion, NavAnimation, TransitionPhase};

//=== Element Lookup ======================================================

fn element_for<'a, E: NavElement>(
    active: &'a mut ActiveStack<E>,
    pending: &'a mut [PendingRemoval<E>],
    id: u64,
) -> Option<&'a mut E> {
    if let Some(entry) = active.get_mut(id) {
        return Some(entry.element_mut());
    }
    pending
        .iter_mut()
        .find(|p| p.id() == id)
        .map(PendingRemoval::element_mut)
}

impl<E: NavElement> NavigationHost<E> {
    //--- Frame Update -----------------------------------------------------

    /// Advances every running transition by `dt_ms` milliseconds.
    ///
    /// Call once per frame. Exit transitions that finish here release
    /// their elements.
    pub fn advance(&mut self, dt_ms: f32) {
        let mut finished = Vec::new();

        for handle in self.animations.handles_mut() {
            let target = handle.target();
            let element = element_for(&mut self.active, &mut self.pending, target);
            if let Some(completion) = handle.step(dt_ms, element, &mut *self.player) {
                finished.push((target, completion));
            }
        }

        self.animations.prune();
        for (target, completion) in finished {
            self.run_completion(target, completion);
        }
    }

    //--- Starting ---------------------------------------------------------

    /// Starts `animation` on the entry `target`.
    ///
    /// Zero-duration animations finish inline. An animation without an
    /// effect still runs its full duration before completing.
    pub(super) fn start_transition(
        &mut self,
        target: u64,
        animation: NavAnimation,
        phase: TransitionPhase,
        completion: Completion,
    ) {
        let mut handle = self.animations.create(target, animation, phase, completion);
        let mut element = element_for(&mut self.active, &mut self.pending, target);
        let player = &mut *self.player;

        if let Some(element) = element.as_deref_mut() {
            player.on_start(element, handle.animation(), phase);
        }

        if handle.animation().is_instant() {
            if let Some(completion) = handle.complete_immediately(element, player) {
                self.run_completion(target, completion);
            }
            return;
        }

        debug!(
            "Started {:?} transition on entry {} ({} ms)",
            phase,
            target,
            handle.animation().duration_ms
        );
        self.animations.track(handle);
    }

    //--- Forced Completion ------------------------------------------------

    /// Jumps every transition on `target` to its final frame.
    pub(super) fn complete_animations_for(&mut self, target: u64) {
        if !self.animations.is_running(target) {
            return;
        }

        let mut finished = Vec::new();
        for handle in self.animations.handles_mut() {
            if handle.target() != target {
                continue;
            }
            let element = element_for(&mut self.active, &mut self.pending, target);
            if let Some(completion) = handle.complete_immediately(element, &mut *self.player) {
                finished.push(completion);
            }
        }

        self.animations.prune();
        for completion in finished {
            self.run_completion(target, completion);
        }
    }

    /// Jumps every running transition to its final frame.
    pub(super) fn complete_all_animations(&mut self) {
        let mut finished = Vec::new();

        for handle in self.animations.handles_mut() {
            let target = handle.target();
            let element = element_for(&mut self.active, &mut self.pending, target);
            if let Some(completion) = handle.complete_immediately(element, &mut *self.player) {
                finished.push((target, completion));
            }
        }

        self.animations.prune();
        for (target, completion) in finished {
            self.run_completion(target, completion);
        }
    }

    //--- Completion -------------------------------------------------------

    fn run_completion(&mut self, target: u64, completion: Completion) {
        match completion {
            Completion::None => {}
            Completion::Release => self.release_pending(target),
        }
    }

    /// Hands the element of a pending removal back to the registry.
    pub(super) fn release_pending(&mut self, id: u64) {
        let Some(index) = self.pending.iter().position(|p| p.id() == id) else {
            return;
        };
        let (destination, element) = self.pending.remove(index).into_parts();
        debug!("Releasing element of {:?}", destination);
        self.registry.release(&destination, element);
    }
}
