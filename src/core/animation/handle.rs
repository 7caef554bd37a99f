//=========================================================================
// Animation Handles
//=========================================================================
//
// Bookkeeping for transitions currently in flight.
//
// A handle targets an element by entry id, never by stack index, and
// carries a `completed` flag. Whichever of natural completion (`step`)
// or forced completion (`complete_immediately`) runs first yields the
// handle's `Completion`; every later call is a no-op.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::{NavAnimation, TransitionPhase, TransitionPlayer};

//=== Completion ==========================================================

/// What the host must do once a transition has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Nothing beyond bookkeeping (enter transitions).
    None,

    /// Release the element of the exiting entry that was animated.
    Release,
}

//=== AnimationHandle =====================================================

/// One running transition.
#[derive(Debug, Clone)]
pub struct AnimationHandle {
    id: u64,
    target: u64,
    animation: NavAnimation,
    phase: TransitionPhase,
    elapsed_ms: f32,
    completion: Completion,
    completed: bool,
}

impl AnimationHandle {
    pub fn new(
        id: u64,
        target: u64,
        animation: NavAnimation,
        phase: TransitionPhase,
        completion: Completion,
    ) -> Self {
        Self {
            id,
            target,
            animation,
            phase,
            elapsed_ms: 0.0,
            completion,
            completed: false,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Entry id of the element this handle animates.
    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn animation(&self) -> &NavAnimation {
        &self.animation
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.animation.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms / self.animation.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Advances the clock by `dt_ms` and draws one frame.
    ///
    /// Returns the completion when this step reaches the end, `None`
    /// otherwise (including when the handle was already completed).
    pub fn step<E>(
        &mut self,
        dt_ms: f32,
        element: Option<&mut E>,
        player: &mut dyn TransitionPlayer<E>,
    ) -> Option<Completion> {
        if self.completed {
            return None;
        }

        self.elapsed_ms += dt_ms.max(0.0);
        let progress = self.progress();

        if progress >= 1.0 {
            return self.finish(element, player);
        }

        if let Some(element) = element {
            if self.animation.has_effect() {
                let eased = self.animation.easing.apply(progress);
                player.apply_frame(element, &self.animation, self.phase, eased);
            }
        }
        None
    }

    /// Jumps to the final frame and yields the completion.
    ///
    /// Idempotent: a second call, or a later `step`, returns `None`.
    pub fn complete_immediately<E>(
        &mut self,
        element: Option<&mut E>,
        player: &mut dyn TransitionPlayer<E>,
    ) -> Option<Completion> {
        if self.completed {
            return None;
        }
        debug!("Completing transition {} on entry {} early", self.id, self.target);
        self.elapsed_ms = self.animation.duration_ms as f32;
        self.finish(element, player)
    }

    fn finish<E>(
        &mut self,
        element: Option<&mut E>,
        player: &mut dyn TransitionPlayer<E>,
    ) -> Option<Completion> {
        self.completed = true;

        if let Some(element) = element {
            if self.animation.has_effect() {
                player.apply_frame(element, &self.animation, self.phase, 1.0);
            }
            player.on_finish(element, &self.animation, self.phase);
        }

        Some(self.completion)
    }
}

//=== AnimationTracker ====================================================

/// Set of transitions in flight, in start order.
#[derive(Debug, Default)]
pub struct AnimationTracker {
    handles: Vec<AnimationHandle>,
    next_id: u64,
}

impl AnimationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handle with a fresh id without tracking it yet.
    pub fn create(
        &mut self,
        target: u64,
        animation: NavAnimation,
        phase: TransitionPhase,
        completion: Completion,
    ) -> AnimationHandle {
        self.next_id += 1;
        AnimationHandle::new(self.next_id, target, animation, phase, completion)
    }

    pub fn track(&mut self, handle: AnimationHandle) {
        self.handles.push(handle);
    }

    pub fn handles_mut(&mut self) -> impl Iterator<Item = &mut AnimationHandle> {
        self.handles.iter_mut()
    }

    pub fn is_running(&self, target: u64) -> bool {
        self.handles
            .iter()
            .any(|h| h.target == target && !h.completed)
    }

    /// Number of handles that have not completed.
    pub fn running_count(&self) -> usize {
        self.handles.iter().filter(|h| !h.completed).count()
    }

    /// Drops completed handles.
    pub fn prune(&mut self) {
        self.handles.retain(|h| !h.completed);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
