//=========================================================================
// Transition Player
//=========================================================================
//
// Adapter to whatever actually moves pixels. The host owns the clock and
// the handle bookkeeping; the player only applies eased progress to an
// element.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{NavAnimation, TransitionPhase};

//=== TransitionPlayer ====================================================

/// Applies transitions to destination elements.
///
/// Only `apply_frame` is required. `progress` is already eased and is
/// exactly `1.0` on the final frame, including when a transition is
/// forced to finish early.
pub trait TransitionPlayer<E> {
    /// Called once before the first frame.
    fn on_start(&mut self, _element: &mut E, _animation: &NavAnimation, _phase: TransitionPhase) {}

    /// Called for every frame the transition advances.
    fn apply_frame(
        &mut self,
        element: &mut E,
        animation: &NavAnimation,
        phase: TransitionPhase,
        progress: f32,
    );

    /// Called once after the final frame.
    fn on_finish(&mut self, _element: &mut E, _animation: &NavAnimation, _phase: TransitionPhase) {}
}

//=== NoopPlayer ==========================================================

/// Player that ignores every frame. Used when no player is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPlayer;

impl<E> TransitionPlayer<E> for NoopPlayer {
    fn apply_frame(&mut self, _: &mut E, _: &NavAnimation, _: TransitionPhase, _: f32) {}
}
