//=========================================================================
// Transition Animation
//=========================================================================
//
// Describes and tracks the timed transitions played on destination
// elements when they enter or leave the active stack.
//
// Architecture:
//   NavAnimation (value)  ──start──>  AnimationHandle (tracked)
//                                         │
//   NavigationHost::advance(dt) ──step──> TransitionPlayer::apply_frame
//                                         │
//                                    Completion → host (release element)
//
// Handles are force-completable exactly once. Every structural stack
// mutation completes the handles of affected entries before touching
// indices.
//
//=========================================================================

//=== Module Declarations =================================================

mod descriptor;
mod easing;
mod handle;
mod player;

//=== Public API ==========================================================

pub use descriptor::{NavAnimation, NavAnimations, TransitionEffect, TransitionPhase};
pub use easing::Easing;
pub use handle::{AnimationHandle, AnimationTracker, Completion};
pub use player::{NoopPlayer, TransitionPlayer};
