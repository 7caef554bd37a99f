//=========================================================================
// Animation Descriptors
//=========================================================================
//
// Value types describing a transition: what visual effect to apply, for
// how long, and with which easing curve. Descriptors are plain data so
// they can be stored in options, back stack entries and saved state.
//
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::Easing;

//=== TransitionEffect ====================================================

/// The visual effect a transition player applies each frame.
///
/// `None` means the transition has no per-frame visual; it only delays
/// the completion (for example, keeping an exiting element alive).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionEffect {
    #[default]
    None,
    Fade,
    SlideLeft,
    SlideRight,
    SlideUp,
    SlideDown,
    Scale,
    /// Effect resolved by name inside the application's player.
    Custom(String),
}

//=== TransitionPhase =====================================================

/// Whether a transition brings an element in or takes it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionPhase {
    Enter,
    Exit,
}

//=== NavAnimation ========================================================

/// A single timed transition.
///
/// ```
/// use aetheric_navigation::core::animation::{Easing, NavAnimation, TransitionEffect};
///
/// let fade = NavAnimation::new(TransitionEffect::Fade, 250).with_easing(Easing::QuadOut);
/// assert_eq!(fade.duration_ms, 250);
/// assert!(!fade.is_instant());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NavAnimation {
    pub effect: TransitionEffect,
    pub duration_ms: u32,
    #[serde(default)]
    pub easing: Easing,
}

impl NavAnimation {
    pub fn new(effect: TransitionEffect, duration_ms: u32) -> Self {
        Self {
            effect,
            duration_ms,
            easing: Easing::Linear,
        }
    }

    pub fn fade(duration_ms: u32) -> Self {
        Self::new(TransitionEffect::Fade, duration_ms)
    }

    pub fn slide_left(duration_ms: u32) -> Self {
        Self::new(TransitionEffect::SlideLeft, duration_ms)
    }

    pub fn slide_right(duration_ms: u32) -> Self {
        Self::new(TransitionEffect::SlideRight, duration_ms)
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Zero-length transitions complete inline when started.
    pub fn is_instant(&self) -> bool {
        self.duration_ms == 0
    }

    /// Whether the player should be asked to draw frames for this transition.
    pub fn has_effect(&self) -> bool {
        self.effect != TransitionEffect::None
    }
}

//=== NavAnimations =======================================================

/// The four transitions attached to a navigation request.
///
/// `enter`/`exit` play on forward navigation. `pop_enter`/`pop_exit` are
/// remembered by the host and played when the user navigates back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavAnimations {
    #[serde(default)]
    pub enter: Option<NavAnimation>,
    #[serde(default)]
    pub exit: Option<NavAnimation>,
    #[serde(default)]
    pub pop_enter: Option<NavAnimation>,
    #[serde(default)]
    pub pop_exit: Option<NavAnimation>,
}

impl NavAnimations {
    /// No transitions at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Slide in from the right going forward, slide back going back.
    pub fn slide(duration_ms: u32) -> Self {
        Self {
            enter: Some(NavAnimation::slide_left(duration_ms)),
            exit: Some(NavAnimation::slide_left(duration_ms)),
            pop_enter: Some(NavAnimation::slide_right(duration_ms)),
            pop_exit: Some(NavAnimation::slide_right(duration_ms)),
        }
    }

    /// Cross-fade in both directions.
    pub fn fade(duration_ms: u32) -> Self {
        let fade = NavAnimation::fade(duration_ms);
        Self {
            enter: Some(fade.clone()),
            exit: Some(fade.clone()),
            pop_enter: Some(fade.clone()),
            pop_exit: Some(fade),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.enter.is_none() && self.exit.is_none() && self.pop_enter.is_none() && self.pop_exit.is_none()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
