//=========================================================================
// Navigation Options
//=========================================================================
//
// Per-request configuration describing how a navigation affects the back
// stack, how popups are layered, and which transitions play.
//
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::Arguments;
use crate::core::animation::NavAnimations;

//=== Strategies ==========================================================

/// How the back stack is trimmed before a plain navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackStrategy {
    #[default]
    None,
    /// Forget the whole history.
    PopAll,
    /// Pop back to the root destination.
    PopToRoot,
    /// Pop until `pop_up_to_destination` is on top of the back stack.
    PopToSpecificDestination,
}

/// Whether the request opens an overlay instead of a screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PopupStrategy {
    #[default]
    None,
    /// Layer the popup over whatever is active.
    PopupOnCurrent,
    /// Make sure `popup_base_destination` is the active screen first.
    EnsureBaseAndPopup,
}

/// What to do with popups that are already open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PopupExistingStrategy {
    #[default]
    None,
    ReplaceTop,
    PushNew,
}

//=== NavOptions ==========================================================

/// Options for a single navigation request.
///
/// `Clone` is a deep copy; the host clones options into every stack item
/// and back stack entry it stores.
///
/// ```
/// use aetheric_navigation::core::navigation::{NavOptions, PopupStrategy, StackStrategy};
///
/// let opts = NavOptions::new()
///     .with_stack_strategy(StackStrategy::PopAll)
///     .single_top();
/// assert!(opts.launch_single_top);
///
/// let dialog = NavOptions::popup();
/// assert_eq!(dialog.popup_strategy, PopupStrategy::PopupOnCurrent);
/// assert_eq!(dialog.without_popup().popup_strategy, PopupStrategy::None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavOptions {
    pub stack_strategy: StackStrategy,
    pub popup_strategy: PopupStrategy,
    pub popup_existing_strategy: PopupExistingStrategy,

    /// Target of `StackStrategy::PopToSpecificDestination`.
    pub pop_up_to_destination: Option<String>,
    pub pop_up_to_inclusive: bool,
    /// Keep the popped entries so a later `restore_state` request can bring them back.
    pub pop_up_to_save_state: bool,

    /// Screen that must sit under the popup (`EnsureBaseAndPopup` only).
    pub popup_base_destination: Option<String>,
    pub popup_base_arguments: Arguments,

    pub restore_state: bool,
    pub launch_single_top: bool,
    pub animations: NavAnimations,
}

impl NavOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for a popup layered over the current screen.
    pub fn popup() -> Self {
        Self {
            popup_strategy: PopupStrategy::PopupOnCurrent,
            ..Self::default()
        }
    }

    /// Options for a popup that requires `base` underneath.
    pub fn popup_over(base: impl Into<String>, base_arguments: Arguments) -> Self {
        Self {
            popup_strategy: PopupStrategy::EnsureBaseAndPopup,
            popup_base_destination: Some(base.into()),
            popup_base_arguments: base_arguments,
            ..Self::default()
        }
    }

    pub fn with_stack_strategy(mut self, strategy: StackStrategy) -> Self {
        self.stack_strategy = strategy;
        self
    }

    pub fn with_popup_existing(mut self, strategy: PopupExistingStrategy) -> Self {
        self.popup_existing_strategy = strategy;
        self
    }

    /// Pop the back stack up to `destination` before navigating.
    pub fn pop_up_to(mut self, destination: impl Into<String>, inclusive: bool) -> Self {
        self.stack_strategy = StackStrategy::PopToSpecificDestination;
        self.pop_up_to_destination = Some(destination.into());
        self.pop_up_to_inclusive = inclusive;
        self
    }

    pub fn saving_state(mut self) -> Self {
        self.pop_up_to_save_state = true;
        self
    }

    pub fn restoring_state(mut self) -> Self {
        self.restore_state = true;
        self
    }

    pub fn single_top(mut self) -> Self {
        self.launch_single_top = true;
        self
    }

    pub fn with_animations(mut self, animations: NavAnimations) -> Self {
        self.animations = animations;
        self
    }

    pub fn is_popup(&self) -> bool {
        self.popup_strategy != PopupStrategy::None
    }

    /// Copy with every popup-related field cleared.
    pub fn without_popup(&self) -> Self {
        Self {
            popup_strategy: PopupStrategy::None,
            popup_existing_strategy: PopupExistingStrategy::None,
            popup_base_destination: None,
            popup_base_arguments: Arguments::new(),
            ..self.clone()
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
