//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_navigation::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Host and configuration
pub use crate::builder::{HostConfig, NavigationHostBuilder};
pub use crate::core::navigation::{NavigationHost, NavigationState};

// Destinations and requests
pub use crate::core::navigation::{
    ArgValue, Arguments, DestinationRegistry, NavAction, NavElement, NavOptions,
    PopupExistingStrategy, PopupStrategy, StackStrategy,
};

// Errors
pub use crate::core::navigation::{NavigationError, RegistrationError, StateError};

// Transitions
pub use crate::core::animation::{
    Easing, NavAnimation, NavAnimations, TransitionEffect, TransitionPhase, TransitionPlayer,
};

// Events
pub use crate::core::events::{
    ActionTriggered, DestinationChanged, EnteredDestination, EventBus, ExitedDestination,
};

// Commands and persistence
pub use crate::core::bridge::{CommandMailbox, HostCommand};
pub use crate::core::persistence::{KeyValueStore, MemoryStore};
