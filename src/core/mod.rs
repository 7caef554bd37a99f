//=========================================================================
// Core Navigation Systems
//
// Everything the navigation host needs to run on the UI thread.
//
// Responsibilities:
// - `navigation`: destinations, options, snapshots, stacks and the host
// - `animation`: transition descriptors, easing and handle bookkeeping
// - `events`: typed change notifications published by the host
// - `bridge`: command mailbox for requests coming from other contexts
// - `persistence`: string key/value store for the last destination
//
// Notes:
// All systems here are single-threaded and cooperative. The only value
// that crosses a thread boundary is a `HostCommand`, and it does so
// through the bridge's channel.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod animation;
pub mod bridge;
pub mod events;
pub mod navigation;
pub mod persistence;

//=== Public API ==========================================================

pub use animation::{Easing, NavAnimation, NavAnimations, TransitionEffect, TransitionPlayer};
pub use bridge::{CommandMailbox, HostCommand};
pub use events::EventBus;
pub use navigation::{NavigationError, NavigationHost, RegistrationError};
pub use persistence::{KeyValueStore, MemoryStore};
