//=========================================================================
// Navigation
//=========================================================================
//
// Destinations, navigation requests and the host state machine that
// turns requests into a live stack of elements.
//
// Architecture:
// ```text
//   navigate / pop / close ──> NavigationHost
//                                 │  builds a target StackSnapshot
//                                 │  (back stack + saved states updated
//                                 │   on a working copy)
//                                 ↓
//                           apply_snapshot
//                                 │  shared prefix → rebind in place
//                                 │  above prefix  → exit / enter
//                                 ↓
//                 ActiveStack<E> + pending removals + animations
// ```
//
// Value types (`StackItem`, `StackSnapshot`, `BackStackEntry`, options
// and arguments) are plain owned data. Cloning them is a deep copy, so
// history can never observe a later change made by the caller.
//
//=========================================================================

//=== Module Declarations =================================================

mod actions;
mod active_stack;
mod argument;
mod back_stack;
mod element;
mod error;
mod options;
mod registry;
mod snapshot;

mod host;
mod popup;
mod reconcile;
mod state;
mod transitions;

//=== Public API ==========================================================

pub use actions::{ActionRegistry, NavAction};
pub use active_stack::{ActiveEntry, ActiveStack, PendingRemoval};
pub use argument::{ArgValue, Argument, Arguments};
pub use back_stack::{BackStack, BackStackEntry, SavedStates};
pub use element::NavElement;
pub use error::{BoxError, NavigationError, RegistrationError, StateError};
pub use host::NavigationHost;
pub use options::{NavOptions, PopupExistingStrategy, PopupStrategy, StackStrategy};
pub use registry::DestinationRegistry;
pub use snapshot::{StackItem, StackSnapshot};
pub use state::NavigationState;
