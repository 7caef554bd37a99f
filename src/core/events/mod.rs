//=========================================================================
// Navigation Events
//=========================================================================
//
// Change notifications raised by the navigation host.
//
// Architecture:
//   NavigationHost → publish<E>() → EventBus (one queue per event type)
//                                        ↓
//   Views / view-models ← read<E>() or drain<E>()
//                                        ↓
//   Application ──────────→ clear_all() at frame boundary
//
// The host never calls back into listeners directly. Listeners read the
// queues after a host operation returns, which keeps re-entrant requests
// out of the middle of a stack mutation.
//
//=========================================================================

//=== Module Declarations =================================================

mod bus;
mod kinds;
mod queue;

//=== Public API ==========================================================

pub use bus::{EventBus, NavEvent};
pub use kinds::{ActionTriggered, DestinationChanged, EnteredDestination, ExitedDestination};
