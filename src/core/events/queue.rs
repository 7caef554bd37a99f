//=========================================================================
// Event Queue Trait
//=========================================================================
//
// Type-erased view of one event queue, so the bus can hold queues of
// different event types in a single map and still clear or count them.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

//=== Internal Dependencies ===============================================

use super::NavEvent;

//=========================================================================

/// Type-erased storage for the events of a single type.
pub(super) trait EventQueue {
    /// Drops all pending events, keeping the allocation.
    fn clear_events(&mut self);

    /// Number of pending events.
    fn pending(&self) -> usize;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<E: NavEvent> EventQueue for Vec<E> {
    fn clear_events(&mut self) {
        self.clear();
    }

    fn pending(&self) -> usize {
        self.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=========================================================================
// Tests
//=========================================================================
