//=========================================================================
// Event Bus
//=========================================================================
//
// Typed multi-queue store for navigation notifications.
//
// Pattern: publish (host) → read/drain (N listeners) → clear → repeat
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::queue::EventQueue;

//=== Public API ==========================================================

/// Marker trait for values the host can publish on the [`EventBus`].
///
/// Implemented for every `'static` type; the bus keys queues by `TypeId`.
pub trait NavEvent: 'static {}

impl<T: 'static> NavEvent for T {}

//=========================================================================

/// Per-type queues of navigation events.
///
/// Events stay queued until cleared, so several listeners can read the
/// same notifications after a host operation returns.
#[derive(Default)]
pub struct EventBus {
    queues: HashMap<TypeId, Box<dyn EventQueue>>,
}

impl EventBus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self {
            queues: HashMap::new(),
        }
    }

    //--- Publishing -------------------------------------------------------

    /// Appends an event to the queue for its type.
    pub fn publish<E: NavEvent>(&mut self, event: E) {
        let queue = self
            .queues
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(Vec::<E>::new()));

        if let Some(queue) = queue.as_any_mut().downcast_mut::<Vec<E>>() {
            queue.push(event);
        }
    }

    //--- Reading ----------------------------------------------------------

    /// Pending events of type `E`, oldest first.
    pub fn read<E: NavEvent>(&self) -> &[E] {
        self.queue::<E>().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Removes and returns all pending events of type `E`.
    ///
    /// Leaves the queue allocated for the next frame.
    pub fn drain<E: NavEvent>(&mut self) -> Vec<E> {
        self.queues
            .get_mut(&TypeId::of::<E>())
            .and_then(|q| q.as_any_mut().downcast_mut::<Vec<E>>())
            .map(|q| q.drain(..).collect())
            .unwrap_or_default()
    }

    /// Returns the most recent event of type `E`, if any.
    pub fn last<E: NavEvent>(&self) -> Option<&E> {
        self.read::<E>().last()
    }

    //--- Query API --------------------------------------------------------

    pub fn has_events<E: NavEvent>(&self) -> bool {
        self.count::<E>() > 0
    }

    pub fn count<E: NavEvent>(&self) -> usize {
        self.queue::<E>().map(Vec::len).unwrap_or(0)
    }

    /// Number of pending events across every type.
    pub fn total_pending(&self) -> usize {
        self.queues.values().map(|q| q.pending()).sum()
    }

    //--- Clearing ---------------------------------------------------------

    pub fn clear<E: NavEvent>(&mut self) {
        if let Some(queue) = self.queues.get_mut(&TypeId::of::<E>()) {
            queue.clear_events();
        }
    }

    /// Clears every queue; call once per frame after listeners ran.
    pub fn clear_all(&mut self) {
        for queue in self.queues.values_mut() {
            queue.clear_events();
        }
    }

    fn queue<E: NavEvent>(&self) -> Option<&Vec<E>> {
        self.queues
            .get(&TypeId::of::<E>())
            .and_then(|q| q.as_any().downcast_ref::<Vec<E>>())
    }
}

//=========================================================================
// Tests
//=========================================================================
