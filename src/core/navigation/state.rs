//=========================================================================
// Save / Restore
//=========================================================================
//
// `NavigationState` is a detached deep copy of everything needed to put
// the host back exactly where it was: the active layout, the history,
// parked sub-stacks and the pop transition pair.
//
// Restoring is instantaneous. Running transitions are finished, the
// active stack is rebuilt from scratch without animation and the
// history is replaced as stored.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::{
    BackStack, DestinationRegistry, NavElement, NavigationError, NavigationHost, SavedStates,
    StackSnapshot, StateError,
};
use crate::core::animation::NavAnimation;

//=== NavigationState =====================================================

/// Captured host state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    pub current_destination: Option<String>,
    #[serde(default)]
    pub pop_enter: Option<NavAnimation>,
    #[serde(default)]
    pub pop_exit: Option<NavAnimation>,
    pub active: StackSnapshot,
    pub back_stack: BackStack,
    #[serde(default)]
    pub saved_states: SavedStates,
}

impl NavigationState {
    pub fn to_json(&self) -> Result<String, StateError> {
        serde_json::to_string(self).map_err(StateError::Encode)
    }

    pub fn to_json_pretty(&self) -> Result<String, StateError> {
        serde_json::to_string_pretty(self).map_err(StateError::Encode)
    }

    pub fn from_json(text: &str) -> Result<Self, StateError> {
        serde_json::from_str(text).map_err(StateError::Decode)
    }

    /// Checks the stack invariants and that every destination can still
    /// be created.
    fn validate<E: NavElement>(&self, registry: &DestinationRegistry<E>) -> Result<(), NavigationError> {
        check_snapshot(&self.active, "active stack", registry)?;

        let top = self.active.top().map(|item| item.destination());
        if top != self.current_destination.as_deref() {
            return Err(NavigationError::MalformedState(format!(
                "current destination {:?} is not the top of the active stack ({:?})",
                self.current_destination, top
            )));
        }

        for entry in self.back_stack.iter().chain(self.saved_states.entries()) {
            check_snapshot(entry.snapshot(), entry.destination(), registry)?;
        }
        Ok(())
    }
}

fn check_snapshot<E: NavElement>(
    snapshot: &StackSnapshot,
    label: &str,
    registry: &DestinationRegistry<E>,
) -> Result<(), NavigationError> {
    if !snapshot.is_well_formed() {
        return Err(NavigationError::MalformedState(format!(
            "{} has popups below a screen",
            label
        )));
    }

    match snapshot.destinations().into_iter().find(|d| !registry.contains(d)) {
        Some(unknown) => Err(NavigationError::UnknownDestination(unknown.to_string())),
        None => Ok(()),
    }
}

impl<E: NavElement> NavigationHost<E> {
    /// Captures the current state as a detached deep copy.
    pub fn save_state(&self) -> NavigationState {
        NavigationState {
            current_destination: self.current_destination.clone(),
            pop_enter: self.pop_enter.clone(),
            pop_exit: self.pop_exit.clone(),
            active: self.active.to_snapshot(),
            back_stack: self.back_stack.clone(),
            saved_states: self.saved_states.clone(),
        }
    }

    /// Replaces the host state with `state`, without animation.
    ///
    /// Nothing changes when `state` is malformed, names an unregistered
    /// destination or an element fails to create.
    pub fn restore_state(&mut self, state: &NavigationState) -> Result<(), NavigationError> {
        state.validate(&self.registry)?;
        let created = self.create_elements(state.active.items())?;

        info!(
            "Restoring navigation state: {} active, {} in history",
            state.active.len(),
            state.back_stack.len()
        );

        self.complete_all_animations();
        self.reconcile(&state.active, 0, created, None, None);

        self.back_stack = state.back_stack.clone();
        self.saved_states = state.saved_states.clone();
        self.pop_enter = state.pop_enter.clone();
        self.pop_exit = state.pop_exit.clone();

        debug!("Restored active stack {:?}", self.active.destinations());
        Ok(())
    }
}
