//=========================================================================
// Named Actions
//=========================================================================
//
// Aliases that bundle a destination with options and default arguments,
// so callers can `navigate("open_inventory", ...)` instead of repeating
// the full request. The table is filled once at startup.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, error};
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::{ArgValue, Arguments, NavOptions, RegistrationError};

//=== NavAction ===========================================================

/// A named navigation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavAction {
    name: String,
    destination: String,
    #[serde(default)]
    options: NavOptions,
    #[serde(default)]
    arguments: Arguments,
}

impl NavAction {
    pub fn new(name: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            destination: destination.into(),
            options: NavOptions::default(),
            arguments: Arguments::new(),
        }
    }

    pub fn with_options(mut self, options: NavOptions) -> Self {
        self.options = options;
        self
    }

    /// Adds a default argument; call-site arguments with the same name win.
    pub fn with_argument(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.arguments = self.arguments.with(name, value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn options(&self) -> &NavOptions {
        &self.options
    }

    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    fn validate(&self) -> Result<(), RegistrationError> {
        if self.name.trim().is_empty() {
            return Err(RegistrationError::BlankKey);
        }
        if self.destination.trim().is_empty() {
            return Err(RegistrationError::BlankActionDestination(self.name.clone()));
        }
        Ok(())
    }
}

//=== ActionRegistry ======================================================

/// Name → action table.
#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    actions: HashMap<String, NavAction>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an action.
    ///
    /// Malformed and duplicate actions are logged and left out.
    pub fn register(&mut self, action: NavAction) -> Result<(), RegistrationError> {
        if let Err(err) = action.validate() {
            error!("Skipping navigation action {:?}: {}", action.name, err);
            return Err(err);
        }
        if self.actions.contains_key(&action.name) {
            error!("Navigation action {:?} is already registered, skipping", action.name);
            return Err(RegistrationError::DuplicateAction(action.name));
        }

        debug!("Registered navigation action {:?} → {:?}", action.name, action.destination);
        self.actions.insert(action.name.clone(), action);
        Ok(())
    }

    /// Registers every action, skipping rejected ones.
    ///
    /// Returns how many were accepted.
    pub fn register_all<I>(&mut self, actions: I) -> usize
    where
        I: IntoIterator<Item = NavAction>,
    {
        let mut accepted = 0;
        for action in actions {
            if self.register(action).is_ok() {
                accepted += 1;
            }
        }
        accepted
    }

    pub fn get(&self, name: &str) -> Option<&NavAction> {
        self.actions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
