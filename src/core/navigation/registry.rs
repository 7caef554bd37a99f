//=========================================================================
// Destination Registry
//=========================================================================
//
// Explicit table from destination key to element factory, filled once
// at startup. The host only reads it: `create` when an entry becomes
// active, `release` when an entry's element is finally dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, error};

//=== Internal Dependencies ===============================================

use super::{Arguments, BoxError, NavElement, NavigationError, RegistrationError};

//=== Type Aliases ========================================================

type Factory<E> = Box<dyn Fn(&str, &Arguments) -> Result<E, BoxError>>;
type ReleaseHook<E> = Box<dyn Fn(&str, E)>;

//=== DestinationRegistry =================================================

/// Maps destination keys to element factories.
///
/// ```rust
/// use aetheric_navigation::core::navigation::{Arguments, DestinationRegistry, NavElement};
///
/// #[derive(Default)]
/// struct Home;
/// impl NavElement for Home {}
///
/// let mut registry = DestinationRegistry::<Home>::new();
/// registry.register_type::<Home>("Home").unwrap();
/// assert!(registry.register_type::<Home>("Home").is_err());
/// assert!(registry.create("Home", &Arguments::new()).is_ok());
/// ```
pub struct DestinationRegistry<E: NavElement> {
    factories: HashMap<String, Factory<E>>,
    release: Option<ReleaseHook<E>>,
}

impl<E: NavElement> Default for DestinationRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: NavElement> DestinationRegistry<E> {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            release: None,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a factory under `key`.
    ///
    /// Blank and duplicate keys are rejected and logged; the first
    /// registration of a key stays in place.
    pub fn register_factory<F>(&mut self, key: impl Into<String>, factory: F) -> Result<(), RegistrationError>
    where
        F: Fn(&str, &Arguments) -> Result<E, BoxError> + 'static,
    {
        let key = key.into();
        if key.trim().is_empty() {
            error!("Rejected destination registration with a blank key");
            return Err(RegistrationError::BlankKey);
        }
        if self.factories.contains_key(&key) {
            error!("Destination {:?} is already registered, keeping the first factory", key);
            return Err(RegistrationError::DuplicateDestination(key));
        }

        debug!("Registered destination {:?}", key);
        self.factories.insert(key, Box::new(factory));
        Ok(())
    }

    /// Registers a destination whose element is built with `T::default()`.
    pub fn register_type<T>(&mut self, key: impl Into<String>) -> Result<(), RegistrationError>
    where
        T: Default + Into<E> + 'static,
    {
        self.register_factory(key, |_, _| Ok(T::default().into()))
    }

    /// Installs the hook that receives elements once they are released.
    ///
    /// Without a hook released elements are simply dropped.
    pub fn set_release_hook<F>(&mut self, hook: F)
    where
        F: Fn(&str, E) + 'static,
    {
        self.release = Some(Box::new(hook));
    }

    //--- Queries ----------------------------------------------------------

    pub fn contains(&self, key: &str) -> bool {
        self.factories.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    //--- Element Lifecycle ------------------------------------------------

    /// Creates the element for `key`.
    pub fn create(&self, key: &str, arguments: &Arguments) -> Result<E, NavigationError> {
        let factory = self
            .factories
            .get(key)
            .ok_or_else(|| NavigationError::UnknownDestination(key.to_string()))?;

        factory(key, arguments).map_err(|source| NavigationError::CreationFailed {
            destination: key.to_string(),
            source,
        })
    }

    /// Hands a no longer used element to the release hook.
    pub fn release(&self, key: &str, element: E) {
        match &self.release {
            Some(hook) => hook(key, element),
            None => drop(element),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
