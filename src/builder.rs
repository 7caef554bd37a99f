//=========================================================================
// Navigation Host Builder
//
// Fluent configuration entry point for `NavigationHost`.
//
// Architecture:
// ```text
//   DestinationRegistry ──new()──> NavigationHostBuilder ──build()──> NavigationHost
//                                      │
//                                      ├─ with_player()
//                                      ├─ with_default_animations()
//                                      ├─ with_actions()
//                                      ├─ with_max_commands_per_frame()
//                                      └─ with_persistence()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::animation::{NavAnimations, NoopPlayer, TransitionPlayer};
use crate::core::navigation::{
    ActionRegistry, DestinationRegistry, NavAction, NavElement, NavigationHost,
};
use crate::core::persistence::KeyValueStore;

//=== HostConfig ==========================================================

/// Host settings fixed at build time.
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    /// Animations used when `navigate` is called without options.
    pub default_animations: NavAnimations,

    /// Upper bound on commands executed per `process_commands` call.
    pub max_commands_per_frame: usize,

    /// Store key the last destination is recorded under.
    pub persistence_key: Option<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            default_animations: NavAnimations::none(),
            max_commands_per_frame: 64,
            persistence_key: None,
        }
    }
}

//=== NavigationHostBuilder ===============================================

/// Builder for configuring and constructing a [`NavigationHost`].
///
/// # Default Values
///
/// - **Player**: [`NoopPlayer`] (transitions only keep time)
/// - **Default animations**: none
/// - **Commands per frame**: 64
/// - **Persistence**: disabled
///
/// # Examples
///
/// ```
/// use aetheric_navigation::prelude::*;
///
/// #[derive(Default)]
/// struct Screen;
/// impl NavElement for Screen {}
///
/// let mut registry = DestinationRegistry::<Screen>::new();
/// registry.register_type::<Screen>("Home").unwrap();
/// registry.register_type::<Screen>("Shop").unwrap();
///
/// let mut host = NavigationHostBuilder::new(registry)
///     .with_default_animations(NavAnimations::fade(150))
///     .with_actions([NavAction::new("open_shop", "Shop")])
///     .with_persistence(MemoryStore::new(), "last_screen")
///     .build();
///
/// host.navigate("Home", None, Arguments::new()).unwrap();
/// host.navigate("open_shop", None, Arguments::new()).unwrap();
/// assert_eq!(host.current_destination(), Some("Shop"));
/// assert!(host.can_go_back());
/// ```
pub struct NavigationHostBuilder<E: NavElement> {
    registry: DestinationRegistry<E>,
    actions: ActionRegistry,
    player: Box<dyn TransitionPlayer<E>>,
    store: Option<Box<dyn KeyValueStore>>,
    config: HostConfig,
}

impl<E: NavElement> NavigationHostBuilder<E> {
    /// Creates a builder around the destinations the host can show.
    pub fn new(registry: DestinationRegistry<E>) -> Self {
        Self {
            registry,
            actions: ActionRegistry::new(),
            player: Box::new(NoopPlayer),
            store: None,
            config: HostConfig::default(),
        }
    }

    /// Sets the adapter that draws transitions.
    ///
    /// Default: [`NoopPlayer`]
    pub fn with_player<P>(mut self, player: P) -> Self
    where
        P: TransitionPlayer<E> + 'static,
    {
        self.player = Box::new(player);
        self
    }

    /// Sets the animations used when `navigate` receives no options.
    ///
    /// Default: no animations
    pub fn with_default_animations(mut self, animations: NavAnimations) -> Self {
        self.config.default_animations = animations;
        self
    }

    /// Registers named actions.
    ///
    /// Malformed and duplicate actions are logged and skipped; they never
    /// abort the build.
    pub fn with_actions<I>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = NavAction>,
    {
        let offered: Vec<NavAction> = actions.into_iter().collect();
        let total = offered.len();
        let accepted = self.actions.register_all(offered);
        if accepted < total {
            error!("{} of {} navigation actions were rejected", total - accepted, total);
        }
        self
    }

    /// Caps how many queued commands run per `process_commands` call.
    ///
    /// Default: 64
    ///
    /// # Panics
    ///
    /// Panics if `max == 0`.
    pub fn with_max_commands_per_frame(mut self, max: usize) -> Self {
        assert!(max > 0, "Commands per frame must be positive");
        self.config.max_commands_per_frame = max;
        self
    }

    /// Records the last destination in `store` under `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` is blank.
    pub fn with_persistence<S>(mut self, store: S, key: impl Into<String>) -> Self
    where
        S: KeyValueStore + 'static,
    {
        let key = key.into();
        assert!(!key.trim().is_empty(), "Persistence key must not be blank");
        self.store = Some(Box::new(store));
        self.config.persistence_key = Some(key);
        self
    }

    /// Builds the host. Nothing is shown until the first navigation.
    pub fn build(self) -> NavigationHost<E> {
        info!(
            "Building navigation host (commands/frame: {}, persistence: {})",
            self.config.max_commands_per_frame,
            self.config.persistence_key.is_some()
        );
        NavigationHost::from_parts(self.registry, self.actions, self.player, self.store, self.config)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
