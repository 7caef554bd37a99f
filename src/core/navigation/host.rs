//=========================================================================
// Navigation Host
//=========================================================================
//
// Owns the back stack, the active stack and everything needed to move
// between them.
//
// Every public operation follows the same shape:
//   1. validate the request (nothing is touched on failure)
//   2. compute the target snapshot and the new back stack on copies
//   3. `apply_snapshot` (the only step that can fail afterwards)
//   4. commit the copies
//
// Reconciliation lives in `reconcile.rs`, popups in `popup.rs`, the
// animation driver in `transitions.rs` and save/restore in `state.rs`.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::{
    ActionRegistry, ActiveStack, Arguments, BackStack, BackStackEntry, DestinationRegistry,
    NavElement, NavOptions, NavigationError, PendingRemoval, PopupStrategy, SavedStates,
    StackItem, StackSnapshot, StackStrategy,
};
use crate::builder::HostConfig;
use crate::core::animation::{AnimationTracker, NavAnimation, TransitionPlayer};
use crate::core::bridge::{CommandMailbox, HostCommand};
use crate::core::events::{ActionTriggered, EventBus};
use crate::core::persistence::KeyValueStore;

//=== PlainPlan ===========================================================

/// Outcome of a plain navigation, computed before anything is applied.
pub(super) struct PlainPlan {
    pub(super) target: StackSnapshot,
    pub(super) back_stack: BackStack,
    pub(super) saved_states: SavedStates,
    pub(super) exit: Option<NavAnimation>,
    pub(super) enter: Option<NavAnimation>,
}

//=== NavigationHost ======================================================

/// Navigation state machine for one UI root.
///
/// Built through [`NavigationHostBuilder`](crate::NavigationHostBuilder).
/// All operations are synchronous and must run on the thread that owns
/// the elements. Other contexts post [`HostCommand`]s instead and the
/// host picks them up in [`process_commands`](Self::process_commands).
pub struct NavigationHost<E: NavElement> {
    pub(super) registry: DestinationRegistry<E>,
    pub(super) actions: ActionRegistry,
    pub(super) player: Box<dyn TransitionPlayer<E>>,

    pub(super) back_stack: BackStack,
    pub(super) active: ActiveStack<E>,
    pub(super) pending: Vec<PendingRemoval<E>>,
    pub(super) saved_states: SavedStates,
    pub(super) animations: AnimationTracker,

    pub(super) current_destination: Option<String>,
    pub(super) pop_enter: Option<NavAnimation>,
    pub(super) pop_exit: Option<NavAnimation>,

    pub(super) events: EventBus,
    pub(super) store: Option<Box<dyn KeyValueStore>>,
    pub(super) config: HostConfig,
    next_entry_id: u64,
}

impl<E: NavElement> NavigationHost<E> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn from_parts(
        registry: DestinationRegistry<E>,
        actions: ActionRegistry,
        player: Box<dyn TransitionPlayer<E>>,
        store: Option<Box<dyn KeyValueStore>>,
        config: HostConfig,
    ) -> Self {
        info!(
            "Navigation host ready: {} destinations, {} actions",
            registry.len(),
            actions.len()
        );

        Self {
            registry,
            actions,
            player,
            back_stack: BackStack::new(),
            active: ActiveStack::new(),
            pending: Vec::new(),
            saved_states: SavedStates::new(),
            animations: AnimationTracker::new(),
            current_destination: None,
            pop_enter: None,
            pop_exit: None,
            events: EventBus::new(),
            store,
            config,
            next_entry_id: 0,
        }
    }

    //--- Navigation -------------------------------------------------------

    /// Navigates to a destination or named action.
    ///
    /// `options` of `None` means plain navigation with the configured
    /// default animations. Action aliases ignore `options` and merge
    /// `arguments` over the action's defaults.
    ///
    /// Returns `Ok(false)` for a blank key and for degraded popup
    /// requests, `Err` when the destination is unknown or its element
    /// cannot be created. Either way the host is left untouched.
    pub fn navigate(
        &mut self,
        key: &str,
        options: Option<NavOptions>,
        arguments: Arguments,
    ) -> Result<bool, NavigationError> {
        if key.trim().is_empty() {
            warn!("Ignoring navigation to a blank destination");
            return Ok(false);
        }

        let Some(action) = self.actions.get(key) else {
            let options = options.unwrap_or_else(|| self.default_options());
            return self.navigate_resolved(key.to_string(), options, arguments);
        };

        let destination = action.destination().to_string();
        let options = action.options().clone();
        let arguments = arguments.merged_over(action.arguments());
        debug!("Action {:?} resolves to {:?}", key, destination);

        let navigated = self.navigate_resolved(destination.clone(), options, arguments)?;
        if navigated {
            self.events.publish(ActionTriggered {
                action: key.to_string(),
                destination,
            });
        }
        Ok(navigated)
    }

    pub(super) fn navigate_resolved(
        &mut self,
        destination: String,
        options: NavOptions,
        arguments: Arguments,
    ) -> Result<bool, NavigationError> {
        if !self.registry.contains(&destination) {
            return Err(NavigationError::UnknownDestination(destination));
        }

        match options.popup_strategy {
            PopupStrategy::None => self.navigate_plain(destination, options, arguments),
            PopupStrategy::PopupOnCurrent => self.navigate_popup(destination, options, arguments),
            PopupStrategy::EnsureBaseAndPopup => {
                self.navigate_popup_with_base(destination, options, arguments)
            }
        }
    }

    /// Replaces the active stack with a single destination.
    pub(super) fn navigate_plain(
        &mut self,
        destination: String,
        options: NavOptions,
        arguments: Arguments,
    ) -> Result<bool, NavigationError> {
        let plan = self.plan_plain(destination, options, arguments);
        self.apply_snapshot(&plan.target, plan.exit, plan.enter)?;

        self.back_stack = plan.back_stack;
        self.saved_states = plan.saved_states;
        Ok(true)
    }

    /// Works out a plain navigation on copies of the history. Nothing on
    /// the host changes.
    pub(super) fn plan_plain(
        &self,
        destination: String,
        options: NavOptions,
        arguments: Arguments,
    ) -> PlainPlan {
        let mut back_stack = self.back_stack.clone();
        let mut saved_states = self.saved_states.clone();

        let already_on_top = self
            .active
            .top()
            .map_or(false, |top| top.destination() == destination);

        let mut captured_current = false;
        if !(options.launch_single_top && already_on_top) {
            if let Some(entry) = BackStackEntry::capture(self.active.to_snapshot()) {
                back_stack.push(entry);
                captured_current = true;
            }
        }

        match options.stack_strategy {
            StackStrategy::None => {}
            StackStrategy::PopAll => back_stack.clear(),
            StackStrategy::PopToRoot => {
                back_stack.pop_to_root();
                // The only root is the screen being left: the new destination replaces it.
                if captured_current && self.back_stack.is_empty() {
                    back_stack.clear();
                }
            }
            StackStrategy::PopToSpecificDestination => {
                Self::pop_to_specific(&mut back_stack, &mut saved_states, &options);
            }
        }

        if options.launch_single_top
            && back_stack
                .top()
                .map_or(false, |top| top.destination() == destination)
        {
            back_stack.pop();
        }

        if options.restore_state {
            if let Some(entries) = saved_states.take(&destination) {
                debug!("Restoring {} saved entries for {:?}", entries.len(), destination);
                for entry in entries {
                    back_stack.push(entry);
                }
            }
        }

        let exit = options.animations.exit.clone();
        let enter = options.animations.enter.clone();
        PlainPlan {
            target: StackSnapshot::single(StackItem::new(destination, options, arguments)),
            back_stack,
            saved_states,
            exit,
            enter,
        }
    }

    fn pop_to_specific(back_stack: &mut BackStack, saved_states: &mut SavedStates, options: &NavOptions) {
        let Some(target) = options.pop_up_to_destination.as_deref() else {
            warn!("PopToSpecificDestination requested without a destination, back stack kept");
            return;
        };

        let Some(popped) = back_stack.pop_to(target, options.pop_up_to_inclusive) else {
            warn!("{:?} is not on the back stack, back stack kept", target);
            return;
        };

        debug!("Popped {} entries down to {:?}", popped.len(), target);
        if options.pop_up_to_save_state {
            if let Some(key) = saved_states.save(popped) {
                debug!("Saved popped entries under {:?}", key);
            }
        }
    }

    //--- Back Navigation --------------------------------------------------

    /// Returns to the most recent back stack entry.
    ///
    /// The transition uses the pop pair recorded by the navigation that
    /// led to the current screen. With an empty back stack,
    /// `clear_popups` closes any open popups instead.
    pub fn pop_back_stack(&mut self, clear_popups: bool) -> Result<bool, NavigationError> {
        let Some(entry) = self.back_stack.pop() else {
            if clear_popups {
                return Ok(self.close_all_popups(None));
            }
            debug!("Back stack is empty, nothing to pop");
            return Ok(false);
        };

        let target = if clear_popups {
            entry.snapshot().without_popups()
        } else {
            entry.snapshot().clone()
        };

        debug!("Popping back to {:?}", entry.destination());
        let exit = self.pop_exit.clone();
        let enter = self.pop_enter.clone();
        if let Err(err) = self.apply_snapshot(&target, exit, enter) {
            self.back_stack.push(entry);
            return Err(err);
        }
        Ok(true)
    }

    /// Pops back to the most recent entry labelled `destination`.
    ///
    /// With `inclusive` that entry is discarded as well and the entry
    /// beneath it is shown (or nothing, when it was the last one).
    /// Returns `Ok(false)` when `destination` is not on the back stack.
    pub fn pop_back_stack_to(
        &mut self,
        destination: &str,
        inclusive: bool,
    ) -> Result<bool, NavigationError> {
        let Some(index) = self.back_stack.rposition(destination) else {
            debug!("{:?} is not on the back stack", destination);
            return Ok(false);
        };

        let mut back_stack = self.back_stack.clone();
        let popped = back_stack.split_off(index);
        let target = if inclusive {
            back_stack
                .pop()
                .map(|entry| entry.snapshot().clone())
                .unwrap_or_else(StackSnapshot::empty)
        } else {
            popped
                .first()
                .map(|entry| entry.snapshot().clone())
                .unwrap_or_else(StackSnapshot::empty)
        };

        let exit = self.pop_exit.clone();
        let enter = self.pop_enter.clone();
        self.apply_snapshot(&target, exit, enter)?;

        self.back_stack = back_stack;
        Ok(true)
    }

    /// Forgets the navigation history. The active stack is kept.
    pub fn clear_back_stack(&mut self) {
        debug!("Clearing {} back stack entries", self.back_stack.len());
        self.back_stack.clear();
    }

    /// Clears the history and removes everything on screen.
    pub fn clear_navigation(&mut self, exit: Option<NavAnimation>) -> Result<(), NavigationError> {
        self.back_stack.clear();
        self.apply_snapshot(&StackSnapshot::empty(), exit, None)
    }

    //--- Commands ---------------------------------------------------------

    /// Runs one command as if the matching method had been called.
    pub fn execute(&mut self, command: HostCommand) -> Result<bool, NavigationError> {
        match command {
            HostCommand::Navigate {
                destination,
                options,
                arguments,
            } => self.navigate(&destination, options, arguments),
            HostCommand::PopBackStack { clear_popups } => self.pop_back_stack(clear_popups),
            HostCommand::PopBackStackTo {
                destination,
                inclusive,
            } => self.pop_back_stack_to(&destination, inclusive),
            HostCommand::ClosePopup { destination } => Ok(self.close_popup(&destination, None)),
            HostCommand::CloseAllPopups => Ok(self.close_all_popups(None)),
            HostCommand::ClearBackStack => {
                self.clear_back_stack();
                Ok(true)
            }
            HostCommand::ClearNavigation => self.clear_navigation(None).map(|()| true),
        }
    }

    /// Executes the commands queued in `mailbox`, at most
    /// `max_commands_per_frame` of them. Returns how many ran.
    ///
    /// Failed commands are logged and skipped.
    pub fn process_commands(&mut self, mailbox: &CommandMailbox) -> usize {
        let commands = mailbox.drain_frame(self.config.max_commands_per_frame);
        let count = commands.len();

        for command in commands {
            let description = format!("{:?}", command);
            if let Err(err) = self.execute(command) {
                warn!("Navigation command {} failed: {}", description, err);
            }
        }

        count
    }

    //--- Persistence ------------------------------------------------------

    /// Navigates to the destination recorded by a previous session.
    ///
    /// Returns `Ok(false)` when nothing was recorded or the recorded
    /// destination is no longer registered.
    pub fn restore_last_destination(&mut self) -> Result<bool, NavigationError> {
        let recorded = match (&self.store, &self.config.persistence_key) {
            (Some(store), Some(key)) => store.get(key),
            _ => None,
        };

        let Some(destination) = recorded else {
            return Ok(false);
        };

        if !self.registry.contains(&destination) {
            warn!("Recorded destination {:?} is no longer registered", destination);
            return Ok(false);
        }

        info!("Restoring last destination {:?}", destination);
        let options = self.default_options();
        self.navigate_resolved(destination, options, Arguments::new())
    }

    pub(super) fn persist_destination(&mut self) {
        let Some(destination) = self.active.top_base().map(|e| e.destination().to_string()) else {
            return;
        };
        if let (Some(store), Some(key)) = (self.store.as_mut(), self.config.persistence_key.as_deref()) {
            store.set(key, &destination);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    pub fn has_active_popups(&self) -> bool {
        self.active.popup_tail_len() > 0
    }

    pub fn current_destination(&self) -> Option<&str> {
        self.current_destination.as_deref()
    }

    /// Destinations on screen, base first.
    pub fn active_destinations(&self) -> Vec<&str> {
        self.active.destinations()
    }

    pub fn active(&self) -> &ActiveStack<E> {
        &self.active
    }

    pub fn back_stack(&self) -> &BackStack {
        &self.back_stack
    }

    pub fn saved_states(&self) -> &SavedStates {
        &self.saved_states
    }

    pub fn registry(&self) -> &DestinationRegistry<E> {
        &self.registry
    }

    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Mutable access to the event bus.
    ///
    /// The host only publishes. Queues grow until they are drained or
    /// cleared, so call [`end_frame`](Self::end_frame) (or clear the bus
    /// yourself) once listeners have run.
    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Drops every event published since the last call. Call once per
    /// frame after listeners have read the bus.
    pub fn end_frame(&mut self) {
        self.events.clear_all();
    }

    /// Transitions still in flight.
    pub fn running_animations(&self) -> usize {
        self.animations.running_count()
    }

    /// Removed entries whose exit transition has not finished yet.
    pub fn pending_removals(&self) -> usize {
        self.pending.len()
    }

    //--- Internal Helpers -------------------------------------------------

    pub(super) fn default_options(&self) -> NavOptions {
        NavOptions::new().with_animations(self.config.default_animations.clone())
    }

    pub(super) fn next_entry_id(&mut self) -> u64 {
        self.next_entry_id += 1;
        self.next_entry_id
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
//
// Behavioral tests driven through the public surface plus
// `apply_snapshot` for the reconciliation properties.
//
// Elements and the transition player write to a shared log so tests can
// assert lifecycle order:
//   enter:X / rebind:X / exit:X        element hooks
//   start:X:Phase / finish:X:Phase     transition player
//   release:X                          registry release hook
//
//=========================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::core::navigation::*;
    use crate::builder::NavigationHostBuilder;
    use crate::core::animation::{
        NavAnimation, NavAnimations, TransitionEffect, TransitionPhase, TransitionPlayer,
    };
    use crate::core::bridge::{CommandMailbox, HostCommand};
    use crate::core::events::{ActionTriggered, DestinationChanged, EnteredDestination, ExitedDestination};
    use crate::core::persistence::{KeyValueStore, MemoryStore};

    //=== Fixtures ============================================================

    type Log = Rc<RefCell<Vec<String>>>;

    struct Probe {
        name: String,
        log: Log,
    }

    impl NavElement for Probe {
        fn on_enter(&mut self, _arguments: &Arguments) {
            self.log.borrow_mut().push(format!("enter:{}", self.name));
        }

        fn on_rebind(&mut self, _arguments: &Arguments) {
            self.log.borrow_mut().push(format!("rebind:{}", self.name));
        }

        fn on_exit(&mut self) {
            self.log.borrow_mut().push(format!("exit:{}", self.name));
        }
    }

    struct RecordingPlayer {
        log: Log,
    }

    impl TransitionPlayer<Probe> for RecordingPlayer {
        fn on_start(&mut self, element: &mut Probe, _: &NavAnimation, phase: TransitionPhase) {
            self.log.borrow_mut().push(format!("start:{}:{:?}", element.name, phase));
        }

        fn apply_frame(&mut self, _: &mut Probe, _: &NavAnimation, _: TransitionPhase, _: f32) {}

        fn on_finish(&mut self, element: &mut Probe, _: &NavAnimation, phase: TransitionPhase) {
            self.log.borrow_mut().push(format!("finish:{}:{:?}", element.name, phase));
        }
    }

    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<MemoryStore>>);

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key)
        }

        fn set(&mut self, key: &str, value: &str) {
            self.0.borrow_mut().set(key, value);
        }

        fn remove(&mut self, key: &str) {
            self.0.borrow_mut().remove(key);
        }
    }

    const DESTINATIONS: &[&str] = &[
        "Home", "Settings", "Profile", "Shop", "Dialog", "Toast", "Confirm", "A", "B", "C", "D",
    ];

    fn registry(log: &Log) -> DestinationRegistry<Probe> {
        let mut registry = DestinationRegistry::new();
        for name in DESTINATIONS {
            let log = Rc::clone(log);
            registry
                .register_factory(*name, move |key, _| {
                    Ok(Probe {
                        name: key.to_string(),
                        log: Rc::clone(&log),
                    })
                })
                .unwrap();
        }
        registry
            .register_factory("Broken", |_, _| Err("texture missing".into()))
            .unwrap();

        let release_log = Rc::clone(log);
        registry.set_release_hook(move |key, _| release_log.borrow_mut().push(format!("release:{}", key)));
        registry
    }

    fn host_with<F>(configure: F) -> (NavigationHost<Probe>, Log)
    where
        F: FnOnce(NavigationHostBuilder<Probe>) -> NavigationHostBuilder<Probe>,
    {
        let log: Log = Rc::default();
        let builder = NavigationHostBuilder::new(registry(&log)).with_player(RecordingPlayer {
            log: Rc::clone(&log),
        });
        (configure(builder).build(), log)
    }

    fn host() -> (NavigationHost<Probe>, Log) {
        host_with(|builder| builder)
    }

    fn go(host: &mut NavigationHost<Probe>, key: &str) {
        assert!(host.navigate(key, None, Arguments::new()).unwrap());
    }

    fn go_with(host: &mut NavigationHost<Probe>, key: &str, options: NavOptions) {
        assert!(host.navigate(key, Some(options), Arguments::new()).unwrap());
    }

    fn take(log: &Log) -> Vec<String> {
        log.borrow_mut().drain(..).collect()
    }

    fn exit_fade(duration_ms: u32) -> NavOptions {
        NavOptions::new().with_animations(NavAnimations {
            exit: Some(NavAnimation::fade(duration_ms)),
            ..NavAnimations::none()
        })
    }

    fn assert_popup_tail(host: &NavigationHost<Probe>) {
        let flags: Vec<bool> = host.active().entries().iter().map(|e| e.is_popup()).collect();
        let first_popup = flags.iter().position(|&p| p).unwrap_or(flags.len());
        assert!(
            flags[first_popup..].iter().all(|&p| p),
            "popups must be the top run: {:?}",
            flags
        );
        assert_eq!(host.has_active_popups(), first_popup < flags.len());
    }

    //=== Plain Navigation ====================================================

    #[test]
    fn pop_returns_to_previous_destination() {
        let (mut host, _) = host();
        go(&mut host, "Home");
        go(&mut host, "Settings");

        assert!(host.pop_back_stack(false).unwrap());

        assert_eq!(host.current_destination(), Some("Home"));
        assert!(!host.can_go_back());
    }

    #[test]
    fn n_navigations_allow_n_minus_one_pops() {
        let (mut host, _) = host();
        let names = ["A", "B", "C", "D"];
        for name in names {
            go(&mut host, name);
        }
        assert!(host.can_go_back());

        for _ in 1..names.len() {
            assert!(host.pop_back_stack(false).unwrap());
        }

        assert!(!host.can_go_back());
        assert!(!host.pop_back_stack(false).unwrap());
        assert_eq!(host.current_destination(), Some("A"));
    }

    #[test]
    fn navigation_publishes_lifecycle_events() {
        let (mut host, log) = host();
        go(&mut host, "Home");
        go(&mut host, "Settings");

        assert_eq!(take(&log), vec!["enter:Home", "exit:Home", "release:Home", "enter:Settings"]);

        let changes = host.events().read::<DestinationChanged>();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[1].previous.as_deref(), Some("Home"));
        assert_eq!(changes[1].current.as_deref(), Some("Settings"));

        assert_eq!(host.events().count::<EnteredDestination>(), 2);
        let exited = host.events().last::<ExitedDestination>().unwrap();
        assert_eq!(exited.destination, "Home");
        assert!(!exited.is_popup);
    }

    #[test]
    fn end_frame_empties_the_event_bus() {
        let (mut host, _) = host();
        go(&mut host, "Home");
        go_with(&mut host, "Dialog", NavOptions::popup());
        assert!(host.events().total_pending() > 0);

        host.end_frame();
        assert_eq!(host.events().total_pending(), 0);

        assert!(host.close_popup("Dialog", None));
        assert_eq!(host.events().count::<ExitedDestination>(), 1);
        assert_eq!(host.events().count::<DestinationChanged>(), 1);
    }

    #[test]
    fn blank_and_unknown_destinations_change_nothing() {
        let (mut host, _) = host();
        go(&mut host, "Home");

        assert!(!host.navigate("  ", None, Arguments::new()).unwrap());
        assert!(matches!(
            host.navigate("Nowhere", None, Arguments::new()),
            Err(NavigationError::UnknownDestination(ref key)) if key == "Nowhere"
        ));

        assert_eq!(host.active_destinations(), vec!["Home"]);
        assert!(!host.can_go_back());
    }

    #[test]
    fn failing_factory_leaves_state_untouched() {
        let (mut host, log) = host();
        go(&mut host, "Home");
        go(&mut host, "Settings");
        take(&log);

        let result = host.navigate("Broken", None, Arguments::new());

        assert!(matches!(result, Err(NavigationError::CreationFailed { .. })));
        assert_eq!(host.current_destination(), Some("Settings"));
        assert_eq!(host.active_destinations(), vec!["Settings"]);
        assert_eq!(host.back_stack().destinations(), vec!["Home"]);
        assert!(take(&log).is_empty());
    }

    //=== Stack Strategies ====================================================

    #[test]
    fn pop_to_root_replaces_a_lone_root() {
        let (mut host, _) = host();
        go(&mut host, "A");

        go_with(&mut host, "B", NavOptions::new().with_stack_strategy(StackStrategy::PopToRoot));

        assert!(host.back_stack().is_empty());
        assert_eq!(host.current_destination(), Some("B"));
    }

    #[test]
    fn pop_to_root_keeps_an_existing_root() {
        let (mut host, _) = host();
        for name in ["A", "B", "C"] {
            go(&mut host, name);
        }

        go_with(&mut host, "D", NavOptions::new().with_stack_strategy(StackStrategy::PopToRoot));

        assert_eq!(host.back_stack().destinations(), vec!["A"]);
        assert_eq!(host.current_destination(), Some("D"));
    }

    #[test]
    fn pop_all_forgets_history() {
        let (mut host, _) = host();
        for name in ["A", "B", "C"] {
            go(&mut host, name);
        }

        go_with(&mut host, "Home", NavOptions::new().with_stack_strategy(StackStrategy::PopAll));

        assert!(!host.can_go_back());
        assert_eq!(host.active_destinations(), vec!["Home"]);
    }

    #[test]
    fn single_top_does_not_duplicate() {
        let (mut host, log) = host();
        go(&mut host, "Home");
        go_with(&mut host, "Profile", NavOptions::new().single_top());
        take(&log);
        host.events_mut().clear_all();

        go_with(&mut host, "Profile", NavOptions::new().single_top());

        assert_eq!(host.active_destinations(), vec!["Profile"]);
        assert_eq!(host.back_stack().destinations(), vec!["Home"]);
        assert!(take(&log).is_empty());
        assert_eq!(host.events().total_pending(), 0);
    }

    #[test]
    fn single_top_rebinds_with_new_arguments() {
        let (mut host, log) = host();
        go_with(&mut host, "Profile", NavOptions::new().single_top());
        take(&log);

        host.navigate("Profile", Some(NavOptions::new().single_top()), Arguments::new().with("user", 9))
            .unwrap();

        assert_eq!(take(&log), vec!["rebind:Profile"]);
        let user = host.active().top().unwrap().arguments().get("user").and_then(|v| v.as_int());
        assert_eq!(user, Some(9));
    }

    #[test]
    fn pop_up_to_saves_and_restores_sub_stack() {
        let (mut host, _) = host();
        for name in ["A", "B", "C", "D"] {
            go(&mut host, name);
        }

        go_with(&mut host, "Home", NavOptions::new().pop_up_to("B", false).saving_state());

        assert_eq!(host.back_stack().destinations(), vec!["A", "B"]);
        assert!(host.saved_states().contains("C"));

        go_with(&mut host, "C", NavOptions::new().restoring_state());

        assert_eq!(host.back_stack().destinations(), vec!["A", "B", "Home", "C", "D"]);
        assert!(host.saved_states().is_empty());
        assert_eq!(host.current_destination(), Some("C"));
    }

    #[test]
    fn pop_up_to_inclusive_drops_the_target() {
        let (mut host, _) = host();
        for name in ["A", "B", "C"] {
            go(&mut host, name);
        }

        go_with(&mut host, "Home", NavOptions::new().pop_up_to("B", true));

        assert_eq!(host.back_stack().destinations(), vec!["A"]);
        assert!(host.saved_states().is_empty());
    }

    #[test]
    fn pop_up_to_unknown_target_keeps_history() {
        let (mut host, _) = host();
        go(&mut host, "A");
        go(&mut host, "B");

        go_with(&mut host, "C", NavOptions::new().pop_up_to("Nowhere", false));

        assert_eq!(host.back_stack().destinations(), vec!["A", "B"]);
    }

    //=== Back Navigation =====================================================

    #[test]
    fn pop_back_stack_to_shows_named_entry() {
        let (mut host, _) = host();
        for name in ["A", "B", "C", "D"] {
            go(&mut host, name);
        }

        assert!(host.pop_back_stack_to("B", false).unwrap());

        assert_eq!(host.current_destination(), Some("B"));
        assert_eq!(host.back_stack().destinations(), vec!["A"]);
    }

    #[test]
    fn pop_back_stack_to_inclusive_shows_entry_beneath() {
        let (mut host, _) = host();
        for name in ["A", "B", "C", "D"] {
            go(&mut host, name);
        }

        assert!(host.pop_back_stack_to("B", true).unwrap());
        assert_eq!(host.current_destination(), Some("A"));
        assert!(host.back_stack().is_empty());

        assert!(!host.pop_back_stack_to("Nowhere", false).unwrap());
        assert_eq!(host.current_destination(), Some("A"));
    }

    #[test]
    fn pop_uses_recorded_pop_transitions() {
        let (mut host, log) = host();
        go(&mut host, "Home");
        let options = NavOptions::new().with_animations(NavAnimations {
            pop_exit: Some(NavAnimation::fade(100)),
            ..NavAnimations::none()
        });
        go_with(&mut host, "Settings", options);
        take(&log);

        host.pop_back_stack(false).unwrap();

        assert_eq!(host.pending_removals(), 1);
        assert_eq!(take(&log), vec!["exit:Settings", "start:Settings:Exit", "enter:Home"]);

        host.advance(100.0);
        assert_eq!(host.pending_removals(), 0);
        assert_eq!(take(&log), vec!["finish:Settings:Exit", "release:Settings"]);
    }

    #[test]
    fn clear_navigation_empties_everything() {
        let (mut host, _) = host();
        go(&mut host, "A");
        go(&mut host, "B");

        host.clear_navigation(None).unwrap();

        assert!(host.active_destinations().is_empty());
        assert!(!host.can_go_back());
        assert_eq!(host.current_destination(), None);
        let last = host.events().last::<DestinationChanged>().unwrap();
        assert_eq!(last.current, None);
    }

    #[test]
    fn clear_back_stack_keeps_screen() {
        let (mut host, _) = host();
        go(&mut host, "A");
        go(&mut host, "B");

        host.clear_back_stack();

        assert!(!host.can_go_back());
        assert_eq!(host.active_destinations(), vec!["B"]);
    }

    //=== Popups ==============================================================

    #[test]
    fn closing_a_popup_trims_matching_history() {
        let (mut host, _) = host();
        go(&mut host, "Home");
        go_with(&mut host, "Dialog", NavOptions::popup());
        assert!(host.has_active_popups());
        assert_eq!(host.back_stack().len(), 1);

        assert!(host.close_popup("Dialog", None));

        assert_eq!(host.current_destination(), Some("Home"));
        assert!(!host.has_active_popups());
        assert!(host.back_stack().is_empty());
        assert!(!host.close_popup("Dialog", None));
    }

    #[test]
    fn same_popup_is_rebound_in_place() {
        let (mut host, log) = host();
        go(&mut host, "Home");
        go_with(&mut host, "Dialog", NavOptions::popup());
        take(&log);

        host.navigate("Dialog", Some(NavOptions::popup()), Arguments::new().with("step", 2))
            .unwrap();

        assert_eq!(take(&log), vec!["rebind:Dialog"]);
        assert_eq!(host.active_destinations(), vec!["Home", "Dialog"]);
        assert_eq!(host.back_stack().len(), 1);
    }

    #[test]
    fn new_popup_replaces_the_popup_run() {
        let (mut host, _) = host();
        go(&mut host, "Home");
        go_with(&mut host, "Dialog", NavOptions::popup());

        go_with(&mut host, "Toast", NavOptions::popup());

        assert_eq!(host.active_destinations(), vec!["Home", "Toast"]);
        assert_eq!(host.back_stack().len(), 2);
        assert_eq!(
            host.back_stack().top().unwrap().snapshot().destinations(),
            vec!["Home", "Dialog"]
        );
        assert_popup_tail(&host);
    }

    #[test]
    fn push_new_strips_existing_popups() {
        let (mut host, _) = host();
        go(&mut host, "Home");
        go_with(&mut host, "Dialog", NavOptions::popup());

        let options = NavOptions::popup().with_popup_existing(PopupExistingStrategy::PushNew);
        go_with(&mut host, "Toast", options);

        assert_eq!(host.active_destinations(), vec!["Home", "Toast"]);
        assert_eq!(host.current_destination(), Some("Toast"));
        assert_popup_tail(&host);
    }

    #[test]
    fn popup_without_a_screen_opens_as_screen() {
        let (mut host, _) = host();

        go_with(&mut host, "Dialog", NavOptions::popup());

        assert_eq!(host.active_destinations(), vec!["Dialog"]);
        assert!(!host.has_active_popups());
    }

    #[test]
    fn close_all_popups_restores_the_screen() {
        let (mut host, _) = host();
        go(&mut host, "Home");
        go_with(&mut host, "Dialog", NavOptions::popup());

        assert!(host.close_all_popups(None));
        assert_eq!(host.active_destinations(), vec!["Home"]);
        assert!(host.back_stack().is_empty());
        assert!(!host.close_all_popups(None));
    }

    #[test]
    fn pop_with_clear_popups_closes_popups_on_empty_history() {
        let (mut host, _) = host();
        go(&mut host, "Home");
        go_with(&mut host, "Dialog", NavOptions::popup());
        host.clear_back_stack();

        assert!(!host.pop_back_stack(false).unwrap());
        assert!(host.pop_back_stack(true).unwrap());
        assert_eq!(host.active_destinations(), vec!["Home"]);
    }

    #[test]
    fn popup_tail_invariant_holds_across_operations() {
        let (mut host, _) = host();
        go(&mut host, "Home");
        assert_popup_tail(&host);
        go_with(&mut host, "Dialog", NavOptions::popup());
        assert_popup_tail(&host);
        go_with(&mut host, "Toast", NavOptions::popup());
        assert_popup_tail(&host);
        go(&mut host, "Shop");
        assert_popup_tail(&host);
        go_with(&mut host, "Confirm", NavOptions::popup());
        assert_popup_tail(&host);

        while host.pop_back_stack(false).unwrap() {
            assert_popup_tail(&host);
        }
        assert_eq!(host.active_destinations(), vec!["Home"]);
    }

    #[test]
    fn ensure_base_navigates_to_base_first() {
        let (mut host, _) = host();
        go(&mut host, "Home");

        let options = NavOptions::popup_over("Shop", Arguments::new().with("tab", "weapons"));
        go_with(&mut host, "Confirm", options);

        assert_eq!(host.active_destinations(), vec!["Shop", "Confirm"]);
        assert_eq!(host.back_stack().destinations(), vec!["Home", "Shop"]);
        let base = &host.active().entries()[0];
        assert_eq!(base.arguments().get("tab").and_then(|v| v.as_str()), Some("weapons"));
    }

    #[test]
    fn ensure_base_reuses_current_base() {
        let (mut host, log) = host();
        go(&mut host, "Shop");
        take(&log);

        go_with(&mut host, "Confirm", NavOptions::popup_over("Shop", Arguments::new()));

        assert_eq!(take(&log), vec!["enter:Confirm"]);
        assert_eq!(host.active_destinations(), vec!["Shop", "Confirm"]);
    }

    #[test]
    fn ensure_base_popup_failure_leaves_host_untouched() {
        let (mut host, log) = host();
        go(&mut host, "Home");
        take(&log);
        host.events_mut().clear_all();

        let result = host.navigate(
            "Broken",
            Some(NavOptions::popup_over("Settings", Arguments::new())),
            Arguments::new(),
        );

        assert!(matches!(result, Err(NavigationError::CreationFailed { .. })));
        assert_eq!(host.current_destination(), Some("Home"));
        assert_eq!(host.active_destinations(), vec!["Home"]);
        assert!(host.back_stack().is_empty());
        assert!(take(&log).is_empty());
        assert_eq!(host.events().total_pending(), 0);
    }

    #[test]
    fn ensure_base_enters_base_then_popup() {
        let (mut host, log) = host();
        go(&mut host, "Home");
        take(&log);

        go_with(&mut host, "Confirm", NavOptions::popup_over("Shop", Arguments::new()));

        assert_eq!(
            take(&log),
            vec!["exit:Home", "release:Home", "enter:Shop", "enter:Confirm"]
        );
        assert_eq!(host.current_destination(), Some("Confirm"));

        assert!(host.pop_back_stack(false).unwrap());
        assert_eq!(host.active_destinations(), vec!["Shop"]);
        assert!(host.pop_back_stack(false).unwrap());
        assert_eq!(host.active_destinations(), vec!["Home"]);
    }

    #[test]
    fn ensure_base_without_base_is_rejected() {
        let (mut host, _) = host();
        go(&mut host, "Home");

        let options = NavOptions {
            popup_strategy: PopupStrategy::EnsureBaseAndPopup,
            ..NavOptions::default()
        };

        assert!(!host.navigate("Confirm", Some(options), Arguments::new()).unwrap());
        assert_eq!(host.active_destinations(), vec!["Home"]);
    }

    //=== Reconciliation ======================================================

    #[test]
    fn applying_the_current_snapshot_is_a_noop() {
        let (mut host, log) = host();
        go(&mut host, "Home");
        go_with(&mut host, "Dialog", NavOptions::popup());
        take(&log);
        host.events_mut().clear_all();

        let current = host.active().to_snapshot();
        let fade = Some(NavAnimation::fade(100));
        host.apply_snapshot(&current, fade.clone(), fade).unwrap();

        assert!(take(&log).is_empty());
        assert_eq!(host.events().total_pending(), 0);
        assert_eq!(host.running_animations(), 0);
    }

    #[test]
    fn shared_prefix_entries_are_not_recreated() {
        let (mut host, log) = host();
        go(&mut host, "Home");
        go_with(&mut host, "Dialog", NavOptions::popup());
        let home_id = host.active().entries()[0].id();
        take(&log);

        assert!(host.pop_back_stack(false).unwrap());

        assert_eq!(host.active().entries()[0].id(), home_id);
        assert_eq!(take(&log), vec!["exit:Dialog", "release:Dialog"]);
    }

    //=== Transitions =========================================================

    #[test]
    fn exit_transition_defers_release() {
        let (mut host, log) = host();
        go(&mut host, "Home");
        take(&log);

        go_with(&mut host, "Settings", exit_fade(100));

        assert_eq!(take(&log), vec!["exit:Home", "start:Home:Exit", "enter:Settings"]);
        assert_eq!(host.pending_removals(), 1);
        assert_eq!(host.running_animations(), 1);

        host.advance(50.0);
        assert_eq!(host.pending_removals(), 1);
        assert!(take(&log).is_empty());

        host.advance(60.0);
        assert_eq!(host.pending_removals(), 0);
        assert_eq!(host.running_animations(), 0);
        assert_eq!(take(&log), vec!["finish:Home:Exit", "release:Home"]);

        host.advance(16.0);
        assert!(take(&log).is_empty());
    }

    #[test]
    fn new_navigation_completes_running_transitions() {
        let (mut host, log) = host();
        go(&mut host, "Home");
        let options = NavOptions::new().with_animations(NavAnimations {
            enter: Some(NavAnimation::fade(100)),
            ..NavAnimations::none()
        });
        go_with(&mut host, "Settings", options);
        assert_eq!(host.running_animations(), 1);
        take(&log);

        go(&mut host, "Profile");

        assert_eq!(
            take(&log),
            vec!["finish:Settings:Enter", "exit:Settings", "release:Settings", "enter:Profile"]
        );
        assert_eq!(host.running_animations(), 0);
    }

    #[test]
    fn zero_duration_transitions_finish_inline() {
        let (mut host, log) = host();
        go(&mut host, "Home");
        take(&log);

        go_with(&mut host, "Settings", exit_fade(0));

        assert_eq!(
            take(&log),
            vec!["exit:Home", "start:Home:Exit", "finish:Home:Exit", "release:Home", "enter:Settings"]
        );
        assert_eq!(host.pending_removals(), 0);
        assert_eq!(host.running_animations(), 0);
    }

    #[test]
    fn effectless_exit_still_delays_release() {
        let (mut host, log) = host();
        go(&mut host, "Home");
        take(&log);

        let options = NavOptions::new().with_animations(NavAnimations {
            exit: Some(NavAnimation::new(TransitionEffect::None, 100)),
            ..NavAnimations::none()
        });
        go_with(&mut host, "Settings", options);

        assert_eq!(take(&log), vec!["exit:Home", "start:Home:Exit", "enter:Settings"]);
        assert_eq!(host.pending_removals(), 1);
        assert_eq!(host.running_animations(), 1);

        host.advance(60.0);
        assert_eq!(host.pending_removals(), 1);

        host.advance(40.0);
        assert_eq!(host.pending_removals(), 0);
        assert_eq!(take(&log), vec!["finish:Home:Exit", "release:Home"]);
    }

    #[test]
    fn default_animations_apply_without_options() {
        let (mut host, _) = host_with(|b| b.with_default_animations(NavAnimations::fade(100)));
        go(&mut host, "Home");
        assert_eq!(host.running_animations(), 1);

        go(&mut host, "Settings");
        assert_eq!(host.running_animations(), 2);
        assert_eq!(host.pending_removals(), 1);

        host.advance(100.0);
        assert_eq!(host.running_animations(), 0);
        assert_eq!(host.pending_removals(), 0);
    }

    //=== Actions =============================================================

    #[test]
    fn action_alias_merges_arguments() {
        let (mut host, _) = host_with(|b| {
            b.with_actions([NavAction::new("open_profile", "Profile")
                .with_argument("user", 7)
                .with_argument("tab", "posts")])
        });

        host.navigate("open_profile", None, Arguments::new().with("tab", "likes"))
            .unwrap();

        let arguments = host.active().top().unwrap().arguments().clone();
        assert_eq!(arguments.get("user").and_then(|v| v.as_int()), Some(7));
        assert_eq!(arguments.get("tab").and_then(|v| v.as_str()), Some("likes"));

        let triggered = host.events().read::<ActionTriggered>();
        assert_eq!(
            triggered,
            &[ActionTriggered {
                action: "open_profile".into(),
                destination: "Profile".into(),
            }]
        );
    }

    #[test]
    fn action_options_take_effect() {
        let (mut host, _) = host_with(|b| {
            b.with_actions([NavAction::new("ask", "Confirm").with_options(NavOptions::popup())])
        });
        go(&mut host, "Home");

        go(&mut host, "ask");

        assert_eq!(host.active_destinations(), vec!["Home", "Confirm"]);
        assert!(host.has_active_popups());
    }

    #[test]
    fn degraded_action_publishes_nothing() {
        let ensure_base = NavOptions {
            popup_strategy: PopupStrategy::EnsureBaseAndPopup,
            ..NavOptions::default()
        };
        let (mut host, _) = host_with(|b| {
            b.with_actions([NavAction::new("ask", "Confirm").with_options(ensure_base)])
        });
        go(&mut host, "Home");

        assert!(!host.navigate("ask", None, Arguments::new()).unwrap());

        assert!(!host.events().has_events::<ActionTriggered>());
        assert_eq!(host.active_destinations(), vec!["Home"]);
    }

    //=== Save / Restore ======================================================

    #[test]
    fn save_restore_round_trip() {
        let (mut host, _) = host();
        go(&mut host, "Home");
        go(&mut host, "Shop");
        go_with(&mut host, "Dialog", NavOptions::popup());
        let state = host.save_state();

        go(&mut host, "Settings");
        go(&mut host, "Profile");
        host.restore_state(&state).unwrap();

        assert_eq!(host.current_destination(), Some("Dialog"));
        assert!(host.can_go_back());
        assert!(host.has_active_popups());
        assert_eq!(host.active_destinations(), vec!["Shop", "Dialog"]);
        assert_eq!(host.save_state(), state);
    }

    #[test]
    fn saved_state_survives_json() {
        let (mut host, _) = host();
        go(&mut host, "Home");
        host.navigate("Profile", None, Arguments::new().with("user", 3).with("guest", false))
            .unwrap();
        let state = host.save_state();

        let text = state.to_json().unwrap();
        let decoded = NavigationState::from_json(&text).unwrap();

        assert_eq!(decoded, state);
        assert!(matches!(
            NavigationState::from_json("{ not json"),
            Err(StateError::Decode(_))
        ));
    }

    #[test]
    fn restore_completes_running_transitions() {
        let (mut host, log) = host();
        go(&mut host, "Home");
        let state = host.save_state();
        go_with(&mut host, "Settings", exit_fade(100));
        assert_eq!(host.pending_removals(), 1);
        take(&log);

        host.restore_state(&state).unwrap();

        let log = take(&log);
        assert_eq!(log[0], "finish:Home:Exit");
        assert!(log.contains(&"release:Settings".to_string()));
        assert_eq!(host.pending_removals(), 0);
        assert_eq!(host.running_animations(), 0);
        assert_eq!(host.active_destinations(), vec!["Home"]);
    }

    #[test]
    fn restore_rejects_unknown_destinations() {
        let (mut host, _) = host();
        go(&mut host, "Home");

        let state = NavigationState {
            current_destination: Some("Gone".into()),
            active: StackSnapshot::single(StackItem::new("Gone", NavOptions::new(), Arguments::new())),
            ..NavigationState::default()
        };

        assert!(matches!(
            host.restore_state(&state),
            Err(NavigationError::UnknownDestination(ref key)) if key == "Gone"
        ));
        assert_eq!(host.active_destinations(), vec!["Home"]);
    }

    #[test]
    fn restore_rejects_malformed_state() {
        let (mut host, _) = host();
        go(&mut host, "Home");

        let state = NavigationState {
            current_destination: Some("Shop".into()),
            active: StackSnapshot::single(StackItem::new("Home", NavOptions::new(), Arguments::new())),
            ..NavigationState::default()
        };

        assert!(matches!(
            host.restore_state(&state),
            Err(NavigationError::MalformedState(_))
        ));
    }

    //=== Commands ============================================================

    #[test]
    fn commands_run_with_a_per_frame_cap() {
        let (mut host, _) = host_with(|b| b.with_max_commands_per_frame(2));
        let mailbox = CommandMailbox::new(8);
        mailbox.post(HostCommand::navigate("Home", Arguments::new()));
        mailbox.post(HostCommand::navigate("Settings", Arguments::new()));
        mailbox.post(HostCommand::navigate("Nowhere", Arguments::new()));
        mailbox.post(HostCommand::back());

        assert_eq!(host.process_commands(&mailbox), 2);
        assert_eq!(host.current_destination(), Some("Settings"));

        assert_eq!(host.process_commands(&mailbox), 2);
        assert_eq!(host.current_destination(), Some("Home"));

        assert_eq!(host.process_commands(&mailbox), 0);
    }

    #[test]
    fn popup_commands_close_popups() {
        let (mut host, _) = host();
        let mailbox = CommandMailbox::new(8);
        let sender = mailbox.sender();
        go(&mut host, "Home");
        go_with(&mut host, "Dialog", NavOptions::popup());

        sender.send(HostCommand::ClosePopup {
            destination: "Dialog".into(),
        });
        sender.send(HostCommand::ClearNavigation);
        host.process_commands(&mailbox);

        assert!(host.active_destinations().is_empty());
        assert!(!host.can_go_back());
    }

    //=== Persistence =========================================================

    #[test]
    fn last_destination_is_recorded_and_restored() {
        let store = SharedStore::default();
        let (mut host, _) = host_with(|b| b.with_persistence(store.clone(), "nav.last"));
        go(&mut host, "Home");
        go(&mut host, "Shop");
        go_with(&mut host, "Dialog", NavOptions::popup());

        assert_eq!(store.get("nav.last").as_deref(), Some("Shop"));

        let (mut next_session, _) = host_with(|b| b.with_persistence(store.clone(), "nav.last"));
        assert!(next_session.restore_last_destination().unwrap());
        assert_eq!(next_session.current_destination(), Some("Shop"));
    }

    #[test]
    fn stale_last_destination_is_ignored() {
        let mut store = SharedStore::default();
        store.set("nav.last", "Removed");
        let (mut persisted, _) = host_with(|b| b.with_persistence(store.clone(), "nav.last"));

        assert!(!persisted.restore_last_destination().unwrap());
        assert_eq!(persisted.current_destination(), None);

        let (mut plain, _) = host();
        assert!(!plain.restore_last_destination().unwrap());
    }
}
