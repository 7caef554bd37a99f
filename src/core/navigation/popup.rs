//=========================================================================
// Popup Navigation
//=========================================================================
//
// Popups are items flagged `is_popup` layered over the topmost screen.
// They always form the top run of the active stack:
//
//   [Home, Shop, (Confirm), (Toast)]
//               └─ popup tail ─────┘
//
// Opening a popup pushes the previous snapshot on the back stack, so
// "back" closes it. Closing a popup directly trims back stack entries
// that would return to the layout left on screen.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, error, warn};

//=== Internal Dependencies ===============================================

use super::{
    Arguments, BackStackEntry, NavElement, NavOptions, NavigationError, NavigationHost,
    PopupExistingStrategy, StackItem,
};
use crate::core::animation::NavAnimation;

impl<E: NavElement> NavigationHost<E> {
    //--- Opening ----------------------------------------------------------

    /// Layers `destination` over the active stack.
    pub(super) fn navigate_popup(
        &mut self,
        destination: String,
        options: NavOptions,
        arguments: Arguments,
    ) -> Result<bool, NavigationError> {
        if self.active.is_empty() {
            warn!("No screen to host popup {:?}, opening it as a screen", destination);
            return self.navigate_plain(destination, options.without_popup(), arguments);
        }

        if let Some(top) = self.active.top_mut() {
            if top.is_popup() && top.destination() == destination {
                debug!("Popup {:?} is already on top, rebinding", destination);
                top.rebind(options, arguments);
                self.refresh_top();
                return Ok(true);
            }
        }

        let current = self.active.to_snapshot();
        let strategy = options.popup_existing_strategy;
        let exit = options.animations.exit.clone();
        let enter = options.animations.enter.clone();
        let popup = StackItem::popup(destination, options, arguments);

        let target = if strategy == PopupExistingStrategy::PushNew {
            let base = current.without_popups();
            if base.is_empty() {
                current.clone().with_item(popup)
            } else {
                base.with_item(popup)
            }
        } else if !current.has_popups() {
            current.clone().with_item(popup)
        } else {
            debug!("Replacing the open popup run with {:?}", popup.destination());
            current.without_popups().with_item(popup)
        };

        self.apply_snapshot(&target, exit, enter)?;

        if let Some(entry) = BackStackEntry::capture(current) {
            self.back_stack.push(entry);
        }
        Ok(true)
    }

    /// Shows `popup_base_destination` as the screen, then opens the popup
    /// over it.
    ///
    /// The base navigation is skipped when the base is already the
    /// topmost screen. Otherwise base and popup are applied as one step:
    /// both elements are created before the host changes, so a failing
    /// factory leaves the host as it was.
    pub(super) fn navigate_popup_with_base(
        &mut self,
        destination: String,
        options: NavOptions,
        arguments: Arguments,
    ) -> Result<bool, NavigationError> {
        let Some(base) = options
            .popup_base_destination
            .clone()
            .filter(|base| !base.trim().is_empty())
        else {
            error!("Popup {:?} needs a base destination, none configured", destination);
            return Ok(false);
        };

        let on_base = self
            .active
            .top_base()
            .map_or(false, |entry| entry.destination() == base);
        if on_base {
            return self.navigate_popup(destination, options, arguments);
        }

        if !self.registry.contains(&base) {
            return Err(NavigationError::UnknownDestination(base));
        }

        debug!("Navigating to popup base {:?} first", base);
        let base_arguments = options.popup_base_arguments.clone();
        let plan = self.plan_plain(base, options.without_popup(), base_arguments);

        let enter = options.animations.enter.clone();
        let popup = StackItem::popup(destination, options, arguments);
        let target = plan.target.clone().with_item(popup);
        self.apply_snapshot(&target, plan.exit, enter)?;

        let mut back_stack = plan.back_stack;
        if let Some(entry) = BackStackEntry::capture(plan.target) {
            back_stack.push(entry);
        }
        self.back_stack = back_stack;
        self.saved_states = plan.saved_states;
        Ok(true)
    }

    //--- Closing ----------------------------------------------------------

    /// Closes every popup, topmost first.
    ///
    /// Each popup leaves with `exit`, or with its own exit transition
    /// when `exit` is `None`. Returns whether anything was closed.
    pub fn close_all_popups(&mut self, exit: Option<NavAnimation>) -> bool {
        let count = self.active.popup_tail_len();
        if count == 0 {
            return false;
        }

        debug!("Closing {} popups", count);
        for _ in 0..count {
            let index = self.active.len() - 1;
            let own_exit = self
                .active
                .top()
                .and_then(|entry| entry.options().animations.exit.clone());
            self.remove_active_at(index, exit.clone().or(own_exit));
        }

        self.trim_back_stack_to_active();
        self.refresh_top();
        true
    }

    /// Closes the popup `destination`, leaving the entries below it.
    ///
    /// Only the popup tail is searched. Returns `false` when no open
    /// popup matches.
    pub fn close_popup(&mut self, destination: &str, exit: Option<NavAnimation>) -> bool {
        let Some(index) = self.active.find_in_popup_tail(destination) else {
            debug!("No open popup {:?} to close", destination);
            return false;
        };

        let exit = exit.or_else(|| {
            self.active
                .entries()
                .get(index)
                .and_then(|entry| entry.options().animations.exit.clone())
        });
        self.remove_active_at(index, exit);

        self.trim_back_stack_to_active();
        self.refresh_top();
        true
    }
}
