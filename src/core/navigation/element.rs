//=========================================================================
// Destination Elements
//=========================================================================

//=== Internal Dependencies ===============================================

use super::Arguments;

//=== NavElement Trait ====================================================

/// Lifecycle hooks of a visual element created for a destination.
///
/// Elements are created by the [`DestinationRegistry`](super::DestinationRegistry)
/// and owned by the host while they are on the active stack. All hooks
/// default to doing nothing.
///
/// ```rust
/// use aetheric_navigation::core::navigation::{Arguments, NavElement};
///
/// #[derive(Default)]
/// struct ProfileScreen {
///     user: Option<i64>,
/// }
///
/// impl NavElement for ProfileScreen {
///     fn on_enter(&mut self, arguments: &Arguments) {
///         self.user = arguments.get("user").and_then(|v| v.as_int());
///     }
/// }
/// ```
pub trait NavElement: 'static {
    /// Called after the element is placed on the active stack.
    fn on_enter(&mut self, _arguments: &Arguments) {}

    /// Called when the entry is re-targeted with different arguments
    /// without being re-created.
    fn on_rebind(&mut self, _arguments: &Arguments) {}

    /// Called when the entry leaves the active stack, before any exit
    /// transition plays.
    fn on_exit(&mut self) {}
}

impl<T: NavElement + ?Sized> NavElement for Box<T> {
    fn on_enter(&mut self, arguments: &Arguments) {
        (**self).on_enter(arguments)
    }

    fn on_rebind(&mut self, arguments: &Arguments) {
        (**self).on_rebind(arguments)
    }

    fn on_exit(&mut self) {
        (**self).on_exit()
    }
}
