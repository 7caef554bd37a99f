//=========================================================================
// Host Commands
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::navigation::{Arguments, NavOptions};

//=== HostCommand =========================================================

/// A host operation requested from outside the UI thread.
///
/// Each variant maps onto the host method of the same name.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    Navigate {
        destination: String,
        options: Option<NavOptions>,
        arguments: Arguments,
    },
    PopBackStack {
        clear_popups: bool,
    },
    PopBackStackTo {
        destination: String,
        inclusive: bool,
    },
    ClosePopup {
        destination: String,
    },
    CloseAllPopups,
    ClearBackStack,
    ClearNavigation,
}

impl HostCommand {
    /// Plain navigation with default options.
    pub fn navigate(destination: impl Into<String>, arguments: Arguments) -> Self {
        Self::Navigate {
            destination: destination.into(),
            options: None,
            arguments,
        }
    }

    pub fn back() -> Self {
        Self::PopBackStack {
            clear_popups: false,
        }
    }
}
