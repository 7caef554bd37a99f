//=========================================================================
// Event Kinds
//=========================================================================
//
// Notification payloads published by the navigation host.
//
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== Events ==============================================================

/// The visible (topmost) destination changed.
///
/// `None` means the active stack is empty on that side of the change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationChanged {
    pub previous: Option<String>,
    pub current: Option<String>,
}

/// An entry was materialized on the active stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnteredDestination {
    pub destination: String,
    pub is_popup: bool,
}

/// An entry was removed from the active stack.
///
/// Published when removal starts; the element itself may still be
/// playing its exit transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitedDestination {
    pub destination: String,
    pub is_popup: bool,
}

/// A named action was resolved by `navigate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionTriggered {
    pub action: String,
    pub destination: String,
}
