//=========================================================================
// Navigation Errors
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Type Aliases ========================================================

/// Error type element factories may return.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

//=== NavigationError =====================================================

/// Failure of a single host operation. The host state is left exactly as
/// it was before the call.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// No factory is registered under the destination key.
    #[error("destination `{0}` is not registered")]
    UnknownDestination(String),

    /// The factory for a destination returned an error.
    #[error("failed to create element for destination `{destination}`")]
    CreationFailed {
        destination: String,
        #[source]
        source: BoxError,
    },

    /// A state handed to `restore_state` breaks a stack invariant.
    #[error("malformed navigation state: {0}")]
    MalformedState(String),
}

//=== RegistrationError ===================================================

/// A destination or action rejected at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("destination `{0}` is already registered")]
    DuplicateDestination(String),

    #[error("action `{0}` is already registered")]
    DuplicateAction(String),

    #[error("registration key must not be blank")]
    BlankKey,

    #[error("action `{0}` has no destination")]
    BlankActionDestination(String),
}

//=== StateError ==========================================================

/// Failure encoding or decoding a saved navigation state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to encode navigation state")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode navigation state")]
    Decode(#[source] serde_json::Error),
}

//=========================================================================
// Unit Tests
//=========================================================================
