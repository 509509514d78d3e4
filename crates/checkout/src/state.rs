//! Checkout attempt state machine.

use serde::{Deserialize, Serialize};

/// Lifecycle of a single checkout attempt.
///
/// ```text
/// Idle ──► SessionOpened ──┬──► Succeeded  (cart cleared)
///                          └──► Cancelled  (cart unchanged)
/// ```
///
/// Every checkout starts a fresh attempt from `Idle`. There is no failure
/// state distinct from `Cancelled`: gateway errors settle through the same
/// path as a user close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttemptState {
    /// No session open. Initial state of every attempt.
    #[default]
    Idle,

    /// A payment session has been handed to the gateway.
    SessionOpened,

    /// The gateway confirmed payment.
    Succeeded,

    /// The session closed without payment.
    Cancelled,
}

impl AttemptState {
    /// Returns true if a session can be opened from this state.
    pub fn can_open(&self) -> bool {
        matches!(self, AttemptState::Idle)
    }

    /// Returns true if the attempt has settled one way or the other.
    pub fn is_settled(&self) -> bool {
        matches!(self, AttemptState::Succeeded | AttemptState::Cancelled)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptState::Idle => "Idle",
            AttemptState::SessionOpened => "SessionOpened",
            AttemptState::Succeeded => "Succeeded",
            AttemptState::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for AttemptState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
