use serde::{Deserialize, Serialize};
use crate::identity::Identity;

/// Events emitted by the exchange controller and identity bridge.
/// UI subscribes to these for reactive updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChatEvent {
    /// A submission was accepted and the user entry appended
    ExchangeStart { exchange_id: u64 },

    /// The service answered with generated text
    ReplyReceived { exchange_id: u64 },

    /// The exchange ended in an error entry
    ExchangeFailed { exchange_id: u64, message: String },

    /// The service issued the session identifier for the first time
    SessionAssigned { session_id: String },

    /// Pending flag cleared
    ExchangeEnd { exchange_id: u64 },

    /// Provider reported a sign-in, sign-out, or its initial state
    IdentityChanged { identity: Option<Identity> },

    /// A sign-in or sign-up attempt failed
    AuthFailed { message: String },

    /// A sign-in or sign-up attempt finished, successfully or not
    AuthSettled,
}
