use std::fmt;

use serde::{Deserialize, Serialize};
use crate::message::Message;

/// Opaque identifier the generation service issues to correlate exchanges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Point-in-time copy of the session store, handed to renderers
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub messages: Vec<Message>,
    pub pending: bool,
    pub session_id: Option<SessionId>,
    pub revision: u64,
}

impl SessionSnapshot {
    /// Index of the user message still awaiting its reply, if any.
    pub fn pending_index(&self) -> Option<usize> {
        if !self.pending {
            return None;
        }
        let last = self.messages.len().checked_sub(1)?;
        self.messages[last].is_user().then_some(last)
    }
}
