//! Session state store — the single owner of the transcript, the pending
//! flag, and the session identifier.
//!
//! The store is a clone-cheap handle passed explicitly to whoever needs it.
//! Every mutation happens inside one `borrow_mut`, so the transcript length
//! and the pending flag are never observed out of step.

use std::cell::RefCell;
use std::rc::Rc;

use dora_types::{
    ChatError, Result,
    message::Message,
    session::{SessionId, SessionSnapshot},
};

#[derive(Default)]
struct StoreState {
    messages: Vec<Message>,
    pending: bool,
    session_id: Option<SessionId>,
    /// Bumped on every append; renderers scroll to the latest entry when it moves.
    revision: u64,
    /// Bumped on every reset.
    epoch: u64,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    state: Rc<RefCell<StoreState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the user's entry and enter the pending state.
    ///
    /// Rejects whitespace-only text and submissions while another exchange
    /// is pending; a rejection leaves the store untouched.
    pub fn append_user(&self, text: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if text.trim().is_empty() {
            return Err(ChatError::EmptyInput);
        }
        if state.pending {
            return Err(ChatError::ExchangePending);
        }
        state.messages.push(Message::user(text));
        state.pending = true;
        state.revision += 1;
        Ok(())
    }

    /// Append the assistant's reply and leave the pending state.
    pub fn append_reply(&self, text: &str) {
        self.settle(Message::assistant(text));
    }

    /// Append an error description as an assistant entry and leave the
    /// pending state. The entry carries no marker distinguishing it from a reply.
    pub fn append_error(&self, text: &str) {
        self.settle(Message::assistant(text));
    }

    fn settle(&self, message: Message) {
        let mut state = self.state.borrow_mut();
        state.messages.push(message);
        state.pending = false;
        state.revision += 1;
    }

    /// Record the service-issued session id. First assignment wins.
    pub fn set_session_id_once(&self, id: &str) -> bool {
        let mut state = self.state.borrow_mut();
        if state.session_id.is_some() {
            return false;
        }
        state.session_id = Some(SessionId::new(id));
        true
    }

    /// Discard the transcript and session id, as when the chat view unmounts.
    pub fn reset(&self) {
        let mut state = self.state.borrow_mut();
        state.messages.clear();
        state.pending = false;
        state.session_id = None;
        state.revision += 1;
        state.epoch += 1;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.borrow();
        SessionSnapshot {
            messages: state.messages.clone(),
            pending: state.pending,
            session_id: state.session_id.clone(),
            revision: state.revision,
        }
    }

    pub fn messages(&self) -> Vec<Message> {
        self.state.borrow().messages.clone()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_pending(&self) -> bool {
        self.state.borrow().pending
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.state.borrow().session_id.clone()
    }

    pub fn revision(&self) -> u64 {
        self.state.borrow().revision
    }

    pub fn epoch(&self) -> u64 {
        self.state.borrow().epoch
    }
}
