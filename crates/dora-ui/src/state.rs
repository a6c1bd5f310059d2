//! UI-level state that drives rendering.
//! Transcript data comes from the session store snapshot each frame; this
//! holds only what the store does not own, updated by draining the EventBus.

use dora_core::input::{InputBounds, InputNormalizer};
use dora_types::event::ChatEvent;
use dora_types::identity::Identity;
use crate::auth_form::AuthForm;

pub struct UiState {
    /// Input field content
    pub input_text: String,
    /// Height of the input field
    pub input: InputNormalizer,
    /// Status line text
    pub status_text: String,
    /// Signed-in principal, `None` shows the auth gate
    pub identity: Option<Identity>,
    pub auth_form: AuthForm,
    /// Set once the provider has reported its initial state
    pub identity_resolved: bool,
    focus_input: bool,
    seen_revision: u64,
}

impl UiState {
    pub fn new(bounds: InputBounds) -> Self {
        Self {
            input_text: String::new(),
            input: InputNormalizer::new(bounds),
            status_text: "Ready".to_string(),
            identity: None,
            auth_form: AuthForm::new(),
            identity_resolved: false,
            focus_input: false,
            seen_revision: 0,
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::ExchangeStart { .. } => {
                    self.status_text = "Thinking...".to_string();
                }
                ChatEvent::ReplyReceived { .. } => {
                    self.status_text = "Ready".to_string();
                }
                ChatEvent::ExchangeFailed { message, .. } => {
                    self.status_text = message;
                }
                ChatEvent::SessionAssigned { session_id } => {
                    log::debug!("UI saw session {}", session_id);
                }
                ChatEvent::ExchangeEnd { .. } => {
                    if self.status_text == "Thinking..." {
                        self.status_text = "Ready".to_string();
                    }
                }
                ChatEvent::IdentityChanged { identity } => {
                    self.identity_resolved = true;
                    if identity.is_some() {
                        self.auth_form.clear();
                        self.focus_input = true;
                    } else {
                        self.clear_input();
                        self.status_text = "Ready".to_string();
                    }
                    self.identity = identity;
                }
                ChatEvent::AuthFailed { message } => {
                    self.auth_form.fail(message);
                }
                ChatEvent::AuthSettled => {
                    self.auth_form.settle();
                }
            }
        }
    }

    /// Optimistic reset after a submission was accepted: empty the field,
    /// collapse it, and hand focus back to it.
    pub fn clear_input(&mut self) {
        self.input_text.clear();
        self.input.collapse();
        self.focus_input = true;
    }

    /// Returns true once per focus request
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_input)
    }

    /// True when the transcript changed since the last call, i.e. the view
    /// should scroll to the latest entry.
    pub fn take_scroll(&mut self, revision: u64) -> bool {
        if revision != self.seen_revision {
            self.seen_revision = revision;
            true
        } else {
            false
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(InputBounds::default())
    }
}
