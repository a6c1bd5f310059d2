//! WASM-target tests for dora-core.
//!
//! Runs EventBus, SessionStore, InputNormalizer, and ExchangeController
//! tests under wasm32-unknown-unknown via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use dora_core::event_bus::EventBus;
use dora_core::exchange::{ExchangeController, ExchangeOutcome};
use dora_core::identity::{IdentityCallback, IdentityListeners, Subscription};
use dora_core::input::InputNormalizer;
use dora_core::ports::*;
use dora_core::store::SessionStore;
use dora_types::config::ClientConfig;
use dora_types::event::ChatEvent;
use dora_types::identity::{Credential, Identity};
use dora_types::message::Role;
use dora_types::wire::{GenerateRequest, GenerateResponse};
use dora_types::ChatError;

use std::cell::RefCell;
use std::rc::Rc;
use async_trait::async_trait;

// ─── EventBus Tests ──────────────────────────────────────

#[wasm_bindgen_test]
fn event_bus_emit_and_drain() {
    let bus = EventBus::new();
    bus.emit(ChatEvent::ExchangeStart { exchange_id: 1 });
    assert!(bus.has_pending());
    assert_eq!(bus.drain().len(), 1);
    assert!(!bus.has_pending());
}

// ─── SessionStore Tests ──────────────────────────────────

#[wasm_bindgen_test]
fn store_append_cycle() {
    let store = SessionStore::new();
    store.append_user("Hello").unwrap();
    assert!(store.is_pending());
    assert_eq!(store.append_user("again"), Err(ChatError::ExchangePending));
    store.append_reply("Hi");
    assert!(!store.is_pending());
    assert_eq!(store.len(), 2);
}

#[wasm_bindgen_test]
fn store_session_id_once() {
    let store = SessionStore::new();
    assert!(store.set_session_id_once("abc"));
    assert!(!store.set_session_id_once("def"));
    assert_eq!(store.session_id().unwrap().as_str(), "abc");
}

// ─── InputNormalizer Tests ───────────────────────────────

#[wasm_bindgen_test]
fn input_growth_is_capped() {
    let mut input = InputNormalizer::default();
    assert_eq!(input.on_change(10.0), 36.0);
    assert_eq!(input.on_change(90.0), 90.0);
    assert_eq!(input.on_change(1000.0), 200.0);
}

// ─── ExchangeController Tests ────────────────────────────

struct StaticIdentity {
    token: Option<&'static str>,
    listeners: IdentityListeners,
}

#[async_trait(?Send)]
impl IdentityPort for StaticIdentity {
    fn is_ready(&self) -> bool {
        true
    }

    fn current_identity(&self) -> Option<Identity> {
        self.token.map(|_| Identity {
            uid: "u1".to_string(),
            email: None,
            anonymous: true,
        })
    }

    fn on_identity_change(&self, callback: IdentityCallback) -> Subscription {
        self.listeners.subscribe(callback)
    }

    async fn fetch_token(&self) -> dora_types::Result<Option<Credential>> {
        Ok(self.token.map(Credential::new))
    }

    async fn sign_in(&self, _email: &str, _password: &str) -> dora_types::Result<Identity> {
        Err(ChatError::Identity("unsupported".to_string()))
    }

    async fn sign_up(&self, _email: &str, _password: &str) -> dora_types::Result<Identity> {
        Err(ChatError::Identity("unsupported".to_string()))
    }

    async fn sign_in_anonymously(&self) -> dora_types::Result<Identity> {
        Err(ChatError::Identity("unsupported".to_string()))
    }

    async fn sign_out(&self) -> dora_types::Result<()> {
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "static"
    }
}

#[derive(Default)]
struct RecordingGeneration {
    prompts: RefCell<Vec<String>>,
}

#[async_trait(?Send)]
impl GenerationPort for RecordingGeneration {
    async fn generate(
        &self,
        req: GenerateRequest,
        _credential: Option<&Credential>,
    ) -> dora_types::Result<GenerateResponse> {
        self.prompts.borrow_mut().push(req.prompt);
        Ok(GenerateResponse {
            generated_text: Some("Hi".to_string()),
            session_id: Some("abc".to_string()),
            error: None,
        })
    }
}

fn controller(token: Option<&'static str>) -> (ExchangeController, SessionStore, Rc<RecordingGeneration>) {
    let store = SessionStore::new();
    let generation = Rc::new(RecordingGeneration::default());
    let identity = Rc::new(StaticIdentity {
        token,
        listeners: IdentityListeners::new(),
    });
    let ctrl = ExchangeController::new(
        ClientConfig::default(),
        store.clone(),
        EventBus::new(),
        identity,
        generation.clone(),
    );
    (ctrl, store, generation)
}

#[wasm_bindgen_test]
async fn exchange_reply_assigns_session() {
    let (ctrl, store, _generation) = controller(Some("tok"));
    assert_eq!(ctrl.submit("Hello").await, ExchangeOutcome::Replied);
    let messages = store.messages();
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[1].content, "Hi");
    assert_eq!(store.session_id().unwrap().as_str(), "abc");
}

#[wasm_bindgen_test]
async fn exchange_without_token_skips_network() {
    let (ctrl, store, generation) = controller(None);
    let outcome = ctrl.submit("Hello").await;
    assert_eq!(outcome, ExchangeOutcome::Failed(ChatError::NotAuthenticated));
    assert_eq!(store.len(), 2);
    assert!(!store.is_pending());
    assert!(generation.prompts.borrow().is_empty());
}

#[wasm_bindgen_test]
async fn exchange_blank_input_rejected() {
    let (ctrl, store, _generation) = controller(Some("tok"));
    assert_eq!(ctrl.submit("   ").await, ExchangeOutcome::Rejected(ChatError::EmptyInput));
    assert!(store.is_empty());
}
