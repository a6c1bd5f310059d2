//! Exchange controller — drives one prompt/reply round trip.
//!
//! An exchange is split in two halves:
//! 1. [`ExchangeController::begin`] runs synchronously: it validates the
//!    input and commits the user entry plus the pending flag in the same
//!    turn, before anything is awaited. Overlapping submissions are rejected
//!    here.
//! 2. [`ExchangeController::complete`] is async: it fetches a fresh credential,
//!    sends the request, and settles the store with a reply or an error entry.
//!
//! Every failure is absorbed into the transcript; nothing propagates out of
//! `complete`, and the pending flag is cleared on every path.

use std::cell::Cell;
use std::rc::Rc;

use dora_types::{
    ChatError, Result,
    config::ClientConfig,
    event::ChatEvent,
    identity::Credential,
    wire::{GenerateRequest, Reply},
};
use crate::event_bus::EventBus;
use crate::ports::{GenerationPort, IdentityPort};
use crate::store::SessionStore;

/// An accepted submission awaiting completion
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub id: u64,
    pub prompt: String,
    /// Store epoch at acceptance; results from an older epoch are dropped.
    epoch: u64,
}

/// How an exchange ended. The transcript alone cannot tell a reply from an
/// error entry, so callers that care read it from here.
#[derive(Debug, Clone, PartialEq)]
pub enum ExchangeOutcome {
    /// Input was empty or another exchange was pending; nothing changed
    Rejected(ChatError),
    Replied,
    Failed(ChatError),
    /// The store was reset while the request was in flight
    Discarded,
}

#[derive(Clone)]
pub struct ExchangeController {
    config: Rc<ClientConfig>,
    store: SessionStore,
    event_bus: EventBus,
    identity: Rc<dyn IdentityPort>,
    generation: Rc<dyn GenerationPort>,
    exchange_counter: Rc<Cell<u64>>,
}

impl ExchangeController {
    pub fn new(
        config: ClientConfig,
        store: SessionStore,
        event_bus: EventBus,
        identity: Rc<dyn IdentityPort>,
        generation: Rc<dyn GenerationPort>,
    ) -> Self {
        Self {
            config: Rc::new(config),
            store,
            event_bus,
            identity,
            generation,
            exchange_counter: Rc::new(Cell::new(0)),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Validate and commit a submission. Synchronous on purpose: the pending
    /// check and the pending write must not be separated by an await.
    pub fn begin(&self, input: &str) -> Result<Exchange> {
        if let Err(e) = self.store.append_user(input) {
            log::debug!("Submission rejected: {}", e);
            return Err(e);
        }

        let id = self.exchange_counter.get() + 1;
        self.exchange_counter.set(id);
        self.event_bus.emit(ChatEvent::ExchangeStart { exchange_id: id });

        Ok(Exchange {
            id,
            prompt: input.to_string(),
            epoch: self.store.epoch(),
        })
    }

    /// Acquire a credential, call the service, and settle the store.
    pub async fn complete(&self, exchange: Exchange) -> ExchangeOutcome {
        let result = self.request_reply(&exchange).await;

        if self.store.epoch() != exchange.epoch {
            log::debug!("Exchange {} settled after reset; discarding", exchange.id);
            return ExchangeOutcome::Discarded;
        }

        let outcome = match result {
            Ok(reply) => {
                self.store.append_reply(&reply.text);
                self.event_bus.emit(ChatEvent::ReplyReceived { exchange_id: exchange.id });
                if let Some(session_id) = reply.session_id {
                    if self.store.set_session_id_once(&session_id) {
                        log::info!("Session assigned: {}", session_id);
                        self.event_bus.emit(ChatEvent::SessionAssigned { session_id });
                    }
                }
                ExchangeOutcome::Replied
            }
            Err(e) => {
                log::warn!("Exchange {} failed: {}", exchange.id, e);
                let message = format!("Error: {}", e);
                self.store.append_error(&message);
                self.event_bus.emit(ChatEvent::ExchangeFailed {
                    exchange_id: exchange.id,
                    message,
                });
                ExchangeOutcome::Failed(e)
            }
        };

        self.event_bus.emit(ChatEvent::ExchangeEnd { exchange_id: exchange.id });
        outcome
    }

    /// `begin` followed by `complete`
    pub async fn submit(&self, input: &str) -> ExchangeOutcome {
        match self.begin(input) {
            Ok(exchange) => self.complete(exchange).await,
            Err(e) => ExchangeOutcome::Rejected(e),
        }
    }

    async fn request_reply(&self, exchange: &Exchange) -> Result<Reply> {
        let credential = self.acquire_credential().await?;

        let req = GenerateRequest {
            prompt: exchange.prompt.clone(),
            max_length: self.config.generation.max_length,
            session_id: self.store.session_id().map(|id| id.as_str().to_string()),
        };

        self.generation
            .generate(req, credential.as_ref())
            .await?
            .into_reply()
    }

    /// Fetch a fresh token when the deployment requires one. Both a provider
    /// error and a missing token end the exchange before any request is sent.
    async fn acquire_credential(&self) -> Result<Option<Credential>> {
        if !self.config.auth.require_credential {
            return Ok(None);
        }
        match self.identity.fetch_token().await {
            Ok(Some(credential)) => Ok(Some(credential)),
            Ok(None) => Err(ChatError::NotAuthenticated),
            Err(e) => {
                log::warn!("Token fetch from {} failed: {}", self.identity.provider_name(), e);
                Err(ChatError::NotAuthenticated)
            }
        }
    }
}
