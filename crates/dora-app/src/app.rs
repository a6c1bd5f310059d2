//! Main egui application — gates on identity and hosts the chat panel.

use std::rc::Rc;

use egui::{self, CentralPanel};

use dora_core::event_bus::EventBus;
use dora_core::exchange::ExchangeController;
use dora_core::identity::Subscription;
use dora_core::input::InputBounds;
use dora_core::ports::{GenerationPort, IdentityPort};
use dora_core::store::SessionStore;
use dora_platform::config::load_config;
use dora_platform::generation::HttpGenerationClient;
use dora_platform::identity::auto_detect_identity;
use dora_types::event::ChatEvent;
use dora_ui::auth_form::{AuthRequest, SIGN_IN_FAILED, SIGN_UP_FAILED};
use dora_ui::panels::auth;
use dora_ui::panels::chat::{self, ChatAction};
use dora_ui::state::UiState;
use dora_ui::theme;

/// The main application state
pub struct DoraApp {
    ui_state: UiState,
    event_bus: EventBus,
    controller: ExchangeController,
    identity: Rc<dyn IdentityPort>,
    /// Held for the app's lifetime; dropping it stops identity updates
    _identity_subscription: Subscription,
    anonymous_attempted: bool,
    first_frame: bool,
}

impl DoraApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = load_config();
        let event_bus = EventBus::new();
        let store = SessionStore::new();

        let ctx = cc.egui_ctx.clone();
        event_bus.set_notifier(move || ctx.request_repaint());

        let identity = auto_detect_identity();
        let client = HttpGenerationClient::new(&config.generation);
        log::info!(
            "Generation endpoint {} (identity: {})",
            client.endpoint(),
            identity.provider_name()
        );
        let generation: Rc<dyn GenerationPort> = Rc::new(client);

        let bounds = InputBounds::from(&config.input);
        let controller = ExchangeController::new(
            config,
            store.clone(),
            event_bus.clone(),
            identity.clone(),
            generation,
        );

        let subscription = Self::watch_identity(identity.as_ref(), &event_bus, &store);
        if identity.is_ready() {
            event_bus.emit(ChatEvent::IdentityChanged {
                identity: identity.current_identity(),
            });
        }

        Self {
            ui_state: UiState::new(bounds),
            event_bus,
            controller,
            identity,
            _identity_subscription: subscription,
            anonymous_attempted: false,
            first_frame: true,
        }
    }

    /// Forward provider notifications to the UI. Signing out abandons the
    /// transcript, including any exchange still in flight.
    fn watch_identity(
        identity: &dyn IdentityPort,
        event_bus: &EventBus,
        store: &SessionStore,
    ) -> Subscription {
        let event_bus = event_bus.clone();
        let store = store.clone();
        identity.on_identity_change(Box::new(move |identity| {
            match &identity {
                Some(who) => log::info!("Signed in as {}", who.display_name()),
                None => {
                    log::info!("Signed out; clearing conversation");
                    store.reset();
                }
            }
            event_bus.emit(ChatEvent::IdentityChanged { identity });
        }))
    }

    /// Sign in anonymously once, when the deployment allows it and the
    /// provider has settled with nobody signed in.
    fn maybe_sign_in_anonymously(&mut self) {
        if self.anonymous_attempted
            || !self.controller.config().auth.anonymous_fallback
            || !self.ui_state.identity_resolved
            || self.ui_state.identity.is_some()
        {
            return;
        }
        self.anonymous_attempted = true;

        let identity = self.identity.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = identity.sign_in_anonymously().await {
                log::warn!("Anonymous sign-in failed: {}", e);
            }
        });
    }

    /// Accept a submission and run the exchange in the background.
    /// Rejected input leaves the field untouched.
    fn dispatch_message(&mut self, text: String) {
        let exchange = match self.controller.begin(&text) {
            Ok(exchange) => exchange,
            Err(e) if e.is_rejection() => return,
            Err(e) => {
                log::error!("Submission failed: {}", e);
                return;
            }
        };
        self.ui_state.clear_input();

        let controller = self.controller.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = controller.complete(exchange).await;
            log::debug!("Exchange finished: {:?}", outcome);
        });
    }

    fn dispatch_auth(&self, request: AuthRequest) {
        let identity = self.identity.clone();
        let event_bus = self.event_bus.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let failure = match request {
                AuthRequest::SignIn { email, password } => identity
                    .sign_in(&email, &password)
                    .await
                    .err()
                    .map(|e| (e, SIGN_IN_FAILED)),
                AuthRequest::SignUp { email, password } => identity
                    .sign_up(&email, &password)
                    .await
                    .err()
                    .map(|e| (e, SIGN_UP_FAILED)),
            };
            if let Some((e, message)) = failure {
                log::warn!("Authentication failed: {}", e);
                event_bus.emit(ChatEvent::AuthFailed {
                    message: message.to_string(),
                });
            }
            event_bus.emit(ChatEvent::AuthSettled);
        });
    }

    fn dispatch_sign_out(&self) {
        let identity = self.identity.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = identity.sign_out().await {
                log::error!("Sign-out failed: {}", e);
            }
        });
    }
}

impl eframe::App for DoraApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        // Drain events from the controller and identity bridge
        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.ui_state.process_events(events);
        }

        self.maybe_sign_in_anonymously();

        let session = self.controller.store().snapshot();
        if session.pending {
            // Keep the spinner animating
            ctx.request_repaint();
        }

        let mut chat_action = None;
        let mut auth_request = None;

        CentralPanel::default().show(ctx, |ui| {
            if !self.ui_state.identity_resolved {
                auth::loading_panel(ui);
            } else if self.ui_state.identity.is_none() {
                auth_request = auth::auth_panel(ui, &mut self.ui_state.auth_form);
            } else {
                chat_action = chat::chat_panel(
                    ui,
                    &mut self.ui_state,
                    &session,
                    &self.controller.config().title,
                );
            }
        });

        if let Some(request) = auth_request {
            self.dispatch_auth(request);
        }
        match chat_action {
            Some(ChatAction::Submit(text)) => self.dispatch_message(text),
            Some(ChatAction::SignOut) => self.dispatch_sign_out(),
            None => {}
        }
    }
}
