//! Port traits — the hexagonal architecture boundary.
//!
//! These traits are defined here in `dora-core` (pure Rust).
//! Implementations live in `dora-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use dora_types::{
    Result,
    identity::{Credential, Identity},
    wire::{GenerateRequest, GenerateResponse},
};
use crate::identity::{IdentityCallback, Subscription};

// ─── Generation Port ─────────────────────────────────────────

#[async_trait(?Send)]
pub trait GenerationPort {
    /// Send one prompt and await the complete response body.
    /// Non-2xx statuses and unparseable bodies are errors.
    async fn generate(
        &self,
        req: GenerateRequest,
        credential: Option<&Credential>,
    ) -> Result<GenerateResponse>;
}

// ─── Identity Port ───────────────────────────────────────────

#[async_trait(?Send)]
pub trait IdentityPort {
    /// Whether the provider has reported its initial auth state
    fn is_ready(&self) -> bool;

    fn current_identity(&self) -> Option<Identity>;

    /// Register for sign-in / sign-out notifications
    fn on_identity_change(&self, callback: IdentityCallback) -> Subscription;

    /// Fetch a fresh token for the current identity. `Ok(None)` when signed out.
    async fn fetch_token(&self) -> Result<Option<Credential>>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity>;

    async fn sign_in_anonymously(&self) -> Result<Identity>;

    async fn sign_out(&self) -> Result<()>;

    /// Name of this provider (for logging/debug)
    fn provider_name(&self) -> &str;
}
