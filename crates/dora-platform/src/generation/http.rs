//! HTTP adapter for the text-generation endpoint.
//!
//! Uses browser `fetch()` via gloo-net for WASM compatibility.
//! One POST per exchange, no retries, no timeout.

use async_trait::async_trait;
use gloo_net::http::Request;

use dora_core::ports::GenerationPort;
use dora_types::{
    ChatError, Result,
    config::GenerationConfig,
    identity::Credential,
    wire::{GenerateRequest, GenerateResponse},
};

pub struct HttpGenerationClient {
    endpoint: String,
}

impl HttpGenerationClient {
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait(?Send)]
impl GenerationPort for HttpGenerationClient {
    async fn generate(
        &self,
        req: GenerateRequest,
        credential: Option<&Credential>,
    ) -> Result<GenerateResponse> {
        let mut builder = Request::post(&self.endpoint).header("Content-Type", "application/json");
        if let Some(credential) = credential {
            builder = builder.header("Authorization", &credential.bearer());
        }

        let response = builder
            .json(&req)
            .map_err(|e| ChatError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ChatError::Http { status, body });
        }

        response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| ChatError::Serialization(e.to_string()))
    }
}
