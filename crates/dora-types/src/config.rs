use serde::{Deserialize, Serialize};

/// Top-level client configuration. Every field has a default so partial
/// overrides from the page merge cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub title: String,
    pub generation: GenerationConfig,
    pub auth: AuthConfig,
    pub input: InputConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            title: "Dora AI Assistant".to_string(),
            generation: GenerationConfig::default(),
            auth: AuthConfig::default(),
            input: InputConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub endpoint: String,
    /// Sent as `max_length` with every request
    pub max_length: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_length: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Fetch a bearer token before every request and fail the exchange without one
    pub require_credential: bool,
    /// Sign in anonymously when the provider reports no user
    pub anonymous_fallback: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            require_credential: true,
            anonymous_fallback: false,
        }
    }
}

/// Height bounds of the message input, in points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub collapsed_height: f32,
    pub max_height: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            collapsed_height: 36.0,
            max_height: 200.0,
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> crate::Result<()> {
        if self.generation.endpoint.trim().is_empty() {
            return Err(crate::ChatError::Config("generation.endpoint is empty".to_string()));
        }
        if self.generation.max_length == 0 {
            return Err(crate::ChatError::Config("generation.max_length must be positive".to_string()));
        }
        let input = &self.input;
        if !(input.collapsed_height > 0.0 && input.max_height >= input.collapsed_height) {
            return Err(crate::ChatError::Config(format!(
                "input heights out of order: collapsed {} max {}",
                input.collapsed_height, input.max_height
            )));
        }
        Ok(())
    }
}

const DEFAULT_ENDPOINT: &str = "http://localhost:8000/generate";
