//! Request and response bodies of the generation endpoint.

use serde::{Deserialize, Serialize};

/// Body of `POST /generate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    pub max_length: u32,
    /// Serialized as `null` until the service has issued one
    pub session_id: Option<String>,
}

/// Body returned by the generation endpoint.
///
/// The service answers failures with `{"error": "..."}` and a 200 status,
/// so every field is optional here and validated by [`GenerateResponse::into_reply`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub generated_text: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A validated successful response
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub session_id: Option<String>,
}

impl GenerateResponse {
    pub fn into_reply(self) -> crate::Result<Reply> {
        if let Some(error) = self.error {
            return Err(crate::ChatError::Service(error));
        }
        let text = self.generated_text.ok_or_else(|| {
            crate::ChatError::Serialization("missing field `generated_text`".to_string())
        })?;
        Ok(Reply {
            text,
            session_id: self.session_id.filter(|id| !id.is_empty()),
        })
    }
}
