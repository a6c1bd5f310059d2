use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChatError {
    #[error("Input is empty")]
    EmptyInput,

    #[error("An exchange is already pending")]
    ExchangePending,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Service error: {0}")]
    Service(String),

    #[error("Malformed response: {0}")]
    Serialization(String),

    #[error("Identity error: {0}")]
    Identity(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),

    #[error("{0}")]
    Other(String),
}

impl ChatError {
    /// Validation rejections are dropped silently instead of reaching the transcript.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ChatError::EmptyInput | ChatError::ExchangePending)
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(e: serde_json::Error) -> Self {
        ChatError::Serialization(e.to_string())
    }
}
