use std::fmt;

use serde::{Deserialize, Serialize};

/// The signed-in principal as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub uid: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "isAnonymous")]
    pub anonymous: bool,
}

impl Identity {
    pub fn display_name(&self) -> &str {
        match &self.email {
            Some(email) => email,
            None if self.anonymous => "Guest",
            None => &self.uid,
        }
    }
}

/// Short-lived bearer token. Fetched per exchange and never stored.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}
