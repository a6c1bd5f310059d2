#[cfg(test)]
mod tests {
    use crate::message::*;
    use crate::event::*;
    use crate::identity::*;
    use crate::config::*;
    use crate::session::*;
    use crate::wire::*;
    use crate::error::*;

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_user() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello");
        assert!(msg.is_user());
    }

    #[test]
    fn test_message_assistant() {
        let msg = Message::assistant("Hi there");
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.content, "Hi there");
        assert!(!msg.is_user());
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), r#""assistant""#);
        let role: Role = serde_json::from_str(r#""assistant""#).unwrap();
        assert_eq!(role, Role::Assistant);
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(Role::User.label(), "You");
        assert_eq!(Role::Assistant.label(), "Dora");
    }

    // ─── Session Tests ───────────────────────────────────────

    #[test]
    fn test_session_id_display() {
        let id = SessionId::new("abc");
        assert_eq!(id.as_str(), "abc");
        assert_eq!(id.to_string(), "abc");
    }

    #[test]
    fn test_session_id_is_transparent_json() {
        let json = serde_json::to_string(&SessionId::new("abc")).unwrap();
        assert_eq!(json, r#""abc""#);
    }

    #[test]
    fn test_snapshot_pending_index() {
        let snapshot = SessionSnapshot {
            messages: vec![
                Message::user("a"),
                Message::assistant("b"),
                Message::user("c"),
            ],
            pending: true,
            session_id: None,
            revision: 3,
        };
        assert_eq!(snapshot.pending_index(), Some(2));
    }

    #[test]
    fn test_snapshot_pending_index_when_idle() {
        let snapshot = SessionSnapshot {
            messages: vec![Message::user("a")],
            pending: false,
            ..Default::default()
        };
        assert_eq!(snapshot.pending_index(), None);
    }

    #[test]
    fn test_snapshot_pending_index_last_is_assistant() {
        let snapshot = SessionSnapshot {
            messages: vec![Message::user("a"), Message::assistant("b")],
            pending: true,
            ..Default::default()
        };
        assert_eq!(snapshot.pending_index(), None);
        assert_eq!(SessionSnapshot { pending: true, ..Default::default() }.pending_index(), None);
    }

    // ─── Identity Tests ──────────────────────────────────────

    #[test]
    fn test_identity_from_provider_json() {
        let identity: Identity = serde_json::from_str(
            r#"{"uid":"u1","email":"ada@example.com","isAnonymous":false}"#,
        )
        .unwrap();
        assert_eq!(identity.uid, "u1");
        assert_eq!(identity.email.as_deref(), Some("ada@example.com"));
        assert!(!identity.anonymous);
        assert_eq!(identity.display_name(), "ada@example.com");
    }

    #[test]
    fn test_identity_anonymous_defaults() {
        let identity: Identity = serde_json::from_str(r#"{"uid":"u2","isAnonymous":true}"#).unwrap();
        assert!(identity.email.is_none());
        assert_eq!(identity.display_name(), "Guest");

        let bare: Identity = serde_json::from_str(r#"{"uid":"u3"}"#).unwrap();
        assert!(!bare.anonymous);
        assert_eq!(bare.display_name(), "u3");
    }

    #[test]
    fn test_credential_bearer() {
        let cred = Credential::new("tok-1");
        assert_eq!(cred.as_str(), "tok-1");
        assert_eq!(cred.bearer(), "Bearer tok-1");
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let cred = Credential::new("secret-token");
        let debug = format!("{:?}", cred);
        assert!(!debug.contains("secret-token"));
    }

    // ─── Wire Tests ──────────────────────────────────────────

    #[test]
    fn test_request_without_session_sends_null() {
        let req = GenerateRequest {
            prompt: "Hello".to_string(),
            max_length: 100,
            session_id: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["prompt"], "Hello");
        assert_eq!(value["max_length"], 100);
        assert!(value["session_id"].is_null());
    }

    #[test]
    fn test_request_with_session() {
        let req = GenerateRequest {
            prompt: "Again".to_string(),
            max_length: 100,
            session_id: Some("abc".to_string()),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["session_id"], "abc");
    }

    #[test]
    fn test_response_into_reply() {
        let resp: GenerateResponse =
            serde_json::from_str(r#"{"generated_text":"Hi","session_id":"abc"}"#).unwrap();
        let reply = resp.into_reply().unwrap();
        assert_eq!(reply.text, "Hi");
        assert_eq!(reply.session_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_response_without_session() {
        let resp: GenerateResponse = serde_json::from_str(r#"{"generated_text":"Hi"}"#).unwrap();
        let reply = resp.into_reply().unwrap();
        assert!(reply.session_id.is_none());
    }

    #[test]
    fn test_response_empty_session_is_ignored() {
        let resp: GenerateResponse =
            serde_json::from_str(r#"{"generated_text":"Hi","session_id":""}"#).unwrap();
        assert!(resp.into_reply().unwrap().session_id.is_none());
    }

    #[test]
    fn test_response_error_field() {
        let resp: GenerateResponse = serde_json::from_str(r#"{"error":"quota exceeded"}"#).unwrap();
        let err = resp.into_reply().unwrap_err();
        assert_eq!(err, ChatError::Service("quota exceeded".to_string()));
    }

    #[test]
    fn test_response_missing_text() {
        let resp: GenerateResponse = serde_json::from_str(r#"{"session_id":"abc"}"#).unwrap();
        let err = resp.into_reply().unwrap_err();
        assert!(matches!(err, ChatError::Serialization(_)));
    }

    // ─── Event Tests ─────────────────────────────────────────

    #[test]
    fn test_chat_event_serialization() {
        let event = ChatEvent::ExchangeFailed {
            exchange_id: 7,
            message: "Error: Not authenticated".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("ExchangeFailed"));
        assert!(json.contains("Not authenticated"));
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.generation.endpoint, "http://localhost:8000/generate");
        assert_eq!(config.generation.max_length, 100);
        assert!(config.auth.require_credential);
        assert!(!config.auth.anonymous_fallback);
        assert_eq!(config.input.collapsed_height, 36.0);
        assert_eq!(config.input.max_height, 200.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_merges_defaults() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"generation":{"endpoint":"https://api.example.com/generate"}}"#,
        )
        .unwrap();
        assert_eq!(config.generation.endpoint, "https://api.example.com/generate");
        assert_eq!(config.generation.max_length, 100);
        assert_eq!(config.title, "Dora AI Assistant");
    }

    #[test]
    fn test_config_validation_rejects_bad_heights() {
        let mut config = ClientConfig::default();
        config.input.max_height = 10.0;
        assert!(matches!(config.validate(), Err(ChatError::Config(_))));
    }

    #[test]
    fn test_config_validation_rejects_empty_endpoint() {
        let mut config = ClientConfig::default();
        config.generation.endpoint = "  ".to_string();
        assert!(matches!(config.validate(), Err(ChatError::Config(_))));
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        assert_eq!(ChatError::NotAuthenticated.to_string(), "Not authenticated");
        assert_eq!(
            ChatError::Http { status: 502, body: "bad gateway".to_string() }.to_string(),
            "HTTP 502: bad gateway"
        );
        assert_eq!(ChatError::Network("offline".to_string()).to_string(), "Network error: offline");
    }

    #[test]
    fn test_error_rejections() {
        assert!(ChatError::EmptyInput.is_rejection());
        assert!(ChatError::ExchangePending.is_rejection());
        assert!(!ChatError::NotAuthenticated.is_rejection());
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{{invalid}}").unwrap_err();
        let err: ChatError = serde_err.into();
        assert!(matches!(err, ChatError::Serialization(_)));
    }
}
