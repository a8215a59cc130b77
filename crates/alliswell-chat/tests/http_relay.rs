use httpmock::prelude::*;
use serde_json::json;

use alliswell_chat::error::RelayError;
use alliswell_chat::session::NO_RESPONSE_FALLBACK;
use alliswell_chat::{ChatSession, Fallback, HttpRelay, Relay, SendOutcome};
use alliswell_core::models::chat::{ChatRole, ChatTurn};
use alliswell_core::models::relay::ChatRequest;

fn request() -> ChatRequest {
    ChatRequest::new(
        "How do I sleep better?",
        vec![ChatTurn {
            role: ChatRole::User,
            text: "hi".to_string(),
        }],
    )
    .expect("valid request")
}

#[tokio::test]
async fn posts_message_and_history_to_api_chat() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/chat").json_body_includes(
            json!({
                "message": "How do I sleep better?",
                "history": [{"role": "user", "text": "hi"}]
            })
            .to_string(),
        );
        then.status(200).json_body(json!({
            "success": true,
            "message": "Keep a regular bedtime.",
            "timestamp": "2026-01-01T00:00:00Z"
        }));
    });

    let relay = HttpRelay::new(&format!("{}/", server.base_url())).expect("relay");
    assert_eq!(relay.endpoint(), format!("{}/api/chat", server.base_url()));

    let reply = relay.send(&request()).await.expect("reply");
    mock.assert();
    assert!(reply.success);
    assert_eq!(reply.message.as_deref(), Some("Keep a regular bedtime."));
}

#[tokio::test]
async fn error_status_is_reported_with_code() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/chat");
        then.status(500).json_body(json!({
            "success": false,
            "error": "Failed to get AI response"
        }));
    });

    let relay = HttpRelay::new(&server.base_url()).expect("relay");
    let err = relay.send(&request()).await.expect_err("should fail");
    assert!(matches!(err, RelayError::Status(500)));
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/chat");
        then.status(200).body("<html>oops</html>");
    });

    let relay = HttpRelay::new(&server.base_url()).expect("relay");
    let err = relay.send(&request()).await.expect_err("should fail");
    assert!(matches!(err, RelayError::Decode(_)));
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    // Port 9 (discard) is not listening in the test environment.
    let relay = HttpRelay::new("http://127.0.0.1:9").expect("relay");
    let err = relay.send(&request()).await.expect_err("should fail");
    assert!(matches!(err, RelayError::Transport(_)));
}

#[tokio::test]
async fn body_without_success_flag_gets_no_response_fallback() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/chat");
        then.status(200).json_body(json!({"message": "hi"}));
    });

    let relay = HttpRelay::new(&server.base_url()).expect("relay");
    let mut session = ChatSession::new();
    let outcome = session.send_user_message(&relay, "hello").await;

    assert_eq!(outcome, SendOutcome::Fallback(Fallback::NoResponse));
    assert_eq!(
        session.history().last().map(|m| m.text.as_str()),
        Some(NO_RESPONSE_FALLBACK)
    );
}
