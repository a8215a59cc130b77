//! The chat session driving the real router over a loopback listener.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use alliswell_api::router;
use alliswell_api::state::AppState;
use alliswell_chat::session::{CONNECTION_FALLBACK, CRISIS_RESPONSE};
use alliswell_chat::{ChatSession, Fallback, HttpRelay, SendOutcome};
use alliswell_completion::CompletionService;
use alliswell_completion::error::CompletionError;
use alliswell_core::models::chat::ChatTurn;

struct Echo {
    fail: bool,
    calls: AtomicUsize,
}

#[async_trait]
impl CompletionService for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    async fn complete(&self, history: &[ChatTurn], message: &str) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CompletionError::Invocation("down".to_string()));
        }
        Ok(format!("{} earlier turns; you said: {message}", history.len()))
    }
}

async fn serve(completion: Arc<Echo>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(AppState::new(completion)))
            .await
            .unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn conversation_carries_history_through_the_relay() {
    let echo = Arc::new(Echo {
        fail: false,
        calls: AtomicUsize::new(0),
    });
    let relay = HttpRelay::new(&serve(echo.clone()).await).unwrap();
    let mut session = ChatSession::new();

    assert_eq!(
        session.send_user_message(&relay, "hello").await,
        SendOutcome::Replied
    );
    assert_eq!(
        session.send_user_message(&relay, "still here").await,
        SendOutcome::Replied
    );

    let texts: Vec<&str> = session.history().iter().map(|m| m.text.as_str()).collect();
    assert_eq!(
        texts,
        [
            "hello",
            "0 earlier turns; you said: hello",
            "still here",
            "2 earlier turns; you said: still here",
        ]
    );
    assert_eq!(echo.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn crisis_message_is_answered_locally() {
    let echo = Arc::new(Echo {
        fail: false,
        calls: AtomicUsize::new(0),
    });
    let relay = HttpRelay::new(&serve(echo.clone()).await).unwrap();
    let mut session = ChatSession::new();

    let outcome = session
        .send_user_message(&relay, "I feel like I can't go on")
        .await;

    assert_eq!(outcome, SendOutcome::Crisis);
    assert_eq!(session.history().last().unwrap().text, CRISIS_RESPONSE);
    assert_eq!(echo.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn server_failure_becomes_connection_fallback() {
    let echo = Arc::new(Echo {
        fail: true,
        calls: AtomicUsize::new(0),
    });
    let relay = HttpRelay::new(&serve(echo).await).unwrap();
    let mut session = ChatSession::new();

    let outcome = session.send_user_message(&relay, "hello").await;

    assert_eq!(outcome, SendOutcome::Fallback(Fallback::Connection));
    assert_eq!(session.history().last().unwrap().text, CONNECTION_FALLBACK);
}
