use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use alliswell_chat::error::RelayError;
use alliswell_chat::session::{
    CONNECTION_FALLBACK, CRISIS_RESPONSE, NO_RESPONSE_FALLBACK, UNEXPECTED_FALLBACK,
};
use alliswell_chat::{ChatSession, Fallback, Relay, SendOutcome, Submission};
use alliswell_core::models::chat::{ChatRole, ChatTurn};
use alliswell_core::models::relay::{ChatReply, ChatRequest};

/// Replays canned results in order and records what it was sent.
#[derive(Default)]
struct StubRelay {
    calls: AtomicUsize,
    replies: Mutex<VecDeque<Result<ChatReply, RelayError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl StubRelay {
    fn with(replies: Vec<Result<ChatReply, RelayError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Default::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Relay for StubRelay {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, RelayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ChatReply::success("ok")))
    }
}

fn last_text(session: &ChatSession) -> &str {
    &session.history().last().expect("history not empty").text
}

#[tokio::test]
async fn successful_reply_is_appended() {
    let relay = StubRelay::with(vec![Ok(ChatReply::success("Breathe slowly."))]);
    let mut session = ChatSession::new();

    let outcome = session.send_user_message(&relay, "  I feel anxious  ").await;

    assert_eq!(outcome, SendOutcome::Replied);
    assert_eq!(relay.calls(), 1);
    let history = session.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, ChatRole::User);
    assert_eq!(history[0].text, "I feel anxious");
    assert_eq!(history[1].role, ChatRole::Model);
    assert_eq!(history[1].text, "Breathe slowly.");
    assert_eq!(session.pending_requests(), 0);
}

#[tokio::test]
async fn crisis_message_never_reaches_relay() {
    let relay = StubRelay::default();
    let mut session = ChatSession::new();

    let outcome = session.send_user_message(&relay, "I want to DIE today").await;

    assert_eq!(outcome, SendOutcome::Crisis);
    assert_eq!(relay.calls(), 0);
    assert_eq!(session.history().len(), 2);
    assert_eq!(last_text(&session), CRISIS_RESPONSE);
    assert_eq!(session.history()[1].role, ChatRole::Model);
    assert!(session.crisis_support_visible());
    assert_eq!(session.pending_requests(), 0);

    session.dismiss_crisis_support();
    assert!(!session.crisis_support_visible());
}

#[tokio::test]
async fn blank_input_is_ignored() {
    let relay = StubRelay::default();
    let mut session = ChatSession::new();

    assert_eq!(session.send_user_message(&relay, "   \n\t").await, SendOutcome::Ignored);
    assert_eq!(session.send_user_message(&relay, "").await, SendOutcome::Ignored);
    assert!(session.history().is_empty());
    assert_eq!(relay.calls(), 0);
}

#[tokio::test]
async fn unsuccessful_reply_adds_exactly_one_fallback() {
    let relay = StubRelay::with(vec![Ok(ChatReply::failure("Failed to get AI response"))]);
    let mut session = ChatSession::new();

    let Submission::Relay(pending) = session.submit("hello") else {
        panic!("expected a relay submission");
    };
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.pending_requests(), 1);

    let result = relay.send(pending.request()).await;
    let outcome = session.resolve(pending, result);

    assert_eq!(outcome, SendOutcome::Fallback(Fallback::NoResponse));
    assert_eq!(session.history().len(), 2);
    assert_eq!(last_text(&session), NO_RESPONSE_FALLBACK);
}

#[tokio::test]
async fn success_without_message_uses_no_response_fallback() {
    let reply = ChatReply {
        success: true,
        message: None,
        error: None,
        timestamp: None,
    };
    let relay = StubRelay::with(vec![Ok(reply)]);
    let mut session = ChatSession::new();

    let outcome = session.send_user_message(&relay, "hello").await;
    assert_eq!(outcome, SendOutcome::Fallback(Fallback::NoResponse));
    assert_eq!(last_text(&session), NO_RESPONSE_FALLBACK);
}

#[tokio::test]
async fn error_status_uses_connection_fallback() {
    let relay = StubRelay::with(vec![Err(RelayError::Status(500))]);
    let mut session = ChatSession::new();

    let outcome = session.send_user_message(&relay, "hello").await;
    assert_eq!(outcome, SendOutcome::Fallback(Fallback::Connection));
    assert_eq!(last_text(&session), CONNECTION_FALLBACK);
    assert_eq!(session.history().len(), 2);
}

#[tokio::test]
async fn network_failure_uses_generic_fallback() {
    let relay = StubRelay::with(vec![Err(RelayError::Transport(
        "connection refused".to_string(),
    ))]);
    let mut session = ChatSession::new();

    let outcome = session.send_user_message(&relay, "hello").await;
    assert_eq!(outcome, SendOutcome::Fallback(Fallback::Unexpected));
    assert_eq!(last_text(&session), UNEXPECTED_FALLBACK);
    assert_eq!(session.pending_requests(), 0);
}

#[tokio::test]
async fn history_excludes_the_message_being_sent() {
    let relay = StubRelay::with(vec![
        Ok(ChatReply::success("first reply")),
        Ok(ChatReply::success("second reply")),
    ]);
    let mut session = ChatSession::new();

    session.send_user_message(&relay, "first").await;
    session.send_user_message(&relay, "second").await;

    let requests = relay.requests.lock().unwrap();
    assert!(requests[0].history.is_empty());
    assert_eq!(requests[1].message, "second");
    assert_eq!(
        requests[1].history,
        vec![
            ChatTurn {
                role: ChatRole::User,
                text: "first".to_string(),
            },
            ChatTurn {
                role: ChatRole::Model,
                text: "first reply".to_string(),
            },
        ]
    );
}

#[test]
fn replies_append_in_resolution_order() {
    let mut session = ChatSession::new();

    let Submission::Relay(first) = session.submit("one") else {
        panic!("expected a relay submission");
    };
    let Submission::Relay(second) = session.submit("two") else {
        panic!("expected a relay submission");
    };
    assert_ne!(first.id(), second.id());
    assert_eq!(session.pending_requests(), 2);
    // Both were submitted before either reply, so neither sees the other.
    assert_eq!(second.request().history.len(), 1);

    session.resolve(second, Ok(ChatReply::success("reply to two")));
    assert_eq!(session.pending_requests(), 1);
    session.resolve(first, Ok(ChatReply::success("reply to one")));
    assert_eq!(session.pending_requests(), 0);

    let texts: Vec<&str> = session.history().iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, ["one", "two", "reply to two", "reply to one"]);
}

#[test]
fn late_reply_after_close_is_still_recorded() {
    let mut session = ChatSession::new();
    session.open();

    let Submission::Relay(pending) = session.submit("hello") else {
        panic!("expected a relay submission");
    };
    session.close();
    assert!(!session.is_open());

    session.resolve(pending, Ok(ChatReply::success("late")));
    assert_eq!(session.history().len(), 2);
    assert_eq!(last_text(&session), "late");
}

#[test]
fn panel_visibility_toggles() {
    let mut session = ChatSession::default();
    assert!(!session.is_open());
    session.toggle();
    assert!(session.is_open());
    session.toggle();
    assert!(!session.is_open());
}

#[test]
fn sessions_get_distinct_ids() {
    assert_ne!(ChatSession::new().id(), ChatSession::new().id());
}

#[test]
fn typing_indicator_clears_once_every_submission_resolves() {
    let mut session = ChatSession::new();

    let mut pending = Vec::new();
    for text in ["one", "  ", "I want to die", "two", "three"] {
        if let Submission::Relay(reply) = session.submit(text) {
            pending.push(reply);
        }
    }
    // Blank and crisis input never count as in flight.
    assert_eq!(session.pending_requests(), 3);

    while let Some(reply) = pending.pop() {
        session.resolve(reply, Err(RelayError::Status(502)));
    }
    assert_eq!(session.pending_requests(), 0);
}
