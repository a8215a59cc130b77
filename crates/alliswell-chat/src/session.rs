//! Chat session state and relay round trips.
//!
//! Sending is split in two so several requests can be in flight at once:
//! [`ChatSession::submit`] runs synchronously (validation, history append,
//! crisis gate) and hands back a [`PendingReply`]; the caller drives the
//! relay call and passes its result to [`ChatSession::resolve`]. Replies are
//! appended in the order they resolve, not the order they were sent.
//! [`ChatSession::send_user_message`] does both for callers that send one
//! message at a time.

use std::collections::BTreeSet;

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use alliswell_core::models::chat::ChatMessage;
use alliswell_core::models::relay::{ChatReply, ChatRequest};

use crate::crisis::CrisisDetector;
use crate::error::RelayError;

/// Appended in place of a relay call when a crisis keyword matches.
pub const CRISIS_RESPONSE: &str = "I'm concerned by what you've shared. Please know there's immediate help available. You are not alone.";

/// Relay answered but had no reply text, or reported failure.
pub const NO_RESPONSE_FALLBACK: &str = "Sorry, I couldn't get a response. Please try again.";

/// Relay answered with a non-2xx status.
pub const CONNECTION_FALLBACK: &str = "Sorry, there was an error with the connection.";

/// The request failed outright or the reply could not be read.
pub const UNEXPECTED_FALLBACK: &str = "Sorry, something went wrong. Please try again.";

/// The server-side relay as seen from the chat widget.
#[async_trait]
pub trait Relay: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, RelayError>;
}

/// A relay request issued by [`ChatSession::submit`] and not yet resolved.
///
/// Not `Clone`: each pending reply resolves exactly once. Dropping one
/// without resolving leaves it counted in `pending_requests`.
#[derive(Debug)]
#[must_use = "pass the relay result to `ChatSession::resolve`"]
pub struct PendingReply {
    id: u64,
    request: ChatRequest,
}

impl PendingReply {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn request(&self) -> &ChatRequest {
        &self.request
    }
}

/// Result of the synchronous half of sending.
#[derive(Debug)]
#[must_use = "a `Submission::Relay` must be sent and resolved"]
pub enum Submission {
    /// Blank input; nothing changed.
    Ignored,
    /// Crisis keyword matched; the safety response is already in the history.
    Crisis,
    /// Forward this request to the relay, then call `resolve`.
    Relay(PendingReply),
}

/// Which fixed apology replaced a relay reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    NoResponse,
    Connection,
    Unexpected,
}

impl Fallback {
    pub fn text(self) -> &'static str {
        match self {
            Fallback::NoResponse => NO_RESPONSE_FALLBACK,
            Fallback::Connection => CONNECTION_FALLBACK,
            Fallback::Unexpected => UNEXPECTED_FALLBACK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Ignored,
    Crisis,
    Replied,
    Fallback(Fallback),
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    id: Uuid,
    history: Vec<ChatMessage>,
    open: bool,
    crisis_support_visible: bool,
    in_flight: BTreeSet<u64>,
    next_request_id: u64,
    detector: CrisisDetector,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self::with_detector(CrisisDetector::default())
    }

    pub fn with_detector(detector: CrisisDetector) -> Self {
        Self {
            id: Uuid::new_v4(),
            history: Vec::new(),
            open: false,
            crisis_support_visible: false,
            in_flight: BTreeSet::new(),
            next_request_id: 0,
            detector,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Whether the crisis-support modal should be showing.
    pub fn crisis_support_visible(&self) -> bool {
        self.crisis_support_visible
    }

    pub fn dismiss_crisis_support(&mut self) {
        self.crisis_support_visible = false;
    }

    /// Relay requests submitted but not yet resolved. Non-zero means the
    /// typing indicator is showing.
    pub fn pending_requests(&self) -> usize {
        self.in_flight.len()
    }

    /// Record a user message and decide where it goes.
    pub fn submit(&mut self, text: &str) -> Submission {
        let text = text.trim();
        if text.is_empty() {
            return Submission::Ignored;
        }

        // History sent to the relay excludes the message being sent.
        let history = self.history.iter().map(ChatMessage::turn).collect();
        self.history.push(ChatMessage::user(text));

        if let Some(keyword) = self.detector.first_match(text) {
            warn!(session_id = %self.id, keyword, "crisis keyword detected, relay skipped");
            self.history.push(ChatMessage::model(CRISIS_RESPONSE));
            self.crisis_support_visible = true;
            return Submission::Crisis;
        }

        let id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight.insert(id);

        Submission::Relay(PendingReply {
            id,
            request: ChatRequest {
                message: text.to_string(),
                history,
            },
        })
    }

    /// Append the reply, or the matching fallback, for a finished relay call.
    ///
    /// Applies whether or not the panel is still open.
    pub fn resolve(
        &mut self,
        pending: PendingReply,
        result: Result<ChatReply, RelayError>,
    ) -> SendOutcome {
        self.in_flight.remove(&pending.id);

        let outcome = match result {
            Ok(reply) => match reply.into_text() {
                Some(text) => {
                    self.history.push(ChatMessage::model(text));
                    return SendOutcome::Replied;
                }
                None => Fallback::NoResponse,
            },
            Err(RelayError::Status(status)) => {
                warn!(session_id = %self.id, request_id = pending.id, status, "relay returned an error status");
                Fallback::Connection
            }
            Err(e) => {
                warn!(session_id = %self.id, request_id = pending.id, error = %e, "relay request failed");
                Fallback::Unexpected
            }
        };

        self.history.push(ChatMessage::model(outcome.text()));
        SendOutcome::Fallback(outcome)
    }

    /// Submit `text` and, unless blank or a crisis, await the relay reply.
    pub async fn send_user_message<R>(&mut self, relay: &R, text: &str) -> SendOutcome
    where
        R: Relay + ?Sized,
    {
        let pending = match self.submit(text) {
            Submission::Ignored => return SendOutcome::Ignored,
            Submission::Crisis => return SendOutcome::Crisis,
            Submission::Relay(pending) => pending,
        };

        let result = relay.send(pending.request()).await;
        let outcome = self.resolve(pending, result);
        info!(session_id = %self.id, ?outcome, history_len = self.history.len(), "chat message handled");
        outcome
    }
}
