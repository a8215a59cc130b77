//! alliswell-chat
//!
//! The chat widget's session manager. Holds the message history, gates every
//! outgoing message through the crisis detector, and forwards the rest to the
//! completion relay. Relay failures become fixed apology messages in the
//! history; nothing is returned to the caller as an error.

pub mod crisis;
pub mod error;
pub mod http;
pub mod session;

pub use crisis::{CrisisDetector, is_crisis};
pub use http::HttpRelay;
pub use session::{ChatSession, Fallback, PendingReply, Relay, SendOutcome, Submission};
