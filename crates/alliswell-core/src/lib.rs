//! alliswell-core
//!
//! Pure domain types shared by the chat widget, the assessment engine and the
//! relay server. No network or runtime dependency: this is the wire vocabulary
//! both sides of `/api/chat` agree on.

pub mod error;
pub mod models;
