//! Core types: chat and user identity, and the inbound event enum the state
//! machine dispatches on.

use serde::{Deserialize, Serialize};

/// Chat identity. Sessions are keyed by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// User identity (id, username).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
}

/// Inbound event, already stripped of transport detail. Commands are parsed at
/// the adapter layer; callback payloads stay opaque strings here and are decoded
/// by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// `/posts` command.
    ListPosts,
    /// `/new_post` command.
    NewPost,
    /// `/cancel` command.
    Cancel,
    /// Inline-keyboard button press with its opaque payload.
    Callback(String),
    /// Free-text message.
    Text(String),
}
