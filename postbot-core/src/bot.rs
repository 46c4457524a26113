//! Bot abstraction for outbound messages and menus.
//!
//! [`Bot`] is transport-agnostic; the Telegram implementation lives in the
//! postbot crate so this crate stays free of teloxide types. Tests substitute
//! a recording implementation.

use crate::error::Result;
use crate::keyboard::Keyboard;
use crate::types::Chat;
use async_trait::async_trait;

/// Abstraction for sending replies into a chat.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a plain text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a text message with an inline-button menu attached.
    async fn send_menu(&self, chat: &Chat, text: &str, keyboard: &Keyboard) -> Result<()>;
}
