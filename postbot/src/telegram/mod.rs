//! Telegram transport: teloxide adapters, [`postbot_core::Bot`] implementation,
//! and the dispatcher runner. Everything Telegram-specific lives here; the
//! state machine only sees core types.

mod adapters;
mod bot_adapter;
mod runner;

pub use adapters::{core_chat, core_user, message_event, Command};
pub use bot_adapter::TelegramBotAdapter;
pub use runner::run_dispatcher;
