//! # postbot-core
//!
//! Core types and traits for the blog-post bot: [`Bot`], chat and event types,
//! and [`Keyboard`] menus. Transport-agnostic; used by the postbot state
//! machine and the Telegram adapter layer.

pub mod bot;
pub mod error;
pub mod keyboard;
pub mod types;

pub use bot::Bot;
pub use error::{PostbotError, Result};
pub use keyboard::{Button, Keyboard};
pub use types::{Chat, ChatEvent, User};
