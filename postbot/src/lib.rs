//! # postbot
//!
//! Telegram bot for managing blog posts stored as front-matter Markdown files
//! in a GitHub repository: list and open posts, edit fields through inline
//! menus, commit conditional updates, and create new posts through a guided
//! flow. The conversational state machine in [`machine`] is transport-agnostic;
//! [`telegram`] wires it to teloxide.

pub mod callback;
pub mod config;
pub mod logging;
pub mod machine;
pub mod menus;
pub mod telegram;

pub use callback::CallbackAction;
pub use config::Config;
pub use machine::App;
