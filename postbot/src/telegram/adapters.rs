//! Adapters from Telegram (teloxide) types to core types.

use postbot_core::{Chat, ChatEvent, User};
use teloxide::utils::command::BotCommands;

/// Bot commands understood by postbot.
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "snake_case")]
pub enum Command {
    #[command(description = "list blog posts")]
    Posts,
    #[command(description = "start a new blog post")]
    NewPost,
    #[command(description = "discard the session in progress")]
    Cancel,
}

/// Converts a teloxide chat to the core [`Chat`].
pub fn core_chat(chat: &teloxide::types::Chat) -> Chat {
    Chat { id: chat.id.0 }
}

/// Converts a teloxide user to the core [`User`].
pub fn core_user(user: &teloxide::types::User) -> User {
    User {
        id: user.id.0 as i64,
        username: user.username.clone(),
    }
}

/// Maps message text to a core event: a known command, or free text. Commands
/// addressed to another bot (`/posts@other_bot`) fall through to free text.
pub fn message_event(text: &str, bot_username: Option<&str>) -> ChatEvent {
    match Command::parse(text, bot_username.unwrap_or("")) {
        Ok(Command::Posts) => ChatEvent::ListPosts,
        Ok(Command::NewPost) => ChatEvent::NewPost,
        Ok(Command::Cancel) => ChatEvent::Cancel,
        Err(_) => ChatEvent::Text(text.to_string()),
    }
}
