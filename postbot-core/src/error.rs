use thiserror::Error;

/// Errors surfaced by [`Bot`](crate::Bot) implementations. Config and IO
/// failures are handled with `anyhow` at the binary boundary and never reach
/// this type.
#[derive(Error, Debug)]
pub enum PostbotError {
    #[error("Bot error: {0}")]
    Bot(String),
}

pub type Result<T> = std::result::Result<T, PostbotError>;
