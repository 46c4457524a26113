//! Binary entry point: load env config, init tracing, assemble the gateway,
//! session store, and state machine, then run the Telegram dispatcher.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use github_content::GitHubContentGateway;
use postbot::logging::init_logging;
use postbot::telegram::{run_dispatcher, TelegramBotAdapter};
use postbot::{App, Config};
use session_store::InMemorySessionStore;
use tracing::info;

/// How often abandoned sessions are swept out.
const EVICTION_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    config.validate()?;
    init_logging(&config)?;

    info!(
        repo = %config.github.repo,
        branch = %config.github.branch,
        posts_dir = %config.github.posts_dir,
        "Starting postbot"
    );

    let bot = teloxide::Bot::new(config.bot_token.clone());
    let gateway = Arc::new(GitHubContentGateway::new(config.github.clone()));
    let sessions = Arc::new(InMemorySessionStore::new(Duration::from_secs(
        config.session_idle_timeout_secs,
    )));
    let app = Arc::new(App::new(
        Arc::new(TelegramBotAdapter::new(bot.clone())),
        gateway,
        sessions.clone(),
    ));

    // Lazy eviction on access still leaves fully abandoned sessions behind.
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(EVICTION_SWEEP_INTERVAL).await;
            sessions.evict_idle().await;
        }
    });

    run_dispatcher(bot, app).await
}
