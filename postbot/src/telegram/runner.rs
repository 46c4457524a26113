//! Dispatcher runner: routes text messages and callback queries to the App.
//! Calls get_me() first so commands addressed as `/posts@botname` resolve.

use std::sync::Arc;

use anyhow::Result;
use postbot_core::ChatEvent;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use super::adapters::{core_chat, core_user, message_event};
use crate::machine::App;

async fn on_message(
    msg: Message,
    app: Arc<App>,
    bot_username: Option<String>,
) -> ResponseResult<()> {
    if let Some(text) = msg.text() {
        let chat = core_chat(&msg.chat);
        let user = msg.from.as_ref().map(core_user);
        let event = message_event(text, bot_username.as_deref());
        info!(chat_id = chat.id, user_id = ?user.as_ref().map(|u| u.id), "Received message");
        if let Err(e) = app.handle_event(&chat, event).await {
            error!(error = %e, chat_id = chat.id, "Event handling failed");
        }
    }
    Ok(())
}

async fn on_callback_query(bot: Bot, q: CallbackQuery, app: Arc<App>) -> ResponseResult<()> {
    // Acknowledge first so the button stops showing the progress spinner.
    bot.answer_callback_query(q.id.clone()).await?;

    if let (Some(payload), Some(message)) = (q.data.clone(), q.message.as_ref()) {
        let chat = postbot_core::Chat {
            id: message.chat().id.0,
        };
        info!(chat_id = chat.id, payload = %payload, "Received callback");
        if let Err(e) = app.handle_event(&chat, ChatEvent::Callback(payload)).await {
            error!(error = %e, chat_id = chat.id, "Callback handling failed");
        }
    }
    Ok(())
}

/// Starts long polling with branches for messages and callback queries.
#[instrument(skip(bot, app))]
pub async fn run_dispatcher(bot: teloxide::Bot, app: Arc<App>) -> Result<()> {
    let bot_username = match bot.get_me().await {
        Ok(me) => me.user.username.clone(),
        Err(e) => {
            error!(error = %e, "get_me failed; commands with @username will not match");
            None
        }
    };
    info!(username = ?bot_username, "Starting dispatcher");

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback_query));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![app, bot_username])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
