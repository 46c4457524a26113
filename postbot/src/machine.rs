//! Conversational state machine: dispatches each inbound event against the
//! chat's session, calling the content gateway and codec as needed.
//!
//! Sessions are re-fetched from the store on every event and written back as a
//! whole; no state lives on `App` itself. Gateway failures are converted to
//! chat messages here and leave the session intact, so the user can retry a
//! commit after a transient failure or a conflict.

use std::sync::Arc;

use chrono::Utc;
use frontmatter::DateInputError;
use github_content::{ContentGateway, GatewayError};
use postbot_core::{Bot, Chat, ChatEvent, Result};
use session_store::{Field, Session, SessionState, SessionStore};
use tracing::{error, info, instrument, warn};

use crate::callback::CallbackAction;
use crate::menus;

/// The bot application: outbound transport, remote content gateway, and the
/// session store, all behind trait objects so tests can substitute mocks.
pub struct App {
    bot: Arc<dyn Bot>,
    gateway: Arc<dyn ContentGateway>,
    sessions: Arc<dyn SessionStore>,
}

impl App {
    pub fn new(
        bot: Arc<dyn Bot>,
        gateway: Arc<dyn ContentGateway>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            bot,
            gateway,
            sessions,
        }
    }

    /// Entry point for one inbound event.
    #[instrument(skip(self, chat, event), fields(chat_id = chat.id))]
    pub async fn handle_event(&self, chat: &Chat, event: ChatEvent) -> Result<()> {
        match event {
            ChatEvent::ListPosts => self.on_list(chat).await,
            ChatEvent::NewPost => self.on_new_post(chat).await,
            ChatEvent::Cancel => self.on_cancel(chat).await,
            ChatEvent::Callback(payload) => self.on_callback(chat, &payload).await,
            ChatEvent::Text(text) => self.on_text(chat, &text).await,
        }
    }

    async fn on_list(&self, chat: &Chat) -> Result<()> {
        match self.gateway.list_posts().await {
            Ok(files) if files.is_empty() => self.bot.send_message(chat, menus::NO_POSTS).await,
            Ok(files) => {
                info!(count = files.len(), "Presenting post chooser");
                self.bot
                    .send_menu(chat, menus::CHOOSE_POST, &menus::chooser(&files))
                    .await
            }
            Err(e) => self.report_gateway_failure(chat, e).await,
        }
    }

    async fn on_new_post(&self, chat: &Chat) -> Result<()> {
        // Overwrites any session in progress; /cancel is not required first.
        self.sessions.put(chat.id, Session::creating()).await;
        info!("Started creation flow");
        self.bot
            .send_message(chat, &menus::creation_prompt(Field::Title))
            .await
    }

    async fn on_cancel(&self, chat: &Chat) -> Result<()> {
        if self.sessions.get(chat.id).await.is_some() {
            self.sessions.remove(chat.id).await;
            info!("Session discarded");
            self.bot.send_message(chat, menus::CANCELLED).await
        } else {
            self.bot.send_message(chat, menus::NOTHING_TO_CANCEL).await
        }
    }

    async fn on_callback(&self, chat: &Chat, payload: &str) -> Result<()> {
        let Some(action) = CallbackAction::parse(payload) else {
            warn!(payload = %payload, "Unknown callback payload");
            return self
                .bot
                .send_message(chat, menus::UNKNOWN_BUTTON_GUIDANCE)
                .await;
        };

        match action {
            CallbackAction::Open(name) => self.on_open(chat, &name).await,
            CallbackAction::Edit(field) => self.on_edit(chat, field).await,
            CallbackAction::Commit => self.on_commit(chat).await,
            CallbackAction::Create => self.on_create(chat).await,
            CallbackAction::Cancel => self.on_cancel(chat).await,
        }
    }

    /// A file was chosen from the list: fetch, parse, and present the editor.
    async fn on_open(&self, chat: &Chat, name: &str) -> Result<()> {
        match self.gateway.read_post(name).await {
            Ok(file) => {
                let post = frontmatter::parse(&file.content);
                info!(file = %name, "Opened post for editing");
                self.sessions
                    .put(chat.id, Session::editing(name.to_string(), post.clone(), file.sha))
                    .await;
                self.bot
                    .send_menu(chat, &menus::post_view(name, &post), &menus::editor_menu())
                    .await
            }
            Err(e) => self.report_gateway_failure(chat, e).await,
        }
    }

    /// An edit button arms its field; the next text reply fills it. Pressing
    /// another edit button before replying simply re-arms.
    async fn on_edit(&self, chat: &Chat, field: Field) -> Result<()> {
        let Some(mut session) = self.sessions.get(chat.id).await else {
            return self.bot.send_message(chat, menus::PICK_POST_FIRST).await;
        };
        if session.target_file.is_none() {
            // Creation flow has its own fixed prompting order.
            return self
                .bot
                .send_message(chat, menus::UNKNOWN_BUTTON_GUIDANCE)
                .await;
        }

        session.state = SessionState::AwaitingFieldValue(field);
        self.sessions.put(chat.id, session).await;
        self.bot
            .send_message(chat, &menus::field_prompt(field))
            .await
    }

    async fn on_commit(&self, chat: &Chat) -> Result<()> {
        let Some(session) = self.sessions.get(chat.id).await else {
            return self.bot.send_message(chat, menus::PICK_POST_FIRST).await;
        };
        let (Some(file), Some(sha)) = (session.target_file.as_deref(), session.sha.as_deref())
        else {
            return self
                .bot
                .send_message(chat, menus::UNKNOWN_BUTTON_GUIDANCE)
                .await;
        };

        let content = frontmatter::serialize(&session.post);
        let message = format!("Update post: {}", session.post.title);
        match self
            .gateway
            .write_post(file, &content, Some(sha), &message)
            .await
        {
            Ok(()) => {
                // Terminal transition: the session is done.
                self.sessions.remove(chat.id).await;
                info!(file = %file, "Committed post update");
                self.bot.send_message(chat, menus::COMMITTED).await
            }
            Err(GatewayError::Conflict) => {
                warn!(file = %file, "Commit rejected: stale concurrency token");
                self.bot.send_message(chat, menus::CONFLICT_NOTICE).await
            }
            Err(e) => self.report_gateway_failure(chat, e).await,
        }
    }

    async fn on_create(&self, chat: &Chat) -> Result<()> {
        let Some(session) = self.sessions.get(chat.id).await else {
            return self.bot.send_message(chat, menus::NO_SESSION_GUIDANCE).await;
        };
        if session.state != SessionState::ReadyToCommit || session.target_file.is_some() {
            return self
                .bot
                .send_message(chat, menus::UNKNOWN_BUTTON_GUIDANCE)
                .await;
        }

        let file = frontmatter::post_file_name(&session.post.title);
        let content = frontmatter::serialize(&session.post);
        let message = format!("Add post: {}", session.post.title);
        match self.gateway.write_post(&file, &content, None, &message).await {
            Ok(()) => {
                self.sessions.remove(chat.id).await;
                info!(file = %file, "Created post");
                self.bot.send_message(chat, menus::CREATED).await
            }
            Err(GatewayError::Conflict) => {
                warn!(file = %file, "Create rejected: file already exists");
                self.bot.send_message(chat, &menus::create_conflict(&file)).await
            }
            Err(e) => self.report_gateway_failure(chat, e).await,
        }
    }

    /// Free text is a field value only when the session says one is expected;
    /// otherwise it gets guidance and the state stays untouched.
    async fn on_text(&self, chat: &Chat, text: &str) -> Result<()> {
        let Some(mut session) = self.sessions.get(chat.id).await else {
            return self.bot.send_message(chat, menus::NO_SESSION_GUIDANCE).await;
        };

        match session.state.clone() {
            SessionState::AwaitingFieldValue(field) => {
                session.set_field(field, text);
                session.state = SessionState::PostPresented;
                self.sessions.put(chat.id, session).await;
                info!(field = field.key(), "Field updated");
                self.bot
                    .send_menu(chat, menus::FIELD_SAVED, &menus::editor_menu())
                    .await
            }
            SessionState::Collecting(step) => self.on_collect(chat, session, step, text).await,
            SessionState::PostPresented | SessionState::ReadyToCommit => {
                self.bot
                    .send_message(chat, menus::UNEXPECTED_TEXT_GUIDANCE)
                    .await
            }
        }
    }

    /// One creation step: store the value, then prompt for the next field or
    /// present the confirmation once all four are collected.
    async fn on_collect(
        &self,
        chat: &Chat,
        mut session: Session,
        step: Field,
        text: &str,
    ) -> Result<()> {
        match step {
            // An empty title would slugify to an empty file name.
            Field::Title if text.trim().is_empty() => {
                warn!("Empty title during creation");
                return self.bot.send_message(chat, menus::EMPTY_TITLE_RETRY).await;
            }
            Field::DatePublished => match frontmatter::normalize_date_input(text, Utc::now()) {
                Ok(rendered) => session.post.date_published = rendered,
                Err(DateInputError::Unparseable(input)) => {
                    // Session unchanged; the same step is prompted again.
                    warn!(input = %input, "Unparseable date during creation");
                    return self.bot.send_message(chat, &menus::date_retry(&input)).await;
                }
            },
            other => session.set_field(other, text),
        }

        match step.next() {
            Some(next) => {
                session.state = SessionState::Collecting(next);
                self.sessions.put(chat.id, session).await;
                self.bot.send_message(chat, &menus::creation_prompt(next)).await
            }
            None => {
                session.state = SessionState::ReadyToCommit;
                let preview = menus::creation_preview(&session.post);
                self.sessions.put(chat.id, session).await;
                self.bot
                    .send_menu(chat, &preview, &menus::confirm_menu())
                    .await
            }
        }
    }

    /// Boundary for all remote failures: logged, told to the user in general
    /// terms, and never fatal to the process or the session.
    async fn report_gateway_failure(&self, chat: &Chat, err: GatewayError) -> Result<()> {
        error!(error = %err, chat_id = chat.id, "Gateway call failed");
        let text = match &err {
            GatewayError::NotFound(name) => format!("{} was not found on GitHub.", name),
            GatewayError::Conflict => menus::CONFLICT_NOTICE.to_string(),
            GatewayError::Unavailable(detail) => menus::gateway_failure(detail),
        };
        self.bot.send_message(chat, &text).await
    }
}
