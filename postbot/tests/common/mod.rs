//! Shared test doubles: a recording [`postbot_core::Bot`] and an in-memory
//! [`ContentGateway`], so flow tests drive the state machine without Telegram
//! or GitHub.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use github_content::{ContentGateway, FileEntry, GatewayError, RemoteFile};
use postbot::App;
use postbot_core::{Bot, Chat, ChatEvent, Keyboard, Result};
use session_store::InMemorySessionStore;

/// One outbound send recorded by [`MockBot`].
#[derive(Debug, Clone)]
#[allow(dead_code)] // not every test asserts on every variant
pub enum Outbound {
    Message(String),
    Menu { text: String, keyboard: Keyboard },
}

impl Outbound {
    #[allow(dead_code)]
    pub fn text(&self) -> &str {
        match self {
            Outbound::Message(text) => text,
            Outbound::Menu { text, .. } => text,
        }
    }
}

/// Records every outbound send for later assertions.
#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<Outbound>>,
}

impl MockBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<Outbound> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> Outbound {
        self.sent
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no outbound messages recorded")
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, _chat: &Chat, text: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push(Outbound::Message(text.to_string()));
        Ok(())
    }

    async fn send_menu(&self, _chat: &Chat, text: &str, keyboard: &Keyboard) -> Result<()> {
        self.sent.lock().unwrap().push(Outbound::Menu {
            text: text.to_string(),
            keyboard: keyboard.clone(),
        });
        Ok(())
    }
}

/// One recorded `write_post` call.
#[derive(Debug, Clone)]
pub struct WriteRecord {
    pub name: String,
    pub content: String,
    pub sha: Option<String>,
    pub message: String,
}

/// In-memory [`ContentGateway`] seeded with files; records writes and can be
/// switched into conflict mode.
#[derive(Default)]
pub struct MockGateway {
    files: Mutex<HashMap<String, RemoteFile>>,
    writes: Mutex<Vec<WriteRecord>>,
    conflict_on_write: Mutex<bool>,
}

impl MockGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed(&self, name: &str, content: &str, sha: &str) {
        self.files.lock().unwrap().insert(
            name.to_string(),
            RemoteFile {
                content: content.to_string(),
                sha: sha.to_string(),
            },
        );
    }

    pub fn writes(&self) -> Vec<WriteRecord> {
        self.writes.lock().unwrap().clone()
    }

    /// When set, every `write_post` fails with [`GatewayError::Conflict`].
    pub fn set_conflict(&self, on: bool) {
        *self.conflict_on_write.lock().unwrap() = on;
    }
}

#[async_trait]
impl ContentGateway for MockGateway {
    async fn list_posts(&self) -> std::result::Result<Vec<FileEntry>, GatewayError> {
        let files = self.files.lock().unwrap();
        let mut names: Vec<String> = files.keys().cloned().collect();
        names.sort();
        Ok(names
            .into_iter()
            .map(|name| FileEntry {
                path: format!("src/content/posts/{}", name),
                name,
            })
            .collect())
    }

    async fn read_post(&self, name: &str) -> std::result::Result<RemoteFile, GatewayError> {
        self.files
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(name.to_string()))
    }

    async fn write_post(
        &self,
        name: &str,
        content: &str,
        sha: Option<&str>,
        message: &str,
    ) -> std::result::Result<(), GatewayError> {
        if *self.conflict_on_write.lock().unwrap() {
            return Err(GatewayError::Conflict);
        }
        self.writes.lock().unwrap().push(WriteRecord {
            name: name.to_string(),
            content: content.to_string(),
            sha: sha.map(str::to_string),
            message: message.to_string(),
        });
        Ok(())
    }
}

pub struct Harness {
    pub app: App,
    pub bot: Arc<MockBot>,
    pub gateway: Arc<MockGateway>,
    pub sessions: Arc<InMemorySessionStore>,
    pub chat: Chat,
}

impl Harness {
    pub fn new() -> Self {
        let bot = MockBot::new();
        let gateway = MockGateway::new();
        let sessions = Arc::new(InMemorySessionStore::new(Duration::from_secs(60)));
        let app = App::new(bot.clone(), gateway.clone(), sessions.clone());
        Self {
            app,
            bot,
            gateway,
            sessions,
            chat: Chat { id: 7 },
        }
    }

    pub async fn event(&self, event: ChatEvent) {
        self.app
            .handle_event(&self.chat, event)
            .await
            .expect("event handling failed");
    }

    #[allow(dead_code)]
    pub async fn text(&self, text: &str) {
        self.event(ChatEvent::Text(text.to_string())).await;
    }

    #[allow(dead_code)]
    pub async fn press(&self, payload: &str) {
        self.event(ChatEvent::Callback(payload.to_string())).await;
    }
}
