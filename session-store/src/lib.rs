//! # session-store
//!
//! Per-conversation editing state for the blog-post bot. One [`Session`] per
//! chat id tracks an in-progress edit or creation flow; the [`SessionStore`]
//! owns every record, and callers re-fetch by chat id on each event instead of
//! holding references. The in-memory implementation evicts sessions that sit
//! idle past a configurable timeout, so abandoned flows do not accumulate.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use frontmatter::Post;
use tokio::sync::RwLock;
use tracing::info;

/// One editable post field. Doubles as the creation step, collected in the
/// order given by [`Field::next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    DatePublished,
    Content,
}

impl Field {
    /// Stable key used in callback payloads and front-matter.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::DatePublished => "datePublished",
            Field::Content => "content",
        }
    }

    pub fn parse(key: &str) -> Option<Field> {
        match key {
            "title" => Some(Field::Title),
            "description" => Some(Field::Description),
            "datePublished" => Some(Field::DatePublished),
            "content" => Some(Field::Content),
            _ => None,
        }
    }

    /// Next step in the fixed creation order; `None` after `Content`.
    pub fn next(&self) -> Option<Field> {
        match self {
            Field::Title => Some(Field::Description),
            Field::Description => Some(Field::DatePublished),
            Field::DatePublished => Some(Field::Content),
            Field::Content => None,
        }
    }
}

/// Where the conversation stands. `Idle` is the absence of a session; the
/// post-list chooser needs no session either, since its buttons carry the file
/// name in the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Editor menu shown for an opened post.
    PostPresented,
    /// An edit button armed this field; the next text reply fills it.
    AwaitingFieldValue(Field),
    /// Creation flow, currently prompting for this field.
    Collecting(Field),
    /// All creation fields collected; waiting for create/cancel.
    ReadyToCommit,
}

/// In-progress edit or creation flow for one chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// File being edited; `None` while creating (the path is derived from the
    /// title at commit time).
    pub target_file: Option<String>,
    pub post: Post,
    /// Concurrency token from the read that opened the post; `None` while
    /// creating.
    pub sha: Option<String>,
    pub state: SessionState,
}

impl Session {
    /// Session for editing an existing post, starting at the editor menu.
    pub fn editing(target_file: String, post: Post, sha: String) -> Self {
        Self {
            target_file: Some(target_file),
            post,
            sha: Some(sha),
            state: SessionState::PostPresented,
        }
    }

    /// Fresh creation session, prompting for the title first.
    pub fn creating() -> Self {
        Self {
            target_file: None,
            post: Post::default(),
            sha: None,
            state: SessionState::Collecting(Field::Title),
        }
    }

    /// Writes a value into exactly one post field.
    pub fn set_field(&mut self, field: Field, value: &str) {
        let value = value.to_string();
        match field {
            Field::Title => self.post.title = value,
            Field::Description => self.post.description = value,
            Field::DatePublished => self.post.date_published = value,
            Field::Content => self.post.content = value,
        }
    }
}

/// Exclusive owner of all session records, keyed by chat id. `put` is a full
/// replace: callers fetch, modify a copy, and store it back.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, chat_id: i64) -> Option<Session>;
    async fn put(&self, chat_id: i64, session: Session);
    async fn remove(&self, chat_id: i64);
}

struct Entry {
    session: Session,
    touched: Instant,
}

/// In-memory [`SessionStore`] with idle-timeout eviction. Expired entries are
/// dropped lazily on access and in bulk by [`evict_idle`](Self::evict_idle).
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<i64, Entry>>,
    idle_timeout: Duration,
}

impl InMemorySessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Drops every session idle past the timeout; returns how many were evicted.
    pub async fn evict_idle(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, e| e.touched.elapsed() < self.idle_timeout);
        let evicted = before - entries.len();
        if evicted > 0 {
            info!(evicted, remaining = entries.len(), "Evicted idle sessions");
        }
        evicted
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, chat_id: i64) -> Option<Session> {
        let mut entries = self.entries.write().await;
        match entries.get_mut(&chat_id) {
            Some(entry) if entry.touched.elapsed() >= self.idle_timeout => {
                entries.remove(&chat_id);
                info!(chat_id, "Session expired");
                None
            }
            Some(entry) => {
                entry.touched = Instant::now();
                Some(entry.session.clone())
            }
            None => None,
        }
    }

    async fn put(&self, chat_id: i64, session: Session) {
        let mut entries = self.entries.write().await;
        entries.insert(
            chat_id,
            Entry {
                session,
                touched: Instant::now(),
            },
        );
    }

    async fn remove(&self, chat_id: i64) {
        let mut entries = self.entries.write().await;
        entries.remove(&chat_id);
    }
}
