//! Flow tests for the guided new-post creation.

mod common;

use chrono::{DateTime, Utc};
use common::{Harness, Outbound};
use postbot_core::ChatEvent;
use session_store::{Field, SessionState, SessionStore};

#[tokio::test]
async fn test_full_creation_flow_writes_slugged_file_without_sha() {
    let h = Harness::new();

    h.event(ChatEvent::NewPost).await;
    assert!(h.bot.last().text().contains("Title"));

    h.text("My Post").await;
    h.text("Desc").await;
    h.text("today").await;
    h.text("Hello world").await;

    // All four collected: confirmation with create/cancel.
    match h.bot.last() {
        Outbound::Menu { text, keyboard } => {
            assert!(text.contains("my_post.md"));
            let payloads: Vec<&str> = keyboard.rows()[0]
                .iter()
                .map(|b| b.payload.as_str())
                .collect();
            assert_eq!(payloads, vec!["create", "cancel"]);
        }
        other => panic!("expected confirmation menu, got {:?}", other),
    }

    h.press("create").await;

    let writes = h.gateway.writes();
    assert_eq!(writes.len(), 1);
    let write = &writes[0];
    assert_eq!(write.name, "my_post.md");
    assert_eq!(write.sha, None);
    assert_eq!(write.message, "Add post: My Post");

    let written = frontmatter::parse(&write.content);
    assert_eq!(written.title, "My Post");
    assert_eq!(written.description, "Desc");
    assert_eq!(written.content, "Hello world");

    assert!(h.sessions.get(h.chat.id).await.is_none());
}

#[tokio::test]
async fn test_fields_are_collected_in_fixed_order() {
    let h = Harness::new();
    h.event(ChatEvent::NewPost).await;

    let expected = [
        (Field::Title, "My Post"),
        (Field::Description, "Desc"),
        (Field::DatePublished, "2024-03-04"),
        (Field::Content, "Body"),
    ];
    for (field, value) in expected {
        let session = h.sessions.get(h.chat.id).await.unwrap();
        assert_eq!(session.state, SessionState::Collecting(field));
        h.text(value).await;
    }

    let session = h.sessions.get(h.chat.id).await.unwrap();
    assert_eq!(session.state, SessionState::ReadyToCommit);
    assert_eq!(session.post.title, "My Post");
    assert_eq!(session.post.date_published, "2024-03-04T00:00:00Z");
}

#[tokio::test]
async fn test_today_becomes_current_instant_not_the_literal() {
    let h = Harness::new();
    h.event(ChatEvent::NewPost).await;
    h.text("My Post").await;
    h.text("Desc").await;

    let before = Utc::now();
    h.text("TODAY").await;

    let session = h.sessions.get(h.chat.id).await.unwrap();
    let stored = &session.post.date_published;
    assert_ne!(stored.to_lowercase(), "today");
    let parsed: DateTime<Utc> = stored.parse().expect("stored date must be RFC 3339");
    let elapsed = (parsed - before).num_seconds().abs();
    assert!(elapsed <= 5, "stored instant too far from now: {}", stored);
}

#[tokio::test]
async fn test_unparseable_date_reprompts_same_step() {
    let h = Harness::new();
    h.event(ChatEvent::NewPost).await;
    h.text("My Post").await;
    h.text("Desc").await;

    h.text("someday soon").await;

    assert!(h.bot.last().text().contains("someday soon"));
    let session = h.sessions.get(h.chat.id).await.unwrap();
    assert_eq!(
        session.state,
        SessionState::Collecting(Field::DatePublished)
    );
    assert_eq!(session.post.date_published, "");

    // A valid date then advances to the content step.
    h.text("2024-03-04").await;
    let session = h.sessions.get(h.chat.id).await.unwrap();
    assert_eq!(session.state, SessionState::Collecting(Field::Content));
}

#[tokio::test]
async fn test_whitespace_title_reprompts_same_step() {
    let h = Harness::new();
    h.event(ChatEvent::NewPost).await;

    h.text("   ").await;

    assert!(h.bot.last().text().contains("title cannot be empty"));
    let session = h.sessions.get(h.chat.id).await.unwrap();
    assert_eq!(session.state, SessionState::Collecting(Field::Title));
    assert_eq!(session.post.title, "");

    // A real title then advances to the description step.
    h.text("My Post").await;
    let session = h.sessions.get(h.chat.id).await.unwrap();
    assert_eq!(session.state, SessionState::Collecting(Field::Description));
    assert_eq!(session.post.title, "My Post");
}

#[tokio::test]
async fn test_cancel_button_discards_without_writing() {
    let h = Harness::new();
    h.event(ChatEvent::NewPost).await;
    h.text("My Post").await;
    h.text("Desc").await;
    h.text("today").await;
    h.text("Body").await;

    h.press("cancel").await;

    assert!(h.gateway.writes().is_empty());
    assert!(h.sessions.get(h.chat.id).await.is_none());
}

#[tokio::test]
async fn test_cancel_command_discards_mid_flow() {
    let h = Harness::new();
    h.event(ChatEvent::NewPost).await;
    h.text("My Post").await;

    h.event(ChatEvent::Cancel).await;

    assert!(h.sessions.get(h.chat.id).await.is_none());
}

#[tokio::test]
async fn test_create_conflict_keeps_session() {
    let h = Harness::new();
    h.event(ChatEvent::NewPost).await;
    h.text("My Post").await;
    h.text("Desc").await;
    h.text("today").await;
    h.text("Body").await;

    h.gateway.set_conflict(true);
    h.press("create").await;

    assert!(h.bot.last().text().contains("my_post.md"));
    let session = h.sessions.get(h.chat.id).await.unwrap();
    assert_eq!(session.state, SessionState::ReadyToCommit);

    h.gateway.set_conflict(false);
    h.press("create").await;
    assert_eq!(h.gateway.writes().len(), 1);
    assert!(h.sessions.get(h.chat.id).await.is_none());
}

#[tokio::test]
async fn test_create_before_all_fields_collected_is_rejected() {
    let h = Harness::new();
    h.event(ChatEvent::NewPost).await;
    h.text("My Post").await;

    h.press("create").await;

    assert!(h.gateway.writes().is_empty());
    let session = h.sessions.get(h.chat.id).await.unwrap();
    assert_eq!(
        session.state,
        SessionState::Collecting(Field::Description)
    );
}
