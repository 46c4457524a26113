//! Outbound message text and inline menus.

use crate::callback::CallbackAction;
use frontmatter::Post;
use github_content::FileEntry;
use postbot_core::Keyboard;
use session_store::Field;

pub const CHOOSE_POST: &str = "Blog posts:";
pub const NO_POSTS: &str = "No posts found in the content directory.";
pub const FIELD_SAVED: &str = "Change saved. Anything else?";
pub const COMMITTED: &str = "Changes pushed to GitHub.";
pub const CREATED: &str = "Post created and pushed to GitHub.";
pub const CANCELLED: &str = "Session discarded.";
pub const NOTHING_TO_CANCEL: &str = "Nothing in progress.";
pub const PICK_POST_FIRST: &str = "Pick a post with the /posts command first.";
pub const NO_SESSION_GUIDANCE: &str =
    "No post is open. Pick one with /posts or start a new one with /new_post.";
pub const UNEXPECTED_TEXT_GUIDANCE: &str =
    "Use the buttons to pick a field first; then send its new value.";
pub const UNKNOWN_BUTTON_GUIDANCE: &str =
    "That button is no longer valid. Pick a post with /posts or start over with /new_post.";
pub const CONFLICT_NOTICE: &str =
    "The post changed on GitHub since you opened it. Your edits are kept; re-open the post from /posts to refresh, or commit again to retry.";

/// Chooser keyboard: one file per row, payload `open:<name>`.
pub fn chooser(files: &[FileEntry]) -> Keyboard {
    let mut keyboard = Keyboard::new();
    for file in files {
        keyboard = keyboard
            .text(&file.name, CallbackAction::Open(file.name.clone()).payload())
            .row();
    }
    keyboard
}

/// Editor menu: one edit button per field, then the commit row.
pub fn editor_menu() -> Keyboard {
    Keyboard::new()
        .text("Edit title", CallbackAction::Edit(Field::Title).payload())
        .row()
        .text(
            "Edit description",
            CallbackAction::Edit(Field::Description).payload(),
        )
        .row()
        .text(
            "Edit datePublished",
            CallbackAction::Edit(Field::DatePublished).payload(),
        )
        .row()
        .text("Edit content", CallbackAction::Edit(Field::Content).payload())
        .row()
        .text("Commit changes", CallbackAction::Commit.payload())
}

/// Confirmation menu shown when all creation fields are collected.
pub fn confirm_menu() -> Keyboard {
    Keyboard::new()
        .text("Create", CallbackAction::Create.payload())
        .text("Cancel", CallbackAction::Cancel.payload())
}

/// Full post view shown above the editor menu.
pub fn post_view(file_name: &str, post: &Post) -> String {
    format!(
        "Post {}:\n\ntitle: {}\ndescription: {}\ndatePublished: {}\n\n{}",
        file_name, post.title, post.description, post.date_published, post.content
    )
}

/// Preview shown above the create/cancel confirmation.
pub fn creation_preview(post: &Post) -> String {
    format!(
        "Ready to create {}:\n\ntitle: {}\ndescription: {}\ndatePublished: {}\n\n{}",
        frontmatter::post_file_name(&post.title),
        post.title,
        post.description,
        post.date_published,
        post.content
    )
}

pub fn field_prompt(field: Field) -> String {
    match field {
        Field::DatePublished => {
            "Enter the new value for datePublished (a date, or \"today\"):".to_string()
        }
        _ => format!("Enter the new value for {}:", field.key()),
    }
}

pub fn creation_prompt(field: Field) -> String {
    match field {
        Field::Title => "Title of the new post?".to_string(),
        Field::Description => "Description?".to_string(),
        Field::DatePublished => "Publish date? (a date, or \"today\")".to_string(),
        Field::Content => "Post content?".to_string(),
    }
}

pub const EMPTY_TITLE_RETRY: &str =
    "The title cannot be empty; it names the post's file. Send a title:";

pub fn date_retry(input: &str) -> String {
    format!(
        "Could not read \"{}\" as a date. Send YYYY-MM-DD, a full timestamp, or \"today\".",
        input
    )
}

pub fn create_conflict(file_name: &str) -> String {
    format!(
        "{} already exists on GitHub. Change the title or edit the existing post via /posts.",
        file_name
    )
}

pub fn gateway_failure(detail: &str) -> String {
    format!(
        "GitHub request failed: {}. Nothing was lost; try again in a moment.",
        detail
    )
}
