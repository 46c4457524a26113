//! # frontmatter
//!
//! Codec for blog-post Markdown files: a fixed three-key front-matter header
//! (`title`, `description`, `datePublished`, double-quoted) followed by a blank
//! line and the raw Markdown body. Also provides title slugification and
//! date-input normalization for the creation flow.

mod date;

pub use date::{normalize_date_input, DateInputError};

use serde::{Deserialize, Serialize};

/// A blog post: three metadata fields plus the Markdown body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub description: String,
    pub date_published: String,
    pub content: String,
}

/// Separates the front-matter header from the body in serialized form.
const HEADER_END: &str = "---\n\n";

/// Parses raw file content into a [`Post`].
///
/// The header is everything before the first `---` followed by a blank line;
/// header lines are `key: value` with the value optionally double-quoted.
/// Parsing never fails: lines with no value are skipped, unknown keys are
/// ignored, and missing keys leave the field empty. Without a recognizable
/// header the whole input becomes the body.
pub fn parse(raw: &str) -> Post {
    let normalized = raw.replace("\r\n", "\n");
    let (header, body) = match normalized.split_once(HEADER_END) {
        Some((header, body)) => (header, body),
        None => ("", normalized.as_str()),
    };

    let mut post = Post {
        content: body.trim().to_string(),
        ..Post::default()
    };

    for line in header.lines() {
        let line = line.trim();
        if line.is_empty() || line == "---" {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim().trim_matches('"').trim();
        if value.is_empty() {
            continue;
        }
        match key.trim() {
            "title" => post.title = value.to_string(),
            "description" => post.description = value.to_string(),
            "datePublished" => post.date_published = value.to_string(),
            _ => {}
        }
    }

    post
}

/// Serializes a [`Post`] back into file content: the three keys in fixed order,
/// each double-quoted, then a blank line and the body.
pub fn serialize(post: &Post) -> String {
    format!(
        "---\ntitle: \"{}\"\ndescription: \"{}\"\ndatePublished: \"{}\"\n---\n\n{}",
        post.title, post.description, post.date_published, post.content
    )
}

/// Derives a file slug from a post title: lower-cased, spaces to underscores.
pub fn slugify(title: &str) -> String {
    title.trim().to_lowercase().replace(' ', "_")
}

/// File name for a new post: `<slug>.md`.
pub fn post_file_name(title: &str) -> String {
    format!("{}.md", slugify(title))
}
