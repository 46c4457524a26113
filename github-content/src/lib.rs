//! # github-content
//!
//! Remote content gateway over the GitHub contents API. Posts live as files
//! under one directory of one repository branch; reads return the decoded file
//! body plus its blob sha, which acts as the concurrency token for conditional
//! updates. Base64 transport encoding stays inside this crate.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
/// GitHub rejects requests without a User-Agent.
const USER_AGENT: &str = "postbot";

/// Errors surfaced by gateway operations.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Write conflict: remote content changed since it was read")]
    Conflict,

    #[error("Remote unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        GatewayError::Unavailable(e.to_string())
    }
}

/// One entry from the post directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub path: String,
}

/// A fetched post file: decoded content plus its concurrency token.
#[derive(Debug, Clone)]
pub struct RemoteFile {
    pub content: String,
    pub sha: String,
}

/// File read/write/list contract against the remote store.
#[async_trait]
pub trait ContentGateway: Send + Sync {
    /// Lists Markdown files in the configured post directory.
    async fn list_posts(&self) -> Result<Vec<FileEntry>, GatewayError>;
    /// Fetches and decodes one post file by name.
    async fn read_post(&self, name: &str) -> Result<RemoteFile, GatewayError>;
    /// Creates (`sha` absent) or conditionally updates (`sha` present) one post
    /// file. A stale sha yields [`GatewayError::Conflict`].
    async fn write_post(
        &self,
        name: &str,
        content: &str,
        sha: Option<&str>,
        message: &str,
    ) -> Result<(), GatewayError>;
}

/// Connection settings for [`GitHubContentGateway`].
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// `owner/name`.
    pub repo: String,
    /// Personal access token with contents read/write scope.
    pub token: String,
    /// Branch reads and writes are pinned to.
    pub branch: String,
    /// Directory holding the post files, e.g. `src/content/posts`.
    pub posts_dir: String,
}

/// GitHub contents-API implementation of [`ContentGateway`].
pub struct GitHubContentGateway {
    client: Client,
    config: GitHubConfig,
    api_base: String,
}

impl GitHubContentGateway {
    pub fn new(config: GitHubConfig) -> Self {
        Self::with_api_base(config, GITHUB_API_BASE.to_string())
    }

    /// Same as [`new`](Self::new) with an overridable API base URL (tests point
    /// this at a local mock server).
    pub fn with_api_base(config: GitHubConfig, api_base: String) -> Self {
        let client = Client::builder()
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            config,
            api_base,
        }
    }

    fn dir_url(&self) -> String {
        format!(
            "{}/repos/{}/contents/{}",
            self.api_base, self.config.repo, self.config.posts_dir
        )
    }

    fn file_url(&self, name: &str) -> String {
        format!("{}/{}", self.dir_url(), name)
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .query(&[("ref", self.config.branch.as_str())])
            .header("Authorization", format!("Bearer {}", self.config.token))
            .header("Accept", GITHUB_ACCEPT)
            .header("User-Agent", USER_AGENT)
    }

    async fn unexpected_status(response: Response) -> GatewayError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        GatewayError::Unavailable(format!("GitHub API error ({}): {}", status, body))
    }
}

#[derive(Debug, Deserialize)]
struct ContentsEntry {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct ContentsFile {
    content: String,
    sha: String,
}

#[derive(Debug, Serialize)]
struct PutContentsRequest<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[async_trait]
impl ContentGateway for GitHubContentGateway {
    async fn list_posts(&self) -> Result<Vec<FileEntry>, GatewayError> {
        let response = self.get(&self.dir_url()).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(GatewayError::NotFound(self.config.posts_dir.clone()))
            }
            status if !status.is_success() => {
                return Err(Self::unexpected_status(response).await)
            }
            _ => {}
        }

        let entries: Vec<ContentsEntry> = response.json().await?;
        let files: Vec<FileEntry> = entries
            .into_iter()
            .filter(|e| e.kind == "file" && e.name.ends_with(".md"))
            .map(|e| FileEntry {
                name: e.name,
                path: e.path,
            })
            .collect();

        info!(count = files.len(), dir = %self.config.posts_dir, "Listed post files");
        Ok(files)
    }

    async fn read_post(&self, name: &str) -> Result<RemoteFile, GatewayError> {
        let response = self.get(&self.file_url(name)).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(GatewayError::NotFound(name.to_string())),
            status if !status.is_success() => {
                return Err(Self::unexpected_status(response).await)
            }
            _ => {}
        }

        let file: ContentsFile = response.json().await?;
        // GitHub wraps base64 content in newlines.
        let packed: String = file.content.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = BASE64
            .decode(packed.as_bytes())
            .map_err(|e| GatewayError::Unavailable(format!("Invalid content encoding: {}", e)))?;
        let content = String::from_utf8(bytes)
            .map_err(|e| GatewayError::Unavailable(format!("Content is not UTF-8: {}", e)))?;

        debug!(name = %name, sha = %file.sha, "Fetched post file");
        Ok(RemoteFile {
            content,
            sha: file.sha,
        })
    }

    async fn write_post(
        &self,
        name: &str,
        content: &str,
        sha: Option<&str>,
        message: &str,
    ) -> Result<(), GatewayError> {
        let request = PutContentsRequest {
            message,
            content: BASE64.encode(content.as_bytes()),
            branch: &self.config.branch,
            sha,
        };

        let response = self
            .client
            .put(self.file_url(name))
            .header("Authorization", format!("Bearer {}", self.config.token))
            .header("Accept", GITHUB_ACCEPT)
            .header("User-Agent", USER_AGENT)
            .json(&request)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(GatewayError::NotFound(name.to_string())),
            // 409 for a stale sha; 422 when GitHub wants a sha for an existing file.
            StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => Err(GatewayError::Conflict),
            status if !status.is_success() => Err(Self::unexpected_status(response).await),
            _ => {
                info!(name = %name, update = sha.is_some(), "Wrote post file");
                Ok(())
            }
        }
    }
}
