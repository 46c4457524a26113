//! Bot config: Telegram token, GitHub target, logging, session eviction.
//! Loaded from environment variables (load .env with dotenvy first).

use anyhow::Result;
use github_content::GitHubConfig;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// BOT_TOKEN
    pub bot_token: String,
    /// GITHUB_REPO / GITHUB_TOKEN / GITHUB_BRANCH / POSTS_DIR
    pub github: GitHubConfig,
    /// Log file path (LOG_FILE)
    pub log_file: String,
    /// Sessions idle longer than this are evicted (SESSION_IDLE_TIMEOUT_SECS)
    pub session_idle_timeout_secs: u64,
}

impl Config {
    /// Loads from environment variables. BOT_TOKEN, GITHUB_REPO and
    /// GITHUB_TOKEN are required; the rest have defaults.
    pub fn from_env() -> Result<Self> {
        let bot_token = env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?;
        let repo =
            env::var("GITHUB_REPO").map_err(|_| anyhow::anyhow!("GITHUB_REPO not set"))?;
        let token =
            env::var("GITHUB_TOKEN").map_err(|_| anyhow::anyhow!("GITHUB_TOKEN not set"))?;
        let branch = env::var("GITHUB_BRANCH").unwrap_or_else(|_| "main".to_string());
        let posts_dir = env::var("POSTS_DIR").unwrap_or_else(|_| "src/content/posts".to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/postbot.log".to_string());
        let session_idle_timeout_secs = env::var("SESSION_IDLE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1800);

        Ok(Self {
            bot_token,
            github: GitHubConfig {
                repo,
                token,
                branch,
                posts_dir,
            },
            log_file,
            session_idle_timeout_secs,
        })
    }

    /// Validates cross-field constraints (repo shape, nonzero timeout).
    pub fn validate(&self) -> Result<()> {
        if !self.github.repo.contains('/') {
            anyhow::bail!(
                "GITHUB_REPO must be owner/name, got: {}",
                self.github.repo
            );
        }
        if self.session_idle_timeout_secs == 0 {
            anyhow::bail!("SESSION_IDLE_TIMEOUT_SECS must be greater than zero");
        }
        Ok(())
    }
}
