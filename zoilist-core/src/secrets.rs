//! Secrets management for Zoilist
//!
//! Tokens are kept out of `config.toml` so the config can be shared freely.
//! The secrets file is located at `~/.config/zoilist/secrets.toml` and must
//! have restrictive permissions (0600 on Unix).
//!
//! Loading priority:
//! 1. Environment variables (SLACK_BOT_TOKEN, GITHUB_TOKEN)
//! 2. Secrets file (~/.config/zoilist/secrets.toml)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Secrets structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Secrets {
    pub slack: SlackSecrets,
    pub github: GitHubSecrets,
}

/// Slack-related secrets
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SlackSecrets {
    /// Bot token (xoxb-...)
    pub bot_token: Option<String>,
}

/// GitHub-related secrets
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubSecrets {
    /// Personal access token; anonymous access is used when absent
    pub token: Option<String>,
}

impl Secrets {
    /// Load secrets from the default location
    ///
    /// Returns default (empty) secrets if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_secrets_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load secrets from a specific file with permission checking
    pub fn load_from_file(path: &Path) -> Result<Self> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mode = std::fs::metadata(path).map_err(Error::Io)?.permissions().mode();
            if mode & 0o077 != 0 {
                return Err(Error::Config(format!(
                    "Secrets file {} has insecure permissions {:o}. \
                     Please run: chmod 600 {}",
                    path.display(),
                    mode & 0o777,
                    path.display()
                )));
            }
        }

        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        let mut secrets: Secrets = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse secrets: {}", e)))?;

        for token in [&mut secrets.slack.bot_token, &mut secrets.github.token]
            .into_iter()
            .flatten()
        {
            *token = token.trim().to_string();
        }

        Ok(secrets)
    }

    /// Get the default secrets file path
    ///
    /// Returns `~/.config/zoilist/secrets.toml` on Unix
    pub fn default_secrets_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("zoilist").join("secrets.toml"))
    }

    /// Slack bot token. Priority: SLACK_BOT_TOKEN env var > secrets file
    pub fn slack_token(&self) -> Option<String> {
        pick("SLACK_BOT_TOKEN", std::env::var("SLACK_BOT_TOKEN").ok(), &self.slack.bot_token)
    }

    /// GitHub token. Priority: GITHUB_TOKEN env var > secrets file
    pub fn github_token(&self) -> Option<String> {
        pick("GITHUB_TOKEN", std::env::var("GITHUB_TOKEN").ok(), &self.github.token)
    }
}

fn pick(var: &str, from_env: Option<String>, from_file: &Option<String>) -> Option<String> {
    if let Some(token) = from_env.map(|t| t.trim().to_string()) {
        if !token.is_empty() {
            debug!(var, "Using token from environment");
            return Some(token);
        }
    }

    match from_file {
        Some(token) if !token.is_empty() => {
            debug!(var, "Using token from secrets file");
            Some(token.clone())
        }
        _ => None,
    }
}
