//! Error types for Slack operations

use thiserror::Error;

/// Result type for Slack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while posting to Slack
#[derive(Error, Debug)]
pub enum Error {
    /// Transport or decoding failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("Slack returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Slack accepted the request but reported `ok: false`
    #[error("Slack API error: {0}")]
    Slack(String),

    /// No bot token configured
    #[error("Missing Slack bot token. Set SLACK_BOT_TOKEN or add it to ~/.config/zoilist/secrets.toml")]
    MissingToken,

    /// IO error while writing dry-run output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<Error> for zoilist_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::MissingToken => zoilist_core::Error::Config(err.to_string()),
            other => zoilist_core::Error::Messaging(other.to_string()),
        }
    }
}
