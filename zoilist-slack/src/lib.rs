//! Zoilist Slack - Slack integration for Zoilist
//!
//! Provides the [`zoilist_core::Messenger`] implementations: a thin
//! `chat.postMessage` client, and a dry-run messenger that prints instead
//! of posting.

mod client;
mod dry_run;
mod error;

pub use client::SlackClient;
pub use dry_run::DryRunMessenger;
pub use error::{Error, Result};

use tracing::info;
use zoilist_core::Messenger;

/// Pick a messenger for the given token
///
/// Dry runs always print. Otherwise a token is mandatory.
pub fn messenger_for(token: Option<String>, dry_run: bool) -> Result<Box<dyn Messenger>> {
    if dry_run {
        info!("Dry run: messages will be printed, not posted");
        return Ok(Box::new(DryRunMessenger::stdout()));
    }

    match token {
        Some(token) => Ok(Box::new(SlackClient::new(token))),
        None => Err(Error::MissingToken),
    }
}
