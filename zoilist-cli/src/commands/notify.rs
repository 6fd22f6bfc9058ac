//! Notify command - Alert the working group about a single webhook delivery

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::Args;
use zoilist_core::{Config, Notifier, NotifyOutcome, Secrets};

/// Arguments for the notify command
#[derive(Args, Debug)]
pub struct NotifyArgs {
    /// Webhook event name (e.g. pull_request)
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    pub event: String,

    /// Path to the webhook payload JSON, or `-` for stdin
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub payload: PathBuf,
}

impl NotifyArgs {
    /// Execute the notify command
    pub async fn execute(
        &self,
        config: Config,
        secrets: &Secrets,
        dry_run: bool,
    ) -> anyhow::Result<()> {
        let messenger = zoilist_slack::messenger_for(secrets.slack_token(), dry_run)?;

        let body = self.read_payload()?;
        let Some(event) = zoilist_github::parse_event(&self.event, &body)? else {
            tracing::info!(event = %self.event, "Nothing to do for this event");
            return Ok(());
        };

        let notifier = Notifier::new(messenger, config);
        match notifier.handle(&event, Utc::now()).await? {
            NotifyOutcome::Sent => tracing::info!(
                number = event.pull_request.number,
                "API review alert sent"
            ),
            NotifyOutcome::Ignored => tracing::info!(
                number = event.pull_request.number,
                action = ?event.action,
                "Event does not need API review"
            ),
        }

        Ok(())
    }

    fn read_payload(&self) -> anyhow::Result<Vec<u8>> {
        if self.payload.as_os_str() == "-" {
            let mut body = Vec::new();
            std::io::stdin()
                .read_to_end(&mut body)
                .context("Failed to read payload from stdin")?;
            return Ok(body);
        }

        std::fs::read(&self.payload)
            .with_context(|| format!("Failed to read payload {}", self.payload.display()))
    }
}
