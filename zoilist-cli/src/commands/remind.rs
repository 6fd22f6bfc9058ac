//! Remind command - Post the digest of pull requests awaiting review

use chrono::Utc;
use clap::Args;
use zoilist_core::{Config, ReminderJob, RunOutcome, Secrets};
use zoilist_github::GitHubClient;

/// Arguments for the remind command
#[derive(Args, Debug)]
pub struct RemindArgs {
    /// GitHub API root, for GitHub Enterprise
    #[arg(long, env = "GITHUB_API_URL")]
    pub github_api: Option<String>,
}

impl RemindArgs {
    /// Execute the remind command
    pub async fn execute(
        &self,
        config: Config,
        secrets: &Secrets,
        dry_run: bool,
    ) -> anyhow::Result<()> {
        let messenger = zoilist_slack::messenger_for(secrets.slack_token(), dry_run)?;

        let github = match &self.github_api {
            Some(uri) => GitHubClient::with_base_uri(secrets.github_token(), uri)?,
            None => GitHubClient::new(secrets.github_token())?,
        };

        let job = ReminderJob::new(github, messenger, config);
        match job.run(Utc::now()).await? {
            RunOutcome::Quiet => tracing::info!("Quiet period, no reminder sent"),
            RunOutcome::NothingToSend => tracing::info!("Nothing awaiting review"),
            RunOutcome::Sent { lines } => tracing::info!(lines, "Reminder sent"),
        }

        Ok(())
    }
}
