//! Reminder job
//!
//! Scans the tracked searches for pull requests still waiting on review and
//! posts a single digest. Each run is independent: nothing is cached between
//! runs, so a failed run is simply retried by the next scheduled one.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::attribution::{attribute, merge_activity, Attribution};
use crate::config::{Config, QuerySet};
use crate::digest::{Digest, DigestLine, DigestSection};
use crate::model::{PullRequest, TeamMembers};
use crate::quiet::is_quiet_period;
use crate::source::{Messenger, OutgoingMessage, ReviewSource};
use crate::Result;

/// How a reminder run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Quiet period; nothing was fetched
    Quiet,
    /// No pull request is waiting
    NothingToSend,
    /// Digest posted
    Sent { lines: usize },
}

/// Periodic digest of pull requests awaiting review
pub struct ReminderJob<S, M> {
    source: S,
    messenger: M,
    config: Config,
}

impl<S: ReviewSource, M: Messenger> ReminderJob<S, M> {
    pub fn new(source: S, messenger: M, config: Config) -> Self {
        Self {
            source,
            messenger,
            config,
        }
    }

    /// Run once. Search and activity failures abort before anything is sent.
    pub async fn run(&self, now: DateTime<Utc>) -> Result<RunOutcome> {
        if is_quiet_period(now) {
            info!("Quiet period, skipping reminder");
            return Ok(RunOutcome::Quiet);
        }

        let members = self.resolve_members().await;
        let digest = self.build_digest(&members).await?;

        if digest.is_empty() {
            info!("No pull requests awaiting review");
            return Ok(RunOutcome::NothingToSend);
        }

        let lines = digest.line_count();
        let message = OutgoingMessage::new(&self.config.slack.channel, digest.render(now));
        self.messenger.post(&message).await?;

        info!(lines, channel = %self.config.slack.channel, "Posted reminder digest");
        Ok(RunOutcome::Sent { lines })
    }

    /// Team members, or an empty set if the lookup fails
    async fn resolve_members(&self) -> TeamMembers {
        let team = &self.config.team;
        match self.source.team_members(&team.org, &team.slug).await {
            Ok(members) => {
                debug!(count = members.len(), team = %team.slug, "Resolved team members");
                members
            }
            Err(e) => {
                warn!(
                    error = %e,
                    org = %team.org,
                    team = %team.slug,
                    "Failed to fetch team members, continuing without attribution"
                );
                TeamMembers::new()
            }
        }
    }

    /// Search every query set and attribute each match
    pub async fn build_digest(&self, members: &TeamMembers) -> Result<Digest> {
        let mut digest = Digest::new();
        for query in &self.config.reminder.queries {
            digest.push(self.build_section(query, members).await?);
        }
        Ok(digest)
    }

    async fn build_section(
        &self,
        query: &QuerySet,
        members: &TeamMembers,
    ) -> Result<DigestSection> {
        let repo = query.repo_ref()?;
        let prs = self.source.search_pull_requests(&repo, &query.query).await?;
        debug!(repo = %repo, count = prs.len(), "Found pull requests");

        let mut section = DigestSection::new(query.heading());
        for pr in prs {
            // Without members nothing can be attributed; don't fetch activity
            let attribution = if members.is_empty() {
                None
            } else {
                self.last_review(&pr, members).await?
            };
            section.push(DigestLine::new(pr, attribution));
        }

        Ok(section)
    }

    async fn last_review(
        &self,
        pr: &PullRequest,
        members: &TeamMembers,
    ) -> Result<Option<Attribution>> {
        let (issue_comments, review_comments, reviews) = tokio::try_join!(
            self.source.issue_comments(&pr.repo, pr.number),
            self.source.review_comments(&pr.repo, pr.number),
            self.source.reviews(&pr.repo, pr.number),
        )?;

        let candidates = merge_activity(issue_comments, review_comments, reviews);
        let attribution = attribute(pr, &candidates, members);
        debug!(
            number = pr.number,
            candidates = candidates.len(),
            reviewer = ?attribution.as_ref().map(|a| a.reviewer.as_str()),
            "Attributed pull request"
        );

        Ok(attribution)
    }
}
