//! Seams to the code hosting and messaging platforms
//!
//! The notifier and reminder job only ever see these traits. Production
//! implementations live in `zoilist-github` and `zoilist-slack`; tests use
//! in-memory fakes.

use async_trait::async_trait;
use serde::Serialize;

use crate::model::{Activity, PullRequest, RepoRef, TeamMembers};
use crate::Result;

/// Read access to pull requests, their activity, and team membership
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// Every pull request in `repo` matching `query`, newest first
    async fn search_pull_requests(&self, repo: &RepoRef, query: &str) -> Result<Vec<PullRequest>>;

    /// Members of `org`'s `team`
    async fn team_members(&self, org: &str, team: &str) -> Result<TeamMembers>;

    /// Conversation comments on a pull request
    async fn issue_comments(&self, repo: &RepoRef, number: u64) -> Result<Vec<Activity>>;

    /// Inline code review comments on a pull request
    async fn review_comments(&self, repo: &RepoRef, number: u64) -> Result<Vec<Activity>>;

    /// Submitted reviews on a pull request
    async fn reviews(&self, repo: &RepoRef, number: u64) -> Result<Vec<Activity>>;
}

/// A message ready to post to a channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMessage {
    pub channel: String,
    pub text: String,
    /// Link previews are always disabled; a digest would otherwise unfurl every PR
    pub unfurl_links: bool,
}

impl OutgoingMessage {
    pub fn new(channel: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            text: text.into(),
            unfurl_links: false,
        }
    }
}

/// Outbound messaging
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn post(&self, message: &OutgoingMessage) -> Result<()>;
}

#[async_trait]
impl<M: Messenger + ?Sized> Messenger for Box<M> {
    async fn post(&self, message: &OutgoingMessage) -> Result<()> {
        (**self).post(message).await
    }
}

#[async_trait]
impl<M: Messenger + ?Sized> Messenger for &M {
    async fn post(&self, message: &OutgoingMessage) -> Result<()> {
        (**self).post(message).await
    }
}

#[async_trait]
impl<S: ReviewSource + ?Sized> ReviewSource for &S {
    async fn search_pull_requests(&self, repo: &RepoRef, query: &str) -> Result<Vec<PullRequest>> {
        (**self).search_pull_requests(repo, query).await
    }

    async fn team_members(&self, org: &str, team: &str) -> Result<TeamMembers> {
        (**self).team_members(org, team).await
    }

    async fn issue_comments(&self, repo: &RepoRef, number: u64) -> Result<Vec<Activity>> {
        (**self).issue_comments(repo, number).await
    }

    async fn review_comments(&self, repo: &RepoRef, number: u64) -> Result<Vec<Activity>> {
        (**self).review_comments(repo, number).await
    }

    async fn reviews(&self, repo: &RepoRef, number: u64) -> Result<Vec<Activity>> {
        (**self).reviews(repo, number).await
    }
}

#[async_trait]
impl<S: ReviewSource + ?Sized> ReviewSource for Box<S> {
    async fn search_pull_requests(&self, repo: &RepoRef, query: &str) -> Result<Vec<PullRequest>> {
        (**self).search_pull_requests(repo, query).await
    }

    async fn team_members(&self, org: &str, team: &str) -> Result<TeamMembers> {
        (**self).team_members(org, team).await
    }

    async fn issue_comments(&self, repo: &RepoRef, number: u64) -> Result<Vec<Activity>> {
        (**self).issue_comments(repo, number).await
    }

    async fn review_comments(&self, repo: &RepoRef, number: u64) -> Result<Vec<Activity>> {
        (**self).review_comments(repo, number).await
    }

    async fn reviews(&self, repo: &RepoRef, number: u64) -> Result<Vec<Activity>> {
        (**self).reviews(repo, number).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outgoing_message_disables_unfurl() {
        let message = OutgoingMessage::new("#wg-api", "hello");
        assert!(!message.unfurl_links);
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["channel"], "#wg-api");
        assert_eq!(json["unfurl_links"], false);
    }
}
