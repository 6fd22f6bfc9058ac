//! `ReviewSource` implementation

use async_trait::async_trait;
use zoilist_core::{Activity, PullRequest, RepoRef, ReviewSource, TeamMembers};

use crate::GitHubClient;

#[async_trait]
impl ReviewSource for GitHubClient {
    async fn search_pull_requests(
        &self,
        repo: &RepoRef,
        query: &str,
    ) -> zoilist_core::Result<Vec<PullRequest>> {
        Ok(GitHubClient::search_pull_requests(self, repo, query).await?)
    }

    async fn team_members(&self, org: &str, team: &str) -> zoilist_core::Result<TeamMembers> {
        Ok(GitHubClient::team_members(self, org, team).await?)
    }

    async fn issue_comments(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> zoilist_core::Result<Vec<Activity>> {
        Ok(GitHubClient::issue_comments(self, repo, number).await?)
    }

    async fn review_comments(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> zoilist_core::Result<Vec<Activity>> {
        Ok(GitHubClient::review_comments(self, repo, number).await?)
    }

    async fn reviews(&self, repo: &RepoRef, number: u64) -> zoilist_core::Result<Vec<Activity>> {
        Ok(GitHubClient::reviews(self, repo, number).await?)
    }
}
