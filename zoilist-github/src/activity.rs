//! Comment and review activity on pull requests

use crate::client::PER_PAGE;
use crate::wire::{RawComment, RawReview};
use crate::{GitHubClient, Result};
use octocrab::Page;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use zoilist_core::{Activity, ActivityKind, RepoRef};

#[derive(Debug, Serialize)]
struct PageParams {
    per_page: u8,
}

impl GitHubClient {
    /// Conversation comments on a pull request
    pub async fn issue_comments(&self, repo: &RepoRef, number: u64) -> Result<Vec<Activity>> {
        let route = format!("/repos/{}/{}/issues/{}/comments", repo.owner, repo.name, number);
        let comments: Vec<RawComment> = self.fetch_all(&route).await?;

        Ok(comments
            .into_iter()
            .filter_map(|c| c.into_activity(ActivityKind::IssueComment))
            .collect())
    }

    /// Inline review comments on a pull request
    pub async fn review_comments(&self, repo: &RepoRef, number: u64) -> Result<Vec<Activity>> {
        let route = format!("/repos/{}/{}/pulls/{}/comments", repo.owner, repo.name, number);
        let comments: Vec<RawComment> = self.fetch_all(&route).await?;

        Ok(comments
            .into_iter()
            .filter_map(|c| c.into_activity(ActivityKind::ReviewComment))
            .collect())
    }

    /// Submitted reviews on a pull request; pending reviews are skipped
    pub async fn reviews(&self, repo: &RepoRef, number: u64) -> Result<Vec<Activity>> {
        let route = format!("/repos/{}/{}/pulls/{}/reviews", repo.owner, repo.name, number);
        let reviews: Vec<RawReview> = self.fetch_all(&route).await?;

        Ok(reviews.into_iter().filter_map(RawReview::into_activity).collect())
    }

    /// GET `route` and drain every page
    pub(crate) async fn fetch_all<T: DeserializeOwned>(&self, route: &str) -> Result<Vec<T>> {
        let params = PageParams { per_page: PER_PAGE };
        let page: Page<T> = self.client().get(route, Some(&params)).await?;
        let items = self.client().all_pages(page).await?;
        debug!(route, count = items.len(), "Fetched all pages");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_pending_reviews_are_dropped() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/electron/electron/pulls/38982/reviews")
            .match_query(Matcher::UrlEncoded("per_page".into(), "100".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {
                        "user": { "login": "zcbenz", "type": "User" },
                        "author_association": "MEMBER",
                        "state": "APPROVED",
                        "submitted_at": "2023-11-02T09:00:00Z"
                    },
                    {
                        "user": { "login": "MarshallOfSound", "type": "User" },
                        "author_association": "MEMBER",
                        "state": "PENDING"
                    }
                ]"#,
            )
            .create_async()
            .await;

        let client = GitHubClient::with_base_uri(None, &server.url()).unwrap();
        let reviews = client
            .reviews(&RepoRef::new("electron", "electron"), 38982)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].kind, ActivityKind::Review);
        assert_eq!(reviews[0].actor.login, "zcbenz");
    }
}
