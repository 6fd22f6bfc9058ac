//! Pull request search

use crate::client::PER_PAGE;
use crate::wire::RawSearchItem;
use crate::{GitHubClient, Result};
use octocrab::Page;
use serde::Serialize;
use tracing::{debug, info};
use zoilist_core::{PullRequest, RepoRef};

#[derive(Debug, Serialize)]
struct SearchParams<'a> {
    q: &'a str,
    sort: &'a str,
    per_page: u8,
}

/// Scope a search query to a single repository
pub(crate) fn scoped_query(repo: &RepoRef, query: &str) -> String {
    format!("repo:{} {}", repo, query.trim())
}

impl GitHubClient {
    /// Search pull requests in `repo`, following every result page
    pub async fn search_pull_requests(
        &self,
        repo: &RepoRef,
        query: &str,
    ) -> Result<Vec<PullRequest>> {
        let q = scoped_query(repo, query);
        debug!(q = %q, "Searching pull requests");

        let params = SearchParams {
            q: &q,
            sort: "created",
            per_page: PER_PAGE,
        };
        let page: Page<RawSearchItem> = self.client().get("/search/issues", Some(&params)).await?;
        let items = self.client().all_pages(page).await?;

        let prs: Vec<PullRequest> = items
            .into_iter()
            .filter_map(|item| item.into_pull_request(repo))
            .collect();

        info!(repo = %repo, count = prs.len(), "Fetched pull requests");

        Ok(prs)
    }
}
