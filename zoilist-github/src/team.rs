//! Team membership

use crate::wire::RawUser;
use crate::{GitHubClient, Result};
use tracing::debug;
use zoilist_core::TeamMembers;

impl GitHubClient {
    /// Members of an organization team (requires `read:org`)
    pub async fn team_members(&self, org: &str, team: &str) -> Result<TeamMembers> {
        debug!(org, team, "Fetching team members");

        let route = format!("/orgs/{}/teams/{}/members", org, team);
        let users: Vec<RawUser> = self.fetch_all(&route).await?;

        Ok(users.iter().map(|u| u.login.as_str()).collect())
    }
}
