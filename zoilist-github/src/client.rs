//! GitHub API client using octocrab

use crate::{Error, Result};
use octocrab::Octocrab;
use tracing::{debug, info};

/// Page size requested from every paginated endpoint
pub(crate) const PER_PAGE: u8 = 100;

/// GitHub API client for search, activity and team lookups
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Create a new GitHub client
    ///
    /// Without a token requests are anonymous, which is enough for public
    /// searches but not for team membership; the reminder job tolerates
    /// that failure.
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::build(token, None)
    }

    /// Create a client against a different API root (GitHub Enterprise)
    pub fn with_base_uri(token: Option<String>, base_uri: &str) -> Result<Self> {
        Self::build(token, Some(base_uri))
    }

    fn build(token: Option<String>, base_uri: Option<&str>) -> Result<Self> {
        let authenticated = token.is_some();
        let mut builder = Octocrab::builder();

        if let Some(token) = token {
            builder = builder.personal_token(token);
        }

        if let Some(uri) = base_uri {
            builder = builder
                .base_uri(uri)
                .map_err(|e| Error::Other(format!("Invalid GitHub base URI {}: {}", uri, e)))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::Auth(format!("Failed to create GitHub client: {}", e)))?;

        if authenticated {
            info!("Created authenticated GitHub client");
        } else {
            debug!("Created anonymous GitHub client");
        }

        Ok(Self { client })
    }

    /// Get the underlying octocrab client
    pub fn client(&self) -> &Octocrab {
        &self.client
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient").finish_non_exhaustive()
    }
}
