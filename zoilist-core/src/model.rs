//! Pull request and activity snapshots
//!
//! These are read-only views of data owned by the code hosting platform.
//! Nothing here is persisted; every run fetches fresh copies.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Kind of account behind an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActorKind {
    #[default]
    User,
    Bot,
    Organization,
    #[serde(other)]
    Other,
}

/// An account that authored a pull request or some activity on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Login name
    pub login: String,
    /// Account kind
    pub kind: ActorKind,
}

impl Actor {
    pub fn new(login: impl Into<String>, kind: ActorKind) -> Self {
        Self {
            login: login.into(),
            kind,
        }
    }

    pub fn user(login: impl Into<String>) -> Self {
        Self::new(login, ActorKind::User)
    }

    /// Whether this is a human account
    ///
    /// Apps sometimes show up typed as `User` but keep the `[bot]` suffix,
    /// so both signals are checked.
    pub fn is_human(&self) -> bool {
        self.kind == ActorKind::User && !self.login.ends_with("[bot]")
    }

    /// Case-insensitive login comparison
    pub fn is(&self, login: &str) -> bool {
        self.login.eq_ignore_ascii_case(login)
    }
}

/// Relationship between an author and the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorAssociation {
    Owner,
    Member,
    Collaborator,
    Contributor,
    FirstTimeContributor,
    FirstTimer,
    Mannequin,
    #[default]
    #[serde(other)]
    None,
}

impl AuthorAssociation {
    /// Badge shown next to pull requests from outside the project
    pub fn badge(&self) -> Option<&'static str> {
        match self {
            AuthorAssociation::Contributor => Some("contributor"),
            AuthorAssociation::FirstTimeContributor | AuthorAssociation::FirstTimer => {
                Some("first-time contributor")
            }
            _ => None,
        }
    }
}

/// An `owner/name` repository reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse a repository reference
    ///
    /// Supports formats:
    /// - owner/repo
    /// - https://github.com/owner/repo
    /// - https://api.github.com/repos/owner/repo
    pub fn parse(input: &str) -> Result<Self> {
        if input.starts_with("https://") || input.starts_with("http://") {
            let url = url::Url::parse(input).map_err(|e| Error::Config(e.to_string()))?;
            let mut segments: Vec<&str> = url
                .path_segments()
                .map(|s| s.filter(|p| !p.is_empty()).collect())
                .unwrap_or_default();
            // API URLs carry a prefix before `repos` on GitHub Enterprise (`/api/v3`)
            if let Some(pos) = segments.iter().rposition(|s| *s == "repos") {
                segments.drain(..=pos);
            }
            return match segments.as_slice() {
                [owner, name, ..] => Ok(Self::new(*owner, name.trim_end_matches(".git"))),
                _ => Err(Error::Config(format!(
                    "Invalid repository URL: {}",
                    input
                ))),
            };
        }

        match input.split('/').collect::<Vec<_>>().as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => {
                Ok(Self::new(*owner, name.trim_end_matches(".git")))
            }
            _ => Err(Error::Config(format!(
                "Invalid repository format: {}. Expected owner/repo",
                input
            ))),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A label as GitHub reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Stable across renames; absent when only the name is known
    pub id: Option<u64>,
    pub name: String,
}

impl Label {
    pub fn new(id: Option<u64>, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// A label known only by name
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(None, name)
    }
}

/// Pull request snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// PR title, unescaped
    pub title: String,
    /// Who opened the PR
    pub author: Actor,
    /// Author's relationship to the repository
    pub author_association: AuthorAssociation,
    /// Whether the PR is still a draft
    pub draft: bool,
    /// Labels currently applied
    pub labels: Vec<Label>,
    /// When the PR was created
    pub created_at: DateTime<Utc>,
    /// When the PR was last updated
    pub updated_at: DateTime<Utc>,
    /// Browser URL
    pub html_url: String,
    /// Owning repository
    pub repo: RepoRef,
}

impl PullRequest {
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l.name == name)
    }
}

/// Category of reviewer activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    IssueComment,
    ReviewComment,
    Review,
}

/// A single comment or review on a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub kind: ActivityKind,
    pub actor: Actor,
    pub association: AuthorAssociation,
    pub at: DateTime<Utc>,
}

/// Logins of the reviewing working group
///
/// Lookups are case-insensitive, matching how GitHub treats logins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamMembers {
    logins: HashSet<String>,
}

impl TeamMembers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, login: &str) {
        self.logins.insert(login.to_ascii_lowercase());
    }

    pub fn contains(&self, login: &str) -> bool {
        self.logins.contains(&login.to_ascii_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.logins.is_empty()
    }

    pub fn len(&self) -> usize {
        self.logins.len()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TeamMembers {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut members = TeamMembers::new();
        for login in iter {
            members.insert(login.as_ref());
        }
        members
    }
}
