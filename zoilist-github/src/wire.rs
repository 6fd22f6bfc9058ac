//! Raw REST payloads and their conversion into core types
//!
//! Only the fields the bot reads are declared, so schema additions on
//! GitHub's side never break decoding.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use zoilist_core::{
    Activity, ActivityKind, Actor, ActorKind, AuthorAssociation, Label, PullRequest, RepoRef,
};

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawUser {
    pub login: String,
    #[serde(rename = "type", default)]
    pub kind: ActorKind,
}

impl From<RawUser> for Actor {
    fn from(user: RawUser) -> Self {
        Actor::new(user.login, user.kind)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawLabel {
    pub id: Option<u64>,
    pub name: String,
}

impl From<RawLabel> for Label {
    fn from(label: RawLabel) -> Self {
        Label::new(label.id, label.name)
    }
}

/// An item from `/search/issues`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawSearchItem {
    pub number: u64,
    pub title: String,
    pub user: Option<RawUser>,
    #[serde(default)]
    pub author_association: AuthorAssociation,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub labels: Vec<RawLabel>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub html_url: String,
    /// Present only when the item is a pull request
    pub pull_request: Option<serde_json::Value>,
}

impl RawSearchItem {
    /// Convert into a pull request, or `None` for plain issues
    ///
    /// Searches are always scoped with `repo:`, so the searched repository
    /// is the owning one.
    pub fn into_pull_request(self, repo: &RepoRef) -> Option<PullRequest> {
        self.pull_request.as_ref()?;

        Some(PullRequest {
            number: self.number,
            title: self.title,
            author: self.user.map(Actor::from).unwrap_or_else(ghost),
            author_association: self.author_association,
            draft: self.draft,
            labels: self.labels.into_iter().map(Label::from).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            html_url: self.html_url,
            repo: repo.clone(),
        })
    }
}

/// Issue comment or review comment
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawComment {
    pub user: Option<RawUser>,
    #[serde(default)]
    pub author_association: AuthorAssociation,
    pub created_at: DateTime<Utc>,
}

impl RawComment {
    pub fn into_activity(self, kind: ActivityKind) -> Option<Activity> {
        Some(Activity {
            kind,
            actor: self.user?.into(),
            association: self.author_association,
            at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawReview {
    pub user: Option<RawUser>,
    #[serde(default)]
    pub author_association: AuthorAssociation,
    /// Absent while the review is still pending
    pub submitted_at: Option<DateTime<Utc>>,
}

impl RawReview {
    pub fn into_activity(self) -> Option<Activity> {
        Some(Activity {
            kind: ActivityKind::Review,
            actor: self.user?.into(),
            association: self.author_association,
            at: self.submitted_at?,
        })
    }
}

/// Stand-in for deleted accounts, which GitHub reports as `null`
pub(crate) fn ghost() -> Actor {
    Actor::new("ghost", ActorKind::User)
}
