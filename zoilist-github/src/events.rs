//! Webhook payloads
//!
//! Decodes `pull_request` deliveries into the notifier's event type. Other
//! event names are not errors; they are simply not ours to handle.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;
use zoilist_core::{
    Actor, AuthorAssociation, EventAction, Label, PullRequest, PullRequestEvent, RepoRef,
};

use crate::wire::{ghost, RawLabel, RawUser};
use crate::{Error, Result};

/// Webhook event name for pull request deliveries
pub const PULL_REQUEST_EVENT: &str = "pull_request";

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    action: String,
    label: Option<RawLabel>,
    pull_request: PullRequestData,
    repository: RepositoryData,
}

#[derive(Debug, Deserialize)]
struct PullRequestData {
    number: u64,
    title: String,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    labels: Vec<RawLabel>,
    user: Option<RawUser>,
    #[serde(default)]
    author_association: AuthorAssociation,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct RepositoryData {
    full_name: String,
}

fn action_from(action: &str) -> EventAction {
    match action {
        "labeled" => EventAction::Labeled,
        "ready_for_review" => EventAction::ReadyForReview,
        other => EventAction::Other(other.to_string()),
    }
}

impl PullRequestPayload {
    fn into_event(self) -> Result<PullRequestEvent> {
        let repo = RepoRef::parse(&self.repository.full_name)
            .map_err(|e| Error::Parse(e.to_string()))?;
        let pr = self.pull_request;

        Ok(PullRequestEvent {
            action: action_from(&self.action),
            label: self.label.map(Label::from),
            pull_request: PullRequest {
                number: pr.number,
                title: pr.title,
                author: pr.user.map(Actor::from).unwrap_or_else(ghost),
                author_association: pr.author_association,
                draft: pr.draft,
                labels: pr.labels.into_iter().map(Label::from).collect(),
                created_at: pr.created_at,
                updated_at: pr.updated_at,
                html_url: pr.html_url,
                repo,
            },
        })
    }
}

/// Decode a webhook delivery
///
/// Returns `Ok(None)` for events other than `pull_request`.
pub fn parse_event(name: &str, body: &[u8]) -> Result<Option<PullRequestEvent>> {
    if name != PULL_REQUEST_EVENT {
        debug!(event = name, "Ignoring non pull_request event");
        return Ok(None);
    }

    let payload: PullRequestPayload = serde_json::from_slice(body)?;
    payload.into_event().map(Some)
}
