//! Event notifier
//!
//! Reacts to a single pull request webhook delivery and posts at most one
//! alert. Send failures are returned to the caller untouched; whatever
//! dispatched the event decides how to report them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{Config, ReviewConfig, TeamConfig};
use crate::model::{Label, PullRequest};
use crate::quiet::is_quiet_period;
use crate::source::{Messenger, OutgoingMessage};
use crate::text::pr_link;
use crate::Result;

/// What happened to the pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventAction {
    Labeled,
    ReadyForReview,
    Other(String),
}

/// A `pull_request` webhook event, reduced to what the notifier needs
#[derive(Debug, Clone)]
pub struct PullRequestEvent {
    pub action: EventAction,
    /// The label that was just added (`labeled` only)
    pub label: Option<Label>,
    pub pull_request: PullRequest,
}

/// Result of handling one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    Sent,
    Ignored,
}

/// Whether `label` is the API review label. IDs win when both sides have one.
pub fn is_review_label(review: &ReviewConfig, label: &Label) -> bool {
    match (review.label_id, label.id) {
        (Some(expected), Some(actual)) => expected == actual,
        _ => label.name == review.label,
    }
}

/// Whether the event warrants an alert
pub fn should_notify(event: &PullRequestEvent, review: &ReviewConfig) -> bool {
    match event.action {
        EventAction::Labeled => {
            !event.pull_request.draft
                && event
                    .label
                    .as_ref()
                    .is_some_and(|label| is_review_label(review, label))
        }
        EventAction::ReadyForReview => event
            .pull_request
            .labels
            .iter()
            .any(|label| is_review_label(review, label)),
        EventAction::Other(_) => false,
    }
}

/// Alert text for a pull request
pub fn compose_alert(pr: &PullRequest, team: &TeamConfig, now: DateTime<Utc>) -> String {
    format!(
        "Hey {}! Just letting you know that the following PR needs API review:\n*{}*",
        team.addressee(is_quiet_period(now)),
        pr_link(&pr.html_url, &pr.title, pr.number)
    )
}

/// Posts API review alerts for pull request events
pub struct Notifier<M> {
    messenger: M,
    config: Config,
}

impl<M: Messenger> Notifier<M> {
    pub fn new(messenger: M, config: Config) -> Self {
        Self { messenger, config }
    }

    /// Handle one event, sending zero or one message
    pub async fn handle(
        &self,
        event: &PullRequestEvent,
        now: DateTime<Utc>,
    ) -> Result<NotifyOutcome> {
        let pr = &event.pull_request;

        if !should_notify(event, &self.config.review) {
            debug!(number = pr.number, action = ?event.action, "Event does not need an alert");
            return Ok(NotifyOutcome::Ignored);
        }

        let text = compose_alert(pr, &self.config.team, now);
        let message = OutgoingMessage::new(&self.config.slack.channel, text);
        self.messenger.post(&message).await?;

        info!(
            repo = %pr.repo,
            number = pr.number,
            channel = %self.config.slack.channel,
            "Posted API review alert"
        );

        Ok(NotifyOutcome::Sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Actor, AuthorAssociation, RepoRef};
    use crate::Error;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingMessenger {
        sent: Mutex<Vec<OutgoingMessage>>,
        fail: bool,
    }

    impl RecordingMessenger {
        fn sent(&self) -> Vec<OutgoingMessage> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Messenger for RecordingMessenger {
        async fn post(&self, message: &OutgoingMessage) -> Result<()> {
            if self.fail {
                return Err(Error::Messaging("channel_not_found".to_string()));
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    const REVIEW_LABEL: &str = "api-review/requested 🗳";

    fn november() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 11, 11, 0, 0, 0).unwrap()
    }

    fn december() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 12, 25, 0, 0, 0).unwrap()
    }

    fn pr(draft: bool, labels: &[&str]) -> PullRequest {
        PullRequest {
            number: 38982,
            title: "feat: add `BrowserWindow.isOccluded()`".to_string(),
            author: Actor::user("codebytere"),
            author_association: AuthorAssociation::Member,
            draft,
            labels: labels.iter().map(|l| Label::named(*l)).collect(),
            created_at: november(),
            updated_at: november(),
            html_url: "https://github.com/electron/electron/pull/38982".to_string(),
            repo: RepoRef::new("electron", "electron"),
        }
    }

    fn labeled(label: Label, draft: bool) -> PullRequestEvent {
        PullRequestEvent {
            action: EventAction::Labeled,
            label: Some(label),
            pull_request: pr(draft, &[]),
        }
    }

    fn review_label() -> Label {
        Label::new(Some(1603621692), REVIEW_LABEL)
    }

    #[tokio::test]
    async fn test_review_label_posts_alert() {
        let messenger = RecordingMessenger::default();
        let notifier = Notifier::new(&messenger, Config::default());

        let outcome = notifier.handle(&labeled(review_label(), false), november()).await.unwrap();

        assert_eq!(outcome, NotifyOutcome::Sent);
        assert_eq!(
            messenger.sent(),
            vec![OutgoingMessage {
                channel: "#wg-api".to_string(),
                unfurl_links: false,
                text: "Hey <!subteam^SNSJW1BA9>! Just letting you know that the following PR needs API review:\n\
                       *<https://github.com/electron/electron/pull/38982|feat: add `BrowserWindow.isOccluded()` (#38982)>*"
                    .to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_quiet_period_uses_plain_group_name() {
        let messenger = RecordingMessenger::default();
        let notifier = Notifier::new(&messenger, Config::default());

        notifier.handle(&labeled(review_label(), false), december()).await.unwrap();

        let sent = messenger.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].text.starts_with("Hey API WG! Just letting you know"));
        assert!(!sent[0].text.contains("<!subteam^"));
    }

    #[tokio::test]
    async fn test_other_label_is_ignored() {
        let messenger = RecordingMessenger::default();
        let notifier = Notifier::new(&messenger, Config::default());
        let label = Label {
            id: Some(42),
            name: "semver/patch".to_string(),
        };

        let outcome = notifier.handle(&labeled(label, false), november()).await.unwrap();

        assert_eq!(outcome, NotifyOutcome::Ignored);
        assert!(messenger.sent().is_empty());
    }

    #[tokio::test]
    async fn test_draft_is_ignored() {
        let messenger = RecordingMessenger::default();
        let notifier = Notifier::new(&messenger, Config::default());

        let outcome = notifier.handle(&labeled(review_label(), true), november()).await.unwrap();

        assert_eq!(outcome, NotifyOutcome::Ignored);
        assert!(messenger.sent().is_empty());
    }

    #[tokio::test]
    async fn test_ready_for_review_requires_label() {
        let messenger = RecordingMessenger::default();
        let notifier = Notifier::new(&messenger, Config::default());

        let with_label = PullRequestEvent {
            action: EventAction::ReadyForReview,
            label: None,
            pull_request: pr(false, &["semver/minor", REVIEW_LABEL]),
        };
        let without_label = PullRequestEvent {
            action: EventAction::ReadyForReview,
            label: None,
            pull_request: pr(false, &["semver/minor"]),
        };

        assert_eq!(
            notifier.handle(&without_label, november()).await.unwrap(),
            NotifyOutcome::Ignored
        );
        assert_eq!(
            notifier.handle(&with_label, november()).await.unwrap(),
            NotifyOutcome::Sent
        );
        assert_eq!(messenger.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_renamed_label_matches_both_triggers() {
        let messenger = RecordingMessenger::default();
        let notifier = Notifier::new(&messenger, Config::default());
        let renamed = Label::new(Some(1603621692), "api-review/requested");

        let added = labeled(renamed.clone(), false);
        let mut ready = PullRequestEvent {
            action: EventAction::ReadyForReview,
            label: None,
            pull_request: pr(false, &["semver/minor"]),
        };
        ready.pull_request.labels.push(renamed);

        assert_eq!(notifier.handle(&added, november()).await.unwrap(), NotifyOutcome::Sent);
        assert_eq!(notifier.handle(&ready, november()).await.unwrap(), NotifyOutcome::Sent);
        assert_eq!(messenger.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_ready_for_review_ignores_same_name_other_id() {
        let messenger = RecordingMessenger::default();
        let notifier = Notifier::new(&messenger, Config::default());
        let mut event = PullRequestEvent {
            action: EventAction::ReadyForReview,
            label: None,
            pull_request: pr(false, &[]),
        };
        event.pull_request.labels.push(Label::new(Some(7), REVIEW_LABEL));

        assert_eq!(
            notifier.handle(&event, november()).await.unwrap(),
            NotifyOutcome::Ignored
        );
    }

    #[tokio::test]
    async fn test_other_actions_are_ignored() {
        let messenger = RecordingMessenger::default();
        let notifier = Notifier::new(&messenger, Config::default());
        let event = PullRequestEvent {
            action: EventAction::Other("opened".to_string()),
            label: None,
            pull_request: pr(false, &[REVIEW_LABEL]),
        };

        assert_eq!(
            notifier.handle(&event, november()).await.unwrap(),
            NotifyOutcome::Ignored
        );
    }

    #[tokio::test]
    async fn test_send_failure_propagates() {
        let messenger = RecordingMessenger {
            fail: true,
            ..Default::default()
        };
        let notifier = Notifier::new(&messenger, Config::default());

        let result = notifier.handle(&labeled(review_label(), false), november()).await;
        assert!(matches!(result, Err(Error::Messaging(_))));
    }

    #[test]
    fn test_title_is_escaped() {
        let mut pr = pr(false, &[]);
        pr.title = "fix: <webview> & friends".to_string();
        let text = compose_alert(&pr, &TeamConfig::default(), november());
        assert!(text.contains("|fix: &lt;webview&gt; &amp; friends (#38982)>"));
    }

    #[test]
    fn test_label_matching() {
        let review = ReviewConfig::default();
        // Renamed label, same ID
        assert!(is_review_label(
            &review,
            &Label {
                id: Some(1603621692),
                name: "api-review/requested".to_string(),
            }
        ));
        // Name match without an ID on the event
        assert!(is_review_label(
            &review,
            &Label {
                id: None,
                name: REVIEW_LABEL.to_string(),
            }
        ));
        // Same name, different ID
        assert!(!is_review_label(
            &review,
            &Label {
                id: Some(7),
                name: REVIEW_LABEL.to_string(),
            }
        ));
    }
}
