//! Zoilist Core - Core library for the Zoilist API review bot
//!
//! This crate holds everything that does not talk to the network directly:
//! the pull request data model, activity attribution, digest formatting,
//! the event notifier and reminder job, and the `ReviewSource`/`Messenger`
//! seams that the GitHub and Slack crates plug into.

pub mod attribution;
pub mod config;
pub mod digest;
pub mod error;
pub mod model;
pub mod notifier;
pub mod quiet;
pub mod reminder;
pub mod secrets;
pub mod source;
pub mod text;

pub use attribution::{attribute, latest_activity, merge_activity, ActivityFilter, Attribution};
pub use config::{Config, QuerySet, ReminderConfig, ReviewConfig, SlackConfig, TeamConfig};
pub use digest::{Digest, DigestLine, DigestSection};
pub use error::{Error, Result};
pub use model::{
    Activity, ActivityKind, Actor, ActorKind, AuthorAssociation, Label, PullRequest, RepoRef,
    TeamMembers,
};
pub use notifier::{EventAction, Notifier, NotifyOutcome, PullRequestEvent};
pub use quiet::is_quiet_period;
pub use reminder::{ReminderJob, RunOutcome};
pub use secrets::Secrets;
pub use source::{Messenger, OutgoingMessage, ReviewSource};
