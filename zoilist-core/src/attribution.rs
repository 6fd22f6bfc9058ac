//! Activity attribution
//!
//! Given every comment and review on a pull request, find the most recent
//! interaction by someone on the reviewing team. Each exclusion rule is a
//! separate [`ActivityFilter`] so it can be exercised on its own.

use chrono::{DateTime, Utc};

use crate::model::{Activity, PullRequest, TeamMembers};

/// Predicate that disqualifies an activity from attribution
#[derive(Debug, Clone, Copy)]
pub enum ActivityFilter<'a> {
    /// Drop activity from bots and other non-human accounts
    NonHuman,
    /// Drop activity by the given login (the PR author)
    Author(&'a str),
    /// Drop activity by anyone outside the team
    NonMember(&'a TeamMembers),
}

impl ActivityFilter<'_> {
    /// Whether this filter disqualifies `activity`
    pub fn rejects(&self, activity: &Activity) -> bool {
        match self {
            ActivityFilter::NonHuman => !activity.actor.is_human(),
            ActivityFilter::Author(login) => activity.actor.is(login),
            ActivityFilter::NonMember(members) => !members.contains(&activity.actor.login),
        }
    }
}

/// Who last reviewed a pull request, and when
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribution {
    pub reviewer: String,
    pub at: DateTime<Utc>,
}

/// Merge the three activity categories into one chronological list
///
/// The sort is stable, so same-instant events keep category order
/// (issue comments, then review comments, then reviews).
pub fn merge_activity(
    issue_comments: Vec<Activity>,
    review_comments: Vec<Activity>,
    reviews: Vec<Activity>,
) -> Vec<Activity> {
    let mut merged = issue_comments;
    merged.extend(review_comments);
    merged.extend(reviews);
    merged.sort_by_key(|a| a.at);
    merged
}

/// Most recent activity that no filter rejects
///
/// On equal timestamps the first candidate seen wins.
pub fn latest_activity<'a>(
    candidates: &'a [Activity],
    filters: &[ActivityFilter<'_>],
) -> Option<&'a Activity> {
    let mut latest: Option<&Activity> = None;
    for activity in candidates {
        if filters.iter().any(|f| f.rejects(activity)) {
            continue;
        }
        match latest {
            Some(current) if activity.at <= current.at => {}
            _ => latest = Some(activity),
        }
    }
    latest
}

/// Attribute a pull request to the team member who last touched it
pub fn attribute(
    pr: &PullRequest,
    candidates: &[Activity],
    members: &TeamMembers,
) -> Option<Attribution> {
    let filters = [
        ActivityFilter::NonHuman,
        ActivityFilter::Author(&pr.author.login),
        ActivityFilter::NonMember(members),
    ];

    latest_activity(candidates, &filters).map(|a| Attribution {
        reviewer: a.actor.login.clone(),
        at: a.at,
    })
}
