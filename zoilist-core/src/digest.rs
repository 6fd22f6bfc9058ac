//! Reminder digest formatting

use chrono::{DateTime, Utc};

use crate::attribution::Attribution;
use crate::model::PullRequest;
use crate::text::{date_token, pr_link, relative_time};

/// Separator between query set sections
const SECTION_SEPARATOR: &str = "\n\n";

/// One pull request in the digest
#[derive(Debug, Clone)]
pub struct DigestLine {
    pub pr: PullRequest,
    pub attribution: Option<Attribution>,
}

impl DigestLine {
    pub fn new(pr: PullRequest, attribution: Option<Attribution>) -> Self {
        Self { pr, attribution }
    }

    /// Render as a Slack bullet, with ages relative to `now`
    pub fn render(&self, now: DateTime<Utc>) -> String {
        let mut line = format!(
            "• *{}*",
            pr_link(&self.pr.html_url, &self.pr.title, self.pr.number)
        );

        if let Some(badge) = self.pr.author_association.badge() {
            line.push_str(&format!(" _({})_", badge));
        }

        match &self.attribution {
            Some(attribution) => line.push_str(&format!(
                " — last reviewed by `{}` {} ({})",
                attribution.reviewer,
                relative_time(now, attribution.at),
                date_token(attribution.at)
            )),
            None => line.push_str(&format!(
                " — awaiting review since {} ({})",
                relative_time(now, self.pr.created_at),
                date_token(self.pr.created_at)
            )),
        }

        line
    }
}

/// Lines gathered for one query set, under a heading
#[derive(Debug, Clone)]
pub struct DigestSection {
    pub heading: String,
    pub lines: Vec<DigestLine>,
}

impl DigestSection {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            lines: Vec::new(),
        }
    }

    pub fn push(&mut self, line: DigestLine) {
        self.lines.push(line);
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn render(&self, now: DateTime<Utc>) -> String {
        let mut text = self.heading.clone();
        for line in &self.lines {
            text.push('\n');
            text.push_str(&line.render(now));
        }
        text
    }
}

/// The full reminder message
#[derive(Debug, Clone, Default)]
pub struct Digest {
    pub sections: Vec<DigestSection>,
}

impl Digest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, section: DigestSection) {
        self.sections.push(section);
    }

    /// True when no section has anything to report
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(DigestSection::is_empty)
    }

    /// Total number of pull requests across all sections
    pub fn line_count(&self) -> usize {
        self.sections.iter().map(|s| s.lines.len()).sum()
    }

    /// Render non-empty sections, separated by a blank line
    pub fn render(&self, now: DateTime<Utc>) -> String {
        self.sections
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.render(now))
            .collect::<Vec<_>>()
            .join(SECTION_SEPARATOR)
    }
}
