//! Configuration management for Zoilist
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (ZOILIST_*)
//! 3. Config file (~/.config/zoilist/config.toml)
//! 4. Default values
//!
//! The defaults reproduce the production Electron deployment, so an empty
//! config file is a valid config file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::RepoRef;
use crate::{Error, Result};

/// Slack-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SlackConfig {
    /// Channel alerts and digests are posted to
    pub channel: String,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            channel: "#wg-api".to_string(),
        }
    }
}

/// The reviewing working group
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TeamConfig {
    /// GitHub organization owning the team
    pub org: String,
    /// GitHub team slug
    pub slug: String,
    /// Slack user group ID used for the broadcast mention
    pub mention_id: String,
    /// Plain name used when the group must not be pinged
    pub display_name: String,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            org: "electron".to_string(),
            slug: "wg-api".to_string(),
            mention_id: "SNSJW1BA9".to_string(),
            display_name: "API WG".to_string(),
        }
    }
}

impl TeamConfig {
    /// How to address the group: a mention, or just its name when quiet
    pub fn addressee(&self, quiet: bool) -> String {
        if quiet {
            self.display_name.clone()
        } else {
            format!("<!subteam^{}>", self.mention_id)
        }
    }
}

/// The label that marks a pull request as needing API review
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Label name
    pub label: String,
    /// Label ID; survives renames, so it wins over the name when present
    pub label_id: Option<u64>,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            label: "api-review/requested 🗳".to_string(),
            label_id: Some(1603621692),
        }
    }
}

/// One tracked search in the reminder digest
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuerySet {
    /// Repository the search is scoped to (owner/repo)
    pub repo: String,
    /// Search qualifiers, without the `repo:` scope
    pub query: String,
    /// What the matches are called in the heading ("PRs", "RFCs")
    #[serde(default = "default_noun")]
    pub noun: String,
    /// What the matches are waiting for ("API review")
    #[serde(default = "default_awaiting")]
    pub awaiting: String,
}

fn default_noun() -> String {
    "PRs".to_string()
}

fn default_awaiting() -> String {
    "review".to_string()
}

impl QuerySet {
    pub fn repo_ref(&self) -> Result<RepoRef> {
        RepoRef::parse(&self.repo)
    }

    /// The same search on github.com, for humans
    pub fn search_url(&self) -> String {
        let base = format!("https://github.com/{}/pulls", self.repo);
        match url::Url::parse_with_params(&base, &[("q", self.query.as_str())]) {
            Ok(url) => url.to_string(),
            Err(_) => base,
        }
    }

    /// Section heading for the digest
    pub fn heading(&self) -> String {
        format!(
            ":blob-wave: *Reminder:* the <{}|following {}> are awaiting {}.",
            self.search_url(),
            self.noun,
            self.awaiting
        )
    }
}

/// Reminder job configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReminderConfig {
    /// Tracked searches, in digest order
    pub queries: Vec<QuerySet>,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            queries: vec![
                QuerySet {
                    repo: "electron/electron".to_string(),
                    query: r#"is:pr is:open -is:draft label:"api-review/requested 🗳" -label:"api-review/approved ✅" -label:"wip ⚒""#.to_string(),
                    noun: "PRs".to_string(),
                    awaiting: "API review".to_string(),
                },
                QuerySet {
                    repo: "electron/rfcs".to_string(),
                    query: r#"is:pr is:open -is:draft label:"pending-review""#.to_string(),
                    noun: "RFCs".to_string(),
                    awaiting: "review".to_string(),
                },
            ],
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub slack: SlackConfig,
    pub team: TeamConfig,
    pub review: ReviewConfig,
    pub reminder: ReminderConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/zoilist/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("zoilist").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - ZOILIST_SLACK_CHANNEL: Channel to post to
    /// - ZOILIST_REVIEW_LABEL: API review label name (disables ID matching and
    ///   rewrites the label in reminder queries)
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(channel) = std::env::var("ZOILIST_SLACK_CHANNEL") {
            self.slack.channel = channel;
        }

        if let Ok(label) = std::env::var("ZOILIST_REVIEW_LABEL") {
            self = self.with_label(label);
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, channel: Option<String>) -> Self {
        if let Some(channel) = channel {
            self.slack.channel = channel;
        }

        self
    }

    /// Swap the review label everywhere it is used, including the
    /// `label:"..."` qualifiers of the reminder queries
    fn with_label(mut self, label: String) -> Self {
        if label != self.review.label {
            let from = format!("label:\"{}\"", self.review.label);
            let to = format!("label:\"{}\"", label);
            for query in &mut self.reminder.queries {
                query.query = query.query.replace(&from, &to);
            }
            self.review.label = label;
            self.review.label_id = None;
        }
        self
    }

    /// Check the pieces that cannot be defaulted sensibly
    pub fn validate(&self) -> Result<()> {
        if self.slack.channel.trim().is_empty() {
            return Err(Error::Config("slack.channel must not be empty".to_string()));
        }
        for query in &self.reminder.queries {
            query.repo_ref()?;
        }
        Ok(())
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(channel: Option<String>) -> Result<Self> {
        let config = Self::load()?
            .with_env_overrides()
            .with_cli_overrides(channel);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.slack.channel, "#wg-api");
        assert_eq!(config.team.slug, "wg-api");
        assert_eq!(config.review.label_id, Some(1603621692));
        assert_eq!(config.reminder.queries.len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_addressee() {
        let team = TeamConfig::default();
        assert_eq!(team.addressee(false), "<!subteam^SNSJW1BA9>");
        assert_eq!(team.addressee(true), "API WG");
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::default().with_cli_overrides(Some("#test-channel".to_string()));
        assert_eq!(config.slack.channel, "#test-channel");
    }

    #[test]
    fn test_label_override_drops_id() {
        let config = Config::default().with_label("needs-api-review".to_string());
        assert_eq!(config.review.label, "needs-api-review");
        assert!(config.review.label_id.is_none());
    }

    #[test]
    fn test_label_override_rewrites_reminder_query() {
        let config = Config::default().with_label("needs-api-review".to_string());
        let query = &config.reminder.queries[0].query;
        assert!(query.contains(r#" label:"needs-api-review" "#));
        assert!(!query.contains("api-review/requested"));
        assert!(query.contains(r#"-label:"api-review/approved ✅""#));
        // Queries without the old label are left alone
        assert_eq!(
            config.reminder.queries[1].query,
            r#"is:pr is:open -is:draft label:"pending-review""#
        );
    }

    #[test]
    fn test_search_url_and_heading() {
        let query = QuerySet {
            repo: "electron/rfcs".to_string(),
            query: "is:pr is:open".to_string(),
            noun: "RFCs".to_string(),
            awaiting: "review".to_string(),
        };
        assert_eq!(
            query.search_url(),
            "https://github.com/electron/rfcs/pulls?q=is%3Apr+is%3Aopen"
        );
        assert_eq!(
            query.heading(),
            ":blob-wave: *Reminder:* the <https://github.com/electron/rfcs/pulls?q=is%3Apr+is%3Aopen|following RFCs> are awaiting review."
        );
    }

    #[test]
    fn test_parse_toml() {
        let toml = r##"
[slack]
channel = "#api-bots"

[team]
mention_id = "S123"

[[reminder.queries]]
repo = "electron/electron"
query = "is:pr is:open label:\"api-review/requested 🗳\""
awaiting = "API review"
"##;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.slack.channel, "#api-bots");
        assert_eq!(config.team.mention_id, "S123");
        // Unset team fields keep their defaults
        assert_eq!(config.team.display_name, "API WG");
        assert_eq!(config.reminder.queries.len(), 1);
        assert_eq!(config.reminder.queries[0].noun, "PRs");
    }

    #[test]
    fn test_validate_rejects_bad_repo() {
        let mut config = Config::default();
        config.reminder.queries[0].repo = "not-a-repo".to_string();
        assert!(config.validate().is_err());
    }
}
