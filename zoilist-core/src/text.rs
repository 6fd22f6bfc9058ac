//! Slack markup helpers
//!
//! Slack treats `&`, `<` and `>` as control characters in message text, so
//! anything user-authored (PR titles) must pass through [`escape_html`]
//! before it is embedded in link markup.

use chrono::{DateTime, Utc};

/// Escape the three characters Slack reserves for markup
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Slack link markup. The label is used verbatim.
pub fn link(url: &str, label: &str) -> String {
    format!("<{}|{}>", url, label)
}

/// Link to a pull request labelled with its escaped title and number
pub fn pr_link(url: &str, title: &str, number: u64) -> String {
    link(url, &format!("{} (#{})", escape_html(title), number))
}

/// Slack date token rendered in the reader's locale, falling back to an ISO date
pub fn date_token(at: DateTime<Utc>) -> String {
    format!(
        "<!date^{}^{{date_short_pretty}}|{}>",
        at.timestamp(),
        at.format("%Y-%m-%d")
    )
}

/// Humanized age of `then` as seen from `now`
pub fn relative_time(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 60 {
        ago(minutes, "minute")
    } else if hours < 24 {
        ago(hours, "hour")
    } else if days < 14 {
        ago(days, "day")
    } else if days < 60 {
        ago(days / 7, "week")
    } else if days < 365 {
        ago(days / 30, "month")
    } else {
        ago(days / 365, "year")
    }
}

fn ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 11, 11, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("feat: add `Vec<T>` & <b>friends</b>"),
            "feat: add `Vec&lt;T&gt;` &amp; &lt;b&gt;friends&lt;/b&gt;"
        );
    }

    #[test]
    fn test_escape_html_does_not_double_escape() {
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
        assert_eq!(escape_html("plain \"quotes\" 'stay'"), "plain \"quotes\" 'stay'");
    }

    #[test]
    fn test_pr_link() {
        assert_eq!(
            pr_link("https://github.com/electron/electron/pull/1", "a < b", 1),
            "<https://github.com/electron/electron/pull/1|a &lt; b (#1)>"
        );
    }

    #[test]
    fn test_date_token() {
        let at = Utc.with_ymd_and_hms(2023, 11, 1, 8, 30, 0).unwrap();
        assert_eq!(
            date_token(at),
            format!("<!date^{}^{{date_short_pretty}}|2023-11-01>", at.timestamp())
        );
    }

    #[test]
    fn test_relative_time_units() {
        let now = now();
        assert_eq!(relative_time(now, now - Duration::seconds(30)), "just now");
        assert_eq!(relative_time(now, now - Duration::minutes(1)), "1 minute ago");
        assert_eq!(relative_time(now, now - Duration::minutes(45)), "45 minutes ago");
        assert_eq!(relative_time(now, now - Duration::hours(5)), "5 hours ago");
        assert_eq!(relative_time(now, now - Duration::days(1)), "1 day ago");
        assert_eq!(relative_time(now, now - Duration::days(13)), "13 days ago");
        assert_eq!(relative_time(now, now - Duration::days(21)), "3 weeks ago");
        assert_eq!(relative_time(now, now - Duration::days(90)), "3 months ago");
        assert_eq!(relative_time(now, now - Duration::days(800)), "2 years ago");
    }

    #[test]
    fn test_relative_time_future_is_just_now() {
        let now = now();
        assert_eq!(relative_time(now, now + Duration::hours(3)), "just now");
    }
}
