use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResult {
    pub total_posts: u64,
    pub total_comments: u64,
    pub last_login: Option<DateTime<Utc>>,
}

impl StatsResult {
    pub fn new(total_posts: u64, total_comments: u64, last_login: Option<DateTime<Utc>>) -> Self {
        Self {
            total_posts,
            total_comments,
            last_login,
        }
    }
}

impl fmt::Display for StatsResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total_posts={}, total_comments={}, last_login=",
            self.total_posts, self.total_comments
        )?;
        match self.last_login {
            Some(at) => write!(f, "{}", at.to_rfc3339()),
            None => f.write_str("never"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display_without_login() {
        let stats = StatsResult::new(15, 42, None);
        assert_eq!(
            stats.to_string(),
            "total_posts=15, total_comments=42, last_login=never"
        );
    }

    #[test]
    fn test_display_with_login() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let stats = StatsResult::new(1, 2, Some(at));
        assert_eq!(
            stats.to_string(),
            "total_posts=1, total_comments=2, last_login=2024-03-01T12:00:00+00:00"
        );
    }

    #[test]
    fn test_last_login_serializes_as_null() {
        let value = serde_json::to_value(StatsResult::default()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"total_posts": 0, "total_comments": 0, "last_login": null})
        );
    }
}
