//! GitHub API data transfer objects
//!
//! These types represent the data returned from the GitHub API.
//! They are intentionally separate from the comment model to keep this
//! crate pure and reusable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A GitHub account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login name (e.g., "octocat")
    pub login: String,
    /// Profile page URL (e.g., "https://github.com/octocat")
    pub html_url: String,
    /// Avatar image URL
    pub avatar_url: Option<String>,
}

/// Reaction counts attached to a comment
///
/// GitHub reports one counter per supported reaction content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionRollup {
    #[serde(rename = "+1", default)]
    pub plus_one: u32,
    #[serde(rename = "-1", default)]
    pub minus_one: u32,
    #[serde(default)]
    pub laugh: u32,
    #[serde(default)]
    pub hooray: u32,
    #[serde(default)]
    pub confused: u32,
    #[serde(default)]
    pub heart: u32,
    #[serde(default)]
    pub rocket: u32,
    #[serde(default)]
    pub eyes: u32,
}

impl ReactionRollup {
    /// Iterate over `(content, count)` pairs in GitHub's display order,
    /// skipping reactions nobody used.
    pub fn non_zero(&self) -> impl Iterator<Item = (&'static str, u32)> {
        [
            ("+1", self.plus_one),
            ("-1", self.minus_one),
            ("laugh", self.laugh),
            ("hooray", self.hooray),
            ("confused", self.confused),
            ("heart", self.heart),
            ("rocket", self.rocket),
            ("eyes", self.eyes),
        ]
        .into_iter()
        .filter(|(_, count)| *count > 0)
    }
}

/// A review comment on a pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewComment {
    /// GitHub comment ID
    pub id: u64,
    /// ID of the comment this one replies to (threads share the root ID)
    pub in_reply_to_id: Option<u64>,
    /// File path the comment is on
    pub path: String,
    /// Line number in the diff (for new code)
    pub line: Option<u32>,
    /// Original line number (for old code)
    pub original_line: Option<u32>,
    /// Which side of the diff: "LEFT" (deletions) or "RIGHT" (additions)
    pub side: Option<String>,
    /// Commit the comment was made on
    pub commit_id: String,
    /// Comment body text (raw markdown)
    pub body: String,
    /// Comment author, if the account still exists
    pub author: Option<User>,
    /// Reaction counts
    pub reactions: ReactionRollup,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
    /// When the comment was last updated
    pub updated_at: DateTime<Utc>,
    /// Comment URL for opening in browser
    pub html_url: String,
}

impl ReviewComment {
    /// ID of the thread this comment belongs to.
    pub fn thread_root_id(&self) -> u64 {
        self.in_reply_to_id.unwrap_or(self.id)
    }

    /// Whether the given login authored this comment.
    pub fn is_authored_by(&self, login: &str) -> bool {
        self.author
            .as_ref()
            .is_some_and(|author| author.login.eq_ignore_ascii_case(login))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_rollup_deserialize() {
        let json = r#"{"total_count": 3, "+1": 2, "heart": 1}"#;
        let rollup: ReactionRollup = serde_json::from_str(json).unwrap();
        assert_eq!(rollup.plus_one, 2);
        assert_eq!(rollup.heart, 1);
        assert_eq!(rollup.eyes, 0);
        assert_eq!(
            rollup.non_zero().collect::<Vec<_>>(),
            vec![("+1", 2), ("heart", 1)]
        );
    }

    #[test]
    fn test_thread_root_id() {
        let mut comment = ReviewComment {
            id: 7,
            in_reply_to_id: None,
            path: "src/lib.rs".to_string(),
            line: Some(3),
            original_line: None,
            side: Some("RIGHT".to_string()),
            commit_id: "abc".to_string(),
            body: "hello".to_string(),
            author: Some(User {
                login: "Octocat".to_string(),
                html_url: "https://github.com/Octocat".to_string(),
                avatar_url: None,
            }),
            reactions: ReactionRollup::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            html_url: String::new(),
        };
        assert_eq!(comment.thread_root_id(), 7);

        comment.in_reply_to_id = Some(3);
        assert_eq!(comment.thread_root_id(), 3);
        assert!(comment.is_authored_by("octocat"));
        assert!(!comment.is_authored_by("someone-else"));
    }
}
