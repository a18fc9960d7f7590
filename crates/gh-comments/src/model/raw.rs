//! Comment snapshots as received from the hosting service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account that authored or reacted to a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentUser {
    /// Login name (e.g., "octocat").
    pub login: String,
    /// Profile URL (e.g., "https://github.com/octocat").
    pub url: String,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Name to show instead of the login (bots, apps).
    #[serde(default)]
    pub special_display_name: Option<String>,
}

impl CommentUser {
    /// Name shown in the comment header.
    pub fn display_name(&self) -> &str {
        self.special_display_name.as_deref().unwrap_or(&self.login)
    }
}

/// A reaction with its count, as reported by the hosting service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    /// Reaction glyph (e.g., "👍").
    pub label: String,
    pub count: u32,
    #[serde(default)]
    pub viewer_has_reacted: bool,
    /// Logins of the users who reacted.
    #[serde(default)]
    pub reactors: Vec<String>,
}

/// Immutable snapshot of a review comment.
///
/// Updates replace the snapshot wholesale; it is never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawComment {
    pub id: u64,
    /// Raw markdown body.
    pub body: String,
    /// Author, absent for deleted accounts.
    #[serde(default)]
    pub user: Option<CommentUser>,
    pub created_at: DateTime<Utc>,
    /// Part of a pending (unsubmitted) review.
    #[serde(default)]
    pub is_draft: bool,
    #[serde(default)]
    pub can_edit: bool,
    #[serde(default)]
    pub can_delete: bool,
    #[serde(default)]
    pub reactions: Option<Vec<Reaction>>,
    /// Note appended in italics below the body (e.g., "Posted by a bot on behalf of ...").
    #[serde(default)]
    pub special_display_body_postfix: Option<String>,
}
