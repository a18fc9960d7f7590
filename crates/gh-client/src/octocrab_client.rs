//! Octocrab-based GitHub API client
//!
//! Direct implementation of the `GitHubClient` trait using the octocrab library.

use crate::client::GitHubClient;
use crate::types::{ReactionRollup, ReviewComment, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Direct GitHub API client using octocrab
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
}

impl OctocrabClient {
    /// Create a new client with the given octocrab instance
    ///
    /// The instance decides the API base URL (github.com or an Enterprise host).
    pub fn new(octocrab: Arc<Octocrab>) -> Self {
        Self { octocrab }
    }
}

/// Query parameters for paginated list endpoints
#[derive(Debug, Serialize)]
struct PageParams {
    per_page: u8,
    page: u32,
}

/// Review comment as returned by `GET /repos/{owner}/{repo}/pulls/{n}/comments`
#[derive(Debug, Deserialize)]
struct ApiReviewComment {
    id: u64,
    in_reply_to_id: Option<u64>,
    path: String,
    line: Option<u32>,
    original_line: Option<u32>,
    side: Option<String>,
    commit_id: String,
    body: String,
    user: Option<ApiUser>,
    #[serde(default)]
    reactions: ReactionRollup,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct ApiUser {
    login: String,
    html_url: String,
    avatar_url: Option<String>,
}

impl From<ApiUser> for User {
    fn from(user: ApiUser) -> Self {
        Self {
            login: user.login,
            html_url: user.html_url,
            avatar_url: user.avatar_url,
        }
    }
}

#[async_trait]
impl GitHubClient for OctocrabClient {
    async fn fetch_review_comments(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<Vec<ReviewComment>> {
        debug!("Fetching review comments for {}/{}#{}", owner, repo, pr_number);

        const PER_PAGE: u8 = 100;
        let route = format!("/repos/{}/{}/pulls/{}/comments", owner, repo, pr_number);
        let mut comments = Vec::new();
        let mut page = 1u32;

        loop {
            let params = PageParams {
                per_page: PER_PAGE,
                page,
            };
            let items: Vec<ApiReviewComment> = self.octocrab.get(&route, Some(&params)).await?;
            let last_page = items.len() < PER_PAGE as usize;

            comments.extend(items.into_iter().map(convert_review_comment));

            if last_page {
                break;
            }
            page += 1;
        }

        // Stable ordering: oldest first, ties broken by ID
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        debug!(
            "Fetched {} review comments for {}/{}#{}",
            comments.len(),
            owner,
            repo,
            pr_number
        );
        Ok(comments)
    }

    async fn fetch_file_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> anyhow::Result<Option<String>> {
        debug!("Fetching {} from {}/{} @ {}", path, owner, repo, reference);

        let items = self
            .octocrab
            .repos(owner, repo)
            .get_content()
            .path(path)
            .r#ref(reference)
            .send()
            .await?;

        // A file path yields exactly one item; directories yield their listing.
        if items.items.len() != 1 {
            return Ok(None);
        }

        Ok(items
            .items
            .into_iter()
            .next()
            .and_then(|item| item.decoded_content()))
    }

    async fn fetch_current_user(&self) -> anyhow::Result<User> {
        let author = self.octocrab.current().user().await?;
        Ok(User {
            login: author.login,
            html_url: author.html_url.to_string(),
            avatar_url: Some(author.avatar_url.to_string()),
        })
    }
}

/// Convert the API representation into our DTO
fn convert_review_comment(comment: ApiReviewComment) -> ReviewComment {
    ReviewComment {
        id: comment.id,
        in_reply_to_id: comment.in_reply_to_id,
        path: comment.path,
        line: comment.line,
        original_line: comment.original_line,
        side: comment.side,
        commit_id: comment.commit_id,
        body: comment.body,
        author: comment.user.map(User::from),
        reactions: comment.reactions,
        created_at: comment.created_at,
        updated_at: comment.updated_at,
        html_url: comment.html_url,
    }
}
