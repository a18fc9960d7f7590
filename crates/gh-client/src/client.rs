//! GitHub client trait definition
//!
//! This module defines the core `GitHubClient` trait that all client
//! implementations must satisfy.

use crate::types::{ReviewComment, User};
use async_trait::async_trait;

/// GitHub API client trait
///
/// Defines the subset of the GitHub API needed to render review comments.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks and threads.
///
/// # Example
///
/// ```rust,ignore
/// use gh_client::{GitHubClient, ReviewComment};
///
/// async fn list(client: &dyn GitHubClient) -> anyhow::Result<Vec<ReviewComment>> {
///     client.fetch_review_comments("rust-lang", "rust", 1).await
/// }
/// ```
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// Fetch review comments for a pull request
    ///
    /// Returns all review comments (line comments) on a PR, oldest first.
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner
    /// * `repo` - Repository name
    /// * `pr_number` - Pull request number
    async fn fetch_review_comments(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<Vec<ReviewComment>>;

    /// Fetch the decoded contents of a file at a given reference
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner
    /// * `repo` - Repository name
    /// * `path` - File path relative to repository root
    /// * `reference` - Commit SHA, branch or tag
    ///
    /// # Returns
    ///
    /// `None` if the path exists but has no decodable text content
    /// (e.g. a directory or a binary blob).
    async fn fetch_file_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> anyhow::Result<Option<String>>;

    /// Fetch the authenticated user
    async fn fetch_current_user(&self) -> anyhow::Result<User>;
}

/// Extract the 1-indexed, inclusive line range `start..=end` from `content`.
///
/// Returns `None` when the range is empty or starts past the end of the file.
/// A range running past the end is truncated.
pub fn slice_lines(content: &str, start_line: u32, end_line: u32) -> Option<String> {
    if start_line == 0 || end_line < start_line {
        return None;
    }

    let lines: Vec<&str> = content
        .lines()
        .skip((start_line - 1) as usize)
        .take((end_line - start_line + 1) as usize)
        .collect();

    if lines.is_empty() {
        return None;
    }

    Some(lines.join("\n"))
}
