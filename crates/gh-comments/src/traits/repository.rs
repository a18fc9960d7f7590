//! Trait for repositories known to the current session.

use crate::traits::LookupError;
use async_trait::async_trait;
use std::path::Path;

/// A remote repository permalinks can point into.
///
/// Implement this trait to let the renderer expand permalinks into code
/// excerpts.
///
/// # Example
///
/// ```ignore
/// struct StaticRepository { content: String }
///
/// #[async_trait]
/// impl RemoteRepository for StaticRepository {
///     fn host(&self) -> &str { "github.com" }
///     fn owner(&self) -> &str { "octocat" }
///     fn repository_name(&self) -> &str { "hello-world" }
///
///     async fn get_lines(
///         &self,
///         _sha: &str,
///         _path: &str,
///         start_line: u32,
///         end_line: u32,
///     ) -> Result<Option<String>, LookupError> {
///         Ok(gh_client::slice_lines(&self.content, start_line, end_line))
///     }
/// }
/// ```
#[async_trait]
pub trait RemoteRepository: Send + Sync {
    /// Host the repository lives on (e.g., "github.com").
    fn host(&self) -> &str;

    /// Repository owner (user or organization).
    fn owner(&self) -> &str;

    /// Repository name.
    fn repository_name(&self) -> &str;

    /// Root of a local checkout of this repository, if any.
    fn local_root(&self) -> Option<&Path> {
        None
    }

    /// Fetch lines from a file at a specific commit.
    ///
    /// # Arguments
    /// * `sha` - The commit SHA to fetch from
    /// * `path` - File path relative to repository root
    /// * `start_line` - 1-indexed start line (inclusive)
    /// * `end_line` - 1-indexed end line (inclusive)
    ///
    /// # Returns
    /// The lines joined with `\n`, or `None` if the range is empty.
    async fn get_lines(
        &self,
        sha: &str,
        path: &str,
        start_line: u32,
        end_line: u32,
    ) -> Result<Option<String>, LookupError>;

    /// Whether this repository is `host/owner/name` (case-insensitive).
    fn is(&self, host: &str, owner: &str, name: &str) -> bool {
        self.host().eq_ignore_ascii_case(host)
            && self.owner().eq_ignore_ascii_case(owner)
            && self.repository_name().eq_ignore_ascii_case(name)
    }
}
