//! Adapters between the GitHub API client and the comment model.

use crate::model::{label_for_content, CommentUser, RawComment, Reaction};
use crate::traits::{LookupError, RemoteRepository};
use async_trait::async_trait;
use gh_client::{slice_lines, GitHubClient, ReviewComment, User};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A GitHub repository whose file contents are fetched through a
/// [`GitHubClient`].
pub struct GitHubRepository {
    client: Arc<dyn GitHubClient>,
    host: String,
    owner: String,
    name: String,
    local_root: Option<PathBuf>,
}

impl GitHubRepository {
    pub fn new(
        client: Arc<dyn GitHubClient>,
        host: impl Into<String>,
        owner: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            client,
            host: host.into(),
            owner: owner.into(),
            name: name.into(),
            local_root: None,
        }
    }

    /// Local checkout of the repository, used for `file://` links.
    pub fn with_local_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.local_root = Some(root.into());
        self
    }
}

#[async_trait]
impl RemoteRepository for GitHubRepository {
    fn host(&self) -> &str {
        &self.host
    }

    fn owner(&self) -> &str {
        &self.owner
    }

    fn repository_name(&self) -> &str {
        &self.name
    }

    fn local_root(&self) -> Option<&Path> {
        self.local_root.as_deref()
    }

    async fn get_lines(
        &self,
        sha: &str,
        path: &str,
        start_line: u32,
        end_line: u32,
    ) -> Result<Option<String>, LookupError> {
        let contents = self
            .client
            .fetch_file_contents(&self.owner, &self.name, path, sha)
            .await
            .map_err(|e| LookupError::Network(format!("{:#}", e)))?;

        let Some(contents) = contents else {
            return Err(LookupError::NotFound(format!("{}@{}", path, sha)));
        };
        Ok(slice_lines(&contents, start_line, end_line))
    }
}

fn comment_user(user: &User) -> CommentUser {
    CommentUser {
        login: user.login.clone(),
        url: user.html_url.clone(),
        avatar_url: user.avatar_url.clone(),
        special_display_name: None,
    }
}

/// Convert a REST review comment into a model snapshot.
///
/// Edit and delete rights are granted when `viewer_login` authored the
/// comment. The REST rollup carries no reactor names.
pub fn raw_comment_from_review(comment: &ReviewComment, viewer_login: Option<&str>) -> RawComment {
    let is_own = viewer_login.is_some_and(|login| comment.is_authored_by(login));

    let reactions = comment
        .reactions
        .non_zero()
        .filter_map(|(content, count)| {
            Some(Reaction {
                label: label_for_content(content)?.to_string(),
                count,
                viewer_has_reacted: false,
                reactors: Vec::new(),
            })
        })
        .collect();

    RawComment {
        id: comment.id,
        body: comment.body.clone(),
        user: comment.author.as_ref().map(comment_user),
        created_at: comment.created_at,
        is_draft: false,
        can_edit: is_own,
        can_delete: is_own,
        reactions: Some(reactions),
        special_display_body_postfix: None,
    }
}

impl From<ReviewComment> for RawComment {
    fn from(comment: ReviewComment) -> Self {
        raw_comment_from_review(&comment, None)
    }
}
