//! Trait for generating author avatars.

use crate::model::CommentUser;
use async_trait::async_trait;

/// Generates renderable avatar image references for a user.
#[async_trait]
pub trait AvatarProvider: Send + Sync {
    /// Zero or more image references (URLs or data URIs), best first.
    async fn avatars(&self, user: &CommentUser) -> Vec<String>;
}

/// Uses the avatar URL GitHub reports, sized for the comment gutter.
#[derive(Debug, Clone, Copy)]
pub struct GitHubAvatarProvider {
    size: u32,
}

impl GitHubAvatarProvider {
    pub fn new(size: u32) -> Self {
        Self { size }
    }
}

impl Default for GitHubAvatarProvider {
    fn default() -> Self {
        Self::new(28)
    }
}

#[async_trait]
impl AvatarProvider for GitHubAvatarProvider {
    async fn avatars(&self, user: &CommentUser) -> Vec<String> {
        let Some(url) = user.avatar_url.as_deref() else {
            return Vec::new();
        };

        let separator = if url.contains('?') { '&' } else { '?' };
        vec![format!("{}{}s={}", url, separator, self.size)]
    }
}

/// Never produces avatars.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpAvatarProvider;

#[async_trait]
impl AvatarProvider for NoOpAvatarProvider {
    async fn avatars(&self, _user: &CommentUser) -> Vec<String> {
        Vec::new()
    }
}
