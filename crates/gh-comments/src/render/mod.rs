//! Turns raw comment markup into display markdown.
//!
//! Plain bodies go through every pass in this order:
//!
//! 1. line breaks become hard breaks
//! 2. `@user` mentions become profile links
//! 3. permalinks expand into code excerpts
//! 4. suggestion fences become "Suggested change" blocks
//! 5. `<img>` tags become markdown images
//! 6. `:shortcode:` emoji are replaced
//! 7. the author postfix is appended
//!
//! Bodies that are already markdown only go through passes 3 to 5.

mod emoji;
mod images;
mod newlines;
mod permalinks;
mod suggestions;
mod usernames;

pub use emoji::emojify;
pub use images::replace_images;
pub use newlines::normalize_newlines;
pub use permalinks::{expand_permalinks, find_permalinks, Permalink};
pub use suggestions::{find_suggestion, render_suggestions};
pub use usernames::linkify_usernames;

use crate::model::{CommentBody, RawComment};
use crate::traits::{
    EmojiCache, ExtensionLanguageDetector, FileSystem, LanguageDetector, LocalFileSystem,
    RemoteRepository,
};
use log::debug;
use std::sync::Arc;

/// Everything needed to render one comment body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub body: CommentBody,
    /// Profile URL of the author; mentions link next to it.
    pub author_url: Option<String>,
    /// Italic note appended below plain bodies.
    pub postfix: Option<String>,
    /// Document the comment is attached to, used for language detection.
    pub document_path: Option<String>,
}

impl RenderRequest {
    pub fn new(body: CommentBody) -> Self {
        Self {
            body,
            author_url: None,
            postfix: None,
            document_path: None,
        }
    }

    /// A request for `body` carrying the author and postfix of `raw`.
    pub fn for_comment(raw: &RawComment, body: CommentBody) -> Self {
        Self {
            body,
            author_url: raw.user.as_ref().map(|user| user.url.clone()),
            postfix: raw.special_display_body_postfix.clone(),
            document_path: None,
        }
    }
}

/// Renders comment bodies using the configured collaborators.
///
/// Cheap to share behind an `Arc`; rendering takes `&self`.
pub struct CommentRenderer {
    repositories: Vec<Arc<dyn RemoteRepository>>,
    file_system: Arc<dyn FileSystem>,
    languages: Arc<dyn LanguageDetector>,
    emoji: Arc<EmojiCache>,
}

impl CommentRenderer {
    pub fn new(emoji: Arc<EmojiCache>) -> Self {
        Self {
            repositories: Vec::new(),
            file_system: Arc::new(LocalFileSystem),
            languages: Arc::new(ExtensionLanguageDetector),
            emoji,
        }
    }

    /// Add a repository whose permalinks should be expanded.
    pub fn with_repository(mut self, repository: Arc<dyn RemoteRepository>) -> Self {
        self.repositories.push(repository);
        self
    }

    pub fn with_file_system(mut self, file_system: Arc<dyn FileSystem>) -> Self {
        self.file_system = file_system;
        self
    }

    pub fn with_language_detector(mut self, languages: Arc<dyn LanguageDetector>) -> Self {
        self.languages = languages;
        self
    }

    pub fn repositories(&self) -> &[Arc<dyn RemoteRepository>] {
        &self.repositories
    }

    /// Render a body. Lookup failures leave the affected text unchanged.
    pub async fn render(&self, request: &RenderRequest) -> String {
        match &request.body {
            CommentBody::Markdown(text) => self.render_shared(text).await,
            CommentBody::Plain(text) => {
                // The emoji table loads while the other passes run.
                let (table, rendered) =
                    tokio::join!(self.emoji.table(), self.render_plain(text, request));
                let mut rendered = emojify(&rendered, table);

                if let Some(postfix) = &request.postfix {
                    rendered.push_str(&format!("\n\n_{}_", postfix));
                }
                rendered
            }
        }
    }

    async fn render_plain(&self, text: &str, request: &RenderRequest) -> String {
        let language = match &request.document_path {
            Some(path) => self.languages.language_id(path).await,
            None => None,
        };
        debug!(
            "Rendering plain body ({} bytes, language {:?})",
            text.len(),
            language
        );

        let text = normalize_newlines(text);
        let text = linkify_usernames(&text, request.author_url.as_deref(), language.as_deref());
        self.render_shared(&text).await
    }

    /// Passes that apply to plain and markdown bodies alike.
    async fn render_shared(&self, text: &str) -> String {
        let text = expand_permalinks(text, &self.repositories, self.file_system.as_ref()).await;
        let text = render_suggestions(&text);
        replace_images(&text)
    }
}

impl Default for CommentRenderer {
    fn default() -> Self {
        Self::new(Arc::new(EmojiCache::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{EmojiLoader, EmojiTable, LookupError};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    struct TableLoader;

    #[async_trait]
    impl EmojiLoader for TableLoader {
        async fn load(&self) -> Result<EmojiTable, LookupError> {
            Ok(EmojiTable::from([("rocket".to_string(), "🚀".to_string())]))
        }
    }

    fn renderer() -> CommentRenderer {
        CommentRenderer::new(Arc::new(EmojiCache::new(Arc::new(TableLoader))))
    }

    fn plain(text: &str) -> RenderRequest {
        RenderRequest {
            body: CommentBody::Plain(text.to_string()),
            author_url: Some("https://github.com/bob".to_string()),
            postfix: None,
            document_path: None,
        }
    }

    #[tokio::test]
    async fn test_plain_body_runs_all_passes() {
        let mut request = plain("ping @alice :rocket:\n<img src=\"x.png\">");
        request.postfix = Some("Posted by a bot".to_string());

        let rendered = renderer().render(&request).await;

        assert_eq!(
            rendered,
            "ping [@alice](https://github.com/alice) 🚀  \n![image](x.png)\n\n_Posted by a bot_"
        );
    }

    #[tokio::test]
    async fn test_markdown_body_skips_plain_passes() {
        let request = RenderRequest {
            body: CommentBody::Markdown("ping @alice :rocket:\n<img src=\"x.png\">".to_string()),
            author_url: Some("https://github.com/bob".to_string()),
            postfix: Some("Posted by a bot".to_string()),
            document_path: None,
        };

        let rendered = renderer().render(&request).await;
        assert_eq!(rendered, "ping @alice :rocket:\n![image](x.png)");
    }

    #[tokio::test]
    async fn test_suggestion_rendered() {
        // hard breaks are inserted before the fence is rewritten
        let rendered = renderer().render(&plain("```suggestion\nfoo\n```")).await;
        assert_eq!(rendered, "***\nSuggested change:\n```\nfoo  \n```\n***");
    }

    #[tokio::test]
    async fn test_document_language_controls_mentions() {
        let mut request = plain("Use @param here");
        request.document_path = Some("src/index.ts".to_string());
        assert_eq!(renderer().render(&request).await, "Use @param here");

        request.document_path = Some("src/lib.rs".to_string());
        assert_eq!(
            renderer().render(&request).await,
            "Use [@param](https://github.com/param) here"
        );
    }

    #[test]
    fn test_request_for_comment() {
        let raw: RawComment = serde_json::from_value(serde_json::json!({
            "id": 1,
            "body": "hi",
            "user": { "login": "bob", "url": "https://github.com/bob" },
            "createdAt": "2024-01-01T00:00:00Z",
            "specialDisplayBodyPostfix": "via app"
        }))
        .unwrap();

        let request = RenderRequest::for_comment(&raw, CommentBody::Plain(raw.body.clone()));
        assert_eq!(request.author_url.as_deref(), Some("https://github.com/bob"));
        assert_eq!(request.postfix.as_deref(), Some("via app"));
        assert_eq!(request.document_path, None);
    }
}
