//! Rendering review threads to markdown for the terminal

use anyhow::Result;
use gh_client::ReviewComment;
use gh_comments::traits::{
    BuiltinEmojiLoader, EmojiLoader, GitHubAvatarProvider, JsonEmojiLoader, ThreadObserver,
};
use gh_comments::{
    CommentRenderer, CommentThread, CommentView, EmojiCache, RawComment, RemoteRepository,
    TemporaryIdPool, ThreadController,
};
use gh_comments_config::AppConfig;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Review comments sharing a thread root
#[derive(Debug, Clone)]
pub struct ReviewThread {
    pub root_id: u64,
    /// File the thread is attached to
    pub path: String,
    pub comments: Vec<ReviewComment>,
}

/// Group comments into threads, in order of first appearance.
pub fn group_threads(comments: Vec<ReviewComment>) -> Vec<ReviewThread> {
    let mut threads: Vec<ReviewThread> = Vec::new();
    let mut index: HashMap<u64, usize> = HashMap::new();

    for comment in comments {
        let root_id = comment.thread_root_id();
        match index.get(&root_id) {
            Some(&i) => threads[i].comments.push(comment),
            None => {
                index.insert(root_id, threads.len());
                threads.push(ReviewThread {
                    root_id,
                    path: comment.path.clone(),
                    comments: vec![comment],
                });
            }
        }
    }

    threads
}

/// Logs thread changes; there is no UI to refresh.
struct LogObserver;

impl ThreadObserver for LogObserver {
    fn comments_changed(&self, thread_id: &str) {
        log::trace!("Thread {} changed", thread_id);
    }
}

/// Renders threads with a shared renderer and emoji cache
pub struct Previewer {
    renderer: Arc<CommentRenderer>,
    avatar_size: u32,
    ids: TemporaryIdPool,
}

impl Previewer {
    pub fn new(config: &AppConfig, repositories: Vec<Arc<dyn RemoteRepository>>) -> Self {
        let loader: Arc<dyn EmojiLoader> = match emoji_table_path(config) {
            Some(path) => Arc::new(JsonEmojiLoader::new(path)),
            None => Arc::new(BuiltinEmojiLoader),
        };

        let renderer = repositories.into_iter().fold(
            CommentRenderer::new(Arc::new(EmojiCache::new(loader))),
            |renderer, repository| renderer.with_repository(repository),
        );

        Self {
            renderer: Arc::new(renderer),
            avatar_size: config.avatar_size,
            ids: TemporaryIdPool::new(),
        }
    }

    /// Render one thread of comments to markdown
    pub async fn render_thread(
        &self,
        thread_id: &str,
        document_path: &str,
        comments: Vec<RawComment>,
    ) -> Result<String> {
        let thread = CommentThread::new(
            thread_id,
            document_path,
            Arc::new(LogObserver),
            self.ids.clone(),
        );
        let controller = ThreadController::new(
            thread,
            Arc::clone(&self.renderer),
            Arc::new(GitHubAvatarProvider::new(self.avatar_size)),
        );

        for comment in comments {
            controller.add_comment(comment).await?;
        }

        let thread = controller.thread();
        let thread = thread.lock().await;
        Ok(format_thread(&thread))
    }
}

/// Emoji table to load: the configured file, else `emoji.json` in the
/// config directory if present.
fn emoji_table_path(config: &AppConfig) -> Option<PathBuf> {
    if let Some(path) = &config.emoji_file {
        return Some(PathBuf::from(path));
    }

    gh_comments_config::default_emoji_table_path().filter(|path| path.is_file())
}

/// Format a thread as markdown: a heading, then each comment with its
/// author, label, body and used reactions.
pub fn format_thread(thread: &CommentThread) -> String {
    let mut out = format!("## {}\n", thread.document_path());

    for comment in thread.comments() {
        out.push('\n');
        out.push_str(&format!("**{}**", comment.author().name));
        if let Some(label) = comment.label() {
            out.push_str(&format!(" _{}_", label));
        }
        out.push_str("\n\n");
        out.push_str(comment.body().as_str());
        out.push('\n');

        let reactions: Vec<String> = comment
            .reactions()
            .unwrap_or_default()
            .iter()
            .filter(|reaction| reaction.count > 0)
            .map(|reaction| format!("{} {}", reaction.label, reaction.count))
            .collect();
        if !reactions.is_empty() {
            out.push_str(&format!("\n{}\n", reactions.join("  ")));
        }
    }

    out
}
