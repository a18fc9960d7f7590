//! # gh-comments
//!
//! Rendering and thread state for GitHub pull request review comments.
//!
//! ## Design Principles
//!
//! This crate is **instrumented**: everything it needs from the outside world
//! (file contents at a commit, the local file system, emoji tables, avatars,
//! the host renderer) comes in through the traits in [`traits`]. The comment
//! model in [`model`] is synchronous and never renders by itself; operations
//! that change a body hand out [`RenderTicket`]s, and results are applied
//! back with a generation check so the latest assignment always wins.
//!
//! [`ThreadController`] ties both together for async hosts.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gh_comments::{CommentRenderer, CommentThread, ThreadController, TemporaryIdPool};
//! use gh_comments::traits::{EmojiCache, NoOpAvatarProvider};
//!
//! let renderer = CommentRenderer::new(Arc::new(EmojiCache::default()))
//!     .with_repository(repository);
//! let thread = CommentThread::new("thread-1", "src/lib.rs", observer, TemporaryIdPool::new());
//! let controller = ThreadController::new(thread, Arc::new(renderer), Arc::new(NoOpAvatarProvider));
//!
//! controller.add_comment(raw_comment).await?;
//! ```

pub mod controller;
#[cfg(feature = "github")]
pub mod github;
pub mod model;
pub mod render;
pub mod traits;

// Re-export commonly used types
pub use controller::ThreadController;
pub use model::{
    CommentAuthor, CommentBody, CommentEditId, CommentMode, CommentReaction, CommentThread,
    CommentUser, CommentView, DisplayBody, PersistedComment, RawComment, Reaction, RenderTicket,
    TemporaryComment, TemporaryIdPool, ThreadComment, ThreadError,
};
pub use render::{CommentRenderer, RenderRequest};
pub use traits::{
    AvatarProvider, EmojiCache, FileSystem, LanguageDetector, LookupError, RemoteRepository,
    ThreadObserver,
};

#[cfg(feature = "github")]
pub use github::{raw_comment_from_review, GitHubRepository};
