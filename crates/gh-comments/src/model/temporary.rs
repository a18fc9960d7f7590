//! Optimistic placeholders shown while a create or edit is in flight.

use crate::model::{
    CommentAuthor, CommentBody, CommentEditId, CommentMode, CommentReaction, CommentUser,
    CommentView, DisplayBody, PersistedComment, RenderTicket, PENDING_LABEL,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const TEMPORARY_CONTEXT_VALUE: &str = "temporary,canEdit,canDelete";

/// Source of temporary comment IDs.
///
/// IDs increase monotonically and are never reused by clones of the same
/// pool. Nothing is persisted; a new pool starts at zero.
#[derive(Debug, Clone, Default)]
pub struct TemporaryIdPool {
    next: Arc<AtomicU64>,
}

impl TemporaryIdPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

/// A locally synthesized comment awaiting confirmation from the server.
#[derive(Debug, Clone)]
pub struct TemporaryComment {
    id: u64,
    input: String,
    /// Raw body of the comment being edited, restored on cancel.
    original_body: Option<String>,
    /// Remote ID of the comment being edited.
    replaces: Option<u64>,
    mode: CommentMode,
    author: CommentAuthor,
    label: Option<String>,
    reactions: Option<Vec<CommentReaction>>,
}

impl TemporaryComment {
    /// Placeholder for a new comment.
    pub fn new(
        pool: &TemporaryIdPool,
        input: String,
        is_draft: bool,
        current_user: &CommentUser,
    ) -> Self {
        Self {
            id: pool.next_id(),
            input,
            original_body: None,
            replaces: None,
            mode: CommentMode::Preview,
            author: CommentAuthor {
                name: current_user.display_name().to_string(),
                icon: current_user.avatar_url.clone(),
            },
            label: is_draft.then(|| PENDING_LABEL.to_string()),
            reactions: None,
        }
    }

    /// Placeholder for an edit of `original`, keeping its reactions.
    pub fn for_edit(
        pool: &TemporaryIdPool,
        input: String,
        current_user: &CommentUser,
        original: &PersistedComment,
    ) -> Self {
        let mut comment = Self::new(pool, input, original.raw().is_draft, current_user);
        comment.original_body = Some(original.raw().body.clone());
        comment.replaces = Some(original.id());
        comment.reactions = original.reactions().map(<[_]>::to_vec);
        comment
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Remote ID of the comment this placeholder stands in for.
    pub fn replaces(&self) -> Option<u64> {
        self.replaces
    }

    pub fn original_body(&self) -> Option<&str> {
        self.original_body.as_deref()
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

impl CommentView for TemporaryComment {
    fn edit_id(&self) -> CommentEditId {
        CommentEditId::Temporary(self.id)
    }

    fn mode(&self) -> CommentMode {
        self.mode
    }

    fn body(&self) -> DisplayBody<'_> {
        match self.mode {
            CommentMode::Editing => DisplayBody::Raw(&self.input),
            CommentMode::Preview => DisplayBody::Markdown(&self.input),
        }
    }

    fn author(&self) -> &CommentAuthor {
        &self.author
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn context_value(&self) -> &str {
        TEMPORARY_CONTEXT_VALUE
    }

    fn reactions(&self) -> Option<&[CommentReaction]> {
        self.reactions.as_deref()
    }

    fn start_edit(&mut self) {
        self.mode = CommentMode::Editing;
    }

    fn cancel_edit(&mut self) -> Option<RenderTicket> {
        self.mode = CommentMode::Preview;
        if let Some(original) = &self.original_body {
            self.input = original.clone();
        }
        None
    }

    fn set_body(&mut self, body: CommentBody) -> Option<RenderTicket> {
        // Only raw input replaces the placeholder text
        if let CommentBody::Plain(input) = body {
            self.input = input;
        }
        None
    }
}
