//! An ordered group of comments anchored to a document location.

use crate::model::{
    CommentAuthor, CommentBody, CommentEditId, CommentMode, CommentReaction, CommentUser,
    CommentView, DisplayBody, PersistedComment, RawComment, RenderTicket, TemporaryComment,
    TemporaryIdPool, UpdateOutcome,
};
use crate::traits::ThreadObserver;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur when addressing comments in a thread.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThreadError {
    /// No comment with this identity is in the thread.
    #[error("Comment not found: {0}")]
    NotFound(CommentEditId),

    /// A comment with this identity is already in the thread.
    #[error("Duplicate comment: {0}")]
    Duplicate(CommentEditId),

    /// The operation needs a persisted comment.
    #[error("Not a persisted comment: {0}")]
    NotPersisted(CommentEditId),

    /// The operation needs a temporary comment.
    #[error("Not a temporary comment: {0}")]
    NotTemporary(CommentEditId),
}

/// Whether the host shows the thread expanded. Owned by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollapsibleState {
    #[default]
    Expanded,
    Collapsed,
}

/// Review resolution of the thread. Owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedState {
    Resolved,
    Unresolved,
}

/// A comment entry in a thread.
#[derive(Debug, Clone)]
pub enum ThreadComment {
    Persisted(PersistedComment),
    Temporary(TemporaryComment),
}

impl ThreadComment {
    pub fn as_persisted(&self) -> Option<&PersistedComment> {
        match self {
            ThreadComment::Persisted(comment) => Some(comment),
            ThreadComment::Temporary(_) => None,
        }
    }

    pub fn as_temporary(&self) -> Option<&TemporaryComment> {
        match self {
            ThreadComment::Temporary(comment) => Some(comment),
            ThreadComment::Persisted(_) => None,
        }
    }

    fn view(&self) -> &dyn CommentView {
        match self {
            ThreadComment::Persisted(comment) => comment,
            ThreadComment::Temporary(comment) => comment,
        }
    }

    fn view_mut(&mut self) -> &mut dyn CommentView {
        match self {
            ThreadComment::Persisted(comment) => comment,
            ThreadComment::Temporary(comment) => comment,
        }
    }
}

impl CommentView for ThreadComment {
    fn edit_id(&self) -> CommentEditId {
        self.view().edit_id()
    }

    fn mode(&self) -> CommentMode {
        self.view().mode()
    }

    fn body(&self) -> DisplayBody<'_> {
        self.view().body()
    }

    fn author(&self) -> &CommentAuthor {
        self.view().author()
    }

    fn label(&self) -> Option<&str> {
        self.view().label()
    }

    fn context_value(&self) -> &str {
        self.view().context_value()
    }

    fn reactions(&self) -> Option<&[CommentReaction]> {
        self.view().reactions()
    }

    fn start_edit(&mut self) {
        self.view_mut().start_edit()
    }

    fn cancel_edit(&mut self) -> Option<RenderTicket> {
        self.view_mut().cancel_edit()
    }

    fn set_body(&mut self, body: CommentBody) -> Option<RenderTicket> {
        self.view_mut().set_body(body)
    }
}

/// A thread of comments.
///
/// The thread is synchronous: operations that need a body rendered return
/// [`RenderTicket`]s, and the caller feeds results back through
/// [`apply_rendered`](Self::apply_rendered). Every visible change is
/// reported to the [`ThreadObserver`].
pub struct CommentThread {
    id: String,
    document_path: String,
    /// Pass-through for the host.
    pub collapsible_state: CollapsibleState,
    /// Pass-through for the host.
    pub resolved_state: Option<ResolvedState>,
    comments: Vec<ThreadComment>,
    /// Comments replaced by an in-flight edit, keyed by temporary ID.
    stashed: HashMap<u64, PersistedComment>,
    observer: Arc<dyn ThreadObserver>,
    id_pool: TemporaryIdPool,
}

impl CommentThread {
    pub fn new(
        id: impl Into<String>,
        document_path: impl Into<String>,
        observer: Arc<dyn ThreadObserver>,
        id_pool: TemporaryIdPool,
    ) -> Self {
        Self {
            id: id.into(),
            document_path: document_path.into(),
            collapsible_state: CollapsibleState::default(),
            resolved_state: None,
            comments: Vec::new(),
            stashed: HashMap::new(),
            observer,
            id_pool,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Path of the document the thread is attached to.
    pub fn document_path(&self) -> &str {
        &self.document_path
    }

    pub fn comments(&self) -> &[ThreadComment] {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn get(&self, id: CommentEditId) -> Option<&ThreadComment> {
        self.comments.iter().find(|comment| comment.edit_id() == id)
    }

    /// Tell the observer the comments changed.
    pub fn notify(&self) {
        self.observer.comments_changed(&self.id);
    }

    /// Append a persisted comment. Returns the ticket for its initial render.
    pub fn push(&mut self, raw: RawComment) -> Result<RenderTicket, ThreadError> {
        let comment = PersistedComment::new(raw);
        let id = comment.edit_id();
        if self.get(id).is_some() {
            return Err(ThreadError::Duplicate(id));
        }

        let ticket = comment.render_ticket();
        self.comments.push(ThreadComment::Persisted(comment));
        self.notify();
        Ok(self.attach_document(ticket))
    }

    /// Remove a comment.
    pub fn remove(&mut self, id: CommentEditId) -> Result<ThreadComment, ThreadError> {
        let index = self.index_of(id)?;
        let removed = self.comments.remove(index);
        if let CommentEditId::Temporary(temporary_id) = id {
            self.stashed.remove(&temporary_id);
        }
        self.notify();
        Ok(removed)
    }

    /// Put every entry matching `id` into editing mode.
    pub fn start_edit(&mut self, id: CommentEditId) -> Result<(), ThreadError> {
        let mut found = false;
        for comment in self.comments.iter_mut().filter(|c| c.edit_id() == id) {
            comment.start_edit();
            found = true;
        }

        if !found {
            return Err(ThreadError::NotFound(id));
        }
        self.notify();
        Ok(())
    }

    /// Return every entry matching `id` to preview with its pre-edit body.
    pub fn cancel_edit(&mut self, id: CommentEditId) -> Result<Vec<RenderTicket>, ThreadError> {
        let mut found = false;
        let mut tickets = Vec::new();
        for comment in self.comments.iter_mut().filter(|c| c.edit_id() == id) {
            tickets.extend(comment.cancel_edit());
            found = true;
        }

        if !found {
            return Err(ThreadError::NotFound(id));
        }
        self.notify();
        Ok(self.attach_documents(tickets))
    }

    /// Replace the body of a comment.
    pub fn set_body(
        &mut self,
        id: CommentEditId,
        body: CommentBody,
    ) -> Result<Option<RenderTicket>, ThreadError> {
        let index = self.index_of(id)?;
        let ticket = self.comments[index].set_body(body);
        self.notify();
        Ok(ticket.map(|ticket| self.attach_document(ticket)))
    }

    /// Replace the snapshot of a persisted comment.
    ///
    /// Refreshes immediately when only reactions, label or flags changed;
    /// a body change returns a ticket instead.
    pub fn update_comment(
        &mut self,
        raw: RawComment,
    ) -> Result<Option<RenderTicket>, ThreadError> {
        let id = CommentEditId::Persisted(raw.id);
        let comment = self.persisted_mut(id)?;

        match comment.update(raw) {
            UpdateOutcome::Unchanged => Ok(None),
            UpdateOutcome::Refresh => {
                self.notify();
                Ok(None)
            }
            UpdateOutcome::Render(ticket) => Ok(Some(self.attach_document(ticket))),
        }
    }

    /// Apply a render result to a persisted comment.
    ///
    /// Returns whether the visible body changed. Results for comments that
    /// left the thread or for outdated generations are dropped.
    pub fn apply_rendered(
        &mut self,
        id: CommentEditId,
        generation: u64,
        rendered: String,
    ) -> bool {
        let Ok(comment) = self.persisted_mut(id) else {
            debug!("Dropping render for comment {} no longer in thread", id);
            return false;
        };

        let changed = comment.apply_rendered(generation, rendered);
        if changed {
            self.notify();
        }
        changed
    }

    /// Set the avatar shown for a persisted comment.
    pub fn set_author_icon(
        &mut self,
        id: CommentEditId,
        icon: Option<String>,
    ) -> Result<(), ThreadError> {
        if self.persisted_mut(id)?.set_author_icon(icon) {
            self.notify();
        }
        Ok(())
    }

    /// Show a placeholder for a reply that is being posted.
    pub fn begin_reply(
        &mut self,
        input: String,
        is_draft: bool,
        current_user: &CommentUser,
    ) -> CommentEditId {
        let comment = TemporaryComment::new(&self.id_pool, input, is_draft, current_user);
        let id = comment.edit_id();
        self.comments.push(ThreadComment::Temporary(comment));
        self.notify();
        id
    }

    /// Replace a persisted comment with a placeholder while its edit is saved.
    ///
    /// The original is kept until the edit completes or is aborted.
    pub fn begin_edit(
        &mut self,
        id: CommentEditId,
        input: String,
        current_user: &CommentUser,
    ) -> Result<CommentEditId, ThreadError> {
        let index = self.index_of(id)?;
        let ThreadComment::Persisted(original) = &self.comments[index] else {
            return Err(ThreadError::NotPersisted(id));
        };

        let placeholder = TemporaryComment::for_edit(&self.id_pool, input, current_user, original);
        let temporary_id = placeholder.id();
        let replaced = std::mem::replace(
            &mut self.comments[index],
            ThreadComment::Temporary(placeholder),
        );
        if let ThreadComment::Persisted(original) = replaced {
            self.stashed.insert(temporary_id, original);
        }

        self.notify();
        Ok(CommentEditId::Temporary(temporary_id))
    }

    /// Replace a placeholder with the comment confirmed by the server.
    ///
    /// If the thread already shows that comment (a refresh delivered it
    /// first), the placeholder is dropped and the existing entry is updated
    /// from `raw` instead.
    pub fn complete_temporary(
        &mut self,
        id: CommentEditId,
        raw: RawComment,
    ) -> Result<Option<RenderTicket>, ThreadError> {
        let index = self.temporary_index(id)?;
        if let CommentEditId::Temporary(temporary_id) = id {
            self.stashed.remove(&temporary_id);
        }

        let persisted_id = CommentEditId::Persisted(raw.id);
        if self.get(persisted_id).is_some() {
            debug!("Comment {} already in thread, dropping placeholder {}", persisted_id, id);
            self.comments.remove(index);
            self.notify();
            return self.update_comment(raw);
        }

        let comment = PersistedComment::new(raw);
        let ticket = comment.render_ticket();
        self.comments[index] = ThreadComment::Persisted(comment);
        self.notify();
        Ok(Some(self.attach_document(ticket)))
    }

    /// Drop a placeholder after its operation failed or was cancelled.
    ///
    /// A placeholder for a new comment disappears; one for an edit is
    /// replaced by the original comment.
    pub fn abort_temporary(&mut self, id: CommentEditId) -> Result<(), ThreadError> {
        let index = self.temporary_index(id)?;
        let original = match id {
            CommentEditId::Temporary(temporary_id) => self.stashed.remove(&temporary_id),
            CommentEditId::Persisted(_) => None,
        };

        match original {
            Some(original) => self.comments[index] = ThreadComment::Persisted(original),
            None => {
                self.comments.remove(index);
            }
        }
        self.notify();
        Ok(())
    }

    fn index_of(&self, id: CommentEditId) -> Result<usize, ThreadError> {
        self.comments
            .iter()
            .position(|comment| comment.edit_id() == id)
            .ok_or(ThreadError::NotFound(id))
    }

    fn temporary_index(&self, id: CommentEditId) -> Result<usize, ThreadError> {
        let index = self.index_of(id)?;
        match self.comments[index] {
            ThreadComment::Temporary(_) => Ok(index),
            ThreadComment::Persisted(_) => Err(ThreadError::NotTemporary(id)),
        }
    }

    fn persisted_mut(&mut self, id: CommentEditId) -> Result<&mut PersistedComment, ThreadError> {
        let index = self.index_of(id)?;
        match &mut self.comments[index] {
            ThreadComment::Persisted(comment) => Ok(comment),
            ThreadComment::Temporary(_) => Err(ThreadError::NotPersisted(id)),
        }
    }

    fn attach_document(&self, mut ticket: RenderTicket) -> RenderTicket {
        ticket.request.document_path = Some(self.document_path.clone());
        ticket
    }

    fn attach_documents(&self, tickets: Vec<RenderTicket>) -> Vec<RenderTicket> {
        tickets
            .into_iter()
            .map(|ticket| self.attach_document(ticket))
            .collect()
    }
}

impl std::fmt::Debug for CommentThread {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentThread")
            .field("id", &self.id)
            .field("document_path", &self.document_path)
            .field("collapsible_state", &self.collapsible_state)
            .field("resolved_state", &self.resolved_state)
            .field("comments", &self.comments)
            .finish_non_exhaustive()
    }
}
