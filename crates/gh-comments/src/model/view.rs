//! The capability set shared by persisted and temporary comments.

use crate::model::CommentReaction;
use crate::render::RenderRequest;
use std::fmt;

/// Label shown on comments that belong to a pending review.
pub const PENDING_LABEL: &str = "Pending";

/// Whether a comment is being displayed or edited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommentMode {
    #[default]
    Preview,
    Editing,
}

/// Identity of a comment within a thread.
///
/// Persisted comments are identified by their remote ID, temporary ones by
/// an ID from a [`TemporaryIdPool`](crate::model::TemporaryIdPool), so the
/// two can never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentEditId {
    Persisted(u64),
    Temporary(u64),
}

impl fmt::Display for CommentEditId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentEditId::Persisted(id) => write!(f, "{}", id),
            CommentEditId::Temporary(id) => write!(f, "temporary-{}", id),
        }
    }
}

/// Body text assigned to a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentBody {
    /// Raw comment markup as typed by the author.
    Plain(String),
    /// Markdown that was already prepared for display; skips the
    /// language-sensitive passes.
    Markdown(String),
}

impl CommentBody {
    pub fn text(&self) -> &str {
        match self {
            CommentBody::Plain(text) | CommentBody::Markdown(text) => text,
        }
    }
}

/// What the host should display as the comment body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayBody<'a> {
    /// Raw text for the edit box.
    Raw(&'a str),
    /// Rendered markdown.
    Markdown(&'a str),
}

impl<'a> DisplayBody<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            DisplayBody::Raw(text) | DisplayBody::Markdown(text) => text,
        }
    }
}

/// Author information shown in the comment header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentAuthor {
    pub name: String,
    /// Avatar image reference.
    pub icon: Option<String>,
}

/// A request to render a comment body, tagged with the generation of the
/// body it was created for.
///
/// Results are applied through
/// [`CommentThread::apply_rendered`](crate::model::CommentThread::apply_rendered),
/// which drops results whose generation is no longer current.
#[derive(Debug, Clone)]
pub struct RenderTicket {
    pub edit_id: CommentEditId,
    pub generation: u64,
    pub request: RenderRequest,
}

/// Capabilities every comment shown in a thread provides.
pub trait CommentView {
    /// Identity, unique within the thread.
    fn edit_id(&self) -> CommentEditId;

    fn mode(&self) -> CommentMode;

    /// Raw text while editing, rendered markdown otherwise.
    fn body(&self) -> DisplayBody<'_>;

    fn author(&self) -> &CommentAuthor;

    /// Header label (e.g., "Pending").
    fn label(&self) -> Option<&str>;

    /// Comma-separated flags the host uses to enable comment actions.
    fn context_value(&self) -> &str;

    fn reactions(&self) -> Option<&[CommentReaction]>;

    /// Switch to editing mode.
    fn start_edit(&mut self);

    /// Switch back to preview, restoring the pre-edit body.
    ///
    /// Returns a ticket when the restored body needs rendering.
    fn cancel_edit(&mut self) -> Option<RenderTicket>;

    /// Replace the body text.
    ///
    /// Returns a ticket when the new body needs rendering.
    fn set_body(&mut self, body: CommentBody) -> Option<RenderTicket>;
}
