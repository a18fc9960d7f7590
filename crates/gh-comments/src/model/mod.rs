//! Comment and thread data model.

mod persisted;
mod raw;
mod reactions;
mod temporary;
mod thread;
mod view;

pub use persisted::{PersistedComment, UpdateOutcome};
pub use raw::{CommentUser, RawComment, Reaction};
pub use reactions::{
    label_for_content, reaction_group, reactions_changed, CommentReaction, REACTION_GROUP,
};
pub use temporary::{TemporaryComment, TemporaryIdPool};
pub use thread::{CollapsibleState, CommentThread, ResolvedState, ThreadComment, ThreadError};
pub use view::{
    CommentAuthor, CommentBody, CommentEditId, CommentMode, CommentView, DisplayBody, RenderTicket,
    PENDING_LABEL,
};
