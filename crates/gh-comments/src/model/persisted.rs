//! A comment backed by a snapshot from the hosting service.

use crate::model::{
    reaction_group, reactions_changed, CommentAuthor, CommentBody, CommentEditId, CommentMode,
    CommentReaction, CommentView, DisplayBody, RawComment, RenderTicket, PENDING_LABEL,
};
use crate::render::{find_suggestion, RenderRequest};
use log::debug;

/// What [`PersistedComment::update`] requires from the caller.
#[derive(Debug, Clone)]
pub enum UpdateOutcome {
    /// Nothing visible changed.
    Unchanged,
    /// Reactions, label or context flags changed; refresh the thread now.
    Refresh,
    /// The body changed; render the ticket. The thread refreshes once the
    /// result is applied.
    Render(RenderTicket),
}

/// A comment that exists on the hosting service.
#[derive(Debug, Clone)]
pub struct PersistedComment {
    raw: RawComment,
    mode: CommentMode,
    author: CommentAuthor,
    label: Option<String>,
    context_value: String,
    reactions: Option<Vec<CommentReaction>>,
    /// Body as last assigned; what the edit box shows.
    body: CommentBody,
    /// Latest applied render result.
    rendered: Option<String>,
    /// Bumped on every body assignment.
    generation: u64,
    /// Reactions, label or flags changed together with the body; reported
    /// when the render for the current generation is applied.
    refresh_pending: bool,
}

impl PersistedComment {
    /// Wrap a snapshot. Call [`render_ticket`](Self::render_ticket) to get
    /// the initial body rendered.
    pub fn new(raw: RawComment) -> Self {
        let author = CommentAuthor {
            name: raw
                .user
                .as_ref()
                .map(|user| user.display_name().to_string())
                .unwrap_or_else(|| "ghost".to_string()),
            icon: raw.user.as_ref().and_then(|user| user.avatar_url.clone()),
        };

        Self {
            mode: CommentMode::Preview,
            author,
            label: label_for(&raw),
            context_value: context_value_for(&raw),
            reactions: Some(reaction_group(raw.reactions.as_deref())),
            body: CommentBody::Plain(raw.body.clone()),
            rendered: None,
            generation: 1,
            refresh_pending: false,
            raw,
        }
    }

    /// The snapshot currently backing this comment.
    pub fn raw(&self) -> &RawComment {
        &self.raw
    }

    pub fn id(&self) -> u64 {
        self.raw.id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Latest rendered body, if a render has been applied yet.
    pub fn rendered_body(&self) -> Option<&str> {
        self.rendered.as_deref()
    }

    /// Inner text of the first suggestion block of the raw body.
    pub fn suggestion(&self) -> Option<String> {
        find_suggestion(&self.raw.body)
    }

    /// A ticket rendering the current body at the current generation.
    pub fn render_ticket(&self) -> RenderTicket {
        RenderTicket {
            edit_id: self.edit_id(),
            generation: self.generation,
            request: RenderRequest::for_comment(&self.raw, self.body.clone()),
        }
    }

    /// Replace the snapshot.
    ///
    /// Reactions, label and context flags are recomputed in that order; the
    /// body is handled last and, when it changed, is the only trigger for a
    /// refresh.
    pub fn update(&mut self, raw: RawComment) -> UpdateOutcome {
        let body_changed = self.raw.body != raw.body;
        self.raw = raw;
        let mut refresh = false;

        let reactions = reaction_group(self.raw.reactions.as_deref());
        if reactions_changed(self.reactions.as_deref(), &reactions) {
            refresh = true;
        }
        self.reactions = Some(reactions);

        let label = label_for(&self.raw);
        if label != self.label {
            refresh = true;
        }
        self.label = label;

        let context_value = context_value_for(&self.raw);
        if context_value != self.context_value {
            refresh = true;
        }
        self.context_value = context_value;

        if body_changed {
            self.refresh_pending |= refresh;
            let body = CommentBody::Plain(self.raw.body.clone());
            return UpdateOutcome::Render(self.assign_body(body));
        }

        if refresh {
            UpdateOutcome::Refresh
        } else {
            UpdateOutcome::Unchanged
        }
    }

    /// Apply a render result.
    ///
    /// Results for an outdated generation are dropped. Returns whether the
    /// visible comment changed: the body, or the reactions, label or flags
    /// updated together with it.
    pub fn apply_rendered(&mut self, generation: u64, rendered: String) -> bool {
        if generation != self.generation {
            debug!(
                "Dropping stale render of comment {} (generation {} < {})",
                self.raw.id, generation, self.generation
            );
            return false;
        }

        let refresh = std::mem::take(&mut self.refresh_pending);
        if self.rendered.as_deref() == Some(rendered.as_str()) {
            return refresh;
        }

        self.rendered = Some(rendered);
        true
    }

    /// Set the avatar. Returns whether it changed.
    pub fn set_author_icon(&mut self, icon: Option<String>) -> bool {
        if self.author.icon == icon {
            return false;
        }
        self.author.icon = icon;
        true
    }

    fn assign_body(&mut self, body: CommentBody) -> RenderTicket {
        self.body = body;
        self.generation += 1;
        self.render_ticket()
    }
}

impl CommentView for PersistedComment {
    fn edit_id(&self) -> CommentEditId {
        CommentEditId::Persisted(self.raw.id)
    }

    fn mode(&self) -> CommentMode {
        self.mode
    }

    fn body(&self) -> DisplayBody<'_> {
        match self.mode {
            CommentMode::Editing => DisplayBody::Raw(self.body.text()),
            CommentMode::Preview => {
                DisplayBody::Markdown(self.rendered.as_deref().unwrap_or(self.body.text()))
            }
        }
    }

    fn author(&self) -> &CommentAuthor {
        &self.author
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn context_value(&self) -> &str {
        &self.context_value
    }

    fn reactions(&self) -> Option<&[CommentReaction]> {
        self.reactions.as_deref()
    }

    fn start_edit(&mut self) {
        self.mode = CommentMode::Editing;
    }

    fn cancel_edit(&mut self) -> Option<RenderTicket> {
        self.mode = CommentMode::Preview;

        let original = CommentBody::Plain(self.raw.body.clone());
        if self.body == original {
            return None;
        }
        Some(self.assign_body(original))
    }

    fn set_body(&mut self, body: CommentBody) -> Option<RenderTicket> {
        Some(self.assign_body(body))
    }
}

fn label_for(raw: &RawComment) -> Option<String> {
    raw.is_draft.then(|| PENDING_LABEL.to_string())
}

fn context_value_for(raw: &RawComment) -> String {
    let mut values = Vec::new();
    if raw.can_edit {
        values.push("canEdit");
    }
    if raw.can_delete {
        values.push("canDelete");
    }
    if find_suggestion(&raw.body).is_some() {
        values.push("hasSuggestion");
    }
    values.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CommentUser, Reaction};
    use chrono::Utc;

    fn raw(body: &str) -> RawComment {
        RawComment {
            id: 7,
            body: body.to_string(),
            user: Some(CommentUser {
                login: "alice".to_string(),
                url: "https://github.com/alice".to_string(),
                avatar_url: Some("https://avatars.example.com/alice".to_string()),
                special_display_name: None,
            }),
            created_at: Utc::now(),
            is_draft: false,
            can_edit: true,
            can_delete: false,
            reactions: None,
            special_display_body_postfix: None,
        }
    }

    #[test]
    fn test_new_comment_state() {
        let comment = PersistedComment::new(raw("hello"));

        assert_eq!(comment.edit_id(), CommentEditId::Persisted(7));
        assert_eq!(comment.mode(), CommentMode::Preview);
        assert_eq!(comment.author().name, "alice");
        assert_eq!(comment.label(), None);
        assert_eq!(comment.context_value(), "canEdit");
        assert_eq!(comment.reactions().map(<[_]>::len), Some(8));
        // Nothing rendered yet: preview falls back to the raw text
        assert_eq!(comment.body(), DisplayBody::Markdown("hello"));
    }

    #[test]
    fn test_context_value_flags() {
        let mut snapshot = raw("```suggestion\nfoo\n```");
        snapshot.can_delete = true;
        let comment = PersistedComment::new(snapshot);

        assert_eq!(comment.context_value(), "canEdit,canDelete,hasSuggestion");
        assert_eq!(comment.suggestion().as_deref(), Some("foo"));
    }

    #[test]
    fn test_draft_is_pending() {
        let mut snapshot = raw("draft");
        snapshot.is_draft = true;
        assert_eq!(PersistedComment::new(snapshot).label(), Some("Pending"));
    }

    #[test]
    fn test_update_same_body_never_renders() {
        let mut comment = PersistedComment::new(raw("hello"));
        let generation = comment.generation();

        assert!(matches!(comment.update(raw("hello")), UpdateOutcome::Unchanged));

        let mut reacted = raw("hello");
        reacted.reactions = Some(vec![Reaction {
            label: "👍".to_string(),
            count: 1,
            viewer_has_reacted: true,
            reactors: vec!["bob".to_string()],
        }]);
        assert!(matches!(comment.update(reacted), UpdateOutcome::Refresh));
        assert_eq!(comment.reactions().unwrap()[0].count, 1);

        let mut drafted = raw("hello");
        drafted.is_draft = true;
        assert!(matches!(comment.update(drafted), UpdateOutcome::Refresh));
        assert_eq!(comment.label(), Some("Pending"));

        assert_eq!(comment.generation(), generation);
    }

    #[test]
    fn test_update_changed_body_renders_instead_of_refreshing() {
        let mut comment = PersistedComment::new(raw("hello"));

        let mut changed = raw("hello again");
        changed.is_draft = true;
        match comment.update(changed) {
            UpdateOutcome::Render(ticket) => {
                assert_eq!(ticket.generation, comment.generation());
                assert_eq!(ticket.request.body, CommentBody::Plain("hello again".to_string()));
            }
            other => panic!("expected a render ticket, got {:?}", other),
        }
        assert_eq!(comment.label(), Some("Pending"));
    }

    #[test]
    fn test_label_change_with_body_change_reported_on_apply() {
        let mut comment = PersistedComment::new(raw("a\nb"));
        let ticket = comment.render_ticket();
        assert!(comment.apply_rendered(ticket.generation, "a  \nb".to_string()));

        // Both bodies render to the same text
        let mut drafted = raw("a  \nb");
        drafted.is_draft = true;
        let UpdateOutcome::Render(ticket) = comment.update(drafted) else {
            panic!("expected a render ticket");
        };

        assert!(comment.apply_rendered(ticket.generation, "a  \nb".to_string()));
        assert_eq!(comment.label(), Some("Pending"));
        assert!(!comment.apply_rendered(ticket.generation, "a  \nb".to_string()));
    }

    #[test]
    fn test_stale_render_is_dropped() {
        let mut comment = PersistedComment::new(raw("one"));
        let first = comment.render_ticket();
        let second = comment
            .set_body(CommentBody::Plain("two".to_string()))
            .unwrap();

        // The newer result arrives first, the older one last
        assert!(comment.apply_rendered(second.generation, "rendered two".to_string()));
        assert!(!comment.apply_rendered(first.generation, "rendered one".to_string()));
        assert_eq!(comment.body(), DisplayBody::Markdown("rendered two"));

        // Re-applying an identical result is not a visible change
        assert!(!comment.apply_rendered(second.generation, "rendered two".to_string()));
    }

    #[test]
    fn test_edit_and_cancel() {
        let mut comment = PersistedComment::new(raw("original"));
        let ticket = comment.render_ticket();
        comment.apply_rendered(ticket.generation, "<original>".to_string());

        comment.start_edit();
        assert_eq!(comment.body(), DisplayBody::Raw("original"));

        // Cancelling an untouched edit needs no render
        assert!(comment.cancel_edit().is_none());
        assert_eq!(comment.mode(), CommentMode::Preview);
        assert_eq!(comment.body(), DisplayBody::Markdown("<original>"));

        comment.start_edit();
        comment.set_body(CommentBody::Plain("changed".to_string()));
        assert_eq!(comment.body(), DisplayBody::Raw("changed"));

        let restore = comment.cancel_edit().expect("restoring needs a render");
        assert_eq!(restore.request.body, CommentBody::Plain("original".to_string()));
        assert_eq!(comment.mode(), CommentMode::Preview);
    }

    #[test]
    fn test_set_author_icon() {
        let mut comment = PersistedComment::new(raw("hi"));
        assert!(!comment.set_author_icon(Some("https://avatars.example.com/alice".to_string())));
        assert!(comment.set_author_icon(Some("data:image/png;base64,AAAA".to_string())));
    }
}
