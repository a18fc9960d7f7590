//! The fixed reaction group shown under every comment.

use crate::model::Reaction;

/// GitHub's supported reactions as `(glyph, API content name)`, in display order.
pub const REACTION_GROUP: [(&str, &str); 8] = [
    ("👍", "+1"),
    ("👎", "-1"),
    ("😄", "laugh"),
    ("🎉", "hooray"),
    ("😕", "confused"),
    ("❤️", "heart"),
    ("🚀", "rocket"),
    ("👀", "eyes"),
];

/// A reaction as displayed by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentReaction {
    pub label: String,
    pub count: u32,
    pub author_has_reacted: bool,
    pub reactors: Vec<String>,
}

/// Glyph for an API reaction content name (e.g., `"rocket"` → `"🚀"`).
pub fn label_for_content(content: &str) -> Option<&'static str> {
    REACTION_GROUP
        .iter()
        .find(|(_, name)| *name == content)
        .map(|(label, _)| *label)
}

/// Build the full reaction group, filling in counts from `reactions`.
///
/// Reactions outside the group are dropped; group members nobody used get a
/// zero count.
pub fn reaction_group(reactions: Option<&[Reaction]>) -> Vec<CommentReaction> {
    REACTION_GROUP
        .iter()
        .map(|(label, _)| {
            let matched = reactions.and_then(|all| all.iter().find(|r| r.label == *label));
            match matched {
                Some(reaction) => CommentReaction {
                    label: label.to_string(),
                    count: reaction.count,
                    author_has_reacted: reaction.viewer_has_reacted,
                    reactors: reaction.reactors.clone(),
                },
                None => CommentReaction {
                    label: label.to_string(),
                    count: 0,
                    author_has_reacted: false,
                    reactors: Vec::new(),
                },
            }
        })
        .collect()
}

/// Whether `next` differs visibly from `previous` (count or own reaction).
pub fn reactions_changed(previous: Option<&[CommentReaction]>, next: &[CommentReaction]) -> bool {
    let Some(previous) = previous else {
        return true;
    };

    previous.len() != next.len()
        || previous.iter().zip(next).any(|(old, new)| {
            old.count != new.count || old.author_has_reacted != new.author_has_reacted
        })
}
