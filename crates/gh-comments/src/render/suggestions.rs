//! Code suggestion blocks.

use regex::{Captures, Regex};
use std::sync::OnceLock;

fn suggestion_regex() -> &'static Regex {
    static SUGGESTION_REGEX: OnceLock<Regex> = OnceLock::new();

    SUGGESTION_REGEX.get_or_init(|| {
        // ```suggestion, optional trailing spaces, a line break, then the
        // (possibly empty) replacement text up to the closing fence
        Regex::new(r"```suggestion *(?:\r\n|\n)(?:(?P<suggestion>[\s\S]*?)(?:\r\n|\n))?```").unwrap()
    })
}

/// Inner text of the first suggestion block in `body`.
///
/// Returns `None` when there is no suggestion block and `Some("")` for an
/// empty one.
pub fn find_suggestion(body: &str) -> Option<String> {
    let captures = suggestion_regex().captures(body)?;
    Some(
        captures
            .name("suggestion")
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
    )
}

/// Rewrite every suggestion block into a labelled plain code block.
pub fn render_suggestions(body: &str) -> String {
    suggestion_regex()
        .replace_all(body, |captures: &Captures| {
            let suggestion = captures.name("suggestion").map_or("", |m| m.as_str());
            format!("***\nSuggested change:\n```\n{}\n```\n***", suggestion)
        })
        .into_owned()
}
