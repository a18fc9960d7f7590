//! Emoji shortcodes.

use crate::traits::EmojiTable;
use regex::{Captures, Regex};
use std::sync::OnceLock;

fn shortcode_regex() -> &'static Regex {
    static SHORTCODE_REGEX: OnceLock<Regex> = OnceLock::new();

    SHORTCODE_REGEX.get_or_init(|| Regex::new(r":(?P<code>[a-z0-9_+\-]+):").unwrap())
}

/// Replace `:shortcode:` with glyphs from `table`. Unknown codes stay.
pub fn emojify(body: &str, table: &EmojiTable) -> String {
    if table.is_empty() {
        return body.to_string();
    }

    shortcode_regex()
        .replace_all(body, |captures: &Captures| match table.get(&captures["code"]) {
            Some(glyph) => glyph.clone(),
            None => captures[0].to_string(),
        })
        .into_owned()
}
