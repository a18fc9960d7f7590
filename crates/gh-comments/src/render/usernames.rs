//! `@username` mentions.

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// JSDoc block tags that look like mentions in JavaScript/TypeScript code.
const JSDOC_NON_USERS: &[&str] = &[
    "abstract", "access", "alias", "async", "augments", "author", "borrows", "callback",
    "class", "classdesc", "constant", "constructs", "copyright", "default", "deprecated",
    "description", "enum", "event", "example", "exports", "external", "file", "fires",
    "function", "generator", "global", "hideconstructor", "ignore", "implements",
    "inheritdoc", "inner", "instance", "interface", "kind", "lends", "license", "listens",
    "member", "memberof", "mixes", "mixin", "module", "name", "namespace", "override",
    "package", "param", "private", "property", "protected", "public", "readonly", "requires",
    "returns", "see", "since", "static", "summary", "this", "throws", "todo", "tutorial",
    "type", "typedef", "variation", "version", "yields",
];

/// PHPDoc tags that look like mentions in PHP code.
const PHPDOC_NON_USERS: &[&str] = &[
    "api", "author", "copyright", "deprecated", "example", "filesource", "global", "ignore",
    "internal", "license", "link", "method", "package", "param", "property", "property-read",
    "property-write", "return", "see", "since", "source", "throws", "todo", "uses", "used-by",
    "var", "version",
];

fn mention_regex() -> &'static Regex {
    static MENTION_REGEX: OnceLock<Regex> = OnceLock::new();

    MENTION_REGEX.get_or_init(|| {
        // A GitHub login: alphanumerics with inner hyphens, at most 39 chars.
        // The preceding character keeps URLs, links, code spans and e-mail
        // addresses out.
        Regex::new(
            r"(?P<prefix>[^/\[`\w]|^)@(?P<name>[A-Za-z0-9](?:[A-Za-z0-9-]{0,37}[A-Za-z0-9])?)",
        )
        .unwrap()
    })
}

/// Whether `name` is a documentation tag in `language` rather than a user.
fn is_doc_tag(name: &str, language: Option<&str>) -> bool {
    match language {
        Some("javascript" | "typescript" | "javascriptreact" | "typescriptreact") => {
            JSDOC_NON_USERS.contains(&name)
        }
        Some("php") => PHPDOC_NON_USERS.contains(&name),
        _ => false,
    }
}

/// Base URL that profile paths hang off, derived from the author's profile
/// URL by dropping its last path segment.
fn profile_base(author_url: &str) -> Option<&str> {
    let (base, _) = author_url.trim_end_matches('/').rsplit_once('/')?;
    (!base.is_empty()).then_some(base)
}

/// Turn `@name` mentions into profile links.
///
/// Mentions inside an open code fence, mentions that are already part of a
/// markdown link and documentation tags of the thread's `language` are left
/// untouched. Without an `author_url` nothing is rewritten.
pub fn linkify_usernames(body: &str, author_url: Option<&str>, language: Option<&str>) -> String {
    let Some(base) = author_url.and_then(profile_base) else {
        return body.to_string();
    };

    mention_regex()
        .replace_all(body, |captures: &Captures| {
            let matched = &captures[0];
            let offset = captures.get(0).map_or(0, |m| m.start());
            let name = &captures["name"];

            if body[..offset].matches("```").count() % 2 == 1 {
                return matched.to_string();
            }
            if matched.contains(']') || matched.contains(')') {
                return matched.to_string();
            }
            if is_doc_tag(name, language) {
                return matched.to_string();
            }

            format!("{}[@{}]({}/{})", &captures["prefix"], name, base, name)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTHOR: Option<&str> = Some("https://github.com/bob");

    #[test]
    fn test_mention_becomes_link() {
        assert_eq!(
            linkify_usernames("thanks @alice!", AUTHOR, None),
            "thanks [@alice](https://github.com/alice)!"
        );
        assert_eq!(
            linkify_usernames("@alice first", AUTHOR, None),
            "[@alice](https://github.com/alice) first"
        );
    }

    #[test]
    fn test_mention_inside_code_fence_is_untouched() {
        let body = "```\n@alice\n```\nbut @carol";
        assert_eq!(
            linkify_usernames(body, AUTHOR, None),
            "```\n@alice\n```\nbut [@carol](https://github.com/carol)"
        );
    }

    #[test]
    fn test_existing_links_urls_and_emails_are_untouched() {
        let body = "[@alice](https://github.com/alice) https://x.com/@alice `@alice` bob@example.com";
        assert_eq!(linkify_usernames(body, AUTHOR, None), body);
    }

    #[test]
    fn test_doc_tags_depend_on_language() {
        let body = "/** @param x @returns y */";
        assert_eq!(linkify_usernames(body, AUTHOR, Some("typescript")), body);
        assert_eq!(
            linkify_usernames(body, AUTHOR, Some("rust")),
            "/** [@param](https://github.com/param) x [@returns](https://github.com/returns) y */"
        );
        assert_eq!(linkify_usernames("@var", AUTHOR, Some("php")), "@var");
    }

    #[test]
    fn test_enterprise_profile_base() {
        assert_eq!(
            linkify_usernames("cc @dev-ops", Some("https://ghe.example.com/bob/"), None),
            "cc [@dev-ops](https://ghe.example.com/dev-ops)"
        );
    }

    #[test]
    fn test_without_author_url_nothing_changes() {
        assert_eq!(linkify_usernames("hi @alice", None, None), "hi @alice");
    }
}
