//! HTML image tags.

use regex::Regex;
use std::sync::OnceLock;

fn img_regex() -> &'static Regex {
    static IMG_REGEX: OnceLock<Regex> = OnceLock::new();

    IMG_REGEX.get_or_init(|| {
        Regex::new(r#"<img\s[^>]*?src=['"](?P<src>[^'"]+)['"][^>]*>"#).unwrap()
    })
}

/// Rewrite `<img ... src="...">` tags into markdown image references.
pub fn replace_images(body: &str) -> String {
    img_regex()
        .replace_all(body, "![image](${src})")
        .into_owned()
}
