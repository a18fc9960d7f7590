//! Hard line breaks.

/// Turn every line break not preceded by whitespace into a markdown hard
/// break (`"  \n"`).
///
/// `\r\n` breaks are normalized to `\n` when rewritten. Breaks already
/// preceded by whitespace are left alone, which makes the pass idempotent.
pub fn normalize_newlines(body: &str) -> String {
    let mut out = String::with_capacity(body.len() + body.len() / 8);
    let mut previous: Option<char> = None;
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        let is_break = c == '\n' || (c == '\r' && chars.peek() == Some(&'\n'));

        if is_break && !previous.is_some_and(char::is_whitespace) {
            if c == '\r' {
                chars.next();
            }
            out.push_str("  \n");
            previous = Some('\n');
        } else {
            out.push(c);
            previous = Some(c);
        }
    }

    out
}
