//! Text transforms available to page renderers.

/// Default length used by [`truncate_description`] callers.
pub const DEFAULT_DESCRIPTION_LENGTH: usize = 200;

/// Percent-encodes `text`, leaving `/` unescaped so paths stay readable.
pub fn url_quote(text: &str) -> String {
    text.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Escapes `&`, `<`, `>` and `"` as HTML entities.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

/// Keeps the first `length` characters and appends `...` when anything was
/// cut.
pub fn truncate_description(text: &str, length: usize) -> String {
    match text.char_indices().nth(length) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Turns newlines into spaces and trims the ends.
pub fn clean_description(text: &str) -> String {
    text.replace('\n', " ").trim().to_string()
}
