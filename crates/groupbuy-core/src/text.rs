//! Message-text enrichment: HTML escaping, URL linkification, line breaks.
//!
//! The pipeline order is contractual. Escaping runs first so URLs
//! containing `&` render correctly inside the anchor; linkification runs
//! before newline substitution so an inserted `<br>` can never split a
//! matched URL (the URL pattern itself stops at whitespace).

use std::sync::LazyLock;

use regex::Regex;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());

/// Escape `&`, `<`, and `>`. Ampersand first, so already-produced entities
/// are not double-escaped.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Prepare raw message text for rendering: escape, wrap each
/// `http(s)://…` run in an anchor (`target="_blank" rel="noopener"`), then
/// turn newlines into `<br>`.
pub fn format_message_text(text: &str) -> String {
    let escaped = escape_html(text);
    let linked = URL_RE.replace_all(
        &escaped,
        r#"<a href="$0" target="_blank" rel="noopener">$0</a>"#,
    );
    linked.replace('\n', "<br>")
}
