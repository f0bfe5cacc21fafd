//! Plain-text views of note HTML.

/// Default preview length in characters.
pub const PREVIEW_LENGTH: usize = 150;

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "br", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "tr", "td", "th",
    "blockquote", "pre", "hr",
];

/// Strips tags from editor HTML and collapses whitespace.
///
/// Block-level tags become word breaks so that `<li>a</li><li>b</li>` reads
/// `a b`; inline tags vanish. The common character entities are decoded.
/// Content inside `<script>` and `<style>` is not special-cased; the editor
/// does not produce them.
#[must_use]
pub fn strip_html_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('>') {
            Some(close) => {
                if is_block_tag(&after[..close]) {
                    text.push(' ');
                }
                rest = &after[close + 1..];
            }
            None => {
                // Unterminated tag: drop the remainder.
                rest = "";
            }
        }
    }
    text.push_str(rest);

    collapse_whitespace(&decode_entities(&text))
}

/// Plain-text preview of note content, cut to `max_len` characters.
///
/// Truncated previews are trimmed and end in `...`.
#[must_use]
pub fn content_preview(content: &str, max_len: usize) -> String {
    let text = strip_html_tags(content);
    if text.chars().count() <= max_len {
        return text;
    }

    let cut: String = text.chars().take(max_len).collect();
    format!("{}...", cut.trim_end())
}

fn is_block_tag(tag: &str) -> bool {
    let name = tag
        .trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    BLOCK_TAGS.contains(&name.as_str())
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
