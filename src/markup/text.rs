//! Markup to plain text conversion.
//!
//! The conversion runs in a fixed order:
//!
//! 1. `<script>` and `<style>` elements are removed with their contents
//! 2. Block-level tags become line breaks
//! 3. All other tags, comments and declarations become a single space
//! 4. Character entities are decoded
//! 5. Whitespace is collapsed within lines and empty lines are dropped
//!
//! Steps 1-3 happen in one tokenizer pass ([`strip_markup`]). Entities are
//! decoded only afterwards, so `&lt;p&gt;` in the source stays text.

use super::entities::decode_entities;
use super::tokenizer::{TagKind, Token, Tokenizer};

/// Elements whose opening and closing tags start a new line.
const BLOCK_TAGS: &[&str] = &[
    "p",
    "pre",
    "div",
    "br",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "li",
    "tr",
    "blockquote",
];

/// Elements whose content is dropped entirely.
const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

fn is_block(name: &str) -> bool {
    BLOCK_TAGS.iter().any(|block| name.eq_ignore_ascii_case(block))
}

/// Convert a chapter's markup to normalized plain text.
///
/// Never fails: malformed markup degrades to best-effort text.
///
/// ```
/// use speedread::markup::html_to_text;
///
/// let text = html_to_text("<p>Hello <b>world</b></p><p>Next</p>");
/// assert_eq!(text, "Hello world\nNext");
/// ```
pub fn html_to_text(html: &str) -> String {
    let stripped = strip_markup(html);
    let decoded = decode_entities(&stripped);
    normalize_whitespace(&decoded)
}

/// Remove script/style blocks and replace tags with line breaks or spaces.
///
/// Text between tags is copied verbatim, entities included.
pub fn strip_markup(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut tokens = Tokenizer::new(html);

    while let Some(token) = tokens.next() {
        match token {
            Token::Text(text) => out.push_str(text),
            Token::Tag(tag) => {
                if tag.kind() == TagKind::Open
                    && let Some(raw) = RAW_TEXT_TAGS.iter().find(|raw| tag.is(raw))
                    && tokens.skip_raw_text(raw)
                {
                    continue;
                }
                out.push(if is_block(tag.name()) { '\n' } else { ' ' });
            }
            Token::Markup(_) => out.push(' '),
        }
    }

    out
}

/// Collapse whitespace runs to one space, trim every line and drop empty
/// lines.
pub fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for line in text.split('\n') {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            continue;
        };

        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(first);
        for word in words {
            out.push(' ');
            out.push_str(word);
        }
    }

    out
}
