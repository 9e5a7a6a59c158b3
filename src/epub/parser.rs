//! EPUB parsing utilities (container.xml, OPF)
//!
//! Both documents are scanned with the tolerant tokenizer rather than a
//! validating XML parser, so vendor quirks and broken markup never abort
//! a parse.

use std::collections::HashMap;

use crate::markup::decode_entities;
use crate::markup::tokenizer::{Tag, TagKind, Token, Tokenizer};

/// Fixed location of the container descriptor.
pub const CONTAINER_PATH: &str = "META-INF/container.xml";

/// Extensions of spine documents that are converted to text.
const CONTENT_EXTENSIONS: &[&str] = &[".html", ".xhtml", ".htm", ".xml"];

/// Title and reading order extracted from an OPF package document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Package {
    /// Declared title, trimmed. Empty when the package has none.
    pub title: String,
    /// Hrefs of the content documents in spine order, as written in the
    /// manifest (relative to the package document).
    pub spine_items: Vec<String>,
}

/// Parse META-INF/container.xml to find the OPF path.
///
/// Returns the `full-path` of the first `rootfile` element carrying a
/// non-empty one.
pub fn parse_container_xml(xml: &str) -> Option<String> {
    Tokenizer::new(xml).find_map(|token| match token {
        Token::Tag(tag) if tag.is_start() && tag.is_local("rootfile") => tag
            .attr("full-path")
            .filter(|path| !path.is_empty())
            .map(str::to_string),
        _ => None,
    })
}

/// Parse OPF package document.
pub fn parse_opf(opf: &str) -> Package {
    let tokens: Vec<Token<'_>> = Tokenizer::new(opf).collect();

    let title = extract_title(&tokens);
    let manifest = build_manifest(&tokens);
    log::debug!("manifest has {} items", manifest.len());

    let mut spine_items = Vec::new();
    for idref in spine_idrefs(&tokens) {
        match manifest.get(idref) {
            Some(href) if is_content_href(href) => spine_items.push(href.clone()),
            Some(href) => log::debug!("spine item {idref} ({href}) is not a content document"),
            None => log::debug!("spine item {idref} has no manifest entry"),
        }
    }

    Package { title, spine_items }
}

/// Title from `<dc:title>`, falling back to a plain `<title>`.
fn extract_title(tokens: &[Token<'_>]) -> String {
    element_text(tokens, "dc:title")
        .or_else(|| element_text(tokens, "title"))
        .map(|text| decode_entities(text).trim().to_string())
        .unwrap_or_default()
}

/// Text of the first `<name>text</name>` run with non-empty text.
fn element_text<'a>(tokens: &[Token<'a>], name: &str) -> Option<&'a str> {
    tokens.windows(3).find_map(|window| match window {
        [Token::Tag(open), Token::Text(text), Token::Tag(close)]
            if open.kind() == TagKind::Open
                && open.is(name)
                && close.kind() == TagKind::Close
                && close.is(name)
                && !text.is_empty() =>
        {
            Some(*text)
        }
        _ => None,
    })
}

/// Which attribute must come first for a manifest pass to accept an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttrOrder {
    IdFirst,
    HrefFirst,
}

/// `(id, href)` of a manifest item, if both are present, non-empty and
/// appear in the requested order.
fn ordered_id_href<'a>(tag: &Tag<'a>, order: AttrOrder) -> Option<(&'a str, &'a str)> {
    let mut id = None;
    let mut href = None;

    for (pos, attr) in tag.attributes().enumerate() {
        if attr.value.is_empty() {
            continue;
        }
        if id.is_none() && attr.name.eq_ignore_ascii_case("id") {
            id = Some((pos, attr.value));
        } else if href.is_none() && attr.name.eq_ignore_ascii_case("href") {
            href = Some((pos, attr.value));
        }
    }

    let ((id_pos, id), (href_pos, href)) = (id?, href?);
    let in_order = match order {
        AttrOrder::IdFirst => id_pos < href_pos,
        AttrOrder::HrefFirst => href_pos < id_pos,
    };

    in_order.then_some((id, href))
}

/// Build the id -> href manifest.
///
/// Items are scanned twice: first those declaring `id` before `href`, then
/// those declaring `href` before `id`. Later entries overwrite earlier ones,
/// so for a duplicated id the second pass wins, and within a pass the last
/// item wins.
fn build_manifest(tokens: &[Token<'_>]) -> HashMap<String, String> {
    let items: Vec<&Tag<'_>> = tokens
        .iter()
        .filter_map(|token| match token {
            Token::Tag(tag) if tag.is_start() && tag.is_local("item") => Some(tag),
            _ => None,
        })
        .collect();

    let mut manifest = HashMap::new();
    for order in [AttrOrder::IdFirst, AttrOrder::HrefFirst] {
        for tag in &items {
            if let Some((id, href)) = ordered_id_href(tag, order) {
                manifest.insert(id.to_string(), href.to_string());
            }
        }
    }

    manifest
}

/// `idref`s of all `itemref` elements in document order.
fn spine_idrefs<'t, 'a>(tokens: &'t [Token<'a>]) -> impl Iterator<Item = &'a str> + 't {
    tokens.iter().filter_map(|token| match token {
        Token::Tag(tag) if tag.is_start() && tag.is_local("itemref") => {
            tag.attr("idref").filter(|idref| !idref.is_empty())
        }
        _ => None,
    })
}

/// Whether an href names an (X)HTML or XML document. A `#fragment` is
/// ignored.
pub fn is_content_href(href: &str) -> bool {
    let path = href.split('#').next().unwrap_or(href);
    let lower = path.to_ascii_lowercase();
    CONTENT_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}
