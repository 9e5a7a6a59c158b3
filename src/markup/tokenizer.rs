//! Tolerant markup tokenizer.
//!
//! Splits HTML/XML-ish text into text runs, tags and other markup
//! (comments, doctypes, processing instructions) without ever failing.
//! Malformed input degrades to text: a `<` that does not start a tag is
//! emitted as a one-byte [`Token::Text`].
//!
//! # Example
//!
//! ```
//! use speedread::markup::tokenizer::{TagKind, Token, Tokenizer};
//!
//! let mut tokens = Tokenizer::new(r#"<item href="c1.xhtml" id="c1"/>"#);
//! let Some(Token::Tag(tag)) = tokens.next() else { panic!("expected a tag") };
//! assert_eq!(tag.name(), "item");
//! assert_eq!(tag.kind(), TagKind::SelfClosing);
//! assert_eq!(tag.attr("id"), Some("c1"));
//! ```

use memchr::{memchr, memmem};

/// One lexical unit of markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Character data between tags, entities still encoded.
    Text(&'a str),
    /// An element tag.
    Tag(Tag<'a>),
    /// Comments, doctypes, processing instructions and stray `<...>` runs.
    Markup(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `<p class="x">`
    Open,
    /// `</p>`
    Close,
    /// `<br/>`
    SelfClosing,
}

/// An element tag with lazily parsed attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    name: &'a str,
    kind: TagKind,
    attrs: &'a str,
}

impl<'a> Tag<'a> {
    /// Parse the inside of a tag, without the surrounding `<` and `>`.
    fn parse(inner: &'a str) -> Self {
        let (closing, body) = match inner.strip_prefix('/') {
            Some(body) => (true, body),
            None => (false, inner),
        };

        let body = body.trim_end();
        let (self_closing, body) = match body.strip_suffix('/') {
            Some(body) if !closing => (true, body),
            _ => (false, body),
        };

        let name_end = body
            .find(|c: char| c.is_ascii_whitespace() || c == '/')
            .unwrap_or(body.len());

        let kind = if closing {
            TagKind::Close
        } else if self_closing {
            TagKind::SelfClosing
        } else {
            TagKind::Open
        };

        Self {
            name: &body[..name_end],
            kind,
            attrs: &body[name_end..],
        }
    }

    /// Qualified name as written, e.g. `dc:title`.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Name without its namespace prefix: `opf:item` gives `item`.
    pub fn local_name(&self) -> &'a str {
        self.name
            .rsplit_once(':')
            .map_or(self.name, |(_, local)| local)
    }

    pub fn kind(&self) -> TagKind {
        self.kind
    }

    /// True for open and self-closing tags.
    pub fn is_start(&self) -> bool {
        self.kind != TagKind::Close
    }

    /// Case-insensitive match on the qualified name.
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Case-insensitive match on the local name.
    pub fn is_local(&self, name: &str) -> bool {
        self.local_name().eq_ignore_ascii_case(name)
    }

    /// Attributes in document order.
    pub fn attributes(&self) -> Attributes<'a> {
        Attributes { rest: self.attrs }
    }

    /// Value of the first attribute with the given name (case-insensitive).
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.attributes()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
            .map(|attr| attr.value)
    }
}

/// A single `name="value"` pair. Valueless attributes have an empty value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

/// Iterator over a tag's attributes.
#[derive(Debug, Clone)]
pub struct Attributes<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Attributes<'a> {
    type Item = Attribute<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let rest = self
                .rest
                .trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '/');
            if rest.is_empty() {
                self.rest = rest;
                return None;
            }

            let name_end = rest
                .find(|c: char| c.is_ascii_whitespace() || c == '=' || c == '/')
                .unwrap_or(rest.len());

            if name_end == 0 {
                // Stray '=' with no name in front of it
                self.rest = &rest[1..];
                continue;
            }

            let name = &rest[..name_end];
            let after = rest[name_end..].trim_start();

            let Some(value_part) = after.strip_prefix('=') else {
                self.rest = after;
                return Some(Attribute { name, value: "" });
            };

            let value_part = value_part.trim_start();
            let (value, rest) = match value_part.chars().next() {
                Some(quote @ ('"' | '\'')) => {
                    let body = &value_part[1..];
                    match body.find(quote) {
                        Some(end) => (&body[..end], &body[end + 1..]),
                        None => (body, ""),
                    }
                }
                _ => {
                    let end = value_part
                        .find(|c: char| c.is_ascii_whitespace())
                        .unwrap_or(value_part.len());
                    (&value_part[..end], &value_part[end..])
                }
            };

            self.rest = rest;
            return Some(Attribute { name, value });
        }
    }
}

/// Streaming tokenizer over a borrowed document.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
    /// Raw-text element names (lowercase) with the offset from which a
    /// search for their closing tag already failed.
    unclosed: Vec<(String, usize)>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            unclosed: Vec::new(),
        }
    }

    /// Skip the raw text of an element such as `<script>`, stopping after its
    /// closing tag.
    ///
    /// Call right after the element's open tag has been returned. Returns
    /// `false` and leaves the position unchanged if no closing tag exists.
    /// A failed search is remembered, so repeated unterminated elements of
    /// the same name cost one scan in total.
    pub fn skip_raw_text(&mut self, name: &str) -> bool {
        if self
            .unclosed
            .iter()
            .any(|(unclosed, from)| self.pos >= *from && unclosed.eq_ignore_ascii_case(name))
        {
            return false;
        }

        let bytes = self.src.as_bytes();
        let wanted = name.as_bytes();
        let mut search = self.pos;

        while let Some(rel) = memchr(b'<', &bytes[search..]) {
            let lt = search + rel;
            search = lt + 1;

            let name_start = lt + 2;
            let name_end = name_start + wanted.len();
            if bytes.get(lt + 1) != Some(&b'/')
                || !bytes
                    .get(name_start..name_end)
                    .is_some_and(|n| n.eq_ignore_ascii_case(wanted))
            {
                continue;
            }

            let after = bytes[name_end..]
                .iter()
                .position(|b| !b.is_ascii_whitespace())
                .map(|i| name_end + i);
            if let Some(gt) = after
                && bytes[gt] == b'>'
            {
                self.pos = gt + 1;
                return true;
            }
        }

        self.unclosed.push((name.to_ascii_lowercase(), self.pos));
        false
    }

    /// Token starting at a `<`, or `None` if the `<` starts nothing.
    fn markup_at(&mut self, start: usize) -> Option<Token<'a>> {
        let src = self.src;
        let bytes = src.as_bytes();
        let rest = &src[start..];

        if rest.starts_with("<!--") {
            let end = memmem::find(&bytes[start + 4..], b"-->")
                .map(|i| start + 4 + i + 3)
                .or_else(|| self.first_gt(start))?;
            self.pos = end;
            return Some(Token::Markup(&src[start..end]));
        }

        if rest.starts_with("<![CDATA[") {
            let body = start + 9;
            if let Some(i) = memmem::find(&bytes[body..], b"]]>") {
                self.pos = body + i + 3;
                return Some(Token::Text(&src[body..body + i]));
            }
        }

        let second = *bytes.get(start + 1)?;
        let starts_element = second.is_ascii_alphabetic()
            || (second == b'/' && bytes.get(start + 2).is_some_and(u8::is_ascii_alphabetic));

        if starts_element && let Some(end) = self.tag_end(start) {
            self.pos = end;
            return Some(Token::Tag(Tag::parse(&src[start + 1..end - 1])));
        }

        if second == b'>' {
            return None;
        }

        let end = self.first_gt(start)?;
        self.pos = end;
        Some(Token::Markup(&src[start..end]))
    }

    /// End (exclusive) of an element tag, honouring quoted attribute values.
    ///
    /// Falls back to the first `>` when a quote is never closed.
    fn tag_end(&self, start: usize) -> Option<usize> {
        let bytes = self.src.as_bytes();
        let mut quote: Option<u8> = None;
        let mut last = 0u8;

        for (i, &b) in bytes[start + 1..].iter().enumerate() {
            match quote {
                Some(q) => {
                    if b == q {
                        quote = None;
                        last = b;
                    }
                }
                None => match b {
                    b'>' => return Some(start + 1 + i + 1),
                    b'"' | b'\'' if last == b'=' => quote = Some(b),
                    _ if b.is_ascii_whitespace() => {}
                    _ => last = b,
                },
            }
        }

        self.first_gt(start)
    }

    fn first_gt(&self, start: usize) -> Option<usize> {
        memchr(b'>', &self.src.as_bytes()[start + 1..]).map(|i| start + 1 + i + 1)
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let src = self.src;
        let bytes = src.as_bytes();
        let start = self.pos;

        if start >= bytes.len() {
            return None;
        }

        if bytes[start] != b'<' {
            let end = memchr(b'<', &bytes[start..]).map_or(bytes.len(), |i| start + i);
            self.pos = end;
            return Some(Token::Text(&src[start..end]));
        }

        if let Some(token) = self.markup_at(start) {
            return Some(token);
        }

        self.pos = start + 1;
        Some(Token::Text(&src[start..start + 1]))
    }
}
