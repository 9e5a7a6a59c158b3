//! Character entity decoding.
//!
//! Only a fixed table of named entities is understood, plus decimal
//! (`&#65;`) and hexadecimal (`&#x41;`) references. Anything else is left
//! in the text untouched.

use std::borrow::Cow;

use memchr::memchr;

/// Longest reference body we look at before giving up on finding `;`.
const MAX_REFERENCE_LEN: usize = 32;

/// Replacement for a named entity from the fixed table.
fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "nbsp" => ' ',
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "mdash" => '\u{2014}',
        "ndash" => '\u{2013}',
        "hellip" => '\u{2026}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "copy" => '\u{00A9}',
        "reg" => '\u{00AE}',
        "trade" => '\u{2122}',
        _ => return None,
    };
    Some(c)
}

fn numeric_reference(body: &str) -> Option<char> {
    let (digits, radix) = match body.strip_prefix(['x', 'X']) {
        Some(hex) => (hex, 16),
        None => (body, 10),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)
        .filter(|&c| c != '\0')
}

/// Decode the reference that follows an `&`.
///
/// Returns the character and the number of bytes consumed after the `&`,
/// including the terminating `;`.
fn decode_reference(after_amp: &str) -> Option<(char, usize)> {
    let end = after_amp
        .bytes()
        .take(MAX_REFERENCE_LEN)
        .position(|b| b == b';')?;
    let body = &after_amp[..end];

    let c = match body.strip_prefix('#') {
        Some(number) => numeric_reference(number)?,
        None => named_entity(body)?,
    };

    Some((c, end + 1))
}

/// Decode character entities in a single left-to-right pass.
///
/// Decoded output is never decoded again, so `&amp;lt;` becomes `&lt;`.
///
/// ```
/// use speedread::markup::decode_entities;
///
/// assert_eq!(decode_entities("Tom &amp; Jerry&hellip;"), "Tom & Jerry\u{2026}");
/// assert_eq!(decode_entities("Caf&eacute;"), "Caf&eacute;");
/// ```
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let Some(first) = memchr(b'&', bytes) else {
        return Cow::Borrowed(text);
    };

    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut search = first;

    while let Some(rel) = memchr(b'&', &bytes[search..]) {
        let amp = search + rel;
        match decode_reference(&text[amp + 1..]) {
            Some((c, consumed)) => {
                out.push_str(&text[copied..amp]);
                out.push(c);
                copied = amp + 1 + consumed;
                search = copied;
            }
            None => search = amp + 1,
        }
    }

    if copied == 0 {
        return Cow::Borrowed(text);
    }

    out.push_str(&text[copied..]);
    Cow::Owned(out)
}
