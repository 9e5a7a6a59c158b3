//! Text decoding and file-name helpers shared by the EPUB pipeline.

use std::borrow::Cow;

/// Decode archive bytes to a string.
///
/// This function:
/// 1. Decodes as UTF-8 (a BOM is stripped by encoding_rs, invalid sequences
///    become U+FFFD)
/// 2. If the UTF-8 decode was malformed and the document carries an
///    `<?xml encoding="..."?>` declaration naming an ASCII-compatible
///    encoding that encoding_rs knows, decodes with that encoding instead.
///    A declaration of UTF-16 or another non-ASCII encoding cannot be
///    honest in bytes where it was read as ASCII, so it is ignored.
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(decode_text(b"\xEF\xBB\xBFHello"), "Hello");
/// assert_eq!(decode_text(b"caf\xE9"), "caf\u{FFFD}");
/// ```
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = extract_xml_encoding(bytes)
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
        && encoding != encoding_rs::UTF_8
        && encoding.is_ascii_compatible()
    {
        log::debug!("decoding with declared encoding {}", encoding.name());
        let (declared, _, _) = encoding.decode(bytes);
        return declared;
    }

    result
}

/// Extract encoding from XML declaration.
///
/// Parses `<?xml ... encoding="..." ?>` to extract the encoding name.
/// Only the first 100 bytes are checked.
pub fn extract_xml_encoding(bytes: &[u8]) -> Option<&str> {
    let check_len = bytes.len().min(100);
    let prefix = &bytes[..check_len];

    let xml_start = prefix.windows(5).position(|w| w == b"<?xml")?;
    let after_xml = &prefix[xml_start..];

    let enc_pos = after_xml
        .windows(9)
        .position(|w| w.eq_ignore_ascii_case(b"encoding="))?;
    let after_enc = &after_xml[enc_pos + 9..];

    let (&quote, rest) = after_enc.split_first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }

    let value_end = rest.iter().position(|&b| b == quote)?;
    std::str::from_utf8(&rest[..value_end]).ok()
}

/// Title to fall back on when the package declares none.
///
/// Takes the final path component and removes a trailing `.epub`
/// (any case): `"books/Moby Dick.EPUB"` becomes `"Moby Dick"`.
pub fn title_from_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);

    let cut = base.len().saturating_sub(".epub".len());
    match base.get(cut..) {
        Some(ext) if ext.eq_ignore_ascii_case(".epub") => base[..cut].to_string(),
        _ => base.to_string(),
    }
}
