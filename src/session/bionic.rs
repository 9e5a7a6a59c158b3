//! Bionic reading: the leading part of every word is emphasized so the eye
//! can anchor on it.

pub const MIN_FIXATION: u8 = 30;
pub const MAX_FIXATION: u8 = 70;
pub const DEFAULT_FIXATION: u8 = 50;

/// Clamp a fixation percentage to the supported range.
pub fn clamp_fixation(percent: u8) -> u8 {
    percent.clamp(MIN_FIXATION, MAX_FIXATION)
}

/// A word split into its emphasized prefix and the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct BionicWord<'a> {
    pub bold: &'a str,
    pub normal: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(tag = "type", rename_all = "lowercase"))]
pub enum Segment<'a> {
    Word(BionicWord<'a>),
    /// A single space between two words.
    Space,
}

/// Split `word` so that `percent` of its characters (rounded up, at least
/// one) are emphasized. Words of one character are emphasized entirely.
pub fn transform_word(word: &str, percent: u8) -> BionicWord<'_> {
    let len = word.chars().count();
    if len <= 1 {
        return BionicWord {
            bold: word,
            normal: "",
        };
    }

    let percent = usize::from(percent.min(100));
    let fix_len = (len * percent).div_ceil(100).max(1);
    let split = word
        .char_indices()
        .nth(fix_len)
        .map_or(word.len(), |(idx, _)| idx);

    let (bold, normal) = word.split_at(split);
    BionicWord { bold, normal }
}

/// Transform `text` paragraph by paragraph.
///
/// Paragraphs are separated by two or more consecutive newlines. Within a
/// paragraph, words are separated by single [`Segment::Space`]s; blank
/// paragraphs are dropped.
pub fn paragraphs(text: &str, percent: u8) -> Vec<Vec<Segment<'_>>> {
    split_paragraphs(text)
        .map(|paragraph| {
            let mut segments = Vec::new();
            for (i, word) in paragraph.split_whitespace().enumerate() {
                if i > 0 {
                    segments.push(Segment::Space);
                }
                segments.push(Segment::Word(transform_word(word, percent)));
            }
            segments
        })
        .filter(|segments| !segments.is_empty())
        .collect()
}

fn split_paragraphs(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match memchr::memmem::find(rest.as_bytes(), b"\n\n") {
            Some(pos) => {
                let paragraph = &rest[..pos];
                rest = rest[pos..].trim_start_matches('\n');
                Some(paragraph)
            }
            None => Some(std::mem::take(&mut rest)),
        }
    })
}
