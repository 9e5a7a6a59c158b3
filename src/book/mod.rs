/// Text extracted from an EPUB, ready for a reading session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct ParsedEpub {
    /// Declared title, or the source file's name without `.epub`.
    pub title: String,
    /// Chapter texts in spine order, separated by a blank line.
    pub content: String,
}

impl ParsedEpub {
    /// Whitespace-separated words of the content.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.content.split_whitespace()
    }

    /// Chapter texts in reading order.
    pub fn chapters(&self) -> impl Iterator<Item = &str> {
        self.content
            .split("\n\n")
            .filter(|chapter| !chapter.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_and_chapters() {
        let book = ParsedEpub {
            title: "T".into(),
            content: "One two\nthree\n\nFour".into(),
        };
        assert_eq!(book.words().count(), 4);
        assert_eq!(book.chapters().collect::<Vec<_>>(), vec!["One two\nthree", "Four"]);
    }

    #[test]
    fn test_empty_content() {
        let book = ParsedEpub::default();
        assert_eq!(book.words().count(), 0);
        assert_eq!(book.chapters().count(), 0);
    }
}
