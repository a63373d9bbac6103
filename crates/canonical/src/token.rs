use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// A word token with its UTF-8 byte offsets in the source text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// The token text content.
    pub text: String,
    /// Byte offset (inclusive) in the source text.
    pub start: usize,
    /// Byte offset (exclusive) in the source text.
    pub end: usize,
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.text.as_str()
    }
}

/// Splits `text` into word tokens using Unicode word boundaries (UAX #29).
///
/// Boundaries follow the segmentation rules rather than plain whitespace, so
/// punctuation is split off (`"hello,"` yields `"hello"`), apostrophes inside
/// words are kept (`"it's"`), and a zero-width non-joiner stays inside the
/// word it joins. Segments with no alphanumeric character (punctuation,
/// whitespace, emoji) are dropped.
pub fn tokenize(text: &str) -> Vec<Token> {
    text.split_word_bound_indices()
        .filter(|(_, segment)| is_word(segment))
        .map(|(start, segment)| Token {
            text: segment.to_string(),
            start,
            end: start + segment.len(),
        })
        .collect()
}

/// Borrowing variant of [`tokenize`] for callers that only need the text.
pub fn word_tokens(text: &str) -> Vec<&str> {
    text.split_word_bounds().filter(|s| is_word(s)).collect()
}

fn is_word(segment: &str) -> bool {
    segment.chars().any(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_punctuation_and_whitespace() {
        assert_eq!(
            word_tokens("Hello, world! It's   fine."),
            vec!["Hello", "world", "It's", "fine"]
        );
    }

    #[test]
    fn keeps_zwnj_inside_words() {
        assert_eq!(word_tokens("من می\u{200C}روم"), vec!["من", "می\u{200C}روم"]);
    }

    #[test]
    fn drops_symbol_only_segments() {
        assert_eq!(word_tokens("🙂 ... ؟ !"), Vec::<&str>::new());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn offsets_point_into_source() {
        let text = " a\u{10348}b  c ";
        let tokens = tokenize(text);
        assert_eq!(tokens.len(), 2);
        for token in &tokens {
            assert_eq!(&text[token.start..token.end], token.text);
        }
        assert_eq!(tokens[0].start, 1);
    }

    #[test]
    fn persian_sentence_tokens() {
        assert_eq!(
            word_tokens("سلام، حال شما چطوره؟"),
            vec!["سلام", "حال", "شما", "چطوره"]
        );
    }
}
