//! Canonical text layer for chat statistics.
//!
//! Turns raw chat text into comparable word tokens. Downstream stages (word
//! frequency counting, display shaping) rely on this for stable identity of
//! words across spelling variants.
//!
//! ## What we do
//!
//! - Persian-oriented normalization: NFC composition, Arabic → Persian letter
//!   unification, Persian digits, diacritic and kashida removal, ZWNJ cleanup
//! - Word tokenization on Unicode word boundaries, with byte offsets
//! - Stopword filtering where both sides go through the same normalizer
//!
//! ## Pure function guarantee
//!
//! Apart from [`StopwordSet::from_path`], nothing here touches the file
//! system. Same text and config in, same output out, on any machine.

mod config;
mod error;
mod normalize;
mod stopwords;
mod token;
mod whitespace;

pub use crate::config::NormalizerConfig;
pub use crate::error::CanonicalError;
pub use crate::normalize::Normalizer;
pub use crate::stopwords::StopwordSet;
pub use crate::token::{tokenize, word_tokens, Token};
pub use crate::whitespace::{collapse_whitespace, join_nonempty};

/// Tokenizes `text` and drops stopwords, joining survivors with single spaces.
///
/// Surviving tokens keep their original spelling; only the stopword
/// comparison happens on normalized forms.
pub fn filter_text(text: &str, stopwords: &StopwordSet) -> String {
    join_nonempty(stopwords.filter_tokens(word_tokens(text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_text_removes_stopwords() {
        let stopwords = StopwordSet::from_words(["world"], Normalizer::default());
        assert_eq!(filter_text("hello world", &stopwords), "hello");
        assert_eq!(filter_text("hello", &stopwords), "hello");
    }

    #[test]
    fn filter_text_of_only_stopwords_is_empty() {
        let stopwords = StopwordSet::from_words(["از", "به"], Normalizer::default());
        assert_eq!(filter_text("از به از", &stopwords), "");
    }

    #[test]
    fn filter_text_is_idempotent() {
        let stopwords = StopwordSet::from_words(["the", "a"], Normalizer::default());
        let once = filter_text("the cat saw a dog, the end", &stopwords);
        assert_eq!(once, "cat saw dog end");
        assert_eq!(filter_text(&once, &stopwords), once);
    }

    #[test]
    fn persian_stopwords_match_arabic_spellings() {
        let stopwords = StopwordSet::from_words(["یک"], Normalizer::default());
        assert_eq!(filter_text("يك کتاب", &stopwords), "کتاب");
    }
}
