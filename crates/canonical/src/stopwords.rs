use std::fs;
use std::path::Path;

use fxhash::FxHashSet;

use crate::error::CanonicalError;
use crate::normalize::Normalizer;

/// Ordered list of stopwords plus a hash set for membership checks.
///
/// Every entry is trimmed and passed through the same [`Normalizer`] used on
/// chat text, so a token matches when its normalized form equals a stored
/// entry exactly. Blank lines never become entries.
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: Vec<String>,
    lookup: FxHashSet<String>,
    normalizer: Normalizer,
}

impl StopwordSet {
    /// Loads a UTF-8 stopword file with one word per line.
    pub fn from_path(path: impl AsRef<Path>, normalizer: Normalizer) -> Result<Self, CanonicalError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CanonicalError::StopwordsIo {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_words(content.lines(), normalizer))
    }

    pub fn from_words<I, S>(words: I, normalizer: Normalizer) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|word| normalizer.normalize(word.as_ref().trim()))
            .filter(|word| !word.is_empty())
            .collect();
        let lookup = words.iter().cloned().collect();
        Self {
            words,
            lookup,
            normalizer,
        }
    }

    /// An empty set that filters nothing.
    pub fn empty(normalizer: Normalizer) -> Self {
        Self::from_words(std::iter::empty::<&str>(), normalizer)
    }

    /// Exact membership check against already normalized text.
    pub fn contains(&self, normalized: &str) -> bool {
        self.lookup.contains(normalized)
    }

    /// Normalizes `token` and checks membership.
    pub fn is_stopword(&self, token: &str) -> bool {
        self.contains(&self.normalizer.normalize(token))
    }

    /// Keeps the tokens that are not stopwords, preserving order.
    pub fn filter_tokens<'a, I>(&self, tokens: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        tokens
            .into_iter()
            .filter(|token| !self.is_stopword(token))
            .collect()
    }

    /// Entries in file order, duplicates included.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }
}
