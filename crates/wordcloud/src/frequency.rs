use fxhash::FxHashMap;

/// Word counts ordered by descending count, ties broken by the word itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequencies {
    entries: Vec<(String, u32)>,
}

impl WordFrequencies {
    /// Counts words in space-delimited text.
    ///
    /// Leading and trailing non-alphanumeric characters are trimmed from each
    /// word, and words shorter than two characters are ignored. Case variants
    /// are counted together under their most frequent spelling.
    pub fn from_text(text: &str) -> Self {
        // lowercase key -> spelling -> count
        let mut variants: FxHashMap<String, FxHashMap<&str, u32>> = FxHashMap::default();
        for raw in text.split_whitespace() {
            let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
            if word.chars().count() < 2 {
                continue;
            }
            *variants
                .entry(word.to_lowercase())
                .or_default()
                .entry(word)
                .or_insert(0) += 1;
        }

        let counts = variants.into_values().map(|spellings| {
            let total: u32 = spellings.values().sum();
            let preferred = spellings
                .iter()
                .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
                .map(|(spelling, _)| spelling.to_string())
                .unwrap_or_default();
            (preferred, total)
        });
        Self::from_counts(counts)
    }

    /// Builds frequencies from precomputed counts; zero counts are dropped
    /// and repeated words are summed.
    pub fn from_counts<I, S>(counts: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut merged: FxHashMap<String, u32> = FxHashMap::default();
        for (word, count) in counts {
            if count == 0 {
                continue;
            }
            *merged.entry(word.into()).or_insert(0) += count;
        }
        let mut entries: Vec<(String, u32)> = merged.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, u32)] {
        &self.entries
    }

    /// The `n` most frequent entries.
    pub fn top(&self, n: usize) -> &[(String, u32)] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn get(&self, word: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, count)| *count)
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| u64::from(*c)).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_orders_words() {
        let freqs = WordFrequencies::from_text("rust go rust zig go rust");
        assert_eq!(
            freqs.entries(),
            &[
                ("rust".to_string(), 3),
                ("go".to_string(), 2),
                ("zig".to_string(), 1)
            ]
        );
        assert_eq!(freqs.total(), 6);
    }

    #[test]
    fn short_words_and_punctuation_are_dropped() {
        let freqs = WordFrequencies::from_text("a I \"hello,\" (hello) !! ...");
        assert_eq!(freqs.entries(), &[("hello".to_string(), 2)]);
    }

    #[test]
    fn case_variants_merge_under_common_spelling() {
        let freqs = WordFrequencies::from_text("Rust rust rust RUST");
        assert_eq!(freqs.entries(), &[("rust".to_string(), 4)]);
    }

    #[test]
    fn empty_text_has_no_words() {
        assert!(WordFrequencies::from_text("").is_empty());
        assert!(WordFrequencies::from_text("   ").is_empty());
    }

    #[test]
    fn word_order_does_not_change_frequencies() {
        let a = WordFrequencies::from_text("hello world hello rust");
        let b = WordFrequencies::from_text("rust hello world hello");
        assert_eq!(a, b);
    }

    #[test]
    fn from_counts_merges_and_drops_zero() {
        let freqs = WordFrequencies::from_counts([("a1", 2), ("b2", 0), ("a1", 3)]);
        assert_eq!(freqs.entries(), &[("a1".to_string(), 5)]);
        assert_eq!(freqs.get("a1"), Some(5));
        assert_eq!(freqs.get("b2"), None);
        assert_eq!(freqs.top(10).len(), 1);
    }

    #[test]
    fn persian_words_are_counted() {
        let freqs = WordFrequencies::from_text("سلام دنیا سلام");
        assert_eq!(freqs.get("سلام"), Some(2));
    }
}
