use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;

use crate::config::NormalizerConfig;
use crate::whitespace::collapse_whitespace;

/// Zero-width non-joiner, the Persian half-space.
pub(crate) const ZWNJ: char = '\u{200C}';

const TATWEEL: char = '\u{0640}';

/// Canonicalizes equivalent character variants to a single representation.
///
/// The normalizer is a pure function of its input and configuration: no I/O,
/// no locale dependence. It is idempotent, so running it over already
/// normalized text (for instance the joined output of several normalized
/// tokens) leaves the text unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize `text` according to the configured steps.
    pub fn normalize(&self, text: &str) -> String {
        let cfg = &self.config;

        // Composition first: it changes character boundaries for everything after it.
        let composed: Cow<str> = if cfg.compose_unicode {
            Cow::Owned(text.nfc().collect::<String>())
        } else {
            Cow::Borrowed(text)
        };

        let mut mapped = String::with_capacity(composed.len());
        for ch in composed.chars() {
            if cfg.remove_diacritics && is_diacritic(ch) {
                continue;
            }
            if cfg.remove_kashida && ch == TATWEEL {
                continue;
            }
            mapped.push(self.map_char(ch));
        }

        if !cfg.collapse_spaces {
            return mapped;
        }

        clean_zwnj(&collapse_whitespace(&mapped))
    }

    fn map_char(&self, ch: char) -> char {
        let cfg = &self.config;
        if cfg.unify_letters {
            match ch {
                '\u{0643}' => return '\u{06A9}',
                '\u{064A}' | '\u{0649}' => return '\u{06CC}',
                '\u{0629}' => return '\u{0647}',
                _ => {}
            }
        }
        if cfg.persian_digits {
            if let Some(digit) = persian_digit(ch) {
                return digit;
            }
        }
        if cfg.persian_punctuation {
            match ch {
                '%' => return '\u{066A}',
                ';' => return '\u{061B}',
                _ => {}
            }
        }
        ch
    }
}

fn is_diacritic(ch: char) -> bool {
    matches!(ch, '\u{064B}'..='\u{065F}' | '\u{0670}')
}

fn persian_digit(ch: char) -> Option<char> {
    let offset = match ch {
        '0'..='9' => ch as u32 - '0' as u32,
        '\u{0660}'..='\u{0669}' => ch as u32 - 0x0660,
        _ => return None,
    };
    char::from_u32(0x06F0 + offset)
}

/// Drops ZWNJs that are doubled, sit at either edge, or touch a space.
///
/// Expects whitespace already collapsed to single ASCII spaces.
fn clean_zwnj(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            ZWNJ => {
                if matches!(out.chars().last(), None | Some(' ') | Some(ZWNJ)) {
                    continue;
                }
                out.push(ch);
            }
            ' ' => {
                while out.ends_with(ZWNJ) {
                    out.pop();
                }
                if out.is_empty() || out.ends_with(' ') {
                    continue;
                }
                out.push(' ');
            }
            _ => out.push(ch),
        }
    }
    while out.ends_with(ZWNJ) || out.ends_with(' ') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(text: &str) -> String {
        Normalizer::default().normalize(text)
    }

    #[test]
    fn unifies_arabic_letter_variants() {
        assert_eq!(normalize("كتاب"), "کتاب");
        assert_eq!(normalize("علي"), "علی");
        assert_eq!(normalize("مدرسة"), "مدرسه");
    }

    #[test]
    fn rewrites_digits_as_persian() {
        assert_eq!(normalize("2024"), "۲۰۲۴");
        assert_eq!(normalize("\u{0661}\u{0662}"), "۱۲");
        assert_eq!(normalize("۳"), "۳");
    }

    #[test]
    fn strips_diacritics_and_kashida() {
        assert_eq!(normalize("کِتاب"), "کتاب");
        assert_eq!(normalize("سلـــام"), "سلام");
    }

    #[test]
    fn composes_decomposed_hamza() {
        // alef + hamza above composes to U+0623 instead of being stripped as a mark.
        assert_eq!(normalize("\u{0627}\u{0654}"), "\u{0623}");
    }

    #[test]
    fn cleans_zero_width_non_joiners() {
        assert_eq!(normalize("می\u{200C}\u{200C}روم"), "می\u{200C}روم");
        assert_eq!(normalize("\u{200C}سلام \u{200C}دنیا\u{200C}"), "سلام دنیا");
        assert_eq!(normalize("a \u{200C} b"), "a b");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("  hello \n\t world  "), "hello world");
    }

    #[test]
    fn latin_text_is_preserved() {
        assert_eq!(normalize("hello world"), "hello world");
        assert_eq!(normalize("Rust"), "Rust");
    }

    #[test]
    fn normalization_is_idempotent() {
        let inputs = [
            "كتاب‌هاي  خوب 12%",
            "  \u{200C}سلام\u{200C}\u{200C} دنيا ",
            "Café 100",
            "",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn disabled_config_is_identity() {
        let normalizer = Normalizer::new(NormalizerConfig::disabled());
        let input = "  كتاب 12 \u{200C} ";
        assert_eq!(normalizer.normalize(input), input);
    }
}
