//! Configuration types for the normalizer.
//!
//! [`NormalizerConfig`] toggles each normalization step independently. The
//! default enables every step, which is what the word-cloud pipeline uses for
//! both chat text and the stopword list so comparisons stay consistent.
//!
//! # Examples
//!
//! ```rust
//! use canonical::NormalizerConfig;
//!
//! let config = NormalizerConfig::default();
//! assert!(config.compose_unicode);
//! assert!(config.persian_digits);
//! ```
//!
//! ## Keeping Latin digits
//!
//! ```rust
//! use canonical::NormalizerConfig;
//!
//! let config = NormalizerConfig {
//!     persian_digits: false,
//!     ..Default::default()
//! };
//! assert!(!config.persian_digits);
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for [`Normalizer`](crate::Normalizer).
///
/// Serializes to a flat map so it can be embedded in YAML configuration:
///
/// ```yaml
/// compose_unicode: true
/// unify_letters: true
/// persian_digits: true
/// persian_punctuation: true
/// remove_diacritics: true
/// remove_kashida: true
/// collapse_spaces: true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Apply Unicode NFC composition before any other step.
    ///
    /// Composition runs first so that decomposed hamza forms (alef + U+0654)
    /// collapse into their precomposed letter before diacritics are stripped.
    pub compose_unicode: bool,

    /// Map Arabic letter variants onto their Persian counterparts.
    ///
    /// ```text
    /// ك (U+0643) → ک (U+06A9)
    /// ي (U+064A) → ی (U+06CC)
    /// ى (U+0649) → ی (U+06CC)
    /// ة (U+0629) → ه (U+0647)
    /// ```
    pub unify_letters: bool,

    /// Rewrite ASCII and Arabic-Indic digits as Persian digits (U+06F0..U+06F9).
    pub persian_digits: bool,

    /// Rewrite `%` and `;` as their Arabic-script forms `٪` and `؛`.
    pub persian_punctuation: bool,

    /// Drop Arabic harakat (U+064B..U+065F) and superscript alef (U+0670).
    pub remove_diacritics: bool,

    /// Drop tatweel (U+0640), the elongation character.
    pub remove_kashida: bool,

    /// Collapse whitespace runs to single spaces, trim the edges, and clean
    /// up zero-width non-joiners that are doubled or touch whitespace.
    pub collapse_spaces: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            compose_unicode: true,
            unify_letters: true,
            persian_digits: true,
            persian_punctuation: true,
            remove_diacritics: true,
            remove_kashida: true,
            collapse_spaces: true,
        }
    }
}

impl NormalizerConfig {
    /// A configuration with every step disabled; `normalize` becomes the identity.
    pub fn disabled() -> Self {
        Self {
            compose_unicode: false,
            unify_letters: false,
            persian_digits: false,
            persian_punctuation: false,
            remove_diacritics: false,
            remove_kashida: false,
            collapse_spaces: false,
        }
    }
}
