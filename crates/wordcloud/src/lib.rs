//! Word cloud generation.
//!
//! Space-delimited text goes in, a PNG comes out:
//!
//! 1. [`WordFrequencies`] counts words (case variants merged).
//! 2. [`layout_words`] places the most frequent words on a spiral, shrinking
//!    fonts until they fit, measured through a [`TextMeasure`].
//! 3. [`rasterize`] draws the layout with the configured font via an SVG
//!    scene (usvg + resvg) into an RGBA image.
//! 4. [`RenderedCloud::to_file`] encodes PNG and moves it into place.
//!
//! Text is drawn exactly as given. Right-to-left scripts must already be
//! shaped and in visual order when they reach this crate.

mod config;
mod error;
mod font;
mod frequency;
mod layout;
mod render;
mod svg;

use std::time::Instant;

use tracing::{info, warn};

pub use crate::config::{Color, WordCloudConfig, DEFAULT_PALETTE};
pub use crate::error::WordCloudError;
pub use crate::font::{FontFace, FontMeasure};
pub use crate::frequency::WordFrequencies;
pub use crate::layout::{
    layout_words, PlacedWord, TextExtent, TextMeasure, WordCloudLayout,
};
pub use crate::render::{blank, rasterize, RenderedCloud};

/// Configured word cloud generator.
#[derive(Debug, Clone)]
pub struct WordCloud {
    config: WordCloudConfig,
}

impl WordCloud {
    /// Validates `config` and builds a generator from it.
    pub fn new(config: WordCloudConfig) -> Result<Self, WordCloudError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Settings every generation call uses.
    pub fn config(&self) -> &WordCloudConfig {
        &self.config
    }

    /// Counts words in `text` and renders them.
    pub fn generate(&self, text: &str) -> Result<RenderedCloud, WordCloudError> {
        self.generate_from_frequencies(&WordFrequencies::from_text(text))
    }

    /// Renders precomputed frequencies.
    ///
    /// No words yields a background-only image; the font is only loaded when
    /// there is something to draw. A missing font file falls back to the
    /// system fonts when [`WordCloudConfig::system_font_fallback`] is set.
    pub fn generate_from_frequencies(
        &self,
        freqs: &WordFrequencies,
    ) -> Result<RenderedCloud, WordCloudError> {
        let start = Instant::now();
        let cfg = &self.config;

        if freqs.is_empty() {
            info!(
                width = cfg.width,
                height = cfg.height,
                "wordcloud_blank"
            );
            return blank(cfg.width, cfg.height, cfg.background);
        }

        let result = FontFace::load_or_system(&cfg.font_path, cfg.system_font_fallback)
            .and_then(|font| {
                let candidates = freqs.top(cfg.max_words);
                let measure =
                    FontMeasure::prepare(&font, candidates.iter().map(|(w, _)| w.as_str()))?;
                let layout = layout_words(freqs, &measure, cfg);
                rasterize(layout, &font, cfg.background)
            });

        match &result {
            Ok(cloud) => info!(
                distinct_words = freqs.len(),
                placed_words = cloud.layout().words.len(),
                width = cfg.width,
                height = cfg.height,
                elapsed_micros = start.elapsed().as_micros() as u64,
                "wordcloud_rendered"
            ),
            Err(err) => warn!(
                font = %cfg.font_path.display(),
                error = %err,
                elapsed_micros = start.elapsed().as_micros() as u64,
                "wordcloud_failure"
            ),
        }
        result
    }
}
