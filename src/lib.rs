//! Workspace umbrella crate for chat statistics.
//!
//! This crate stitches together chat export loading, text canonicalization,
//! display shaping and word cloud rendering so callers can go from an export
//! file to an image with a single API entry point:
//!
//! ```no_run
//! use chatstat::{ChatStatistics, StatsConfig};
//!
//! # fn main() -> Result<(), chatstat::StatsError> {
//! let config = StatsConfig::from_data_dir("data");
//! let stats = ChatStatistics::new("data/cs_stackoverflow.json", &config)?;
//! let png = stats.generate_word_cloud_default("data")?;
//! println!("wrote {}", png.display());
//! # Ok(())
//! # }
//! ```

mod config;
mod error;

pub use canonical::{
    CanonicalError, Normalizer, NormalizerConfig, StopwordSet, Token, collapse_whitespace,
    filter_text, join_nonempty, tokenize, word_tokens,
};
pub use display::{
    Chain, DisplayTransform, Identity, Reshape, VisualOrder, from_fn, rtl_display,
};
pub use ingest::{ChatExport, IngestError, Message, MessageText, load_export, parse_export};
pub use wordcloud::{
    Color, FontFace, RenderedCloud, WordCloud, WordCloudConfig, WordCloudError, WordCloudLayout,
    WordFrequencies,
};

pub use crate::config::{
    CONFIG_FILE_NAME, ConfigLoadError, FONT_FILE_NAME, STOPWORDS_FILE_NAME, StatsConfig,
};
pub use crate::error::StatsError;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, info_span, warn};

/// File name of the rendered image inside the output directory.
pub const OUTPUT_FILE_NAME: &str = "wordcloud.png";

/// Canvas arguments used by [`ChatStatistics::generate_word_cloud_default`].
pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const DEFAULT_MAX_FONT_SIZE: u32 = 200;

/// A loaded chat export plus the stopwords and settings used to summarize it.
///
/// Immutable after construction; every generation call rebuilds its text from
/// the snapshot, so repeated calls produce the same image.
pub struct ChatStatistics {
    export: ChatExport,
    stopwords: StopwordSet,
    normalizer: Normalizer,
    render: WordCloudConfig,
    display: Box<dyn DisplayTransform>,
}

impl fmt::Debug for ChatStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatStatistics")
            .field("messages", &self.export.len())
            .field("stopwords", &self.stopwords.len())
            .field("render", &self.render)
            .field("display", &self.display.name())
            .finish()
    }
}

impl ChatStatistics {
    /// Loads the export at `chat_json` and the stopword list named by `config`.
    ///
    /// Any problem reading either input is a [`StatsError::DataLoad`].
    pub fn new(chat_json: impl AsRef<Path>, config: &StatsConfig) -> Result<Self, StatsError> {
        config.validate()?;
        let chat_json = chat_json.as_ref();

        info!(path = %chat_json.display(), "loading_chat_export");
        let export = load_export(chat_json)?;

        let normalizer = Normalizer::new(config.normalizer.clone());
        info!(path = %config.stopwords_path.display(), "loading_stopwords");
        let stopwords = StopwordSet::from_path(&config.stopwords_path, normalizer.clone())
            .inspect_err(|err| warn!(error = %err, "stopwords_failure"))?;
        debug!(stopwords = stopwords.len(), "stopwords_loaded");

        Ok(Self {
            export,
            stopwords,
            normalizer,
            render: config.render.clone(),
            display: Box::new(rtl_display()),
        })
    }

    /// Replaces the reshape + visual order step applied before rendering.
    pub fn with_display_transform(mut self, transform: Box<dyn DisplayTransform>) -> Self {
        self.display = transform;
        self
    }

    /// The export loaded at construction.
    pub fn export(&self) -> &ChatExport {
        &self.export
    }

    /// Normalized stopwords filtered out of every message.
    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Canvas, font and color settings used for every render.
    pub fn render_config(&self) -> &WordCloudConfig {
        &self.render
    }

    /// Plain-text messages in order, tokenized and stripped of stopwords.
    ///
    /// Messages whose `text` is rich content or absent are skipped. Surviving
    /// tokens are joined by single spaces, and so are message contributions;
    /// a message that contributes nothing adds no separator.
    pub fn accumulate_text(&self) -> String {
        join_nonempty(
            self.export
                .plain_texts()
                .map(|text| filter_text(text, &self.stopwords)),
        )
    }

    /// [`accumulate_text`](Self::accumulate_text), normalized and passed
    /// through the display transform. This is exactly what gets rendered.
    pub fn prepare_text(&self) -> String {
        let normalized = self.normalizer.normalize(&self.accumulate_text());
        self.display.apply(&normalized)
    }

    /// Renders the word cloud into `output_dir/wordcloud.png` and returns the
    /// written path.
    ///
    /// The canvas always comes from the configured [`WordCloudConfig`];
    /// `width`, `height` and `max_font_size` are accepted for call
    /// compatibility and do not change the output.
    pub fn generate_word_cloud(
        &self,
        output_dir: impl AsRef<Path>,
        width: u32,
        height: u32,
        max_font_size: u32,
    ) -> Result<PathBuf, StatsError> {
        let output_dir = output_dir.as_ref();
        let span = info_span!("chatstat.generate_word_cloud", output_dir = %output_dir.display());
        let _guard = span.enter();
        let start = Instant::now();

        let result = self.generate_inner(output_dir, (width, height, max_font_size));
        let elapsed_micros = start.elapsed().as_micros();
        match &result {
            Ok(path) => info!(path = %path.display(), elapsed_micros, "wordcloud_saved"),
            Err(err) => warn!(error = %err, elapsed_micros, "wordcloud_failure"),
        }
        result
    }

    /// [`generate_word_cloud`](Self::generate_word_cloud) with 800×600, max font 200.
    pub fn generate_word_cloud_default(
        &self,
        output_dir: impl AsRef<Path>,
    ) -> Result<PathBuf, StatsError> {
        self.generate_word_cloud(
            output_dir,
            DEFAULT_WIDTH,
            DEFAULT_HEIGHT,
            DEFAULT_MAX_FONT_SIZE,
        )
    }

    fn generate_inner(
        &self,
        output_dir: &Path,
        requested: (u32, u32, u32),
    ) -> Result<PathBuf, StatsError> {
        if !output_dir.is_dir() {
            return Err(StatsError::Render(format!(
                "output directory {} does not exist or is not a directory",
                output_dir.display()
            )));
        }

        let cfg = &self.render;
        if requested != (cfg.width, cfg.height, cfg.max_font_size) {
            debug!(
                requested_width = requested.0,
                requested_height = requested.1,
                requested_max_font_size = requested.2,
                width = cfg.width,
                height = cfg.height,
                max_font_size = cfg.max_font_size,
                "canvas_arguments_ignored"
            );
        }

        info!("loading_text_content");
        let text = self.prepare_text();
        debug!(
            chars = text.chars().count(),
            display = self.display.name(),
            "text_prepared"
        );

        let cloud = WordCloud::new(cfg.clone())?.generate(&text)?;
        let path = output_dir.join(OUTPUT_FILE_NAME);
        cloud.to_file(&path)?;
        Ok(path)
    }
}
