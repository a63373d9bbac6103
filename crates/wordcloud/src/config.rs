//! Word cloud configuration.
//!
//! ```yaml
//! width: 1200
//! height: 1200
//! max_font_size: 200
//! min_font_size: 4
//! font_step: 1
//! max_words: 200
//! relative_scaling: 0.5
//! margin: 2
//! background: "white"
//! font_path: "data/BHoma.ttf"
//! system_font_fallback: true
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WordCloudError;

/// Opaque RGB color, written as a CSS-style name or `#rrggbb` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "white" => return Ok(Color::WHITE),
            "black" => return Ok(Color::BLACK),
            _ => {}
        }
        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.is_ascii())
            .ok_or_else(|| format!("unsupported color '{s}', expected a name or #rrggbb"))?;
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| format!("invalid hex color '{s}'"))
        };
        Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Viridis samples, dark end first; the light yellow end is left out so
/// words stay readable on a white background.
pub const DEFAULT_PALETTE: [Color; 8] = [
    Color::rgb(0x44, 0x01, 0x54),
    Color::rgb(0x48, 0x28, 0x78),
    Color::rgb(0x3e, 0x49, 0x89),
    Color::rgb(0x31, 0x68, 0x8e),
    Color::rgb(0x26, 0x82, 0x8e),
    Color::rgb(0x1f, 0x9e, 0x89),
    Color::rgb(0x35, 0xb7, 0x79),
    Color::rgb(0x6d, 0xcd, 0x59),
];

/// Canvas, sizing and font settings for a word cloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordCloudConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Font size of the most frequent word, before shrinking to fit.
    pub max_font_size: u32,
    /// Layout stops once a word would need a smaller font than this.
    pub min_font_size: u32,
    /// How much the font shrinks each time a word does not fit.
    pub font_step: u32,
    /// Only the most frequent words are placed.
    pub max_words: usize,
    /// 0.0 ranks words by order only, 1.0 scales font size with frequency.
    pub relative_scaling: f32,
    /// Empty pixels kept around every word.
    pub margin: u32,
    pub background: Color,
    pub palette: Vec<Color>,
    /// TrueType/OpenType font used to measure and draw words.
    pub font_path: PathBuf,
    /// Draw with the installed system fonts when `font_path` does not exist.
    pub system_font_fallback: bool,
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 1200,
            max_font_size: 200,
            min_font_size: 4,
            font_step: 1,
            max_words: 200,
            relative_scaling: 0.5,
            margin: 2,
            background: Color::WHITE,
            palette: DEFAULT_PALETTE.to_vec(),
            font_path: PathBuf::from("BHoma.ttf"),
            system_font_fallback: true,
        }
    }
}

impl WordCloudConfig {
    pub fn validate(&self) -> Result<(), WordCloudError> {
        if self.width == 0 || self.height == 0 {
            return Err(WordCloudError::InvalidConfig(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.min_font_size == 0 {
            return Err(WordCloudError::InvalidConfig(
                "min_font_size must be >= 1".into(),
            ));
        }
        if self.min_font_size > self.max_font_size {
            return Err(WordCloudError::InvalidConfig(format!(
                "min_font_size {} exceeds max_font_size {}",
                self.min_font_size, self.max_font_size
            )));
        }
        if self.font_step == 0 {
            return Err(WordCloudError::InvalidConfig(
                "font_step must be >= 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.relative_scaling) {
            return Err(WordCloudError::InvalidConfig(format!(
                "relative_scaling must be within 0..=1, got {}",
                self.relative_scaling
            )));
        }
        if self.palette.is_empty() {
            return Err(WordCloudError::InvalidConfig(
                "palette must contain at least one color".into(),
            ));
        }
        Ok(())
    }

    /// Color for `word`, stable across runs.
    pub fn color_for(&self, word: &str) -> Color {
        let idx = (fxhash::hash64(word) % self.palette.len() as u64) as usize;
        self.palette.get(idx).copied().unwrap_or(Color::BLACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_canvas() {
        let cfg = WordCloudConfig::default();
        assert_eq!((cfg.width, cfg.height, cfg.max_font_size), (1200, 1200, 200));
        assert_eq!(cfg.background, Color::WHITE);
        assert!(cfg.system_font_fallback);
        cfg.validate().expect("defaults are valid");
    }

    #[test]
    fn colors_parse_names_and_hex() {
        assert_eq!("white".parse::<Color>(), Ok(Color::WHITE));
        assert_eq!("#1F9E89".parse::<Color>(), Ok(Color::rgb(0x1f, 0x9e, 0x89)));
        assert!("#12".parse::<Color>().is_err());
        assert!("teal".parse::<Color>().is_err());
        assert_eq!(Color::rgb(1, 2, 255).to_hex(), "#0102ff");
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let json = r##"{"width": 300, "background": "#000000", "system_font_fallback": false}"##;
        let cfg: WordCloudConfig = serde_json::from_str(json).expect("config");
        assert_eq!(cfg.width, 300);
        assert!(!cfg.system_font_fallback);
        assert_eq!(cfg.height, 1200);
        assert_eq!(cfg.background, Color::BLACK);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let cases = [
            WordCloudConfig { width: 0, ..Default::default() },
            WordCloudConfig { min_font_size: 300, ..Default::default() },
            WordCloudConfig { font_step: 0, ..Default::default() },
            WordCloudConfig { relative_scaling: 1.5, ..Default::default() },
            WordCloudConfig { palette: Vec::new(), ..Default::default() },
        ];
        for cfg in cases {
            assert!(matches!(cfg.validate(), Err(WordCloudError::InvalidConfig(_))));
        }
    }

    #[test]
    fn word_colors_are_stable() {
        let cfg = WordCloudConfig::default();
        assert_eq!(cfg.color_for("rust"), cfg.color_for("rust"));
        assert!(cfg.palette.contains(&cfg.color_for("سلام")));
    }
}
