//! Configuration for chat statistics runs.
//!
//! Everything a run needs is carried by [`StatsConfig`]: where the stopword
//! list lives, how text is normalized, and how the word cloud is drawn. It can
//! be built in code, derived from a data directory, or loaded from YAML.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! stopwords_path: "stopwords.txt"
//!
//! normalizer:
//!   persian_digits: true
//!   remove_diacritics: true
//!
//! render:
//!   width: 1200
//!   height: 1200
//!   max_font_size: 200
//!   background: "white"
//!   font_path: "BHoma.ttf"
//! ```
//!
//! Relative paths in a YAML file are resolved against the file's directory.

use std::fs;
use std::path::{Path, PathBuf};

use canonical::NormalizerConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wordcloud::WordCloudConfig;

/// Stopword list file name inside a data directory.
pub const STOPWORDS_FILE_NAME: &str = "stopwords.txt";
/// Font file name inside a data directory.
pub const FONT_FILE_NAME: &str = "BHoma.ttf";
/// Optional YAML config file name inside a data directory.
pub const CONFIG_FILE_NAME: &str = "chatstat.yaml";

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Resources and parameters for one [`ChatStatistics`](crate::ChatStatistics).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Configuration format version
    pub version: String,

    /// UTF-8 stopword list, one word per line
    pub stopwords_path: PathBuf,

    /// Normalization applied to stopwords, tokens and the accumulated text
    pub normalizer: NormalizerConfig,

    /// Canvas, font and palette for the word cloud
    pub render: WordCloudConfig,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            stopwords_path: PathBuf::from(STOPWORDS_FILE_NAME),
            normalizer: NormalizerConfig::default(),
            render: WordCloudConfig {
                font_path: PathBuf::from(FONT_FILE_NAME),
                ..WordCloudConfig::default()
            },
        }
    }
}

impl StatsConfig {
    /// Defaults with the stopword list and font taken from `dir`.
    pub fn from_data_dir(dir: impl AsRef<Path>) -> Self {
        let mut config = Self::default();
        config.resolve_paths(dir.as_ref());
        config
    }

    /// Loads `chatstat.yaml` from `dir` when present, otherwise falls back to
    /// [`StatsConfig::from_data_dir`].
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let dir = dir.as_ref();
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::from_file(candidate)
        } else {
            Ok(Self::from_data_dir(dir))
        }
    }

    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: StatsConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        if self.stopwords_path.as_os_str().is_empty() {
            return Err(ConfigLoadError::Validation(
                "stopwords_path must not be empty".into(),
            ));
        }
        if self.render.font_path.as_os_str().is_empty() {
            return Err(ConfigLoadError::Validation(
                "render.font_path must not be empty".into(),
            ));
        }
        self.render
            .validate()
            .map_err(|err| ConfigLoadError::Validation(err.to_string()))
    }

    fn resolve_paths(&mut self, base: &Path) {
        if self.stopwords_path.is_relative() {
            self.stopwords_path = base.join(&self.stopwords_path);
        }
        if self.render.font_path.is_relative() {
            self.render.font_path = base.join(&self.render.font_path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = StatsConfig::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.stopwords_path, PathBuf::from("stopwords.txt"));
        assert_eq!(config.render.font_path, PathBuf::from("BHoma.ttf"));
        assert_eq!(
            (config.render.width, config.render.height, config.render.max_font_size),
            (1200, 1200, 200)
        );
        config.validate().unwrap();
    }

    #[test]
    fn test_from_data_dir() {
        let config = StatsConfig::from_data_dir("/srv/chat");
        assert_eq!(
            config.stopwords_path,
            PathBuf::from("/srv/chat/stopwords.txt")
        );
        assert_eq!(config.render.font_path, PathBuf::from("/srv/chat/BHoma.ttf"));
    }

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r##"
version: "1.0"
stopwords_path: "/etc/chatstat/stop.txt"
normalizer:
  persian_digits: false
render:
  width: 640
  background: "#000000"
"##;

        let config = StatsConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.stopwords_path, PathBuf::from("/etc/chatstat/stop.txt"));
        assert!(!config.normalizer.persian_digits);
        assert!(config.normalizer.remove_diacritics);
        assert_eq!(config.render.width, 640);
        assert_eq!(config.render.height, 1200);
        assert_eq!(config.render.background, wordcloud::Color::BLACK);
    }

    #[test]
    fn test_load_from_file_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chatstat.yaml");
        fs::write(
            &path,
            "stopwords_path: lists/stop.txt\nrender:\n  font_path: /fonts/Vazir.ttf\n",
        )
        .unwrap();

        let config = StatsConfig::from_file(&path).unwrap();
        assert_eq!(config.stopwords_path, dir.path().join("lists/stop.txt"));
        assert_eq!(config.render.font_path, PathBuf::from("/fonts/Vazir.ttf"));
    }

    #[test]
    fn test_discover_prefers_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = StatsConfig::discover(dir.path()).unwrap();
        assert_eq!(fallback, StatsConfig::from_data_dir(dir.path()));

        let mut file = fs::File::create(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        file.write_all(b"render:\n  width: 300\n").unwrap();
        let discovered = StatsConfig::discover(dir.path()).unwrap();
        assert_eq!(discovered.render.width, 300);
        assert_eq!(discovered.stopwords_path, dir.path().join("stopwords.txt"));
    }

    #[test]
    fn test_invalid_configs() {
        let cases = [
            ("version: \"2\"\n", "unsupported config version"),
            ("render:\n  width: 0\n", "canvas must be non-empty"),
            ("stopwords_path: \"\"\n", "stopwords_path"),
            ("render:\n  relative_scaling: 3.0\n", "relative_scaling"),
        ];
        for (yaml, expected) in cases {
            let err = StatsConfig::from_yaml(yaml).unwrap_err();
            assert!(
                err.to_string().contains(expected),
                "{yaml:?} gave {err}"
            );
        }
    }

    #[test]
    fn test_bad_yaml_and_missing_file() {
        assert!(matches!(
            StatsConfig::from_yaml("render: [1, 2"),
            Err(ConfigLoadError::YamlParse(_))
        ));

        let file = NamedTempFile::new().unwrap();
        let missing = file.path().with_extension("absent");
        assert!(matches!(
            StatsConfig::from_file(missing),
            Err(ConfigLoadError::FileRead(_))
        ));
    }
}
