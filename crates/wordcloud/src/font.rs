use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fxhash::FxHashMap;
use tracing::{debug, warn};
use usvg::fontdb;

use crate::error::WordCloudError;
use crate::layout::{TextExtent, TextMeasure};
use crate::svg::{escape_xml, text_element};

/// Font size words are measured at; other sizes scale linearly from it.
const REFERENCE_SIZE: f32 = 100.0;

/// Path reported for faces that come from the system font directories.
pub const SYSTEM_FONT_PATH: &str = "<system>";

/// A font database and the family words are drawn with.
///
/// Loaded from a single file, the database holds only that file. The system
/// fallback holds every installed face, so glyphs missing from the chosen
/// family can still resolve through another one.
#[derive(Clone)]
pub struct FontFace {
    path: PathBuf,
    family: String,
    db: Arc<fontdb::Database>,
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFace")
            .field("path", &self.path)
            .field("family", &self.family)
            .finish()
    }
}

impl FontFace {
    /// Loads exactly one font file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WordCloudError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| WordCloudError::FontIo {
            path: path.to_path_buf(),
            source,
        })?;

        let mut db = fontdb::Database::new();
        db.load_font_data(data);
        let family = db
            .faces()
            .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
            .ok_or_else(|| WordCloudError::EmptyFont {
                path: path.to_path_buf(),
            })?;

        debug!(path = %path.display(), family = %family, faces = db.len(), "font_loaded");
        Ok(Self {
            path: path.to_path_buf(),
            family,
            db: Arc::new(db),
        })
    }

    /// Loads `path`, or the system fonts when `path` does not exist and
    /// `fallback` is set. Any other read failure is returned as is.
    pub fn load_or_system(path: impl AsRef<Path>, fallback: bool) -> Result<Self, WordCloudError> {
        let path = path.as_ref();
        match Self::load(path) {
            Err(WordCloudError::FontIo { source, .. })
                if fallback && source.kind() == io::ErrorKind::NotFound =>
            {
                let font = Self::system().map_err(|_| WordCloudError::FontIo {
                    path: path.to_path_buf(),
                    source,
                })?;
                warn!(
                    path = %path.display(),
                    family = %font.family,
                    "font_missing_using_system_fallback"
                );
                Ok(font)
            }
            other => other,
        }
    }

    /// Every font installed in the usual system directories, drawing with the
    /// generic sans-serif family or, failing that, the first regular face.
    pub fn system() -> Result<Self, WordCloudError> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();

        let query = fontdb::Query {
            families: &[fontdb::Family::SansSerif],
            ..Default::default()
        };
        let preferred = db.query(&query).and_then(|id| db.face(id));
        let regular = || {
            db.faces().find(|face| {
                face.style == fontdb::Style::Normal && face.weight == fontdb::Weight::NORMAL
            })
        };
        let family = preferred
            .or_else(regular)
            .or_else(|| db.faces().next())
            .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
            .ok_or_else(|| WordCloudError::EmptyFont {
                path: PathBuf::from(SYSTEM_FONT_PATH),
            })?;

        debug!(family = %family, faces = db.len(), "system_fonts_loaded");
        Ok(Self {
            path: PathBuf::from(SYSTEM_FONT_PATH),
            family,
            db: Arc::new(db),
        })
    }

    /// Where the font came from; [`SYSTEM_FONT_PATH`] for the system fallback.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Family name written into the SVG scene.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Parses an SVG document against this font database only.
    pub(crate) fn parse_svg(&self, svg: &str) -> Result<usvg::Tree, WordCloudError> {
        let options = usvg::Options {
            font_family: self.family.clone(),
            fontdb: Arc::clone(&self.db),
            ..Default::default()
        };
        Ok(usvg::Tree::from_str(svg, &options)?)
    }
}

/// Word extents measured once through the SVG text engine.
pub struct FontMeasure {
    extents: FxHashMap<String, TextExtent>,
}

impl FontMeasure {
    /// Lays out every word at [`REFERENCE_SIZE`] in a single document and
    /// records each ink box. Words the font cannot draw are left out.
    pub fn prepare<'a, I>(font: &FontFace, words: I) -> Result<Self, WordCloudError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let words: Vec<&str> = words.into_iter().collect();
        let mut extents = FxHashMap::default();
        if words.is_empty() {
            return Ok(Self { extents });
        }

        let baseline = REFERENCE_SIZE * 2.0;
        let mut svg = String::from(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="1000" height="1000" viewBox="0 0 1000 1000">"#,
        );
        let family = escape_xml(font.family());
        for (idx, word) in words.iter().enumerate() {
            svg.push_str(&text_element(
                &format!("w{idx}"),
                word,
                (0.0, baseline),
                REFERENCE_SIZE,
                &family,
                "#000000",
            ));
        }
        svg.push_str("</svg>");

        let tree = font.parse_svg(&svg)?;
        for (idx, word) in words.iter().enumerate() {
            let Some(node) = tree.node_by_id(&format!("w{idx}")) else {
                continue;
            };
            let bbox = node.abs_bounding_box();
            if bbox.width() <= 0.0 || bbox.height() <= 0.0 {
                continue;
            }
            extents.insert(
                (*word).to_string(),
                TextExtent {
                    offset_x: bbox.x(),
                    offset_y: bbox.y() - baseline,
                    width: bbox.width(),
                    height: bbox.height(),
                },
            );
        }
        Ok(Self { extents })
    }

    /// Number of words the font could draw.
    pub fn len(&self) -> usize {
        self.extents.len()
    }

    /// True when no word could be drawn.
    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }
}

impl TextMeasure for FontMeasure {
    fn measure(&self, word: &str, font_size: f32) -> Option<TextExtent> {
        self.extents
            .get(word)
            .map(|extent| extent.scaled(font_size / REFERENCE_SIZE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_font_file_is_io_error() {
        let err = FontFace::load("/nonexistent/dir/font.ttf").err();
        assert!(matches!(err, Some(WordCloudError::FontIo { .. })));
    }

    /// `CHATSTAT_TEST_FONT` when set, otherwise any installed system font.
    fn test_font() -> Option<FontFace> {
        match std::env::var_os("CHATSTAT_TEST_FONT") {
            Some(path) => Some(FontFace::load(path).expect("CHATSTAT_TEST_FONT")),
            None => FontFace::system().ok(),
        }
    }

    #[test]
    fn missing_font_falls_back_to_system_fonts_only_when_allowed() {
        let strict = FontFace::load_or_system("/nonexistent/dir/font.ttf", false).err();
        assert!(matches!(strict, Some(WordCloudError::FontIo { .. })));

        match FontFace::load_or_system("/nonexistent/dir/font.ttf", true) {
            Ok(font) => assert_eq!(font.path(), Path::new(SYSTEM_FONT_PATH)),
            // No fonts installed at all: the original read error is kept.
            Err(err) => assert!(matches!(err, WordCloudError::FontIo { .. })),
        }
    }

    #[test]
    fn fallback_does_not_hide_unreadable_font_files() {
        let file = tempfile::NamedTempFile::new().expect("tmp");
        std::fs::write(file.path(), b"not a font").expect("write");
        let err = FontFace::load_or_system(file.path(), true).err();
        assert!(matches!(err, Some(WordCloudError::EmptyFont { .. })));
    }

    #[test]
    fn measures_scale_linearly_with_real_font() {
        let Some(font) = test_font() else {
            eprintln!("no font available, skipping");
            return;
        };
        assert!(!font.family().is_empty());

        let measure = FontMeasure::prepare(&font, ["hello", "hi"]).expect("measure");
        assert_eq!(measure.len(), 2);
        let small = measure.measure("hello", 10.0).expect("hello");
        let large = measure.measure("hello", 20.0).expect("hello");
        assert!((large.width - 2.0 * small.width).abs() < 1e-3);
        assert!(small.offset_y < 0.0);
        let hi = measure.measure("hi", 10.0).expect("hi");
        assert!(small.width > hi.width);
        assert!(measure.measure("absent", 10.0).is_none());
    }
}
