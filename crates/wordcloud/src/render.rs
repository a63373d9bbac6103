use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageFormat, RgbaImage};
use resvg::tiny_skia;
use tracing::debug;

use crate::config::Color;
use crate::error::WordCloudError;
use crate::font::FontFace;
use crate::layout::WordCloudLayout;
use crate::svg;

/// A rasterized word cloud together with the layout it was drawn from.
#[derive(Debug, Clone)]
pub struct RenderedCloud {
    layout: WordCloudLayout,
    image: RgbaImage,
}

impl RenderedCloud {
    pub fn layout(&self) -> &WordCloudLayout {
        &self.layout
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Writes the image as PNG. The file is staged next to `path` and moved
    /// into place, so readers never observe a partial image.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), WordCloudError> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let io_err = |source| WordCloudError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut staged = tempfile::Builder::new()
            .prefix(".wordcloud-")
            .suffix(".png.tmp")
            .tempfile_in(dir)
            .map_err(io_err)?;
        {
            let mut writer = BufWriter::new(staged.as_file_mut());
            self.image.write_to(&mut writer, ImageFormat::Png)?;
            writer.flush().map_err(io_err)?;
        }
        staged.persist(path).map_err(|err| io_err(err.error))?;

        debug!(path = %path.display(), words = self.layout.words.len(), "wordcloud_written");
        Ok(())
    }
}

/// Draws `layout` with `font` over a solid background.
pub fn rasterize(
    layout: WordCloudLayout,
    font: &FontFace,
    background: Color,
) -> Result<RenderedCloud, WordCloudError> {
    let (width, height) = (layout.width, layout.height);
    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(WordCloudError::Canvas { width, height })?;
    pixmap.fill(tiny_skia::Color::from_rgba8(
        background.r,
        background.g,
        background.b,
        255,
    ));

    if !layout.is_empty() {
        let tree = font.parse_svg(&svg::scene(&layout, background, font.family()))?;
        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());
    }

    // Opaque background, so premultiplied and straight alpha agree.
    let image = RgbaImage::from_raw(width, height, pixmap.take())
        .ok_or(WordCloudError::Canvas { width, height })?;
    Ok(RenderedCloud { layout, image })
}

/// Image with only the background, for text that yields no words.
pub fn blank(width: u32, height: u32, background: Color) -> Result<RenderedCloud, WordCloudError> {
    if width == 0 || height == 0 {
        return Err(WordCloudError::Canvas { width, height });
    }
    let image = RgbaImage::from_pixel(
        width,
        height,
        image::Rgba([background.r, background.g, background.b, 255]),
    );
    Ok(RenderedCloud {
        layout: WordCloudLayout {
            width,
            height,
            words: Vec::new(),
        },
        image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_cloud_is_background_only() {
        let cloud = blank(8, 4, Color::WHITE).expect("blank");
        assert!(cloud.layout().is_empty());
        assert_eq!(cloud.image().dimensions(), (8, 4));
        assert!(cloud.image().pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn blank_rejects_empty_canvas() {
        assert!(matches!(
            blank(0, 4, Color::WHITE),
            Err(WordCloudError::Canvas { width: 0, height: 4 })
        ));
    }

    #[test]
    fn to_file_writes_png_atomically() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cloud.png");
        blank(16, 16, Color::BLACK)
            .expect("blank")
            .to_file(&path)
            .expect("write");

        let decoded = image::open(&path).expect("decode").to_rgba8();
        assert_eq!(decoded.dimensions(), (16, 16));
        assert_eq!(decoded.get_pixel(3, 3).0, [0, 0, 0, 255]);

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .expect("read_dir")
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn to_file_overwrites_existing_image() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cloud.png");
        std::fs::write(&path, b"stale").expect("seed");
        blank(4, 4, Color::WHITE)
            .expect("blank")
            .to_file(&path)
            .expect("write");
        assert!(image::open(&path).is_ok());
    }

    #[test]
    fn to_file_into_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("cloud.png");
        let err = blank(4, 4, Color::WHITE)
            .expect("blank")
            .to_file(&path)
            .expect_err("missing dir");
        assert!(matches!(err, WordCloudError::Io { .. }));
    }
}
