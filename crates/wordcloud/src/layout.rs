//! Word placement.
//!
//! Words are placed most frequent first. Each word gets a font size derived
//! from its frequency relative to the previously placed word, then the
//! canvas is searched along an Archimedean spiral from the centre for a free
//! slot. When no slot exists the font shrinks by `font_step` and the search
//! repeats; once the font would drop below `min_font_size` layout stops.

use tracing::debug;

use crate::config::{Color, WordCloudConfig};
use crate::frequency::WordFrequencies;

/// Ink extent of a word at a given font size, relative to its text anchor
/// (start of the baseline).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtent {
    /// Left edge of the ink box relative to the anchor.
    pub offset_x: f32,
    /// Top edge of the ink box relative to the baseline (negative is above).
    pub offset_y: f32,
    pub width: f32,
    pub height: f32,
}

impl TextExtent {
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            offset_x: self.offset_x * factor,
            offset_y: self.offset_y * factor,
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

/// Measures words for layout.
pub trait TextMeasure {
    /// Returns `None` when the word cannot be drawn (no glyphs).
    fn measure(&self, word: &str, font_size: f32) -> Option<TextExtent>;
}

/// A word placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub count: u32,
    pub font_size: u32,
    /// Top-left corner of the ink box.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Where the text baseline starts.
    pub anchor_x: f32,
    pub anchor_y: f32,
    pub color: Color,
}

impl PlacedWord {
    fn overlaps(&self, other: &PlacedWord) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// All placed words for one canvas, in placement order.
#[derive(Debug, Clone, PartialEq)]
pub struct WordCloudLayout {
    pub width: u32,
    pub height: u32,
    pub words: Vec<PlacedWord>,
}

impl WordCloudLayout {
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w.text == word)
    }

    /// True when no two ink boxes intersect.
    pub fn is_overlap_free(&self) -> bool {
        self.words
            .iter()
            .enumerate()
            .all(|(i, a)| self.words[i + 1..].iter().all(|b| !a.overlaps(b)))
    }
}

const CELL: u32 = 4;
const SPIRAL_SPACING: f32 = 4.0;
const SPIRAL_STEP: f32 = 4.0;

/// Coarse occupancy bitmap with a summed-area table for O(1) box queries.
struct OccupancyGrid {
    cols: usize,
    rows: usize,
    cells: Vec<bool>,
    // (cols + 1) * (rows + 1), row-major
    integral: Vec<u32>,
}

impl OccupancyGrid {
    fn new(width: u32, height: u32) -> Self {
        let cols = width.div_ceil(CELL) as usize;
        let rows = height.div_ceil(CELL) as usize;
        Self {
            cols,
            rows,
            cells: vec![false; cols * rows],
            integral: vec![0; (cols + 1) * (rows + 1)],
        }
    }

    /// Cell range covering a pixel box, rounded outward.
    fn span(&self, x: f32, y: f32, w: f32, h: f32) -> (usize, usize, usize, usize) {
        let c = CELL as f32;
        let x0 = (x / c).floor().max(0.0) as usize;
        let y0 = (y / c).floor().max(0.0) as usize;
        let x1 = (((x + w) / c).ceil().max(0.0) as usize).min(self.cols);
        let y1 = (((y + h) / c).ceil().max(0.0) as usize).min(self.rows);
        (x0.min(x1), y0.min(y1), x1, y1)
    }

    fn is_free(&self, x: f32, y: f32, w: f32, h: f32) -> bool {
        let (x0, y0, x1, y1) = self.span(x, y, w, h);
        let stride = self.cols + 1;
        let at = |cx: usize, cy: usize| self.integral[cy * stride + cx];
        at(x1, y1) + at(x0, y0) == at(x0, y1) + at(x1, y0)
    }

    fn occupy(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let (x0, y0, x1, y1) = self.span(x, y, w, h);
        for cy in y0..y1 {
            for cx in x0..x1 {
                self.cells[cy * self.cols + cx] = true;
            }
        }
        self.rebuild_from(y0);
    }

    // Rows above `first_row` are unaffected by an occupy that starts there.
    fn rebuild_from(&mut self, first_row: usize) {
        let stride = self.cols + 1;
        for cy in first_row..self.rows {
            let mut row_sum = 0u32;
            for cx in 0..self.cols {
                row_sum += u32::from(self.cells[cy * self.cols + cx]);
                self.integral[(cy + 1) * stride + cx + 1] =
                    self.integral[cy * stride + cx + 1] + row_sum;
            }
        }
    }
}

/// Walks an Archimedean spiral from the canvas centre and returns the first
/// top-left corner where a `w`×`h` box fits inside the canvas on free cells.
fn find_slot(grid: &OccupancyGrid, canvas: (f32, f32), w: f32, h: f32) -> Option<(f32, f32)> {
    let (cw, ch) = canvas;
    if w > cw || h > ch {
        return None;
    }
    let (cx, cy) = (cw / 2.0, ch / 2.0);
    let max_radius = (cw * cw + ch * ch).sqrt() / 2.0;
    let growth = SPIRAL_SPACING / std::f32::consts::TAU;

    let mut theta = 0.0f32;
    loop {
        let radius = growth * theta;
        if radius > max_radius {
            return None;
        }
        let x = cx + radius * theta.cos() - w / 2.0;
        let y = cy + radius * theta.sin() - h / 2.0;
        if x >= 0.0 && y >= 0.0 && x + w <= cw && y + h <= ch && grid.is_free(x, y, w, h) {
            return Some((x, y));
        }
        theta += SPIRAL_STEP / radius.max(SPIRAL_STEP);
    }
}

/// Lays out the most frequent words of `frequencies` on the configured canvas.
pub fn layout_words<M: TextMeasure + ?Sized>(
    frequencies: &WordFrequencies,
    measure: &M,
    config: &WordCloudConfig,
) -> WordCloudLayout {
    let mut layout = WordCloudLayout {
        width: config.width,
        height: config.height,
        words: Vec::new(),
    };
    let words = frequencies.top(config.max_words);
    let Some(&(_, max_count)) = words.first() else {
        return layout;
    };

    let canvas = (config.width as f32, config.height as f32);
    let margin = config.margin as f32;
    let scaling = config.relative_scaling;
    let mut grid = OccupancyGrid::new(config.width, config.height);
    let mut font_size = config.max_font_size;
    let mut last_freq = 1.0f32;

    for (word, count) in words {
        let freq = *count as f32 / max_count as f32;
        if scaling > 0.0 {
            font_size =
                ((scaling * (freq / last_freq) + (1.0 - scaling)) * font_size as f32).round() as u32;
        }

        let mut placed = None;
        let mut measurable = true;
        while font_size >= config.min_font_size {
            let Some(extent) = measure.measure(word, font_size as f32) else {
                measurable = false;
                break;
            };
            let boxed_w = extent.width + 2.0 * margin;
            let boxed_h = extent.height + 2.0 * margin;
            if let Some((x, y)) = find_slot(&grid, canvas, boxed_w, boxed_h) {
                placed = Some((x, y, extent));
                break;
            }
            font_size = font_size.saturating_sub(config.font_step);
        }

        if !measurable {
            debug!(word = %word, "word has no drawable glyphs, skipping");
            continue;
        }
        let Some((x, y, extent)) = placed else {
            debug!(placed = layout.words.len(), "canvas full, stopping layout");
            break;
        };

        grid.occupy(x, y, extent.width + 2.0 * margin, extent.height + 2.0 * margin);
        let ink_x = x + margin;
        let ink_y = y + margin;
        layout.words.push(PlacedWord {
            text: word.clone(),
            count: *count,
            font_size,
            x: ink_x,
            y: ink_y,
            width: extent.width,
            height: extent.height,
            anchor_x: ink_x - extent.offset_x,
            anchor_y: ink_y - extent.offset_y,
            color: config.color_for(word),
        });
        last_freq = freq;
    }

    layout
}
