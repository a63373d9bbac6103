use unicode_bidi::BidiInfo;

use crate::DisplayTransform;

/// Reorders text from logical order into visual order.
///
/// Runs the Unicode Bidirectional Algorithm with the paragraph direction
/// taken from the first strong character, then reorders each paragraph as
/// one line. The output is meant for renderers that lay glyphs out strictly
/// left to right.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisualOrder;

impl VisualOrder {
    pub fn reorder(text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let info = BidiInfo::new(text, None);
        let mut out = String::with_capacity(text.len());
        for paragraph in &info.paragraphs {
            let line = paragraph.range.clone();
            out.push_str(&info.reorder_line(paragraph, line));
        }
        out
    }
}

impl DisplayTransform for VisualOrder {
    fn apply(&self, text: &str) -> String {
        VisualOrder::reorder(text)
    }

    fn name(&self) -> &'static str {
        "visual-order"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_to_right_text_is_unchanged() {
        assert_eq!(VisualOrder::reorder("hello world"), "hello world");
        assert_eq!(VisualOrder::reorder(""), "");
    }

    #[test]
    fn right_to_left_paragraph_is_reversed() {
        // ا ب, space, ت
        let visual = VisualOrder::reorder("\u{0627}\u{0628} \u{062A}");
        assert_eq!(visual, "\u{062A} \u{0628}\u{0627}");
    }

    #[test]
    fn reordering_preserves_characters() {
        let text = "\u{0633}\u{0644}\u{0627}\u{0645} rust \u{062F}\u{0646}\u{06CC}\u{0627}";
        let visual = VisualOrder::reorder(text);
        let mut logical: Vec<char> = text.chars().collect();
        let mut shown: Vec<char> = visual.chars().collect();
        logical.sort_unstable();
        shown.sort_unstable();
        assert_eq!(logical, shown);
    }
}
