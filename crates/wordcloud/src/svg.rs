//! SVG scene text helpers.
//!
//! Text handed to the scene is already in display order, so every element
//! forces left-to-right runs and the text engine does no reordering of its own.

use std::fmt::Write as _;

use crate::config::Color;
use crate::layout::WordCloudLayout;

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// `family` must already be escaped.
pub(crate) fn text_element(
    id: &str,
    text: &str,
    (x, y): (f32, f32),
    font_size: f32,
    family: &str,
    fill: &str,
) -> String {
    format!(
        r#"<text id="{id}" x="{x}" y="{y}" font-family="{family}" font-size="{font_size}" fill="{fill}" direction="ltr" unicode-bidi="bidi-override" xml:space="preserve">{}</text>"#,
        escape_xml(text)
    )
}

/// Full scene for a laid out cloud: background, then one text element per word.
pub(crate) fn scene(layout: &WordCloudLayout, background: Color, family: &str) -> String {
    let family = escape_xml(family);
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><rect width="{w}" height="{h}" fill="{bg}"/>"#,
        w = layout.width,
        h = layout.height,
        bg = background.to_hex(),
    );
    for (idx, word) in layout.words.iter().enumerate() {
        svg.push_str(&text_element(
            &format!("w{idx}"),
            &word.text,
            (word.anchor_x, word.anchor_y),
            word.font_size as f32,
            &family,
            &word.color.to_hex(),
        ));
    }
    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PlacedWord;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&apos;");
        assert_eq!(escape_xml("سلام"), "سلام");
    }

    #[test]
    fn scene_contains_background_and_words() {
        let layout = WordCloudLayout {
            width: 100,
            height: 50,
            words: vec![PlacedWord {
                text: "R&D".into(),
                count: 3,
                font_size: 20,
                x: 10.0,
                y: 5.0,
                width: 30.0,
                height: 16.0,
                anchor_x: 10.0,
                anchor_y: 21.0,
                color: Color::BLACK,
            }],
        };
        let svg = scene(&layout, Color::WHITE, "B Homa");
        assert!(svg.contains(r##"fill="#ffffff""##));
        assert!(svg.contains(r#"font-family="B Homa""#));
        assert!(svg.contains(r#"x="10" y="21""#));
        assert!(svg.contains(">R&amp;D</text>"));
        assert!(svg.contains(r#"unicode-bidi="bidi-override""#));
        assert!(svg.ends_with("</svg>"));
    }
}
