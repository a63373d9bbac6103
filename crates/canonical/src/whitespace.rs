//! Whitespace normalization.
//!
//! Whitespace is anything Unicode classifies as `White_Space`, so tabs,
//! newlines and no-break spaces all act as separators. The zero-width
//! non-joiner is *not* whitespace; it is handled by the normalizer.

/// Collapses whitespace runs into single ASCII spaces and trims both edges.
///
/// ```rust
/// use canonical::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  hello \n\n world\t"), "hello world");
/// assert_eq!(collapse_whitespace("hello\u{00A0}world"), "hello world");
/// assert_eq!(collapse_whitespace(" \t\n "), "");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !collapsed.is_empty() {
            collapsed.push(' ');
        }
        collapsed.push_str(segment);
    }
    collapsed
}

/// Joins non-empty segments with single spaces.
///
/// Empty segments contribute nothing, so no doubled separators appear when
/// a segment was filtered down to nothing.
///
/// ```rust
/// use canonical::join_nonempty;
///
/// assert_eq!(join_nonempty(["hello", "", "world"]), "hello world");
/// assert_eq!(join_nonempty(Vec::<String>::new()), "");
/// ```
pub fn join_nonempty<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();
    for segment in segments {
        let segment = segment.as_ref();
        if segment.is_empty() {
            continue;
        }
        if !joined.is_empty() {
            joined.push(' ');
        }
        joined.push_str(segment);
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_handles_mixed_whitespace() {
        let cases = [
            ("hello   world", "hello world"),
            ("\r\nhello\r\nworld\r\n", "hello world"),
            ("hello", "hello"),
            ("", ""),
        ];
        for (input, expected) in cases {
            assert_eq!(collapse_whitespace(input), expected);
        }
    }

    #[test]
    fn join_skips_empty_segments() {
        assert_eq!(join_nonempty(["", "a", "", "b c", ""]), "a b c");
    }
}
