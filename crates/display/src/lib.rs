//! Display transforms for right-to-left scripts.
//!
//! Word-cloud text is drawn by a renderer that places glyphs left to right,
//! one word at a time. Arabic-script words need two preparation steps first:
//! reshaping letters into their joined forms and reordering characters into
//! visual order. Both are exposed behind [`DisplayTransform`] so callers can
//! swap in [`Identity`] (or their own closure via [`from_fn`]) and test the
//! rest of a pipeline independently of script rendering.
//!
//! ```
//! use display::{rtl_display, DisplayTransform, Identity};
//!
//! assert_eq!(Identity.apply("hello"), "hello");
//! assert_eq!(rtl_display().apply("hello"), "hello");
//! ```

mod bidi;
mod reshape;

pub use crate::bidi::VisualOrder;
pub use crate::reshape::Reshape;

/// A whole-string text transformation applied before rendering.
pub trait DisplayTransform: Send + Sync {
    fn apply(&self, text: &str) -> String;

    /// Short name used in logs.
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<T: DisplayTransform + ?Sized> DisplayTransform for Box<T> {
    fn apply(&self, text: &str) -> String {
        (**self).apply(text)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Returns the text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl DisplayTransform for Identity {
    fn apply(&self, text: &str) -> String {
        text.to_string()
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

/// Applies transforms in sequence.
#[derive(Default)]
pub struct Chain {
    steps: Vec<Box<dyn DisplayTransform>>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, step: impl DisplayTransform + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl DisplayTransform for Chain {
    fn apply(&self, text: &str) -> String {
        self.steps
            .iter()
            .fold(text.to_string(), |acc, step| step.apply(&acc))
    }

    fn name(&self) -> &'static str {
        "chain"
    }
}

/// Wraps a closure as a [`DisplayTransform`].
pub struct FnTransform<F> {
    f: F,
}

pub fn from_fn<F>(f: F) -> FnTransform<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    FnTransform { f }
}

impl<F> DisplayTransform for FnTransform<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn apply(&self, text: &str) -> String {
        (self.f)(text)
    }
}

/// Reshape, then reorder into visual order.
pub fn rtl_display() -> Chain {
    Chain::new().then(Reshape).then(VisualOrder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_applies_steps_in_order() {
        let chain = Chain::new()
            .then(from_fn(|s| format!("{s}a")))
            .then(from_fn(|s| format!("{s}b")));
        assert_eq!(chain.apply("x"), "xab");
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn empty_chain_is_identity() {
        assert_eq!(Chain::new().apply("same"), "same");
    }

    #[test]
    fn rtl_display_reshapes_then_reorders() {
        // ب ا: initial-less right joiner after a dual joiner
        let shown = rtl_display().apply("\u{0628}\u{0627}");
        let codes: Vec<u32> = shown.chars().map(|c| c as u32).collect();
        assert_eq!(codes, vec![0xFE8E, 0xFE91]);
    }

    #[test]
    fn boxed_transforms_delegate() {
        let boxed: Box<dyn DisplayTransform> = Box::new(Identity);
        assert_eq!(boxed.apply("x"), "x");
        assert_eq!(boxed.name(), "identity");
    }
}
