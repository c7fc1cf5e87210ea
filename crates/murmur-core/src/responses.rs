//! Canned reply generation.

use rand::Rng;
use std::sync::Arc;

/// Number of leading characters of the user text quoted by [`Template::Echo`]
pub const ECHO_PREFIX_CHARS: usize = 15;

/// A canned reply variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// Fixed text, independent of the user's message
    Static(&'static str),
    /// Quotes a prefix of the user's message
    Echo,
}

impl Template {
    /// Render this template against the user's message
    pub fn render(&self, user_text: &str) -> String {
        match self {
            Template::Static(text) => (*text).to_string(),
            Template::Echo => format!(
                "I've analyzed \"{}...\" and I'm ready to assist further.",
                char_prefix(user_text, ECHO_PREFIX_CHARS)
            ),
        }
    }
}

/// The fixed, ordered reply set
pub const TEMPLATES: [Template; 10] = [
    Template::Static("I understand. Can you tell me more about that?"),
    Template::Static("That's interesting! How does that make you feel?"),
    Template::Static("I see. What would you like to know about this topic?"),
    Template::Static(
        "Thank you for sharing. Is there anything specific you'd like me to help with?",
    ),
    Template::Static("I appreciate your message. Let me know if you need any assistance."),
    Template::Static("I'm processing what you've said. Could you provide more details?"),
    Template::Static("That's a great point! Would you like me to elaborate on any aspect?"),
    Template::Static("I'm here to help with whatever you need."),
    Template::Echo,
    Template::Static("Your input is valuable. Let's explore this topic together."),
];

/// Picks an index in `0..len`
pub type IndexPicker = Arc<dyn Fn(usize) -> usize + Send + Sync>;

/// Selects a canned reply for the latest user message.
///
/// Stateless apart from the injected index picker; the default picker draws
/// uniformly with `rand`.
#[derive(Clone)]
pub struct ResponseSource {
    picker: IndexPicker,
}

impl Default for ResponseSource {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResponseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseSource")
            .field("templates", &TEMPLATES.len())
            .finish_non_exhaustive()
    }
}

impl ResponseSource {
    /// Uniform random selection
    pub fn new() -> Self {
        Self::with_picker(|len| rand::thread_rng().gen_range(0..len))
    }

    /// Selection driven by a caller-supplied index function.
    /// Out-of-range indices wrap around the template list.
    pub fn with_picker(picker: impl Fn(usize) -> usize + Send + Sync + 'static) -> Self {
        Self {
            picker: Arc::new(picker),
        }
    }

    /// Always pick the template at `index` (wrapped)
    pub fn fixed(index: usize) -> Self {
        Self::with_picker(move |_| index)
    }

    /// The template the next call would use for a given picker output
    pub fn template_at(index: usize) -> Template {
        TEMPLATES[index % TEMPLATES.len()]
    }

    /// Produce a reply. Total over all inputs, never empty.
    pub fn generate(&self, user_text: &str) -> String {
        let index = (self.picker)(TEMPLATES.len());
        Self::template_at(index).render(user_text)
    }
}

/// First `n` chars of `s`, clamped to its length
fn char_prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo_index() -> usize {
        TEMPLATES
            .iter()
            .position(|t| *t == Template::Echo)
            .unwrap()
    }

    #[test]
    fn test_exactly_one_echo_template() {
        let echoes = TEMPLATES.iter().filter(|t| **t == Template::Echo).count();
        assert_eq!(echoes, 1);
        assert_eq!(echo_index(), 8);
    }

    #[test]
    fn test_never_empty_random() {
        let source = ResponseSource::new();
        for i in 0..1000 {
            let input = "x".repeat(i % 40);
            assert!(!source.generate(&input).is_empty());
        }
    }

    #[test]
    fn test_never_empty_boundary_inputs() {
        let long = "a".repeat(1000);
        for index in 0..TEMPLATES.len() {
            let source = ResponseSource::fixed(index);
            for input in ["", "a", long.as_str()] {
                assert!(!source.generate(input).is_empty());
            }
        }
    }

    #[test]
    fn test_echo_quotes_first_fifteen_chars() {
        let source = ResponseSource::fixed(echo_index());
        assert_eq!(
            source.generate("Tell me about the weather today"),
            "I've analyzed \"Tell me about t...\" and I'm ready to assist further."
        );
    }

    #[test]
    fn test_echo_clamps_short_input() {
        let source = ResponseSource::fixed(echo_index());
        assert_eq!(
            source.generate("Hi"),
            "I've analyzed \"Hi...\" and I'm ready to assist further."
        );
        assert_eq!(
            source.generate(""),
            "I've analyzed \"...\" and I'm ready to assist further."
        );
    }

    #[test]
    fn test_echo_respects_char_boundaries() {
        let input = "ñ".repeat(20);
        assert_eq!(char_prefix(&input, ECHO_PREFIX_CHARS), "ñ".repeat(15));
        assert_eq!(char_prefix("日本語", ECHO_PREFIX_CHARS), "日本語");
    }

    #[test]
    fn test_static_template_ignores_input() {
        let source = ResponseSource::fixed(0);
        assert_eq!(
            source.generate("anything"),
            "I understand. Can you tell me more about that?"
        );
    }

    #[test]
    fn test_out_of_range_picker_wraps() {
        let source = ResponseSource::fixed(TEMPLATES.len() + 1);
        assert_eq!(
            source.generate("x"),
            "That's interesting! How does that make you feel?"
        );
    }

    #[test]
    fn test_picker_receives_template_count() {
        let source = ResponseSource::with_picker(|len| {
            assert_eq!(len, TEMPLATES.len());
            0
        });
        source.generate("x");
    }
}
