//! Lines that are never headings, whatever their style.

use super::config::ClassifierConfig;
use super::patterns;

const PLACEHOLDER_PHRASES: &[&str] = &["lorem ipsum"];

const SENTENCE_TERMINALS: &[char] = &['.', '?', '!', '。', '？', '！'];

/// Pure predicate over line text. Any single rule excludes the line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseFilter {
    max_words: usize,
    min_alpha_ratio: f32,
}

impl NoiseFilter {
    /// Create a filter from the classifier thresholds.
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            max_words: config.noise_max_words,
            min_alpha_ratio: config.noise_min_alpha_ratio,
        }
    }

    /// Whether the text must never be treated as a heading.
    pub fn is_noise(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return true;
        }

        let word_count = text.split_whitespace().count();

        text.ends_with(SENTENCE_TERMINALS)
            || word_count > self.max_words
            || alpha_ratio(text) < self.min_alpha_ratio
            || patterns::is_layout_artifact(text)
            || contains_placeholder(text)
            || (word_count < 3 && is_bare_marker(text))
    }
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

/// [`NoiseFilter::is_noise`] with default thresholds.
pub fn is_noise(text: &str) -> bool {
    NoiseFilter::default().is_noise(text)
}

fn alpha_ratio(text: &str) -> f32 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let letters = text.chars().filter(|c| c.is_alphabetic()).count();
    letters as f32 / total as f32
}

fn contains_placeholder(text: &str) -> bool {
    let lower = text.to_lowercase();
    PLACEHOLDER_PHRASES.iter().any(|p| lower.contains(p))
}

/// Text made only of bullet glyphs and bare numbers.
fn is_bare_marker(text: &str) -> bool {
    text.split_whitespace()
        .all(|t| patterns::is_bullet_token(t) || patterns::is_number_token(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentences_are_noise() {
        assert!(is_noise("This section describes the overall approach taken here."));
        assert!(is_noise("Why does this matter?"));
        assert!(is_noise("Act now!"));
        assert!(is_noise("本章では概要を説明します。"));
    }

    #[test]
    fn test_long_lines_are_noise() {
        assert!(is_noise(
            "one two three four five six seven eight nine ten eleven twelve thirteen"
        ));
        assert!(!is_noise("one two three four five six seven eight nine ten"));
    }

    #[test]
    fn test_low_letter_density() {
        assert!(is_noise("________________"));
        assert!(is_noise("12"));
        assert!(is_noise("2023-2024 / 17"));
    }

    #[test]
    fn test_artifacts_and_placeholders() {
        assert!(is_noise("Page 3"));
        assert!(is_noise("Fig. 2 System overview"));
        assert!(is_noise("Table 1 Results"));
        assert!(is_noise("Lorem Ipsum Dolor"));
    }

    #[test]
    fn test_bare_markers() {
        assert!(is_noise("•"));
        assert!(is_noise("iv"));
        assert!(is_noise("• 3"));
    }

    #[test]
    fn test_real_headings_pass() {
        assert!(!is_noise("Introduction"));
        assert!(!is_noise("1. Introduction"));
        assert!(!is_noise("2.3 Evaluation Methodology"));
        assert!(!is_noise("Appendix A: Glossary"));
        assert!(!is_noise("概要"));
        assert!(!is_noise("PATHWAY OPTIONS"));
    }

    #[test]
    fn test_idempotent() {
        let texts = ["Introduction", "Page 4", "A sentence.", "Scope"];
        let once: Vec<_> = texts.iter().filter(|t| !is_noise(t)).collect();
        let twice: Vec<_> = once.iter().filter(|t| !is_noise(t)).collect();
        assert_eq!(once.len(), twice.len());
    }

    #[test]
    fn test_custom_word_ceiling() {
        let filter = NoiseFilter::new(&ClassifierConfig::new().with_noise_max_words(3));
        assert!(filter.is_noise("four words right here"));
        assert!(!filter.is_noise("three words here"));
    }
}
